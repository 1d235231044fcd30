use clap::{Parser, Subcommand};
use huffpack::{compress, decompress};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Huffman compression and decompression
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// compresses <INPUT> into <OUTPUT>
    #[command(alias = "c")]
    Compress { input: PathBuf, output: PathBuf },

    /// restores the original of a compressed <INPUT> into <OUTPUT>
    #[command(alias = "d")]
    Decompress { input: PathBuf, output: PathBuf },
}

fn run(args: Args) -> huffpack::Result<()> {
    match args.mode {
        Mode::Compress { input, output } => {
            let mut source = BufReader::new(File::open(&input)?);
            let sink = BufWriter::new(File::create(&output)?);
            let stats = compress(&mut source, sink)?;
            println!("Compression ratio: {:.2} %", stats.ratio());
        }
        Mode::Decompress { input, output } => {
            let source = BufReader::new(File::open(&input)?);
            let mut sink = BufWriter::new(File::create(&output)?);
            decompress(source, &mut sink)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("huffpack: {}", e);
            ExitCode::FAILURE
        }
    }
}
