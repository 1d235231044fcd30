use criterion::{black_box, criterion_group, criterion_main, Criterion};
use huffpack::{compress_bytes, decompress_bytes};

fn criterion_benchmark(c: &mut Criterion) {
    let random_input = (0..65536).map(|_| rand::random::<u8>()).collect::<Vec<u8>>();
    let text_input = "the quick brown fox jumps over the lazy dog. ".repeat(1500);

    c.bench_function("huffman compress random", |b| {
        b.iter(|| compress_bytes(black_box(&random_input)))
    });
    c.bench_function("huffman compress text", |b| {
        b.iter(|| compress_bytes(black_box(text_input.as_bytes())))
    });

    let compressed = compress_bytes(&random_input).unwrap();
    c.bench_function("huffman decompress random", |b| {
        b.iter(|| decompress_bytes(black_box(&compressed)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
