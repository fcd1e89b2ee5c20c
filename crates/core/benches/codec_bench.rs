use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huftree_core::{compress, decompress_with, TreeLayout};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Text-like data: a small alphabet with a few dominant symbols.
fn generate_text(size: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let alphabet = b"eeeeeeetttttaaaoooinshrdlu .,\n";
    (0..size)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

fn generate_random(size: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..size).map(|_| rng.gen()).collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for size in [1024, 65536] {
        for (name, data) in [("text", generate_text(size)), ("random", generate_random(size))] {
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
                b.iter(|| compress(black_box(data)).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let size = 65536;
    let packed = compress(&generate_text(size)).unwrap();

    for layout in [TreeLayout::General, TreeLayout::Postorder] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new(format!("{layout:?}"), size),
            &packed,
            |b, packed| b.iter(|| decompress_with(black_box(packed), layout).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
