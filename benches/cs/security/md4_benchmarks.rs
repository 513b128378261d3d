use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ed2k::md4_digest;

fn bench_md4(c: &mut Criterion) {
    let mut group = c.benchmark_group("md4");
    for size in [64usize, 1024, 1024 * 1024] {
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| md4_digest(black_box(data)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_md4);
criterion_main!(benches);
