use criterion::*;
use md4sum::crypto::hash::ed2k;
use md4sum::utils::human_readable_size;

fn bench_ed2k(c: &mut Criterion) {
    let mut group = c.benchmark_group("ed2k");
    group.sample_size(10);

    for size in [ed2k::BUF_SIZE, ed2k::BLOCK_SIZE, 2 * ed2k::BLOCK_SIZE + ed2k::BUF_SIZE] {
        let data = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(human_readable_size(size), |b| b.iter(|| {
            black_box(ed2k::process(&data[..]).map(|r| r.digest()))
        }));
    }

    group.finish();
}

criterion_group!(benches, bench_ed2k);
criterion_main!(benches);
