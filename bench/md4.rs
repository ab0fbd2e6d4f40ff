use criterion::*;
use md4sum::utils::human_readable_size;

fn bench_md4(c: &mut Criterion) {

    fn bench_md4_hash(c: &mut Criterion, size: usize) {
        let data = vec![0u8; size];

        let test_name = format!("md4 hash {}", human_readable_size(size));
        c.bench_function(&test_name, |b| b.iter(|| {
            black_box(md4sum::crypto::hash::md4::compute(&data));
        }));
    }

    fn bench_crate_md4_hash(c: &mut Criterion, size: usize) {
        use md4::Digest;
        let data = vec![0u8; size];

        let test_name = format!("crate md4 hash {}", human_readable_size(size));
        c.bench_function(&test_name, |b| b.iter(|| {
            black_box(md4::Md4::digest(&data));
        }));
    }

    for size in [16, 64, 256, 1024, 8192, 65536] {
        bench_md4_hash(c, size);
        bench_crate_md4_hash(c, size);
    }
}

criterion_group!(benches, bench_md4);
criterion_main!(benches);
