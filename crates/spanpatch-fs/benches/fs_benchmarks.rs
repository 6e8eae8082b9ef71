use criterion::{Criterion, black_box, criterion_group, criterion_main};
use spanpatch_fs::io::{self, RobustnessConfig};
use spanpatch_fs::{NormalizedPath, checksum};
use tempfile::tempdir;

fn write_atomic_benchmark(c: &mut Criterion) {
    c.bench_function("io::write_atomic", |b| {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("target.tsx"));
        let content = "<div>{/* begin */}</div>\n".repeat(2_000);
        let config = RobustnessConfig {
            enable_fsync: false,
            ..RobustnessConfig::default()
        };

        b.iter(|| {
            io::write_atomic(black_box(&path), black_box(content.as_bytes()), config).unwrap();
        })
    });
}

fn checksum_benchmark(c: &mut Criterion) {
    let content = "x".repeat(256 * 1024);
    c.bench_function("checksum::checksum_text (256KiB)", |b| {
        b.iter(|| checksum::checksum_text(black_box(&content)))
    });
}

criterion_group!(benches, write_atomic_benchmark, checksum_benchmark);
criterion_main!(benches);
