use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bsp_ephem::bsp_file::BspFile;

#[path = "../tests/common/mod.rs"]
mod common;

use common::{build_kernel, linear_record, Segment};

const RECORDS: usize = 1_000;
const INTLEN: f64 = 1_382_400.0; // 16 days, the DE440 Earth-Moon barycenter step

/// One segment of `RECORDS` records for the Earth-Moon barycenter wrt the Sun.
fn make_kernel() -> BspFile {
    let records = (0..RECORDS)
        .map(|k| {
            let mid = (k as f64 + 0.5) * INTLEN;
            linear_record(mid, INTLEN / 2.0, 1.5e8, 29.8)
        })
        .collect();
    let segment = Segment::tiled(3, 10, 0.0, INTLEN, records);
    BspFile::from_bytes(build_kernel(&[segment])).unwrap()
}

fn bench_get_coordinates(c: &mut Criterion) {
    let kernel = make_kernel();
    let span = RECORDS as f64 * INTLEN;
    let epochs: Vec<f64> = (1..10_000).map(|k| k as f64 * span / 10_000.0).collect();

    c.bench_function("get_coordinates/single_epoch", |b| {
        b.iter(|| kernel.state_at(black_box(span / 3.0), black_box(3), black_box(10)))
    });

    c.bench_function("get_coordinates/sweep_10k", |b| {
        b.iter(|| {
            for &et in &epochs {
                black_box(kernel.state_at(et, 3, 10).unwrap());
            }
        })
    });
}

fn bench_load(c: &mut Criterion) {
    let bytes = build_kernel(&[Segment::tiled(
        3,
        10,
        0.0,
        INTLEN,
        vec![linear_record(INTLEN / 2.0, INTLEN / 2.0, 0.0, 1.0); RECORDS],
    )]);

    c.bench_function("from_bytes/index", |b| {
        b.iter(|| BspFile::from_bytes(black_box(bytes.clone())).unwrap())
    });
}

criterion_group!(benches, bench_get_coordinates, bench_load);
criterion_main!(benches);
