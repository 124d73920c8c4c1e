use criterion::{criterion_group, criterion_main, Criterion};
use platematch::{resolve, Gallery, ImageView, Interpolation, Template};
use std::hint::black_box;

fn make_plate(width: usize, height: usize, seed: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13 + seed) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn bench_resolve(c: &mut Criterion) {
    let gallery: Gallery = (0..20)
        .map(|i| Template::new(format!("P{i:03}"), make_plate(180, 40, i * 31), 180, 40).unwrap())
        .collect();

    let region_data = make_plate(150, 34, 5 * 31);
    let region = ImageView::from_slice(&region_data, 150, 34).unwrap();

    c.bench_function("resolve_bilinear_20_templates", |b| {
        b.iter(|| {
            let best = resolve(black_box(region), &gallery, Interpolation::Bilinear).unwrap();
            black_box(best)
        })
    });
    c.bench_function("resolve_nearest_20_templates", |b| {
        b.iter(|| {
            let best = resolve(black_box(region), &gallery, Interpolation::Nearest).unwrap();
            black_box(best)
        })
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
