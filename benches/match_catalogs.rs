use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use catmatch::catalog::{Catalog, Column};
use catmatch::matching::match_positions;
use catmatch::merge::{merge_all, MergeParams};
use catmatch::sky::SkyPositions;

/// Uniform sources in a 0.5° × 0.5° field around (150°, 2.2°).
fn random_field(rng: &mut StdRng, n: usize) -> (Vec<f64>, Vec<f64>) {
    (0..n)
        .map(|_| {
            (
                150.0 + rng.random_range(-0.25..0.25),
                2.2 + rng.random_range(-0.25..0.25),
            )
        })
        .unzip()
}

/// Same sources, each shifted by up to ~0.1 arcsec.
fn jitter(rng: &mut StdRng, lon: &[f64], lat: &[f64]) -> (Vec<f64>, Vec<f64>) {
    lon.iter()
        .zip(lat)
        .map(|(&l, &b)| {
            (
                l + rng.random_range(-3e-5..3e-5),
                b + rng.random_range(-3e-5..3e-5),
            )
        })
        .unzip()
}

fn catalog(lon: Vec<f64>, lat: Vec<f64>, rng: &mut StdRng) -> Catalog {
    let mag = (0..lon.len()).map(|_| rng.random_range(18.0..25.0)).collect();
    Catalog::new(vec![
        Column::from_f64("X_WORLD", lon),
        Column::from_f64("Y_WORLD", lat),
        Column::from_f64("MAG_AUTO", mag),
    ])
    .unwrap()
}

fn bench_match_positions(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    for n in [500usize, 2_000] {
        let (lon_a, lat_a) = random_field(&mut rng, n);
        let (lon_b, lat_b) = jitter(&mut rng, &lon_a, &lat_a);
        let a = SkyPositions::from_degrees(lon_a, lat_a).unwrap();
        let b = SkyPositions::from_degrees(lon_b, lat_b).unwrap();

        c.bench_function(&format!("match_positions/brute_force/{n}"), |bench| {
            bench.iter(|| match_positions(black_box(&a), black_box(&b), black_box(1e-4)))
        });
    }
}

fn bench_merge_three_filters(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADC0DE);
    let n = 1_000;

    let (lon, lat) = random_field(&mut rng, n);
    let catalogs: Vec<Catalog> = (0..3)
        .map(|_| {
            let (l, b) = jitter(&mut rng, &lon, &lat);
            catalog(l, b, &mut rng)
        })
        .collect();
    let params = MergeParams::builder().tags(["g", "r", "i"]).build().unwrap();

    c.bench_function("merge_all/3x1000", |bench| {
        bench.iter_batched(
            || catalogs.clone(),
            |cats| merge_all(cats, black_box(&params)).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_match_positions, bench_merge_three_filters);
criterion_main!(benches);
