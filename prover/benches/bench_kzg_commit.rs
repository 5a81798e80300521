use blob_kzg_primitives::testutils;
use blob_kzg_prover::kzg::KZG;
use criterion::{criterion_group, criterion_main, Criterion};
use std::time::Duration;

fn bench_kzg_commit(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let kzg = KZG::new();
    let setup = testutils::insecure_trusted_setup();

    c.bench_function("bench_kzg_commit_eval_form", |b| {
        let input_poly = testutils::random_blob(&mut rng)
            .to_polynomial_eval_form()
            .unwrap();
        b.iter(|| kzg.commit_eval_form(&input_poly, setup).unwrap());
    });

    c.bench_function("bench_kzg_commit_coeff_form", |b| {
        let input_poly = testutils::random_blob(&mut rng)
            .to_polynomial_eval_form()
            .unwrap()
            .to_coeff_form()
            .unwrap();
        b.iter(|| kzg.commit_coeff_form(&input_poly, setup).unwrap());
    });

    c.bench_function("bench_kzg_commit_blobs_16", |b| {
        let blobs: Vec<_> = (0..16).map(|_| testutils::random_blob(&mut rng)).collect();
        b.iter(|| kzg.commit_blobs(&blobs, setup).unwrap());
    });
}

fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(5))  // Warm-up time
        .measurement_time(Duration::from_secs(10))  // Measurement time
        .sample_size(10) // Number of samples to take
}

criterion_group!(
    name = benches;
    config = criterion_config();
    targets = bench_kzg_commit
);
criterion_main!(benches);
