use ark_bls12_381::Fr;
use ark_ff::UniformRand;
use blob_kzg_primitives::testutils;
use blob_kzg_prover::kzg::KZG;
use criterion::{criterion_group, criterion_main, Criterion};
use std::time::Duration;

fn bench_kzg_proof(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let kzg = KZG::new();
    let setup = testutils::insecure_trusted_setup();

    c.bench_function("bench_kzg_proof", |b| {
        let input_poly = testutils::random_blob(&mut rng)
            .to_polynomial_eval_form()
            .unwrap();
        let z_fr = Fr::rand(&mut rng);
        b.iter(|| kzg.compute_kzg_proof(&input_poly, &z_fr, setup).unwrap());
    });

    for count in [1, 4, 16] {
        c.bench_function(&format!("bench_kzg_aggregate_proof_{}", count), |b| {
            let blobs: Vec<_> = (0..count).map(|_| testutils::random_blob(&mut rng)).collect();
            b.iter(|| kzg.compute_aggregate_proof(&blobs, setup).unwrap());
        });
    }
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
    targets = bench_kzg_proof
);
criterion_main!(benches);
