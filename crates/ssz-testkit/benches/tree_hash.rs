//! Hash tree root of a validator-registry state, fresh and incremental.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ssz::HashSession;
use ssz_core::SszSedes;
use ssz_testkit::fixtures::{perturb_balances, update_state, StateSchema};

const NUM_VALIDATORS: u64 = 1 << 13;

fn bench_state(c: &mut Criterion) {
    let schema = StateSchema::standard().unwrap();
    let state = schema.make_state(NUM_VALIDATORS);

    let mut group = c.benchmark_group("state");
    group.sample_size(10);

    group.bench_function("fresh", |b| {
        b.iter(|| schema.state.hash_tree_root(&state).unwrap())
    });

    group.bench_function("update_one_index", |b| {
        b.iter_batched(
            || {
                let mut session = HashSession::default();
                session.hash_tree_root(&state, &schema.state).unwrap();
                let mut updated = state.clone();
                update_state(&mut updated, 100);
                (session, updated)
            },
            |(mut session, updated)| session.hash_tree_root(&updated, &schema.state).unwrap(),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("perturb_balances", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter_batched(
            || {
                let mut session = HashSession::default();
                session.hash_tree_root(&state, &schema.state).unwrap();
                let mut updated = state.clone();
                perturb_balances(&mut updated, &mut rng, 16);
                (session, updated)
            },
            |(mut session, updated)| session.hash_tree_root(&updated, &schema.state).unwrap(),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_state);
criterion_main!(benches);
