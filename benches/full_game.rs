//! Benchmarks for complete games and engine cloning.
//!
//! Greedy opponents clone the board for every candidate, so both the full
//! game loop and the clone are on the hot path.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use stability_duel::ai::{GreedyOpponent, OpponentPolicy, UniformOpponent};
use stability_duel::core::{EngineConfig, GameRng, PlayerId};
use stability_duel::engine::{Resolution, TurnEngine};

fn run_game(seed: u64, policy: &dyn OpponentPolicy) -> TurnEngine {
    let mut engine = TurnEngine::new(EngineConfig::default().with_seed(seed));
    let mut rng = GameRng::new(seed).for_context("policies");
    while !engine.is_finished() {
        for player in PlayerId::BOTH {
            if let Some(selection) = policy.choose(&engine, player, &mut rng) {
                engine.select_card(player, selection);
            }
        }
        if engine.resolve_turn() == Resolution::NotReady {
            engine.end_turn();
        }
    }
    engine
}

fn bench_greedy_game(c: &mut Criterion) {
    let greedy = GreedyOpponent::default();
    c.bench_function("greedy_game", |b| {
        b.iter(|| {
            let engine = run_game(black_box(42), &greedy);
            black_box(engine.result())
        });
    });
}

fn bench_uniform_game(c: &mut Criterion) {
    c.bench_function("uniform_game", |b| {
        b.iter(|| {
            let engine = run_game(black_box(42), &UniformOpponent);
            black_box(engine.result())
        });
    });
}

fn bench_engine_clone(c: &mut Criterion) {
    let engine = run_game(7, &UniformOpponent);
    c.bench_function("engine_clone", |b| {
        b.iter(|| black_box(engine.clone()));
    });
}

criterion_group!(benches, bench_greedy_game, bench_uniform_game, bench_engine_clone);
criterion_main!(benches);
