use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tap_merge::core::{Board, GameSnapshot, GameState, PlacementStrategy, SpawnResult, SpawnRng};
use tap_merge::types::GridPos;

fn bench_spawn_until_full(c: &mut Criterion) {
    c.bench_function("spawn_until_full", |b| {
        b.iter(|| {
            let mut state = GameState::new(12345).with_placement(PlacementStrategy::Exhaustive);
            while let SpawnResult::Placed(_) = state.spawn_random_tile() {}
            black_box(state.tiles().len());
        })
    });
}

fn bench_pick_cell_crowded(c: &mut Criterion) {
    let mut board = Board::new();
    for pos in GridPos::all().take(15) {
        board.place(1 + (pos.index() as u32 % 2), pos);
    }
    let mut rng = SpawnRng::new(12345);

    c.bench_function("pick_cell_retry_one_free", |b| {
        b.iter(|| black_box(rng.pick_cell(&board, PlacementStrategy::default())))
    });
    c.bench_function("pick_cell_exhaustive_one_free", |b| {
        b.iter(|| black_box(rng.pick_cell(&board, PlacementStrategy::Exhaustive)))
    });
}

fn bench_tap_merge(c: &mut Criterion) {
    let a_pos = GridPos::new(0, 0).unwrap();
    let b_pos = GridPos::new(3, 3).unwrap();

    c.bench_function("tap_merge_pair", |b| {
        b.iter(|| {
            let mut state = GameState::new(12345);
            let a = state.place_tile(1, a_pos).unwrap();
            let b = state.place_tile(1, b_pos).unwrap();
            state.tap(a);
            black_box(state.tap(b));
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.restart();
    for _ in 0..10 {
        state.spawn_random_tile();
    }
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(snap.score);
        })
    });
}

criterion_group!(
    benches,
    bench_spawn_until_full,
    bench_pick_cell_crowded,
    bench_tap_merge,
    bench_snapshot_into
);
criterion_main!(benches);
