use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match3::core::{find_matches, Board, GameMode, NullAudio, SimpleRng, World, WorldConfig};
use match3::types::{GameModeKind, Vec2};

fn bench_fill(c: &mut Criterion) {
    let mut board = Board::new(8, 8);
    let mut rng = SimpleRng::new(12345);

    c.bench_function("fill_8x8", |b| {
        b.iter(|| {
            board.fill(&mut rng, black_box(5));
        })
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let mut board = Board::new(8, 8);
    board.fill(&mut SimpleRng::new(12345), 5);

    c.bench_function("find_matches_8x8", |b| {
        b.iter(|| find_matches(black_box(&board)))
    });
}

fn bench_try_switch(c: &mut Criterion) {
    let mut world = World::new(WorldConfig::default()).unwrap();
    world.activate(GameMode::new(GameModeKind::Classic));

    // Measures the speculative swap + detection; committed swaps are settled.
    c.bench_function("try_switch_cells", |b| {
        b.iter(|| {
            world.try_switch_cells(black_box(Vec2::new(3, 3)), Vec2::new(4, 3), false);
            while !world.is_interaction_enabled() {
                world.tick(16, &mut NullAudio);
            }
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut world = World::new(WorldConfig::default()).unwrap();
    world.activate(GameMode::new(GameModeKind::QuickDeath));

    c.bench_function("world_tick_16ms", |b| {
        b.iter(|| {
            world.tick(black_box(16), &mut NullAudio);
        })
    });
}

criterion_group!(
    benches,
    bench_fill,
    bench_find_matches,
    bench_try_switch,
    bench_tick
);
criterion_main!(benches);
