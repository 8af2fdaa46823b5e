//! World step benchmarks: a crowded level tick and snapshot encoding.

use brawl_sim::{EnemyKind, InputState, LevelId, World};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use glam::Vec2;

fn crowded_world() -> World {
    let mut world = World::new(LevelId::Factory, 99).with_spawn_invincibility(u32::MAX / 2);
    for i in 0..6 {
        let kind = if i % 2 == 0 {
            EnemyKind::Guard
        } else {
            EnemyKind::Scientist
        };
        world.spawn_enemy(kind, Vec2::new(300.0 + i as f32 * 70.0, 360.0 + i as f32 * 10.0));
    }
    world.spawn_enemy(EnemyKind::Juggernaut, Vec2::new(700.0, 390.0));
    world
}

fn bench_step(c: &mut Criterion) {
    let punch = InputState::idle().with_horizontal(false, true).with_punch(true);

    c.bench_function("world_step_crowded_60_ticks", |b| {
        b.iter_batched(
            crowded_world,
            |mut world| {
                for _ in 0..60 {
                    world.step(&punch);
                }
                world
            },
            BatchSize::SmallInput,
        )
    });

    let world = crowded_world();
    c.bench_function("snapshot_encode", |b| {
        b.iter(|| world.encode_snapshot().map(|bytes| bytes.len()))
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
