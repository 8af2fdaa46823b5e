//! Wave spawner: timed grunts under a population cap, one boss per level.

use brawl_common::{Facing, LaneBounds, FLOOR_MAX, FLOOR_MIN};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{BOSS_SPAWN_OFFSET, GRUNT_SPAWN_OFFSET, MAX_ENEMIES};
use crate::enemy::EnemyKind;
use crate::level::LevelConfig;
use crate::rng::SimRng;

/// What the spawner wants added to the world this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOrder {
    /// Enemy kind
    pub kind: EnemyKind,
    /// Spawn position
    pub pos: Vec2,
    /// Initial facing
    pub facing: Facing,
}

impl SpawnOrder {
    /// Whether this order brings in the level boss.
    #[must_use]
    pub const fn is_boss(&self) -> bool {
        self.kind.is_boss()
    }
}

/// Spawn bookkeeping of one level attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    counter: u32,
    boss_spawned: bool,
    level_start_score: u32,
}

impl Spawner {
    /// Creates a spawner for a level entered with `level_start_score`.
    #[must_use]
    pub const fn new(level_start_score: u32) -> Self {
        Self {
            counter: 0,
            boss_spawned: false,
            level_start_score,
        }
    }

    /// Whether the boss has arrived this level.
    #[must_use]
    pub const fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    /// Ticks since the last grunt spawn.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Score the level was entered with.
    #[must_use]
    pub const fn level_start_score(&self) -> u32 {
        self.level_start_score
    }

    /// Advances one tick and decides what (if anything) to spawn.
    pub fn tick(
        &mut self,
        level: &LevelConfig,
        score: u32,
        player_pos: Vec2,
        live_enemies: usize,
        rng: &mut SimRng,
    ) -> Option<SpawnOrder> {
        self.counter += 1;

        let gained = score.saturating_sub(self.level_start_score);
        if !self.boss_spawned && gained >= level.boss_threshold {
            self.boss_spawned = true;
            return Some(SpawnOrder {
                kind: level.boss,
                pos: LaneBounds::ENEMY.clamp(Vec2::new(
                    player_pos.x + BOSS_SPAWN_OFFSET,
                    player_pos.y,
                )),
                facing: Facing::Left,
            });
        }

        if self.boss_spawned
            || self.counter as f32 <= level.spawn_interval_ticks()
            || live_enemies >= MAX_ENEMIES
        {
            return None;
        }

        self.counter = 0;
        let side = if rng.chance(0.5) { -1.0 } else { 1.0 };
        let x = player_pos.x + side * GRUNT_SPAWN_OFFSET;
        let kind = if rng.chance(0.5) {
            level.grunts[1]
        } else {
            level.grunts[0]
        };
        let y = rng.range(FLOOR_MIN + 10.0, FLOOR_MAX - 10.0);
        Some(SpawnOrder {
            kind,
            pos: Vec2::new(LaneBounds::ENEMY.clamp_x(x), y),
            facing: Facing::toward(player_pos.x - x),
        })
    }
}
