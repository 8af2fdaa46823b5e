//! The companion: follows the player, flees enemies, drops items.

use brawl_common::{Facing, LaneBounds};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    COMPANION_SPAWN, FLEE_SPEED, FOLLOW_DEAD_ZONE, FOLLOW_LERP, FOLLOW_OFFSET, FOLLOW_SNAP,
    SCARED_ENTER, SCARED_EXIT, THROW_OFFSET, THROW_RELEASE_TICKS, THROW_WINDUP_TICKS,
};
use crate::item::ItemKind;
use crate::player::Player;
use crate::rng::SimRng;

/// An item the companion let go of this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemDrop {
    /// Kind rolled
    pub kind: ItemKind,
    /// Where it starts
    pub pos: Vec2,
}

/// The non-combat companion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    /// Ground position
    pub pos: Vec2,
    /// Facing
    pub facing: Facing,
    /// Ticks since the last drop
    pub throw_timer: u32,
    /// Walking animation
    pub is_walking: bool,
    /// Throwing pose
    pub is_throwing: bool,
    /// Fleeing from enemies
    pub is_scared: bool,
}

impl Default for Companion {
    fn default() -> Self {
        Self::new(Vec2::new(COMPANION_SPAWN.0, COMPANION_SPAWN.1))
    }
}

impl Companion {
    /// Creates a calm companion at `pos`.
    #[must_use]
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            facing: Facing::Right,
            throw_timer: 0,
            is_walking: false,
            is_throwing: false,
            is_scared: false,
        }
    }

    /// Updates the scared flag with hysteresis on the nearest enemy distance.
    pub fn update_fear(&mut self, nearest: Option<f32>) {
        let d = nearest.unwrap_or(f32::INFINITY);
        if self.is_scared {
            if d > SCARED_EXIT {
                self.is_scared = false;
            }
        } else if d < SCARED_ENTER {
            self.is_scared = true;
        }
    }

    /// Flees or follows, then clamps into the lane.
    pub fn update_movement(&mut self, player: &Player, enemies: &[Vec2]) {
        let nearest = enemies
            .iter()
            .map(|&e| (e.distance(self.pos), e))
            .min_by(|a, b| a.0.total_cmp(&b.0));
        self.update_fear(nearest.map(|(d, _)| d));

        if self.is_scared {
            self.flee(nearest);
        } else {
            self.follow(player);
        }
        self.pos = LaneBounds::PLAYER.clamp(self.pos);
    }

    fn flee(&mut self, nearest: Option<(f32, Vec2)>) {
        match nearest {
            Some((d, enemy)) if d < SCARED_EXIT => {
                let away = self.pos - enemy;
                let len = away.length();
                if len > FOLLOW_SNAP {
                    self.pos.x += away.x / len * FLEE_SPEED;
                    self.pos.y += away.y / len * FLEE_SPEED * 0.5;
                    self.facing = Facing::toward(away.x);
                }
                self.is_walking = true;
            },
            _ => self.is_walking = false,
        }
    }

    fn follow(&mut self, player: &Player) {
        let target = Vec2::new(
            player.pos.x - player.facing.sign() * FOLLOW_OFFSET,
            player.pos.y,
        );
        let delta = target - self.pos;
        if delta.length() <= FOLLOW_DEAD_ZONE {
            self.is_walking = false;
            return;
        }

        self.pos += delta * FOLLOW_LERP;
        if (target.x - self.pos.x).abs() < FOLLOW_SNAP {
            self.pos.x = target.x;
        }
        if (target.y - self.pos.y).abs() < FOLLOW_SNAP {
            self.pos.y = target.y;
        }
        self.facing = if self.pos.x < player.pos.x {
            Facing::Right
        } else {
            Facing::Left
        };
        self.is_walking = true;
    }

    /// Advances the throw timer and returns a drop when it fires.
    pub fn update_throw(&mut self, rng: &mut SimRng) -> Option<ItemDrop> {
        self.throw_timer += 1;
        self.is_throwing = self.throw_timer > THROW_WINDUP_TICKS;
        if self.throw_timer <= THROW_RELEASE_TICKS {
            return None;
        }

        self.throw_timer = 0;
        self.is_throwing = false;
        let kind = ItemKind::from_roll(rng.unit());
        Some(ItemDrop {
            kind,
            pos: Vec2::new(self.pos.x + self.facing.sign() * THROW_OFFSET, self.pos.y),
        })
    }

    /// Pushes the companion sideways (clamped).
    pub fn shove(&mut self, dx: f32) {
        self.pos.x = LaneBounds::PLAYER.clamp_x(self.pos.x + dx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_follows_behind_player() {
        let mut companion = Companion::default();
        let mut player = Player::default();
        player.pos = Vec2::new(600.0, 400.0);

        for _ in 0..200 {
            companion.update_movement(&player, &[]);
        }
        let target = Vec2::new(600.0 - FOLLOW_OFFSET, 400.0);
        assert!(companion.pos.distance(target) <= FOLLOW_DEAD_ZONE);
        assert!(!companion.is_walking);
        assert_eq!(companion.facing, Facing::Right);

        player.facing = Facing::Left;
        companion.update_movement(&player, &[]);
        assert!(companion.is_walking);
    }

    #[test]
    fn test_flees_nearest_enemy() {
        let mut companion = Companion::new(Vec2::new(500.0, 390.0));
        let player = Player::default();
        let enemy = Vec2::new(560.0, 390.0);

        companion.update_movement(&player, &[enemy, Vec2::new(2000.0, 390.0)]);
        assert!(companion.is_scared);
        assert!(companion.pos.x < 500.0);
        assert_eq!(companion.facing, Facing::Left);
    }

    #[test]
    fn test_fear_hysteresis() {
        let mut companion = Companion::default();
        companion.update_fear(Some(SCARED_ENTER - 1.0));
        assert!(companion.is_scared);
        companion.update_fear(Some(SCARED_EXIT - 1.0));
        assert!(companion.is_scared);
        companion.update_fear(Some(SCARED_EXIT + 1.0));
        assert!(!companion.is_scared);
        companion.update_fear(Some(SCARED_ENTER + 1.0));
        assert!(!companion.is_scared);
        companion.update_fear(None);
        assert!(!companion.is_scared);
    }

    #[test]
    fn test_throw_cycle() {
        let mut companion = Companion::default();
        let mut rng = SimRng::with_seed(8);

        for tick in 1..=THROW_RELEASE_TICKS {
            assert!(companion.update_throw(&mut rng).is_none());
            assert_eq!(companion.is_throwing, tick > THROW_WINDUP_TICKS);
        }
        let drop = companion.update_throw(&mut rng).expect("drop");
        assert_eq!(drop.pos.x, companion.pos.x + THROW_OFFSET);
        assert_eq!(companion.throw_timer, 0);
        assert!(!companion.is_throwing);
    }

    #[test]
    fn test_shove_clamped() {
        let mut companion = Companion::new(Vec2::new(60.0, 400.0));
        companion.shove(-120.0);
        assert_eq!(companion.pos.x, LaneBounds::PLAYER.min_x);
    }

    proptest! {
        #[test]
        fn fear_never_flickers_between_thresholds(ds in proptest::collection::vec(SCARED_ENTER..SCARED_EXIT, 1..100), start in any::<bool>()) {
            let mut companion = Companion::default();
            companion.is_scared = start;
            for d in ds {
                companion.update_fear(Some(d));
                prop_assert_eq!(companion.is_scared, start);
            }
        }

        #[test]
        fn stays_in_lane(ex in 0.0f32..3200.0, ey in 300.0f32..480.0, steps in 1usize..100) {
            let mut companion = Companion::new(Vec2::new(40.0, 360.0));
            let player = Player::default();
            for _ in 0..steps {
                companion.update_movement(&player, &[Vec2::new(ex, ey)]);
                prop_assert!(LaneBounds::PLAYER.contains(companion.pos));
            }
        }
    }
}
