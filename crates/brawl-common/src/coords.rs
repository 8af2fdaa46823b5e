//! Lane geometry and facing direction.
//!
//! The world is a long horizontal strip. Characters walk inside a narrow
//! vertical band (the "lane"); jumping happens on a separate elevation axis
//! that never changes `y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Total world width in pixels.
pub const WORLD_WIDTH: f32 = 3200.0;

/// Viewport width the spawner offsets are derived from.
pub const VIEW_WIDTH: f32 = 800.0;

/// Top of the walkable band.
pub const FLOOR_MIN: f32 = 350.0;

/// Bottom of the walkable band.
pub const FLOOR_MAX: f32 = 432.0;

/// Horizontal facing of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Looking toward negative x.
    Left,
    /// Looking toward positive x.
    #[default]
    Right,
}

impl Facing {
    /// Unit sign of this facing (+1 right, -1 left).
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Facing that looks along `dx`; zero and negative values face left.
    #[must_use]
    pub fn toward(dx: f32) -> Self {
        if dx > 0.0 {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Axis-aligned rectangle a character's ground position is kept inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneBounds {
    /// Minimum X coordinate
    pub min_x: f32,
    /// Maximum X coordinate
    pub max_x: f32,
    /// Minimum Y coordinate
    pub min_y: f32,
    /// Maximum Y coordinate
    pub max_y: f32,
}

impl LaneBounds {
    /// Bounds for the player and the companion.
    pub const PLAYER: Self = Self::new(30.0, WORLD_WIDTH - 30.0, FLOOR_MIN, FLOOR_MAX);

    /// Bounds for enemies (they may get a little closer to the world edge).
    pub const ENEMY: Self = Self::new(10.0, WORLD_WIDTH - 10.0, FLOOR_MIN, FLOOR_MAX);

    /// Creates new bounds.
    #[must_use]
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Clamps a position into the bounds.
    #[must_use]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(self.min_x, self.max_x),
            pos.y.clamp(self.min_y, self.max_y),
        )
    }

    /// Clamps only the x coordinate.
    #[must_use]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }

    /// Checks whether a position lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, pos: Vec2) -> bool {
        (self.min_x..=self.max_x).contains(&pos.x) && (self.min_y..=self.max_y).contains(&pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_facing_toward() {
        assert_eq!(Facing::toward(3.0), Facing::Right);
        assert_eq!(Facing::toward(-0.5), Facing::Left);
        assert_eq!(Facing::toward(0.0), Facing::Left);
        assert_eq!(Facing::Left.sign(), -1.0);
    }

    #[test]
    fn test_enemy_bounds_wider_than_player() {
        assert!(LaneBounds::ENEMY.min_x < LaneBounds::PLAYER.min_x);
        assert!(LaneBounds::ENEMY.max_x > LaneBounds::PLAYER.max_x);
    }

    proptest! {
        #[test]
        fn clamped_positions_are_inside(x in -5000.0f32..9000.0, y in -500.0f32..1500.0) {
            let lane = LaneBounds::PLAYER;
            prop_assert!(lane.contains(lane.clamp(Vec2::new(x, y))));
        }
    }
}
