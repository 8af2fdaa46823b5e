//! Per-tick input snapshot.
//!
//! Inputs are level-triggered: the simulation looks at which buttons are
//! held on the current tick, not at press edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::DIAGONAL_FACTOR;

/// Buttons held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Walk toward negative x
    pub left: bool,
    /// Walk toward positive x
    pub right: bool,
    /// Walk up the lane (negative y)
    pub up: bool,
    /// Walk down the lane (positive y)
    pub down: bool,
    /// Punch
    pub punch: bool,
    /// Buff attack
    pub buff: bool,
    /// Jump
    pub jump: bool,
}

impl InputState {
    /// No buttons held.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            left: false,
            right: false,
            up: false,
            down: false,
            punch: false,
            buff: false,
            jump: false,
        }
    }

    /// Sets the horizontal direction buttons.
    #[must_use]
    pub const fn with_horizontal(mut self, left: bool, right: bool) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Sets the lane direction buttons.
    #[must_use]
    pub const fn with_vertical(mut self, up: bool, down: bool) -> Self {
        self.up = up;
        self.down = down;
        self
    }

    /// Sets the punch button.
    #[must_use]
    pub const fn with_punch(mut self, held: bool) -> Self {
        self.punch = held;
        self
    }

    /// Sets the buff button.
    #[must_use]
    pub const fn with_buff(mut self, held: bool) -> Self {
        self.buff = held;
        self
    }

    /// Sets the jump button.
    #[must_use]
    pub const fn with_jump(mut self, held: bool) -> Self {
        self.jump = held;
        self
    }

    /// Movement intent with components in `{-1, 0, 1}`, scaled by
    /// [`DIAGONAL_FACTOR`] when both axes are non-zero.
    #[must_use]
    pub fn intent(&self) -> Vec2 {
        let x = f32::from(i8::from(self.right) - i8::from(self.left));
        let y = f32::from(i8::from(self.down) - i8::from(self.up));
        if x != 0.0 && y != 0.0 {
            Vec2::new(x, y) * DIAGONAL_FACTOR
        } else {
            Vec2::new(x, y)
        }
    }

    /// Whether any direction is held.
    #[must_use]
    pub const fn has_movement(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Whether any button at all is held.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.has_movement() || self.punch || self.buff || self.jump
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_intent() {
        let input = InputState::idle();
        assert_eq!(input.intent(), Vec2::ZERO);
        assert!(!input.any());
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let input = InputState::idle().with_horizontal(true, true);
        assert_eq!(input.intent(), Vec2::ZERO);
        assert!(input.has_movement());
    }

    #[test]
    fn test_diagonal_is_scaled() {
        let input = InputState::idle()
            .with_horizontal(false, true)
            .with_vertical(true, false);
        let intent = input.intent();
        assert!((intent.x - 0.707).abs() < 1e-6);
        assert!((intent.y + 0.707).abs() < 1e-6);
    }

    #[test]
    fn test_action_buttons_count_as_input() {
        assert!(InputState::idle().with_jump(true).any());
        assert!(!InputState::idle().with_punch(true).has_movement());
    }
}
