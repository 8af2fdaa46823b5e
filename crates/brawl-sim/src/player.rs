//! Player state, damage intake and idle behaviour.

use brawl_common::Facing;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    COMBO_TIMEOUT, EAT_DURATION_TICKS, IDLE_EAT_TICKS, MAX_HP, PLAYER_SPAWN,
};
use crate::feedback::{palette, Burst, Feedback, ParticleStyle};
use crate::input::InputState;

/// Text shown when the player starts eating.
pub const EATING_TEXT: &str = "nhom nhom~";

/// Damage applied to the player by an enemy attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerHit {
    /// HP to remove
    pub damage: i32,
    /// Hurt flash duration
    pub hurt_ticks: u32,
    /// Invincibility granted afterwards
    pub invincible_ticks: u32,
    /// Horizontal velocity forced onto the player, if any
    pub shove: Option<f32>,
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Ground position
    pub pos: Vec2,
    /// Planar velocity
    pub vel: Vec2,
    /// Elevation above the ground
    pub z: f32,
    /// Elevation speed
    pub vz: f32,
    /// Facing
    pub facing: Facing,
    /// Hit points in `[0, MAX_HP]`
    pub hp: i32,
    /// Punch in progress
    pub attacking: bool,
    /// Buff attack in progress
    pub buffing: bool,
    /// Hurt flash active
    pub hurt: bool,
    /// Remaining punch ticks
    pub atk_timer: u32,
    /// Remaining buff ticks
    pub buff_timer: u32,
    /// Remaining hurt ticks
    pub hurt_timer: u32,
    /// Remaining invincibility ticks
    pub invincible: u32,
    /// Remaining landing squash ticks
    pub land_squash: u32,
    /// Remaining coyote ticks
    pub coyote_timer: u32,
    /// Whether the player was grounded last tick
    pub was_grounded: bool,
    /// Consecutive hits landed
    pub combo: u32,
    /// Ticks left before the combo resets
    pub combo_timer: u32,
    /// Remaining whole-world freeze ticks
    pub hitstop: u32,
    /// Ticks spent without input
    pub idle_timer: u32,
    /// Eating animation active
    pub eating: bool,
    /// Remaining eating ticks
    pub eat_timer: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1))
    }
}

impl Player {
    /// Creates a player with full HP at `pos`.
    #[must_use]
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            z: 0.0,
            vz: 0.0,
            facing: Facing::Right,
            hp: MAX_HP,
            attacking: false,
            buffing: false,
            hurt: false,
            atk_timer: 0,
            buff_timer: 0,
            hurt_timer: 0,
            invincible: 0,
            land_squash: 0,
            coyote_timer: 0,
            was_grounded: true,
            combo: 0,
            combo_timer: 0,
            hitstop: 0,
            idle_timer: 0,
            eating: false,
            eat_timer: 0,
        }
    }

    /// Sets starting HP, clamped to `[1, MAX_HP]`.
    #[must_use]
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp.clamp(1, MAX_HP);
        self
    }

    /// Sets starting invincibility.
    #[must_use]
    pub fn with_invincibility(mut self, ticks: u32) -> Self {
        self.invincible = ticks;
        self
    }

    /// On the ground and not moving upward.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.z <= 0.0 && self.vz <= 0.0
    }

    /// HP reached zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Not invincible and below `max_z`.
    #[must_use]
    pub fn exposed_below(&self, max_z: f32) -> bool {
        self.invincible == 0 && self.z < max_z
    }

    /// Screen-space anchor above the player's head, following the jump.
    #[must_use]
    pub fn overhead(&self, height: f32) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - height - self.z)
    }

    /// Applies an enemy hit. Returns true if the player died.
    pub fn take_hit(&mut self, hit: PlayerHit) -> bool {
        self.hp = (self.hp - hit.damage).clamp(0, MAX_HP);
        self.hurt = true;
        self.hurt_timer = hit.hurt_ticks;
        self.invincible = hit.invincible_ticks;
        self.combo = 0;
        self.combo_timer = 0;
        if let Some(vx) = hit.shove {
            self.vel.x = vx;
        }
        self.is_dead()
    }

    /// Restores HP up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).clamp(0, MAX_HP);
        self.hp - before
    }

    /// Cancels any punch or buff in progress.
    pub fn cancel_actions(&mut self) {
        self.attacking = false;
        self.atk_timer = 0;
        self.buffing = false;
        self.buff_timer = 0;
    }

    /// Counts a landed hit toward the combo.
    pub fn register_hit(&mut self) {
        self.combo += 1;
        self.combo_timer = COMBO_TIMEOUT;
    }

    /// Advances idle bookkeeping. Returns true when eating starts this tick.
    pub fn update_idle(&mut self, input: &InputState, fx: &mut Feedback) -> bool {
        let busy = input.any()
            || self.attacking
            || self.buffing
            || self.hurt
            || !self.is_grounded();
        if busy {
            self.idle_timer = 0;
            self.eating = false;
            self.eat_timer = 0;
            return false;
        }

        if self.eating {
            self.eat_timer = self.eat_timer.saturating_sub(1);
            if self.eat_timer == 0 {
                self.eating = false;
                self.idle_timer = 0;
            }
            return false;
        }

        self.idle_timer += 1;
        if self.idle_timer < IDLE_EAT_TICKS {
            return false;
        }

        self.eating = true;
        self.eat_timer = EAT_DURATION_TICKS;
        fx.text(self.overhead(80.0), EATING_TEXT, palette::CRUMB, 14.0);
        fx.burst(
            self.overhead(40.0),
            Burst::new(3, ParticleStyle::Dust, palette::CRUMB)
                .with_spread(1.5)
                .with_size(3.0),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;
    use proptest::prelude::*;

    fn fx() -> Feedback {
        Feedback::new(SimRng::with_seed(2))
    }

    #[test]
    fn test_take_hit_resets_combo() {
        let mut player = Player::default();
        player.combo = 4;
        player.combo_timer = 50;

        let died = player.take_hit(PlayerHit {
            damage: 10,
            hurt_ticks: 15,
            invincible_ticks: 30,
            shove: Some(-12.0),
        });

        assert!(!died);
        assert_eq!(player.hp, 90);
        assert_eq!(player.combo, 0);
        assert_eq!(player.combo_timer, 0);
        assert_eq!(player.invincible, 30);
        assert!(player.hurt);
        assert_eq!(player.vel.x, -12.0);
    }

    #[test]
    fn test_lethal_hit_clamps_to_zero() {
        let mut player = Player::default().with_hp(5);
        let died = player.take_hit(PlayerHit {
            damage: 30,
            hurt_ticks: 25,
            invincible_ticks: 50,
            shove: None,
        });
        assert!(died);
        assert_eq!(player.hp, 0);
    }

    #[test]
    fn test_heal_clamps() {
        let mut player = Player::default().with_hp(90);
        assert_eq!(player.heal(25), 10);
        assert_eq!(player.hp, MAX_HP);
    }

    #[test]
    fn test_idle_eating_starts_at_threshold() {
        let mut player = Player::default();
        let mut fx = fx();
        let idle = InputState::idle();

        for _ in 0..IDLE_EAT_TICKS - 1 {
            assert!(!player.update_idle(&idle, &mut fx));
        }
        assert!(!player.eating);
        assert!(player.update_idle(&idle, &mut fx));
        assert!(player.eating);
        assert!(fx.has_text(EATING_TEXT));
    }

    #[test]
    fn test_input_resets_idle() {
        let mut player = Player::default();
        let mut fx = fx();
        for _ in 0..IDLE_EAT_TICKS - 1 {
            player.update_idle(&InputState::idle(), &mut fx);
        }
        player.update_idle(&InputState::idle().with_horizontal(true, false), &mut fx);
        assert_eq!(player.idle_timer, 0);
        assert!(!player.update_idle(&InputState::idle(), &mut fx));
        assert!(!player.eating);
    }

    #[test]
    fn test_eating_ends_and_restarts_count() {
        let mut player = Player::default();
        let mut fx = fx();
        for _ in 0..IDLE_EAT_TICKS {
            player.update_idle(&InputState::idle(), &mut fx);
        }
        for _ in 0..EAT_DURATION_TICKS {
            player.update_idle(&InputState::idle(), &mut fx);
        }
        assert!(!player.eating);
        assert_eq!(player.idle_timer, 0);
    }

    proptest! {
        #[test]
        fn hp_stays_in_range(start in 1i32..=100, deltas in proptest::collection::vec(-40i32..40, 0..50)) {
            let mut player = Player::default().with_hp(start);
            for d in deltas {
                if d >= 0 {
                    player.heal(d);
                } else {
                    player.take_hit(PlayerHit { damage: -d, hurt_ticks: 1, invincible_ticks: 1, shove: None });
                }
                prop_assert!((0..=MAX_HP).contains(&player.hp));
            }
        }
    }
}
