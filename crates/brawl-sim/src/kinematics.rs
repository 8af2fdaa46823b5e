//! Player kinematics: planar walking and the jump axis.
//!
//! Walking happens on the ground plane (x along the street, y across the
//! lane). Jumping moves a separate elevation `z` and never touches `y`.

use brawl_common::{Facing, LaneBounds};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    COYOTE_TICKS, GRAVITY, JUMP_CUT, JUMP_FORCE, LAND_SQUASH_TICKS, MAX_JUMP_Z, PLAYER_ACCEL,
    PLAYER_DECEL, PLAYER_DEPTH_FACTOR, PLAYER_MAX_SPEED, VELOCITY_EPSILON,
};
use crate::feedback::{palette, Burst, Feedback, ParticleStyle};
use crate::player::Player;

/// What happened on the jump axis this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpEvent {
    /// Left the ground.
    TookOff,
    /// Touched down after being airborne.
    Landed,
}

/// Movement tuning for the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// Acceleration per tick while input is held
    pub accel: f32,
    /// Velocity multiplier per tick without input
    pub decel: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Depth-axis scale for acceleration and the speed cap
    pub depth_factor: f32,
    /// Elevation gravity
    pub gravity: f32,
    /// Take-off speed
    pub jump_force: f32,
    /// Upward speed multiplier while jump is released
    pub jump_cut: f32,
    /// Elevation ceiling
    pub max_jump_z: f32,
    /// Grace ticks for late jumps
    pub coyote_ticks: u32,
    /// Landing squash duration
    pub land_squash_ticks: u32,
    /// Walkable area
    pub bounds: LaneBounds,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            accel: PLAYER_ACCEL,
            decel: PLAYER_DECEL,
            max_speed: PLAYER_MAX_SPEED,
            depth_factor: PLAYER_DEPTH_FACTOR,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            jump_cut: JUMP_CUT,
            max_jump_z: MAX_JUMP_Z,
            coyote_ticks: COYOTE_TICKS,
            land_squash_ticks: LAND_SQUASH_TICKS,
            bounds: LaneBounds::PLAYER,
        }
    }
}

impl Kinematics {
    /// Accelerates toward `intent` (or decays without it), integrates and
    /// clamps the ground position.
    pub fn step_planar(&self, player: &mut Player, intent: Vec2) {
        if intent == Vec2::ZERO {
            player.vel *= self.decel;
            if player.vel.x.abs() < VELOCITY_EPSILON {
                player.vel.x = 0.0;
            }
            if player.vel.y.abs() < VELOCITY_EPSILON {
                player.vel.y = 0.0;
            }
        } else {
            let max_y = self.max_speed * self.depth_factor;
            player.vel.x = (player.vel.x + intent.x * self.accel)
                .clamp(-self.max_speed, self.max_speed);
            player.vel.y = (player.vel.y + intent.y * self.accel * self.depth_factor)
                .clamp(-max_y, max_y);
            if intent.x != 0.0 {
                player.facing = Facing::toward(intent.x);
            }
        }

        player.pos = self.bounds.clamp(player.pos + player.vel);
    }

    /// Advances the elevation axis. `jump_held` is the raw jump button.
    pub fn step_jump(
        &self,
        player: &mut Player,
        jump_held: bool,
        fx: &mut Feedback,
    ) -> Option<JumpEvent> {
        let mut event = None;
        let grounded = player.is_grounded();

        if grounded {
            player.coyote_timer = self.coyote_ticks;
            if !player.was_grounded {
                player.land_squash = self.land_squash_ticks;
                fx.burst(player.pos, dust(4));
                event = Some(JumpEvent::Landed);
            }
        } else {
            player.coyote_timer = player.coyote_timer.saturating_sub(1);
        }
        player.was_grounded = grounded;

        if jump_held && player.coyote_timer > 0 && player.z <= 0.0 {
            player.vz = self.jump_force;
            player.coyote_timer = 0;
            player.land_squash = 0;
            fx.burst(player.pos, dust(3));
            event = Some(JumpEvent::TookOff);
        }

        if !jump_held && player.vz > 0.0 {
            player.vz *= self.jump_cut;
        }

        if player.z > 0.0 || player.vz > 0.0 {
            player.z += player.vz;
            player.vz -= self.gravity;
            if player.z > self.max_jump_z {
                player.z = self.max_jump_z;
                player.vz = player.vz.min(0.0);
            }
            if player.z <= 0.0 {
                player.z = 0.0;
                player.vz = 0.0;
            }
        }

        player.land_squash = player.land_squash.saturating_sub(1);
        event
    }
}

fn dust(count: usize) -> Burst {
    Burst::new(count, ParticleStyle::Dust, palette::DIRT)
        .with_spread(2.0)
        .with_life(15)
        .with_size(4.0)
}
