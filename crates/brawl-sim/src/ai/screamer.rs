//! Level 1 boss: walks in, telegraphs a wide shout, punches up close.

use brawl_common::Facing;
use serde::{Deserialize, Serialize};

use super::{
    melee_reachable, release_shout, strike_player, warn, AiContext, AiOutcome, EnemyAi, Shout,
    Strike,
};
use crate::constants::{ENEMY_SPEED, PUNCH_ANIM_TICKS};
use crate::enemy::EnemyBody;
use crate::feedback::{palette, Burst, ParticleStyle};

const MELEE_RANGE: f32 = 60.0;
const SHOUT_TRIGGER: f32 = 200.0;
const WALK_BEYOND: f32 = 150.0;
const DEPTH_FACTOR: f32 = 0.5;
const TELEGRAPH_TICKS: u32 = 50;
const SHOUT_COOLDOWN: u32 = 180;

/// Where the shout boss is in its attack cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreamerState {
    /// Walking in, may punch when close.
    Approach,
    /// Standing still, charging the shout.
    Telegraph {
        /// Telegraph ticks so far, starting at one
        elapsed: u32,
    },
}

/// Shout boss behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreamerAi {
    state: ScreamerState,
    cooldown: u32,
}

impl ScreamerAi {
    /// Creates the behaviour with an initial cooldown.
    #[must_use]
    pub const fn new(cooldown: u32) -> Self {
        Self {
            state: ScreamerState::Approach,
            cooldown,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ScreamerState {
        self.state
    }

    fn shout() -> Shout {
        Shout {
            radius: 250.0,
            damage: 25,
            knockback: 12.0,
            companion_shove: Some(120.0),
            shake: 12,
            ring: Burst::new(6, ParticleStyle::Ring, palette::SHOUT_RING)
                .with_spread(8.0)
                .with_life(25)
                .with_size(10.0),
            roar: "KRAAAAAHH!!!",
            color: palette::BLUE,
        }
    }

    fn approach(&mut self, body: &mut EnemyBody, dist: f32, ctx: &mut AiContext<'_>) -> AiOutcome {
        if self.cooldown == 0 {
            if dist < MELEE_RANGE && melee_reachable(ctx.player) {
                self.cooldown = body.kind.melee_cooldown();
                body.punch_timer = PUNCH_ANIM_TICKS;
                return strike_player(body, &Strike::melee(body.kind), ctx);
            }
            if dist < SHOUT_TRIGGER {
                self.state = ScreamerState::Telegraph { elapsed: 1 };
                body.walking = false;
                warn(body, "⚠ WATCH OUT!", palette::BLUE, ctx);
                return AiOutcome::Continue;
            }
        }

        body.walking = dist > WALK_BEYOND;
        if body.walking {
            body.step_toward(
                ctx.player.pos,
                ENEMY_SPEED * body.kind.speed_mult(),
                DEPTH_FACTOR,
            );
        }
        body.clamp_to_lane();
        self.cooldown = self.cooldown.saturating_sub(1);
        AiOutcome::Continue
    }
}

impl EnemyAi for ScreamerAi {
    fn advance(&mut self, body: &mut EnemyBody, ctx: &mut AiContext<'_>) -> AiOutcome {
        body.tick_punch_anim();
        let dist = body.pos.distance(ctx.player.pos);
        body.facing = Facing::toward(ctx.player.pos.x - body.pos.x);

        match self.state {
            ScreamerState::Approach => self.approach(body, dist, ctx),
            ScreamerState::Telegraph { elapsed } => {
                body.walking = false;
                let elapsed = elapsed + 1;
                if elapsed <= TELEGRAPH_TICKS {
                    self.state = ScreamerState::Telegraph { elapsed };
                    return AiOutcome::Continue;
                }
                self.state = ScreamerState::Approach;
                self.cooldown = SHOUT_COOLDOWN;
                release_shout(body, &Self::shout(), ctx)
            },
        }
    }

    fn cooldown(&self) -> u32 {
        self.cooldown
    }

    fn set_cooldown(&mut self, ticks: u32) {
        self.cooldown = ticks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::test_support::*;
    use crate::enemy::EnemyKind;
    use crate::events::SimEvent;

    #[test]
    fn test_telegraph_then_shout() {
        let mut arena = Arena::new();
        let mut body = body_at(EnemyKind::Screamer, 550.0, 390.0);
        let mut ai = ScreamerAi::new(0);

        ai.advance(&mut body, &mut arena.ctx());
        assert_eq!(ai.state(), ScreamerState::Telegraph { elapsed: 1 });
        assert!(arena.events.iter().any(|e| matches!(e, SimEvent::BossWarning { .. })));

        for _ in 0..TELEGRAPH_TICKS - 1 {
            ai.advance(&mut body, &mut arena.ctx());
            assert_eq!(arena.player.hp, 100);
        }
        assert_eq!(ai.state(), ScreamerState::Telegraph { elapsed: TELEGRAPH_TICKS });

        ai.advance(&mut body, &mut arena.ctx());
        assert_eq!(ai.state(), ScreamerState::Approach);
        assert_eq!(ai.cooldown(), SHOUT_COOLDOWN);
        assert_eq!(arena.player.hp, 75);
        assert!(arena.player.vel.x < 0.0);
        assert_eq!(body.pos.x, 550.0);
    }

    #[test]
    fn test_telegraph_is_committed() {
        let mut arena = Arena::new();
        let mut body = body_at(EnemyKind::Screamer, 550.0, 390.0);
        let mut ai = ScreamerAi::new(0);
        ai.advance(&mut body, &mut arena.ctx());

        arena.player.pos.x = 100.0;
        for _ in 0..TELEGRAPH_TICKS {
            ai.advance(&mut body, &mut arena.ctx());
        }
        assert_eq!(ai.state(), ScreamerState::Approach);
        assert_eq!(arena.player.hp, 100);
        assert!(arena.events.iter().any(|e| matches!(e, SimEvent::BossShout { .. })));
    }

    #[test]
    fn test_melee_when_close() {
        let mut arena = Arena::new();
        let mut body = body_at(EnemyKind::Screamer, 450.0, 390.0);
        let mut ai = ScreamerAi::new(0);

        ai.advance(&mut body, &mut arena.ctx());
        assert_eq!(ai.state(), ScreamerState::Approach);
        assert_eq!(arena.player.hp, 85);
        assert_eq!(ai.cooldown(), 60);
    }

    #[test]
    fn test_walks_only_when_far() {
        let mut arena = Arena::new();
        let mut far = body_at(EnemyKind::Screamer, 700.0, 390.0);
        let mut near = body_at(EnemyKind::Screamer, 540.0, 390.0);
        let mut ai_far = ScreamerAi::new(100);
        let mut ai_near = ScreamerAi::new(100);

        ai_far.advance(&mut far, &mut arena.ctx());
        ai_near.advance(&mut near, &mut arena.ctx());

        assert!(far.pos.x < 700.0);
        assert_eq!(near.pos.x, 540.0);
        assert!(!near.walking);
    }
}
