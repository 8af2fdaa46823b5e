//! Level 2 boss: charge dashes, a telegraphed shout and an enraged phase.
//!
//! Below [`ENRAGE_RATIO`] of its HP the boss enrages once and for the rest
//! of its life: charges get faster and shorter, every attack hits harder
//! and cooldowns are halved.

use brawl_common::{Facing, LaneBounds};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    melee_reachable, release_shout, strike_player, warn, AiContext, AiOutcome, EnemyAi, Shout,
    Strike,
};
use crate::constants::{ENEMY_SPEED, PUNCH_ANIM_TICKS};
use crate::enemy::EnemyBody;
use crate::events::SimEvent;
use crate::feedback::{palette, Burst, Color, Feedback, ParticleStyle};

/// HP fraction below which the boss enrages.
pub const ENRAGE_RATIO: f32 = 0.35;

const MELEE_RANGE: f32 = 55.0;
const CHARGE_MIN: f32 = 80.0;
const CHARGE_MAX: f32 = 220.0;
const SHOUT_TRIGGER: f32 = 200.0;
const WALK_BEYOND: f32 = 60.0;
const DEPTH_FACTOR: f32 = 0.6;
const CHARGE_REACH_X: f32 = 50.0;
const CHARGE_REACH_Y: f32 = 40.0;
const CHARGE_MAX_Z: f32 = 15.0;
const CHARGE_HIT_COOLDOWN: u32 = 60;
const CHARGE_WHIFF_COOLDOWN: u32 = 90;
const SHOUT_COOLDOWN: u32 = 120;

/// Where the charge boss is in its attack cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JuggernautState {
    /// Walking in; the cooldown counts down here.
    Approach,
    /// Standing still before a dash.
    WindUp {
        /// Committed dash direction
        dir: Facing,
        /// Ticks until the dash starts
        remaining: u32,
    },
    /// Dashing along the lane.
    Charging {
        /// Dash direction
        dir: Facing,
        /// Ticks of dash left
        remaining: u32,
    },
    /// Standing still, charging the shout.
    ShoutTelegraph {
        /// Telegraph ticks so far, starting at one
        elapsed: u32,
    },
}

/// Numbers that change with the enraged phase.
struct Tuning {
    charge_speed: f32,
    charge_ticks: u32,
    windup_ticks: u32,
    charge_damage: i32,
    charge_knockback: f32,
    charge_shake: u32,
    windup_shake: u32,
    telegraph_ticks: u32,
    shout: Shout,
    color: Color,
    charge_text: &'static str,
    shout_text: &'static str,
}

impl Tuning {
    fn calm() -> Self {
        Self {
            charge_speed: 5.0,
            charge_ticks: 40,
            windup_ticks: 10,
            charge_damage: 30,
            charge_knockback: 15.0,
            charge_shake: 15,
            windup_shake: 6,
            telegraph_ticks: 40,
            shout: Shout {
                radius: 200.0,
                damage: 20,
                knockback: 14.0,
                companion_shove: None,
                shake: 15,
                ring: ring(8, palette::FURY),
                roar: "DESTRUCTION!!!",
                color: palette::FURY,
            },
            color: palette::FURY,
            charge_text: "💥 CHARGE!",
            shout_text: "⚠ BRACE!",
        }
    }

    fn enraged() -> Self {
        Self {
            charge_speed: 5.0 * 1.6,
            charge_ticks: 30,
            windup_ticks: 6,
            charge_damage: 40,
            charge_knockback: 18.0,
            charge_shake: 20,
            windup_shake: 10,
            telegraph_ticks: 25,
            shout: Shout {
                radius: 250.0,
                damage: 28,
                knockback: 18.0,
                companion_shove: None,
                shake: 22,
                ring: ring(12, palette::ENRAGED),
                roar: "ANNIHILATION!!!",
                color: palette::ENRAGED,
            },
            color: palette::ENRAGED,
            charge_text: "⚡ SUPER CHARGE!",
            shout_text: "💀 DIE!",
        }
    }
}

fn ring(count: usize, color: Color) -> Burst {
    Burst::new(count, ParticleStyle::Ring, color.with_alpha(153))
        .with_spread(10.0)
        .with_life(25)
        .with_size(12.0)
}

/// Charge boss behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuggernautAi {
    state: JuggernautState,
    cooldown: u32,
    enraged: bool,
}

impl JuggernautAi {
    /// Creates the behaviour with an initial cooldown.
    #[must_use]
    pub const fn new(cooldown: u32) -> Self {
        Self {
            state: JuggernautState::Approach,
            cooldown,
            enraged: false,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> JuggernautState {
        self.state
    }

    /// Whether the enraged phase has begun.
    #[must_use]
    pub const fn is_enraged(&self) -> bool {
        self.enraged
    }

    fn tuning(&self) -> Tuning {
        if self.enraged {
            Tuning::enraged()
        } else {
            Tuning::calm()
        }
    }

    fn scaled(&self, ticks: u32) -> u32 {
        if self.enraged {
            ticks / 2
        } else {
            ticks
        }
    }

    fn charge(
        &mut self,
        body: &mut EnemyBody,
        dir: Facing,
        remaining: u32,
        ctx: &mut AiContext<'_>,
    ) -> AiOutcome {
        let t = self.tuning();
        body.facing = dir;
        body.walking = true;
        body.pos.x = LaneBounds::ENEMY.clamp_x(body.pos.x + dir.sign() * t.charge_speed);
        if ctx.tick % 3 == 0 {
            ctx.fx.burst(
                body.overhead(20.0),
                Burst::new(2, ParticleStyle::Spark, t.color)
                    .with_spread(3.0)
                    .with_life(10)
                    .with_size(4.0),
            );
        }

        let gap = ctx.player.pos - body.pos;
        let overlaps = gap.x.abs() < CHARGE_REACH_X && gap.y.abs() < CHARGE_REACH_Y;
        if overlaps && ctx.player.exposed_below(CHARGE_MAX_Z) {
            self.state = JuggernautState::Approach;
            self.cooldown = self.scaled(CHARGE_HIT_COOLDOWN);
            ctx.fx.shake(t.charge_shake);
            let strike = Strike {
                damage: t.charge_damage,
                hurt_ticks: 25,
                invincible_ticks: 50,
                shove: Some(dir.sign() * t.charge_knockback),
                burst: Burst::new(10, ParticleStyle::Hit, t.color)
                    .with_spread(6.0)
                    .with_life(20)
                    .with_size(7.0),
                text_color: palette::DEEP_RED,
                text_size: 24.0,
            };
            return strike_player(body, &strike, ctx);
        }

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.state = JuggernautState::Approach;
            self.cooldown = self.scaled(CHARGE_WHIFF_COOLDOWN);
        } else {
            self.state = JuggernautState::Charging { dir, remaining };
        }
        AiOutcome::Continue
    }

    fn approach(&mut self, body: &mut EnemyBody, ctx: &mut AiContext<'_>) -> AiOutcome {
        let dx = ctx.player.pos.x - body.pos.x;
        let dist = body.pos.distance(ctx.player.pos);

        if self.cooldown == 0 {
            if dist < MELEE_RANGE && melee_reachable(ctx.player) {
                self.cooldown = self.scaled(body.kind.melee_cooldown());
                body.punch_timer = PUNCH_ANIM_TICKS;
                return strike_player(body, &Strike::melee(body.kind), ctx);
            }
            let t = self.tuning();
            if dist > CHARGE_MIN && dist < CHARGE_MAX {
                self.state = JuggernautState::WindUp {
                    dir: Facing::toward(dx),
                    remaining: t.windup_ticks,
                };
                body.walking = false;
                ctx.fx.shake(t.windup_shake);
                warn(body, t.charge_text, t.color, ctx);
                return AiOutcome::Continue;
            }
            if dist < SHOUT_TRIGGER {
                self.state = JuggernautState::ShoutTelegraph { elapsed: 1 };
                body.walking = false;
                warn(body, t.shout_text, t.color, ctx);
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

impl EnemyAi for JuggernautAi {
    fn advance(&mut self, body: &mut EnemyBody, ctx: &mut AiContext<'_>) -> AiOutcome {
        body.tick_punch_anim();
        match self.state {
            JuggernautState::Charging { dir, remaining } => self.charge(body, dir, remaining, ctx),
            JuggernautState::WindUp { dir, remaining } => {
                body.facing = dir;
                body.walking = false;
                let remaining = remaining.saturating_sub(1);
                self.state = if remaining == 0 {
                    JuggernautState::Charging {
                        dir,
                        remaining: self.tuning().charge_ticks,
                    }
                } else {
                    JuggernautState::WindUp { dir, remaining }
                };
                AiOutcome::Continue
            },
            JuggernautState::ShoutTelegraph { elapsed } => {
                body.facing = Facing::toward(ctx.player.pos.x - body.pos.x);
                body.walking = false;
                let t = self.tuning();
                let elapsed = elapsed + 1;
                if elapsed <= t.telegraph_ticks {
                    self.state = JuggernautState::ShoutTelegraph { elapsed };
                    return AiOutcome::Continue;
                }
                self.state = JuggernautState::Approach;
                self.cooldown = self.scaled(SHOUT_COOLDOWN);
                release_shout(body, &t.shout, ctx)
            },
            JuggernautState::Approach => {
                body.facing = Facing::toward(ctx.player.pos.x - body.pos.x);
                self.approach(body, ctx)
            },
        }
    }

    fn on_damaged(&mut self, body: &EnemyBody, fx: &mut Feedback, events: &mut Vec<SimEvent>) {
        if matches!(
            self.state,
            JuggernautState::WindUp { .. } | JuggernautState::Charging { .. }
        ) {
            self.state = JuggernautState::Approach;
        }

        if self.enraged || body.is_dead() || body.hp_ratio() >= ENRAGE_RATIO {
            return;
        }
        self.enraged = true;
        fx.text(body.overhead(90.0), "💀 MAXIMUM FURY!", palette::ENRAGED, 20.0);
        fx.shake(20);
        fx.burst(
            body.overhead(40.0),
            Burst::new(12, ParticleStyle::Ring, palette::ENRAGED)
                .with_spread(12.0)
                .with_life(30)
                .with_size(15.0),
        );
        events.push(SimEvent::BossEnraged { enemy: body.id });
        info!("{} {} enraged at {} hp", body.kind, body.id, body.hp);
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

    fn boss() -> (Arena, EnemyBody, JuggernautAi) {
        (
            Arena::new(),
            body_at(EnemyKind::Juggernaut, 550.0, 390.0),
            JuggernautAi::new(0),
        )
    }

    #[test]
    fn test_windup_then_charge_hits() {
        let (mut arena, mut body, mut ai) = boss();

        ai.advance(&mut body, &mut arena.ctx());
        assert_eq!(
            ai.state(),
            JuggernautState::WindUp {
                dir: Facing::Left,
                remaining: 10
            }
        );
        assert_eq!(arena.fx.shake_magnitude(), 6);

        for _ in 0..10 {
            ai.advance(&mut body, &mut arena.ctx());
        }
        assert!(matches!(ai.state(), JuggernautState::Charging { .. }));
        assert_eq!(body.pos.x, 550.0);

        for _ in 0..40 {
            ai.advance(&mut body, &mut arena.ctx());
            if arena.player.hp < 100 {
                break;
            }
        }
        assert_eq!(arena.player.hp, 70);
        assert_eq!(arena.player.vel.x, -15.0);
        assert_eq!(ai.state(), JuggernautState::Approach);
        assert_eq!(ai.cooldown(), CHARGE_HIT_COOLDOWN);
    }

    #[test]
    fn test_charge_whiff_cooldown() {
        let (mut arena, mut body, mut ai) = boss();
        arena.player.invincible = 1000;

        for _ in 0..11 {
            ai.advance(&mut body, &mut arena.ctx());
        }
        for _ in 0..40 {
            ai.advance(&mut body, &mut arena.ctx());
        }
        assert_eq!(ai.state(), JuggernautState::Approach);
        assert_eq!(ai.cooldown(), CHARGE_WHIFF_COOLDOWN);
        assert_eq!(body.pos.x, 550.0 - 5.0 * 40.0);
        assert_eq!(arena.player.hp, 100);
    }

    #[test]
    fn test_shout_when_charge_range_not_met() {
        let (mut arena, _, mut ai) = boss();
        let mut body = body_at(EnemyKind::Juggernaut, 470.0, 390.0);
        arena.player.invincible = 5;

        ai.advance(&mut body, &mut arena.ctx());
        assert_eq!(ai.state(), JuggernautState::ShoutTelegraph { elapsed: 1 });
    }

    #[test]
    fn test_enrage_fires_once() {
        let (mut arena, mut body, mut ai) = boss();

        body.hp = 21;
        ai.on_damaged(&body, &mut arena.fx, &mut arena.events);
        assert!(!ai.is_enraged());

        body.hp = 20;
        ai.on_damaged(&body, &mut arena.fx, &mut arena.events);
        body.hp = 15;
        ai.on_damaged(&body, &mut arena.fx, &mut arena.events);

        assert!(ai.is_enraged());
        let enrages = arena
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::BossEnraged { .. }))
            .count();
        assert_eq!(enrages, 1);
        assert_eq!(arena.fx.shake_magnitude(), 20);
    }

    #[test]
    fn test_enraged_halves_cooldowns() {
        let (mut arena, mut body, mut ai) = boss();
        body.hp = 10;
        ai.on_damaged(&body, &mut arena.fx, &mut arena.events);
        arena.player.invincible = 1000;

        for _ in 0..7 {
            ai.advance(&mut body, &mut arena.ctx());
        }
        assert!(matches!(
            ai.state(),
            JuggernautState::Charging { remaining: 30, .. }
        ));
        for _ in 0..30 {
            ai.advance(&mut body, &mut arena.ctx());
        }
        assert_eq!(ai.cooldown(), CHARGE_WHIFF_COOLDOWN / 2);
    }

    #[test]
    fn test_hit_interrupts_charge() {
        let (mut arena, mut body, mut ai) = boss();
        ai.advance(&mut body, &mut arena.ctx());
        body.hp -= 3;
        ai.on_damaged(&body, &mut arena.fx, &mut arena.events);
        assert_eq!(ai.state(), JuggernautState::Approach);
    }
}
