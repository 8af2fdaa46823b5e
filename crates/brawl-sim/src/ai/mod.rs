//! Enemy behaviours.
//!
//! Every enemy carries a [`Brain`]: a closed set of behaviour variants that
//! all implement [`EnemyAi`]. Knockback recovery runs in the world before a
//! brain is consulted, so brains only ever see enemies that can act.

mod grunt;
mod juggernaut;
mod screamer;

pub use grunt::GruntAi;
pub use juggernaut::{JuggernautAi, JuggernautState};
pub use screamer::{ScreamerAi, ScreamerState};

use brawl_common::Facing;
use serde::{Deserialize, Serialize};

use crate::companion::Companion;
use crate::constants::{HURT_TICKS, INVINCIBLE_TICKS, MELEE_MAX_Z};
use crate::enemy::{EnemyBody, EnemyKind};
use crate::events::SimEvent;
use crate::feedback::{palette, Burst, Color, Feedback, ParticleStyle};
use crate::player::{Player, PlayerHit};

/// Elevation at or above which shouts miss.
pub const SHOUT_MAX_Z: f32 = 20.0;

/// Everything outside the enemy that a behaviour may read or change.
pub struct AiContext<'a> {
    /// The player
    pub player: &'a mut Player,
    /// The companion
    pub companion: &'a mut Companion,
    /// Feedback sink
    pub fx: &'a mut Feedback,
    /// Event sink
    pub events: &'a mut Vec<SimEvent>,
    /// Current tick
    pub tick: u64,
}

/// Result of advancing one enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiOutcome {
    /// Keep going.
    Continue,
    /// The enemy's attack killed the player.
    PlayerKilled,
}

/// Contract shared by every enemy behaviour.
pub trait EnemyAi {
    /// Runs one tick of behaviour for an enemy that is not in knockback.
    fn advance(&mut self, body: &mut EnemyBody, ctx: &mut AiContext<'_>) -> AiOutcome;

    /// Called after a player attack damaged the enemy (and it survived).
    fn on_damaged(&mut self, _body: &EnemyBody, _fx: &mut Feedback, _events: &mut Vec<SimEvent>) {}

    /// Ticks until the next attack may start.
    fn cooldown(&self) -> u32;

    /// Overrides the attack cooldown.
    fn set_cooldown(&mut self, ticks: u32);
}

/// Behaviour of one enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Brain {
    /// Melee chaser
    Grunt(GruntAi),
    /// Shout boss
    Screamer(ScreamerAi),
    /// Charge boss
    Juggernaut(JuggernautAi),
}

impl Brain {
    /// Behaviour for a freshly spawned enemy of `kind`.
    #[must_use]
    pub fn for_kind(kind: EnemyKind) -> Self {
        let cooldown = kind.spawn_cooldown();
        match kind {
            EnemyKind::Thug | EnemyKind::Runner | EnemyKind::Guard | EnemyKind::Scientist => {
                Self::Grunt(GruntAi::new(cooldown))
            },
            EnemyKind::Screamer => Self::Screamer(ScreamerAi::new(cooldown)),
            EnemyKind::Juggernaut => Self::Juggernaut(JuggernautAi::new(cooldown)),
        }
    }

    fn inner(&mut self) -> &mut dyn EnemyAi {
        match self {
            Self::Grunt(ai) => ai,
            Self::Screamer(ai) => ai,
            Self::Juggernaut(ai) => ai,
        }
    }
}

impl EnemyAi for Brain {
    fn advance(&mut self, body: &mut EnemyBody, ctx: &mut AiContext<'_>) -> AiOutcome {
        self.inner().advance(body, ctx)
    }

    fn on_damaged(&mut self, body: &EnemyBody, fx: &mut Feedback, events: &mut Vec<SimEvent>) {
        self.inner().on_damaged(body, fx, events);
    }

    fn cooldown(&self) -> u32 {
        match self {
            Self::Grunt(ai) => ai.cooldown(),
            Self::Screamer(ai) => ai.cooldown(),
            Self::Juggernaut(ai) => ai.cooldown(),
        }
    }

    fn set_cooldown(&mut self, ticks: u32) {
        self.inner().set_cooldown(ticks);
    }
}

// ============================================================================
// Shared attack plumbing
// ============================================================================

/// Melee swings miss airborne, invincible or buffing players.
pub(crate) fn melee_reachable(player: &Player) -> bool {
    player.exposed_below(MELEE_MAX_Z) && !player.buffing
}

/// One enemy attack landing on the player.
pub(crate) struct Strike {
    pub damage: i32,
    pub hurt_ticks: u32,
    pub invincible_ticks: u32,
    pub shove: Option<f32>,
    pub burst: Burst,
    pub text_color: Color,
    pub text_size: f32,
}

impl Strike {
    /// Standard melee swing of `kind`.
    pub fn melee(kind: EnemyKind) -> Self {
        Self {
            damage: kind.melee_damage(),
            hurt_ticks: HURT_TICKS,
            invincible_ticks: INVINCIBLE_TICKS,
            shove: None,
            burst: Burst::new(5, ParticleStyle::Hit, palette::RED)
                .with_spread(3.0)
                .with_life(14)
                .with_size(5.0),
            text_color: palette::RED,
            text_size: 16.0,
        }
    }
}

/// Applies a strike to the player with its feedback.
pub(crate) fn strike_player(body: &EnemyBody, strike: &Strike, ctx: &mut AiContext<'_>) -> AiOutcome {
    let died = ctx.player.take_hit(PlayerHit {
        damage: strike.damage,
        hurt_ticks: strike.hurt_ticks,
        invincible_ticks: strike.invincible_ticks,
        shove: strike.shove,
    });
    ctx.fx.burst(ctx.player.overhead(30.0), strike.burst);
    ctx.fx.text(
        ctx.player.overhead(50.0),
        format!("-{}", strike.damage),
        strike.text_color,
        strike.text_size,
    );
    ctx.events.push(SimEvent::PlayerDamaged {
        source: body.kind,
        damage: strike.damage,
        hp_left: ctx.player.hp,
    });
    if died {
        AiOutcome::PlayerKilled
    } else {
        AiOutcome::Continue
    }
}

/// Announces a telegraphed boss attack.
pub(crate) fn warn(body: &EnemyBody, text: &str, color: Color, ctx: &mut AiContext<'_>) {
    ctx.fx.text(body.overhead(70.0), text, color, 14.0);
    ctx.events.push(SimEvent::BossWarning {
        enemy: body.id,
        kind: body.kind,
    });
}

/// Area shout released at the end of a telegraph.
pub(crate) struct Shout {
    pub radius: f32,
    pub damage: i32,
    pub knockback: f32,
    pub companion_shove: Option<f32>,
    pub shake: u32,
    pub ring: Burst,
    pub roar: &'static str,
    pub color: Color,
}

/// Releases a shout. The roar and ring always fire; damage lands only on an
/// exposed player inside the radius, who is pushed away from the boss.
pub(crate) fn release_shout(body: &EnemyBody, shout: &Shout, ctx: &mut AiContext<'_>) -> AiOutcome {
    ctx.fx.text(body.overhead(40.0), shout.roar, shout.color, 20.0);
    ctx.fx.shake(shout.shake);
    ctx.fx.burst(body.overhead(30.0), shout.ring);
    ctx.events.push(SimEvent::BossShout { enemy: body.id });

    let dx = ctx.player.pos.x - body.pos.x;
    let dist = ctx.player.pos.distance(body.pos);
    if dist >= shout.radius || !ctx.player.exposed_below(SHOUT_MAX_Z) {
        return AiOutcome::Continue;
    }

    let away = Facing::toward(dx).sign();
    if let Some(push) = shout.companion_shove {
        ctx.companion.shove(away * push);
    }
    let strike = Strike {
        damage: shout.damage,
        hurt_ticks: 20,
        invincible_ticks: 40,
        shove: Some(away * shout.knockback),
        burst: Burst::new(8, ParticleStyle::Hit, shout.color)
            .with_spread(5.0)
            .with_life(18)
            .with_size(6.0),
        text_color: palette::DEEP_RED,
        text_size: 22.0,
    };
    strike_player(body, &strike, ctx)
}
