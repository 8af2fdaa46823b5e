//! Player attack timing.
//!
//! This module provides:
//! - The two attack kinds (punch, buff) and their timing windows
//! - Attack phases derived from elapsed ticks
//! - The per-tick attack resolver that starts attacks and ages the
//!   player's countdowns

use serde::{Deserialize, Serialize};

use crate::constants::{
    BUFF_ACTIVE_START, BUFF_DURATION, BUFF_SHAKE, PUNCH_ACTIVE, PUNCH_DURATION,
};
use crate::feedback::Feedback;
use crate::input::InputState;
use crate::player::Player;

// ============================================================================
// Attack Phases
// ============================================================================

/// Phase of a player attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Preparing to strike.
    Windup,
    /// Active damage window.
    Active,
    /// Recovering after the strike.
    Recovery,
}

impl AttackPhase {
    /// Check if the attack can deal damage.
    #[must_use]
    pub fn can_damage(&self) -> bool {
        *self == Self::Active
    }
}

// ============================================================================
// Attack Kinds
// ============================================================================

/// The two player attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Short single-target punch in front of the player.
    Punch,
    /// Wide radial burst.
    Buff,
}

impl AttackKind {
    /// Total duration in ticks.
    #[must_use]
    pub const fn duration(self) -> u32 {
        match self {
            Self::Punch => PUNCH_DURATION,
            Self::Buff => BUFF_DURATION,
        }
    }

    /// First and last elapsed tick (inclusive) on which hits land.
    #[must_use]
    pub const fn active_window(self) -> (u32, u32) {
        match self {
            Self::Punch => PUNCH_ACTIVE,
            Self::Buff => (BUFF_ACTIVE_START + 1, BUFF_DURATION),
        }
    }

    /// Phase at `elapsed` ticks since activation.
    #[must_use]
    pub fn phase_at(self, elapsed: u32) -> AttackPhase {
        let (start, end) = self.active_window();
        if elapsed < start {
            AttackPhase::Windup
        } else if elapsed <= end {
            AttackPhase::Active
        } else {
            AttackPhase::Recovery
        }
    }
}

/// Attack currently running on the player with ticks elapsed since it began.
#[must_use]
pub fn current_attack(player: &Player) -> Option<(AttackKind, u32)> {
    if player.attacking {
        Some((AttackKind::Punch, PUNCH_DURATION - player.atk_timer.min(PUNCH_DURATION)))
    } else if player.buffing {
        Some((AttackKind::Buff, BUFF_DURATION - player.buff_timer.min(BUFF_DURATION)))
    } else {
        None
    }
}

/// Attack whose damage window is open this tick.
#[must_use]
pub fn active_attack(player: &Player) -> Option<AttackKind> {
    current_attack(player)
        .filter(|(kind, elapsed)| kind.phase_at(*elapsed).can_damage())
        .map(|(kind, _)| kind)
}

// ============================================================================
// Resolver
// ============================================================================

/// Starts attacks from input and ages the player's action, hurt,
/// invincibility and combo countdowns. Returns the attack started this tick.
pub fn update_attacks(
    player: &mut Player,
    input: &InputState,
    fx: &mut Feedback,
) -> Option<AttackKind> {
    let mut started = None;

    if input.punch && !player.attacking && !player.buffing && player.atk_timer == 0 {
        player.attacking = true;
        player.atk_timer = PUNCH_DURATION;
        started = Some(AttackKind::Punch);
    }
    if player.atk_timer > 0 {
        player.atk_timer -= 1;
        if player.atk_timer == 0 {
            player.attacking = false;
        }
    }

    if input.buff && !player.buffing && !player.attacking && player.buff_timer == 0 {
        player.buffing = true;
        player.buff_timer = BUFF_DURATION;
        fx.shake(BUFF_SHAKE);
        started = Some(AttackKind::Buff);
    }
    if player.buff_timer > 0 {
        player.buff_timer -= 1;
        if player.buff_timer == 0 {
            player.buffing = false;
        }
    }

    if player.hurt_timer > 0 {
        player.hurt_timer -= 1;
        if player.hurt_timer == 0 {
            player.hurt = false;
        }
    }
    player.invincible = player.invincible.saturating_sub(1);
    if player.combo_timer > 0 {
        player.combo_timer -= 1;
        if player.combo_timer == 0 {
            player.combo = 0;
        }
    }
    fx.decay_shake();

    started
}
