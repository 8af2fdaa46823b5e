//! Melee chaser behaviour shared by every grunt kind.

use brawl_common::Facing;
use serde::{Deserialize, Serialize};

use super::{melee_reachable, strike_player, AiContext, AiOutcome, EnemyAi, Strike};
use crate::constants::{CONTACT_RADIUS, ENEMY_SPEED, GRUNT_DEPTH_FACTOR, PUNCH_ANIM_TICKS};
use crate::enemy::EnemyBody;

/// Walks at the player and swings when in contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GruntAi {
    cooldown: u32,
}

impl GruntAi {
    /// Creates a grunt brain with an initial attack cooldown.
    #[must_use]
    pub const fn new(cooldown: u32) -> Self {
        Self { cooldown }
    }
}

impl EnemyAi for GruntAi {
    fn advance(&mut self, body: &mut EnemyBody, ctx: &mut AiContext<'_>) -> AiOutcome {
        body.tick_punch_anim();
        let target = ctx.player.pos;
        let dist = body.pos.distance(target);
        body.facing = Facing::toward(target.x - body.pos.x);

        body.walking = dist > CONTACT_RADIUS;
        if body.walking {
            body.step_toward(
                target,
                ENEMY_SPEED * body.kind.speed_mult(),
                GRUNT_DEPTH_FACTOR,
            );
        }
        body.clamp_to_lane();

        self.cooldown = self.cooldown.saturating_sub(1);
        if dist < CONTACT_RADIUS && self.cooldown == 0 && melee_reachable(ctx.player) {
            self.cooldown = body.kind.melee_cooldown();
            body.punch_timer = PUNCH_ANIM_TICKS;
            return strike_player(body, &Strike::melee(body.kind), ctx);
        }
        AiOutcome::Continue
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
    use super::super::test_support::*;
    use super::*;
    use crate::enemy::EnemyKind;

    #[test]
    fn test_contact_damage_once() {
        let mut arena = Arena::new();
        let mut body = body_at(EnemyKind::Thug, 440.0, 390.0);
        let mut ai = GruntAi::new(0);

        assert_eq!(ai.advance(&mut body, &mut arena.ctx()), AiOutcome::Continue);
        assert_eq!(arena.player.hp, 90);
        assert_eq!(ai.cooldown(), EnemyKind::Thug.melee_cooldown());
        assert!(arena.player.invincible > 0);
        assert_eq!(body.punch_timer, PUNCH_ANIM_TICKS);
        assert_eq!(arena.damage_events(), 1);

        ai.advance(&mut body, &mut arena.ctx());
        assert_eq!(arena.damage_events(), 1);
    }

    #[test]
    fn test_walks_when_far() {
        let mut arena = Arena::new();
        let mut body = body_at(EnemyKind::Runner, 700.0, 400.0);
        let mut ai = GruntAi::new(30);

        ai.advance(&mut body, &mut arena.ctx());
        assert!(body.walking);
        assert!(body.pos.x < 700.0);
        assert_eq!(body.facing, Facing::Left);
        assert_eq!(ai.cooldown(), 29);
    }

    #[test]
    fn test_no_damage_to_airborne_or_buffing() {
        let mut arena = Arena::new();
        let mut body = body_at(EnemyKind::Guard, 430.0, 390.0);
        let mut ai = GruntAi::new(0);

        arena.player.z = 12.0;
        ai.advance(&mut body, &mut arena.ctx());
        arena.player.z = 0.0;
        arena.player.buffing = true;
        ai.advance(&mut body, &mut arena.ctx());

        assert_eq!(arena.player.hp, 100);
        assert_eq!(ai.cooldown(), 0);
    }

    #[test]
    fn test_lethal_contact_reports_kill() {
        let mut arena = Arena::new();
        arena.player.hp = 8;
        let mut body = body_at(EnemyKind::Scientist, 420.0, 390.0);
        let mut ai = GruntAi::new(0);

        assert_eq!(ai.advance(&mut body, &mut arena.ctx()), AiOutcome::PlayerKilled);
        assert_eq!(arena.player.hp, 0);
    }
}
