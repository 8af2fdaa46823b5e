//! Hit detection and damage from player attacks onto enemies.

use brawl_common::Facing;
use glam::Vec2;

use crate::attack::{active_attack, AttackKind};
use crate::constants::{
    BUFF_DAMAGE_BOSS, BUFF_DAMAGE_GRUNT, BUFF_DEPTH, BUFF_RANGE, FACING_MARGIN, HITSTOP_TICKS,
    PUNCH_DAMAGE, PUNCH_DEPTH, PUNCH_RANGE,
};
use crate::enemy::{EnemyBody, EnemyKind};
use crate::feedback::{palette, Burst, Color, Feedback, ParticleStyle};
use crate::player::Player;

/// How an attack kind hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitProfile {
    /// Horizontal reach
    pub range: f32,
    /// Depth reach
    pub depth: f32,
    /// Whether the target must be in front of the player
    pub needs_facing: bool,
    /// Damage against grunts
    pub grunt_damage: i32,
    /// Damage against bosses
    pub boss_damage: i32,
    /// Enemy knockback recovery ticks
    pub stagger_ticks: u32,
    /// Horizontal knockback speed
    pub knockback: f32,
    /// Scale of the depth offset turned into depth knockback
    pub depth_knockback: f32,
    /// Whole-world freeze on hit
    pub hitstop: u32,
    /// Color of sparks and the damage number
    pub color: Color,
}

impl HitProfile {
    /// Profile for an attack kind.
    #[must_use]
    pub const fn of(kind: AttackKind) -> Self {
        match kind {
            AttackKind::Punch => Self {
                range: PUNCH_RANGE,
                depth: PUNCH_DEPTH,
                needs_facing: true,
                grunt_damage: PUNCH_DAMAGE,
                boss_damage: PUNCH_DAMAGE,
                stagger_ticks: 10,
                knockback: 7.0,
                depth_knockback: 0.05,
                hitstop: HITSTOP_TICKS,
                color: palette::GOLD,
            },
            AttackKind::Buff => Self {
                range: BUFF_RANGE,
                depth: BUFF_DEPTH,
                needs_facing: false,
                grunt_damage: BUFF_DAMAGE_GRUNT,
                boss_damage: BUFF_DAMAGE_BOSS,
                stagger_ticks: 18,
                knockback: 14.0,
                depth_knockback: 0.08,
                hitstop: HITSTOP_TICKS + 2,
                color: palette::GREEN,
            },
        }
    }

    /// Damage against an enemy body.
    #[must_use]
    pub const fn damage_for(&self, body: &EnemyBody) -> i32 {
        if body.kind.is_boss() {
            self.boss_damage
        } else {
            self.grunt_damage
        }
    }
}

/// A player attack that connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitLanded {
    /// Attack that hit
    pub attack: AttackKind,
    /// Damage dealt
    pub damage: i32,
    /// The enemy's HP reached zero
    pub killed: bool,
}

/// Whether `target` counts as in front of the player (with a small margin
/// behind the player's back).
#[must_use]
pub fn in_front(player: &Player, target: Vec2) -> bool {
    match player.facing {
        Facing::Right => target.x > player.pos.x - FACING_MARGIN,
        Facing::Left => target.x < player.pos.x + FACING_MARGIN,
    }
}

/// Whether the player's open attack window reaches `body` this tick.
#[must_use]
pub fn attack_reaches(player: &Player, body: &EnemyBody) -> Option<AttackKind> {
    if body.hit_this_swing {
        return None;
    }
    let attack = active_attack(player)?;
    let profile = HitProfile::of(attack);
    let gap = (body.pos - player.pos).abs();
    let reaches = gap.x < profile.range
        && gap.y < profile.depth
        && (!profile.needs_facing || in_front(player, body.pos));
    reaches.then_some(attack)
}

/// Tests the player's attacks against one enemy and applies a hit.
pub fn resolve_player_hits(
    body: &mut EnemyBody,
    player: &mut Player,
    fx: &mut Feedback,
) -> Option<HitLanded> {
    let attack = attack_reaches(player, body)?;
    let profile = HitProfile::of(attack);
    let damage = profile.damage_for(body);

    body.hit_this_swing = true;
    body.hp -= damage;
    let push = match attack {
        AttackKind::Punch => player.facing.sign(),
        AttackKind::Buff => Facing::toward(body.pos.x - player.pos.x).sign(),
    };
    body.stagger(
        Vec2::new(
            push * profile.knockback,
            (body.pos.y - player.pos.y) * profile.depth_knockback,
        ),
        profile.stagger_ticks,
    );

    player.register_hit();
    player.hitstop = profile.hitstop;

    let spark_at = Vec2::new((player.pos.x + body.pos.x) / 2.0, body.pos.y - 40.0);
    match attack {
        AttackKind::Punch => {
            fx.burst(
                spark_at,
                Burst::new(5, ParticleStyle::Spark, profile.color)
                    .with_spread(4.0)
                    .with_life(12)
                    .with_size(4.0),
            );
        },
        AttackKind::Buff => {
            fx.burst(
                spark_at,
                Burst::new(8, ParticleStyle::Spark, profile.color)
                    .with_spread(6.0)
                    .with_life(16)
                    .with_size(5.0),
            );
            fx.burst(
                spark_at,
                Burst::new(3, ParticleStyle::Ring, profile.color)
                    .with_spread(2.0)
                    .with_life(20)
                    .with_size(8.0),
            );
        },
    }
    let size = if attack == AttackKind::Punch { 14.0 } else { 18.0 };
    fx.text(body.overhead(50.0), format!("-{damage}"), profile.color, size);

    Some(HitLanded {
        attack,
        damage,
        killed: body.is_dead(),
    })
}

/// Death burst of a killed enemy, with the extra fanfare bosses get.
pub fn death_effects(body: &EnemyBody, fx: &mut Feedback) {
    fx.burst(
        body.overhead(30.0),
        Burst::new(12, ParticleStyle::Spark, body.kind.death_color())
            .with_spread(6.0)
            .with_life(25)
            .with_size(5.0),
    );
    if !body.kind.is_boss() {
        return;
    }
    fx.shake(body.kind.death_shake());
    if body.kind == EnemyKind::Juggernaut {
        fx.burst(
            body.overhead(40.0),
            Burst::new(20, ParticleStyle::Ring, palette::GOLD)
                .with_spread(10.0)
                .with_life(35)
                .with_size(15.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;
    use brawl_common::EntityId;

    fn setup(kind: EnemyKind, x: f32) -> (Player, EnemyBody, Feedback) {
        let player = Player::new(Vec2::new(400.0, 390.0));
        let body = EnemyBody::new(EntityId::from_raw(3), kind, Vec2::new(x, 395.0), Facing::Left);
        (player, body, Feedback::new(SimRng::with_seed(6)))
    }

    fn punching(player: &mut Player, elapsed: u32) {
        player.attacking = true;
        player.atk_timer = crate::constants::PUNCH_DURATION - elapsed;
    }

    #[test]
    fn test_punch_hits_once_per_swing() {
        let (mut player, mut body, mut fx) = setup(EnemyKind::Thug, 460.0);
        let mut hits = 0;
        for elapsed in 1..18 {
            punching(&mut player, elapsed);
            if resolve_player_hits(&mut body, &mut player, &mut fx).is_some() {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(body.hp, 3);
        assert_eq!(player.combo, 1);
        assert_eq!(player.hitstop, HITSTOP_TICKS);
        assert!(body.knockback.x > 0.0);
        assert_eq!(body.hurt_timer, 10);
    }

    #[test]
    fn test_punch_needs_active_window() {
        let (mut player, mut body, mut fx) = setup(EnemyKind::Thug, 460.0);
        punching(&mut player, 3);
        assert!(resolve_player_hits(&mut body, &mut player, &mut fx).is_none());
        punching(&mut player, 13);
        assert!(resolve_player_hits(&mut body, &mut player, &mut fx).is_none());
    }

    #[test]
    fn test_punch_respects_facing() {
        let (mut player, mut body, mut fx) = setup(EnemyKind::Thug, 340.0);
        punching(&mut player, 5);
        assert!(resolve_player_hits(&mut body, &mut player, &mut fx).is_none());

        body.pos.x = 395.0;
        assert!(resolve_player_hits(&mut body, &mut player, &mut fx).is_some());
    }

    #[test]
    fn test_buff_hits_behind_and_harder_on_bosses() {
        let (mut player, mut body, mut fx) = setup(EnemyKind::Screamer, 300.0);
        player.buffing = true;
        player.buff_timer = 30;

        let hit = resolve_player_hits(&mut body, &mut player, &mut fx).expect("hit");
        assert_eq!(hit.attack, AttackKind::Buff);
        assert_eq!(hit.damage, BUFF_DAMAGE_BOSS);
        assert!(body.knockback.x < 0.0);
        assert_eq!(player.hitstop, HITSTOP_TICKS + 2);
        assert!(resolve_player_hits(&mut body, &mut player, &mut fx).is_none());
    }

    #[test]
    fn test_kill_reported() {
        let (mut player, mut body, mut fx) = setup(EnemyKind::Runner, 450.0);
        player.buffing = true;
        player.buff_timer = 20;
        let hit = resolve_player_hits(&mut body, &mut player, &mut fx).expect("hit");
        assert!(hit.killed);
        assert_eq!(hit.damage, BUFF_DAMAGE_GRUNT);
    }

    #[test]
    fn test_boss_death_shakes() {
        let (_, body, mut fx) = setup(EnemyKind::Juggernaut, 450.0);
        death_effects(&body, &mut fx);
        assert_eq!(fx.shake_magnitude(), 25);
        assert_eq!(fx.particle_count(), 32);

        let (_, grunt, mut calm) = setup(EnemyKind::Guard, 450.0);
        death_effects(&grunt, &mut calm);
        assert_eq!(calm.shake_magnitude(), 0);
        assert_eq!(calm.particle_count(), 12);
    }

    #[test]
    fn test_out_of_depth_misses() {
        let (mut player, mut body, mut fx) = setup(EnemyKind::Thug, 450.0);
        body.pos.y = 390.0 + PUNCH_DEPTH;
        punching(&mut player, 6);
        assert!(resolve_player_hits(&mut body, &mut player, &mut fx).is_none());
    }
}
