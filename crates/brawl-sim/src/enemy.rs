//! Enemy catalogue and the shared enemy body.

use brawl_common::{EntityId, Facing, LaneBounds};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ai::Brain;
use crate::constants::{GRUNT_SPAWN_COOLDOWN, KNOCKBACK_DECAY};
use crate::feedback::{palette, Color};

// ============================================================================
// Enemy Kinds
// ============================================================================

/// Closed set of enemy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Level 1 standard grunt.
    Thug,
    /// Level 1 fast grunt.
    Runner,
    /// Level 2 heavy grunt.
    Guard,
    /// Level 2 fast grunt.
    Scientist,
    /// Level 1 boss with a telegraphed shout.
    Screamer,
    /// Level 2 boss with a charge dash and an enraged phase.
    Juggernaut,
}

impl EnemyKind {
    /// Every kind.
    pub const ALL: [Self; 6] = [
        Self::Thug,
        Self::Runner,
        Self::Guard,
        Self::Scientist,
        Self::Screamer,
        Self::Juggernaut,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Thug => "Thug",
            Self::Runner => "Runner",
            Self::Guard => "Guard",
            Self::Scientist => "Scientist",
            Self::Screamer => "Screamer",
            Self::Juggernaut => "Juggernaut",
        }
    }

    /// Whether this kind is a level boss.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Screamer | Self::Juggernaut)
    }

    /// HP at spawn.
    #[must_use]
    pub const fn max_hp(self) -> i32 {
        match self {
            Self::Thug => 4,
            Self::Runner => 2,
            Self::Guard => 5,
            Self::Scientist => 3,
            Self::Screamer => 40,
            Self::Juggernaut => 60,
        }
    }

    /// Walking speed multiplier over the base enemy speed.
    #[must_use]
    pub const fn speed_mult(self) -> f32 {
        match self {
            Self::Thug => 1.0,
            Self::Runner | Self::Scientist => 1.5,
            Self::Guard => 0.9,
            Self::Screamer => 0.8,
            Self::Juggernaut => 1.2,
        }
    }

    /// Damage of the melee swing.
    #[must_use]
    pub const fn melee_damage(self) -> i32 {
        match self {
            Self::Thug => 10,
            Self::Runner | Self::Scientist => 8,
            Self::Guard | Self::Juggernaut => 12,
            Self::Screamer => 15,
        }
    }

    /// Cooldown after a melee swing.
    #[must_use]
    pub const fn melee_cooldown(self) -> u32 {
        match self {
            Self::Thug | Self::Guard => 50,
            Self::Runner | Self::Scientist => 30,
            Self::Screamer => 60,
            Self::Juggernaut => 45,
        }
    }

    /// Cooldown a freshly spawned enemy starts with.
    #[must_use]
    pub const fn spawn_cooldown(self) -> u32 {
        match self {
            Self::Screamer => 60,
            Self::Juggernaut => 90,
            _ => GRUNT_SPAWN_COOLDOWN,
        }
    }

    /// Color of the death burst.
    #[must_use]
    pub const fn death_color(self) -> Color {
        match self {
            Self::Thug | Self::Runner => palette::ORANGE,
            Self::Guard => palette::FOREST,
            Self::Scientist => palette::STEEL,
            Self::Screamer => palette::PURPLE,
            Self::Juggernaut => palette::FURY,
        }
    }

    /// Screen shake on death.
    #[must_use]
    pub const fn death_shake(self) -> u32 {
        match self {
            Self::Screamer => 20,
            Self::Juggernaut => 25,
            _ => 0,
        }
    }
}

impl std::fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Enemy Body
// ============================================================================

/// State shared by every enemy regardless of behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBody {
    /// Entity id
    pub id: EntityId,
    /// Kind
    pub kind: EnemyKind,
    /// Ground position
    pub pos: Vec2,
    /// Current HP
    pub hp: i32,
    /// HP at spawn
    pub max_hp: i32,
    /// Facing
    pub facing: Facing,
    /// Knockback velocity
    pub knockback: Vec2,
    /// Remaining knockback ticks
    pub hurt_timer: u32,
    /// Remaining punch animation ticks
    pub punch_timer: u32,
    /// Walking animation flag
    pub walking: bool,
    /// Already hit by the current player attack
    pub hit_this_swing: bool,
}

impl EnemyBody {
    /// Creates a body with the kind's full HP.
    #[must_use]
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2, facing: Facing) -> Self {
        Self {
            id,
            kind,
            pos,
            hp: kind.max_hp(),
            max_hp: kind.max_hp(),
            facing,
            knockback: Vec2::ZERO,
            hurt_timer: 0,
            punch_timer: 0,
            walking: false,
            hit_this_swing: false,
        }
    }

    /// In knockback recovery.
    #[must_use]
    pub const fn is_staggered(&self) -> bool {
        self.hurt_timer > 0
    }

    /// HP reached zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Current HP over max HP.
    #[must_use]
    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }

    /// Starts knockback recovery.
    pub fn stagger(&mut self, knockback: Vec2, ticks: u32) {
        self.knockback = knockback;
        self.hurt_timer = ticks;
    }

    /// Slides along the decaying knockback. Returns true if the enemy was
    /// staggered this tick, in which case nothing else runs for it.
    pub fn recover_knockback(&mut self) -> bool {
        if self.hurt_timer == 0 {
            return false;
        }
        self.hurt_timer -= 1;
        self.pos = LaneBounds::ENEMY.clamp(self.pos + self.knockback);
        self.knockback *= KNOCKBACK_DECAY;
        if self.hurt_timer == 0 {
            self.knockback = Vec2::ZERO;
        }
        true
    }

    /// Walks toward `target`; the depth axis is scaled by `depth_factor`.
    pub fn step_toward(&mut self, target: Vec2, speed: f32, depth_factor: f32) {
        let delta = target - self.pos;
        let dist = delta.length();
        if dist <= f32::EPSILON {
            return;
        }
        let dir = delta / dist;
        self.pos.x += dir.x * speed;
        self.pos.y += dir.y * speed * depth_factor;
    }

    /// Clamps into the enemy lane.
    pub fn clamp_to_lane(&mut self) {
        self.pos = LaneBounds::ENEMY.clamp(self.pos);
    }

    /// Ages the punch animation.
    pub fn tick_punch_anim(&mut self) {
        self.punch_timer = self.punch_timer.saturating_sub(1);
    }

    /// Anchor for particles and text above the enemy.
    #[must_use]
    pub fn overhead(&self, height: f32) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - height)
    }
}

// ============================================================================
// Enemy
// ============================================================================

/// An enemy: its body plus the behaviour driving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Shared state
    pub body: EnemyBody,
    /// Behaviour state machine
    pub brain: Brain,
}

impl Enemy {
    /// Creates an enemy with the behaviour matching its kind.
    #[must_use]
    pub fn spawn(id: EntityId, kind: EnemyKind, pos: Vec2, facing: Facing) -> Self {
        Self {
            body: EnemyBody::new(id, kind, pos, facing),
            brain: Brain::for_kind(kind),
        }
    }

    /// Entity id.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.body.id
    }

    /// Kind.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.body.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(kind: EnemyKind) -> EnemyBody {
        EnemyBody::new(EntityId::from_raw(1), kind, Vec2::new(500.0, 390.0), Facing::Left)
    }

    #[test]
    fn test_catalogue() {
        assert_eq!(EnemyKind::Thug.max_hp(), 4);
        assert_eq!(EnemyKind::Runner.max_hp(), 2);
        assert_eq!(EnemyKind::Juggernaut.max_hp(), 60);
        assert!(EnemyKind::Screamer.is_boss());
        assert!(!EnemyKind::Guard.is_boss());
        assert_eq!(EnemyKind::Runner.spawn_cooldown(), GRUNT_SPAWN_COOLDOWN);

        let bosses = EnemyKind::ALL.iter().filter(|k| k.is_boss()).count();
        assert_eq!(bosses, 2);
    }

    #[test]
    fn test_knockback_consumes_tick_until_done() {
        let mut e = body(EnemyKind::Thug);
        e.stagger(Vec2::new(7.0, 0.5), 3);

        assert!(e.recover_knockback());
        assert!((e.pos.x - 507.0).abs() < 1e-4);
        assert!(e.recover_knockback());
        assert!(e.recover_knockback());
        assert!(!e.is_staggered());
        assert_eq!(e.knockback, Vec2::ZERO);
        assert!(!e.recover_knockback());
    }

    #[test]
    fn test_knockback_clamped() {
        let mut e = body(EnemyKind::Thug);
        e.pos.x = 12.0;
        e.stagger(Vec2::new(-14.0, 0.0), 10);
        e.recover_knockback();
        assert_eq!(e.pos.x, LaneBounds::ENEMY.min_x);
    }

    #[test]
    fn test_step_toward_scales_depth() {
        let mut e = body(EnemyKind::Thug);
        e.pos = Vec2::new(0.0, 380.0);
        e.step_toward(Vec2::new(0.0, 400.0), 1.0, 0.5);
        assert!((e.pos.y - 380.5).abs() < 1e-5);

        let before = e.pos;
        e.step_toward(before, 1.0, 1.0);
        assert_eq!(e.pos, before);
    }

    proptest! {
        #[test]
        fn knockback_strictly_decays(kx in -20.0f32..20.0, ky in -2.0f32..2.0, ticks in 2u32..30) {
            prop_assume!(kx.abs() > 0.01);
            let mut e = body(EnemyKind::Guard);
            e.stagger(Vec2::new(kx, ky), ticks);
            let mut last = e.knockback.length();
            while e.hurt_timer > 1 {
                e.recover_knockback();
                let now = e.knockback.length();
                prop_assert!(now < last);
                last = now;
            }
            e.recover_knockback();
            prop_assert_eq!(e.knockback, Vec2::ZERO);
        }
    }
}
