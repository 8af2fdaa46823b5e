//! Level presets.
//!
//! Each level fixes its grunt roster, its boss, the score the boss waits
//! for and the grunt spawn cadence. Nothing here is tunable at runtime.

use serde::{Deserialize, Serialize};

use crate::constants::MS_PER_TICK;
use crate::enemy::EnemyKind;
use crate::events::Signal;
use crate::feedback::{palette, Color};

/// Which level a world plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LevelId {
    /// Level 1, the street.
    #[default]
    Street,
    /// Level 2, the factory.
    Factory,
}

/// Fixed parameters of one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// 1-based level number
    pub number: u32,
    /// Display name
    pub name: &'static str,
    /// The two grunt kinds spawned here
    pub grunts: [EnemyKind; 2],
    /// The level boss
    pub boss: EnemyKind,
    /// Score gained in this level that summons the boss
    pub boss_threshold: u32,
    /// Milliseconds between grunt spawns
    pub spawn_interval_ms: f32,
    /// Shake when the boss arrives
    pub boss_shake: u32,
    /// Boss arrival text
    pub boss_announce: &'static str,
    /// Boss arrival text color
    pub announce_color: Color,
}

impl LevelConfig {
    /// Grunt spawn interval in ticks.
    #[must_use]
    pub fn spawn_interval_ticks(&self) -> f32 {
        self.spawn_interval_ms / MS_PER_TICK
    }
}

const STREET: LevelConfig = LevelConfig {
    number: 1,
    name: "street",
    grunts: [EnemyKind::Thug, EnemyKind::Runner],
    boss: EnemyKind::Screamer,
    boss_threshold: 1000,
    spawn_interval_ms: 3500.0,
    boss_shake: 15,
    boss_announce: "☠ THE SCREAMER!",
    announce_color: palette::PURPLE,
};

const FACTORY: LevelConfig = LevelConfig {
    number: 2,
    name: "factory",
    grunts: [EnemyKind::Guard, EnemyKind::Scientist],
    boss: EnemyKind::Juggernaut,
    boss_threshold: 800,
    spawn_interval_ms: 3000.0,
    boss_shake: 20,
    boss_announce: "🔥 THE JUGGERNAUT, FINAL BOSS!",
    announce_color: palette::FURY,
};

impl LevelId {
    /// Every level in campaign order.
    pub const ALL: [Self; 2] = [Self::Street, Self::Factory];

    /// Parameters of this level.
    #[must_use]
    pub const fn config(self) -> &'static LevelConfig {
        match self {
            Self::Street => &STREET,
            Self::Factory => &FACTORY,
        }
    }

    /// Level that follows, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Street => Some(Self::Factory),
            Self::Factory => None,
        }
    }

    /// Level by 1-based number.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.config().number == number)
    }

    /// Signal raised when this level's boss dies.
    #[must_use]
    pub const fn boss_defeated(self, score: u32, hp: i32) -> Signal {
        match self.next() {
            Some(_) => Signal::LevelComplete { score, hp },
            None => Signal::Victory { score },
        }
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config();
        write!(f, "level {} ({})", config.number, config.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_rosters() {
        let street = LevelId::Street.config();
        assert_eq!(street.boss, EnemyKind::Screamer);
        assert_eq!(street.boss_threshold, 1000);
        assert!(street.grunts.iter().all(|k| !k.is_boss()));

        let factory = LevelId::Factory.config();
        assert_eq!(factory.boss, EnemyKind::Juggernaut);
        assert_eq!(factory.boss_threshold, 800);
        assert_eq!(factory.boss_shake, 20);
    }

    #[test]
    fn test_spawn_interval_in_ticks() {
        let ticks = LevelId::Street.config().spawn_interval_ticks();
        assert!((ticks - 209.96).abs() < 0.01);
    }

    #[test]
    fn test_boss_outcome_per_level() {
        assert_eq!(
            LevelId::Street.boss_defeated(1500, 60),
            Signal::LevelComplete { score: 1500, hp: 60 }
        );
        assert_eq!(
            LevelId::Factory.boss_defeated(2500, 60),
            Signal::Victory { score: 2500 }
        );
    }

    #[test]
    fn test_level_lookup() {
        assert_eq!(LevelId::from_number(2), Some(LevelId::Factory));
        assert_eq!(LevelId::from_number(3), None);
        assert_eq!(LevelId::Street.next(), Some(LevelId::Factory));
        assert_eq!(LevelId::Factory.to_string(), "level 2 (factory)");
    }
}
