//! Per-tick simulation events and terminal signals.
//!
//! Events describe what happened during a step so that presentation layers
//! (audio cues, HUD, logs) can react without diffing world state.

use brawl_common::EntityId;
use serde::{Deserialize, Serialize};

use crate::attack::AttackKind;
use crate::enemy::EnemyKind;
use crate::item::ItemKind;

/// Something that happened during one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// The player started an attack
    AttackStarted {
        /// Which attack
        attack: AttackKind,
    },
    /// The player left the ground
    Jumped,
    /// The player touched down
    Landed,
    /// The player started eating while idle
    StartedEating,
    /// A player attack connected
    EnemyHit {
        /// Enemy entity
        enemy: EntityId,
        /// Enemy kind
        kind: EnemyKind,
        /// Attack that landed
        attack: AttackKind,
        /// Damage dealt
        damage: i32,
    },
    /// An enemy died
    EnemyKilled {
        /// Enemy entity
        enemy: EntityId,
        /// Enemy kind
        kind: EnemyKind,
        /// Score awarded
        score: u32,
    },
    /// An enemy attack connected
    PlayerDamaged {
        /// Attacker kind
        source: EnemyKind,
        /// Damage taken
        damage: i32,
        /// HP left afterwards
        hp_left: i32,
    },
    /// A boss began a telegraphed attack
    BossWarning {
        /// Boss entity
        enemy: EntityId,
        /// Boss kind
        kind: EnemyKind,
    },
    /// A boss released its area shout
    BossShout {
        /// Boss entity
        enemy: EntityId,
    },
    /// A boss entered its enraged phase
    BossEnraged {
        /// Boss entity
        enemy: EntityId,
    },
    /// The level boss arrived
    BossSpawned {
        /// Boss entity
        enemy: EntityId,
        /// Boss kind
        kind: EnemyKind,
    },
    /// A grunt arrived
    EnemySpawned {
        /// Enemy entity
        enemy: EntityId,
        /// Enemy kind
        kind: EnemyKind,
    },
    /// The companion dropped an item
    ItemDropped {
        /// Item entity
        item: EntityId,
        /// Item kind
        kind: ItemKind,
    },
    /// The player collected an item
    ItemPickedUp {
        /// Item entity
        item: EntityId,
        /// Item kind
        kind: ItemKind,
        /// HP restored (zero for penalty items)
        healed: i32,
    },
    /// An item lay around too long
    ItemExpired {
        /// Item entity
        item: EntityId,
    },
}

/// Terminal outcome of a level session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// The player died.
    GameOver {
        /// Score at death
        score: u32,
    },
    /// The level boss died and another level follows.
    LevelComplete {
        /// Score carried over
        score: u32,
        /// HP carried over
        hp: i32,
    },
    /// The final boss died.
    Victory {
        /// Final score
        score: u32,
    },
}

impl Signal {
    /// Score carried by the signal.
    #[must_use]
    pub const fn score(&self) -> u32 {
        match self {
            Self::GameOver { score }
            | Self::LevelComplete { score, .. }
            | Self::Victory { score } => *score,
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GameOver { score } => write!(f, "game over (score {score})"),
            Self::LevelComplete { score, hp } => {
                write!(f, "level complete (score {score}, hp {hp})")
            },
            Self::Victory { score } => write!(f, "victory (score {score})"),
        }
    }
}

/// Everything a caller learns from one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Terminal signal raised this step
    pub signal: Option<Signal>,
    /// Events in the order they happened
    pub events: Vec<SimEvent>,
    /// The step was swallowed by hitstop
    pub frozen: bool,
}

impl StepReport {
    /// Report for a step frozen by hitstop.
    #[must_use]
    pub fn frozen() -> Self {
        Self {
            frozen: true,
            ..Self::default()
        }
    }

    /// Whether any event matches `pred`.
    pub fn any(&self, pred: impl Fn(&SimEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}
