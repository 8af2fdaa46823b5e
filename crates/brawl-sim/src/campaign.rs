//! Two-level campaign flow.
//!
//! The campaign owns the active [`World`] and reacts to its terminal
//! signals: finishing the street moves on to the factory with the score and
//! some health carried over, beating the factory wins, dying anywhere loses.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::MAX_HP;
use crate::events::{Signal, StepReport};
use crate::input::InputState;
use crate::level::LevelId;
use crate::world::World;

/// HP restored when entering the next level.
pub const LEVEL_TRANSITION_HEAL: i32 = 30;

/// Invincibility granted when entering the next level.
pub const LEVEL_TRANSITION_INVINCIBILITY: u32 = 60;

/// Where the campaign stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignState {
    /// A level is being played.
    Playing,
    /// The final boss is down.
    Won {
        /// Final score
        score: u32,
    },
    /// The player died.
    Lost {
        /// Score at death
        score: u32,
        /// Level the player died in
        level: LevelId,
    },
}

impl CampaignState {
    /// Whether the campaign has ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// A full run through both levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    world: World,
    state: CampaignState,
    seed: u64,
    levels_cleared: u32,
}

impl Campaign {
    /// Starts at level 1 with score 0 and full HP.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::starting_at(LevelId::Street, seed)
    }

    /// Starts at an arbitrary level with score 0 and full HP.
    #[must_use]
    pub fn starting_at(level: LevelId, seed: u64) -> Self {
        info!("Campaign starting at {} (seed {})", level, seed);
        Self {
            world: World::new(level, seed),
            state: CampaignState::Playing,
            seed,
            levels_cleared: 0,
        }
    }

    /// The level currently loaded.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the loaded level, for scripted setups.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CampaignState {
        self.state
    }

    /// Whether the run has ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Levels beaten so far.
    #[must_use]
    pub const fn levels_cleared(&self) -> u32 {
        self.levels_cleared
    }

    /// Steps the active level and applies any terminal signal it raised.
    pub fn step(&mut self, input: &InputState) -> StepReport {
        if self.is_finished() {
            return StepReport::default();
        }
        let report = self.world.step(input);
        if let Some(signal) = report.signal {
            self.apply(signal);
        }
        report
    }

    fn apply(&mut self, signal: Signal) {
        let level = self.world.level();
        match signal {
            Signal::GameOver { score } => {
                info!("Campaign lost in {} with score {}", level, score);
                self.state = CampaignState::Lost { score, level };
            },
            Signal::Victory { score } => {
                self.levels_cleared += 1;
                info!("Campaign won with score {}", score);
                self.state = CampaignState::Won { score };
            },
            Signal::LevelComplete { score, hp } => {
                self.levels_cleared += 1;
                let Some(next) = level.next() else {
                    self.state = CampaignState::Won { score };
                    return;
                };
                let hp = (hp + LEVEL_TRANSITION_HEAL).min(MAX_HP);
                info!("Entering {} with score {} and {} HP", next, score, hp);
                let seed = self.seed.wrapping_add(u64::from(next.config().number));
                self.world = World::new(next, seed)
                    .with_score(score)
                    .with_player_hp(hp)
                    .with_spawn_invincibility(LEVEL_TRANSITION_INVINCIBILITY);
            },
        }
    }
}
