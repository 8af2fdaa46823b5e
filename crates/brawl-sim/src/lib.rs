//! # Brawl Sim
//!
//! Frame-stepped combat simulation for a two-level 2.5D brawler.
//!
//! This crate holds the whole deterministic core and performs no I/O:
//! - Player kinematics with a separate jump axis
//! - Punch and buff attack windows, hit detection, combo and hitstop
//! - Enemy behaviours (grunts, the shout boss, the charge boss)
//! - Companion follow/flee and item drops
//! - Items, the wave spawner and transient feedback (particles, texts, shake)
//! - The per-level [`World`], the two-level [`Campaign`] and world snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ai;
pub mod attack;
pub mod campaign;
pub mod combat;
pub mod companion;
pub mod constants;
pub mod enemy;
pub mod events;
pub mod feedback;
pub mod input;
pub mod item;
pub mod kinematics;
pub mod level;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod spawner;
pub mod store;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::ai::{AiOutcome, Brain, EnemyAi, JuggernautState, ScreamerState};
    pub use crate::attack::*;
    pub use crate::campaign::*;
    pub use crate::combat::*;
    pub use crate::companion::*;
    pub use crate::enemy::*;
    pub use crate::events::*;
    pub use crate::feedback::*;
    pub use crate::input::*;
    pub use crate::item::*;
    pub use crate::kinematics::*;
    pub use crate::level::*;
    pub use crate::player::*;
    pub use crate::rng::*;
    pub use crate::spawner::*;
    pub use crate::store::*;
    pub use crate::world::*;
}

pub use prelude::*;
