//! # Brawl Engine
//!
//! Headless runner for the brawl simulation.
//!
//! This crate wires the simulation to the outside world:
//! - Config: TOML engine settings
//! - Timing: fixed 60 Hz stepping with optional wall-clock pacing
//! - Input: autopilot and idle input sources
//! - Presenter: HUD summaries over a bounded channel to a logging thread

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod config;
pub mod input;
pub mod presenter;
pub mod timing;

pub use app::{run, BrawlApp, RunOutcome};
pub use config::EngineConfig;
