//! Engine configuration.
//!
//! Covers how the headless runner drives the simulation: pacing, seed,
//! frame cap, presenter cadence and input source. Gameplay tuning is fixed
//! in the simulation and deliberately absent here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use brawl_common::{BrawlError, BrawlResult};
use brawl_sim::LevelId;

/// Configuration file name.
pub const CONFIG_FILE: &str = "brawl.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Pacing ===
    /// Target frames per second
    pub target_fps: u32,
    /// Sleep between frames to run at wall-clock speed
    pub realtime: bool,
    /// Stop after this many frames (0 = run until the campaign ends)
    pub max_frames: u64,

    // === Session ===
    /// Campaign seed (None = derived from the clock)
    pub seed: Option<u64>,
    /// Level to start at (1 or 2)
    pub start_level: u32,
    /// Drive the player with the autopilot instead of idling
    pub autopilot: bool,

    // === Presentation ===
    /// Log a HUD line every N frames (0 = only terminal signals)
    pub presenter_interval: u32,
    /// Capacity of the frame channel to the presenter
    pub channel_capacity: usize,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            realtime: false,
            max_frames: 60 * 60 * 10,

            seed: None,
            start_level: 1,
            autopilot: true,

            presenter_interval: 120,
            channel_capacity: 64,
            json_logs: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            },
        }
    }

    /// Load configuration, reporting read and parse failures.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> BrawlResult<Self> {
        let mut contents = String::new();
        fs::File::open(path.as_ref())?.read_to_string(&mut contents)?;
        toml::from_str(&contents).map_err(|e| BrawlError::Config(e.to_string()))
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Config path from the first CLI argument, or the default file name.
    pub fn path_from_args(mut args: impl Iterator<Item = String>) -> PathBuf {
        args.nth(1)
            .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from)
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.target_fps = self.target_fps.clamp(30, 240);
        self.start_level = self.start_level.clamp(1, 2);
        self.channel_capacity = self.channel_capacity.clamp(1, 4096);
    }

    /// Level the campaign starts at.
    #[must_use]
    pub fn starting_level(&self) -> LevelId {
        LevelId::from_number(self.start_level).unwrap_or_default()
    }
}
