//! # Brawl
//!
//! Command-line entry point: `brawl [config.toml]`.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use brawl_engine::EngineConfig;

/// Main entry point.
fn main() -> Result<()> {
    let mut config = EngineConfig::load_from(EngineConfig::path_from_args(std::env::args()));
    config.validate();

    let filter = EnvFilter::from_default_env()
        .add_directive("brawl=info".parse()?)
        .add_directive("brawl_engine=info".parse()?)
        .add_directive("brawl_sim=info".parse()?);
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    info!("Brawl starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let outcome = brawl_engine::run(config)?;

    info!(
        "Brawl shutdown complete after {} frames ({} levels cleared)",
        outcome.frames, outcome.levels_cleared
    );
    Ok(())
}
