//! Application lifecycle management.
//!
//! Headless frame loop: poll an input source, step the campaign, hand a
//! summary to the presenter, repeat until the campaign ends or the frame cap
//! is hit.

use anyhow::Result;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use brawl_sim::{Campaign, CampaignState, SimEvent};

use crate::config::EngineConfig;
use crate::input::{AutoPilot, IdleInput, InputSource};
use crate::presenter::{FrameSummary, LogPresenter, Presenter, PresenterHandle};
use crate::timing::{FpsCounter, FrameTiming};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Campaign state at the end of the run
    pub state: CampaignState,
    /// Simulation steps taken
    pub frames: u64,
    /// Levels beaten
    pub levels_cleared: u32,
    /// Frames the presenter never saw
    pub dropped_frames: u64,
}

impl RunOutcome {
    /// Whether the run stopped at the frame cap rather than a campaign end.
    #[must_use]
    pub fn hit_frame_cap(&self) -> bool {
        !self.state.is_finished()
    }
}

/// Application state.
pub struct BrawlApp {
    config: EngineConfig,
    campaign: Campaign,
    input: Box<dyn InputSource>,
    timing: FrameTiming,
    fps: FpsCounter,
    frame: u64,
}

impl BrawlApp {
    /// Builds the campaign and input source described by `config`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        let input: Box<dyn InputSource> = if config.autopilot {
            Box::new(AutoPilot::new())
        } else {
            Box::new(IdleInput)
        };
        info!(
            "Seed {}, input {}, starting at {}",
            seed,
            input.name(),
            config.starting_level()
        );

        Self {
            campaign: Campaign::starting_at(config.starting_level(), seed),
            timing: FrameTiming::new(config.target_fps),
            fps: FpsCounter::new(),
            frame: 0,
            input,
            config,
        }
    }

    /// The campaign being played.
    #[must_use]
    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    fn frame_cap_reached(&self) -> bool {
        self.config.max_frames > 0 && self.frame >= self.config.max_frames
    }

    /// Runs one frame: one tick headless, as many as the clock owes in realtime.
    fn run_frame<P: Presenter>(&mut self, presenter: &mut PresenterHandle<P>) -> Result<()> {
        let steps = if self.config.realtime {
            let dt = self.timing.delta_time();
            self.timing.accumulate(dt)
        } else {
            1
        };

        for _ in 0..steps {
            if self.campaign.is_finished() || self.frame_cap_reached() {
                break;
            }
            let input = self.input.poll(self.campaign.world());
            let report = self.campaign.step(&input);
            self.frame += 1;

            for event in &report.events {
                if let SimEvent::BossSpawned { kind, .. } = event {
                    info!("Frame {}: {} entered", self.frame, kind.name());
                }
            }
            let summary = FrameSummary::capture(self.frame, self.campaign.world(), &report);
            if !presenter.submit(summary)? {
                debug!("Presenter lagging, frame {} dropped", self.frame);
            }
        }

        if self.config.realtime {
            self.fps.tick();
            self.timing.sleep_remainder();
        }
        Ok(())
    }

    /// Drives the campaign to completion or the frame cap.
    pub fn drive<P: Presenter>(&mut self, presenter: &mut PresenterHandle<P>) -> Result<RunOutcome> {
        self.timing.reset();
        while !self.campaign.is_finished() && !self.frame_cap_reached() {
            self.run_frame(presenter)?;
        }

        if self.config.realtime {
            debug!(
                "Average frame {:.2} ms, {:.1} FPS",
                self.timing.average_frame_time_ms(),
                self.fps.fps()
            );
        }

        Ok(RunOutcome {
            state: self.campaign.state(),
            frames: self.frame,
            levels_cleared: self.campaign.levels_cleared(),
            dropped_frames: presenter.dropped(),
        })
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

/// Runs a full session with the log presenter.
pub fn run(config: EngineConfig) -> Result<RunOutcome> {
    info!("Configuration loaded:");
    info!("  Target FPS: {} (realtime: {})", config.target_fps, config.realtime);
    info!("  Frame cap: {}", config.max_frames);
    info!("  Presenter every {} frames", config.presenter_interval);

    let mut presenter = PresenterHandle::spawn(
        LogPresenter::new(config.presenter_interval),
        config.channel_capacity,
    )?;
    let mut app = BrawlApp::new(config);
    let outcome = app.drive(&mut presenter)?;
    presenter.finish()?;

    match outcome.state {
        CampaignState::Won { score } => info!("Victory with score {}", score),
        CampaignState::Lost { score, level } => {
            info!("Defeated in {} with score {}", level, score);
        },
        CampaignState::Playing => warn!(
            "Stopped at the frame cap after {} frames in {}",
            outcome.frames,
            app.campaign().world().level()
        ),
    }
    if outcome.dropped_frames > 0 {
        info!("{} frames skipped by the presenter", outcome.dropped_frames);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brawl_sim::LevelId;

    fn headless(seed: u64, max_frames: u64) -> EngineConfig {
        EngineConfig {
            seed: Some(seed),
            max_frames,
            presenter_interval: 0,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_frame_cap_stops_run() {
        let config = EngineConfig {
            autopilot: false,
            ..headless(3, 300)
        };
        let outcome = run(config).expect("run");

        assert_eq!(outcome.frames, 300);
        assert!(outcome.hit_frame_cap());
        assert_eq!(outcome.levels_cleared, 0);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let a = run(headless(11, 2000)).expect("run");
        let b = run(headless(11, 2000)).expect("run");
        assert_eq!(a.state, b.state);
        assert_eq!(a.frames, b.frames);
    }

    #[test]
    fn test_start_level_respected() {
        let config = EngineConfig {
            start_level: 2,
            ..headless(4, 1)
        };
        let mut presenter = PresenterHandle::spawn(LogPresenter::new(0), 4).expect("spawn");
        let mut app = BrawlApp::new(config);
        app.drive(&mut presenter).expect("drive");
        presenter.finish().expect("join");

        assert_eq!(app.campaign().world().level(), LevelId::Factory);
        assert_eq!(app.campaign().world().tick(), 1);
    }
}
