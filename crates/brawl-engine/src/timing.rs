//! Frame pacing for the runner.
//!
//! The simulation only ever advances in whole 60 Hz ticks. In realtime mode
//! each wall-clock frame pays into a tick budget and the runner steps as
//! many ticks as the budget covers; headless runs ignore the clock and step
//! once per frame.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Simulation tick length in seconds.
pub const SIM_DT: f32 = 1.0 / 60.0;

/// Most ticks run for a single frame.
pub const MAX_STEPS_PER_FRAME: u32 = 10;

/// Longest frame gap credited to the tick budget.
const MAX_FRAME_GAP: f32 = 0.25;

/// Frames kept for the rolling average.
const WINDOW: usize = 120;

/// Turns wall-clock frames into simulation ticks.
#[derive(Debug)]
pub struct FrameTiming {
    target_fps: u32,
    frame_budget: Duration,
    frame_start: Instant,
    owed: f32,
    recent: VecDeque<f32>,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameTiming {
    /// Paces frames at `target_fps` (at least 1).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            target_fps,
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            frame_start: Instant::now(),
            owed: 0.0,
            recent: VecDeque::with_capacity(WINDOW),
        }
    }

    /// Length of one simulation tick in seconds.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        SIM_DT
    }

    /// Seconds since the previous frame started, capped, and recorded for
    /// the rolling average.
    pub fn delta_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.frame_start).as_secs_f32().min(MAX_FRAME_GAP);
        self.frame_start = now;

        if self.recent.len() == WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(dt);
        dt
    }

    /// Credits `dt` seconds and returns how many ticks to step now.
    ///
    /// At most [`MAX_STEPS_PER_FRAME`] ticks are paid out; a backlog larger
    /// than two ticks after that is forgiven.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.owed += dt;
        let due = (self.owed / SIM_DT).floor() as u32;
        let steps = due.min(MAX_STEPS_PER_FRAME);
        self.owed -= steps as f32 * SIM_DT;

        if self.owed > SIM_DT * 2.0 {
            self.owed = 0.0;
        }
        steps
    }

    /// Sleeps until the current frame has used its whole budget.
    pub fn sleep_remainder(&self) {
        if let Some(left) = self.frame_budget.checked_sub(self.frame_start.elapsed()) {
            std::thread::sleep(left);
        }
    }

    /// Mean of the recorded frame times in milliseconds.
    #[must_use]
    pub fn average_frame_time_ms(&self) -> f32 {
        if self.recent.is_empty() {
            return 0.0;
        }
        self.recent.iter().sum::<f32>() * 1000.0 / self.recent.len() as f32
    }

    /// Frames per second being paced for.
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Drops the tick budget and history (start of a run).
    pub fn reset(&mut self) {
        self.frame_start = Instant::now();
        self.owed = 0.0;
        self.recent.clear();
    }
}

/// Measured frame rate, refreshed twice a second.
#[derive(Debug)]
pub struct FpsCounter {
    frames: u32,
    since: Instant,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    const REFRESH: Duration = Duration::from_millis(500);

    /// Starts counting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: 0,
            since: Instant::now(),
            fps: 0.0,
        }
    }

    /// Counts a frame and returns the latest rate.
    pub fn tick(&mut self) -> f32 {
        self.frames += 1;
        let elapsed = self.since.elapsed();
        if elapsed >= Self::REFRESH {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.since = Instant::now();
        }
        self.fps
    }

    /// Latest measured rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
