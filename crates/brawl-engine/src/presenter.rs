//! Presentation side of the runner.
//!
//! The simulation thread never waits on presentation: each frame is boiled
//! down to a [`FrameSummary`] and pushed over a bounded channel to a
//! presenter thread. When the presenter lags, ordinary frames are dropped;
//! frames carrying a terminal signal are always delivered.

use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{bounded, Sender, TrySendError};
use tracing::{debug, info};

use brawl_sim::{LevelId, Signal, StepReport, World};

/// HUD-level view of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    /// Runner frame number
    pub frame: u64,
    /// Level being played
    pub level: LevelId,
    /// Simulation tick inside the level
    pub tick: u64,
    /// Score so far
    pub score: u32,
    /// Player HP
    pub hp: i32,
    /// Current combo
    pub combo: u32,
    /// Enemies alive
    pub enemies: usize,
    /// Boss HP and max HP, while a boss is alive
    pub boss_hp: Option<(i32, i32)>,
    /// Live particles
    pub particles: usize,
    /// Screen shake magnitude
    pub shake: u32,
    /// Events raised this frame
    pub events: usize,
    /// Terminal signal raised this frame
    pub signal: Option<Signal>,
}

impl FrameSummary {
    /// Summarizes `world` after a step that produced `report`.
    #[must_use]
    pub fn capture(frame: u64, world: &World, report: &StepReport) -> Self {
        let player = world.player();
        Self {
            frame,
            level: world.level(),
            tick: world.tick(),
            score: world.score(),
            hp: player.hp,
            combo: player.combo,
            enemies: world.enemy_count(),
            boss_hp: world.boss().map(|b| (b.body.hp, b.body.max_hp)),
            particles: world.feedback().particle_count(),
            shake: world.feedback().shake_magnitude(),
            events: report.events.len(),
            signal: report.signal,
        }
    }

    /// One-line HUD rendering.
    #[must_use]
    pub fn hud_line(&self) -> String {
        let mut line = format!(
            "{} | tick {} | score {} | hp {} | combo {} | enemies {}",
            self.level, self.tick, self.score, self.hp, self.combo, self.enemies
        );
        if let Some((hp, max)) = self.boss_hp {
            line.push_str(&format!(" | boss {hp}/{max}"));
        }
        line
    }
}

/// Consumes frame summaries.
pub trait Presenter: Send + 'static {
    /// Handles one delivered frame.
    fn present(&mut self, frame: &FrameSummary);
}

/// Logs a HUD line every `interval` frames and on every terminal signal.
#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    interval: u32,
    lines: u64,
    signals: Vec<Signal>,
}

impl LogPresenter {
    /// Logs every `interval` frames (0 = terminal signals only).
    #[must_use]
    pub fn new(interval: u32) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// HUD lines logged so far.
    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Terminal signals seen, in order.
    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameSummary) {
        if let Some(signal) = frame.signal {
            info!("{} => {}", frame.hud_line(), signal);
            self.signals.push(signal);
            self.lines += 1;
            return;
        }
        if self.interval > 0 && frame.frame % u64::from(self.interval) == 0 {
            info!("{}", frame.hud_line());
            self.lines += 1;
        }
    }
}

/// Owns the presenter thread and the sending end of its channel.
#[derive(Debug)]
pub struct PresenterHandle<P: Presenter> {
    sender: Sender<FrameSummary>,
    thread: JoinHandle<P>,
    dropped: u64,
}

impl<P: Presenter> PresenterHandle<P> {
    /// Starts `presenter` on its own thread behind a channel of `capacity`.
    pub fn spawn(mut presenter: P, capacity: usize) -> Result<Self> {
        let (sender, receiver) = bounded::<FrameSummary>(capacity.max(1));
        let thread = thread::Builder::new()
            .name("presenter".into())
            .spawn(move || {
                for frame in &receiver {
                    presenter.present(&frame);
                }
                presenter
            })
            .context("failed to start presenter thread")?;

        Ok(Self {
            sender,
            thread,
            dropped: 0,
        })
    }

    /// Hands a frame to the presenter.
    ///
    /// Returns `false` when the frame was dropped because the presenter lags.
    pub fn submit(&mut self, frame: FrameSummary) -> Result<bool> {
        if frame.signal.is_some() {
            self.sender
                .send(frame)
                .map_err(|_| anyhow!("presenter thread stopped"))?;
            return Ok(true);
        }
        match self.sender.try_send(frame) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                Ok(false)
            },
            Err(TrySendError::Disconnected(_)) => Err(anyhow!("presenter thread stopped")),
        }
    }

    /// Frames dropped so far.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Closes the channel, waits for the presenter to drain it and returns it.
    pub fn finish(self) -> Result<P> {
        let Self {
            sender,
            thread,
            dropped,
        } = self;
        drop(sender);
        debug!("Presenter closing, {} frames dropped", dropped);
        thread
            .join()
            .map_err(|_| anyhow!("presenter thread panicked"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brawl_sim::InputState;

    fn summary(frame: u64, signal: Option<Signal>) -> FrameSummary {
        let world = World::new(LevelId::Street, 1);
        let report = StepReport {
            signal,
            ..StepReport::default()
        };
        FrameSummary::capture(frame, &world, &report)
    }

    #[test]
    fn test_capture_reads_world() {
        let mut world = World::new(LevelId::Factory, 2).with_score(800);
        let report = world.step(&InputState::idle());
        let frame = FrameSummary::capture(1, &world, &report);

        assert_eq!(frame.level, LevelId::Factory);
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.score, 800);
        assert_eq!(frame.hp, 100);
        assert!(frame.hud_line().contains("score 800"));
    }

    #[test]
    fn test_log_presenter_interval() {
        let mut presenter = LogPresenter::new(10);
        for frame in 1..=35 {
            presenter.present(&summary(frame, None));
        }
        assert_eq!(presenter.lines(), 3);
    }

    #[test]
    fn test_log_presenter_always_logs_signals() {
        let mut presenter = LogPresenter::new(0);
        presenter.present(&summary(7, None));
        presenter.present(&summary(8, Some(Signal::GameOver { score: 40 })));

        assert_eq!(presenter.lines(), 1);
        assert_eq!(presenter.signals(), &[Signal::GameOver { score: 40 }]);
    }

    #[test]
    fn test_handle_delivers_signal_frames() {
        let mut handle = PresenterHandle::spawn(LogPresenter::new(0), 1).expect("spawn");
        for frame in 1..=200 {
            handle.submit(summary(frame, None)).expect("submit");
        }
        let end = Some(Signal::Victory { score: 5000 });
        assert!(handle.submit(summary(201, end)).expect("submit"));

        let presenter = handle.finish().expect("join");
        assert_eq!(presenter.signals(), &[Signal::Victory { score: 5000 }]);
    }
}
