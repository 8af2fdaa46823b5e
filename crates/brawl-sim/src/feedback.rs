//! Transient visual feedback: particles, floating text and screen shake.
//!
//! None of this affects gameplay. It lives in the world so that renderers
//! can sample it and so snapshots reproduce it exactly.

use brawl_common::{EntityId, IdAllocator};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_PARTICLES, PARTICLE_GRAVITY, SPARK_DRAG, TEXT_LIFETIME};
use crate::rng::SimRng;
use crate::store::Store;

// ============================================================================
// Colors
// ============================================================================

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 0xff,
        }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Named colors used by the simulation.
pub mod palette {
    use super::Color;

    /// Punch numbers, gold rings.
    pub const GOLD: Color = Color::hex(0xf1c40f);
    /// Buff numbers, heals.
    pub const GREEN: Color = Color::hex(0x2ecc71);
    /// Damage to the player.
    pub const RED: Color = Color::hex(0xff4444);
    /// Heavy damage to the player.
    pub const DEEP_RED: Color = Color::hex(0xff2222);
    /// Street grunt death.
    pub const ORANGE: Color = Color::hex(0xf39c12);
    /// Shout boss.
    pub const BLUE: Color = Color::hex(0x3498db);
    /// Penalty items.
    pub const PURPLE: Color = Color::hex(0x9b59b6);
    /// Charge boss.
    pub const FURY: Color = Color::hex(0xff4500);
    /// Enrage burst.
    pub const ENRAGED: Color = Color::hex(0x4488ff);
    /// Landing dust.
    pub const DIRT: Color = Color::hex(0x8b7355);
    /// Crumbs while eating.
    pub const CRUMB: Color = Color::hex(0xd4a017);
    /// Guard death.
    pub const STEEL: Color = Color::hex(0x2980b9);
    /// Scientist death.
    pub const FOREST: Color = Color::hex(0x27ae60);
    /// Ring bursts from shouts.
    pub const SHOUT_RING: Color = Color::hex(0x3498db).with_alpha(153);
}

// ============================================================================
// Particles
// ============================================================================

/// Render style of a particle; also selects its physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleStyle {
    /// Ground puff, falls.
    Dust,
    /// Impact chunk, falls.
    Hit,
    /// Bright spark, slowed by drag.
    Spark,
    /// Expanding ring, drifts at constant speed.
    Ring,
}

impl ParticleStyle {
    /// Whether this style falls under pseudo-gravity.
    #[must_use]
    pub const fn falls(self) -> bool {
        matches!(self, Self::Dust | Self::Hit)
    }

    /// Whether this style is slowed by drag.
    #[must_use]
    pub const fn drags(self) -> bool {
        matches!(self, Self::Spark)
    }
}

/// A single particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Screen-space position (elevation already folded into y)
    pub pos: Vec2,
    /// Velocity per tick
    pub vel: Vec2,
    /// Remaining life in ticks
    pub life: u32,
    /// Life at spawn
    pub max_life: u32,
    /// Color
    pub color: Color,
    /// Size in pixels
    pub size: f32,
    /// Style
    pub style: ParticleStyle,
}

impl Particle {
    /// Fraction of life left, in `(0, 1]` while alive.
    #[must_use]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    fn update(&mut self) {
        self.pos += self.vel;
        if self.style.falls() {
            self.vel.y += PARTICLE_GRAVITY;
        } else if self.style.drags() {
            self.vel *= SPARK_DRAG;
        }
        self.life = self.life.saturating_sub(1);
    }
}

/// Parameters of a particle burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    /// Particles to spawn
    pub count: usize,
    /// Style of every particle
    pub style: ParticleStyle,
    /// Color of every particle
    pub color: Color,
    /// Horizontal velocity range, and scale of the upward range
    pub spread: f32,
    /// Life of every particle in ticks
    pub life: u32,
    /// Nominal size
    pub size: f32,
}

impl Burst {
    /// Creates a burst description.
    #[must_use]
    pub const fn new(count: usize, style: ParticleStyle, color: Color) -> Self {
        Self {
            count,
            style,
            color,
            spread: 3.0,
            life: 20,
            size: 4.0,
        }
    }

    /// Sets the velocity spread.
    #[must_use]
    pub const fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    /// Sets the particle life.
    #[must_use]
    pub const fn with_life(mut self, life: u32) -> Self {
        self.life = life;
        self
    }

    /// Sets the nominal size.
    #[must_use]
    pub const fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

// ============================================================================
// Floating text
// ============================================================================

/// Cosmetic text that floats above the action and expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    /// Where the text was spawned
    pub pos: Vec2,
    /// The literal text
    pub text: String,
    /// Color
    pub color: Color,
    /// Font size
    pub size: f32,
    /// Tick the text was spawned on
    pub spawn_tick: u64,
}

impl FloatingText {
    /// Whether the text has lived [`TEXT_LIFETIME`] ticks at `tick`.
    #[must_use]
    pub fn expired(&self, tick: u64) -> bool {
        tick.saturating_sub(self.spawn_tick) >= TEXT_LIFETIME
    }
}

// ============================================================================
// Feedback state
// ============================================================================

/// All transient feedback entities of one world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    particles: Store<Particle>,
    texts: Store<FloatingText>,
    shake: u32,
    tick: u64,
    ids: IdAllocator,
    rng: SimRng,
}

impl Feedback {
    /// Creates empty feedback state drawing from `rng`.
    #[must_use]
    pub fn new(rng: SimRng) -> Self {
        Self {
            particles: Store::new(),
            texts: Store::new(),
            shake: 0,
            tick: 0,
            ids: IdAllocator::new(),
            rng,
        }
    }

    /// Spawns a burst centred on `at`. Particles beyond the pool capacity
    /// are dropped.
    pub fn burst(&mut self, at: Vec2, burst: Burst) {
        for _ in 0..burst.count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let vel = Vec2::new(
                self.rng.spread(burst.spread),
                self.rng.range(-burst.spread * 0.8, -0.5),
            );
            let size = self.rng.range(burst.size * 0.5, burst.size * 1.2);
            let id = self.ids.next_id();
            self.particles.insert(
                id,
                Particle {
                    pos: at,
                    vel,
                    life: burst.life,
                    max_life: burst.life,
                    color: burst.color,
                    size,
                    style: burst.style,
                },
            );
        }
    }

    /// Queues a floating text stamped with the current tick.
    pub fn text(&mut self, at: Vec2, text: impl Into<String>, color: Color, size: f32) -> EntityId {
        let id = self.ids.next_id();
        self.texts.insert(
            id,
            FloatingText {
                pos: at,
                text: text.into(),
                color,
                size,
                spawn_tick: self.tick,
            },
        );
        id
    }

    /// Raises the screen shake to at least `magnitude`.
    pub fn shake(&mut self, magnitude: u32) {
        self.shake = self.shake.max(magnitude);
    }

    /// Lowers the screen shake by one step.
    pub fn decay_shake(&mut self) {
        self.shake = self.shake.saturating_sub(1);
    }

    /// Current screen shake magnitude.
    #[must_use]
    pub const fn shake_magnitude(&self) -> u32 {
        self.shake
    }

    /// Sets the tick new texts are stamped with.
    pub fn begin_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    /// Moves particles, ages everything and drops what expired.
    pub fn update(&mut self) {
        for slot in self.particles.live_mut() {
            slot.value.update();
            if slot.value.life == 0 {
                slot.kill();
            }
        }
        let tick = self.tick;
        for slot in self.texts.live_mut() {
            if slot.value.expired(tick) {
                slot.kill();
            }
        }
        self.particles.compact();
        self.texts.compact();
    }

    /// Live particles.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().map(|(_, p)| p)
    }

    /// Live floating texts.
    pub fn texts(&self) -> impl Iterator<Item = &FloatingText> {
        self.texts.iter().map(|(_, t)| t)
    }

    /// Number of live particles.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Whether a live text with exactly this content exists.
    #[must_use]
    pub fn has_text(&self, text: &str) -> bool {
        self.texts().any(|t| t.text == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback() -> Feedback {
        Feedback::new(SimRng::with_seed(1))
    }

    #[test]
    fn test_hex_color() {
        let c = Color::hex(0xf1c40f);
        assert_eq!((c.r, c.g, c.b, c.a), (0xf1, 0xc4, 0x0f, 0xff));
        assert_eq!(palette::SHOUT_RING.a, 153);
    }

    #[test]
    fn test_particle_cap() {
        let mut fx = feedback();
        fx.burst(Vec2::ZERO, Burst::new(50, ParticleStyle::Hit, palette::RED));
        fx.burst(Vec2::ZERO, Burst::new(50, ParticleStyle::Hit, palette::RED));
        assert_eq!(fx.particle_count(), MAX_PARTICLES);
    }

    #[test]
    fn test_burst_velocity_ranges() {
        let mut fx = feedback();
        let burst = Burst::new(40, ParticleStyle::Spark, palette::GOLD)
            .with_spread(5.0)
            .with_size(6.0);
        fx.burst(Vec2::ZERO, burst);
        for p in fx.particles() {
            assert!(p.vel.x >= -5.0 && p.vel.x < 5.0);
            assert!(p.vel.y >= -4.0 && p.vel.y < -0.5);
            assert!(p.size >= 3.0 && p.size < 7.2);
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut fx = feedback();
        fx.burst(
            Vec2::ZERO,
            Burst::new(5, ParticleStyle::Dust, palette::DIRT).with_life(3),
        );
        for _ in 0..2 {
            fx.update();
        }
        assert_eq!(fx.particle_count(), 5);
        fx.update();
        assert_eq!(fx.particle_count(), 0);
    }

    #[test]
    fn test_dust_falls_spark_drags_ring_drifts() {
        let mut dust = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, -1.0),
            life: 10,
            max_life: 10,
            color: palette::DIRT,
            size: 3.0,
            style: ParticleStyle::Dust,
        };
        let mut spark = Particle {
            style: ParticleStyle::Spark,
            ..dust.clone()
        };
        let mut ring = Particle {
            style: ParticleStyle::Ring,
            vel: Vec2::new(4.0, -2.0),
            ..dust.clone()
        };
        dust.update();
        spark.update();
        ring.update();

        assert_eq!(ring.vel, Vec2::new(4.0, -2.0));
        assert_eq!(ring.pos, Vec2::new(4.0, -2.0));
        assert_eq!(dust.vel.x, 2.0);
        assert!((dust.vel.y - (-1.0 + PARTICLE_GRAVITY)).abs() < 1e-6);
        assert!((spark.vel.x - 2.0 * SPARK_DRAG).abs() < 1e-6);
        assert_eq!(dust.pos, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_text_lifetime() {
        let mut fx = feedback();
        fx.begin_tick(10);
        fx.text(Vec2::ZERO, "-1", palette::GOLD, 14.0);
        fx.begin_tick(9 + TEXT_LIFETIME);
        fx.update();
        assert!(fx.has_text("-1"));
        fx.begin_tick(10 + TEXT_LIFETIME);
        fx.update();
        assert!(!fx.has_text("-1"));
    }

    #[test]
    fn test_shake_never_lowered() {
        let mut fx = feedback();
        fx.shake(12);
        fx.shake(8);
        assert_eq!(fx.shake_magnitude(), 12);
        fx.decay_shake();
        assert_eq!(fx.shake_magnitude(), 11);

        let mut idle = feedback();
        idle.decay_shake();
        assert_eq!(idle.shake_magnitude(), 0);
    }
}
