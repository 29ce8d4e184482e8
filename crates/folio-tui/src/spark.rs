//! Click spark bursts
//!
//! Each left click spawns a short-lived burst of particles and rings around
//! the pointer. Geometry is in px-like units; `SparkCell` positions are already
//! scaled to terminal cells (one column ≈ 4 units, one row ≈ 8 units).

use std::f64::consts::PI;

use rand::Rng;
use tokio::time::{Duration, Instant};

/// How long a burst stays on screen
pub const SPARK_LIFETIME: Duration = Duration::from_millis(1000);

const CENTER_FLASH: Duration = Duration::from_millis(400);
const UNITS_PER_COLUMN: f64 = 4.0;
const UNITS_PER_ROW: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Particle {
    angle: f64,
    distance: f64,
    delay: Duration,
    duration: Duration,
    primary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Ring {
    from: f64,
    to: f64,
    delay: Duration,
    duration: Duration,
}

/// What a cell of the overlay shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparkKind {
    Center,
    Primary,
    Secondary,
    Ring,
}

/// A lit cell in absolute terminal coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparkCell {
    pub x: i32,
    pub y: i32,
    pub kind: SparkKind,
}

/// One click's worth of particles
#[derive(Debug, Clone)]
pub struct SparkBurst {
    origin: (u16, u16),
    spawned: Instant,
    particles: Vec<Particle>,
    rings: [Ring; 2],
}

impl SparkBurst {
    pub fn spawn<R: Rng>(x: u16, y: u16, now: Instant, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(20);

        for i in 0..8 {
            particles.push(Particle {
                angle: (i * 45) as f64 * PI / 180.0,
                distance: rng.random_range(40.0..60.0),
                delay: Duration::ZERO,
                duration: Duration::from_millis(rng.random_range(600..=800)),
                primary: true,
            });
        }
        for i in 0..12 {
            particles.push(Particle {
                angle: (i * 30) as f64 * PI / 180.0,
                distance: rng.random_range(20.0..35.0),
                delay: Duration::from_millis(rng.random_range(0..=100)),
                duration: Duration::from_millis(rng.random_range(400..=700)),
                primary: false,
            });
        }

        let rings = [
            Ring {
                from: 5.0,
                to: 40.0,
                delay: Duration::ZERO,
                duration: Duration::from_millis(600),
            },
            Ring {
                from: 2.5,
                to: 50.0,
                delay: Duration::from_millis(100),
                duration: Duration::from_millis(800),
            },
        ];

        Self {
            origin: (x, y),
            spawned: now,
            particles,
            rings,
        }
    }

    #[inline]
    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.spawned) >= SPARK_LIFETIME
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Cells lit at `now`
    pub fn cells(&self, now: Instant) -> Vec<SparkCell> {
        let age = now.saturating_duration_since(self.spawned);
        let mut cells = Vec::new();
        if age >= SPARK_LIFETIME {
            return cells;
        }

        if age < CENTER_FLASH {
            cells.push(self.cell_at(0.0, 0.0, SparkKind::Center));
        }

        for particle in &self.particles {
            let Some(t) = phase(age, particle.delay, particle.duration) else {
                continue;
            };
            let travelled = particle.distance * ease_out(t);
            let kind = if particle.primary {
                SparkKind::Primary
            } else {
                SparkKind::Secondary
            };
            cells.push(self.cell_at(
                particle.angle.cos() * travelled,
                particle.angle.sin() * travelled,
                kind,
            ));
        }

        for ring in &self.rings {
            let Some(t) = phase(age, ring.delay, ring.duration) else {
                continue;
            };
            let radius = ring.from + (ring.to - ring.from) * ease_out(t);
            // Fewer samples while the ring is small
            let samples = ((radius / 2.0) as usize).clamp(8, 32);
            for s in 0..samples {
                let angle = 2.0 * PI * s as f64 / samples as f64;
                cells.push(self.cell_at(angle.cos() * radius, angle.sin() * radius, SparkKind::Ring));
            }
        }

        cells.dedup();
        cells
    }

    fn cell_at(&self, dx: f64, dy: f64, kind: SparkKind) -> SparkCell {
        SparkCell {
            x: self.origin.0 as i32 + (dx / UNITS_PER_COLUMN).round() as i32,
            y: self.origin.1 as i32 + (dy / UNITS_PER_ROW).round() as i32,
            kind,
        }
    }
}

/// Normalized time inside `[delay, delay + duration)`, or None outside it
fn phase(age: Duration, delay: Duration, duration: Duration) -> Option<f64> {
    let local = age.checked_sub(delay)?;
    if local >= duration || duration.is_zero() {
        return None;
    }
    Some(local.as_secs_f64() / duration.as_secs_f64())
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(2)
}

/// All live bursts
#[derive(Debug, Default)]
pub struct SparkField {
    bursts: Vec<SparkBurst>,
}

impl SparkField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, x: u16, y: u16) {
        let burst = SparkBurst::spawn(x, y, Instant::now(), &mut rand::rng());
        self.bursts.push(burst);
    }

    /// Drop expired bursts, returning how many were removed
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.bursts.len();
        self.bursts.retain(|b| !b.is_expired(now));
        before - self.bursts.len()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.bursts.is_empty()
    }

    #[inline]
    pub fn bursts(&self) -> &[SparkBurst] {
        &self.bursts
    }

    pub fn clear(&mut self) {
        self.bursts.clear();
    }
}
