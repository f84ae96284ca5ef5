//! Particle field for the canvas background.
//!
//! Positions are in CSS pixels. Randomness is injected so the field is
//! deterministic under test.

use std::f64::consts::TAU;

use super::options::{OutMode, ParticleOptions, SizeRange};

/// Frame length the speeds are tuned for.
const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Longer gaps (hidden tab, debugger) are treated as this long.
const MAX_STEP_MS: f64 = 100.0;

/// Strongest per-frame push away from the pointer.
const REPULSE_STRENGTH: f64 = 6.0;

/// Flattened view of [`ParticleOptions`] used by the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    pub number: u32,
    pub colors: Vec<String>,
    pub opacity: f64,
    pub size: SizeRange,
    pub move_enable: bool,
    pub speed: f64,
    pub out_mode: OutMode,
    pub links_enable: bool,
    pub link_distance: f64,
    pub link_opacity: f64,
    pub link_width: f64,
    pub link_color: String,
    pub repulse_enable: bool,
    pub repulse_distance: f64,
    pub push_enable: bool,
    pub push_quantity: u32,
}

impl FieldSettings {
    #[must_use]
    pub fn from_options(options: &ParticleOptions) -> Self {
        let particles = &options.particles;
        let interactivity = &options.interactivity;
        Self {
            number: particles.number,
            colors: particles.color.clone(),
            opacity: particles.opacity,
            size: particles.size,
            move_enable: particles.movement.enable,
            speed: particles.movement.speed,
            out_mode: particles.movement.out_mode,
            links_enable: particles.links.enable,
            link_distance: particles.links.distance,
            link_opacity: particles.links.opacity,
            link_width: particles.links.width,
            link_color: particles.links.color.clone(),
            repulse_enable: interactivity.on_hover.enable,
            repulse_distance: interactivity.repulse_distance,
            push_enable: interactivity.on_click.enable,
            push_quantity: interactivity.push_quantity,
        }
    }

    /// Upper bound on live particles, counting click pushes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.number.saturating_mul(2) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Unit direction, scaled by the configured speed each step.
    pub dx: f64,
    pub dy: f64,
    pub radius: f64,
    pub color_index: usize,
}

/// Segment between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    settings: FieldSettings,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(settings: FieldSettings, width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
        let mut field = Self {
            settings,
            width: sanitize(width),
            height: sanitize(height),
            particles: Vec::new(),
        };
        field.fill(rng);
        field
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub const fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    #[must_use]
    pub const fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Palette color for a particle.
    #[must_use]
    pub fn color(&self, particle: &Particle) -> Option<&str> {
        self.settings
            .colors
            .get(particle.color_index)
            .map(String::as_str)
    }

    /// Advance by `dt_ms`. Nothing moves while movement is disabled.
    pub fn step(&mut self, dt_ms: f64, pointer: Option<(f64, f64)>) {
        if !self.settings.move_enable {
            return;
        }

        let frames = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_STEP_MS) / REFERENCE_FRAME_MS
        } else {
            0.0
        };
        let velocity = self.settings.speed * frames;
        let repulse = pointer.filter(|_| self.settings.repulse_enable);
        let (width, height) = (self.width, self.height);

        for p in &mut self.particles {
            p.x += p.dx * velocity;
            p.y += p.dy * velocity;

            if let Some((px, py)) = repulse {
                repel(p, px, py, self.settings.repulse_distance, frames);
            }

            match self.settings.out_mode {
                OutMode::Bounce => bounce(p, width, height),
                OutMode::Out => wrap(p, width, height),
            }
        }
    }

    /// Segments between particles closer than the link distance, fading with distance.
    #[must_use]
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        if !self.settings.links_enable || self.settings.link_distance <= 0.0 {
            return links;
        }

        let max = self.settings.link_distance;
        let mut rest = self.particles.as_slice();
        while let Some((a, tail)) = rest.split_first() {
            for b in tail {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if distance < max {
                    links.push(Link {
                        x1: a.x,
                        y1: a.y,
                        x2: b.x,
                        y2: b.y,
                        alpha: self.settings.link_opacity * (1.0 - distance / max),
                    });
                }
            }
            rest = tail;
        }
        links
    }

    /// Click push: spawn particles at the pointer, dropping the oldest past capacity.
    pub fn push(&mut self, x: f64, y: f64, rng: &mut impl FnMut() -> f64) {
        if !self.settings.push_enable {
            return;
        }

        for _ in 0..self.settings.push_quantity {
            let mut particle = self.spawn(rng);
            particle.x = x.clamp(0.0, self.width);
            particle.y = y.clamp(0.0, self.height);
            self.particles.push(particle);
        }

        let excess = self.particles.len().saturating_sub(self.settings.capacity());
        self.particles.drain(..excess);
    }

    /// Swap in new settings, truncating or topping up to the new count.
    pub fn reconfigure(&mut self, settings: FieldSettings, rng: &mut impl FnMut() -> f64) {
        let target = settings.number as usize;
        self.settings = settings;
        self.particles.truncate(target);
        self.fill(rng);
        let palette = self.settings.colors.len();
        for p in &mut self.particles {
            if p.color_index >= palette {
                p.color_index = 0;
            }
        }
    }

    /// New canvas size; particles outside are pulled back in.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = sanitize(width);
        self.height = sanitize(height);
        for p in &mut self.particles {
            p.x = p.x.clamp(0.0, self.width);
            p.y = p.y.clamp(0.0, self.height);
        }
    }

    fn fill(&mut self, rng: &mut impl FnMut() -> f64) {
        let target = self.settings.number as usize;
        while self.particles.len() < target {
            let particle = self.spawn(rng);
            self.particles.push(particle);
        }
    }

    fn spawn(&self, rng: &mut impl FnMut() -> f64) -> Particle {
        let angle = unit(rng()) * TAU;
        let jitter = 0.5 + unit(rng()) * 0.5;
        let SizeRange { min, max } = self.settings.size;
        Particle {
            x: unit(rng()) * self.width,
            y: unit(rng()) * self.height,
            dx: angle.cos() * jitter,
            dy: angle.sin() * jitter,
            radius: min + unit(rng()) * (max - min).max(0.0),
            color_index: pick(unit(rng()), self.settings.colors.len()),
        }
    }
}

fn sanitize(extent: f64) -> f64 {
    if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}

fn unit(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn pick(value: f64, len: usize) -> usize {
    ((value * len as f64) as usize).min(len.saturating_sub(1))
}

fn repel(p: &mut Particle, px: f64, py: f64, radius: f64, frames: f64) {
    let (ox, oy) = (p.x - px, p.y - py);
    let distance = ox.hypot(oy);
    if radius <= 0.0 || distance >= radius || distance <= f64::EPSILON {
        return;
    }
    let force = (1.0 - distance / radius) * REPULSE_STRENGTH * frames;
    p.x += ox / distance * force;
    p.y += oy / distance * force;
}

fn bounce(p: &mut Particle, width: f64, height: f64) {
    let r = p.radius.min(width / 2.0).min(height / 2.0).max(0.0);
    if p.x < r {
        p.x = r;
        p.dx = p.dx.abs();
    } else if p.x > width - r {
        p.x = width - r;
        p.dx = -p.dx.abs();
    }
    if p.y < r {
        p.y = r;
        p.dy = p.dy.abs();
    } else if p.y > height - r {
        p.y = height - r;
        p.dy = -p.dy.abs();
    }
}

fn wrap(p: &mut Particle, width: f64, height: f64) {
    let r = p.radius;
    if p.x < -r {
        p.x = width + r;
    } else if p.x > width + r {
        p.x = -r;
    }
    if p.y < -r {
        p.y = height + r;
    } else if p.y > height + r {
        p.y = -r;
    }
}
