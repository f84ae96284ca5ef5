//! Frame-rate sampling and the one-way performance degradation latch.

use serde::{Deserialize, Serialize};

use crate::device::DeviceInfo;
use crate::error::Error;
use crate::result::Result;

use super::options::ParticleOptions;

/// When and how hard to degrade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformancePolicy {
    /// Length of the single measurement window.
    pub sample_window_ms: u32,
    /// Average frame rate below which the latch trips.
    pub min_fps: f64,
    /// Multiplier applied to the particle count once degraded.
    pub particle_factor: f64,
    /// Frame-rate cap once degraded.
    pub degraded_fps_cap: u32,
    /// Only sample on mobile devices.
    pub mobile_only: bool,
}

impl Default for PerformancePolicy {
    fn default() -> Self {
        Self {
            sample_window_ms: 3000,
            min_fps: 30.0,
            particle_factor: 0.7,
            degraded_fps_cap: 30,
            mobile_only: true,
        }
    }
}

impl PerformancePolicy {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an empty window, a non-positive
    /// frame-rate floor, a factor outside `(0, 1]` or a zero fps cap.
    pub fn validate(&self) -> Result<()> {
        if self.sample_window_ms == 0 {
            return Err(Error::invalid_config(
                "particles.performance.sample_window_ms",
                "must be greater than zero",
            ));
        }
        if !(self.min_fps.is_finite() && self.min_fps > 0.0) {
            return Err(Error::invalid_config(
                "particles.performance.min_fps",
                "must be a positive number",
            ));
        }
        if !(self.particle_factor > 0.0 && self.particle_factor <= 1.0) {
            return Err(Error::invalid_config(
                "particles.performance.particle_factor",
                "must be in (0, 1]",
            ));
        }
        if self.degraded_fps_cap == 0 {
            return Err(Error::invalid_config(
                "particles.performance.degraded_fps_cap",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Whether this device should be sampled at all.
    #[must_use]
    pub const fn applies_to(&self, device: &DeviceInfo) -> bool {
        !self.mobile_only || device.is_mobile
    }

    #[must_use]
    pub fn sampler(&self) -> FrameRateSampler {
        FrameRateSampler::new(f64::from(self.sample_window_ms))
    }

    /// True when the sample is below the floor.
    #[must_use]
    pub fn is_too_slow(&self, sample: &FrameRateSample) -> bool {
        sample.fps < self.min_fps
    }

    /// Shrink the count and clamp the frame-rate cap. Never raises either.
    #[must_use]
    pub fn degrade(&self, options: &ParticleOptions) -> ParticleOptions {
        let mut degraded = options.clone();
        degraded.particles.number = scale_count(options.particles.number, self.particle_factor);
        degraded.fps_limit = options.fps_limit.min(self.degraded_fps_cap);
        for rule in &mut degraded.responsive {
            rule.options.number = rule
                .options
                .number
                .map(|n| scale_count(n, self.particle_factor));
            rule.options.fps_limit = Some(
                rule.options
                    .fps_limit
                    .map_or(self.degraded_fps_cap, |cap| cap.min(self.degraded_fps_cap)),
            );
        }
        degraded
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scale_count(count: u32, factor: f64) -> u32 {
    let scaled = (f64::from(count) * factor.clamp(0.0, 1.0)).round();
    (scaled as u32).min(count)
}

/// Average frame rate over one finished window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRateSample {
    pub fps: f64,
    pub frames: u32,
    pub elapsed_ms: f64,
}

/// Counts frames over a single fixed window, then stops.
#[derive(Debug, Clone)]
pub struct FrameRateSampler {
    window_ms: f64,
    started_at: Option<f64>,
    frames: u32,
    finished: bool,
}

impl FrameRateSampler {
    #[must_use]
    pub const fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            started_at: None,
            frames: 0,
            finished: false,
        }
    }

    /// Record a frame at `timestamp_ms` (RAF time). Returns the sample exactly
    /// once, on the first frame at or past the end of the window.
    pub fn record_frame(&mut self, timestamp_ms: f64) -> Option<FrameRateSample> {
        if self.finished || !timestamp_ms.is_finite() {
            return None;
        }

        let Some(started_at) = self.started_at else {
            self.started_at = Some(timestamp_ms);
            return None;
        };

        self.frames = self.frames.saturating_add(1);
        let elapsed_ms = timestamp_ms - started_at;
        if elapsed_ms < self.window_ms {
            return None;
        }

        self.finished = true;
        Some(FrameRateSample {
            fps: if elapsed_ms > 0.0 {
                f64::from(self.frames) * 1000.0 / elapsed_ms
            } else {
                0.0
            },
            frames: self.frames,
            elapsed_ms,
        })
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Rendering mode for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceMode {
    #[default]
    Normal,
    Degraded,
}

/// `Normal -> Degraded`, no way back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DegradationLatch {
    mode: PerformanceMode,
}

impl DegradationLatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: PerformanceMode::Normal,
        }
    }

    /// Trip the latch. Returns true only on the transition.
    pub fn trip(&mut self) -> bool {
        let tripped = self.mode == PerformanceMode::Normal;
        self.mode = PerformanceMode::Degraded;
        tripped
    }

    #[must_use]
    pub const fn mode(&self) -> PerformanceMode {
        self.mode
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.mode == PerformanceMode::Degraded
    }

    /// Options for the current mode.
    #[must_use]
    pub fn apply(&self, policy: &PerformancePolicy, options: &ParticleOptions) -> ParticleOptions {
        match self.mode {
            PerformanceMode::Normal => options.clone(),
            PerformanceMode::Degraded => policy.degrade(options),
        }
    }

    /// Feed a finished sample; trips when it is below the policy floor.
    pub fn judge(&mut self, policy: &PerformancePolicy, sample: &FrameRateSample) -> bool {
        if policy.is_too_slow(sample) {
            let tripped = self.trip();
            if tripped {
                tracing::info!(fps = sample.fps, floor = policy.min_fps, "particle field degraded");
            }
            tripped
        } else {
            tracing::debug!(fps = sample.fps, "frame rate sample within budget");
            false
        }
    }
}
