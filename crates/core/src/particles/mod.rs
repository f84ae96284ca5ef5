//! Particle background: layered configuration, runtime degradation and the
//! canvas field model.

pub mod field;
pub mod manager;
pub mod options;
pub mod performance;

pub use field::{FieldSettings, Link, Particle, ParticleField};
pub use manager::{ParticleTheme, ParticlesConfigurationManager};
pub use options::{DeviceTier, ParticleOptions, ParticleOverride, ResponsiveRule};
pub use performance::{
    DegradationLatch, FrameRateSample, FrameRateSampler, PerformanceMode, PerformancePolicy,
};
