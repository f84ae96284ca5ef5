//! Particle canvas: animation loop, HiDPI sizing and the background component.

pub mod background;
pub mod dpi;
pub mod raf;

pub use background::{ParticleBackground, ParticleManager};
