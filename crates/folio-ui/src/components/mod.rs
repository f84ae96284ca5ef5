//! Page building blocks.

pub mod consent;
pub mod header;
pub mod particles;
pub mod sections;

pub use consent::ConsentBanner;
pub use header::{Header, LanguageSwitch};
pub use particles::ParticleBackground;
pub use sections::{About, ContactStrip, Footer, Hero, Process, Services, WorkGrid};
