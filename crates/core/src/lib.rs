//! # Folio Core
//!
//! Responsive state, container queries and particle configuration for the
//! folio portfolio site. Nothing here touches the DOM: browser reads go
//! through [`capabilities::Capabilities`] and timers through
//! [`debounce::Scheduler`], so the whole crate runs and tests natively.
//!
//! ## Laws
//!
//! - No `unwrap()` / `expect()` / `panic!()` outside tests
//! - No `unsafe`
//! - Every detected error carries its fallback and is returned, never swallowed

#![forbid(unsafe_code)]

pub mod analytics;
pub mod breakpoint;
pub mod capabilities;
pub mod config;
pub mod container;
pub mod debounce;
pub mod device;
pub mod error;
pub mod i18n;
pub mod particles;
pub mod responsive;
mod result;

pub use analytics::{AnalyticsEvent, AnalyticsSink, Consent, ConsentGate, ConsentStore};
pub use breakpoint::Breakpoint;
pub use capabilities::{Capabilities, Headless, StaticCapabilities, Viewport};
pub use config::SiteConfig;
pub use container::{
    ContainerDimensions, ContainerEvent, ContainerPhase, ContainerQueries, ContainerQueryOptions,
    ContainerSize, FallbackStrategy, WidthRange,
};
pub use debounce::{DebounceCancel, Debounced, ManualScheduler, Scheduler, TimerHandle, debounce};
pub use device::{DeviceInfo, Orientation};
pub use error::{Error, FallbackAction, ResponsiveError, ResponsiveErrorKind};
pub use i18n::{Language, TextKey, translate};
pub use responsive::{Hydration, ResponsiveOptions, ResponsiveState, ResponsiveTracker};
pub use result::{Result, ResultExt};
