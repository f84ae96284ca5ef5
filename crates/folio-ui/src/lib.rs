//! Leptos 0.7 CSR frontend for the folio portfolio site
//!
//! Browser side of `folio-core`: capability reads through `web-sys`, timers
//! through `gloo-timers`, and the reactive hooks and components built on
//! them.
//!
//! ## Module Structure
//! - `app`: root component and context wiring
//! - `router`: routes
//! - `pages`: route components
//! - `components`: page sections, consent banner, particle canvas
//! - `hooks`: `use_responsive`, `use_container_query` and projections
//! - `analytics`: consent-gated `CustomEvent` dispatch
//! - `i18n`: language context
//! - `browser`, `events`, `timers`: web-sys plumbing
//! - `config`, `logging`, `error`: ambient concerns

#![forbid(unsafe_code)]

pub mod analytics;
pub mod app;
pub mod browser;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod hooks;
pub mod i18n;
pub mod logging;
pub mod pages;
pub mod router;
pub mod timers;

pub use app::App;
