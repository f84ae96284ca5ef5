//! Capability provider: every browser-global read goes through this trait.
//!
//! The browser implementation lives in `folio-ui`. `Headless` stands in for
//! pre-render and native contexts; `StaticCapabilities` is a deterministic stub.

use std::collections::BTreeMap;

/// Media query for reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Media query for hover-capable primary pointer.
pub const HOVER_QUERY: &str = "(hover: hover)";

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Read access to environment capabilities.
///
/// Implementations must never panic: an unavailable capability is reported as
/// `None` or `false`.
pub trait Capabilities {
    /// Current viewport size, `None` when there is no window.
    fn viewport(&self) -> Option<Viewport>;

    /// Device pixel ratio, `None` when unavailable or not a positive number.
    fn device_pixel_ratio(&self) -> Option<f64>;

    /// Reported maximum simultaneous touch points.
    fn max_touch_points(&self) -> u32;

    /// Whether touch-start events are supported.
    fn has_touch_events(&self) -> bool;

    /// Evaluate a media query, `None` when media queries are unavailable.
    fn media_matches(&self, query: &str) -> Option<bool>;

    /// Whether element box-size observation is available.
    fn supports_resize_observer(&self) -> bool;

    /// Value of a CSS custom property on the root element, trimmed.
    fn css_variable(&self, name: &str) -> Option<String>;

    /// Whether a document is available at all.
    fn has_dom(&self) -> bool {
        self.viewport().is_some()
    }
}

/// No browser environment present.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Capabilities for Headless {
    fn viewport(&self) -> Option<Viewport> {
        None
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        None
    }

    fn max_touch_points(&self) -> u32 {
        0
    }

    fn has_touch_events(&self) -> bool {
        false
    }

    fn media_matches(&self, _query: &str) -> Option<bool> {
        None
    }

    fn supports_resize_observer(&self) -> bool {
        false
    }

    fn css_variable(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Deterministic capability stub with fixed answers.
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilities {
    pub viewport: Option<Viewport>,
    pub pixel_ratio: Option<f64>,
    pub touch_points: u32,
    pub touch_events: bool,
    pub media: BTreeMap<String, bool>,
    pub resize_observer: bool,
    pub css_variables: BTreeMap<String, String>,
}

impl StaticCapabilities {
    /// A desktop browser of the given size with hover and `ResizeObserver`.
    #[must_use]
    pub fn desktop(width: f64, height: f64) -> Self {
        Self {
            viewport: Some(Viewport::new(width, height)),
            pixel_ratio: Some(1.0),
            resize_observer: true,
            ..Self::default()
        }
        .with_media(HOVER_QUERY, true)
    }

    /// A touch device of the given size without hover.
    #[must_use]
    pub fn touch(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            viewport: Some(Viewport::new(width, height)),
            pixel_ratio: Some(pixel_ratio),
            touch_points: 5,
            touch_events: true,
            resize_observer: true,
            ..Self::default()
        }
        .with_media(HOVER_QUERY, false)
    }

    #[must_use]
    pub fn with_media(mut self, query: &str, matches: bool) -> Self {
        self.media.insert(query.to_string(), matches);
        self
    }

    #[must_use]
    pub fn with_css_variable(mut self, name: &str, value: &str) -> Self {
        self.css_variables.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub const fn without_resize_observer(mut self) -> Self {
        self.resize_observer = false;
        self
    }
}

impl Capabilities for StaticCapabilities {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.pixel_ratio.filter(|r| r.is_finite() && *r > 0.0)
    }

    fn max_touch_points(&self) -> u32 {
        self.touch_points
    }

    fn has_touch_events(&self) -> bool {
        self.touch_events
    }

    fn media_matches(&self, query: &str) -> Option<bool> {
        self.viewport?;
        Some(self.media.get(query).copied().unwrap_or(false))
    }

    fn supports_resize_observer(&self) -> bool {
        self.resize_observer
    }

    fn css_variable(&self, name: &str) -> Option<String> {
        self.viewport?;
        self.css_variables
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
