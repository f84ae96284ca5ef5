//! Viewport-level responsive state and settled-change tracking.

use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsEvent;
use crate::breakpoint::Breakpoint;
use crate::capabilities::Capabilities;
use crate::device::{DeviceInfo, Orientation};

/// Viewport size reported when no window exists.
pub const SERVER_VIEWPORT: (f64, f64) = (1024.0, 768.0);

/// Options for the responsive hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveOptions {
    /// Resize debounce window.
    pub debounce_ms: u32,
    /// Read touch, hover and pixel ratio; otherwise size-only device info.
    pub enable_device_detection: bool,
    /// Delay before re-measuring after an orientation change.
    pub orientation_settle_ms: u32,
}

impl Default for ResponsiveOptions {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            enable_device_detection: true,
            orientation_settle_ms: 100,
        }
    }
}

/// Whether a hook instance has read the real viewport yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hydration {
    #[default]
    Uninitialized,
    Hydrated,
}

/// One snapshot of viewport size, breakpoint and device facts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveState {
    pub current_breakpoint: Breakpoint,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub device_info: DeviceInfo,
}

impl Default for ResponsiveState {
    fn default() -> Self {
        Self::server_default()
    }
}

impl ResponsiveState {
    /// Neutral state: `lg`, desktop, 1024x768.
    #[must_use]
    pub const fn server_default() -> Self {
        Self {
            current_breakpoint: Breakpoint::Lg,
            viewport_width: SERVER_VIEWPORT.0,
            viewport_height: SERVER_VIEWPORT.1,
            device_info: DeviceInfo::server_default(),
        }
    }

    /// State for a known viewport size.
    #[must_use]
    pub fn from_size(width: f64, height: f64, device_info: DeviceInfo) -> Self {
        Self {
            current_breakpoint: Breakpoint::classify(width),
            viewport_width: width,
            viewport_height: height,
            device_info,
        }
    }

    /// Measure through the capability provider; never touches globals directly.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_core::breakpoint::Breakpoint;
    /// use folio_core::capabilities::Headless;
    /// use folio_core::responsive::ResponsiveState;
    ///
    /// let state = ResponsiveState::measure(&Headless, true);
    /// assert_eq!(state.current_breakpoint, Breakpoint::Lg);
    /// assert!(state.device_info.is_desktop);
    /// ```
    #[must_use]
    pub fn measure(caps: &dyn Capabilities, detect_device: bool) -> Self {
        let Some(viewport) = caps.viewport() else {
            return Self::server_default();
        };

        let device_info = if detect_device {
            DeviceInfo::detect(caps)
        } else {
            DeviceInfo::from_viewport(viewport.width, viewport.height)
        };
        Self::from_size(viewport.width, viewport.height, device_info)
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.device_info.orientation
    }

    #[must_use]
    pub fn is_within_breakpoint(&self, bp: Breakpoint) -> bool {
        self.current_breakpoint == bp
    }

    #[must_use]
    pub fn is_at_least_breakpoint(&self, bp: Breakpoint) -> bool {
        bp.is_at_least(self.viewport_width)
    }

    #[must_use]
    pub fn is_at_most_breakpoint(&self, bp: Breakpoint) -> bool {
        bp.is_at_most(self.viewport_width)
    }
}

/// Emits analytics only when a settled measurement changes breakpoint or orientation.
///
/// The first observation establishes the baseline and emits nothing; repeated
/// identical observations emit nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsiveTracker {
    last: Option<(Breakpoint, Orientation)>,
}

impl ResponsiveTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Record a settled state, returning the events its change warrants.
    pub fn observe(&mut self, state: &ResponsiveState) -> Vec<AnalyticsEvent> {
        let current = (state.current_breakpoint, state.orientation());
        let Some((prev_bp, prev_orientation)) = self.last.replace(current) else {
            return Vec::new();
        };

        let mut events = Vec::new();
        if prev_bp != current.0 {
            events.push(AnalyticsEvent::BreakpointChanged {
                from: prev_bp,
                to: current.0,
                viewport_width: state.viewport_width,
            });
        }
        if prev_orientation != current.1 {
            events.push(AnalyticsEvent::OrientationChanged {
                from: prev_orientation,
                to: current.1,
            });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{Headless, StaticCapabilities};

    #[test]
    fn test_server_default_is_neutral() {
        let state = ResponsiveState::measure(&Headless, true);
        assert_eq!(state, ResponsiveState::server_default());
        assert_eq!(state.current_breakpoint, Breakpoint::Lg);
        assert!(state.device_info.is_desktop);
        // Consistent with itself: 1024 classifies as lg.
        assert_eq!(Breakpoint::classify(state.viewport_width), Breakpoint::Lg);
    }

    #[test]
    fn test_measure_phone() {
        let caps = StaticCapabilities::touch(375.0, 667.0, 2.0);
        let state = ResponsiveState::measure(&caps, true);
        assert_eq!(state.current_breakpoint, Breakpoint::Xs);
        assert!(state.device_info.is_mobile);
        assert!(state.device_info.has_touch);
        assert_eq!(state.orientation(), Orientation::Portrait);
    }

    #[test]
    fn test_measure_without_device_detection() {
        let caps = StaticCapabilities::touch(375.0, 667.0, 2.0);
        let state = ResponsiveState::measure(&caps, false);
        assert!(!state.device_info.has_touch);
        assert!(state.device_info.supports_hover);
        assert!((state.device_info.pixel_ratio - 1.0).abs() < f64::EPSILON);
        assert!(state.device_info.is_mobile);
    }

    #[test]
    fn test_breakpoint_queries() {
        let state = ResponsiveState::from_size(800.0, 600.0, DeviceInfo::from_viewport(800.0, 600.0));
        assert!(state.is_within_breakpoint(Breakpoint::Md));
        assert!(state.is_at_least_breakpoint(Breakpoint::Md));
        assert!(!state.is_at_least_breakpoint(Breakpoint::Lg));
        assert!(state.is_at_most_breakpoint(Breakpoint::Md));
        assert!(!state.is_at_most_breakpoint(Breakpoint::Sm));
    }

    #[test]
    fn test_tracker_baseline_emits_nothing() {
        let mut tracker = ResponsiveTracker::new();
        let state = ResponsiveState::from_size(1440.0, 900.0, DeviceInfo::from_viewport(1440.0, 900.0));
        assert!(tracker.observe(&state).is_empty());
        assert!(tracker.observe(&state).is_empty());
    }

    #[test]
    fn test_tracker_emits_once_per_settled_change() {
        let mut tracker = ResponsiveTracker::new();
        let wide = ResponsiveState::from_size(1440.0, 900.0, DeviceInfo::from_viewport(1440.0, 900.0));
        let wider = ResponsiveState::from_size(1450.0, 900.0, DeviceInfo::from_viewport(1450.0, 900.0));
        let narrow = ResponsiveState::from_size(700.0, 900.0, DeviceInfo::from_viewport(700.0, 900.0));

        let _ = tracker.observe(&wide);
        assert!(tracker.observe(&wider).is_empty(), "same breakpoint, no event");

        let events = tracker.observe(&narrow);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events.first(),
            Some(AnalyticsEvent::BreakpointChanged {
                from: Breakpoint::Xl,
                to: Breakpoint::Sm,
                ..
            })
        ));
        assert!(matches!(
            events.get(1),
            Some(AnalyticsEvent::OrientationChanged {
                from: Orientation::Landscape,
                to: Orientation::Portrait,
            })
        ));

        assert!(tracker.observe(&narrow).is_empty());
    }
}
