//! Device capability classification from viewport size and input features.

use serde::{Deserialize, Serialize};

use crate::breakpoint::Breakpoint;
use crate::capabilities::{Capabilities, HOVER_QUERY};

/// Viewport orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Portrait iff height exceeds width; a square viewport is landscape.
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Self {
        if height > width {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// Input and form-factor facts about the current device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
    pub has_touch: bool,
    pub orientation: Orientation,
    pub pixel_ratio: f64,
    pub supports_hover: bool,
}

/// Raw inputs for device classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceInputs {
    pub width: f64,
    pub height: f64,
    pub touch_points: u32,
    pub has_touch_events: bool,
    pub hover_matches: bool,
    pub pixel_ratio: f64,
}

impl DeviceInfo {
    /// Classify from raw inputs.
    ///
    /// Width bands: mobile below 768, tablet 768 to 1023, desktop from 1024.
    #[must_use]
    pub fn classify(inputs: DeviceInputs) -> Self {
        let DeviceInputs {
            width,
            height,
            touch_points,
            has_touch_events,
            hover_matches,
            pixel_ratio,
        } = inputs;

        let is_mobile = !Breakpoint::Md.is_at_least(width);
        let is_desktop = Breakpoint::Lg.is_at_least(width);

        Self {
            is_mobile,
            is_tablet: !is_mobile && !is_desktop,
            is_desktop,
            has_touch: touch_points > 0 || has_touch_events,
            orientation: Orientation::from_size(width, height),
            pixel_ratio: if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
                pixel_ratio
            } else {
                1.0
            },
            supports_hover: hover_matches,
        }
    }

    /// Size-only classification: no touch, hover assumed, ratio 1.
    #[must_use]
    pub fn from_viewport(width: f64, height: f64) -> Self {
        Self::classify(DeviceInputs {
            width,
            height,
            touch_points: 0,
            has_touch_events: false,
            hover_matches: true,
            pixel_ratio: 1.0,
        })
    }

    /// Read every input through the capability provider.
    ///
    /// Without a window the neutral desktop default is returned.
    #[must_use]
    pub fn detect(caps: &dyn Capabilities) -> Self {
        let Some(viewport) = caps.viewport() else {
            return Self::server_default();
        };

        Self::classify(DeviceInputs {
            width: viewport.width,
            height: viewport.height,
            touch_points: caps.max_touch_points(),
            has_touch_events: caps.has_touch_events(),
            hover_matches: caps.media_matches(HOVER_QUERY).unwrap_or(true),
            pixel_ratio: caps.device_pixel_ratio().unwrap_or(1.0),
        })
    }

    /// Neutral value for environments without a browser.
    #[must_use]
    pub const fn server_default() -> Self {
        Self {
            is_mobile: false,
            is_tablet: false,
            is_desktop: true,
            has_touch: false,
            orientation: Orientation::Landscape,
            pixel_ratio: 1.0,
            supports_hover: true,
        }
    }
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self::server_default()
    }
}
