//! Container query model: element-scoped size buckets and the observation state machine.
//!
//! The browser plumbing (ResizeObserver, fallbacks) lives in `folio-ui`; this
//! module holds everything that can be computed without a DOM.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, FallbackAction};
use crate::result::Result;

/// Named width range for custom container queries. Bounds are `min <= width < max`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WidthRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl WidthRange {
    #[must_use]
    pub fn contains(&self, width: f64) -> bool {
        self.min.is_none_or(|min| width >= min) && self.max.is_none_or(|max| width < max)
    }
}

/// Size thresholds for container classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerQueries {
    /// Smallest width counted as medium.
    pub medium_min: f64,
    /// Smallest width counted as large.
    pub large_min: f64,
    /// Extra named ranges evaluated with [`ContainerDimensions::matches`].
    pub custom: BTreeMap<String, WidthRange>,
}

impl Default for ContainerQueries {
    fn default() -> Self {
        Self {
            medium_min: 400.0,
            large_min: 800.0,
            custom: BTreeMap::new(),
        }
    }
}

impl ContainerQueries {
    /// Add a named range.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, range: WidthRange) -> Self {
        self.custom.insert(name.into(), range);
        self
    }

    /// Thresholds must be finite, non-negative and strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the offending threshold.
    pub fn validate(&self) -> Result<()> {
        if !self.medium_min.is_finite() || self.medium_min < 0.0 {
            return Err(Error::invalid_config(
                "container.queries.medium_min",
                format!("must be a non-negative number, got {}", self.medium_min),
            ));
        }
        if !self.large_min.is_finite() || self.large_min <= self.medium_min {
            return Err(Error::invalid_config(
                "container.queries.large_min",
                format!(
                    "must exceed medium_min ({}), got {}",
                    self.medium_min, self.large_min
                ),
            ));
        }
        Ok(())
    }
}

/// Container size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerSize {
    Small,
    Medium,
    Large,
}

impl ContainerSize {
    #[must_use]
    pub fn classify(width: f64, queries: &ContainerQueries) -> Self {
        if width >= queries.large_min {
            Self::Large
        } else if width >= queries.medium_min {
            Self::Medium
        } else {
            Self::Small
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Measured container box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDimensions {
    pub width: f64,
    pub height: f64,
    pub is_small: bool,
    pub is_medium: bool,
    pub is_large: bool,
    pub aspect_ratio: f64,
    #[serde(skip)]
    matched: Vec<String>,
}

impl Default for ContainerDimensions {
    fn default() -> Self {
        Self::measure(0.0, 0.0, &ContainerQueries::default())
    }
}

impl ContainerDimensions {
    /// Classify a measured box against the queries.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_core::container::{ContainerDimensions, ContainerQueries};
    ///
    /// let dims = ContainerDimensions::measure(1600.0, 900.0, &ContainerQueries::default());
    /// assert!(dims.is_large);
    /// assert!((dims.aspect_ratio - 1.78).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn measure(width: f64, height: f64, queries: &ContainerQueries) -> Self {
        let width = sanitize(width);
        let height = sanitize(height);
        let size = ContainerSize::classify(width, queries);
        let matched = queries
            .custom
            .iter()
            .filter(|(_, range)| range.contains(width))
            .map(|(name, _)| name.clone())
            .collect();

        Self {
            width,
            height,
            is_small: size == ContainerSize::Small,
            is_medium: size == ContainerSize::Medium,
            is_large: size == ContainerSize::Large,
            aspect_ratio: aspect_ratio(width, height),
            matched,
        }
    }

    #[must_use]
    pub const fn size(&self) -> ContainerSize {
        if self.is_large {
            ContainerSize::Large
        } else if self.is_medium {
            ContainerSize::Medium
        } else {
            ContainerSize::Small
        }
    }

    /// Whether the named custom query matched at measurement time.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.matched.iter().any(|m| m == name)
    }

    #[must_use]
    pub fn is_square(&self) -> bool {
        self.height > 0.0 && (self.aspect_ratio - 1.0).abs() < f64::EPSILON
    }

    #[must_use]
    pub fn is_portrait(&self) -> bool {
        self.height > 0.0 && self.aspect_ratio < 1.0
    }

    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.height > 0.0 && self.aspect_ratio > 1.0
    }
}

/// `round(width / height, 2)`, or 0 when height is 0.
#[must_use]
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    (width / height * 100.0).round() / 100.0
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Substitute used when box-size observation is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStrategy {
    /// Report viewport dimensions, updated on window resize.
    #[default]
    Viewport,
    /// Read the element bounding box on window resize.
    ManualPoll,
}

impl FallbackStrategy {
    #[must_use]
    pub const fn action(self) -> FallbackAction {
        match self {
            Self::Viewport => FallbackAction::UseViewport,
            Self::ManualPoll => FallbackAction::PollBoundingBox,
        }
    }
}

/// Options for a container query hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerQueryOptions {
    pub fallback: FallbackStrategy,
    pub debounce_ms: u32,
    pub queries: ContainerQueries,
}

impl Default for ContainerQueryOptions {
    fn default() -> Self {
        Self {
            fallback: FallbackStrategy::default(),
            debounce_ms: 100,
            queries: ContainerQueries::default(),
        }
    }
}

/// Observation lifecycle of one container hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContainerPhase {
    /// No element attached.
    #[default]
    Idle,
    /// Element attached, observer active.
    Observing,
    /// Observer unavailable or failed.
    Error,
    /// A substitute measurement is active.
    Fallback,
}

/// Inputs to the container state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEvent {
    /// An element was attached; `supported` tells whether observation is possible.
    Attached { supported: bool },
    /// The observer could not be created or threw.
    ObserverFailed,
    /// The fallback measurement started.
    FallbackStarted,
    /// The element or owner went away.
    Detached,
}

impl ContainerPhase {
    /// Apply an event. Events that make no sense in the current phase leave it unchanged.
    #[must_use]
    pub const fn transition(self, event: ContainerEvent) -> Self {
        match (self, event) {
            (_, ContainerEvent::Detached) => Self::Idle,
            (Self::Idle | Self::Fallback, ContainerEvent::Attached { supported: true }) => {
                Self::Observing
            }
            (Self::Idle, ContainerEvent::Attached { supported: false })
            | (Self::Observing, ContainerEvent::ObserverFailed) => Self::Error,
            (Self::Error | Self::Idle, ContainerEvent::FallbackStarted) => Self::Fallback,
            (phase, _) => phase,
        }
    }

    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::Error | Self::Fallback)
    }
}
