//! Error types for the responsive and particle subsystems.
//!
//! Every detected problem is paired with a fallback action. Errors are returned
//! to the caller so degraded-mode behavior stays observable; nothing here panics.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a responsive-layer problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponsiveErrorKind {
    /// A required browser capability is missing. Always has a fallback path.
    UnsupportedFeature,
    /// A caller supplied a breakpoint key that does not exist.
    InvalidBreakpoint,
    /// A container hook ran before its ref was attached to a live element.
    ContainerNotFound,
}

impl fmt::Display for ResponsiveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UnsupportedFeature => "UNSUPPORTED_FEATURE",
            Self::InvalidBreakpoint => "INVALID_BREAKPOINT",
            Self::ContainerNotFound => "CONTAINER_NOT_FOUND",
        };
        f.write_str(label)
    }
}

/// What the caller did (or should do) instead of the failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackAction {
    /// Substitute viewport dimensions for the element's box.
    UseViewport,
    /// Poll the element's bounding box on window resize.
    PollBoundingBox,
    /// Treat the value as the smallest breakpoint.
    UseSmallestBreakpoint,
    /// Render nothing (decorative content only).
    RenderNothing,
}

/// A responsive-layer error together with its fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ResponsiveError {
    pub kind: ResponsiveErrorKind,
    pub message: String,
    pub fallback: Option<FallbackAction>,
}

impl ResponsiveError {
    /// A browser capability is unavailable.
    pub fn unsupported_feature(feature: &str, fallback: FallbackAction) -> Self {
        Self {
            kind: ResponsiveErrorKind::UnsupportedFeature,
            message: format!("{feature} is not available in this environment"),
            fallback: Some(fallback),
        }
    }

    /// An unknown breakpoint key.
    pub fn invalid_breakpoint(key: &str) -> Self {
        Self {
            kind: ResponsiveErrorKind::InvalidBreakpoint,
            message: format!("unknown breakpoint '{key}'"),
            fallback: Some(FallbackAction::UseSmallestBreakpoint),
        }
    }

    /// The container ref is not attached to an element.
    pub fn container_not_found() -> Self {
        Self {
            kind: ResponsiveErrorKind::ContainerNotFound,
            message: "container ref is not attached to an element".to_string(),
            fallback: Some(FallbackAction::UseViewport),
        }
    }

    /// Decorative content cannot run here and is left out.
    pub fn decoration_unavailable(reason: impl fmt::Display) -> Self {
        Self {
            kind: ResponsiveErrorKind::UnsupportedFeature,
            message: format!("decorative content disabled: {reason}"),
            fallback: Some(FallbackAction::RenderNothing),
        }
    }

    /// Returns true if this error is of the given kind.
    #[must_use]
    pub fn is(&self, kind: ResponsiveErrorKind) -> bool {
        self.kind == kind
    }
}

/// Core error type for folio operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("TOML parse error: {reason}")]
    ConfigParseFailed { reason: String },

    #[error("invalid configuration '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error(transparent)]
    Responsive(#[from] ResponsiveError),
}

impl Error {
    /// Create a config parse error.
    pub fn config_parse_failed(reason: impl Into<String>) -> Self {
        Self::ConfigParseFailed {
            reason: reason.into(),
        }
    }

    /// Create an invalid config error.
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_feature_carries_fallback() {
        let err = ResponsiveError::unsupported_feature("ResizeObserver", FallbackAction::UseViewport);
        assert!(err.is(ResponsiveErrorKind::UnsupportedFeature));
        assert_eq!(err.fallback, Some(FallbackAction::UseViewport));
        assert_eq!(
            err.to_string(),
            "UNSUPPORTED_FEATURE: ResizeObserver is not available in this environment"
        );
    }

    #[test]
    fn test_decoration_unavailable_renders_nothing() {
        let err = ResponsiveError::decoration_unavailable("no 2D context");
        assert!(err.is(ResponsiveErrorKind::UnsupportedFeature));
        assert_eq!(err.fallback, Some(FallbackAction::RenderNothing));
        assert!(err.message.ends_with("no 2D context"));
    }

    #[test]
    fn test_invalid_breakpoint_falls_back_to_smallest() {
        let err = ResponsiveError::invalid_breakpoint("3xl");
        assert_eq!(err.fallback, Some(FallbackAction::UseSmallestBreakpoint));
        assert!(err.to_string().contains("3xl"));
    }

    #[test]
    fn test_error_wraps_responsive_error() {
        let err: Error = ResponsiveError::container_not_found().into();
        assert!(err.to_string().starts_with("CONTAINER_NOT_FOUND"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::invalid_config("container.large_min", "must exceed medium_min");
        assert_eq!(
            err.to_string(),
            "invalid configuration 'container.large_min': must exceed medium_min"
        );
    }
}
