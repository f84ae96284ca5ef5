//! Viewport breakpoint classification (mobile-first).
//!
//! Thresholds are strictly increasing; a width maps to exactly one breakpoint,
//! the largest whose threshold is at or below the width.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResponsiveError;

/// Named viewport-width tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Breakpoint {
    #[serde(rename = "xs")]
    Xs,
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl Breakpoint {
    /// All breakpoints, smallest threshold first.
    pub const ALL: [Self; 6] = [Self::Xs, Self::Sm, Self::Md, Self::Lg, Self::Xl, Self::Xxl];

    /// Minimum viewport width (px) for this breakpoint.
    #[must_use]
    pub const fn min_width(self) -> f64 {
        match self {
            Self::Xs => 0.0,
            Self::Sm => 640.0,
            Self::Md => 768.0,
            Self::Lg => 1024.0,
            Self::Xl => 1280.0,
            Self::Xxl => 1536.0,
        }
    }

    /// The next larger breakpoint, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Xs => Some(Self::Sm),
            Self::Sm => Some(Self::Md),
            Self::Md => Some(Self::Lg),
            Self::Lg => Some(Self::Xl),
            Self::Xl => Some(Self::Xxl),
            Self::Xxl => None,
        }
    }

    /// Key used in class names and analytics payloads.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "2xl",
        }
    }

    /// Classify a viewport width.
    ///
    /// Walks thresholds from largest to smallest and returns the first one the
    /// width reaches. Widths below every threshold (negative, NaN) are `Xs`.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_core::breakpoint::Breakpoint;
    ///
    /// assert_eq!(Breakpoint::classify(375.0), Breakpoint::Xs);
    /// assert_eq!(Breakpoint::classify(800.0), Breakpoint::Md);
    /// assert_eq!(Breakpoint::classify(1536.0), Breakpoint::Xxl);
    /// ```
    #[must_use]
    pub fn classify(width: f64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Self::Xs)
    }

    /// True when `width` reaches this breakpoint's threshold (inclusive).
    #[must_use]
    pub fn is_at_least(self, width: f64) -> bool {
        width >= self.min_width()
    }

    /// True when `width` is strictly below the next breakpoint's threshold.
    ///
    /// "At most lg" holds for any width below `xl`. The largest breakpoint
    /// has no upper bound.
    #[must_use]
    pub fn is_at_most(self, width: f64) -> bool {
        self.next().is_none_or(|next| width < next.min_width())
    }

    /// True when `width` classifies exactly as this breakpoint.
    #[must_use]
    pub fn is_within(self, width: f64) -> bool {
        Self::classify(width) == self
    }

    /// Parse a key, falling back to the smallest breakpoint on unknown input.
    ///
    /// The error is returned alongside the fallback so callers can report it.
    #[must_use]
    pub fn parse_or_smallest(key: &str) -> (Self, Option<ResponsiveError>) {
        match key.parse() {
            Ok(bp) => (bp, None),
            Err(err) => {
                tracing::warn!("{}, treating as xs", err);
                (Self::Xs, Some(err))
            }
        }
    }
}

impl Default for Breakpoint {
    /// Neutral default used when no viewport is available.
    fn default() -> Self {
        Self::Lg
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Breakpoint {
    type Err = ResponsiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|bp| bp.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ResponsiveError::invalid_breakpoint(s))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;
    use crate::error::{FallbackAction, ResponsiveErrorKind};
    use proptest::prelude::*;

    #[test]
    fn test_thresholds_strictly_increasing() {
        for pair in Breakpoint::ALL.windows(2) {
            if let [lower, upper] = pair {
                assert!(lower.min_width() < upper.min_width(), "{lower} >= {upper}");
                assert_eq!(lower.next(), Some(*upper));
            }
        }
        assert_eq!(Breakpoint::Xxl.next(), None);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(Breakpoint::classify(0.0), Breakpoint::Xs);
        assert_eq!(Breakpoint::classify(639.9), Breakpoint::Xs);
        assert_eq!(Breakpoint::classify(640.0), Breakpoint::Sm);
        assert_eq!(Breakpoint::classify(767.0), Breakpoint::Sm);
        assert_eq!(Breakpoint::classify(768.0), Breakpoint::Md);
        assert_eq!(Breakpoint::classify(1023.0), Breakpoint::Md);
        assert_eq!(Breakpoint::classify(1024.0), Breakpoint::Lg);
        assert_eq!(Breakpoint::classify(1280.0), Breakpoint::Xl);
        assert_eq!(Breakpoint::classify(1536.0), Breakpoint::Xxl);
        assert_eq!(Breakpoint::classify(5000.0), Breakpoint::Xxl);
    }

    #[test]
    fn test_classify_degenerate_widths() {
        assert_eq!(Breakpoint::classify(-10.0), Breakpoint::Xs);
        assert_eq!(Breakpoint::classify(f64::NAN), Breakpoint::Xs);
        assert_eq!(Breakpoint::classify(f64::INFINITY), Breakpoint::Xxl);
    }

    #[test]
    fn test_at_least_md_is_inclusive() {
        assert!(!Breakpoint::Md.is_at_least(767.0));
        assert!(Breakpoint::Md.is_at_least(768.0));
        assert!(Breakpoint::Md.is_at_least(2000.0));
    }

    #[test]
    fn test_at_most_md_excludes_next_threshold() {
        assert!(Breakpoint::Md.is_at_most(0.0));
        assert!(Breakpoint::Md.is_at_most(1023.0));
        assert!(!Breakpoint::Md.is_at_most(1024.0));
        assert!(Breakpoint::Lg.is_at_most(1279.0));
        assert!(!Breakpoint::Lg.is_at_most(1280.0));
        assert!(Breakpoint::Xxl.is_at_most(100_000.0));
    }

    #[test]
    fn test_is_within() {
        assert!(Breakpoint::Md.is_within(800.0));
        assert!(!Breakpoint::Md.is_within(1024.0));
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("2xl".parse::<Breakpoint>().ok(), Some(Breakpoint::Xxl));
        assert_eq!(" MD ".parse::<Breakpoint>().ok(), Some(Breakpoint::Md));
        let err = "huge".parse::<Breakpoint>().unwrap_err();
        assert!(err.is(ResponsiveErrorKind::InvalidBreakpoint));
    }

    #[test]
    fn test_parse_or_smallest_reports_error() {
        let (bp, err) = Breakpoint::parse_or_smallest("tablet");
        assert_eq!(bp, Breakpoint::Xs);
        assert_eq!(
            err.and_then(|e| e.fallback),
            Some(FallbackAction::UseSmallestBreakpoint)
        );

        let (bp, err) = Breakpoint::parse_or_smallest("xl");
        assert_eq!(bp, Breakpoint::Xl);
        assert!(err.is_none());
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&Breakpoint::Xxl).unwrap();
        assert_eq!(json, "\"2xl\"");
    }

    proptest! {
        #[test]
        fn prop_classify_is_monotonic(a in -100.0f64..5000.0, b in -100.0f64..5000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Breakpoint::classify(lo) <= Breakpoint::classify(hi));
        }

        #[test]
        fn prop_classify_matches_exactly_one(w in 0.0f64..5000.0) {
            let matching = Breakpoint::ALL.iter().filter(|bp| bp.is_within(w)).count();
            prop_assert_eq!(matching, 1);
        }

        #[test]
        fn prop_at_least_and_at_most_agree_with_classify(w in 0.0f64..5000.0) {
            let bp = Breakpoint::classify(w);
            prop_assert!(bp.is_at_least(w));
            prop_assert!(bp.is_at_most(w));
        }
    }
}
