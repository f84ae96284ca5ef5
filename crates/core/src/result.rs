//! Result type definition and logging fallbacks.
//!
//! Degraded-mode code paths log the error and continue with a neutral value
//! instead of unwrapping.

use crate::error::Error;

/// The standard Result type for folio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for Results whose failure has a sensible fallback.
pub trait ResultExt<T> {
    /// Get the value or the fallback, logging the error at warn level.
    fn or_fallback_logged(self, context: &str, fallback: impl FnOnce() -> T) -> T;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn or_fallback_logged(self, context: &str, fallback: impl FnOnce() -> T) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{}: {}, using fallback", context, e);
                fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_fallback_logged() {
        let ok: Result<i32> = Ok(7);
        assert_eq!(ok.or_fallback_logged("config", || 0), 7);

        let err: Result<i32> = Err(Error::config_parse_failed("bad"));
        assert_eq!(err.or_fallback_logged("config", || 99), 99);
    }
}
