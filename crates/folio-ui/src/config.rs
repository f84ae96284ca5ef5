//! Bundled site configuration.

use folio_core::config::LoggingConfig;
use folio_core::{Error, SiteConfig};

/// `folio.toml`, compiled into the bundle.
pub const BUNDLED_CONFIG: &str = include_str!("../folio.toml");

/// Parse the bundled config. The error is kept for the caller to report
/// once logging is up.
///
/// # Errors
///
/// Returns the parse or validation error from [`SiteConfig::from_toml_str`].
pub fn bundled() -> Result<SiteConfig, Error> {
    SiteConfig::from_toml_str(BUNDLED_CONFIG)
}

/// Log filter directive from a parse result, default level on failure.
#[must_use]
pub fn log_directive(parsed: &Result<SiteConfig, Error>) -> String {
    parsed.as_ref().map_or_else(
        |_| LoggingConfig::default().level,
        |config| config.logging.level.clone(),
    )
}
