//! Site configuration, loaded from `folio.toml`.
//!
//! Every section is optional; missing keys take their defaults.

use serde::{Deserialize, Serialize};

use crate::container::ContainerQueryOptions;
use crate::error::Error;
use crate::i18n::Language;
use crate::particles::{ParticleTheme, PerformancePolicy};
use crate::responsive::ResponsiveOptions;
use crate::result::Result;

/// Default DOM event name for analytics dispatch.
pub const DEFAULT_ANALYTICS_EVENT: &str = "folio:analytics";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Language used when the browser locale is not supported.
    pub default_language: Language,
    pub responsive: ResponsiveOptions,
    pub container: ContainerQueryOptions,
    pub particles: ParticlesConfig,
    pub analytics: AnalyticsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    /// Master switch for the canvas background.
    pub enabled: bool,
    pub theme: ParticleTheme,
    pub performance: PerformancePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub enabled: bool,
    /// Name of the `CustomEvent` dispatched on `window`.
    pub event_name: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            event_name: DEFAULT_ANALYTICS_EVENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `folio_ui=debug,warn`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigParseFailed` for malformed TOML and
    /// `Error::InvalidConfig` when a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::config_parse_failed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.responsive.debounce_ms == 0 {
            return Err(Error::invalid_config(
                "responsive.debounce_ms",
                "must be greater than zero",
            ));
        }
        if self.container.debounce_ms == 0 {
            return Err(Error::invalid_config(
                "container.debounce_ms",
                "must be greater than zero",
            ));
        }
        self.container.queries.validate()?;
        self.particles.performance.validate()?;
        if self.particles.theme.fallback_palette.is_empty() {
            return Err(Error::invalid_config(
                "particles.theme.fallback_palette",
                "needs at least one color",
            ));
        }
        if self.analytics.enabled && self.analytics.event_name.trim().is_empty() {
            return Err(Error::invalid_config(
                "analytics.event_name",
                "must not be empty while analytics is enabled",
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(Error::invalid_config("logging.level", "must not be empty"));
        }
        Ok(())
    }
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: ParticleTheme::default(),
            performance: PerformancePolicy::default(),
        }
    }
}
