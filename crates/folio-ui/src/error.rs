//! Error types for browser plumbing.
//!
//! None of these reach the visitor: every call site pairs the error with a
//! fallback and logs it.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while talking to browser APIs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    #[error("window is not available")]
    WindowNotAvailable,

    #[error("document is not available")]
    DocumentNotAvailable,

    #[error("failed to attach '{event}' listener: {reason}")]
    ListenerAttach { event: String, reason: String },

    #[error("failed to remove '{event}' listener: {reason}")]
    ListenerRemove { event: String, reason: String },

    #[error("failed to create ResizeObserver: {0}")]
    ObserverCreation(String),

    #[error("canvas 2d context unavailable: {0}")]
    CanvasContext(String),

    #[error("invalid canvas size {width}x{height}")]
    CanvasSize { width: f64, height: f64 },

    #[error("animation loop unavailable: {0}")]
    Animation(String),

    #[error("failed to dispatch '{event}': {reason}")]
    Dispatch { event: String, reason: String },
}

/// Render a `JsValue` error for log output.
#[must_use]
pub fn js_reason(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Result type alias for UI plumbing.
pub type Result<T> = std::result::Result<T, UiError>;
