//! HiDPI canvas sizing.
//!
//! The backing store is sized in physical pixels and the context transform
//! scaled back so drawing code works in CSS pixels.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{Result, UiError, js_reason};

/// Physical backing-store size for a logical size at `dpr`.
///
/// # Errors
///
/// Returns [`UiError::CanvasSize`] if the logical size is not positive and
/// finite, or the physical size does not fit a canvas dimension.
pub fn backing_size(logical_width: f64, logical_height: f64, dpr: f64) -> Result<(u32, u32)> {
    let invalid = || UiError::CanvasSize {
        width: logical_width,
        height: logical_height,
    };
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(logical_width) || !valid(logical_height) {
        return Err(invalid());
    }
    let dpr = if valid(dpr) { dpr } else { 1.0 };

    let to_physical = |logical: f64| {
        let physical = (logical * dpr).round();
        if physical > f64::from(u32::MAX) {
            return Err(invalid());
        }
        // In range and non-negative after the checks above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let physical = physical as u32;
        Ok(physical.max(1))
    };
    Ok((to_physical(logical_width)?, to_physical(logical_height)?))
}

/// Fetch the 2D context of `canvas`.
///
/// # Errors
///
/// Returns [`UiError::CanvasContext`] if the browser has no 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| UiError::CanvasContext(js_reason(&e)))?
        .ok_or_else(|| UiError::CanvasContext("2d context is not available".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| UiError::CanvasContext("unexpected context type".to_string()))
}

/// Size `canvas` for the given CSS size and pixel ratio and reset the context
/// transform to match. Safe to call on every resize.
///
/// # Errors
///
/// Returns [`UiError::CanvasSize`] for an unusable size, or
/// [`UiError::CanvasContext`] if the transform cannot be set.
pub fn fit_canvas(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    logical_width: f64,
    logical_height: f64,
    dpr: f64,
) -> Result<()> {
    let (width, height) = backing_size(logical_width, logical_height, dpr)?;
    canvas.set_width(width);
    canvas.set_height(height);

    let scale_x = f64::from(width) / logical_width;
    let scale_y = f64::from(height) / logical_height;
    ctx.set_transform(scale_x, 0.0, 0.0, scale_y, 0.0, 0.0)
        .map_err(|e| UiError::CanvasContext(js_reason(&e)))
}
