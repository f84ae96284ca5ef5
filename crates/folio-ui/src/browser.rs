//! Browser-backed [`Capabilities`].
//!
//! Every read is feature-detected; anything missing reports `None`/`false`.

use folio_core::capabilities::{Capabilities, Viewport};
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{Window, window};

/// Reads capabilities from the live `window`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserCapabilities;

fn has_global(window: &Window, name: &str) -> bool {
    Reflect::has(window, &JsValue::from_str(name)).unwrap_or(false)
}

impl Capabilities for BrowserCapabilities {
    fn viewport(&self) -> Option<Viewport> {
        let window = window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some(Viewport::new(width, height))
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        window()
            .map(|w| w.device_pixel_ratio())
            .filter(|r| r.is_finite() && *r > 0.0)
    }

    fn max_touch_points(&self) -> u32 {
        window()
            .map(|w| w.navigator().max_touch_points())
            .and_then(|points| u32::try_from(points).ok())
            .unwrap_or(0)
    }

    fn has_touch_events(&self) -> bool {
        window().is_some_and(|w| has_global(&w, "ontouchstart"))
    }

    fn media_matches(&self, query: &str) -> Option<bool> {
        window()?
            .match_media(query)
            .ok()
            .flatten()
            .map(|list| list.matches())
    }

    fn supports_resize_observer(&self) -> bool {
        window().is_some_and(|w| has_global(&w, "ResizeObserver"))
    }

    fn css_variable(&self, name: &str) -> Option<String> {
        let window = window()?;
        let root = window.document()?.document_element()?;
        let value = window
            .get_computed_style(&root)
            .ok()
            .flatten()?
            .get_property_value(name)
            .ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn has_dom(&self) -> bool {
        window().and_then(|w| w.document()).is_some()
    }
}

/// Primary browser locale, e.g. `de-DE`.
#[must_use]
pub fn browser_locale() -> Option<String> {
    window()?.navigator().language()
}

/// Set `<html lang>`.
pub fn set_document_language(code: &str) {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("lang", code) {
            tracing::warn!("failed to set document language: {}", crate::error::js_reason(&e));
        }
    }
}

/// Current viewport or the neutral server size.
#[must_use]
pub fn viewport_or_default() -> Viewport {
    BrowserCapabilities.viewport().unwrap_or_else(|| {
        let (width, height) = folio_core::responsive::SERVER_VIEWPORT;
        Viewport::new(width, height)
    })
}
