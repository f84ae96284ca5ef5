//! WASM entry point. Trunk compiles this and mounts [`App`] to the body.

use folio_core::{ResultExt, SiteConfig};
use folio_ui::App;
use folio_ui::config::{bundled, log_directive};
use folio_ui::logging::init_logging;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let parsed = bundled();
    init_logging(&log_directive(&parsed));
    let config = parsed.or_fallback_logged("site configuration", SiteConfig::default);
    tracing::info!(language = %config.default_language, "starting folio");

    mount_to_body(move || {
        view! {
            <App config=config />
        }
    });
}
