//! Root component: wires configuration and shared state into context.

use folio_core::SiteConfig;
use leptos::prelude::*;

use crate::analytics::provide_analytics;
use crate::browser::BrowserCapabilities;
use crate::components::particles::ParticleManager;
use crate::components::{ConsentBanner, Footer, Header};
use crate::hooks::use_responsive;
use crate::i18n::provide_i18n;
use crate::router::AppRouter;

/// Application root.
///
/// Provides, in order: container query options, particle settings, the
/// consent-gated analytics, the language, the particle configuration
/// manager, the responsive options and one page-wide responsive handle.
#[component]
pub fn App(#[prop(optional)] config: Option<SiteConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();

    provide_context(config.container.clone());
    provide_context(config.particles.clone());
    provide_analytics(&config.analytics);
    provide_i18n(config.default_language);
    provide_context(ParticleManager::new(
        BrowserCapabilities,
        config.particles.theme.clone(),
    ));
    provide_context(config.responsive);
    provide_context(use_responsive(config.responsive));

    view! {
        <div class="app-container">
            <Header />
            <main class="app-main">
                <AppRouter />
            </main>
            <Footer />
            <ConsentBanner />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_component_exists() {
        let _component = App;
    }
}
