//! Site header: brand, section navigation and the language switch.

use folio_core::{AnalyticsEvent, AnalyticsSink, TextKey};
use leptos::prelude::*;

use super::sections::anchors;
use crate::analytics::use_analytics;
use crate::i18n::use_i18n;
use crate::router::routes;

/// Navigation entries in page order.
pub const NAV_ITEMS: [(&str, TextKey); 5] = [
    (anchors::ABOUT, TextKey::NavAbout),
    (anchors::SERVICES, TextKey::NavServices),
    (anchors::WORK, TextKey::NavWork),
    (anchors::PROCESS, TextKey::NavProcess),
    (anchors::CONTACT, TextKey::NavContact),
];

/// Toggles between German and English. The label names the other language.
#[component]
pub fn LanguageSwitch() -> impl IntoView {
    let i18n = use_i18n();

    view! {
        <button
            type="button"
            class="language-switch"
            lang=move || i18n.language().toggle().code()
            on:click=move |_| i18n.toggle()
        >
            {move || i18n.t(TextKey::LanguageSwitchLabel)}
        </button>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let i18n = use_i18n();
    let analytics = StoredValue::new(use_analytics());

    let links = NAV_ITEMS
        .iter()
        .map(|&(anchor, key)| {
            let on_click = move |_| {
                analytics.with_value(|analytics| {
                    if let Some(analytics) = analytics {
                        analytics.track(&AnalyticsEvent::SectionViewed {
                            section: anchor.to_string(),
                        });
                    }
                });
            };
            view! {
                <a href=format!("#{anchor}") on:click=on_click>
                    {move || i18n.t(key)}
                </a>
            }
        })
        .collect_view();

    view! {
        <header class="site-header">
            <a class="site-brand" href=routes::HOME>"folio"</a>
            <nav class="site-nav" aria-label="primary">{links}</nav>
            <LanguageSwitch />
        </header>
    }
}
