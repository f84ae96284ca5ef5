//! Analytics consent banner, shown until the visitor decides.

use folio_core::{Consent, TextKey};
use leptos::prelude::*;

use crate::analytics::{use_analytics, use_consent};
use crate::i18n::use_i18n;

#[component]
pub fn ConsentBanner() -> impl IntoView {
    let i18n = use_i18n();
    let consent = use_consent();
    let analytics = StoredValue::new(use_analytics());

    let decide = move |choice: Consent| {
        analytics.with_value(|analytics| match analytics {
            Some(analytics) => analytics.set_consent(choice),
            None => tracing::debug!("no analytics provider, consent ignored"),
        });
    };

    view! {
        <Show when=move || !consent.get().is_decided()>
            <div class="consent-banner" role="dialog" aria-live="polite">
                <p>{move || i18n.t(TextKey::ConsentMessage)}</p>
                <div class="consent-actions">
                    <button type="button" on:click=move |_| decide(Consent::Granted)>
                        {move || i18n.t(TextKey::ConsentAccept)}
                    </button>
                    <button type="button" on:click=move |_| decide(Consent::Denied)>
                        {move || i18n.t(TextKey::ConsentDecline)}
                    </button>
                </div>
            </div>
        </Show>
    }
}
