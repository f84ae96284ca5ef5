//! Analytics dispatch as DOM events, gated on visitor consent.
//!
//! Events go out as a `CustomEvent` on `window` whose `detail` is the
//! serialized [`AnalyticsEvent`]; whatever analytics script the page loads
//! listens for it.

use folio_core::config::AnalyticsConfig;
use folio_core::{AnalyticsEvent, AnalyticsSink, Consent, ConsentGate, ConsentStore};
use leptos::prelude::*;
use serde::Serialize;
use web_sys::{CustomEvent, CustomEventInit, window};

use crate::error::{Result, UiError, js_reason};

/// Consent decision held in a signal so the banner reacts to it.
#[derive(Debug, Clone, Copy)]
pub struct SignalConsent(pub RwSignal<Consent>);

impl ConsentStore for SignalConsent {
    fn load(&self) -> Consent {
        self.0.get_untracked()
    }

    fn store(&self, consent: Consent) {
        self.0.set(consent);
    }
}

/// Sink that dispatches events on `window`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEventSink {
    event_name: String,
    enabled: bool,
}

impl DomEventSink {
    #[must_use]
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            event_name: config.event_name.clone(),
            enabled: config.enabled,
        }
    }

    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Dispatch one event.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Dispatch`] if serialization or dispatch fails.
    pub fn dispatch(&self, event: &AnalyticsEvent) -> Result<()> {
        let window = window().ok_or(UiError::WindowNotAvailable)?;
        let dispatch_error = |reason: String| UiError::Dispatch {
            event: event.name().to_string(),
            reason,
        };

        let detail = event
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| dispatch_error(e.to_string()))?;
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let dom_event = CustomEvent::new_with_event_init_dict(&self.event_name, &init)
            .map_err(|e| dispatch_error(js_reason(&e)))?;
        window
            .dispatch_event(&dom_event)
            .map(|_| ())
            .map_err(|e| dispatch_error(js_reason(&e)))
    }
}

impl AnalyticsSink for DomEventSink {
    fn track(&self, event: &AnalyticsEvent) {
        if !self.enabled {
            return;
        }
        match self.dispatch(event) {
            Ok(()) => tracing::debug!(event = event.name(), "analytics event dispatched"),
            Err(e) => tracing::warn!("{}", e),
        }
    }
}

/// Consent-gated analytics, shared through context.
pub type Analytics = ConsentGate<SignalConsent, DomEventSink>;

/// Create the analytics gate and put it in context. Consent starts undecided.
pub fn provide_analytics(config: &AnalyticsConfig) -> Analytics {
    let consent = SignalConsent(RwSignal::new(Consent::Unknown));
    let analytics = ConsentGate::new(consent, DomEventSink::new(config));
    provide_context(analytics.clone());
    provide_context(consent);
    analytics
}

pub fn use_analytics() -> Option<Analytics> {
    use_context::<Analytics>()
}

/// Reactive consent state, `Unknown` without a provider.
pub fn use_consent() -> Signal<Consent> {
    let consent = use_context::<SignalConsent>();
    Signal::derive(move || consent.map_or(Consent::Unknown, |c| c.0.get()))
}

/// Track through the context gate, if any.
pub fn track(event: &AnalyticsEvent) {
    if let Some(analytics) = use_analytics() {
        analytics.track(event);
    }
}
