//! Analytics event model and consent gating.
//!
//! Dispatch itself belongs to whatever library listens on the page; this module
//! only decides *what* is sent and *whether* it may be sent.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::breakpoint::Breakpoint;
use crate::device::Orientation;
use crate::error::ResponsiveErrorKind;
use crate::i18n::Language;

/// Visitor's tracking decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consent {
    /// No decision yet; the banner is shown and nothing is tracked.
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl Consent {
    #[must_use]
    pub const fn allows_tracking(self) -> bool {
        matches!(self, Self::Granted)
    }

    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Something worth counting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    BreakpointChanged {
        from: Breakpoint,
        to: Breakpoint,
        viewport_width: f64,
    },
    OrientationChanged {
        from: Orientation,
        to: Orientation,
    },
    LanguageSwitched {
        from: Language,
        to: Language,
    },
    SectionViewed {
        section: String,
    },
    ContactClicked {
        channel: String,
    },
    ConsentUpdated {
        granted: bool,
    },
    ContainerFallback {
        kind: ResponsiveErrorKind,
    },
    ParticlesDegraded {
        measured_fps: f64,
        particle_count: u32,
    },
}

impl AnalyticsEvent {
    /// Stable event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BreakpointChanged { .. } => "breakpoint_changed",
            Self::OrientationChanged { .. } => "orientation_changed",
            Self::LanguageSwitched { .. } => "language_switched",
            Self::SectionViewed { .. } => "section_viewed",
            Self::ContactClicked { .. } => "contact_clicked",
            Self::ConsentUpdated { .. } => "consent_updated",
            Self::ContainerFallback { .. } => "container_fallback",
            Self::ParticlesDegraded { .. } => "particles_degraded",
        }
    }
}

/// Destination for analytics events.
pub trait AnalyticsSink {
    fn track(&self, event: &AnalyticsEvent);
}

/// Where the consent decision lives (a cell here, a reactive signal in the UI).
pub trait ConsentStore {
    fn load(&self) -> Consent;
    fn store(&self, consent: Consent);
}

impl ConsentStore for Cell<Consent> {
    fn load(&self) -> Consent {
        self.get()
    }

    fn store(&self, consent: Consent) {
        self.set(consent);
    }
}

/// Forwards events only while consent is granted.
#[derive(Debug, Clone, Copy)]
pub struct ConsentGate<C, S> {
    store: C,
    inner: S,
}

impl<C: ConsentStore, S: AnalyticsSink> ConsentGate<C, S> {
    pub const fn new(store: C, inner: S) -> Self {
        Self { store, inner }
    }

    #[must_use]
    pub fn consent(&self) -> Consent {
        self.store.load()
    }

    /// Record the visitor's decision. Granting emits `ConsentUpdated` through
    /// the now-open gate; denying emits nothing.
    pub fn set_consent(&self, consent: Consent) {
        let previous = self.store.load();
        self.store.store(consent);
        if previous != consent && consent.allows_tracking() {
            self.inner
                .track(&AnalyticsEvent::ConsentUpdated { granted: true });
        }
    }
}

impl<C: ConsentStore, S: AnalyticsSink> AnalyticsSink for ConsentGate<C, S> {
    fn track(&self, event: &AnalyticsEvent) {
        if self.store.load().allows_tracking() {
            self.inner.track(event);
        } else {
            tracing::trace!(event = event.name(), "analytics suppressed without consent");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<AnalyticsEvent>>,
    }

    impl AnalyticsSink for &Recorder {
        fn track(&self, event: &AnalyticsEvent) {
            self.events.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_nothing_tracked_before_consent() {
        let recorder = Recorder::default();
        let gate = ConsentGate::new(Cell::new(Consent::Unknown), &recorder);
        gate.track(&AnalyticsEvent::SectionViewed {
            section: "about".to_string(),
        });
        assert!(recorder.events.borrow().is_empty());
    }

    #[test]
    fn test_granting_opens_gate_and_reports() {
        let recorder = Recorder::default();
        let gate = ConsentGate::new(Cell::new(Consent::Unknown), &recorder);
        gate.set_consent(Consent::Granted);
        gate.set_consent(Consent::Granted);
        gate.track(&AnalyticsEvent::ContactClicked {
            channel: "email".to_string(),
        });

        let events = recorder.events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events.first().map(AnalyticsEvent::name), Some("consent_updated"));
        assert_eq!(events.get(1).map(AnalyticsEvent::name), Some("contact_clicked"));
    }

    #[test]
    fn test_denied_stays_closed() {
        let recorder = Recorder::default();
        let gate = ConsentGate::new(Cell::new(Consent::Unknown), &recorder);
        gate.set_consent(Consent::Denied);
        gate.track(&AnalyticsEvent::ConsentUpdated { granted: false });
        assert!(recorder.events.borrow().is_empty());
        assert!(gate.consent().is_decided());
    }

    #[test]
    fn test_serialized_shape() {
        let event = AnalyticsEvent::BreakpointChanged {
            from: Breakpoint::Md,
            to: Breakpoint::Lg,
            viewport_width: 1100.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "breakpoint_changed");
        assert_eq!(json["from"], "md");
        assert_eq!(json["to"], "lg");
    }
}
