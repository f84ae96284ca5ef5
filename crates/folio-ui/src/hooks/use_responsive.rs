//! Viewport breakpoint and device state as reactive signals.
//!
//! Starts from the neutral server state so the first render matches a
//! pre-rendered page, then hydrates on the first client effect. Resize is
//! debounced; `orientationchange` re-measures after a settle delay.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::debounce::debounce;
use folio_core::{
    AnalyticsSink, Breakpoint, DeviceInfo, Hydration, ResponsiveOptions, ResponsiveState,
    ResponsiveTracker,
};
use leptos::prelude::*;
use send_wrapper::SendWrapper;

use crate::analytics::use_analytics;
use crate::browser::BrowserCapabilities;
use crate::events::{EventListener, remove_all};
use crate::timers::GlooScheduler;

/// Handle returned by [`use_responsive`]. Every accessor is tracked.
#[derive(Debug, Clone, Copy)]
pub struct UseResponsive {
    state: RwSignal<ResponsiveState>,
    hydration: RwSignal<Hydration>,
}

impl UseResponsive {
    /// A handle fixed at `state`; used where no window exists and in tests.
    #[must_use]
    pub fn fixed(state: ResponsiveState) -> Self {
        Self {
            state: RwSignal::new(state),
            hydration: RwSignal::new(Hydration::Hydrated),
        }
    }

    #[must_use]
    pub fn state(&self) -> ResponsiveState {
        self.state.get()
    }

    #[must_use]
    pub fn current_breakpoint(&self) -> Breakpoint {
        self.state.with(|s| s.current_breakpoint)
    }

    /// Breakpoint without subscribing the caller.
    #[must_use]
    pub fn current_breakpoint_untracked(&self) -> Breakpoint {
        self.state.with_untracked(|s| s.current_breakpoint)
    }

    #[must_use]
    pub fn viewport_width(&self) -> f64 {
        self.state.with(|s| s.viewport_width)
    }

    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.state.with(|s| s.viewport_height)
    }

    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        self.state.with(|s| s.device_info)
    }

    #[must_use]
    pub fn device_info_untracked(&self) -> DeviceInfo {
        self.state.with_untracked(|s| s.device_info)
    }

    #[must_use]
    pub fn is_within_breakpoint(&self, bp: Breakpoint) -> bool {
        self.state.with(|s| s.is_within_breakpoint(bp))
    }

    #[must_use]
    pub fn is_at_least_breakpoint(&self, bp: Breakpoint) -> bool {
        self.state.with(|s| s.is_at_least_breakpoint(bp))
    }

    #[must_use]
    pub fn is_at_most_breakpoint(&self, bp: Breakpoint) -> bool {
        self.state.with(|s| s.is_at_most_breakpoint(bp))
    }

    #[must_use]
    pub fn hydration(&self) -> Hydration {
        self.hydration.get()
    }
}

/// Track viewport breakpoint and device facts.
///
/// Each call owns its own listeners; they and any pending timers are released
/// when the calling component unmounts.
pub fn use_responsive(options: ResponsiveOptions) -> UseResponsive {
    let state = RwSignal::new(ResponsiveState::server_default());
    let hydration = RwSignal::new(Hydration::Uninitialized);
    let analytics = use_analytics();

    Effect::new(move |_| {
        let analytics = analytics.clone();
        let tracker = Rc::new(RefCell::new(ResponsiveTracker::new()));
        let measure = Rc::new(move || {
            let measured =
                ResponsiveState::measure(&BrowserCapabilities, options.enable_device_detection);
            state.set(measured);
            let events = tracker.borrow_mut().observe(&measured);
            if let Some(analytics) = &analytics {
                for event in &events {
                    analytics.track(event);
                }
            }
        });

        measure();
        hydration.set(Hydration::Hydrated);

        let on_settled = Rc::clone(&measure);
        let (on_resize, cancel_resize) =
            debounce(GlooScheduler, options.debounce_ms, move |()| on_settled());
        let on_settled = Rc::clone(&measure);
        let (on_rotate, cancel_rotate) = debounce(
            GlooScheduler,
            options.orientation_settle_ms,
            move |()| on_settled(),
        );

        let listeners: Vec<EventListener> = [
            EventListener::on_window("resize", move |_| on_resize.call(())),
            EventListener::on_window("orientationchange", move |_| on_rotate.call(())),
        ]
        .into_iter()
        .filter_map(|attached| {
            attached
                .inspect_err(|e| tracing::warn!("responsive listener unavailable: {}", e))
                .ok()
        })
        .collect();

        let teardown = SendWrapper::new((listeners, cancel_resize, cancel_rotate));
        on_cleanup(move || {
            let (listeners, cancel_resize, cancel_rotate) = teardown.take();
            cancel_resize.cancel();
            cancel_rotate.cancel();
            remove_all(listeners);
        });
    });

    UseResponsive { state, hydration }
}

/// The page-wide responsive handle from context, or a fresh one.
pub fn use_responsive_context() -> UseResponsive {
    use_context::<UseResponsive>().unwrap_or_else(|| use_responsive(ResponsiveOptions::default()))
}
