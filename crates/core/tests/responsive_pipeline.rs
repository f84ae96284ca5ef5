//! End-to-end behavior of the responsive pipeline on the virtual clock:
//! resize bursts through the debounce, measurement through a capability stub,
//! and analytics through the consent gate.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::{
    AnalyticsEvent, AnalyticsSink, Breakpoint, Consent, ConsentGate, ContainerDimensions,
    ContainerEvent, ContainerPhase, ContainerQueries, FallbackAction, FallbackStrategy,
    ManualScheduler, ResponsiveError, ResponsiveErrorKind, ResponsiveOptions, ResponsiveState,
    ResponsiveTracker, StaticCapabilities, debounce,
};

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<AnalyticsEvent>>,
}

/// Shared handle so the gate can move into the debounced callback.
struct SharedRecorder(Rc<Recorder>);

impl AnalyticsSink for SharedRecorder {
    fn track(&self, event: &AnalyticsEvent) {
        self.0.events.borrow_mut().push(event.clone());
    }
}

/// What the hook does on a settled resize: measure, publish, report changes.
struct Pipeline {
    clock: ManualScheduler,
    recorder: Rc<Recorder>,
    state: Rc<RefCell<ResponsiveState>>,
    on_resize: folio_core::Debounced<StaticCapabilities, ManualScheduler>,
    teardown: folio_core::DebounceCancel<StaticCapabilities, ManualScheduler>,
}

fn pipeline(consent: Consent) -> Pipeline {
    let clock = ManualScheduler::default();
    let recorder = Rc::new(Recorder::default());
    let gate = ConsentGate::new(Cell::new(consent), SharedRecorder(Rc::clone(&recorder)));
    let state = Rc::new(RefCell::new(ResponsiveState::server_default()));
    let tracker = RefCell::new(ResponsiveTracker::new());

    let initial = StaticCapabilities::desktop(1440.0, 900.0);
    let _ = tracker
        .borrow_mut()
        .observe(&ResponsiveState::measure(&initial, true));

    let published = Rc::clone(&state);
    let options = ResponsiveOptions::default();
    let (on_resize, teardown) = debounce(clock.clone(), options.debounce_ms, move |caps: StaticCapabilities| {
        let measured = ResponsiveState::measure(&caps, options.enable_device_detection);
        *published.borrow_mut() = measured;
        for event in tracker.borrow_mut().observe(&measured) {
            gate.track(&event);
        }
    });

    Pipeline {
        clock,
        recorder,
        state,
        on_resize,
        teardown,
    }
}

#[test]
fn resize_burst_updates_once_and_reports_once() {
    let p = pipeline(Consent::Granted);

    for width in [1400.0, 1200.0, 1000.0, 900.0, 800.0] {
        p.on_resize.call(StaticCapabilities::desktop(width, 700.0));
        p.clock.advance(30);
    }
    assert_eq!(p.state.borrow().current_breakpoint, Breakpoint::Lg);
    assert!(p.recorder.events.borrow().is_empty());

    p.clock.advance(150);
    assert_eq!(p.state.borrow().current_breakpoint, Breakpoint::Md);
    assert!((p.state.borrow().viewport_width - 800.0).abs() < f64::EPSILON);

    let events = p.recorder.events.borrow();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events.first(),
        Some(AnalyticsEvent::BreakpointChanged {
            from: Breakpoint::Xl,
            to: Breakpoint::Md,
            ..
        })
    ));
}

#[test]
fn same_settled_breakpoint_reports_nothing() {
    let p = pipeline(Consent::Granted);
    p.on_resize.call(StaticCapabilities::desktop(1450.0, 900.0));
    p.clock.advance(150);
    p.on_resize.call(StaticCapabilities::desktop(1300.0, 900.0));
    p.clock.advance(150);
    assert!(p.recorder.events.borrow().is_empty());
}

#[test]
fn no_update_after_teardown() {
    let p = pipeline(Consent::Granted);
    p.on_resize.call(StaticCapabilities::touch(375.0, 667.0, 2.0));
    p.teardown.cancel();
    p.clock.advance(1_000);
    assert_eq!(*p.state.borrow(), ResponsiveState::server_default());
    assert!(p.recorder.events.borrow().is_empty());
}

#[test]
fn undecided_consent_suppresses_reports_but_not_state() {
    let p = pipeline(Consent::Unknown);
    p.on_resize.call(StaticCapabilities::touch(375.0, 667.0, 2.0));
    p.clock.advance(150);
    assert!(p.state.borrow().device_info.is_mobile);
    assert!(p.recorder.events.borrow().is_empty());
}

#[test]
fn unsupported_observer_walks_to_fallback() {
    let strategy = FallbackStrategy::default();
    let error = ResponsiveError::unsupported_feature("ResizeObserver", strategy.action());
    assert!(error.is(ResponsiveErrorKind::UnsupportedFeature));
    assert_eq!(error.fallback, Some(FallbackAction::UseViewport));

    let phase = ContainerPhase::Idle
        .transition(ContainerEvent::Attached { supported: false })
        .transition(ContainerEvent::FallbackStarted);
    assert_eq!(phase, ContainerPhase::Fallback);
    assert!(phase.is_degraded());

    // The viewport fallback reports viewport-sized dimensions.
    let dims = ContainerDimensions::measure(1024.0, 768.0, &ContainerQueries::default());
    assert!(dims.is_large);
    assert!((dims.aspect_ratio - 1.33).abs() < f64::EPSILON);
    assert!(dims.is_landscape());
}

#[test]
fn late_attachment_recovers_from_missing_container() {
    let error = ResponsiveError::container_not_found();
    assert_eq!(error.fallback, Some(FallbackAction::UseViewport));

    let phase = ContainerPhase::Idle
        .transition(ContainerEvent::FallbackStarted)
        .transition(ContainerEvent::Attached { supported: true });
    assert_eq!(phase, ContainerPhase::Observing);
    assert_eq!(phase.transition(ContainerEvent::Detached), ContainerPhase::Idle);
}
