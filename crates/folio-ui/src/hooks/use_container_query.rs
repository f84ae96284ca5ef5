//! Element-scoped size buckets backed by `ResizeObserver`.
//!
//! The hook measures whatever element is bound to its `container_ref`.
//! Without `ResizeObserver`, or before the ref is attached, it reports a
//! [`ResponsiveError`] and keeps producing dimensions from the configured
//! fallback: viewport size, or the element's bounding box polled on window
//! resize. Attaching the ref later re-runs observation.

use folio_core::container::{
    ContainerDimensions, ContainerEvent, ContainerPhase, ContainerQueryOptions, ContainerSize,
    FallbackStrategy,
};
use folio_core::debounce::{DebounceCancel, debounce};
use folio_core::{AnalyticsEvent, AnalyticsSink, Capabilities, ResponsiveError};
use leptos::html;
use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, ResizeObserver, ResizeObserverEntry, ResizeObserverSize};

use crate::analytics::{Analytics, use_analytics};
use crate::browser::{BrowserCapabilities, viewport_or_default};
use crate::error::{Result, UiError, js_reason};
use crate::events::{EventListener, remove_all};
use crate::timers::GlooScheduler;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, ResizeObserver)>;

/// Handle returned by [`use_container_query`]. Bind `container_ref` with
/// `node_ref=` on the element to measure.
#[derive(Debug, Clone, Copy)]
pub struct UseContainerQuery {
    pub container_ref: NodeRef<html::Div>,
    dimensions: RwSignal<ContainerDimensions>,
    is_supported: RwSignal<bool>,
    error: RwSignal<Option<ResponsiveError>>,
    phase: RwSignal<ContainerPhase>,
}

impl UseContainerQuery {
    #[must_use]
    pub fn dimensions(&self) -> ContainerDimensions {
        self.dimensions.get()
    }

    /// Whether `ResizeObserver` exists in this browser.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.is_supported.get()
    }

    #[must_use]
    pub fn error(&self) -> Option<ResponsiveError> {
        self.error.get()
    }

    #[must_use]
    pub fn phase(&self) -> ContainerPhase {
        self.phase.get()
    }

    #[must_use]
    pub fn dimensions_untracked(&self) -> ContainerDimensions {
        self.dimensions.get_untracked()
    }

    #[must_use]
    pub fn error_untracked(&self) -> Option<ResponsiveError> {
        self.error.get_untracked()
    }

    #[must_use]
    pub fn phase_untracked(&self) -> ContainerPhase {
        self.phase.get_untracked()
    }

    fn apply(&self, event: ContainerEvent) {
        self.phase.update(|phase| *phase = phase.transition(event));
    }
}

/// Teardown state for one observation run.
#[derive(Default)]
struct Observation {
    observer: Option<(ResizeObserver, ObserverCallback)>,
    observed: Option<DebounceCancel<(f64, f64), GlooScheduler>>,
    polled: Option<DebounceCancel<(), GlooScheduler>>,
    listeners: Vec<EventListener>,
}

impl Observation {
    fn release(self) {
        if let Some((observer, _callback)) = self.observer {
            observer.disconnect();
        }
        if let Some(cancel) = &self.observed {
            cancel.cancel();
        }
        if let Some(cancel) = &self.polled {
            cancel.cancel();
        }
        remove_all(self.listeners);
    }
}

/// Observe the element bound to the returned `container_ref`.
pub fn use_container_query(options: ContainerQueryOptions) -> UseContainerQuery {
    let handle = UseContainerQuery {
        container_ref: NodeRef::new(),
        dimensions: RwSignal::new(ContainerDimensions::default()),
        is_supported: RwSignal::new(BrowserCapabilities.supports_resize_observer()),
        error: RwSignal::new(None),
        phase: RwSignal::new(ContainerPhase::Idle),
    };
    let analytics = use_analytics();

    Effect::new(move |_| {
        let element: Option<Element> = handle.container_ref.get().map(Into::into);
        let mut observation = Observation::default();

        match element {
            Some(element) => {
                let supported = BrowserCapabilities.supports_resize_observer();
                handle.is_supported.set(supported);
                handle.apply(ContainerEvent::Attached { supported });

                if supported {
                    match observe(handle, &element, &options, &mut observation) {
                        Ok(()) => handle.error.set(None),
                        Err(e) => {
                            tracing::warn!("container observer unavailable: {}", e);
                            handle.apply(ContainerEvent::ObserverFailed);
                            let error = ResponsiveError::unsupported_feature(
                                "ResizeObserver",
                                options.fallback.action(),
                            );
                            report(handle, error, analytics.as_ref());
                            start_fallback(
                                handle,
                                options.fallback,
                                Some(element),
                                &options,
                                &mut observation,
                            );
                        }
                    }
                } else {
                    let error = ResponsiveError::unsupported_feature(
                        "ResizeObserver",
                        options.fallback.action(),
                    );
                    report(handle, error, analytics.as_ref());
                    start_fallback(
                        handle,
                        options.fallback,
                        Some(element),
                        &options,
                        &mut observation,
                    );
                }
            }
            None => {
                report(handle, ResponsiveError::container_not_found(), analytics.as_ref());
                start_fallback(
                    handle,
                    FallbackStrategy::Viewport,
                    None,
                    &options,
                    &mut observation,
                );
            }
        }

        let teardown = SendWrapper::new(observation);
        on_cleanup(move || {
            teardown.take().release();
            handle.apply(ContainerEvent::Detached);
        });
    });

    handle
}

fn report(handle: UseContainerQuery, error: ResponsiveError, analytics: Option<&Analytics>) {
    tracing::info!(kind = %error.kind, "container query fallback: {}", error.message);
    if let Some(analytics) = analytics {
        analytics.track(&AnalyticsEvent::ContainerFallback { kind: error.kind });
    }
    handle.error.set(Some(error));
}

/// Border-box size, the same box every notification reports.
fn measure_element(element: &Element) -> (f64, f64) {
    let rect = element.get_bounding_client_rect();
    (rect.width(), rect.height())
}

/// Border-box size of a notification; horizontal writing mode assumed.
/// Browsers without `borderBoxSize` fall back to the target's bounding box.
fn entry_size(entry: &ResizeObserverEntry) -> (f64, f64) {
    entry
        .border_box_size()
        .get(0)
        .dyn_into::<ResizeObserverSize>()
        .map_or_else(
            |_| measure_element(&entry.target()),
            |size| (size.inline_size(), size.block_size()),
        )
}

fn observe(
    handle: UseContainerQuery,
    element: &Element,
    options: &ContainerQueryOptions,
    observation: &mut Observation,
) -> Result<()> {
    let queries = options.queries.clone();
    let (update, cancel) = debounce(GlooScheduler, options.debounce_ms, move |(w, h)| {
        handle
            .dimensions
            .set(ContainerDimensions::measure(w, h, &queries));
    });

    let callback: ObserverCallback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: ResizeObserver| {
            let last = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<ResizeObserverEntry>().ok())
                .last();
            if let Some(entry) = last {
                update.call(entry_size(&entry));
            }
        },
    ));

    let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| UiError::ObserverCreation(js_reason(&e)))?;
    observer.observe(element);

    let (width, height) = measure_element(element);
    handle
        .dimensions
        .set(ContainerDimensions::measure(width, height, &options.queries));

    observation.observer = Some((observer, callback));
    observation.observed = Some(cancel);
    Ok(())
}

fn start_fallback(
    handle: UseContainerQuery,
    strategy: FallbackStrategy,
    element: Option<Element>,
    options: &ContainerQueryOptions,
    observation: &mut Observation,
) {
    let poll_target = match strategy {
        FallbackStrategy::ManualPoll => element,
        FallbackStrategy::Viewport => None,
    };
    let read = move || match &poll_target {
        Some(element) => measure_element(element),
        None => {
            let viewport = viewport_or_default();
            (viewport.width, viewport.height)
        }
    };

    let (width, height) = read();
    handle
        .dimensions
        .set(ContainerDimensions::measure(width, height, &options.queries));
    handle.apply(ContainerEvent::FallbackStarted);

    let queries = options.queries.clone();
    let (update, cancel) = debounce(GlooScheduler, options.debounce_ms, move |()| {
        let (width, height) = read();
        handle
            .dimensions
            .set(ContainerDimensions::measure(width, height, &queries));
    });

    match EventListener::on_window("resize", move |_| update.call(())) {
        Ok(listener) => observation.listeners.push(listener),
        Err(e) => tracing::warn!("container fallback listener unavailable: {}", e),
    }
    observation.polled = Some(cancel);
}

/// Current dimensions of a container hook.
#[must_use]
pub fn use_container_dimensions(query: UseContainerQuery) -> Signal<ContainerDimensions> {
    Signal::derive(move || query.dimensions())
}

/// Whether the container currently falls in `size`.
#[must_use]
pub fn use_container_size_matches(query: UseContainerQuery, size: ContainerSize) -> Signal<bool> {
    Signal::derive(move || query.dimensions.with(|d| d.size() == size))
}

/// Rounded width/height ratio of the container.
#[must_use]
pub fn use_container_aspect(query: UseContainerQuery) -> Signal<f64> {
    Signal::derive(move || query.dimensions.with(|d| d.aspect_ratio))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached_handle() -> UseContainerQuery {
        UseContainerQuery {
            container_ref: NodeRef::new(),
            dimensions: RwSignal::new(ContainerDimensions::measure(
                600.0,
                300.0,
                &folio_core::container::ContainerQueries::default(),
            )),
            is_supported: RwSignal::new(false),
            error: RwSignal::new(None),
            phase: RwSignal::new(ContainerPhase::Idle),
        }
    }

    #[test]
    fn test_projections_read_shared_state() {
        let owner = Owner::new();
        owner.with(|| {
            let query = detached_handle();
            assert!(use_container_size_matches(query, ContainerSize::Medium).get_untracked());
            assert!(!use_container_size_matches(query, ContainerSize::Large).get_untracked());
            assert!((use_container_aspect(query).get_untracked() - 2.0).abs() < f64::EPSILON);

            query.dimensions.set(ContainerDimensions::measure(
                900.0,
                900.0,
                &folio_core::container::ContainerQueries::default(),
            ));
            assert!(use_container_dimensions(query).get_untracked().is_large);
            assert!(use_container_size_matches(query, ContainerSize::Large).get_untracked());
        });
    }

    #[test]
    fn test_release_tears_down_observed_and_polled_updates() {
        let (observed, observed_cancel) = debounce(GlooScheduler, 50, |_: (f64, f64)| {});
        let (polled, polled_cancel) = debounce(GlooScheduler, 50, |()| {});
        let observation = Observation {
            observed: Some(observed_cancel),
            polled: Some(polled_cancel),
            ..Observation::default()
        };

        observation.release();

        // Torn-down debounces drop calls before reaching the timer.
        observed.call((320.0, 200.0));
        polled.call(());
        assert!(!observed.is_pending());
        assert!(!polled.is_pending());
    }

    #[test]
    fn test_phase_follows_fallback_events() {
        let owner = Owner::new();
        owner.with(|| {
            let query = detached_handle();
            query.apply(ContainerEvent::Attached { supported: false });
            assert_eq!(query.phase.get_untracked(), ContainerPhase::Error);
            query.apply(ContainerEvent::FallbackStarted);
            assert_eq!(query.phase.get_untracked(), ContainerPhase::Fallback);
            query.apply(ContainerEvent::Detached);
            assert_eq!(query.phase.get_untracked(), ContainerPhase::Idle);
        });
    }
}
