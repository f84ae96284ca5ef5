//! `requestAnimationFrame` loop with pause on hidden tabs.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::events::EventListener;

type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// RAF animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Running,
    /// Tab hidden
    Paused,
    Stopped,
}

/// Frame timing information
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// RAF timestamp (milliseconds)
    pub timestamp: f64,
    /// Time since the previous frame (milliseconds)
    pub delta: f64,
}

impl FrameTiming {
    const fn initial(timestamp: f64) -> Self {
        Self {
            timestamp,
            delta: 0.0,
        }
    }

    fn next(self, timestamp: f64) -> Self {
        Self {
            timestamp,
            delta: (timestamp - self.timestamp).max(0.0),
        }
    }
}

/// Frame-rate cap: skip frames that arrive sooner than `1000 / fps` ms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGate {
    min_interval_ms: f64,
    last_drawn: Option<f64>,
}

impl FrameGate {
    /// `fps == 0` disables the cap.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        let min_interval_ms = if fps == 0 {
            0.0
        } else {
            1000.0 / f64::from(fps)
        };
        Self {
            min_interval_ms,
            last_drawn: None,
        }
    }

    /// True if a frame at `timestamp` should be drawn. A small tolerance
    /// keeps 60 Hz displays at a 60 fps cap from dropping every other frame.
    pub fn admit(&mut self, timestamp: f64) -> bool {
        let due = self
            .last_drawn
            .is_none_or(|last| timestamp - last >= self.min_interval_ms - 1.0);
        if due {
            self.last_drawn = Some(timestamp);
        }
        due
    }
}

/// RAF animation loop errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RafError {
    #[error("failed to get window: window is not available")]
    WindowNotAvailable,

    #[error("failed to get document: document is not available")]
    DocumentNotAvailable,

    #[error("failed to request animation frame: {0}")]
    RequestFailed(String),

    #[error("failed to cancel animation frame: {0}")]
    CancelFailed(String),

    #[error("failed to add visibility listener: {0}")]
    VisibilityListenerFailed(String),

    #[error("animation callback is no longer registered")]
    ClosureMissing,
}

/// Shared loop state: pause and resume act on the same pending frame.
#[derive(Clone)]
struct LoopControl {
    window: Window,
    request_id: Rc<RefCell<Option<i32>>>,
    closure: RafClosure,
    state: RwSignal<AnimationState>,
}

impl LoopControl {
    fn pause(&self) {
        if self.state.get_untracked() == AnimationState::Running {
            self.state.set(AnimationState::Paused);
        }
    }

    /// Resume and schedule a frame if the loop went idle while paused.
    fn resume(&self) {
        if self.state.get_untracked() != AnimationState::Paused {
            return;
        }
        self.state.set(AnimationState::Running);
        if self.request_id.borrow().is_none() {
            self.schedule();
        }
    }

    fn schedule(&self) {
        match schedule_next_frame(&self.window, &self.closure) {
            Ok(id) => *self.request_id.borrow_mut() = Some(id),
            Err(e) => tracing::warn!("{}", e),
        }
    }
}

/// RAF animation handle for cleanup
pub struct AnimationHandle {
    control: LoopControl,
    visibility: Option<EventListener>,
}

impl AnimationHandle {
    /// Stop the loop, cancel the pending frame and detach the visibility
    /// listener.
    ///
    /// # Errors
    ///
    /// Returns error if cancellation fails
    pub fn stop(mut self) -> Result<(), RafError> {
        let control = &self.control;
        control.state.set(AnimationState::Stopped);

        if let Some(listener) = self.visibility.take() {
            if let Err(e) = listener.remove() {
                tracing::warn!("{}", e);
            }
        }

        let pending = control.request_id.borrow_mut().take();
        let cancelled = pending.map_or(Ok(()), |id| {
            control
                .window
                .cancel_animation_frame(id)
                .map_err(|e| RafError::CancelFailed(crate::error::js_reason(&e)))
        });

        // Break the closure's reference to itself.
        control.closure.borrow_mut().take();
        cancelled
    }
}

/// Start a RAF loop calling `render_fn` every frame.
///
/// The loop idles while the tab is hidden and resumes when it becomes
/// visible again.
///
/// # Errors
///
/// Returns error if:
/// - Window or document are not available
/// - RAF scheduling fails
/// - Visibility listener setup fails
pub fn start_animation_loop<F>(render_fn: F) -> Result<AnimationHandle, RafError>
where
    F: FnMut(FrameTiming) + 'static,
{
    let window = web_sys::window().ok_or(RafError::WindowNotAvailable)?;
    let document = window.document().ok_or(RafError::DocumentNotAvailable)?;

    let control = LoopControl {
        window,
        request_id: Rc::new(RefCell::new(None)),
        closure: Rc::new(RefCell::new(None)),
        state: RwSignal::new(AnimationState::Running),
    };

    let mut timing = None::<FrameTiming>;
    let mut render_fn = render_fn;
    let frame = control.clone();

    *control.closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        frame.request_id.borrow_mut().take();
        if frame.state.get_untracked() != AnimationState::Running {
            // Restart timing after a pause so the first frame has no huge delta.
            timing = None;
            return;
        }

        let current = timing.map_or_else(|| FrameTiming::initial(timestamp), |t| t.next(timestamp));
        timing = Some(current);
        render_fn(current);

        if frame.state.get_untracked() == AnimationState::Running {
            frame.schedule();
        }
    }) as Box<dyn FnMut(f64)>));

    let first = schedule_next_frame(&control.window, &control.closure)?;
    *control.request_id.borrow_mut() = Some(first);

    let visibility = visibility_listener(&document, control.clone())?;

    Ok(AnimationHandle {
        control,
        visibility: Some(visibility),
    })
}

fn schedule_next_frame(window: &Window, closure: &RafClosure) -> Result<i32, RafError> {
    closure
        .borrow()
        .as_ref()
        .ok_or(RafError::ClosureMissing)
        .and_then(|cb| {
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|e| RafError::RequestFailed(crate::error::js_reason(&e)))
        })
}

fn visibility_listener(
    document: &web_sys::Document,
    control: LoopControl,
) -> Result<EventListener, RafError> {
    let target = document.clone();
    EventListener::attach(document, "visibilitychange", move |_| {
        if target.hidden() {
            control.pause();
        } else {
            control.resume();
        }
    })
    .map_err(|e| RafError::VisibilityListenerFailed(e.to_string()))
}
