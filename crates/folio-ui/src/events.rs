//! DOM event listeners with explicit removal.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, window};

use crate::error::{Result, UiError, js_reason};

/// A listener attached to an event target. Call [`EventListener::remove`] on
/// teardown; the handler stays registered until then.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Attach `handler` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ListenerAttach`] if the browser rejects the listener.
    pub fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| UiError::ListenerAttach {
                event: event.to_string(),
                reason: js_reason(&e),
            })?;

        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Attach `handler` to `window`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::WindowNotAvailable`] outside a browser, or
    /// [`UiError::ListenerAttach`] if attaching fails.
    pub fn on_window<F>(event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let window = window().ok_or(UiError::WindowNotAvailable)?;
        Self::attach(&window, event, handler)
    }

    #[must_use]
    pub const fn event(&self) -> &'static str {
        self.event
    }

    /// Detach the listener.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ListenerRemove`] if the browser rejects the removal.
    pub fn remove(self) -> Result<()> {
        self.target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
            .map_err(|e| UiError::ListenerRemove {
                event: self.event.to_string(),
                reason: js_reason(&e),
            })
    }
}

/// Remove every listener, logging failures.
pub fn remove_all(listeners: impl IntoIterator<Item = EventListener>) {
    for listener in listeners {
        let event = listener.event();
        if let Err(e) = listener.remove() {
            tracing::warn!(event, "{}", e);
        }
    }
}
