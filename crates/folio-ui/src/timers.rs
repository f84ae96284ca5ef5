//! [`Scheduler`] over `gloo-timers`.

use folio_core::debounce::{Scheduler, TimerHandle};
use gloo_timers::callback::Timeout;

/// Schedules callbacks with `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooScheduler;

/// A pending `setTimeout`; dropping it clears the timer.
#[derive(Debug)]
pub struct GlooTimer(Timeout);

impl TimerHandle for GlooTimer {
    fn cancel(self) {
        drop(self.0.cancel());
    }
}

impl Scheduler for GlooScheduler {
    type Handle = GlooTimer;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> GlooTimer {
        GlooTimer(Timeout::new(delay_ms, callback))
    }
}
