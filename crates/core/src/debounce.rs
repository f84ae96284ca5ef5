//! Trailing-edge debounce with an explicit cancel handle.
//!
//! Each call resets the timer; only the last call in a window fires, with that
//! call's argument. Timers come from a [`Scheduler`] so the same primitive runs
//! on browser timeouts and on the virtual clock used in tests.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use folio_core::debounce::{debounce, ManualScheduler};
//!
//! let clock = ManualScheduler::default();
//! let seen = Rc::new(Cell::new(0));
//! let sink = seen.clone();
//! let (debounced, cancel) = debounce(clock.clone(), 100, move |v: u32| sink.set(v));
//!
//! debounced.call(1);
//! debounced.call(2);
//! clock.advance(100);
//! assert_eq!(seen.get(), 2);
//!
//! debounced.call(3);
//! cancel.cancel();
//! clock.advance(100);
//! assert_eq!(seen.get(), 2);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Handle to a scheduled timer.
pub trait TimerHandle {
    /// Cancel the timer. Cancelling a timer that already fired is a no-op.
    fn cancel(self);
}

/// Source of one-shot timers.
pub trait Scheduler {
    type Handle: TimerHandle;

    /// Run `callback` once after `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

struct Shared<A, S: Scheduler> {
    scheduler: S,
    wait_ms: u32,
    callback: Box<dyn Fn(A)>,
    pending: RefCell<Option<S::Handle>>,
    generation: Cell<u64>,
    armed: Cell<bool>,
    torn_down: Cell<bool>,
}

impl<A, S: Scheduler> Shared<A, S> {
    fn disarm(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        self.armed.set(false);
        let pending = self.pending.borrow_mut().take();
        if let Some(handle) = pending {
            handle.cancel();
        }
    }
}

/// The debounced function.
pub struct Debounced<A, S: Scheduler> {
    shared: Rc<Shared<A, S>>,
}

impl<A, S: Scheduler> Clone for Debounced<A, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<A: 'static, S: Scheduler + 'static> Debounced<A, S> {
    /// Schedule `arg` for delivery, replacing any call still waiting.
    ///
    /// Ignored once the paired [`DebounceCancel`] has been used.
    pub fn call(&self, arg: A) {
        let shared = &self.shared;
        if shared.torn_down.get() {
            return;
        }

        let generation = shared.generation.get().wrapping_add(1);
        shared.generation.set(generation);
        shared.armed.set(true);

        let weak = Rc::downgrade(shared);
        let handle = shared.scheduler.schedule(
            shared.wait_ms,
            Box::new(move || {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                if shared.torn_down.get() || shared.generation.get() != generation {
                    return;
                }
                shared.armed.set(false);
                (shared.callback)(arg);
            }),
        );

        // A fired handle stays stored until the next call replaces it, so a
        // timer is never dropped from inside its own callback.
        let previous = shared.pending.borrow_mut().replace(handle);
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    /// Drop the waiting call, if any. Later calls still work.
    pub fn cancel_pending(&self) {
        self.shared.disarm();
    }

    /// True while a call is waiting for its window to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared.armed.get()
    }

    /// Configured window in milliseconds.
    #[must_use]
    pub fn wait_ms(&self) -> u32 {
        self.shared.wait_ms
    }
}

/// Teardown handle for a [`Debounced`] function.
///
/// After [`DebounceCancel::cancel`] no pending or future call is delivered.
pub struct DebounceCancel<A, S: Scheduler> {
    shared: Weak<Shared<A, S>>,
}

impl<A, S: Scheduler> DebounceCancel<A, S> {
    /// Tear down: cancel the waiting call and reject all future ones.
    pub fn cancel(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.torn_down.set(true);
            shared.disarm();
        }
    }

    /// True once torn down (or once the debounced function is gone).
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.shared
            .upgrade()
            .is_none_or(|shared| shared.torn_down.get())
    }
}

/// Build a debounced function and its cancel handle.
pub fn debounce<A, S, F>(scheduler: S, wait_ms: u32, f: F) -> (Debounced<A, S>, DebounceCancel<A, S>)
where
    A: 'static,
    S: Scheduler + 'static,
    F: Fn(A) + 'static,
{
    let shared = Rc::new(Shared {
        scheduler,
        wait_ms,
        callback: Box::new(f),
        pending: RefCell::new(None),
        generation: Cell::new(0),
        armed: Cell::new(false),
        torn_down: Cell::new(false),
    });
    let cancel = DebounceCancel {
        shared: Rc::downgrade(&shared),
    };
    (Debounced { shared }, cancel)
}

struct ManualTask {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualInner {
    now: Cell<u64>,
    next_id: Cell<u64>,
    tasks: RefCell<Vec<ManualTask>>,
}

/// Virtual-clock scheduler: timers fire only when [`ManualScheduler::advance`] is called.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<ManualInner>,
}

/// Timer handle issued by [`ManualScheduler`].
pub struct ManualTimer {
    id: u64,
    inner: Weak<ManualInner>,
}

impl TimerHandle for ManualTimer {
    fn cancel(self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.tasks.borrow_mut().retain(|task| task.id != self.id);
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualTimer {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));
        let due = self.inner.now.get().saturating_add(u64::from(delay_ms));
        self.inner
            .tasks
            .borrow_mut()
            .push(ManualTask { id, due, callback });
        ManualTimer {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl ManualScheduler {
    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.inner.now.get()
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.tasks.borrow().len()
    }

    /// Move the clock forward, firing due timers in order of due time.
    ///
    /// Timers scheduled by a callback fire in the same advance if they fall
    /// inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.now.get().saturating_add(ms);
        while let Some(task) = self.take_next_due(target) {
            self.inner.now.set(task.due);
            (task.callback)();
        }
        self.inner.now.set(target);
    }

    fn take_next_due(&self, target: u64) -> Option<ManualTask> {
        let mut tasks = self.inner.tasks.borrow_mut();
        let position = tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= target)
            .min_by_key(|(_, task)| (task.due, task.id))
            .map(|(index, _)| index)?;
        Some(tasks.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn test_burst_fires_once_with_last_argument() {
        let clock = ManualScheduler::default();
        let (calls, f) = recorder();
        let (debounced, _cancel) = debounce(clock.clone(), 150, f);

        for v in 1..=10 {
            debounced.call(v);
            clock.advance(20);
        }
        assert!(calls.borrow().is_empty());
        assert!(debounced.is_pending());

        clock.advance(150);
        assert_eq!(*calls.borrow(), vec![10]);
        assert!(!debounced.is_pending());
    }

    #[test]
    fn test_separate_windows_fire_separately() {
        let clock = ManualScheduler::default();
        let (calls, f) = recorder();
        let (debounced, _cancel) = debounce(clock.clone(), 100, f);

        debounced.call(1);
        clock.advance(100);
        debounced.call(2);
        clock.advance(100);
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_does_not_fire_before_window() {
        let clock = ManualScheduler::default();
        let (calls, f) = recorder();
        let (debounced, _cancel) = debounce(clock.clone(), 100, f);

        debounced.call(1);
        clock.advance(99);
        assert!(calls.borrow().is_empty());
        clock.advance(1);
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[test]
    fn test_replaced_timers_are_cancelled() {
        let clock = ManualScheduler::default();
        let (_calls, f) = recorder();
        let (debounced, _cancel) = debounce(clock.clone(), 100, f);

        debounced.call(1);
        debounced.call(2);
        debounced.call(3);
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn test_cancel_blocks_pending_and_future_calls() {
        let clock = ManualScheduler::default();
        let (calls, f) = recorder();
        let (debounced, cancel) = debounce(clock.clone(), 100, f);

        debounced.call(1);
        cancel.cancel();
        assert!(cancel.is_cancelled());
        assert_eq!(clock.pending(), 0);

        debounced.call(2);
        clock.advance(500);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_cancel_pending_keeps_debouncer_usable() {
        let clock = ManualScheduler::default();
        let (calls, f) = recorder();
        let (debounced, _cancel) = debounce(clock.clone(), 100, f);

        debounced.call(1);
        debounced.cancel_pending();
        clock.advance(100);
        debounced.call(2);
        clock.advance(100);
        assert_eq!(*calls.borrow(), vec![2]);
    }

    #[test]
    fn test_dropped_debouncer_never_fires() {
        let clock = ManualScheduler::default();
        let (calls, f) = recorder();
        let (debounced, cancel) = debounce(clock.clone(), 100, f);

        debounced.call(1);
        drop(debounced);
        clock.advance(100);
        assert!(calls.borrow().is_empty());
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_manual_scheduler_orders_by_due_time() {
        let clock = ManualScheduler::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(30, 'c'), (10, 'a'), (20, 'b')] {
            let order = Rc::clone(&order);
            let _timer = clock.schedule(delay, Box::new(move || order.borrow_mut().push(label)));
        }
        clock.advance(30);
        assert_eq!(*order.borrow(), vec!['a', 'b', 'c']);
        assert_eq!(clock.now(), 30);
    }
}
