//! Debounced search-input settlement.
//!
//! The raw term a user is typing updates synchronously; the settled term —
//! the one queries actually run against — only updates once the input has
//! been quiet for the configured delay. Each new input aborts the pending
//! timer and starts a fresh one (last-write-wins), so a burst of keystrokes
//! produces exactly one settlement.
//!
//! The settling flag stays raised for a short grace period after raw and
//! settled converge, so a loading indicator does not flicker off and
//! immediately back on during trailing updates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default quiet interval before the settled value updates.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default trailing period the settling flag stays raised after convergence.
pub const DEFAULT_SETTLE_GRACE: Duration = Duration::from_millis(300);

/// Timing configuration for a [`Debouncer`].
#[derive(Debug, Clone, Copy)]
pub struct DebounceSettings {
    pub delay: Duration,
    pub grace: Duration,
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DEBOUNCE,
            grace: DEFAULT_SETTLE_GRACE,
        }
    }
}

type SettleCallback = dyn Fn(&str) + Send + Sync + 'static;

struct DebounceInner {
    raw: RwLock<String>,
    settled: RwLock<String>,
    grace_active: AtomicBool,
    timer: Mutex<Option<JoinHandle<()>>>,
    grace_timer: Mutex<Option<JoinHandle<()>>>,
    settings: DebounceSettings,
    on_settle: Box<SettleCallback>,
}

/// Stateful holder over a rapidly-changing string input.
///
/// Must be used inside a tokio runtime; timers are tokio tasks, which makes
/// them deterministic under `tokio::time::pause` in tests.
#[derive(Clone)]
pub struct Debouncer {
    inner: Arc<DebounceInner>,
}

impl Debouncer {
    /// Create a debouncer; `on_settle` runs once per actual settled-value
    /// change (not for inputs that settle back to the current value).
    pub fn new<F>(settings: DebounceSettings, on_settle: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(DebounceInner {
                raw: RwLock::new(String::new()),
                settled: RwLock::new(String::new()),
                grace_active: AtomicBool::new(false),
                timer: Mutex::new(None),
                grace_timer: Mutex::new(None),
                settings,
                on_settle: Box::new(on_settle),
            }),
        }
    }

    /// Record a new input value, restarting the pending timer.
    pub fn set(&self, value: &str) {
        let inner = &self.inner;
        *inner.raw.write().expect("raw lock poisoned") = value.to_string();

        // last-write-wins: any pending settlement for an older value dies here
        if let Some(handle) = inner.timer.lock().expect("timer lock poisoned").take() {
            handle.abort();
        }

        if *inner.settled.read().expect("settled lock poisoned") == value {
            // input converged back to the settled value; nothing to settle
            return;
        }

        let captured = value.to_string();
        let task_inner = Arc::clone(inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(task_inner.settings.delay).await;
            task_inner.settle(&captured);
        });
        *inner.timer.lock().expect("timer lock poisoned") = Some(handle);
    }

    /// The value as currently typed.
    pub fn raw(&self) -> String {
        self.inner.raw.read().expect("raw lock poisoned").clone()
    }

    /// The last settled value.
    pub fn settled(&self) -> String {
        self.inner
            .settled
            .read()
            .expect("settled lock poisoned")
            .clone()
    }

    /// True while raw and settled differ, plus the trailing grace period.
    pub fn is_settling(&self) -> bool {
        let diverged = {
            let raw = self.inner.raw.read().expect("raw lock poisoned");
            let settled = self.inner.settled.read().expect("settled lock poisoned");
            *raw != *settled
        };
        diverged || self.inner.grace_active.load(Ordering::SeqCst)
    }
}

impl DebounceInner {
    fn settle(self: Arc<Self>, value: &str) {
        {
            let mut settled = self.settled.write().expect("settled lock poisoned");
            if *settled == value {
                return;
            }
            *settled = value.to_string();
        }
        debug!(term = %value, "search term settled");
        (self.on_settle)(value);

        // hold the settling flag through the grace window; a newer
        // settlement restarts the window rather than racing this one
        self.grace_active.store(true, Ordering::SeqCst);
        if let Some(handle) = self
            .grace_timer
            .lock()
            .expect("grace timer lock poisoned")
            .take()
        {
            handle.abort();
        }
        let grace_inner = Arc::clone(&self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(grace_inner.settings.grace).await;
            grace_inner.grace_active.store(false, Ordering::SeqCst);
        });
        *self
            .grace_timer
            .lock()
            .expect("grace timer lock poisoned") = Some(handle);
    }
}

impl Drop for DebounceInner {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.lock().expect("timer lock poisoned").take() {
            handle.abort();
        }
        if let Some(handle) = self
            .grace_timer
            .lock()
            .expect("grace timer lock poisoned")
            .take()
        {
            handle.abort();
        }
    }
}
