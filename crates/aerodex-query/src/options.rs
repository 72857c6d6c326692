use crate::debounce::{DEFAULT_DEBOUNCE, DEFAULT_SETTLE_GRACE, DebounceSettings};
use std::time::Duration;

/// Configuration options for a query engine.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// Number of entities revealed per page window step
    pub page_size: usize,
    /// Quiet interval before a typed term settles
    pub debounce_delay: Duration,
    /// Trailing period the settling flag stays raised after convergence
    pub settle_grace: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            debounce_delay: DEFAULT_DEBOUNCE,
            settle_grace: DEFAULT_SETTLE_GRACE,
        }
    }
}

impl QueryOptions {
    /// Set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the debounce delay.
    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    /// Set the settle grace period.
    pub fn with_settle_grace(mut self, grace: Duration) -> Self {
        self.settle_grace = grace;
        self
    }

    pub(crate) fn debounce_settings(&self) -> DebounceSettings {
        DebounceSettings {
            delay: self.debounce_delay,
            grace: self.settle_grace,
        }
    }
}
