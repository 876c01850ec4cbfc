// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation - Recurring Yield Tick

use std::cell::Cell;
use std::rc::Rc;

/// Default period between yield settlements (one minute).
pub const YIELD_TICK_INTERVAL_MS: i64 = 60_000;

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Shared cancellation flag for a single-threaded task.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

// ---------------------------------------------------------------------------
// RecurringTask
// ---------------------------------------------------------------------------

/// Fixed-interval task polled by its owner, `setInterval`-style.
///
/// A poll that finds the task overdue fires once and reschedules one interval
/// after the poll time; missed periods are not replayed.
#[derive(Debug, Clone)]
pub struct RecurringTask {
    interval_ms: i64,
    next_due_ms: i64,
    fired: u64,
    token: CancelToken,
}

impl RecurringTask {
    /// `interval_ms` must be positive; it is clamped to 1ms otherwise.
    pub fn new(interval_ms: i64, start_ms: i64) -> Self {
        let interval_ms = interval_ms.max(1);
        Self {
            interval_ms,
            next_due_ms: start_ms.saturating_add(interval_ms),
            fired: 0,
            token: CancelToken::new(),
        }
    }

    /// Returns `true` when the task should run at `now_ms`.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        if self.token.is_cancelled() || now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms = now_ms.saturating_add(self.interval_ms);
        self.fired += 1;
        true
    }

    pub fn next_due(&self) -> i64 {
        self.next_due_ms
    }

    pub fn interval(&self) -> i64 {
        self.interval_ms
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Handle that can cancel this task from elsewhere.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }
}
