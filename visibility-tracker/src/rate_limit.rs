use core::sync::atomic::{AtomicU64, Ordering};

/// The process-wide rate limit used when a tracker has no per-instance override.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 25;

static RATE_LIMIT_MS: AtomicU64 = AtomicU64::new(DEFAULT_RATE_LIMIT_MS);

/// Sets the process-wide rate limit.
///
/// The value is read whenever a rate-limit window opens, so it applies to every tracker's
/// future scheduling (windows already open keep their deadline).
pub fn set_rate_limit_ms(ms: u64) {
    RATE_LIMIT_MS.store(ms, Ordering::Relaxed);
}

pub fn rate_limit_ms() -> u64 {
    RATE_LIMIT_MS.load(Ordering::Relaxed)
}

/// Leading-edge plus trailing-edge rate limiting, driven by adapter timestamps.
///
/// - The first trigger in a window runs immediately and opens the window.
/// - Further triggers inside the window only mark a pending check.
/// - When the window closes, one trailing check runs if anything was pending.
///
/// The limiter never owns a timer. Adapters poll [`RateLimiter::deadline_ms`] (or call
/// `expire` every frame) the same way they would arm a one-shot timeout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimiter {
    locked: bool,
    pending: bool,
    deadline_ms: Option<u64>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// When the open window closes, if one is open.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Registers a trigger. Returns `true` when the caller should check now.
    ///
    /// A window whose deadline is strictly in the past (but was never expired) is released
    /// first; the leading check about to run supersedes its pending flag. A trigger landing on
    /// the deadline itself still counts as inside the window, so a zero-length window coalesces
    /// a same-millisecond burst into one leading and one trailing check.
    pub fn trigger(&mut self, now_ms: u64, window_ms: u64) -> bool {
        if matches!(self.deadline_ms, Some(deadline) if now_ms > deadline) {
            self.release();
        }
        if self.locked {
            self.pending = true;
            return false;
        }
        self.locked = true;
        self.deadline_ms = Some(now_ms.saturating_add(window_ms));
        true
    }

    /// Closes the window once its deadline has passed. Returns `true` when a trailing check
    /// should run.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        let pending = self.pending;
        self.release();
        pending
    }

    /// Drops any open window and pending check, like clearing the timeout.
    pub fn cancel(&mut self) {
        self.release();
    }

    fn is_due(&self, now_ms: u64) -> bool {
        debug_assert!(self.locked || !self.pending, "pending check without a lock");
        matches!(self.deadline_ms, Some(deadline) if now_ms >= deadline)
    }

    fn release(&mut self) {
        self.locked = false;
        self.pending = false;
        self.deadline_ms = None;
    }
}
