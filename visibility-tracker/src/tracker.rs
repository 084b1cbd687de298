use alloc::sync::Arc;

use crate::geometry::{Probe, measure};
use crate::{RateLimiter, VisibilityChange, VisibilityOptions, VisibilityState};

/// A headless viewport-visibility tracker for a single element.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold the element. Each call receives a [`Probe`] that reads geometry on demand.
/// - It does not own timers. Adapters pass timestamps to [`VisibilityTracker::trigger`] and
///   [`VisibilityTracker::tick`], and use [`VisibilityTracker::deadline_ms`] to know when the
///   trailing check is due.
///
/// For listener wiring and component lifecycle hooks, see the `visibility-tracker-adapter` crate.
#[derive(Clone, Debug)]
pub struct VisibilityTracker {
    options: VisibilityOptions,
    state: VisibilityState,
    limiter: RateLimiter,
    checks: u64,
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new(VisibilityOptions::default())
    }
}

impl VisibilityTracker {
    pub fn new(options: VisibilityOptions) -> Self {
        vdebug!(
            rate_limit_ms = ?options.rate_limit_ms,
            zero_opacity_hides = options.zero_opacity_hides,
            "VisibilityTracker::new"
        );
        Self {
            options,
            state: VisibilityState::INITIAL,
            limiter: RateLimiter::new(),
            checks: 0,
        }
    }

    pub fn options(&self) -> &VisibilityOptions {
        &self.options
    }

    /// Replaces the options. The recorded state and any open window are kept.
    pub fn set_options(&mut self, options: VisibilityOptions) {
        self.options = options;
    }

    pub fn update_options(&mut self, f: impl FnOnce(&mut VisibilityOptions)) {
        f(&mut self.options);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(VisibilityChange, &VisibilityState) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Sets (or clears, with `None`) this tracker's rate-limit override.
    pub fn set_rate_limit_ms(&mut self, rate_limit_ms: Option<u64>) {
        self.options.rate_limit_ms = rate_limit_ms;
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// When the trailing check of the open window is due, if a window is open.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.limiter.deadline_ms()
    }

    /// Number of geometry checks run since creation (or the last [`Self::reset`]).
    pub fn check_count(&self) -> u64 {
        self.checks
    }

    /// Measures the element now, bypassing rate limiting.
    ///
    /// If visibility or a bucket differs from the recorded state, the state is updated first and
    /// then `on_change` fires. Returns the change, or `None` when nothing differed.
    pub fn check_visibility(&mut self, probe: &(impl Probe + ?Sized)) -> Option<VisibilityChange> {
        self.checks = self.checks.saturating_add(1);
        let next = measure(probe, self.options.zero_opacity_hides);
        let change = self.state.diff(&next);
        if !change.any() {
            vtrace!(visible = next.visible, "check_visibility: unchanged");
            return None;
        }

        vdebug!(
            visible = next.visible,
            visibility_changed = change.visibility,
            vertical_changed = change.vertical,
            horizontal_changed = change.horizontal,
            "check_visibility: changed"
        );
        self.state = next;
        if let Some(cb) = &self.options.on_change {
            cb(change, &self.state);
        }
        Some(change)
    }

    /// Handles a scroll/resize/visibility event at `now_ms`.
    ///
    /// Checks immediately when no window is open and opens one; otherwise marks a trailing check
    /// as pending.
    pub fn trigger(
        &mut self,
        probe: &(impl Probe + ?Sized),
        now_ms: u64,
    ) -> Option<VisibilityChange> {
        let window_ms = self.options.effective_rate_limit_ms();
        if self.limiter.trigger(now_ms, window_ms) {
            vtrace!(now_ms, window_ms, "trigger: leading check");
            self.check_visibility(probe)
        } else {
            vtrace!(now_ms, "trigger: deferred");
            None
        }
    }

    /// Advances time. Closes an elapsed window and runs the trailing check if one is pending.
    pub fn tick(&mut self, probe: &(impl Probe + ?Sized), now_ms: u64) -> Option<VisibilityChange> {
        if self.limiter.expire(now_ms) {
            vtrace!(now_ms, "tick: trailing check");
            self.check_visibility(probe)
        } else {
            None
        }
    }

    /// Drops the open window and any pending trailing check.
    pub fn cancel_pending(&mut self) {
        self.limiter.cancel();
    }

    /// Cancels pending work and forgets the recorded state.
    pub fn reset(&mut self) {
        self.limiter.cancel();
        self.state = VisibilityState::INITIAL;
        self.checks = 0;
    }
}
