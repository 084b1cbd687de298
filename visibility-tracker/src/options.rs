use alloc::sync::Arc;

use crate::{VisibilityChange, VisibilityState};

/// A callback fired after a check that changed the recorded state.
///
/// It receives the change flags and the new state.
pub type OnChangeCallback = Arc<dyn Fn(VisibilityChange, &VisibilityState) + Send + Sync>;

/// Configuration for [`crate::VisibilityTracker`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
#[derive(Clone)]
pub struct VisibilityOptions {
    /// Per-tracker rate limit. `None` follows the process-wide value
    /// ([`crate::rate_limit_ms`]) each time a window opens.
    pub rate_limit_ms: Option<u64>,

    /// Whether a computed opacity of exactly zero makes the element invisible.
    ///
    /// Set to `false` to reproduce trackers that compared the raw computed-style string against
    /// a number and so never matched.
    pub zero_opacity_hides: bool,

    pub on_change: Option<OnChangeCallback>,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityOptions {
    pub fn new() -> Self {
        Self {
            rate_limit_ms: None,
            zero_opacity_hides: true,
            on_change: None,
        }
    }

    pub fn with_rate_limit_ms(mut self, rate_limit_ms: Option<u64>) -> Self {
        self.rate_limit_ms = rate_limit_ms;
        self
    }

    pub fn with_zero_opacity_hides(mut self, zero_opacity_hides: bool) -> Self {
        self.zero_opacity_hides = zero_opacity_hides;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(VisibilityChange, &VisibilityState) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    /// The window length to use right now.
    pub fn effective_rate_limit_ms(&self) -> u64 {
        self.rate_limit_ms.unwrap_or_else(crate::rate_limit_ms)
    }
}

impl core::fmt::Debug for VisibilityOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityOptions")
            .field("rate_limit_ms", &self.rate_limit_ms)
            .field("zero_opacity_hides", &self.zero_opacity_hides)
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}
