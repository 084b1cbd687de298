//! A headless viewport-visibility tracker.
//!
//! For listener wiring and component lifecycle hooks, see the `visibility-tracker-adapter` crate.
//!
//! Given an element's bounding rect, the viewport size, and a little computed style, this crate
//! answers three questions and reports when any answer changes:
//! - is the element visible (on screen, and not hidden by CSS or a hidden document)?
//! - which vertical third and vertical half of the viewport holds its center?
//! - which horizontal half holds its center?
//!
//! Rechecks are rate limited with a leading check plus one trailing check per window, so a
//! burst of scroll events costs at most two measurements.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - element geometry and computed style through [`Probe`]
//! - event timestamps (`trigger`) and timer ticks (`tick`)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

pub mod geometry;
mod options;
mod rate_limit;
mod state;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

pub use geometry::{Probe, Sample};
pub use options::{OnChangeCallback, VisibilityOptions};
pub use rate_limit::{DEFAULT_RATE_LIMIT_MS, RateLimiter, rate_limit_ms, set_rate_limit_ms};
pub use state::{VisibilityChange, VisibilityState};
pub use tracker::VisibilityTracker;
pub use types::{
    ComputedStyle, CssVisibility, Display, HorizontalHalf, Rect, VerticalHalf, VerticalPosition,
    VerticalThird, Viewport,
};
