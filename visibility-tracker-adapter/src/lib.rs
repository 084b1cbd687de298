//! Adapter utilities for the `visibility-tracker` crate.
//!
//! The `visibility-tracker` crate is UI-agnostic and focuses on the geometry, state, and rate
//! limiting. This crate provides the host-facing pieces a UI layer needs:
//!
//! - [`Environment`]: the window/document/node capabilities the tracker reads and listens to
//! - [`VisibilityController`]: attach/detach lifecycle, listener registration over the element's
//!   containment chain, and event/timer entry points
//! - [`VisibilityAware`]: mount/unmount hooks and a `visibility_changed` callback for components
//!
//! This crate is intentionally framework-agnostic (no DOM or toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod aware;
mod controller;
mod environment;


pub use aware::VisibilityAware;
pub use controller::VisibilityController;
pub use environment::{
    Environment, EventKind, EventTarget, MissingCapability, NodeProbe, check_capabilities,
    containment_chain,
};

pub use visibility_tracker::{
    DEFAULT_RATE_LIMIT_MS, VisibilityChange, VisibilityOptions, VisibilityState, rate_limit_ms,
    set_rate_limit_ms,
};
