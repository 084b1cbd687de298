use alloc::vec::Vec;
use core::fmt;

use visibility_tracker::{VisibilityChange, VisibilityOptions, VisibilityState, VisibilityTracker};

use crate::{Environment, EventKind, EventTarget, NodeProbe, check_capabilities, containment_chain};

/// A framework-neutral controller that ties a `visibility_tracker::VisibilityTracker` to an
/// element in a host [`Environment`].
///
/// It holds the element handle and the registered listeners, never the environment itself.
/// Adapters drive it by calling:
/// - `attach` on mount and `detach` on unmount
/// - `handle_event(now_ms)` from every registered listener
/// - `tick(now_ms)` when `deadline_ms()` elapses (or simply every frame)
pub struct VisibilityController<E: Environment> {
    tracker: VisibilityTracker,
    element: Option<E::Node>,
    listeners: Vec<E::Listener>,
}

impl<E: Environment> Default for VisibilityController<E> {
    fn default() -> Self {
        Self::new(VisibilityOptions::default())
    }
}

impl<E: Environment> VisibilityController<E> {
    pub fn new(options: VisibilityOptions) -> Self {
        Self::from_tracker(VisibilityTracker::new(options))
    }

    pub fn from_tracker(tracker: VisibilityTracker) -> Self {
        Self {
            tracker,
            element: None,
            listeners: Vec::new(),
        }
    }

    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut VisibilityTracker {
        &mut self.tracker
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(VisibilityChange, &VisibilityState) + Send + Sync + 'static>,
    ) {
        self.tracker.set_on_change(on_change);
    }

    pub fn state(&self) -> VisibilityState {
        self.tracker.state()
    }

    pub fn is_visible(&self) -> bool {
        self.tracker.is_visible()
    }

    pub fn is_attached(&self) -> bool {
        self.element.is_some()
    }

    /// The tracked element, while attached.
    pub fn element(&self) -> Option<&E::Node> {
        self.element.as_ref()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.tracker.deadline_ms()
    }

    /// Starts tracking `element`.
    ///
    /// Registers scroll listeners on the element's containment chain and on the document, a
    /// `visibilitychange` listener on the document, and a `resize` listener on the window. With
    /// `check_immediately`, runs a rate-limited check right away.
    ///
    /// If the environment lacks a window or document, logs the problem and returns `false`
    /// without registering anything.
    ///
    /// Attaching while attached is a no-op that returns `true`, even when `element` is a
    /// different node: the controller keeps tracking the element it was first attached to.
    /// To move to another element, `detach` first.
    pub fn attach(
        &mut self,
        env: &mut E,
        element: E::Node,
        check_immediately: bool,
        now_ms: u64,
    ) -> bool {
        if self.is_attached() {
            vdebug!("attach: already attached, keeping the current element");
            return true;
        }
        if let Err(err) = check_capabilities(&*env) {
            verror!(error = %err, "attach aborted");
            return false;
        }

        for node in containment_chain(&*env, &element) {
            let listener = env.add_listener(EventTarget::Node(node), EventKind::Scroll);
            self.listeners.push(listener);
        }
        let page_events = [
            (EventTarget::Document, EventKind::VisibilityChange),
            (EventTarget::Document, EventKind::Scroll),
            (EventTarget::Window, EventKind::Resize),
        ];
        for (target, kind) in page_events {
            let listener = env.add_listener(target, kind);
            self.listeners.push(listener);
        }
        vdebug!(listeners = self.listeners.len(), "attach");

        self.element = Some(element);
        if check_immediately {
            self.handle_event(env, now_ms);
        }
        true
    }

    /// Stops tracking: removes every listener, cancels the pending trailing check, and forgets
    /// the recorded state. Safe to call when not attached.
    pub fn detach(&mut self, env: &mut E) {
        if self.is_attached() {
            vdebug!(listeners = self.listeners.len(), "detach");
        }
        for listener in self.listeners.drain(..) {
            env.remove_listener(listener);
        }
        self.element = None;
        self.tracker.reset();
    }

    /// The listener body: schedules a rate-limited check. Returns the change if a check ran and
    /// something changed. Ignored while detached.
    pub fn handle_event(&mut self, env: &E, now_ms: u64) -> Option<VisibilityChange> {
        let node = self.element.as_ref()?;
        self.tracker.trigger(&NodeProbe::new(env, node), now_ms)
    }

    /// The timer body: runs the trailing check once the window has elapsed. Ignored while
    /// detached.
    pub fn tick(&mut self, env: &E, now_ms: u64) -> Option<VisibilityChange> {
        let node = self.element.as_ref()?;
        self.tracker.tick(&NodeProbe::new(env, node), now_ms)
    }

    /// Checks now, bypassing rate limiting. Returns `None` while detached.
    pub fn check_visibility(&mut self, env: &E) -> Option<VisibilityChange> {
        let node = self.element.as_ref()?;
        self.tracker.check_visibility(&NodeProbe::new(env, node))
    }
}

impl<E: Environment> fmt::Debug for VisibilityController<E>
where
    E::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityController")
            .field("tracker", &self.tracker)
            .field("element", &self.element)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
