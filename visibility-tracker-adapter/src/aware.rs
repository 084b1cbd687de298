use visibility_tracker::{VisibilityChange, VisibilityState};

use crate::{Environment, VisibilityController};

/// Visibility awareness for a host component, by composition.
///
/// The component owns a [`VisibilityController`] and exposes its root node; the provided methods
/// wire the component lifecycle to the controller and route every reported change to
/// [`VisibilityAware::visibility_changed`].
///
/// ```
/// # use visibility_tracker::{VisibilityChange, VisibilityState};
/// # use visibility_tracker_adapter::{Environment, VisibilityAware, VisibilityController};
/// struct Card<E: Environment> {
///     node: E::Node,
///     visibility: VisibilityController<E>,
///     seen: bool,
/// }
///
/// impl<E: Environment> VisibilityAware for Card<E> {
///     type Env = E;
///
///     fn root_node(&self) -> E::Node {
///         self.node.clone()
///     }
///
///     fn visibility(&self) -> &VisibilityController<E> {
///         &self.visibility
///     }
///
///     fn visibility_mut(&mut self) -> &mut VisibilityController<E> {
///         &mut self.visibility
///     }
///
///     fn visibility_changed(&mut self, change: VisibilityChange, state: &VisibilityState) {
///         if change.visibility && state.visible {
///             self.seen = true;
///         }
///     }
/// }
/// ```
pub trait VisibilityAware {
    type Env: Environment;

    /// The element whose visibility is tracked.
    fn root_node(&self) -> <Self::Env as Environment>::Node;

    fn visibility(&self) -> &VisibilityController<Self::Env>;

    fn visibility_mut(&mut self) -> &mut VisibilityController<Self::Env>;

    /// Called after a check changed the recorded state. Does nothing by default.
    fn visibility_changed(&mut self, _change: VisibilityChange, _state: &VisibilityState) {}

    /// Mount hook: attaches to the root node and checks right away.
    ///
    /// Returns `false` when the environment cannot support tracking.
    fn did_mount(&mut self, env: &mut Self::Env, now_ms: u64) -> bool {
        let node = self.root_node();
        if !self.visibility_mut().attach(env, node, false, now_ms) {
            return false;
        }
        self.on_visibility_event(env, now_ms);
        true
    }

    /// Unmount hook: detaches all listeners and cancels pending checks.
    fn will_unmount(&mut self, env: &mut Self::Env) {
        self.visibility_mut().detach(env);
    }

    /// Forward scroll/resize/visibilitychange events here.
    fn on_visibility_event(&mut self, env: &Self::Env, now_ms: u64) -> Option<VisibilityChange> {
        let change = self.visibility_mut().handle_event(env, now_ms);
        self.dispatch_visibility_change(change)
    }

    /// Forward timer ticks here.
    fn on_visibility_tick(&mut self, env: &Self::Env, now_ms: u64) -> Option<VisibilityChange> {
        let change = self.visibility_mut().tick(env, now_ms);
        self.dispatch_visibility_change(change)
    }

    #[doc(hidden)]
    fn dispatch_visibility_change(
        &mut self,
        change: Option<VisibilityChange>,
    ) -> Option<VisibilityChange> {
        let change = change?;
        let state = self.visibility().state();
        self.visibility_changed(change, &state);
        Some(change)
    }

    fn is_visible(&self) -> bool {
        self.visibility().is_visible()
    }
}
