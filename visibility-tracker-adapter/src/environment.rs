use alloc::vec::Vec;
use core::fmt;

use visibility_tracker::{ComputedStyle, Probe, Rect, Viewport};

/// The host capabilities a [`crate::VisibilityController`] needs.
///
/// In a browser this maps onto `window`, `document` and DOM elements; in other UI toolkits
/// `parent` walks the chain of scroll containers and `is_body` marks the root container.
pub trait Environment {
    /// A cheap, non-owning handle to a node in the host's layout tree.
    type Node: Clone;
    /// Whatever the host needs to remove a listener again.
    type Listener;

    /// Whether a global window (viewport, resize events) is available.
    fn has_window(&self) -> bool;
    /// Whether a global document (visibility state, document scroll) is available.
    fn has_document(&self) -> bool;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    /// `true` for the document body, where the containment walk stops.
    fn is_body(&self, node: &Self::Node) -> bool;

    fn add_listener(&mut self, target: EventTarget<Self::Node>, kind: EventKind) -> Self::Listener;
    fn remove_listener(&mut self, listener: Self::Listener);

    fn bounding_rect(&self, node: &Self::Node) -> Rect;
    fn viewport(&self) -> Viewport;
    fn computed_style(&self, node: &Self::Node) -> ComputedStyle;
    fn document_hidden(&self) -> bool;
}

/// Where a listener is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventTarget<N> {
    Node(N),
    Document,
    Window,
}

/// The events that schedule a recheck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Scroll,
    VisibilityChange,
    Resize,
}

impl EventKind {
    /// The DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::VisibilityChange => "visibilitychange",
            Self::Resize => "resize",
        }
    }
}

/// A host capability required to attach is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingCapability {
    Window,
    Document,
}

impl fmt::Display for MissingCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window => f.write_str("this environment lacks 'window' support"),
            Self::Document => f.write_str("this environment lacks 'document' support"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MissingCapability {}

/// Checks the capabilities `attach` relies on, window first.
pub fn check_capabilities<E: Environment + ?Sized>(env: &E) -> Result<(), MissingCapability> {
    if !env.has_window() {
        return Err(MissingCapability::Window);
    }
    if !env.has_document() {
        return Err(MissingCapability::Document);
    }
    Ok(())
}

/// Collects the scroll targets of `element`: the element and its ancestors, stopping before the
/// body (or at the root when no body is found).
pub fn containment_chain<E: Environment + ?Sized>(env: &E, element: &E::Node) -> Vec<E::Node> {
    let mut chain = Vec::new();
    let mut node = element.clone();
    loop {
        if env.is_body(&node) {
            break;
        }
        let parent = env.parent(&node);
        chain.push(node);
        match parent {
            Some(p) => node = p,
            None => break,
        }
    }
    chain
}

/// A [`Probe`] reading one node through an [`Environment`].
pub struct NodeProbe<'a, E: Environment + ?Sized> {
    env: &'a E,
    node: &'a E::Node,
}

impl<'a, E: Environment + ?Sized> NodeProbe<'a, E> {
    pub fn new(env: &'a E, node: &'a E::Node) -> Self {
        Self { env, node }
    }
}

impl<E: Environment + ?Sized> Probe for NodeProbe<'_, E> {
    fn bounding_rect(&self) -> Rect {
        self.env.bounding_rect(self.node)
    }

    fn viewport(&self) -> Viewport {
        self.env.viewport()
    }

    fn computed_style(&self) -> ComputedStyle {
        self.env.computed_style(self.node)
    }

    fn document_hidden(&self) -> bool {
        self.env.document_hidden()
    }
}

impl<E: Environment + ?Sized> fmt::Debug for NodeProbe<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeProbe").finish_non_exhaustive()
    }
}
