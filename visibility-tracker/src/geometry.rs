use crate::{
    ComputedStyle, CssVisibility, Display, HorizontalHalf, Rect, VerticalHalf, VerticalPosition,
    VerticalThird, Viewport, VisibilityState,
};

/// Read access to the tracked element and its surroundings.
///
/// Adapters implement this over their real UI objects. Style and document state are only read
/// when the element is geometrically visible.
pub trait Probe {
    /// The element's bounding client rect.
    fn bounding_rect(&self) -> Rect;
    /// The current viewport size.
    fn viewport(&self) -> Viewport;
    /// The element's computed style.
    fn computed_style(&self) -> ComputedStyle;
    /// Whether the document is hidden (minimized window, background tab, ...).
    fn document_hidden(&self) -> bool;
}

/// A fixed snapshot of everything a check reads. Useful for tests and for adapters that
/// already gathered the values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub rect: Rect,
    pub viewport: Viewport,
    pub style: ComputedStyle,
    pub document_hidden: bool,
}

impl Sample {
    pub fn new(rect: Rect, viewport: Viewport) -> Self {
        Self {
            rect,
            viewport,
            style: ComputedStyle::default(),
            document_hidden: false,
        }
    }

    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_document_hidden(mut self, hidden: bool) -> Self {
        self.document_hidden = hidden;
        self
    }
}

impl Probe for Sample {
    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style
    }

    fn document_hidden(&self) -> bool {
        self.document_hidden
    }
}

fn edge_inside(edge: f64, extent: f64) -> bool {
    0.0 < edge && edge < extent
}

/// `true` when the top or bottom edge lies strictly inside `(0, height)`.
///
/// A rect that overflows the viewport on both ends has neither edge inside and is not
/// vertically visible.
pub fn is_vertically_visible(rect: &Rect, viewport: &Viewport) -> bool {
    edge_inside(rect.top, viewport.height) || edge_inside(rect.bottom, viewport.height)
}

/// `true` when the left or right edge lies strictly inside `(0, width)`.
pub fn is_horizontally_visible(rect: &Rect, viewport: &Viewport) -> bool {
    edge_inside(rect.left, viewport.width) || edge_inside(rect.right, viewport.width)
}

pub fn is_geometrically_visible(rect: &Rect, viewport: &Viewport) -> bool {
    is_vertically_visible(rect, viewport) && is_horizontally_visible(rect, viewport)
}

/// Whether the style/document state hides an otherwise visible element.
pub fn is_hidden_by_style(
    style: &ComputedStyle,
    document_hidden: bool,
    zero_opacity_hides: bool,
) -> bool {
    document_hidden
        || style.display == Display::None
        || (zero_opacity_hides && style.opacity == 0.0)
        || style.visibility == CssVisibility::Hidden
}

/// Buckets the rect's vertical center into a half and a third of the viewport height.
pub fn vertical_position(rect: &Rect, viewport: &Viewport) -> VerticalPosition {
    let center = rect.vertical_center();
    let h = viewport.height;

    let half = if center < h / 2.0 {
        VerticalHalf::Top
    } else {
        VerticalHalf::Bottom
    };
    let third = if center < h / 3.0 {
        VerticalThird::Top
    } else if center < h * 2.0 / 3.0 {
        VerticalThird::Middle
    } else {
        VerticalThird::Bottom
    };

    VerticalPosition { half, third }
}

/// Buckets the rect's horizontal center into a half of the viewport width.
pub fn horizontal_half(rect: &Rect, viewport: &Viewport) -> HorizontalHalf {
    if rect.horizontal_center() < viewport.width / 2.0 {
        HorizontalHalf::Left
    } else {
        HorizontalHalf::Right
    }
}

/// Computes the full visibility state from a probe.
pub fn measure(probe: &(impl Probe + ?Sized), zero_opacity_hides: bool) -> VisibilityState {
    let rect = probe.bounding_rect();
    let viewport = probe.viewport();

    let mut visible = is_geometrically_visible(&rect, &viewport);
    if visible {
        let style = probe.computed_style();
        visible = !is_hidden_by_style(&style, probe.document_hidden(), zero_opacity_hides);
    }

    VisibilityState {
        visible,
        vertical: Some(vertical_position(&rect, &viewport)),
        horizontal: Some(horizontal_half(&rect, &viewport)),
    }
}
