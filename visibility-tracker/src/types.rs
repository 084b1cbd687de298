/// An element's bounding client rect, in viewport coordinates.
///
/// Values may be negative (scrolled above/left of the viewport) or exceed the viewport size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Builds a rect from an origin and a size (`x`/`y` are `left`/`top`).
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(y, y + height, x, x + width)
    }

    pub fn vertical_center(&self) -> f64 {
        self.top + (self.bottom - self.top) / 2.0
    }

    pub fn horizontal_center(&self) -> f64 {
        self.left + (self.right - self.left) / 2.0
    }

    /// Returns a copy moved by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.top + dy, self.bottom + dy, self.left + dx, self.right + dx)
    }
}

/// The visible viewport size (e.g. `innerWidth` / `innerHeight`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalHalf {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalThird {
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalHalf {
    Left,
    Right,
}

/// Vertical bucket of an element's center. Both fields are tracked as one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalPosition {
    pub half: VerticalHalf,
    pub third: VerticalThird,
}

/// Computed `display`, reduced to what visibility cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Display {
    None,
    #[default]
    Other,
}

/// Computed CSS `visibility`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CssVisibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

/// The subset of an element's computed style that affects effective visibility.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputedStyle {
    pub display: Display,
    pub opacity: f64,
    pub visibility: CssVisibility,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Other,
            opacity: 1.0,
            visibility: CssVisibility::Visible,
        }
    }
}

impl ComputedStyle {
    /// Builds a style from computed property values, as returned by `getPropertyValue`.
    ///
    /// Unparseable opacity values are treated as fully opaque, and unknown `visibility`
    /// keywords as `visible`.
    pub fn from_css(display: &str, opacity: &str, visibility: &str) -> Self {
        let display = if display.trim().eq_ignore_ascii_case("none") {
            Display::None
        } else {
            Display::Other
        };
        let opacity = opacity.trim().parse::<f64>().unwrap_or(1.0);
        let visibility = match visibility.trim() {
            v if v.eq_ignore_ascii_case("hidden") => CssVisibility::Hidden,
            v if v.eq_ignore_ascii_case("collapse") => CssVisibility::Collapse,
            _ => CssVisibility::Visible,
        };
        Self {
            display,
            opacity,
            visibility,
        }
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_visibility(mut self, visibility: CssVisibility) -> Self {
        self.visibility = visibility;
        self
    }
}
