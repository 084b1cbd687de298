use crate::{HorizontalHalf, VerticalHalf, VerticalPosition, VerticalThird};

/// The last recorded visibility of a tracked element.
///
/// Buckets are `None` until the first check runs. After that, the enums guarantee exactly one
/// vertical half, one vertical third, and one horizontal half.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityState {
    pub visible: bool,
    pub vertical: Option<VerticalPosition>,
    pub horizontal: Option<HorizontalHalf>,
}

impl VisibilityState {
    /// The state before any check: not visible, buckets undefined.
    pub const INITIAL: Self = Self {
        visible: false,
        vertical: None,
        horizontal: None,
    };

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn top_half(&self) -> bool {
        matches!(self.vertical, Some(p) if p.half == VerticalHalf::Top)
    }

    pub fn bottom_half(&self) -> bool {
        matches!(self.vertical, Some(p) if p.half == VerticalHalf::Bottom)
    }

    pub fn top_third(&self) -> bool {
        matches!(self.vertical, Some(p) if p.third == VerticalThird::Top)
    }

    pub fn middle_third(&self) -> bool {
        matches!(self.vertical, Some(p) if p.third == VerticalThird::Middle)
    }

    pub fn bottom_third(&self) -> bool {
        matches!(self.vertical, Some(p) if p.third == VerticalThird::Bottom)
    }

    pub fn left_half(&self) -> bool {
        self.horizontal == Some(HorizontalHalf::Left)
    }

    pub fn right_half(&self) -> bool {
        self.horizontal == Some(HorizontalHalf::Right)
    }

    /// Compares `next` against `self` axis by axis.
    pub fn diff(&self, next: &Self) -> VisibilityChange {
        VisibilityChange {
            visibility: self.visible != next.visible,
            vertical: self.vertical != next.vertical,
            horizontal: self.horizontal != next.horizontal,
        }
    }
}

/// Which parts of [`VisibilityState`] changed during a check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityChange {
    pub visibility: bool,
    pub vertical: bool,
    pub horizontal: bool,
}

impl VisibilityChange {
    pub fn any(&self) -> bool {
        self.visibility || self.vertical || self.horizontal
    }

    /// Combines two changes observed back to back.
    pub fn merge(self, other: Self) -> Self {
        Self {
            visibility: self.visibility || other.visibility,
            vertical: self.vertical || other.vertical,
            horizontal: self.horizontal || other.horizontal,
        }
    }
}
