//! Viewport-aware tooltip positioning.
//!
//! The tooltip sits below-right of the pointer and flips to the other side
//! of an axis when it would overflow and there is room on that side.

use serde::Serialize;

/// Gap between the pointer and the tooltip
pub const DEFAULT_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True if `other` lies entirely inside `self`
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

/// Places a tooltip of known size inside a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacer {
    margin: f64,
}

impl Default for TooltipPlacer {
    fn default() -> Self {
        Self { margin: DEFAULT_MARGIN }
    }
}

impl TooltipPlacer {
    pub fn new(margin: f64) -> Self {
        Self { margin: margin.max(0.0) }
    }

    /// Top-left corner for the tooltip.
    ///
    /// Fully on-screen whenever the viewport is at least the tooltip size
    /// plus two margins and the pointer is inside it. A smaller viewport
    /// pins the tooltip to the top/left edge.
    pub fn place(&self, pointer: Point, tooltip: Size, viewport: Size) -> Point {
        Point::new(
            place_axis(pointer.x, tooltip.width, viewport.width, self.margin),
            place_axis(pointer.y, tooltip.height, viewport.height, self.margin),
        )
    }

    /// Position next to the centre of `anchor` when no pointer is available
    pub fn place_at_anchor(&self, anchor: Rect, tooltip: Size, viewport: Size) -> Point {
        self.place(anchor.center(), tooltip, viewport)
    }
}

/// `place` with the default margin
pub fn place(pointer: Point, tooltip: Size, viewport: Size) -> Point {
    TooltipPlacer::default().place(pointer, tooltip, viewport)
}

fn place_axis(pointer: f64, extent: f64, viewport: f64, margin: f64) -> f64 {
    let mut pos = pointer + margin;
    if pos + extent > viewport && pointer > extent {
        pos = pointer - extent - margin;
    }
    let limit = viewport - extent;
    // Also catches NaN limits from non-finite sizes
    if !(limit >= 0.0) || !pos.is_finite() {
        return 0.0;
    }
    pos.clamp(0.0, limit)
}
