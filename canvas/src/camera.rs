//! Coordinate spaces: screen pixels versus each editor's logical unit.
//!
//! The floor editor works in grid cells whose pixel size follows the viewport
//! width ([`GridScale`]); the image wall works directly in pixels
//! ([`FreeSpace`]). Gestures hold their offsets in logical units, so a
//! viewport resize mid-drag never reinterprets an old delta with a stale
//! scale.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::floor::GridSize;

/// A point in either screen or logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Conversion between screen pixels and an editor's logical unit.
pub trait CoordinateSpace {
    /// Map a screen-space point into logical units (unsnapped).
    fn to_logical(&self, screen: Point) -> Point;

    /// Snap a logical position to the unit entities are stored in.
    fn snap(&self, logical: Point) -> Point;
}

/// Uniform cell-to-pixel scale for the floor grid.
///
/// The grid always fills the viewport width exactly; the canvas height is
/// `rows * cell_px` and may overflow into a vertical scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridScale {
    pub grid: GridSize,
    /// Width and height of one cell in CSS pixels.
    pub cell_px: f64,
}

impl GridScale {
    /// Fit `grid` to a viewport `viewport_width` pixels wide.
    ///
    /// Returns `None` for a zero-column grid or a width that is not a
    /// positive finite number, so callers keep their previous scale.
    #[must_use]
    pub fn fit(grid: GridSize, viewport_width: f64) -> Option<Self> {
        if grid.columns == 0 || !viewport_width.is_finite() || viewport_width <= 0.0 {
            return None;
        }
        Some(Self { grid, cell_px: viewport_width / f64::from(grid.columns) })
    }

    /// Pixel offset of a cell coordinate.
    #[must_use]
    pub fn to_pixel(&self, cell: f64) -> f64 {
        cell * self.cell_px
    }

    /// Nearest cell coordinate for a pixel offset.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_cell(&self, pixel: f64) -> i32 {
        (pixel / self.cell_px).round() as i32
    }

    /// Total canvas width in pixels (equals the fitted viewport width).
    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.to_pixel(f64::from(self.grid.columns))
    }

    /// Total canvas height in pixels; may exceed the viewport.
    #[must_use]
    pub fn canvas_height(&self) -> f64 {
        self.to_pixel(f64::from(self.grid.rows))
    }
}

impl CoordinateSpace for GridScale {
    fn to_logical(&self, screen: Point) -> Point {
        Point { x: screen.x / self.cell_px, y: screen.y / self.cell_px }
    }

    fn snap(&self, logical: Point) -> Point {
        Point { x: logical.x.round(), y: logical.y.round() }
    }
}

/// Identity space used by the image wall: one logical unit is one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreeSpace;

impl CoordinateSpace for FreeSpace {
    fn to_logical(&self, screen: Point) -> Point {
        screen
    }

    fn snap(&self, logical: Point) -> Point {
        logical
    }
}
