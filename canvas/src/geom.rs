#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in surface-local CSS pixels.
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

    /// The origin `(0, 0)`, returned whenever a position cannot be resolved.
    #[must_use]
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Pixel dimensions of a surface or its containing layout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert a measured CSS box into whole pixels, flooring fractional sizes
    /// and clamping negatives to zero.
    #[must_use]
    pub fn from_css(width: f64, height: f64) -> Self {
        Self { width: width.max(0.0).floor() as u32, height: height.max(0.0).floor() as u32 }
    }

    /// Whether either dimension is zero.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `other` fits entirely inside `self`.
    #[must_use]
    pub fn contains(self, other: Size) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}
