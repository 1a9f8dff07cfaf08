#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are in surface pixel units (origin at top-left, y grows
//! downward). Rectangles use `f64` so chart math can stay fractional until
//! the rasterizer decides pixel coverage.

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset the point vertically.
    #[inline]
    #[must_use]
    pub fn down(self, dy: f64) -> Self {
        Self::new(self.x, self.y + dy)
    }
}

/// Integer size of a drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Full-surface rectangle anchored at the origin.
    #[inline]
    pub fn to_rect(self) -> Rect {
        Rect::from_size(self)
    }
}

/// An axis-aligned rectangle in surface coordinates.
///
/// Width and height may be negative (a 2D canvas accepts that and draws
/// toward the opposite edge); use [`Rect::normalized`] before hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole surface of the given size.
    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, f64::from(size.width), f64::from(size.height))
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle covers no area.
    ///
    /// Non-finite components count as empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width == 0.0
            || self.height == 0.0
    }

    /// Flip negative extents so that width and height are non-negative.
    #[must_use]
    pub fn normalized(&self) -> Rect {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Rect::new(x, y, width, height)
    }

    /// Check if a point is inside the (normalized) rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        let r = self.normalized();
        point.x >= r.x && point.x < r.right() && point.y >= r.y && point.y < r.bottom()
    }

    /// Shrink by a horizontal and vertical margin on every side.
    ///
    /// Extents saturate at zero.
    #[must_use]
    pub fn inset(&self, horizontal: f64, vertical: f64) -> Rect {
        Rect::new(
            self.x + horizontal,
            self.y + vertical,
            (self.width - 2.0 * horizontal).max(0.0),
            (self.height - 2.0 * vertical).max(0.0),
        )
    }

    /// Compute the overlap of two (normalized) rectangles, `None` if disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();
        let x = a.x.max(b.x);
        let y = a.y.max(b.y);
        let right = a.right().min(b.right());
        let bottom = a.bottom().min(b.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        Rect::from_size(size)
    }
}
