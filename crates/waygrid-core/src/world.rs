//! World-space geometry: [`Position`] and [`WorldRect`].

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A continuous 2D world coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Position {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// An axis-aligned world rectangle described by its center and full size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldRect {
    pub center: Position,
    pub size: Position,
}

impl WorldRect {
    /// Create a rectangle from its center and full width/height.
    #[inline]
    pub const fn new(center: Position, size: Position) -> Self {
        Self { center, size }
    }

    /// Rectangle of the given size whose bottom-left corner is the origin.
    #[inline]
    pub fn from_origin(width: f32, height: f32) -> Self {
        Self::new(
            Position::new(width / 2.0, height / 2.0),
            Position::new(width, height),
        )
    }

    /// Half the size on each axis.
    #[inline]
    pub fn extents(self) -> Position {
        self.size * 0.5
    }

    /// Minimum corner.
    #[inline]
    pub fn bottom_left(self) -> Position {
        self.center - self.extents()
    }

    /// Whether `p` lies inside the closed rectangle.
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        let min = self.bottom_left();
        let max = self.center + self.extents();
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// Map `p` to its fractional position across the rectangle.
    ///
    /// `(0, 0)` is the bottom-left corner and `(1, 1)` the top-right one;
    /// positions outside the rectangle fall outside `[0, 1]`.
    #[inline]
    pub fn normalize(self, p: Position) -> (f32, f32) {
        let rel = p - self.bottom_left();
        (rel.x / self.size.x, rel.y / self.size.y)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn world_rect_round_trip() {
        let r = WorldRect::new(Position::new(1.5, -2.0), Position::new(30.0, 20.0));
        let json = serde_json::to_string(&r).unwrap();
        let back: WorldRect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
