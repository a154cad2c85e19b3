//! Grid-space geometry: [`Point`] and [`Range`].
//!
//! A [`Point`] names one cell of a cost grid; a [`Range`] is the half-open
//! rectangle of cells the grid covers. X grows right and Y grows up, so row 0
//! is the bottom edge of the world rectangle.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// A cell coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sign: the unit step that moves toward `self` from the
    /// origin, diagonals included.
    #[inline]
    pub const fn signum(self) -> Self {
        Self::new(self.x.signum(), self.y.signum())
    }

    /// The eight surrounding cells, clockwise from north.
    pub fn neighbors_8(self) -> [Point; 8] {
        const DIRS: [(i32, i32); 8] = [
            (0, 1),
            (1, 1),
            (1, 0),
            (1, -1),
            (0, -1),
            (-1, -1),
            (-1, 0),
            (-1, 1),
        ];
        DIRS.map(|(dx, dy)| Self::new(self.x + dx, self.y + dy))
    }
}

/// Row-major: bottom row first, then left to right.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Cells `min.x..max.x` by `min.y..max.y`. Every empty range compares equal
/// to every other.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// The range spanned by two corners given in any order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// `[0, w) × [0, h)`.
    #[inline]
    pub fn with_size(w: i32, h: i32) -> Self {
        Self::new(0, 0, w, h)
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(self) -> Point {
        Point::new(self.width(), self.height())
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// The cell of this range nearest to `p`. The range must not be empty.
    #[inline]
    pub fn clamp(self, p: Point) -> Point {
        debug_assert!(!self.is_empty(), "clamp on empty range {self}");
        Point::new(
            p.x.clamp(self.min.x, self.max.x - 1),
            p.y.clamp(self.min.y, self.max.y - 1),
        )
    }

    /// Every cell, in [`Point`] order.
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
            len: self.len(),
        }
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (false, false) => self.min == other.min && self.max == other.max,
            _ => false,
        }
    }
}

impl Eq for Range {}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Iterator returned by [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
    len: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.len {
            return None;
        }
        let w = self.range.width() as usize;
        let p = Point::new((self.next % w) as i32, (self.next / w) as i32);
        self.next += 1;
        Some(self.range.min + p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RangeIter {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_round_trip() {
        let p = Point::new(-3, 8);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
