//! A [`WorldProbe`] backed by a tile map, handy for tests, tools and demos.
//!
//! Maps are written as text, one line per row, top row first:
//!
//! ```text
//! ..11..
//! .##1..
//! ......
//! ```
//!
//! `#` is an obstacle, `.` plain ground, and a digit `0`–`9` ground on that
//! terrain layer. Tile `(0, 0)` is the bottom-left character.

use std::fmt;

use waygrid_core::{Point, Position, Range, WorldRect};

use crate::error::GridError;
use crate::probe::{LayerId, WorldProbe};

/// Touching an obstacle's edge does not count as overlapping it.
const CONTACT_EPSILON: f32 = 1e-4;

/// A rectangular world of square tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TileWorld {
    size: Point,
    tile_size: f32,
    blocked: Vec<bool>,
    layers: Vec<Option<LayerId>>,
}

impl TileWorld {
    /// A `width × height` world with no obstacles and no terrain.
    pub fn open(width: i32, height: i32, tile_size: f32) -> Self {
        let len = Range::with_size(width, height).len();
        Self {
            size: Point::new(width.max(0), height.max(0)),
            tile_size,
            blocked: vec![false; len],
            layers: vec![None; len],
        }
    }

    /// Parse a text map. Every line must have the same width.
    pub fn parse(s: &str, tile_size: f32) -> Result<Self, GridError> {
        let lines: Vec<&str> = s.trim().lines().map(|l| l.trim_end_matches('\r')).collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        let height = lines.len();
        let mut world = Self::open(width as i32, height as i32, tile_size);

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(GridError::InconsistentMapWidth { line: row + 1 });
            }
            let y = (height - 1 - row) as i32;
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y);
                let i = world.index(p);
                match ch {
                    '#' => world.blocked[i] = true,
                    '.' => {}
                    '0'..='9' => world.layers[i] = ch.to_digit(10).map(LayerId),
                    _ => return Err(GridError::InvalidTile { ch, pos: p }),
                }
            }
        }
        Ok(world)
    }

    /// Size in tiles.
    pub fn size(&self) -> Point {
        self.size
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// The world rectangle covered by the map, bottom-left at the origin.
    pub fn bounds(&self) -> WorldRect {
        WorldRect::from_origin(
            self.size.x as f32 * self.tile_size,
            self.size.y as f32 * self.tile_size,
        )
    }

    /// World-space center of tile `p`.
    pub fn center_of(&self, p: Point) -> Position {
        Position::new(
            (p.x as f32 + 0.5) * self.tile_size,
            (p.y as f32 + 0.5) * self.tile_size,
        )
    }

    /// Tile under world position `pos`, if inside the map.
    pub fn tile_at(&self, pos: Position) -> Option<Point> {
        let x = (pos.x / self.tile_size).floor() as i32;
        let y = (pos.y / self.tile_size).floor() as i32;
        let p = Point::new(x, y);
        self.range().contains(p).then_some(p)
    }

    pub fn is_blocked_tile(&self, p: Point) -> bool {
        self.range().contains(p) && self.blocked[self.index(p)]
    }

    pub fn layer(&self, p: Point) -> Option<LayerId> {
        if self.range().contains(p) {
            self.layers[self.index(p)]
        } else {
            None
        }
    }

    /// Mark tile `p` as an obstacle or clear it. Out-of-range tiles are ignored.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) {
        if self.range().contains(p) {
            let i = self.index(p);
            self.blocked[i] = blocked;
        }
    }

    /// Set the terrain layer of tile `p`. Out-of-range tiles are ignored.
    pub fn set_layer(&mut self, p: Point, layer: Option<LayerId>) {
        if self.range().contains(p) {
            let i = self.index(p);
            self.layers[i] = layer;
        }
    }

    fn range(&self) -> Range {
        Range::with_size(self.size.x, self.size.y)
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.size.x + p.x) as usize
    }
}

impl WorldProbe for TileWorld {
    fn is_blocked(&self, center: Position, radius: f32) -> bool {
        let ts = self.tile_size;
        let lo = Point::new(
            ((center.x - radius) / ts).floor() as i32,
            ((center.y - radius) / ts).floor() as i32,
        );
        let hi = Point::new(
            ((center.x + radius) / ts).floor() as i32,
            ((center.y + radius) / ts).floor() as i32,
        );
        Range::new(lo.x, lo.y, hi.x + 1, hi.y + 1)
            .iter()
            .filter(|&p| self.is_blocked_tile(p))
            .any(|p| {
                // Closest point of the tile square to the circle center.
                let min = Position::new(p.x as f32 * ts, p.y as f32 * ts);
                let nearest = Position::new(
                    center.x.clamp(min.x, min.x + ts),
                    center.y.clamp(min.y, min.y + ts),
                );
                nearest.distance(center) < radius - CONTACT_EPSILON
            })
    }

    fn terrain_at(&self, center: Position) -> Option<LayerId> {
        self.tile_at(center).and_then(|p| self.layer(p))
    }
}

impl fmt::Display for TileWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size.y).rev() {
            for x in 0..self.size.x {
                let p = Point::new(x, y);
                let ch = if self.is_blocked_tile(p) {
                    '#'
                } else {
                    match self.layer(p) {
                        Some(LayerId(l)) => char::from_digit(l % 10, 10).unwrap_or('.'),
                        None => '.',
                    }
                };
                write!(f, "{ch}")?;
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
