//! Shared helpers for the waygrid demos: random maps, actor placement and
//! plain-text route rendering.

use std::fmt;

use rand::{Rng, RngExt};
use waygrid_core::{Point, Position, Range};
use waygrid_paths::{GridSettings, LayerId, TileWorld};

/// Glyphs used for hunters, in submission order.
pub const HUNTER_GLYPHS: &[char] = &['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];
pub const TARGET_GLYPH: char = '@';
pub const ROUTE_GLYPH: char = '*';

/// Penalty per terrain digit: layer `n` costs `n * LAYER_PENALTY_STEP`.
pub const LAYER_PENALTY_STEP: i32 = 8;

/// A random world where roughly `density` of the tiles are obstacles and
/// half as many again are rough terrain on layers 1 to 3.
pub fn random_world(
    rng: &mut impl Rng,
    width: i32,
    height: i32,
    density: f64,
    tile_size: f32,
) -> TileWorld {
    let mut world = TileWorld::open(width, height, tile_size);
    for p in Range::with_size(width, height).iter() {
        let roll: f64 = rng.random_range(0.0..1.0);
        if roll < density {
            world.set_blocked(p, true);
        } else if roll < density * 1.5 {
            world.set_layer(p, Some(LayerId(rng.random_range(1..4u32))));
        }
    }
    world
}

/// Grid settings with one cell per tile and a penalty for every terrain
/// digit.
pub fn tile_settings(world: &TileWorld, blur_radius: Option<usize>) -> GridSettings {
    let mut settings = GridSettings::new(world.bounds(), world.tile_size() / 2.0);
    if let Some(r) = blur_radius {
        settings = settings.with_blur_radius(r);
    }
    (1..10u32).fold(settings, |s, l| {
        s.with_terrain_penalty(LayerId(l), l as i32 * LAYER_PENALTY_STEP)
    })
}

/// Tiles that are not obstacles.
pub fn free_tiles(world: &TileWorld) -> Vec<Point> {
    let size = world.size();
    Range::with_size(size.x, size.y)
        .iter()
        .filter(|&p| !world.is_blocked_tile(p))
        .collect()
}

/// Remove up to `n` random tiles from `pool`.
pub fn take_random(rng: &mut impl Rng, pool: &mut Vec<Point>, n: usize) -> Vec<Point> {
    let mut out = Vec::with_capacity(n);
    while out.len() < n && !pool.is_empty() {
        let i = rng.random_range(0..pool.len());
        out.push(pool.swap_remove(i));
    }
    out
}

/// Tiles visited when walking from `start` through each waypoint in unit
/// steps, excluding `start`.
pub fn trace(world: &TileWorld, start: Point, waypoints: &[Position]) -> Vec<Point> {
    let mut out = Vec::new();
    let mut cur = start;
    for w in waypoints.iter().filter_map(|&w| world.tile_at(w)) {
        while cur != w {
            cur = cur + (w - cur).signum();
            out.push(cur);
        }
    }
    out
}

/// A character buffer over a tile map, top row first.
#[derive(Debug, Clone)]
pub struct Canvas {
    rows: Vec<Vec<char>>,
}

impl Canvas {
    pub fn new(world: &TileWorld) -> Self {
        let rows = world
            .to_string()
            .lines()
            .map(|l| l.chars().collect())
            .collect();
        Self { rows }
    }

    /// Draw `ch` on tile `p`. Tiles outside the map are ignored.
    pub fn put(&mut self, p: Point, ch: char) {
        let height = self.rows.len() as i32;
        if p.y < 0 || p.y >= height || p.x < 0 {
            return;
        }
        let row = &mut self.rows[(height - 1 - p.y) as usize];
        if let Some(c) = row.get_mut(p.x as usize) {
            *c = ch;
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
