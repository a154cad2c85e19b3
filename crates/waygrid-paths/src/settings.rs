use waygrid_core::{Point, WorldRect};

use crate::error::GridError;
use crate::probe::LayerId;

/// Default box-blur radius applied to the penalty field.
pub const DEFAULT_BLUR_RADIUS: usize = 3;
/// Default extra penalty for cells overlapping an obstacle.
pub const DEFAULT_OBSTACLE_PENALTY: i32 = 10;

/// Movement penalty attached to one terrain layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainPenalty {
    pub layer: LayerId,
    pub penalty: i32,
}

/// Construction parameters of a [`CostGrid`](crate::CostGrid).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSettings {
    /// World rectangle covered by the grid.
    pub world: WorldRect,
    /// Half the side length of one cell, in world units.
    pub node_radius: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_blur_radius"))]
    pub blur_radius: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub terrain_penalties: Vec<TerrainPenalty>,
    #[cfg_attr(feature = "serde", serde(default = "default_obstacle_penalty"))]
    pub obstacle_proximity_penalty: i32,
    /// Rebuild the grid from the world for every dispatched request instead
    /// of building it once.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub rebuild_each_request: bool,
}

#[cfg(feature = "serde")]
fn default_blur_radius() -> usize {
    DEFAULT_BLUR_RADIUS
}

#[cfg(feature = "serde")]
fn default_obstacle_penalty() -> i32 {
    DEFAULT_OBSTACLE_PENALTY
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl GridSettings {
    /// Settings for `world` split into cells of radius `node_radius`, with
    /// every other field at its default.
    pub fn new(world: WorldRect, node_radius: f32) -> Self {
        Self {
            world,
            node_radius,
            blur_radius: DEFAULT_BLUR_RADIUS,
            terrain_penalties: Vec::new(),
            obstacle_proximity_penalty: DEFAULT_OBSTACLE_PENALTY,
            rebuild_each_request: true,
        }
    }

    pub fn with_blur_radius(mut self, radius: usize) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Add (or replace) the penalty of a terrain layer.
    pub fn with_terrain_penalty(mut self, layer: LayerId, penalty: i32) -> Self {
        match self.terrain_penalties.iter_mut().find(|t| t.layer == layer) {
            Some(t) => t.penalty = penalty,
            None => self.terrain_penalties.push(TerrainPenalty { layer, penalty }),
        }
        self
    }

    pub fn with_obstacle_penalty(mut self, penalty: i32) -> Self {
        self.obstacle_proximity_penalty = penalty;
        self
    }

    pub fn with_rebuild_each_request(mut self, rebuild: bool) -> Self {
        self.rebuild_each_request = rebuild;
        self
    }

    /// Cell diameter in world units.
    #[inline]
    pub fn node_diameter(&self) -> f32 {
        self.node_radius * 2.0
    }

    /// Number of cells on each axis.
    pub fn grid_size(&self) -> Point {
        let d = self.node_diameter();
        Point::new(
            (self.world.size.x / d).round() as i32,
            (self.world.size.y / d).round() as i32,
        )
    }

    /// Penalty for a probed layer; unlisted layers and misses cost nothing.
    pub fn penalty_for(&self, layer: Option<LayerId>) -> i32 {
        layer
            .and_then(|l| self.terrain_penalties.iter().find(|t| t.layer == l))
            .map_or(0, |t| t.penalty)
    }

    /// Check that these settings describe a buildable grid.
    pub fn validate(&self) -> Result<(), GridError> {
        if !self.node_radius.is_finite() || self.node_radius <= 0.0 {
            return Err(GridError::InvalidNodeRadius(self.node_radius));
        }
        let size = self.grid_size();
        if size.x <= 0 || size.y <= 0 {
            return Err(GridError::EmptyGrid {
                width: size.x,
                height: size.y,
            });
        }
        if let Some(t) = self.terrain_penalties.iter().find(|t| t.penalty < 0) {
            return Err(GridError::NegativePenalty {
                layer: t.layer,
                penalty: t.penalty,
            });
        }
        if self.obstacle_proximity_penalty < 0 {
            return Err(GridError::NegativeObstaclePenalty(
                self.obstacle_proximity_penalty,
            ));
        }
        Ok(())
    }
}
