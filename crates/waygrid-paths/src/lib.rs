//! Cost-weighted grid pathfinding.
//!
//! This crate turns a bounded world rectangle into a grid of [`Node`]s,
//! searches it with A* and hands simplified waypoint lists back to callers:
//!
//! - **[`CostGrid`]** probes the world through a [`WorldProbe`], assigns each
//!   cell a walkability flag and a movement penalty, and smooths the penalty
//!   field with a box blur.
//! - **[`PathSolver`]** runs A* over the grid using an indexed
//!   [`PriorityQueue`] as its open set, then simplifies the winning route to
//!   direction-change points.
//! - **[`PathScheduler`]** accepts requests from many callers and runs at
//!   most one solve at a time, since every solve reuses the grid's node
//!   scratch fields.
//!
//! # Example
//!
//! ```
//! use waygrid_core::Position;
//! use waygrid_paths::{CostGrid, GridSettings, PathSolver, TileWorld};
//!
//! let world = TileWorld::parse(".....\n.###.\n.....", 2.0).unwrap();
//! let settings = GridSettings::new(world.bounds(), 1.0).with_blur_radius(0);
//! let mut grid = CostGrid::build(&settings, &world).unwrap();
//! let mut solver = PathSolver::new();
//!
//! let result = solver.solve(&mut grid, Position::new(1.0, 3.0), Position::new(9.0, 3.0));
//! assert!(result.success);
//! ```

mod blur;
mod distance;
mod error;
mod grid;
mod heap;
mod node;
mod probe;
mod scheduler;
mod settings;
mod simplify;
mod solver;
mod tilemap;

pub use blur::box_blur;
pub use distance::{DIAGONAL_COST, STRAIGHT_COST, octile};
pub use error::GridError;
pub use grid::CostGrid;
pub use heap::{HeapItem, PriorityQueue};
pub use node::Node;
pub use probe::{LayerId, WorldProbe};
pub use scheduler::{Continuation, PathScheduler, RequestId, SchedulerState};
pub use settings::{DEFAULT_BLUR_RADIUS, DEFAULT_OBSTACLE_PENALTY, GridSettings, TerrainPenalty};
pub use simplify::{simplify_cells, simplify_route};
pub use solver::{PathResult, PathSolver, SolveStats};
pub use tilemap::TileWorld;
