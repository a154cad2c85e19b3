//! Geometry primitives shared by the waygrid crates.
//!
//! Two coordinate spaces meet in a pathfinding grid: integer cell
//! coordinates ([`Point`], [`Range`]) and continuous world coordinates
//! ([`Position`], [`WorldRect`]). This crate provides both and nothing else.

pub mod geom;
pub mod world;

pub use geom::{Point, Range};
pub use world::{Position, WorldRect};
