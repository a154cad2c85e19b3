use std::time::{Duration, Instant};

use waygrid_core::Position;

use crate::distance::octile;
use crate::grid::CostGrid;
use crate::heap::PriorityQueue;
use crate::simplify::simplify_route;

/// Outcome of one path search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Simplified waypoints from just after the start to the end cell.
    /// Empty when `success` is false.
    pub waypoints: Vec<Position>,
    pub success: bool,
}

impl PathResult {
    /// No route exists, or an endpoint is unwalkable.
    pub fn failure() -> Self {
        Self {
            waypoints: Vec::new(),
            success: false,
        }
    }

    pub fn found(waypoints: Vec<Position>) -> Self {
        Self {
            waypoints,
            success: true,
        }
    }
}

/// Counters from the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Nodes popped from the open set.
    pub expanded: usize,
    pub elapsed: Duration,
}

/// A* search over a [`CostGrid`].
///
/// Keeps its open set and closed-set stamps between searches so repeated
/// solves on grids of the same size do not allocate.
#[derive(Debug, Clone)]
pub struct PathSolver {
    open: PriorityQueue,
    closed: Vec<u32>,
    generation: u32,
    nbuf: Vec<usize>,
    stats: SolveStats,
}

impl Default for PathSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSolver {
    pub fn new() -> Self {
        Self {
            open: PriorityQueue::with_capacity(0),
            closed: Vec::new(),
            generation: 0,
            nbuf: Vec::with_capacity(8),
            stats: SolveStats::default(),
        }
    }

    /// Statistics of the last call to [`solve`](Self::solve) or
    /// [`find_route`](Self::find_route).
    pub fn last_stats(&self) -> SolveStats {
        self.stats
    }

    /// Find a path between two world positions and simplify it.
    ///
    /// Positions outside the grid snap to the nearest border cell. If the
    /// start and end fall in the same cell the result holds that cell alone.
    pub fn solve(&mut self, grid: &mut CostGrid, start: Position, end: Position) -> PathResult {
        let bounds = grid.settings().world;
        if !bounds.contains(start) || !bounds.contains(end) {
            log::warn!("path request {start} -> {end} leaves the world, snapping to border");
        }
        let start_idx = grid.node_at(start);
        let end_idx = grid.node_at(end);
        match self.find_route(grid, start_idx, end_idx) {
            Some(route) => {
                log::debug!(
                    "path found in {:?}: {} cells, {} nodes expanded",
                    self.stats.elapsed,
                    route.len(),
                    self.stats.expanded
                );
                PathResult::found(simplify_route(grid, &route))
            }
            None => PathResult::failure(),
        }
    }

    /// Run A* between two cells and return the full route, start to end
    /// inclusive, or `None` when no walkable 8-connected path exists.
    pub fn find_route(
        &mut self,
        grid: &mut CostGrid,
        start: usize,
        end: usize,
    ) -> Option<Vec<usize>> {
        let started = Instant::now();
        self.stats = SolveStats::default();

        if !grid.node(start).walkable() || !grid.node(end).walkable() {
            log::trace!(
                "no path: endpoint unwalkable ({} -> {})",
                grid.cell_of(start),
                grid.cell_of(end)
            );
            return None;
        }

        self.prepare(grid);
        let generation = self.generation;
        let goal = grid.cell_of(end);

        {
            let nodes = grid.nodes_mut();
            let n = &mut nodes[start];
            n.parent = start;
            n.g_cost = 0;
            n.h_cost = octile(n.cell(), goal);
            self.open.push(nodes, start);
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let found = loop {
            let Some(current) = self.open.pop_best(grid.nodes_mut()) else {
                break false;
            };
            self.closed[current] = generation;
            self.stats.expanded += 1;
            if current == end {
                break true;
            }

            nbuf.clear();
            grid.neighbors(current, &mut nbuf);

            let nodes = grid.nodes_mut();
            let current_g = nodes[current].g_cost;
            let current_cell = nodes[current].cell();
            for &ni in &nbuf {
                if !nodes[ni].walkable || self.closed[ni] == generation {
                    continue;
                }
                let cell = nodes[ni].cell();
                let tentative = current_g
                    .saturating_add(octile(current_cell, cell))
                    .saturating_add(nodes[ni].penalty);
                let in_open = self.open.contains(nodes, ni);
                if tentative >= nodes[ni].g_cost && in_open {
                    continue;
                }
                let n = &mut nodes[ni];
                n.g_cost = tentative;
                n.h_cost = octile(cell, goal);
                n.parent = current;
                if in_open {
                    self.open.update_after_improvement(nodes, ni);
                } else {
                    self.open.push(nodes, ni);
                }
            }
        };
        self.nbuf = nbuf;
        // Leftover open entries index this grid; drop them before another
        // grid is searched.
        self.open.clear(grid.nodes_mut());
        self.stats.elapsed = started.elapsed();

        if !found {
            log::trace!(
                "no path: open set exhausted after {} nodes ({} -> {})",
                self.stats.expanded,
                grid.cell_of(start),
                goal
            );
            return None;
        }

        let mut route = vec![end];
        let mut ci = end;
        while ci != start {
            ci = grid.node(ci).parent();
            route.push(ci);
        }
        route.reverse();
        Some(route)
    }

    /// Size the scratch buffers for `grid` and wipe the previous search.
    fn prepare(&mut self, grid: &mut CostGrid) {
        let len = grid.len();
        self.open.reserve_capacity(len);
        if self.closed.len() < len {
            self.closed.resize(len, 0);
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.closed.fill(0);
            self.generation = 1;
        }
        grid.reset_search_state();
    }
}
