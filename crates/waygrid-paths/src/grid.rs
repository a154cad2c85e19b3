use waygrid_core::{Point, Position, Range};

use crate::blur::box_blur;
use crate::error::GridError;
use crate::node::Node;
use crate::probe::WorldProbe;
use crate::settings::GridSettings;

/// The cost-weighted grid a [`PathSolver`](crate::PathSolver) searches.
///
/// Owns every [`Node`] in a flat arena indexed by `y * width + x`. The
/// dimensions are fixed when the grid is built; [`rebuild`](Self::rebuild)
/// re-probes the world into the same arena.
#[derive(Debug, Clone)]
pub struct CostGrid {
    settings: GridSettings,
    rng: Range,
    width: usize,
    nodes: Vec<Node>,
    penalty_min: i32,
    penalty_max: i32,
}

impl CostGrid {
    /// Probe `world` and build a grid according to `settings`.
    pub fn build<W: WorldProbe>(settings: &GridSettings, world: &W) -> Result<Self, GridError> {
        settings.validate()?;
        let size = settings.grid_size();
        let rng = Range::with_size(size.x, size.y);
        let origin = settings.world.bottom_left();
        let d = settings.node_diameter();
        let r = settings.node_radius;
        let nodes = rng
            .iter()
            .map(|p| {
                let center = origin + Position::new(p.x as f32 * d + r, p.y as f32 * d + r);
                Node::new(p, center)
            })
            .collect();
        let mut grid = Self {
            settings: settings.clone(),
            rng,
            width: size.x as usize,
            nodes,
            penalty_min: 0,
            penalty_max: 0,
        };
        grid.rebuild(world);
        Ok(grid)
    }

    /// Re-probe walkability and penalties from `world`, keeping the arena.
    ///
    /// Also clears all search scratch state.
    pub fn rebuild<W: WorldProbe>(&mut self, world: &W) {
        let radius = self.settings.node_radius;
        let mut raw = Vec::with_capacity(self.nodes.len());
        for node in &mut self.nodes {
            let center = node.world();
            node.walkable = !world.is_blocked(center, radius);
            let mut penalty = self.settings.penalty_for(world.terrain_at(center));
            if !node.walkable {
                penalty = penalty.saturating_add(self.settings.obstacle_proximity_penalty);
            }
            raw.push(penalty);
            node.reset_search();
        }

        let blurred = box_blur(&raw, self.width, self.height(), self.settings.blur_radius);
        self.penalty_min = blurred.iter().copied().min().unwrap_or(0);
        self.penalty_max = blurred.iter().copied().max().unwrap_or(0);
        for (node, penalty) in self.nodes.iter_mut().zip(blurred) {
            node.penalty = penalty;
        }
        log::debug!(
            "built {}x{} cost grid, penalties {}..={}",
            self.width,
            self.height(),
            self.penalty_min,
            self.penalty_max
        );
    }

    /// Clear every node's costs, parent link and queue bookkeeping.
    pub fn reset_search_state(&mut self) {
        for node in &mut self.nodes {
            node.reset_search();
        }
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// The cell rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rng.height() as usize
    }

    /// Number of cells, which is also the most nodes a search can enqueue.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    #[inline]
    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// Flat index of cell `p`, or `None` if it lies outside the grid.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width + p.x as usize)
    }

    /// Cell coordinates of flat index `idx`.
    #[inline]
    pub fn cell_of(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// Smallest and largest smoothed penalty in the grid.
    pub fn penalty_range(&self) -> (i32, i32) {
        (self.penalty_min, self.penalty_max)
    }

    /// Where a cell's penalty sits between the grid's minimum (0.0) and
    /// maximum (1.0), for shading debug views.
    pub fn penalty_shade(&self, idx: usize) -> f32 {
        let span = self.penalty_max - self.penalty_min;
        if span == 0 {
            return 0.0;
        }
        (self.nodes[idx].penalty - self.penalty_min) as f32 / span as f32
    }

    /// Append the in-bounds 8-neighbours of `idx` to `buf`.
    ///
    /// Walkability is not checked here.
    pub fn neighbors(&self, idx: usize, buf: &mut Vec<usize>) {
        let p = self.cell_of(idx);
        buf.extend(p.neighbors_8().into_iter().filter_map(|n| self.index_of(n)));
    }

    /// Cell containing world position `pos`.
    ///
    /// Positions outside the world rectangle snap to the nearest border cell.
    pub fn node_at(&self, pos: Position) -> usize {
        let (px, py) = self.settings.world.normalize(pos);
        let px = px.clamp(0.0, 1.0);
        let py = py.clamp(0.0, 1.0);
        let x = ((self.width - 1) as f32 * px).round() as i32;
        let y = ((self.height() - 1) as f32 * py).round() as i32;
        let p = self.rng.clamp(Point::new(x, y));
        p.y as usize * self.width + p.x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::LayerId;
    use crate::tilemap::TileWorld;
    use waygrid_core::WorldRect;

    fn open_world(w: f32, h: f32) -> TileWorld {
        let line = ".".repeat(w as usize);
        let map = vec![line; h as usize].join("\n");
        TileWorld::parse(&map, 1.0).unwrap()
    }

    #[test]
    fn dimensions_and_centers() {
        let world = open_world(10.0, 6.0);
        let settings = GridSettings::new(world.bounds(), 1.0).with_blur_radius(0);
        let grid = CostGrid::build(&settings, &world).unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 3));
        assert_eq!(grid.len(), 15);
        let idx = grid.index_of(Point::new(2, 1)).unwrap();
        assert_eq!(grid.node(idx).world(), Position::new(5.0, 3.0));
        assert_eq!(grid.cell_of(idx), Point::new(2, 1));
    }

    #[test]
    fn build_rejects_invalid_settings() {
        let world = open_world(4.0, 4.0);
        let settings = GridSettings::new(world.bounds(), -1.0);
        assert!(matches!(
            CostGrid::build(&settings, &world),
            Err(GridError::InvalidNodeRadius(_))
        ));
    }

    #[test]
    fn obstacles_and_terrain_set_penalties() {
        let world = TileWorld::parse("#2.", 1.0).unwrap();
        let settings = GridSettings::new(world.bounds(), 0.5)
            .with_blur_radius(0)
            .with_terrain_penalty(LayerId(2), 5)
            .with_obstacle_penalty(10);
        let grid = CostGrid::build(&settings, &world).unwrap();
        let n: Vec<_> = grid.nodes().iter().map(|n| (n.walkable(), n.penalty())).collect();
        assert_eq!(n, vec![(false, 10), (true, 5), (true, 0)]);
        assert_eq!(grid.penalty_range(), (0, 10));
        assert_eq!(grid.penalty_shade(1), 0.5);
    }

    #[test]
    fn huge_penalties_saturate_on_obstacles() {
        let mut world = TileWorld::parse("#.", 1.0).unwrap();
        world.set_layer(Point::new(0, 0), Some(LayerId(1)));
        let settings = GridSettings::new(world.bounds(), 0.5)
            .with_blur_radius(1)
            .with_terrain_penalty(LayerId(1), i32::MAX - 1)
            .with_obstacle_penalty(10);
        let grid = CostGrid::build(&settings, &world).unwrap();
        let (_, hi) = grid.penalty_range();
        assert!(hi > i32::MAX / 2);
        assert!(!grid.node(0).walkable());
    }

    #[test]
    fn blur_smooths_penalty_field() {
        let world = TileWorld::parse("...\n.#.\n...", 1.0).unwrap();
        let settings = GridSettings::new(world.bounds(), 0.5)
            .with_blur_radius(1)
            .with_obstacle_penalty(90);
        let grid = CostGrid::build(&settings, &world).unwrap();
        // Every edge-replicated 3x3 window samples the centre exactly once.
        assert!(grid.nodes().iter().all(|n| n.penalty() == 10));
        assert!(!grid.node(4).walkable());
    }

    #[test]
    fn neighbors_respect_bounds() {
        let world = open_world(3.0, 3.0);
        let settings = GridSettings::new(world.bounds(), 0.5);
        let grid = CostGrid::build(&settings, &world).unwrap();
        let mut buf = Vec::new();
        grid.neighbors(4, &mut buf);
        assert_eq!(buf.len(), 8);
        buf.clear();
        grid.neighbors(0, &mut buf);
        buf.sort_unstable();
        assert_eq!(buf, vec![1, 3, 4]);
    }

    #[test]
    fn node_at_rounds_and_clamps() {
        let world = open_world(10.0, 10.0);
        let settings = GridSettings::new(world.bounds(), 1.0);
        let grid = CostGrid::build(&settings, &world).unwrap();
        assert_eq!(grid.cell_of(grid.node_at(Position::new(1.0, 1.0))), Point::new(0, 0));
        assert_eq!(grid.cell_of(grid.node_at(Position::new(9.0, 9.0))), Point::new(4, 4));
        assert_eq!(grid.cell_of(grid.node_at(Position::new(5.0, 5.0))), Point::new(2, 2));
        assert_eq!(grid.cell_of(grid.node_at(Position::new(-50.0, 3.0))).x, 0);
        assert_eq!(grid.cell_of(grid.node_at(Position::new(80.0, 80.0))), Point::new(4, 4));
    }

    #[test]
    fn rebuild_picks_up_world_changes() {
        let mut world = open_world(4.0, 4.0);
        let settings = GridSettings::new(WorldRect::from_origin(4.0, 4.0), 0.5).with_blur_radius(0);
        let mut grid = CostGrid::build(&settings, &world).unwrap();
        assert!(grid.nodes().iter().all(Node::walkable));
        world.set_blocked(Point::new(1, 2), true);
        grid.rebuild(&world);
        let idx = grid.index_of(Point::new(1, 2)).unwrap();
        assert!(!grid.node(idx).walkable());
        assert_eq!(grid.nodes().iter().filter(|n| !n.walkable()).count(), 1);
    }
}
