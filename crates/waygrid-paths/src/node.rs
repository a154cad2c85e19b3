use std::cmp::Ordering;

use waygrid_core::{Point, Position};

use crate::heap::HeapItem;

/// One grid cell and its search scratch state.
///
/// `cell` and `world` never change after construction. Walkability and
/// penalty are rewritten by every grid rebuild; costs, parent and queue
/// bookkeeping by every solve.
#[derive(Debug, Clone)]
pub struct Node {
    cell: Point,
    world: Position,
    pub(crate) walkable: bool,
    pub(crate) penalty: i32,
    pub(crate) g_cost: i32,
    pub(crate) h_cost: i32,
    pub(crate) parent: usize,
    heap_index: usize,
    enqueued: bool,
}

impl Node {
    pub(crate) fn new(cell: Point, world: Position) -> Self {
        Self {
            cell,
            world,
            walkable: true,
            penalty: 0,
            g_cost: 0,
            h_cost: 0,
            parent: usize::MAX,
            heap_index: 0,
            enqueued: false,
        }
    }

    /// Grid coordinates.
    #[inline]
    pub fn cell(&self) -> Point {
        self.cell
    }

    /// World-space center of the cell.
    #[inline]
    pub fn world(&self) -> Position {
        self.world
    }

    #[inline]
    pub fn walkable(&self) -> bool {
        self.walkable
    }

    /// Smoothed movement penalty paid for entering this cell.
    #[inline]
    pub fn penalty(&self) -> i32 {
        self.penalty
    }

    #[inline]
    pub fn g_cost(&self) -> i32 {
        self.g_cost
    }

    #[inline]
    pub fn h_cost(&self) -> i32 {
        self.h_cost
    }

    #[inline]
    pub fn f_cost(&self) -> i32 {
        self.g_cost.saturating_add(self.h_cost)
    }

    /// Arena index of the node this one was reached from. The start node of
    /// a solve points at itself.
    #[inline]
    pub fn parent(&self) -> usize {
        self.parent
    }

    pub(crate) fn reset_search(&mut self) {
        self.g_cost = 0;
        self.h_cost = 0;
        self.parent = usize::MAX;
        self.heap_index = 0;
        self.enqueued = false;
    }
}

impl HeapItem for Node {
    #[inline]
    fn heap_index(&self) -> usize {
        self.heap_index
    }

    #[inline]
    fn set_heap_index(&mut self, index: usize) {
        self.heap_index = index;
    }

    #[inline]
    fn is_enqueued(&self) -> bool {
        self.enqueued
    }

    #[inline]
    fn set_enqueued(&mut self, enqueued: bool) {
        self.enqueued = enqueued;
    }

    /// Lower `f` first; on a tie, the node closer to the goal.
    fn priority_cmp(&self, other: &Self) -> Ordering {
        self.f_cost()
            .cmp(&other.f_cost())
            .then(self.h_cost.cmp(&other.h_cost))
    }
}
