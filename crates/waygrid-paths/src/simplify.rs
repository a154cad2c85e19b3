use waygrid_core::{Point, Position};

use crate::grid::CostGrid;

/// Reduce a cell-by-cell route to the cells where its direction changes.
///
/// The start cell is never kept; the final cell always is. A route that runs
/// in one straight or diagonal line therefore collapses to its last cell.
/// Walking from the start toward each kept cell in unit steps of
/// `(target - current).signum()` reproduces the full route.
pub fn simplify_cells(route: &[Point]) -> Vec<Point> {
    let mut out = Vec::new();
    let Some(&last) = route.last() else {
        return out;
    };
    let mut prev_dir = Point::ZERO;
    for (i, pair) in route.windows(2).enumerate() {
        let dir = pair[1] - pair[0];
        if dir != prev_dir && i > 0 {
            out.push(pair[0]);
        }
        prev_dir = dir;
    }
    out.push(last);
    out
}

/// [`simplify_cells`] over arena indices, mapped to world positions.
pub fn simplify_route(grid: &CostGrid, route: &[usize]) -> Vec<Position> {
    let cells: Vec<Point> = route.iter().map(|&i| grid.cell_of(i)).collect();
    simplify_cells(&cells)
        .into_iter()
        .filter_map(|p| grid.index_of(p))
        .map(|i| grid.node(i).world())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Re-walk simplified waypoints from `start` in unit steps.
    fn expand(start: Point, waypoints: &[Point]) -> Vec<Point> {
        let mut out = vec![start];
        let mut cur = start;
        for &w in waypoints {
            while cur != w {
                cur = cur + (w - cur).signum();
                out.push(cur);
            }
        }
        out
    }

    #[test]
    fn diagonal_run_collapses_to_end() {
        let route = pts(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(simplify_cells(&route), pts(&[(4, 4)]));
    }

    #[test]
    fn keeps_turn_cells() {
        let route = pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (3, 3)]);
        assert_eq!(simplify_cells(&route), pts(&[(2, 0), (2, 2), (3, 3)]));
        assert_eq!(expand(route[0], &simplify_cells(&route)), route);
    }

    #[test]
    fn trivial_routes() {
        assert!(simplify_cells(&[]).is_empty());
        assert_eq!(simplify_cells(&pts(&[(2, 3)])), pts(&[(2, 3)]));
        assert_eq!(simplify_cells(&pts(&[(2, 3), (3, 3)])), pts(&[(3, 3)]));
    }

    #[test]
    fn zigzag_keeps_every_corner() {
        let route = pts(&[(0, 0), (1, 1), (2, 0), (3, 1), (4, 0)]);
        assert_eq!(simplify_cells(&route), pts(&[(1, 1), (2, 0), (3, 1), (4, 0)]));
        assert_eq!(expand(route[0], &simplify_cells(&route)), route);
    }
}
