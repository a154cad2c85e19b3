use waygrid_core::Point;

/// Cost of one horizontal or vertical step.
pub const STRAIGHT_COST: i32 = 10;
/// Cost of one diagonal step (≈ 10·√2).
pub const DIAGONAL_COST: i32 = 14;

/// Octile distance between two cells: as many diagonal steps as the shorter
/// axis allows, straight steps for the rest.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * lo + STRAIGHT_COST * (hi - lo)
}
