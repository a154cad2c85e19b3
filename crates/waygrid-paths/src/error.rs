use std::fmt;

use waygrid_core::Point;

use crate::probe::LayerId;

/// Errors raised while configuring or building a [`CostGrid`](crate::CostGrid).
///
/// An unreachable target is not an error; it is reported through
/// [`PathResult::success`](crate::PathResult).
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Node radius must be finite and strictly positive.
    InvalidNodeRadius(f32),
    /// The world rectangle rounds to a grid with no cells.
    EmptyGrid { width: i32, height: i32 },
    /// A terrain layer was given a negative penalty.
    NegativePenalty { layer: LayerId, penalty: i32 },
    /// The obstacle proximity penalty was negative.
    NegativeObstaclePenalty(i32),
    /// A tile map line differs in width from the first line.
    InconsistentMapWidth { line: usize },
    /// A tile map contains a character with no meaning.
    InvalidTile { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeRadius(r) => write!(f, "grid: invalid node radius {r}"),
            Self::EmptyGrid { width, height } => {
                write!(f, "grid: world rounds to an empty {width}x{height} grid")
            }
            Self::NegativePenalty { layer, penalty } => {
                write!(f, "grid: layer {layer} has negative penalty {penalty}")
            }
            Self::NegativeObstaclePenalty(p) => {
                write!(f, "grid: negative obstacle proximity penalty {p}")
            }
            Self::InconsistentMapWidth { line } => {
                write!(f, "tile map: line {line} has inconsistent width")
            }
            Self::InvalidTile { ch, pos } => {
                write!(f, "tile map: invalid tile \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_offending_values() {
        let e = GridError::InvalidTile {
            ch: '?',
            pos: Point::new(3, 1),
        };
        assert_eq!(e.to_string(), "tile map: invalid tile \u{201c}?\u{201d} at (3, 1)");
        let e = GridError::NegativePenalty {
            layer: LayerId(4),
            penalty: -2,
        };
        assert!(e.to_string().contains("-2"));
    }
}
