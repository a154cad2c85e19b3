use std::fmt;

use waygrid_core::Position;

/// Terrain classification returned by a [`WorldProbe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Spatial queries a [`CostGrid`](crate::CostGrid) needs from the host world.
pub trait WorldProbe {
    /// Whether a circle of `radius` around `center` overlaps an obstacle.
    fn is_blocked(&self, center: Position, radius: f32) -> bool;

    /// Terrain layer under `center`, or `None` if nothing classifiable is there.
    fn terrain_at(&self, center: Position) -> Option<LayerId>;
}

impl<W: WorldProbe + ?Sized> WorldProbe for &W {
    fn is_blocked(&self, center: Position, radius: f32) -> bool {
        (**self).is_blocked(center, radius)
    }

    fn terrain_at(&self, center: Position) -> Option<LayerId> {
        (**self).terrain_at(center)
    }
}
