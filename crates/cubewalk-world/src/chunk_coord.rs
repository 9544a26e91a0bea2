use serde::{Deserialize, Serialize};

/// Position of a chunk in the world's chunk grid (not in voxels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    /// The neighbor one step along `axis` (0 = x, 1 = y, 2 = z) in direction `step`.
    #[inline]
    pub fn step(self, axis: usize, step: i32) -> Self {
        match axis {
            0 => self.offset(step, 0, 0),
            1 => self.offset(0, step, 0),
            2 => self.offset(0, 0, step),
            _ => panic!("axis index out of range: {axis}"),
        }
    }

    #[inline]
    pub fn axis(self, axis: usize) -> i32 {
        match axis {
            0 => self.cx,
            1 => self.cy,
            2 => self.cz,
            _ => panic!("axis index out of range: {axis}"),
        }
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.cx, self.cy, self.cz)
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}
