use cubewalk_geom::{IVec3, Vec3};

/// The six cube faces, in the order every per-face table is indexed by.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Forward = 0,
    Backward = 1,
    Right = 2,
    Left = 3,
    Up = 4,
    Down = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Forward,
        Face::Backward,
        Face::Right,
        Face::Left,
        Face::Up,
        Face::Down,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index `[0..6)` back into a `Face`.
    ///
    /// # Panics
    /// Panics on any other index; faces are only ever produced from `Face::ALL`.
    #[inline]
    pub fn from_index(i: usize) -> Face {
        match i {
            0 => Face::Forward,
            1 => Face::Backward,
            2 => Face::Right,
            3 => Face::Left,
            4 => Face::Up,
            5 => Face::Down,
            _ => panic!("invalid face index {i}"),
        }
    }

    /// Bit of this face in a neighbor occupancy mask.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Returns the integer grid step out of this face.
    #[inline]
    pub fn delta(self) -> IVec3 {
        match self {
            Face::Forward => IVec3::new(0, 0, -1),
            Face::Backward => IVec3::new(0, 0, 1),
            Face::Right => IVec3::new(1, 0, 0),
            Face::Left => IVec3::new(-1, 0, 0),
            Face::Up => IVec3::new(0, 1, 0),
            Face::Down => IVec3::new(0, -1, 0),
        }
    }

    #[inline]
    pub fn normal(self) -> Vec3 {
        Vec3::from(self.delta())
    }

    /// Axis the face normal lies on (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn outward_axis(self) -> usize {
        match self {
            Face::Forward | Face::Backward => 2,
            Face::Right | Face::Left => 0,
            Face::Up | Face::Down => 1,
        }
    }

    #[inline]
    pub fn template(self) -> &'static FaceTemplate {
        &FACE_TEMPLATES[self.index()]
    }
}

/// Quad layout for one face of a unit cube at the origin.
#[derive(Debug)]
pub struct FaceTemplate {
    /// Corner offsets, each component 0 or 1.
    pub corners: [[i32; 3]; 4],
    /// Atlas offsets in tiles, relative to the voxel type's cube-net origin.
    pub uv_tiles: [[f32; 2]; 4],
    /// Baked directional brightness.
    pub shade: f32,
    /// Two triangles over `corners`, clockwise seen from outside the cube.
    pub indices: &'static [u32; 6],
}

pub const WINDING_A: [u32; 6] = [0, 2, 1, 0, 3, 2];
pub const WINDING_B: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub const FACE_TEMPLATES: [FaceTemplate; 6] = [
    // Forward
    FaceTemplate {
        corners: [[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]],
        uv_tiles: [[1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0]],
        shade: 0.9,
        indices: &WINDING_A,
    },
    // Backward
    FaceTemplate {
        corners: [[0, 0, 1], [0, 1, 1], [1, 1, 1], [1, 0, 1]],
        uv_tiles: [[0.0, 2.0], [0.0, 1.0], [1.0, 1.0], [1.0, 2.0]],
        shade: 0.6,
        indices: &WINDING_B,
    },
    // Right
    FaceTemplate {
        corners: [[1, 0, 0], [1, 0, 1], [1, 1, 1], [1, 1, 0]],
        uv_tiles: [[3.0, 2.0], [2.0, 2.0], [2.0, 1.0], [3.0, 1.0]],
        shade: 0.8,
        indices: &WINDING_B,
    },
    // Left
    FaceTemplate {
        corners: [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]],
        uv_tiles: [[2.0, 1.0], [3.0, 1.0], [3.0, 0.0], [2.0, 0.0]],
        shade: 0.7,
        indices: &WINDING_A,
    },
    // Up
    FaceTemplate {
        corners: [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]],
        uv_tiles: [[1.0, 1.0], [1.0, 0.0], [2.0, 0.0], [2.0, 1.0]],
        shade: 1.0,
        indices: &WINDING_A,
    },
    // Down
    FaceTemplate {
        corners: [[0, 0, 0], [0, 0, 1], [1, 0, 1], [1, 0, 0]],
        uv_tiles: [[1.0, 2.0], [1.0, 1.0], [2.0, 1.0], [2.0, 2.0]],
        shade: 0.5,
        indices: &WINDING_B,
    },
];
