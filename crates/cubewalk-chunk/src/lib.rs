//! Chunk voxel storage and terrain fill strategies.
#![forbid(unsafe_code)]

pub mod terrain;

use cubewalk_blocks::VoxelType;
use cubewalk_geom::IVec3;

pub use terrain::{TerrainParams, TerrainStrategy};

/// Dense voxel storage for one fixed-size chunk.
///
/// Storage order is `x + y*sx + z*sx*sy`. Every mutation sets `changed` and bumps
/// `revision`. Only the mesh consumer clears `changed`, and only after it has built a mesh
/// from the current contents: either directly via [`VoxelGrid::unmark_changed`] when meshing
/// runs in lockstep with edits, or via [`VoxelGrid::acknowledge`] with the revision it
/// snapshotted when meshing runs elsewhere.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    sx: usize,
    sy: usize,
    sz: usize,
    voxels: Vec<VoxelType>,
    changed: bool,
    revision: u64,
}

impl VoxelGrid {
    /// An all-Air grid. Starts out changed since it has never been meshed.
    pub fn new(sx: usize, sy: usize, sz: usize) -> Self {
        Self {
            sx,
            sy,
            sz,
            voxels: vec![VoxelType::Air; sx * sy * sz],
            changed: true,
            revision: 0,
        }
    }

    /// Builds a grid from existing contents; a wrong-length input is padded with Air or
    /// truncated to `sx*sy*sz`.
    pub fn from_voxels(sx: usize, sy: usize, sz: usize, voxels: Vec<VoxelType>) -> Self {
        let mut v = voxels;
        let expect = sx * sy * sz;
        if v.len() != expect {
            v.resize(expect, VoxelType::Air);
        }
        Self {
            sx,
            sy,
            sz,
            voxels: v,
            changed: true,
            revision: 0,
        }
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.sx, self.sy, self.sz)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.sx + z * self.sx * self.sy
    }

    #[inline]
    pub fn voxels(&self) -> &[VoxelType] {
        &self.voxels
    }

    #[inline]
    fn local(&self, x: i32, y: i32, z: i32) -> Option<(usize, usize, usize)> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.sx || y >= self.sy || z >= self.sz {
            return None;
        }
        Some((x, y, z))
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.local(x, y, z).is_some()
    }

    /// Voxel at a local coordinate, or Air outside `[0, dim)`.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> VoxelType {
        match self.local(x, y, z) {
            Some((x, y, z)) => self.voxels[self.idx(x, y, z)],
            None => VoxelType::Air,
        }
    }

    /// Stores `voxel` at a local coordinate; silently ignored outside `[0, dim)`.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, voxel: VoxelType) {
        if let Some((x, y, z)) = self.local(x, y, z) {
            self.set_local(x, y, z, voxel);
        }
    }

    /// Reads an in-range local coordinate. Panics on out-of-range input like slice indexing.
    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> VoxelType {
        self.voxels[self.idx(x, y, z)]
    }

    /// Writes an in-range local coordinate. Panics on out-of-range input like slice indexing.
    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, voxel: VoxelType) {
        let i = self.idx(x, y, z);
        self.voxels[i] = voxel;
        self.mark_changed();
    }

    #[inline]
    pub fn get_at(&self, p: IVec3) -> VoxelType {
        self.get(p.x, p.y, p.z)
    }

    #[inline]
    pub fn changed(&self) -> bool {
        self.changed
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn mark_changed(&mut self) {
        self.changed = true;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Clears the dirty flag. Call only once a mesh of the current contents has been handed off.
    #[inline]
    pub fn unmark_changed(&mut self) {
        self.changed = false;
    }

    /// Clears the dirty flag if nothing was written since `revision` was observed.
    /// Returns whether the flag was cleared.
    pub fn acknowledge(&mut self, revision: u64) -> bool {
        if self.revision == revision {
            self.changed = false;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn has_solid(&self) -> bool {
        self.voxels.iter().any(|v| v.is_solid())
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_solid()
    }

    /// Fills every cell using `strategy`. `origin` is the world position of local `(0,0,0)`;
    /// the result depends only on `seed`, `origin` and the strategy.
    pub fn generate_terrain(&mut self, origin: IVec3, seed: u64, strategy: &TerrainStrategy) {
        terrain::fill(self, origin, seed, strategy);
        self.mark_changed();
    }

    pub(crate) fn voxels_mut(&mut self) -> &mut [VoxelType] {
        &mut self.voxels
    }
}
