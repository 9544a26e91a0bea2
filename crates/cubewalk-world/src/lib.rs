//! Fixed chunk-grid world, global voxel addressing and dirty propagation.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod noise;

use std::sync::Arc;

use cubewalk_blocks::VoxelType;
use cubewalk_chunk::{TerrainStrategy, VoxelGrid};
use cubewalk_geom::{IVec3, Vec3};
use serde::Deserialize;
use thiserror::Error;

pub use chunk_coord::ChunkCoord;

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("world {what} along {axis} must be at least 1")]
    EmptyDimension { what: &'static str, axis: &'static str },
}

/// Chunk-grid size and per-chunk voxel size, both per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct WorldDims {
    #[serde(default = "default_chunks")]
    pub chunks: [usize; 3],
    #[serde(default = "default_chunk_size")]
    pub chunk_size: [usize; 3],
}

fn default_chunks() -> [usize; 3] {
    [4, 2, 4]
}
fn default_chunk_size() -> [usize; 3] {
    [32, 32, 32]
}

impl Default for WorldDims {
    fn default() -> Self {
        Self {
            chunks: default_chunks(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl WorldDims {
    pub const fn new(chunks: [usize; 3], chunk_size: [usize; 3]) -> Self {
        Self { chunks, chunk_size }
    }

    /// Cubic chunks of edge `size`.
    pub const fn cubic(chunks: [usize; 3], size: usize) -> Self {
        Self::new(chunks, [size, size, size])
    }

    pub fn validate(&self) -> Result<(), WorldError> {
        for axis in 0..3 {
            if self.chunks[axis] == 0 {
                return Err(WorldError::EmptyDimension {
                    what: "chunk count",
                    axis: AXIS_NAMES[axis],
                });
            }
            if self.chunk_size[axis] == 0 {
                return Err(WorldError::EmptyDimension {
                    what: "chunk size",
                    axis: AXIS_NAMES[axis],
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks[0] * self.chunks[1] * self.chunks[2]
    }
}

/// Splits a global coordinate into (chunk, local) along one axis.
#[derive(Clone, Copy, Debug)]
enum AxisSplit {
    /// Power-of-two chunk size.
    Shift { shift: u32, mask: i32 },
    Div { size: i32 },
}

impl AxisSplit {
    fn for_size(size: usize) -> Self {
        if size.is_power_of_two() {
            AxisSplit::Shift {
                shift: size.trailing_zeros(),
                mask: size as i32 - 1,
            }
        } else {
            AxisSplit::Div { size: size as i32 }
        }
    }

    /// Caller guarantees `v >= 0`.
    #[inline]
    fn split(self, v: i32) -> (i32, usize) {
        match self {
            AxisSplit::Shift { shift, mask } => (v >> shift, (v & mask) as usize),
            AxisSplit::Div { size } => (v / size, (v % size) as usize),
        }
    }
}

/// The whole voxel world: `chunks[0] x chunks[1] x chunks[2]` grids of `chunk_size` voxels.
///
/// Chunks sit behind `Arc` so cloning a world is a cheap snapshot. Writes go through
/// `Arc::make_mut`, so a snapshot never sees a write made after it was taken.
#[derive(Clone, Debug)]
pub struct World {
    dims: WorldDims,
    split: [AxisSplit; 3],
    grids: Vec<Arc<VoxelGrid>>,
}

impl World {
    pub fn new(dims: WorldDims) -> Result<Self, WorldError> {
        dims.validate()?;
        let [sx, sy, sz] = dims.chunk_size;
        let empty = Arc::new(VoxelGrid::new(sx, sy, sz));
        let grids = (0..dims.chunk_count()).map(|_| Arc::clone(&empty)).collect();
        Ok(Self {
            dims,
            split: dims.chunk_size.map(AxisSplit::for_size),
            grids,
        })
    }

    #[inline]
    pub fn dims(&self) -> WorldDims {
        self.dims
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.grids.len()
    }

    /// Global size in voxels along x.
    #[inline]
    pub fn width(&self) -> usize {
        self.dims.chunks[0] * self.dims.chunk_size[0]
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.chunks[1] * self.dims.chunk_size[1]
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.dims.chunks[2] * self.dims.chunk_size[2]
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.width()
            && (y as usize) < self.height()
            && (z as usize) < self.depth()
    }

    /// Flat chunk index `cx + cy*chunks_x + cz*chunks_x*chunks_y`, or None out of range.
    #[inline]
    pub fn chunk_index(&self, coord: ChunkCoord) -> Option<usize> {
        let [nx, ny, nz] = self.dims.chunks;
        if coord.cx < 0 || coord.cy < 0 || coord.cz < 0 {
            return None;
        }
        let (cx, cy, cz) = (coord.cx as usize, coord.cy as usize, coord.cz as usize);
        if cx >= nx || cy >= ny || cz >= nz {
            return None;
        }
        Some(cx + cy * nx + cz * nx * ny)
    }

    pub fn chunk(&self, cx: i32, cy: i32, cz: i32) -> Option<&VoxelGrid> {
        self.chunk_at(ChunkCoord::new(cx, cy, cz))
    }

    pub fn chunk_at(&self, coord: ChunkCoord) -> Option<&VoxelGrid> {
        self.chunk_index(coord).map(|i| self.grids[i].as_ref())
    }

    /// Mutable chunk access. Detaches the chunk from any snapshot still holding it.
    pub fn chunk_mut(&mut self, cx: i32, cy: i32, cz: i32) -> Option<&mut VoxelGrid> {
        self.chunk_mut_at(ChunkCoord::new(cx, cy, cz))
    }

    pub fn chunk_mut_at(&mut self, coord: ChunkCoord) -> Option<&mut VoxelGrid> {
        let i = self.chunk_index(coord)?;
        Some(Arc::make_mut(&mut self.grids[i]))
    }

    /// World position of the chunk's local `(0, 0, 0)`.
    #[inline]
    pub fn chunk_origin(&self, coord: ChunkCoord) -> IVec3 {
        let [sx, sy, sz] = self.dims.chunk_size;
        IVec3::new(
            coord.cx * sx as i32,
            coord.cy * sy as i32,
            coord.cz * sz as i32,
        )
    }

    /// Every chunk coordinate in grid order: x fastest, then y, then z.
    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> + use<> {
        let [nx, ny, nz] = self.dims.chunks.map(|n| n as i32);
        (0..nz).flat_map(move |cz| {
            (0..ny).flat_map(move |cy| (0..nx).map(move |cx| ChunkCoord::new(cx, cy, cz)))
        })
    }

    /// Chunks whose `changed` flag is set, in grid order.
    pub fn changed_chunks(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunk_coords()
            .zip(self.grids.iter())
            .filter(|(_, g)| g.changed())
            .map(|(c, _)| c)
    }

    /// Maps a global coordinate to its chunk and local cell, or None outside the world.
    #[inline]
    pub fn locate(&self, x: i32, y: i32, z: i32) -> Option<(ChunkCoord, [usize; 3])> {
        if !self.contains(x, y, z) {
            return None;
        }
        let (cx, lx) = self.split[0].split(x);
        let (cy, ly) = self.split[1].split(y);
        let (cz, lz) = self.split[2].split(z);
        Some((ChunkCoord::new(cx, cy, cz), [lx, ly, lz]))
    }

    /// Voxel at a global coordinate; Air outside the world.
    #[inline]
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> VoxelType {
        match self.locate(x, y, z) {
            Some((coord, [lx, ly, lz])) => match self.chunk_at(coord) {
                Some(grid) => grid.get_local(lx, ly, lz),
                None => VoxelType::Air,
            },
            None => VoxelType::Air,
        }
    }

    #[inline]
    pub fn voxel_ivec(&self, p: IVec3) -> VoxelType {
        self.voxel(p.x, p.y, p.z)
    }

    /// Voxel containing a world-space point.
    #[inline]
    pub fn voxel_at(&self, p: Vec3) -> VoxelType {
        self.voxel_ivec(p.floor())
    }

    /// Writes a voxel and marks the owning chunk changed, plus every face neighbor whose mesh
    /// reads this cell. No-op outside the world.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, voxel: VoxelType) {
        let Some((coord, [lx, ly, lz])) = self.locate(x, y, z) else {
            return;
        };
        if let Some(grid) = self.chunk_mut_at(coord) {
            grid.set_local(lx, ly, lz, voxel);
        }
        for neighbor in self.boundary_neighbors(coord, [lx, ly, lz]) {
            if let Some(grid) = self.chunk_mut_at(neighbor) {
                grid.mark_changed();
            }
        }
    }

    #[inline]
    pub fn set_voxel_ivec(&mut self, p: IVec3, voxel: VoxelType) {
        self.set_voxel(p.x, p.y, p.z, voxel);
    }

    #[inline]
    pub fn set_voxel_at(&mut self, p: Vec3, voxel: VoxelType) {
        self.set_voxel_ivec(p.floor(), voxel);
    }

    /// Chunks a write at this coordinate marks changed: the owner first, then each existing
    /// face neighbor across a boundary the cell touches. Empty outside the world.
    pub fn affected_chunks(&self, x: i32, y: i32, z: i32) -> Vec<ChunkCoord> {
        let Some((coord, local)) = self.locate(x, y, z) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(4);
        out.push(coord);
        out.extend(self.boundary_neighbors(coord, local));
        out
    }

    fn boundary_neighbors(&self, coord: ChunkCoord, local: [usize; 3]) -> Vec<ChunkCoord> {
        let mut out = Vec::new();
        for axis in 0..3 {
            let last = self.dims.chunk_size[axis] - 1;
            if local[axis] == 0 {
                let n = coord.step(axis, -1);
                if self.chunk_index(n).is_some() {
                    out.push(n);
                }
            }
            if local[axis] == last {
                let n = coord.step(axis, 1);
                if self.chunk_index(n).is_some() {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Fills every chunk with terrain. Each chunk is seeded from `seed` and its origin, so the
    /// result does not depend on iteration order.
    pub fn generate(&mut self, seed: u64, strategy: &TerrainStrategy) {
        let coords: Vec<ChunkCoord> = self.chunk_coords().collect();
        for coord in coords {
            let origin = self.chunk_origin(coord);
            if let Some(grid) = self.chunk_mut_at(coord) {
                grid.generate_terrain(origin, seed, strategy);
            }
        }
        log::info!(
            "generated {} chunks ({}x{}x{} voxels) seed={} strategy={:?}",
            self.chunk_count(),
            self.width(),
            self.height(),
            self.depth(),
            seed,
            strategy
        );
    }

    /// Clears `changed` after a mesh built in lockstep with edits has been handed off.
    pub fn mark_built(&mut self, coord: ChunkCoord) {
        let needs_clear = self.chunk_at(coord).is_some_and(|g| g.changed());
        if needs_clear {
            if let Some(grid) = self.chunk_mut_at(coord) {
                grid.unmark_changed();
            }
        }
    }

    /// Clears `changed` if the chunk is still at `revision`. Returns whether it was cleared.
    pub fn acknowledge(&mut self, coord: ChunkCoord, revision: u64) -> bool {
        let state = self.chunk_at(coord).map(|g| (g.revision(), g.changed()));
        match state {
            Some((rev, true)) if rev == revision => self
                .chunk_mut_at(coord)
                .is_some_and(|g| g.acknowledge(revision)),
            Some((rev, _)) => rev == revision,
            None => false,
        }
    }
}
