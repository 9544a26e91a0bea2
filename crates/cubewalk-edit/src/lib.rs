//! Ray casting into the voxel grid and the block edits built on it.
#![forbid(unsafe_code)]

pub mod raycast;

use cubewalk_blocks::VoxelType;
use cubewalk_geom::{IVec3, Vec3};
use cubewalk_world::World;

pub use raycast::{Hit, MAX_STEPS, cast, cast_with};

/// One applied voxel write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edit {
    pub pos: IVec3,
    pub previous: VoxelType,
    pub placed: VoxelType,
}

impl Edit {
    /// Writes `previous` back. Goes through the normal write path, so dirtiness propagates.
    pub fn revert(&self, world: &mut World) {
        world.set_voxel_ivec(self.pos, self.previous);
    }
}

/// Clears the first solid voxel within `reach`.
pub fn break_voxel(world: &mut World, origin: Vec3, dir: Vec3, reach: f32) -> Option<Edit> {
    let hit = cast(world, origin, dir, reach);
    if !hit.is_hit() {
        return None;
    }
    world.set_voxel_ivec(hit.pos, VoxelType::Air);
    log::debug!("broke {} at {:?}", hit.voxel, hit.pos);
    Some(Edit {
        pos: hit.pos,
        previous: hit.voxel,
        placed: VoxelType::Air,
    })
}

/// Places `voxel` in the empty cell in front of the first solid voxel within `reach`.
///
/// Refuses Air, targets outside the world, and targets that are already solid (a ray that
/// starts inside a block).
pub fn place_voxel(
    world: &mut World,
    origin: Vec3,
    dir: Vec3,
    reach: f32,
    voxel: VoxelType,
) -> Option<Edit> {
    if voxel.is_air() {
        return None;
    }
    let hit = cast(world, origin, dir, reach);
    if !hit.is_hit() {
        return None;
    }
    let target = hit.last_pos;
    if !world.contains(target.x, target.y, target.z) {
        return None;
    }
    let previous = world.voxel_ivec(target);
    if previous.is_solid() {
        return None;
    }
    world.set_voxel_ivec(target, voxel);
    log::debug!("placed {} at {:?}", voxel, target);
    Some(Edit {
        pos: target,
        previous,
        placed: voxel,
    })
}
