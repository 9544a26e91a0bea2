//! CPU meshing: per-voxel face culling, vertex AO and atlas UVs.
#![forbid(unsafe_code)]

pub mod build;
pub mod face;
pub mod mesh_build;

use cubewalk_geom::Aabb;
use cubewalk_world::{ChunkCoord, World};

pub use build::{MeshBuilder, ao_level, ao_light, corner_ao, neighbor_mask};
pub use face::{Face, FaceTemplate};
pub use mesh_build::{MeshBuild, Vertex};

/// A finished chunk mesh, ready to hand to the renderer.
#[derive(Clone, Debug)]
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    pub bbox: Aabb,
    pub build: MeshBuild,
}

/// Lockstep rebuild path: mesh every changed chunk, then clear their dirty flags.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkMesher {
    builder: MeshBuilder,
}

impl ChunkMesher {
    pub fn new(builder: MeshBuilder) -> Self {
        Self { builder }
    }

    #[inline]
    pub fn builder(&self) -> &MeshBuilder {
        &self.builder
    }

    /// Builds a mesh for each changed chunk in grid order, then marks each one built.
    pub fn rebuild_changed(&self, world: &mut World) -> Vec<ChunkMeshCPU> {
        let coords: Vec<ChunkCoord> = world.changed_chunks().collect();
        let mut out = Vec::with_capacity(coords.len());
        for coord in coords {
            if let Some(mesh) = self.builder.build(world, coord) {
                log::debug!(
                    "meshed chunk {} quads={} tris={}",
                    coord,
                    mesh.build.quad_count(),
                    mesh.build.primitive_count()
                );
                out.push(mesh);
            }
        }
        for mesh in &out {
            world.mark_built(mesh.coord);
        }
        out
    }
}
