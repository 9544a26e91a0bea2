use cubewalk_blocks::{TextureAtlas, VoxelType};
use cubewalk_geom::{Aabb, IVec3, Vec3};
use cubewalk_world::noise::gradient_noise;
use cubewalk_world::{ChunkCoord, World};

use crate::face::Face;
use crate::mesh_build::{MeshBuild, Vertex};
use crate::ChunkMeshCPU;

const ALL_FACES_MASK: u8 = 0b11_1111;

/// Occlusion level of one face corner, 0 (darkest) to 3 (open).
///
/// Both sides solid hides the corner cell entirely, so the level is 0 whatever the corner holds.
#[inline]
pub fn ao_level(side1: bool, side2: bool, corner: bool) -> u8 {
    if side1 && side2 {
        return 0;
    }
    3 - (side1 as u8 + side2 as u8 + corner as u8)
}

/// Brightness multiplier for an occlusion level.
#[inline]
pub fn ao_light(level: u8) -> f32 {
    (level as f32 / 3.0 + 0.1).min(1.0)
}

/// One bit per face (see [`Face::bit`]), set where the neighbor across that face is solid.
#[inline]
pub fn neighbor_mask(world: &World, p: IVec3) -> u8 {
    Face::ALL.into_iter().fold(0, |mask, f| {
        if world.voxel_ivec(p + f.delta()).is_solid() {
            mask | f.bit()
        } else {
            mask
        }
    })
}

/// Occlusion level at corner `corner` (template order) of `face` on the voxel at `p`.
///
/// The three cells inspected sit in the layer just outside the face: two sharing an edge with
/// the corner, one diagonal.
pub fn corner_ao(world: &World, p: IVec3, face: Face, corner: usize) -> u8 {
    let [cx, cy, cz] = face.template().corners[corner];
    let dir = IVec3::new(cx * 2 - 1, cy * 2 - 1, cz * 2 - 1);
    let out = face.outward_axis();
    let mut side1 = dir;
    *side1.axis_mut((out + 2) % 3) = 0;
    let mut side2 = dir;
    *side2.axis_mut((out + 1) % 3) = 0;
    ao_level(
        world.voxel_ivec(p + side1).is_solid(),
        world.voxel_ivec(p + side2).is_solid(),
        world.voxel_ivec(p + dir).is_solid(),
    )
}

#[inline]
fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Turns chunk voxels into culled, AO-shaded, atlas-textured quads.
///
/// Reads go through the [`World`] so faces and occlusion at chunk borders see the neighbor
/// chunk. The builder never touches dirty flags.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshBuilder {
    atlas: TextureAtlas,
}

impl MeshBuilder {
    pub fn new(atlas: TextureAtlas) -> Self {
        Self { atlas }
    }

    #[inline]
    pub fn atlas(&self) -> &TextureAtlas {
        &self.atlas
    }

    /// Meshes one chunk. None if `coord` is outside the chunk grid.
    pub fn build(&self, world: &World, coord: ChunkCoord) -> Option<ChunkMeshCPU> {
        let mut build = MeshBuild::default();
        if !self.build_into(&mut build, world, coord) {
            return None;
        }
        let origin = world.chunk_origin(coord);
        let [sx, sy, sz] = world.dims().chunk_size;
        let min = Vec3::from(origin);
        let max = min + Vec3::new(sx as f32, sy as f32, sz as f32);
        Some(ChunkMeshCPU {
            coord,
            bbox: Aabb::new(min, max),
            build,
        })
    }

    /// Rebuilds into `out`, reusing its capacity. Returns false (leaving `out` cleared) when
    /// `coord` is outside the chunk grid.
    pub fn build_into(&self, out: &mut MeshBuild, world: &World, coord: ChunkCoord) -> bool {
        out.clear_keep_capacity();
        let Some(grid) = world.chunk_at(coord) else {
            return false;
        };
        let origin = world.chunk_origin(coord);
        let (sx, sy, sz) = grid.dims();
        for z in 0..sz {
            for y in 0..sy {
                for x in 0..sx {
                    let voxel = grid.get_local(x, y, z);
                    if voxel.is_air() {
                        continue;
                    }
                    let p = origin + IVec3::new(x as i32, y as i32, z as i32);
                    let mask = neighbor_mask(world, p);
                    if mask == ALL_FACES_MASK {
                        continue;
                    }
                    self.emit_voxel(out, world, p, voxel, mask);
                }
            }
        }
        true
    }

    fn emit_voxel(&self, out: &mut MeshBuild, world: &World, p: IVec3, voxel: VoxelType, mask: u8) {
        let variance = gradient_noise(p.x, p.y, p.z) * 0.2 + 0.8;
        let [u0, v0] = self.atlas.voxel_origin(voxel);
        let unit = self.atlas.unit();
        let base = Vec3::from(p);
        out.reserve_quads((!mask & ALL_FACES_MASK).count_ones() as usize);

        for face in Face::ALL {
            if mask & face.bit() != 0 {
                continue;
            }
            let t = face.template();
            let mut ao = [0u8; 4];
            let mut quad = [Vertex::default(); 4];
            for i in 0..4 {
                ao[i] = corner_ao(world, p, face, i);
                let c = quantize(t.shade * variance * ao_light(ao[i]));
                let [cx, cy, cz] = t.corners[i];
                let [tu, tv] = t.uv_tiles[i];
                quad[i] = Vertex {
                    pos: [base.x + cx as f32, base.y + cy as f32, base.z + cz as f32],
                    color: [c, c, c, 255],
                    uv: [u0 + tu * unit, v0 + tv * unit],
                };
            }
            // Split along the diagonal joining the brighter pair.
            if ao[0] as u16 + ao[2] as u16 <= ao[1] as u16 + ao[3] as u16 {
                quad = [quad[3], quad[0], quad[1], quad[2]];
            }
            out.push_quad(quad, t.indices);
        }
    }
}
