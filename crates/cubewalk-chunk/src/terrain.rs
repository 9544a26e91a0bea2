//! Terrain fill strategies.
//!
//! Any strategy is acceptable as long as it assigns exactly one voxel type to every cell and
//! is deterministic for a given seed and chunk origin.

use cubewalk_blocks::VoxelType;
use cubewalk_geom::IVec3;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use crate::VoxelGrid;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TerrainStrategy {
    /// Uniform pick over every voxel type, Air included.
    Random,
    /// Noise height field: Air above, surface type on top, random underground materials below.
    Layered(TerrainParams),
    /// Surface type on top of `thickness - 1` layers of dirt.
    Flat { thickness: i32 },
}

impl Default for TerrainStrategy {
    fn default() -> Self {
        TerrainStrategy::Layered(TerrainParams::default())
    }
}

impl TerrainStrategy {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TerrainParams {
    #[serde(default = "default_base_height")]
    pub base_height: i32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_surface")]
    pub surface: VoxelType,
    #[serde(default = "default_underground")]
    pub underground: Vec<VoxelType>,
}

fn default_base_height() -> i32 {
    24
}
fn default_amplitude() -> f32 {
    8.0
}
fn default_frequency() -> f32 {
    0.03
}
fn default_surface() -> VoxelType {
    VoxelType::Grass
}
fn default_underground() -> Vec<VoxelType> {
    VoxelType::UNDERGROUND.to_vec()
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base_height: default_base_height(),
            amplitude: default_amplitude(),
            frequency: default_frequency(),
            surface: default_surface(),
            underground: default_underground(),
        }
    }
}

/// Per-chunk RNG seed so results do not depend on chunk generation order.
fn chunk_seed(seed: u64, origin: IVec3) -> u64 {
    seed ^ (origin.x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (origin.y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ (origin.z as u64).wrapping_mul(0x1656_67B1_9E37_79F9)
}

fn noise_seed(seed: u64) -> i32 {
    (seed ^ (seed >> 32)) as i32
}

pub(crate) fn fill(grid: &mut VoxelGrid, origin: IVec3, seed: u64, strategy: &TerrainStrategy) {
    let (sx, sy, sz) = grid.dims();
    let mut rng = ChaCha8Rng::seed_from_u64(chunk_seed(seed, origin));
    match strategy {
        TerrainStrategy::Random => {
            for v in grid.voxels_mut() {
                *v = VoxelType::ALL[rng.gen_range(0..VoxelType::ALL.len())];
            }
        }
        TerrainStrategy::Flat { thickness } => {
            let top = thickness - 1;
            for z in 0..sz {
                for y in 0..sy {
                    let wy = origin.y + y as i32;
                    let voxel = if wy > top || wy < 0 {
                        VoxelType::Air
                    } else if wy == top {
                        VoxelType::Grass
                    } else {
                        VoxelType::Dirt
                    };
                    for x in 0..sx {
                        let i = grid.idx(x, y, z);
                        grid.voxels_mut()[i] = voxel;
                    }
                }
            }
        }
        TerrainStrategy::Layered(params) => {
            let mut height = FastNoiseLite::with_seed(noise_seed(seed));
            height.set_noise_type(Some(NoiseType::OpenSimplex2));
            height.set_frequency(Some(params.frequency));
            let underground: &[VoxelType] = if params.underground.is_empty() {
                &VoxelType::UNDERGROUND
            } else {
                &params.underground
            };
            for z in 0..sz {
                for x in 0..sx {
                    let wx = origin.x + x as i32;
                    let wz = origin.z + z as i32;
                    let n = height.get_noise_2d(wx as f32, wz as f32);
                    let column_top = params.base_height + (n * params.amplitude).round() as i32;
                    for y in 0..sy {
                        let wy = origin.y + y as i32;
                        let voxel = if wy > column_top {
                            VoxelType::Air
                        } else if wy == column_top {
                            params.surface
                        } else {
                            underground[rng.gen_range(0..underground.len())]
                        };
                        let i = grid.idx(x, y, z);
                        grid.voxels_mut()[i] = voxel;
                    }
                }
            }
        }
    }
}
