//! Square texture atlas addressing.
//!
//! Each voxel type owns a 4x2 block of tiles laid out as a cube net; face templates in the
//! mesher add their per-face tile offsets to the block origin returned here. The mapping has to
//! agree exactly with the supplied sheet: a mismatch shows wrong textures rather than failing.

use serde::Deserialize;

use crate::types::VoxelType;

/// Tiles per cube-net block, horizontally.
pub const NET_COLUMNS: u32 = 4;
/// Tiles per cube-net block, vertically.
pub const NET_ROWS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AtlasConfig")]
pub struct TextureAtlas {
    tile_size_px: u32,
    tiles_per_row: u32,
}

#[derive(Deserialize)]
struct AtlasConfig {
    #[serde(default = "default_tile_size_px")]
    tile_size_px: u32,
    #[serde(default = "default_tiles_per_row")]
    tiles_per_row: u32,
}

fn default_tile_size_px() -> u32 {
    16
}
fn default_tiles_per_row() -> u32 {
    16
}

impl TryFrom<AtlasConfig> for TextureAtlas {
    type Error = String;

    fn try_from(cfg: AtlasConfig) -> Result<Self, Self::Error> {
        TextureAtlas::new(cfg.tile_size_px, cfg.tiles_per_row)
    }
}

impl Default for TextureAtlas {
    fn default() -> Self {
        Self {
            tile_size_px: default_tile_size_px(),
            tiles_per_row: default_tiles_per_row(),
        }
    }
}

impl TextureAtlas {
    /// `tiles_per_row` must be a non-zero multiple of the cube-net width so no net wraps.
    pub fn new(tile_size_px: u32, tiles_per_row: u32) -> Result<Self, String> {
        if tile_size_px == 0 {
            return Err("atlas tile_size_px must be non-zero".to_string());
        }
        if tiles_per_row == 0 || tiles_per_row % NET_COLUMNS != 0 {
            return Err(format!(
                "atlas tiles_per_row must be a non-zero multiple of {NET_COLUMNS}, got {tiles_per_row}"
            ));
        }
        Ok(Self {
            tile_size_px,
            tiles_per_row,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    #[inline]
    pub fn tile_size_px(&self) -> u32 {
        self.tile_size_px
    }

    #[inline]
    pub fn tiles_per_row(&self) -> u32 {
        self.tiles_per_row
    }

    /// Width (and height) of the sheet in texels.
    #[inline]
    pub fn sheet_size_px(&self) -> u32 {
        self.tile_size_px * self.tiles_per_row
    }

    /// One tile in normalized UV units.
    #[inline]
    pub fn unit(&self) -> f32 {
        1.0 / self.tiles_per_row as f32
    }

    /// Tile index of the top-left tile of the voxel type's cube net.
    pub fn tile_index(&self, voxel: VoxelType) -> u32 {
        let first = voxel.net_slot() * NET_COLUMNS;
        let col = first % self.tiles_per_row;
        let row = (first / self.tiles_per_row) * NET_ROWS;
        row * self.tiles_per_row + col
    }

    /// Normalized UV origin of tile `i`: `(unit * (i mod n), unit * (i div n))`.
    #[inline]
    pub fn uv_origin(&self, tile: u32) -> [f32; 2] {
        let unit = self.unit();
        [
            unit * (tile % self.tiles_per_row) as f32,
            unit * (tile / self.tiles_per_row) as f32,
        ]
    }

    #[inline]
    pub fn voxel_origin(&self, voxel: VoxelType) -> [f32; 2] {
        self.uv_origin(self.tile_index(voxel))
    }
}
