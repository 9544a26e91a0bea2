//! Voxel type catalog and texture atlas layout.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod types;

pub use atlas::TextureAtlas;
pub use types::VoxelType;
