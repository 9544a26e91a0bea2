use std::path::Path;

use cubewalk_blocks::TextureAtlas;
use cubewalk_chunk::TerrainStrategy;
use cubewalk_runtime::RuntimeConfig;
use cubewalk_world::{WorldDims, WorldError};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Everything `cubewalk.toml` can set. Missing sections and fields fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub terrain: TerrainStrategy,
    #[serde(default)]
    pub atlas: TextureAtlas,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub demo: DemoSection,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_chunks")]
    pub chunks: [usize; 3],
    #[serde(default = "default_chunk_size")]
    pub chunk_size: [usize; 3],
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_chunks() -> [usize; 3] {
    WorldDims::default().chunks
}
fn default_chunk_size() -> [usize; 3] {
    WorldDims::default().chunk_size
}
fn default_seed() -> u64 {
    1337
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            chunks: default_chunks(),
            chunk_size: default_chunk_size(),
            seed: default_seed(),
        }
    }
}

impl WorldSection {
    pub fn dims(&self) -> Result<WorldDims, WorldError> {
        let dims = WorldDims::new(self.chunks, self.chunk_size);
        dims.validate()?;
        Ok(dims)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DemoSection {
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    #[serde(default = "default_reach")]
    pub reach: f32,
    /// Where interaction rays start; the middle of the world, high up, when unset.
    #[serde(default)]
    pub eye: Option<[f32; 3]>,
}

fn default_ticks() -> u32 {
    32
}
fn default_reach() -> f32 {
    64.0
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            reach: default_reach(),
            eye: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = toml::from_str(s)?;
        cfg.world.dims()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
