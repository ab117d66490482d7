//! World configuration, the terrain height field, and per-chunk random streams.
#![forbid(unsafe_code)]

mod config;
mod coord;
mod noise;
mod world;

pub use config::{
    Batching, ConfigError, FloraProbs, Height, Size, Trees, Water, WorldConfig,
    load_config_from_path,
};
pub use coord::ChunkCoord;
pub use noise::HeightField;
pub use world::{ColumnProfile, World};
