use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub water: Water,
    #[serde(default)]
    pub flora: FloraProbs,
    #[serde(default)]
    pub trees: Trees,
    #[serde(default)]
    pub batching: Batching,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: Size::default(),
            height: Height::default(),
            water: Water::default(),
            flora: FloraProbs::default(),
            trees: Trees::default(),
            batching: Batching::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Size {
    /// World extent, in chunks per horizontal axis.
    #[serde(default = "default_world_size")]
    pub world_size: usize,
    /// Chunk width and depth in blocks.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Vertical extent of every column, in blocks.
    #[serde(default = "default_world_height")]
    pub world_height: usize,
}
fn default_world_size() -> usize {
    8
}
fn default_chunk_size() -> usize {
    16
}
fn default_world_height() -> usize {
    32
}
impl Default for Size {
    fn default() -> Self {
        Self {
            world_size: default_world_size(),
            chunk_size: default_chunk_size(),
            world_height: default_world_height(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    /// Noise frequency applied to world coordinates.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Peak terrain height in blocks.
    #[serde(default = "default_multiplier")]
    pub multiplier: f32,
}
fn default_scale() -> f32 {
    0.02
}
fn default_multiplier() -> f32 {
    22.0
}
impl Default for Height {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            multiplier: default_multiplier(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Water {
    /// Blocks below this y fill with water where the soil leaves room.
    /// Zero or negative disables water entirely.
    #[serde(default = "default_water_level")]
    pub level: i32,
}
fn default_water_level() -> i32 {
    8
}
impl Default for Water {
    fn default() -> Self {
        Self {
            level: default_water_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FloraProbs {
    /// Chance of a numbered blossom above a fresh grass block.
    #[serde(default = "default_blossom")]
    pub blossom: f32,
    /// Chance of common ground cover above a fresh grass block.
    #[serde(default = "default_tall_grass")]
    pub tall_grass: f32,
    /// Chance of glow berries above a fresh grass block.
    #[serde(default = "default_glow_berries")]
    pub glow_berries: f32,
    /// Chance of a sugar-cane stack on an exposed sand column.
    #[serde(default = "default_sugar_cane")]
    pub sugar_cane: f32,
    /// Chance an exposed water surface freezes over.
    #[serde(default = "default_ice")]
    pub ice: f32,
    /// Chance of a lily pad on an exposed water surface (when it didn't freeze).
    #[serde(default = "default_lily")]
    pub lily: f32,
}
fn default_blossom() -> f32 {
    0.035
}
fn default_tall_grass() -> f32 {
    0.515
}
fn default_glow_berries() -> f32 {
    0.005
}
fn default_sugar_cane() -> f32 {
    0.35
}
fn default_ice() -> f32 {
    0.25
}
fn default_lily() -> f32 {
    0.1
}
impl Default for FloraProbs {
    fn default() -> Self {
        Self {
            blossom: default_blossom(),
            tall_grass: default_tall_grass(),
            glow_berries: default_glow_berries(),
            sugar_cane: default_sugar_cane(),
            ice: default_ice(),
            lily: default_lily(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    /// Chance each interior sub-quadrant attempts one tree.
    #[serde(default = "default_per_quadrant")]
    pub per_quadrant: f32,
    #[serde(default = "default_trunk_min")]
    pub trunk_min: i32,
    #[serde(default = "default_trunk_max")]
    pub trunk_max: i32,
}
fn default_per_quadrant() -> f32 {
    0.25
}
fn default_trunk_min() -> i32 {
    4
}
fn default_trunk_max() -> i32 {
    7
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            per_quadrant: default_per_quadrant(),
            trunk_min: default_trunk_min(),
            trunk_max: default_trunk_max(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Batching {
    /// Maximum face instances per draw batch.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}
fn default_capacity() -> usize {
    1024
}
impl Default for Batching {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read worldgen config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse worldgen config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be a probability in [0, 1] (got {value})")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("blossom + tall_grass must not exceed 1 (got {sum})")]
    FloraWeights { sum: f32 },
    #[error("trunk height range is invalid (trunk_min={min}, trunk_max={max})")]
    TrunkRange { min: i32, max: i32 },
}

impl WorldConfig {
    /// Rejects any knob a world build could not honor. Called before the
    /// first chunk is generated so a bad config never produces a partial
    /// world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::NonPositive { field, value })
            }
        }
        fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange { field, value })
            }
        }

        positive("size.world_size", self.size.world_size as f64)?;
        positive("size.chunk_size", self.size.chunk_size as f64)?;
        positive("size.world_height", self.size.world_height as f64)?;
        positive("height.scale", self.height.scale as f64)?;
        positive("height.multiplier", self.height.multiplier as f64)?;
        positive("batching.capacity", self.batching.capacity as f64)?;

        probability("flora.blossom", self.flora.blossom)?;
        probability("flora.tall_grass", self.flora.tall_grass)?;
        probability("flora.glow_berries", self.flora.glow_berries)?;
        probability("flora.sugar_cane", self.flora.sugar_cane)?;
        probability("flora.ice", self.flora.ice)?;
        probability("flora.lily", self.flora.lily)?;
        probability("trees.per_quadrant", self.trees.per_quadrant)?;

        let sum = self.flora.blossom + self.flora.tall_grass;
        if sum > 1.0 {
            return Err(ConfigError::FloraWeights { sum });
        }
        if self.trees.trunk_min < 1 || self.trees.trunk_max < self.trees.trunk_min {
            return Err(ConfigError::TrunkRange {
                min: self.trees.trunk_min,
                max: self.trees.trunk_max,
            });
        }
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        WorldConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn zero_world_size_is_rejected() {
        let mut cfg = WorldConfig::default();
        cfg.size.world_size = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "size.world_size", .. })
        ));
    }

    #[test]
    fn probability_out_of_range_is_rejected() {
        let mut cfg = WorldConfig::default();
        cfg.flora.ice = 1.5;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OutOfRange { field: "flora.ice", .. })
        ));
        let mut cfg = WorldConfig::default();
        cfg.trees.per_quadrant = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn flora_weight_sum_is_rejected() {
        let mut cfg = WorldConfig::default();
        cfg.flora.blossom = 0.6;
        cfg.flora.tall_grass = 0.6;
        assert!(matches!(cfg.validate(), Err(ConfigError::FloraWeights { .. })));
    }

    #[test]
    fn inverted_trunk_range_is_rejected() {
        let mut cfg = WorldConfig::default();
        cfg.trees.trunk_min = 7;
        cfg.trees.trunk_max = 4;
        assert!(matches!(cfg.validate(), Err(ConfigError::TrunkRange { .. })));
    }

    #[test]
    fn nonfinite_scale_is_rejected() {
        let mut cfg = WorldConfig::default();
        cfg.height.scale = f32::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: WorldConfig = toml::from_str(
            r#"
            [size]
            world_size = 2

            [water]
            level = 0
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.size.world_size, 2);
        assert_eq!(cfg.size.chunk_size, 16);
        assert_eq!(cfg.water.level, 0);
        assert_eq!(cfg.batching.capacity, 1024);
    }
}
