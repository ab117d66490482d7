use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, WorldConfig};
use crate::coord::ChunkCoord;
use crate::noise::HeightField;

// Soil profile on top of the shared height sample: the dirt surface keeps
// half the height plus a floor of 4, stone an eighth plus a floor of 2, so
// stone_top <= dirt_top for every column.
const DIRT_SHARE: f32 = 0.5;
const DIRT_LIFT: f32 = 4.0;
const STONE_SHARE: f32 = 0.125;
const STONE_LIFT: f32 = 2.0;

// Distinct per-chunk random streams.
const STREAM_VEGETATION: u64 = 0x9FA7;
const STREAM_MESH: u64 = 0xDEC0;

/// Immutable world description: validated configuration, the seeded height
/// field, and derivation of per-chunk random streams.
pub struct World {
    cfg: WorldConfig,
    seed: i32,
    height_field: HeightField,
}

/// Column layering derived from one noise sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnProfile {
    /// Blocks below this y are stone.
    pub stone_top: i32,
    /// Blocks below this y (and at or above `stone_top`) are dirt.
    pub dirt_top: i32,
}

impl World {
    /// Validates the configuration and builds the height field. Fails fast:
    /// no chunk is ever generated from a rejected config.
    pub fn new(cfg: WorldConfig, seed: i32) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let height_field = HeightField::new(seed, cfg.height.scale, cfg.height.multiplier);
        Ok(Self {
            cfg,
            seed,
            height_field,
        })
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.cfg
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.cfg.size.chunk_size
    }

    #[inline]
    pub fn world_height(&self) -> usize {
        self.cfg.size.world_height
    }

    #[inline]
    pub fn world_size_chunks(&self) -> usize {
        self.cfg.size.world_size
    }

    #[inline]
    pub fn water_level(&self) -> i32 {
        self.cfg.water.level
    }

    #[inline]
    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    /// World-space origin of a chunk's (0, 0) column.
    #[inline]
    pub fn chunk_origin(&self, coord: ChunkCoord) -> (i32, i32) {
        let s = self.cfg.size.chunk_size as i32;
        (coord.cx * s, coord.cz * s)
    }

    /// Chunk containing the given world column.
    #[inline]
    pub fn chunk_coord_at(&self, wx: i32, wz: i32) -> ChunkCoord {
        let s = self.cfg.size.chunk_size as i32;
        ChunkCoord::new(wx.div_euclid(s), wz.div_euclid(s))
    }

    /// Soil layering for a world column. The ceiling keeps the fractional
    /// surface thresholds of the height formula intact.
    pub fn column_profile(&self, wx: i32, wz: i32) -> ColumnProfile {
        let h = self.height_field.height(wx, wz) as f32;
        ColumnProfile {
            stone_top: (h * STONE_SHARE + STONE_LIFT).ceil() as i32,
            dirt_top: (h * DIRT_SHARE + DIRT_LIFT).ceil() as i32,
        }
    }

    /// Seeded generator for the vegetation pass of one chunk. Reproducible
    /// regardless of the order chunks are visited in.
    pub fn vegetation_rng(&self, coord: ChunkCoord) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.stream_seed(coord, STREAM_VEGETATION))
    }

    /// Seeded generator for mesh-time decoration (flora jitter, lily yaw).
    pub fn mesh_rng(&self, coord: ChunkCoord) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.stream_seed(coord, STREAM_MESH))
    }

    fn stream_seed(&self, coord: ChunkCoord, stream: u64) -> u64 {
        let packed =
            ((coord.cx as u32 as u64) << 32) | (coord.cz as u32 as u64);
        let mut h = packed ^ (self.seed as u32 as u64).wrapping_mul(0x27d4_eb2d) ^ stream;
        h ^= h >> 30;
        h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
        h ^= h >> 27;
        h = h.wrapping_mul(0x94D0_49BB_1331_11EB);
        h ^= h >> 31;
        h
    }
}
