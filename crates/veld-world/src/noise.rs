use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Deterministic 2D coherent-noise sampler. One instance per world; always
/// sampled at world coordinates so terrain stays continuous across chunk
/// borders.
pub struct HeightField {
    noise: FastNoiseLite,
    multiplier: f32,
}

impl HeightField {
    pub fn new(seed: i32, scale: f32, multiplier: f32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(scale));
        Self { noise, multiplier }
    }

    /// Raw noise in `[-1, 1]`.
    #[inline]
    pub fn sample(&self, wx: i32, wz: i32) -> f32 {
        self.noise.get_noise_2d(wx as f32, wz as f32)
    }

    /// Terrain height sample: `floor((noise + 1) * multiplier / 2)`.
    #[inline]
    pub fn height(&self, wx: i32, wz: i32) -> i32 {
        (((self.sample(wx, wz) + 1.0) * self.multiplier) / 2.0).floor() as i32
    }
}
