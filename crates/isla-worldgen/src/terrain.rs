//! Island height field.
//!
//! Two sinusoidal octaves shaped by a radial shore falloff, plus a
//! seeded hash ripple for small-scale variation and a skirt that
//! drops the terrain below sea level past the shore radius. Pure and
//! deterministic: movement integration and spawn placement call this
//! every tick and must see identical values for identical inputs.

use isla_common::{ISLAND_FALLOFF_RADIUS, SHORE_RADIUS};
use serde::{Deserialize, Serialize};

/// Vertical offset of the terrain base relative to the world origin.
pub const TERRAIN_BASE_Y: f32 = -5.0;

/// Rate at which the skirt sinks past the shore radius.
const SKIRT_SLOPE: f32 = 0.01;

/// Samples the island height field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerrainSampler {
    seed: u64,
    /// Phase offset derived from the seed, applied to both octaves.
    phase: f32,
}

impl TerrainSampler {
    /// Creates a sampler for the given world seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        // Fold the seed into a stable phase in [0, 2pi) so large
        // seeds do not lose precision inside sin/cos.
        let phase = (seed % 6283) as f32 / 1000.0;
        Self { seed, phase }
    }

    /// Returns the world seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Height of the island surface relative to the terrain base.
    #[must_use]
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let distance = (x * x + z * z).sqrt();
        let height_scale = (1.0 - distance / ISLAND_FALLOFF_RADIUS).max(0.0);

        let broad = (x * 0.02 + self.phase).sin() * (z * 0.02 + self.phase).cos() * 5.0;
        let detail = (x * 0.1 + self.phase).sin() * (z * 0.1 + self.phase).cos() * 2.0;
        let ripple = self.hash_ripple(x, z);
        let skirt = ((distance - SHORE_RADIUS) * SKIRT_SLOPE).max(0.0);

        (broad + detail + ripple) * height_scale - skirt
    }

    /// Absolute ground height in world space, for clamping entities
    /// to the surface.
    #[must_use]
    pub fn ground_height(&self, x: f32, z: f32) -> f32 {
        TERRAIN_BASE_Y + self.height(x, z)
    }

    /// Seeded hash noise in [0, 1), stable per (x, z).
    fn hash_ripple(&self, x: f32, z: f32) -> f32 {
        let dot = x * 12.9898 + z * 78.233;
        let seeded = dot * (self.seed % 0xFFFF) as f32;
        (seeded.sin() * 43_758.547).abs().fract()
    }
}

impl Default for TerrainSampler {
    fn default() -> Self {
        Self::new(12345)
    }
}
