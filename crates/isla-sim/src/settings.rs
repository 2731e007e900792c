//! Quality settings.
//!
//! A discrete performance/fidelity preset. The simulation core only
//! consumes `max_enemies`; the remaining fields are read by the
//! rendering layer. Changing the tier takes effect on the next
//! population tick, never retroactively.

use serde::{Deserialize, Serialize};

/// Discrete quality preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QualityTier {
    /// Lowest population cap and render detail.
    Low,
    /// Default preset.
    #[default]
    Medium,
    /// Highest population cap and render detail.
    High,
}

/// Resolved settings for a quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualitySettings {
    /// Live enemy population cap.
    pub max_enemies: usize,
    /// Terrain mesh subdivisions per side.
    pub terrain_detail: u32,
    /// Shadow map resolution in pixels.
    pub shadow_map_size: u32,
    /// Camera draw distance in world units.
    pub draw_distance: f32,
}

impl QualityTier {
    /// Fixed lookup table from tier to settings.
    #[must_use]
    pub const fn settings(self) -> QualitySettings {
        match self {
            Self::Low => QualitySettings {
                max_enemies: 8,
                terrain_detail: 50,
                shadow_map_size: 256,
                draw_distance: 20.0,
            },
            Self::Medium => QualitySettings {
                max_enemies: 15,
                terrain_detail: 100,
                shadow_map_size: 512,
                draw_distance: 30.0,
            },
            Self::High => QualitySettings {
                max_enemies: 25,
                terrain_detail: 150,
                shadow_map_size: 1024,
                draw_distance: 50.0,
            },
        }
    }
}

/// Holds the current quality tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsStore {
    tier: QualityTier,
}

impl SettingsStore {
    /// Creates a store at the default (medium) tier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tier.
    #[must_use]
    pub const fn tier(&self) -> QualityTier {
        self.tier
    }

    /// Switches the tier.
    pub fn set_quality(&mut self, tier: QualityTier) {
        if tier != self.tier {
            tracing::info!(?tier, "quality tier changed");
        }
        self.tier = tier;
    }

    /// Resolved settings for the current tier.
    #[must_use]
    pub const fn settings(&self) -> QualitySettings {
        self.tier.settings()
    }
}
