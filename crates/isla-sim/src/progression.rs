//! Experience, levels, and health.

use serde::{Deserialize, Serialize};

/// Maximum player health.
pub const MAX_HEALTH: f32 = 100.0;

/// Maximum player stamina.
pub const MAX_STAMINA: f32 = 100.0;

/// Stamina recovered per second of simulated time.
pub const STAMINA_REGEN_PER_SECOND: f32 = 0.2;

/// Experience required to go from `level` to `level + 1`.
#[must_use]
pub const fn level_threshold(level: u32) -> u32 {
    level * 100
}

/// Player experience, level, health, and stamina.
///
/// Invariants: health and stamina stay in `[0, 100]`, the level never
/// decreases, and every level-up fully restores health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionLedger {
    health: f32,
    stamina: f32,
    level: u32,
    experience: u32,
}

impl Default for ProgressionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionLedger {
    /// Fresh level-1 ledger at full health and stamina.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            health: MAX_HEALTH,
            stamina: MAX_STAMINA,
            level: 1,
            experience: 0,
        }
    }

    /// Current health in `[0, 100]`.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Current level (>= 1).
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Experience toward the next level.
    #[must_use]
    pub const fn experience(&self) -> u32 {
        self.experience
    }

    /// Whether health has reached zero.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Applies a health delta, clamped to `[0, 100]`.
    pub fn update_health(&mut self, delta: f32) {
        self.health = (self.health + delta).clamp(0.0, MAX_HEALTH);
    }

    /// Current stamina in `[0, 100]`.
    #[must_use]
    pub const fn stamina(&self) -> f32 {
        self.stamina
    }

    /// Applies a stamina delta, clamped to `[0, 100]`.
    pub fn update_stamina(&mut self, delta: f32) {
        self.stamina = (self.stamina + delta).clamp(0.0, MAX_STAMINA);
    }

    /// Passive stamina recovery over `dt` seconds.
    pub fn regen_stamina(&mut self, dt: f32) {
        self.update_stamina(STAMINA_REGEN_PER_SECOND * dt);
    }

    /// Grants experience, carrying the remainder across level-ups.
    /// The threshold scales with the current level, and each level
    /// gained fully restores health. Returns the number of levels
    /// gained.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let mut gained = 0;
        while self.experience >= level_threshold(self.level) {
            self.experience -= level_threshold(self.level);
            self.level += 1;
            self.health = MAX_HEALTH;
            gained += 1;
            tracing::info!(level = self.level, "level up");
        }
        gained
    }
}
