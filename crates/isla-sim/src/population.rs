//! Enemy population management.
//!
//! The population manager is the sole inserter into the live enemy
//! set, and the combat resolver (via [`Population::remove`]) is the
//! sole remover. Spawning draws from a precomputed pool of candidate
//! positions partitioned into concentric zones, scheduled by a
//! cooldown that grows as the world fills up. There is no
//! distance-based despawn: far-away enemies persist, but the
//! population stays capped by the quality tier.

use ahash::AHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use isla_common::{horizontal_distance, EntityId, SimRng};
use isla_worldgen::TerrainSampler;

use crate::enemy::{Enemy, Species};

/// Number of precomputed candidate spawn positions.
const SPAWN_POOL_SIZE: usize = 64;

/// Seconds between spawn attempts before the population scaling.
const SPAWN_INTERVAL: f32 = 10.0;

/// Maximum enemies added per spawn attempt.
const SPAWN_BATCH: usize = 3;

/// Candidates closer to the player than this are rerolled.
const MIN_PLAYER_DISTANCE: f32 = 20.0;

/// Rerolls allowed per batch slot before giving up on it.
const MAX_REROLLS: usize = 5;

/// Concentric distance bands around the island center. Enemy level,
/// species mix, and aggression all scale with the band's danger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnZone {
    /// Beach and interior near the origin.
    Safe,
    /// Mid-island forest ring.
    Forest,
    /// Outer wilds.
    Danger,
}

impl SpawnZone {
    /// Radius band `[min, max)` for this zone.
    #[must_use]
    pub const fn radius_band(self) -> (f32, f32) {
        match self {
            Self::Safe => (0.0, 300.0),
            Self::Forest => (300.0, 800.0),
            Self::Danger => (800.0, 1500.0),
        }
    }

    /// Inclusive enemy level range for this zone.
    #[must_use]
    pub const fn level_range(self) -> (u32, u32) {
        match self {
            Self::Safe => (1, 3),
            Self::Forest => (3, 7),
            Self::Danger => (6, 10),
        }
    }

    /// Probability that an enemy spawned here is aggressive.
    #[must_use]
    pub const fn aggression_chance(self) -> f32 {
        match self {
            Self::Safe => 0.15,
            Self::Forest => 0.45,
            Self::Danger => 0.8,
        }
    }

    /// Rolls a zone with the fixed 30/40/30 weighting.
    #[must_use]
    pub fn roll(rng: &mut SimRng) -> Self {
        let roll = rng.next_f32();
        if roll < 0.3 {
            Self::Safe
        } else if roll < 0.7 {
            Self::Forest
        } else {
            Self::Danger
        }
    }

    /// Rolls a species from this zone's probability table.
    #[must_use]
    pub fn roll_species(self, rng: &mut SimRng) -> Species {
        match self {
            Self::Safe => Species::Snake,
            Self::Forest => {
                if rng.next_f32() < 0.6 {
                    Species::Wolf
                } else {
                    Species::Snake
                }
            },
            Self::Danger => {
                if rng.next_f32() < 0.6 {
                    Species::Scorpion
                } else {
                    Species::Wolf
                }
            },
        }
    }

    /// Rolls a level from this zone's range.
    #[must_use]
    pub fn roll_level(self, rng: &mut SimRng) -> u32 {
        let (min, max) = self.level_range();
        min + rng.next_u32_below(max - min + 1)
    }
}

/// A precomputed spawn position and its zone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SpawnCandidate {
    position: Vec3,
    zone: SpawnZone,
}

/// The live enemy set.
///
/// Enemies are stored by ID with a separate spawn-order index so
/// iteration order is deterministic. `remove` returns the enemy at
/// most once per ID, which is what makes death side effects
/// exactly-once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Population {
    enemies: AHashMap<EntityId, Enemy>,
    order: Vec<EntityId>,
}

impl Population {
    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Looks up an enemy.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    /// Looks up an enemy mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id)
    }

    /// Live enemy IDs in spawn order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.order.clone()
    }

    /// Iterates live enemies in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.order.iter().filter_map(|id| self.enemies.get(id))
    }

    /// Inserts a freshly spawned enemy. Crate-visible so only the
    /// population manager (and crate tests) can add to the live set.
    pub(crate) fn insert(&mut self, enemy: Enemy) {
        self.order.push(enemy.id);
        self.enemies.insert(enemy.id, enemy);
    }

    /// Removes an enemy. Returns `None` if the ID is unknown or was
    /// already removed.
    pub fn remove(&mut self, id: EntityId) -> Option<Enemy> {
        let enemy = self.enemies.remove(&id)?;
        self.order.retain(|&other| other != id);
        Some(enemy)
    }
}

/// Spawns and throttles the enemy population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationManager {
    population: Population,
    pool: Vec<SpawnCandidate>,
    cooldown: f32,
    rng: SimRng,
}

impl PopulationManager {
    /// Builds the manager and its candidate pool from the session
    /// RNG and the terrain.
    #[must_use]
    pub fn new(mut rng: SimRng, terrain: &TerrainSampler) -> Self {
        let pool = (0..SPAWN_POOL_SIZE)
            .map(|_| {
                let zone = SpawnZone::roll(&mut rng);
                let (min_radius, max_radius) = zone.radius_band();
                let radius = rng.next_range(min_radius, max_radius);
                let angle = rng.next_range(0.0, std::f32::consts::TAU);
                let x = angle.cos() * radius;
                let z = angle.sin() * radius;
                SpawnCandidate {
                    position: Vec3::new(x, terrain.ground_height(x, z), z),
                    zone,
                }
            })
            .collect();

        Self {
            population: Population::default(),
            pool,
            cooldown: 0.0,
            rng,
        }
    }

    /// The live enemy set.
    #[must_use]
    pub const fn population(&self) -> &Population {
        &self.population
    }

    /// The live enemy set, mutable. Insertions still go through the
    /// manager; this exists for per-tick enemy updates and for the
    /// combat resolver's removal.
    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    /// Fills the world to half capacity at session start.
    pub fn populate_initial(&mut self, max_enemies: usize, player_position: Vec3) -> Vec<EntityId> {
        let mut spawned = Vec::new();
        while self.population.len() < max_enemies / 2 {
            match self.spawn_one(player_position) {
                Some(id) => spawned.push(id),
                None => break,
            }
        }
        spawned
    }

    /// Advances the spawn scheduler. Returns IDs of enemies spawned
    /// this tick.
    pub fn tick(&mut self, dt: f32, max_enemies: usize, player_position: Vec3) -> Vec<EntityId> {
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return Vec::new();
        }

        if self.population.len() >= max_enemies {
            // At capacity: skip the batch and extend the cooldown.
            self.cooldown = self.next_cooldown(max_enemies);
            return Vec::new();
        }

        let mut spawned = Vec::new();
        let room = max_enemies - self.population.len();
        for _ in 0..SPAWN_BATCH.min(room) {
            if let Some(id) = self.spawn_one(player_position) {
                spawned.push(id);
            }
        }

        self.cooldown = self.next_cooldown(max_enemies);
        spawned
    }

    /// Cooldown until the next spawn attempt; grows with population
    /// so spawning throttles as the world fills up.
    fn next_cooldown(&self, max_enemies: usize) -> f32 {
        let fill = self.population.len() as f32 / max_enemies.max(1) as f32;
        SPAWN_INTERVAL * (1.0 + fill)
    }

    /// Spawns one enemy at a pool candidate away from the player.
    /// Candidates near the player are rerolled a bounded number of
    /// times; if every reroll lands close, the slot is skipped.
    fn spawn_one(&mut self, player_position: Vec3) -> Option<EntityId> {
        let candidate = self.pick_candidate(player_position)?;
        let level = candidate.zone.roll_level(&mut self.rng);
        let species = candidate.zone.roll_species(&mut self.rng);
        let aggressive = self.rng.chance(candidate.zone.aggression_chance());

        let enemy = Enemy::spawn(candidate.position, level, species, aggressive, &mut self.rng);
        let id = enemy.id;
        tracing::debug!(
            enemy = ?id,
            zone = ?candidate.zone,
            level,
            species = species.name(),
            aggressive,
            "enemy spawned"
        );
        self.population.insert(enemy);
        Some(id)
    }

    fn pick_candidate(&mut self, player_position: Vec3) -> Option<SpawnCandidate> {
        for _ in 0..=MAX_REROLLS {
            let index = self.rng.next_u32_below(self.pool.len() as u32) as usize;
            let candidate = self.pool[index];
            if horizontal_distance(candidate.position, player_position) >= MIN_PLAYER_DISTANCE {
                return Some(candidate);
            }
        }
        None
    }
}
