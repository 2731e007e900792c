//! Enemy state machine.
//!
//! One instance per live enemy, owned by the population manager and
//! ticked with a borrowed reference. Behavior is a distance-gated
//! decision: attack when adjacent (aggressive only), chase when near
//! and either aggressive or not outleveled, otherwise wander. Enemies
//! beyond the deactivation distance skip their update entirely; that
//! is a cost-control rule, not a state transition.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use isla_common::{horizontal_direction, in_bounds, EntityId, SimRng};
use isla_worldgen::TerrainSampler;

/// Distance at which an aggressive enemy attacks.
pub const ATTACK_RANGE: f32 = 2.0;

/// Distance at which an enemy starts chasing the player.
pub const CHASE_RANGE: f32 = 15.0;

/// Beyond this distance the enemy's behavior update is skipped.
pub const DEACTIVATION_DISTANCE: f32 = 40.0;

/// Seconds between attacks.
pub const ATTACK_COOLDOWN: f32 = 1.0;

/// Per-tick probability of picking a new wander direction.
const WANDER_REDIRECT_CHANCE: f32 = 0.01;

/// Base movement speed in units per second.
const BASE_SPEED: f32 = 6.0;

/// Speed multiplier for aggressive enemies.
const AGGRESSIVE_SPEED_BONUS: f32 = 1.25;

/// Enemy species. Behavior differences are data (the stats table
/// below), not separate types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Mid-level pack hunter.
    Wolf,
    /// Low-level, slow.
    Snake,
    /// High-level desert dweller.
    Scorpion,
}

impl Species {
    /// Movement speed multiplier relative to [`BASE_SPEED`].
    #[must_use]
    pub const fn speed_multiplier(self) -> f32 {
        match self {
            Self::Wolf => 1.2,
            Self::Snake => 0.8,
            Self::Scorpion => 1.0,
        }
    }

    /// Base body color (RGB), consumed by the rendering layer.
    #[must_use]
    pub const fn base_color(self) -> [f32; 3] {
        match self {
            Self::Wolf => [0.55, 0.55, 0.6],
            Self::Snake => [0.3, 0.6, 0.3],
            Self::Scorpion => [0.6, 0.4, 0.2],
        }
    }

    /// Display name for UI layers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wolf => "Wolf",
            Self::Snake => "Snake",
            Self::Scorpion => "Scorpion",
        }
    }
}

/// Animation state exposed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyAnimation {
    /// Standing still.
    #[default]
    Idle,
    /// Moving (chase or wander).
    Walk,
    /// In attack range, striking.
    Attack,
}

/// What the player looks like to an enemy this tick.
#[derive(Debug, Clone, Copy)]
pub struct EnemySenses {
    /// Player position.
    pub player_position: Vec3,
    /// Player level, for the chase gate.
    pub player_level: u32,
}

/// Result of one enemy tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyTickOutcome {
    /// The enemy's attack cooldown fired; the combat resolver should
    /// apply damage to the player.
    pub attacked: bool,
}

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable identity for the enemy's lifetime.
    pub id: EntityId,
    /// World position.
    pub position: Vec3,
    /// Facing angle (radians) around the Y axis.
    pub yaw: f32,
    /// Enemy level, fixed at spawn from the zone's range.
    pub level: u32,
    /// Species, fixed at spawn.
    pub species: Species,
    /// Current health; only ever decreases.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Whether this enemy initiates attacks. Fixed at spawn.
    pub aggressive: bool,
    /// Animation state for rendering.
    pub animation: EnemyAnimation,
    attack_cooldown: f32,
    wander_direction: Vec3,
}

impl Enemy {
    /// Default maximum health for all enemies.
    pub const MAX_HEALTH: i32 = 100;

    /// Creates an enemy at a spawn position.
    #[must_use]
    pub fn spawn(
        position: Vec3,
        level: u32,
        species: Species,
        aggressive: bool,
        rng: &mut SimRng,
    ) -> Self {
        Self {
            id: EntityId::new(),
            position,
            yaw: 0.0,
            level,
            species,
            health: Self::MAX_HEALTH,
            max_health: Self::MAX_HEALTH,
            aggressive,
            animation: EnemyAnimation::Idle,
            attack_cooldown: ATTACK_COOLDOWN,
            wander_direction: random_direction(rng),
        }
    }

    /// Whether this enemy is defeated.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Movement speed in units per second.
    #[must_use]
    pub fn speed(&self) -> f32 {
        let mut speed = BASE_SPEED * self.species.speed_multiplier();
        if self.aggressive {
            speed *= AGGRESSIVE_SPEED_BONUS;
        }
        speed
    }

    /// Advances this enemy by `dt` seconds.
    pub fn tick(
        &mut self,
        senses: &EnemySenses,
        terrain: &TerrainSampler,
        rng: &mut SimRng,
        dt: f32,
    ) -> EnemyTickOutcome {
        let distance = self.position.distance(senses.player_position);

        if distance > DEACTIVATION_DISTANCE {
            self.animation = EnemyAnimation::Idle;
            return EnemyTickOutcome::default();
        }

        if self.aggressive && distance < ATTACK_RANGE {
            self.animation = EnemyAnimation::Attack;
            self.attack_cooldown -= dt;
            if self.attack_cooldown <= 0.0 {
                self.attack_cooldown = ATTACK_COOLDOWN;
                return EnemyTickOutcome { attacked: true };
            }
            return EnemyTickOutcome::default();
        }

        let chasing = distance < CHASE_RANGE
            && (self.aggressive || self.level <= senses.player_level);
        let direction = if chasing {
            horizontal_direction(self.position, senses.player_position)
                .unwrap_or(self.wander_direction)
        } else {
            if rng.chance(WANDER_REDIRECT_CHANCE) {
                self.wander_direction = random_direction(rng);
            }
            self.wander_direction
        };

        let next = self.position + direction * self.speed() * dt;
        if in_bounds(next) {
            self.position = next;
            self.position.y = terrain.ground_height(next.x, next.z);
            self.yaw = direction.x.atan2(direction.z);
            self.animation = EnemyAnimation::Walk;
        } else {
            // Out-of-bounds step: hold position this tick.
            self.animation = EnemyAnimation::Idle;
        }

        EnemyTickOutcome::default()
    }
}

/// A uniformly random normalized horizontal direction.
fn random_direction(rng: &mut SimRng) -> Vec3 {
    let v = Vec3::new(rng.next_f32() - 0.5, 0.0, rng.next_f32() - 0.5);
    v.try_normalize().unwrap_or(Vec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_enemy(position: Vec3, level: u32, aggressive: bool) -> Enemy {
        let mut rng = SimRng::new(1);
        Enemy::spawn(position, level, Species::Wolf, aggressive, &mut rng)
    }

    fn senses_at(player_position: Vec3, player_level: u32) -> EnemySenses {
        EnemySenses {
            player_position,
            player_level,
        }
    }

    #[test]
    fn test_far_enemy_skips_update() {
        let terrain = TerrainSampler::default();
        let mut rng = SimRng::new(2);
        let mut enemy = test_enemy(Vec3::new(100.0, 0.0, 0.0), 5, true);
        let before = enemy.position;

        let outcome = enemy.tick(&senses_at(Vec3::ZERO, 1), &terrain, &mut rng, 1.0 / 60.0);
        assert!(!outcome.attacked);
        assert_eq!(enemy.position, before);
        assert_eq!(enemy.animation, EnemyAnimation::Idle);
    }

    #[test]
    fn test_aggressive_attack_after_cooldown() {
        let terrain = TerrainSampler::default();
        let mut rng = SimRng::new(3);
        let mut enemy = test_enemy(Vec3::new(1.0, 0.0, 0.0), 5, true);
        let senses = senses_at(Vec3::ZERO, 1);

        // Full cooldown must elapse before the first strike.
        let mut attacked = false;
        for _ in 0..61 {
            if enemy.tick(&senses, &terrain, &mut rng, 1.0 / 60.0).attacked {
                attacked = true;
                break;
            }
        }
        assert!(attacked);
        assert_eq!(enemy.animation, EnemyAnimation::Attack);

        // Immediately after striking, the cooldown is reset.
        assert!(!enemy.tick(&senses, &terrain, &mut rng, 1.0 / 60.0).attacked);
    }

    #[test]
    fn test_passive_enemy_never_attacks() {
        let terrain = TerrainSampler::default();
        let mut rng = SimRng::new(4);
        let mut enemy = test_enemy(Vec3::new(0.5, 0.0, 0.0), 5, false);
        let senses = senses_at(Vec3::ZERO, 1);

        for _ in 0..240 {
            assert!(!enemy.tick(&senses, &terrain, &mut rng, 1.0 / 60.0).attacked);
        }
    }

    #[test]
    fn test_chase_closes_distance() {
        let terrain = TerrainSampler::default();
        let mut rng = SimRng::new(5);
        let mut enemy = test_enemy(Vec3::new(10.0, 0.0, 0.0), 1, true);
        let senses = senses_at(Vec3::ZERO, 10);

        let before = isla_common::horizontal_distance(enemy.position, senses.player_position);
        for _ in 0..30 {
            enemy.tick(&senses, &terrain, &mut rng, 1.0 / 60.0);
        }
        let after = isla_common::horizontal_distance(enemy.position, senses.player_position);
        assert!(after < before);
        assert_eq!(enemy.animation, EnemyAnimation::Walk);
    }

    #[test]
    fn test_outleveled_passive_enemy_does_not_chase() {
        let terrain = TerrainSampler::default();
        let mut rng = SimRng::new(6);
        // Passive level-9 enemy vs level-1 player: wanders instead of
        // chasing, so it does not reliably close distance.
        let mut enemy = test_enemy(Vec3::new(10.0, 0.0, 0.0), 9, false);
        enemy.wander_direction = Vec3::X; // away from the player
        let senses = senses_at(Vec3::ZERO, 1);

        let before = isla_common::horizontal_distance(enemy.position, senses.player_position);
        for _ in 0..10 {
            enemy.tick(&senses, &terrain, &mut rng, 1.0 / 60.0);
        }
        let after = isla_common::horizontal_distance(enemy.position, senses.player_position);
        assert!(after >= before);
    }

    #[test]
    fn test_out_of_bounds_step_holds_position() {
        let terrain = TerrainSampler::default();
        let mut rng = SimRng::new(7);
        let mut enemy = test_enemy(Vec3::new(1499.9, 0.0, 0.0), 5, false);
        enemy.wander_direction = Vec3::X;
        // Player nearby so the enemy is active but not chasing.
        let senses = senses_at(Vec3::new(1480.0, 0.0, 30.0), 1);

        let before = enemy.position;
        enemy.tick(&senses, &terrain, &mut rng, 1.0);
        assert_eq!(enemy.position, before);
    }

    #[test]
    fn test_aggressive_is_faster() {
        let passive = test_enemy(Vec3::ZERO, 1, false);
        let aggressive = test_enemy(Vec3::ZERO, 1, true);
        assert!(aggressive.speed() > passive.speed());
    }

    #[test]
    fn test_movement_places_on_terrain() {
        let terrain = TerrainSampler::default();
        let mut rng = SimRng::new(8);
        let mut enemy = test_enemy(Vec3::new(10.0, 0.0, 0.0), 1, true);
        let senses = senses_at(Vec3::ZERO, 10);

        enemy.tick(&senses, &terrain, &mut rng, 1.0 / 60.0);
        let expected = terrain.ground_height(enemy.position.x, enemy.position.z);
        assert!((enemy.position.y - expected).abs() < 1e-5);
    }
}
