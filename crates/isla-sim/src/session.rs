//! The per-frame session orchestrator.
//!
//! One [`GameSession::tick`] drives all state machines in a fixed
//! order: interaction scan, player, each live enemy, population
//! management, clock, quest timers. Everything is explicit context,
//! no globals, so the whole session is drivable from a test without
//! a render loop. The rendering and UI layers see the session only
//! through read-only view structs, the event bus, and intent methods.

use glam::Vec3;

use isla_common::{horizontal_distance, EntityId, ItemKind, SimRng};
use isla_worldgen::{ResourceField, TerrainSampler};

use crate::clock::{ClockEvent, GameClock, Weather};
use crate::combat::{apply_quest_rewards, CombatResolver};
use crate::enemy::{EnemyAnimation, EnemySenses, Species};
use crate::events::{EventBus, GameEvent};
use crate::interaction::{InteractionCandidate, InteractionDetector};
use crate::inventory::{CraftResult, RecipeBook};
use crate::player::{Player, PlayerAnimation, PlayerSignal};
use crate::population::PopulationManager;
use crate::quest::{Quest, QuestTracker};
use crate::settings::{QualitySettings, QualityTier, SettingsStore};

/// Distance from the island center that satisfies explore quests.
const EXPLORE_RADIUS: f32 = 500.0;

/// Minimum and maximum resource yield per collect.
const YIELD_RANGE: (u32, u32) = (1, 3);

/// Read-only player snapshot for rendering and HUD.
#[derive(Debug, Clone)]
pub struct PlayerView {
    /// World position.
    pub position: Vec3,
    /// Facing angle.
    pub yaw: f32,
    /// Animation state.
    pub animation: PlayerAnimation,
    /// Health in `[0, 100]`.
    pub health: f32,
    /// Stamina in `[0, 100]`.
    pub stamina: f32,
    /// Level.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Inventory contents.
    pub inventory: Vec<(ItemKind, u32)>,
}

/// Read-only enemy snapshot for rendering.
#[derive(Debug, Clone)]
pub struct EnemyView {
    /// Enemy ID.
    pub id: EntityId,
    /// World position.
    pub position: Vec3,
    /// Facing angle.
    pub yaw: f32,
    /// Level.
    pub level: u32,
    /// Species.
    pub species: Species,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Animation state.
    pub animation: EnemyAnimation,
}

/// Read-only HUD snapshot.
#[derive(Debug, Clone)]
pub struct HudView {
    /// Health in `[0, 100]`.
    pub health: f32,
    /// Stamina in `[0, 100]`.
    pub stamina: f32,
    /// Level.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Day number.
    pub day: u32,
    /// Time of day in hours.
    pub time: f32,
    /// Current weather.
    pub weather: Weather,
    /// Quest list in display order.
    pub quests: Vec<Quest>,
    /// Active notification text, if any.
    pub notification: Option<String>,
}

/// A complete game session.
pub struct GameSession {
    terrain: TerrainSampler,
    resources: ResourceField,
    player: Player,
    detector: InteractionDetector,
    manager: PopulationManager,
    combat: CombatResolver,
    quests: QuestTracker,
    recipes: RecipeBook,
    settings: SettingsStore,
    clock: GameClock,
    events: EventBus,
    yield_rng: SimRng,
    enemy_rng: SimRng,
    explored: bool,
}

impl GameSession {
    /// Creates a session from a world seed with default settings.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, SettingsStore::new())
    }

    /// Creates a session from a world seed and a settings store.
    #[must_use]
    pub fn with_settings(seed: u64, settings: SettingsStore) -> Self {
        let root = SimRng::new(seed);
        let terrain = TerrainSampler::new(seed);
        let resources = ResourceField::generate(seed, &terrain);
        let player = Player::new(Vec3::new(0.0, terrain.ground_height(0.0, 0.0), 0.0));
        let mut manager = PopulationManager::new(root.fork(1), &terrain);

        let spawned = manager.populate_initial(settings.settings().max_enemies, player.position);
        let events = EventBus::default();
        for id in &spawned {
            events.publish(GameEvent::EnemySpawned { enemy: *id });
        }
        tracing::info!(seed, initial_enemies = spawned.len(), "session started");

        Self {
            terrain,
            resources,
            player,
            detector: InteractionDetector::default(),
            manager,
            combat: CombatResolver::new(root.fork(2)),
            quests: QuestTracker::with_daily_quests(),
            recipes: RecipeBook::new(),
            settings,
            clock: GameClock::new(root.fork(3)),
            events,
            yield_rng: root.fork(4),
            enemy_rng: root.fork(5),
            explored: false,
        }
    }

    /// Advances the whole simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        // 1. Interaction scan.
        self.detector
            .tick(self.player.position, &self.resources, self.manager.population());

        // 2. Player movement/action and passive recovery.
        let signals = self.player.tick(dt, &self.terrain);
        for signal in signals {
            self.handle_player_signal(signal);
        }
        self.player.ledger.regen_stamina(dt);

        // 3. Enemy behavior. Enemies are read and written through
        // the live set only; an enemy killed earlier this tick is
        // simply absent here.
        let senses = EnemySenses {
            player_position: self.player.position,
            player_level: self.player.ledger.level(),
        };
        for id in self.manager.population().ids() {
            let outcome = match self.manager.population_mut().get_mut(id) {
                Some(enemy) => enemy.tick(&senses, &self.terrain, &mut self.enemy_rng, dt),
                None => continue,
            };
            if outcome.attacked {
                if let Some(enemy) = self.manager.population().get(id) {
                    self.combat.enemy_strike(&mut self.player, enemy, &self.events);
                }
            }
        }

        // 4. Population management.
        let max_enemies = self.settings.settings().max_enemies;
        let spawned = self.manager.tick(dt, max_enemies, self.player.position);
        for id in spawned {
            self.events.publish(GameEvent::EnemySpawned { enemy: id });
        }

        // 5. Clock, daily reset, weather.
        for event in self.clock.tick(dt) {
            match event {
                ClockEvent::DayAdvanced { day } => {
                    self.quests.reset_all();
                    // The explore latch follows the quest cycle, so
                    // each day's Wanderer quest can complete again.
                    self.explored = false;
                    self.events.publish(GameEvent::DayAdvanced { day });
                },
                ClockEvent::WeatherChanged { weather } => {
                    self.events.publish(GameEvent::WeatherChanged { weather });
                },
            }
        }

        // 6. Quest notification timers and exploration progress.
        self.quests.tick(dt);
        if !self.explored
            && horizontal_distance(self.player.position, Vec3::ZERO) >= EXPLORE_RADIUS
        {
            self.explored = true;
            let rewards = self.quests.on_explored();
            apply_quest_rewards(&mut self.player, &rewards, &self.events);
        }
    }

    fn handle_player_signal(&mut self, signal: PlayerSignal) {
        match signal {
            PlayerSignal::ActionStarted { target } => {
                self.events.publish(GameEvent::ActionStarted { target });
            },
            PlayerSignal::CollectCompleted { target, kind } => {
                // Stale-reference policy: if the node is gone, the
                // completed action silently grants nothing.
                if self.resources.get(target).is_none() {
                    self.events
                        .publish(GameEvent::ActionCompleted { target, loot: None });
                    return;
                }
                let (min, max) = YIELD_RANGE;
                let quantity = min + self.yield_rng.next_u32_below(max - min + 1);
                self.player.inventory.add(kind.item(), quantity);
                let rewards = self.quests.on_collect(kind.item(), quantity);
                apply_quest_rewards(&mut self.player, &rewards, &self.events);
                self.events
                    .publish(GameEvent::ResourceCollected { kind, quantity });
                self.events.publish(GameEvent::ActionCompleted {
                    target,
                    loot: Some(kind.item()),
                });
            },
            PlayerSignal::AttackCompleted { target } => {
                // Stale targets are absorbed inside the resolver.
                let outcome = self.combat.player_strike(
                    &mut self.player,
                    self.manager.population_mut(),
                    target,
                    &mut self.quests,
                    &self.events,
                );
                self.events.publish(GameEvent::ActionCompleted {
                    target,
                    loot: outcome.and_then(|o| o.loot),
                });
            },
            PlayerSignal::Arrived | PlayerSignal::MovementTimedOut => {},
        }
    }

    // ---- intents --------------------------------------------------

    /// Move intent: walk to a world point (already resolved from
    /// screen space by the host's picking logic).
    pub fn request_move(&mut self, point: Vec3) {
        self.player.move_to(point);
    }

    /// Interact intent: approach and act on the first detected
    /// candidate. Returns false when nothing is in range.
    pub fn request_interact(&mut self) -> bool {
        if let Some(candidate) = self.detector.first().copied() {
            self.player.approach(&candidate);
            true
        } else {
            false
        }
    }

    /// Craft intent. On failure the inventory is unchanged.
    pub fn craft(&mut self, item: ItemKind) -> CraftResult<()> {
        self.recipes.craft(&mut self.player.inventory, item)
    }

    /// Consume intent: eat/use one of a consumable item. Returns
    /// false when the item is absent or not consumable.
    pub fn consume(&mut self, item: ItemKind) -> bool {
        let Some(heal) = item.health_restored() else {
            return false;
        };
        if self.player.inventory.remove(item, 1).is_err() {
            return false;
        }
        self.player.ledger.update_health(heal as f32);
        true
    }

    /// Quality intent. Takes effect on the next population tick.
    pub fn set_quality(&mut self, tier: QualityTier) {
        self.settings.set_quality(tier);
    }

    // ---- read-only views ------------------------------------------

    /// Current quality settings.
    #[must_use]
    pub const fn quality_settings(&self) -> QualitySettings {
        self.settings.settings()
    }

    /// The terrain sampler (for the rendering layer's mesh).
    #[must_use]
    pub const fn terrain(&self) -> &TerrainSampler {
        &self.terrain
    }

    /// The static resource field.
    #[must_use]
    pub const fn resources(&self) -> &ResourceField {
        &self.resources
    }

    /// Interaction candidates from the latest scan.
    #[must_use]
    pub fn candidates(&self) -> &[InteractionCandidate] {
        self.detector.candidates()
    }

    /// Player snapshot.
    #[must_use]
    pub fn player_view(&self) -> PlayerView {
        PlayerView {
            position: self.player.position,
            yaw: self.player.yaw,
            animation: self.player.animation,
            health: self.player.ledger.health(),
            stamina: self.player.ledger.stamina(),
            level: self.player.ledger.level(),
            experience: self.player.ledger.experience(),
            inventory: self.player.inventory.iter().collect(),
        }
    }

    /// Enemy snapshots in spawn order.
    #[must_use]
    pub fn enemy_views(&self) -> Vec<EnemyView> {
        self.manager
            .population()
            .iter()
            .map(|enemy| EnemyView {
                id: enemy.id,
                position: enemy.position,
                yaw: enemy.yaw,
                level: enemy.level,
                species: enemy.species,
                health: enemy.health,
                max_health: enemy.max_health,
                animation: enemy.animation,
            })
            .collect()
    }

    /// HUD snapshot.
    #[must_use]
    pub fn hud(&self) -> HudView {
        HudView {
            health: self.player.ledger.health(),
            stamina: self.player.ledger.stamina(),
            level: self.player.ledger.level(),
            experience: self.player.ledger.experience(),
            day: self.clock.day(),
            time: self.clock.time(),
            weather: self.clock.weather(),
            quests: self.quests.quests().to_vec(),
            notification: self
                .quests
                .notification()
                .map(|n| n.text.clone()),
        }
    }

    /// Drains pending events for the presentation layer.
    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
