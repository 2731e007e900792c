//! # Isla Sim
//!
//! The headless simulation core of the Isla island-survival game.
//!
//! This crate provides every gameplay system, driven tick-by-tick by
//! a host loop:
//! - Player state machine (movement, single-slot action queue)
//! - Enemy AI (attack, chase, wander) and population management
//! - Proximity interaction detection
//! - Combat resolution with XP, loot, and level-ups
//! - Daily quest tracking
//! - Inventory and crafting
//! - Day/night clock and weather
//! - Quality settings and the presentation event bus
//!
//! [`session::GameSession`] ties the systems together; everything
//! else is usable on its own for tests and tooling.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod clock;
pub mod combat;
pub mod enemy;
pub mod events;
pub mod interaction;
pub mod inventory;
pub mod player;
pub mod population;
pub mod progression;
pub mod quest;
pub mod session;
pub mod settings;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clock::{GameClock, Weather};
    pub use crate::combat::{CombatResolver, KillOutcome};
    pub use crate::enemy::{Enemy, EnemyAnimation, Species};
    pub use crate::events::{EventBus, GameEvent};
    pub use crate::interaction::{CandidateAction, InteractionCandidate, InteractionDetector};
    pub use crate::inventory::{Inventory, Recipe, RecipeBook};
    pub use crate::player::{Player, PlayerAnimation};
    pub use crate::population::{Population, PopulationManager, SpawnZone};
    pub use crate::progression::ProgressionLedger;
    pub use crate::quest::{Quest, QuestKind, QuestTracker};
    pub use crate::session::{EnemyView, GameSession, HudView, PlayerView};
    pub use crate::settings::{QualitySettings, QualityTier, SettingsStore};
}

pub use prelude::*;
