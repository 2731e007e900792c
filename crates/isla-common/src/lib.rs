//! # Isla Common
//!
//! Common types, utilities, and shared abstractions for the Isla
//! island-survival simulation.
//!
//! This crate provides foundational types used across all Isla subsystems:
//! - ID types (`EntityId`, `QuestId`)
//! - Item identities and categories
//! - Deterministic RNG for gameplay rolls
//! - World extent constants
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod items;
pub mod rng;
pub mod world;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::items::*;
    pub use crate::rng::*;
    pub use crate::world::*;
}

pub use prelude::*;
