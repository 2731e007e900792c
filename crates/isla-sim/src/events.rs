//! Event channel between the simulation core and the presentation
//! layer.
//!
//! The core never touches presentation directly. Progress bars,
//! floating damage numbers, and notifications are driven by draining
//! this bus once per rendered frame. Publishing is non-blocking; if
//! the channel is full the event is dropped, which is acceptable for
//! fire-and-forget visual feedback.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use isla_common::{EntityId, ItemKind, QuestId, ResourceKind};

use crate::clock::Weather;

/// Events emitted by the simulation core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player began a collect or attack sequence.
    ActionStarted {
        /// Target of the action
        target: EntityId,
    },
    /// Player finished a collect or attack sequence.
    ActionCompleted {
        /// Target of the action
        target: EntityId,
        /// Loot granted by the completion, if any
        loot: Option<ItemKind>,
    },
    /// Player finished a collect sequence.
    ResourceCollected {
        /// Resource harvested
        kind: ResourceKind,
        /// Quantity granted
        quantity: u32,
    },
    /// An enemy entered the world.
    EnemySpawned {
        /// Enemy ID
        enemy: EntityId,
    },
    /// An enemy was defeated. Fires exactly once per enemy.
    EnemyDied {
        /// Enemy ID
        enemy: EntityId,
        /// Experience granted
        experience: u32,
        /// Loot granted, if the drop roll succeeded
        loot: Option<ItemKind>,
    },
    /// Player took damage from an enemy attack.
    PlayerDamaged {
        /// Attacking enemy
        source: EntityId,
        /// Damage dealt
        damage: i32,
    },
    /// Player reached a new level.
    LevelUp {
        /// New level
        level: u32,
    },
    /// A quest completed and its reward was granted.
    QuestCompleted {
        /// Quest ID
        quest: QuestId,
    },
    /// Weather changed.
    WeatherChanged {
        /// New weather
        weather: Weather,
    },
    /// The day counter advanced (daily quests reset).
    DayAdvanced {
        /// New day number
        day: u32,
    },
}

/// Event bus for broadcasting simulation events to the presentation
/// layer.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event. Non-blocking; drops the event if full.
    pub fn publish(&self, event: GameEvent) {
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}
