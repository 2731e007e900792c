//! Daily quest tracking.
//!
//! Quests accumulate progress from combat and collection events.
//! Completion fires exactly once per quest per daily cycle: after the
//! completed flag is set, further progress calls are no-ops until
//! `reset_all`. Rewards are returned to the caller rather than
//! applied here, so the tracker never reaches into the ledger or
//! inventory.

use serde::{Deserialize, Serialize};

use isla_common::{ItemKind, QuestId};

/// How long a completion notification stays visible, in simulated
/// seconds.
pub const NOTIFICATION_DURATION: f32 = 4.0;

/// What a quest counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestKind {
    /// Defeat enemies.
    Kill,
    /// Gather a specific item.
    Collect(ItemKind),
    /// Travel at least this far from the island center.
    Explore,
}

/// Reward granted when a quest completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestReward {
    /// Experience granted.
    pub experience: u32,
    /// Optional item granted.
    pub item: Option<(ItemKind, u32)>,
}

/// A single daily quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    /// Quest ID, stable across resets.
    pub id: QuestId,
    /// Display title.
    pub title: String,
    /// What this quest counts.
    pub kind: QuestKind,
    /// Count required for completion.
    pub target: u32,
    /// Current progress. Monotone non-decreasing until reset, and
    /// clamped at `target` for display.
    pub current: u32,
    /// Set exactly once per cycle, when `current` first reaches
    /// `target`.
    pub completed: bool,
    /// Reward granted on completion.
    pub reward: QuestReward,
}

/// Transient completion notification for the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Text to display.
    pub text: String,
    /// Seconds until the notification expires.
    pub remaining: f32,
}

/// Tracks all daily quests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestTracker {
    quests: Vec<Quest>,
    notification: Option<Notification>,
}

impl Default for QuestTracker {
    fn default() -> Self {
        Self::with_daily_quests()
    }
}

impl QuestTracker {
    /// Creates a tracker with no quests.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            quests: Vec::new(),
            notification: None,
        }
    }

    /// Creates a tracker with the standard daily quest set.
    #[must_use]
    pub fn with_daily_quests() -> Self {
        let mut tracker = Self::empty();
        tracker.register(Quest {
            id: QuestId::new(1),
            title: "Hunter".into(),
            kind: QuestKind::Kill,
            target: 5,
            current: 0,
            completed: false,
            reward: QuestReward {
                experience: 50,
                item: Some((ItemKind::Bandage, 1)),
            },
        });
        tracker.register(Quest {
            id: QuestId::new(2),
            title: "Lumberjack".into(),
            kind: QuestKind::Collect(ItemKind::Wood),
            target: 10,
            current: 0,
            completed: false,
            reward: QuestReward {
                experience: 30,
                item: None,
            },
        });
        tracker.register(Quest {
            id: QuestId::new(3),
            title: "Wanderer".into(),
            kind: QuestKind::Explore,
            target: 1,
            current: 0,
            completed: false,
            reward: QuestReward {
                experience: 40,
                item: None,
            },
        });
        tracker
    }

    /// Adds a quest.
    pub fn register(&mut self, quest: Quest) {
        self.quests.push(quest);
    }

    /// All quests, in registration order.
    #[must_use]
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Looks up a quest by ID.
    #[must_use]
    pub fn get(&self, id: QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    /// Current notification, if one is showing.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Records progress on one quest. A no-op once the quest is
    /// completed. Returns the reward on the call that first reaches
    /// the target, and never again until a reset.
    pub fn record_progress(&mut self, id: QuestId, amount: u32) -> Option<QuestReward> {
        let quest = self.quests.iter_mut().find(|q| q.id == id)?;
        if quest.completed {
            return None;
        }

        quest.current = (quest.current + amount).min(quest.target);
        if quest.current >= quest.target {
            quest.completed = true;
            self.notification = Some(Notification {
                text: format!("Quest complete: {}", quest.title),
                remaining: NOTIFICATION_DURATION,
            });
            tracing::info!(quest = ?id, title = %quest.title, "quest completed");
            return Some(quest.reward);
        }
        None
    }

    /// Routes a kill to every kill quest. Returns `(id, reward)` for
    /// any quests that completed on this kill.
    pub fn on_kill(&mut self) -> Vec<(QuestId, QuestReward)> {
        self.progress_matching(|kind| matches!(kind, QuestKind::Kill), 1)
    }

    /// Routes a collected item to matching collect quests.
    pub fn on_collect(&mut self, item: ItemKind, quantity: u32) -> Vec<(QuestId, QuestReward)> {
        self.progress_matching(
            |kind| matches!(kind, QuestKind::Collect(target) if *target == item),
            quantity,
        )
    }

    /// Marks explore quests satisfied (called when the player first
    /// crosses the exploration radius).
    pub fn on_explored(&mut self) -> Vec<(QuestId, QuestReward)> {
        self.progress_matching(|kind| matches!(kind, QuestKind::Explore), 1)
    }

    fn progress_matching(
        &mut self,
        matches: impl Fn(&QuestKind) -> bool,
        amount: u32,
    ) -> Vec<(QuestId, QuestReward)> {
        let ids: Vec<QuestId> = self
            .quests
            .iter()
            .filter(|q| matches(&q.kind))
            .map(|q| q.id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.record_progress(id, amount).map(|reward| (id, reward)))
            .collect()
    }

    /// Resets every quest's progress and completion for the next
    /// daily cycle.
    pub fn reset_all(&mut self) {
        for quest in &mut self.quests {
            quest.current = 0;
            quest.completed = false;
        }
        tracing::debug!("daily quests reset");
    }

    /// Advances the notification timer.
    pub fn tick(&mut self, dt: f32) {
        if let Some(notification) = &mut self.notification {
            notification.remaining -= dt;
            if notification.remaining <= 0.0 {
                self.notification = None;
            }
        }
    }
}
