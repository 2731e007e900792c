//! Player state machine.
//!
//! Owns position, facing, the movement target, the single-slot
//! action queue, and the inertia model. Click intents arrive as
//! [`Player::move_to`] / [`Player::approach`]; each tick integrates
//! movement or advances the active action and reports what happened
//! as [`PlayerSignal`]s for the session to act on. The player never
//! touches the inventory, quests, or combat directly: completions
//! are signals, so a stale target is the session's silent no-op, not
//! a state machine error.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use isla_common::{horizontal_direction, horizontal_distance, in_bounds, EntityId, ResourceKind};
use isla_worldgen::TerrainSampler;

use crate::interaction::{CandidateAction, InteractionCandidate};
use crate::inventory::Inventory;
use crate::progression::ProgressionLedger;

/// Top walking speed in units per second.
pub const MAX_SPEED: f32 = 18.0;

/// Speed gained per second while far from the target.
const ACCELERATION: f32 = 36.0;

/// Speed shed per second (scaled by proximity) inside the arrival
/// band.
const DECELERATION: f32 = 72.0;

/// Floor speed during final approach, so arrival always completes.
const MIN_APPROACH_SPEED: f32 = 3.0;

/// Distance at which deceleration begins.
const DECEL_BAND: f32 = 5.0;

/// Arrival distance.
const STOP_THRESHOLD: f32 = 0.1;

/// Per-tick rotation easing factor at the reference 60 Hz rate.
const ROTATION_SMOOTHING: f32 = 0.1;

/// Hard ceiling on a single walk, in seconds. Force-cancels movement
/// to idle even if the target was never reached, so unreachable
/// targets cannot wedge the state machine.
pub const MAX_MOVEMENT_DURATION: f32 = 2.0;

/// Standoff distance when approaching a resource node.
pub const COLLECT_STANDOFF: f32 = 3.0;

/// Standoff distance when approaching an enemy.
pub const ATTACK_STANDOFF: f32 = 2.0;

/// Duration of the collect sequence in seconds.
pub const COLLECT_DURATION: f32 = 1.2;

/// Duration of the attack strike sequence in seconds.
pub const ATTACK_DURATION: f32 = 0.6;

/// Animation state exposed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerAnimation {
    /// Standing still.
    #[default]
    Idle,
    /// Moving toward a target.
    Walking,
    /// Strike sequence running.
    Attacking,
    /// Harvest sequence running.
    Collecting,
}

/// The single queued action, executed on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueuedAction {
    /// What to do on arrival.
    pub action: CandidateAction,
    /// Object to act on.
    pub target: EntityId,
    /// Object position at intent time.
    pub position: Vec3,
}

/// What happened during a player tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerSignal {
    /// Movement hit the duration ceiling and was force-cancelled.
    MovementTimedOut,
    /// The player reached its movement target.
    Arrived,
    /// An action sequence began.
    ActionStarted {
        /// Target of the action
        target: EntityId,
    },
    /// A collect sequence finished; the session grants the yield.
    CollectCompleted {
        /// Node that was harvested
        target: EntityId,
        /// Resource kind to grant
        kind: ResourceKind,
    },
    /// An attack strike finished; the session resolves the hit.
    AttackCompleted {
        /// Enemy that was struck
        target: EntityId,
    },
}

/// The player: position, action state, stats, and inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// World position.
    pub position: Vec3,
    /// Facing angle (radians) around the Y axis, eased toward the
    /// movement heading.
    pub yaw: f32,
    /// Animation state for rendering.
    pub animation: PlayerAnimation,
    /// Experience, level, health.
    pub ledger: ProgressionLedger,
    /// Carried items.
    pub inventory: Inventory,
    target: Option<Vec3>,
    move_elapsed: f32,
    speed: f32,
    queued: Option<QueuedAction>,
    active: Option<(QueuedAction, f32)>,
}

impl Player {
    /// Creates a player at a position, idle.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            animation: PlayerAnimation::Idle,
            ledger: ProgressionLedger::new(),
            inventory: Inventory::new(),
            target: None,
            move_elapsed: 0.0,
            speed: 0.0,
            queued: None,
            active: None,
        }
    }

    /// Current movement target, if walking.
    #[must_use]
    pub const fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Queued action, if any.
    #[must_use]
    pub const fn queued_action(&self) -> Option<QueuedAction> {
        self.queued
    }

    /// Whether an action sequence is currently running.
    #[must_use]
    pub const fn is_acting(&self) -> bool {
        self.active.is_some()
    }

    /// Current walking speed (units per second).
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Move intent: walk to a ground point. Overwrites any current
    /// target and clears the queued action. Ignored while an action
    /// sequence is running (actions occupy the state machine for
    /// their fixed duration).
    pub fn move_to(&mut self, point: Vec3) {
        if self.active.is_some() {
            return;
        }
        self.queued = None;
        self.target = Some(Vec3::new(point.x, 0.0, point.z));
        self.move_elapsed = 0.0;
        self.animation = PlayerAnimation::Walking;
    }

    /// Interact intent: walk to a standoff point near the candidate
    /// and queue its action for arrival.
    pub fn approach(&mut self, candidate: &InteractionCandidate) {
        if self.active.is_some() {
            return;
        }
        let standoff = match candidate.action {
            CandidateAction::Collect(_) => COLLECT_STANDOFF,
            CandidateAction::Attack => ATTACK_STANDOFF,
        };
        // Approach point sits on the line from the object back
        // toward the player.
        let back = horizontal_direction(candidate.position, self.position).unwrap_or(Vec3::Z);
        let approach = candidate.position + back * standoff;

        self.target = Some(Vec3::new(approach.x, 0.0, approach.z));
        self.move_elapsed = 0.0;
        self.queued = Some(QueuedAction {
            action: candidate.action,
            target: candidate.target,
            position: candidate.position,
        });
        self.animation = PlayerAnimation::Walking;
    }

    /// Advances the player by `dt` seconds.
    pub fn tick(&mut self, dt: f32, terrain: &TerrainSampler) -> Vec<PlayerSignal> {
        let mut signals = Vec::new();

        if let Some((action, remaining)) = &mut self.active {
            *remaining -= dt;
            if *remaining <= 0.0 {
                let finished = *action;
                self.active = None;
                self.animation = PlayerAnimation::Idle;
                signals.push(match finished.action {
                    CandidateAction::Collect(kind) => PlayerSignal::CollectCompleted {
                        target: finished.target,
                        kind,
                    },
                    CandidateAction::Attack => PlayerSignal::AttackCompleted {
                        target: finished.target,
                    },
                });
            }
            return signals;
        }

        let Some(target) = self.target else {
            return signals;
        };

        self.move_elapsed += dt;
        if self.move_elapsed >= MAX_MOVEMENT_DURATION {
            self.cancel_movement();
            signals.push(PlayerSignal::MovementTimedOut);
            return signals;
        }

        let distance = horizontal_distance(self.position, target);
        if distance <= STOP_THRESHOLD {
            self.arrive(&mut signals);
            return signals;
        }

        // Inertia: ramp up while far, ease down through the arrival
        // band, floored so the approach always completes.
        if distance > DECEL_BAND {
            self.speed = (self.speed + ACCELERATION * dt).min(MAX_SPEED);
        } else {
            let proximity = 1.0 - distance / DECEL_BAND;
            self.speed = (self.speed - DECELERATION * proximity * dt).max(MIN_APPROACH_SPEED);
        }

        let direction = horizontal_direction(self.position, target).unwrap_or(Vec3::Z);
        let step = (self.speed * dt).min(distance);
        let next = self.position + direction * step;
        if in_bounds(next) {
            self.position = next;
            self.position.y = terrain.ground_height(next.x, next.z);
        }

        let heading = direction.x.atan2(direction.z);
        self.yaw = ease_angle(self.yaw, heading, rotation_alpha(dt));

        signals
    }

    fn arrive(&mut self, signals: &mut Vec<PlayerSignal>) {
        self.target = None;
        self.speed = 0.0;
        self.move_elapsed = 0.0;
        signals.push(PlayerSignal::Arrived);

        if let Some(action) = self.queued.take() {
            let (animation, duration) = match action.action {
                CandidateAction::Collect(_) => (PlayerAnimation::Collecting, COLLECT_DURATION),
                CandidateAction::Attack => (PlayerAnimation::Attacking, ATTACK_DURATION),
            };
            self.animation = animation;
            self.active = Some((action, duration));
            signals.push(PlayerSignal::ActionStarted {
                target: action.target,
            });
        } else {
            self.animation = PlayerAnimation::Idle;
        }
    }

    fn cancel_movement(&mut self) {
        self.target = None;
        self.queued = None;
        self.speed = 0.0;
        self.move_elapsed = 0.0;
        self.animation = PlayerAnimation::Idle;
    }
}

/// Rotation easing factor for a timestep, normalized so that easing
/// strength matches [`ROTATION_SMOOTHING`] per tick at 60 Hz.
fn rotation_alpha(dt: f32) -> f32 {
    1.0 - (1.0 - ROTATION_SMOOTHING).powf(dt * 60.0)
}

/// Eases an angle toward a target along the shortest arc.
fn ease_angle(current: f32, target: f32, alpha: f32) -> f32 {
    use std::f32::consts::PI;
    let mut delta = (target - current) % (2.0 * PI);
    if delta > PI {
        delta -= 2.0 * PI;
    } else if delta < -PI {
        delta += 2.0 * PI;
    }
    current + delta * alpha
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn tick_until(
        player: &mut Player,
        terrain: &TerrainSampler,
        max_ticks: usize,
        pred: impl Fn(&PlayerSignal) -> bool,
    ) -> Option<PlayerSignal> {
        for _ in 0..max_ticks {
            if let Some(signal) = player.tick(DT, terrain).into_iter().find(&pred) {
                return Some(signal);
            }
        }
        None
    }

    fn collect_candidate(position: Vec3) -> InteractionCandidate {
        InteractionCandidate {
            target: EntityId::new(),
            position,
            action: CandidateAction::Collect(ResourceKind::Wood),
        }
    }

    #[test]
    fn test_walk_and_arrive() {
        let terrain = TerrainSampler::default();
        let mut player = Player::new(Vec3::ZERO);
        player.move_to(Vec3::new(8.0, 0.0, 0.0));
        assert_eq!(player.animation, PlayerAnimation::Walking);

        let arrived = tick_until(&mut player, &terrain, 300, |s| {
            matches!(s, PlayerSignal::Arrived)
        });
        assert!(arrived.is_some());
        assert_eq!(player.animation, PlayerAnimation::Idle);
        assert!(horizontal_distance(player.position, Vec3::new(8.0, 0.0, 0.0)) <= 0.2);
    }

    #[test]
    fn test_movement_duration_ceiling() {
        let terrain = TerrainSampler::default();
        let mut player = Player::new(Vec3::ZERO);
        // Far beyond what 2 seconds at max speed can reach.
        player.move_to(Vec3::new(500.0, 0.0, 0.0));

        let timed_out = tick_until(&mut player, &terrain, 200, |s| {
            matches!(s, PlayerSignal::MovementTimedOut)
        });
        assert!(timed_out.is_some());
        assert_eq!(player.animation, PlayerAnimation::Idle);
        assert!(player.target().is_none());
        // Max reachable distance is MAX_SPEED * MAX_MOVEMENT_DURATION.
        assert!(player.position.x < MAX_SPEED * MAX_MOVEMENT_DURATION + 1.0);
    }

    #[test]
    fn test_speed_ramps_and_caps() {
        let terrain = TerrainSampler::default();
        let mut player = Player::new(Vec3::ZERO);
        player.move_to(Vec3::new(100.0, 0.0, 0.0));

        let mut last = 0.0;
        for _ in 0..30 {
            player.tick(DT, &terrain);
            assert!(player.speed() >= last);
            assert!(player.speed() <= MAX_SPEED);
            last = player.speed();
        }
        assert!(last > 0.0);
    }

    #[test]
    fn test_approach_queues_and_executes_collect() {
        let terrain = TerrainSampler::default();
        let mut player = Player::new(Vec3::ZERO);
        let candidate = collect_candidate(Vec3::new(4.0, 0.0, 0.0));
        player.approach(&candidate);

        // Standoff point is 3 units back from the node toward the
        // player, i.e. 1 unit from the start.
        assert!(player.queued_action().is_some());

        let started = tick_until(&mut player, &terrain, 600, |s| {
            matches!(s, PlayerSignal::ActionStarted { .. })
        });
        assert!(started.is_some());
        assert_eq!(player.animation, PlayerAnimation::Collecting);
        assert!(player.is_acting());

        let completed = tick_until(&mut player, &terrain, 120, |s| {
            matches!(s, PlayerSignal::CollectCompleted { .. })
        });
        match completed {
            Some(PlayerSignal::CollectCompleted { target, kind }) => {
                assert_eq!(target, candidate.target);
                assert_eq!(kind, ResourceKind::Wood);
            },
            other => panic!("expected collect completion, got {other:?}"),
        }
        assert_eq!(player.animation, PlayerAnimation::Idle);
    }

    #[test]
    fn test_attack_approach_uses_shorter_standoff() {
        let mut player = Player::new(Vec3::ZERO);
        let enemy_pos = Vec3::new(10.0, 0.0, 0.0);
        player.approach(&InteractionCandidate {
            target: EntityId::new(),
            position: enemy_pos,
            action: CandidateAction::Attack,
        });
        let target = player.target().expect("approach sets a target");
        assert!((horizontal_distance(target, enemy_pos) - ATTACK_STANDOFF).abs() < 1e-4);
    }

    #[test]
    fn test_move_intent_clears_queue() {
        let mut player = Player::new(Vec3::ZERO);
        player.approach(&collect_candidate(Vec3::new(4.0, 0.0, 0.0)));
        assert!(player.queued_action().is_some());

        player.move_to(Vec3::new(-5.0, 0.0, 0.0));
        assert!(player.queued_action().is_none());
        assert_eq!(player.target(), Some(Vec3::new(-5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_intents_ignored_while_acting() {
        let terrain = TerrainSampler::default();
        let mut player = Player::new(Vec3::ZERO);
        player.approach(&collect_candidate(Vec3::new(2.0, 0.0, 0.0)));

        // Standoff point is behind the player here; walk until the
        // action starts.
        let started = tick_until(&mut player, &terrain, 600, |s| {
            matches!(s, PlayerSignal::ActionStarted { .. })
        });
        assert!(started.is_some());

        player.move_to(Vec3::new(50.0, 0.0, 0.0));
        assert!(player.target().is_none());
        assert!(player.is_acting());
    }

    #[test]
    fn test_yaw_eases_toward_heading() {
        let terrain = TerrainSampler::default();
        let mut player = Player::new(Vec3::ZERO);
        player.move_to(Vec3::new(10.0, 0.0, 0.0));

        // Heading for +X is atan2(1, 0) = pi/2.
        let heading = std::f32::consts::FRAC_PI_2;
        player.tick(DT, &terrain);
        let after_one = (player.yaw - heading).abs();
        assert!(after_one > 0.01, "easing should not snap");
        for _ in 0..120 {
            player.tick(DT, &terrain);
        }
        assert!((player.yaw - heading).abs() < 0.05);
    }

    #[test]
    fn test_player_clamped_to_terrain() {
        let terrain = TerrainSampler::default();
        let mut player = Player::new(Vec3::ZERO);
        player.move_to(Vec3::new(5.0, 0.0, 5.0));
        player.tick(DT, &terrain);
        let expected = terrain.ground_height(player.position.x, player.position.z);
        assert!((player.position.y - expected).abs() < 1e-5);
    }
}
