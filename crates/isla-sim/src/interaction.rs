//! Proximity-based interaction detection.
//!
//! A pure query: given the player position, the resource field, and
//! the live enemy set, produce the ordered list of objects within
//! interaction range, each tagged with the action it affords. The
//! caller decides which candidate to act on (policy: first in list).
//! Order is stable: resource nodes in field order, then enemies in
//! spawn order.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use isla_common::{horizontal_distance, EntityId, ResourceKind};
use isla_worldgen::ResourceField;

use crate::population::Population;

/// Interaction radius in world units.
pub const INTERACTION_RADIUS: f32 = 5.0;

/// The action a nearby object affords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateAction {
    /// Harvest a resource node.
    Collect(ResourceKind),
    /// Attack an enemy.
    Attack,
}

/// One object within interaction range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionCandidate {
    /// Target object.
    pub target: EntityId,
    /// Target position at scan time.
    pub position: Vec3,
    /// Action the object affords.
    pub action: CandidateAction,
}

/// Scans for interactable objects at a bounded cadence.
///
/// The cadence is a cost control, not a correctness requirement: a
/// stale scan only delays when a candidate becomes clickable. The
/// cached result is reused between scans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionDetector {
    scan_interval_ticks: u32,
    ticks_until_scan: u32,
    cached: Vec<InteractionCandidate>,
}

impl Default for InteractionDetector {
    fn default() -> Self {
        Self::new(1)
    }
}

impl InteractionDetector {
    /// Creates a detector that rescans every `scan_interval_ticks`
    /// ticks (minimum 1).
    #[must_use]
    pub fn new(scan_interval_ticks: u32) -> Self {
        Self {
            scan_interval_ticks: scan_interval_ticks.max(1),
            ticks_until_scan: 0,
            cached: Vec::new(),
        }
    }

    /// Current candidates, possibly from a previous scan.
    #[must_use]
    pub fn candidates(&self) -> &[InteractionCandidate] {
        &self.cached
    }

    /// First candidate, the one an interact intent acts on.
    #[must_use]
    pub fn first(&self) -> Option<&InteractionCandidate> {
        self.cached.first()
    }

    /// Advances the scan cadence, rescanning when due.
    pub fn tick(
        &mut self,
        player_position: Vec3,
        resources: &ResourceField,
        population: &Population,
    ) {
        if self.ticks_until_scan > 0 {
            self.ticks_until_scan -= 1;
            return;
        }
        self.ticks_until_scan = self.scan_interval_ticks - 1;
        self.cached = scan(player_position, resources, population);
    }
}

/// Pure scan: all objects within [`INTERACTION_RADIUS`] of the
/// player, in stable order.
#[must_use]
pub fn scan(
    player_position: Vec3,
    resources: &ResourceField,
    population: &Population,
) -> Vec<InteractionCandidate> {
    let mut candidates = Vec::new();

    for node in resources.nodes() {
        if horizontal_distance(node.position, player_position) < INTERACTION_RADIUS {
            candidates.push(InteractionCandidate {
                target: node.id,
                position: node.position,
                action: CandidateAction::Collect(node.kind),
            });
        }
    }

    for enemy in population.iter() {
        if horizontal_distance(enemy.position, player_position) < INTERACTION_RADIUS {
            candidates.push(InteractionCandidate {
                target: enemy.id,
                position: enemy.position,
                action: CandidateAction::Attack,
            });
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use isla_common::SimRng;
    use isla_worldgen::TerrainSampler;

    fn empty_population() -> Population {
        Population::default()
    }

    #[test]
    fn test_scan_finds_nearby_node() {
        let terrain = TerrainSampler::default();
        let resources = ResourceField::generate(12345, &terrain);
        let node = &resources.nodes()[0];
        let player = node.position + Vec3::new(2.0, 0.0, 0.0);

        let candidates = scan(player, &resources, &empty_population());
        assert!(candidates.iter().any(|c| c.target == node.id));
        assert!(matches!(
            candidates[0].action,
            CandidateAction::Collect(_)
        ));
    }

    #[test]
    fn test_scan_empty_far_from_everything() {
        let terrain = TerrainSampler::default();
        let resources = ResourceField::generate(12345, &terrain);
        // Far ocean corner: no nodes, no enemies.
        let player = Vec3::new(1400.0, 0.0, 1400.0);
        assert!(scan(player, &resources, &empty_population()).is_empty());
    }

    #[test]
    fn test_resources_ordered_before_enemies() {
        let terrain = TerrainSampler::default();
        let resources = ResourceField::generate(12345, &terrain);
        let node = &resources.nodes()[0];
        let player = node.position + Vec3::new(1.0, 0.0, 0.0);

        let mut population = empty_population();
        let mut rng = SimRng::new(1);
        let enemy = crate::enemy::Enemy::spawn(
            player + Vec3::new(0.0, 0.0, 1.0),
            1,
            crate::enemy::Species::Snake,
            false,
            &mut rng,
        );
        let enemy_id = enemy.id;
        population.insert(enemy);

        let candidates = scan(player, &resources, &population);
        assert!(candidates.len() >= 2);
        assert!(matches!(candidates[0].action, CandidateAction::Collect(_)));
        assert!(candidates
            .iter()
            .any(|c| c.target == enemy_id && c.action == CandidateAction::Attack));
    }

    #[test]
    fn test_cadence_reuses_cache() {
        let terrain = TerrainSampler::default();
        let resources = ResourceField::generate(12345, &terrain);
        let node = &resources.nodes()[0];
        let near = node.position + Vec3::new(1.0, 0.0, 0.0);
        let far = Vec3::new(1400.0, 0.0, 1400.0);

        let mut detector = InteractionDetector::new(3);
        detector.tick(near, &resources, &empty_population());
        assert!(!detector.candidates().is_empty());

        // Next two ticks reuse the stale scan even though the player
        // teleported away; the third rescans.
        detector.tick(far, &resources, &empty_population());
        assert!(!detector.candidates().is_empty());
        detector.tick(far, &resources, &empty_population());
        assert!(!detector.candidates().is_empty());
        detector.tick(far, &resources, &empty_population());
        assert!(detector.candidates().is_empty());
    }
}
