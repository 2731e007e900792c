//! Static resource nodes: palm trees (wood) and rocks (stone).
//!
//! Nodes are generated once from the world seed and never move or
//! deplete. Their IDs are stable for the session, which the
//! interaction detector relies on for deterministic candidate order.

use glam::Vec3;
use isla_common::{EntityId, ResourceKind};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::terrain::TerrainSampler;

/// Number of palm trees ringed around the island.
const PALM_COUNT: usize = 50;

/// Number of rocks scattered across the interior.
const ROCK_COUNT: usize = 25;

/// A harvestable world object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Stable identity for the session.
    pub id: EntityId,
    /// World position, clamped to the terrain surface.
    pub position: Vec3,
    /// What harvesting this node yields.
    pub kind: ResourceKind,
}

/// All resource nodes on the island, in generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceField {
    nodes: Vec<ResourceNode>,
}

impl ResourceField {
    /// Generates the field for a seed. Palms sit in a ring between
    /// the beach and the interior; rocks scatter along a spiral
    /// through the interior. Both placements are closed-form in the
    /// node index so the layout is reproducible without an RNG
    /// stream.
    #[must_use]
    pub fn generate(seed: u64, terrain: &TerrainSampler) -> Self {
        let jitter = (seed % 977) as f32;
        let mut nodes = Vec::with_capacity(PALM_COUNT + ROCK_COUNT);

        for i in 0..PALM_COUNT {
            let angle = (i as f32 / PALM_COUNT as f32) * TAU;
            let radius = 500.0 + (i as f32 * 123.456 + jitter).sin() * 300.0;
            let x = angle.cos() * radius;
            let z = angle.sin() * radius;
            nodes.push(ResourceNode {
                id: EntityId::new(),
                position: Vec3::new(x, terrain.ground_height(x, z), z),
                kind: ResourceKind::Wood,
            });
        }

        for i in 0..ROCK_COUNT {
            let angle = (i as f32 / ROCK_COUNT as f32) * TAU;
            let radius = ((i as f32 * 234.567 + jitter).sin() * 1000.0).abs();
            let x = angle.cos() * radius;
            let z = angle.sin() * radius;
            nodes.push(ResourceNode {
                id: EntityId::new(),
                position: Vec3::new(x, terrain.ground_height(x, z), z),
                kind: ResourceKind::Stone,
            });
        }

        tracing::debug!(
            palms = PALM_COUNT,
            rocks = ROCK_COUNT,
            seed,
            "resource field generated"
        );

        Self { nodes }
    }

    /// All nodes in generation order (palms first, then rocks).
    #[must_use]
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    /// Looks up a node by ID.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&ResourceNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isla_common::in_bounds;

    #[test]
    fn test_node_counts() {
        let terrain = TerrainSampler::default();
        let field = ResourceField::generate(12345, &terrain);
        let woods = field
            .nodes()
            .iter()
            .filter(|n| n.kind == ResourceKind::Wood)
            .count();
        let stones = field
            .nodes()
            .iter()
            .filter(|n| n.kind == ResourceKind::Stone)
            .count();
        assert_eq!(woods, PALM_COUNT);
        assert_eq!(stones, ROCK_COUNT);
    }

    #[test]
    fn test_nodes_in_bounds() {
        let terrain = TerrainSampler::default();
        let field = ResourceField::generate(42, &terrain);
        for node in field.nodes() {
            assert!(in_bounds(node.position), "node out of bounds: {node:?}");
        }
    }

    #[test]
    fn test_ids_unique_and_lookup() {
        let terrain = TerrainSampler::default();
        let field = ResourceField::generate(9, &terrain);
        let first = &field.nodes()[0];
        assert_eq!(field.get(first.id).map(|n| n.id), Some(first.id));

        let mut ids: Vec<_> = field.nodes().iter().map(|n| n.id).collect();
        ids.sort_by_key(|id| id.raw());
        ids.dedup();
        assert_eq!(ids.len(), field.nodes().len());
    }
}
