//! # Isla Worldgen
//!
//! Deterministic island terrain and static resource placement.
//!
//! The terrain is a pure closed-form height field: the same seed
//! always produces the same island. The simulation core consumes it
//! only through [`TerrainSampler::height`] and
//! [`TerrainSampler::ground_height`] for ground-clamping; the
//! rendering layer tessellates the same function into a mesh at
//! whatever detail the quality tier asks for.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod resources;
pub mod terrain;

pub use resources::{ResourceField, ResourceNode};
pub use terrain::TerrainSampler;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_island() {
        let a = TerrainSampler::new(12345);
        let b = TerrainSampler::new(12345);
        assert_eq!(a.height(123.0, -456.0), b.height(123.0, -456.0));

        let fa = ResourceField::generate(12345, &a);
        let fb = ResourceField::generate(12345, &b);
        assert_eq!(fa.nodes().len(), fb.nodes().len());
        for (na, nb) in fa.nodes().iter().zip(fb.nodes().iter()) {
            assert_eq!(na.position, nb.position);
            assert_eq!(na.kind, nb.kind);
        }
    }
}
