//! World extent constants shared between terrain, movement, and
//! spawning.

use glam::Vec3;

/// Maximum |x| and |z| any entity may occupy. Positions beyond this
/// are rejected and the entity holds its prior position for the tick.
pub const WORLD_EXTENT: f32 = 1500.0;

/// Radius at which the island height field has fully faded to shore.
pub const ISLAND_FALLOFF_RADIUS: f32 = 1500.0;

/// Radius past which the terrain skirt drops below sea level.
pub const SHORE_RADIUS: f32 = 1000.0;

/// Checks that a position lies within the playable square.
#[must_use]
pub fn in_bounds(position: Vec3) -> bool {
    position.x.abs() < WORLD_EXTENT && position.z.abs() < WORLD_EXTENT
}

/// Horizontal (XZ-plane) distance between two points.
#[must_use]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Horizontal direction from `from` toward `to`, normalized.
/// Returns `None` when the points coincide.
#[must_use]
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let delta = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    delta.try_normalize()
}
