//! Constraint resolution for proposed positions.
//!
//! Corrections are applied in a fixed order:
//! - Room bounds clamp (nodes only)
//! - Solid deck clamp (nodes and rooms), a hard floor that wins over bounds
//! - Neighbor snapping (rooms only, single-room drags)

mod bounds;
mod deck;
mod snap;

pub use bounds::*;
pub use deck::*;
pub use snap::*;

use bevy::math::{Quat, Vec3};

use crate::geometry::yaw_of;
use crate::scene::{Node, Room, Scene};

/// Which corrections apply to a node candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClamp {
    /// Bounds of the node's own room, then decks.
    Full,
    /// Decks only. Used when the node's room moves in the same gesture, so
    /// the node must be free to leave the old bounds.
    DecksOnly,
}

/// Corrects a proposed node position.
pub fn resolve_node(scene: &Scene, node: &Node, candidate: Vec3, clamp: NodeClamp) -> Vec3 {
    let mut position = candidate;
    if clamp == NodeClamp::Full {
        if let Some(room) = node.room_id.as_deref().and_then(|id| scene.room(id)) {
            position = clamp_to_room_bounds(room, position);
        }
    }
    clamp_node_to_decks(scene.decks(), node, position)
}

/// Corrects a proposed room center, keeping the room's stored orientation.
pub fn resolve_room(scene: &Scene, room: &Room, candidate: Vec3) -> Vec3 {
    resolve_room_oriented(scene, room, candidate, room.orientation())
}

/// Corrects a proposed room center for a room about to take `orientation`.
pub fn resolve_room_oriented(
    scene: &Scene,
    room: &Room,
    candidate: Vec3,
    orientation: Quat,
) -> Vec3 {
    clamp_room_to_decks(scene.decks(), room, candidate, yaw_of(orientation))
}
