//! Solid deck clamp: visible solid pictures are upward-only floors.

use bevy::math::{Vec2, Vec3};

use crate::geometry::{OrientedRect, horizontal};
use crate::scene::{Node, PicturePlane, Room};

/// Raises a node standing inside any deck footprint to at least
/// `deck height + node half height`. Never lowers, never moves horizontally.
pub fn clamp_node_to_decks<'a>(
    decks: impl IntoIterator<Item = &'a PicturePlane>,
    node: &Node,
    position: Vec3,
) -> Vec3 {
    let point = horizontal(position);
    let half_height = node.half_height();
    let floor = decks
        .into_iter()
        .filter(|deck| deck.footprint().contains(point))
        .map(|deck| deck.height() + half_height)
        .fold(f32::NEG_INFINITY, f32::max);
    Vec3::new(position.x, position.y.max(floor), position.z)
}

/// Raises a room whose footprint at `center`, turned to `yaw`, overlaps any
/// deck footprint to at least `deck height + room half height`.
pub fn clamp_room_to_decks<'a>(
    decks: impl IntoIterator<Item = &'a PicturePlane>,
    room: &Room,
    center: Vec3,
    yaw: f32,
) -> Vec3 {
    let size = room.size();
    let footprint = OrientedRect::new(horizontal(center), Vec2::new(size.x, size.z), yaw);
    let half_height = room.half_height();
    let floor = decks
        .into_iter()
        .filter(|deck| deck.footprint().overlaps(&footprint))
        .map(|deck| deck.height() + half_height)
        .fold(f32::NEG_INFINITY, f32::max);
    Vec3::new(center.x, center.y.max(floor), center.z)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn deck(y: f32) -> PicturePlane {
        PicturePlane {
            id: "deck".to_string(),
            position: [0.0, y, 0.0],
            rotation: 0.0,
            scale: 2.0,
            aspect: 1.0,
            visible: true,
            solid: true,
        }
    }

    #[test]
    fn test_node_raised_inside_footprint() {
        let mut node = Node::new("a", [0.0; 3]);
        node.half_height = Some(0.25);
        let decks = [deck(1.0)];
        let raised = clamp_node_to_decks(&decks, &node, Vec3::new(0.5, 0.0, 0.5));
        assert_eq!(raised, Vec3::new(0.5, 1.25, 0.5));
    }

    #[test]
    fn test_node_never_lowered() {
        let node = Node::new("a", [0.0; 3]);
        let decks = [deck(1.0)];
        let above = Vec3::new(0.0, 3.0, 0.0);
        assert_eq!(clamp_node_to_decks(&decks, &node, above), above);
    }

    #[test]
    fn test_node_outside_footprint_unchanged() {
        let node = Node::new("a", [0.0; 3]);
        let decks = [deck(1.0)];
        let outside = Vec3::new(1.5, -2.0, 0.0);
        assert_eq!(clamp_node_to_decks(&decks, &node, outside), outside);
    }

    #[test]
    fn test_monotonic_over_grid() {
        let node = Node::new("a", [0.0; 3]);
        let decks = [deck(0.5)];
        for i in -8..=8 {
            for j in -8..=8 {
                let p = Vec3::new(i as f32 * 0.25, -1.0 + j as f32 * 0.25, 0.1);
                let out = clamp_node_to_decks(&decks, &node, p);
                assert!(out.y >= p.y);
                assert_eq!((out.x, out.z), (p.x, p.z));
                if !decks[0].footprint().contains(horizontal(p)) {
                    assert_eq!(out, p);
                }
            }
        }
    }

    #[test]
    fn test_room_raised_on_overlap() {
        let room = Room::new("r1", [0.0; 3], [2.0, 2.0, 2.0]);
        let decks = [deck(1.0)];
        // Room center outside the deck, but its footprint overlaps it.
        let raised = clamp_room_to_decks(&decks, &room, Vec3::new(1.8, 0.0, 0.0), room.yaw());
        assert_eq!(raised, Vec3::new(1.8, 2.0, 0.0));

        let clear = clamp_room_to_decks(&decks, &room, Vec3::new(2.5, 0.0, 0.0), room.yaw());
        assert_eq!(clear, Vec3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_room_footprint_follows_yaw() {
        // 6 x 1 room whose long side only reaches the deck once turned.
        let room = Room::new("r1", [0.0; 3], [6.0, 2.0, 1.0]);
        let decks = [deck(1.0)];
        let center = Vec3::new(0.0, 0.0, 2.5);
        assert_eq!(clamp_room_to_decks(&decks, &room, center, 0.0), center);
        let turned = clamp_room_to_decks(&decks, &room, center, FRAC_PI_2);
        assert_eq!(turned, Vec3::new(0.0, 2.0, 2.5));
    }
}
