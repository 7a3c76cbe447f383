//! Room bounds clamp for contained nodes.

use bevy::math::{Vec2, Vec3};

use crate::geometry::{OrientedRect, clamp_to_box};
use crate::scene::{BoundsShape, Room};

/// Clamps a node position into its room's inset bounds.
///
/// Horizontal clamping happens in the room's yaw frame. Locked rooms and
/// rooms without enabled bounds pass the position through unchanged.
pub fn clamp_to_room_bounds(room: &Room, position: Vec3) -> Vec3 {
    if room.locked {
        return position;
    }
    let Some(bounds) = room.active_bounds() else {
        return position;
    };

    let size = room.size();
    let pick = |value: Option<f32>, fallback: f32| value.filter(|v| *v > 0.0).unwrap_or(fallback);
    let width = pick(bounds.width, size.x);
    let height = pick(bounds.height, size.y);
    let depth = pick(bounds.depth, size.z);
    let padding = bounds.padding.max(0.0);

    let center = room.center();
    let frame = OrientedRect::new(
        Vec2::new(center.x, center.z),
        Vec2::new(width, depth),
        room.yaw(),
    );
    let local = frame.to_local(Vec2::new(position.x, position.z));

    let half_height = height * 0.5 - padding;
    let horizontal = match bounds.shape {
        BoundsShape::Box => {
            let half = Vec2::new(width * 0.5 - padding, depth * 0.5 - padding);
            (half.x > 0.0 && half.y > 0.0).then(|| local.clamp(-half, half))
        }
        BoundsShape::Circle => {
            let radius = pick(bounds.radius, width.min(depth) * 0.5) - padding;
            (radius > 0.0).then(|| local.clamp_length_max(radius))
        }
    };

    match horizontal {
        Some(local) if half_height > 0.0 => {
            let world = frame.to_world(local);
            let target = Vec3::new(world.x, center.y, world.y);
            let inset = Vec3::new(0.0, half_height, 0.0);
            clamp_to_box(Vec3::new(world.x, position.y, world.y), target - inset, target + inset)
        }
        _ => {
            let own_half = Vec3::new(0.0, size.y * 0.5, 0.0);
            let point = Vec3::new(center.x, position.y, center.z);
            clamp_to_box(point, center - own_half, center + own_half)
        }
    }
}
