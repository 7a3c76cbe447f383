//! Room-to-room edge snapping
//!
//! - Edges are compared on the horizontal plane using each room's
//!   axis-aligned footprint extents
//! - One offset per axis; the smallest magnitude wins across all neighbors

use bevy::math::{Vec2, Vec3};

use crate::config::SnapConfig;
use crate::geometry::OrientedRect;
use crate::scene::{Room, Scene};

/// Snap result for a room drag.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub center: Vec3,
    /// Neighbor the X offset came from.
    pub snapped_x: Option<String>,
    /// Neighbor the Z offset came from.
    pub snapped_z: Option<String>,
}

/// Axis-aligned horizontal extents of a footprint.
#[derive(Debug, Clone, Copy)]
struct Extents {
    min: Vec2,
    max: Vec2,
}

impl Extents {
    fn of(rect: &OrientedRect) -> Self {
        let corners = rect.corners();
        let min = corners.iter().copied().fold(Vec2::splat(f32::MAX), Vec2::min);
        let max = corners.iter().copied().fold(Vec2::splat(f32::MIN), Vec2::max);
        Self { min, max }
    }
}

#[derive(Default)]
struct AxisBest {
    offset: Option<f32>,
    neighbor: Option<String>,
}

impl AxisBest {
    fn offer(&mut self, offset: f32, limit: f32, neighbor: &str) {
        if offset.abs() > limit {
            return;
        }
        if self.offset.is_none_or(|best| offset.abs() < best.abs()) {
            self.offset = Some(offset);
            self.neighbor = Some(neighbor.to_string());
        }
    }
}

/// Snaps a room's proposed center so its edges align with nearby visible
/// rooms.
///
/// Two rooms interact on X when their Z ranges overlap (widened by tolerance
/// plus snap distance), and vice versa. Candidate offsets are edge-to-edge
/// (abutting) and edge-to-same-edge (flush).
pub fn snap_room_to_neighbors(
    scene: &Scene,
    room: &Room,
    center: Vec3,
    config: &SnapConfig,
) -> SnapResult {
    let mut result = SnapResult {
        center,
        snapped_x: None,
        snapped_z: None,
    };
    if !config.enabled || config.distance <= 0.0 {
        return result;
    }

    let size = room.size();
    let moving = Extents::of(&OrientedRect::new(
        Vec2::new(center.x, center.z),
        Vec2::new(size.x, size.z),
        room.yaw(),
    ));
    let reach = config.tolerance.max(0.0) + config.distance;

    let mut best_x = AxisBest::default();
    let mut best_z = AxisBest::default();

    for other in scene.rooms.iter().filter(|r| r.visible && r.id != room.id) {
        let target = Extents::of(&other.footprint());

        let z_overlap = moving.min.y < target.max.y + reach && moving.max.y > target.min.y - reach;
        if z_overlap {
            for offset in edge_offsets(moving.min.x, moving.max.x, target.min.x, target.max.x) {
                best_x.offer(offset, config.distance, &other.id);
            }
        }

        let x_overlap = moving.min.x < target.max.x + reach && moving.max.x > target.min.x - reach;
        if x_overlap {
            for offset in edge_offsets(moving.min.y, moving.max.y, target.min.y, target.max.y) {
                best_z.offer(offset, config.distance, &other.id);
            }
        }
    }

    if let Some(dx) = best_x.offset {
        result.center.x += dx;
        result.snapped_x = best_x.neighbor;
    }
    if let Some(dz) = best_z.offset {
        result.center.z += dz;
        result.snapped_z = best_z.neighbor;
    }
    if result.snapped_x.is_some() || result.snapped_z.is_some() {
        tracing::debug!(
            "[snap] Room '{}' snapped x={:?} z={:?}",
            room.id,
            result.snapped_x,
            result.snapped_z
        );
    }
    result
}

/// Offsets that would align one of the moving edges with one of the target
/// edges.
fn edge_offsets(min: f32, max: f32, target_min: f32, target_max: f32) -> [f32; 4] {
    [
        target_min - max,
        target_max - min,
        target_min - min,
        target_max - max,
    ]
}
