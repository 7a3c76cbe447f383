use bevy::math::{Quat, Vec3};

use super::{LinkSnapshot, MovingSet, Write, apply_writes};
use crate::constraints::{NodeClamp, resolve_node, resolve_room_oriented};
use crate::error::{EditError, Result};
use crate::geometry::{centroid, is_finite_quat, rotate_about};
use crate::scene::Scene;
use crate::selection::SelectionItem;

/// Rotate session around a fixed pivot.
///
/// The handle's orientation on the first callback is the baseline. Each
/// frame derives `delta = current * baseline⁻¹` and applies it to every
/// snapshot pose: positions orbit the pivot, orientations become
/// `delta * start`.
#[derive(Debug, Clone)]
pub struct RotateSession {
    pivot: Vec3,
    baseline: Quat,
    moving: MovingSet,
    links: LinkSnapshot,
}

impl RotateSession {
    /// Starts a session. The pivot is the override when given, otherwise the
    /// centroid of every moving entity's starting position.
    pub fn begin(
        scene: &Scene,
        targets: &[SelectionItem],
        pivot_override: Option<Vec3>,
        baseline: Quat,
    ) -> Self {
        let moving = MovingSet::collect(scene, targets);
        // Breakpoints only turn with a link whose two ends both turn.
        let links = moving.snapshot_links(scene, true);
        let pivot = pivot_override
            .filter(|p| p.is_finite())
            .or_else(|| centroid(moving.start_positions()))
            .unwrap_or(Vec3::ZERO);
        Self {
            pivot,
            baseline: baseline.normalize(),
            moving,
            links,
        }
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn len(&self) -> usize {
        self.moving.nodes.len() + self.moving.rooms.len() + self.moving.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moving.is_empty()
    }

    pub fn update(&self, scene: &mut Scene, current: Quat) -> Result<usize> {
        if !is_finite_quat(current) {
            return Err(EditError::NonFinite("orientation"));
        }
        let delta = (current.normalize() * self.baseline.inverse()).normalize();
        let writes = self.frame(scene, delta);
        Ok(apply_writes(scene, writes))
    }

    fn frame(&self, scene: &Scene, delta: Quat) -> Vec<Write> {
        let mut writes = Vec::new();

        for (id, pose) in &self.moving.rooms {
            let Some(room) = scene.room(id).filter(|r| !r.locked) else {
                continue;
            };
            let candidate = rotate_about(pose.position, self.pivot, delta);
            let orientation = delta * pose.orientation;
            writes.push(Write::Room {
                id: id.clone(),
                center: resolve_room_oriented(scene, room, candidate, orientation),
                orientation: Some(orientation),
            });
        }

        let nodes = self
            .moving
            .nodes
            .iter()
            .map(|(id, pose)| (id, pose, self.moving.clamp_for(scene, id)))
            .chain(
                self.moving
                    .children
                    .iter()
                    .map(|(id, pose)| (id, pose, NodeClamp::DecksOnly)),
            );
        for (id, pose, clamp) in nodes {
            let Some(node) = scene.node(id) else {
                continue;
            };
            let candidate = rotate_about(pose.position, self.pivot, delta);
            writes.push(Write::Node {
                id: id.clone(),
                position: resolve_node(scene, node, candidate, clamp),
                orientation: Some(delta * pose.orientation),
            });
        }

        for (link_id, points) in &self.links {
            for (index, start) in points {
                writes.push(Write::Breakpoint {
                    link_id: link_id.clone(),
                    index: *index,
                    position: rotate_about(*start, self.pivot, delta),
                });
            }
        }
        writes
    }
}
