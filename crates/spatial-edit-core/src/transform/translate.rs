use bevy::math::Vec3;

use super::{LinkSnapshot, MovingSet, Write, apply_writes};
use crate::constraints::{NodeClamp, resolve_node, resolve_room};
use crate::error::{EditError, Result};
use crate::scene::Scene;
use crate::selection::SelectionItem;

/// Group translate session.
///
/// The baseline is the handle position reported on the first callback; every
/// later frame moves the snapshot by `proposed - baseline`.
#[derive(Debug, Clone)]
pub struct TranslateSession {
    baseline: Vec3,
    moving: MovingSet,
    links: LinkSnapshot,
}

impl TranslateSession {
    pub fn begin(scene: &Scene, targets: &[SelectionItem], baseline: Vec3) -> Self {
        let moving = MovingSet::collect(scene, targets);
        let links = moving.snapshot_links(scene, false);
        Self {
            baseline,
            moving,
            links,
        }
    }

    pub fn baseline(&self) -> Vec3 {
        self.baseline
    }

    /// Number of entities the session moves, breakpoints excluded.
    pub fn len(&self) -> usize {
        self.moving.nodes.len() + self.moving.rooms.len() + self.moving.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moving.is_empty()
    }

    /// Applies one frame. Returns the number of entities that changed.
    pub fn update(&self, scene: &mut Scene, proposed: Vec3) -> Result<usize> {
        if !proposed.is_finite() {
            return Err(EditError::NonFinite("position"));
        }
        let delta = proposed - self.baseline;
        let writes = self.frame(scene, delta);
        Ok(apply_writes(scene, writes))
    }

    fn frame(&self, scene: &Scene, delta: Vec3) -> Vec<Write> {
        let mut writes = Vec::new();

        for (id, pose) in &self.moving.rooms {
            let Some(room) = scene.room(id).filter(|r| !r.locked) else {
                continue;
            };
            writes.push(Write::Room {
                id: id.clone(),
                center: resolve_room(scene, room, pose.position + delta),
                orientation: None,
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
            writes.push(Write::Node {
                id: id.clone(),
                position: resolve_node(scene, node, pose.position + delta, clamp),
                orientation: None,
            });
        }

        for (link_id, points) in &self.links {
            for (index, start) in points {
                writes.push(Write::Breakpoint {
                    link_id: link_id.clone(),
                    index: *index,
                    position: *start + delta,
                });
            }
        }
        writes
    }
}
