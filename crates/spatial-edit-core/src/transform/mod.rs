//! Transform sessions driven by manipulation-handle gestures.
//!
//! A session is created on the first translate or rotate callback of a
//! gesture and dropped when the gesture ends. It snapshots every pose it will
//! touch so each frame is computed from the session baseline, never from the
//! previous frame.

mod rotate;
mod translate;

pub use rotate::*;
pub use translate::*;

use std::collections::{HashMap, HashSet};

use bevy::math::{Quat, Vec3};

use crate::config::SnapConfig;
use crate::constraints::{NodeClamp, resolve_node, resolve_room, snap_room_to_neighbors};
use crate::error::{EditError, Result};
use crate::scene::Scene;
use crate::selection::SelectionItem;

/// Starting pose of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

/// Breakpoint starting positions per link, keyed by breakpoint index.
pub type LinkSnapshot = HashMap<String, Vec<(usize, Vec3)>>;

/// Entities a group transform moves, with their starting poses.
#[derive(Debug, Clone, Default)]
pub struct MovingSet {
    /// Explicitly selected nodes.
    pub nodes: HashMap<String, Pose>,
    /// Explicitly selected, unlocked rooms.
    pub rooms: HashMap<String, Pose>,
    /// Nodes travelling with a moving room without being selected.
    pub children: HashMap<String, Pose>,
    /// Explicitly selected breakpoints.
    pub breakpoints: Vec<(String, usize)>,
}

impl MovingSet {
    /// Collects the moving set for a selection. Locked rooms, nodes in locked
    /// rooms and unknown ids are left out.
    pub fn collect(scene: &Scene, targets: &[SelectionItem]) -> Self {
        let mut set = Self::default();
        for item in targets {
            match item {
                SelectionItem::Node { id } => {
                    if let Some(node) = scene.node(id).filter(|n| !scene.is_node_locked(n)) {
                        set.nodes.insert(
                            id.clone(),
                            Pose {
                                position: node.position(),
                                orientation: node.orientation(),
                            },
                        );
                    }
                }
                SelectionItem::Room { id } => {
                    if let Some(room) = scene.room(id).filter(|r| !r.locked) {
                        set.rooms.insert(
                            id.clone(),
                            Pose {
                                position: room.center(),
                                orientation: room.orientation(),
                            },
                        );
                    }
                }
                SelectionItem::Breakpoint { link_id, index } => {
                    let exists = scene.link(link_id).is_some_and(|l| *index < l.breakpoints.len());
                    if exists && !set.breakpoints.contains(&(link_id.clone(), *index)) {
                        set.breakpoints.push((link_id.clone(), *index));
                    }
                }
                SelectionItem::Picture { .. }
                | SelectionItem::Model { .. }
                | SelectionItem::Pivot => {}
            }
        }

        for node in &scene.nodes {
            let in_moving_room = node
                .room_id
                .as_ref()
                .is_some_and(|room_id| set.rooms.contains_key(room_id));
            if in_moving_room && !set.nodes.contains_key(&node.id) {
                set.children.insert(
                    node.id.clone(),
                    Pose {
                        position: node.position(),
                        orientation: node.orientation(),
                    },
                );
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.rooms.is_empty()
            && self.children.is_empty()
            && self.breakpoints.is_empty()
    }

    /// Ids of every moving node and room.
    pub fn entity_ids(&self) -> HashSet<&str> {
        self.nodes
            .keys()
            .chain(self.rooms.keys())
            .chain(self.children.keys())
            .map(String::as_str)
            .collect()
    }

    /// Starting positions of every moving node and room, implicit children
    /// included.
    pub fn start_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.nodes
            .values()
            .chain(self.rooms.values())
            .chain(self.children.values())
            .map(|pose| pose.position)
    }

    /// Clamp mode for a moving node: bounds are skipped when its own room
    /// moves in the same gesture.
    pub fn clamp_for(&self, scene: &Scene, node_id: &str) -> NodeClamp {
        let room_moving = scene
            .node(node_id)
            .and_then(|n| n.room_id.as_ref())
            .is_some_and(|room_id| self.rooms.contains_key(room_id));
        if room_moving {
            NodeClamp::DecksOnly
        } else {
            NodeClamp::Full
        }
    }

    /// Snapshots breakpoints of links attached to the moving set, plus any
    /// explicitly selected breakpoints.
    ///
    /// With `require_both`, only links whose two endpoints both move are
    /// included.
    pub fn snapshot_links(&self, scene: &Scene, require_both: bool) -> LinkSnapshot {
        let ids = self.entity_ids();
        let mut snapshot: LinkSnapshot = HashMap::new();
        for link in &scene.links {
            let from = ids.contains(link.from.as_str());
            let to = ids.contains(link.to.as_str());
            let attached = if require_both { from && to } else { from || to };
            if attached && !link.breakpoints.is_empty() {
                snapshot.insert(
                    link.id.clone(),
                    link.breakpoints
                        .iter()
                        .enumerate()
                        .map(|(i, p)| (i, Vec3::from(*p)))
                        .collect(),
                );
            }
        }
        for (link_id, index) in &self.breakpoints {
            let Some(point) = scene.link(link_id).and_then(|l| l.breakpoints.get(*index)) else {
                continue;
            };
            let entry = snapshot.entry(link_id.clone()).or_default();
            if !entry.iter().any(|(i, _)| i == index) {
                entry.push((*index, Vec3::from(*point)));
            }
        }
        snapshot
    }
}

/// A single pending mutation computed from a session frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Write {
    Node {
        id: String,
        position: Vec3,
        orientation: Option<Quat>,
    },
    Room {
        id: String,
        center: Vec3,
        orientation: Option<Quat>,
    },
    Breakpoint {
        link_id: String,
        index: usize,
        position: Vec3,
    },
}

/// Applies writes, skipping entities that disappeared mid-gesture. Returns
/// the number of entities whose stored values changed.
pub(crate) fn apply_writes(scene: &mut Scene, writes: Vec<Write>) -> usize {
    let mut changed = 0;
    for write in writes {
        match write {
            Write::Node {
                id,
                position,
                orientation,
            } => {
                let Some(node) = scene.node_mut(&id) else {
                    tracing::debug!("[transform] Node '{}' vanished mid-gesture", id);
                    continue;
                };
                let before = (node.position, node.rotation);
                node.set_position(position);
                if let Some(orientation) = orientation {
                    node.set_orientation(orientation);
                }
                if (node.position, node.rotation) != before {
                    changed += 1;
                }
            }
            Write::Room {
                id,
                center,
                orientation,
            } => {
                let Some(room) = scene.room_mut(&id) else {
                    tracing::debug!("[transform] Room '{}' vanished mid-gesture", id);
                    continue;
                };
                let before = (room.center, room.rotation);
                room.set_center(center);
                if let Some(orientation) = orientation {
                    room.set_orientation(orientation);
                }
                if (room.center, room.rotation) != before {
                    changed += 1;
                }
            }
            Write::Breakpoint {
                link_id,
                index,
                position,
            } => {
                let Some(point) = scene
                    .link_mut(&link_id)
                    .and_then(|l| l.breakpoints.get_mut(index))
                else {
                    continue;
                };
                let next = position.to_array();
                if *point != next {
                    *point = next;
                    changed += 1;
                }
            }
        }
    }
    changed
}

/// Moves one room to `proposed`, carrying its children and attached link
/// breakpoints by the resulting delta.
///
/// Deck clamp applies to the room, then neighbor snapping when `snap` is
/// given. Children only get the deck clamp. Returns the number of changed
/// entities.
pub fn move_room(
    scene: &mut Scene,
    room_id: &str,
    proposed: Vec3,
    snap: Option<&SnapConfig>,
) -> Result<usize> {
    if !proposed.is_finite() {
        return Err(EditError::NonFinite("room center"));
    }
    let room = scene
        .room(room_id)
        .ok_or_else(|| EditError::UnknownEntity(room_id.to_string()))?;
    if room.locked {
        return Err(EditError::LockedRoom(room_id.to_string()));
    }

    let start = room.center();
    let mut center = resolve_room(scene, room, proposed);
    if let Some(config) = snap {
        center = snap_room_to_neighbors(scene, room, center, config).center;
    }
    let delta = center - start;

    let set = MovingSet::collect(scene, &[SelectionItem::room(room_id)]);
    let links = set.snapshot_links(scene, false);

    let mut writes = vec![Write::Room {
        id: room_id.to_string(),
        center,
        orientation: None,
    }];
    for (id, pose) in &set.children {
        if let Some(node) = scene.node(id) {
            writes.push(Write::Node {
                id: id.clone(),
                position: resolve_node(scene, node, pose.position + delta, NodeClamp::DecksOnly),
                orientation: None,
            });
        }
    }
    for (link_id, points) in links {
        for (index, start) in points {
            writes.push(Write::Breakpoint {
                link_id: link_id.clone(),
                index,
                position: start + delta,
            });
        }
    }
    Ok(apply_writes(scene, writes))
}

/// Which gesture variant is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Translate,
    Rotate,
}

#[derive(Debug, Clone)]
enum SessionState {
    Idle,
    Translating(TranslateSession),
    Rotating(RotateSession),
}

/// Owns at most one transform session and routes handle callbacks to it.
#[derive(Debug, Clone)]
pub struct TransformController {
    state: SessionState,
}

impl Default for TransformController {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }
}

impl TransformController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_kind(&self) -> Option<SessionKind> {
        match self.state {
            SessionState::Idle => None,
            SessionState::Translating(_) => Some(SessionKind::Translate),
            SessionState::Rotating(_) => Some(SessionKind::Rotate),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_kind().is_some()
    }

    /// Handles a translate callback carrying the handle's proposed position.
    ///
    /// Group selections go through a session whose baseline is the first
    /// proposed position; that frame only snapshots. Single selections
    /// replace the position directly.
    pub fn translate(
        &mut self,
        scene: &mut Scene,
        targets: &[SelectionItem],
        group: bool,
        proposed: Vec3,
    ) -> Result<usize> {
        if !proposed.is_finite() {
            return Err(EditError::NonFinite("position"));
        }
        if matches!(self.state, SessionState::Rotating(_)) {
            return Err(EditError::GestureConflict("rotate session active"));
        }
        if !group {
            return match targets {
                [item] => translate_single(scene, item, proposed),
                _ => Ok(0),
            };
        }
        match &self.state {
            SessionState::Translating(session) => session.update(scene, proposed),
            _ => {
                let session = TranslateSession::begin(scene, targets, proposed);
                tracing::info!(
                    "[transform] Translate session started ({} entities)",
                    session.len()
                );
                self.state = SessionState::Translating(session);
                Ok(0)
            }
        }
    }

    /// Handles a rotate callback carrying the handle's current orientation.
    pub fn rotate(
        &mut self,
        scene: &mut Scene,
        targets: &[SelectionItem],
        pivot_override: Option<Vec3>,
        orientation: Quat,
    ) -> Result<usize> {
        if !crate::geometry::is_finite_quat(orientation) {
            return Err(EditError::NonFinite("orientation"));
        }
        if matches!(self.state, SessionState::Translating(_)) {
            return Err(EditError::GestureConflict("translate session active"));
        }
        match &self.state {
            SessionState::Rotating(session) => session.update(scene, orientation),
            _ => {
                let session = RotateSession::begin(scene, targets, pivot_override, orientation);
                tracing::info!(
                    "[transform] Rotate session started ({} entities, pivot {:?})",
                    session.len(),
                    session.pivot()
                );
                self.state = SessionState::Rotating(session);
                Ok(0)
            }
        }
    }

    /// Ends the running session, if any. Frames already written stay.
    pub fn end(&mut self) -> Option<SessionKind> {
        let kind = self.active_kind();
        if let Some(kind) = kind {
            tracing::info!("[transform] {:?} session ended", kind);
        }
        self.state = SessionState::Idle;
        kind
    }

    /// Discards the running session after a selection or mode change.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        if was_active {
            tracing::debug!("[transform] Session discarded");
        }
        self.state = SessionState::Idle;
        was_active
    }
}

/// Direct position replacement for a single selected entity.
fn translate_single(scene: &mut Scene, item: &SelectionItem, proposed: Vec3) -> Result<usize> {
    match item {
        SelectionItem::Node { id } => {
            let node = scene
                .node(id)
                .ok_or_else(|| EditError::UnknownEntity(id.clone()))?;
            if scene.is_node_locked(node) {
                return Ok(0);
            }
            let position = resolve_node(scene, node, proposed, NodeClamp::Full);
            Ok(apply_writes(
                scene,
                vec![Write::Node {
                    id: id.clone(),
                    position,
                    orientation: None,
                }],
            ))
        }
        SelectionItem::Room { id } => match move_room(scene, id, proposed, None) {
            Err(EditError::LockedRoom(_)) => Ok(0),
            other => other,
        },
        SelectionItem::Breakpoint { link_id, index } => Ok(apply_writes(
            scene,
            vec![Write::Breakpoint {
                link_id: link_id.clone(),
                index: *index,
                position: proposed,
            }],
        )),
        SelectionItem::Picture { .. } | SelectionItem::Model { .. } | SelectionItem::Pivot => Ok(0),
    }
}
