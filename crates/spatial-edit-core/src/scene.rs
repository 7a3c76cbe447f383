//! Scene collections edited by the engine.
//!
//! Rooms contain nodes, links connect entities through bendable breakpoints,
//! and picture planes can act as solid decks. Coordinates are stored as plain
//! arrays so the collections serialize exactly as the host application
//! exports them.

use bevy::math::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::{OrientedRect, euler_to_quat, quat_to_euler, yaw_of};

fn default_true() -> bool {
    true
}

fn default_one() -> f32 {
    1.0
}

/// A placeable entity, optionally contained in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles (radians, XYZ order).
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Half of the visual footprint height, used by the deck clamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_height: Option<f32>,
}

impl Node {
    pub fn new(id: impl Into<String>, position: [f32; 3]) -> Self {
        Self {
            id: id.into(),
            position,
            rotation: [0.0; 3],
            room_id: None,
            group_id: None,
            half_height: None,
        }
    }

    pub fn in_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position.to_array();
    }

    pub fn orientation(&self) -> Quat {
        euler_to_quat(self.rotation)
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.rotation = quat_to_euler(orientation);
    }

    pub fn half_height(&self) -> f32 {
        self.half_height.unwrap_or(0.0).max(0.0)
    }
}

/// Shape of a room's containment area.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundsShape {
    #[default]
    Box,
    Circle,
}

/// Per-room containment settings for the nodes inside it.
///
/// Dimensions that are absent or non-positive fall back to the room size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomBounds {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub shape: BoundsShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f32>,
    #[serde(default)]
    pub padding: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

impl Default for RoomBounds {
    fn default() -> Self {
        Self {
            enabled: true,
            shape: BoundsShape::Box,
            width: None,
            height: None,
            depth: None,
            padding: 0.0,
            radius: None,
        }
    }
}

/// A container that carries its nodes when moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub center: [f32; 3],
    /// Width, height, depth.
    #[serde(default = "default_room_size")]
    pub size: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<RoomBounds>,
}

fn default_room_size() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Room {
    pub fn new(id: impl Into<String>, center: [f32; 3], size: [f32; 3]) -> Self {
        Self {
            id: id.into(),
            center,
            size,
            rotation: [0.0; 3],
            locked: false,
            visible: true,
            bounds: None,
        }
    }

    pub fn center(&self) -> Vec3 {
        Vec3::from(self.center)
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center.to_array();
    }

    pub fn size(&self) -> Vec3 {
        Vec3::from(self.size).abs()
    }

    pub fn orientation(&self) -> Quat {
        euler_to_quat(self.rotation)
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.rotation = quat_to_euler(orientation);
    }

    pub fn yaw(&self) -> f32 {
        yaw_of(self.orientation())
    }

    pub fn half_height(&self) -> f32 {
        self.size().y * 0.5
    }

    /// Horizontal footprint of the room.
    pub fn footprint(&self) -> OrientedRect {
        let size = self.size();
        OrientedRect::new(
            Vec2::new(self.center[0], self.center[2]),
            Vec2::new(size.x, size.z),
            self.yaw(),
        )
    }

    /// Bounds that are switched on, if any.
    pub fn active_bounds(&self) -> Option<&RoomBounds> {
        self.bounds.as_ref().filter(|b| b.enabled)
    }
}

/// A connector between two entities, bent through ordered breakpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub breakpoints: Vec<[f32; 3]>,
}

impl Link {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            breakpoints: Vec::new(),
        }
    }

    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

/// A reference picture plane. Visible solid pictures act as decks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PicturePlane {
    pub id: String,
    #[serde(default)]
    pub position: [f32; 3],
    /// Yaw in radians.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_one")]
    pub scale: f32,
    /// Width divided by depth.
    #[serde(default = "default_one")]
    pub aspect: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub solid: bool,
}

impl PicturePlane {
    pub fn is_deck(&self) -> bool {
        self.visible && self.solid
    }

    pub fn height(&self) -> f32 {
        self.position[1]
    }

    /// Horizontal footprint: `scale` wide, `scale / aspect` deep.
    pub fn footprint(&self) -> OrientedRect {
        let aspect = if self.aspect > 0.0 && self.aspect.is_finite() {
            self.aspect
        } else {
            1.0
        };
        let width = self.scale.abs();
        OrientedRect::new(
            Vec2::new(self.position[0], self.position[2]),
            Vec2::new(width, width / aspect),
            self.rotation,
        )
    }
}

/// A timed action wired to scene entities. Opaque to the engine apart from
/// its targets, which are pruned when entities are deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedAction {
    pub id: String,
    #[serde(default)]
    pub target_ids: Vec<String>,
    #[serde(default)]
    pub delay_ms: u64,
    pub action: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Every mutable collection the engine edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub pictures: Vec<PicturePlane>,
    #[serde(default)]
    pub actions: Vec<TimedAction>,
}

impl Scene {
    /// Loads a scene from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the scene to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn link_mut(&mut self, id: &str) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.id == id)
    }

    pub fn picture(&self, id: &str) -> Option<&PicturePlane> {
        self.pictures.iter().find(|p| p.id == id)
    }

    /// True if the room exists and is locked.
    pub fn is_room_locked(&self, room_id: &str) -> bool {
        self.room(room_id).is_some_and(|r| r.locked)
    }

    /// True if the node sits in a locked room.
    pub fn is_node_locked(&self, node: &Node) -> bool {
        node.room_id
            .as_deref()
            .is_some_and(|room_id| self.is_room_locked(room_id))
    }

    /// Position of any node or room by id.
    pub fn anchor(&self, id: &str) -> Option<Vec3> {
        self.node(id)
            .map(Node::position)
            .or_else(|| self.room(id).map(Room::center))
    }

    /// Nodes contained in the given room.
    pub fn children_of<'a>(&'a self, room_id: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes
            .iter()
            .filter(move |n| n.room_id.as_deref() == Some(room_id))
    }

    /// Visible solid pictures.
    pub fn decks(&self) -> impl Iterator<Item = &PicturePlane> {
        self.pictures.iter().filter(|p| p.is_deck())
    }

    /// Adds a node, generating an id when the given one is empty.
    /// Returns the id of the inserted node.
    pub fn add_node(&mut self, mut node: Node) -> String {
        if node.id.is_empty() || self.node(&node.id).is_some() {
            node.id = uuid::Uuid::new_v4().to_string();
        }
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Removes a node along with every link that references it.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.links.retain(|l| !l.touches(id));
        self.prune_action_targets(id);
        true
    }

    /// Removes a room. Its nodes stay in place but are detached.
    pub fn remove_room(&mut self, id: &str) -> bool {
        let before = self.rooms.len();
        self.rooms.retain(|r| r.id != id);
        if self.rooms.len() == before {
            return false;
        }
        for node in self.nodes.iter_mut() {
            if node.room_id.as_deref() == Some(id) {
                node.room_id = None;
            }
        }
        self.links.retain(|l| !l.touches(id));
        self.prune_action_targets(id);
        true
    }

    pub fn remove_link(&mut self, id: &str) -> bool {
        let before = self.links.len();
        self.links.retain(|l| l.id != id);
        self.prune_action_targets(id);
        self.links.len() != before
    }

    pub fn remove_picture(&mut self, id: &str) -> bool {
        let before = self.pictures.len();
        self.pictures.retain(|p| p.id != id);
        self.prune_action_targets(id);
        self.pictures.len() != before
    }

    fn prune_action_targets(&mut self, id: &str) {
        for action in self.actions.iter_mut() {
            action.target_ids.retain(|t| t != id);
        }
    }
}
