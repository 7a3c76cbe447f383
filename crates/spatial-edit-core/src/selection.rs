//! Selection model: primary item, ordered multi-selection, pivot override.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::Scene;

/// Something the user can select.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionItem {
    Node { id: String },
    Room { id: String },
    Breakpoint { link_id: String, index: usize },
    Picture { id: String },
    Model { id: String },
    /// Synthetic item standing for the centroid of a group selection.
    Pivot,
}

/// Payload-free discriminant of [`SelectionItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    Node,
    Room,
    Breakpoint,
    Picture,
    Model,
    Pivot,
}

impl SelectionItem {
    pub fn node(id: impl Into<String>) -> Self {
        Self::Node { id: id.into() }
    }

    pub fn room(id: impl Into<String>) -> Self {
        Self::Room { id: id.into() }
    }

    pub fn kind(&self) -> SelectionKind {
        match self {
            Self::Node { .. } => SelectionKind::Node,
            Self::Room { .. } => SelectionKind::Room,
            Self::Breakpoint { .. } => SelectionKind::Breakpoint,
            Self::Picture { .. } => SelectionKind::Picture,
            Self::Model { .. } => SelectionKind::Model,
            Self::Pivot => SelectionKind::Pivot,
        }
    }

    /// Id of the referenced entity. Breakpoints report their link.
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            Self::Node { id } | Self::Room { id } | Self::Picture { id } | Self::Model { id } => {
                Some(id)
            }
            Self::Breakpoint { link_id, .. } => Some(link_id),
            Self::Pivot => None,
        }
    }
}

/// Returns false for items that must never enter a selection: anything in or
/// being a locked room, and references to entities that do not exist.
pub fn is_selectable(scene: &Scene, item: &SelectionItem) -> bool {
    match item {
        SelectionItem::Room { id } => scene.room(id).is_some_and(|r| !r.locked),
        SelectionItem::Node { id } => scene.node(id).is_some_and(|n| !scene.is_node_locked(n)),
        SelectionItem::Breakpoint { link_id, index } => scene
            .link(link_id)
            .is_some_and(|l| *index < l.breakpoints.len()),
        SelectionItem::Picture { id } => scene.picture(id).is_some(),
        SelectionItem::Model { .. } | SelectionItem::Pivot => true,
    }
}

/// Why a pivot override was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotReason {
    /// Rotate a group about the center of a selected room.
    RoomCenter,
    /// Pivot placed explicitly by the user.
    Manual,
}

/// Forces group rotations to pivot about an explicit point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotOverride {
    pub position: [f32; 3],
    pub reason: PivotReason,
    /// Room the pivot belongs to; the override is dropped once this room
    /// leaves the selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

impl PivotOverride {
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// Result of a selection mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionChange {
    /// Anything observable changed.
    pub changed: bool,
    /// The selection type or count changed; in-flight transform sessions
    /// must be discarded.
    pub reshaped: bool,
}

/// Primary selection plus the ordered, duplicate-free multi-selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionModel {
    primary: Option<SelectionItem>,
    items: Vec<SelectionItem>,
    pivot_override: Option<PivotOverride>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<&SelectionItem> {
        self.primary.as_ref()
    }

    pub fn items(&self) -> &[SelectionItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.items.is_empty()
    }

    pub fn contains(&self, item: &SelectionItem) -> bool {
        self.items.contains(item)
    }

    /// True when a transform should move a group rather than one entity.
    pub fn is_group(&self) -> bool {
        self.items.len() > 1 || matches!(self.primary, Some(SelectionItem::Pivot))
    }

    /// Items a transform acts on: the multi-selection, or the primary alone.
    pub fn targets(&self) -> Vec<SelectionItem> {
        if !self.items.is_empty() {
            return self.items.clone();
        }
        match &self.primary {
            Some(SelectionItem::Pivot) | None => Vec::new(),
            Some(item) => vec![item.clone()],
        }
    }

    pub fn pivot_override(&self) -> Option<&PivotOverride> {
        self.pivot_override.as_ref()
    }

    pub fn set_pivot_override(&mut self, pivot: PivotOverride) {
        self.pivot_override = Some(pivot);
        self.validate_pivot();
    }

    pub fn clear_pivot_override(&mut self) -> bool {
        self.pivot_override.take().is_some()
    }

    pub fn set_primary(&mut self, item: Option<SelectionItem>) -> SelectionChange {
        self.mutate(|s| s.primary = item)
    }

    /// Replaces the multi-selection. Duplicates are dropped, first occurrence
    /// wins. A primary that left the set is re-derived from the last item.
    pub fn set_multi(&mut self, items: impl IntoIterator<Item = SelectionItem>) -> SelectionChange {
        self.mutate(|s| {
            s.items = dedup(items);
            s.rederive_primary();
        })
    }

    /// Replaces the multi-selection and makes the synthetic pivot the
    /// primary, so transforms always act on the set as a group. An empty set
    /// clears the primary.
    pub fn set_group(&mut self, items: impl IntoIterator<Item = SelectionItem>) -> SelectionChange {
        self.mutate(|s| {
            s.items = dedup(items);
            s.primary = (!s.items.is_empty()).then_some(SelectionItem::Pivot);
        })
    }

    /// Selects exactly one item, or nothing.
    pub fn replace(&mut self, item: Option<SelectionItem>) -> SelectionChange {
        self.mutate(|s| {
            s.items = item.iter().cloned().collect();
            s.primary = item;
        })
    }

    /// Adds the item if absent, removes it if present. The primary becomes
    /// the last remaining item.
    pub fn toggle(&mut self, item: SelectionItem) -> SelectionChange {
        self.mutate(|s| {
            if s.items.is_empty() {
                if let Some(primary) = s.primary.clone().filter(|p| *p != SelectionItem::Pivot) {
                    s.items.push(primary);
                }
            }
            if let Some(idx) = s.items.iter().position(|i| *i == item) {
                s.items.remove(idx);
            } else {
                s.items.push(item);
            }
            s.primary = s.items.last().cloned();
        })
    }

    pub fn clear(&mut self) -> SelectionChange {
        self.mutate(|s| {
            s.items.clear();
            s.primary = None;
            s.pivot_override = None;
        })
    }

    /// Drops items whose entity disappeared or became locked.
    pub fn prune(&mut self, scene: &Scene) -> SelectionChange {
        self.mutate(|s| {
            s.items.retain(|i| is_selectable(scene, i));
            if s.primary.as_ref().is_some_and(|p| !is_selectable(scene, p)) {
                s.primary = s.items.last().cloned();
            }
            if s.items.is_empty() && s.primary == Some(SelectionItem::Pivot) {
                s.primary = None;
            }
        })
    }

    fn mutate(&mut self, f: impl FnOnce(&mut Self)) -> SelectionChange {
        let before = self.clone();
        let shape_before = self.shape();
        f(self);
        let reshaped = self.shape() != shape_before;
        if reshaped {
            self.pivot_override = None;
        }
        self.validate_pivot();
        SelectionChange {
            changed: *self != before,
            reshaped,
        }
    }

    /// Count and type of the selection; a change invalidates sessions.
    fn shape(&self) -> (usize, Option<SelectionKind>) {
        (self.items.len(), self.primary.as_ref().map(SelectionItem::kind))
    }

    fn rederive_primary(&mut self) {
        let keep = match &self.primary {
            Some(SelectionItem::Pivot) => !self.items.is_empty(),
            Some(item) => self.items.contains(item),
            None => false,
        };
        if !keep {
            self.primary = self.items.last().cloned();
        }
    }

    fn validate_pivot(&mut self) {
        let Some(pivot) = &self.pivot_override else {
            return;
        };
        let room_gone = pivot.room_id.as_ref().is_some_and(|room_id| {
            !self
                .items
                .iter()
                .any(|i| matches!(i, SelectionItem::Room { id } if id == room_id))
        });
        if self.items.len() <= 1 || room_gone {
            tracing::debug!("[selection] Dropping pivot override");
            self.pivot_override = None;
        }
    }
}

fn dedup(items: impl IntoIterator<Item = SelectionItem>) -> Vec<SelectionItem> {
    let mut out: Vec<SelectionItem> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
