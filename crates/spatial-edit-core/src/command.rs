//! Typed command boundary between an editor UI and the engine.

use bevy::math::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::marquee::CameraSnapshot;
use crate::scene::{Node, Scene};
use crate::selection::{PivotOverride, SelectionItem};

/// Active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Select,
    Translate,
    Rotate,
    BoxSelect,
}

impl EditMode {
    /// Whether handle callbacks are accepted in this mode.
    pub fn allows_handles(self) -> bool {
        !matches!(self, Self::BoxSelect)
    }
}

/// Commands accepted by [`crate::EditorEngine::apply`].
#[derive(Debug, Clone)]
pub enum EditCommand {
    // ========== Mode & Selection ==========
    /// Switch tool. Cancels the running session and the pivot override.
    SetMode { mode: EditMode },
    /// Select one item, or clear with `None`.
    Select { item: Option<SelectionItem> },
    /// Replace the multi-selection.
    SetSelection { items: Vec<SelectionItem> },
    /// Add or remove one item from the multi-selection.
    ToggleSelection { item: SelectionItem },
    ClearSelection,
    SetPivotOverride { pivot: PivotOverride },
    ClearPivotOverride,

    // ========== Handle Gestures ==========
    /// Pointer pressed on a manipulation handle.
    BeginGesture,
    /// Handle moved; carries the handle's proposed world position.
    Translate { position: Vec3 },
    /// Handle turned; carries the handle's current world orientation.
    Rotate { orientation: Quat },
    /// Pointer released.
    EndGesture,
    /// Drag of a single room with neighbor snapping.
    MoveRoom { room_id: String, center: Vec3 },

    // ========== Box Selection ==========
    MarqueeStart {
        point: Vec2,
        camera: CameraSnapshot,
        viewport: Vec2,
    },
    MarqueeMove { point: Vec2 },
    MarqueeEnd { point: Vec2 },

    // ========== Scene ==========
    AddNode { node: Node },
    /// Remove a node, room, link or picture by id.
    RemoveEntity { id: String },
    /// Replace the whole scene and reset history.
    LoadScene { scene: Scene },

    // ========== History ==========
    Undo,
    Redo,
    /// Give the debounced auto-commit a chance to run.
    Tick,
}

impl EditCommand {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetMode { .. } => "SetMode",
            Self::Select { .. } => "Select",
            Self::SetSelection { .. } => "SetSelection",
            Self::ToggleSelection { .. } => "ToggleSelection",
            Self::ClearSelection => "ClearSelection",
            Self::SetPivotOverride { .. } => "SetPivotOverride",
            Self::ClearPivotOverride => "ClearPivotOverride",
            Self::BeginGesture => "BeginGesture",
            Self::Translate { .. } => "Translate",
            Self::Rotate { .. } => "Rotate",
            Self::EndGesture => "EndGesture",
            Self::MoveRoom { .. } => "MoveRoom",
            Self::MarqueeStart { .. } => "MarqueeStart",
            Self::MarqueeMove { .. } => "MarqueeMove",
            Self::MarqueeEnd { .. } => "MarqueeEnd",
            Self::AddNode { .. } => "AddNode",
            Self::RemoveEntity { .. } => "RemoveEntity",
            Self::LoadScene { .. } => "LoadScene",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Tick => "Tick",
        }
    }

    /// Per-frame commands are logged at debug level only.
    pub fn is_frame_update(&self) -> bool {
        matches!(
            self,
            Self::Translate { .. }
                | Self::Rotate { .. }
                | Self::MoveRoom { .. }
                | Self::MarqueeMove { .. }
                | Self::Tick
        )
    }
}

/// What a command changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOutcome {
    pub scene_changed: bool,
    pub selection_changed: bool,
    pub history_changed: bool,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl EditOutcome {
    /// Folds another outcome into this one. Undo/redo availability is taken
    /// from `other`.
    pub fn merge(&mut self, other: EditOutcome) {
        self.scene_changed |= other.scene_changed;
        self.selection_changed |= other.selection_changed;
        self.history_changed |= other.history_changed;
        self.can_undo = other.can_undo;
        self.can_redo = other.can_redo;
    }

    pub fn is_noop(&self) -> bool {
        !self.scene_changed && !self.selection_changed && !self.history_changed
    }
}
