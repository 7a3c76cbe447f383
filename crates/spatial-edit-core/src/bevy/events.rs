//! ECS Messages emitted by the editor.

use bevy::prelude::*;

use crate::selection::SelectionItem;

/// Message fired once per frame when the scene collections changed.
#[derive(Message, Debug, Clone, Default)]
pub struct SceneChangedEvent;

/// Message fired when the primary selection, multi-selection or pivot
/// override changed.
#[derive(Message, Debug, Clone)]
pub struct SelectionChangedEvent {
    pub primary: Option<SelectionItem>,
    pub items: Vec<SelectionItem>,
}

/// Message fired when the undo/redo stacks changed.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryChangedEvent {
    pub can_undo: bool,
    pub can_redo: bool,
}
