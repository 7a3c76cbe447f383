//! Command processing system.
//!
//! Drains the external command queue into the editor engine.

use bevy::prelude::*;

use crate::bevy::{
    CommandQueue, EditorEngineRes, HistoryChangedEvent, SceneChangedEvent, SelectionChangedEvent,
};
use crate::command::EditOutcome;
use crate::engine::EditorEngine;

/// Applies every queued command in order, then emits at most one message of
/// each kind for the frame.
pub fn process_edit_commands(
    command_queue: Res<CommandQueue>,
    time: Res<Time>,
    mut editor: ResMut<EditorEngineRes>,
    mut scene_events: MessageWriter<SceneChangedEvent>,
    mut selection_events: MessageWriter<SelectionChangedEvent>,
    mut history_events: MessageWriter<HistoryChangedEvent>,
) {
    let commands = command_queue.drain();
    if commands.is_empty() {
        return;
    }

    let now = time.elapsed();
    let mut outcome = EditOutcome::default();
    for command in commands {
        outcome.merge(editor.engine.apply(command, now));
    }

    emit_outcome(
        &editor.engine,
        outcome,
        &mut scene_events,
        &mut selection_events,
        &mut history_events,
    );
}

pub(crate) fn emit_outcome(
    engine: &EditorEngine,
    outcome: EditOutcome,
    scene_events: &mut MessageWriter<SceneChangedEvent>,
    selection_events: &mut MessageWriter<SelectionChangedEvent>,
    history_events: &mut MessageWriter<HistoryChangedEvent>,
) {
    if outcome.scene_changed {
        scene_events.write(SceneChangedEvent);
    }
    if outcome.selection_changed {
        let selection = engine.selection();
        selection_events.write(SelectionChangedEvent {
            primary: selection.primary().cloned(),
            items: selection.items().to_vec(),
        });
    }
    if outcome.history_changed {
        history_events.write(HistoryChangedEvent {
            can_undo: outcome.can_undo,
            can_redo: outcome.can_redo,
        });
    }
}
