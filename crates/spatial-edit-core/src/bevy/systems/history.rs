//! Debounced history commit.

use bevy::prelude::*;

use crate::bevy::{EditorEngineRes, HistoryChangedEvent};
use crate::command::EditCommand;

/// Lets the engine commit a pending edit once its quiet period elapsed.
pub fn tick_history_debounce(
    time: Res<Time>,
    mut editor: ResMut<EditorEngineRes>,
    mut history_events: MessageWriter<HistoryChangedEvent>,
) {
    if !editor.engine.history().has_pending() {
        return;
    }
    let outcome = editor.engine.apply(EditCommand::Tick, time.elapsed());
    if outcome.history_changed {
        history_events.write(HistoryChangedEvent {
            can_undo: outcome.can_undo,
            can_redo: outcome.can_redo,
        });
    }
}
