//! Bevy plugin for the editor.
//!
//! Provides `SpatialEditHeadlessPlugin`: logic only, no rendering or window
//! dependencies, so it runs under `MinimalPlugins` in tests.

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::systems;
use crate::config::EditorConfig;
use crate::scene::Scene;

/// Headless plugin wiring the editor engine into an app.
#[derive(Default)]
pub struct SpatialEditHeadlessPlugin {
    pub config: EditorConfig,
    /// Initial scene; also the first history entry.
    pub scene: Scene,
    /// Queue shared with the host UI. A fresh one is created when `None`.
    pub command_queue: Option<CommandQueue>,
}

impl Plugin for SpatialEditHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Resources
        // ====================================================================
        app.insert_resource(self.config.clone())
            .insert_resource(EditorEngineRes::new(self.config.clone(), self.scene.clone()))
            .insert_resource(self.command_queue.clone().unwrap_or_default());

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<SceneChangedEvent>()
            .add_message::<SelectionChangedEvent>()
            .add_message::<HistoryChangedEvent>();

        // ====================================================================
        // Systems
        // ====================================================================
        app.add_systems(
            Update,
            (systems::process_edit_commands, systems::tick_history_debounce).chain(),
        );

        tracing::info!(
            "[plugin] Editor ready ({} rooms, {} nodes)",
            self.scene.rooms.len(),
            self.scene.nodes.len()
        );
    }
}
