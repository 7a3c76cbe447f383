//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `SpatialEditHeadlessPlugin` for testing editor logic
//! without a rendering or windowing backend.

use std::time::Duration;

use bevy::prelude::*;

use crate::bevy::events::{HistoryChangedEvent, SceneChangedEvent, SelectionChangedEvent};
use crate::bevy::plugin::SpatialEditHeadlessPlugin;
use crate::bevy::resources::{CommandQueue, EditorEngineRes};
use crate::command::EditCommand;
use crate::engine::EditorEngine;
use crate::scene::Scene;

/// Counts of messages observed since the app started.
#[derive(Resource, Debug, Default)]
pub(crate) struct MessageLog {
    pub scene: usize,
    pub selection: usize,
    pub history: usize,
    /// `(can_undo, can_redo)` of the latest history message.
    pub last_history: Option<(bool, bool)>,
}

fn record_messages(
    mut log: ResMut<MessageLog>,
    mut scene: MessageReader<SceneChangedEvent>,
    mut selection: MessageReader<SelectionChangedEvent>,
    mut history: MessageReader<HistoryChangedEvent>,
) {
    log.scene += scene.read().count();
    log.selection += selection.read().count();
    for event in history.read() {
        log.history += 1;
        log.last_history = Some((event.can_undo, event.can_redo));
    }
}

/// A headless Bevy app wrapper for testing.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app with an empty scene.
    pub fn new() -> Self {
        Self::with_scene(Scene::default())
    }

    pub fn with_scene(scene: Scene) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SpatialEditHeadlessPlugin {
            scene,
            ..Default::default()
        });
        app.init_resource::<MessageLog>();
        app.add_systems(PostUpdate, record_messages);
        // Pause virtual time so that only explicit advance_time calls
        // move the clock the engine sees.
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .pause();
        // Run one update to initialize all resources
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Moves virtual time forward by `delta` and runs one frame.
    pub fn advance_time(&mut self, delta: Duration) {
        self.app
            .world_mut()
            .resource_mut::<Time<Virtual>>()
            .advance_by(delta);
        self.app.update();
    }

    /// Push a command to the command queue.
    pub fn push_command(&mut self, cmd: EditCommand) {
        self.app.world().resource::<CommandQueue>().push(cmd);
    }

    pub fn engine(&self) -> &EditorEngine {
        &self.app.world().resource::<EditorEngineRes>().engine
    }

    pub fn log(&self) -> &MessageLog {
        self.app.world().resource::<MessageLog>()
    }
}
