//! ECS Resources for the editor.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::command::EditCommand;
use crate::config::EditorConfig;
use crate::engine::EditorEngine;
use crate::scene::Scene;

/// Editor engine resource.
#[derive(Resource, Debug, Clone)]
pub struct EditorEngineRes {
    pub engine: EditorEngine,
}

impl EditorEngineRes {
    pub fn new(config: EditorConfig, scene: Scene) -> Self {
        Self {
            engine: EditorEngine::new(config, scene),
        }
    }
}

impl Default for EditorEngineRes {
    fn default() -> Self {
        Self::new(EditorConfig::default(), Scene::default())
    }
}

/// Thread-safe command queue.
///
/// A UI layer pushes commands from any thread; the ECS drains them once per
/// frame in delivery order.
#[derive(Resource, Clone)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<EditCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Push a command to the queue.
    pub fn push(&self, command: EditCommand) {
        self.inner.lock().push_back(command);
    }

    /// Take every queued command.
    pub fn drain(&self) -> Vec<EditCommand> {
        self.inner.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
