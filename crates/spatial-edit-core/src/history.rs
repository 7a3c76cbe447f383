//! Snapshot-based undo/redo with debounced auto-commit.
//!
//! Every entry is a full copy of the scene collections. Entries are compared
//! by a JSON digest so that a commit without an observable change is dropped.

use std::collections::VecDeque;
use std::time::Duration;

use crate::config::HistoryConfig;
use crate::scene::Scene;

/// One history entry.
#[derive(Debug, Clone)]
pub struct Snapshot {
    scene: Scene,
    /// `None` when serialization failed; such entries always count as changed.
    digest: Option<String>,
}

impl Snapshot {
    pub fn capture(scene: &Scene) -> Self {
        let digest = match serde_json::to_string(scene) {
            Ok(digest) => Some(digest),
            Err(e) => {
                tracing::warn!("[history] Digest failed, snapshot treated as changed: {}", e);
                None
            }
        };
        Self {
            scene: scene.clone(),
            digest,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn same_as(&self, other: &Snapshot) -> bool {
        match (&self.digest, &other.digest) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Past / current / future snapshot stacks.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    capacity: usize,
    debounce: Duration,
    past: VecDeque<Snapshot>,
    current: Snapshot,
    future: Vec<Snapshot>,
    /// Deadline of the scheduled auto-commit.
    pending: Option<Duration>,
    dragging: bool,
    restoring: bool,
    /// Bumped whenever the stacks change.
    revision: u64,
}

impl HistoryManager {
    pub fn new(config: &HistoryConfig, scene: &Scene) -> Self {
        Self {
            capacity: config.capacity.max(1),
            debounce: config.debounce(),
            past: VecDeque::new(),
            current: Snapshot::capture(scene),
            future: Vec::new(),
            pending: None,
            dragging: false,
            restoring: false,
            revision: 0,
        }
    }

    /// Drops all entries and starts over from `scene`.
    pub fn reset(&mut self, scene: &Scene) {
        self.past.clear();
        self.future.clear();
        self.current = Snapshot::capture(scene);
        self.pending = None;
        self.dragging = false;
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current(&self) -> &Scene {
        self.current.scene()
    }

    /// Records `scene` as a new entry unless it matches the current one.
    /// Returns whether an entry was pushed.
    pub fn commit(&mut self, scene: &Scene) -> bool {
        self.pending = None;
        let snapshot = Snapshot::capture(scene);
        if snapshot.same_as(&self.current) {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, snapshot);
        self.past.push_back(previous);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
        self.future.clear();
        self.revision += 1;
        tracing::info!(
            "[history] Committed (past={}, future cleared)",
            self.past.len()
        );
        true
    }

    /// Schedules an auto-commit one quiet period after `now`. Ignored while a
    /// drag is active or a snapshot is being restored.
    pub fn notify_mutation(&mut self, now: Duration) {
        if self.dragging || self.restoring {
            return;
        }
        self.pending = Some(now + self.debounce);
    }

    /// Commits once the quiet period has elapsed.
    pub fn tick(&mut self, scene: &Scene, now: Duration) -> bool {
        match self.pending {
            Some(deadline) if !self.dragging && now >= deadline => self.commit(scene),
            _ => false,
        }
    }

    /// Flushes pending work and marks the start of a drag.
    pub fn begin_drag(&mut self, scene: &Scene) -> bool {
        let committed = self.commit(scene);
        self.dragging = true;
        tracing::debug!("[history] Drag started");
        committed
    }

    /// Ends a drag with exactly one commit covering all its frames.
    pub fn end_drag(&mut self, scene: &Scene) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;
        let committed = self.commit(scene);
        tracing::debug!("[history] Drag ended (committed={})", committed);
        committed
    }

    /// Steps back one entry and writes it into `scene`. Pending edits are
    /// committed first so they can be redone.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        if self.pending.is_some() {
            self.commit(scene);
        }
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, previous);
        self.future.push(current);
        self.restore(scene);
        tracing::info!(
            "[history] Undo (past={}, future={})",
            self.past.len(),
            self.future.len()
        );
        true
    }

    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, next);
        self.past.push_back(current);
        self.restore(scene);
        tracing::info!(
            "[history] Redo (past={}, future={})",
            self.past.len(),
            self.future.len()
        );
        true
    }

    fn restore(&mut self, scene: &mut Scene) {
        self.restoring = true;
        *scene = self.current.scene.clone();
        self.pending = None;
        self.dragging = false;
        self.restoring = false;
        self.revision += 1;
    }
}
