//! Editor engine: owns the scene and routes commands to the selection,
//! transform, marquee and history components.

use std::time::Duration;

use crate::command::{EditCommand, EditMode, EditOutcome};
use crate::config::EditorConfig;
use crate::error::{EditError, Result};
use crate::history::HistoryManager;
use crate::marquee::{MarqueeProjector, MarqueeResult, ScreenRect};
use crate::scene::Scene;
use crate::selection::{SelectionChange, SelectionItem, SelectionModel, is_selectable};
use crate::transform::{TransformController, move_room};

/// Single-threaded editing state machine.
///
/// All input goes through [`EditorEngine::apply`]; time is passed in so the
/// debounced auto-commit is deterministic.
#[derive(Debug, Clone)]
pub struct EditorEngine {
    config: EditorConfig,
    scene: Scene,
    selection: SelectionModel,
    mode: EditMode,
    transform: TransformController,
    marquee: MarqueeProjector,
    marquee_preview: Vec<SelectionItem>,
    history: HistoryManager,
    gesture_active: bool,
}

impl EditorEngine {
    pub fn new(config: EditorConfig, scene: Scene) -> Self {
        let history = HistoryManager::new(&config.history, &scene);
        Self {
            config,
            scene,
            selection: SelectionModel::new(),
            mode: EditMode::default(),
            transform: TransformController::new(),
            marquee: MarqueeProjector::new(),
            marquee_preview: Vec::new(),
            history,
            gesture_active: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture_active
    }

    pub fn is_session_active(&self) -> bool {
        self.transform.is_active()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Rectangle of the running marquee drag.
    pub fn marquee_rect(&self) -> Option<ScreenRect> {
        self.marquee.rect()
    }

    /// Items the running marquee would select if released now.
    pub fn marquee_preview(&self) -> &[SelectionItem] {
        &self.marquee_preview
    }

    /// Applies one command. Rejected input is logged and leaves the state
    /// untouched.
    pub fn apply(&mut self, command: EditCommand, now: Duration) -> EditOutcome {
        if command.is_frame_update() {
            tracing::debug!("[engine] {}", command.name());
        } else {
            tracing::info!("[engine] {}", command.name());
        }

        let revision = self.history.revision();
        let mut outcome = EditOutcome::default();
        if let Err(e) = self.dispatch(command, now, &mut outcome) {
            tracing::warn!("[engine] Command rejected: {}", e);
        }
        outcome.history_changed |= self.history.revision() != revision;
        outcome.can_undo = self.history.can_undo();
        outcome.can_redo = self.history.can_redo();
        outcome
    }

    /// Runs an arbitrary scene mutation as a watched edit: the selection is
    /// pruned and a debounced commit is scheduled.
    pub fn edit_scene(&mut self, now: Duration, f: impl FnOnce(&mut Scene)) -> EditOutcome {
        let revision = self.history.revision();
        let before = self.scene.clone();
        f(&mut self.scene);

        let mut outcome = EditOutcome::default();
        if self.scene != before {
            outcome.scene_changed = true;
            self.history.notify_mutation(now);
            let change = self.selection.prune(&self.scene);
            self.on_selection_change(change, &mut outcome);
        }
        outcome.history_changed = self.history.revision() != revision;
        outcome.can_undo = self.history.can_undo();
        outcome.can_redo = self.history.can_redo();
        outcome
    }

    fn dispatch(
        &mut self,
        command: EditCommand,
        now: Duration,
        outcome: &mut EditOutcome,
    ) -> Result<()> {
        match command {
            EditCommand::SetMode { mode } => self.set_mode(mode, outcome),
            EditCommand::Select { item } => {
                let item = item.filter(|i| self.accept(i));
                let change = self.selection.replace(item);
                self.on_selection_change(change, outcome);
            }
            EditCommand::SetSelection { items } => {
                let items: Vec<_> = items.into_iter().filter(|i| self.accept(i)).collect();
                let change = self.selection.set_multi(items);
                self.on_selection_change(change, outcome);
            }
            EditCommand::ToggleSelection { item } => {
                if self.selection.contains(&item) || self.accept(&item) {
                    let change = self.selection.toggle(item);
                    self.on_selection_change(change, outcome);
                }
            }
            EditCommand::ClearSelection => {
                let change = self.selection.clear();
                self.on_selection_change(change, outcome);
            }
            EditCommand::SetPivotOverride { pivot } => {
                let before = self.selection.pivot_override().cloned();
                self.selection.set_pivot_override(pivot);
                outcome.selection_changed = self.selection.pivot_override() != before.as_ref();
            }
            EditCommand::ClearPivotOverride => {
                outcome.selection_changed = self.selection.clear_pivot_override();
            }
            EditCommand::BeginGesture => self.begin_gesture()?,
            EditCommand::Translate { position } => {
                self.ensure_handles()?;
                self.begin_gesture()?;
                let targets = self.selection.targets();
                let group = self.selection.is_group();
                let moved = self
                    .transform
                    .translate(&mut self.scene, &targets, group, position)?;
                self.on_scene_mutated(moved, now, outcome);
            }
            EditCommand::Rotate { orientation } => {
                self.ensure_handles()?;
                self.begin_gesture()?;
                let targets = self.selection.targets();
                let pivot = self.selection.pivot_override().map(|p| p.position());
                let moved = self
                    .transform
                    .rotate(&mut self.scene, &targets, pivot, orientation)?;
                self.on_scene_mutated(moved, now, outcome);
            }
            EditCommand::EndGesture => self.end_gesture(),
            EditCommand::MoveRoom { room_id, center } => {
                if self.transform.is_active() {
                    return Err(EditError::GestureConflict("transform session active"));
                }
                let snap = Some(&self.config.snap);
                let moved = match move_room(&mut self.scene, &room_id, center, snap) {
                    Err(EditError::LockedRoom(id)) => {
                        tracing::debug!("[engine] Room '{}' is locked, move ignored", id);
                        0
                    }
                    other => other?,
                };
                self.on_scene_mutated(moved, now, outcome);
            }
            EditCommand::MarqueeStart {
                point,
                camera,
                viewport,
            } => {
                if self.mode != EditMode::BoxSelect {
                    tracing::debug!("[engine] Marquee ignored outside box-select mode");
                    return Ok(());
                }
                if self.transform.is_active() {
                    return Err(EditError::GestureConflict("transform session active"));
                }
                self.marquee.begin(point, camera, viewport);
                self.marquee_preview.clear();
            }
            EditCommand::MarqueeMove { point } => {
                if !self.marquee.is_active() {
                    return Err(EditError::NoActiveSession);
                }
                self.marquee_preview =
                    self.marquee.update(point, &self.scene, &self.config.marquee);
            }
            EditCommand::MarqueeEnd { point } => {
                self.marquee_preview.clear();
                let result = self.marquee.finish(point, &self.scene, &self.config.marquee);
                let change = match result {
                    Some(MarqueeResult::Cleared) => self.selection.clear(),
                    Some(MarqueeResult::Selected(items)) => self.selection.set_group(items),
                    None => SelectionChange::default(),
                };
                self.on_selection_change(change, outcome);
            }
            EditCommand::AddNode { node } => {
                let id = self.scene.add_node(node);
                tracing::info!("[engine] Added node '{}'", id);
                self.on_scene_mutated(1, now, outcome);
            }
            EditCommand::RemoveEntity { id } => {
                let removed = self.scene.remove_node(&id)
                    || self.scene.remove_room(&id)
                    || self.scene.remove_link(&id)
                    || self.scene.remove_picture(&id);
                if !removed {
                    return Err(EditError::UnknownEntity(id));
                }
                self.on_scene_mutated(1, now, outcome);
                let change = self.selection.prune(&self.scene);
                self.on_selection_change(change, outcome);
            }
            EditCommand::LoadScene { scene } => {
                self.cancel_gestures();
                self.scene = scene;
                self.history.reset(&self.scene);
                let change = self.selection.clear();
                outcome.selection_changed = change.changed;
                outcome.scene_changed = true;
            }
            EditCommand::Undo => {
                self.cancel_gestures();
                if self.history.undo(&mut self.scene) {
                    self.after_restore(outcome);
                }
            }
            EditCommand::Redo => {
                self.cancel_gestures();
                if self.history.redo(&mut self.scene) {
                    self.after_restore(outcome);
                }
            }
            EditCommand::Tick => {
                self.history.tick(&self.scene, now);
            }
        }
        Ok(())
    }

    /// Selection entry policy: locked and unknown entities are refused.
    fn accept(&self, item: &SelectionItem) -> bool {
        let ok = is_selectable(&self.scene, item);
        if !ok {
            tracing::debug!("[engine] Refusing selection of {:?}", item);
        }
        ok
    }

    fn ensure_handles(&self) -> Result<()> {
        if self.marquee.is_active() {
            return Err(EditError::GestureConflict("marquee active"));
        }
        if !self.mode.allows_handles() {
            return Err(EditError::GestureConflict("handles disabled in box-select mode"));
        }
        Ok(())
    }

    fn set_mode(&mut self, mode: EditMode, outcome: &mut EditOutcome) {
        if mode == self.mode {
            return;
        }
        tracing::info!("[engine] Mode {:?} -> {:?}", self.mode, mode);
        self.cancel_gestures();
        outcome.selection_changed |= self.selection.clear_pivot_override();
        self.mode = mode;
    }

    fn begin_gesture(&mut self) -> Result<()> {
        if self.gesture_active {
            return Ok(());
        }
        if self.marquee.is_active() {
            return Err(EditError::GestureConflict("marquee active"));
        }
        self.gesture_active = true;
        self.history.begin_drag(&self.scene);
        Ok(())
    }

    fn end_gesture(&mut self) {
        if !self.gesture_active {
            return;
        }
        self.transform.end();
        self.gesture_active = false;
        self.history.end_drag(&self.scene);
    }

    /// Stops every in-flight gesture. Frames already written are kept and
    /// committed as one entry.
    fn cancel_gestures(&mut self) {
        self.transform.cancel();
        if self.marquee.cancel() {
            self.marquee_preview.clear();
        }
        if self.gesture_active {
            self.gesture_active = false;
            self.history.end_drag(&self.scene);
        }
    }

    fn on_selection_change(&mut self, change: SelectionChange, outcome: &mut EditOutcome) {
        outcome.selection_changed |= change.changed;
        if change.reshaped {
            self.transform.cancel();
        }
    }

    fn on_scene_mutated(&mut self, changed: usize, now: Duration, outcome: &mut EditOutcome) {
        if changed == 0 {
            return;
        }
        outcome.scene_changed = true;
        self.history.notify_mutation(now);
    }

    fn after_restore(&mut self, outcome: &mut EditOutcome) {
        outcome.scene_changed = true;
        let change = self.selection.clear();
        outcome.selection_changed |= change.changed;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use bevy::math::{Quat, Vec2, Vec3};

    use super::*;
    use crate::marquee::CameraSnapshot;
    use crate::scene::{Link, Node, Room};
    use crate::selection::{PivotOverride, PivotReason};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn scene() -> Scene {
        let mut scene = Scene::default();
        scene.rooms.push(Room::new("r1", [0.0, 1.0, 0.0], [4.0, 2.0, 4.0]));
        let mut locked = Room::new("vault", [10.0, 1.0, 0.0], [2.0, 2.0, 2.0]);
        locked.locked = true;
        scene.rooms.push(locked);
        scene.nodes.push(Node::new("a", [1.0, 0.0, 0.0]).in_room("r1"));
        scene.nodes.push(Node::new("b", [-1.0, 0.0, 0.0]));
        scene.nodes.push(Node::new("gold", [10.0, 1.0, 0.0]).in_room("vault"));
        let mut link = Link::new("ab", "a", "b");
        link.breakpoints = vec![[0.0, 0.0, 1.0]];
        scene.links.push(link);
        scene
    }

    fn engine() -> EditorEngine {
        EditorEngine::new(EditorConfig::default(), scene())
    }

    fn select_group(engine: &mut EditorEngine, items: Vec<SelectionItem>) {
        engine.apply(EditCommand::SetSelection { items }, ms(0));
    }

    #[test]
    fn test_drag_produces_single_undo_step() {
        let mut engine = engine();
        let start = engine.scene().clone();
        select_group(&mut engine, vec![SelectionItem::node("b"), SelectionItem::room("r1")]);

        engine.apply(EditCommand::BeginGesture, ms(0));
        for i in 0..=50 {
            let x = i as f32 * 0.1;
            engine.apply(EditCommand::Translate { position: Vec3::new(x, 0.0, 0.0) }, ms(i * 16));
        }
        let outcome = engine.apply(EditCommand::EndGesture, ms(900));
        assert!(outcome.history_changed);
        assert!(outcome.can_undo);
        assert_eq!(engine.history().past_len(), 1);
        assert!(approx(engine.scene().node("b").unwrap().position(), Vec3::new(4.0, 0.0, 0.0)));
        assert!(approx(engine.scene().node("a").unwrap().position(), Vec3::new(6.0, 0.0, 0.0)));

        let outcome = engine.apply(EditCommand::Undo, ms(1000));
        assert!(outcome.scene_changed);
        assert!(outcome.can_redo);
        assert_eq!(engine.scene(), &start);
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_no_op_drag_leaves_no_history() {
        let mut engine = engine();
        select_group(&mut engine, vec![SelectionItem::node("a"), SelectionItem::node("b")]);
        engine.apply(EditCommand::BeginGesture, ms(0));
        engine.apply(EditCommand::Translate { position: Vec3::ONE }, ms(10));
        engine.apply(EditCommand::Translate { position: Vec3::ONE }, ms(20));
        let outcome = engine.apply(EditCommand::EndGesture, ms(30));
        assert!(!outcome.history_changed);
        assert!(!engine.can_undo());
        assert_eq!(engine.scene(), &scene());
    }

    #[test]
    fn test_locked_entities_refused() {
        let mut engine = engine();
        let outcome = engine.apply(
            EditCommand::SetSelection {
                items: vec![
                    SelectionItem::room("vault"),
                    SelectionItem::node("gold"),
                    SelectionItem::node("b"),
                ],
            },
            ms(0),
        );
        assert!(outcome.selection_changed);
        assert_eq!(engine.selection().items(), &[SelectionItem::node("b")]);

        let outcome = engine.apply(EditCommand::MoveRoom {
            room_id: "vault".to_string(),
            center: Vec3::ZERO,
        }, ms(0));
        assert!(!outcome.scene_changed);
        assert_eq!(engine.scene().room("vault").unwrap().center, [10.0, 1.0, 0.0]);
    }

    #[test]
    fn test_rotate_about_pivot_override() {
        let mut engine = engine();
        select_group(&mut engine, vec![SelectionItem::node("a"), SelectionItem::node("b")]);
        engine.apply(
            EditCommand::SetPivotOverride {
                pivot: PivotOverride {
                    position: [-1.0, 0.0, 0.0],
                    reason: PivotReason::Manual,
                    room_id: None,
                },
            },
            ms(0),
        );
        engine.apply(EditCommand::Rotate { orientation: Quat::IDENTITY }, ms(0));
        engine.apply(EditCommand::Rotate { orientation: Quat::from_rotation_y(FRAC_PI_2) }, ms(16));
        engine.apply(EditCommand::EndGesture, ms(32));
        assert!(approx(engine.scene().node("a").unwrap().position(), Vec3::new(-1.0, 0.0, -2.0)));
        assert!(approx(engine.scene().node("b").unwrap().position(), Vec3::new(-1.0, 0.0, 0.0)));
        assert_eq!(engine.history().past_len(), 1);
    }

    #[test]
    fn test_mode_change_cancels_session_and_pivot() {
        let mut engine = engine();
        select_group(&mut engine, vec![SelectionItem::node("a"), SelectionItem::node("b")]);
        engine.apply(
            EditCommand::SetPivotOverride {
                pivot: PivotOverride {
                    position: [0.0; 3],
                    reason: PivotReason::Manual,
                    room_id: None,
                },
            },
            ms(0),
        );
        engine.apply(EditCommand::Translate { position: Vec3::ZERO }, ms(0));
        engine.apply(EditCommand::Translate { position: Vec3::X }, ms(16));
        assert!(engine.is_session_active());

        let outcome = engine.apply(EditCommand::SetMode { mode: EditMode::Rotate }, ms(32));
        assert!(outcome.selection_changed);
        assert!(!engine.is_session_active());
        assert!(!engine.is_gesture_active());
        assert!(engine.selection().pivot_override().is_none());
        // Written frames are kept and committed.
        assert!(approx(engine.scene().node("b").unwrap().position(), Vec3::ZERO));
        assert!(engine.can_undo());
    }

    #[test]
    fn test_selection_reshape_discards_session() {
        let mut engine = engine();
        select_group(&mut engine, vec![SelectionItem::node("a"), SelectionItem::node("b")]);
        engine.apply(EditCommand::Translate { position: Vec3::ZERO }, ms(0));
        assert!(engine.is_session_active());
        engine.apply(EditCommand::ToggleSelection { item: SelectionItem::node("b") }, ms(10));
        assert!(!engine.is_session_active());
    }

    #[test]
    fn test_marquee_only_in_box_select() {
        let mut engine = engine();
        let camera = CameraSnapshot::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 90.0);
        let start = EditCommand::MarqueeStart {
            point: Vec2::ZERO,
            camera,
            viewport: Vec2::new(200.0, 200.0),
        };
        engine.apply(start.clone(), ms(0));
        assert!(engine.marquee_rect().is_none());

        engine.apply(EditCommand::SetMode { mode: EditMode::BoxSelect }, ms(0));
        engine.apply(start, ms(0));
        engine.apply(EditCommand::MarqueeMove { point: Vec2::new(200.0, 200.0) }, ms(10));
        assert!(!engine.marquee_preview().is_empty());
        let end = EditCommand::MarqueeEnd {
            point: Vec2::new(200.0, 200.0),
        };
        let outcome = engine.apply(end, ms(20));
        assert!(outcome.selection_changed);
        let items = engine.selection().items();
        assert!(items.contains(&SelectionItem::node("a")));
        assert!(items.contains(&SelectionItem::room("r1")));
        assert!(!items.contains(&SelectionItem::node("gold")));
        assert!(!items.contains(&SelectionItem::room("vault")));
        assert_eq!(engine.selection().primary(), Some(&SelectionItem::Pivot));

        // Handles are disabled while box-selecting.
        let outcome = engine.apply(EditCommand::Translate { position: Vec3::ONE }, ms(30));
        assert!(!outcome.scene_changed);
    }

    #[test]
    fn test_single_hit_marquee_moves_as_group() {
        let mut engine = engine();
        engine.apply(EditCommand::Select { item: Some(SelectionItem::node("b")) }, ms(0));
        engine.apply(EditCommand::SetMode { mode: EditMode::BoxSelect }, ms(0));
        let camera = CameraSnapshot::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 90.0);
        engine.apply(
            EditCommand::MarqueeStart {
                point: Vec2::new(105.0, 95.0),
                camera,
                viewport: Vec2::new(200.0, 200.0),
            },
            ms(0),
        );
        // Node `a` projects to (110, 100); `b` and the room center stay outside.
        engine.apply(EditCommand::MarqueeEnd { point: Vec2::new(120.0, 110.0) }, ms(10));
        assert_eq!(engine.selection().items(), &[SelectionItem::node("a")]);
        assert_eq!(engine.selection().primary(), Some(&SelectionItem::Pivot));
        assert!(engine.selection().is_group());

        engine.apply(EditCommand::SetMode { mode: EditMode::Translate }, ms(20));
        assert_eq!(engine.selection().primary(), Some(&SelectionItem::Pivot));
        // A group session only snapshots on its first frame.
        let outcome = engine.apply(EditCommand::Translate { position: Vec3::ONE }, ms(30));
        assert!(!outcome.scene_changed);
        assert!(engine.is_session_active());
        engine.apply(EditCommand::Translate { position: Vec3::new(1.5, 1.0, 1.0) }, ms(40));
        assert!(approx(engine.scene().node("a").unwrap().position(), Vec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_move_room_snaps_and_debounces() {
        let mut scene = scene();
        scene.rooms.push(Room::new("east", [4.5, 1.0, 0.0], [4.0, 2.0, 4.0]));
        let mut engine = EditorEngine::new(EditorConfig::default(), scene);

        let outcome = engine.apply(
            EditCommand::MoveRoom {
                room_id: "r1".to_string(),
                center: Vec3::new(0.4, 1.0, 0.0),
            },
            ms(0),
        );
        assert!(outcome.scene_changed);
        // Right edge at 2.4 snaps against the east room's left edge at 2.5.
        assert!(approx(engine.scene().room("r1").unwrap().center(), Vec3::new(0.5, 1.0, 0.0)));
        assert!(approx(engine.scene().node("a").unwrap().position(), Vec3::new(1.5, 0.0, 0.0)));

        engine.apply(
            EditCommand::MoveRoom {
                room_id: "r1".to_string(),
                center: Vec3::new(-1.0, 1.0, 0.0),
            },
            ms(10),
        );
        assert!(!engine.apply(EditCommand::Tick, ms(100)).history_changed);
        let outcome = engine.apply(EditCommand::Tick, ms(300));
        assert!(outcome.history_changed);
        assert!(outcome.can_undo);
        assert_eq!(engine.history().past_len(), 1);
    }

    #[test]
    fn test_remove_entity_prunes_selection_and_links() {
        let mut engine = engine();
        select_group(&mut engine, vec![SelectionItem::node("a"), SelectionItem::node("b")]);
        let outcome = engine.apply(EditCommand::RemoveEntity { id: "a".to_string() }, ms(0));
        assert!(outcome.scene_changed);
        assert!(outcome.selection_changed);
        assert!(engine.scene().link("ab").is_none());
        assert_eq!(engine.selection().items(), &[SelectionItem::node("b")]);

        let outcome = engine.apply(EditCommand::RemoveEntity { id: "missing".to_string() }, ms(0));
        assert!(!outcome.scene_changed);
    }

    #[test]
    fn test_add_node_then_undo() {
        let mut engine = engine();
        engine.apply(EditCommand::AddNode { node: Node::new("", [0.0; 3]) }, ms(0));
        assert_eq!(engine.scene().nodes.len(), 4);
        engine.apply(EditCommand::Undo, ms(10));
        assert_eq!(engine.scene().nodes.len(), 3);
        engine.apply(EditCommand::Redo, ms(20));
        assert_eq!(engine.scene().nodes.len(), 4);
    }

    #[test]
    fn test_load_scene_resets_history() {
        let mut engine = engine();
        engine.apply(EditCommand::AddNode { node: Node::new("x", [0.0; 3]) }, ms(0));
        engine.apply(EditCommand::Tick, ms(1000));
        assert!(engine.can_undo());
        let outcome = engine.apply(EditCommand::LoadScene { scene: Scene::default() }, ms(1100));
        assert!(outcome.scene_changed);
        assert!(!outcome.can_undo);
        assert!(engine.scene().nodes.is_empty());
    }

    #[test]
    fn test_edit_scene_is_watched() {
        let mut engine = engine();
        engine.apply(EditCommand::Select { item: Some(SelectionItem::node("b")) }, ms(0));
        let outcome = engine.edit_scene(ms(0), |scene| {
            scene.remove_node("b");
        });
        assert!(outcome.scene_changed);
        assert!(outcome.selection_changed);
        assert!(engine.history().has_pending());
        assert!(engine.apply(EditCommand::Tick, ms(250)).history_changed);
    }

    #[test]
    fn test_non_finite_translate_rejected() {
        let mut engine = engine();
        engine.apply(EditCommand::Select { item: Some(SelectionItem::node("b")) }, ms(0));
        let outcome = engine.apply(
            EditCommand::Translate {
                position: Vec3::new(f32::NAN, 0.0, 0.0),
            },
            ms(0),
        );
        assert!(!outcome.scene_changed);
        assert_eq!(engine.scene().node("b").unwrap().position, [-1.0, 0.0, 0.0]);
    }
}
