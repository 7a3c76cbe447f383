//! Spatial Edit Core Library
//!
//! Transform sessions, constraints and undo history for a 3D scene editor
//! made of rooms, nodes, links and picture planes.
//!
//! The engine is plain Rust driven by [`EditCommand`] values. The `bevy`
//! module wraps it in a headless plugin fed by a shared command queue.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod command;
pub mod config;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod history;
pub mod marquee;
pub mod scene;
pub mod selection;
pub mod transform;

// Bevy integration
pub mod bevy;

pub use command::{EditCommand, EditMode, EditOutcome};
pub use config::{EditorConfig, HistoryConfig, MarqueeConfig, SnapConfig};
pub use engine::EditorEngine;
pub use error::{EditError, Result};
pub use history::HistoryManager;
pub use marquee::{CameraSnapshot, MarqueeProjector, MarqueeResult, ScreenRect};
pub use scene::{
    BoundsShape, Link, Node, PicturePlane, Room, RoomBounds, Scene, TimedAction,
};
pub use selection::{PivotOverride, PivotReason, SelectionItem, SelectionKind, SelectionModel};
pub use transform::{RotateSession, SessionKind, TransformController, TranslateSession};
