//! Bevy integration for the editor engine.
//!
//! The engine itself is plain Rust; this module exposes it as ECS resources,
//! feeds it from a shared command queue and reports changes as messages.

pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

pub use events::*;
pub use plugin::SpatialEditHeadlessPlugin;
pub use resources::*;
pub use systems::{process_edit_commands, tick_history_debounce};
