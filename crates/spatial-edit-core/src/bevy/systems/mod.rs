//! ECS Systems for the editor.

pub mod command;
pub mod history;

pub use command::*;
pub use history::*;
