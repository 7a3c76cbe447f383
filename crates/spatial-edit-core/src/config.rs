//! Engine configuration.
//!
//! Every field has a default so a partial JSON document is enough to
//! override a single knob.

use std::time::Duration;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Top-level engine configuration.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history: HistoryConfig,
    pub marquee: MarqueeConfig,
    pub snap: SnapConfig,
}

impl EditorConfig {
    /// Parses a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Undo history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of entries kept in the undo stack.
    pub capacity: usize,
    /// Quiet period before a scene mutation is committed.
    pub debounce_ms: u64,
}

impl HistoryConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 80,
            debounce_ms: 250,
        }
    }
}

/// Box selection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Both rectangle sides must exceed this (in pixels) to count as a box.
    pub min_size_px: f32,
    /// Near clip plane of the projection.
    pub near: f32,
    /// Far clip plane of the projection.
    pub far: f32,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            min_size_px: 3.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

/// Room-to-room edge snapping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub enabled: bool,
    /// Maximum edge distance that still snaps (world units).
    pub distance: f32,
    /// Slack added to the overlap test on the parallel axis.
    pub tolerance: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            distance: 0.25,
            tolerance: 0.05,
        }
    }
}
