//! Viewer configuration
//!
//! Uses RON (Rusty Object Notation), read from `floorplan-vr.ron` next to
//! the executable's working directory. Every field has a default, so a
//! partial file (or none at all) is fine.

use std::fs;
use std::path::Path;
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// Default config file name
pub const CONFIG_FILE: &str = "floorplan-vr.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    /// Directory holding one folder per texture set
    pub texture_root: String,
    /// Clear color (RGB)
    pub background: [u8; 3],
    /// Vertical field of view
    pub fov_degrees: f32,
    /// Camera height at startup
    pub camera_height: f32,
    /// Camera height after pressing Space
    pub reset_height: f32,
    /// Distance moved per key press
    pub pan_speed: f32,
    /// Length of the controller pointer rays
    pub controller_ray_length: f32,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "Floorplan VR".to_string(),
            window_width: 1280,
            window_height: 720,
            texture_root: "textures".to_string(),
            background: [0x50, 0x50, 0x50],
            fov_degrees: 70.0,
            camera_height: 10.0,
            reset_height: 5.0,
            pan_speed: 0.5,
            controller_ray_length: 1.0,
            log_level: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Parsed log level, falling back to `Info` for unknown names
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// RON reader shared by every file this crate reads.
///
/// `implicit_some` lets optional fields be written bare (`scale: 0.5`)
/// instead of `scale: Some(0.5)`.
pub fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ViewerConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<ViewerConfig, ConfigError> {
    Ok(ron_options().from_str(s)?)
}

/// Load `path`, or `None` when there is no such file
pub fn load_config_if_present<P: AsRef<Path>>(path: P) -> Result<Option<ViewerConfig>, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    load_config(path).map(Some)
}
