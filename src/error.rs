//! Error types
//!
//! Malformed floorplans are fatal to a compile. Missing textures are not
//! errors at all; see `material`.

use thiserror::Error;

/// Why a single floorplan object could not be turned into a solid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedObject {
    #[error("unknown object type `{0}`")]
    UnknownType(String),

    #[error("wall start and end coincide at ({x}, {z})")]
    DegenerateWall { x: f32, z: f32 },

    #[error("`{field}` must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },

    #[error("`{kind}` object is missing `{field}`")]
    MissingField { kind: String, field: &'static str },
}

/// A floorplan that cannot be compiled
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FloorplanError {
    #[error("floor {floor}, object {object}: {source}")]
    Object {
        floor: usize,
        object: usize,
        #[source]
        source: MalformedObject,
    },

    #[error("floor {floor}: height must be a positive number, got {height}")]
    FloorHeight { floor: usize, height: f32 },
}

/// Viewer configuration could not be read
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Reject zero, negative and NaN values
pub fn require_positive(field: &'static str, value: f32) -> Result<f32, MalformedObject> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(MalformedObject::NonPositive { field, value })
    }
}
