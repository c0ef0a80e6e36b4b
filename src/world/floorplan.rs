//! Floorplan description types
//!
//! Pure data structures with minimal behavior. Turning them into geometry
//! is the job of `generator` and `compiler`.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use super::math::{Vec2, Vec3};

/// Distance of the sun from the origin used by the reference sky setup
pub const SUN_DISTANCE: f32 = 400_000.0;

/// Sky shader parameters.
///
/// Carried through compilation untouched; only the sun position is ever
/// derived from it, and only by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sky {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub luminance: f32,
    /// Sun elevation, 0..1
    pub inclination: f32,
    /// Sun heading, 0..1 (0.25 = facing front)
    pub azimuth: f32,
    /// Whether the sun disc is visible
    pub sun: bool,
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 2.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            luminance: 1.0,
            inclination: 0.4,
            azimuth: 0.125,
            sun: false,
        }
    }
}

impl Sky {
    /// Sun position at `distance` from the origin
    pub fn sun_position(&self, distance: f32) -> Vec3 {
        let theta = PI * (self.inclination - 0.5);
        let phi = 2.0 * PI * (self.azimuth - 0.5);

        Vec3::new(
            distance * phi.cos(),
            distance * phi.sin() * theta.sin(),
            distance * phi.sin() * theta.cos(),
        )
    }

    /// Unit vector pointing at the sun
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_position(SUN_DISTANCE).normalize()
    }
}

/// One declarative object on a floor.
///
/// `kind` selects the generator. Type-specific fields are optional here;
/// each generator checks for the ones it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorObject {
    #[serde(rename = "type")]
    pub kind: String,
    /// Texture set name, e.g. `Brick_Wall_011`
    pub material: String,
    /// Texture tiling multiplier (defaults to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Floor surface extents (width, depth)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec2>,
    /// Floor surface center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec2>,
    /// Wall centerline start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Vec2>,
    /// Wall centerline end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Vec2>,
    /// Wall height override (defaults to the floor's height)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl FloorObject {
    /// Bare object of an arbitrary kind, for custom generators
    pub fn new(kind: &str, material: &str) -> Self {
        Self {
            kind: kind.to_string(),
            material: material.to_string(),
            scale: None,
            size: None,
            position: None,
            start: None,
            end: None,
            height: None,
        }
    }

    /// Floor surface of `size` centered on `position`
    pub fn floor(material: &str, size: Vec2, position: Vec2) -> Self {
        Self {
            size: Some(size),
            position: Some(position),
            ..Self::new("floor", material)
        }
    }

    /// Wall along the centerline `start` -> `end`
    pub fn wall(material: &str, start: Vec2, end: Vec2) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::new("wall", material)
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Tiling multiplier with the default applied. Zero counts as unset.
    pub fn texture_scale(&self) -> f32 {
        match self.scale {
            Some(scale) if scale != 0.0 => scale,
            _ => 1.0,
        }
    }
}

/// One storey: a ceiling height and the objects standing on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Ceiling height above this floor's base
    pub height: f32,
    #[serde(default)]
    pub objects: Vec<FloorObject>,
}

impl Floor {
    pub fn new(height: f32) -> Self {
        Self { height, objects: Vec::new() }
    }

    /// Add an object, builder style
    pub fn with(mut self, object: FloorObject) -> Self {
        self.objects.push(object);
        self
    }
}

/// Stacked floors, listed bottom to top
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Floorplan {
    #[serde(default)]
    pub sky: Sky,
    pub floors: Vec<Floor>,
}

impl Floorplan {
    pub fn new(sky: Sky) -> Self {
        Self { sky, floors: Vec::new() }
    }

    /// Add a floor on top of the existing ones and return its index
    pub fn add_floor(&mut self, floor: Floor) -> usize {
        let index = self.floors.len();
        self.floors.push(floor);
        index
    }

    /// Total number of objects across all floors
    pub fn object_count(&self) -> usize {
        self.floors.iter().map(|f| f.objects.len()).sum()
    }
}
