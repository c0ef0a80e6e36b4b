//! Object generators
//!
//! One generator per floorplan object kind. A generator is a plain
//! function from (placement, object, materials) to a positioned `Solid`;
//! the registry maps the object's `type` string to it, so new kinds only
//! need a `register` call.

mod floor;
mod wall;

pub use floor::*;
pub use wall::*;

use std::collections::BTreeMap;
use crate::error::MalformedObject;
use crate::material::{MaterialSource, MaterialSpec};
use crate::world::{Floor, FloorObject, Vec2, Vec3};

/// Where on the building an object is being generated
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    /// The storey the object belongs to
    pub floor: &'a Floor,
    /// World-space elevation of that storey's floor surface
    pub base_height: f32,
}

/// A positioned, textured box
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    /// Object kind this came from
    pub kind: String,
    /// Box extents along local (x, y, z)
    pub size: Vec3,
    /// World-space center
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub yaw: f32,
    pub material: MaterialSpec,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Solid {
    pub fn new(kind: &str, size: Vec3, position: Vec3, yaw: f32, material: MaterialSpec) -> Self {
        Self {
            kind: kind.to_string(),
            size,
            position,
            yaw,
            material,
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    /// Map a point in box-local space to world space
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        local.rotate_y(self.yaw) + self.position
    }

    /// World-space corners; bit 0 = +x, bit 1 = +y, bit 2 = +z
    pub fn corners(&self) -> [Vec3; 8] {
        let half = self.size * 0.5;
        std::array::from_fn(|i| {
            let sx = if i & 1 != 0 { half.x } else { -half.x };
            let sy = if i & 2 != 0 { half.y } else { -half.y };
            let sz = if i & 4 != 0 { half.z } else { -half.z };
            self.local_to_world(Vec3::new(sx, sy, sz))
        })
    }
}

#[cfg(test)]
impl Solid {
    /// Elevation of the top face
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y * 0.5
    }

    /// Elevation of the bottom face
    pub fn bottom(&self) -> f32 {
        self.position.y - self.size.y * 0.5
    }
}

/// Generator function signature
pub type GenerateFn =
    fn(&Placement, &FloorObject, &mut dyn MaterialSource) -> Result<Solid, MalformedObject>;

/// Object kind -> generator
#[derive(Clone)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, GenerateFn>,
}

impl GeneratorRegistry {
    /// Registry with no generators
    pub fn empty() -> Self {
        Self { generators: BTreeMap::new() }
    }

    /// Registry with the built-in `floor` and `wall` generators
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(FLOOR_KIND, generate_floor);
        registry.register(WALL_KIND, generate_wall);
        registry
    }

    /// Add a generator, replacing any existing one for `kind`
    pub fn register(&mut self, kind: &str, generator: GenerateFn) {
        self.generators.insert(kind.to_string(), generator);
    }

    pub fn get(&self, kind: &str) -> Option<GenerateFn> {
        self.generators.get(kind).copied()
    }

    /// Registered kinds in sorted order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(|k| k.as_str())
    }

    /// Look up and run the generator for `object.kind`
    pub fn generate(
        &self,
        placement: &Placement,
        object: &FloorObject,
        materials: &mut dyn MaterialSource,
    ) -> Result<Solid, MalformedObject> {
        let generator = self
            .get(&object.kind)
            .ok_or_else(|| MalformedObject::UnknownType(object.kind.clone()))?;
        generator(placement, object, materials)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Pull a required field out of an object
pub fn require<T: Copy>(object: &FloorObject, field: &'static str, value: Option<T>) -> Result<T, MalformedObject> {
    value.ok_or_else(|| MalformedObject::MissingField {
        kind: object.kind.clone(),
        field,
    })
}

/// Pull a required point out of an object, rejecting NaN and infinity
pub fn require_point(object: &FloorObject, field: &'static str, value: Option<Vec2>) -> Result<Vec2, MalformedObject> {
    let point = require(object, field, value)?;
    if point.is_finite() {
        Ok(point)
    } else {
        Err(MalformedObject::NonFinite { field })
    }
}

/// Texture scale with the default applied and validated
pub fn texture_scale(object: &FloorObject) -> Result<f32, MalformedObject> {
    crate::error::require_positive("scale", object.texture_scale())
}
