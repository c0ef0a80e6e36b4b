//! Floor slab generator

use log::debug;
use crate::error::{require_positive, MalformedObject};
use crate::material::MaterialSource;
use crate::world::{FloorObject, Vec3};
use super::{require, require_point, texture_scale, Placement, Solid};

pub const FLOOR_KIND: &str = "floor";

/// Slab thickness (6 inches)
pub const FLOOR_THICKNESS: f32 = 0.1524;

/// Flat slab whose top face sits exactly at the placement's base height
pub fn generate_floor(
    placement: &Placement,
    object: &FloorObject,
    materials: &mut dyn MaterialSource,
) -> Result<Solid, MalformedObject> {
    let size = require(object, "size", object.size)?;
    let width = require_positive("size.width", size.x)?;
    let depth = require_positive("size.depth", size.z)?;
    let center = require_point(object, "position", object.position)?;
    let scale = texture_scale(object)?;

    let material = materials.resolve(&object.material, size, scale);
    let position = center.at_height(placement.base_height - FLOOR_THICKNESS / 2.0);

    debug!("Floor {}x{} at {:?}", width, depth, position);

    Ok(Solid::new(
        &object.kind,
        Vec3::new(width, FLOOR_THICKNESS, depth),
        position,
        0.0,
        material,
    ))
}
