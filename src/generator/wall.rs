//! Wall generator
//!
//! A wall is a box whose length runs along local Z, rotated about Y so
//! that it lies on the segment between its two endpoints.

use log::debug;
use crate::error::{require_positive, MalformedObject};
use crate::material::MaterialSource;
use crate::world::{segment_yaw, FloorObject, Vec2, Vec3};
use super::{require_point, texture_scale, Placement, Solid};

pub const WALL_KIND: &str = "wall";

/// Wall thickness (6 inches)
pub const WALL_THICKNESS: f32 = 0.1524;

/// Wall standing on the placement's base height
pub fn generate_wall(
    placement: &Placement,
    object: &FloorObject,
    materials: &mut dyn MaterialSource,
) -> Result<Solid, MalformedObject> {
    let start = require_point(object, "start", object.start)?;
    let end = require_point(object, "end", object.end)?;
    if start == end {
        return Err(MalformedObject::DegenerateWall { x: start.x, z: start.z });
    }

    let height = match object.height {
        Some(h) => require_positive("height", h)?,
        None => require_positive("floor.height", placement.floor.height)?,
    };
    let scale = texture_scale(object)?;

    let length = start.distance(end);
    let yaw = segment_yaw(start, end);
    let material = materials.resolve(&object.material, Vec2::new(length, height), scale);
    let position = start.midpoint(end).at_height(placement.base_height + height / 2.0);

    debug!("Wall {:.3} long, {:.3} high at {:?}, yaw {:.3}", length, height, position, yaw);

    Ok(Solid::new(
        &object.kind,
        Vec3::new(WALL_THICKNESS, height, length),
        position,
        yaw,
        material,
    ))
}
