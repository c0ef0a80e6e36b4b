//! Built-in demo floorplan
//!
//! A single ~9ft storey: a stone floor slab, a full-height brick wall
//! along the back, and a low stone wall in front of it.

use super::{Floor, FloorObject, Floorplan, Sky, Vec2};

/// Ceiling height of the demo storey (9 feet)
pub const DEMO_FLOOR_HEIGHT: f32 = 2.7432;

/// Create the demo floorplan
pub fn create_demo_floorplan() -> Floorplan {
    let mut plan = Floorplan::new(Sky::default());

    plan.add_floor(
        Floor::new(DEMO_FLOOR_HEIGHT)
            .with(FloorObject::floor(
                "Stone_Floor_002",
                Vec2::new(10.0, 10.0),
                Vec2::ZERO,
            ))
            .with(
                FloorObject::wall("Brick_Wall_011", Vec2::new(5.0, -5.0), Vec2::new(-5.0, -5.0))
                    .with_scale(0.5),
            )
            .with(
                FloorObject::wall("Stone_Wall_004", Vec2::new(2.0, -4.0), Vec2::new(-2.0, -4.0))
                    .with_scale(0.75)
                    .with_height(1.0),
            ),
    );

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_layout() {
        let plan = create_demo_floorplan();
        assert_eq!(plan.floors.len(), 1);
        assert_eq!(plan.object_count(), 3);
        assert!(!plan.sky.sun);
    }
}
