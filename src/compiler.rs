//! Floorplan compilation
//!
//! Walks the floors bottom to top, keeps a running base height, and hands
//! each object to its generator. Every solid is generated before the first
//! one reaches the sink, so a malformed floorplan leaves the scene empty.

use log::{debug, info};
use crate::error::FloorplanError;
use crate::generator::{GenerateFn, GeneratorRegistry, Placement, Solid};
use crate::material::MaterialSource;
use crate::world::Floorplan;

/// Receiver of generated solids (the scene graph)
pub trait SceneSink {
    fn insert(&mut self, solid: Solid);
}

impl SceneSink for Vec<Solid> {
    fn insert(&mut self, solid: Solid) {
        self.push(solid);
    }
}

/// Summary of one compile pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompileStats {
    pub floors: usize,
    pub solids: usize,
    /// Base height the next floor would get (sum of all floor heights)
    pub top_height: f32,
}

/// Base height of every floor: the sum of the heights below it
pub fn base_heights(plan: &Floorplan) -> Vec<f32> {
    plan.floors
        .iter()
        .scan(0.0_f32, |height, floor| {
            let base = *height;
            *height += floor.height;
            Some(base)
        })
        .collect()
}

/// Compiles floorplans using a set of generators
#[derive(Clone, Default)]
pub struct FloorplanCompiler {
    generators: GeneratorRegistry,
}

impl FloorplanCompiler {
    /// Compiler with the built-in generators
    pub fn new() -> Self {
        Self::with_registry(GeneratorRegistry::with_defaults())
    }

    pub fn with_registry(generators: GeneratorRegistry) -> Self {
        Self { generators }
    }

    pub fn register(&mut self, kind: &str, generator: GenerateFn) {
        self.generators.register(kind, generator);
    }

    /// Generate every object and insert the results into `sink`.
    ///
    /// Solids arrive in floorplan order: floor by floor, object by object.
    pub fn compile(
        &self,
        plan: &Floorplan,
        materials: &mut dyn MaterialSource,
        sink: &mut dyn SceneSink,
    ) -> Result<CompileStats, FloorplanError> {
        let mut solids = Vec::with_capacity(plan.object_count());
        let mut base_height = 0.0_f32;
        debug!("Generators: {:?}", self.generators.kinds().collect::<Vec<_>>());

        for (floor_index, floor) in plan.floors.iter().enumerate() {
            if !(floor.height > 0.0 && floor.height.is_finite()) {
                return Err(FloorplanError::FloorHeight {
                    floor: floor_index,
                    height: floor.height,
                });
            }

            let placement = Placement { floor, base_height };
            for (object_index, object) in floor.objects.iter().enumerate() {
                let solid = self
                    .generators
                    .generate(&placement, object, materials)
                    .map_err(|source| FloorplanError::Object {
                        floor: floor_index,
                        object: object_index,
                        source,
                    })?;
                solids.push(solid);
            }

            debug!("Floor {} at base height {:.4}: {} objects", floor_index, base_height, floor.objects.len());
            base_height += floor.height;
        }

        let stats = CompileStats {
            floors: plan.floors.len(),
            solids: solids.len(),
            top_height: base_height,
        };

        for solid in solids {
            sink.insert(solid);
        }

        info!("Compiled {} floors into {} solids", stats.floors, stats.solids);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedObject;
    use crate::generator::FLOOR_THICKNESS;
    use crate::material::tests::resolver;
    use crate::material::test_material;
    use crate::world::{create_demo_floorplan, Floor, FloorObject, Sky, Vec2, Vec3};

    fn post(
        placement: &Placement,
        object: &FloorObject,
        _materials: &mut dyn MaterialSource,
    ) -> Result<Solid, MalformedObject> {
        let at = object.position.unwrap_or(Vec2::ZERO);
        let height = placement.floor.height;
        Ok(Solid::new(
            &object.kind,
            Vec3::new(0.2, height, 0.2),
            at.at_height(placement.base_height + height / 2.0),
            0.0,
            test_material(),
        ))
    }

    fn two_storeys() -> Floorplan {
        let mut plan = Floorplan::new(Sky::default());
        plan.add_floor(Floor::new(2.7432).with(FloorObject::wall(
            "Brick",
            Vec2::new(5.0, -5.0),
            Vec2::new(-5.0, -5.0),
        )));
        plan.add_floor(Floor::new(3.0).with(FloorObject::floor(
            "Stone",
            Vec2::new(10.0, 10.0),
            Vec2::ZERO,
        )));
        plan
    }

    #[test]
    fn test_base_heights_accumulate() {
        let mut plan = two_storeys();
        plan.add_floor(Floor::new(2.5));
        let bases = base_heights(&plan);

        assert_eq!(bases.len(), 3);
        assert_eq!(bases[0], 0.0);
        assert!((bases[1] - 2.7432).abs() < 1e-6);
        assert!((bases[2] - 5.7432).abs() < 1e-5);
    }

    #[test]
    fn test_second_floor_stacks_on_first() {
        let plan = two_storeys();
        let mut sink: Vec<Solid> = Vec::new();
        let stats = FloorplanCompiler::new().compile(&plan, &mut resolver(), &mut sink).unwrap();

        assert_eq!(stats.solids, 2);
        assert!((stats.top_height - 5.7432).abs() < 1e-5);

        // Floor 1 objects are inserted before floor 2 objects
        assert_eq!(sink[0].kind, "wall");
        assert_eq!(sink[1].kind, "floor");
        assert!((sink[0].bottom() - 0.0).abs() < 1e-6);
        assert!((sink[1].top() - 2.7432).abs() < 1e-5);
        assert!((sink[1].position.y - (2.7432 - FLOOR_THICKNESS / 2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_demo_compiles() {
        let mut sink: Vec<Solid> = Vec::new();
        let stats = FloorplanCompiler::new()
            .compile(&create_demo_floorplan(), &mut resolver(), &mut sink)
            .unwrap();

        assert_eq!(stats.floors, 1);
        assert_eq!(sink.len(), 3);
        assert!((sink[2].size.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_type_aborts_without_partial_scene() {
        let mut plan = two_storeys();
        plan.floors[1].objects.push(FloorObject::new("staircase", "Wood"));

        let mut sink: Vec<Solid> = Vec::new();
        let err = FloorplanCompiler::new().compile(&plan, &mut resolver(), &mut sink).unwrap_err();

        assert_eq!(
            err,
            FloorplanError::Object {
                floor: 1,
                object: 1,
                source: MalformedObject::UnknownType("staircase".to_string()),
            }
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_degenerate_wall_aborts() {
        let mut plan = Floorplan::default();
        plan.add_floor(Floor::new(2.0).with(FloorObject::wall("Brick", Vec2::ZERO, Vec2::ZERO)));

        let mut sink: Vec<Solid> = Vec::new();
        let err = FloorplanCompiler::new().compile(&plan, &mut resolver(), &mut sink).unwrap_err();
        assert!(matches!(
            err,
            FloorplanError::Object { source: MalformedObject::DegenerateWall { .. }, .. }
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_registered_kind_compiles_on_upper_floor() {
        let mut plan = two_storeys();
        let mut post_object = FloorObject::new("post", "Oak");
        post_object.position = Some(Vec2::new(1.0, 1.0));
        plan.floors[1].objects.push(post_object);

        let mut compiler = FloorplanCompiler::new();
        let mut sink: Vec<Solid> = Vec::new();
        assert!(compiler.compile(&plan, &mut resolver(), &mut sink).is_err());
        assert!(sink.is_empty());

        compiler.register("post", post);
        let stats = compiler.compile(&plan, &mut resolver(), &mut sink).unwrap();

        assert_eq!(stats.solids, 3);
        assert_eq!(sink[2].kind, "post");
        assert!((sink[2].bottom() - 2.7432).abs() < 1e-5);
        assert!((sink[2].top() - 5.7432).abs() < 1e-5);
        // Built-in kinds still compile alongside it
        assert_eq!(sink[0].kind, "wall");
        assert_eq!(sink[1].kind, "floor");
    }

    #[test]
    fn test_non_positive_floor_height_aborts() {
        let mut plan = two_storeys();
        plan.floors[1].height = 0.0;

        let mut sink: Vec<Solid> = Vec::new();
        let err = FloorplanCompiler::new().compile(&plan, &mut resolver(), &mut sink).unwrap_err();
        assert_eq!(err, FloorplanError::FloorHeight { floor: 1, height: 0.0 });
    }

    #[test]
    fn test_compile_is_deterministic() {
        let plan = create_demo_floorplan();
        let compiler = FloorplanCompiler::new();
        let mut materials = resolver();

        let mut first: Vec<Solid> = Vec::new();
        let mut second: Vec<Solid> = Vec::new();
        compiler.compile(&plan, &mut materials, &mut first).unwrap();
        compiler.compile(&plan, &mut materials, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_floorplan() {
        let mut sink: Vec<Solid> = Vec::new();
        let stats = FloorplanCompiler::new()
            .compile(&Floorplan::default(), &mut resolver(), &mut sink)
            .unwrap();
        assert_eq!(stats, CompileStats { floors: 0, solids: 0, top_height: 0.0 });
    }
}
