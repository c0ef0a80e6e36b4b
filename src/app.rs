//! Scene build context
//!
//! Everything one viewing session owns: the compiled scene, the texture
//! cache behind it, the camera and the controllers. Built once from a
//! floorplan before the frame loop starts.

use macroquad::prelude::{clear_background, set_camera, set_default_camera};
use crate::compiler::{CompileStats, FloorplanCompiler};
use crate::config::ViewerConfig;
use crate::error::FloorplanError;
use crate::material::{Color, MaterialResolver};
use crate::shell::{ControllerEvent, ControllerRig, PanKey, Scene, TextureCache, ViewCamera};
use crate::world::Floorplan;

pub struct SceneBuildContext {
    pub config: ViewerConfig,
    pub scene: Scene,
    pub textures: TextureCache,
    pub camera: ViewCamera,
    pub controllers: ControllerRig,
    pub stats: CompileStats,
}

impl SceneBuildContext {
    /// Compile the floorplan and set up camera and controllers.
    ///
    /// Texture files are only queued here; call `load_textures` next.
    pub fn build(floorplan: &Floorplan, config: ViewerConfig) -> Result<Self, FloorplanError> {
        Self::build_with(&FloorplanCompiler::new(), floorplan, config, TextureCache::new())
    }

    pub fn build_with(
        compiler: &FloorplanCompiler,
        floorplan: &Floorplan,
        config: ViewerConfig,
        textures: TextureCache,
    ) -> Result<Self, FloorplanError> {
        let [r, g, b] = config.background;
        let mut scene = Scene::new(Color::new(r, g, b), floorplan.sky.sun_direction());
        let mut materials = MaterialResolver::new(config.texture_root.clone(), textures);

        let stats = compiler.compile(floorplan, &mut materials, &mut scene)?;

        let mut controllers = ControllerRig::new();
        let camera = ViewCamera::new(&config);
        controllers.follow(camera.position);
        for controller in controllers.controllers() {
            scene.attach(controller);
        }

        Ok(Self {
            config,
            scene,
            textures: materials.into_source(),
            camera,
            controllers,
            stats,
        })
    }

    /// Load the textures the scene draws with and bake its meshes
    pub async fn load_textures(&mut self) {
        self.textures.populate(&self.scene.texture_handles()).await;
        self.scene.bake(&self.textures);
    }

    /// Apply one frame of input
    pub fn update(&mut self, keys: &[PanKey], events: &[ControllerEvent]) {
        for key in keys {
            self.camera.pan(*key);
        }
        self.controllers.apply(events);
        self.controllers.follow(self.camera.position);
    }

    /// One display refresh: poll input, update, draw
    pub fn tick(&mut self) {
        let keys = PanKey::poll();
        let events = ControllerRig::poll_events();
        self.update(&keys, &events);

        let bg = self.scene.background;
        clear_background(macroquad::prelude::Color::from_rgba(bg.r, bg.g, bg.b, bg.a));

        set_camera(&self.camera.to_camera3d());
        self.scene.draw(self.controllers.controllers(), self.config.controller_ray_length);
        set_default_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{create_demo_floorplan, Floor, FloorObject, Vec3};

    #[test]
    fn test_build_demo_scene() {
        let config = ViewerConfig {
            texture_root: "does/not/exist".to_string(),
            ..ViewerConfig::default()
        };
        let ctx = SceneBuildContext::build(&create_demo_floorplan(), config).unwrap();

        assert_eq!(ctx.stats.solids, 3);
        assert_eq!(ctx.scene.solids().len(), 3);
        // Every channel missing on disk: materials resolve untextured
        assert_eq!(ctx.textures.pending(), 0);
        assert!(ctx.scene.solids().iter().all(|s| !s.material.is_textured()));
        // Both controllers are part of the scene
        assert!(ctx.controllers.controllers().iter().all(|c| ctx.scene.is_attached(c)));
    }

    #[test]
    fn test_queued_textures_are_shared() {
        let ctx = SceneBuildContext::build_with(
            &FloorplanCompiler::new(),
            &create_demo_floorplan(),
            ViewerConfig::default(),
            TextureCache::without_file_check(),
        )
        .unwrap();

        // Three distinct materials, four channels each
        assert_eq!(ctx.textures.pending(), 12);
        // Only the color maps get drawn
        assert_eq!(ctx.scene.texture_handles().len(), 3);
    }

    #[test]
    fn test_malformed_floorplan_fails_build() {
        let mut plan = create_demo_floorplan();
        plan.floors.push(Floor::new(3.0).with(FloorObject::new("window", "Glass")));

        let err = SceneBuildContext::build(&plan, ViewerConfig::default()).err().unwrap();
        assert!(matches!(err, FloorplanError::Object { floor: 1, object: 0, .. }));
    }

    #[test]
    fn test_update_moves_camera_and_controllers() {
        let mut ctx = SceneBuildContext::build(&create_demo_floorplan(), ViewerConfig::default()).unwrap();
        ctx.update(&[PanKey::Right, PanKey::Right], &[ControllerEvent::SelectStart(0)]);

        assert_eq!(ctx.camera.position, Vec3::new(1.0, 10.0, 0.0));
        let left = &ctx.controllers.controllers()[0];
        assert!(left.is_selecting);
        assert!((left.position.x - 0.7).abs() < 1e-6);
    }
}
