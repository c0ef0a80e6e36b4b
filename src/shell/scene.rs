//! Scene graph
//!
//! The `SceneSink` the compiler fills. Solids are kept as data until the
//! textures have been populated, then baked into GPU meshes once.

use log::{debug, info};
use macroquad::prelude as mq;
use crate::compiler::SceneSink;
use crate::generator::Solid;
use crate::material::{Color, TextureHandle};
use crate::world::Vec3;
use super::controller::Controller;
use super::mesh::{solid_mesh, MeshData};
use super::textures::TextureCache;

/// Pointer ray gradient, grip to tip
const RAY_NEAR: Color = Color { r: 128, g: 128, b: 128, a: 255 };
const RAY_FAR: Color = Color { r: 0, g: 0, b: 0, a: 255 };
const RAY_SELECTING: Color = Color { r: 255, g: 255, b: 255, a: 255 };

/// Segments per pointer ray, to fake the vertex-color gradient
const RAY_SEGMENTS: usize = 8;

fn to_mq_color(c: Color) -> mq::Color {
    mq::Color::from_rgba(c.r, c.g, c.b, c.a)
}

fn to_mq_vec3(v: Vec3) -> mq::Vec3 {
    mq::vec3(v.x, v.y, v.z)
}

fn to_mq_mesh(data: &MeshData, texture: Option<mq::Texture2D>) -> mq::Mesh {
    let vertices = data
        .positions
        .iter()
        .zip(&data.uvs)
        .zip(&data.colors)
        .map(|((p, [u, v]), c)| mq::Vertex::new(p.x, p.y, p.z, *u, *v, to_mq_color(*c)))
        .collect();

    mq::Mesh {
        vertices,
        indices: data.indices.clone(),
        texture,
    }
}

pub struct Scene {
    pub background: Color,
    /// Unit vector towards the sun, for face shading
    pub sun_dir: Vec3,
    solids: Vec<Solid>,
    meshes: Vec<mq::Mesh>,
    /// Indices of controllers parented to the scene
    attached: Vec<usize>,
}

impl Scene {
    pub fn new(background: Color, sun_dir: Vec3) -> Self {
        Self {
            background,
            sun_dir,
            solids: Vec::new(),
            meshes: Vec::new(),
            attached: Vec::new(),
        }
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    /// Parent a controller node to the scene so it gets drawn
    pub fn attach(&mut self, controller: &Controller) {
        if !self.attached.contains(&controller.index) {
            self.attached.push(controller.index);
        }
    }

    pub fn is_attached(&self, controller: &Controller) -> bool {
        self.attached.contains(&controller.index)
    }

    /// Textures the baked meshes sample: each solid's color map
    pub fn texture_handles(&self) -> Vec<TextureHandle> {
        let mut handles: Vec<TextureHandle> = Vec::new();
        for map in self.solids.iter().filter_map(|s| s.material.color.as_ref()) {
            if !handles.contains(&map.handle) {
                handles.push(map.handle);
            }
        }
        handles
    }

    /// World-space bounding box of every solid
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut corners = self.solids.iter().flat_map(|s| s.corners());
        let first = corners.next()?;
        Some(corners.fold((first, first), |(lo, hi), c| {
            (
                Vec3::new(lo.x.min(c.x), lo.y.min(c.y), lo.z.min(c.z)),
                Vec3::new(hi.x.max(c.x), hi.y.max(c.y), hi.z.max(c.z)),
            )
        }))
    }

    /// Build GPU meshes for every solid using whatever textures are loaded
    pub fn bake(&mut self, textures: &TextureCache) {
        self.meshes = self
            .solids
            .iter()
            .map(|solid| {
                let texture = solid
                    .material
                    .color
                    .as_ref()
                    .and_then(|map| textures.get(map.handle))
                    .cloned();
                to_mq_mesh(&solid_mesh(solid, self.sun_dir), texture)
            })
            .collect();

        let textured = self.meshes.iter().filter(|m| m.texture.is_some()).count();
        let wanted = self.solids.iter().filter(|s| s.material.is_textured()).count();
        info!("Baked {} meshes ({} of {} textured)", self.meshes.len(), textured, wanted);
        if let Some((lo, hi)) = self.bounds() {
            debug!("Scene bounds {:?} to {:?}", lo, hi);
        }
    }

    /// Draw solids and attached controllers with the current camera
    pub fn draw(&self, controllers: &[Controller], ray_length: f32) {
        for mesh in &self.meshes {
            mq::draw_mesh(mesh);
        }

        for controller in controllers.iter().filter(|c| self.is_attached(c)) {
            draw_pointer(controller, ray_length);
        }
    }
}

impl SceneSink for Scene {
    fn insert(&mut self, solid: Solid) {
        self.solids.push(solid);
    }
}

fn draw_pointer(controller: &Controller, length: f32) {
    let (from, to) = controller.pointer(length);

    for i in 0..RAY_SEGMENTS {
        let t0 = i as f32 / RAY_SEGMENTS as f32;
        let t1 = (i + 1) as f32 / RAY_SEGMENTS as f32;
        let color = if controller.is_selecting {
            RAY_SELECTING
        } else {
            RAY_NEAR.lerp(RAY_FAR, t0)
        };
        mq::draw_line_3d(
            to_mq_vec3(from + (to - from) * t0),
            to_mq_vec3(from + (to - from) * t1),
            to_mq_color(color),
        );
    }
}
