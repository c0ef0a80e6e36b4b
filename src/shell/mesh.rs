//! Box tessellation
//!
//! Every face of a solid carries the material's full repeat, the same way
//! a unit-UV box with a repeating texture would. Faces are cut into one
//! quad per texture tile so UVs never leave [0, 1] and no sampler wrap
//! mode is needed.

use crate::generator::Solid;
use crate::material::Color;
use crate::world::Vec3;

/// Cap on tiles per face axis; beyond it tiles get stretched
pub const MAX_TILES: usize = 32;

/// Hemisphere light colors
pub const SKY_COLOR: Color = Color::WHITE;
pub const GROUND_COLOR: Color = Color::from_hex(0x444444);

/// One tile along a face axis: face-relative range and how much of the
/// texture it shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub t0: f32,
    pub t1: f32,
    pub uv: f32,
}

/// Split a face axis into tiles for a given repeat count
pub fn tile_spans(repeat: f32) -> Vec<Span> {
    let repeat = if repeat > 0.0 && repeat.is_finite() { repeat } else { 1.0 };
    let cells = repeat.ceil() as usize;

    if cells > MAX_TILES {
        let step = 1.0 / MAX_TILES as f32;
        return (0..MAX_TILES)
            .map(|k| Span { t0: k as f32 * step, t1: (k + 1) as f32 * step, uv: 1.0 })
            .collect();
    }

    (0..cells)
        .map(|k| {
            let t0 = k as f32 / repeat;
            let t1 = ((k + 1) as f32 / repeat).min(1.0);
            Span { t0, t1, uv: (t1 - t0) * repeat }
        })
        .collect()
}

/// Ambient tint for a surface facing `normal`
pub fn hemisphere_tint(normal: Vec3, sun_dir: Vec3) -> Color {
    let up = 0.5 + 0.5 * normal.y;
    let sun = normal.dot(sun_dir).max(0.0);
    GROUND_COLOR.lerp(SKY_COLOR, up).shade(0.8 + 0.2 * sun)
}

/// CPU-side triangle mesh
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<Color>,
    pub indices: Vec<u16>,
}

/// A box face: a corner plus the two edges leaving it
struct Face {
    normal: Vec3,
    origin: Vec3,
    u: Vec3,
    v: Vec3,
}

fn box_faces(size: Vec3) -> [Face; 6] {
    let h = size * 0.5;
    [
        // +X
        Face {
            normal: Vec3::new(1.0, 0.0, 0.0),
            origin: Vec3::new(h.x, -h.y, h.z),
            u: Vec3::new(0.0, 0.0, -size.z),
            v: Vec3::new(0.0, size.y, 0.0),
        },
        // -X
        Face {
            normal: Vec3::new(-1.0, 0.0, 0.0),
            origin: Vec3::new(-h.x, -h.y, -h.z),
            u: Vec3::new(0.0, 0.0, size.z),
            v: Vec3::new(0.0, size.y, 0.0),
        },
        // +Y
        Face {
            normal: Vec3::UP,
            origin: Vec3::new(-h.x, h.y, h.z),
            u: Vec3::new(size.x, 0.0, 0.0),
            v: Vec3::new(0.0, 0.0, -size.z),
        },
        // -Y
        Face {
            normal: Vec3::new(0.0, -1.0, 0.0),
            origin: Vec3::new(-h.x, -h.y, -h.z),
            u: Vec3::new(size.x, 0.0, 0.0),
            v: Vec3::new(0.0, 0.0, size.z),
        },
        // +Z
        Face {
            normal: Vec3::new(0.0, 0.0, 1.0),
            origin: Vec3::new(-h.x, -h.y, h.z),
            u: Vec3::new(size.x, 0.0, 0.0),
            v: Vec3::new(0.0, size.y, 0.0),
        },
        // -Z
        Face {
            normal: Vec3::new(0.0, 0.0, -1.0),
            origin: Vec3::new(h.x, -h.y, -h.z),
            u: Vec3::new(-size.x, 0.0, 0.0),
            v: Vec3::new(0.0, size.y, 0.0),
        },
    ]
}

/// Tessellate a solid into world-space triangles
pub fn solid_mesh(solid: &Solid, sun_dir: Vec3) -> MeshData {
    let [repeat_u, repeat_v] = solid.material.tiling;
    let spans_u = tile_spans(repeat_u);
    let spans_v = tile_spans(repeat_v);
    let mut mesh = MeshData::default();

    for face in box_faces(solid.size) {
        let normal = face.normal.rotate_y(solid.yaw);
        let color = solid.material.base_color.modulate(hemisphere_tint(normal, sun_dir));

        for su in &spans_u {
            for sv in &spans_v {
                let corner = |tu: f32, tv: f32| solid.local_to_world(face.origin + face.u * tu + face.v * tv);
                let base = mesh.positions.len() as u16;

                // Image rows run top to bottom, face v runs bottom to top
                mesh.positions.extend([
                    corner(su.t0, sv.t0),
                    corner(su.t1, sv.t0),
                    corner(su.t1, sv.t1),
                    corner(su.t0, sv.t1),
                ]);
                mesh.uvs.extend([[0.0, 1.0], [su.uv, 1.0], [su.uv, 1.0 - sv.uv], [0.0, 1.0 - sv.uv]]);
                mesh.colors.extend([color; 4]);
                mesh.indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
            }
        }
    }

    mesh
}
