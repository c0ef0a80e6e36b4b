//! Material resolution
//!
//! Turns a texture set name plus the physical size of a surface into a
//! `MaterialSpec`: one `TextureMap` per wired channel, all sharing the
//! same repeat so they stay pixel-aligned.
//!
//! Texture sets live on disk as
//! `{root}/{name}/{name}_COLOR.jpg`, `_NORM.jpg`, `_OCC.jpg`, `_SPEC.jpg`
//! (plus `_DISP.png`, which is never wired in).

use log::{debug, warn};
use crate::world::Vec2;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// From a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Apply shading (multiply by intensity 0.0-1.0)
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            a: self.a,
        }
    }

    /// Linear blend towards `other` by `t` (0.0 = self, 1.0 = other)
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Channel-wise multiply
    pub fn modulate(self, other: Color) -> Self {
        let mul = |a: u8, b: u8| ((a as u16 * b as u16) / 255) as u8;
        Self {
            r: mul(self.r, other.r),
            g: mul(self.g, other.g),
            b: mul(self.b, other.b),
            a: mul(self.a, other.a),
        }
    }
}

/// The texture maps a material set provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureChannel {
    Color,
    Normal,
    Occlusion,
    Specular,
    /// Part of the naming convention, never part of a `MaterialSpec`
    Displacement,
}

impl TextureChannel {
    /// Channels that end up in a resolved material, in load order
    pub const WIRED: [TextureChannel; 4] = [
        TextureChannel::Color,
        TextureChannel::Normal,
        TextureChannel::Occlusion,
        TextureChannel::Specular,
    ];

    /// File name suffix
    pub fn suffix(self) -> &'static str {
        match self {
            TextureChannel::Color => "COLOR",
            TextureChannel::Normal => "NORM",
            TextureChannel::Occlusion => "OCC",
            TextureChannel::Specular => "SPEC",
            TextureChannel::Displacement => "DISP",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TextureChannel::Displacement => "png",
            _ => "jpg",
        }
    }
}

/// Path of one channel of a texture set
pub fn channel_path(root: &str, material: &str, channel: TextureChannel) -> String {
    format!(
        "{}/{}/{}_{}.{}",
        root.trim_end_matches('/'),
        material,
        material,
        channel.suffix(),
        channel.extension()
    )
}

/// Opaque reference to a texture owned by the asset system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Where textures come from.
///
/// `load` hands back a handle right away; the pixels may arrive later.
/// Until they do, the surface renders untextured. `None` means the
/// texture cannot be requested at all, and the channel is dropped.
pub trait TextureSource {
    fn load(&mut self, path: &str) -> Option<TextureHandle>;
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    Repeat,
}

/// One loaded channel with its sampling setup
#[derive(Debug, Clone, PartialEq)]
pub struct TextureMap {
    pub channel: TextureChannel,
    pub handle: TextureHandle,
    pub path: String,
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    /// Repeat count along (u, v)
    pub repeat: [f32; 2],
}

/// Resolved surface appearance
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSpec {
    /// Material name this was resolved from (empty for flat materials)
    pub name: String,
    /// Flat color, multiplied with the color map when present
    pub base_color: Color,
    pub color: Option<TextureMap>,
    pub normal: Option<TextureMap>,
    pub occlusion: Option<TextureMap>,
    pub specular: Option<TextureMap>,
    /// Repeat count along (u, v), shared by every map
    pub tiling: [f32; 2],
}

impl MaterialSpec {
    /// Untextured material of a single color
    pub fn flat(color: Color) -> Self {
        Self {
            name: String::new(),
            base_color: color,
            color: None,
            normal: None,
            occlusion: None,
            specular: None,
            tiling: [1.0, 1.0],
        }
    }

    /// All present maps
    pub fn maps(&self) -> impl Iterator<Item = &TextureMap> {
        [&self.color, &self.normal, &self.occlusion, &self.specular]
            .into_iter()
            .flatten()
    }

    pub fn is_textured(&self) -> bool {
        self.maps().next().is_some()
    }

    fn set_map(&mut self, map: TextureMap) {
        match map.channel {
            TextureChannel::Color => self.color = Some(map),
            TextureChannel::Normal => self.normal = Some(map),
            TextureChannel::Occlusion => self.occlusion = Some(map),
            TextureChannel::Specular => self.specular = Some(map),
            TextureChannel::Displacement => {}
        }
    }
}

/// Diagnostic placeholder: plain green, no textures
pub fn test_material() -> MaterialSpec {
    MaterialSpec::flat(Color::GREEN)
}

/// Anything that can turn (name, physical size, scale) into a material.
///
/// Generators only see this trait, so tests can swap in a fake.
pub trait MaterialSource {
    fn resolve(&mut self, name: &str, size: Vec2, scale: f32) -> MaterialSpec;
}

/// Loads texture sets from a `TextureSource` using the on-disk naming
/// convention and tiles them by physical size.
pub struct MaterialResolver<S> {
    root: String,
    source: S,
}

impl<S: TextureSource> MaterialResolver<S> {
    pub fn new(root: impl Into<String>, source: S) -> Self {
        Self { root: root.into(), source }
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: TextureSource> MaterialSource for MaterialResolver<S> {
    fn resolve(&mut self, name: &str, size: Vec2, scale: f32) -> MaterialSpec {
        if name.trim().is_empty() {
            warn!("Object without a material name, using the test material");
            return test_material();
        }

        let repeat = [size.x * scale, size.z * scale];
        let mut spec = MaterialSpec {
            name: name.to_string(),
            tiling: repeat,
            ..MaterialSpec::flat(Color::WHITE)
        };

        for channel in TextureChannel::WIRED {
            let path = channel_path(&self.root, name, channel);
            match self.source.load(&path) {
                Some(handle) => spec.set_map(TextureMap {
                    channel,
                    handle,
                    path,
                    wrap_s: Wrap::Repeat,
                    wrap_t: Wrap::Repeat,
                    repeat,
                }),
                None => warn!("Material {}: missing {} map ({})", name, channel.suffix(), path),
            }
        }

        debug!("Resolved material {} with repeat {:?}", name, repeat);
        spec
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory texture source: hands out one handle per distinct path,
    /// and refuses paths listed in `missing`.
    #[derive(Default)]
    pub(crate) struct FakeTextures {
        pub handles: HashMap<String, TextureHandle>,
        pub requests: Vec<String>,
        pub missing: Vec<String>,
    }

    impl TextureSource for FakeTextures {
        fn load(&mut self, path: &str) -> Option<TextureHandle> {
            self.requests.push(path.to_string());
            if self.missing.iter().any(|m| m == path) {
                return None;
            }
            let next = TextureHandle(self.handles.len() as u32);
            Some(*self.handles.entry(path.to_string()).or_insert(next))
        }
    }

    pub(crate) fn resolver() -> MaterialResolver<FakeTextures> {
        MaterialResolver::new("textures", FakeTextures::default())
    }

    #[test]
    fn test_channel_paths() {
        assert_eq!(
            channel_path("textures", "Brick_Wall_011", TextureChannel::Color),
            "textures/Brick_Wall_011/Brick_Wall_011_COLOR.jpg"
        );
        assert_eq!(
            channel_path("assets/", "Stone", TextureChannel::Displacement),
            "assets/Stone/Stone_DISP.png"
        );
    }

    #[test]
    fn test_resolve_wires_four_channels() {
        let mut resolver = resolver();
        let spec = resolver.resolve("Stone_Floor_002", Vec2::new(10.0, 10.0), 1.0);

        assert_eq!(spec.maps().count(), 4);
        assert!(spec.color.is_some() && spec.normal.is_some());
        assert!(spec.occlusion.is_some() && spec.specular.is_some());

        // Displacement is never requested
        assert!(resolver.source.requests.iter().all(|p| !p.contains("_DISP")));
    }

    #[test]
    fn test_every_channel_shares_repeat_and_wrap() {
        let mut resolver = resolver();
        let spec = resolver.resolve("Brick", Vec2::new(10.0, 2.7432), 0.5);

        assert!((spec.tiling[0] - 5.0).abs() < 1e-6);
        assert!((spec.tiling[1] - 1.3716).abs() < 1e-6);
        for map in spec.maps() {
            assert_eq!(map.repeat, spec.tiling);
            assert_eq!((map.wrap_s, map.wrap_t), (Wrap::Repeat, Wrap::Repeat));
        }
    }

    #[test]
    fn test_tiling_scales_with_size() {
        let mut resolver = resolver();
        let small = resolver.resolve("Stone", Vec2::new(10.0, 10.0), 0.75);
        let large = resolver.resolve("Stone", Vec2::new(20.0, 20.0), 0.75);

        assert!((large.tiling[0] - 2.0 * small.tiling[0]).abs() < 1e-5);
        assert!((large.tiling[1] - 2.0 * small.tiling[1]).abs() < 1e-5);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut resolver = resolver();
        let a = resolver.resolve("Stone", Vec2::new(4.0, 3.0), 2.0);
        let b = resolver.resolve("Stone", Vec2::new(4.0, 3.0), 2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_channel_is_omitted() {
        let mut resolver = resolver();
        resolver.source.missing.push("textures/Stone/Stone_SPEC.jpg".to_string());

        let spec = resolver.resolve("Stone", Vec2::new(1.0, 1.0), 1.0);
        assert!(spec.specular.is_none());
        assert!(spec.color.is_some());
        assert_eq!(spec.maps().count(), 3);
    }

    #[test]
    fn test_unnamed_material_falls_back_to_test_material() {
        let mut resolver = resolver();
        let spec = resolver.resolve("", Vec2::new(4.0, 2.0), 1.0);
        assert_eq!(spec, test_material());
        assert!(resolver.source.requests.is_empty());
    }

    #[test]
    fn test_test_material_is_flat_green() {
        let spec = test_material();
        assert_eq!(spec.base_color, Color::from_hex(0x00ff00));
        assert!(!spec.is_textured());
    }

    #[test]
    fn test_color_lerp() {
        let ground = Color::from_hex(0x444444);
        assert_eq!(ground.lerp(Color::WHITE, 0.0), ground);
        assert_eq!(ground.lerp(Color::WHITE, 1.0), Color::WHITE);
    }
}
