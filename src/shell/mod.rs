//! Interaction shell
//!
//! Everything that talks to the window, GPU and input devices:
//! - Texture cache (the asset system behind `TextureSource`)
//! - Scene (the `SceneSink` behind the compiler)
//! - Top-down camera and the two hand controllers

mod camera;
mod controller;
mod mesh;
mod scene;
mod textures;

pub use camera::*;
pub use controller::*;
pub use scene::*;
pub use textures::*;
