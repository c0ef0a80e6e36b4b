//! Top-down view camera with keyboard panning

use macroquad::prelude::{is_key_pressed, vec3, Camera3D, KeyCode};
use crate::config::ViewerConfig;
use crate::world::Vec3;

/// Discrete camera moves, one per key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanKey {
    Forward,
    Back,
    Left,
    Right,
    Reset,
}

impl PanKey {
    const BINDINGS: [(KeyCode, PanKey); 5] = [
        (KeyCode::W, PanKey::Forward),
        (KeyCode::S, PanKey::Back),
        (KeyCode::A, PanKey::Left),
        (KeyCode::D, PanKey::Right),
        (KeyCode::Space, PanKey::Reset),
    ];

    /// Keys pressed this frame
    pub fn poll() -> Vec<PanKey> {
        Self::BINDINGS
            .iter()
            .filter(|(code, _)| is_key_pressed(*code))
            .map(|(_, key)| *key)
            .collect()
    }
}

pub struct ViewCamera {
    pub position: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pan_speed: f32,
    reset_height: f32,
}

impl ViewCamera {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.camera_height, 0.0),
            fov: config.fov_degrees.to_radians(),
            pan_speed: config.pan_speed,
            reset_height: config.reset_height,
        }
    }

    pub fn pan(&mut self, key: PanKey) {
        match key {
            PanKey::Forward => self.position.z -= self.pan_speed,
            PanKey::Back => self.position.z += self.pan_speed,
            PanKey::Left => self.position.x -= self.pan_speed,
            PanKey::Right => self.position.x += self.pan_speed,
            PanKey::Reset => self.position = Vec3::new(0.0, self.reset_height, 0.0),
        }
    }

    /// Point straight below the camera
    pub fn target(&self) -> Vec3 {
        self.position - Vec3::UP
    }

    /// Camera looking straight down with -Z at the top of the screen
    pub fn to_camera3d(&self) -> Camera3D {
        let target = self.target();
        Camera3D {
            position: vec3(self.position.x, self.position.y, self.position.z),
            target: vec3(target.x, target.y, target.z),
            up: vec3(0.0, 0.0, -1.0),
            fovy: self.fov,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_above_origin() {
        let camera = ViewCamera::new(&ViewerConfig::default());
        assert_eq!(camera.position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(camera.target(), Vec3::new(0.0, 9.0, 0.0));
    }

    #[test]
    fn test_pan_and_reset() {
        let mut camera = ViewCamera::new(&ViewerConfig::default());
        camera.pan(PanKey::Forward);
        camera.pan(PanKey::Forward);
        camera.pan(PanKey::Right);
        assert_eq!(camera.position, Vec3::new(0.5, 10.0, -1.0));

        camera.pan(PanKey::Back);
        camera.pan(PanKey::Left);
        assert_eq!(camera.position, Vec3::new(0.0, 10.0, -0.5));

        camera.pan(PanKey::Reset);
        assert_eq!(camera.position, Vec3::new(0.0, 5.0, 0.0));
    }
}
