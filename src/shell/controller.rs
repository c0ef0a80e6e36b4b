//! Hand controllers
//!
//! Two tracked nodes with a pointer ray each. Select presses arrive as
//! edge events and are applied once per frame. Without a headset the left
//! and right mouse buttons stand in for the two triggers, and the
//! controllers hang just below the camera pointing at the floor.

use std::f32::consts::FRAC_PI_2;
use log::debug;
use macroquad::prelude::{is_mouse_button_pressed, is_mouse_button_released, MouseButton};
use crate::world::Vec3;

/// Select edge for one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    SelectStart(usize),
    SelectEnd(usize),
}

impl ControllerEvent {
    pub fn controller(self) -> usize {
        match self {
            ControllerEvent::SelectStart(i) | ControllerEvent::SelectEnd(i) => i,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    pub index: usize,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub is_selecting: bool,
}

impl Controller {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            is_selecting: false,
        }
    }

    pub fn on_select_start(&mut self) {
        self.is_selecting = true;
    }

    pub fn on_select_end(&mut self) {
        self.is_selecting = false;
    }

    /// Local -Z in world space
    pub fn forward(&self) -> Vec3 {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        Vec3::new(0.0, 0.0, -cos_p).rotate_y(self.yaw) + Vec3::new(0.0, sin_p, 0.0)
    }

    /// Pointer ray from the grip to `length` ahead
    pub fn pointer(&self, length: f32) -> (Vec3, Vec3) {
        (self.position, self.position + self.forward() * length)
    }
}

/// Both controllers
pub struct ControllerRig {
    controllers: [Controller; 2],
}

impl ControllerRig {
    /// Side offset of each controller from the camera
    const HAND_OFFSET: f32 = 0.3;
    /// How far below the camera the controllers hang
    const HAND_DROP: f32 = 0.5;

    pub fn new() -> Self {
        Self {
            controllers: [Controller::new(0), Controller::new(1)],
        }
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    /// Mouse-driven select edges for this frame
    pub fn poll_events() -> Vec<ControllerEvent> {
        let buttons = [(MouseButton::Left, 0), (MouseButton::Right, 1)];
        let mut events = Vec::new();

        for (button, index) in buttons {
            if is_mouse_button_pressed(button) {
                events.push(ControllerEvent::SelectStart(index));
            }
            if is_mouse_button_released(button) {
                events.push(ControllerEvent::SelectEnd(index));
            }
        }

        events
    }

    pub fn apply(&mut self, events: &[ControllerEvent]) {
        for event in events {
            let Some(controller) = self.controllers.get_mut(event.controller()) else {
                continue;
            };
            match event {
                ControllerEvent::SelectStart(_) => controller.on_select_start(),
                ControllerEvent::SelectEnd(_) => controller.on_select_end(),
            }
            debug!("Controller {}: {:?}", controller.index, event);
        }
    }

    /// Desktop stand-in for pose tracking
    pub fn follow(&mut self, head: Vec3) {
        for controller in self.controllers.iter_mut() {
            let side = if controller.index == 0 { -1.0 } else { 1.0 };
            controller.position = head + Vec3::new(side * Self::HAND_OFFSET, -Self::HAND_DROP, 0.0);
            controller.yaw = 0.0;
            controller.pitch = -FRAC_PI_2;
        }
    }
}

impl Default for ControllerRig {
    fn default() -> Self {
        Self::new()
    }
}
