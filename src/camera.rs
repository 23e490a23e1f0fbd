use macroquad::prelude::*;

use crate::config;

/// Orbit camera around the tank centre. Left drag orbits, scroll zooms.
pub struct CameraController {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    smooth_yaw: f32,
    smooth_pitch: f32,
    smooth_distance: f32,
    is_dragging: bool,
    last_mouse: Vec2,
}

impl CameraController {
    pub fn new(initial_distance: f32) -> Self {
        let distance = initial_distance.clamp(config::CAMERA_DISTANCE_MIN, config::CAMERA_DISTANCE_MAX);
        Self {
            yaw: 0.0,
            pitch: 0.3,
            distance,
            smooth_yaw: 0.0,
            smooth_pitch: 0.3,
            smooth_distance: distance,
            is_dragging: false,
            last_mouse: Vec2::ZERO,
        }
    }

    /// Frame the whole tank.
    pub fn framing(bounds: Vec3) -> Self {
        Self::new(bounds.length() * 2.5)
    }

    /// `pointer_free` is false while the UI owns the mouse.
    pub fn update(&mut self, dt: f32, pointer_free: bool) {
        let mouse = Vec2::from(mouse_position());

        if pointer_free && is_mouse_button_pressed(MouseButton::Left) {
            self.is_dragging = true;
            self.last_mouse = mouse;
        }
        if is_mouse_button_released(MouseButton::Left) {
            self.is_dragging = false;
        }
        if self.is_dragging {
            let delta = mouse - self.last_mouse;
            self.yaw += delta.x * config::CAMERA_ORBIT_SENSITIVITY;
            self.pitch = (self.pitch + delta.y * config::CAMERA_ORBIT_SENSITIVITY).clamp(-1.4, 1.4);
            self.last_mouse = mouse;
        }

        if pointer_free {
            let (_, scroll_y) = mouse_wheel();
            if scroll_y != 0.0 {
                let zoom_factor = 1.0 - scroll_y.signum() * config::CAMERA_ZOOM_SPEED;
                self.distance = (self.distance * zoom_factor)
                    .clamp(config::CAMERA_DISTANCE_MIN, config::CAMERA_DISTANCE_MAX);
            }
        }

        // Smooth interpolation
        let smooth = 1.0 - (-config::CAMERA_SMOOTH_SPEED * dt).exp();
        self.smooth_yaw += (self.yaw - self.smooth_yaw) * smooth;
        self.smooth_pitch += (self.pitch - self.smooth_pitch) * smooth;
        self.smooth_distance += (self.distance - self.smooth_distance) * smooth;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.smooth_yaw.sin_cos();
        let (sp, cp) = self.smooth_pitch.sin_cos();
        vec3(sy * cp, sp, cy * cp) * self.smooth_distance
    }

    pub fn to_macroquad_camera(&self) -> Camera3D {
        Camera3D {
            position: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_sits_at_orbit_distance() {
        let cam = CameraController::new(10.0);
        assert!((cam.eye().length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn distance_is_clamped() {
        let cam = CameraController::new(1.0e6);
        assert_eq!(cam.distance, config::CAMERA_DISTANCE_MAX);
    }
}
