use glam::{Mat4, Vec3};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::types::CameraUniform;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 5000.0;

pub const ROTATE_SPEED: f32 = 0.005;
pub const PAN_SPEED: f32 = 0.0015;
/// Distance multiplier per scroll line
pub const ZOOM_STEP: f32 = 0.95;
const PIXELS_PER_LINE: f32 = 40.0;

/// Distance and angle limits of the orbit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Largest angle from straight up; below pi/2 keeps the eye above the ground
    pub max_polar: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 30.0,
            max_distance: 200.0,
            max_polar: std::f32::consts::FRAC_PI_2 - 0.1,
        }
    }
}

#[derive(Default, Clone, Copy, Debug)]
struct DragState {
    rotating: bool,
    panning: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
}

/// Camera orbiting a target point, driven by mouse drag and scroll
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Angle around the Y axis, zero looks down -Z
    pub azimuth: f32,
    /// Angle from the +Y axis
    pub polar: f32,
    pub fov_y: f32,
    limits: OrbitLimits,
    drag: DragState,
}

impl OrbitCamera {
    /// Camera at `eye` looking at `target`, clamped into the limits
    pub fn looking_at(eye: Vec3, target: Vec3, limits: OrbitLimits) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let polar = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        let mut camera = Self {
            target,
            distance,
            azimuth: offset.x.atan2(offset.z),
            polar,
            fov_y: FOV_Y_DEGREES.to_radians(),
            limits,
            drag: DragState::default(),
        };
        camera.clamp();
        camera
    }

    pub fn new() -> Self {
        Self::looking_at(Vec3::new(0.0, 0.0, 200.0), Vec3::ZERO, OrbitLimits::default())
    }

    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target + self.distance * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Rotate around the target by a cursor movement in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * ROTATE_SPEED;
        self.polar -= dy * ROTATE_SPEED;
        self.clamp();
    }

    /// Slide the target in the view plane by a cursor movement in pixels
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let scale = self.distance * PAN_SPEED;
        self.target += (-self.right() * dx + self.up() * dy) * scale;
    }

    /// Positive steps move closer
    pub fn zoom(&mut self, steps: f32) {
        self.distance *= ZOOM_STEP.powf(steps);
        self.clamp();
    }

    fn clamp(&mut self) {
        self.distance = self
            .distance
            .clamp(self.limits.min_distance, self.limits.max_distance);
        self.polar = self.polar.clamp(1e-3, self.limits.max_polar);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-3), NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    pub fn to_uniform(&self, aspect: f32) -> CameraUniform {
        let view_proj = self.view_projection(aspect);
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            inverse_view_proj: view_proj.inverse().to_cols_array_2d(),
            position: self.position().extend(1.0).to_array(),
        }
    }

    /// Feed a window event, returns true if the camera used it
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.drag.rotating = pressed,
                    MouseButton::Right | MouseButton::Middle => self.drag.panning = pressed,
                    _ => return false,
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let last = self.drag.last_cursor.replace(*position);
                let Some(last) = last else {
                    return false;
                };
                let dx = (position.x - last.x) as f32;
                let dy = (position.y - last.y) as f32;

                if self.drag.rotating {
                    self.orbit(dx, dy);
                    true
                } else if self.drag.panning {
                    self.pan(dx, dy);
                    true
                } else {
                    false
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.drag = DragState::default();
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.zoom(steps);
                true
            }
            _ => false,
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
