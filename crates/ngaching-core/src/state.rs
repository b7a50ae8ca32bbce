//! Animation and camera state types shared with the frontends.
//!
//! These types avoid platform-specific APIs so the native and web frontends
//! (and the host-side tests) can all consume them directly.

use glam::{Mat4, Vec3};

/// Discrete tree mode decided each tick from the latest motion score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Formed,
    Chaos,
}

/// Per-tick animation parameters produced by the controller.
///
/// `progress` is 1 when the tree is fully formed and 0 when fully scattered;
/// it always stays within \[0, 1\]. `rotation` accumulates without bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub mode: Mode,
    pub progress: f32,
    pub rotation: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            mode: Mode::Formed,
            progress: 1.0,
            rotation: 0.0,
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
