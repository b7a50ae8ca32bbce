use crate::constants::*;
use crate::controller::smooth_toward;
use crate::state::Camera;
use glam::Vec3;

/// Orbit geometry and smoothing for the camera rig.
///
/// - `orbit_radius`/`height`: where the camera circles the tree
/// - `angle_scale`: orbit angle per unit of controller rotation
/// - `smoothing`: fraction of the remaining distance covered per tick
#[derive(Clone, Debug)]
pub struct RigParams {
    pub orbit_radius: f32,
    pub height: f32,
    pub angle_scale: f32,
    pub smoothing: f32,
    pub fovy_radians: f32,
}

impl Default for RigParams {
    fn default() -> Self {
        Self {
            orbit_radius: CAMERA_ORBIT_RADIUS,
            height: CAMERA_HEIGHT,
            angle_scale: CAMERA_ANGLE_SCALE,
            smoothing: CAMERA_SMOOTHING,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
        }
    }
}

#[inline]
pub fn orbit_target(rotation: f32, params: &RigParams) -> Vec3 {
    let angle = rotation * params.angle_scale;
    Vec3::new(
        angle.sin() * params.orbit_radius,
        params.height,
        angle.cos() * params.orbit_radius,
    )
}

/// Camera that chases its orbit target with its own exponential smoothing,
/// independent of the controller's rotation smoothing.
pub struct CameraRig {
    params: RigParams,
    position: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(RigParams::default())
    }
}

impl CameraRig {
    pub fn new(params: RigParams) -> Self {
        Self {
            params,
            position: Vec3::from(CAMERA_POS),
        }
    }

    pub fn params(&self) -> &RigParams {
        &self.params
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn update(&mut self, rotation: f32) -> Vec3 {
        let target = orbit_target(rotation, &self.params);
        let a = self.params.smoothing;
        self.position = Vec3::new(
            smooth_toward(self.position.x, target.x, a),
            smooth_toward(self.position.y, target.y, a),
            smooth_toward(self.position.z, target.z, a),
        );
        self.position
    }

    /// Perspective camera at the rig position looking at the scene center.
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: self.params.fovy_radians,
            znear: 0.1,
            zfar: 200.0,
        }
    }
}
