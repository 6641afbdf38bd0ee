//! Camera description and orbit control.
//!
//! The camera type mirrors a simple right-handed perspective setup; the orbit
//! controller keeps damped yaw/pitch/distance values so pointer drags steer
//! smoothly rather than snapping.

use glam::{Mat4, Vec3, Vec4};

use crate::constants::*;

/// Simple right-handed camera with perspective projection.
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
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through the pixel at (`sx`, `sy`) of a `width` x
    /// `height` viewport.
    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p_far: Vec3 = p_far.truncate() / p_far.w;
        let dir = (p_far - self.eye).normalize();
        (self.eye, dir)
    }

    /// Project a world point to viewport pixels; `None` when behind the eye.
    pub fn project(&self, world: Vec3, width: f32, height: f32) -> Option<(f32, f32)> {
        let clip = self.view_proj() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x * 0.5 + 0.5) * width;
        let y = (1.0 - (ndc.y * 0.5 + 0.5)) * height;
        Some((x, y))
    }
}

/// Damped orbit/zoom state around a fixed look-at target.
pub struct OrbitController {
    pub target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    // Current (smoothed) values trail the targets above.
    cur_yaw: f32,
    cur_pitch: f32,
    cur_distance: f32,
}

impl OrbitController {
    /// Start at the standard viewpoint looking at the origin.
    pub fn standard() -> Self {
        let eye = camera_start_eye();
        let offset = eye;
        let distance = offset.length();
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).asin();
        Self {
            target: Vec3::ZERO,
            yaw,
            pitch,
            distance,
            cur_yaw: yaw,
            cur_pitch: pitch,
            cur_distance: distance,
        }
    }

    /// Apply a pointer drag, in radians per axis.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(ORBIT_MIN_PITCH, ORBIT_MAX_PITCH);
    }

    /// Apply a zoom step; positive moves the eye away.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance + amount).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Advance the damped values toward their targets.
    pub fn update(&mut self, dt: f32) {
        let alpha = 1.0 - (-dt / ORBIT_APPROACH_TAU_SEC).exp();
        self.cur_yaw += (self.yaw - self.cur_yaw) * alpha;
        self.cur_pitch += (self.pitch - self.cur_pitch) * alpha;
        self.cur_distance += (self.distance - self.cur_distance) * alpha;
    }

    pub fn eye(&self) -> Vec3 {
        let cp = self.cur_pitch.cos();
        self.target
            + Vec3::new(
                self.cur_yaw.sin() * cp,
                self.cur_pitch.sin(),
                self.cur_yaw.cos() * cp,
            ) * self.cur_distance
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
