//! Pinhole camera for ray generation.

use cupola_core::{CameraDesc, RenderConfig};
use cupola_math::{Ray, Vec3};

/// Camera mapping pixel coordinates to primary rays.
///
/// The image plane passes through `look_at`. `right` and `up` span half
/// of it, each scaled by `focal_distance * tan(fov / 2)`. Both use the
/// same scale, so pixels are square only when the image is.
///
/// The camera holds no resolution; [`Camera::get_ray`] maps pixels using
/// the [`RenderConfig`] the scene renders with.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    look_at: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a camera at the origin looking down -Z with a 90 degree
    /// field of view.
    pub fn new() -> Self {
        let mut camera = Self {
            eye: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.set(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0_f32.to_radians());
        camera
    }

    /// Create a camera from a description.
    pub fn from_desc(desc: &CameraDesc) -> Self {
        let mut camera = Self::new();
        camera.set(desc.eye, desc.look_at, desc.up, desc.fov_degrees.to_radians());
        camera
    }

    /// Place the camera.
    ///
    /// - `fov`: full field of view in radians
    /// - `vup`: approximate up vector, orthogonalized against the view direction
    pub fn set(&mut self, eye: Vec3, look_at: Vec3, vup: Vec3, fov: f32) {
        self.eye = eye;
        self.look_at = look_at;

        let w = eye - look_at;
        let half_extent = w.length() * (fov / 2.0).tan();
        self.right = vup.cross(w).normalize_or_zero() * half_extent;
        self.up = w.cross(self.right).normalize_or_zero() * half_extent;
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Half-width vector of the image plane.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Half-height vector of the image plane.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Primary ray through the center of pixel (x, y) of an image sized by
    /// `config`.
    ///
    /// `y = 0` is the bottom row.
    pub fn get_ray(&self, x: u32, y: u32, config: &RenderConfig) -> Ray {
        let u = 2.0 * (x as f32 + 0.5) / config.width as f32 - 1.0;
        let v = 2.0 * (y as f32 + 0.5) / config.height as f32 - 1.0;

        let target = self.look_at + self.right * u + self.up * v;
        Ray::new(self.eye, target - self.eye)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
