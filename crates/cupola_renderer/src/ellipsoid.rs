//! Axis-aligned ellipsoid primitive.

use cupola_core::EllipsoidDesc;
use cupola_math::{Ray, Vec3};

use crate::{Hit, MaterialId};

/// An ellipsoid `(x/A)^2 + (y/B)^2 + (z/C)^2 = 1` around `center`,
/// optionally cut open above a horizontal plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    center: Vec3,
    axes: Vec3,
    /// Squared semi-axes, the denominators of the quadric
    axes_sq: Vec3,
    cut_y: Option<f32>,
    material: MaterialId,
}

impl Ellipsoid {
    /// Create an unclipped ellipsoid.
    ///
    /// All semi-axes must be positive; scene descriptions are validated
    /// for this before they get here.
    pub fn new(center: Vec3, axes: Vec3, material: MaterialId) -> Self {
        debug_assert!(axes.min_element() > 0.0, "semi-axes must be positive");
        Self {
            center,
            axes,
            axes_sq: axes * axes,
            cut_y: None,
            material,
        }
    }

    /// Discard every hit whose height is above `cut_y`.
    pub fn with_cut_y(mut self, cut_y: f32) -> Self {
        self.cut_y = Some(cut_y);
        self
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn axes(&self) -> Vec3 {
        self.axes
    }

    pub fn cut_y(&self) -> Option<f32> {
        self.cut_y
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Outward unit normal at a point on the surface (the normalized
    /// gradient of the quadric).
    pub fn normal_at(&self, position: Vec3) -> Vec3 {
        ((position - self.center) / self.axes_sq).normalize_or_zero()
    }

    /// Nearest intersection with `t > 0`.
    ///
    /// When the origin is outside, that is the entry point; when inside,
    /// the exit point. A hit above the clip plane is dropped entirely: the
    /// far root is not tried instead, so a clipped ellipsoid shows no
    /// inner wall through its opening.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let dist = ray.origin - self.center;
        let dir = ray.direction;

        let a = (dir * dir / self.axes_sq).element_sum();
        let b = 2.0 * (dist * dir / self.axes_sq).element_sum();
        let c = (dist * dist / self.axes_sq).element_sum() - 1.0;

        // Only a zero or NaN direction gives no usable quadratic; a is
        // |d|^2 / axis^2 and tiny for huge ellipsoids
        if !(a >= f32::MIN_POSITIVE) {
            return None;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t_far = (-b + sqrt_d) / 2.0 / a;
        let t_near = (-b - sqrt_d) / 2.0 / a;

        // Whole ellipsoid behind the origin
        if t_far <= 0.0 {
            return None;
        }

        let t = if t_near > 0.0 { t_near } else { t_far };
        let position = ray.at(t);

        if let Some(cut_y) = self.cut_y {
            if position.y > cut_y {
                return None;
            }
        }

        Some(Hit {
            t,
            position,
            normal: self.normal_at(position),
            material: self.material,
        })
    }
}

impl From<&EllipsoidDesc> for Ellipsoid {
    fn from(desc: &EllipsoidDesc) -> Self {
        let ellipsoid = Ellipsoid::new(desc.center, desc.axes, MaterialId(desc.material));
        match desc.cut_y {
            Some(cut_y) => ellipsoid.with_cut_y(cut_y),
            None => ellipsoid,
        }
    }
}
