use crate::Vec3;

/// A ray in 3D space with an origin and a unit direction.
///
/// The direction is normalized on construction, so `t` values returned by
/// intersection routines are true distances along the ray. A zero direction
/// is kept as zero instead of turning into NaN; such a ray hits nothing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// A ray starting at `point` pushed `epsilon` along `normal`.
    ///
    /// Used for shadow and reflection rays so they do not immediately
    /// re-hit the surface they leave.
    pub fn offset(point: Vec3, normal: Vec3, epsilon: f32, direction: Vec3) -> Self {
        Self::new(point + normal * epsilon, direction)
    }
}
