//! Intersectable geometry and hit records.

use cupola_math::{Ray, Vec3};

use crate::{Ellipsoid, MaterialId};

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the (unit) ray direction, always > 0
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal. Outward from the primitive; the scene query
    /// flips it to face the incoming ray.
    pub normal: Vec3,
    /// Material of the primitive that was hit
    pub material: MaterialId,
}

/// Anything a ray can hit.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Ellipsoid(Ellipsoid),
}

impl Primitive {
    /// Nearest intersection in front of the ray origin, if any.
    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Primitive::Ellipsoid(ellipsoid) => ellipsoid.intersect(ray),
        }
    }

    /// Material every hit on this primitive reports.
    pub fn material(&self) -> MaterialId {
        match self {
            Primitive::Ellipsoid(ellipsoid) => ellipsoid.material(),
        }
    }
}

impl From<Ellipsoid> for Primitive {
    fn from(ellipsoid: Ellipsoid) -> Self {
        Primitive::Ellipsoid(ellipsoid)
    }
}
