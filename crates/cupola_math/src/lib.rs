// Re-export glam for convenience
pub use glam::*;

// Cupola math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Mirror `v` about the plane with unit normal `n`.
///
/// Returns `v - 2 (n · v) n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * n.dot(v))
}
