use cupola_core::LightDesc;
use cupola_math::Vec3;

use crate::Color;

/// A directional light infinitely far away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Unit direction towards the light
    direction: Vec3,
    /// Emitted radiance
    radiance: Color,
}

impl Light {
    /// Create a light, normalizing `direction`.
    ///
    /// A zero direction gives a light that never illuminates anything.
    pub fn new(direction: Vec3, radiance: Color) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            radiance,
        }
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn radiance(&self) -> Color {
        self.radiance
    }
}

impl From<&LightDesc> for Light {
    fn from(desc: &LightDesc) -> Self {
        Light::new(desc.direction, desc.radiance)
    }
}
