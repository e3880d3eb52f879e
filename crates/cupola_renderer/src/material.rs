//! Surface materials.

use std::f32::consts::PI;

use cupola_core::MaterialDesc;
use cupola_math::Vec3;

/// Color type alias (linear RGB radiance, not clamped)
pub type Color = Vec3;

/// Index of a material inside its [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// How a surface responds to light.
///
/// Shading dispatches on the variant; there is no trait object involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Matte(Matte),
    Mirror(Mirror),
}

impl From<Matte> for Material {
    fn from(matte: Matte) -> Self {
        Material::Matte(matte)
    }
}

impl From<Mirror> for Material {
    fn from(mirror: Mirror) -> Self {
        Material::Mirror(mirror)
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        match *desc {
            MaterialDesc::Matte {
                diffuse,
                specular,
                shininess,
            } => Matte::new(diffuse, specular, shininess).into(),
            MaterialDesc::Mirror { n, kappa } => Mirror::new(n, kappa).into(),
        }
    }
}

/// Diffuse surface with a Blinn-Phong highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matte {
    ambient: Color,
    diffuse: Color,
    specular: Color,
    shininess: f32,
}

impl Matte {
    /// Create a matte material.
    ///
    /// The ambient coefficient is fixed at `diffuse * PI`.
    pub fn new(diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            ambient: diffuse * PI,
            diffuse,
            specular,
            shininess,
        }
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn diffuse(&self) -> Color {
        self.diffuse
    }

    pub fn specular(&self) -> Color {
        self.specular
    }

    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// Light reflected towards the viewer from one unoccluded light.
    ///
    /// - `normal`: unit normal facing the incoming ray
    /// - `ray_dir`: unit direction of the incoming ray
    /// - `light_dir`: unit direction towards the light
    /// - `radiance`: light's emitted radiance
    ///
    /// Returns zero when the light is at or below the horizon.
    pub fn direct(&self, normal: Vec3, ray_dir: Vec3, light_dir: Vec3, radiance: Color) -> Color {
        let cos_theta = normal.dot(light_dir);
        if cos_theta <= 0.0 {
            return Color::ZERO;
        }

        let mut out = radiance * self.diffuse * cos_theta;

        // Halfway vector; zero when the light sits exactly behind the viewer
        let halfway = (light_dir - ray_dir).normalize_or_zero();
        let cos_delta = normal.dot(halfway);
        if cos_delta > 0.0 {
            out += radiance * self.specular * cos_delta.powf(self.shininess);
        }

        out
    }
}

/// Ideal mirror with per-channel Fresnel reflectance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mirror {
    f0: Color,
}

impl Mirror {
    /// Create a mirror from refractive index `n` and absorption `kappa`.
    ///
    /// F0 = ((n - 1)^2 + kappa^2) / ((n + 1)^2 + kappa^2) per channel.
    pub fn new(n: Vec3, kappa: Vec3) -> Self {
        let kappa_sq = kappa * kappa;
        let num = (n - Vec3::ONE) * (n - Vec3::ONE) + kappa_sq;
        let denom = (n + Vec3::ONE) * (n + Vec3::ONE) + kappa_sq;

        Self { f0: num / denom }
    }

    /// Create a mirror with a known reflectance at normal incidence.
    pub fn from_f0(f0: Color) -> Self {
        Self { f0 }
    }

    /// Reflectance at normal incidence.
    pub fn f0(&self) -> Color {
        self.f0
    }

    /// Schlick's approximation: F0 + (1 - F0)(1 - cos_alpha)^5.
    pub fn fresnel(&self, cos_alpha: f32) -> Color {
        self.f0 + (Vec3::ONE - self.f0) * (1.0 - cos_alpha).powi(5)
    }
}
