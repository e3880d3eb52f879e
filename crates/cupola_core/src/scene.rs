//! Scene description types for Cupola.
//!
//! A description is plain data: it says where the camera is, which lights
//! and materials exist and where the ellipsoids sit. It carries no derived
//! shading values; the renderer computes those when it builds a scene.
//! Descriptions can be written by hand as JSON and are checked with
//! [`SceneDescription::validate`] before use.

use std::fs;
use std::path::Path;

use cupola_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid ambient radiance: {0}")]
    InvalidAmbient(String),

    #[error("Invalid light {index}: {message}")]
    InvalidLight { index: usize, message: String },

    #[error("Invalid material {index}: {message}")]
    InvalidMaterial { index: usize, message: String },

    #[error("Invalid ellipsoid {index}: {message}")]
    InvalidEllipsoid { index: usize, message: String },

    #[error("Ellipsoid {ellipsoid} references unknown material {material}")]
    UnknownMaterial { ellipsoid: usize, material: usize },

    #[error("Invalid render settings: {0}")]
    InvalidRenderConfig(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Largest accepted `max_depth`. Mirror bounces recurse on the stack, one
/// frame per level.
pub const MAX_DEPTH_LIMIT: u32 = 64;

/// Pinhole camera placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    /// Eye position
    pub eye: Vec3,

    /// Point the camera looks at; its distance from the eye is the focal distance
    pub look_at: Vec3,

    /// Approximate up direction, need not be orthogonal to the view direction
    pub up: Vec3,

    /// Full field of view in degrees
    pub fov_degrees: f32,
}

/// A directional light.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDesc {
    /// Direction towards the light (normalized by the renderer)
    pub direction: Vec3,

    /// Emitted radiance (RGB)
    pub radiance: Vec3,
}

/// Surface description.
///
/// Serialized with a `type` tag:
///
/// ```json
/// { "type": "matte", "diffuse": [0.8, 0.2, 0.1], "specular": [1, 1, 1], "shininess": 50 }
/// { "type": "mirror", "n": [0.17, 0.35, 1.5], "kappa": [3.1, 2.7, 1.9] }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Diffuse plus Phong-Blinn highlight. The ambient coefficient is
    /// always `diffuse * PI` and cannot be set on its own.
    Matte {
        diffuse: Vec3,
        specular: Vec3,
        shininess: f32,
    },

    /// Perfect mirror given by refractive index and absorption per channel.
    Mirror { n: Vec3, kappa: Vec3 },
}

/// An axis-aligned ellipsoid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EllipsoidDesc {
    pub center: Vec3,

    /// Semi-axis lengths along X, Y and Z
    pub axes: Vec3,

    /// Index into [`SceneDescription::materials`]
    pub material: usize,

    /// Hits above this height are discarded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_y: Option<f32>,
}

/// Render settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Deepest recursion level that still shades; deeper calls return the
    /// ambient radiance. With the default of 5 at most six levels run.
    /// Must not exceed [`MAX_DEPTH_LIMIT`].
    pub max_depth: u32,

    /// Offset applied to secondary ray origins along the surface normal
    pub epsilon: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            max_depth: 5,
            epsilon: 1e-4,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the recursion cutoff.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check the settings for values the renderer cannot work with.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidRenderConfig(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(SceneError::InvalidRenderConfig(format!(
                "max_depth must be at most {}, got {}",
                MAX_DEPTH_LIMIT, self.max_depth
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SceneError::InvalidRenderConfig(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// A complete scene: camera, ambient term, lights, materials and geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDesc,

    /// Ambient radiance, also returned for rays that leave the scene
    pub ambient: Vec3,

    #[serde(default)]
    pub lights: Vec<LightDesc>,

    #[serde(default)]
    pub materials: Vec<MaterialDesc>,

    #[serde(default)]
    pub ellipsoids: Vec<EllipsoidDesc>,

    #[serde(default)]
    pub render: RenderConfig,
}

impl SceneDescription {
    /// Parse a description from a JSON string.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the description as pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a description from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading scene description from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Write the description to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> SceneResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)?;
        log::debug!("Wrote scene description to {}", path.display());
        Ok(())
    }

    /// Check every part of the description.
    ///
    /// Returns the first problem found. A description that passes can be
    /// turned into a renderable scene without producing NaNs.
    pub fn validate(&self) -> SceneResult<()> {
        self.render.validate()?;
        validate_camera(&self.camera)?;

        if !is_non_negative(self.ambient) {
            return Err(SceneError::InvalidAmbient(format!(
                "components must be finite and non-negative, got {}",
                self.ambient
            )));
        }

        for (index, light) in self.lights.iter().enumerate() {
            validate_light(index, light)?;
        }

        for (index, material) in self.materials.iter().enumerate() {
            validate_material(index, material)?;
        }

        for (index, ellipsoid) in self.ellipsoids.iter().enumerate() {
            validate_ellipsoid(index, ellipsoid, self.materials.len())?;
        }

        Ok(())
    }
}

fn is_non_negative(v: Vec3) -> bool {
    v.is_finite() && v.min_element() >= 0.0
}

fn validate_camera(camera: &CameraDesc) -> SceneResult<()> {
    if !(camera.eye.is_finite() && camera.look_at.is_finite() && camera.up.is_finite()) {
        return Err(SceneError::InvalidCamera(
            "eye, look_at and up must be finite".to_string(),
        ));
    }

    let w = camera.eye - camera.look_at;
    if w.length_squared() == 0.0 {
        return Err(SceneError::InvalidCamera(
            "eye and look_at coincide".to_string(),
        ));
    }
    if camera.up.cross(w).length_squared() == 0.0 {
        return Err(SceneError::InvalidCamera(
            "up is parallel to the view direction".to_string(),
        ));
    }
    if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
        return Err(SceneError::InvalidCamera(format!(
            "fov must be in (0, 180) degrees, got {}",
            camera.fov_degrees
        )));
    }

    Ok(())
}

fn validate_light(index: usize, light: &LightDesc) -> SceneResult<()> {
    if !light.direction.is_finite() || light.direction.length_squared() == 0.0 {
        return Err(SceneError::InvalidLight {
            index,
            message: format!("direction must be a finite non-zero vector, got {}", light.direction),
        });
    }
    if !is_non_negative(light.radiance) {
        return Err(SceneError::InvalidLight {
            index,
            message: format!("radiance must be non-negative, got {}", light.radiance),
        });
    }
    Ok(())
}

fn validate_material(index: usize, material: &MaterialDesc) -> SceneResult<()> {
    let fail = |message: String| SceneError::InvalidMaterial { index, message };

    match material {
        MaterialDesc::Matte {
            diffuse,
            specular,
            shininess,
        } => {
            if !is_non_negative(*diffuse) {
                return Err(fail(format!("diffuse must be non-negative, got {}", diffuse)));
            }
            if !is_non_negative(*specular) {
                return Err(fail(format!("specular must be non-negative, got {}", specular)));
            }
            if !(shininess.is_finite() && *shininess > 0.0) {
                return Err(fail(format!("shininess must be positive, got {}", shininess)));
            }
        }
        MaterialDesc::Mirror { n, kappa } => {
            if !(n.is_finite() && n.min_element() > 0.0) {
                return Err(fail(format!("refractive index must be positive, got {}", n)));
            }
            if !is_non_negative(*kappa) {
                return Err(fail(format!("absorption must be non-negative, got {}", kappa)));
            }
        }
    }

    Ok(())
}

fn validate_ellipsoid(index: usize, ellipsoid: &EllipsoidDesc, materials: usize) -> SceneResult<()> {
    let fail = |message: String| SceneError::InvalidEllipsoid { index, message };

    if !ellipsoid.center.is_finite() {
        return Err(fail(format!("center must be finite, got {}", ellipsoid.center)));
    }
    if !(ellipsoid.axes.is_finite() && ellipsoid.axes.min_element() > 0.0) {
        return Err(fail(format!(
            "semi-axes must be positive, got {}",
            ellipsoid.axes
        )));
    }
    if ellipsoid.material >= materials {
        return Err(SceneError::UnknownMaterial {
            ellipsoid: index,
            material: ellipsoid.material,
        });
    }
    if let Some(cut_y) = ellipsoid.cut_y {
        if !cut_y.is_finite() {
            return Err(fail(format!("cut_y must be finite, got {}", cut_y)));
        }
        if cut_y < ellipsoid.center.y - ellipsoid.axes.y {
            log::warn!(
                "Ellipsoid {} is clipped at y={} below its lowest point; it will never be hit",
                index,
                cut_y
            );
        }
    }

    Ok(())
}
