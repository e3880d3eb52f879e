//! Cupola Renderer - CPU ray tracing of ellipsoid scenes.
//!
//! A recursive ray tracer with:
//! - Analytic ray/ellipsoid intersection with an optional height clip
//! - Ambient, diffuse and Blinn-Phong specular lighting from directional
//!   lights with hard shadows
//! - Mirror reflection weighted by Schlick's Fresnel approximation
//!
//! Build a [`Scene`] once from a [`SceneDescription`], then call [`render`].

mod camera;
mod ellipsoid;
mod light;
mod material;
mod primitive;
mod renderer;
mod scene;

pub use camera::Camera;
pub use ellipsoid::Ellipsoid;
pub use light::Light;
pub use material::{Color, Material, MaterialId, Matte, Mirror};
pub use primitive::{Hit, Primitive};
pub use renderer::{
    color_to_rgba8, render, render_into, render_pixel, ImageBuffer, RenderError, RenderResult,
    RenderStats, Rgba, Schedule,
};
pub use scene::Scene;

/// Re-export the description types and math from the lower crates
pub use cupola_core::{RenderConfig, SceneDescription, SceneError, SceneResult};
pub use cupola_math::{Interval, Ray, Vec3};
