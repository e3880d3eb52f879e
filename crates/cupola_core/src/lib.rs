//! Cupola Core - scene descriptions for the Cupola ray tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraDesc`,
//!   `LightDesc`, `MaterialDesc`, `EllipsoidDesc`, `RenderConfig`
//! - **Validation** of descriptions before they reach the renderer
//! - **Presets**: the reference four-ellipsoid scene and a single-ellipsoid
//!   test scene
//! - **JSON** loading and saving
//!
//! # Example
//!
//! ```ignore
//! use cupola_core::SceneDescription;
//!
//! let desc = SceneDescription::load_json("scene.json")?;
//! desc.validate()?;
//! println!("{} ellipsoids, {} lights", desc.ellipsoids.len(), desc.lights.len());
//! ```

pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use scene::{
    CameraDesc, EllipsoidDesc, LightDesc, MaterialDesc, RenderConfig, SceneDescription,
    SceneError, SceneResult, MAX_DEPTH_LIMIT,
};
