//! Command line arguments for the `cupola` binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cupola_core::SceneDescription;
use cupola_renderer::Schedule;

/// Built-in scenes selectable with `--preset`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Two matte ellipsoids, a gold mirror and a clipped dome
    #[default]
    Reference,
    /// One matte ellipsoid and one light
    Single,
}

impl Preset {
    pub fn description(self) -> SceneDescription {
        match self {
            Preset::Reference => SceneDescription::reference(),
            Preset::Single => SceneDescription::single_ellipsoid(),
        }
    }
}

/// Render an ellipsoid scene to a PNG file
#[derive(Parser, Debug, Clone)]
#[command(name = "cupola", version)]
pub struct Args {
    /// Load the scene from a JSON description instead of a preset
    #[arg(long, short = 's', value_name = "PATH", conflicts_with = "preset")]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render
    #[arg(long, short = 'p', value_enum, default_value_t = Preset::Reference)]
    pub preset: Preset,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Deepest mirror bounce that is still shaded, at most 64
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<u32>,

    /// Secondary ray offset along the surface normal
    #[arg(long)]
    pub epsilon: Option<f32>,

    /// PNG file to write
    #[arg(long, short = 'o', value_name = "PATH", default_value = "render.png")]
    pub output: PathBuf,

    /// Also write the effective scene description as JSON
    #[arg(long, value_name = "PATH")]
    pub dump_scene: Option<PathBuf>,

    /// Render on the calling thread only
    #[arg(long)]
    pub sequential: bool,
}

impl Args {
    /// The scene to render, with command line overrides applied.
    pub fn description(&self) -> Result<SceneDescription> {
        let mut desc = match &self.scene {
            Some(path) => SceneDescription::load_json(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?,
            None => self.preset.description(),
        };

        if let Some(width) = self.width {
            desc.render.width = width;
        }
        if let Some(height) = self.height {
            desc.render.height = height;
        }
        if let Some(max_depth) = self.max_depth {
            desc.render = desc.render.with_max_depth(max_depth);
        }
        if let Some(epsilon) = self.epsilon {
            desc.render.epsilon = epsilon;
        }

        Ok(desc)
    }

    pub fn schedule(&self) -> Schedule {
        if self.sequential {
            Schedule::Sequential
        } else {
            Schedule::Parallel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let args = Args::parse_from(["cupola"]);
        assert_eq!(args.preset, Preset::Reference);
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert_eq!(args.schedule(), Schedule::Parallel);

        let desc = args.description().unwrap();
        assert_eq!(desc, SceneDescription::reference());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "cupola",
            "--preset",
            "single",
            "--width",
            "320",
            "--height",
            "240",
            "--max-depth",
            "2",
            "--sequential",
        ]);
        let desc = args.description().unwrap();

        assert_eq!(desc.ellipsoids.len(), 1);
        assert_eq!(desc.render.width, 320);
        assert_eq!(desc.render.height, 240);
        assert_eq!(desc.render.max_depth, 2);
        assert_eq!(args.schedule(), Schedule::Sequential);
    }

    #[test]
    fn test_max_depth_above_ceiling_is_rejected() {
        let args = Args::parse_from(["cupola", "--max-depth", "1000000"]);
        let desc = args.description().unwrap();
        assert_eq!(desc.render.max_depth, 1_000_000);
        assert!(desc.validate().is_err());

        let args = Args::parse_from(["cupola", "--max-depth", "64"]);
        assert!(args.description().unwrap().validate().is_ok());
    }

    #[test]
    fn test_scene_conflicts_with_preset() {
        let result = Args::try_parse_from(["cupola", "--scene", "a.json", "--preset", "single"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_scene_file() {
        let args = Args::parse_from(["cupola", "-s", "/nonexistent/cupola.json"]);
        let err = args.description().unwrap_err();
        assert!(err.to_string().contains("Failed to load scene"));
    }
}
