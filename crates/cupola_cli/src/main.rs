use anyhow::{Context, Result};
use clap::Parser;
use cupola_renderer::{render_into, ImageBuffer, Scene};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    log::info!("Starting Cupola");

    let desc = args.description()?;

    if let Some(path) = &args.dump_scene {
        desc.save_json(path)
            .with_context(|| format!("Failed to write scene {}", path.display()))?;
        log::info!("Wrote scene description to {}", path.display());
    }

    let scene = Scene::build(&desc).context("Invalid scene")?;

    let config = scene.config();
    let mut image = ImageBuffer::new(config.width, config.height);
    render_into(&scene, &mut image, args.schedule())?;

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}
