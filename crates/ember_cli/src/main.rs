//! ember - render one of the demo scenes to a numbered PNG.

mod cli;
mod config;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use config::RenderOverrides;
use ember_renderer::{render, RenderSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let overrides = RenderOverrides::resolve(&args)?;
    let seed = overrides.seed.unwrap_or(0);

    let start = Instant::now();
    let mut scene_rng = StdRng::seed_from_u64(seed);
    let mut scene = scenes::build(args.scene, &mut scene_rng);
    log::info!("Scene built in {:.2?}", start.elapsed());

    if let Some(width) = overrides.image_width {
        scene.camera.image_width = width;
    }
    if let Some(samples) = overrides.samples_per_pixel {
        scene.camera.samples_per_pixel = samples;
    }
    if let Some(depth) = overrides.max_depth {
        scene.camera.max_depth = depth;
    }

    let settings = RenderSettings {
        seed,
        ..RenderSettings::default()
    };
    let image = render(&scene.camera, scene.world.as_ref(), scene.lights.as_deref(), &settings);

    let path = ember_core::next_output_path(&args.output_dir, "png")
        .with_context(|| format!("Failed to prepare output directory {}", args.output_dir.display()))?;
    ember_core::save_png(&path, &image.pixels, image.width, image.height)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
