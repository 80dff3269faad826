//! Simple path tracer example.
//!
//! Renders three spheres on a checkered ground and saves a PNG.

use ember_renderer::{
    render, BvhNode, Camera, CheckerTexture, Color, Dielectric, Hittable, Lambertian, Metal,
    Point3, RenderSettings, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let world = build_scene();
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new()
        .with_image_width(400)
        .with_aspect_ratio(16.0 / 9.0)
        .with_quality(64, 10)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0)
        .with_background(Color::new(0.70, 0.80, 1.00));

    let image = render(&camera, &world, None, &RenderSettings::default());

    let filename = "simple_render.png";
    ember_core::save_png(filename, &image.pixels, image.width, image.height)?;
    log::info!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> BvhNode {
    let ground = CheckerTexture::from_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::splat(0.9));

    let objects: Vec<Box<dyn Hittable>> = vec![
        Box::new(Sphere::new(
            Point3::new(0.0, -1000.0, 0.0),
            1000.0,
            Arc::new(Lambertian::from_texture(Arc::new(ground))),
        )),
        Box::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5)))),
        Box::new(Sphere::new(
            Point3::new(-4.0, 1.0, 0.0),
            1.0,
            Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
        )),
        Box::new(Sphere::new(
            Point3::new(4.0, 1.0, 0.0),
            1.0,
            Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
        )),
    ];

    BvhNode::with_rng(objects, &mut StdRng::seed_from_u64(0))
}
