//! End-to-end renders of small scenes.

use ember_renderer::{
    ray_color, render, Camera, Color, DiffuseLight, Hittable, HittableList, ImageBuffer,
    Lambertian, Point3, Quad, Ray, RenderSettings, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn light_quad() -> Quad {
    Quad::new(
        Point3::new(-1.0, 4.0, -1.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
        Arc::new(DiffuseLight::new(Color::splat(15.0))),
    )
}

fn scene(blocked: bool) -> HittableList {
    let mut world = HittableList::new();
    world.add(Box::new(Quad::new(
        Point3::new(-5.0, 0.0, -5.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 10.0),
        Arc::new(Lambertian::new(Color::splat(0.5))),
    )));
    world.add(Box::new(light_quad()));
    if blocked {
        // Black slab between the light and the whole floor
        world.add(Box::new(Quad::new(
            Point3::new(-3.0, 3.0, -3.0),
            Vec3::new(6.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 6.0),
            Arc::new(Lambertian::new(Color::ZERO)),
        )));
    }
    world
}

fn camera() -> Camera {
    Camera::new()
        .with_image_width(24)
        .with_aspect_ratio(1.0)
        .with_quality(16, 4)
        .with_position(Point3::new(0.0, 2.0, 6.0), Point3::ZERO, Vec3::Y)
        .with_lens(60.0, 0.0, 6.0)
}

fn mean_brightness(image: &ImageBuffer) -> f64 {
    image.pixels.iter().map(|&p| p as f64).sum::<f64>() / image.pixels.len() as f64
}

#[test]
fn test_lit_floor_is_brighter_than_shadowed_floor() {
    init_logging();
    let light = light_quad();
    let lights: Option<&dyn Hittable> = Some(&light);
    let settings = RenderSettings {
        seed: 11,
        bucket_size: 8,
    };

    let lit = render(&camera(), &scene(false), lights, &settings);
    let shadowed = render(&camera(), &scene(true), lights, &settings);

    let (lit, shadowed) = (mean_brightness(&lit), mean_brightness(&shadowed));
    assert!(lit > 30.0, "lit mean {}", lit);
    assert!(shadowed < lit * 0.2, "lit {} shadowed {}", lit, shadowed);
}

#[test]
fn test_same_seed_same_image() {
    init_logging();
    let world = scene(false);
    let light = light_quad();
    let lights: Option<&dyn Hittable> = Some(&light);
    let settings = RenderSettings {
        seed: 21,
        bucket_size: 8,
    };

    let first = render(&camera(), &world, lights, &settings);
    let second = render(&camera(), &world, lights, &settings);
    assert_eq!(first, second);

    // Bucket layout does not change which samples a pixel draws
    let retiled = render(
        &camera(),
        &world,
        lights,
        &RenderSettings {
            seed: 21,
            bucket_size: 5,
        },
    );
    assert_eq!(first, retiled);

    let reseeded = render(
        &camera(),
        &world,
        lights,
        &RenderSettings {
            seed: 22,
            bucket_size: 8,
        },
    );
    assert_ne!(first.pixels, reseeded.pixels);
}

#[test]
fn test_render_without_light_sampling() {
    init_logging();
    let world = scene(false);
    let image = render(&camera(), &world, None, &RenderSettings::default());

    assert_eq!((image.width, image.height), (24, 24));
    assert!(mean_brightness(&image) > 0.0);
}

#[test]
fn test_ray_toward_light_outshines_shadow() {
    let light = Quad::new(
        Point3::new(-1.0, 5.0, -1.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
        Arc::new(DiffuseLight::new(Color::splat(15.0))),
    );
    let diffuse = Arc::new(Lambertian::new(Color::splat(0.5)));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, diffuse.clone())));
    world.add(Box::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, diffuse)));
    world.add(Box::new(Quad::new(
        Point3::new(-1.0, 5.0, -1.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
        Arc::new(DiffuseLight::new(Color::splat(15.0))),
    )));

    let mut rng = StdRng::seed_from_u64(31);
    let mut average = |ray: &Ray| {
        let mut sum = Color::ZERO;
        for _ in 0..200 {
            sum += ray_color(ray, 5, &world, Some(&light as &dyn Hittable), Color::ZERO, &mut rng);
        }
        sum / 200.0
    };

    let toward_light = average(&Ray::new(Point3::new(4.0, 1.0, 4.0), Vec3::new(-1.0, 1.0, -1.0), 0.0));
    // Ground just beside the sphere's contact point, hidden from the light
    let eye = Point3::new(4.0, 0.5, 0.0);
    let into_shadow = average(&Ray::new(eye, Point3::new(0.3, 0.0, 0.0) - eye, 0.0));

    assert_eq!(toward_light, Color::splat(15.0));
    assert!(into_shadow.x < 0.1 * toward_light.x, "shadow {:?}", into_shadow);
}
