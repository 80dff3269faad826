//! Demo scene builders.
//!
//! Every builder draws its random choices from the generator it is given, so a
//! fixed seed always produces the same scene.

use crate::cli::SceneName;
use ember_renderer::random::{gen_f64, gen_range, random_vec3};
use ember_renderer::{
    make_box, BvhNode, Camera, CheckerTexture, Color, ConstantMedium, Dielectric, DiffuseLight,
    Hittable, HittableList, ImageTexture, Lambertian, Material, Metal, NoiseTexture, Point3, Quad,
    RotateY, Sphere, Texture, Translate, Vec3,
};
use rand::RngCore;
use std::sync::Arc;

const SKY: Color = Color::new(0.70, 0.80, 1.00);

/// A world ready to render.
pub struct Scene {
    pub world: Box<dyn Hittable>,
    /// Importance-sampling targets; `None` samples materials only
    pub lights: Option<Box<dyn Hittable>>,
    pub camera: Camera,
}

impl Scene {
    fn sky_lit(world: impl Hittable + 'static, camera: Camera) -> Self {
        Self {
            world: Box::new(world),
            lights: None,
            camera,
        }
    }

    fn with_lights(world: impl Hittable + 'static, lights: impl Hittable + 'static, camera: Camera) -> Self {
        Self {
            world: Box::new(world),
            lights: Some(Box::new(lights)),
            camera,
        }
    }
}

/// Build the named scene.
pub fn build(name: SceneName, rng: &mut dyn RngCore) -> Scene {
    log::info!("Building scene {:?}", name);
    match name {
        SceneName::BookOne => book_one(rng, false),
        SceneName::BouncingSpheres => book_one(rng, true),
        SceneName::CheckeredSpheres => checkered_spheres(rng),
        SceneName::Earth => earth(),
        SceneName::PerlinSpheres => perlin_spheres(rng),
        SceneName::Quads => quads(rng),
        SceneName::SimpleLight => simple_light(rng),
        SceneName::CornellBox => cornell_box(rng),
        SceneName::CornellSmoke => cornell_smoke(rng),
        SceneName::FinalScene => final_scene(rng),
    }
}

fn lambertian(r: f64, g: f64, b: f64) -> Arc<dyn Material> {
    Arc::new(Lambertian::new(Color::new(r, g, b)))
}

fn book_one(rng: &mut dyn RngCore, bouncing: bool) -> Scene {
    let mut objects: Vec<Box<dyn Hittable>> = Vec::new();

    let ground = CheckerTexture::from_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::splat(0.9));
    objects.push(Box::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::from_texture(Arc::new(ground))),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_material = gen_f64(rng);
            let center = Point3::new(a as f64 + 0.9 * gen_f64(rng), 0.2, b as f64 + 0.9 * gen_f64(rng));

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_material < 0.8 {
                let albedo = random_vec3(rng, 0.0, 1.0) * random_vec3(rng, 0.0, 1.0);
                let material = Arc::new(Lambertian::new(albedo));
                if bouncing {
                    let center2 = center + Vec3::new(0.0, gen_range(rng, 0.0, 0.5), 0.0);
                    objects.push(Box::new(Sphere::moving(center, center2, 0.2, material)));
                } else {
                    objects.push(Box::new(Sphere::new(center, 0.2, material)));
                }
            } else if choose_material < 0.95 {
                let albedo = random_vec3(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                objects.push(Box::new(Sphere::new(center, 0.2, Arc::new(Metal::new(albedo, fuzz)))));
            } else {
                objects.push(Box::new(Sphere::new(center, 0.2, Arc::new(Dielectric::new(1.5)))));
            }
        }
    }

    objects.push(Box::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5)))));
    objects.push(Box::new(Sphere::new(Point3::new(-4.0, 1.0, 0.0), 1.0, lambertian(0.4, 0.2, 0.1))));
    objects.push(Box::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_image_width(400)
        .with_quality(100, 10)
        .with_background(SKY)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    Scene::sky_lit(BvhNode::with_rng(objects, rng), camera)
}

fn checkered_spheres(rng: &mut dyn RngCore) -> Scene {
    let checker: Arc<dyn Texture> =
        Arc::new(CheckerTexture::from_colors(0.8, Color::new(0.2, 0.3, 0.1), Color::splat(0.9)));
    let material: Arc<dyn Material> = Arc::new(Lambertian::from_texture(checker));

    let objects: Vec<Box<dyn Hittable>> = vec![
        Box::new(Sphere::new(Point3::new(0.0, -10.0, 0.0), 10.0, material.clone())),
        Box::new(Sphere::new(Point3::new(0.0, 10.0, 0.0), 10.0, material)),
    ];

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_image_width(400)
        .with_quality(100, 50)
        .with_background(SKY)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    Scene::sky_lit(BvhNode::with_rng(objects, rng), camera)
}

fn earth() -> Scene {
    let texture = Arc::new(ImageTexture::new("earthmap.jpg"));
    let globe = Sphere::new(Point3::ZERO, 2.0, Arc::new(Lambertian::from_texture(texture)));

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_image_width(400)
        .with_quality(100, 10)
        .with_background(SKY)
        .with_position(Point3::new(0.0, 0.0, 12.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    Scene::sky_lit(globe, camera)
}

fn perlin_spheres(rng: &mut dyn RngCore) -> Scene {
    let marble: Arc<dyn Material> = Arc::new(Lambertian::from_texture(Arc::new(NoiseTexture::new(4.0, rng))));

    let objects: Vec<Box<dyn Hittable>> = vec![
        Box::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, marble.clone())),
        Box::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, marble)),
    ];

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_image_width(400)
        .with_quality(100, 50)
        .with_background(SKY)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    Scene::sky_lit(BvhNode::with_rng(objects, rng), camera)
}

fn quads(rng: &mut dyn RngCore) -> Scene {
    let objects: Vec<Box<dyn Hittable>> = vec![
        // Left red, back green, right blue, upper orange, lower teal
        Box::new(Quad::new(
            Point3::new(-3.0, -2.0, 5.0),
            Vec3::new(0.0, 0.0, -4.0),
            Vec3::new(0.0, 4.0, 0.0),
            lambertian(1.0, 0.2, 0.2),
        )),
        Box::new(Quad::new(
            Point3::new(-2.0, -2.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
            lambertian(0.2, 1.0, 0.2),
        )),
        Box::new(Quad::new(
            Point3::new(3.0, -2.0, 1.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 4.0, 0.0),
            lambertian(0.2, 0.2, 1.0),
        )),
        Box::new(Quad::new(
            Point3::new(-2.0, 3.0, 1.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
            lambertian(1.0, 0.5, 0.0),
        )),
        Box::new(Quad::new(
            Point3::new(-2.0, -3.0, 5.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -4.0),
            lambertian(0.2, 0.8, 0.8),
        )),
    ];

    let camera = Camera::new()
        .with_aspect_ratio(1.0)
        .with_image_width(400)
        .with_quality(100, 10)
        .with_background(SKY)
        .with_position(Point3::new(0.0, 0.0, 9.0), Point3::ZERO, Vec3::Y)
        .with_lens(80.0, 0.0, 10.0);

    Scene::sky_lit(BvhNode::with_rng(objects, rng), camera)
}

fn simple_light(rng: &mut dyn RngCore) -> Scene {
    let marble: Arc<dyn Material> = Arc::new(Lambertian::from_texture(Arc::new(NoiseTexture::new(4.0, rng))));
    let glow: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(4.0)));

    let bulb = |material: Arc<dyn Material>| Sphere::new(Point3::new(0.0, 7.0, 0.0), 2.0, material);
    let panel = |material: Arc<dyn Material>| {
        Quad::new(Point3::new(3.0, 1.0, -2.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0), material)
    };

    let objects: Vec<Box<dyn Hittable>> = vec![
        Box::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, marble.clone())),
        Box::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, marble)),
        Box::new(bulb(glow.clone())),
        Box::new(panel(glow.clone())),
    ];

    let mut lights = HittableList::new();
    lights.add(Box::new(bulb(glow.clone())));
    lights.add(Box::new(panel(glow)));

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_image_width(400)
        .with_quality(100, 50)
        .with_background(Color::ZERO)
        .with_position(Point3::new(26.0, 3.0, 6.0), Point3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    Scene::with_lights(BvhNode::with_rng(objects, rng), lights, camera)
}

/// The five walls of the Cornell box, without its light.
fn cornell_walls(objects: &mut Vec<Box<dyn Hittable>>, white: &Arc<dyn Material>) {
    let red = lambertian(0.65, 0.05, 0.05);
    let green = lambertian(0.12, 0.45, 0.15);

    objects.push(Box::new(Quad::new(
        Point3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    )));
    objects.push(Box::new(Quad::new(
        Point3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    )));
    objects.push(Box::new(Quad::new(
        Point3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    objects.push(Box::new(Quad::new(
        Point3::splat(555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    objects.push(Box::new(Quad::new(
        Point3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white.clone(),
    )));
}

fn cornell_camera(samples: u32) -> Camera {
    Camera::new()
        .with_aspect_ratio(1.0)
        .with_image_width(600)
        .with_quality(samples, 50)
        .with_background(Color::ZERO)
        .with_position(Point3::new(278.0, 278.0, -800.0), Point3::new(278.0, 278.0, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 10.0)
}

/// Box with its minimum corner at the origin, turned about Y then moved into place.
fn placed_box(size: Point3, angle: f64, offset: Vec3, material: Arc<dyn Material>) -> Box<dyn Hittable> {
    let shape = make_box(Point3::ZERO, size, material);
    Box::new(Translate::new(Box::new(RotateY::new(Box::new(shape), angle)), offset))
}

fn cornell_box(rng: &mut dyn RngCore) -> Scene {
    let white = lambertian(0.73, 0.73, 0.73);
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    let ceiling_light = |material: Arc<dyn Material>| {
        Quad::new(
            Point3::new(343.0, 554.0, 332.0),
            Vec3::new(-130.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -105.0),
            material,
        )
    };
    let glass_ball = |material: Arc<dyn Material>| Sphere::new(Point3::new(190.0, 90.0, 190.0), 90.0, material);

    let mut objects: Vec<Box<dyn Hittable>> = Vec::new();
    cornell_walls(&mut objects, &white);
    objects.push(Box::new(ceiling_light(light.clone())));
    objects.push(placed_box(
        Point3::new(165.0, 330.0, 165.0),
        15.0,
        Vec3::new(265.0, 0.0, 295.0),
        white,
    ));
    objects.push(Box::new(glass_ball(glass.clone())));

    // Sample the light directly, and the glass ball for its caustics
    let mut lights = HittableList::new();
    lights.add(Box::new(ceiling_light(light)));
    lights.add(Box::new(glass_ball(glass)));

    Scene::with_lights(BvhNode::with_rng(objects, rng), lights, cornell_camera(1000))
}

fn cornell_smoke(rng: &mut dyn RngCore) -> Scene {
    let white = lambertian(0.73, 0.73, 0.73);
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(7.0)));

    let ceiling_light = |material: Arc<dyn Material>| {
        Quad::new(
            Point3::new(113.0, 554.0, 127.0),
            Vec3::new(330.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 305.0),
            material,
        )
    };

    let mut objects: Vec<Box<dyn Hittable>> = Vec::new();
    cornell_walls(&mut objects, &white);
    objects.push(Box::new(ceiling_light(light.clone())));

    let tall = placed_box(
        Point3::new(165.0, 330.0, 165.0),
        15.0,
        Vec3::new(265.0, 0.0, 295.0),
        white.clone(),
    );
    let short = placed_box(Point3::splat(165.0), -18.0, Vec3::new(130.0, 0.0, 65.0), white);
    objects.push(Box::new(ConstantMedium::from_color(tall, 0.01, Color::ZERO)));
    objects.push(Box::new(ConstantMedium::from_color(short, 0.01, Color::ONE)));

    Scene::with_lights(BvhNode::with_rng(objects, rng), ceiling_light(light), cornell_camera(200))
}

fn final_scene(rng: &mut dyn RngCore) -> Scene {
    let ground = lambertian(0.48, 0.83, 0.53);
    let boxes_per_side = 20;
    let mut boxes: Vec<Box<dyn Hittable>> = Vec::with_capacity(boxes_per_side * boxes_per_side);
    for i in 0..boxes_per_side {
        for j in 0..boxes_per_side {
            let w = 100.0;
            let x0 = -1000.0 + i as f64 * w;
            let z0 = -1000.0 + j as f64 * w;
            let y1 = gen_range(rng, 1.0, 101.0);
            boxes.push(Box::new(make_box(
                Point3::new(x0, 0.0, z0),
                Point3::new(x0 + w, y1, z0 + w),
                ground.clone(),
            )));
        }
    }

    let mut objects: Vec<Box<dyn Hittable>> = vec![Box::new(BvhNode::with_rng(boxes, rng))];

    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(7.0)));
    let ceiling_light = |material: Arc<dyn Material>| {
        Quad::new(
            Point3::new(123.0, 554.0, 147.0),
            Vec3::new(300.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 265.0),
            material,
        )
    };
    objects.push(Box::new(ceiling_light(light.clone())));

    let center1 = Point3::new(400.0, 400.0, 200.0);
    let center2 = center1 + Vec3::new(30.0, 0.0, 0.0);
    objects.push(Box::new(Sphere::moving(center1, center2, 50.0, lambertian(0.7, 0.3, 0.1))));

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    objects.push(Box::new(Sphere::new(Point3::new(260.0, 150.0, 45.0), 50.0, glass.clone())));
    objects.push(Box::new(Sphere::new(
        Point3::new(0.0, 150.0, 145.0),
        50.0,
        Arc::new(Metal::new(Color::new(0.8, 0.8, 0.9), 1.0)),
    )));

    // Glass shell around blue fog
    let shell = || Sphere::new(Point3::new(360.0, 150.0, 145.0), 70.0, glass.clone());
    objects.push(Box::new(shell()));
    objects.push(Box::new(ConstantMedium::from_color(Box::new(shell()), 0.2, Color::new(0.2, 0.4, 0.9))));

    // Thin mist over everything
    let mist = Sphere::new(Point3::ZERO, 5000.0, glass.clone());
    objects.push(Box::new(ConstantMedium::from_color(Box::new(mist), 0.0001, Color::ONE)));

    let globe = Arc::new(Lambertian::from_texture(Arc::new(ImageTexture::new("earthmap.jpg"))));
    objects.push(Box::new(Sphere::new(Point3::new(400.0, 200.0, 400.0), 100.0, globe)));
    let marble = Arc::new(Lambertian::from_texture(Arc::new(NoiseTexture::new(0.2, rng))));
    objects.push(Box::new(Sphere::new(Point3::new(220.0, 280.0, 300.0), 80.0, marble)));

    let white = lambertian(0.73, 0.73, 0.73);
    let cluster: Vec<Box<dyn Hittable>> = (0..1000)
        .map(|_| Box::new(Sphere::new(random_vec3(rng, 0.0, 165.0), 10.0, white.clone())) as Box<dyn Hittable>)
        .collect();
    let cluster = BvhNode::with_rng(cluster, rng);
    objects.push(Box::new(Translate::new(
        Box::new(RotateY::new(Box::new(cluster), 15.0)),
        Vec3::new(-100.0, 270.0, 395.0),
    )));

    let camera = Camera::new()
        .with_aspect_ratio(1.0)
        .with_image_width(400)
        .with_quality(250, 4)
        .with_background(Color::ZERO)
        .with_position(Point3::new(478.0, 278.0, -600.0), Point3::new(278.0, 278.0, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 10.0);

    Scene::with_lights(BvhNode::with_rng(objects, rng), ceiling_light(light), camera)
}
