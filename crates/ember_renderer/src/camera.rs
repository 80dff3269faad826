//! Camera for ray generation.

use crate::random::{gen_f64, random_in_unit_disk};
use ember_math::{degrees_to_radians, Color, Point3, Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// Configure with the `with_*` builders, then call [`Camera::initialize`]
/// before generating rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub aspect_ratio: f64,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    // Lens settings
    vfov: f64,          // Vertical field of view in degrees
    defocus_angle: f64, // Variation angle of rays through each pixel
    focus_dist: f64,    // Distance from camera to plane of perfect focus

    /// Radiance for rays that escape the scene
    pub background: Color,

    // Cached computed values (set by initialize())
    image_height: u32,
    sqrt_spp: u32,
    recip_sqrt_spp: f64,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 100,
            aspect_ratio: 1.0,
            samples_per_pixel: 10,
            max_depth: 10,
            look_from: Point3::new(0.0, 0.0, -1.0),
            look_at: Point3::ZERO,
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: Color::ZERO,
            // Cached values (initialized to defaults)
            image_height: 1,
            sqrt_spp: 1,
            recip_sqrt_spp: 1.0,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    /// Set the image width in pixels. Height follows from the aspect ratio.
    pub fn with_image_width(mut self, width: u32) -> Self {
        self.image_width = width;
        self
    }

    /// Set the width over height ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.image_width = self.image_width.max(1);
        self.image_height = ((self.image_width as f64 / self.aspect_ratio) as u32).max(1);

        self.sqrt_spp = ((self.samples_per_pixel as f64).sqrt() as u32).max(1);
        self.recip_sqrt_spp = 1.0 / self.sqrt_spp as f64;

        self.center = self.look_from;

        // Calculate viewport dimensions
        let theta = degrees_to_radians(self.vfov);
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = self.focus_dist * degrees_to_radians(self.defocus_angle / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        log::debug!(
            "Camera initialized: {}x{}, {} samples ({}x{} strata), depth {}",
            self.image_width,
            self.image_height,
            self.samples_per_pixel,
            self.sqrt_spp,
            self.sqrt_spp,
            self.max_depth
        );
    }

    /// Generate a ray for pixel (i, j), jittered within stratum (s_i, s_j).
    pub fn get_ray(&self, i: u32, j: u32, s_i: u32, s_j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = self.sample_square_stratified(s_i, s_j, rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;
        let ray_time = gen_f64(rng);

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    /// Random point in sub-square (s_i, s_j) of the pixel [-0.5, 0.5]^2.
    fn sample_square_stratified(&self, s_i: u32, s_j: u32, rng: &mut dyn RngCore) -> Vec3 {
        let px = ((s_i as f64 + gen_f64(rng)) * self.recip_sqrt_spp) - 0.5;
        let py = ((s_j as f64 + gen_f64(rng)) * self.recip_sqrt_spp) - 0.5;
        Vec3::new(px, py, 0.0)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Image height derived by the last `initialize`.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Strata per pixel side: floor(sqrt(samples_per_pixel)).
    pub fn sqrt_spp(&self) -> u32 {
        self.sqrt_spp
    }

    /// Weight of one sample in the pixel average.
    pub fn samples_scale(&self) -> f64 {
        self.recip_sqrt_spp * self.recip_sqrt_spp
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new()
            .with_image_width(800)
            .with_aspect_ratio(16.0 / 9.0)
            .with_quality(10, 5)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);

        camera.initialize();

        assert_eq!(camera.center, Point3::ZERO);
        assert!((camera.w - Vec3::Z).length() < 1e-12);
        assert_eq!(camera.image_height(), 450);
        assert_eq!(camera.sqrt_spp(), 3);
        assert!((camera.samples_scale() - 1.0 / 9.0).abs() < 1e-15);
    }

    #[test]
    fn test_camera_height_at_least_one() {
        let mut camera = Camera::new().with_image_width(10).with_aspect_ratio(100.0);
        camera.initialize();
        assert_eq!(camera.image_height(), 1);

        let mut camera = Camera::new().with_quality(0, 1);
        camera.initialize();
        assert_eq!(camera.sqrt_spp(), 1);
    }

    #[test]
    fn test_camera_ray_direction() {
        let mut camera = Camera::new()
            .with_image_width(100)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(42);

        // Center ray should point roughly towards -Z
        let ray = camera.get_ray(50, 50, 0, 0, &mut rng);
        assert!(ray.direction().z < 0.0);
        assert!(ray.time() >= 0.0 && ray.time() < 1.0);

        // Top-left pixel looks up and to the left
        let corner = camera.get_ray(0, 0, 0, 0, &mut rng);
        assert!(corner.direction().x < 0.0 && corner.direction().y > 0.0);
    }

    #[test]
    fn test_stratified_samples_stay_in_their_cell() {
        let mut camera = Camera::new().with_quality(16, 1);
        camera.initialize();
        let mut rng = StdRng::seed_from_u64(43);

        for s_j in 0..4 {
            for s_i in 0..4 {
                let offset = camera.sample_square_stratified(s_i, s_j, &mut rng);
                let lo_x = s_i as f64 * 0.25 - 0.5;
                let lo_y = s_j as f64 * 0.25 - 0.5;
                assert!(offset.x >= lo_x && offset.x < lo_x + 0.25);
                assert!(offset.y >= lo_y && offset.y < lo_y + 0.25);
            }
        }
    }

    #[test]
    fn test_defocus_moves_origin() {
        let mut camera = Camera::new()
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(40.0, 10.0, 5.0);
        camera.initialize();
        let mut rng = StdRng::seed_from_u64(44);

        let ray = camera.get_ray(10, 10, 0, 0, &mut rng);
        assert!(ray.origin().z.abs() < 1e-12);
        assert!(ray.origin().length() > 0.0);
    }
}
