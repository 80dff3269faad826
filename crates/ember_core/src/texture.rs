//! Texture image loading.
//!
//! Loads images from disk and stores them as linear RGB floats ready for
//! (u, v) lookups by the renderer's image texture.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable naming a directory that is searched first.
pub const IMAGE_DIR_ENV: &str = "EMBER_IMAGES";

/// How many parent levels of `assets/` are searched.
const SEARCH_DEPTH: usize = 6;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Could not find image file '{0}'")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel data holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded image with pixel data.
///
/// Stores pixels in linear RGB float format for rendering.
#[derive(Clone, Debug)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Pixel data as [R, G, B], row-major, top row first
    pub pixels: Vec<[f32; 3]>,

    /// Original file path (for debugging)
    pub path: String,
}

impl ImageData {
    /// Create image data from 8-bit sRGB bytes (3 per pixel).
    pub fn from_srgb8(
        width: u32,
        height: u32,
        bytes: &[u8],
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let expected = width as usize * height as usize * 3;
        if bytes.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(3)
            .map(|p| [srgb_to_linear(p[0]), srgb_to_linear(p[1]), srgb_to_linear(p[2])])
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
            path: path.into(),
        })
    }

    /// Load an image from exactly this path.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TextureError::NotFound(path.display().to_string()));
        }

        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let image = Self::from_srgb8(width, height, rgb.as_raw(), path.to_string_lossy())?;

        log::debug!(
            "Loaded image: {} ({}x{}, {:.1} KB)",
            image.path,
            width,
            height,
            image.size_bytes() as f32 / 1024.0
        );

        Ok(image)
    }

    /// Hunt for an image file in the usual locations.
    ///
    /// If `EMBER_IMAGES` is set, that directory is tried first. Then the name
    /// itself, then `assets/<name>` in the current directory and each parent
    /// up to six levels.
    pub fn find(name: &str) -> TextureResult<Self> {
        let env_dir = std::env::var_os(IMAGE_DIR_ENV).map(PathBuf::from);

        for candidate in candidate_paths(name, env_dir.as_deref()) {
            match Self::load(&candidate) {
                Ok(image) => return Ok(image),
                Err(TextureError::NotFound(_)) => continue,
                Err(err) => {
                    log::warn!("Skipping {}: {}", candidate.display(), err);
                }
            }
        }

        log::error!("Could not load image file '{}'", name);
        Err(TextureError::NotFound(name.to_string()))
    }

    /// Pixel at integer coordinates, clamped into the image.
    ///
    /// Must not be called on a zero-sized image.
    pub fn pixel(&self, x: i64, y: i64) -> [f32; 3] {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }

    /// True when there is no pixel data to sample.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<[f32; 3]>()
    }
}

/// Ordered list of paths tried by [`ImageData::find`].
fn candidate_paths(name: &str, env_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(SEARCH_DEPTH + 3);

    if let Some(dir) = env_dir {
        paths.push(dir.join(name));
    }
    paths.push(PathBuf::from(name));

    let mut prefix = PathBuf::new();
    for _ in 0..=SEARCH_DEPTH {
        paths.push(prefix.join("assets").join(name));
        prefix.push("..");
    }

    paths
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
