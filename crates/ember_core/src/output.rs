//! Image persistence for finished renders.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Channels per pixel in the renderer's raster.
pub const CHANNELS: usize = 3;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Write a row-major 8-bit RGB buffer as a PNG file.
pub fn save_png(path: impl AsRef<Path>, pixels: &[u8], width: u32, height: u32) -> OutputResult<()> {
    let expected = width as usize * height as usize * CHANNELS;
    if pixels.len() != expected {
        return Err(OutputError::SizeMismatch {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    let path = path.as_ref();
    image::save_buffer_with_format(
        path,
        pixels,
        width,
        height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )?;

    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}

/// Pick the next numbered file name in `dir`.
///
/// Counts the regular files already in the directory (creating it when
/// missing) and returns `<dir>/<count + 1>.<extension>`.
pub fn next_output_path(dir: impl AsRef<Path>, extension: &str) -> OutputResult<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut file_count = 0usize;
    for entry in fs::read_dir(dir)? {
        if entry?.file_type()?.is_file() {
            file_count += 1;
        }
    }

    Ok(dir.join(format!("{}.{}", file_count + 1, extension)))
}
