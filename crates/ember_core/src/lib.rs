//! Ember Core - image input and output around the rendering kernel.
//!
//! This crate provides:
//!
//! - **Texture images**: `ImageData` loaded from disk with a directory search
//!   fallback, decoded to linear RGB.
//! - **Output**: PNG encoding of the 8-bit raster produced by the renderer and
//!   numbered output file naming.
//!
//! # Example
//!
//! ```ignore
//! use ember_core::{next_output_path, save_png, ImageData};
//!
//! let earth = ImageData::find("earthmap.jpg")?;
//! // ... render ...
//! let path = next_output_path("renders", "png")?;
//! save_png(&path, &pixels, width, height)?;
//! ```

pub mod output;
pub mod texture;

// Re-export commonly used types
pub use output::{next_output_path, save_png, OutputError, OutputResult};
pub use texture::{ImageData, TextureError, TextureResult, IMAGE_DIR_ENV};
