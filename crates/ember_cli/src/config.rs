//! Render settings layered from a JSON file and the command line.

use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Overrides applied on top of a scene's defaults. Unset fields keep the
/// scene's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOverrides {
    pub image_width: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub seed: Option<u64>,
}

impl RenderOverrides {
    /// Read overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let overrides = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::debug!("Loaded config from {}: {:?}", path.display(), overrides);
        Ok(overrides)
    }

    /// File settings (if any) with command line flags layered on top.
    pub fn resolve(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(file.with_args(args))
    }

    fn with_args(self, args: &Args) -> Self {
        Self {
            image_width: args.width.or(self.image_width),
            samples_per_pixel: args.samples.or(self.samples_per_pixel),
            max_depth: args.depth.or(self.max_depth),
            seed: args.seed.or(self.seed),
        }
    }
}
