//! Command line arguments.

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Demo scenes the binary knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneName {
    /// Random small spheres around three large ones
    BookOne,
    /// The same field with diffuse spheres bouncing during the shutter
    BouncingSpheres,
    /// Two checkered spheres touching
    CheckeredSpheres,
    /// A globe with an image texture
    Earth,
    /// Marble noise on a ground plane and a sphere
    PerlinSpheres,
    /// Five coloured quads
    Quads,
    /// Noise spheres lit by a sphere and a quad light
    SimpleLight,
    /// Cornell box with a glass sphere
    CornellBox,
    /// Cornell box with two smoke blocks
    CornellSmoke,
    /// Everything at once
    FinalScene,
}

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "Offline path tracer rendering a fixed set of demo scenes")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "cornell-box")]
    pub scene: SceneName,

    /// Image width in pixels (height follows the scene's aspect ratio)
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel, rounded down to a square number of strata
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub depth: Option<u32>,

    /// Seed for scene generation and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory that receives numbered PNG files
    #[arg(long, default_value = "renders")]
    pub output_dir: PathBuf,

    /// JSON file with render settings; flags given here take precedence
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["ember"]);
        assert_eq!(args.scene, SceneName::CornellBox);
        assert_eq!(args.output_dir, PathBuf::from("renders"));
        assert!(args.width.is_none() && args.config.is_none());
    }

    #[test]
    fn test_scene_names_are_kebab_case() {
        let args = Args::parse_from(["ember", "--scene", "cornell-smoke", "--samples", "16", "--seed", "7"]);
        assert_eq!(args.scene, SceneName::CornellSmoke);
        assert_eq!(args.samples, Some(16));
        assert_eq!(args.seed, Some(7));

        assert!(Args::try_parse_from(["ember", "--scene", "teapot"]).is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
