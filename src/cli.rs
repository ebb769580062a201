use std::path::PathBuf;

use clap::Parser;

/// Mark normalized landmark points on an image and save them as text.
#[derive(Parser, Debug, Default)]
#[command(name = "landmark-marker", version)]
pub struct CliArgs {
    /// Image to open at startup.
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Points file to import after the image has been opened.
    #[arg(short, long, value_name = "FILE.txt")]
    pub points: Option<PathBuf>,

    /// Settings file to use instead of the default location.
    #[arg(short, long, value_name = "FILE.json")]
    pub config: Option<PathBuf>,

    /// Initial click distance for selecting a point (0.0 to 0.02).
    #[arg(short, long, value_name = "DIST")]
    pub threshold: Option<f64>,
}
