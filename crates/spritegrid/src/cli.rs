use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "spritegrid",
    about = "Convert an animated image or video into a square sprite sheet"
)]
pub struct Cli {
    /// Path to the input file (.gif, .webp or .mp4).
    pub input: PathBuf,
}
