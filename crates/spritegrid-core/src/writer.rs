use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::RgbImage;
use tracing::info;

use crate::error::SpriteResult;
use crate::metadata::Metadata;

/// Fixed sprite-sheet file name, overwritten on every run.
pub const SHEET_FILE: &str = "image.png";
/// Fixed metadata file name, overwritten on every run.
pub const METADATA_FILE: &str = "frame.json";

/// Write the composed canvas into `dir` as a maximally-compressed PNG.
pub fn write_sheet(canvas: &RgbImage, dir: &Path) -> SpriteResult<PathBuf> {
    let path = dir.join(SHEET_FILE);
    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let encoder = PngEncoder::new_with_quality(
        BufWriter::new(file),
        CompressionType::Best,
        FilterType::Adaptive,
    );
    canvas
        .write_with_encoder(encoder)
        .with_context(|| format!("failed to encode {}", path.display()))?;

    info!(?path, width = canvas.width(), height = canvas.height(), "sprite sheet written");
    Ok(path)
}

/// Write the layout descriptor into `dir` as UTF-8 JSON.
pub fn write_metadata(metadata: &Metadata, dir: &Path) -> SpriteResult<PathBuf> {
    let path = dir.join(METADATA_FILE);
    let json = serde_json::to_string(metadata).context("failed to serialize metadata")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(?path, "metadata written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn sheet_round_trips_losslessly() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut canvas = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        canvas.put_pixel(1, 2, Rgb([255, 10, 0]));

        let path = write_sheet(&canvas, dir.path()).expect("write sheet");
        assert_eq!(path.file_name().unwrap(), SHEET_FILE);

        let read_back = image::open(&path).expect("reopen sheet").to_rgb8();
        assert_eq!(read_back.dimensions(), (4, 4));
        assert_eq!(*read_back.get_pixel(1, 2), Rgb([255, 10, 0]));
        assert_eq!(*read_back.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn outputs_are_overwritten_on_rerun() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = Metadata {
            fps: 10,
            frame_height: 128,
            frame_width: 128,
            image_height: 128,
            image_width: 128,
            num_frames: 1,
        };
        let second = Metadata { fps: 4, num_frames: 4, ..first };

        write_metadata(&first, dir.path()).expect("first write");
        let path = write_metadata(&second, dir.path()).expect("second write");

        let json = std::fs::read_to_string(path).expect("read metadata");
        assert!(json.contains(r#""fps":4"#));
        assert!(json.contains(r#""numFrames":4"#));
    }
}
