use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing::info;

use crate::error::{SpriteError, SpriteResult};
use crate::media::{self, InputKind};
use crate::metadata::Metadata;
use crate::sheet::{self, GridLayout};
use crate::timing;
use crate::writer;

/// Width of every output cell, in pixels.
pub const FRAME_WIDTH: u32 = 128;
/// Height of every output cell, in pixels.
pub const FRAME_HEIGHT: u32 = 128;

/// What a completed conversion produced.
#[derive(Debug)]
pub struct Summary {
    pub frame_count: usize,
    pub side_length: u32,
    pub fps: u32,
    pub sheet_path: PathBuf,
    pub metadata_path: PathBuf,
}

/// Convert one animated image or video into a sprite sheet plus layout
/// descriptor, written into `out_dir` under fixed names.
///
/// Strictly linear: decode, resize, estimate the rate, pack the grid,
/// write both artifacts. Any failure aborts the run; nothing is retried
/// and partially-written output is not cleaned up.
pub fn run_pipeline(input: &Path, out_dir: &Path) -> SpriteResult<Summary> {
    // Extension check comes first so an unsupported path fails before any
    // file I/O.
    let kind = InputKind::from_path(input)?;

    if !input.exists() {
        return Err(SpriteError::Other(anyhow!(
            "input does not exist: {}",
            input.display()
        )));
    }

    info!(?input, %kind, "conversion starting");

    let frames = media::decode_frames(input, FRAME_WIDTH, FRAME_HEIGHT)?;
    if frames.is_empty() {
        return Err(SpriteError::EmptyInput);
    }

    let durations: Vec<Option<u32>> = frames.iter().map(|f| f.duration_ms).collect();
    let fps = timing::estimate_fps(&durations);

    let layout = GridLayout::new(frames.len(), FRAME_WIDTH, FRAME_HEIGHT);
    let canvas = sheet::compose(&frames, layout);

    let metadata = Metadata {
        fps,
        frame_height: FRAME_HEIGHT,
        frame_width: FRAME_WIDTH,
        image_height: layout.canvas_height(),
        image_width: layout.canvas_width(),
        num_frames: frames.len() as u32,
    };

    let sheet_path = writer::write_sheet(&canvas, out_dir)?;
    let metadata_path = writer::write_metadata(&metadata, out_dir)?;

    info!(
        frame_count = frames.len(),
        side_length = layout.side_length,
        fps,
        "conversion complete"
    );

    Ok(Summary {
        frame_count: frames.len(),
        side_length: layout.side_length,
        fps,
        sheet_path,
        metadata_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame as GifFrame, Rgb, Rgba, RgbaImage};

    fn write_test_gif(path: &Path, colors: &[[u8; 4]], delay_ms: u32) {
        let file = File::create(path).expect("create gif");
        let mut encoder = GifEncoder::new(file);
        let frames = colors.iter().map(|&c| {
            GifFrame::from_parts(
                RgbaImage::from_pixel(16, 16, Rgba(c)),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            )
        });
        encoder.encode_frames(frames).expect("encode gif");
    }

    #[test]
    fn four_frame_gif_produces_the_documented_artifacts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("anim.gif");
        write_test_gif(
            &input,
            &[
                [255, 0, 0, 255],
                [0, 255, 0, 255],
                [0, 0, 255, 255],
                [255, 255, 255, 255],
            ],
            250,
        );

        let summary = run_pipeline(&input, dir.path()).expect("pipeline");
        assert_eq!(summary.frame_count, 4);
        assert_eq!(summary.side_length, 2);
        assert_eq!(summary.fps, 4);

        let json = std::fs::read_to_string(dir.path().join("frame.json")).expect("metadata");
        assert_eq!(
            json,
            r#"{"fps":4,"frameHeight":128,"frameWidth":128,"imageHeight":256,"imageWidth":256,"numFrames":4}"#
        );

        let sheet = image::open(dir.path().join("image.png")).expect("sheet").to_rgb8();
        assert_eq!(sheet.dimensions(), (256, 256));
        assert_eq!(*sheet.get_pixel(10, 10), Rgb([255, 0, 0]));
        assert_eq!(*sheet.get_pixel(200, 10), Rgb([0, 255, 0]));
        assert_eq!(*sheet.get_pixel(10, 200), Rgb([0, 0, 255]));
        assert_eq!(*sheet.get_pixel(200, 200), Rgb([255, 255, 255]));
    }

    #[test]
    fn five_frame_gif_leaves_trailing_cells_black() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("anim.gif");
        write_test_gif(&input, &[[255, 0, 0, 255]; 5], 100);

        let summary = run_pipeline(&input, dir.path()).expect("pipeline");
        assert_eq!(summary.side_length, 3);
        assert_eq!(summary.fps, 10);

        let sheet = image::open(dir.path().join("image.png")).expect("sheet").to_rgb8();
        assert_eq!(sheet.dimensions(), (384, 384));
        // Cell 4 is the last occupied one; cell 5 and the bottom row stay black.
        assert_eq!(*sheet.get_pixel(128 + 10, 128 + 10), Rgb([255, 0, 0]));
        assert_eq!(*sheet.get_pixel(256 + 10, 128 + 10), Rgb([0, 0, 0]));
        assert_eq!(*sheet.get_pixel(10, 256 + 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn unsupported_extension_fails_before_any_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("still.bmp");
        std::fs::write(&input, b"not really a bmp").expect("write input");

        let err = run_pipeline(&input, dir.path()).unwrap_err();
        assert!(matches!(err, SpriteError::UnsupportedFormat(_)), "got: {err}");
        assert!(!dir.path().join("image.png").exists());
        assert!(!dir.path().join("frame.json").exists());
    }

    #[test]
    fn gif_with_no_frames_is_empty_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("empty.gif");
        // Header, 1x1 logical screen descriptor, trailer. No image blocks.
        let bytes: &[u8] = &[
            b'G', b'I', b'F', b'8', b'9', b'a', 1, 0, 1, 0, 0, 0, 0, 0x3B,
        ];
        std::fs::write(&input, bytes).expect("write gif");

        let err = run_pipeline(&input, dir.path()).unwrap_err();
        assert!(matches!(err, SpriteError::EmptyInput), "got: {err}");
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = run_pipeline(&dir.path().join("missing.gif"), dir.path()).unwrap_err();
        assert!(matches!(err, SpriteError::Other(_)), "got: {err}");
    }
}
