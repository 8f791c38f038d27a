use image::{imageops, Rgb, RgbImage};
use tracing::info;

use crate::media::frame::Frame;

/// Row-major square grid sized to just fit a frame sequence.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    pub frame_width: u32,
    pub frame_height: u32,
    pub side_length: u32,
}

impl GridLayout {
    /// Smallest square grid holding `frame_count` cells of the given size.
    pub fn new(frame_count: usize, frame_width: u32, frame_height: u32) -> GridLayout {
        assert!(frame_count > 0, "grid requires at least one frame");
        let side_length = (frame_count as f64).sqrt().ceil() as u32;
        GridLayout {
            frame_width,
            frame_height,
            side_length,
        }
    }

    pub fn canvas_width(&self) -> u32 {
        self.frame_width * self.side_length
    }

    pub fn canvas_height(&self) -> u32 {
        self.frame_height * self.side_length
    }

    /// Top-left pixel offset of cell `index`, row-major from the top-left
    /// corner of the canvas.
    pub fn placement(&self, index: u32) -> (u32, u32) {
        (
            (index % self.side_length) * self.frame_width,
            (index / self.side_length) * self.frame_height,
        )
    }
}

/// Paste every frame onto an opaque black canvas at its grid cell.
///
/// Cells past the last frame stay black when the sequence does not fill
/// the grid exactly.
pub fn compose(frames: &[Frame], layout: GridLayout) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(
        layout.canvas_width(),
        layout.canvas_height(),
        Rgb([0, 0, 0]),
    );

    for frame in frames {
        let (x, y) = layout.placement(frame.index);
        imageops::replace(&mut canvas, &frame.image, i64::from(x), i64::from(y));
    }

    info!(
        side_length = layout.side_length,
        width = canvas.width(),
        height = canvas.height(),
        "sprite sheet composed"
    );
    canvas
}
