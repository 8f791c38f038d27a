use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use image::codecs::gif::GifDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, Delay, DynamicImage, RgbaImage};
use tracing::{debug, info};

use super::frame::Frame;
use crate::error::{SpriteError, SpriteResult};
use crate::scale;

/// Decode every frame of an animated image container (`.gif`, `.webp`).
///
/// Frames come out in file order with their declared display delays in
/// whole milliseconds. A static `.webp` decodes as a single frame with no
/// declared duration.
pub fn decode(path: &Path, width: u32, height: u32) -> SpriteResult<Vec<Frame>> {
    info!(?path, "decoding animated image");

    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "gif" => {
            let decoder = GifDecoder::new(reader)
                .map_err(|e| SpriteError::decode(format!("failed to open gif: {e}")))?;
            collect_animation(decoder)?
        }
        _ => {
            let decoder = WebPDecoder::new(reader)
                .map_err(|e| SpriteError::decode(format!("failed to open webp: {e}")))?;
            if decoder.has_animation() {
                collect_animation(decoder)?
            } else {
                let img = DynamicImage::from_decoder(decoder)
                    .map_err(|e| SpriteError::decode(format!("failed to decode webp: {e}")))?;
                vec![(img.to_rgba8(), None)]
            }
        }
    };

    let mut frames = Vec::with_capacity(raw.len());
    for (index, (buffer, duration_ms)) in raw.into_iter().enumerate() {
        let image = scale::resize_frame(&DynamicImage::ImageRgba8(buffer), width, height);
        debug!(index, ?duration_ms, "decoded frame");
        frames.push(Frame {
            image,
            index: index as u32,
            duration_ms,
        });
    }

    info!(frame_count = frames.len(), "animated image decoded");
    Ok(frames)
}

/// Drain an animation decoder into raw frame buffers plus delays.
fn collect_animation(
    decoder: impl AnimationDecoder<'static>,
) -> SpriteResult<Vec<(RgbaImage, Option<u32>)>> {
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| SpriteError::decode(format!("frame iteration failed: {e}")))?;

    Ok(frames
        .into_iter()
        .map(|f| {
            let duration_ms = delay_ms(f.delay());
            (f.into_buffer(), duration_ms)
        })
        .collect())
}

/// Convert a frame delay to whole milliseconds.
fn delay_ms(delay: Delay) -> Option<u32> {
    let (numer, denom) = delay.numer_denom_ms();
    if denom == 0 {
        None
    } else {
        Some(numer / denom)
    }
}
