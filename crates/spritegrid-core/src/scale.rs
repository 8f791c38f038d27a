use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

/// Resize a decoded buffer to exactly `width`×`height` and normalize it to
/// 3-channel RGB.
///
/// Uses Lanczos3 resampling. Any alpha channel is dropped, not composited.
/// Pure per-frame: no cross-frame state, deterministic for a fixed input.
pub fn resize_frame(img: &DynamicImage, width: u32, height: u32) -> RgbImage {
    img.resize_exact(width, height, FilterType::Lanczos3).to_rgb8()
}
