use image::RgbImage;

/// A single decoded frame, already resized to the target cell dimensions.
#[derive(Debug)]
pub struct Frame {
    /// The frame's image data.
    pub image: RgbImage,
    /// Position in the source's temporal order (0-based).
    pub index: u32,
    /// Display duration in milliseconds as declared by the container,
    /// or `None` when the container declares none.
    pub duration_ms: Option<u32>,
}
