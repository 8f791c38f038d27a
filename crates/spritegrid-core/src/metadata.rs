use serde::Serialize;

/// Layout descriptor written next to the sprite sheet.
///
/// Serializes to exactly six camelCase keys; field order here is the key
/// order in `frame.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub fps: u32,
    pub frame_height: u32,
    pub frame_width: u32,
    pub image_height: u32,
    pub image_width: u32,
    pub num_frames: u32,
}
