pub mod animation;
pub mod frame;
pub mod video;

use std::fmt;
use std::path::Path;

use self::frame::Frame;
use crate::error::{SpriteError, SpriteResult};

/// Container family of an input file, chosen from its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Multi-frame image container (`.gif`, `.webp`).
    Animation,
    /// Video container (`.mp4`).
    Video,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Animation => write!(f, "animation"),
            InputKind::Video => write!(f, "video"),
        }
    }
}

impl InputKind {
    /// Classify a path by its lowercased extension.
    ///
    /// Anything other than `.gif`, `.webp` or `.mp4` is an
    /// [`SpriteError::UnsupportedFormat`]; file content is never sniffed,
    /// so this runs before any I/O.
    pub fn from_path(path: &Path) -> SpriteResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "gif" | "webp" => Ok(InputKind::Animation),
            "mp4" => Ok(InputKind::Video),
            _ => Err(SpriteError::unsupported_format(ext)),
        }
    }
}

/// Decode every frame of `path` in temporal order, resized to
/// `width`×`height` RGB. Each frame carries its declared display duration.
pub fn decode_frames(path: &Path, width: u32, height: u32) -> SpriteResult<Vec<Frame>> {
    match InputKind::from_path(path)? {
        InputKind::Animation => animation::decode(path, width, height),
        InputKind::Video => video::decode(path, width, height),
    }
}
