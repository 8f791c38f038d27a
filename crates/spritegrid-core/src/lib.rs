//! Core conversion pipeline: decode an animated image or short video,
//! resize every frame to a fixed cell size, tile the frames into the
//! smallest square grid that holds them, and write the sprite sheet plus
//! a JSON layout descriptor.

pub mod error;
pub mod media;
pub mod metadata;
pub mod pipeline;
pub mod scale;
pub mod sheet;
pub mod timing;
pub mod writer;

pub use error::{SpriteError, SpriteResult};
