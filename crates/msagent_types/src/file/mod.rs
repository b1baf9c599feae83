//! File format support for `msagent-rs`.

mod error;

pub mod acs;
pub mod manifest;

// Re-export error types
pub use error::{AcsError, DecompressError, ManifestError};

// Re-export main file types
pub use acs::{
	File as AcsFile, FrameLayer, IndexedImage, Palette, ParsedAnimation, ParsedFrame,
};
pub use manifest::{AnimationClip, Manifest, ManifestFrame};
