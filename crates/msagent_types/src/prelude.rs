//! Prelude module for `msagent_types`.
//!
//! This module provides a convenient way to import commonly used types,
//! functions and constants.
//!
//! # Examples
//!
//! ```no_run
//! use msagent_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = ingest_file("clippy.acs", &IngestOptions::new("out"))?;
//! let mut player = FramePlayer::new(report.manifest, None)?;
//! player.update(1.0 / 60.0);
//! # Ok(())
//! # }
//! ```

// Geometry types
#[doc(inline)]
pub use crate::geometry::{IntPoint, IntRect, IntSize};

// File module types
#[doc(inline)]
pub use crate::file::{
	AcsError,
	// ACS container types
	AcsFile,
	AnimationClip,
	DecompressError,
	FrameLayer,
	IndexedImage,
	// Manifest types
	Manifest,
	ManifestError,
	ManifestFrame,
	Palette,
	ParsedAnimation,
	ParsedFrame,
};

#[doc(inline)]
pub use crate::file::manifest::{ATLAS_IMAGE_NAME, MANIFEST_FILE_NAME, MIN_FRAME_DURATION};

// Ingest pipeline
#[doc(inline)]
pub use crate::ingest::{
	ingest_bytes, ingest_file, IngestError, IngestOptions, IngestReport,
	DEFAULT_FALLBACK_DURATION,
};

// Playback
#[doc(inline)]
pub use crate::player::{FramePlayer, PlayerError};

// Rendering
#[doc(inline)]
pub use crate::render::{composite_frame, AtlasError, AtlasLayout};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
