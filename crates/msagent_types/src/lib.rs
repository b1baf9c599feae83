//! This crate provides core data types, ACS container support and the ingest
//! pipeline for the `msagent-rs` project.
//!
//! # Pipeline
//!
//! - **ACS**: Microsoft Agent 2.0 character containers holding a palette,
//!   indexed-color images and named animations
//! - **Ingest**: composites every animation frame, packs the frames into one
//!   RGBA atlas PNG and emits a JSON manifest
//! - **Playback**: a frame player advancing manifest clips from wall-clock
//!   deltas, with looping, play-once and loop-delay semantics
//!
//! # Examples
//!
//! Ingesting a character file:
//!
//! ```no_run
//! use msagent_types::ingest::{ingest_file, IngestOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = ingest_file("clippy.acs", &IngestOptions::new("out/clippy"))?;
//! println!("{} frames in {}", report.manifest.frames.len(), report.atlas_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! Driving playback:
//!
//! ```no_run
//! use msagent_types::file::Manifest;
//! use msagent_types::player::FramePlayer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = Manifest::load("out/clippy/manifest.json")?;
//! let mut player = FramePlayer::new(manifest, None)?;
//! player.update(1.0 / 60.0);
//! let frame = player.current_frame();
//! println!("show {} of {}", frame.index, frame.image_name);
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod geometry;
pub mod ingest;
pub mod player;
pub mod render;

/// `use msagent_types::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export commonly used types at crate root for convenience
pub use file::{
	AcsError, AcsFile, AnimationClip, DecompressError, Manifest, ManifestError, ManifestFrame,
};
pub use geometry::{IntPoint, IntRect, IntSize};
pub use ingest::{IngestError, IngestOptions, IngestReport};
pub use player::{FramePlayer, PlayerError};
