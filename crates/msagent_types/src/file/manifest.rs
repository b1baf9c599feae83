//! Portable animation manifest produced by the ingest pipeline.
//!
//! A manifest describes one character: the fixed frame cell size, every
//! composited frame's cell in the atlas image, and the named clips that
//! group contiguous frame ranges. It serializes to a single JSON object
//! with camelCase keys in declaration order; durations are floating-point
//! seconds.
//!
//! # Usage Examples
//!
//! ```no_run
//! use msagent_types::file::manifest::Manifest;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = Manifest::load("out/manifest.json")?;
//! println!("{}: {} frames", manifest.character_name, manifest.frames.len());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::file::ManifestError;
use crate::geometry::{IntPoint, IntRect, IntSize};

/// Shortest admissible frame duration, in seconds.
pub const MIN_FRAME_DURATION: f64 = 1.0 / 120.0;

/// Fixed file name of the atlas image referenced by every frame.
pub const ATLAS_IMAGE_NAME: &str = "atlas.png";

/// Fixed file name the manifest is written under.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// A character's complete animation description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
	/// Display name of the character
	pub character_name: String,
	/// Extent of every frame cell in the atlas
	pub frame_cell_size: IntSize,
	/// All frames, indexed by their position
	pub frames: Vec<ManifestFrame>,
	/// Named clips over contiguous frame ranges
	pub animations: Vec<AnimationClip>,
}

/// One composited frame inside the atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFrame {
	/// Position of this frame in [`Manifest::frames`]
	pub index: usize,
	/// Name of the atlas image file
	pub image_name: String,
	/// Cell occupied by this frame inside the atlas
	pub source_rect: IntRect,
	/// Visible region relative to the cell; frames are not trimmed, so this
	/// covers the whole cell
	pub trimmed_rect: IntRect,
	/// Placement offset of the trimmed region
	pub offset: IntPoint,
	/// Cell extent, identical to [`Manifest::frame_cell_size`]
	pub size: IntSize,
	/// Hold time in seconds, never below [`MIN_FRAME_DURATION`]
	pub duration: f64,
}

/// A named, loopable range of frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationClip {
	/// Clip name, unique within a manifest
	pub name: String,
	/// Index of the clip's first frame
	pub start_frame: usize,
	/// Number of frames in the clip, at least one
	pub frame_count: usize,
	/// Whether playback wraps around by default
	pub loops: bool,
}

impl Manifest {
	/// Reads a manifest from a JSON file.
	///
	/// # Errors
	///
	/// Returns [`ManifestError::DecodeFailed`] for malformed JSON and an IO
	/// error when the file cannot be read.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
		let json = std::fs::read_to_string(path)?;
		serde_json::from_str(&json).map_err(|e| ManifestError::DecodeFailed(e.to_string()))
	}

	/// Writes the manifest as pretty-printed JSON.
	///
	/// The document is written to a sibling temp file first and renamed into
	/// place, so a failed write never leaves a truncated manifest behind.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
		let path = path.as_ref();
		let json = serde_json::to_string_pretty(self)
			.map_err(|e| ManifestError::EncodeFailed(e.to_string()))?;

		let mut tmp = path.as_os_str().to_owned();
		tmp.push(".tmp");
		let tmp = Path::new(&tmp);
		std::fs::write(tmp, json)?;
		std::fs::rename(tmp, path)?;
		Ok(())
	}

	/// Looks up a clip by name.
	pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
		self.animations.iter().find(|clip| clip.name == name)
	}

	/// Total duration of a clip's frames, in seconds.
	pub fn clip_duration(&self, clip: &AnimationClip) -> f64 {
		self.frames[clip.start_frame..clip.start_frame + clip.frame_count]
			.iter()
			.map(|frame| frame.duration)
			.sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_manifest() -> Manifest {
		let cell = IntSize::new(124, 93);
		Manifest {
			character_name: "Clippy".to_string(),
			frame_cell_size: cell,
			frames: vec![
				ManifestFrame {
					index: 0,
					image_name: ATLAS_IMAGE_NAME.to_string(),
					source_rect: IntRect::new(0, 0, cell.width, cell.height),
					trimmed_rect: IntRect::new(0, 0, cell.width, cell.height),
					offset: IntPoint::zero(),
					size: cell,
					duration: 0.1,
				},
				ManifestFrame {
					index: 1,
					image_name: ATLAS_IMAGE_NAME.to_string(),
					source_rect: IntRect::new(cell.width, 0, cell.width, cell.height),
					trimmed_rect: IntRect::new(0, 0, cell.width, cell.height),
					offset: IntPoint::zero(),
					size: cell,
					duration: 0.25,
				},
			],
			animations: vec![AnimationClip {
				name: "Greeting".to_string(),
				start_frame: 0,
				frame_count: 2,
				loops: true,
			}],
		}
	}

	fn temp_path(name: &str) -> std::path::PathBuf {
		std::env::temp_dir().join(format!("msagent-manifest-{}-{}", std::process::id(), name))
	}

	#[test]
	fn test_wire_field_names() {
		let json = serde_json::to_string(&sample_manifest()).unwrap();

		for key in [
			"\"characterName\"",
			"\"frameCellSize\"",
			"\"imageName\"",
			"\"sourceRect\"",
			"\"trimmedRect\"",
			"\"offset\"",
			"\"startFrame\"",
			"\"frameCount\"",
			"\"loops\"",
		] {
			assert!(json.contains(key), "missing key {} in {}", key, json);
		}
	}

	#[test]
	fn test_json_roundtrip() {
		let manifest = sample_manifest();
		let json = serde_json::to_string(&manifest).unwrap();
		let decoded: Manifest = serde_json::from_str(&json).unwrap();
		assert_eq!(decoded, manifest);
	}

	#[test]
	fn test_save_then_load() {
		let dir = temp_path("roundtrip");
		std::fs::create_dir_all(&dir).unwrap();
		let path = dir.join(MANIFEST_FILE_NAME);

		let manifest = sample_manifest();
		manifest.save(&path).unwrap();
		let loaded = Manifest::load(&path).unwrap();
		assert_eq!(loaded, manifest);

		std::fs::remove_dir_all(&dir).unwrap();
	}

	#[test]
	fn test_load_rejects_malformed_json() {
		let dir = temp_path("malformed");
		std::fs::create_dir_all(&dir).unwrap();
		let path = dir.join(MANIFEST_FILE_NAME);
		std::fs::write(&path, "{\"characterName\": 42}").unwrap();

		assert!(matches!(Manifest::load(&path), Err(ManifestError::DecodeFailed(_))));

		std::fs::remove_dir_all(&dir).unwrap();
	}

	#[test]
	fn test_clip_lookup_and_duration() {
		let manifest = sample_manifest();
		let clip = manifest.clip("Greeting").unwrap();
		assert_eq!(clip.frame_count, 2);
		assert!((manifest.clip_duration(clip) - 0.35).abs() < 1e-9);
		assert!(manifest.clip("Missing").is_none());
	}
}
