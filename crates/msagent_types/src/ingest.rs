//! Ingest pipeline: an ACS container in, a sprite atlas plus manifest out.
//!
//! The pipeline parses the container, composites every animation frame onto
//! the character canvas, packs the frames into a single RGBA atlas and emits
//! a [`Manifest`] describing the result. The atlas is written as `atlas.png`
//! and the manifest as `manifest.json` in the output directory; any failure
//! along the way aborts the whole run without leaving a partial manifest.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, info};
use thiserror::Error;

use crate::file::acs;
use crate::file::manifest::{
	AnimationClip, Manifest, ManifestFrame, ATLAS_IMAGE_NAME, MANIFEST_FILE_NAME,
	MIN_FRAME_DURATION,
};
use crate::file::{AcsError, ManifestError};
use crate::geometry::{IntPoint, IntRect, IntSize};
use crate::render::atlas::{AtlasError, AtlasLayout, MAX_DIMENSION};
use crate::render::compose::composite_frame;

/// Duration assigned to frames whose container ticks are zero, in seconds.
pub const DEFAULT_FALLBACK_DURATION: f64 = 1.0 / 12.0;

/// Name given to clips when the container yields none, and to clips whose
/// name is empty or whitespace.
const DEFAULT_CLIP_NAME: &str = "animation";

/// Errors raised by the ingest pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
	/// The container holds no animation frames
	#[error("container produced no frames")]
	EmptyFrames,

	/// The container could not be parsed
	#[error(transparent)]
	Acs(#[from] AcsError),

	/// The frames do not fit into a single atlas
	#[error(transparent)]
	Atlas(#[from] AtlasError),

	/// The atlas image could not be encoded
	#[error("failed to encode atlas: {0}")]
	EncodeFailed(String),

	/// The manifest could not be written
	#[error(transparent)]
	Manifest(#[from] ManifestError),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Configuration of one ingest run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
	/// Overrides the character name derived from the source file name
	pub character_name: Option<String>,
	/// Duration for frames with unknown ticks, in seconds
	pub fallback_frame_duration: f64,
	/// Directory receiving `atlas.png` and `manifest.json`; created if absent
	pub output_directory: PathBuf,
	/// Informational label used in log output; the output names are fixed
	pub output_prefix: Option<String>,
}

impl IngestOptions {
	/// Options with defaults for everything but the output directory.
	pub fn new(output_directory: impl Into<PathBuf>) -> Self {
		Self {
			character_name: None,
			fallback_frame_duration: DEFAULT_FALLBACK_DURATION,
			output_directory: output_directory.into(),
			output_prefix: None,
		}
	}
}

/// Everything one ingest run produced.
#[derive(Debug, Clone)]
pub struct IngestReport {
	/// The manifest that was written
	pub manifest: Manifest,
	/// Path of the written manifest
	pub manifest_path: PathBuf,
	/// Path of the written atlas image
	pub atlas_path: PathBuf,
	/// Pixel extent of the atlas image
	pub atlas_size: IntSize,
}

/// Ingests an ACS container from disk.
///
/// The character name falls back to the source file name without its
/// extension when [`IngestOptions::character_name`] is unset.
///
/// # Errors
///
/// Any parse, layout, encode or IO failure aborts the run.
pub fn ingest_file(
	path: impl AsRef<Path>,
	options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
	let path = path.as_ref();
	let blob = std::fs::read(path)?;
	let fallback_name = path
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_else(|| "character".to_string());
	ingest_bytes(&blob, &fallback_name, options)
}

/// Ingests an ACS container from an in-memory blob.
///
/// # Errors
///
/// Any parse, layout, encode or IO failure aborts the run.
pub fn ingest_bytes(
	blob: &[u8],
	fallback_name: &str,
	options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
	std::fs::create_dir_all(&options.output_directory)?;

	let character_name = options
		.character_name
		.clone()
		.unwrap_or_else(|| fallback_name.to_string());

	let container = acs::File::from_bytes(blob)?;
	info!("ingesting '{}': {}", character_name, container);

	let total_frames: usize =
		container.animations().iter().map(|animation| animation.frames.len()).sum();
	if total_frames == 0 {
		return Err(IngestError::EmptyFrames);
	}

	let cell = container.canvas_size();
	let layout = AtlasLayout::new(total_frames, cell, MAX_DIMENSION)?;
	let atlas_width = layout.width() as usize;
	let atlas_height = layout.height() as usize;
	let mut atlas = vec![0u8; atlas_width * atlas_height * 4];

	let mut frames = Vec::with_capacity(total_frames);
	let mut clips = Vec::new();
	let mut cursor = 0usize;

	for animation in container.animations() {
		let start_frame = cursor;
		for frame in &animation.frames {
			let rgba = composite_frame(
				frame,
				container.images(),
				container.palette(),
				container.transparency_index(),
				cell,
			);
			let origin = layout.position(cursor);
			blit_cell(&mut atlas, atlas_width, &rgba, cell, origin);

			frames.push(ManifestFrame {
				index: cursor,
				image_name: ATLAS_IMAGE_NAME.to_string(),
				source_rect: IntRect::from_origin_size(origin, cell),
				trimmed_rect: IntRect::new(0, 0, cell.width, cell.height),
				offset: IntPoint::zero(),
				size: cell,
				duration: frame_duration(frame.duration_ticks, options.fallback_frame_duration),
			});
			cursor += 1;
		}

		if cursor > start_frame {
			debug!("clip '{}': frames {}..{}", animation.name, start_frame, cursor);
			clips.push(AnimationClip {
				name: animation.name.clone(),
				start_frame,
				frame_count: cursor - start_frame,
				loops: true,
			});
		}
	}

	if clips.is_empty() {
		clips.push(AnimationClip {
			name: "all".to_string(),
			start_frame: 0,
			frame_count: frames.len(),
			loops: true,
		});
	}
	assign_unique_names(&mut clips);

	let atlas_path = options.output_directory.join(ATLAS_IMAGE_NAME);
	let image = RgbaImage::from_raw(atlas_width as u32, atlas_height as u32, atlas)
		.ok_or_else(|| IngestError::EncodeFailed("atlas buffer size mismatch".to_string()))?;
	image.save(&atlas_path).map_err(|e| IngestError::EncodeFailed(e.to_string()))?;

	let manifest = Manifest {
		character_name,
		frame_cell_size: cell,
		frames,
		animations: clips,
	};
	let manifest_path = options.output_directory.join(MANIFEST_FILE_NAME);
	manifest.save(&manifest_path)?;

	if let Some(prefix) = options.output_prefix.as_deref() {
		debug!("output prefix: {}", prefix);
	}
	info!(
		"wrote {} frames, {} clips to {}",
		manifest.frames.len(),
		manifest.animations.len(),
		options.output_directory.display()
	);

	Ok(IngestReport {
		manifest,
		manifest_path,
		atlas_path,
		atlas_size: layout.size(),
	})
}

/// Seconds a frame is held: container ticks are hundredths of a second, with
/// a floor of [`MIN_FRAME_DURATION`]; zero ticks mean "use the fallback".
fn frame_duration(ticks: u16, fallback: f64) -> f64 {
	if ticks > 0 {
		(f64::from(ticks) / 100.0).max(MIN_FRAME_DURATION)
	} else {
		fallback.max(MIN_FRAME_DURATION)
	}
}

/// Copies one composited cell into the atlas buffer, row by row.
fn blit_cell(atlas: &mut [u8], atlas_width: usize, rgba: &[u8], cell: IntSize, origin: IntPoint) {
	let cell_width = cell.width as usize;
	for row in 0..cell.height as usize {
		let src = row * cell_width * 4;
		let dst = ((origin.y as usize + row) * atlas_width + origin.x as usize) * 4;
		atlas[dst..dst + cell_width * 4].copy_from_slice(&rgba[src..src + cell_width * 4]);
	}
}

/// Makes clip names unique and non-empty.
///
/// Empty or whitespace-only names become `animation`; the second and later
/// occurrences of a name get `_1`, `_2`, … suffixes in encounter order.
fn assign_unique_names(clips: &mut [AnimationClip]) {
	let mut seen: HashMap<String, usize> = HashMap::new();
	for clip in clips.iter_mut() {
		let base = if clip.name.trim().is_empty() {
			DEFAULT_CLIP_NAME.to_string()
		} else {
			clip.name.clone()
		};
		let occurrences = seen.entry(base.clone()).or_insert(0);
		clip.name = if *occurrences == 0 {
			base
		} else {
			format!("{}_{}", base, occurrences)
		};
		*occurrences += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn clips_named(names: &[&str]) -> Vec<AnimationClip> {
		names
			.iter()
			.enumerate()
			.map(|(i, name)| AnimationClip {
				name: name.to_string(),
				start_frame: i,
				frame_count: 1,
				loops: true,
			})
			.collect()
	}

	#[test]
	fn test_unique_names_policy() {
		let mut clips = clips_named(&["Wave", "Wave", "", "  ", "Wave"]);
		assign_unique_names(&mut clips);

		let names: Vec<&str> = clips.iter().map(|clip| clip.name.as_str()).collect();
		assert_eq!(names, ["Wave", "Wave_1", "animation", "animation_1", "Wave_2"]);
	}

	#[test]
	fn test_unique_names_keeps_distinct_names() {
		let mut clips = clips_named(&["Idle", "Wave", "Greeting"]);
		assign_unique_names(&mut clips);

		let names: Vec<&str> = clips.iter().map(|clip| clip.name.as_str()).collect();
		assert_eq!(names, ["Idle", "Wave", "Greeting"]);
	}

	#[test]
	fn test_frame_duration_mapping() {
		// 25 ticks = a quarter second
		assert!((frame_duration(25, 0.5) - 0.25).abs() < 1e-12);
		// Zero ticks use the fallback, floored at the minimum duration
		assert!((frame_duration(0, 0.5) - 0.5).abs() < 1e-12);
		assert!((frame_duration(0, 0.0) - MIN_FRAME_DURATION).abs() < 1e-12);
	}

	#[test]
	fn test_blit_cell_places_rows() {
		let cell = IntSize::new(2, 2);
		let rgba: Vec<u8> = (1..=16).collect();
		// 4x2 cell atlas, blit into the second column
		let mut atlas = vec![0u8; 4 * 2 * 4];
		blit_cell(&mut atlas, 4, &rgba, cell, IntPoint::new(2, 0));

		assert_eq!(&atlas[8..16], &rgba[0..8]);
		assert_eq!(&atlas[24..32], &rgba[8..16]);
		assert!(atlas[0..8].iter().all(|&byte| byte == 0));
	}
}
