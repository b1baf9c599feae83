//! Time-driven playback over a manifest's animation clips.
//!
//! [`FramePlayer`] is a plain state machine: a caller (typically a widget
//! ticking at 60 Hz) feeds it wall-clock deltas through
//! [`update`](FramePlayer::update) and reads back the current frame. The
//! player never sleeps, blocks or allocates while updating, and all mutable
//! state is instance-local.
//!
//! Playback semantics per update:
//!
//! 1. A pending loop delay is consumed first; while it lasts, the clip holds
//!    on its final frame. Once drained the clip restarts at frame zero.
//! 2. Remaining time advances through frames by their durations. Partial
//!    time accumulates within the current frame.
//! 3. Past the final frame, a looping clip either wraps immediately or arms
//!    the loop delay; a non-looping clip pins to the final frame.

use thiserror::Error;

use crate::file::manifest::{AnimationClip, Manifest, ManifestFrame, MIN_FRAME_DURATION};

/// Errors raised when constructing or steering a [`FramePlayer`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
	/// The manifest holds no frames
	#[error("manifest has no frames")]
	EmptyFrames,

	/// No clip with the requested name exists
	#[error("unknown animation: {0}")]
	UnknownAnimation(String),
}

/// Advances a manifest's clips across arbitrary wall-clock deltas.
#[derive(Debug, Clone)]
pub struct FramePlayer {
	manifest: Manifest,
	clip_index: usize,
	local_index: usize,
	elapsed: f64,
	looping_override: Option<bool>,
	loop_delay: f64,
	pending_delay: f64,
}

impl FramePlayer {
	/// Creates a player over `manifest`, selecting `initial_clip` when given
	/// and the first clip otherwise.
	///
	/// A manifest without clips gets a single synthesized looping clip named
	/// `all` covering every frame.
	///
	/// # Errors
	///
	/// Returns [`PlayerError::EmptyFrames`] for a frameless manifest and
	/// [`PlayerError::UnknownAnimation`] for an unknown initial clip name.
	pub fn new(mut manifest: Manifest, initial_clip: Option<&str>) -> Result<Self, PlayerError> {
		if manifest.frames.is_empty() {
			return Err(PlayerError::EmptyFrames);
		}
		if manifest.animations.is_empty() {
			manifest.animations.push(AnimationClip {
				name: "all".to_string(),
				start_frame: 0,
				frame_count: manifest.frames.len(),
				loops: true,
			});
		}

		let clip_index = match initial_clip {
			Some(name) => find_clip(&manifest, name)?,
			None => 0,
		};

		Ok(Self {
			manifest,
			clip_index,
			local_index: 0,
			elapsed: 0.0,
			looping_override: None,
			loop_delay: 0.0,
			pending_delay: 0.0,
		})
	}

	/// Selects the clip named `name`.
	///
	/// With `restart` the clip starts over from its first frame; otherwise
	/// the current local frame index is kept, clamped into the new clip.
	///
	/// # Errors
	///
	/// Returns [`PlayerError::UnknownAnimation`] when no such clip exists;
	/// the player state is untouched in that case.
	pub fn play(&mut self, name: &str, restart: bool) -> Result<(), PlayerError> {
		let clip_index = find_clip(&self.manifest, name)?;
		self.clip_index = clip_index;
		if restart {
			self.local_index = 0;
			self.elapsed = 0.0;
			self.pending_delay = 0.0;
		} else {
			self.local_index = self.local_index.min(self.clip().frame_count - 1);
		}
		Ok(())
	}

	/// Overrides the clip's loop flag and sets the loop delay in seconds.
	///
	/// `looping` of `None` restores the per-clip flag. Negative delays clamp
	/// to zero. Takes effect on the next [`update`](FramePlayer::update).
	pub fn configure_playback(&mut self, looping: Option<bool>, loop_delay: f64) {
		self.looping_override = looping;
		self.loop_delay = loop_delay.max(0.0);
	}

	/// Advances playback by `dt` seconds. Non-positive deltas are ignored.
	pub fn update(&mut self, dt: f64) {
		if dt <= 0.0 {
			return;
		}
		let should_loop = self.looping_override.unwrap_or(self.clip().loops);
		let mut remaining = dt;

		while remaining > 0.0 {
			if self.pending_delay > 0.0 {
				let consumed = remaining.min(self.pending_delay);
				self.pending_delay -= consumed;
				remaining -= consumed;
				if self.pending_delay > 0.0 {
					return;
				}
				self.local_index = 0;
				self.elapsed = 0.0;
				continue;
			}

			let duration = self.current_frame().duration.max(MIN_FRAME_DURATION);
			let step = duration - self.elapsed;
			if remaining < step {
				self.elapsed += remaining;
				return;
			}
			remaining -= step;
			self.elapsed = 0.0;

			let frame_count = self.clip().frame_count;
			if self.local_index + 1 < frame_count {
				self.local_index += 1;
			} else if should_loop {
				if self.loop_delay > 0.0 {
					// Hold on the final frame until the delay runs out
					self.pending_delay = self.loop_delay;
				} else {
					self.local_index = 0;
				}
			} else {
				self.local_index = frame_count - 1;
				return;
			}
		}
	}

	/// Name of the selected clip.
	pub fn current_animation_name(&self) -> &str {
		&self.clip().name
	}

	/// Frame position within the selected clip.
	pub fn current_local_frame_index(&self) -> usize {
		self.local_index
	}

	/// Frame position within the whole manifest.
	pub fn current_global_frame_index(&self) -> usize {
		self.clip().start_frame + self.local_index
	}

	/// The frame currently shown.
	pub fn current_frame(&self) -> &ManifestFrame {
		&self.manifest.frames[self.current_global_frame_index()]
	}

	/// The manifest this player owns.
	pub fn manifest(&self) -> &Manifest {
		&self.manifest
	}

	fn clip(&self) -> &AnimationClip {
		&self.manifest.animations[self.clip_index]
	}
}

fn find_clip(manifest: &Manifest, name: &str) -> Result<usize, PlayerError> {
	manifest
		.animations
		.iter()
		.position(|clip| clip.name == name)
		.ok_or_else(|| PlayerError::UnknownAnimation(name.to_string()))
}
