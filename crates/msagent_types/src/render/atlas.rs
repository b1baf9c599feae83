//! Grid layout that places every composited frame into a single atlas image.

use thiserror::Error;

use crate::geometry::{IntPoint, IntSize};

/// Largest edge an atlas image may reach, in pixels.
pub const MAX_DIMENSION: i32 = 16_384;

/// Errors raised while computing an atlas layout.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AtlasError {
	/// The frames do not fit inside the maximum atlas dimension
	#[error("atlas {width}x{height} exceeds the maximum dimension {max}")]
	TooLarge {
		/// Computed atlas width
		width: i32,
		/// Computed atlas height
		height: i32,
		/// Dimension limit that was exceeded
		max: i32,
	},
}

/// Column/row grid covering `total_frames` cells of a fixed size.
///
/// The layout aims for a roughly square atlas: it prefers `ceil(sqrt(n))`
/// columns, capped by how many cells fit into the maximum dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
	columns: usize,
	rows: usize,
	frame_size: IntSize,
}

impl AtlasLayout {
	/// Computes a layout for `total_frames` cells of `frame_size` pixels.
	///
	/// # Errors
	///
	/// Returns [`AtlasError::TooLarge`] when either atlas edge would exceed
	/// `max_dimension`.
	///
	/// # Panics
	///
	/// Panics in debug builds when called with zero frames or an empty frame
	/// size; the ingest pipeline rejects both before laying out.
	pub fn new(
		total_frames: usize,
		frame_size: IntSize,
		max_dimension: i32,
	) -> Result<Self, AtlasError> {
		debug_assert!(total_frames >= 1);
		debug_assert!(!frame_size.is_empty());

		let max_columns = (max_dimension / frame_size.width).max(1) as usize;
		let preferred_columns = ((total_frames as f64).sqrt().ceil() as usize).max(1);
		let columns = preferred_columns.min(max_columns);
		let rows = total_frames.div_ceil(columns);

		let width = columns as i32 * frame_size.width;
		let height = rows as i32 * frame_size.height;
		if width > max_dimension || height > max_dimension {
			return Err(AtlasError::TooLarge {
				width,
				height,
				max: max_dimension,
			});
		}

		Ok(Self {
			columns,
			rows,
			frame_size,
		})
	}

	/// Number of cell columns.
	pub fn columns(&self) -> usize {
		self.columns
	}

	/// Number of cell rows.
	pub fn rows(&self) -> usize {
		self.rows
	}

	/// Extent of a single cell.
	pub fn frame_size(&self) -> IntSize {
		self.frame_size
	}

	/// Atlas width in pixels.
	pub fn width(&self) -> i32 {
		self.columns as i32 * self.frame_size.width
	}

	/// Atlas height in pixels.
	pub fn height(&self) -> i32 {
		self.rows as i32 * self.frame_size.height
	}

	/// Atlas extent in pixels.
	pub fn size(&self) -> IntSize {
		IntSize::new(self.width(), self.height())
	}

	/// Top-left corner of the cell holding frame `index`.
	pub fn position(&self, index: usize) -> IntPoint {
		IntPoint::new(
			(index % self.columns) as i32 * self.frame_size.width,
			(index / self.columns) as i32 * self.frame_size.height,
		)
	}
}
