//! Integer 2D geometry primitives shared by the parser, the renderer and the manifest.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A point on the integer pixel grid. Coordinates may be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntPoint {
	/// Horizontal coordinate
	pub x: i32,
	/// Vertical coordinate
	pub y: i32,
}

impl IntPoint {
	/// Creates a new point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}

	/// The origin `(0, 0)`.
	pub const fn zero() -> Self {
		Self::new(0, 0)
	}
}

impl Display for IntPoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// A non-negative integer extent in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntSize {
	/// Width in pixels
	pub width: i32,
	/// Height in pixels
	pub height: i32,
}

impl IntSize {
	/// Creates a new size.
	pub const fn new(width: i32, height: i32) -> Self {
		Self {
			width,
			height,
		}
	}

	/// Returns true when either dimension is zero or negative.
	pub const fn is_empty(&self) -> bool {
		self.width <= 0 || self.height <= 0
	}

	/// Total number of pixels covered by this size.
	pub const fn area(&self) -> i64 {
		self.width as i64 * self.height as i64
	}
}

impl Display for IntSize {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}x{}", self.width, self.height)
	}
}

/// An axis-aligned integer rectangle.
///
/// `width` and `height` are never negative; the origin may be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntRect {
	/// Left edge
	pub x: i32,
	/// Top edge
	pub y: i32,
	/// Width in pixels (non-negative)
	pub width: i32,
	/// Height in pixels (non-negative)
	pub height: i32,
}

impl IntRect {
	/// Creates a new rectangle.
	///
	/// # Panics
	///
	/// Panics if `width` or `height` is negative.
	pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
		assert!(width >= 0 && height >= 0, "rectangle extent must be non-negative");
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Creates a rectangle from an origin and a size.
	pub fn from_origin_size(origin: IntPoint, size: IntSize) -> Self {
		Self::new(origin.x, origin.y, size.width, size.height)
	}

	/// The exclusive right edge.
	pub const fn right(&self) -> i32 {
		self.x + self.width
	}

	/// The exclusive bottom edge.
	pub const fn bottom(&self) -> i32 {
		self.y + self.height
	}

	/// The rectangle's extent.
	pub const fn size(&self) -> IntSize {
		IntSize::new(self.width, self.height)
	}

	/// Returns true when `other` lies entirely inside this rectangle.
	pub const fn contains_rect(&self, other: &IntRect) -> bool {
		other.x >= self.x
			&& other.y >= self.y
			&& other.right() <= self.right()
			&& other.bottom() <= self.bottom()
	}

	/// Returns true when the point lies inside this rectangle.
	pub const fn contains_point(&self, point: IntPoint) -> bool {
		point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
	}
}

impl Display for IntRect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
	}
}
