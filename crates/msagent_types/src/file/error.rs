//! Error types for file format parsing and manipulation.

use thiserror::Error;

/// Errors raised while reading an ACS container.
#[derive(Debug, Error)]
pub enum AcsError {
	/// A read would cross the end of the current byte range
	#[error("unexpected end of data: {requested} bytes requested at offset {offset}")]
	UnexpectedEndOfData {
		/// Number of bytes the failed read asked for
		requested: usize,
		/// Read position, relative to the start of the range
		offset: usize,
	},

	/// A sub-range does not fit inside the underlying blob
	#[error("invalid range: offset {offset} with length {length}")]
	InvalidRange {
		/// Requested range start
		offset: usize,
		/// Requested range length
		length: usize,
	},

	/// The file does not start with the Agent 2.0 magic number
	#[error("unsupported signature 0x{0:08X}")]
	UnsupportedSignature(u32),

	/// A length-prefixed string is not valid UTF-16
	#[error("invalid UTF-16 string")]
	InvalidUtf16,

	/// An image record declares a zero-sized bitmap
	#[error("invalid image dimensions {width}x{height}")]
	InvalidImageDimensions {
		/// Declared width
		width: u16,
		/// Declared height
		height: u16,
	},

	/// An image payload could not be expanded to its pixel buffer
	#[error("failed to decode image {index}: {reason}")]
	ImageDecodeFailed {
		/// Index of the image in the container's image table
		index: usize,
		/// What went wrong
		reason: String,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Errors raised by the bit-stream decompressor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecompressError {
	/// The payload is shorter than the minimal valid stream
	#[error("compressed payload too short ({actual} bytes)")]
	PayloadTooShort {
		/// Actual payload length
		actual: usize,
	},

	/// The payload does not start with the mandatory zero byte
	#[error("compressed payload does not start with a zero byte")]
	MissingLeadingZero,

	/// The bit cursor ran past the end of the payload
	#[error("unexpected end of compressed data at byte {offset}")]
	UnexpectedEndOfInput {
		/// Source byte offset of the failed read
		offset: usize,
	},

	/// The run-length prefix exceeded its eleven-bit cap
	#[error("malformed run-length encoding")]
	MalformedLength,

	/// A back-reference points before the start of the output
	#[error("back-reference distance {distance} exceeds {written} written bytes")]
	InvalidBackReference {
		/// Decoded distance
		distance: usize,
		/// Bytes produced so far
		written: usize,
	},

	/// A copy would run past the fixed output size
	#[error("run of {run} bytes overruns the {target_len}-byte output")]
	OutputOverrun {
		/// Decoded run length
		run: usize,
		/// Fixed output size
		target_len: usize,
	},
}

/// Errors raised while reading or writing a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
	/// The JSON document does not describe a valid manifest
	#[error("failed to decode manifest: {0}")]
	DecodeFailed(String),

	/// The manifest could not be serialized
	#[error("failed to encode manifest: {0}")]
	EncodeFailed(String),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
