//! `.ACS` container support for `msagent-rs`.
//!
//! This module parses Microsoft Agent 2.0 character containers: the binary
//! files that ship an assistant's palette, its indexed-color images and its
//! named animations. Parsing is eager and produces a self-contained
//! [`File`] ready for compositing; nothing references the source blob
//! afterwards.
//!
//! # File Structure Overview
//!
//! ```text
//! Offset  Size  Field        Description
//! ------  ----  -----------  ------------------------------------------
//! 0x00    4     signature    0xABCDABC3 (Agent 2.0)
//! 0x04    8     header       (offset, size) of the header block
//! 0x0C    8     gestures     (offset, size) of the gesture list
//! 0x14    8     images       (offset, size) of the image list
//! 0x1C    8     -            unused block descriptor
//! ```
//!
//! All integers are little-endian; strings are length-prefixed UTF-16LE with
//! a null terminator that is consumed but not part of the value.
//!
//! ## Header block
//!
//! Versions, a names-table locator and a GUID (all skipped), then the canvas
//! width/height, the transparency palette index, a 32-bit style word and a
//! reserved word. Two optional sections follow, gated by style bits: a
//! text-to-speech section (`0x20`) and a word balloon section (`0x200`);
//! both are skipped field by field. Next a `u32`-counted palette of 32-bit
//! entries (clamped to 256, excess consumed) and an optional tray icon
//! (mask + color bitmaps, skipped).
//!
//! ## Gesture list
//!
//! A `u32` count, then per entry a name string and an `(offset, size)`
//! locator to the animation record. An empty entry name falls back to the
//! name stored in the animation record itself.
//!
//! ## Image list
//!
//! A `u32` count, then `(offset, size, checksum)` per image. Each image
//! record holds `width`, `height`, a compression flag and its payload; rows
//! are stored bottom-up with a stride rounded up to four bytes.
//!
//! # Usage Examples
//!
//! ```no_run
//! use msagent_types::file::acs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let acs = File::open("clippy.acs")?;
//!
//! println!("canvas: {}", acs.canvas_size());
//! for animation in acs.animations() {
//! 	println!("{}: {} frames", animation.name, animation.frames.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;
use std::path::Path;

use crate::file::AcsError;
use crate::geometry::{IntPoint, IntSize};

pub mod decompress;
pub mod reader;

use reader::ByteReader;

mod constants {
	/// Signature of Agent 2.0 containers
	pub const SIGNATURE: u32 = 0xABCD_ABC3;

	/// Style bit: a text-to-speech section follows the header fields
	pub const STYLE_TTS: u32 = 0x0000_0020;

	/// Style bit: a word balloon section follows the header fields
	pub const STYLE_BALLOON: u32 = 0x0000_0200;

	/// Number of palette slots
	pub const PALETTE_SIZE: usize = 256;
}

/// 256-slot color palette of raw 32-bit entries.
///
/// The low 24 bits of each entry encode the color as `0x00RRGGBB`; the top
/// byte is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	entries: [u32; constants::PALETTE_SIZE],
}

impl Palette {
	/// Creates a palette with all entries zeroed.
	pub fn new() -> Self {
		Self {
			entries: [0; constants::PALETTE_SIZE],
		}
	}

	/// Raw 32-bit entry at `index`.
	#[inline]
	pub fn entry(&self, index: u8) -> u32 {
		self.entries[index as usize]
	}

	/// Replaces the entry at `index`.
	#[inline]
	pub fn set_entry(&mut self, index: u8, value: u32) {
		self.entries[index as usize] = value;
	}

	/// Color channels of the entry at `index`, as `[r, g, b]`.
	#[inline]
	pub fn rgb(&self, index: u8) -> [u8; 3] {
		let entry = self.entries[index as usize];
		[(entry >> 16) as u8, (entry >> 8) as u8, entry as u8]
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new()
	}
}

impl Display for Palette {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "ACS palette: {} entries", constants::PALETTE_SIZE)
	}
}

/// An indexed-color bitmap with bottom-up row order.
///
/// Row `0` of the payload is the visually bottom row, and each row occupies
/// [`row_stride`](IndexedImage::row_stride) bytes of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
	width: u16,
	height: u16,
	pixels: Vec<u8>,
}

impl IndexedImage {
	/// Creates an image from its dimensions and pixel payload.
	///
	/// # Panics
	///
	/// Panics if the payload length does not match `row_stride × height`.
	pub fn new(width: u16, height: u16, pixels: Vec<u8>) -> Self {
		assert!(width > 0 && height > 0, "image dimensions must be positive");
		assert_eq!(
			pixels.len(),
			Self::stride_for(width) * height as usize,
			"pixel payload must cover stride x height"
		);
		Self {
			width,
			height,
			pixels,
		}
	}

	/// Row stride in bytes for a given width: the width rounded up to four.
	pub fn stride_for(width: u16) -> usize {
		(width as usize).div_ceil(4) * 4
	}

	/// Image width in pixels.
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Image height in pixels.
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Bytes per payload row.
	pub fn row_stride(&self) -> usize {
		Self::stride_for(self.width)
	}

	/// Bottom-up pixel payload.
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}
}

/// One image reference inside a frame: an image table index plus a signed
/// offset from the frame canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayer {
	/// Index into the container's image table; out-of-range values are
	/// sentinels and render as nothing
	pub image_index: u32,
	/// Layer position relative to the canvas top-left
	pub offset: IntPoint,
}

/// A single animation frame: layers painted in list order, then a hold time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedFrame {
	/// Layers painted back-to-front, overlays appended at the end
	pub layers: Vec<FrameLayer>,
	/// Hold time in hundredths of a second; zero means unknown
	pub duration_ticks: u16,
}

/// A named sequence of frames.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedAnimation {
	/// Human-readable animation name; may be empty
	pub name: String,
	/// Frames in playback order
	pub frames: Vec<ParsedFrame>,
}

/// A parsed ACS container.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
	width: u16,
	height: u16,
	transparency_index: u8,
	palette: Palette,
	images: Vec<IndexedImage>,
	animations: Vec<ParsedAnimation>,
}

impl File {
	/// Opens and parses an ACS container from the specified path.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or is not a valid Agent
	/// 2.0 container.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AcsError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Parses an ACS container from a byte blob.
	///
	/// # Errors
	///
	/// Returns [`AcsError::UnsupportedSignature`] for non-Agent-2.0 data and
	/// a decode error for any structural problem: truncation, invalid
	/// locators, zero-sized images or undecodable image payloads.
	pub fn from_bytes(data: &[u8]) -> Result<Self, AcsError> {
		Parser::new(data).parse()
	}

	/// Canvas extent every frame is composited into.
	pub fn canvas_size(&self) -> IntSize {
		IntSize::new(i32::from(self.width), i32::from(self.height))
	}

	/// Palette slot that renders as fully transparent.
	pub fn transparency_index(&self) -> u8 {
		self.transparency_index
	}

	/// The container's color palette.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Image table in container order.
	pub fn images(&self) -> &[IndexedImage] {
		&self.images
	}

	/// Animations in container order.
	pub fn animations(&self) -> &[ParsedAnimation] {
		&self.animations
	}

	/// Names of all animations, in container order.
	pub fn animation_names(&self) -> Vec<&str> {
		self.animations.iter().map(|animation| animation.name.as_str()).collect()
	}
}

impl Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"ACS container: {}x{} canvas, {} images, {} animations",
			self.width,
			self.height,
			self.images.len(),
			self.animations.len()
		)
	}
}

#[derive(Debug, Clone, Copy)]
struct Locator {
	offset: u32,
	size: u32,
}

struct Parser<'a> {
	data: &'a [u8],
}

impl<'a> Parser<'a> {
	fn new(data: &'a [u8]) -> Self {
		Self {
			data,
		}
	}

	fn parse(&self) -> Result<File, AcsError> {
		let mut reader = ByteReader::new(self.data);

		let signature = reader.read_u32()?;
		if signature != constants::SIGNATURE {
			return Err(AcsError::UnsupportedSignature(signature));
		}

		let header = read_locator(&mut reader)?;
		let gestures = read_locator(&mut reader)?;
		let images = read_locator(&mut reader)?;
		let _unused = read_locator(&mut reader)?;

		let (width, height, transparency_index, palette) = self.parse_header(&reader, header)?;
		let image_table = self.parse_images(&reader, images)?;
		let animations = self.parse_animations(&reader, gestures)?;

		Ok(File {
			width,
			height,
			transparency_index,
			palette,
			images: image_table,
			animations,
		})
	}

	fn parse_header(
		&self,
		reader: &ByteReader<'a>,
		locator: Locator,
	) -> Result<(u16, u16, u8, Palette), AcsError> {
		let mut r = sub_reader(reader, locator)?;

		let _minor_version = r.read_u16()?;
		let _major_version = r.read_u16()?;
		r.skip(8)?; // names table locator
		r.skip(16)?; // GUID

		let width = r.read_u16()?;
		let height = r.read_u16()?;
		let transparency_index = r.read_u8()?;
		let style = r.read_u32()?;
		let _reserved = r.read_u32()?;

		if style & constants::STYLE_TTS != 0 {
			skip_tts_section(&mut r)?;
		}
		if style & constants::STYLE_BALLOON != 0 {
			skip_balloon_section(&mut r)?;
		}

		let palette_count = r.read_u32()? as usize;
		let mut palette = Palette::new();
		for i in 0..palette_count {
			let entry = r.read_u32()?;
			if i < constants::PALETTE_SIZE {
				palette.set_entry(i as u8, entry);
			}
		}

		// Optional tray icon: a mask bitmap and a color bitmap
		if r.read_u8()? != 0 {
			let mask_size = r.read_u32()? as usize;
			r.skip(mask_size)?;
			let color_size = r.read_u32()? as usize;
			r.skip(color_size)?;
		}

		Ok((width, height, transparency_index, palette))
	}

	fn parse_images(
		&self,
		reader: &ByteReader<'a>,
		locator: Locator,
	) -> Result<Vec<IndexedImage>, AcsError> {
		let mut r = sub_reader(reader, locator)?;

		let count = r.read_u32()? as usize;
		let mut entries = Vec::with_capacity(count);
		for _ in 0..count {
			let entry = read_locator(&mut r)?;
			let _checksum = r.read_u32()?;
			entries.push(entry);
		}

		let mut images = Vec::with_capacity(count);
		for (index, entry) in entries.into_iter().enumerate() {
			images.push(self.parse_image(reader, entry, index)?);
		}
		Ok(images)
	}

	fn parse_image(
		&self,
		reader: &ByteReader<'a>,
		locator: Locator,
		index: usize,
	) -> Result<IndexedImage, AcsError> {
		let mut r = sub_reader(reader, locator)?;

		r.skip(1)?;
		let width = r.read_u16()?;
		let height = r.read_u16()?;
		let compressed = r.read_u8()? != 0;
		let byte_count = r.read_u32()? as usize;
		let payload = r.read_bytes(byte_count)?;

		if width == 0 || height == 0 {
			return Err(AcsError::InvalidImageDimensions {
				width,
				height,
			});
		}

		let pixel_count = IndexedImage::stride_for(width) * height as usize;
		let pixels = if compressed {
			decompress::decompress(payload, pixel_count).map_err(|source| {
				AcsError::ImageDecodeFailed {
					index,
					reason: source.to_string(),
				}
			})?
		} else {
			if payload.len() < pixel_count {
				return Err(AcsError::ImageDecodeFailed {
					index,
					reason: format!(
						"payload of {} bytes is shorter than {} pixels",
						payload.len(),
						pixel_count
					),
				});
			}
			payload[..pixel_count].to_vec()
		};

		Ok(IndexedImage::new(width, height, pixels))
	}

	fn parse_animations(
		&self,
		reader: &ByteReader<'a>,
		locator: Locator,
	) -> Result<Vec<ParsedAnimation>, AcsError> {
		let mut r = sub_reader(reader, locator)?;

		let count = r.read_u32()? as usize;
		let mut refs = Vec::with_capacity(count);
		for _ in 0..count {
			let name = read_string(&mut r)?;
			let entry = read_locator(&mut r)?;
			refs.push((name, entry));
		}

		let mut animations = Vec::with_capacity(count);
		for (ref_name, entry) in refs {
			let mut animation = self.parse_animation(reader, entry)?;
			// The gesture list name wins unless it is empty
			if !ref_name.is_empty() {
				animation.name = ref_name;
			}
			animations.push(animation);
		}
		Ok(animations)
	}

	fn parse_animation(
		&self,
		reader: &ByteReader<'a>,
		locator: Locator,
	) -> Result<ParsedAnimation, AcsError> {
		let mut r = sub_reader(reader, locator)?;

		let name = read_string(&mut r)?;
		let _return_type = r.read_u8()?;
		let return_name_len = r.read_u32()? as usize;
		if return_name_len > 0 {
			r.skip(return_name_len * 2 + 2)?;
		}

		let frame_count = r.read_u16()? as usize;
		let mut frames = Vec::with_capacity(frame_count);
		for _ in 0..frame_count {
			frames.push(read_frame(&mut r)?);
		}

		Ok(ParsedAnimation {
			name,
			frames,
		})
	}
}

fn read_locator(r: &mut ByteReader<'_>) -> Result<Locator, AcsError> {
	Ok(Locator {
		offset: r.read_u32()?,
		size: r.read_u32()?,
	})
}

fn sub_reader<'a>(reader: &ByteReader<'a>, locator: Locator) -> Result<ByteReader<'a>, AcsError> {
	reader.sub_reader(locator.offset as usize, locator.size as usize)
}

/// Reads a length-prefixed UTF-16LE string.
///
/// A zero length carries no terminator; otherwise the terminator is consumed
/// but excluded from the value.
fn read_string(r: &mut ByteReader<'_>) -> Result<String, AcsError> {
	let units = r.read_u32()? as usize;
	if units == 0 {
		return Ok(String::new());
	}
	let value = r.read_utf16(units)?;
	r.skip(2)?;
	Ok(value)
}

fn skip_string(r: &mut ByteReader<'_>) -> Result<(), AcsError> {
	let units = r.read_u32()? as usize;
	if units == 0 {
		return Ok(());
	}
	r.skip(units * 2 + 2)
}

fn skip_tts_section(r: &mut ByteReader<'_>) -> Result<(), AcsError> {
	// Engine and mode GUIDs, speed, pitch
	r.skip(16 + 16 + 4 + 2)?;
	if r.read_u8()? != 0 {
		r.skip(2)?; // language id
		skip_string(r)?; // language dialect
		r.skip(2 + 2)?; // gender, age
		skip_string(r)?; // speaking style
	}
	Ok(())
}

fn skip_balloon_section(r: &mut ByteReader<'_>) -> Result<(), AcsError> {
	// Line counts and the three RGBQUAD colors
	r.skip(1 + 1 + 4 + 4 + 4)?;
	skip_string(r)?; // font name
	r.skip(4 + 2 + 2 + 2)?; // font metrics
	Ok(())
}

fn read_frame(r: &mut ByteReader<'_>) -> Result<ParsedFrame, AcsError> {
	let image_count = r.read_u16()? as usize;
	let mut layers = Vec::with_capacity(image_count);
	for _ in 0..image_count {
		let image_index = r.read_u32()?;
		let x = r.read_i16()?;
		let y = r.read_i16()?;
		layers.push(FrameLayer {
			image_index,
			offset: IntPoint::new(i32::from(x), i32::from(y)),
		});
	}

	r.skip(2)?; // sound index
	let duration_ticks = r.read_u16()?;
	r.skip(2)?; // exit frame

	let branch_count = r.read_u8()? as usize;
	r.skip(branch_count * 4)?;

	let overlay_count = r.read_u8()? as usize;
	for _ in 0..overlay_count {
		r.skip(2)?; // overlay kind, replace flag
		let image_index = u32::from(r.read_u16()?);
		r.skip(2)?;
		let x = r.read_i16()?;
		let y = r.read_i16()?;
		r.skip(4)?; // overlay extent
		layers.push(FrameLayer {
			image_index,
			offset: IntPoint::new(i32::from(x), i32::from(y)),
		});
	}

	Ok(ParsedFrame {
		layers,
		duration_ticks,
	})
}
