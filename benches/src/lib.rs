//! Benchmark helper utilities for msagent-rs
//!
//! This module generates synthetic compressed payloads in the ACS bit-stream
//! layout, so the decompressor can be benchmarked without real character
//! files. Two workload shapes are provided:
//!
//! - `literal_payload` - every output byte is a literal; worst case for the
//!   bit cursor, no back-reference copies
//! - `run_payload` - a short literal preamble followed by long
//!   back-reference runs; best case for copy throughput

/// Incremental LSB-first bit writer in the on-disk payload layout: a zero
/// marker byte, the bit stream, 1-padding and a six-byte 0xFF tail.
pub struct PayloadWriter {
	bytes: Vec<u8>,
	bits: usize,
}

impl PayloadWriter {
	pub fn new() -> Self {
		Self {
			bytes: vec![0x00],
			bits: 0,
		}
	}

	pub fn push_bit(&mut self, bit: bool) {
		let index = 1 + self.bits / 8;
		if self.bytes.len() <= index {
			self.bytes.push(0);
		}
		if bit {
			self.bytes[index] |= 1 << (self.bits % 8);
		}
		self.bits += 1;
	}

	pub fn push_bits(&mut self, value: u32, count: u32) {
		for shift in 0..count {
			self.push_bit((value >> shift) & 1 == 1);
		}
	}

	/// Appends one literal output byte.
	pub fn literal(&mut self, byte: u8) {
		self.push_bit(false);
		self.push_bits(u32::from(byte), 8);
	}

	/// Appends a back-reference producing `run` bytes copied from `distance`
	/// bytes behind the output cursor.
	pub fn back_reference(&mut self, distance: u32, run: u32) {
		self.push_bit(true);
		let (prefix, prefix_bits, raw_bits, addend, flag) = match distance {
			1..=64 => (0b0, 1, 6, 1, 1),
			65..=576 => (0b01, 2, 9, 65, 1),
			577..=4672 => (0b011, 3, 12, 577, 1),
			_ => (0b111, 3, 20, 4673, 2),
		};
		self.push_bits(prefix, prefix_bits);
		self.push_bits(distance - addend, raw_bits);

		let base = run - flag;
		let k = 31 - base.leading_zeros();
		self.push_bits((1 << k) - 1, k);
		self.push_bit(false);
		self.push_bits(base - (1 << k), k);
	}

	/// Pads to a byte boundary with 1-bits and appends the 0xFF tail.
	pub fn finish(mut self) -> Vec<u8> {
		while self.bits % 8 != 0 {
			self.push_bit(true);
		}
		self.bytes.extend_from_slice(&[0xFF; 6]);
		self.bytes
	}
}

impl Default for PayloadWriter {
	fn default() -> Self {
		Self::new()
	}
}

/// Payload expanding to `target_len` bytes of rolling literals.
pub fn literal_payload(target_len: usize) -> Vec<u8> {
	let mut writer = PayloadWriter::new();
	for i in 0..target_len {
		writer.literal((i % 251) as u8);
	}
	writer.finish()
}

/// Payload expanding to `target_len` bytes via 64-byte back-reference runs.
pub fn run_payload(target_len: usize) -> Vec<u8> {
	let mut writer = PayloadWriter::new();
	let preamble = target_len.min(64);
	for i in 0..preamble {
		writer.literal((i % 251) as u8);
	}

	let mut produced = preamble;
	while produced < target_len {
		let run = (target_len - produced).min(64) as u32;
		if run < 2 {
			writer.literal(0);
			produced += 1;
			continue;
		}
		writer.back_reference(preamble as u32, run);
		produced += run as usize;
	}
	writer.finish()
}

/// Common output sizes for synthetic payloads.
pub mod sizes {
	/// Small cursor-sized image: 32x32 pixels
	pub const SMALL: usize = 32 * 32;
	/// Typical assistant frame: 124x93 pixels, stride-padded
	pub const FRAME: usize = 124 * 93;
	/// Large sprite sheet cell: 512x512 pixels
	pub const LARGE: usize = 512 * 512;
}

#[cfg(test)]
mod tests {
	use super::*;
	use msagent_types::file::acs::decompress::decompress;

	#[test]
	fn test_literal_payload_roundtrip() {
		let payload = literal_payload(100);
		let out = decompress(&payload, 100).unwrap();
		let expected: Vec<u8> = (0..100).map(|i| (i % 251) as u8).collect();
		assert_eq!(out, expected);
	}

	#[test]
	fn test_run_payload_expands_to_target() {
		let payload = run_payload(sizes::SMALL);
		let out = decompress(&payload, sizes::SMALL).unwrap();
		assert_eq!(out.len(), sizes::SMALL);
		// Runs repeat the 64-byte preamble
		assert_eq!(&out[64..128], &out[0..64]);
	}

	#[test]
	fn test_payloads_are_deterministic() {
		assert_eq!(literal_payload(500), literal_payload(500));
		assert_eq!(run_payload(500), run_payload(500));
	}
}
