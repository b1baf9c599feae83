//! Software compositor that flattens a frame's indexed-color layers into RGBA.

use crate::file::acs::{IndexedImage, Palette, ParsedFrame};
use crate::geometry::IntSize;

/// Paints every layer of `frame` onto a fresh RGBA canvas.
///
/// The canvas starts fully transparent (all bytes zero). Layers are painted
/// in list order; source rows are stored bottom-up, so row `0` of a payload
/// lands at the layer's bottom edge. Pixels equal to `transparency_index`
/// leave the destination untouched, letting earlier layers show through.
/// Layers whose image index falls outside the image table are skipped:
/// containers use out-of-range indices as sentinels.
///
/// Pure and deterministic: the result depends only on the arguments.
pub fn composite_frame(
	frame: &ParsedFrame,
	images: &[IndexedImage],
	palette: &Palette,
	transparency_index: u8,
	canvas: IntSize,
) -> Vec<u8> {
	let canvas_width = canvas.width.max(0) as usize;
	let canvas_height = canvas.height.max(0) as usize;
	let mut out = vec![0u8; canvas_width * canvas_height * 4];

	for layer in &frame.layers {
		let Some(image) = images.get(layer.image_index as usize) else {
			continue;
		};
		let stride = image.row_stride();
		let pixels = image.pixels();

		for sy in 0..i32::from(image.height()) {
			let dy = layer.offset.y + sy;
			if dy < 0 || dy >= canvas.height {
				continue;
			}
			// Bottom-up payload: the last stored row is the top row
			let src_row = (i32::from(image.height()) - 1 - sy) as usize * stride;

			for sx in 0..i32::from(image.width()) {
				let dx = layer.offset.x + sx;
				if dx < 0 || dx >= canvas.width {
					continue;
				}
				let index = pixels[src_row + sx as usize];
				if index == transparency_index {
					continue;
				}
				let [r, g, b] = palette.rgb(index);
				let dst = (dy as usize * canvas_width + dx as usize) * 4;
				out[dst] = r;
				out[dst + 1] = g;
				out[dst + 2] = b;
				out[dst + 3] = 0xFF;
			}
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::acs::FrameLayer;
	use crate::geometry::IntPoint;

	fn test_palette() -> Palette {
		let mut palette = Palette::new();
		palette.set_entry(1, 0x00FF_0000); // red
		palette.set_entry(2, 0x0000_FF00); // green
		palette.set_entry(3, 0x0000_00FF); // blue
		palette
	}

	fn pixel(buffer: &[u8], width: i32, x: i32, y: i32) -> [u8; 4] {
		let at = ((y * width + x) * 4) as usize;
		[buffer[at], buffer[at + 1], buffer[at + 2], buffer[at + 3]]
	}

	#[test]
	fn test_bottom_up_rows() {
		// 1x2 image: payload row 0 is the bottom pixel
		let mut pixels = vec![0u8; 8];
		pixels[0] = 1; // bottom: red
		pixels[4] = 2; // top: green
		let image = IndexedImage::new(1, 2, pixels);

		let frame = ParsedFrame {
			layers: vec![FrameLayer {
				image_index: 0,
				offset: IntPoint::zero(),
			}],
			duration_ticks: 0,
		};
		let out = composite_frame(&frame, &[image], &test_palette(), 0, IntSize::new(1, 2));

		assert_eq!(pixel(&out, 1, 0, 0), [0, 0xFF, 0, 0xFF]);
		assert_eq!(pixel(&out, 1, 0, 1), [0xFF, 0, 0, 0xFF]);
	}

	#[test]
	fn test_transparency_keeps_earlier_layers() {
		// Two stacked 1x1 images: the second one is fully transparent
		let opaque = IndexedImage::new(1, 1, vec![3, 0, 0, 0]);
		let transparent = IndexedImage::new(1, 1, vec![0, 0, 0, 0]);

		let frame = ParsedFrame {
			layers: vec![
				FrameLayer {
					image_index: 0,
					offset: IntPoint::zero(),
				},
				FrameLayer {
					image_index: 1,
					offset: IntPoint::zero(),
				},
			],
			duration_ticks: 0,
		};
		let out = composite_frame(
			&frame,
			&[opaque, transparent],
			&test_palette(),
			0,
			IntSize::new(1, 1),
		);

		assert_eq!(pixel(&out, 1, 0, 0), [0, 0, 0xFF, 0xFF]);
	}

	#[test]
	fn test_later_layer_paints_over() {
		let red = IndexedImage::new(1, 1, vec![1, 0, 0, 0]);
		let green = IndexedImage::new(1, 1, vec![2, 0, 0, 0]);

		let frame = ParsedFrame {
			layers: vec![
				FrameLayer {
					image_index: 0,
					offset: IntPoint::zero(),
				},
				FrameLayer {
					image_index: 1,
					offset: IntPoint::zero(),
				},
			],
			duration_ticks: 0,
		};
		let out = composite_frame(&frame, &[red, green], &test_palette(), 0, IntSize::new(1, 1));

		assert_eq!(pixel(&out, 1, 0, 0), [0, 0xFF, 0, 0xFF]);
	}

	#[test]
	fn test_negative_offsets_clip() {
		// 2x2 solid red image shifted up-left by one pixel
		let mut pixels = vec![0u8; 8];
		pixels[0] = 1;
		pixels[1] = 1;
		pixels[4] = 1;
		pixels[5] = 1;
		let image = IndexedImage::new(2, 2, pixels);

		let frame = ParsedFrame {
			layers: vec![FrameLayer {
				image_index: 0,
				offset: IntPoint::new(-1, -1),
			}],
			duration_ticks: 0,
		};
		let out = composite_frame(&frame, &[image], &test_palette(), 0, IntSize::new(2, 2));

		assert_eq!(pixel(&out, 2, 0, 0), [0xFF, 0, 0, 0xFF]);
		assert_eq!(pixel(&out, 2, 1, 0), [0, 0, 0, 0]);
		assert_eq!(pixel(&out, 2, 0, 1), [0, 0, 0, 0]);
		assert_eq!(pixel(&out, 2, 1, 1), [0, 0, 0, 0]);
	}

	#[test]
	fn test_out_of_range_image_index_is_skipped() {
		let frame = ParsedFrame {
			layers: vec![FrameLayer {
				image_index: 99,
				offset: IntPoint::zero(),
			}],
			duration_ticks: 0,
		};
		let out = composite_frame(&frame, &[], &test_palette(), 0, IntSize::new(2, 2));

		assert!(out.iter().all(|&byte| byte == 0));
	}
}
