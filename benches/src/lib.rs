//! Benchmark helper utilities for chanim-rs
//!
//! Synthetic pixmaps covering the shapes sprite frames tend to have:
//! - `solid`: one colour, the best case for run-length packing
//! - `sprite`: a filled shape on a flat background, typical character frame
//! - `noise`: random pixels, the worst case (every run has length one)

use chanim_types::pixmap::{PixelFormat, Pixmap};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Generates a pixmap filled with a single colour.
pub fn solid(width: usize, height: usize, format: PixelFormat) -> Pixmap {
	Pixmap::filled(width, height, format, [0x20, 0x40, 0x80, 0xFF])
}

/// Generates a white ellipse on a black background.
pub fn sprite(width: usize, height: usize, format: PixelFormat) -> Pixmap {
	let size = format.pixel_size();
	let bytes_per_line = width * size;
	let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
	let mut data = vec![0u8; bytes_per_line * height];

	for (y, row) in data.chunks_exact_mut(bytes_per_line).enumerate() {
		for (x, pixel) in row.chunks_exact_mut(size).enumerate() {
			let dx = (x as f32 - cx) / cx;
			let dy = (y as f32 - cy) / cy;
			let rgba = if dx * dx + dy * dy <= 1.0 {
				[0xFF; 4]
			} else {
				[0, 0, 0, 0xFF]
			};
			format.encode(rgba, pixel);
		}
	}

	Pixmap::new(data, width, height, bytes_per_line, format).unwrap_or_else(|_| solid(width, height, format))
}

/// Generates random pixels from a fixed seed.
pub fn noise(width: usize, height: usize, format: PixelFormat) -> Pixmap {
	let mut rng = SmallRng::seed_from_u64(0x5eed);
	let bytes_per_line = width * format.pixel_size();
	let mut data = vec![0u8; bytes_per_line * height];
	rng.fill(data.as_mut_slice());

	Pixmap::new(data, width, height, bytes_per_line, format).unwrap_or_else(|_| solid(width, height, format))
}
