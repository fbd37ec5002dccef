//! Pixel formats and uncompressed pixmaps.
//!
//! A [`Pixmap`] stores pixels row by row in the native byte layout of the
//! target display, so a paint surface can copy rows straight into its
//! framebuffer. Two formats are supported:
//!
//! ```text
//! Format  Size  Layout (little-endian)
//! ------  ----  ---------------------------------
//! Rgb32   4     0xFFRRGGBB  -> bytes [B, G, R, FF]
//! Rgb16   2     RRRRRGGG GGGBBBBB (RGB565)
//! ```
//!
//! Images are usually kept in their run-length encoded form, see
//! [`PackedPixmap`].

mod packed;

use std::{fmt, path::Path};

use image::{DynamicImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::PixmapError;

pub use self::packed::{PackedPixmap, Run, RunIter};

/// Pixel layout of a pixmap or a paint surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum PixelFormat {
	/// 32-bit RGB (`0xFFRRGGBB`)
	Rgb32 = 0,
	/// 16-bit RGB (5-6-5)
	#[default]
	Rgb16 = 1,
}

impl PixelFormat {
	/// Returns the size of one pixel in bytes.
	#[inline]
	pub const fn pixel_size(self) -> usize {
		match self {
			Self::Rgb32 => 4,
			Self::Rgb16 => 2,
		}
	}

	/// Converts a header tag to `PixelFormat`
	pub fn from_u32(value: u32) -> Result<Self, PixmapError> {
		match value {
			0 => Ok(Self::Rgb32),
			1 => Ok(Self::Rgb16),
			_ => Err(PixmapError::UnsupportedPixelFormat(value)),
		}
	}

	/// Converts `PixelFormat` to its header tag
	pub fn to_u32(self) -> u32 {
		self as u32
	}

	/// Encodes an RGBA color into `out`, which must be exactly
	/// [`pixel_size`](Self::pixel_size) bytes long. Alpha is discarded.
	pub fn encode(self, rgba: [u8; 4], out: &mut [u8]) {
		let [r, g, b, _] = rgba;
		match self {
			Self::Rgb32 => out.copy_from_slice(&[b, g, r, 0xFF]),
			Self::Rgb16 => {
				let value = (u16::from(r >> 3) << 11) | (u16::from(g >> 2) << 5) | u16::from(b >> 3);
				out.copy_from_slice(&value.to_le_bytes());
			}
		}
	}

	/// Decodes one pixel into an opaque RGBA color.
	pub fn decode(self, pixel: &[u8]) -> [u8; 4] {
		match self {
			Self::Rgb32 => [pixel[2], pixel[1], pixel[0], 0xFF],
			Self::Rgb16 => {
				let value = u16::from_le_bytes([pixel[0], pixel[1]]);
				let r = ((value >> 11) & 0x1F) as u8;
				let g = ((value >> 5) & 0x3F) as u8;
				let b = (value & 0x1F) as u8;
				[(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2), 0xFF]
			}
		}
	}
}

impl fmt::Display for PixelFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Rgb32 => write!(f, "RGB32"),
			Self::Rgb16 => write!(f, "RGB16"),
		}
	}
}

/// An uncompressed image in a display pixel format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
	data: Vec<u8>,
	width: usize,
	height: usize,
	bytes_per_line: usize,
	format: PixelFormat,
}

impl Pixmap {
	/// Creates a pixmap from raw pixel rows.
	///
	/// # Errors
	///
	/// Returns [`PixmapError::InvalidLayout`] if `bytes_per_line` cannot hold
	/// a row of `width` pixels or `data` is shorter than `height` rows.
	pub fn new(
		data: Vec<u8>,
		width: usize,
		height: usize,
		bytes_per_line: usize,
		format: PixelFormat,
	) -> Result<Self, PixmapError> {
		let expected = bytes_per_line * height;
		if bytes_per_line < width * format.pixel_size() || data.len() < expected {
			return Err(PixmapError::InvalidLayout {
				width,
				height,
				bytes_per_line,
				expected: expected.max(width * format.pixel_size() * height),
				actual: data.len(),
			});
		}

		Ok(Self {
			data,
			width,
			height,
			bytes_per_line,
			format,
		})
	}

	/// Creates a pixmap filled with a single color.
	///
	/// # Examples
	///
	/// ```
	/// use chanim_types::pixmap::{PixelFormat, Pixmap};
	///
	/// let square = Pixmap::filled(4, 4, PixelFormat::Rgb16, [0xFF, 0xFF, 0xFF, 0xFF]);
	/// assert_eq!(square.bytes_per_line(), 8);
	/// assert_eq!(square.pixel(3, 3), Some(&[0xFF, 0xFF][..]));
	/// ```
	pub fn filled(width: usize, height: usize, format: PixelFormat, rgba: [u8; 4]) -> Self {
		let pixel_size = format.pixel_size();
		let mut pixel = [0u8; 4];
		format.encode(rgba, &mut pixel[..pixel_size]);

		let data = pixel[..pixel_size].repeat(width * height);
		Self {
			data,
			width,
			height,
			bytes_per_line: width * pixel_size,
			format,
		}
	}

	/// Converts a decoded image to the given pixel format.
	pub fn from_image(image: &DynamicImage, format: PixelFormat) -> Self {
		let rgba = image.to_rgba8();
		let (width, height) = (rgba.width() as usize, rgba.height() as usize);
		let pixel_size = format.pixel_size();

		let mut data = vec![0u8; width * height * pixel_size];
		for (dst, src) in data.chunks_exact_mut(pixel_size).zip(rgba.pixels()) {
			format.encode(src.0, dst);
		}

		Self {
			data,
			width,
			height,
			bytes_per_line: width * pixel_size,
			format,
		}
	}

	/// Loads an image file (PNG, JPEG, ...) and converts it to `format`.
	pub fn load<P: AsRef<Path>>(path: P, format: PixelFormat) -> Result<Self, PixmapError> {
		let image = image::open(path)?;
		Ok(Self::from_image(&image, format))
	}

	/// Returns the raw pixel data.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Returns the width in pixels.
	#[inline]
	pub fn width(&self) -> usize {
		self.width
	}

	/// Returns the height in pixels.
	#[inline]
	pub fn height(&self) -> usize {
		self.height
	}

	/// Returns the row stride in bytes.
	#[inline]
	pub fn bytes_per_line(&self) -> usize {
		self.bytes_per_line
	}

	/// Returns the pixel format.
	#[inline]
	pub fn format(&self) -> PixelFormat {
		self.format
	}

	/// Returns the number of bytes covered by the pixel rows.
	pub fn byte_size(&self) -> usize {
		self.bytes_per_line * self.height
	}

	/// Returns the visible bytes of row `y`, without stride padding.
	pub fn row(&self, y: usize) -> Option<&[u8]> {
		if y >= self.height {
			return None;
		}
		let start = y * self.bytes_per_line;
		self.data.get(start..start + self.width * self.format.pixel_size())
	}

	/// Returns the bytes of the pixel at `(x, y)`.
	pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
		if x >= self.width {
			return None;
		}
		let pixel_size = self.format.pixel_size();
		self.row(y).map(|row| &row[x * pixel_size..(x + 1) * pixel_size])
	}

	/// Returns a copy rotated by 90 degrees clockwise.
	///
	/// Used when frames authored in landscape are shown on a panel mounted
	/// in portrait orientation.
	pub fn rotate_clockwise(&self) -> Self {
		let pixel_size = self.format.pixel_size();
		let mut data = Vec::with_capacity(self.width * self.height * pixel_size);
		for x in 0..self.width {
			for y in (0..self.height).rev() {
				let offset = y * self.bytes_per_line + x * pixel_size;
				data.extend_from_slice(&self.data[offset..offset + pixel_size]);
			}
		}

		Self {
			data,
			width: self.height,
			height: self.width,
			bytes_per_line: self.height * pixel_size,
			format: self.format,
		}
	}

	/// Converts the pixmap to an RGBA image.
	pub fn to_rgba_image(&self) -> RgbaImage {
		RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
			let pixel = self.pixel(x as usize, y as usize).unwrap_or(&[0, 0, 0, 0]);
			Rgba(self.format.decode(pixel))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pixel_format_tags() {
		assert_eq!(PixelFormat::from_u32(0).unwrap(), PixelFormat::Rgb32);
		assert_eq!(PixelFormat::from_u32(1).unwrap(), PixelFormat::Rgb16);
		assert_ne!(PixelFormat::Rgb32.to_u32(), PixelFormat::Rgb16.to_u32());
		assert!(matches!(PixelFormat::from_u32(7), Err(PixmapError::UnsupportedPixelFormat(7))));
	}

	#[test]
	fn test_rgb16_encoding() {
		let mut out = [0u8; 2];
		PixelFormat::Rgb16.encode([0xFF, 0x00, 0x00, 0xFF], &mut out);
		assert_eq!(u16::from_le_bytes(out), 0xF800);

		PixelFormat::Rgb16.encode([0x00, 0xFF, 0x00, 0xFF], &mut out);
		assert_eq!(u16::from_le_bytes(out), 0x07E0);

		assert_eq!(PixelFormat::Rgb16.decode(&0xFFFFu16.to_le_bytes()), [0xFF, 0xFF, 0xFF, 0xFF]);
	}

	#[test]
	fn test_rgb32_encoding() {
		let mut out = [0u8; 4];
		PixelFormat::Rgb32.encode([0x12, 0x34, 0x56, 0x00], &mut out);
		assert_eq!(u32::from_le_bytes(out), 0xFF12_3456);
		assert_eq!(PixelFormat::Rgb32.decode(&out), [0x12, 0x34, 0x56, 0xFF]);
	}

	#[test]
	fn test_new_rejects_short_buffer() {
		let result = Pixmap::new(vec![0; 10], 4, 2, 8, PixelFormat::Rgb16);
		assert!(matches!(
			result,
			Err(PixmapError::InvalidLayout {
				expected: 16,
				actual: 10,
				..
			})
		));

		let result = Pixmap::new(vec![0; 64], 4, 2, 6, PixelFormat::Rgb16);
		assert!(matches!(result, Err(PixmapError::InvalidLayout { .. })));
	}

	#[test]
	fn test_row_skips_stride_padding() {
		// 2x2 RGB16 with 2 bytes of padding per row
		let data = vec![1, 1, 2, 2, 0, 0, 3, 3, 4, 4, 0, 0];
		let pixmap = Pixmap::new(data, 2, 2, 6, PixelFormat::Rgb16).unwrap();

		assert_eq!(pixmap.row(0), Some(&[1, 1, 2, 2][..]));
		assert_eq!(pixmap.row(1), Some(&[3, 3, 4, 4][..]));
		assert_eq!(pixmap.row(2), None);
		assert_eq!(pixmap.pixel(1, 1), Some(&[4, 4][..]));
	}

	#[test]
	fn test_rotate_clockwise() {
		// 3x2 image:
		// a b c
		// d e f
		let data = vec![b'a', 0, b'b', 0, b'c', 0, b'd', 0, b'e', 0, b'f', 0];
		let pixmap = Pixmap::new(data, 3, 2, 6, PixelFormat::Rgb16).unwrap();
		let rotated = pixmap.rotate_clockwise();

		// d a
		// e b
		// f c
		assert_eq!(rotated.width(), 2);
		assert_eq!(rotated.height(), 3);
		assert_eq!(rotated.pixel(0, 0), Some(&[b'd', 0][..]));
		assert_eq!(rotated.pixel(1, 0), Some(&[b'a', 0][..]));
		assert_eq!(rotated.pixel(0, 2), Some(&[b'f', 0][..]));
		assert_eq!(rotated.pixel(1, 2), Some(&[b'c', 0][..]));
	}

	#[test]
	fn test_from_image() {
		let mut image = RgbaImage::new(2, 1);
		image.put_pixel(0, 0, Rgba([0xFF, 0, 0, 0xFF]));
		image.put_pixel(1, 0, Rgba([0, 0, 0xFF, 0xFF]));
		let pixmap = Pixmap::from_image(&DynamicImage::ImageRgba8(image), PixelFormat::Rgb32);

		assert_eq!(pixmap.width(), 2);
		assert_eq!(pixmap.height(), 1);
		assert_eq!(pixmap.pixel(0, 0), Some(&[0, 0, 0xFF, 0xFF][..]));
		assert_eq!(pixmap.to_rgba_image().get_pixel(1, 0).0, [0, 0, 0xFF, 0xFF]);
	}
}
