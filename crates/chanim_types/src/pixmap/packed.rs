//! Run-length encoded pixmaps (`.ppixmap`).
//!
//! # File Structure
//!
//! ```text
//! Offset  Size  Field    Description
//! ------  ----  -------  ------------------------------------------
//! 0x00    4     format   Pixel format tag (u32 LE, see PixelFormat)
//! 0x04    4     width    Width in pixels (u32 LE, <= 32000)
//! 0x08    4     height   Height in pixels (u32 LE, <= 32000)
//! 0x0C    ...   runs     Run-length encoded rows
//! ```
//!
//! Each row is a sequence of runs followed by a `0x00` terminator. A run is a
//! repeat count (1-255) followed by one pixel in the header's pixel format:
//!
//! ```text
//! [count][pixel...][count][pixel...] ... [0x00]
//! ```
//!
//! Character sprites are mostly flat color and transparent background, so
//! rows collapse to a handful of runs.

use std::{
	fs,
	io::{Read, Write},
	path::Path,
};

use crate::error::PixmapError;

use super::{PixelFormat, Pixmap};

/// Size of the packed pixmap header in bytes
pub const HEADER_SIZE: usize = 12;

/// Largest width or height accepted in a header
pub const MAX_DIMENSION: u32 = 32000;

/// Byte that terminates a row
const ROW_END: u8 = 0x00;

/// Longest run a single count byte can describe
const MAX_RUN: usize = 0xFF;

/// A run-length encoded pixmap.
///
/// The run data is validated whenever a `PackedPixmap` is constructed, so
/// [`runs`](Self::runs) and [`unpack`](Self::unpack) never see malformed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedPixmap {
	data: Vec<u8>,
	width: usize,
	height: usize,
	format: PixelFormat,
}

/// A horizontal span of identical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<'a> {
	/// Column of the first pixel
	pub x: usize,
	/// Row of the span
	pub y: usize,
	/// Number of pixels in the span
	pub count: usize,
	/// The repeated pixel, in the pixmap's format
	pub pixel: &'a [u8],
}

/// Iterator over the runs of a [`PackedPixmap`], row by row.
#[derive(Debug, Clone)]
pub struct RunIter<'a> {
	data: &'a [u8],
	pixel_size: usize,
	pos: usize,
	x: usize,
	y: usize,
}

impl<'a> Iterator for RunIter<'a> {
	type Item = Run<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let count = *self.data.get(self.pos)? as usize;
			if count == ROW_END as usize {
				self.y += 1;
				self.x = 0;
				self.pos += 1;
				continue;
			}

			let start = self.pos + 1;
			let pixel = self.data.get(start..start + self.pixel_size)?;
			let run = Run {
				x: self.x,
				y: self.y,
				count,
				pixel,
			};
			self.x += count;
			self.pos = start + self.pixel_size;
			return Some(run);
		}
	}
}

impl PackedPixmap {
	/// Creates a packed pixmap from run data, validating it.
	pub fn new(
		data: Vec<u8>,
		width: usize,
		height: usize,
		format: PixelFormat,
	) -> Result<Self, PixmapError> {
		let packed = Self {
			data,
			width,
			height,
			format,
		};
		packed.check()?;
		Ok(packed)
	}

	/// Run-length encodes a pixmap.
	///
	/// # Examples
	///
	/// ```
	/// use chanim_types::pixmap::{PackedPixmap, PixelFormat, Pixmap};
	///
	/// let square = Pixmap::filled(300, 2, PixelFormat::Rgb16, [0xFF; 4]);
	/// let packed = PackedPixmap::pack(&square);
	///
	/// // Each row: one run of 255, one run of 45, terminator
	/// assert_eq!(packed.data().len(), 2 * (3 + 3 + 1));
	/// assert_eq!(packed.unpack(), square);
	/// ```
	pub fn pack(pixmap: &Pixmap) -> Self {
		let pixel_size = pixmap.format().pixel_size();
		let mut data = Vec::new();

		for y in 0..pixmap.height() {
			let Some(row) = pixmap.row(y) else {
				break;
			};

			let mut pixels = row.chunks_exact(pixel_size).peekable();
			while let Some(pixel) = pixels.next() {
				let mut count = 1;
				while count < MAX_RUN && pixels.next_if_eq(&pixel).is_some() {
					count += 1;
				}
				data.push(count as u8);
				data.extend_from_slice(pixel);
			}
			data.push(ROW_END);
		}

		Self {
			data,
			width: pixmap.width(),
			height: pixmap.height(),
			format: pixmap.format(),
		}
	}

	/// Validates the run data against the declared dimensions.
	///
	/// # Errors
	///
	/// Returns [`PixmapError::CorruptData`] if a row does not add up to the
	/// width, a run is truncated, or the row count differs from the height.
	pub fn check(&self) -> Result<(), PixmapError> {
		let pixel_size = self.format.pixel_size();
		let mut rows = 0;
		let mut row_width = 0;
		let mut pos = 0;

		while pos < self.data.len() {
			let count = self.data[pos] as usize;
			if count == ROW_END as usize {
				if row_width != self.width {
					return Err(corrupt(pos, "row width does not match pixmap width"));
				}
				rows += 1;
				row_width = 0;
				pos += 1;
				continue;
			}

			if pos + 1 + pixel_size > self.data.len() {
				return Err(corrupt(pos, "truncated run"));
			}
			row_width += count;
			if row_width > self.width {
				return Err(corrupt(pos, "run overflows the row"));
			}
			pos += 1 + pixel_size;
		}

		if row_width != 0 {
			return Err(corrupt(pos, "unterminated row"));
		}
		if rows != self.height {
			return Err(corrupt(pos, "row count does not match pixmap height"));
		}

		Ok(())
	}

	/// Decodes the runs into an uncompressed pixmap.
	pub fn unpack(&self) -> Pixmap {
		let pixel_size = self.format.pixel_size();
		let bytes_per_line = self.width * pixel_size;
		let mut data = vec![0u8; bytes_per_line * self.height];

		for run in self.runs() {
			let start = run.y * bytes_per_line + run.x * pixel_size;
			for dst in data[start..start + run.count * pixel_size].chunks_exact_mut(pixel_size) {
				dst.copy_from_slice(run.pixel);
			}
		}

		Pixmap {
			data,
			width: self.width,
			height: self.height,
			bytes_per_line,
			format: self.format,
		}
	}

	/// Returns an iterator over the runs, in row order.
	pub fn runs(&self) -> RunIter<'_> {
		RunIter {
			data: &self.data,
			pixel_size: self.format.pixel_size(),
			pos: 0,
			x: 0,
			y: 0,
		}
	}

	/// Returns the raw run data (without header).
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

	/// Returns the pixel format.
	#[inline]
	pub fn format(&self) -> PixelFormat {
		self.format
	}

	/// Parses a `.ppixmap` image from bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, PixmapError> {
		if data.len() < HEADER_SIZE {
			return Err(PixmapError::InsufficientData {
				expected: HEADER_SIZE,
				actual: data.len(),
			});
		}

		let (format, width, height) = parse_header(&data[..HEADER_SIZE])?;
		Self::new(data[HEADER_SIZE..].to_vec(), width, height, format)
	}

	/// Reads a `.ppixmap` image from a reader.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, PixmapError> {
		let mut header = [0u8; HEADER_SIZE];
		reader.read_exact(&mut header)?;
		let (format, width, height) = parse_header(&header)?;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::new(data, width, height, format)
	}

	/// Opens a `.ppixmap` file.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PixmapError> {
		let mut file = std::io::BufReader::new(fs::File::open(path)?);
		Self::from_reader(&mut file)
	}

	/// Serializes the image, header included.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(HEADER_SIZE + self.data.len());
		bytes.extend_from_slice(&self.format.to_u32().to_le_bytes());
		bytes.extend_from_slice(&(self.width as u32).to_le_bytes());
		bytes.extend_from_slice(&(self.height as u32).to_le_bytes());
		bytes.extend_from_slice(&self.data);
		bytes
	}

	/// Saves the image to a `.ppixmap` file.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PixmapError> {
		let mut file = fs::File::create(path)?;
		file.write_all(&self.to_bytes())?;
		file.sync_all()?;
		Ok(())
	}
}

impl From<&Pixmap> for PackedPixmap {
	fn from(pixmap: &Pixmap) -> Self {
		Self::pack(pixmap)
	}
}

fn parse_header(header: &[u8]) -> Result<(PixelFormat, usize, usize), PixmapError> {
	let read_u32 = |offset: usize| {
		u32::from_le_bytes([header[offset], header[offset + 1], header[offset + 2], header[offset + 3]])
	};

	let format = PixelFormat::from_u32(read_u32(0))?;
	let width = read_u32(4);
	if width > MAX_DIMENSION {
		return Err(PixmapError::DimensionOutOfRange {
			axis: "width",
			value: width,
			max: MAX_DIMENSION,
		});
	}
	let height = read_u32(8);
	if height > MAX_DIMENSION {
		return Err(PixmapError::DimensionOutOfRange {
			axis: "height",
			value: height,
			max: MAX_DIMENSION,
		});
	}

	Ok((format, width as usize, height as usize))
}

fn corrupt(offset: usize, reason: &'static str) -> PixmapError {
	PixmapError::CorruptData {
		offset,
		reason,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn striped() -> Pixmap {
		// 4x2 RGB16:
		// A A B B
		// C C C C
		let data = vec![
			0xAA, 0x00, 0xAA, 0x00, 0xBB, 0x00, 0xBB, 0x00, //
			0xCC, 0x00, 0xCC, 0x00, 0xCC, 0x00, 0xCC, 0x00,
		];
		Pixmap::new(data, 4, 2, 8, PixelFormat::Rgb16).unwrap()
	}

	#[test]
	fn test_pack_layout() {
		let packed = PackedPixmap::pack(&striped());
		assert_eq!(
			packed.data(),
			&[
				2, 0xAA, 0x00, 2, 0xBB, 0x00, 0, //
				4, 0xCC, 0x00, 0,
			]
		);
		assert!(packed.check().is_ok());
	}

	#[test]
	fn test_runs_positions() {
		let packed = PackedPixmap::pack(&striped());
		let runs: Vec<_> = packed.runs().map(|run| (run.x, run.y, run.count)).collect();
		assert_eq!(runs, vec![(0, 0, 2), (2, 0, 2), (0, 1, 4)]);
	}

	#[test]
	fn test_unpack_drops_stride_padding() {
		let padded = Pixmap::new(
			vec![1, 0, 1, 0, 9, 9, 2, 0, 2, 0, 9, 9],
			2,
			2,
			6,
			PixelFormat::Rgb16,
		)
		.unwrap();
		let unpacked = PackedPixmap::pack(&padded).unpack();

		assert_eq!(unpacked.bytes_per_line(), 4);
		assert_eq!(unpacked.data(), &[1, 0, 1, 0, 2, 0, 2, 0]);
	}

	#[test]
	fn test_check_rejects_short_row() {
		let result = PackedPixmap::new(vec![3, 0xAA, 0x00, 0], 4, 1, PixelFormat::Rgb16);
		assert!(matches!(result, Err(PixmapError::CorruptData { offset: 3, .. })));
	}

	#[test]
	fn test_check_rejects_truncated_run() {
		let result = PackedPixmap::new(vec![4, 0xAA], 4, 1, PixelFormat::Rgb16);
		assert!(matches!(result, Err(PixmapError::CorruptData { offset: 0, .. })));
	}

	#[test]
	fn test_check_rejects_missing_rows() {
		let result = PackedPixmap::new(vec![4, 0xAA, 0x00, 0], 4, 2, PixelFormat::Rgb16);
		assert!(matches!(result, Err(PixmapError::CorruptData { .. })));

		let result = PackedPixmap::new(Vec::new(), 4, 1, PixelFormat::Rgb16);
		assert!(result.is_err());
	}

	#[test]
	fn test_from_bytes_header() {
		let packed = PackedPixmap::pack(&striped());
		let bytes = packed.to_bytes();
		assert_eq!(&bytes[..HEADER_SIZE], &[1, 0, 0, 0, 4, 0, 0, 0, 2, 0, 0, 0]);
		assert_eq!(PackedPixmap::from_bytes(&bytes).unwrap(), packed);

		let mut reader = std::io::Cursor::new(bytes);
		assert_eq!(PackedPixmap::from_reader(&mut reader).unwrap(), packed);
	}

	#[test]
	fn test_from_bytes_rejects_bad_header() {
		assert!(matches!(
			PackedPixmap::from_bytes(&[0; 8]),
			Err(PixmapError::InsufficientData {
				expected: HEADER_SIZE,
				actual: 8
			})
		));

		let mut bytes = vec![5, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0];
		assert!(matches!(
			PackedPixmap::from_bytes(&bytes),
			Err(PixmapError::UnsupportedPixelFormat(5))
		));

		bytes[0] = 1;
		bytes[4..8].copy_from_slice(&40000u32.to_le_bytes());
		assert!(matches!(
			PackedPixmap::from_bytes(&bytes),
			Err(PixmapError::DimensionOutOfRange {
				axis: "width",
				..
			})
		));
	}

	#[test]
	fn test_save_and_open() {
		let path = std::env::temp_dir().join(format!("chanim-packed-{}.ppixmap", std::process::id()));
		let packed = PackedPixmap::pack(&Pixmap::filled(16, 8, PixelFormat::Rgb32, [1, 2, 3, 4]));

		packed.save(&path).unwrap();
		let loaded = PackedPixmap::open(&path).unwrap();
		let _ = fs::remove_file(&path);

		assert_eq!(loaded, packed);
		assert_eq!(loaded.format(), PixelFormat::Rgb32);
	}
}
