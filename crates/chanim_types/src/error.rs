//! Error types for pixmap handling and painting.

use thiserror::Error;

use crate::pixmap::PixelFormat;

/// Errors that can occur when creating, packing or loading pixmaps
#[derive(Debug, Error)]
pub enum PixmapError {
	/// Pixel buffer does not match the declared layout
	#[error(
		"Invalid pixmap layout: {width}x{height} with {bytes_per_line} bytes per line needs {expected} bytes, got {actual}"
	)]
	InvalidLayout {
		/// Width in pixels
		width: usize,
		/// Height in pixels
		height: usize,
		/// Declared row stride
		bytes_per_line: usize,
		/// Minimum number of bytes required
		expected: usize,
		/// Actual number of bytes supplied
		actual: usize,
	},

	/// Unknown pixel format tag in a packed pixmap header
	#[error("Unsupported pixel format tag: {0}")]
	UnsupportedPixelFormat(u32),

	/// Width or height in a packed pixmap header is out of range
	#[error("Invalid {axis}: {value} (maximum {max})")]
	DimensionOutOfRange {
		/// Which dimension is invalid
		axis: &'static str,
		/// Value found in the header
		value: u32,
		/// Largest accepted value
		max: u32,
	},

	/// Run-length data is malformed
	#[error("Corrupt packed data at byte {offset}: {reason}")]
	CorruptData {
		/// Byte offset into the run-length data
		offset: usize,
		/// What went wrong
		reason: &'static str,
	},

	/// Not enough bytes for a packed pixmap header
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Image decoding error
	#[error(transparent)]
	Image(#[from] image::ImageError),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors reported by a [`PaintSurface`](crate::paint::PaintSurface)
#[derive(Debug, Error)]
pub enum PaintError {
	/// A drawing call was made outside of a `begin`/`end` pass
	#[error("Paint surface is not active")]
	NotActive,

	/// `begin` was called while a pass is already open
	#[error("Paint surface is already active")]
	AlreadyActive,

	/// The image uses a different pixel format than the surface
	#[error("Pixmap has pixel format {actual}, surface expects {expected}")]
	PixelFormatMismatch {
		/// Surface pixel format
		expected: PixelFormat,
		/// Image pixel format
		actual: PixelFormat,
	},

	/// Packed image could not be decoded
	#[error(transparent)]
	Pixmap(#[from] PixmapError),

	/// Backend specific failure
	#[error("Paint backend error: {0}")]
	Backend(String),
}
