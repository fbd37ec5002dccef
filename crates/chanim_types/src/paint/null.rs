//! A surface that draws nothing.

use crate::{
	error::PaintError,
	geometry::{Point, Rect},
	pixmap::{PackedPixmap, Pixmap},
};

use super::PaintSurface;

/// Paint surface that accepts every call and discards the output.
///
/// Useful for headless runs and for measuring the animation logic without a
/// display attached.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullSurface {
	presented: u64,
}

impl NullSurface {
	/// Creates a new null surface.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of completed paint passes.
	pub fn presented(&self) -> u64 {
		self.presented
	}
}

impl PaintSurface for NullSurface {
	fn begin(&mut self) -> Result<(), PaintError> {
		Ok(())
	}

	fn clear(&mut self, _rect: Rect) -> Result<(), PaintError> {
		Ok(())
	}

	fn draw_pixmap(&mut self, _origin: Point, _pixmap: &Pixmap) -> Result<(), PaintError> {
		Ok(())
	}

	fn draw_packed_pixmap(&mut self, _origin: Point, _pixmap: &PackedPixmap) -> Result<(), PaintError> {
		Ok(())
	}

	fn end(&mut self) -> Result<(), PaintError> {
		self.presented += 1;
		Ok(())
	}
}
