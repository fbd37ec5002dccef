//! Draw operations a frame is made of.

use std::{fmt::Debug, sync::Arc};

use crate::{
	error::PaintError,
	geometry::{Point, Rect},
	paint::PaintSurface,
	pixmap::{PackedPixmap, Pixmap},
};

/// A single drawing step replayed against a paint surface.
///
/// Operations are shared between frames and read from the render thread, so
/// they must be `Send + Sync`.
pub trait DrawOperation: Debug + Send + Sync {
	/// Executes the operation.
	fn draw(&self, surface: &mut dyn PaintSurface) -> Result<(), PaintError>;
}

/// Clears a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOperation {
	rect: Rect,
}

impl ClearOperation {
	/// Creates an operation clearing `rect`.
	pub fn new(rect: Rect) -> Self {
		Self {
			rect,
		}
	}

	/// Returns the cleared rectangle.
	pub fn rect(&self) -> Rect {
		self.rect
	}
}

impl DrawOperation for ClearOperation {
	fn draw(&self, surface: &mut dyn PaintSurface) -> Result<(), PaintError> {
		surface.clear(self.rect)
	}
}

/// Draws an uncompressed pixmap.
#[derive(Debug, Clone)]
pub struct PixmapOperation {
	origin: Point,
	pixmap: Arc<Pixmap>,
}

impl PixmapOperation {
	/// Creates an operation drawing `pixmap` at `origin`.
	pub fn new(origin: Point, pixmap: Arc<Pixmap>) -> Self {
		Self {
			origin,
			pixmap,
		}
	}

	/// Returns the top-left corner the pixmap is drawn at.
	pub fn origin(&self) -> Point {
		self.origin
	}
}

impl DrawOperation for PixmapOperation {
	fn draw(&self, surface: &mut dyn PaintSurface) -> Result<(), PaintError> {
		surface.draw_pixmap(self.origin, &self.pixmap)
	}
}

/// Draws a run-length encoded pixmap.
#[derive(Debug, Clone)]
pub struct PackedPixmapOperation {
	origin: Point,
	pixmap: Arc<PackedPixmap>,
}

impl PackedPixmapOperation {
	/// Creates an operation drawing `pixmap` at `origin`.
	pub fn new(origin: Point, pixmap: Arc<PackedPixmap>) -> Self {
		Self {
			origin,
			pixmap,
		}
	}

	/// Returns the top-left corner the pixmap is drawn at.
	pub fn origin(&self) -> Point {
		self.origin
	}
}

impl DrawOperation for PackedPixmapOperation {
	fn draw(&self, surface: &mut dyn PaintSurface) -> Result<(), PaintError> {
		surface.draw_packed_pixmap(self.origin, &self.pixmap)
	}
}
