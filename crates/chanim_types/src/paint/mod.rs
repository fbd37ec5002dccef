//! The paint surface capability and reference surfaces.
//!
//! A [`PaintSurface`] is whatever gets pixels onto the screen. The render
//! loop brackets every presented frame with [`begin`](PaintSurface::begin)
//! and [`end`](PaintSurface::end) and replays the frame's draw operations in
//! between:
//!
//! ```text
//! begin()
//!   clear(rect) | draw_pixmap(origin, pixmap) | draw_packed_pixmap(origin, packed)
//!   ...
//! end()     <- the frame becomes visible
//! ```
//!
//! Two implementations ship with the crate: [`NullSurface`], which discards
//! everything, and [`MemorySurface`], a software framebuffer.

mod memory;
mod null;

use crate::{
	error::PaintError,
	geometry::{Point, Rect},
	pixmap::{PackedPixmap, Pixmap},
};

pub use self::memory::MemorySurface;
pub use self::null::NullSurface;

/// A drawing target.
pub trait PaintSurface {
	/// Opens a paint pass.
	fn begin(&mut self) -> Result<(), PaintError>;

	/// Clears `rect` to black.
	fn clear(&mut self, rect: Rect) -> Result<(), PaintError>;

	/// Copies `pixmap` with its top-left corner at `origin`.
	fn draw_pixmap(&mut self, origin: Point, pixmap: &Pixmap) -> Result<(), PaintError>;

	/// Draws a run-length encoded image with its top-left corner at `origin`.
	///
	/// The default implementation unpacks the image and forwards to
	/// [`draw_pixmap`](Self::draw_pixmap).
	fn draw_packed_pixmap(&mut self, origin: Point, pixmap: &PackedPixmap) -> Result<(), PaintError> {
		self.draw_pixmap(origin, &pixmap.unpack())
	}

	/// Closes the paint pass and presents the result.
	fn end(&mut self) -> Result<(), PaintError>;
}

impl<S: PaintSurface + ?Sized> PaintSurface for Box<S> {
	fn begin(&mut self) -> Result<(), PaintError> {
		(**self).begin()
	}

	fn clear(&mut self, rect: Rect) -> Result<(), PaintError> {
		(**self).clear(rect)
	}

	fn draw_pixmap(&mut self, origin: Point, pixmap: &Pixmap) -> Result<(), PaintError> {
		(**self).draw_pixmap(origin, pixmap)
	}

	fn draw_packed_pixmap(&mut self, origin: Point, pixmap: &PackedPixmap) -> Result<(), PaintError> {
		(**self).draw_packed_pixmap(origin, pixmap)
	}

	fn end(&mut self) -> Result<(), PaintError> {
		(**self).end()
	}
}
