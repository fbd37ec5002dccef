//! Software framebuffer surface.

use image::RgbaImage;

use crate::{
	error::PaintError,
	geometry::{Point, Rect},
	pixmap::{PackedPixmap, PixelFormat, Pixmap},
};

use super::PaintSurface;

/// A framebuffer kept in memory.
///
/// Drawing is only allowed between [`begin`](PaintSurface::begin) and
/// [`end`](PaintSurface::end); everything drawn is clipped to the surface
/// bounds. Images must use the surface pixel format.
#[derive(Debug, Clone)]
pub struct MemorySurface {
	width: usize,
	height: usize,
	format: PixelFormat,
	data: Vec<u8>,
	active: bool,
	presented: u64,
}

impl MemorySurface {
	/// Creates a black framebuffer.
	pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
		Self {
			width,
			height,
			format,
			data: vec![0; width * height * format.pixel_size()],
			active: false,
			presented: 0,
		}
	}

	/// Returns the width in pixels.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Returns the height in pixels.
	pub fn height(&self) -> usize {
		self.height
	}

	/// Returns the pixel format.
	pub fn format(&self) -> PixelFormat {
		self.format
	}

	/// Returns the surface bounds.
	pub fn bounds(&self) -> Rect {
		Rect::from_origin_size(Point::ZERO, self.width, self.height)
	}

	/// Returns the raw framebuffer.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Returns the bytes of the pixel at `(x, y)`.
	pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
		if x >= self.width || y >= self.height {
			return None;
		}
		let pixel_size = self.format.pixel_size();
		let offset = (y * self.width + x) * pixel_size;
		Some(&self.data[offset..offset + pixel_size])
	}

	/// Returns true while a paint pass is open.
	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Returns the number of completed paint passes.
	pub fn presented(&self) -> u64 {
		self.presented
	}

	/// Converts the framebuffer to an RGBA image.
	pub fn to_rgba_image(&self) -> RgbaImage {
		RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
			let pixel = self.pixel(x as usize, y as usize).unwrap_or(&[0, 0, 0, 0]);
			image::Rgba(self.format.decode(pixel))
		})
	}

	fn ensure_active(&self) -> Result<(), PaintError> {
		if self.active {
			Ok(())
		} else {
			Err(PaintError::NotActive)
		}
	}

	fn ensure_format(&self, format: PixelFormat) -> Result<(), PaintError> {
		if format == self.format {
			Ok(())
		} else {
			Err(PaintError::PixelFormatMismatch {
				expected: self.format,
				actual: format,
			})
		}
	}

	fn span_mut(&mut self, x: usize, y: usize, count: usize) -> &mut [u8] {
		let pixel_size = self.format.pixel_size();
		let offset = (y * self.width + x) * pixel_size;
		&mut self.data[offset..offset + count * pixel_size]
	}
}

impl PaintSurface for MemorySurface {
	fn begin(&mut self) -> Result<(), PaintError> {
		if self.active {
			return Err(PaintError::AlreadyActive);
		}
		self.active = true;
		Ok(())
	}

	fn clear(&mut self, rect: Rect) -> Result<(), PaintError> {
		self.ensure_active()?;
		let Some(clipped) = rect.intersect(&self.bounds()) else {
			return Ok(());
		};

		for y in clipped.min.y..clipped.max.y {
			self.span_mut(clipped.min.x as usize, y as usize, clipped.width()).fill(0);
		}
		Ok(())
	}

	fn draw_pixmap(&mut self, origin: Point, pixmap: &Pixmap) -> Result<(), PaintError> {
		self.ensure_active()?;
		self.ensure_format(pixmap.format())?;

		let target = Rect::from_origin_size(origin, pixmap.width(), pixmap.height());
		let Some(clipped) = target.intersect(&self.bounds()) else {
			return Ok(());
		};

		let pixel_size = self.format.pixel_size();
		let src_x = (clipped.min.x - origin.x) as usize;
		let count = clipped.width();
		for y in clipped.min.y..clipped.max.y {
			let Some(row) = pixmap.row((y - origin.y) as usize) else {
				break;
			};
			let src = &row[src_x * pixel_size..(src_x + count) * pixel_size];
			self.span_mut(clipped.min.x as usize, y as usize, count).copy_from_slice(src);
		}
		Ok(())
	}

	fn draw_packed_pixmap(&mut self, origin: Point, pixmap: &PackedPixmap) -> Result<(), PaintError> {
		self.ensure_active()?;
		self.ensure_format(pixmap.format())?;

		let pixel_size = self.format.pixel_size();
		let (width, height) = (self.width as i64, self.height as i64);
		for run in pixmap.runs() {
			let y = i64::from(origin.y) + run.y as i64;
			if y < 0 || y >= height {
				continue;
			}
			let x0 = (i64::from(origin.x) + run.x as i64).max(0);
			let x1 = (i64::from(origin.x) + (run.x + run.count) as i64).min(width);
			if x1 <= x0 {
				continue;
			}

			let span = self.span_mut(x0 as usize, y as usize, (x1 - x0) as usize);
			for dst in span.chunks_exact_mut(pixel_size) {
				dst.copy_from_slice(run.pixel);
			}
		}
		Ok(())
	}

	fn end(&mut self) -> Result<(), PaintError> {
		self.ensure_active()?;
		self.active = false;
		self.presented += 1;
		Ok(())
	}
}
