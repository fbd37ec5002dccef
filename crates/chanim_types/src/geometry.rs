//! Integer screen geometry used by draw operations and paint surfaces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in surface coordinates.
///
/// The origin is the top-left corner of the surface, `x` grows to the right
/// and `y` grows downwards. Coordinates may be negative: a sprite sliding in
/// from the left edge starts at a negative `x` and is clipped by the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal coordinate
	pub x: i32,
	/// Vertical coordinate
	pub y: i32,
}

impl Point {
	/// The `(0, 0)` point.
	pub const ZERO: Self = Self {
		x: 0,
		y: 0,
	};

	/// Creates a new point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// A half-open rectangle `[min, max)` in surface coordinates.
///
/// A rectangle whose `max` is not strictly greater than its `min` on both
/// axes is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
	/// Top-left corner (inclusive)
	pub min: Point,
	/// Bottom-right corner (exclusive)
	pub max: Point,
}

impl Rect {
	/// Creates a rectangle from its corner coordinates.
	pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
		Self {
			min: Point::new(x0, y0),
			max: Point::new(x1, y1),
		}
	}

	/// Creates a rectangle anchored at `origin` with the given size.
	pub fn from_origin_size(origin: Point, width: usize, height: usize) -> Self {
		Self {
			min: origin,
			max: Point::new(
				origin.x.saturating_add(clamp_dimension(width)),
				origin.y.saturating_add(clamp_dimension(height)),
			),
		}
	}

	/// Returns the rectangle width, zero for empty rectangles.
	pub fn width(&self) -> usize {
		self.max.x.saturating_sub(self.min.x).max(0) as usize
	}

	/// Returns the rectangle height, zero for empty rectangles.
	pub fn height(&self) -> usize {
		self.max.y.saturating_sub(self.min.y).max(0) as usize
	}

	/// Returns true if the rectangle covers no pixels.
	pub fn is_empty(&self) -> bool {
		self.max.x <= self.min.x || self.max.y <= self.min.y
	}

	/// Returns true if `point` lies inside the rectangle.
	pub fn contains(&self, point: Point) -> bool {
		point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
	}

	/// Returns the overlap of two rectangles, or `None` if they do not overlap.
	///
	/// # Examples
	///
	/// ```
	/// use chanim_types::geometry::Rect;
	///
	/// let a = Rect::new(0, 0, 10, 10);
	/// let b = Rect::new(5, -5, 20, 5);
	/// assert_eq!(a.intersect(&b), Some(Rect::new(5, 0, 10, 5)));
	/// assert_eq!(a.intersect(&Rect::new(10, 0, 12, 2)), None);
	/// ```
	pub fn intersect(&self, other: &Rect) -> Option<Rect> {
		let clipped = Rect::new(
			self.min.x.max(other.min.x),
			self.min.y.max(other.min.y),
			self.max.x.min(other.max.x),
			self.max.y.min(other.max.y),
		);
		(!clipped.is_empty()).then_some(clipped)
	}
}

impl fmt::Display for Rect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{} - {})", self.min, self.max)
	}
}

fn clamp_dimension(value: usize) -> i32 {
	i32::try_from(value).unwrap_or(i32::MAX)
}
