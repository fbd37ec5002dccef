//! Prelude module for `chanim_types`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use chanim_types::prelude::*;
//!
//! let series = FrameSeries::new("idle", vec![Frame::default()]);
//! let animation = Animation::new("idle", series.name());
//! ```

#[doc(inline)]
pub use crate::error::{PaintError, PixmapError};

#[doc(inline)]
pub use crate::frame::{
	Animation, ClearOperation, DrawOperation, Frame, FrameSeries, PackedPixmapOperation,
	PixmapOperation, Transition,
};

#[doc(inline)]
pub use crate::geometry::{Point, Rect};

#[doc(inline)]
pub use crate::paint::{MemorySurface, NullSurface, PaintSurface};

#[doc(inline)]
pub use crate::pixmap::{PackedPixmap, PixelFormat, Pixmap};
