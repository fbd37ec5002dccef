//! This crate provides the data model and imaging primitives for the `chanim-rs` project.
//!
//! # Contents
//!
//! - **Geometry**: integer points and half-open rectangles in surface coordinates
//! - **Pixmaps**: RGB16/RGB32 pixel formats, uncompressed pixmaps and the
//!   run-length encoded `.ppixmap` format
//! - **Painting**: the [`PaintSurface`](paint::PaintSurface) capability, a null
//!   surface and a software framebuffer
//! - **Frames**: draw operations, frames with transition points, frame series
//!   and animations
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use chanim_types::prelude::*;
//!
//! let sprite = Arc::new(PackedPixmap::pack(&Pixmap::filled(8, 8, PixelFormat::Rgb16, [0xFF; 4])));
//! let frame = Frame::default()
//!     .with_operation(ClearOperation::new(Rect::new(0, 0, 32, 32)))
//!     .with_operation(PackedPixmapOperation::new(Point::new(12, 12), sprite))
//!     .with_transitions(vec![Transition::instant("idle")]);
//!
//! let mut surface = MemorySurface::new(32, 32, PixelFormat::Rgb16);
//! surface.begin().unwrap();
//! frame.draw(&mut surface).unwrap();
//! surface.end().unwrap();
//!
//! assert_eq!(surface.pixel(12, 12), Some(&[0xFF, 0xFF][..]));
//! ```

pub mod error;
pub mod frame;
pub mod geometry;
pub mod paint;
pub mod pixmap;

/// `use chanim_types::prelude::*;` to import commonly used items.
pub mod prelude;
