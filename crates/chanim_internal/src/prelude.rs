//! Prelude module for `chanim_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use chanim_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let catalog = Catalog::new(
//!     vec![Animation::new("idle", "idle")],
//!     vec![FrameSeries::new("idle", vec![Frame::default()])],
//! );
//! let animator = Animator::new(std::sync::Arc::new(catalog), NullSurface::new(), PlayerConfig::default());
//! assert_eq!(animator.animation_names(), vec!["idle"]);
//! ```

#[doc(inline)]
pub use chanim_player::prelude::*;
#[doc(inline)]
pub use chanim_types::prelude::*;
