//! Animation playback for `chanim-rs`.
//!
//! The [`Animator`] loops the frames of one animation on a background render
//! thread and switches between animations only at transition frames, playing
//! the in-between frames the catalog declares for the switch.
//!
//! - [`Catalog`]: the read-only set of animations and frame series
//! - [`Playback`]: the lock-free state machine choosing the next frame
//! - [`FramePacer`]: fixed-rate scheduling with dropped frame accounting
//! - [`PlayerConfig`]: frame rate, logging and display settings
//!
//! # Examples
//!
//! ```
//! use std::{sync::Arc, time::Duration};
//!
//! use chanim_player::{Animator, Catalog, PlayerConfig};
//! use chanim_types::prelude::*;
//!
//! let catalog = Catalog::new(
//!     vec![Animation::new("idle", "idle"), Animation::new("wave", "wave")],
//!     vec![
//!         FrameSeries::new("idle", vec![Frame::default().with_transitions(vec![Transition::instant("wave")])]),
//!         FrameSeries::new("wave", vec![Frame::default()]),
//!     ],
//! );
//! let config = PlayerConfig {
//!     frame_rate: 200,
//!     ..Default::default()
//! };
//!
//! let animator = Animator::new(Arc::new(catalog), NullSurface::new(), config);
//! animator.start("idle").unwrap();
//! animator.change_animation_timeout("wave", Duration::from_secs(5)).unwrap();
//! assert_eq!(animator.current_animation().as_deref(), Some("wave"));
//!
//! animator.join().unwrap();
//! ```

mod animator;
mod catalog;
mod config;
mod error;
mod pacing;
mod playback;
mod render;

pub use self::{
	animator::Animator,
	catalog::{Catalog, FrameRef, ResolvedAnimation},
	config::{DisplayConfig, ENV_PREFIX, PlayerConfig},
	error::{AnimatorError, ConfigError},
	pacing::{FramePacer, Pace},
	playback::{ChangeRequest, Playback, PlaybackState, Tick},
	render::RenderStats,
};

/// `use chanim_player::prelude::*;` to import commonly used items.
pub mod prelude {
	#[doc(inline)]
	pub use crate::{Animator, AnimatorError, Catalog, PlaybackState, PlayerConfig, RenderStats};
}
