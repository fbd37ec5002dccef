//! Frames, frame series and animations.
//!
//! # Data Model
//!
//! ```text
//! Animation "walk" ──► FrameSeries "walk-loop" ──► [Frame, Frame, Frame, ...]
//!                                                          │
//!                                                          └─ transitions:
//!                                                               "idle" via "walk-to-idle"
//!                                                               "run"  via ""  (instant)
//! ```
//!
//! An [`Animation`] names the [`FrameSeries`] it loops while it is active. A
//! [`Frame`] is a list of draw operations; a frame can additionally be a
//! *transition frame*, listing the animations playback may switch to right
//! after that frame has been shown, and the frame series to play on the way.
//!
//! The transition list is an `Option`: `None` means the frame is not a
//! transition point at all, `Some` (even an empty list) marks it as one. Only
//! a matching entry in the list allows a switch, so an empty list behaves
//! like `None` when searching.

mod operation;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{error::PaintError, paint::PaintSurface};

pub use self::operation::{ClearOperation, DrawOperation, PackedPixmapOperation, PixmapOperation};

/// A way out of a frame towards another animation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
	dest_animation: String,
	frame_series: String,
}

impl Transition {
	/// Creates a transition to `dest_animation` through `frame_series`.
	///
	/// An empty `frame_series` means no in-between frames are needed.
	pub fn new(dest_animation: impl Into<String>, frame_series: impl Into<String>) -> Self {
		Self {
			dest_animation: dest_animation.into(),
			frame_series: frame_series.into(),
		}
	}

	/// Creates a transition that switches without in-between frames.
	pub fn instant(dest_animation: impl Into<String>) -> Self {
		Self::new(dest_animation, String::new())
	}

	/// Returns the name of the destination animation.
	pub fn dest_animation(&self) -> &str {
		&self.dest_animation
	}

	/// Returns the name of the frame series played during the transition.
	pub fn frame_series(&self) -> &str {
		&self.frame_series
	}

	/// Returns true if the transition has no in-between frames.
	pub fn is_instant(&self) -> bool {
		self.frame_series.is_empty()
	}
}

/// A drawable unit of an animation.
#[derive(Debug, Clone, Default)]
pub struct Frame {
	operations: Vec<Arc<dyn DrawOperation>>,
	transitions: Option<Vec<Transition>>,
}

impl Frame {
	/// Creates a plain (non-transition) frame.
	pub fn new(operations: Vec<Arc<dyn DrawOperation>>) -> Self {
		Self {
			operations,
			transitions: None,
		}
	}

	/// Appends a draw operation.
	pub fn push_operation<O: DrawOperation + 'static>(&mut self, operation: O) {
		self.operations.push(Arc::new(operation));
	}

	/// Builder-style variant of [`push_operation`](Self::push_operation).
	pub fn with_operation<O: DrawOperation + 'static>(mut self, operation: O) -> Self {
		self.push_operation(operation);
		self
	}

	/// Marks the frame as a transition frame with the given transitions.
	pub fn with_transitions(mut self, transitions: Vec<Transition>) -> Self {
		self.transitions = Some(transitions);
		self
	}

	/// Adds a transition, marking the frame as a transition frame.
	pub fn add_transition(&mut self, transition: Transition) {
		self.transitions.get_or_insert_with(Vec::new).push(transition);
	}

	/// Returns the draw operations in execution order.
	pub fn operations(&self) -> &[Arc<dyn DrawOperation>] {
		&self.operations
	}

	/// Returns the transitions in declaration order (empty for plain frames).
	pub fn transitions(&self) -> &[Transition] {
		self.transitions.as_deref().unwrap_or_default()
	}

	/// Runs every draw operation against `surface`, stopping at the first
	/// failure.
	pub fn draw(&self, surface: &mut dyn PaintSurface) -> Result<(), PaintError> {
		for operation in &self.operations {
			operation.draw(surface)?;
		}
		Ok(())
	}

	/// Returns true if the frame carries a transition list, even an empty one.
	pub fn is_transition_frame(&self) -> bool {
		self.transitions.is_some()
	}

	/// Looks up the frame series leading to `dest_animation`.
	///
	/// Returns the first matching transition's series name in declaration
	/// order. The name is empty for instant transitions.
	///
	/// # Examples
	///
	/// ```
	/// use chanim_types::frame::{Frame, Transition};
	///
	/// let frame = Frame::default().with_transitions(vec![
	///     Transition::new("idle", "walk-to-idle"),
	///     Transition::instant("run"),
	///     Transition::new("idle", "shadowed"),
	/// ]);
	///
	/// assert_eq!(frame.transition_series("idle"), Some("walk-to-idle"));
	/// assert_eq!(frame.transition_series("run"), Some(""));
	/// assert_eq!(frame.transition_series("jump"), None);
	/// ```
	pub fn transition_series(&self, dest_animation: &str) -> Option<&str> {
		self.transitions()
			.iter()
			.find(|transition| transition.dest_animation == dest_animation)
			.map(Transition::frame_series)
	}
}

/// A named, ordered sequence of frames.
#[derive(Debug, Clone, Default)]
pub struct FrameSeries {
	name: String,
	frames: Vec<Frame>,
}

impl FrameSeries {
	/// Creates a frame series.
	pub fn new(name: impl Into<String>, frames: Vec<Frame>) -> Self {
		Self {
			name: name.into(),
			frames,
		}
	}

	/// Returns the series name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the frames.
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Returns the frames for editing while the catalog is being built.
	pub fn frames_mut(&mut self) -> &mut Vec<Frame> {
		&mut self.frames
	}

	/// Returns the frame at `index`.
	pub fn get(&self, index: usize) -> Option<&Frame> {
		self.frames.get(index)
	}

	/// Returns the number of frames.
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Returns true if the series has no frames.
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

/// A named steady-state loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Animation {
	name: String,
	frame_series: String,
}

impl Animation {
	/// Creates an animation looping `frame_series`.
	pub fn new(name: impl Into<String>, frame_series: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			frame_series: frame_series.into(),
		}
	}

	/// Returns the animation name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the name of the looped frame series.
	pub fn frame_series(&self) -> &str {
		&self.frame_series
	}
}
