//! The animation playback state machine.
//!
//! [`Playback`] decides which frame comes next. It holds no locks and knows
//! nothing about time; the [`Animator`](crate::Animator) wraps it in a mutex
//! and the render loop pulls one frame per tick with
//! [`next_frame`](Playback::next_frame).
//!
//! # States
//!
//! ```text
//!                 request_change(dest)
//!  PlayingCurrent ─────────────────────► ChangeRequested
//!        ▲                                      │ next tick
//!        │                                      ▼
//!        │  no match after one lap    SeekingTransition ◄─┐
//!        ├──────────────────────────────────────┤          │ last shown frame
//!        │  unknown transition series           │          │ has no way to dest
//!        ├──────────────────────────────────────┤──────────┘
//!        │                                      │ match found
//!        │  series exhausted, dest activated    ▼
//!        └──────────────────────────── PlayingTransition
//! ```
//!
//! While seeking, playback keeps looping the current animation and inspects
//! the most recently shown frame for a transition to the destination. The
//! search is bounded by one lap of the current series. Once a transition
//! frame is found its frame series (possibly empty) is played once, then the
//! destination animation starts from its first frame. Every change ends with
//! a *resolution* reported through [`Tick::resolution`].

use std::{fmt, sync::Arc};

use chanim_types::frame::Animation;

use crate::{
	catalog::{Catalog, FrameRef, ResolvedAnimation},
	error::AnimatorError,
};


/// Externally visible playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
	/// Looping the current animation
	PlayingCurrent,
	/// A change was requested and will be picked up on the next tick
	ChangeRequested,
	/// Looping the current animation while looking for a transition frame
	SeekingTransition,
	/// Playing the frames that lead to the destination animation
	PlayingTransition,
}

impl fmt::Display for PlaybackState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::PlayingCurrent => write!(f, "playing"),
			Self::ChangeRequested => write!(f, "change requested"),
			Self::SeekingTransition => write!(f, "seeking transition"),
			Self::PlayingTransition => write!(f, "playing transition"),
		}
	}
}

/// Outcome of [`Playback::request_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeRequest {
	/// The destination is already playing; nothing to do
	Unchanged,
	/// The change is pending and will resolve on a later tick
	Pending,
}

/// Result of one [`Playback::next_frame`] call.
#[derive(Debug)]
pub struct Tick {
	/// The frame to show on this tick
	pub frame: FrameRef,
	/// Set on the tick that resolves a pending change
	pub resolution: Option<Result<(), AnimatorError>>,
}

#[derive(Debug)]
enum Phase {
	Playing,
	ChangeRequested {
		dest: String,
	},
	Seeking {
		dest: String,
		attempts: usize,
	},
	Transition {
		dest: String,
		series: Option<usize>,
	},
}

/// Playback cursor and state for one animated character.
#[derive(Debug)]
pub struct Playback {
	catalog: Arc<Catalog>,
	current: ResolvedAnimation,
	cursor: usize,
	phase: Phase,
	last_shown: Option<FrameRef>,
}

impl Playback {
	/// Activates `animation` from its first frame.
	///
	/// # Errors
	///
	/// Fails with the errors of [`Catalog::resolve_animation`].
	pub fn new(catalog: Arc<Catalog>, animation: &str) -> Result<Self, AnimatorError> {
		let current = catalog.resolve_animation(animation)?;
		Ok(Self {
			catalog,
			current,
			cursor: 0,
			phase: Phase::Playing,
			last_shown: None,
		})
	}

	/// Returns the catalog frames are taken from.
	pub fn catalog(&self) -> &Arc<Catalog> {
		&self.catalog
	}

	/// Returns the name of the active animation.
	pub fn animation_name(&self) -> &str {
		self.catalog.animation(self.current.animation).map_or("", Animation::name)
	}

	/// Returns the current state.
	pub fn state(&self) -> PlaybackState {
		match self.phase {
			Phase::Playing => PlaybackState::PlayingCurrent,
			Phase::ChangeRequested {
				..
			} => PlaybackState::ChangeRequested,
			Phase::Seeking {
				..
			} => PlaybackState::SeekingTransition,
			Phase::Transition {
				..
			} => PlaybackState::PlayingTransition,
		}
	}

	/// Returns the index of the next frame in the series being played.
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Returns the requested animation while a change is in progress.
	pub fn destination(&self) -> Option<&str> {
		match &self.phase {
			Phase::Playing => None,
			Phase::ChangeRequested {
				dest,
			}
			| Phase::Seeking {
				dest,
				..
			}
			| Phase::Transition {
				dest,
				..
			} => Some(dest),
		}
	}

	/// Returns the most recently returned frame.
	pub fn last_shown(&self) -> Option<FrameRef> {
		self.last_shown
	}

	/// Returns true while a change is pending or a transition is playing.
	pub fn is_changing(&self) -> bool {
		!matches!(self.phase, Phase::Playing)
	}

	/// Requests a switch to `dest`.
	///
	/// The destination is not validated here: an unknown name either finds no
	/// transition or fails activation when its transition completes.
	///
	/// # Errors
	///
	/// Returns [`AnimatorError::ChangeAlreadyInProgress`] if a change is
	/// already pending or a transition is playing.
	pub fn request_change(&mut self, dest: &str) -> Result<ChangeRequest, AnimatorError> {
		if self.is_changing() {
			return Err(AnimatorError::ChangeAlreadyInProgress);
		}
		if dest == self.animation_name() {
			return Ok(ChangeRequest::Unchanged);
		}

		self.phase = Phase::ChangeRequested {
			dest: dest.to_string(),
		};
		Ok(ChangeRequest::Pending)
	}

	/// Abandons a pending change and goes back to looping the current
	/// animation.
	///
	/// A search in progress keeps the loop position; an interrupted
	/// transition restarts the current animation from its first frame.
	/// Returns false if no change was in progress.
	pub fn cancel_change(&mut self) -> bool {
		match std::mem::replace(&mut self.phase, Phase::Playing) {
			Phase::Playing => false,
			Phase::Transition {
				..
			} => {
				self.cursor = 0;
				true
			}
			Phase::ChangeRequested {
				..
			}
			| Phase::Seeking {
				..
			} => true,
		}
	}

	/// Advances playback by one tick and returns the frame to show.
	pub fn next_frame(&mut self) -> Tick {
		let mut resolution = None;

		if let Phase::ChangeRequested {
			dest,
		} = &mut self.phase
		{
			self.phase = Phase::Seeking {
				dest: std::mem::take(dest),
				attempts: 0,
			};
		}

		if matches!(self.phase, Phase::Seeking { .. }) {
			resolution = self.seek_transition();
		}

		let transition = match self.phase {
			Phase::Transition {
				series,
				..
			} => Some(series),
			_ => None,
		};

		let frame = match transition {
			Some(series) => match self.next_transition_frame(series) {
				Some(frame) => frame,
				None => {
					resolution = Some(self.finish_transition());
					self.next_loop_frame()
				}
			},
			None => self.next_loop_frame(),
		};

		self.last_shown = Some(frame);
		Tick {
			frame,
			resolution,
		}
	}

	/// One search attempt: checks the last shown frame for a way to the
	/// destination. Returns a resolution if the search ended in failure.
	///
	/// Only frames of the current series count towards the lap, so a search
	/// started before the first tick, or right after an interrupted
	/// transition, still inspects every frame once.
	fn seek_transition(&mut self) -> Option<Result<(), AnimatorError>> {
		let Phase::Seeking {
			dest,
			attempts,
		} = std::mem::replace(&mut self.phase, Phase::Playing)
		else {
			return None;
		};

		let Some(shown) = self.last_shown.filter(|frame| frame.series == self.current.series) else {
			self.phase = Phase::Seeking {
				dest,
				attempts,
			};
			return None;
		};
		let attempts = attempts + 1;

		let found = self
			.catalog
			.frame(shown)
			.and_then(|frame| frame.transition_series(&dest))
			.map(str::to_string);

		let Some(series_name) = found else {
			if attempts >= self.catalog.series_len(self.current.series) {
				return Some(Err(AnimatorError::NoTransitionFound {
					from: self.animation_name().to_string(),
					to: dest,
				}));
			}
			self.phase = Phase::Seeking {
				dest,
				attempts,
			};
			return None;
		};

		let series = if series_name.is_empty() {
			None
		} else {
			match self.catalog.find_frame_series(&series_name) {
				Some((index, _)) => Some(index),
				None => return Some(Err(AnimatorError::UnknownFrameSeries(series_name))),
			}
		};

		self.phase = Phase::Transition {
			dest,
			series,
		};
		self.cursor = 0;
		None
	}

	fn next_transition_frame(&mut self, series: Option<usize>) -> Option<FrameRef> {
		let series = series?;
		if self.cursor >= self.catalog.series_len(series) {
			return None;
		}

		let frame = FrameRef {
			series,
			index: self.cursor,
		};
		self.cursor += 1;
		Some(frame)
	}

	/// Activates the destination once the transition frames are exhausted.
	/// On failure the previous animation restarts from its first frame.
	fn finish_transition(&mut self) -> Result<(), AnimatorError> {
		let Phase::Transition {
			dest,
			..
		} = std::mem::replace(&mut self.phase, Phase::Playing)
		else {
			return Ok(());
		};

		self.cursor = 0;
		self.current = self.catalog.resolve_animation(&dest)?;
		Ok(())
	}

	fn next_loop_frame(&mut self) -> FrameRef {
		let frame = FrameRef {
			series: self.current.series,
			index: self.cursor,
		};
		self.cursor = (self.cursor + 1) % self.catalog.series_len(self.current.series).max(1);
		frame
	}
}
