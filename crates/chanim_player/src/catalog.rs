//! Read-only catalog of animations and frame series.

use chanim_types::frame::{Animation, Frame, FrameSeries};

use crate::error::AnimatorError;

/// Position of a frame inside a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRef {
	/// Index of the frame series in the catalog
	pub series: usize,
	/// Index of the frame in the series
	pub index: usize,
}

/// An animation that passed activation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAnimation {
	/// Index of the animation in the catalog
	pub animation: usize,
	/// Index of its (non-empty) frame series in the catalog
	pub series: usize,
}

/// The animations and frame series available to an animator.
///
/// Lookups scan in declaration order and return the first match; duplicate
/// names are not rejected.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	animations: Vec<Animation>,
	frame_series: Vec<FrameSeries>,
}

impl Catalog {
	/// Creates a catalog.
	pub fn new(animations: Vec<Animation>, frame_series: Vec<FrameSeries>) -> Self {
		Self {
			animations,
			frame_series,
		}
	}

	/// Returns all animations.
	pub fn animations(&self) -> &[Animation] {
		&self.animations
	}

	/// Returns all frame series.
	pub fn frame_series(&self) -> &[FrameSeries] {
		&self.frame_series
	}

	/// Returns the animation names in catalog order.
	pub fn animation_names(&self) -> Vec<String> {
		self.animations.iter().map(|animation| animation.name().to_string()).collect()
	}

	/// Finds an animation by name.
	pub fn find_animation(&self, name: &str) -> Option<(usize, &Animation)> {
		self.animations.iter().enumerate().find(|(_, animation)| animation.name() == name)
	}

	/// Finds a frame series by name.
	pub fn find_frame_series(&self, name: &str) -> Option<(usize, &FrameSeries)> {
		self.frame_series.iter().enumerate().find(|(_, series)| series.name() == name)
	}

	/// Returns the animation at `index`.
	pub fn animation(&self, index: usize) -> Option<&Animation> {
		self.animations.get(index)
	}

	/// Returns the frame series at `index`.
	pub fn series(&self, index: usize) -> Option<&FrameSeries> {
		self.frame_series.get(index)
	}

	/// Returns the number of frames in the series at `index` (zero if absent).
	pub fn series_len(&self, index: usize) -> usize {
		self.series(index).map_or(0, FrameSeries::len)
	}

	/// Returns the frame a [`FrameRef`] points at.
	pub fn frame(&self, frame: FrameRef) -> Option<&Frame> {
		self.series(frame.series)?.get(frame.index)
	}

	/// Checks that `name` can be played as a steady-state loop.
	///
	/// # Errors
	///
	/// - [`AnimatorError::UnknownAnimation`] if no animation has that name
	/// - [`AnimatorError::UnknownFrameSeries`] if its frame series is missing
	/// - [`AnimatorError::EmptyFrameSeries`] if its frame series has no frames
	pub fn resolve_animation(&self, name: &str) -> Result<ResolvedAnimation, AnimatorError> {
		let (animation, entry) =
			self.find_animation(name).ok_or_else(|| AnimatorError::UnknownAnimation(name.to_string()))?;

		let (series, frames) = self
			.find_frame_series(entry.frame_series())
			.ok_or_else(|| AnimatorError::UnknownFrameSeries(entry.frame_series().to_string()))?;

		if frames.is_empty() {
			return Err(AnimatorError::EmptyFrameSeries(name.to_string()));
		}

		Ok(ResolvedAnimation {
			animation,
			series,
		})
	}
}
