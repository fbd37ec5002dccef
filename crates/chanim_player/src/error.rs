//! Error types for animation playback.

use chanim_types::error::PaintError;
use thiserror::Error;

/// Errors returned by the [`Animator`](crate::Animator) and its state machine
#[derive(Debug, Error)]
pub enum AnimatorError {
	/// `start` was called on a running animator
	#[error("Animator is already running")]
	AlreadyRunning,

	/// The animator is stopped (or stopped while a change was pending)
	#[error("Animator is not running")]
	NotRunning,

	/// Another change is pending or a transition is being played
	#[error("Animator is already making an animation change")]
	ChangeAlreadyInProgress,

	/// No animation with the given name exists
	#[error("Couldn't find an animation named '{0}'")]
	UnknownAnimation(String),

	/// No frame series with the given name exists
	#[error("Couldn't find a series of frames named '{0}'")]
	UnknownFrameSeries(String),

	/// The animation's frame series has no frames to loop
	#[error("The frame series for animation '{0}' is empty")]
	EmptyFrameSeries(String),

	/// A full lap of the current animation had no transition frame
	#[error("Couldn't find a transition frame to switch from '{from}' to '{to}'")]
	NoTransitionFound {
		/// Animation that was playing
		from: String,
		/// Requested animation
		to: String,
	},

	/// The change did not resolve before the caller's deadline
	#[error("Timed out waiting for the change to '{0}'")]
	ChangeTimedOut(String),

	/// The paint surface failed and the render loop stopped
	#[error("Render loop stopped: {0}")]
	Render(#[from] PaintError),

	/// The render thread panicked
	#[error("Render loop panicked")]
	RenderLoopPanicked,

	/// The render thread could not be created
	#[error("Failed to spawn the render thread: {0}")]
	ThreadSpawn(#[source] std::io::Error),
}

/// Errors that can occur when loading a [`PlayerConfig`](crate::PlayerConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The frame rate must be at least one frame per second
	#[error("Frame rate must be positive")]
	InvalidFrameRate,

	/// The dropped-frame report interval must be at least one
	#[error("Dropped frame log interval must be positive")]
	InvalidDropLogInterval,

	/// The display must have a non-zero size
	#[error("Invalid display size: {width}x{height}")]
	InvalidDisplaySize {
		/// Configured width
		width: usize,
		/// Configured height
		height: usize,
	},

	/// Reading or deserializing a configuration source failed
	#[error(transparent)]
	Load(#[from] ::config::ConfigError),
}
