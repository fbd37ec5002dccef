//! Player configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `CHANIM_`. Nested keys use a double
//! underscore, so `CHANIM_DISPLAY__WIDTH=800` sets `display.width`.
//!
//! ```toml
//! frame_rate = 25
//! drop_log_interval = 100
//! change_timeout_ms = 2000
//!
//! [display]
//! width = 1024
//! height = 600
//! pixel_format = "rgb16"
//! ```

use std::{path::Path, time::Duration};

use chanim_types::pixmap::PixelFormat;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix of the environment variables read by [`PlayerConfig::load`].
pub const ENV_PREFIX: &str = "CHANIM";

/// Size and pixel layout of the target display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
	/// Width in pixels
	pub width: usize,
	/// Height in pixels
	pub height: usize,
	/// Pixel layout of the frame buffer
	pub pixel_format: PixelFormat,
}

impl Default for DisplayConfig {
	fn default() -> Self {
		Self {
			width: 1024,
			height: 600,
			pixel_format: PixelFormat::Rgb16,
		}
	}
}

/// Settings for the animator and its render loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
	/// Target presentation rate in frames per second
	pub frame_rate: u32,
	/// Log the dropped frame count every this many drops
	pub drop_log_interval: u64,
	/// Upper bound for [`Animator::change_animation`](crate::Animator::change_animation),
	/// in milliseconds; `None` waits until the change resolves
	pub change_timeout_ms: Option<u64>,
	/// Display the frames are drawn for
	pub display: DisplayConfig,
}

impl Default for PlayerConfig {
	fn default() -> Self {
		Self {
			frame_rate: 25,
			drop_log_interval: 100,
			change_timeout_ms: None,
			display: DisplayConfig::default(),
		}
	}
}

impl PlayerConfig {
	/// Loads the configuration from `path` (if any) and the environment.
	///
	/// # Errors
	///
	/// Fails if the file cannot be read or parsed, a value has the wrong
	/// type, or the result does not pass [`validate`](Self::validate).
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		let mut builder = Config::builder();
		if let Some(path) = path {
			builder = builder.add_source(File::from(path).required(true));
		}

		let config: Self = builder
			.add_source(
				Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__").try_parsing(true),
			)
			.build()?
			.try_deserialize()?;

		config.validate()?;
		Ok(config)
	}

	/// Checks that the values are usable.
	///
	/// # Errors
	///
	/// Returns the first invalid setting found.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.frame_rate == 0 {
			return Err(ConfigError::InvalidFrameRate);
		}
		if self.drop_log_interval == 0 {
			return Err(ConfigError::InvalidDropLogInterval);
		}
		if self.display.width == 0 || self.display.height == 0 {
			return Err(ConfigError::InvalidDisplaySize {
				width: self.display.width,
				height: self.display.height,
			});
		}
		Ok(())
	}

	/// Returns the time between two presented frames.
	pub fn frame_interval(&self) -> Duration {
		Duration::from_secs(1) / self.frame_rate.max(1)
	}

	/// Returns the configured change timeout.
	pub fn change_timeout(&self) -> Option<Duration> {
		self.change_timeout_ms.map(Duration::from_millis)
	}
}
