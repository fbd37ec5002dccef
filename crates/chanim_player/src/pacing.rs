//! Fixed-rate presentation pacing.

use std::time::{Duration, Instant};

/// Decision for one render tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
	/// Draw the frame, then wait until `deadline`
	Present {
		/// Intended presentation time of this tick
		deadline: Instant,
	},
	/// The tick's presentation time already passed; skip drawing
	Drop {
		/// Number of frames dropped so far, including this one
		total: u64,
	},
}

/// Schedules ticks at a fixed interval.
///
/// Each target is the previous target plus the interval, never "now" plus the
/// interval, so a slow frame does not shift every frame after it. Ticks that
/// fall behind are reported as drops until the schedule catches up.
#[derive(Debug, Clone)]
pub struct FramePacer {
	interval: Duration,
	target: Instant,
	dropped: u64,
}

impl FramePacer {
	/// Creates a pacer whose first deadline is one interval after `start`.
	pub fn new(interval: Duration, start: Instant) -> Self {
		Self {
			interval,
			target: start,
			dropped: 0,
		}
	}

	/// Returns the time between two ticks.
	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Returns the number of dropped ticks.
	pub fn dropped(&self) -> u64 {
		self.dropped
	}

	/// Moves to the next tick and decides whether it can still be presented.
	pub fn advance(&mut self, now: Instant) -> Pace {
		self.target += self.interval;
		if self.target <= now {
			self.dropped += 1;
			return Pace::Drop {
				total: self.dropped,
			};
		}

		Pace::Present {
			deadline: self.target,
		}
	}
}
