//! The paced render loop.

use std::{
	thread,
	time::{Duration, Instant},
};

use chanim_types::{error::PaintError, paint::PaintSurface};
use log::{trace, warn};

use crate::{
	animator::Shared,
	pacing::{FramePacer, Pace},
};

/// Frame counts of one render loop run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
	/// Frames drawn and presented
	pub presented: u64,
	/// Frames skipped because their presentation time had passed
	pub dropped: u64,
}

/// Pulls frames until the animator stops, drawing each on time or dropping
/// it. Returns at the first surface failure.
pub(crate) fn run<S: PaintSurface>(
	shared: &Shared,
	surface: &mut S,
	interval: Duration,
	drop_log_interval: u64,
) -> Result<RenderStats, PaintError> {
	let mut pacer = FramePacer::new(interval, Instant::now());
	let mut stats = RenderStats::default();

	while let Some(frame_ref) = shared.next_frame() {
		match pacer.advance(Instant::now()) {
			Pace::Drop {
				total,
			} => {
				stats.dropped += 1;
				shared.record_dropped();
				if total % drop_log_interval.max(1) == 0 {
					warn!("Dropped {total} frames so far");
				}
			}
			Pace::Present {
				deadline,
			} => {
				let Some(frame) = shared.catalog().frame(frame_ref) else {
					trace!("Skipping missing frame {frame_ref:?}");
					continue;
				};

				surface.begin()?;
				frame.draw(surface)?;
				surface.end()?;
				stats.presented += 1;
				shared.record_presented();

				let now = Instant::now();
				if deadline > now {
					thread::sleep(deadline - now);
				}
			}
		}
	}

	Ok(stats)
}
