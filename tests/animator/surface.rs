//! A paint surface that records which frames were drawn.

use std::{
	sync::{Arc, Mutex},
	thread,
	time::Duration,
};

use chanim_rs::prelude::*;

/// Builds a frame whose only operation identifies it in a [`Recorder`] log.
pub fn marker(series: usize, index: usize) -> Frame {
	let (x, y) = (series as i32, index as i32);
	Frame::default().with_operation(ClearOperation::new(Rect::new(x, y, x + 1, y + 1)))
}

/// Shared log of drawn frames as `(series, index)` pairs.
pub type FrameLog = Arc<Mutex<Vec<(usize, usize)>>>;

#[derive(Debug, Default)]
pub struct Recorder {
	log: FrameLog,
	fail_after: Option<usize>,
	present_delay: Duration,
	in_pass: bool,
}

impl Recorder {
	pub fn new() -> (Self, FrameLog) {
		let recorder = Self::default();
		let log = Arc::clone(&recorder.log);
		(recorder, log)
	}

	/// Fails every clear once `count` frames were recorded.
	pub fn failing_after(count: usize) -> Self {
		Self {
			fail_after: Some(count),
			..Default::default()
		}
	}

	/// Returns the log this recorder appends to.
	pub fn log(&self) -> FrameLog {
		Arc::clone(&self.log)
	}

	/// Takes `delay` to present each frame.
	pub fn slow(delay: Duration) -> Self {
		Self {
			present_delay: delay,
			..Default::default()
		}
	}
}

impl PaintSurface for Recorder {
	fn begin(&mut self) -> Result<(), PaintError> {
		if self.in_pass {
			return Err(PaintError::AlreadyActive);
		}
		self.in_pass = true;
		Ok(())
	}

	fn clear(&mut self, rect: Rect) -> Result<(), PaintError> {
		let mut log = self.log.lock().unwrap();
		if self.fail_after.is_some_and(|count| log.len() >= count) {
			return Err(PaintError::Backend("display disconnected".into()));
		}
		log.push((rect.min.x as usize, rect.min.y as usize));
		Ok(())
	}

	fn draw_pixmap(&mut self, _origin: Point, _pixmap: &Pixmap) -> Result<(), PaintError> {
		Ok(())
	}

	fn end(&mut self) -> Result<(), PaintError> {
		if !self.in_pass {
			return Err(PaintError::NotActive);
		}
		self.in_pass = false;
		if !self.present_delay.is_zero() {
			thread::sleep(self.present_delay);
		}
		Ok(())
	}
}
