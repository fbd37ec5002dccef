//! Threaded behaviour of the `Animator`.

mod surface;

use std::{
	sync::Arc,
	thread,
	time::{Duration, Instant},
};

use chanim_rs::prelude::*;

use crate::surface::{Recorder, marker};

const A: usize = 0;
const B: usize = 1;
const B2A: usize = 2;
const LONG: usize = 4;

/// - `a` (4 frames) switches to `b` instantly after frame 1 and to `long`
///   through `a2long` after frame 3
/// - `b` (3 frames) switches to `a` through `b2a` after frame 0
/// - `long` (60 frames) has no way out
/// - `broken` loops a missing series, `blank` an empty one
fn catalog() -> Arc<Catalog> {
	let series = |index: usize, count: usize| -> Vec<Frame> { (0..count).map(|frame| marker(index, frame)).collect() };

	let mut a = series(A, 4);
	a[1] = marker(A, 1).with_transitions(vec![Transition::instant("b")]);
	a[3] = marker(A, 3).with_transitions(vec![Transition::new("long", "a2long")]);

	let mut b = series(B, 3);
	b[0] = marker(B, 0).with_transitions(vec![Transition::new("a", "b2a")]);

	Arc::new(Catalog::new(
		vec![
			Animation::new("a", "a"),
			Animation::new("b", "b"),
			Animation::new("long", "long"),
			Animation::new("broken", "missing"),
			Animation::new("blank", "empty"),
		],
		vec![
			FrameSeries::new("a", a),
			FrameSeries::new("b", b),
			FrameSeries::new("b2a", series(B2A, 2)),
			FrameSeries::new("a2long", series(3, 1)),
			FrameSeries::new("long", series(LONG, 60)),
			FrameSeries::new("empty", Vec::new()),
		],
	))
}

fn config(frame_rate: u32) -> PlayerConfig {
	PlayerConfig {
		frame_rate,
		..Default::default()
	}
}

fn animator(frame_rate: u32) -> (Animator<Recorder>, surface::FrameLog) {
	let (recorder, log) = Recorder::new();
	(Animator::new(catalog(), recorder, config(frame_rate)), log)
}

fn wait_for(mut condition: impl FnMut() -> bool) {
	let deadline = Instant::now() + Duration::from_secs(5);
	while !condition() {
		assert!(Instant::now() < deadline, "condition not met within 5s");
		thread::sleep(Duration::from_millis(1));
	}
}

#[test_log::test]
fn test_start_rejects_unplayable_animations() {
	let (animator, _) = animator(200);

	assert!(matches!(animator.start("nope"), Err(AnimatorError::UnknownAnimation(name)) if name == "nope"));
	assert!(matches!(animator.start("broken"), Err(AnimatorError::UnknownFrameSeries(name)) if name == "missing"));
	assert!(matches!(animator.start("blank"), Err(AnimatorError::EmptyFrameSeries(name)) if name == "blank"));
	assert!(!animator.is_running());
	assert!(animator.with_surface(|_| ()).is_some());
}

#[test_log::test]
fn test_start_twice() {
	let (animator, log) = animator(200);
	animator.start("a").unwrap();

	assert!(matches!(animator.start("b"), Err(AnimatorError::AlreadyRunning)));
	assert_eq!(animator.current_animation().as_deref(), Some("a"));

	wait_for(|| log.lock().unwrap().len() >= 3);
	assert!(log.lock().unwrap().iter().all(|&(series, _)| series == A));
	animator.join().unwrap();
}

#[test_log::test]
fn test_change_requires_running_animator() {
	let (animator, _) = animator(200);
	assert!(matches!(animator.change_animation("b"), Err(AnimatorError::NotRunning)));

	animator.start("a").unwrap();
	animator.stop();
	animator.stop();
	assert!(!animator.is_running());
	assert!(matches!(animator.change_animation("b"), Err(AnimatorError::NotRunning)));
}

#[test_log::test]
fn test_change_to_current_returns_immediately() {
	let (animator, _) = animator(200);
	animator.start("a").unwrap();

	animator.change_animation("a").unwrap();
	assert_eq!(animator.playback_state(), Some(PlaybackState::PlayingCurrent));
}

#[test_log::test]
fn test_change_through_transition_series() {
	let (animator, log) = animator(200);
	animator.start("b").unwrap();

	animator.change_animation("a").unwrap();
	assert_eq!(animator.current_animation().as_deref(), Some("a"));
	assert_eq!(animator.playback_state(), Some(PlaybackState::PlayingCurrent));

	wait_for(|| log.lock().unwrap().iter().any(|&(series, _)| series == A));
	let log = log.lock().unwrap().clone();
	let first_a = log.iter().position(|&(series, _)| series == A).unwrap();
	assert!(log[..first_a].iter().all(|&(series, _)| series == B || series == B2A));
	assert!(log[first_a..].iter().all(|&(series, _)| series == A));

	animator.change_animation("b").unwrap();
	assert_eq!(animator.current_animation().as_deref(), Some("b"));
	animator.join().unwrap();
}

#[test_log::test]
fn test_no_transition_found_keeps_current() {
	let (animator, _) = animator(500);
	animator.start("long").unwrap();

	let result = animator.change_animation("a");
	assert!(matches!(
		result,
		Err(AnimatorError::NoTransitionFound { from, to }) if from == "long" && to == "a"
	));
	assert_eq!(animator.current_animation().as_deref(), Some("long"));
	assert!(animator.is_running());
}

#[test_log::test]
fn test_concurrent_change_rejected() {
	let (animator, _) = animator(200);
	animator.start("long").unwrap();

	thread::scope(|scope| {
		let waiter = scope.spawn(|| animator.change_animation("a"));
		wait_for(|| animator.playback_state() != Some(PlaybackState::PlayingCurrent));

		assert!(matches!(animator.change_animation("b"), Err(AnimatorError::ChangeAlreadyInProgress)));
		assert!(matches!(waiter.join().unwrap(), Err(AnimatorError::NoTransitionFound { .. })));
	});
}

#[test_log::test]
fn test_change_timeout_cancels_request() {
	let (animator, _) = animator(200);
	animator.start("long").unwrap();

	let result = animator.change_animation_timeout("a", Duration::from_millis(20));
	assert!(matches!(result, Err(AnimatorError::ChangeTimedOut(name)) if name == "a"));
	assert_eq!(animator.playback_state(), Some(PlaybackState::PlayingCurrent));

	// The slot is free again.
	let result = animator.change_animation_timeout("b", Duration::from_millis(20));
	assert!(matches!(result, Err(AnimatorError::ChangeTimedOut(_))));
}

#[test_log::test]
fn test_configured_timeout_applies() {
	let (recorder, _) = Recorder::new();
	let config = PlayerConfig {
		frame_rate: 200,
		change_timeout_ms: Some(20),
		..Default::default()
	};
	let animator = Animator::new(catalog(), recorder, config);
	animator.start("long").unwrap();

	assert!(matches!(animator.change_animation("a"), Err(AnimatorError::ChangeTimedOut(_))));
}

#[test_log::test]
fn test_stop_releases_waiting_caller() {
	let (animator, _) = animator(200);
	animator.start("long").unwrap();

	thread::scope(|scope| {
		let waiter = scope.spawn(|| animator.change_animation("a"));
		wait_for(|| animator.playback_state() != Some(PlaybackState::PlayingCurrent));

		animator.stop();
		assert!(matches!(waiter.join().unwrap(), Err(AnimatorError::NotRunning)));
	});
	animator.join().unwrap();
}

#[test_log::test]
fn test_surface_failure_stops_loop() {
	let animator = Animator::new(catalog(), Recorder::failing_after(5), config(200));
	animator.start("a").unwrap();

	wait_for(|| !animator.is_running());
	assert!(matches!(animator.change_animation("b"), Err(AnimatorError::NotRunning)));
	assert!(matches!(animator.join(), Err(AnimatorError::Render(PaintError::Backend(_)))));
	assert_eq!(animator.presented_frames(), 5);
}

#[test_log::test]
fn test_slow_surface_drops_frames() {
	let recorder = Recorder::slow(Duration::from_millis(25));
	let log = recorder.log();
	let animator = Animator::new(catalog(), recorder, config(100));
	animator.start("long").unwrap();

	let mut samples = Vec::new();
	for _ in 0..6 {
		thread::sleep(Duration::from_millis(50));
		samples.push(animator.dropped_frames());
	}
	let stats = animator.join().unwrap();

	assert!(stats.presented > 0);
	assert!(stats.dropped > 0);
	assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]), "{samples:?}");
	assert!(samples.iter().all(|&sample| sample <= stats.dropped));
	assert_eq!(animator.dropped_frames(), stats.dropped);
	assert_eq!(animator.presented_frames(), stats.presented);

	// One draw per presented tick, and dropped ticks are skipped, not redrawn.
	let log = log.lock().unwrap();
	assert_eq!(log.len() as u64, stats.presented);
	assert!(log.iter().all(|&(series, _)| series == LONG));
	assert!(log.windows(2).all(|pair| pair[0] != pair[1]), "{log:?}");
}

#[derive(Debug)]
struct Explode;

impl DrawOperation for Explode {
	fn draw(&self, _surface: &mut dyn PaintSurface) -> Result<(), PaintError> {
		panic!("operation exploded");
	}
}

#[test_log::test]
fn test_panicking_operation_stops_animator() {
	let mut frames: Vec<Frame> = (0..30).map(|index| marker(LONG, index)).collect();
	frames[20] = marker(LONG, 20).with_operation(Explode);
	let catalog = Arc::new(Catalog::new(
		vec![Animation::new("boom", "boom"), Animation::new("b", "b")],
		vec![FrameSeries::new("boom", frames), FrameSeries::new("b", vec![marker(B, 0)])],
	));
	let (recorder, _) = Recorder::new();
	let animator = Animator::new(catalog, recorder, config(200));
	animator.start("boom").unwrap();

	// No frame of `boom` leads to `b`: the caller waits until the thread dies.
	thread::scope(|scope| {
		let waiter = scope.spawn(|| animator.change_animation("b"));
		assert!(matches!(waiter.join().unwrap(), Err(AnimatorError::NotRunning)));
	});

	assert!(!animator.is_running());
	assert!(matches!(animator.change_animation("b"), Err(AnimatorError::NotRunning)));
	assert!(matches!(animator.join(), Err(AnimatorError::RenderLoopPanicked)));
	assert!(animator.with_surface(|_| ()).is_none());
	assert!(matches!(animator.start("boom"), Err(AnimatorError::RenderLoopPanicked)));
}

#[test_log::test]
fn test_restart_after_join() {
	let (animator, log) = animator(200);
	animator.start("a").unwrap();
	wait_for(|| !log.lock().unwrap().is_empty());
	let first = animator.join().unwrap();
	assert!(first.presented > 0);

	animator.start("b").unwrap();
	assert_eq!(animator.current_animation().as_deref(), Some("b"));
	assert!(animator.with_surface(|_| ()).is_none());

	let drawn = first.presented as usize;
	wait_for(|| log.lock().unwrap().len() > drawn);
	animator.join().unwrap();
	assert!(log.lock().unwrap()[drawn..].iter().all(|&(series, _)| series == B));
}

#[test_log::test]
fn test_animation_names_in_catalog_order() {
	let (animator, _) = animator(200);
	assert_eq!(animator.animation_names(), ["a", "b", "long", "broken", "blank"]);
}
