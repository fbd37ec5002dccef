//! The threaded animator.
//!
//! An [`Animator`] owns a paint surface and a background render thread. The
//! thread pulls one frame per tick from the shared [`Playback`] and draws it;
//! callers steer playback with [`Animator::change_animation`], which blocks
//! until the render thread has resolved the change.
//!
//! All playback state sits behind one mutex. The render thread holds it only
//! while choosing the next frame, never while drawing or sleeping. A pending
//! change is a single slot holding the reply end of a one-shot channel; the
//! render thread fills it on the tick that resolves the change.

use std::{
	sync::{
		Arc, Mutex, MutexGuard, PoisonError,
		atomic::{AtomicU64, Ordering},
		mpsc::{self, Receiver, RecvTimeoutError, SyncSender},
	},
	thread::{self, JoinHandle},
	time::Duration,
};

use chanim_types::{error::PaintError, paint::PaintSurface};
use log::{debug, error, info, warn};

use crate::{
	catalog::{Catalog, FrameRef},
	config::PlayerConfig,
	error::AnimatorError,
	playback::{ChangeRequest, Playback, PlaybackState},
	render::{self, RenderStats},
};

type ChangeResult = Result<(), AnimatorError>;
type RenderOutcome<S> = (S, Result<RenderStats, PaintError>);

struct PendingChange {
	id: u64,
	reply: SyncSender<ChangeResult>,
}

#[derive(Default)]
struct State {
	running: bool,
	playback: Option<Playback>,
	pending: Option<PendingChange>,
	next_request: u64,
}

/// State shared between callers and the render thread.
pub(crate) struct Shared {
	catalog: Arc<Catalog>,
	state: Mutex<State>,
	presented: AtomicU64,
	dropped: AtomicU64,
}

impl Shared {
	fn lock(&self) -> MutexGuard<'_, State> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub(crate) fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	/// Returns the next frame to show, or `None` once the animator stopped.
	/// Delivers the resolution of a pending change on the tick it happens.
	pub(crate) fn next_frame(&self) -> Option<FrameRef> {
		let mut state = self.lock();
		if !state.running {
			return None;
		}

		let tick = state.playback.as_mut()?.next_frame();
		if let Some(result) = tick.resolution
			&& let Some(pending) = state.pending.take()
		{
			// Capacity one and a single send: never blocks. The caller may
			// have given up already.
			pending.reply.try_send(result).ok();
		}

		Some(tick.frame)
	}

	pub(crate) fn record_presented(&self) {
		self.presented.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_dropped(&self) {
		self.dropped.fetch_add(1, Ordering::Relaxed);
	}

	/// Marks the animator stopped and releases a waiting caller. Returns
	/// true if it was running.
	fn stop(&self) -> bool {
		let (was_running, pending) = {
			let mut state = self.lock();
			let was_running = std::mem::replace(&mut state.running, false);
			if let Some(playback) = state.playback.as_mut() {
				playback.cancel_change();
			}
			(was_running, state.pending.take())
		};

		if let Some(pending) = pending {
			pending.reply.try_send(Err(AnimatorError::NotRunning)).ok();
		}
		was_running
	}

	/// Withdraws the change `id` after its caller timed out. If the render
	/// thread resolved it in the meantime, that resolution wins.
	fn withdraw_change(&self, id: u64, dest: &str, receiver: &Receiver<ChangeResult>) -> ChangeResult {
		{
			let mut state = self.lock();
			if state.pending.as_ref().is_some_and(|pending| pending.id == id) {
				state.pending = None;
				if let Some(playback) = state.playback.as_mut() {
					playback.cancel_change();
				}
				return Err(AnimatorError::ChangeTimedOut(dest.to_string()));
			}
		}

		receiver.try_recv().unwrap_or(Err(AnimatorError::NotRunning))
	}
}

/// Stops the animator when the render thread exits, unwinding included.
struct StopOnExit<'a>(&'a Shared);

impl Drop for StopOnExit<'_> {
	fn drop(&mut self) {
		let stopped = self.0.stop();
		if stopped && thread::panicking() {
			error!("Render thread panicked");
		}
	}
}

/// Plays animations from a [`Catalog`] onto a paint surface.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use chanim_player::{Animator, Catalog, PlayerConfig};
/// use chanim_types::{
///     frame::{Animation, Frame, FrameSeries, Transition},
///     paint::NullSurface,
/// };
///
/// # fn main() -> Result<(), chanim_player::AnimatorError> {
/// let catalog = Catalog::new(
///     vec![Animation::new("idle", "idle"), Animation::new("wave", "wave")],
///     vec![
///         FrameSeries::new(
///             "idle",
///             vec![Frame::default().with_transitions(vec![Transition::instant("wave")])],
///         ),
///         FrameSeries::new("wave", vec![Frame::default(), Frame::default()]),
///     ],
/// );
///
/// let animator = Animator::new(Arc::new(catalog), NullSurface::new(), PlayerConfig::default());
/// animator.start("idle")?;
/// animator.change_animation("wave")?;
/// let stats = animator.join()?;
/// println!("presented {} frames", stats.presented);
/// # Ok(())
/// # }
/// ```
pub struct Animator<S: PaintSurface + Send + 'static> {
	shared: Arc<Shared>,
	config: PlayerConfig,
	surface: Mutex<Option<S>>,
	handle: Mutex<Option<JoinHandle<RenderOutcome<S>>>>,
}

impl<S: PaintSurface + Send + 'static> Animator<S> {
	/// Creates a stopped animator drawing onto `surface`.
	pub fn new(catalog: Arc<Catalog>, surface: S, config: PlayerConfig) -> Self {
		Self {
			shared: Arc::new(Shared {
				catalog,
				state: Mutex::new(State::default()),
				presented: AtomicU64::new(0),
				dropped: AtomicU64::new(0),
			}),
			config,
			surface: Mutex::new(Some(surface)),
			handle: Mutex::new(None),
		}
	}

	/// Returns the catalog being played.
	pub fn catalog(&self) -> &Arc<Catalog> {
		&self.shared.catalog
	}

	/// Returns the configuration.
	pub fn config(&self) -> &PlayerConfig {
		&self.config
	}

	/// Activates `animation` and starts the render thread.
	///
	/// An animator that was stopped can be started again; the previous render
	/// thread is joined first.
	///
	/// # Errors
	///
	/// - [`AnimatorError::AlreadyRunning`] if the render thread is running
	/// - [`AnimatorError::UnknownAnimation`], [`AnimatorError::UnknownFrameSeries`]
	///   or [`AnimatorError::EmptyFrameSeries`] if `animation` cannot be played
	/// - [`AnimatorError::RenderLoopPanicked`] if the previous render thread
	///   panicked and took the surface with it
	/// - [`AnimatorError::ThreadSpawn`] if the thread could not be created
	pub fn start(&self, animation: &str) -> Result<(), AnimatorError> {
		let mut handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
		if self.shared.lock().running {
			return Err(AnimatorError::AlreadyRunning);
		}

		if let Some(previous) = handle.take() {
			match self.reap(previous) {
				Ok(_) => {}
				Err(AnimatorError::Render(err)) => warn!("Discarding previous render failure: {err}"),
				Err(err) => return Err(err),
			}
		}

		let playback = Playback::new(Arc::clone(&self.shared.catalog), animation)?;
		let Some(mut surface) = self.lock_surface().take() else {
			return Err(AnimatorError::RenderLoopPanicked);
		};

		{
			let mut state = self.shared.lock();
			state.running = true;
			state.playback = Some(playback);
			state.pending = None;
		}

		let shared = Arc::clone(&self.shared);
		let interval = self.config.frame_interval();
		let drop_log_interval = self.config.drop_log_interval;
		let spawned = thread::Builder::new().name("chanim-render".into()).spawn(move || {
			let _stop = StopOnExit(&shared);
			let result = render::run(&shared, &mut surface, interval, drop_log_interval);
			if let Err(err) = &result {
				error!("Render loop stopped: {err}");
			}
			(surface, result)
		});

		match spawned {
			Ok(spawned) => {
				*handle = Some(spawned);
				info!("Started animation '{animation}' at {} fps", self.config.frame_rate);
				Ok(())
			}
			Err(err) => {
				self.shared.stop();
				Err(AnimatorError::ThreadSpawn(err))
			}
		}
	}

	/// Stops frame production. The render thread exits on its next tick.
	///
	/// A caller blocked in [`change_animation`](Self::change_animation) is
	/// released with [`AnimatorError::NotRunning`]. Stopping a stopped
	/// animator does nothing.
	pub fn stop(&self) {
		if self.shared.stop() {
			info!("Animator stopped");
		}
	}

	/// Stops the animator and waits for the render thread to exit.
	///
	/// The surface is handed back to the animator and can be inspected with
	/// [`with_surface`](Self::with_surface).
	///
	/// # Errors
	///
	/// - [`AnimatorError::Render`] if the loop ended on a surface failure
	/// - [`AnimatorError::RenderLoopPanicked`] if the render thread panicked
	pub fn join(&self) -> Result<RenderStats, AnimatorError> {
		self.stop();
		let handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner).take();
		match handle {
			Some(handle) => self.reap(handle),
			None => Ok(RenderStats::default()),
		}
	}

	/// Switches to `dest` and waits until the switch happened or failed.
	///
	/// Waits at most the configured
	/// [`change_timeout_ms`](PlayerConfig::change_timeout_ms), if set.
	///
	/// # Errors
	///
	/// - [`AnimatorError::NotRunning`] if the animator is stopped, or is
	///   stopped while waiting
	/// - [`AnimatorError::ChangeAlreadyInProgress`] if another change has not
	///   resolved yet
	/// - [`AnimatorError::NoTransitionFound`] if no frame of the current
	///   animation leads to `dest`
	/// - [`AnimatorError::UnknownFrameSeries`], [`AnimatorError::UnknownAnimation`]
	///   or [`AnimatorError::EmptyFrameSeries`] for broken catalog references;
	///   the previous animation keeps playing
	/// - [`AnimatorError::ChangeTimedOut`] if the timeout elapsed
	pub fn change_animation(&self, dest: &str) -> Result<(), AnimatorError> {
		self.request_change(dest, self.config.change_timeout())
	}

	/// Like [`change_animation`](Self::change_animation), but gives up after
	/// `timeout`. On timeout the change is cancelled and the current
	/// animation keeps playing.
	///
	/// # Errors
	///
	/// See [`change_animation`](Self::change_animation).
	pub fn change_animation_timeout(&self, dest: &str, timeout: Duration) -> Result<(), AnimatorError> {
		self.request_change(dest, Some(timeout))
	}

	/// Returns the names of all animations in catalog order.
	pub fn animation_names(&self) -> Vec<String> {
		self.shared.catalog.animation_names()
	}

	/// Returns true while the render thread is producing frames.
	pub fn is_running(&self) -> bool {
		self.shared.lock().running
	}

	/// Returns the name of the active animation, if the animator was started.
	pub fn current_animation(&self) -> Option<String> {
		self.shared.lock().playback.as_ref().map(|playback| playback.animation_name().to_string())
	}

	/// Returns the playback state, if the animator was started.
	pub fn playback_state(&self) -> Option<PlaybackState> {
		self.shared.lock().playback.as_ref().map(Playback::state)
	}

	/// Returns the number of frames presented since creation.
	pub fn presented_frames(&self) -> u64 {
		self.shared.presented.load(Ordering::Relaxed)
	}

	/// Returns the number of frames dropped since creation.
	pub fn dropped_frames(&self) -> u64 {
		self.shared.dropped.load(Ordering::Relaxed)
	}

	/// Runs `f` on the surface while no render thread owns it.
	///
	/// Returns `None` while the animator is running.
	pub fn with_surface<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
		self.lock_surface().as_mut().map(f)
	}

	/// Stops the animator and returns its surface.
	///
	/// Returns `None` if the render thread panicked.
	pub fn into_surface(mut self) -> Option<S> {
		if let Err(err) = self.join() {
			debug!("Render loop ended with: {err}");
		}
		self.surface.get_mut().unwrap_or_else(PoisonError::into_inner).take()
	}

	fn request_change(&self, dest: &str, timeout: Option<Duration>) -> Result<(), AnimatorError> {
		let (id, receiver) = {
			let mut state = self.shared.lock();
			if !state.running {
				return Err(AnimatorError::NotRunning);
			}
			if state.pending.is_some() {
				return Err(AnimatorError::ChangeAlreadyInProgress);
			}
			let Some(playback) = state.playback.as_mut() else {
				return Err(AnimatorError::NotRunning);
			};
			if playback.request_change(dest)? == ChangeRequest::Unchanged {
				return Ok(());
			}

			let (reply, receiver) = mpsc::sync_channel(1);
			state.next_request += 1;
			let id = state.next_request;
			state.pending = Some(PendingChange {
				id,
				reply,
			});
			(id, receiver)
		};

		debug!("Waiting for the change to '{dest}'");
		let result = match timeout {
			None => receiver.recv().unwrap_or(Err(AnimatorError::NotRunning)),
			Some(timeout) => match receiver.recv_timeout(timeout) {
				Ok(result) => result,
				Err(RecvTimeoutError::Timeout) => self.shared.withdraw_change(id, dest, &receiver),
				Err(RecvTimeoutError::Disconnected) => Err(AnimatorError::NotRunning),
			},
		};

		match &result {
			Ok(()) => debug!("Changed animation to '{dest}'"),
			Err(err) => debug!("Change to '{dest}' failed: {err}"),
		}
		result
	}

	fn reap(&self, handle: JoinHandle<RenderOutcome<S>>) -> Result<RenderStats, AnimatorError> {
		let (surface, result) = handle.join().map_err(|_| AnimatorError::RenderLoopPanicked)?;
		*self.lock_surface() = Some(surface);
		Ok(result?)
	}

	fn lock_surface(&self) -> MutexGuard<'_, Option<S>> {
		self.surface.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl<S: PaintSurface + Send + 'static> Drop for Animator<S> {
	fn drop(&mut self) {
		if let Err(err) = self.join() {
			debug!("Render loop ended with: {err}");
		}
	}
}
