//! Two-animation state machine demo.
//!
//! A white square moves horizontally (`h`) or vertically (`v`) through the
//! centre of the display, wrapping around at the edges. Every 10th frame of
//! each loop is a transition frame whose transition series slides the square
//! back to the centre, where the other animation starts.
//!
//! Frames are rendered into an in-memory framebuffer; the final picture can be
//! saved as a PNG.
//!
//! # Usage
//!
//! ```bash
//! # Type animation names, empty line to quit
//! cargo run --example simple_sm
//!
//! # Play a fixed list of changes and save the last frame
//! cargo run --example simple_sm -- --dump last.png script v h v
//!
//! # Ten random changes at 50 fps
//! cargo run --example simple_sm -- --frame-rate 50 random --count 10 --seed 7
//! ```

use std::{
	io::{self, BufRead, Write},
	path::PathBuf,
	sync::Arc,
	thread,
	time::Duration,
};

use anyhow::{Context, Result, bail};
use chanim_rs::prelude::*;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use rand::{SeedableRng, rngs::SmallRng, seq::IndexedRandom};

const SQUARE_SIZE: usize = 128;
const STEP: i32 = 5;
const TRANSITION_EVERY: usize = 10;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let mut config = PlayerConfig::load(cli.config.as_deref()).context("Failed to load player config")?;
	if let Some(frame_rate) = cli.frame_rate {
		if frame_rate == 0 {
			bail!("frame-rate must be greater than zero");
		}
		config.frame_rate = frame_rate;
	}

	let display = config.display;
	let stage = Stage::new(display.width, display.height, display.pixel_format)?;
	let catalog = Arc::new(stage.catalog());

	println!("Available animations:");
	for name in catalog.animation_names() {
		println!("\t{name}");
	}
	println!();

	let surface = MemorySurface::new(display.width, display.height, display.pixel_format);
	let animator = Animator::new(catalog, surface, config);
	animator.start("h").context("Failed to start the animator")?;

	match cli.mode.unwrap_or(Mode::Interactive) {
		Mode::Interactive => run_interactive(&animator)?,
		Mode::Script(args) => run_script(&animator, &args.animations, args.hold_ms),
		Mode::Random(args) => run_random(&animator, &args),
	}

	let stats = animator.join().context("Render loop failed")?;
	print_stats(&stats);

	if let Some(path) = cli.dump {
		let surface = animator.into_surface().context("The framebuffer was lost")?;
		surface
			.to_rgba_image()
			.save(&path)
			.with_context(|| format!("Failed to save {}", path.display()))?;
		info!("Saved the last frame to {}", path.display());
	}

	Ok(())
}

#[derive(Parser)]
#[command(name = "simple_sm")]
#[command(author = "chanim-rs project")]
#[command(version)]
#[command(about = "Move a white square around and switch direction on request", long_about = None)]
struct Cli {
	/// Player configuration file (TOML)
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Override the configured frame rate
	#[arg(short, long, value_name = "FPS")]
	frame_rate: Option<u32>,

	/// Save the final framebuffer as a PNG image
	#[arg(short, long, value_name = "PNG")]
	dump: Option<PathBuf>,

	#[command(subcommand)]
	mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
	/// Read animation names from stdin (default)
	Interactive,
	/// Change to each listed animation in turn
	Script(ScriptArgs),
	/// Change to randomly picked animations
	Random(RandomArgs),
}

#[derive(Args)]
struct ScriptArgs {
	/// Animations to change to, in order
	#[arg(value_name = "ANIMATION", required = true)]
	animations: Vec<String>,

	/// Time to keep playing after each change
	#[arg(long, value_name = "MS", default_value_t = 500)]
	hold_ms: u64,
}

#[derive(Args)]
struct RandomArgs {
	/// Number of changes
	#[arg(short = 'n', long, value_name = "COUNT", default_value_t = 10)]
	count: usize,

	/// Seed for reproducible runs
	#[arg(short, long, value_name = "SEED")]
	seed: Option<u64>,

	/// Time to keep playing after each change
	#[arg(long, value_name = "MS", default_value_t = 500)]
	hold_ms: u64,
}

/// Display geometry and the square sprite.
struct Stage {
	width: i32,
	height: i32,
	square: Arc<PackedPixmap>,
}

impl Stage {
	fn new(width: usize, height: usize, format: PixelFormat) -> Result<Self> {
		if width < SQUARE_SIZE || height < SQUARE_SIZE {
			bail!("Display {width}x{height} is smaller than the {SQUARE_SIZE}px square");
		}

		let square = Pixmap::filled(SQUARE_SIZE, SQUARE_SIZE, format, [0xFF, 0xFF, 0xFF, 0xFF]);
		Ok(Self {
			width: i32::try_from(width).context("Display too wide")?,
			height: i32::try_from(height).context("Display too tall")?,
			square: Arc::new(PackedPixmap::pack(&square)),
		})
	}

	fn center(&self) -> Point {
		let half = SQUARE_SIZE as i32 / 2;
		Point::new(self.width / 2 - half, self.height / 2 - half)
	}

	fn frame_at(&self, top_left: Point) -> Frame {
		Frame::default()
			.with_operation(ClearOperation::new(Rect::new(0, 0, self.width, self.height)))
			.with_operation(PackedPixmapOperation::new(top_left, Arc::clone(&self.square)))
	}

	/// Builds both loops and the transition series that bring the square back
	/// to the centre.
	fn catalog(&self) -> Catalog {
		let center = self.center();
		let size = SQUARE_SIZE as i32;

		// Centre to the far edge, then in from the near edge back to the centre.
		let mut xs = slide(center.x, self.width);
		xs.extend(slide(-size + 1, center.x));
		let mut ys = slide(center.y, self.height);
		ys.extend(slide(-size + 1, center.y));

		let horizontal = |x: i32| Point::new(x, center.y);
		let vertical = |y: i32| Point::new(center.x, y);

		let mut h = FrameSeries::new("HFrameSeries", xs.iter().map(|&x| self.frame_at(horizontal(x))).collect());
		let mut v = FrameSeries::new("VFrameSeries", ys.iter().map(|&y| self.frame_at(vertical(y))).collect());

		let mut series = Vec::new();
		for index in (0..xs.len()).step_by(TRANSITION_EVERY) {
			let name = format!("H2V-{index}");
			let frames = slide(xs[index], center.x).into_iter().map(|x| self.frame_at(horizontal(x))).collect();
			h.frames_mut()[index].add_transition(Transition::new("v", name.as_str()));
			series.push(FrameSeries::new(name, frames));
		}
		for index in (0..ys.len()).step_by(TRANSITION_EVERY) {
			let name = format!("V2H-{index}");
			let frames = slide(ys[index], center.y).into_iter().map(|y| self.frame_at(vertical(y))).collect();
			v.frames_mut()[index].add_transition(Transition::new("h", name.as_str()));
			series.push(FrameSeries::new(name, frames));
		}

		let animations = vec![Animation::new("h", h.name()), Animation::new("v", v.name())];
		series.insert(0, v);
		series.insert(0, h);
		Catalog::new(animations, series)
	}
}

/// Positions from `from` towards `to` (exclusive) in `STEP` increments.
fn slide(from: i32, to: i32) -> Vec<i32> {
	if from <= to {
		(from..to).step_by(STEP as usize).collect()
	} else {
		let mut positions: Vec<i32> = (to..from).step_by(STEP as usize).collect();
		positions.reverse();
		positions
	}
}

fn change(animator: &Animator<MemorySurface>, name: &str) {
	match animator.change_animation(name) {
		Ok(()) => info!("Now playing '{name}'"),
		Err(err) => warn!("{err}"),
	}
}

fn run_interactive(animator: &Animator<MemorySurface>) -> Result<()> {
	let stdin = io::stdin();
	let mut lines = stdin.lock().lines();
	loop {
		print!("animation -> ");
		io::stdout().flush()?;

		let Some(line) = lines.next() else {
			return Ok(());
		};
		let name = line.context("Failed to read stdin")?;
		let name = name.trim();
		if name.is_empty() {
			return Ok(());
		}
		change(animator, name);
	}
}

fn run_script(animator: &Animator<MemorySurface>, animations: &[String], hold_ms: u64) {
	for name in animations {
		change(animator, name);
		thread::sleep(Duration::from_millis(hold_ms));
	}
}

fn run_random(animator: &Animator<MemorySurface>, args: &RandomArgs) {
	let mut rng = match args.seed {
		Some(seed) => SmallRng::seed_from_u64(seed),
		None => SmallRng::from_os_rng(),
	};

	let names = animator.animation_names();
	for _ in 0..args.count {
		if let Some(name) = names.choose(&mut rng) {
			change(animator, name);
		}
		thread::sleep(Duration::from_millis(args.hold_ms));
	}
}

fn print_stats(stats: &RenderStats) {
	let total = stats.presented + stats.dropped;
	println!("---------------------------");
	println!("Presented frames: {}", stats.presented);
	println!("Dropped frames:   {}", stats.dropped);
	if total > 0 {
		println!("Drop rate:        {:.1}%", stats.dropped as f64 * 100.0 / total as f64);
	}
}
