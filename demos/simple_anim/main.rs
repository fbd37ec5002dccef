//! Single looping animation demo.
//!
//! Every `*.ppixmap` file in a directory becomes one frame, in file name
//! order, of a single animation called `init`. The animation is looped onto
//! an in-memory framebuffer with no state changes; the player statistics are
//! printed when playback ends.
//!
//! # Usage
//!
//! ```bash
//! # Pack some PNG frames first
//! cargo run --example repack -- -i assets/frames -o assets/packed
//!
//! # Loop them until Enter is pressed
//! cargo run --example simple_anim -- assets/packed
//!
//! # Loop for five seconds and keep the last frame
//! cargo run --example simple_anim -- assets/packed --seconds 5 --dump last.png
//! ```

use std::{
	io,
	path::{Path, PathBuf},
	sync::Arc,
	thread,
	time::Duration,
};

use anyhow::{Context, Result, bail};
use chanim_rs::prelude::*;
use clap::Parser;
use log::info;
use walkdir::WalkDir;

const ANIMATION: &str = "init";
const SERIES: &str = "TestFrameSeries";

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let config = PlayerConfig::load(cli.config.as_deref()).context("Failed to load player config")?;

	let frames = load_frames(&cli.input_dir)?;
	info!("Loaded {} frames from {}", frames.len(), cli.input_dir.display());

	let catalog = Catalog::new(vec![Animation::new(ANIMATION, SERIES)], vec![FrameSeries::new(SERIES, frames)]);
	let display = config.display;
	let surface = MemorySurface::new(display.width, display.height, display.pixel_format);

	let animator = Animator::new(Arc::new(catalog), surface, config);
	animator.start(ANIMATION).context("Failed to start the animator")?;

	match cli.seconds {
		Some(seconds) => thread::sleep(Duration::from_secs(seconds)),
		None => {
			println!("Press Enter to stop");
			io::stdin().read_line(&mut String::new()).context("Failed to read stdin")?;
		}
	}

	let stats = animator.join().context("Render loop failed")?;
	println!("---------------------------");
	println!("Presented frames: {}", stats.presented);
	println!("Dropped frames:   {}", stats.dropped);

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
#[command(name = "simple_anim")]
#[command(author = "chanim-rs project")]
#[command(version)]
#[command(about = "Loop a directory of packed pixmaps as one animation", long_about = None)]
struct Cli {
	/// Directory holding the .ppixmap frames
	#[arg(value_name = "DIR")]
	input_dir: PathBuf,

	/// Player configuration file (TOML)
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Stop after this many seconds instead of waiting for Enter
	#[arg(short, long, value_name = "SECONDS")]
	seconds: Option<u64>,

	/// Save the final framebuffer as a PNG image
	#[arg(short, long, value_name = "PNG")]
	dump: Option<PathBuf>,
}

fn load_frames(dir: &Path) -> Result<Vec<Frame>> {
	let mut frames = Vec::new();
	for entry in WalkDir::new(dir).max_depth(1).sort_by_file_name() {
		let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
		let is_packed = entry.path().extension().is_some_and(|ext| ext == "ppixmap");
		if !entry.file_type().is_file() || !is_packed {
			continue;
		}

		let pixmap = PackedPixmap::open(entry.path())
			.with_context(|| format!("Failed to load {}", entry.path().display()))?;
		frames.push(Frame::default().with_operation(PackedPixmapOperation::new(Point::new(0, 0), Arc::new(pixmap))));
	}

	if frames.is_empty() {
		bail!("No .ppixmap files in {}", dir.display());
	}
	Ok(frames)
}
