//! Converts a tree of PNG images into packed pixmaps.
//!
//! Every `*.png` under the input directory is loaded as RGB16, rotated a
//! quarter turn clockwise (displays are mounted in portrait) unless disabled,
//! run-length packed and written as `.ppixmap` to the same relative path
//! under the output directory.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example repack -- -i assets/frames -o assets/packed
//!
//! # Keep the orientation and start from an empty output directory
//! cargo run --example repack -- -i assets/frames -o assets/packed --no-rotate --clear-output-dir
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use chanim_rs::prelude::*;
use clap::Parser;
use walkdir::WalkDir;

const MIB: f64 = 1024.0 * 1024.0;

fn main() -> Result<()> {
	let cli = Cli::parse();

	let input_dir = cli
		.input_dir
		.canonicalize()
		.with_context(|| format!("Input directory {} does not exist", cli.input_dir.display()))?;
	if !input_dir.is_dir() {
		bail!("{} is not a directory", input_dir.display());
	}

	if cli.clear_output_dir {
		clear_dir(&cli.output_dir)?;
	}

	let mut totals = Totals::default();
	for image in collect_images(&input_dir)? {
		println!("Processing {}", image.display());

		let pixmap = Pixmap::load(&image, PixelFormat::Rgb16)
			.with_context(|| format!("Failed to load {}", image.display()))?;
		totals.unpacked += pixmap.byte_size();

		let pixmap = if cli.no_rotate {
			pixmap
		} else {
			pixmap.rotate_clockwise()
		};

		let packed = PackedPixmap::pack(&pixmap);
		totals.packed += packed.data().len();

		let output = output_path(&input_dir, &cli.output_dir, &image)?;
		if let Some(parent) = output.parent() {
			fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
		}
		packed.save(&output).with_context(|| format!("Failed to write {}", output.display()))?;
		totals.files += 1;
	}

	totals.print();
	Ok(())
}

#[derive(Parser)]
#[command(name = "repack")]
#[command(author = "chanim-rs project")]
#[command(version)]
#[command(about = "Pack PNG images into run-length encoded .ppixmap files", long_about = None)]
struct Cli {
	/// The input directory
	#[arg(short, long, value_name = "DIR")]
	input_dir: PathBuf,

	/// The output directory
	#[arg(short, long, value_name = "DIR")]
	output_dir: PathBuf,

	/// Disable image rotation
	#[arg(short, long)]
	no_rotate: bool,

	/// Clear the output directory first
	#[arg(short, long)]
	clear_output_dir: bool,
}

#[derive(Default)]
struct Totals {
	files: usize,
	unpacked: usize,
	packed: usize,
}

impl Totals {
	fn print(&self) {
		println!("---------------------------");
		println!("Processed files={}", self.files);
		println!("unpackedSize={:.2}M", self.unpacked as f64 / MIB);
		println!("packedSize={:.2}M", self.packed as f64 / MIB);
		if self.packed > 0 {
			println!("unpackedSize/packedSize={:.2}", self.unpacked as f64 / self.packed as f64);
		}
	}
}

fn collect_images(root: &Path) -> Result<Vec<PathBuf>> {
	let mut images = Vec::new();
	for entry in WalkDir::new(root).sort_by_file_name() {
		let entry = entry.with_context(|| format!("Failed to scan {}", root.display()))?;
		let is_png = entry.path().extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
		if entry.file_type().is_file() && is_png {
			images.push(entry.into_path());
		}
	}
	Ok(images)
}

fn output_path(input_dir: &Path, output_dir: &Path, image: &Path) -> Result<PathBuf> {
	let relative = image
		.strip_prefix(input_dir)
		.with_context(|| format!("{} is outside {}", image.display(), input_dir.display()))?;
	Ok(output_dir.join(relative).with_extension("ppixmap"))
}

fn clear_dir(dir: &Path) -> Result<()> {
	if !dir.exists() {
		return Ok(());
	}

	for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
		let path = entry?.path();
		if path.is_dir() {
			fs::remove_dir_all(&path)?;
		} else {
			fs::remove_file(&path)?;
		}
	}
	Ok(())
}
