//! Benchmark suite for the packed pixmap codec
//!
//! Measures run-length packing, unpacking and blitting onto a framebuffer
//! for display-sized and sprite-sized images.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use chanim_benches::{noise, solid, sprite};
use chanim_types::{
	geometry::Point,
	paint::{MemorySurface, PaintSurface},
	pixmap::{PackedPixmap, PixelFormat, Pixmap},
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const FORMAT: PixelFormat = PixelFormat::Rgb16;

fn inputs() -> Vec<(&'static str, Pixmap)> {
	vec![
		("solid_1024x600", solid(1024, 600, FORMAT)),
		("sprite_256x256", sprite(256, 256, FORMAT)),
		("sprite_1024x600", sprite(1024, 600, FORMAT)),
		("noise_256x256", noise(256, 256, FORMAT)),
	]
}

fn pixels(pixmap: &Pixmap) -> u64 {
	(pixmap.width() * pixmap.height()) as u64
}

fn bench_pack(c: &mut Criterion) {
	let mut group = c.benchmark_group("packed_pixmap_pack");

	for (name, pixmap) in inputs() {
		group.throughput(Throughput::Elements(pixels(&pixmap)));
		group.bench_with_input(BenchmarkId::new("pack", name), &pixmap, |b, pixmap| {
			b.iter(|| PackedPixmap::pack(black_box(pixmap)));
		});
	}

	group.finish();
}

fn bench_unpack(c: &mut Criterion) {
	let mut group = c.benchmark_group("packed_pixmap_unpack");

	for (name, pixmap) in inputs() {
		let packed = PackedPixmap::pack(&pixmap);
		group.throughput(Throughput::Elements(pixels(&pixmap)));
		group.bench_with_input(BenchmarkId::new("unpack", name), &packed, |b, packed| {
			b.iter(|| black_box(packed).unpack());
		});
		group.bench_with_input(BenchmarkId::new("check", name), &packed, |b, packed| {
			b.iter(|| black_box(packed).check());
		});
	}

	group.finish();
}

/// Direct run blitting versus unpacking first
fn bench_blit(c: &mut Criterion) {
	let mut group = c.benchmark_group("packed_pixmap_blit");
	let mut surface = MemorySurface::new(1024, 600, FORMAT);

	for (name, pixmap) in inputs() {
		let packed = PackedPixmap::pack(&pixmap);
		group.throughput(Throughput::Elements(pixels(&pixmap)));

		group.bench_with_input(BenchmarkId::new("packed", name), &packed, |b, packed| {
			b.iter(|| {
				surface.begin().ok();
				let result = surface.draw_packed_pixmap(Point::new(16, 16), black_box(packed));
				surface.end().ok();
				black_box(result)
			});
		});

		group.bench_with_input(BenchmarkId::new("pixmap", name), &pixmap, |b, pixmap| {
			b.iter(|| {
				surface.begin().ok();
				let result = surface.draw_pixmap(Point::new(16, 16), black_box(pixmap));
				surface.end().ok();
				black_box(result)
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_pack, bench_unpack, bench_blit);
criterion_main!(benches);
