// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_rs::{Rgba, RgbaImage};
use std::hint::black_box;
use stiloz::domain::crop::{apply_drag, apply_resize, init_crop_box, Corner, ImageBounds, NativePoint};
use stiloz::domain::raster::RasterFormat;
use stiloz::media::{crop_and_resample, SourceImage};

fn gradient(width: u32, height: u32) -> SourceImage {
    SourceImage::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

fn geometry_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_geometry");
    let bounds = ImageBounds::new(4000, 3000);
    let crop = init_crop_box(4000, 3000);

    group.bench_function("drag_and_resize_step", |b| {
        b.iter(|| {
            let moved = apply_drag(black_box(crop), 12.5, -7.25, bounds);
            black_box(apply_resize(
                moved,
                Corner::BottomRight,
                NativePoint::new(3500.0, 2600.0),
                bounds,
            ))
        });
    });

    group.finish();
}

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_and_resample");
    group.sample_size(20);
    let source = gradient(2048, 1536);
    let crop = init_crop_box(source.width(), source.height());

    group.bench_function("commit_jpeg_2048", |b| {
        b.iter(|| {
            black_box(crop_and_resample(&source, &crop, RasterFormat::Jpeg, 0.9).unwrap());
        });
    });

    group.bench_function("normalize_upload_4k", |b| {
        let upload = gradient(4096, 3072);
        b.iter(|| black_box(upload.clone().normalize_upload(2048)));
    });

    group.finish();
}

criterion_group!(benches, geometry_benchmark, resample_benchmark);
criterion_main!(benches);
