// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for marker placement and scene composition.
//!
//! Measures the cost of regenerating the random marker shell on navigation
//! and of projecting markers into screen space per frame.

use criterion::{criterion_group, criterion_main, Criterion};
use pano_lens::panorama_navigation::PanoramaNavigator;
use pano_lens::scene::{self, SceneDescription};
use pano_lens::ui::viewer::subcomponents::control_source::Orientation;
use pano_lens::ui::viewer::subcomponents::markers;
use std::hint::black_box;

fn bench_random_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("marker_placement");

    for count in [6usize, 64, 512] {
        group.bench_function(format!("random_positions_{count}"), |b| {
            b.iter(|| black_box(markers::random_positions(count)));
        });
    }

    group.finish();
}

fn bench_scene_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_projection");

    let mut navigator = PanoramaNavigator::new(64);
    navigator.start_load();
    let scene_description = SceneDescription::compose(&navigator, None, 1.3);
    let orientation = Orientation {
        yaw: 0.7,
        pitch: -0.2,
    };
    let bounds = iced::Size::new(1920.0, 1080.0);

    group.bench_function("project_visible_markers", |b| {
        b.iter(|| {
            for marker in scene_description.visible_markers() {
                black_box(scene::project(marker.position, orientation, bounds));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_random_positions, bench_scene_projection);
criterion_main!(benches);
