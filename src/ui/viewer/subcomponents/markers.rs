// SPDX-License-Identifier: MPL-2.0
//! Random placement of navigation markers around the viewer.
//!
//! One position is produced per registered panorama, in registry order. The
//! layout is recomputed wholesale on every navigation; there is no seed and
//! no collision avoidance. The entry for the currently displayed panorama is
//! present in the sequence but never rendered.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Minimum marker distance from the viewer.
pub const MIN_RADIUS: f32 = 3.0;
/// Exclusive upper bound on marker distance from the viewer.
pub const MAX_RADIUS: f32 = 5.0;

/// Converts spherical coordinates (y-up) to a Cartesian position.
#[must_use]
pub fn spherical_to_cartesian(azimuth: f32, polar: f32, radius: f32) -> Vec3 {
    Vec3::new(
        radius * polar.sin() * azimuth.cos(),
        radius * polar.cos(),
        radius * polar.sin() * azimuth.sin(),
    )
}

/// Generates one random position per source.
///
/// Azimuth is uniform in `[0, 2π)`, polar angle uniform in `[0, π)`, radius
/// uniform in `[3, 5)`.
#[must_use]
pub fn random_positions(count: usize) -> Vec<Vec3> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let azimuth = rng.random_range(0.0..TAU);
            let polar = rng.random_range(0.0..PI);
            let radius = rng.random_range(MIN_RADIUS..MAX_RADIUS);
            spherical_to_cartesian(azimuth, polar, radius)
        })
        .collect()
}
