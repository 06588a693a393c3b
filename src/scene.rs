// SPDX-License-Identifier: MPL-2.0
//! Scene composition for the panorama view.
//!
//! The composer produces a declarative description of what should be on
//! screen: one background sphere carrying the current texture and tint, and
//! one navigation marker per registered panorama. It does not rasterize;
//! the viewer pane draws a 2D projection of this description with the Iced
//! canvas.

use crate::loader::TextureData;
use crate::panorama_navigation::PanoramaNavigator;
use crate::ui::viewer::subcomponents::control_source::Orientation;
use glam::{Quat, Vec3};
use iced::{Point, Size};

/// Vertical field of view of the projection, in radians.
pub const FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;

/// Background sphere node: the current equirectangular texture, if any,
/// plus the brightness multiplier applied as a uniform tint.
#[derive(Debug, Clone)]
pub struct Background {
    pub texture: Option<TextureData>,
    pub tint: f32,
}

/// Clickable proxy for one panorama source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerNode {
    pub source_index: usize,
    pub position: Vec3,
}

/// Renderable scene handed to the pane.
#[derive(Debug, Clone)]
pub struct SceneDescription {
    pub background: Background,
    /// One node per source in registry order. The node for the current
    /// index is present but must not be rendered.
    pub markers: Vec<MarkerNode>,
    /// Index whose marker is skipped when drawing.
    pub current_index: usize,
}

impl SceneDescription {
    /// Composes the scene from navigator state, the current texture, and the
    /// brightness multiplier.
    #[must_use]
    pub fn compose(
        navigator: &PanoramaNavigator,
        texture: Option<&TextureData>,
        brightness_multiplier: f32,
    ) -> Self {
        let markers = navigator
            .marker_positions()
            .iter()
            .enumerate()
            .map(|(source_index, position)| MarkerNode {
                source_index,
                position: *position,
            })
            .collect();

        Self {
            background: Background {
                texture: texture.cloned(),
                tint: brightness_multiplier,
            },
            markers,
            current_index: navigator.current_index(),
        }
    }

    /// Markers that should actually be drawn.
    pub fn visible_markers(&self) -> impl Iterator<Item = &MarkerNode> {
        let current = self.current_index;
        self.markers
            .iter()
            .filter(move |marker| marker.source_index != current)
    }
}

/// Projects a world position into widget coordinates for the given viewing
/// direction.
///
/// Returns `None` when the point is behind the camera. The camera sits at
/// the origin and looks down -Z at zero yaw/pitch, y-up.
#[must_use]
pub fn project(position: Vec3, orientation: Orientation, bounds: Size) -> Option<Point> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }

    let rotation = Quat::from_euler(
        glam::EulerRot::YXZ,
        orientation.yaw,
        orientation.pitch,
        0.0,
    );
    let view = rotation.inverse() * position;

    if view.z >= -f32::EPSILON {
        return None;
    }

    let aspect = bounds.width / bounds.height;
    let half_fov_tan = (FOV_Y / 2.0).tan();

    let ndc_x = view.x / (-view.z * half_fov_tan * aspect);
    let ndc_y = view.y / (-view.z * half_fov_tan);

    Some(Point::new(
        (ndc_x + 1.0) * 0.5 * bounds.width,
        (1.0 - ndc_y) * 0.5 * bounds.height,
    ))
}
