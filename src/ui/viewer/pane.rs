// SPDX-License-Identifier: MPL-2.0
//! Canvas overlay projecting the scene onto the viewer pane.
//!
//! The pane draws the brightness veil and the navigation markers on top of
//! the background texture, and turns pointer gestures into viewer messages:
//! a press over a marker navigates, anywhere else it starts an orbit drag.

use crate::scene::{self, SceneDescription};
use crate::ui::viewer::component::Message;
use crate::ui::viewer::subcomponents::control_source::Orientation;
use iced::widget::canvas::{self, Path, Stroke};
use iced::{mouse, Color, Point, Rectangle, Renderer, Theme};

/// Base marker radius in pixels at distance 1.
const MARKER_RADIUS_SCALE: f32 = 80.0;

/// Extra pixels around a marker that still count as a hit.
const HIT_MARGIN: f32 = 6.0;

const MARKER_FILL: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.35,
};

const MARKER_RING: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.9,
};

/// Translates the brightness multiplier into a uniform veil color.
///
/// Multipliers below 1 darken the scene with a black veil, above 1 lighten
/// it with a white one; exactly 1 needs no veil.
#[must_use]
pub fn tint_veil(multiplier: f32) -> Option<Color> {
    if multiplier < 1.0 {
        let alpha = ((1.0 - multiplier) * 1.25).clamp(0.0, 0.5);
        Some(Color {
            a: alpha,
            ..Color::BLACK
        })
    } else if multiplier > 1.0 {
        let alpha = ((multiplier - 1.0) * 0.45).clamp(0.0, 0.4);
        Some(Color {
            a: alpha,
            ..Color::WHITE
        })
    } else {
        None
    }
}

/// Canvas program drawing one frame of the composed scene.
pub struct PanoramaPane {
    scene: SceneDescription,
    orientation: Orientation,
    dragging: bool,
}

impl PanoramaPane {
    #[must_use]
    pub fn new(scene: SceneDescription, orientation: Orientation, dragging: bool) -> Self {
        Self {
            scene,
            orientation,
            dragging,
        }
    }

    fn marker_radius(distance: f32) -> f32 {
        MARKER_RADIUS_SCALE / distance.max(1.0)
    }

    /// Screen positions of the markers that should be drawn.
    fn projected_markers(&self, bounds: Rectangle) -> Vec<(usize, Point, f32)> {
        self.scene
            .visible_markers()
            .filter_map(|marker| {
                scene::project(marker.position, self.orientation, bounds.size()).map(|point| {
                    (
                        marker.source_index,
                        point,
                        Self::marker_radius(marker.position.length()),
                    )
                })
            })
            .collect()
    }

    fn marker_at(&self, bounds: Rectangle, cursor: Point) -> Option<usize> {
        self.projected_markers(bounds)
            .into_iter()
            .find(|(_, point, radius)| cursor.distance(*point) <= radius + HIT_MARGIN)
            .map(|(index, _, _)| index)
    }
}

impl canvas::Program<Message> for PanoramaPane {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        use iced::widget::Action;

        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                if let Some(index) = self.marker_at(bounds, position) {
                    return Some(Action::publish(Message::MarkerClicked(index)).and_capture());
                }
                Some(Action::publish(Message::OrbitDragStarted(position)).and_capture())
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) if self.dragging => {
                match cursor.position_in(bounds) {
                    Some(position) => {
                        Some(Action::publish(Message::OrbitDragMoved(position)).and_capture())
                    }
                    None => Some(Action::publish(Message::OrbitDragEnded).and_capture()),
                }
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | iced::Event::Mouse(mouse::Event::CursorLeft)
                if self.dragging =>
            {
                Some(Action::publish(Message::OrbitDragEnded).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        if let Some(veil) = tint_veil(self.scene.background.tint) {
            frame.fill_rectangle(Point::ORIGIN, bounds.size(), veil);
        }

        for (_, point, radius) in self.projected_markers(bounds) {
            let disc = Path::circle(point, radius);
            frame.fill(&disc, MARKER_FILL);
            frame.stroke(
                &disc,
                Stroke::default().with_width(2.0).with_color(MARKER_RING),
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if let Some(position) = cursor.position_in(bounds) {
            if self.marker_at(bounds, position).is_some() {
                return mouse::Interaction::Pointer;
            }
            if self.dragging {
                return mouse::Interaction::Grabbing;
            }
            return mouse::Interaction::Grab;
        }
        mouse::Interaction::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panorama_navigation::PanoramaNavigator;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn neutral_brightness_needs_no_veil() {
        assert!(tint_veil(1.0).is_none());
    }

    #[test]
    fn dark_brightness_produces_black_veil() {
        let veil = tint_veil(0.8).expect("veil expected");
        assert_abs_diff_eq!(veil.r, 0.0);
        assert!(veil.a > 0.0);
    }

    #[test]
    fn bright_brightness_produces_white_veil() {
        let veil = tint_veil(1.8).expect("veil expected");
        assert_abs_diff_eq!(veil.r, 1.0);
        assert!(veil.a > 0.0);
    }

    #[test]
    fn current_marker_is_never_projected() {
        let navigator = PanoramaNavigator::new(4);
        let scene = SceneDescription::compose(&navigator, None, 1.0);
        let pane = PanoramaPane::new(scene, Orientation::default(), false);

        let bounds = Rectangle::new(Point::ORIGIN, iced::Size::new(800.0, 600.0));
        assert!(pane
            .projected_markers(bounds)
            .iter()
            .all(|(index, _, _)| *index != 0));
    }

    #[test]
    fn marker_radius_shrinks_with_distance() {
        assert!(PanoramaPane::marker_radius(3.0) > PanoramaPane::marker_radius(5.0));
    }
}
