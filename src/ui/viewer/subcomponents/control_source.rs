// SPDX-License-Identifier: MPL-2.0
//! Camera control sources.
//!
//! The viewer orbits the camera either from pointer drags or from an
//! orientation sensor. Which source is active is decided once per
//! permission change, from a capability probe plus the user-granted
//! permission flag, rather than by branching on host globals at use sites.

use iced::Point;

/// Radians of yaw/pitch per pixel of pointer drag.
const ROTATE_SPEED: f32 = 0.005;

/// Pitch limit just short of the poles, in radians.
const PITCH_LIMIT: f32 = 1.5;

/// Current viewing direction shared by both control variants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Horizontal angle in radians. 0 looks down -Z.
    pub yaw: f32,
    /// Vertical angle in radians, clamped to avoid pole flip.
    pub pitch: f32,
}

impl Orientation {
    fn clamped(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }
}

/// Capability probe for an orientation sensor on the host.
pub trait OrientationProbe {
    /// Whether the host exposes a usable orientation sensor.
    fn is_available(&self) -> bool;
}

/// Probe for desktop hosts, where no orientation sensor is exposed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProbe;

impl OrientationProbe for HostProbe {
    fn is_available(&self) -> bool {
        false
    }
}

/// Probe result captured once and replayed on later re-selection, so a
/// permission change does not re-query the host.
#[derive(Debug, Clone, Copy)]
pub struct ProbedCapability(pub bool);

impl OrientationProbe for ProbedCapability {
    fn is_available(&self) -> bool {
        self.0
    }
}

/// Drag-to-orbit control, the desktop default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerOrbitControl {
    orientation: Orientation,
    drag_origin: Option<Point>,
}

impl PointerOrbitControl {
    pub fn begin_drag(&mut self, at: Point) {
        self.drag_origin = Some(at);
    }

    /// Applies the pointer delta since the last drag position, if dragging.
    pub fn drag_to(&mut self, at: Point) {
        if let Some(origin) = self.drag_origin {
            let yaw = self.orientation.yaw + (at.x - origin.x) * ROTATE_SPEED;
            let pitch = self.orientation.pitch + (at.y - origin.y) * ROTATE_SPEED;
            self.orientation = Orientation::clamped(yaw, pitch);
            self.drag_origin = Some(at);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }
}

/// Sensor-driven control, fed absolute orientation samples by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationControl {
    orientation: Orientation,
}

impl OrientationControl {
    pub fn apply_sample(&mut self, yaw: f32, pitch: f32) {
        self.orientation = Orientation::clamped(yaw, pitch);
    }
}

/// The active control source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlSource {
    PointerOrbit(PointerOrbitControl),
    Orientation(OrientationControl),
}

impl ControlSource {
    /// Selects the control source from the capability probe and the
    /// user-granted permission flag. The sensor is used only when both hold.
    #[must_use]
    pub fn select(probe: &dyn OrientationProbe, permission_granted: bool) -> Self {
        if probe.is_available() && permission_granted {
            ControlSource::Orientation(OrientationControl::default())
        } else {
            ControlSource::PointerOrbit(PointerOrbitControl::default())
        }
    }

    /// Current viewing direction.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        match self {
            ControlSource::PointerOrbit(control) => control.orientation,
            ControlSource::Orientation(control) => control.orientation,
        }
    }
}

impl Default for ControlSource {
    fn default() -> Self {
        ControlSource::PointerOrbit(PointerOrbitControl::default())
    }
}
