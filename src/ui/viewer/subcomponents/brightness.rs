// SPDX-License-Identifier: MPL-2.0
//! Brightness sub-component: slider state and the percent-to-multiplier mapping.

/// Lowest accepted slider position.
pub const MIN_PERCENT: u8 = 1;
/// Highest accepted slider position.
pub const MAX_PERCENT: u8 = 100;

const MIN_MULTIPLIER: f32 = 0.8;
const MAX_MULTIPLIER: f32 = 1.8;

/// Maps a slider percentage to a rendering brightness multiplier.
///
/// Linear over `[0.8, 1.8]`, monotonic, no side effects.
#[must_use]
pub fn multiplier(percent: u8) -> f32 {
    MIN_MULTIPLIER + (f32::from(percent) / 100.0) * (MAX_MULTIPLIER - MIN_MULTIPLIER)
}

/// Brightness slider state, independent of navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    percent: u8,
}

impl State {
    /// Creates the slider at the given position, clamped to `[1, 100]`.
    #[must_use]
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.clamp(MIN_PERCENT, MAX_PERCENT),
        }
    }

    /// Current slider position.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Current multiplier applied to the background tint.
    #[must_use]
    pub fn multiplier(&self) -> f32 {
        multiplier(self.percent)
    }

    /// Moves the slider, clamping to the accepted range.
    pub fn set_percent(&mut self, percent: u8) {
        self.percent = percent.clamp(MIN_PERCENT, MAX_PERCENT);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BRIGHTNESS_PERCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    #[test]
    fn mapping_matches_reference_points() {
        assert_abs_diff_eq!(multiplier(1), 0.81, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(multiplier(50), 1.3, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(multiplier(100), 1.8, epsilon = F32_EPSILON);
    }

    #[test]
    fn mapping_is_monotonic() {
        let mut previous = multiplier(MIN_PERCENT);
        for percent in (MIN_PERCENT + 1)..=MAX_PERCENT {
            let current = multiplier(percent);
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn set_percent_clamps_to_range() {
        let mut state = State::new(50);
        state.set_percent(0);
        assert_eq!(state.percent(), MIN_PERCENT);
        state.set_percent(200);
        assert_eq!(state.percent(), MAX_PERCENT);
    }

    #[test]
    fn new_clamps_out_of_range_input() {
        assert_eq!(State::new(0).percent(), MIN_PERCENT);
        assert_eq!(State::new(255).percent(), MAX_PERCENT);
    }
}
