// SPDX-License-Identifier: MPL-2.0
//! Loading-progress overlay sub-component.
//!
//! The overlay appears whenever a texture load starts and disappears a fixed
//! delay after progress reaches 100. The delayed dismissal carries the load
//! generation it was scheduled for, so a navigation that starts a new load
//! cancels any dismissal still in flight for the previous one.

use std::time::Duration;

/// Delay between progress reaching 100 and the overlay disappearing.
pub const DISMISS_DELAY: Duration = Duration::from_millis(1500);

/// Overlay visibility state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    visible: bool,
    /// Load generation for which a dismissal is currently scheduled.
    pending_dismiss: Option<u64>,
}

/// Effects produced by overlay transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The caller should schedule a dismissal for this generation after
    /// [`DISMISS_DELAY`].
    ScheduleDismiss(u64),
}

impl State {
    /// A load just started: show the overlay and drop any dismissal
    /// scheduled for an earlier load.
    pub fn load_started(&mut self) {
        self.visible = true;
        self.pending_dismiss = None;
    }

    /// Progress for `generation` reached 100 (success or failure alike).
    pub fn progress_complete(&mut self, generation: u64) -> Effect {
        self.pending_dismiss = Some(generation);
        Effect::ScheduleDismiss(generation)
    }

    /// The scheduled dismissal for `generation` fired.
    ///
    /// Returns `true` if the overlay was hidden; a stale generation leaves
    /// the state untouched.
    pub fn dismiss_elapsed(&mut self, generation: u64) -> bool {
        if self.pending_dismiss == Some(generation) {
            self.pending_dismiss = None;
            self.visible = false;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_started_shows_overlay() {
        let mut state = State::default();
        state.load_started();
        assert!(state.is_visible());
    }

    #[test]
    fn dismiss_hides_overlay_after_completion() {
        let mut state = State::default();
        state.load_started();

        let effect = state.progress_complete(1);
        assert_eq!(effect, Effect::ScheduleDismiss(1));
        assert!(state.is_visible());

        assert!(state.dismiss_elapsed(1));
        assert!(!state.is_visible());
    }

    #[test]
    fn new_load_cancels_pending_dismiss() {
        let mut state = State::default();
        state.load_started();
        state.progress_complete(1);

        // Navigation starts a new load before the old dismissal fires.
        state.load_started();

        assert!(!state.dismiss_elapsed(1));
        assert!(state.is_visible());
    }

    #[test]
    fn stale_dismiss_after_new_completion_is_ignored() {
        let mut state = State::default();
        state.load_started();
        state.progress_complete(1);
        state.load_started();
        state.progress_complete(2);

        assert!(!state.dismiss_elapsed(1));
        assert!(state.is_visible());
        assert!(state.dismiss_elapsed(2));
        assert!(!state.is_visible());
    }
}
