// SPDX-License-Identifier: MPL-2.0
//! Panorama navigation state machine.
//!
//! `PanoramaNavigator` owns which panorama is displayed, the load progress of
//! that panorama, and the marker layout used to jump elsewhere. It is created
//! when the viewer mounts, mutated only through the transitions below, and
//! discarded on unmount; nothing here is persisted.
//!
//! Every load carries a monotonically increasing generation. The generation
//! doubles as the cancellation token for the delayed overlay dismissal: a
//! navigation that supersedes a load leaves any late timer for the old
//! generation without effect.

use crate::ui::viewer::subcomponents::markers;
use glam::Vec3;

/// Load phase of the current panorama.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Constructed but no load issued yet.
    Idle,
    /// Texture fetch in flight, progress in `[0, 100]`.
    Loading { progress: u8 },
    /// Texture fetch settled and the overlay has been dismissed.
    Loaded,
}

/// Navigation state machine over a fixed list of panorama sources.
#[derive(Debug, Clone, PartialEq)]
pub struct PanoramaNavigator {
    source_count: usize,
    current_index: usize,
    previous_index: Option<usize>,
    phase: LoadPhase,
    load_generation: u64,
    marker_positions: Vec<Vec3>,
}

impl PanoramaNavigator {
    /// Creates the navigator on source 0 with a fresh marker layout.
    ///
    /// The machine starts in [`LoadPhase::Idle`]; the hosting component calls
    /// [`Self::start_load`] as soon as the first fetch is issued.
    #[must_use]
    pub fn new(source_count: usize) -> Self {
        Self {
            source_count,
            current_index: 0,
            previous_index: None,
            phase: LoadPhase::Idle,
            load_generation: 0,
            marker_positions: markers::random_positions(source_count),
        }
    }

    /// Marks the initial load of the current panorama as started.
    pub fn start_load(&mut self) {
        self.phase = LoadPhase::Loading { progress: 0 };
    }

    /// Navigates to `new_index`.
    ///
    /// Selecting the active index (or an index outside the registry) is a
    /// no-op and returns `None`. Otherwise the previous index is recorded,
    /// progress resets, the marker layout is regenerated wholesale, and the
    /// new load generation is returned.
    pub fn select_target(&mut self, new_index: usize) -> Option<u64> {
        if new_index == self.current_index || new_index >= self.source_count {
            return None;
        }

        self.previous_index = Some(self.current_index);
        self.current_index = new_index;
        self.phase = LoadPhase::Loading { progress: 0 };
        self.load_generation += 1;
        self.marker_positions = markers::random_positions(self.source_count);
        Some(self.load_generation)
    }

    /// Records loader progress for the active load.
    ///
    /// `percent` is clamped to 100. The loader is expected, not required, to
    /// report monotonically; values are stored as delivered. Ignored outside
    /// the `Loading` phase.
    pub fn report_progress(&mut self, percent: u8) {
        if matches!(self.phase, LoadPhase::Loading { .. }) {
            self.phase = LoadPhase::Loading {
                progress: percent.min(100),
            };
        }
    }

    /// Completes the load for `generation` after the overlay delay elapsed.
    ///
    /// Returns `true` when the machine moved to `Loaded`; a stale generation
    /// or an unfinished load leaves the state untouched.
    pub fn finish_load(&mut self, generation: u64) -> bool {
        if generation == self.load_generation
            && matches!(self.phase, LoadPhase::Loading { progress: 100 })
        {
            self.phase = LoadPhase::Loaded;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.previous_index
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Progress of the active load; 100 once the load settled.
    #[must_use]
    pub fn progress(&self) -> u8 {
        match self.phase {
            LoadPhase::Idle => 0,
            LoadPhase::Loading { progress } => progress,
            LoadPhase::Loaded => 100,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading { .. })
    }

    /// Generation token of the active load.
    #[must_use]
    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }

    /// Marker positions, one per source in registry order.
    #[must_use]
    pub fn marker_positions(&self) -> &[Vec3] {
        &self.marker_positions
    }

    #[must_use]
    pub fn source_count(&self) -> usize {
        self.source_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loading_navigator(count: usize) -> PanoramaNavigator {
        let mut navigator = PanoramaNavigator::new(count);
        navigator.start_load();
        navigator
    }

    #[test]
    fn new_navigator_starts_on_first_source() {
        let navigator = PanoramaNavigator::new(6);
        assert_eq!(navigator.current_index(), 0);
        assert_eq!(navigator.previous_index(), None);
        assert_eq!(navigator.phase(), LoadPhase::Idle);
        assert_eq!(navigator.marker_positions().len(), 6);
    }

    #[test]
    fn select_target_updates_indices_and_resets_progress() {
        let mut navigator = loading_navigator(8);
        navigator.report_progress(70);

        let generation = navigator.select_target(3);

        assert_eq!(generation, Some(1));
        assert_eq!(navigator.current_index(), 3);
        assert_eq!(navigator.previous_index(), Some(0));
        assert_eq!(navigator.phase(), LoadPhase::Loading { progress: 0 });
    }

    #[test]
    fn selecting_active_index_is_a_no_op() {
        let mut navigator = loading_navigator(8);
        navigator.report_progress(40);
        let before = navigator.clone();

        assert_eq!(navigator.select_target(0), None);
        assert_eq!(navigator, before);
    }

    #[test]
    fn selecting_out_of_range_index_is_a_no_op() {
        let mut navigator = loading_navigator(4);
        let before = navigator.clone();

        assert_eq!(navigator.select_target(4), None);
        assert_eq!(navigator, before);
    }

    #[test]
    fn select_target_regenerates_marker_layout_length() {
        let mut navigator = loading_navigator(5);
        navigator.select_target(2);
        assert_eq!(navigator.marker_positions().len(), 5);
    }

    #[test]
    fn report_progress_clamps_to_100() {
        let mut navigator = loading_navigator(3);
        navigator.report_progress(250);
        assert_eq!(navigator.progress(), 100);
    }

    #[test]
    fn report_progress_outside_loading_is_ignored() {
        let mut navigator = loading_navigator(3);
        navigator.report_progress(100);
        assert!(navigator.finish_load(0));

        navigator.report_progress(30);
        assert_eq!(navigator.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn finish_load_requires_full_progress() {
        let mut navigator = loading_navigator(3);
        navigator.report_progress(80);
        assert!(!navigator.finish_load(0));
        assert!(navigator.is_loading());
    }

    #[test]
    fn finish_load_rejects_stale_generation() {
        let mut navigator = loading_navigator(4);
        navigator.report_progress(100);

        // Navigation supersedes the pending completion.
        let generation = navigator.select_target(2).expect("valid target");
        navigator.report_progress(100);

        assert!(!navigator.finish_load(0));
        assert!(navigator.finish_load(generation));
        assert_eq!(navigator.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn machine_cycles_between_loading_and_loaded() {
        let mut navigator = loading_navigator(4);
        navigator.report_progress(100);
        assert!(navigator.finish_load(0));

        let generation = navigator.select_target(1).expect("valid target");
        assert!(navigator.is_loading());
        navigator.report_progress(100);
        assert!(navigator.finish_load(generation));
        assert_eq!(navigator.phase(), LoadPhase::Loaded);
    }
}
