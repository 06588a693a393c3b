// SPDX-License-Identifier: MPL-2.0
//! Viewer sub-components, each owning one slice of state.

pub mod brightness;
pub mod control_source;
pub mod markers;
pub mod overlay;
