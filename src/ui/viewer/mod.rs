// SPDX-License-Identifier: MPL-2.0
//! Panorama viewer module: state, update logic, and rendering.

pub mod component;
pub mod pane;
pub mod subcomponents;
