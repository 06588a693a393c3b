// SPDX-License-Identifier: MPL-2.0
//! `pano_lens` is a 360-degree panorama viewer built with the Iced GUI
//! framework.
//!
//! It renders equirectangular panoramas with orbit or device-orientation
//! controls, in-scene navigation markers, a loading-progress overlay, and a
//! brightness control, and demonstrates internationalization with Fluent and
//! user preference management.

#![doc(html_root_url = "https://docs.rs/pano_lens/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod panorama_navigation;
pub mod scene;
pub mod sources;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
