// SPDX-License-Identifier: MPL-2.0
//! User interface components following the Elm-style
//! "state down, messages up" pattern.
//!
//! - [`viewer`] - Panorama viewer with orbit controls, markers, and the
//!   loading overlay

pub mod viewer;
