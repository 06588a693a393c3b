// SPDX-License-Identifier: MPL-2.0
//! Panorama source registry.
//!
//! The set of selectable panoramas is fixed at compile time. The registry is
//! owned by the hosting view and passed down explicitly; there is no
//! process-wide source list.

use std::borrow::Cow;

/// Identifier for one selectable panoramic image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// Short display name, shown in the viewer chrome.
    pub id: Cow<'static, str>,
    /// Where the equirectangular asset lives: a local path or an http(s) URL.
    pub location: Cow<'static, str>,
}

impl ImageSource {
    #[must_use]
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        location: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
        }
    }
}

/// Built-in panorama assets, in presentation order.
const BUILTIN_SOURCES: &[ImageSource] = &[
    ImageSource {
        id: Cow::Borrowed("harbor"),
        location: Cow::Borrowed("assets/panoramas/harbor.png"),
    },
    ImageSource {
        id: Cow::Borrowed("forest"),
        location: Cow::Borrowed("assets/panoramas/forest.png"),
    },
    ImageSource {
        id: Cow::Borrowed("rooftop"),
        location: Cow::Borrowed("assets/panoramas/rooftop.png"),
    },
    ImageSource {
        id: Cow::Borrowed("atrium"),
        location: Cow::Borrowed("assets/panoramas/atrium.png"),
    },
    ImageSource {
        id: Cow::Borrowed("canyon"),
        location: Cow::Borrowed("assets/panoramas/canyon.png"),
    },
    ImageSource {
        id: Cow::Borrowed("night-market"),
        location: Cow::Borrowed("assets/panoramas/night-market.png"),
    },
];

/// Fixed ordered list of [`ImageSource`] entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRegistry {
    entries: Vec<ImageSource>,
}

impl SourceRegistry {
    /// Registry backed by the compiled-in panorama list.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_SOURCES.to_vec(),
        }
    }

    /// Registry over an arbitrary slice, used by tests and embedding hosts.
    #[must_use]
    pub fn from_slice(entries: &[ImageSource]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageSource> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageSource> {
        self.entries.iter()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
