// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::types::{Gaps, SplitDirection};

/// How close to an edge (as a fraction of the target) a drop has to land to split it.
pub const DEFAULT_DROP_SENSITIVITY: f64 = 1.0 / 3.0;

/// The smallest extent interactive resizing leaves a tile with, in pixels.
pub const DEFAULT_MIN_RESIZE_EXTENT: i32 = 50;

/// Tunables for a tiled workspace grid.
///
/// Loading these from a configuration file is up to the embedder; with the
/// `serde` feature every field is optional and falls back to its default.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TileOptions {
    /// Direction of the root split created for every workspace cell.
    pub default_split: SplitDirection,
    /// Gaps around and between tiled views.
    pub gaps: Gaps,
    /// Edge fraction within which a drop splits the target.
    pub drop_sensitivity: f64,
    /// Minimum extent kept by interactive resizing.
    pub min_resize_extent: i32,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            default_split: SplitDirection::Vertical,
            gaps: Gaps::default(),
            drop_sensitivity: DEFAULT_DROP_SENSITIVITY,
            min_resize_extent: DEFAULT_MIN_RESIZE_EXTENT,
        }
    }
}
