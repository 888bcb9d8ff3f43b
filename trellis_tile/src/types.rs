// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tiling tree: identifiers, directions, gaps, and edge masks.

use trellis_region::{Dimensions, Point};

/// Identifier for a node in the tiling tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Stable identity of a window, as handed out by the view lifecycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewId(pub u64);

/// The axis along which a split node divides its area.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitDirection {
    /// Children are stacked top to bottom; the height is divided.
    Horizontal,
    /// Children are placed left to right; the width is divided.
    #[default]
    Vertical,
}

/// What a tiling node holds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// An interior node dividing its area among its children.
    Split(SplitDirection),
    /// A leaf wrapping exactly one window.
    View(ViewId),
}

/// Where a dragged view would be inserted relative to a drop target.
///
/// The same values double as directions for adjacent-view lookup.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Insertion {
    /// No valid insertion.
    None,
    /// Above the target.
    Above,
    /// Below the target.
    Below,
    /// Left of the target.
    Left,
    /// Right of the target.
    Right,
}

impl Insertion {
    /// The split direction a new container needs for this insertion, if any.
    pub const fn split_direction(self) -> Option<SplitDirection> {
        match self {
            Self::Left | Self::Right => Some(SplitDirection::Vertical),
            Self::Above | Self::Below => Some(SplitDirection::Horizontal),
            Self::None => None,
        }
    }

    /// Whether the inserted node goes after the target in child order.
    pub const fn is_after(self) -> bool {
        matches!(self, Self::Right | Self::Below)
    }
}

bitflags::bitflags! {
    /// Window edges, used both for the tiled-edge hint and for resize grabs.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Edges: u32 {
        /// Top edge.
        const TOP = 1;
        /// Bottom edge.
        const BOTTOM = 2;
        /// Left edge.
        const LEFT = 4;
        /// Right edge.
        const RIGHT = 8;
    }
}

/// Gaps around tiled views, in pixels.
///
/// `left`, `right`, `top`, and `bottom` apply at the outer edges of a subtree;
/// `internal` is split in half between two neighbouring siblings.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gaps {
    /// Gap at the left edge.
    pub left: i32,
    /// Gap at the right edge.
    pub right: i32,
    /// Gap at the top edge.
    pub top: i32,
    /// Gap at the bottom edge.
    pub bottom: i32,
    /// Gap between neighbouring views.
    pub internal: i32,
}

impl Gaps {
    /// Uniform outer gaps and an internal gap.
    pub const fn uniform(outer: i32, internal: i32) -> Self {
        Self {
            left: outer,
            right: outer,
            top: outer,
            bottom: outer,
            internal,
        }
    }
}

/// Workspace information for a view's output.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct WorkspaceInfo {
    /// The workspace currently shown on the output (column, row).
    pub current_workspace: Point,
    /// The size of one workspace in pixels.
    pub screen_size: Dimensions,
}
