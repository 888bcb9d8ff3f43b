// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene graph.

use core::fmt;

use trellis_region::{Geometry, Point, Region};

/// Identifier for a node in the scene (generational).
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

/// Identity of a physical output.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct OutputId(pub u32);

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle returned by [`Scene::connect_root_update`](crate::Scene::connect_root_update).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// The compositor layers, from bottom to top.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Wallpapers.
    Background,
    /// Panels and docks drawn below windows.
    Bottom,
    /// Regular application windows.
    Workspace,
    /// Panels drawn above windows.
    Top,
    /// Override-redirect surfaces and other unmanaged windows.
    Unmanaged,
    /// Lock screens and fullscreen overlays.
    Overlay,
    /// Desktop widgets.
    DesktopWidget,
}

impl Layer {
    /// Number of layers.
    pub const COUNT: usize = 7;

    /// Every layer, bottom first.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Background,
        Self::Bottom,
        Self::Workspace,
        Self::Top,
        Self::Unmanaged,
        Self::Overlay,
        Self::DesktopWidget,
    ];

    /// Position in the stacking order; 0 is the bottom.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Bottom => "bottom",
            Self::Workspace => "workspace",
            Self::Top => "top",
            Self::Unmanaged => "unmanaged",
            Self::Overlay => "overlay",
            Self::DesktopWidget => "dwidget",
        }
    }
}

bitflags::bitflags! {
    /// What changed about a node, as reported to root observers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct UpdateFlags: u32 {
        /// Children were added, removed, or reordered.
        const CHILDREN_LIST = 1;
        /// A node was enabled or disabled.
        const ENABLED = 2;
        /// Input routing may have changed.
        const INPUT_STATE = 4;
        /// A node moved or changed size.
        const GEOMETRY = 8;
    }
}

impl UpdateFlags {
    /// Add the flags implied by `self`.
    ///
    /// Structural, enable, and geometry changes all affect input routing.
    pub fn normalized(self) -> Self {
        if self.intersects(Self::CHILDREN_LIST | Self::ENABLED | Self::GEOMETRY) {
            self | Self::INPUT_STATE
        } else {
            self
        }
    }
}

bitflags::bitflags! {
    /// Per-node state bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// The node is disabled and neither drawn nor hit.
        const DISABLED = 1;
        /// The node belongs to the fixed skeleton of the scene.
        const STRUCTURE = 2;
    }
}

/// What a scene node is.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The scene root, holding one node per layer.
    Root,
    /// A layer container.
    Layer(Layer),
    /// A plain container for floating children.
    Inner,
    /// One output's part of a layer. Children are in output-local coordinates.
    Output {
        /// The output this node belongs to.
        output: OutputId,
        /// Position of the output in the global layout.
        origin: Point,
        /// When set, input and rendering are confined to this global region.
        limit_region: Option<Region>,
    },
    /// A container that offsets its children.
    Translation {
        /// Offset added to the children's coordinates.
        offset: Point,
    },
    /// Leaf content, such as a surface.
    Content {
        /// Extent in the parent's coordinates.
        bounds: Geometry,
        /// Whether the content takes pointer input.
        accepts_input: bool,
    },
}

impl NodeKind {
    /// Whether nodes of this kind can hold children.
    pub fn is_container(&self) -> bool {
        !matches!(self, Self::Content { .. })
    }

    /// Offset from this node's child coordinates to its own (parent) coordinates.
    pub(crate) fn child_offset(&self) -> Point {
        match self {
            Self::Output { origin, .. } => *origin,
            Self::Translation { offset } => *offset,
            _ => Point::ZERO,
        }
    }
}

/// Nodes that may be created freely and placed in floating containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatingKind {
    /// A plain container.
    Inner,
    /// A container that offsets its children.
    Translation {
        /// Offset added to the children's coordinates.
        offset: Point,
    },
    /// Leaf content.
    Content {
        /// Extent in the parent's coordinates.
        bounds: Geometry,
        /// Whether the content takes pointer input.
        accepts_input: bool,
    },
}

impl From<FloatingKind> for NodeKind {
    fn from(kind: FloatingKind) -> Self {
        match kind {
            FloatingKind::Inner => Self::Inner,
            FloatingKind::Translation { offset } => Self::Translation { offset },
            FloatingKind::Content {
                bounds,
                accepts_input,
            } => Self::Content {
                bounds,
                accepts_input,
            },
        }
    }
}

/// The per-layer nodes created for an output.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OutputNodes {
    /// The output node itself, a child of the layer.
    pub output: NodeId,
    /// Reorderable content such as views.
    pub dynamic: NodeId,
    /// Fixed overlays, stacked above `dynamic`.
    pub static_node: NodeId,
}

/// Result of a hit test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputNode {
    /// The content node that was hit.
    pub node: NodeId,
    /// The point in the coordinates of that node's parent.
    pub local: kurbo::Point,
}

/// One node to draw, with the offset from its coordinates to global ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RenderInstance {
    /// The node to draw.
    pub node: NodeId,
    /// Added to the node's bounding box to get global coordinates.
    pub offset: Point,
}
