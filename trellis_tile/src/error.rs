// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use trellis_region::Point;

use crate::types::ViewId;

/// A rejected tiling-tree edit.
///
/// Edits that fail leave the tree exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The handle refers to a node that no longer exists.
    #[error("node handle is stale")]
    StaleNode,
    /// The operation needs a split node.
    #[error("node is not a split node")]
    NotASplit,
    /// The node is not among the split's children.
    #[error("node is not a child of the given split")]
    NotAChild,
    /// The view already has a node in some tree.
    #[error("view {0:?} is already tiled")]
    AlreadyTiled(ViewId),
    /// The view has no node.
    #[error("view {0:?} is not tiled")]
    NotTiled(ViewId),
    /// The node still has a parent.
    #[error("node is already attached to a parent")]
    AlreadyAttached,
    /// The node would become its own descendant.
    #[error("a node cannot be added below itself")]
    Cycle,
    /// The workspace lies outside the grid.
    #[error("workspace {0} is outside the grid")]
    WorkspaceOutOfRange(Point),
}
