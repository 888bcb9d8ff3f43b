// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::types::OutputId;

/// A rejected scene-graph edit.
///
/// Edits are all-or-nothing: on error the scene is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The handle refers to a node that no longer exists.
    #[error("node handle is stale")]
    StaleNode,
    /// The node cannot hold children, or is a structure node that generic edits may not destroy.
    #[error("node is not a floating container")]
    NotFloating,
    /// The operation does not apply to this kind of node.
    #[error("operation does not apply to this kind of node")]
    WrongKind,
    /// The new children list reorders, drops, or adds structure nodes.
    #[error("children list does not keep the structure nodes in place")]
    StructureMismatch,
    /// A node in the new list already has another parent.
    #[error("node already has a parent")]
    AlreadyParented,
    /// A node appears twice in the new list.
    #[error("node appears twice in a children list")]
    DuplicateChild,
    /// The edit would make a node its own ancestor.
    #[error("a node cannot be added below itself")]
    Cycle,
    /// No output with this id is in the scene.
    #[error("unknown output {0}")]
    UnknownOutput(OutputId),
    /// An output with this id is already in the scene.
    #[error("output {0} already exists")]
    OutputExists(OutputId),
}
