// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the tiling tree and the window lifecycle.

use trellis_region::Geometry;

use crate::types::{Edges, ViewId, WorkspaceInfo};

/// Window operations the tiling tree needs from its host compositor.
///
/// The tree never owns windows. It only asks the host about them and sends
/// resize requests in workspace-local coordinates.
pub trait ViewHost {
    /// Whether the view is mapped. Unmapped views only get their geometry recorded.
    fn is_mapped(&self, view: ViewId) -> bool;

    /// Whether the view is fullscreen and should cover its whole workspace.
    fn is_fullscreen(&self, view: ViewId) -> bool {
        let _ = view;
        false
    }

    /// Workspace information for the view's output, or `None` if it has no output.
    fn workspace_info(&self, view: ViewId) -> Option<WorkspaceInfo>;

    /// Ask the view to take `geometry` (relative to the current workspace) with the given tiled edges.
    fn request_tiled_geometry(&mut self, view: ViewId, geometry: Geometry, tiled: Edges);
}
