// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`ViewHost`] that records every request, for tests.

use alloc::vec::Vec;
use hashbrown::HashSet;
use trellis_region::{Dimensions, Geometry, Point};

use crate::host::ViewHost;
use crate::types::{Edges, ViewId, WorkspaceInfo};

#[derive(Debug)]
pub(crate) struct RecordingHost {
    pub(crate) unmapped: HashSet<ViewId>,
    pub(crate) fullscreen: HashSet<ViewId>,
    pub(crate) workspace: Point,
    pub(crate) screen: Dimensions,
    pub(crate) requests: Vec<(ViewId, Geometry, Edges)>,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self {
            unmapped: HashSet::new(),
            fullscreen: HashSet::new(),
            workspace: Point::ZERO,
            screen: Dimensions::new(1280, 720),
            requests: Vec::new(),
        }
    }

    pub(crate) fn last_request(&self, view: ViewId) -> Option<Geometry> {
        self.requests
            .iter()
            .rev()
            .find(|(v, ..)| *v == view)
            .map(|(_, geometry, _)| *geometry)
    }
}

impl ViewHost for RecordingHost {
    fn is_mapped(&self, view: ViewId) -> bool {
        !self.unmapped.contains(&view)
    }

    fn is_fullscreen(&self, view: ViewId) -> bool {
        self.fullscreen.contains(&view)
    }

    fn workspace_info(&self, _view: ViewId) -> Option<WorkspaceInfo> {
        Some(WorkspaceInfo {
            current_workspace: self.workspace,
            screen_size: self.screen,
        })
    }

    fn request_tiled_geometry(&mut self, view: ViewId, geometry: Geometry, tiled: Edges) {
        self.requests.push((view, geometry, tiled));
    }
}
