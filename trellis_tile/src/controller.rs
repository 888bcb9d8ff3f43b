// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive retiling: drag-to-move and drag-to-resize.
//!
//! A controller is created when a grab starts and fed pointer motion in
//! global coordinates. [`TileController::input_released`] applies the final
//! result. Dropping a controller without releasing it cancels whatever has
//! not been applied yet.

use tracing::{debug, warn};
use trellis_region::{Geometry, Point, clamp_i32};

use crate::error::Error;
use crate::host::ViewHost;
use crate::options::{DEFAULT_DROP_SENSITIVITY, DEFAULT_MIN_RESIZE_EXTENT};
use crate::tree::{Tree, axis_extent};
use crate::types::{Edges, Insertion, NodeId, SplitDirection};

/// An interactive operation on one tiling hierarchy.
///
/// `root` is the handle of the hierarchy being edited. Controllers that
/// restructure the tree flatten it, so the handle may be replaced.
pub trait TileController {
    /// The pointer moved to `input`.
    fn input_motion(
        &mut self,
        _tree: &mut Tree,
        _root: &mut NodeId,
        _host: &mut dyn ViewHost,
        _input: Point,
    ) {
    }

    /// The grab ended.
    fn input_released(&mut self, _tree: &mut Tree, _root: &mut NodeId, _host: &mut dyn ViewHost) {}
}

/// A controller that ignores all input.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopController;

impl TileController for NoopController {}

/// Drag a view onto another to retile it next to the target.
#[derive(Clone, Debug)]
pub struct MoveViewController {
    grabbed: Option<NodeId>,
    current_input: Point,
    sensitivity: f64,
    preview: Option<Geometry>,
}

impl MoveViewController {
    /// Start dragging the view under `grab`.
    pub fn new(tree: &Tree, root: NodeId, grab: Point) -> Self {
        Self {
            grabbed: tree.find_view_at(root, grab),
            current_input: grab,
            sensitivity: DEFAULT_DROP_SENSITIVITY,
            preview: None,
        }
    }

    /// Use a different drop sensitivity.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// The view being dragged, if the grab started on one.
    pub fn grabbed(&self) -> Option<NodeId> {
        self.grabbed
    }

    /// The area to highlight as the drop destination.
    pub fn preview(&self) -> Option<Geometry> {
        self.preview
    }

    fn drop_target(&self, tree: &Tree, root: NodeId) -> Option<NodeId> {
        let grabbed = self.grabbed?;
        let target = tree.find_view_at(root, self.current_input)?;
        (target != grabbed).then_some(target)
    }

    fn commit(
        &self,
        tree: &mut Tree,
        root: NodeId,
        host: &mut dyn ViewHost,
    ) -> Result<bool, Error> {
        let (Some(grabbed), Some(target)) = (self.grabbed, self.drop_target(tree, root)) else {
            return Ok(false);
        };
        let insertion = tree.calculate_insert_type_with(target, self.current_input, self.sensitivity);
        let Some(direction) = insertion.split_direction() else {
            return Ok(false);
        };

        let source = tree.parent_of(grabbed).ok_or(Error::NotAChild)?;
        tree.remove_child(source, grabbed, host)?;

        let parent = tree.parent_of(target).ok_or(Error::NotAChild)?;
        let index = tree.index_in_parent(target).ok_or(Error::NotAChild)?;
        if tree.split_direction(parent) == Some(direction) {
            let at = index + usize::from(insertion.is_after());
            tree.add_child(parent, grabbed, Some(at), host)?;
        } else {
            let geometry = tree.geometry(target).ok_or(Error::StaleNode)?;
            tree.remove_child(parent, target, host)?;
            let split = tree.new_split(geometry, direction);
            tree.add_child(parent, split, Some(index), host)?;
            let (first, second) = if insertion.is_after() {
                (target, grabbed)
            } else {
                (grabbed, target)
            };
            tree.add_child(split, first, None, host)?;
            tree.add_child(split, second, None, host)?;
        }
        debug!(?grabbed, ?target, ?insertion, "Dropped view.");
        Ok(true)
    }
}

impl TileController for MoveViewController {
    fn input_motion(
        &mut self,
        tree: &mut Tree,
        root: &mut NodeId,
        _host: &mut dyn ViewHost,
        input: Point,
    ) {
        self.current_input = input;
        self.preview = self.drop_target(tree, *root).and_then(|target| {
            let insertion = tree.calculate_insert_type_with(target, input, self.sensitivity);
            if insertion == Insertion::None {
                return None;
            }
            tree.calculate_split_preview(target, insertion)
        });
    }

    fn input_released(&mut self, tree: &mut Tree, root: &mut NodeId, host: &mut dyn ViewHost) {
        self.preview = None;
        match self.commit(tree, *root, host) {
            Ok(true) => {
                tree.flatten(root, host);
            }
            Ok(false) => {}
            Err(err) => warn!(%err, "Failed to drop view."),
        }
    }
}

/// Drag the edges of a view to resize it against its neighbours.
///
/// The grabbed quarter of the view picks the edges: grabbing the top-left
/// quarter moves the top and left edges. Each edge belongs to the nearest
/// ancestor split along that axis, and moving it trades space between the two
/// tiles on either side.
#[derive(Clone, Debug)]
pub struct ResizeViewController {
    grabbed: Option<NodeId>,
    edges: Edges,
    last_input: Point,
    horizontal_pair: Option<(NodeId, NodeId)>,
    vertical_pair: Option<(NodeId, NodeId)>,
    min_extent: i32,
}

impl ResizeViewController {
    /// Start resizing the view under `grab`.
    pub fn new(tree: &Tree, root: NodeId, grab: Point) -> Self {
        let grabbed = tree.find_view_at(root, grab);
        let edges = grabbed
            .and_then(|id| tree.geometry(id))
            .map_or(Edges::empty(), |g| resizing_edges(g, grab));
        let pair = |direction| grabbed.and_then(|id| resizing_pair(tree, id, edges, direction));
        Self {
            grabbed,
            edges,
            last_input: grab,
            horizontal_pair: pair(SplitDirection::Horizontal),
            vertical_pair: pair(SplitDirection::Vertical),
            min_extent: DEFAULT_MIN_RESIZE_EXTENT,
        }
    }

    /// Use a different minimum tile extent.
    #[must_use]
    pub fn with_min_extent(mut self, min_extent: i32) -> Self {
        self.min_extent = min_extent;
        self
    }

    /// The view being resized, if the grab started on one.
    pub fn grabbed(&self) -> Option<NodeId> {
        self.grabbed
    }

    /// The edges being dragged.
    pub fn edges(&self) -> Edges {
        self.edges
    }

    fn resize_pair(
        &self,
        tree: &mut Tree,
        host: &mut dyn ViewHost,
        (first, second): (NodeId, NodeId),
        direction: SplitDirection,
        delta: i32,
    ) {
        let (Some(g1), Some(g2)) = (tree.geometry(first), tree.geometry(second)) else {
            return;
        };
        let len1 = axis_extent(g1, direction);
        let len2 = axis_extent(g2, direction);
        let delta = clamp_i32(
            delta,
            -(len1 - self.min_extent).max(0),
            (len2 - self.min_extent).max(0),
        );
        if delta == 0 {
            return;
        }
        let (g1, g2) = match direction {
            SplitDirection::Horizontal => (
                Geometry::new(g1.x, g1.y, g1.width, len1 + delta),
                Geometry::new(g2.x, g2.y + delta, g2.width, len2 - delta),
            ),
            SplitDirection::Vertical => (
                Geometry::new(g1.x, g1.y, len1 + delta, g1.height),
                Geometry::new(g2.x + delta, g2.y, len2 - delta, g2.height),
            ),
        };
        let _ = tree.set_geometry(first, g1, host);
        let _ = tree.set_geometry(second, g2, host);
    }
}

impl TileController for ResizeViewController {
    fn input_motion(
        &mut self,
        tree: &mut Tree,
        _root: &mut NodeId,
        host: &mut dyn ViewHost,
        input: Point,
    ) {
        let delta = input - self.last_input;
        self.last_input = input;
        if let Some(pair) = self.horizontal_pair {
            self.resize_pair(tree, host, pair, SplitDirection::Horizontal, delta.y);
        }
        if let Some(pair) = self.vertical_pair {
            self.resize_pair(tree, host, pair, SplitDirection::Vertical, delta.x);
        }
    }
}

/// The edges nearest to `grab`, one per axis.
fn resizing_edges(geometry: Geometry, grab: Point) -> Edges {
    let horizontal = if grab.x < geometry.x + geometry.width / 2 {
        Edges::LEFT
    } else {
        Edges::RIGHT
    };
    let vertical = if grab.y < geometry.y + geometry.height / 2 {
        Edges::TOP
    } else {
        Edges::BOTTOM
    };
    horizontal | vertical
}

/// The two siblings on either side of the grabbed edge along `direction`.
fn resizing_pair(
    tree: &Tree,
    view: NodeId,
    edges: Edges,
    direction: SplitDirection,
) -> Option<(NodeId, NodeId)> {
    let leading = match direction {
        SplitDirection::Horizontal => Edges::TOP,
        SplitDirection::Vertical => Edges::LEFT,
    };
    let mut node = view;
    let parent = loop {
        let parent = tree.parent_of(node)?;
        if tree.split_direction(parent) == Some(direction) {
            break parent;
        }
        node = parent;
    };
    let siblings = tree.children_of(parent);
    let index = siblings.iter().position(|&c| c == node)?;
    if edges.contains(leading) {
        let before = *siblings.get(index.checked_sub(1)?)?;
        Some((before, node))
    } else {
        let after = *siblings.get(index + 1)?;
        Some((node, after))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;
    use crate::types::ViewId;

    const CELL: Geometry = Geometry::new(0, 0, 1280, 720);

    fn two_columns(host: &mut RecordingHost) -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.new_split(CELL, SplitDirection::Vertical);
        let a = tree.new_view(ViewId(1)).unwrap();
        let b = tree.new_view(ViewId(2)).unwrap();
        tree.add_child(root, a, None, host).unwrap();
        tree.add_child(root, b, None, host).unwrap();
        (tree, root, a, b)
    }

    #[test]
    fn drop_on_the_far_edge_reorders_siblings() {
        let mut host = RecordingHost::new();
        let (mut tree, mut root, a, b) = two_columns(&mut host);
        let mut controller = MoveViewController::new(&tree, root, Point::new(100, 360));
        assert_eq!(controller.grabbed(), Some(a));

        controller.input_motion(&mut tree, &mut root, &mut host, Point::new(1270, 360));
        assert_eq!(controller.preview(), Some(Geometry::new(1067, 0, 213, 720)));

        controller.input_released(&mut tree, &mut root, &mut host);
        assert_eq!(controller.preview(), None);
        assert_eq!(tree.children_of(root), &[b, a]);
        assert_eq!(tree.geometry(b), Some(Geometry::new(0, 0, 640, 720)));
        assert_eq!(tree.geometry(a), Some(Geometry::new(640, 0, 640, 720)));
    }

    #[test]
    fn drop_below_wraps_both_views_in_a_new_split() {
        let mut host = RecordingHost::new();
        let (mut tree, mut root, a, b) = two_columns(&mut host);
        let old_root = root;
        let mut controller = MoveViewController::new(&tree, root, Point::new(100, 360));
        controller.input_motion(&mut tree, &mut root, &mut host, Point::new(900, 700));
        controller.input_released(&mut tree, &mut root, &mut host);

        assert_ne!(root, old_root, "the single-child root was collapsed");
        assert_eq!(tree.split_direction(root), Some(SplitDirection::Horizontal));
        assert_eq!(tree.children_of(root), &[b, a]);
        assert_eq!(tree.geometry(b), Some(Geometry::new(0, 0, 1280, 360)));
        assert_eq!(tree.geometry(a), Some(Geometry::new(0, 360, 1280, 360)));
        assert_eq!(host.last_request(ViewId(1)), Some(Geometry::new(0, 360, 1280, 360)));
    }

    #[test]
    fn drop_above_puts_the_dragged_view_first() {
        let mut host = RecordingHost::new();
        let (mut tree, mut root, a, b) = two_columns(&mut host);
        let mut controller = MoveViewController::new(&tree, root, Point::new(100, 360));
        controller.input_motion(&mut tree, &mut root, &mut host, Point::new(900, 20));
        controller.input_released(&mut tree, &mut root, &mut host);

        assert_eq!(tree.split_direction(root), Some(SplitDirection::Horizontal));
        assert_eq!(tree.children_of(root), &[a, b]);
    }

    #[test]
    fn drop_on_itself_or_the_center_changes_nothing() {
        let mut host = RecordingHost::new();
        let (mut tree, mut root, a, b) = two_columns(&mut host);

        let mut onto_self = MoveViewController::new(&tree, root, Point::new(100, 360));
        onto_self.input_motion(&mut tree, &mut root, &mut host, Point::new(10, 360));
        assert_eq!(onto_self.preview(), None);
        onto_self.input_released(&mut tree, &mut root, &mut host);

        let mut center = MoveViewController::new(&tree, root, Point::new(100, 360));
        center.input_motion(&mut tree, &mut root, &mut host, Point::new(960, 360));
        assert_eq!(center.preview(), None);
        center.input_released(&mut tree, &mut root, &mut host);

        assert_eq!(tree.children_of(root), &[a, b]);
    }

    #[test]
    fn dropping_a_controller_cancels_the_move() {
        let mut host = RecordingHost::new();
        let (mut tree, mut root, a, b) = two_columns(&mut host);
        {
            let mut controller = MoveViewController::new(&tree, root, Point::new(100, 360));
            controller.input_motion(&mut tree, &mut root, &mut host, Point::new(1270, 360));
        }
        assert_eq!(tree.children_of(root), &[a, b]);
    }

    #[test]
    fn resize_trades_space_with_the_neighbour() {
        let mut host = RecordingHost::new();
        let (mut tree, mut root, a, b) = two_columns(&mut host);
        let mut controller = ResizeViewController::new(&tree, root, Point::new(600, 100));
        assert_eq!(controller.edges(), Edges::RIGHT | Edges::TOP);

        controller.input_motion(&mut tree, &mut root, &mut host, Point::new(700, 100));
        assert_eq!(tree.geometry(a), Some(Geometry::new(0, 0, 740, 720)));
        assert_eq!(tree.geometry(b), Some(Geometry::new(740, 0, 540, 720)));

        controller.input_motion(&mut tree, &mut root, &mut host, Point::new(2000, 100));
        assert_eq!(tree.geometry(a), Some(Geometry::new(0, 0, 1230, 720)));
        assert_eq!(tree.geometry(b), Some(Geometry::new(1230, 0, 50, 720)));
        assert_eq!(host.last_request(ViewId(2)), Some(Geometry::new(1230, 0, 50, 720)));
    }

    #[test]
    fn resize_finds_the_split_for_each_axis() {
        let mut host = RecordingHost::new();
        let mut tree = Tree::new();
        let mut root = tree.new_split(CELL, SplitDirection::Vertical);
        let a = tree.new_view(ViewId(1)).unwrap();
        tree.add_child(root, a, None, &mut host).unwrap();
        let column = tree.new_split(Geometry::ZERO, SplitDirection::Horizontal);
        tree.add_child(root, column, None, &mut host).unwrap();
        let b = tree.new_view(ViewId(2)).unwrap();
        let c = tree.new_view(ViewId(3)).unwrap();
        tree.add_child(column, b, None, &mut host).unwrap();
        tree.add_child(column, c, None, &mut host).unwrap();

        let mut controller = ResizeViewController::new(&tree, root, Point::new(700, 400))
            .with_min_extent(10);
        assert_eq!(controller.grabbed(), Some(c));
        assert_eq!(controller.edges(), Edges::LEFT | Edges::TOP);

        controller.input_motion(&mut tree, &mut root, &mut host, Point::new(660, 420));
        assert_eq!(tree.geometry(a), Some(Geometry::new(0, 0, 600, 720)));
        assert_eq!(tree.geometry(column), Some(Geometry::new(600, 0, 680, 720)));
        assert_eq!(tree.geometry(b), Some(Geometry::new(600, 0, 680, 380)));
        assert_eq!(tree.geometry(c), Some(Geometry::new(600, 380, 680, 340)));
    }

    #[test]
    fn resize_without_a_neighbour_does_nothing() {
        let mut host = RecordingHost::new();
        let (mut tree, mut root, a, _) = two_columns(&mut host);
        let mut controller = ResizeViewController::new(&tree, root, Point::new(10, 10));
        controller.input_motion(&mut tree, &mut root, &mut host, Point::new(200, 200));
        controller.input_released(&mut tree, &mut root, &mut host);
        assert_eq!(tree.geometry(a), Some(Geometry::new(0, 0, 640, 720)));

        let mut noop = NoopController;
        noop.input_motion(&mut tree, &mut root, &mut host, Point::new(0, 0));
        noop.input_released(&mut tree, &mut root, &mut host);
    }
}
