// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One tiling root per workspace cell of an output.

use alloc::vec::Vec;
use tracing::debug;
use trellis_region::{Dimensions, Geometry, Point};

use crate::controller::{MoveViewController, ResizeViewController};
use crate::error::Error;
use crate::host::ViewHost;
use crate::options::TileOptions;
use crate::tree::Tree;
use crate::types::{Gaps, NodeId, ViewId};

/// The tiling roots of one output, indexed by workspace cell.
///
/// Every cell owns a root split covering the output's work area, offset by
/// the cell's position times the screen size. Roots are created when the
/// grid grows and are always splits.
#[derive(Debug)]
pub struct WorkspaceGrid {
    /// `roots[column][row]`
    roots: Vec<Vec<NodeId>>,
    grid: Dimensions,
    workarea: Geometry,
    screen: Dimensions,
    options: TileOptions,
}

impl WorkspaceGrid {
    /// An empty grid; call [`WorkspaceGrid::resize`] to create cells.
    pub fn new(options: TileOptions) -> Self {
        Self {
            roots: Vec::new(),
            grid: Dimensions::default(),
            workarea: Geometry::ZERO,
            screen: Dimensions::default(),
            options,
        }
    }

    /// The options this grid was created with.
    pub fn options(&self) -> &TileOptions {
        &self.options
    }

    /// Number of workspace columns and rows.
    pub fn grid_size(&self) -> Dimensions {
        self.grid
    }

    /// Change the number of workspace cells.
    ///
    /// Cells that remain keep their trees. Cells that disappear are destroyed,
    /// and the views they held are returned so the caller can tile them again.
    pub fn resize(&mut self, tree: &mut Tree, grid: Dimensions) -> Vec<ViewId> {
        let columns = usize::try_from(grid.width).unwrap_or(0);
        let rows = usize::try_from(grid.height).unwrap_or(0);
        let mut orphaned = Vec::new();
        let mut drop_root = |tree: &mut Tree, root: NodeId| {
            orphaned.extend(tree.views_in(root));
            let _ = tree.destroy(root);
        };

        while self.roots.len() > columns {
            for root in self.roots.pop().into_iter().flatten() {
                drop_root(tree, root);
            }
        }
        for column in &mut self.roots {
            while column.len() > rows {
                if let Some(root) = column.pop() {
                    drop_root(tree, root);
                }
            }
        }

        for x in 0..columns {
            if self.roots.len() <= x {
                self.roots.push(Vec::new());
            }
            let Some(column) = self.roots.get_mut(x) else {
                continue;
            };
            for y in column.len()..rows {
                let geometry = cell_geometry(self.workarea, self.screen, x, y);
                let root = tree.new_split(geometry, self.options.default_split);
                let _ = tree.set_gaps(root, self.options.gaps);
                column.push(root);
            }
        }
        self.grid = grid;
        debug!(%grid, orphaned = orphaned.len(), "Resized workspace grid.");
        orphaned
    }

    /// Lay every root out over `workarea` on its own workspace.
    pub fn set_workarea<H: ViewHost + ?Sized>(
        &mut self,
        tree: &mut Tree,
        host: &mut H,
        workarea: Geometry,
        screen: Dimensions,
    ) {
        self.workarea = workarea;
        self.screen = screen;
        for (x, column) in self.roots.iter().enumerate() {
            for (y, &root) in column.iter().enumerate() {
                let geometry = cell_geometry(workarea, screen, x, y);
                let _ = tree.set_geometry(root, geometry, host);
            }
        }
    }

    /// Apply new gaps to every root and lay the views out again.
    pub fn set_gaps<H: ViewHost + ?Sized>(&mut self, tree: &mut Tree, host: &mut H, gaps: Gaps) {
        self.options.gaps = gaps;
        for &root in self.roots.iter().flatten() {
            let _ = tree.set_gaps(root, gaps);
            if let Some(geometry) = tree.geometry(root) {
                let _ = tree.set_geometry(root, geometry, host);
            }
        }
    }

    /// The root of a workspace cell.
    pub fn root_at(&self, cell: Point) -> Option<NodeId> {
        let x = usize::try_from(cell.x).ok()?;
        let y = usize::try_from(cell.y).ok()?;
        self.roots.get(x)?.get(y).copied()
    }

    /// The root handle of a workspace cell, for controllers that may replace it.
    pub fn root_at_mut(&mut self, cell: Point) -> Option<&mut NodeId> {
        let x = usize::try_from(cell.x).ok()?;
        let y = usize::try_from(cell.y).ok()?;
        self.roots.get_mut(x)?.get_mut(y)
    }

    /// All cells and their roots.
    pub fn roots(&self) -> impl Iterator<Item = (Point, NodeId)> + '_ {
        self.roots.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(y, &root)| (Point::new(index_i32(x), index_i32(y)), root))
        })
    }

    /// The workspace cell whose tree holds `view`.
    pub fn cell_of_view(&self, tree: &Tree, view: ViewId) -> Option<Point> {
        let root = tree.root_of(tree.node_for_view(view)?)?;
        self.roots()
            .find(|&(_, candidate)| candidate == root)
            .map(|(cell, _)| cell)
    }

    /// Tile `view` at the end of the root of `cell`.
    pub fn attach_view<H: ViewHost + ?Sized>(
        &mut self,
        tree: &mut Tree,
        host: &mut H,
        view: ViewId,
        cell: Point,
    ) -> Result<NodeId, Error> {
        let root = self.root_at(cell).ok_or(Error::WorkspaceOutOfRange(cell))?;
        let node = tree.new_view(view)?;
        if let Err(err) = tree.add_child(root, node, None, host) {
            let _ = tree.destroy(node);
            return Err(err);
        }
        debug!(?view, %cell, "Tiled view.");
        Ok(node)
    }

    /// Remove `view` from its tree and tidy the tree up.
    pub fn detach_view<H: ViewHost + ?Sized>(
        &mut self,
        tree: &mut Tree,
        host: &mut H,
        view: ViewId,
    ) -> Result<(), Error> {
        let node = tree.node_for_view(view).ok_or(Error::NotTiled(view))?;
        if let Some(parent) = tree.parent_of(node) {
            tree.remove_child(parent, node, host)?;
        }
        tree.destroy(node)?;
        debug!(?view, "Untiled view.");
        self.flatten_roots(tree, host);
        Ok(())
    }

    /// Flatten every root, updating the root handles in place.
    pub fn flatten_roots<H: ViewHost + ?Sized>(&mut self, tree: &mut Tree, host: &mut H) {
        for root in self.roots.iter_mut().flatten() {
            tree.flatten(root, host);
        }
    }

    /// Whether any view tiled in `cell` is fullscreen.
    pub fn has_fullscreen_view<H: ViewHost + ?Sized>(
        &self,
        tree: &Tree,
        host: &H,
        cell: Point,
    ) -> bool {
        let Some(root) = self.root_at(cell) else {
            return false;
        };
        let mut found = false;
        tree.for_each_view(root, &mut |_, view| found |= host.is_fullscreen(view));
        found
    }

    /// Convert an output-local pointer position to the grid's global coordinates.
    pub fn global_input(&self, current_workspace: Point, local: kurbo::Point) -> Point {
        Point::from_kurbo_trunc(local)
            + Point::new(
                current_workspace.x * self.screen.width,
                current_workspace.y * self.screen.height,
            )
    }

    /// Start dragging the view at `grab` within `cell`.
    pub fn start_move(&self, tree: &Tree, cell: Point, grab: Point) -> Option<MoveViewController> {
        let root = self.root_at(cell)?;
        Some(MoveViewController::new(tree, root, grab).with_sensitivity(self.options.drop_sensitivity))
    }

    /// Start resizing the view at `grab` within `cell`.
    pub fn start_resize(
        &self,
        tree: &Tree,
        cell: Point,
        grab: Point,
    ) -> Option<ResizeViewController> {
        let root = self.root_at(cell)?;
        Some(ResizeViewController::new(tree, root, grab).with_min_extent(self.options.min_resize_extent))
    }
}

fn index_i32(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn cell_geometry(workarea: Geometry, screen: Dimensions, x: usize, y: usize) -> Geometry {
    workarea
        + Point::new(
            index_i32(x) * screen.width,
            index_i32(y) * screen.height,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::TileController;
    use crate::testing::RecordingHost;
    use crate::types::SplitDirection;
    use alloc::vec;

    const SCREEN: Dimensions = Dimensions::new(1280, 720);

    fn grid(tree: &mut Tree, host: &mut RecordingHost, options: TileOptions) -> WorkspaceGrid {
        let mut grid = WorkspaceGrid::new(options);
        assert!(grid.resize(tree, Dimensions::new(3, 2)).is_empty());
        grid.set_workarea(tree, host, Geometry::new(0, 30, 1280, 690), SCREEN);
        grid
    }

    #[test]
    fn every_cell_gets_a_split_root() {
        let mut host = RecordingHost::new();
        let mut tree = Tree::new();
        let grid = grid(&mut tree, &mut host, TileOptions::default());
        assert_eq!(grid.roots().count(), 6);
        for (cell, root) in grid.roots() {
            assert_eq!(tree.split_direction(root), Some(SplitDirection::Vertical));
            assert_eq!(
                tree.geometry(root),
                Some(Geometry::new(cell.x * 1280, 30 + cell.y * 720, 1280, 690))
            );
        }
        assert_eq!(grid.root_at(Point::new(3, 0)), None);
        assert_eq!(grid.root_at(Point::new(-1, 0)), None);
    }

    #[test]
    fn attach_and_detach_views() {
        let mut host = RecordingHost::new();
        let mut tree = Tree::new();
        let mut grid = grid(&mut tree, &mut host, TileOptions::default());
        let cell = Point::new(1, 1);

        grid.attach_view(&mut tree, &mut host, ViewId(1), cell).unwrap();
        grid.attach_view(&mut tree, &mut host, ViewId(2), cell).unwrap();
        assert_eq!(grid.cell_of_view(&tree, ViewId(2)), Some(cell));
        assert_eq!(
            tree.geometry(tree.node_for_view(ViewId(2)).unwrap()),
            Some(Geometry::new(1920, 750, 640, 690))
        );
        assert_eq!(
            grid.attach_view(&mut tree, &mut host, ViewId(3), Point::new(5, 5)),
            Err(Error::WorkspaceOutOfRange(Point::new(5, 5)))
        );
        assert_eq!(tree.node_for_view(ViewId(3)), None);
        assert_eq!(
            grid.attach_view(&mut tree, &mut host, ViewId(1), cell),
            Err(Error::AlreadyTiled(ViewId(1)))
        );

        grid.detach_view(&mut tree, &mut host, ViewId(1)).unwrap();
        let root = grid.root_at(cell).unwrap();
        assert_eq!(tree.views_in(root), vec![ViewId(2)]);
        assert_eq!(
            tree.geometry(tree.node_for_view(ViewId(2)).unwrap()),
            Some(Geometry::new(1280, 750, 1280, 690))
        );
        assert_eq!(
            grid.detach_view(&mut tree, &mut host, ViewId(1)),
            Err(Error::NotTiled(ViewId(1)))
        );
    }

    #[test]
    fn shrinking_the_grid_returns_orphaned_views() {
        let mut host = RecordingHost::new();
        let mut tree = Tree::new();
        let mut grid = grid(&mut tree, &mut host, TileOptions::default());
        grid.attach_view(&mut tree, &mut host, ViewId(1), Point::new(0, 0)).unwrap();
        grid.attach_view(&mut tree, &mut host, ViewId(2), Point::new(2, 1)).unwrap();
        let kept = grid.root_at(Point::new(0, 0)).unwrap();

        let orphaned = grid.resize(&mut tree, Dimensions::new(2, 1));
        assert_eq!(orphaned, vec![ViewId(2)]);
        assert_eq!(grid.roots().count(), 2);
        assert_eq!(grid.root_at(Point::new(0, 0)), Some(kept));
        assert_eq!(tree.node_for_view(ViewId(2)), None);
        assert!(tree.node_for_view(ViewId(1)).is_some());
    }

    #[test]
    fn gaps_apply_to_every_cell() {
        let mut host = RecordingHost::new();
        let mut tree = Tree::new();
        let mut grid = grid(&mut tree, &mut host, TileOptions::default());
        grid.attach_view(&mut tree, &mut host, ViewId(1), Point::new(0, 0)).unwrap();
        grid.set_gaps(&mut tree, &mut host, Gaps::uniform(5, 10));
        assert_eq!(grid.options().gaps, Gaps::uniform(5, 10));
        assert_eq!(
            host.last_request(ViewId(1)),
            Some(Geometry::new(5, 35, 1270, 680))
        );

        grid.resize(&mut tree, Dimensions::new(4, 2));
        let fresh = grid.root_at(Point::new(3, 0)).unwrap();
        assert_eq!(tree.gaps(fresh), Some(Gaps::uniform(5, 10)));
    }

    #[test]
    fn fullscreen_detection_and_input_mapping() {
        let mut host = RecordingHost::new();
        let mut tree = Tree::new();
        let mut grid = grid(&mut tree, &mut host, TileOptions::default());
        grid.attach_view(&mut tree, &mut host, ViewId(1), Point::new(1, 0)).unwrap();
        assert!(!grid.has_fullscreen_view(&tree, &host, Point::new(1, 0)));
        host.fullscreen.insert(ViewId(1));
        assert!(grid.has_fullscreen_view(&tree, &host, Point::new(1, 0)));
        assert!(!grid.has_fullscreen_view(&tree, &host, Point::new(0, 0)));

        assert_eq!(
            grid.global_input(Point::new(1, 1), kurbo::Point::new(10.7, 20.2)),
            Point::new(1290, 740)
        );
    }

    #[test]
    fn controllers_started_from_the_grid_update_its_roots() {
        let mut host = RecordingHost::new();
        let mut tree = Tree::new();
        let options = TileOptions {
            drop_sensitivity: 0.25,
            ..TileOptions::default()
        };
        let mut grid = grid(&mut tree, &mut host, options);
        let cell = Point::new(0, 0);
        grid.attach_view(&mut tree, &mut host, ViewId(1), cell).unwrap();
        grid.attach_view(&mut tree, &mut host, ViewId(2), cell).unwrap();

        let mut controller = grid.start_move(&tree, cell, Point::new(100, 300)).unwrap();
        let root = grid.root_at_mut(cell).unwrap();
        controller.input_motion(&mut tree, root, &mut host, Point::new(900, 700));
        controller.input_released(&mut tree, root, &mut host);

        let root = grid.root_at(cell).unwrap();
        assert_eq!(tree.split_direction(root), Some(SplitDirection::Horizontal));
        assert_eq!(tree.views_in(root), vec![ViewId(2), ViewId(1)]);
        assert_eq!(grid.cell_of_view(&tree, ViewId(1)), Some(cell));
    }
}
