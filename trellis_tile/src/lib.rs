// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Tile: a tiling tree for window layout.
//!
//! This crate arranges windows by recursively splitting rectangles. It provides:
//!
//! - A [`Tree`] arena of split nodes and view leaves, with generational [`NodeId`]s.
//! - Proportional layout: children keep their share of a split when it is resized,
//!   with every boundary recomputed from cumulative fractions so integer rounding
//!   never leaves gaps or overlaps.
//! - Flattening, which collapses single-child splits after windows leave.
//! - Queries for hit-testing, drop classification ([`Insertion`]), drop previews,
//!   and finding the adjacent view in a direction.
//! - Interactive controllers for drag-to-move and drag-to-resize
//!   ([`MoveViewController`], [`ResizeViewController`]).
//! - A [`WorkspaceGrid`] holding one root per workspace cell of an output.
//!
//! Windows are never owned by the tree. They are named by [`ViewId`], and the
//! embedder implements [`ViewHost`] to report their state and receive resize requests.
//!
//! ## Example
//!
//! ```rust
//! use trellis_region::{Dimensions, Geometry, Point};
//! use trellis_tile::{Edges, TileOptions, Tree, ViewHost, ViewId, WorkspaceGrid, WorkspaceInfo};
//!
//! struct Host;
//!
//! impl ViewHost for Host {
//!     fn is_mapped(&self, _: ViewId) -> bool { true }
//!     fn workspace_info(&self, _: ViewId) -> Option<WorkspaceInfo> {
//!         Some(WorkspaceInfo {
//!             current_workspace: Point::ZERO,
//!             screen_size: Dimensions::new(1280, 720),
//!         })
//!     }
//!     fn request_tiled_geometry(&mut self, _: ViewId, _: Geometry, _: Edges) {}
//! }
//!
//! let mut tree = Tree::new();
//! let mut grid = WorkspaceGrid::new(TileOptions::default());
//! grid.resize(&mut tree, Dimensions::new(1, 1));
//! grid.set_workarea(&mut tree, &mut Host, Geometry::new(0, 0, 1280, 720), Dimensions::new(1280, 720));
//!
//! let cell = Point::ZERO;
//! let a = grid.attach_view(&mut tree, &mut Host, ViewId(1), cell).unwrap();
//! let b = grid.attach_view(&mut tree, &mut Host, ViewId(2), cell).unwrap();
//! assert_eq!(tree.geometry(b), Some(Geometry::new(640, 0, 640, 720)));
//!
//! let root = grid.root_at(cell).unwrap();
//! assert_eq!(tree.find_view_at(root, Point::new(10, 10)), Some(a));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `kurbo`.
//! - `libm`: enables `no_std` float support in `kurbo` via `libm`.
//! - `serde`: derives `Serialize`/`Deserialize` for [`TileOptions`] and its parts.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod error;
mod host;
mod options;
mod query;
mod tree;
mod types;
mod workspace;

#[cfg(test)]
mod testing;

pub use controller::{MoveViewController, NoopController, ResizeViewController, TileController};
pub use error::Error;
pub use host::ViewHost;
pub use options::{DEFAULT_DROP_SENSITIVITY, DEFAULT_MIN_RESIZE_EXTENT, TileOptions};
pub use tree::Tree;
pub use types::{Edges, Gaps, Insertion, NodeId, NodeKind, SplitDirection, ViewId, WorkspaceInfo};
pub use workspace::WorkspaceGrid;
