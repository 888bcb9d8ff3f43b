// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Scene: a layered scene graph for a compositor.
//!
//! The [`Scene`] keeps everything that is drawn in one tree:
//!
//! - A fixed skeleton of *structure* nodes: the root, one node per [`Layer`],
//!   and per-output nodes inside each layer. Generic edits can never move or
//!   remove them; [`Scene::set_children_list`] rejects any list that changes
//!   the order or membership of structure nodes.
//! - *Floating* nodes created by the embedder: plain containers, translations,
//!   and content leaves, placed and reordered freely.
//! - Enable counting: a node is enabled while enable requests outnumber
//!   disable requests, so independent subsystems can hide the same node.
//! - Updates: every change is reported with [`UpdateFlags`] and bubbles to the
//!   root, where observers connected with [`Scene::connect_root_update`] are
//!   notified once per change.
//! - Damage: changes that alter what is visible accumulate a [`Region`] in
//!   global coordinates.
//! - Queries: bounding boxes, hit testing ([`Scene::find_node_at`]), and
//!   render lists ([`Scene::gen_render_instances`]).
//!
//! Regions and integer geometry come from [`trellis_region`].
//!
//! ## Example
//!
//! ```rust
//! use trellis_region::{Geometry, Point};
//! use trellis_scene::{FloatingKind, Layer, OutputId, Scene, UpdateFlags};
//!
//! let mut scene = Scene::new();
//! scene.add_output(OutputId(1), Point::new(1920, 0)).unwrap();
//! let nodes = scene.output_nodes(OutputId(1), Layer::Workspace).unwrap();
//!
//! let window = scene.create_node(FloatingKind::Content {
//!     bounds: Geometry::new(0, 0, 800, 600),
//!     accepts_input: true,
//! });
//! scene.add_front(nodes.dynamic, window).unwrap();
//!
//! let hit = scene.find_node_at(kurbo::Point::new(2000.0, 100.0)).unwrap();
//! assert_eq!(hit.node, window);
//! assert_eq!(hit.local, kurbo::Point::new(80.0, 100.0));
//! assert_eq!(scene.take_damage().extents(), Geometry::new(1920, 0, 800, 600));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `kurbo`.
//! - `libm`: enables `no_std` float support in `kurbo` via `libm`.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`Region`]: trellis_region::Region

#![no_std]

extern crate alloc;

mod debug;
mod error;
mod output;
mod query;
mod scene;
mod stacking;
mod types;

pub use error::Error;
pub use scene::Scene;
pub use types::{
    FloatingKind, InputNode, Layer, NodeFlags, NodeId, NodeKind, ObserverId, OutputId,
    OutputNodes, RenderInstance, UpdateFlags,
};
