// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Region: integer geometry primitives and a box-set region algebra.
//!
//! This crate is the leaf of the Trellis workspace. It provides:
//!
//! - [`Point`], [`Dimensions`], and [`Geometry`]: integer pixel-space primitives with
//!   containment, intersection, translation, and scaling.
//! - [`Region`]: a set of pairwise disjoint boxes supporting union, intersection,
//!   subtraction, translation, and scaling. Regions are the currency of damage tracking
//!   in the scene graph.
//!
//! Boxes are half-open: a [`Geometry`] covers `x..x + width` and `y..y + height`, and an
//! empty box (zero or negative extent) contains nothing.
//!
//! ## Example
//!
//! ```rust
//! use trellis_region::{Geometry, Point, Region};
//!
//! let mut damage = Region::from(Geometry::new(0, 0, 100, 100));
//! damage |= Geometry::new(50, 50, 100, 100);
//! damage -= Geometry::new(0, 0, 10, 10);
//!
//! assert!(damage.contains_point(Point::new(120, 120)));
//! assert!(!damage.contains_point(Point::new(5, 5)));
//! assert_eq!(damage.extents(), Geometry::new(0, 0, 150, 150));
//! ```
//!
//! Float points interoperate through [`kurbo`]: [`Geometry::contains_pointf`] takes a
//! [`kurbo::Point`] and boxes convert to and from [`kurbo::Rect`].
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `kurbo`.
//! - `libm`: enables `no_std` float support in `kurbo` via `libm`.
//! - `serde`: derives `Serialize`/`Deserialize` for the geometry primitives.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod region;

pub use geometry::{Dimensions, Geometry, Point, clamp_i32};
pub use region::Region;
