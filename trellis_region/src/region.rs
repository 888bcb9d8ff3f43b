// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box-set regions used for damage tracking.

use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, Mul, MulAssign, Sub, SubAssign,
};

use smallvec::SmallVec;

use crate::geometry::{Geometry, Point};

type Boxes = SmallVec<[Geometry; 4]>;

/// A set of pixels described by pairwise disjoint, non-empty boxes.
///
/// The box decomposition is an implementation detail: two regions compare equal
/// whenever they cover the same pixels, regardless of how they are split into boxes.
///
/// ## Example
///
/// ```rust
/// use trellis_region::{Geometry, Region};
///
/// let a = Region::from(Geometry::new(0, 0, 10, 10));
/// let b = Region::from(Geometry::new(5, 0, 10, 10));
///
/// assert_eq!((&a | &b).area(), 150);
/// assert_eq!((&a & &b).extents(), Geometry::new(5, 0, 5, 10));
/// assert_eq!((&a - &b).extents(), Geometry::new(0, 0, 5, 10));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Region {
    boxes: Boxes,
}

impl Region {
    /// Create an empty region.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the region covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Remove every box from the region.
    #[inline]
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// The disjoint boxes making up the region, in unspecified order.
    pub fn rects(&self) -> impl Iterator<Item = Geometry> + '_ {
        self.boxes.iter().copied()
    }

    /// The number of pixels covered.
    pub fn area(&self) -> i64 {
        self.boxes.iter().map(Geometry::area).sum()
    }

    /// The smallest box enclosing the whole region, or [`Geometry::ZERO`] if empty.
    pub fn extents(&self) -> Geometry {
        self.boxes
            .iter()
            .fold(Geometry::ZERO, |acc, b| acc.union(b))
    }

    /// Whether the region contains the point.
    pub fn contains_point(&self, point: Point) -> bool {
        self.boxes.iter().any(|b| b.contains_point(point))
    }

    /// Whether the region contains the float point.
    pub fn contains_pointf(&self, point: kurbo::Point) -> bool {
        self.boxes.iter().any(|b| b.contains_pointf(point))
    }

    /// Translate the whole region by `offset`.
    pub fn translate(&mut self, offset: Point) {
        for b in &mut self.boxes {
            *b = *b + offset;
        }
    }

    /// Grow every box by `amount` on each side (shrink for negative amounts).
    pub fn expand_edges(&mut self, amount: i32) {
        let old = core::mem::take(&mut self.boxes);
        for b in old {
            self.union_box(b.inflate(amount));
        }
    }

    /// Scale the region, using the same rounding as [`Geometry`] scaling.
    pub fn scale(&mut self, scale: f64) {
        let old = core::mem::take(&mut self.boxes);
        for b in old {
            self.union_box(b * scale);
        }
    }

    fn union_box(&mut self, geometry: Geometry) {
        if geometry.is_empty() {
            return;
        }
        let mut pieces: Boxes = SmallVec::new();
        pieces.push(geometry);
        for existing in &self.boxes {
            if pieces.is_empty() {
                return;
            }
            let mut next: Boxes = SmallVec::new();
            for piece in pieces {
                subtract_box(piece, *existing, &mut next);
            }
            pieces = next;
        }
        self.boxes.extend(pieces);
        self.coalesce();
    }

    /// Merge pairs of boxes that share a full edge until none are left.
    fn coalesce(&mut self) {
        'outer: loop {
            for i in 0..self.boxes.len() {
                for j in i + 1..self.boxes.len() {
                    if let Some(merged) = merge_adjacent(self.boxes[i], self.boxes[j]) {
                        self.boxes[i] = merged;
                        self.boxes.swap_remove(j);
                        continue 'outer;
                    }
                }
            }
            return;
        }
    }

    fn subtract_box(&mut self, geometry: Geometry) {
        if geometry.is_empty() {
            return;
        }
        let old = core::mem::take(&mut self.boxes);
        for b in old {
            subtract_box(b, geometry, &mut self.boxes);
        }
    }

    fn intersect_box(&mut self, geometry: Geometry) {
        self.boxes.retain(|b| {
            *b = b.intersection(&geometry);
            !b.is_empty()
        });
    }

    fn intersect_region(&self, other: &Self) -> Self {
        let mut boxes = Boxes::new();
        for a in &self.boxes {
            for b in &other.boxes {
                let i = a.intersection(b);
                if !i.is_empty() {
                    boxes.push(i);
                }
            }
        }
        Self { boxes }
    }
}

/// The box covering exactly `a` and `b`, if they share a full edge.
fn merge_adjacent(a: Geometry, b: Geometry) -> Option<Geometry> {
    let same_columns = a.x == b.x && a.width == b.width;
    let same_rows = a.y == b.y && a.height == b.height;
    if same_columns && (a.bottom() == b.y || b.bottom() == a.y) {
        return Some(a.union(&b));
    }
    if same_rows && (a.right() == b.x || b.right() == a.x) {
        return Some(a.union(&b));
    }
    None
}

/// Push the parts of `a` not covered by `b` into `out`, as up to four disjoint boxes.
fn subtract_box(a: Geometry, b: Geometry, out: &mut Boxes) {
    let i = a.intersection(&b);
    if i.is_empty() {
        out.push(a);
        return;
    }
    if i.y > a.y {
        out.push(Geometry::from_corners(a.x, a.y, a.right(), i.y));
    }
    if i.bottom() < a.bottom() {
        out.push(Geometry::from_corners(a.x, i.bottom(), a.right(), a.bottom()));
    }
    if i.x > a.x {
        out.push(Geometry::from_corners(a.x, i.y, i.x, i.bottom()));
    }
    if i.right() < a.right() {
        out.push(Geometry::from_corners(i.right(), i.y, a.right(), i.bottom()));
    }
}

impl From<Geometry> for Region {
    fn from(geometry: Geometry) -> Self {
        let mut region = Self::new();
        region.union_box(geometry);
        region
    }
}

impl FromIterator<Geometry> for Region {
    fn from_iter<I: IntoIterator<Item = Geometry>>(iter: I) -> Self {
        let mut region = Self::new();
        for g in iter {
            region.union_box(g);
        }
        region
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.area() == other.area() && (self - other).is_empty()
    }
}

impl Eq for Region {}

// Union.

impl BitOrAssign<Geometry> for Region {
    fn bitor_assign(&mut self, rhs: Geometry) {
        self.union_box(rhs);
    }
}

impl BitOrAssign<&Region> for Region {
    fn bitor_assign(&mut self, rhs: &Region) {
        for b in &rhs.boxes {
            self.union_box(*b);
        }
    }
}

impl BitOr<Geometry> for Region {
    type Output = Self;

    fn bitor(mut self, rhs: Geometry) -> Self {
        self |= rhs;
        self
    }
}

impl BitOr<&Region> for &Region {
    type Output = Region;

    fn bitor(self, rhs: &Region) -> Region {
        let mut out = self.clone();
        out |= rhs;
        out
    }
}

impl BitOr for Region {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self {
        self |= &rhs;
        self
    }
}

// Intersection.

impl BitAndAssign<Geometry> for Region {
    fn bitand_assign(&mut self, rhs: Geometry) {
        self.intersect_box(rhs);
    }
}

impl BitAndAssign<&Region> for Region {
    fn bitand_assign(&mut self, rhs: &Region) {
        *self = self.intersect_region(rhs);
    }
}

impl BitAnd<Geometry> for &Region {
    type Output = Region;

    fn bitand(self, rhs: Geometry) -> Region {
        let mut out = self.clone();
        out &= rhs;
        out
    }
}

impl BitAnd<Geometry> for Region {
    type Output = Self;

    fn bitand(mut self, rhs: Geometry) -> Self {
        self &= rhs;
        self
    }
}

impl BitAnd<&Region> for &Region {
    type Output = Region;

    fn bitand(self, rhs: &Region) -> Region {
        self.intersect_region(rhs)
    }
}

impl BitAnd for Region {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersect_region(&rhs)
    }
}

// Subtraction.

impl SubAssign<Geometry> for Region {
    fn sub_assign(&mut self, rhs: Geometry) {
        self.subtract_box(rhs);
    }
}

impl SubAssign<&Region> for Region {
    fn sub_assign(&mut self, rhs: &Region) {
        for b in &rhs.boxes {
            if self.is_empty() {
                return;
            }
            self.subtract_box(*b);
        }
    }
}

impl Sub<Geometry> for Region {
    type Output = Self;

    fn sub(mut self, rhs: Geometry) -> Self {
        self -= rhs;
        self
    }
}

impl Sub<&Region> for &Region {
    type Output = Region;

    fn sub(self, rhs: &Region) -> Region {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl Sub for Region {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= &rhs;
        self
    }
}

// Translation and scale.

impl AddAssign<Point> for Region {
    fn add_assign(&mut self, rhs: Point) {
        self.translate(rhs);
    }
}

impl Add<Point> for Region {
    type Output = Self;

    fn add(mut self, rhs: Point) -> Self {
        self.translate(rhs);
        self
    }
}

impl Add<Point> for &Region {
    type Output = Region;

    fn add(self, rhs: Point) -> Region {
        self.clone() + rhs
    }
}

impl MulAssign<f64> for Region {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale(rhs);
    }
}

impl Mul<f64> for &Region {
    type Output = Region;

    fn mul(self, rhs: f64) -> Region {
        let mut out = self.clone();
        out.scale(rhs);
        out
    }
}
