// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer geometry primitives: points, dimensions, and boxes.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Rect, Vec2};

/// A point (or offset) in integer pixel space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the point interpreted as a vector.
    pub fn length(self) -> f64 {
        self.to_vec2().hypot()
    }

    /// Convert to a float vector.
    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }

    /// Convert to a float point.
    #[inline]
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }

    /// Truncate a float point to integer coordinates.
    #[inline]
    pub fn from_kurbo_trunc(p: kurbo::Point) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Input coordinates are pixel positions well within i32."
        )]
        Self::new(p.x as i32, p.y as i32)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Width and height in integer pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Dimensions {
    /// Create new dimensions.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned box in integer pixel space.
///
/// The box covers the half-open ranges `x..x + width` and `y..y + height`.
/// A box with a non-positive width or height is empty and contains no points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Geometry {
    /// The empty box at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a box from its origin and size.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a box from an origin point and dimensions.
    #[inline]
    pub const fn from_parts(origin: Point, dimensions: Dimensions) -> Self {
        Self::new(origin.x, origin.y, dimensions.width, dimensions.height)
    }

    /// Create a box from its corners.
    #[inline]
    pub const fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size of the box.
    #[inline]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// The exclusive right edge.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// The exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the box has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The area of the box, or zero if it is empty.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            i64::from(self.width) * i64::from(self.height)
        }
    }

    /// Whether the point lies inside the box.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }

    /// Whether the float point lies inside the box.
    #[inline]
    pub fn contains_pointf(&self, point: kurbo::Point) -> bool {
        !self.is_empty()
            && point.x >= f64::from(self.x)
            && point.x < f64::from(self.right())
            && point.y >= f64::from(self.y)
            && point.y < f64::from(self.bottom())
    }

    /// Whether the two boxes share any area.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// The common part of two boxes, or [`Geometry::ZERO`] if they do not intersect.
    pub fn intersection(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::ZERO;
        }
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return Self::ZERO;
        }
        Self::from_corners(x0, y0, x1, y1)
    }

    /// The smallest box enclosing both boxes. Empty boxes are ignored.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Grow (or, for negative `amount`, shrink) the box by `amount` on every side.
    #[inline]
    pub const fn inflate(&self, amount: i32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2 * amount,
            self.height + 2 * amount,
        )
    }

    /// The closest box to `self` which lies completely inside `output`.
    ///
    /// The result may be smaller than `self`, but never bigger.
    pub fn clamp_to(&self, output: &Self) -> Self {
        let width = clamp_i32(self.width, 0, output.width);
        let height = clamp_i32(self.height, 0, output.height);
        Self::new(
            clamp_i32(self.x, output.x, output.right() - width),
            clamp_i32(self.y, output.y, output.bottom() - height),
            width,
            height,
        )
    }

    /// Map `sub` from the coordinate space of `from` into the coordinate space of `to`.
    ///
    /// The result occupies the same relative part of `to` as `sub` occupies in `from`.
    pub fn scale_box(from: Self, to: Self, sub: Self) -> Self {
        let fw = f64::from(from.width);
        let fh = f64::from(from.height);
        let px = f64::from(sub.x - from.x) / fw;
        let py = f64::from(sub.y - from.y) / fh;
        let px2 = f64::from(sub.right() - from.x) / fw;
        let py2 = f64::from(sub.bottom() - from.y) / fh;

        let x = floor_i32(f64::from(to.x) + f64::from(to.width) * px);
        let y = floor_i32(f64::from(to.y) + f64::from(to.height) * py);
        let x2 = ceil_i32(f64::from(to.x) + f64::from(to.width) * px2);
        let y2 = ceil_i32(f64::from(to.y) + f64::from(to.height) * py2);
        Self::from_corners(x, y, x2, y2)
    }

    /// Convert to a float rectangle.
    #[inline]
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }

    /// The smallest integer box containing a float rectangle.
    pub fn from_rect_outer(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::from_corners(
            floor_i32(rect.x0),
            floor_i32(rect.y0),
            ceil_i32(rect.x1),
            ceil_i32(rect.y1),
        )
    }
}

impl From<Geometry> for Rect {
    #[inline]
    fn from(geometry: Geometry) -> Self {
        geometry.to_rect()
    }
}

impl Add<Point> for Geometry {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Point) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.width, self.height)
    }
}

impl Sub<Point> for Geometry {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Point) -> Self {
        self + -rhs
    }
}

/// Scale the box, flooring the origin and ceiling the far edge so that
/// scaled boxes stay consistent with scaled regions.
impl Mul<f64> for Geometry {
    type Output = Self;

    fn mul(self, scale: f64) -> Self {
        let x = floor_i32(f64::from(self.x) * scale);
        let y = floor_i32(f64::from(self.y) * scale);
        let x1 = ceil_i32(f64::from(self.right()) * scale);
        let y1 = ceil_i32(f64::from(self.bottom()) * scale);
        Self::from_corners(x, y, x1, y1)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{} {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Return the closest value to `value` which lies in `min..=max`.
///
/// If `min > max`, `max` wins.
#[inline]
pub fn clamp_i32(value: i32, min: i32, max: i32) -> i32 {
    value.max(min).min(max)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Pixel coordinates stay well within i32; `as` saturates otherwise."
)]
pub(crate) fn floor_i32(value: f64) -> i32 {
    value.floor() as i32
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Pixel coordinates stay well within i32; `as` saturates otherwise."
)]
pub(crate) fn ceil_i32(value: f64) -> i32 {
    value.ceil() as i32
}
