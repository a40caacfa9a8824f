// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::num::PlanNumeric;
use num_traits::AsPrimitive;

/// A position on the integer planning grid.
///
/// # Examples
///
/// ```rust
/// # use wifiplan_core::geometry::point::Point;
/// let a = Point::new(0i64, 0);
/// let b = Point::new(3i64, 4);
/// assert_eq!(a.squared_distance(&b), 25);
/// assert_eq!(a.distance(&b), 5.0);
/// assert!(a.is_within(&b, 5));
/// assert!(!a.is_within(&b, 4));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Point<T> {
    x: T,
    y: T,
}

impl<T> Point<T>
where
    T: PlanNumeric,
{
    /// Creates a new point at `(x, y)`.
    #[inline(always)]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    #[inline(always)]
    pub fn x(&self) -> T {
        self.x
    }

    /// Returns the y coordinate.
    #[inline(always)]
    pub fn y(&self) -> T {
        self.y
    }

    /// Returns the exact squared Euclidean distance to `other`.
    ///
    /// The computation is carried out in 128-bit arithmetic and saturates at
    /// `u128::MAX`, which only happens for coordinates near the bounds of
    /// `i128` and is still ordered correctly against any squared radius.
    #[inline]
    pub fn squared_distance(&self, other: &Self) -> u128 {
        let dx = axis_delta(self.x, other.x);
        let dy = axis_delta(self.y, other.y);
        match (dx.checked_mul(dx), dy.checked_mul(dy)) {
            (Some(sx), Some(sy)) => sx.saturating_add(sy),
            _ => u128::MAX,
        }
    }

    /// Returns the Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = to_f64(self.x) - to_f64(other.x);
        let dy = to_f64(self.y) - to_f64(other.y);
        dx.hypot(dy)
    }

    /// Returns `true` if `other` lies within `radius` of this point
    /// (boundary inclusive). A negative radius covers nothing.
    #[inline]
    pub fn is_within(&self, other: &Self, radius: T) -> bool {
        if radius < T::zero() {
            return false;
        }

        let r = axis_delta(radius, T::zero());
        match r.checked_mul(r) {
            Some(r_sq) => self.squared_distance(other) <= r_sq,
            None => true,
        }
    }
}

impl<T> std::fmt::Display for Point<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T> From<(T, T)> for Point<T>
where
    T: PlanNumeric,
{
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

/// Absolute difference of two coordinates, widened to `u128`.
#[inline(always)]
fn axis_delta<T>(a: T, b: T) -> u128
where
    T: PlanNumeric,
{
    let a = <T as AsPrimitive<i128>>::as_(a);
    let b = <T as AsPrimitive<i128>>::as_(b);
    a.abs_diff(b)
}

#[inline(always)]
fn to_f64<T>(v: T) -> f64
where
    T: PlanNumeric,
{
    <T as AsPrimitive<f64>>::as_(v)
}
