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

//! # Planner Numeric Trait
//!
//! Unified numeric bounds for the planner crates. Coordinates, costs, coverage
//! radii, budgets and identities all share one integer type `T`, and
//! `PlanNumeric` collects what the pipeline needs from it into a single alias.
//!
//! - `PrimInt + Signed` so negative inputs are representable and can be
//!   rejected by validation instead of wrapping silently.
//! - `AsPrimitive<i128>` and `AsPrimitive<f64>` for exact squared distances and
//!   Euclidean cable lengths.
//! - `ToPrimitive` (via `PrimInt`) for turning costs into table coordinates.

use num_traits::{AsPrimitive, PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for the signed integer types the planner can work with.
/// In practice these are `i8`, `i16`, `i32`, `i64`, `i128` and `isize`.
pub trait PlanNumeric:
    PrimInt
    + Signed
    + AsPrimitive<i128>
    + AsPrimitive<f64>
    + std::fmt::Debug
    + std::fmt::Display
    + Hash
    + Send
    + Sync
    + 'static
{
}

impl<T> PlanNumeric for T where
    T: PrimInt
        + Signed
        + AsPrimitive<i128>
        + AsPrimitive<f64>
        + std::fmt::Debug
        + std::fmt::Display
        + Hash
        + Send
        + Sync
        + 'static
{
}
