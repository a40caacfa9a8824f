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

//! # Wifiplan Core
//!
//! Foundational primitives shared by the wifiplan crates. The planner works on
//! two index spaces (routers and users) and on integer grid positions, and this
//! crate keeps both concerns small, typed and free of domain policy.
//!
//! ## Modules
//!
//! - `geometry`: Integer `Point<T>` positions with exact squared distances
//!   (widened to `i128`) and `f64` Euclidean distances for cable lengths.
//! - `num`: The `PlanNumeric` trait alias bounding the integer type used for
//!   coordinates, costs, radii and budgets.
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`).
//!
//! Refer to each module for detailed APIs and examples.

pub mod geometry;
pub mod num;
pub mod utils;
