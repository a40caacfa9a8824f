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

//! # Wifiplan Model
//!
//! **The domain model of the wifiplan access-network planner.**
//!
//! This crate describes the planning instance (candidate routers and users)
//! and the results of the planning pipeline. It is the data interchange layer
//! between the input tables, the three algorithm crates (`wifiplan_select`,
//! `wifiplan_backbone`, `wifiplan_assign`) and the output tables.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed `RouterIndex` and `UserIndex`.
//! * **`model`**: The immutable `NetworkModel` and the validating `NetworkModelBuilder`.
//! * **`plan`**: Stage results (`Selection`, `Backbone`, `AssignmentPlan`) and the bundled `NetworkPlan`.
//! * **`loading`**: CSV input of router and user tables.
//! * **`export`**: CSV output of the selected routers, backbone edges and assignments.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Router and user indices are distinct types.
//! 2.  **Immutability**: The model never changes once built. Selection flags and router
//!     loads are stage outputs, each written by exactly one stage.
//! 3.  **Fail-Fast**: Contract violations (negative values, duplicate identities) are
//!     rejected by the builder before any algorithm runs.

pub mod export;
pub mod index;
pub mod loading;
pub mod model;
pub mod plan;
