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

//! # Wifiplan Solver
//!
//! Orchestrates the wifiplan pipeline: router selection under a budget,
//! backbone construction and user assignment, followed by aggregation into a
//! summary.
//!
//! ## Modules
//!
//! - `planner`: `Planner` and `PlannerBuilder`, running the stages in order.
//! - `summary`: `PlanSummary`, the headline figures of a plan.
//! - `stats`: `PlannerStatistics`, per-stage counters and timings.
//! - `monitor`: The `PipelineMonitor` seam with log, composite and no-op
//!   implementations.

pub mod monitor;
pub mod planner;
pub mod stats;
pub mod summary;
