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

//! Plan summary (the result aggregator).
//!
//! A pure reduction over a finished `NetworkPlan`; it makes no decisions.

use std::io::Write;
use wifiplan_core::num::PlanNumeric;
use wifiplan_model::plan::NetworkPlan;

/// File name of the textual summary written next to the result tables.
pub const SUMMARY_FILE: &str = "summary.txt";

/// Headline figures of a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSummary<T> {
    pub routers_selected: usize,
    pub users_assigned: usize,
    pub users_unassigned: usize,
    /// Sum of the backbone edge lengths.
    pub total_cable_length: f64,
    /// Optimal coverage value found by the selector.
    pub total_coverage: T,
    pub total_cost: T,
}

impl<T> PlanSummary<T>
where
    T: PlanNumeric,
{
    /// Aggregates the three stage results of `plan`.
    pub fn from_plan(plan: &NetworkPlan<T>) -> Self {
        let assignment = plan.assignment();
        Self {
            routers_selected: plan.selection().num_selected(),
            users_assigned: assignment.num_assigned(),
            users_unassigned: assignment.num_users() - assignment.num_assigned(),
            total_cable_length: plan.backbone().total_length(),
            total_coverage: plan.selection().total_coverage(),
            total_cost: plan.selection().total_cost(),
        }
    }

    /// Writes the four-line summary.
    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        write!(w, "{}", self)?;
        w.flush()
    }
}

impl<T> std::fmt::Display for PlanSummary<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total routers selected: {}", self.routers_selected)?;
        writeln!(f, "Total users assigned: {}", self.users_assigned)?;
        writeln!(f, "Total cable length (MST): {:.3}", self.total_cable_length)?;
        writeln!(f, "Total coverage value: {}", self.total_coverage)
    }
}
