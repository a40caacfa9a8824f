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

use crate::{monitor::pipeline_monitor::PipelineMonitor, stats::PlannerStatistics, summary::PlanSummary};
use std::time::Instant;
use tracing::{debug, info};
use wifiplan_core::num::PlanNumeric;
use wifiplan_model::{
    model::NetworkModel,
    plan::{AssignmentPlan, Backbone, Selection},
};

/// Reports pipeline progress as `tracing` events.
///
/// Stage results are logged at `info`, per-item details at `debug`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
}

impl LogMonitor {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor")
    }
}

impl<T> PipelineMonitor<T> for LogMonitor
where
    T: PlanNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_pipeline(&mut self, model: &NetworkModel<T>, budget: T) {
        self.start_time = Instant::now();
        info!(
            routers = model.num_routers(),
            users = model.num_users(),
            budget = %budget,
            "planning started"
        );
    }

    fn on_selection(&mut self, selection: &Selection<T>, statistics: &PlannerStatistics) {
        info!(
            selected = selection.num_selected(),
            candidates = selection.num_candidates(),
            coverage = %selection.total_coverage(),
            cost = %selection.total_cost(),
            strategy = %statistics.selection_strategy,
            cells = statistics.dp_cells,
            elapsed = ?statistics.selection_time,
            "routers selected"
        );
        for router in selection.selected_routers() {
            debug!(router = %router, "router deployed");
        }
    }

    fn on_backbone(&mut self, backbone: &Backbone, statistics: &PlannerStatistics) {
        info!(
            edges = backbone.len(),
            length = backbone.total_length(),
            candidates = statistics.candidate_edges,
            elapsed = ?statistics.backbone_time,
            "backbone built"
        );
        for edge in backbone.edges() {
            debug!(from = %edge.from(), to = %edge.to(), length = edge.weight(), "backbone edge");
        }
    }

    fn on_assignment(&mut self, assignment: &AssignmentPlan, statistics: &PlannerStatistics) {
        info!(
            assigned = assignment.num_assigned(),
            unassigned = assignment.num_users() - assignment.num_assigned(),
            scanned = statistics.routers_scanned,
            elapsed = ?statistics.assignment_time,
            "users assigned"
        );
        for user in assignment.unassigned_users() {
            debug!(user = %user, "no feasible router");
        }
    }

    fn on_exit_pipeline(&mut self, summary: &PlanSummary<T>, _statistics: &PlannerStatistics) {
        info!(
            routers = summary.routers_selected,
            users = summary.users_assigned,
            cable = summary.total_cable_length,
            coverage = %summary.total_coverage,
            elapsed = ?self.start_time.elapsed(),
            "planning finished"
        );
    }
}
