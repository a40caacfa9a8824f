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

use std::time::Duration;
use wifiplan_select::knapsack::SelectionStrategy;

/// Work counters and timings collected while planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerStatistics {
    /// The table layout the selector actually used.
    pub selection_strategy: SelectionStrategy,
    /// Knapsack cells evaluated, `n × (B + 1)` with `B` the working capacity.
    pub dp_cells: u64,
    /// Candidate edges handed to Kruskal, `k (k - 1) / 2`.
    pub candidate_edges: u64,
    /// Router feasibility checks made by the assigner, `users × k`.
    pub routers_scanned: u64,
    pub selection_time: Duration,
    pub backbone_time: Duration,
    pub assignment_time: Duration,
    /// Wall time of the whole pipeline.
    pub time_total: Duration,
}

impl Default for PlannerStatistics {
    fn default() -> Self {
        Self {
            selection_strategy: SelectionStrategy::Auto,
            dp_cells: 0,
            candidate_edges: 0,
            routers_scanned: 0,
            selection_time: Duration::ZERO,
            backbone_time: Duration::ZERO,
            assignment_time: Duration::ZERO,
            time_total: Duration::ZERO,
        }
    }
}

impl PlannerStatistics {
    #[inline]
    pub fn on_selection(&mut self, strategy: SelectionStrategy, dp_cells: u64, elapsed: Duration) {
        self.selection_strategy = strategy;
        self.dp_cells = dp_cells;
        self.selection_time = elapsed;
    }

    #[inline]
    pub fn on_backbone(&mut self, candidate_edges: u64, elapsed: Duration) {
        self.candidate_edges = candidate_edges;
        self.backbone_time = elapsed;
    }

    #[inline]
    pub fn on_assignment(&mut self, routers_scanned: u64, elapsed: Duration) {
        self.routers_scanned = routers_scanned;
        self.assignment_time = elapsed;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for PlannerStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Wifiplan Planner Statistics:")?;
        writeln!(f, "  Selection strategy:   {}", self.selection_strategy)?;
        writeln!(f, "  DP cells:             {}", self.dp_cells)?;
        writeln!(f, "  Candidate edges:      {}", self.candidate_edges)?;
        writeln!(f, "  Routers scanned:      {}", self.routers_scanned)?;
        writeln!(f, "  Selection time:       {:.2?}", self.selection_time)?;
        writeln!(f, "  Backbone time:        {:.2?}", self.backbone_time)?;
        writeln!(f, "  Assignment time:      {:.2?}", self.assignment_time)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
