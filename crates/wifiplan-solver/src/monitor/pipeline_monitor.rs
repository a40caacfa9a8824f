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

//! Pipeline monitoring interface.
//!
//! A `PipelineMonitor` observes the planner stage by stage. Each callback
//! fires once per run, after the stage named by it has finished, and receives
//! the statistics collected so far.
//!
//! Lifecycle: enter → selection → backbone → assignment → exit.
//! A run rejected before the first stage only sees `on_enter_pipeline`.

use crate::{stats::PlannerStatistics, summary::PlanSummary};
use wifiplan_core::num::PlanNumeric;
use wifiplan_model::{
    model::NetworkModel,
    plan::{AssignmentPlan, Backbone, Selection},
};

/// Trait for observing the stages of a planning run.
pub trait PipelineMonitor<T>
where
    T: PlanNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called before any stage runs.
    fn on_enter_pipeline(&mut self, model: &NetworkModel<T>, budget: T);
    /// Called when the routers to deploy have been chosen.
    fn on_selection(&mut self, selection: &Selection<T>, statistics: &PlannerStatistics);
    /// Called when the backbone has been built.
    fn on_backbone(&mut self, backbone: &Backbone, statistics: &PlannerStatistics);
    /// Called when every user has been processed.
    fn on_assignment(&mut self, assignment: &AssignmentPlan, statistics: &PlannerStatistics);
    /// Called once the plan is complete.
    fn on_exit_pipeline(&mut self, summary: &PlanSummary<T>, statistics: &PlannerStatistics);
}

impl<T> std::fmt::Debug for dyn PipelineMonitor<T>
where
    T: PlanNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PipelineMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn PipelineMonitor<T>
where
    T: PlanNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PipelineMonitor({})", self.name())
    }
}
