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
use wifiplan_core::num::PlanNumeric;
use wifiplan_model::{
    model::NetworkModel,
    plan::{AssignmentPlan, Backbone, Selection},
};

/// A monitor that ignores every event.
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NoOperationMonitor<T> {
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> PipelineMonitor<T> for NoOperationMonitor<T>
where
    T: PlanNumeric,
{
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_pipeline(&mut self, _model: &NetworkModel<T>, _budget: T) {}

    #[inline(always)]
    fn on_selection(&mut self, _selection: &Selection<T>, _statistics: &PlannerStatistics) {}

    #[inline(always)]
    fn on_backbone(&mut self, _backbone: &Backbone, _statistics: &PlannerStatistics) {}

    #[inline(always)]
    fn on_assignment(&mut self, _assignment: &AssignmentPlan, _statistics: &PlannerStatistics) {}

    #[inline(always)]
    fn on_exit_pipeline(&mut self, _summary: &PlanSummary<T>, _statistics: &PlannerStatistics) {}
}
