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

//! Fan-out monitor.
//!
//! `CompositeMonitor` forwards every event to its children in insertion order.

use crate::{monitor::pipeline_monitor::PipelineMonitor, stats::PlannerStatistics, summary::PlanSummary};
use wifiplan_core::num::PlanNumeric;
use wifiplan_model::{
    model::NetworkModel,
    plan::{AssignmentPlan, Backbone, Selection},
};

/// A pipeline monitor that forwards events to all of its children.
pub struct CompositeMonitor<'a, T>
where
    T: PlanNumeric,
{
    monitors: Vec<Box<dyn PipelineMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: PlanNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: PlanNumeric,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: PipelineMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn PipelineMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the child monitors in insertion order.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn PipelineMonitor<T> + 'a>] {
        &self.monitors
    }

    /// Returns the number of child monitors.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if there are no child monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn PipelineMonitor<T> + 'a>> for CompositeMonitor<'a, T>
where
    T: PlanNumeric,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn PipelineMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> PipelineMonitor<T> for CompositeMonitor<'a, T>
where
    T: PlanNumeric,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_pipeline(&mut self, model: &NetworkModel<T>, budget: T) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_pipeline(model, budget);
        }
    }

    fn on_selection(&mut self, selection: &Selection<T>, statistics: &PlannerStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_selection(selection, statistics);
        }
    }

    fn on_backbone(&mut self, backbone: &Backbone, statistics: &PlannerStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_backbone(backbone, statistics);
        }
    }

    fn on_assignment(&mut self, assignment: &AssignmentPlan, statistics: &PlannerStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_assignment(assignment, statistics);
        }
    }

    fn on_exit_pipeline(&mut self, summary: &PlanSummary<T>, statistics: &PlannerStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_pipeline(summary, statistics);
        }
    }
}

impl<'a, T> std::fmt::Debug for CompositeMonitor<'a, T>
where
    T: PlanNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.monitors.iter().map(|m| m.name()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};
    use wifiplan_model::model::NetworkModelBuilder;

    struct Recorder {
        tag: &'static str,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl PipelineMonitor<i64> for Recorder {
        fn name(&self) -> &str {
            self.tag
        }

        fn on_enter_pipeline(&mut self, _model: &NetworkModel<i64>, budget: i64) {
            self.events.borrow_mut().push(format!("{}:enter:{}", self.tag, budget));
        }

        fn on_selection(&mut self, _selection: &Selection<i64>, _statistics: &PlannerStatistics) {
            self.events.borrow_mut().push(format!("{}:selection", self.tag));
        }

        fn on_backbone(&mut self, _backbone: &Backbone, _statistics: &PlannerStatistics) {
            self.events.borrow_mut().push(format!("{}:backbone", self.tag));
        }

        fn on_assignment(&mut self, _assignment: &AssignmentPlan, _statistics: &PlannerStatistics) {
            self.events.borrow_mut().push(format!("{}:assignment", self.tag));
        }

        fn on_exit_pipeline(&mut self, _summary: &PlanSummary<i64>, _statistics: &PlannerStatistics) {
            self.events.borrow_mut().push(format!("{}:exit", self.tag));
        }
    }

    #[test]
    fn test_events_fan_out_in_insertion_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeMonitor::<i64>::new();
        composite.add_monitor(Recorder {
            tag: "a",
            events: events.clone(),
        });
        composite.add_monitor_boxed(Box::new(Recorder {
            tag: "b",
            events: events.clone(),
        }));
        assert_eq!(composite.len(), 2);

        let model = NetworkModelBuilder::<i64>::new().build().expect("empty model");
        composite.on_enter_pipeline(&model, 7);
        composite.on_backbone(&Backbone::default(), &PlannerStatistics::default());

        assert_eq!(
            *events.borrow(),
            vec!["a:enter:7", "b:enter:7", "a:backbone", "b:backbone"]
        );
        assert_eq!(format!("{:?}", composite), "CompositeMonitor { monitors: [\"a\", \"b\"] }");
    }

    #[test]
    fn test_empty_composite() {
        let composite: CompositeMonitor<'_, i64> =
            Vec::<Box<dyn PipelineMonitor<i64>>>::new().into_iter().collect();
        assert!(composite.is_empty());
        assert!(composite.monitors().is_empty());
        assert!(CompositeMonitor::<i64>::with_capacity(4).is_empty());
    }

    #[test]
    fn test_collect_keeps_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let children: Vec<Box<dyn PipelineMonitor<i64>>> = ["x", "y"]
            .into_iter()
            .map(|tag| {
                Box::new(Recorder {
                    tag,
                    events: events.clone(),
                }) as Box<dyn PipelineMonitor<i64>>
            })
            .collect();
        let mut composite: CompositeMonitor<'_, i64> = children.into_iter().collect();
        let names: Vec<&str> = composite.monitors().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["x", "y"]);

        let model = NetworkModelBuilder::<i64>::new().build().expect("empty model");
        composite.on_enter_pipeline(&model, 0);
        assert_eq!(*events.borrow(), vec!["x:enter:0", "y:enter:0"]);
    }
}
