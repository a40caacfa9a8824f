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

//! # Planning Pipeline
//!
//! `Planner` runs the three stages strictly in sequence over an immutable
//! `NetworkModel`:
//!
//! 1. `KnapsackSelector` picks the routers to deploy under the budget.
//! 2. `KruskalBuilder` connects them with a minimum spanning backbone.
//! 3. `GreedyAssigner` serves users from the deployed routers.
//!
//! Each stage only reads the results of the stages before it. The planner
//! times every stage, reports it to the attached monitors and finally reduces
//! the plan into a `PlanSummary`.
//!
//! ## Usage
//!
//! ```rust
//! use wifiplan_model::model::{NetworkModelBuilder, RouterRecord, UserRecord};
//! use wifiplan_solver::monitor::log::LogMonitor;
//! use wifiplan_solver::planner::PlannerBuilder;
//!
//! let mut builder = NetworkModelBuilder::<i64>::new();
//! builder.add_router(RouterRecord::new(1, 0, 0, 10_000, 5, 2));
//! builder.add_router(RouterRecord::new(2, 10, 0, 15_000, 10, 2));
//! builder.add_user(UserRecord::new(1, 1, 1));
//! let model = builder.build().unwrap();
//!
//! let mut planner = PlannerBuilder::<i64>::new()
//!     .with_budget(25_000)
//!     .add_monitor(LogMonitor::new())
//!     .build();
//!
//! let outcome = planner.plan(&model).unwrap();
//! assert_eq!(outcome.summary().routers_selected, 2);
//! assert_eq!(outcome.summary().users_assigned, 1);
//! ```

use crate::{
    monitor::{composite::CompositeMonitor, pipeline_monitor::PipelineMonitor},
    stats::PlannerStatistics,
    summary::PlanSummary,
};
use std::time::Instant;
use wifiplan_assign::greedy::GreedyAssigner;
use wifiplan_backbone::kruskal::KruskalBuilder;
use wifiplan_core::num::PlanNumeric;
use wifiplan_model::{model::NetworkModel, plan::NetworkPlan};
use wifiplan_select::knapsack::{KnapsackSelector, SelectError, SelectionStrategy};

/// Budget used when none is configured.
pub const DEFAULT_BUDGET: u32 = 30_000;

/// Errors that abort a planning run before a plan exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError<T> {
    /// The configured budget is negative.
    NegativeBudget { budget: T },
    /// The selection stage failed.
    Select(SelectError<T>),
}

impl<T> std::fmt::Display for PlannerError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeBudget { budget } => {
                write!(f, "Budget must be non-negative, got {}", budget)
            }
            Self::Select(e) => write!(f, "Router selection failed: {}", e),
        }
    }
}

impl<T> std::error::Error for PlannerError<T>
where
    T: std::fmt::Debug + std::fmt::Display + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Select(e) => Some(e),
            Self::NegativeBudget { .. } => None,
        }
    }
}

impl<T> From<SelectError<T>> for PlannerError<T> {
    fn from(e: SelectError<T>) -> Self {
        Self::Select(e)
    }
}

/// The result of a successful planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerOutcome<T> {
    plan: NetworkPlan<T>,
    summary: PlanSummary<T>,
    statistics: PlannerStatistics,
}

impl<T> PlannerOutcome<T> {
    #[inline]
    pub fn plan(&self) -> &NetworkPlan<T> {
        &self.plan
    }

    #[inline]
    pub fn summary(&self) -> &PlanSummary<T> {
        &self.summary
    }

    #[inline]
    pub fn statistics(&self) -> &PlannerStatistics {
        &self.statistics
    }

    /// Consumes the outcome and returns the plan.
    #[inline]
    pub fn into_plan(self) -> NetworkPlan<T> {
        self.plan
    }
}

impl<T> std::fmt::Display for PlannerOutcome<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary)?;
        write!(f, "{}", self.statistics)
    }
}

/// The select → backbone → assign pipeline.
pub struct Planner<'a, T>
where
    T: PlanNumeric,
{
    budget: T,
    selector: KnapsackSelector,
    monitor: CompositeMonitor<'a, T>,
}

impl<'a, T> Planner<'a, T>
where
    T: PlanNumeric,
{
    #[inline]
    pub fn budget(&self) -> T {
        self.budget
    }

    #[inline]
    pub fn selector(&self) -> &KnapsackSelector {
        &self.selector
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: PipelineMonitor<T> + 'a,
    {
        self.monitor.add_monitor(monitor);
    }

    /// Plans the network for `model`.
    pub fn plan(&mut self, model: &NetworkModel<T>) -> Result<PlannerOutcome<T>, PlannerError<T>> {
        let start_time = Instant::now();
        self.monitor.on_enter_pipeline(model, self.budget);

        if self.budget < T::zero() {
            return Err(PlannerError::NegativeBudget {
                budget: self.budget,
            });
        }

        let mut statistics = PlannerStatistics::default();

        let stage = Instant::now();
        let selection = self.selector.select(model, self.budget)?;
        let capacity = self.selector.working_capacity(model, self.budget)?;
        let num_routers = model.num_routers();
        statistics.on_selection(
            self.selector.resolve_strategy(num_routers, capacity),
            (num_routers as u64).saturating_mul((capacity as u64).saturating_add(1)),
            stage.elapsed(),
        );
        self.monitor.on_selection(&selection, &statistics);

        let num_selected = selection.num_selected();

        let stage = Instant::now();
        let backbone = KruskalBuilder::new().build(model, &selection);
        statistics.on_backbone(
            KruskalBuilder::num_candidate_edges(num_selected) as u64,
            stage.elapsed(),
        );
        self.monitor.on_backbone(&backbone, &statistics);

        let stage = Instant::now();
        let assignment = GreedyAssigner::new().assign(model, &selection);
        statistics.on_assignment(
            (model.num_users() as u64).saturating_mul(num_selected as u64),
            stage.elapsed(),
        );
        self.monitor.on_assignment(&assignment, &statistics);

        let plan = NetworkPlan::new(selection, backbone, assignment);
        let summary = PlanSummary::from_plan(&plan);
        statistics.set_total_time(start_time.elapsed());
        self.monitor.on_exit_pipeline(&summary, &statistics);

        Ok(PlannerOutcome {
            plan,
            summary,
            statistics,
        })
    }
}

impl<'a, T> std::fmt::Debug for Planner<'a, T>
where
    T: PlanNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("budget", &self.budget)
            .field("selector", &self.selector)
            .field("monitor", &self.monitor)
            .finish()
    }
}

/// Configures a `Planner`.
pub struct PlannerBuilder<'a, T>
where
    T: PlanNumeric,
{
    budget: T,
    selector: KnapsackSelector,
    monitor: CompositeMonitor<'a, T>,
}

impl<'a, T> Default for PlannerBuilder<'a, T>
where
    T: PlanNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> PlannerBuilder<'a, T>
where
    T: PlanNumeric,
{
    /// Creates a builder with `DEFAULT_BUDGET` (clamped to `T::max_value()`)
    /// and the `Auto` selection strategy.
    #[inline]
    pub fn new() -> Self {
        Self {
            budget: num_traits::cast::<u32, T>(DEFAULT_BUDGET).unwrap_or_else(T::max_value),
            selector: KnapsackSelector::new(),
            monitor: CompositeMonitor::new(),
        }
    }

    #[inline]
    pub fn with_budget(mut self, budget: T) -> Self {
        self.budget = budget;
        self
    }

    #[inline]
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.selector = self.selector.with_strategy(strategy);
        self
    }

    #[inline]
    pub fn with_dense_cell_limit(mut self, limit: usize) -> Self {
        self.selector = self.selector.with_dense_cell_limit(limit);
        self
    }

    #[inline]
    pub fn add_monitor<M>(mut self, monitor: M) -> Self
    where
        M: PipelineMonitor<T> + 'a,
    {
        self.monitor.add_monitor(monitor);
        self
    }

    #[inline]
    pub fn add_monitor_boxed(mut self, monitor: Box<dyn PipelineMonitor<T> + 'a>) -> Self {
        self.monitor.add_monitor_boxed(monitor);
        self
    }

    #[inline]
    pub fn build(self) -> Planner<'a, T> {
        Planner {
            budget: self.budget,
            selector: self.selector,
            monitor: self.monitor,
        }
    }
}
