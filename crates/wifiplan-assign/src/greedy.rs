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

//! Greedy least-loaded demand assignment.
//!
//! Users are processed strictly in listing order. For each user every selected
//! router is scanned in listing order; a router is feasible when it covers the
//! user and its load is still below its capacity. The feasible router with the
//! strictly smallest load wins, so the first-listed one wins load ties. Its
//! load is incremented before the next user is considered. A user with no
//! feasible router stays unassigned.
//!
//! The outcome depends on both orders. There is no reassignment pass and no
//! preference for nearer routers among equally loaded ones.

use wifiplan_core::num::PlanNumeric;
use wifiplan_model::{
    index::RouterIndex,
    model::NetworkModel,
    plan::{AssignmentPlan, Selection},
};

/// One-pass greedy assignment of users to selected routers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GreedyAssigner;

impl GreedyAssigner {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Assigns the users of `model` to the routers in `selection`.
    ///
    /// # Panics
    ///
    /// Panics if `selection` was not made over `model`'s routers.
    pub fn assign<T>(&self, model: &NetworkModel<T>, selection: &Selection<T>) -> AssignmentPlan
    where
        T: PlanNumeric,
    {
        assert_eq!(
            selection.num_candidates(),
            model.num_routers(),
            "called `GreedyAssigner::assign` with a selection over {} routers but the model has {}",
            selection.num_candidates(),
            model.num_routers()
        );

        let routers: Vec<RouterIndex> = selection
            .selected_routers()
            .filter(|&r| model.router_capacity(r) > 0)
            .collect();
        let mut plan = AssignmentPlan::new(model.num_routers(), model.num_users());

        for user in model.user_indices() {
            let mut best: Option<(RouterIndex, usize)> = None;
            for &router in &routers {
                let load = plan.router_load(router);
                if load >= model.router_capacity(router) || !model.router_covers(router, user) {
                    continue;
                }
                if best.is_none_or(|(_, best_load)| load < best_load) {
                    best = Some((router, load));
                }
            }
            if let Some((router, _)) = best {
                plan.assign(user, router);
            }
        }

        plan
    }
}
