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

//! Result types produced by the three pipeline stages.
//!
//! Each stage owns exactly one piece of mutable planning state and hands it
//! on as an immutable value:
//!
//! - `Selection`: which routers are deployed (written only by the selector).
//! - `Backbone`: the wired tree connecting the deployed routers.
//! - `AssignmentPlan`: which router serves which user, plus final router loads
//!   (written only by the assigner).
//!
//! `NetworkPlan` bundles the three for reporting and export.

use crate::index::{RouterIndex, UserIndex};
use fixedbitset::FixedBitSet;

/// The set of deployed routers and the coverage value they achieve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection<T> {
    /// `selected[r]` is set iff router `r` is deployed.
    selected: FixedBitSet,
    /// Sum of the coverage values of the deployed routers.
    total_coverage: T,
    /// Sum of the deployment costs of the deployed routers.
    total_cost: T,
}

impl<T> Selection<T>
where
    T: Copy,
{
    /// Constructs a new `Selection` over `selected.len()` candidate routers.
    #[inline]
    pub fn new(selected: FixedBitSet, total_coverage: T, total_cost: T) -> Self {
        Self {
            selected,
            total_coverage,
            total_cost,
        }
    }

    /// Returns `true` if the given router is deployed.
    ///
    /// # Panics
    ///
    /// Panics if `router_index` is not in `0..num_candidates()`.
    #[inline]
    pub fn is_selected(&self, router_index: RouterIndex) -> bool {
        let index = router_index.get();
        debug_assert!(
            index < self.num_candidates(),
            "called `Selection::is_selected` with router index out of bounds: the len is {} but the index is {}",
            self.num_candidates(),
            index
        );

        self.selected.contains(index)
    }

    /// Returns the number of candidate routers the selection was made over.
    #[inline]
    pub fn num_candidates(&self) -> usize {
        self.selected.len()
    }

    /// Returns the number of deployed routers.
    #[inline]
    pub fn num_selected(&self) -> usize {
        self.selected.count_ones(..)
    }

    /// Returns `true` if no router is deployed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selected.is_clear()
    }

    /// Returns the deployed routers in ascending listing order.
    #[inline]
    pub fn selected_routers(&self) -> impl Iterator<Item = RouterIndex> + '_ {
        self.selected.ones().map(RouterIndex::new)
    }

    /// Returns the total coverage value of the deployed routers.
    #[inline]
    pub fn total_coverage(&self) -> T {
        self.total_coverage
    }

    /// Returns the total deployment cost of the deployed routers.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Returns the underlying bitset over router indices.
    #[inline]
    pub fn as_bitset(&self) -> &FixedBitSet {
        &self.selected
    }
}

impl<T> std::fmt::Display for Selection<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Selection({} of {} routers, coverage={}, cost={})",
            self.num_selected(),
            self.num_candidates(),
            self.total_coverage,
            self.total_cost
        )
    }
}

/// A wired link between two deployed routers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackboneEdge {
    from: RouterIndex,
    to: RouterIndex,
    weight: f64,
}

impl BackboneEdge {
    /// Creates a new edge. Endpoints are stored as given.
    #[inline]
    pub fn new(from: RouterIndex, to: RouterIndex, weight: f64) -> Self {
        debug_assert!(
            weight >= 0.0,
            "called `BackboneEdge::new` with negative weight {}",
            weight
        );

        Self { from, to, weight }
    }

    /// Returns the first endpoint (the lower listing index for Kruskal edges).
    #[inline]
    pub fn from(&self) -> RouterIndex {
        self.from
    }

    /// Returns the second endpoint.
    #[inline]
    pub fn to(&self) -> RouterIndex {
        self.to
    }

    /// Returns the Euclidean length of the link.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns `true` if the edge connects `a` and `b` in either direction.
    #[inline]
    pub fn connects(&self, a: RouterIndex, b: RouterIndex) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// The spanning tree connecting all deployed routers, in acceptance order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Backbone {
    edges: Vec<BackboneEdge>,
}

impl Backbone {
    /// Creates a backbone from accepted edges.
    #[inline]
    pub fn new(edges: Vec<BackboneEdge>) -> Self {
        Self { edges }
    }

    /// Returns the accepted edges in the order they were added to the tree.
    #[inline]
    pub fn edges(&self) -> &[BackboneEdge] {
        &self.edges
    }

    /// Returns the number of links.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the backbone has no links.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the total cable length, the sum of all edge weights.
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.edges.iter().map(BackboneEdge::weight).sum()
    }
}

/// A user served by a deployed router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub user: UserIndex,
    pub router: RouterIndex,
}

/// The outcome of the demand assignment stage.
///
/// Users without a feasible router have no `Assignment`; they are reported
/// by `unassigned_users` and never as an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentPlan {
    /// Assignment records in user processing order.
    assignments: Vec<Assignment>,
    /// `user_routers[u]` is the serving router of user `u`, if any.
    user_routers: Vec<Option<RouterIndex>>,
    /// `loads[r]` is the final number of users served by router `r`.
    loads: Vec<usize>,
}

impl AssignmentPlan {
    /// Creates an empty plan for the given numbers of routers and users.
    #[inline]
    pub fn new(num_routers: usize, num_users: usize) -> Self {
        Self {
            assignments: Vec::with_capacity(num_users),
            user_routers: vec![None; num_users],
            loads: vec![0; num_routers],
        }
    }

    /// Records that `user` is served by `router` and increments its load.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds. In debug builds, also panics
    /// if the user was already assigned.
    #[inline]
    pub fn assign(&mut self, user: UserIndex, router: RouterIndex) {
        debug_assert!(
            self.user_routers[user.get()].is_none(),
            "called `AssignmentPlan::assign` for user {} which is already assigned",
            user.get()
        );

        self.user_routers[user.get()] = Some(router);
        self.loads[router.get()] += 1;
        self.assignments.push(Assignment { user, router });
    }

    /// Returns the assignment records in user processing order.
    #[inline]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Returns the number of assigned users.
    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.assignments.len()
    }

    /// Returns the number of users the plan was made for.
    #[inline]
    pub fn num_users(&self) -> usize {
        self.user_routers.len()
    }

    /// Returns the router serving `user`, or `None` if it stayed unassigned.
    #[inline]
    pub fn router_for_user(&self, user: UserIndex) -> Option<RouterIndex> {
        self.user_routers[user.get()]
    }

    /// Returns the users that could not be served, in processing order.
    #[inline]
    pub fn unassigned_users(&self) -> impl Iterator<Item = UserIndex> + '_ {
        self.user_routers
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_none())
            .map(|(u, _)| UserIndex::new(u))
    }

    /// Returns the current load of `router`.
    #[inline]
    pub fn router_load(&self, router: RouterIndex) -> usize {
        self.loads[router.get()]
    }

    /// Returns the loads of all routers, indexed by `RouterIndex`.
    #[inline]
    pub fn loads(&self) -> &[usize] {
        &self.loads
    }
}

/// The complete result of one planning run.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkPlan<T> {
    selection: Selection<T>,
    backbone: Backbone,
    assignment: AssignmentPlan,
}

impl<T> NetworkPlan<T>
where
    T: Copy,
{
    /// Bundles the outputs of the three stages.
    ///
    /// # Panics
    ///
    /// Panics if the selection and the assignment plan disagree on the
    /// number of routers.
    pub fn new(selection: Selection<T>, backbone: Backbone, assignment: AssignmentPlan) -> Self {
        assert_eq!(
            selection.num_candidates(),
            assignment.loads().len(),
            "called `NetworkPlan::new` with inconsistent router counts: selection has {} but assignment has {}",
            selection.num_candidates(),
            assignment.loads().len()
        );

        Self {
            selection,
            backbone,
            assignment,
        }
    }

    /// Returns the router selection.
    #[inline]
    pub fn selection(&self) -> &Selection<T> {
        &self.selection
    }

    /// Returns the backbone tree.
    #[inline]
    pub fn backbone(&self) -> &Backbone {
        &self.backbone
    }

    /// Returns the user assignment.
    #[inline]
    pub fn assignment(&self) -> &AssignmentPlan {
        &self.assignment
    }
}
