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

//! Kruskal's algorithm over the complete graph of selected routers.
//!
//! Candidate edges are every unordered pair `(a, b)` of selected routers with
//! `a < b` in index order, weighted by Euclidean distance. They are sorted
//! stably by weight, so equal weights keep their generation order, and then
//! accepted whenever they join two different components. The scan stops as
//! soon as `k - 1` edges have been accepted.

use crate::disjoint_set::DisjointSet;
use wifiplan_core::num::PlanNumeric;
use wifiplan_model::{
    index::RouterIndex,
    model::NetworkModel,
    plan::{Backbone, BackboneEdge, Selection},
};

/// Builds the minimum spanning backbone over a router selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KruskalBuilder;

impl KruskalBuilder {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Number of candidate edges considered for `k` selected routers.
    #[inline]
    pub fn num_candidate_edges(k: usize) -> usize {
        k * k.saturating_sub(1) / 2
    }

    /// Computes the backbone of `selection` within `model`.
    ///
    /// Zero or one selected routers produce an empty backbone.
    ///
    /// # Panics
    ///
    /// Panics if `selection` was not made over `model`'s routers.
    pub fn build<T>(&self, model: &NetworkModel<T>, selection: &Selection<T>) -> Backbone
    where
        T: PlanNumeric,
    {
        assert_eq!(
            selection.num_candidates(),
            model.num_routers(),
            "called `KruskalBuilder::build` with a selection over {} routers but the model has {}",
            selection.num_candidates(),
            model.num_routers()
        );

        let nodes: Vec<RouterIndex> = selection.selected_routers().collect();
        let k = nodes.len();
        if k < 2 {
            return Backbone::default();
        }

        let mut candidates: Vec<(usize, usize, f64)> =
            Vec::with_capacity(Self::num_candidate_edges(k));
        for a in 0..k {
            for b in (a + 1)..k {
                candidates.push((a, b, model.router_distance(nodes[a], nodes[b])));
            }
        }
        // `sort_by` is stable.
        candidates.sort_by(|x, y| x.2.total_cmp(&y.2));

        // Unselected routers stay singletons.
        let mut components = DisjointSet::new(model.num_routers());
        let mut edges = Vec::with_capacity(k - 1);
        for (a, b, weight) in candidates {
            let (from, to) = (nodes[a], nodes[b]);
            if components.union(from.get(), to.get()) {
                edges.push(BackboneEdge::new(from, to, weight));
                if edges.len() == k - 1 {
                    break;
                }
            }
        }

        debug_assert_eq!(components.num_sets(), model.num_routers() - (k - 1));
        Backbone::new(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixedbitset::FixedBitSet;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use wifiplan_model::model::{NetworkModelBuilder, RouterRecord};

    type IntegerType = i64;

    fn ri(i: usize) -> RouterIndex {
        RouterIndex::new(i)
    }

    fn build_model(positions: &[(IntegerType, IntegerType)]) -> NetworkModel<IntegerType> {
        let mut builder = NetworkModelBuilder::<IntegerType>::new();
        for (i, &(x, y)) in positions.iter().enumerate() {
            builder.add_router(RouterRecord::new(i as IntegerType + 1, x, y, 1, 1, 1));
        }
        builder.build().expect("valid model")
    }

    fn select(n: usize, chosen: &[usize]) -> Selection<IntegerType> {
        let mut bits = FixedBitSet::with_capacity(n);
        for &i in chosen {
            bits.insert(i);
        }
        Selection::new(bits, chosen.len() as IntegerType, chosen.len() as IntegerType)
    }

    fn select_all(n: usize) -> Selection<IntegerType> {
        select(n, &(0..n).collect::<Vec<_>>())
    }

    /// O(k^2) Prim over the same complete graph; returns the tree weight.
    fn prim_weight(model: &NetworkModel<IntegerType>, nodes: &[RouterIndex]) -> f64 {
        let k = nodes.len();
        if k < 2 {
            return 0.0;
        }
        let mut in_tree = vec![false; k];
        let mut best = vec![f64::INFINITY; k];
        best[0] = 0.0;
        let mut total = 0.0;
        for _ in 0..k {
            let u = (0..k)
                .filter(|&i| !in_tree[i])
                .min_by(|&a, &b| best[a].total_cmp(&best[b]))
                .expect("a node remains");
            in_tree[u] = true;
            total += best[u];
            for v in 0..k {
                if !in_tree[v] {
                    let d = model.router_distance(nodes[u], nodes[v]);
                    if d < best[v] {
                        best[v] = d;
                    }
                }
            }
        }
        total
    }

    fn spans(backbone: &Backbone, nodes: &[RouterIndex]) -> bool {
        let position = |r: RouterIndex| nodes.iter().position(|&n| n == r).expect("selected");
        let mut set = DisjointSet::new(nodes.len());
        for edge in backbone.edges() {
            set.union(position(edge.from()), position(edge.to()));
        }
        set.num_sets() <= 1
    }

    #[test]
    fn test_empty_and_single_selection() {
        let model = build_model(&[(0, 0), (3, 4)]);
        let builder = KruskalBuilder::new();
        assert!(builder.build(&model, &select(2, &[])).is_empty());
        assert!(builder.build(&model, &select(2, &[1])).is_empty());
        assert_eq!(builder.build(&model, &select(2, &[1])).total_length(), 0.0);
    }

    #[test]
    fn test_two_routers() {
        let model = build_model(&[(0, 0), (3, 4)]);
        let backbone = KruskalBuilder::new().build(&model, &select_all(2));
        assert_eq!(backbone.len(), 1);
        assert_eq!(backbone.edges()[0], BackboneEdge::new(ri(0), ri(1), 5.0));
        assert_eq!(backbone.total_length(), 5.0);
    }

    #[test]
    fn test_unselected_routers_are_ignored() {
        // Router 1 sits between the others but is not deployed.
        let model = build_model(&[(0, 0), (5, 0), (10, 0)]);
        let backbone = KruskalBuilder::new().build(&model, &select(3, &[0, 2]));
        assert_eq!(backbone.edges(), &[BackboneEdge::new(ri(0), ri(2), 10.0)]);
    }

    #[test]
    fn test_square_ties_follow_generation_order() {
        // Unit square: the four sides tie at 1.0. Generated order is
        // (0,1) (0,2) (0,3) (1,2) (1,3) (2,3); sides are (0,1) (0,3) (1,2) (2,3).
        let model = build_model(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let backbone = KruskalBuilder::new().build(&model, &select_all(4));
        assert_eq!(
            backbone.edges(),
            &[
                BackboneEdge::new(ri(0), ri(1), 1.0),
                BackboneEdge::new(ri(0), ri(3), 1.0),
                BackboneEdge::new(ri(1), ri(2), 1.0),
            ]
        );
        assert_eq!(backbone.total_length(), 3.0);
    }

    #[test]
    fn test_coincident_routers_yield_zero_length_edges() {
        let model = build_model(&[(2, 2), (2, 2), (2, 2)]);
        let backbone = KruskalBuilder::new().build(&model, &select_all(3));
        assert_eq!(backbone.len(), 2);
        assert_eq!(backbone.total_length(), 0.0);
    }

    #[test]
    fn test_candidate_edge_count() {
        assert_eq!(KruskalBuilder::num_candidate_edges(0), 0);
        assert_eq!(KruskalBuilder::num_candidate_edges(1), 0);
        assert_eq!(KruskalBuilder::num_candidate_edges(2), 1);
        assert_eq!(KruskalBuilder::num_candidate_edges(5), 10);
    }

    #[test]
    fn test_matches_prim_on_random_instances() {
        let mut rng = StdRng::seed_from_u64(0xB0A7_5EED);
        for _ in 0..100 {
            let n = rng.random_range(0..=25);
            let positions: Vec<(IntegerType, IntegerType)> = (0..n)
                .map(|_| (rng.random_range(-50..=50), rng.random_range(-50..=50)))
                .collect();
            let chosen: Vec<usize> = (0..n).filter(|_| rng.random_bool(0.7)).collect();
            let model = build_model(&positions);
            let selection = select(n, &chosen);
            let nodes: Vec<RouterIndex> = selection.selected_routers().collect();

            let backbone = KruskalBuilder::new().build(&model, &selection);
            assert_eq!(backbone.len(), nodes.len().saturating_sub(1));
            assert!(spans(&backbone, &nodes));
            for edge in backbone.edges() {
                assert!(edge.from() < edge.to());
                assert!(selection.is_selected(edge.from()));
                assert!(selection.is_selected(edge.to()));
            }

            let expected = prim_weight(&model, &nodes);
            assert!(
                (backbone.total_length() - expected).abs() <= 1e-9 * expected.max(1.0),
                "kruskal {} vs prim {}",
                backbone.total_length(),
                expected
            );
        }
    }
}
