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

//! Budgeted router selection as a 0/1 knapsack.
//!
//! Every candidate router is an item whose weight is its deployment cost and
//! whose value is its coverage radius. The selector maximizes the summed
//! coverage value subject to the summed cost not exceeding the budget `B`.
//!
//! Forward pass: cell `(i, j)` holds the best coverage reachable with the
//! first `i` routers and a spend of at most `j`:
//!
//! ```raw
//! cell(0, j) = 0
//! cell(i, j) = cell(i-1, j)                                   if cost_i > j
//!            = max(cell(i-1, j), cell(i-1, j-cost_i) + cov_i)  otherwise
//! ```
//!
//! Backtrack: starting at `(n, B)`, router `i` is selected iff
//! `cell(i, j) != cell(i-1, j)`, after which `j` drops by `cost_i`.
//! The table is only as wide as it needs to be: `B` is clamped to the summed
//! cost of the routers that fit it, which leaves every reachable cell intact.
//!
//! A router whose exclusion is still optimal at its column stays out, so when
//! several subsets reach the optimum the earlier-listed routers win.
//!
//! Two table layouts produce bit-identical selections:
//!
//! - `Dense`: the full `(n+1) × (B+1)` value table.
//! - `Compact`: one rolling row of `B+1` values plus a `FixedBitSet` of
//!   `n × (B+1)` "take" bits recording exactly where `cell(i, j)` differs
//!   from `cell(i-1, j)`, which is all the backtrack reads.

use fixedbitset::FixedBitSet;
use wifiplan_core::num::PlanNumeric;
use wifiplan_model::{index::RouterIndex, model::NetworkModel, plan::Selection};

/// Default upper bound on dense table cells before `Auto` switches to `Compact`.
pub const DEFAULT_DENSE_CELL_LIMIT: usize = 1 << 22;

/// The table layout used by the forward pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SelectionStrategy {
    /// Full value table, `O(n·B)` values.
    Dense,
    /// Rolling value row plus inclusion bitset, `O(B)` values and `O(n·B)` bits.
    Compact,
    /// `Dense` while the table fits the configured cell limit, `Compact` beyond.
    #[default]
    Auto,
}

impl std::fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionStrategy::Dense => write!(f, "dense"),
            SelectionStrategy::Compact => write!(f, "compact"),
            SelectionStrategy::Auto => write!(f, "auto"),
        }
    }
}

impl std::str::FromStr for SelectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dense" => Ok(SelectionStrategy::Dense),
            "compact" => Ok(SelectionStrategy::Compact),
            "auto" => Ok(SelectionStrategy::Auto),
            other => Err(format!("unknown selection strategy '{}'", other)),
        }
    }
}

/// Errors of the selection stage. All of them are detected before or while
/// filling the table and abort the run without a partial selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError<T> {
    /// The budget is negative.
    NegativeBudget { budget: T },
    /// The budget cannot be used as a table dimension on this platform.
    BudgetTooLarge { budget: T },
    /// Adding this router's coverage overflows the value type.
    CoverageOverflow { router_index: RouterIndex },
}

impl<T> std::fmt::Display for SelectError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeBudget { budget } => write!(f, "Budget {} is negative", budget),
            Self::BudgetTooLarge { budget } => {
                write!(f, "Budget {} exceeds the addressable table size", budget)
            }
            Self::CoverageOverflow { router_index } => write!(
                f,
                "Total coverage overflows when adding router {}",
                router_index.get()
            ),
        }
    }
}

impl<T> std::error::Error for SelectError<T> where T: std::fmt::Debug + std::fmt::Display {}

/// The 0/1 knapsack router selector.
///
/// # Examples
///
/// ```rust
/// # use wifiplan_model::model::{NetworkModelBuilder, RouterRecord};
/// # use wifiplan_model::index::RouterIndex;
/// # use wifiplan_select::knapsack::KnapsackSelector;
/// let mut builder = NetworkModelBuilder::<i64>::new();
/// builder.add_router(RouterRecord::new(1, 0, 0, 10_000, 5, 2));
/// builder.add_router(RouterRecord::new(2, 0, 0, 15_000, 10, 2));
/// builder.add_router(RouterRecord::new(3, 0, 0, 20_000, 15, 2));
/// let model = builder.build().unwrap();
///
/// let selection = KnapsackSelector::new().select(&model, 25_000).unwrap();
/// assert_eq!(selection.total_coverage(), 15);
/// assert!(selection.is_selected(RouterIndex::new(0)));
/// assert!(selection.is_selected(RouterIndex::new(1)));
/// assert!(!selection.is_selected(RouterIndex::new(2)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnapsackSelector {
    strategy: SelectionStrategy,
    dense_cell_limit: usize,
}

impl Default for KnapsackSelector {
    fn default() -> Self {
        Self {
            strategy: SelectionStrategy::Auto,
            dense_cell_limit: DEFAULT_DENSE_CELL_LIMIT,
        }
    }
}

impl KnapsackSelector {
    /// Creates a selector with the `Auto` strategy and the default cell limit.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the table layout.
    #[inline]
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the largest dense table (in cells) `Auto` is allowed to allocate.
    #[inline]
    pub fn with_dense_cell_limit(mut self, limit: usize) -> Self {
        self.dense_cell_limit = limit;
        self
    }

    /// Returns the configured strategy.
    #[inline]
    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Returns the concrete layout used for `num_routers` items and a table
    /// width of `budget + 1` columns. Never returns `Auto`.
    #[inline]
    pub fn resolve_strategy(&self, num_routers: usize, budget: usize) -> SelectionStrategy {
        match self.strategy {
            SelectionStrategy::Auto => match dense_cells(num_routers, budget) {
                Some(cells) if cells <= self.dense_cell_limit => SelectionStrategy::Dense,
                _ => SelectionStrategy::Compact,
            },
            fixed => fixed,
        }
    }

    /// Returns the last table column the selector works with for `budget`.
    ///
    /// This is `budget` clamped to the summed cost of all routers that fit
    /// it, since no selection can spend more. The table has one column more.
    pub fn working_capacity<T>(&self, model: &NetworkModel<T>, budget: T) -> Result<usize, SelectError<T>>
    where
        T: PlanNumeric,
    {
        if budget < T::zero() {
            return Err(SelectError::NegativeBudget { budget });
        }
        Ok(affordable_costs(model, budget).1)
    }

    /// Selects the routers to deploy under `budget`.
    pub fn select<T>(&self, model: &NetworkModel<T>, budget: T) -> Result<Selection<T>, SelectError<T>>
    where
        T: PlanNumeric,
    {
        if budget < T::zero() {
            return Err(SelectError::NegativeBudget { budget });
        }
        let (costs, capacity) = affordable_costs(model, budget);
        let width = capacity
            .checked_add(1)
            .ok_or(SelectError::BudgetTooLarge { budget })?;

        let num_routers = model.num_routers();
        let values = model.router_coverages();

        let taken = match self.resolve_strategy(num_routers, capacity) {
            SelectionStrategy::Dense => {
                if dense_cells(num_routers, capacity).is_none() {
                    return Err(SelectError::BudgetTooLarge { budget });
                }
                DenseTable::fill(&costs, values, width)?.backtrack(&costs)
            }
            _ => {
                if num_routers.checked_mul(width).is_none() {
                    return Err(SelectError::BudgetTooLarge { budget });
                }
                CompactTable::fill(&costs, values, width)?.backtrack(&costs)
            }
        };

        let mut total_coverage = T::zero();
        let mut total_cost = T::zero();
        for r in taken.ones() {
            total_coverage = total_coverage + values[r];
            total_cost = total_cost + model.router_cost(RouterIndex::new(r));
        }
        debug_assert!(
            total_cost <= budget,
            "called `KnapsackSelector::select` produced a selection of cost {} over budget {}",
            total_cost,
            budget
        );

        Ok(Selection::new(taken, total_coverage, total_cost))
    }
}

/// Costs as table coordinates (`None` when a router never fits `budget`)
/// and the working capacity `min(budget, Σ fitting costs)`.
///
/// `cell(i, j)` is constant for `j` beyond the summed cost, so clamping keeps
/// both the optimum and the backtrack unchanged. Expects `budget >= 0`.
fn affordable_costs<T>(model: &NetworkModel<T>, budget: T) -> (Vec<Option<usize>>, usize)
where
    T: PlanNumeric,
{
    // A budget beyond `usize` is clamped by the cost sum below.
    let budget = budget.to_usize().unwrap_or(usize::MAX);
    let costs: Vec<Option<usize>> = model
        .router_costs()
        .iter()
        .map(|c| c.to_usize().filter(|&c| c <= budget))
        .collect();
    let total = costs
        .iter()
        .flatten()
        .fold(0usize, |acc, &c| acc.saturating_add(c));
    (costs, budget.min(total))
}

/// Number of cells of the dense `(n+1) × (B+1)` table, if addressable.
#[inline]
pub fn dense_cells(num_routers: usize, budget: usize) -> Option<usize> {
    num_routers
        .checked_add(1)?
        .checked_mul(budget.checked_add(1)?)
}

#[inline(always)]
fn offer<T>(base: T, value: T, item: usize) -> Result<T, SelectError<T>>
where
    T: PlanNumeric,
{
    base.checked_add(&value)
        .ok_or(SelectError::CoverageOverflow {
            router_index: RouterIndex::new(item),
        })
}

/// The full `(n+1) × (B+1)` table, stored row-major.
struct DenseTable<T> {
    cells: Vec<T>,
    width: usize,
}

impl<T> DenseTable<T>
where
    T: PlanNumeric,
{
    fn fill(costs: &[Option<usize>], values: &[T], width: usize) -> Result<Self, SelectError<T>> {
        let n = costs.len();
        let mut cells = vec![T::zero(); (n + 1) * width];

        for i in 1..=n {
            let (prev, cur) = cells.split_at_mut(i * width);
            let prev = &prev[(i - 1) * width..];
            let cur = &mut cur[..width];
            for j in 0..width {
                cur[j] = match costs[i - 1] {
                    Some(cost) if cost <= j => {
                        let with = offer(prev[j - cost], values[i - 1], i - 1)?;
                        prev[j].max(with)
                    }
                    _ => prev[j],
                };
            }
        }

        Ok(Self { cells, width })
    }

    #[inline(always)]
    fn cell(&self, i: usize, j: usize) -> T {
        self.cells[i * self.width + j]
    }

    fn backtrack(&self, costs: &[Option<usize>]) -> FixedBitSet {
        let n = costs.len();
        let mut taken = FixedBitSet::with_capacity(n);
        let mut j = self.width - 1;
        for i in (1..=n).rev() {
            if self.cell(i, j) != self.cell(i - 1, j) {
                taken.insert(i - 1);
                // A differing cell implies the router was affordable at column j.
                if let Some(cost) = costs[i - 1] {
                    j -= cost;
                }
            }
        }
        taken
    }
}

/// A rolling value row plus one "take" bit per `(router, column)`.
struct CompactTable {
    take: FixedBitSet,
    width: usize,
}

impl CompactTable {
    fn fill<T>(costs: &[Option<usize>], values: &[T], width: usize) -> Result<Self, SelectError<T>>
    where
        T: PlanNumeric,
    {
        let n = costs.len();
        let mut row = vec![T::zero(); width];
        let mut take = FixedBitSet::with_capacity(n * width);

        for (item, cost) in costs.iter().enumerate() {
            let Some(cost) = *cost else {
                continue;
            };
            // Descending columns keep row[j - cost] at its previous-row value.
            for j in (cost..width).rev() {
                let with = offer(row[j - cost], values[item], item)?;
                if with > row[j] {
                    row[j] = with;
                    take.insert(item * width + j);
                }
            }
        }

        Ok(Self { take, width })
    }

    fn backtrack(&self, costs: &[Option<usize>]) -> FixedBitSet {
        let n = costs.len();
        let mut taken = FixedBitSet::with_capacity(n);
        let mut j = self.width - 1;
        for item in (0..n).rev() {
            if self.take.contains(item * self.width + j) {
                taken.insert(item);
                if let Some(cost) = costs[item] {
                    j -= cost;
                }
            }
        }
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use wifiplan_model::model::{NetworkModelBuilder, RouterRecord};

    type IntegerType = i64;

    fn ri(i: usize) -> RouterIndex {
        RouterIndex::new(i)
    }

    /// Builds a model from `(cost, coverage)` pairs.
    fn build_model(items: &[(IntegerType, IntegerType)]) -> NetworkModel<IntegerType> {
        let mut builder = NetworkModelBuilder::<IntegerType>::new();
        for (i, &(cost, coverage)) in items.iter().enumerate() {
            let id = i as IntegerType + 1;
            builder.add_router(RouterRecord::new(id, id, 0, cost, coverage, 1));
        }
        builder.build().expect("valid model")
    }

    fn selected(selection: &Selection<IntegerType>) -> Vec<usize> {
        selection.selected_routers().map(|r| r.get()).collect()
    }

    fn brute_force_optimum(items: &[(IntegerType, IntegerType)], budget: IntegerType) -> IntegerType {
        let n = items.len();
        let mut best = 0;
        for mask in 0u32..(1 << n) {
            let (mut cost, mut value) = (0, 0);
            for (i, &(c, v)) in items.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    cost += c;
                    value += v;
                }
            }
            if cost <= budget {
                best = best.max(value);
            }
        }
        best
    }

    fn dense() -> KnapsackSelector {
        KnapsackSelector::new().with_strategy(SelectionStrategy::Dense)
    }

    fn compact() -> KnapsackSelector {
        KnapsackSelector::new().with_strategy(SelectionStrategy::Compact)
    }

    #[test]
    fn test_three_router_fixture() {
        // {0, 1} and {2} both reach coverage 15 within 25000; the earlier pair wins.
        let model = build_model(&[(10_000, 5), (15_000, 10), (20_000, 15)]);
        for selector in [dense(), compact()] {
            let selection = selector.select(&model, 25_000).expect("select");
            assert_eq!(selection.total_coverage(), 15);
            assert_eq!(selection.total_cost(), 25_000);
            assert_eq!(selected(&selection), vec![0, 1]);
        }
    }

    #[test]
    fn test_budget_far_above_catalog_cost_is_clamped() {
        let model = build_model(&[(10_000, 5), (15_000, 10), (20_000, 15)]);
        let budget = 1_000_000_000_000_000;
        assert_eq!(KnapsackSelector::new().working_capacity(&model, budget), Ok(45_000));
        for selector in [KnapsackSelector::new(), dense(), compact()] {
            let selection = selector.select(&model, budget).expect("select");
            assert_eq!(selected(&selection), vec![0, 1, 2]);
            assert_eq!(selection.total_coverage(), 30);
            assert_eq!(selection.total_cost(), 45_000);
        }
    }

    #[test]
    fn test_clamping_keeps_the_selection() {
        // Router 2 never fits and does not count toward the clamp.
        let model = build_model(&[(3, 4), (5, 6), (500, 100), (4, 4)]);
        assert_eq!(dense().working_capacity(&model, 100), Ok(12));
        assert_eq!(dense().working_capacity(&model, 9), Ok(9));
        assert_eq!(
            dense().working_capacity(&model, -1),
            Err(SelectError::NegativeBudget { budget: -1 })
        );
        for budget in [9, 12, 100, IntegerType::MAX] {
            let a = dense().select(&model, budget).expect("dense");
            let b = compact().select(&model, budget).expect("compact");
            assert_eq!(a, b);
        }
        let selection = dense().select(&model, 9).expect("select");
        assert_eq!(selected(&selection), vec![0, 1]);
        assert_eq!(selection.total_coverage(), 10);
    }

    #[test]
    fn test_zero_budget_selects_nothing() {
        let model = build_model(&[(10, 5), (1, 1), (3, 7)]);
        for selector in [dense(), compact()] {
            let selection = selector.select(&model, 0).expect("select");
            assert!(selection.is_empty());
            assert_eq!(selection.total_coverage(), 0);
            assert_eq!(selection.total_cost(), 0);
            assert_eq!(selection.num_candidates(), 3);
        }
    }

    #[test]
    fn test_zero_cost_router_is_free_coverage() {
        let model = build_model(&[(0, 4), (5, 3)]);
        let selection = dense().select(&model, 0).expect("select");
        assert_eq!(selected(&selection), vec![0]);
        assert_eq!(selection.total_coverage(), 4);
    }

    #[test]
    fn test_router_over_budget_is_never_selected() {
        let model = build_model(&[(101, 1_000), (40, 1), (60, 2)]);
        for selector in [dense(), compact()] {
            let selection = selector.select(&model, 100).expect("select");
            assert!(!selection.is_selected(ri(0)));
            assert_eq!(selected(&selection), vec![1, 2]);
            assert_eq!(selection.total_coverage(), 3);
        }
    }

    #[test]
    fn test_equal_alternatives_keep_the_earlier_router() {
        let model = build_model(&[(5, 7), (5, 7)]);
        for selector in [dense(), compact()] {
            let selection = selector.select(&model, 5).expect("select");
            assert_eq!(selected(&selection), vec![0]);
        }

        // With room for both, both are taken.
        let selection = dense().select(&model, 10).expect("select");
        assert_eq!(selected(&selection), vec![0, 1]);
    }

    #[test]
    fn test_zero_coverage_router_is_not_selected() {
        let model = build_model(&[(1, 0), (1, 2)]);
        let selection = dense().select(&model, 10).expect("select");
        assert_eq!(selected(&selection), vec![1]);
    }

    #[test]
    fn test_empty_model() {
        let model = build_model(&[]);
        for selector in [dense(), compact()] {
            let selection = selector.select(&model, 50).expect("select");
            assert_eq!(selection.num_candidates(), 0);
            assert_eq!(selection.total_coverage(), 0);
        }
    }

    #[test]
    fn test_negative_budget_is_rejected() {
        let model = build_model(&[(1, 1)]);
        assert_eq!(
            dense().select(&model, -1),
            Err(SelectError::NegativeBudget { budget: -1 })
        );
    }

    #[test]
    fn test_coverage_overflow_is_reported() {
        let mut builder = NetworkModelBuilder::<i8>::new();
        builder.add_router(RouterRecord::new(1, 0, 0, 1, 100, 1));
        builder.add_router(RouterRecord::new(2, 0, 0, 1, 100, 1));
        let model = builder.build().expect("valid model");
        assert_eq!(
            dense().select(&model, 2),
            Err(SelectError::CoverageOverflow {
                router_index: ri(1)
            })
        );
        assert_eq!(
            compact().select(&model, 2),
            Err(SelectError::CoverageOverflow {
                router_index: ri(1)
            })
        );
    }

    #[test]
    fn test_auto_resolves_by_cell_limit() {
        let selector = KnapsackSelector::new().with_dense_cell_limit(100);
        assert_eq!(selector.resolve_strategy(9, 9), SelectionStrategy::Dense);
        assert_eq!(selector.resolve_strategy(10, 9), SelectionStrategy::Compact);
        assert_eq!(
            selector.resolve_strategy(usize::MAX, 1),
            SelectionStrategy::Compact
        );
        assert_eq!(dense().resolve_strategy(1_000, 1_000_000), SelectionStrategy::Dense);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("Dense".parse(), Ok(SelectionStrategy::Dense));
        assert_eq!("compact".parse(), Ok(SelectionStrategy::Compact));
        assert_eq!("AUTO".parse(), Ok(SelectionStrategy::Auto));
        assert!("greedy".parse::<SelectionStrategy>().is_err());
        assert_eq!(SelectionStrategy::Compact.to_string(), "compact");
    }

    #[test]
    fn test_matches_brute_force_and_layouts_agree() {
        let mut rng = StdRng::seed_from_u64(0x5EED_CAFE);
        for _ in 0..300 {
            let n = rng.random_range(0..=12);
            let items: Vec<(IntegerType, IntegerType)> = (0..n)
                .map(|_| (rng.random_range(0..=40), rng.random_range(0..=30)))
                .collect();
            let budget = rng.random_range(0..=120);
            let model = build_model(&items);

            let a = dense().select(&model, budget).expect("dense");
            let b = compact().select(&model, budget).expect("compact");
            assert_eq!(a, b, "layouts disagree on {:?} with budget {}", items, budget);

            assert!(a.total_cost() <= budget);
            assert_eq!(a.total_coverage(), brute_force_optimum(&items, budget));

            let recomputed: IntegerType = a.selected_routers().map(|r| items[r.get()].1).sum();
            assert_eq!(recomputed, a.total_coverage());
            let spent: IntegerType = a.selected_routers().map(|r| items[r.get()].0).sum();
            assert_eq!(spent, a.total_cost());
        }
    }
}
