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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;
use wifiplan_model::model::{NetworkModel, NetworkModelBuilder, RouterRecord, UserRecord};
use wifiplan_select::knapsack::SelectionStrategy;
use wifiplan_solver::planner::PlannerBuilder;

/// A seeded city block: `num_routers` candidate sites and `num_users` users
/// scattered over a 1000 × 1000 grid.
fn random_instance(num_routers: usize, num_users: usize, seed: u64) -> NetworkModel<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = NetworkModelBuilder::<i64>::with_capacity(num_routers, num_users);
    for i in 0..num_routers {
        builder.add_router(RouterRecord::new(
            i as i64 + 1,
            rng.random_range(0..1_000),
            rng.random_range(0..1_000),
            rng.random_range(500..5_000),
            rng.random_range(50..250),
            rng.random_range(5..50),
        ));
    }
    for i in 0..num_users {
        builder.add_user(UserRecord::new(
            i as i64 + 1,
            rng.random_range(0..1_000),
            rng.random_range(0..1_000),
        ));
    }
    builder.build().expect("benchmark instance is valid")
}

fn bench_planner(c: &mut Criterion) {
    let mut group = c.benchmark_group("planner_benchmark");
    let budget = 30_000;

    for &(num_routers, num_users) in &[(25, 500), (100, 2_000), (400, 5_000)] {
        let model = random_instance(num_routers, num_users, 0x00BE_7C4A);
        group.throughput(Throughput::Elements(num_users as u64));

        for strategy in [SelectionStrategy::Dense, SelectionStrategy::Compact] {
            let mut planner = PlannerBuilder::<i64>::new()
                .with_budget(budget)
                .with_strategy(strategy)
                .build();
            let label = format!("{}x{}", num_routers, num_users);

            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), &label),
                &model,
                |b, model| {
                    b.iter(|| {
                        let outcome = planner
                            .plan(black_box(model))
                            .expect("benchmark budget is valid");
                        black_box(outcome.summary().total_coverage)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_planner);
criterion_main!(benches);
