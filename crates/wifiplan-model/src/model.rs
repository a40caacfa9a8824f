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

use crate::index::{RouterIndex, UserIndex};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use wifiplan_core::{geometry::point::Point, num::PlanNumeric};

/// A candidate router site as it arrives from the input boundary.
///
/// The field names double as the CSV header (`id,x,y,cost,coverage,capacity`).
/// `coverage` is both the service radius and the value credited to the
/// selector when the router is deployed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct RouterRecord<T> {
    pub id: T,
    pub x: T,
    pub y: T,
    pub cost: T,
    pub coverage: T,
    pub capacity: T,
}

impl<T> RouterRecord<T> {
    /// Creates a new router record.
    #[inline]
    pub fn new(id: T, x: T, y: T, cost: T, coverage: T, capacity: T) -> Self {
        Self {
            id,
            x,
            y,
            cost,
            coverage,
            capacity,
        }
    }
}

/// A user as it arrives from the input boundary (CSV header `id,x,y`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct UserRecord<T> {
    pub id: T,
    pub x: T,
    pub y: T,
}

impl<T> UserRecord<T> {
    /// Creates a new user record.
    #[inline]
    pub fn new(id: T, x: T, y: T) -> Self {
        Self { id, x, y }
    }
}

/// Input-contract violations detected by `NetworkModelBuilder::build`.
///
/// Every variant is fatal for the run; no partial model is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError<T> {
    /// A router has a negative deployment cost.
    NegativeCost { router_index: RouterIndex, cost: T },
    /// A router has a negative coverage radius.
    NegativeCoverage {
        router_index: RouterIndex,
        coverage: T,
    },
    /// A router has a negative capacity.
    NegativeCapacity {
        router_index: RouterIndex,
        capacity: T,
    },
    /// A router capacity does not fit into `usize` on this platform.
    CapacityOutOfRange {
        router_index: RouterIndex,
        capacity: T,
    },
    /// Two routers share the same identity.
    DuplicateRouterId { router_index: RouterIndex, id: T },
    /// Two users share the same identity.
    DuplicateUserId { user_index: UserIndex, id: T },
}

impl<T> std::fmt::Display for ModelError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeCost { router_index, cost } => {
                write!(f, "Router {} has negative cost {}", router_index.get(), cost)
            }
            Self::NegativeCoverage {
                router_index,
                coverage,
            } => write!(
                f,
                "Router {} has negative coverage radius {}",
                router_index.get(),
                coverage
            ),
            Self::NegativeCapacity {
                router_index,
                capacity,
            } => write!(
                f,
                "Router {} has negative capacity {}",
                router_index.get(),
                capacity
            ),
            Self::CapacityOutOfRange {
                router_index,
                capacity,
            } => write!(
                f,
                "Router {} has capacity {} which exceeds the addressable range",
                router_index.get(),
                capacity
            ),
            Self::DuplicateRouterId { router_index, id } => write!(
                f,
                "Router {} repeats router id {}",
                router_index.get(),
                id
            ),
            Self::DuplicateUserId { user_index, id } => {
                write!(f, "User {} repeats user id {}", user_index.get(), id)
            }
        }
    }
}

impl<T> std::error::Error for ModelError<T> where T: std::fmt::Debug + std::fmt::Display {}

/// The immutable network model: candidate routers and the user population.
///
/// Data is stored as a Structure of Arrays indexed by `RouterIndex` and
/// `UserIndex` (listing order of the input). The model never changes after
/// `NetworkModelBuilder::build`; which routers are deployed and how loaded
/// they are is recorded in the plan types of `crate::plan`.
///
/// Invariants (established by the builder):
/// - every cost, coverage radius and capacity is non-negative,
/// - router ids are unique and user ids are unique.
#[derive(Clone)]
pub struct NetworkModel<T> {
    router_ids: Vec<T>,               // len = num_routers
    router_positions: Vec<Point<T>>,  // len = num_routers
    router_costs: Vec<T>,             // len = num_routers
    router_coverages: Vec<T>,         // len = num_routers
    router_capacities: Vec<usize>,    // len = num_routers
    user_ids: Vec<T>,                 // len = num_users
    user_positions: Vec<Point<T>>,    // len = num_users
}

impl<T> NetworkModel<T>
where
    T: PlanNumeric,
{
    /// Returns the number of candidate routers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wifiplan_model::model::{NetworkModelBuilder, RouterRecord};
    /// let mut builder = NetworkModelBuilder::<i64>::new();
    /// builder.add_router(RouterRecord::new(1, 0, 0, 100, 5, 2));
    /// let model = builder.build().unwrap();
    /// assert_eq!(model.num_routers(), 1);
    /// assert_eq!(model.num_users(), 0);
    /// ```
    #[inline]
    pub fn num_routers(&self) -> usize {
        self.router_ids.len()
    }

    /// Returns the number of users.
    #[inline]
    pub fn num_users(&self) -> usize {
        self.user_ids.len()
    }

    /// Returns an iterator over all router indices in listing order.
    #[inline]
    pub fn router_indices(&self) -> impl DoubleEndedIterator<Item = RouterIndex> + ExactSizeIterator {
        RouterIndex::range(self.num_routers())
    }

    /// Returns an iterator over all user indices in processing order.
    #[inline]
    pub fn user_indices(&self) -> impl DoubleEndedIterator<Item = UserIndex> + ExactSizeIterator {
        UserIndex::range(self.num_users())
    }

    /// Returns the deployment costs of all routers.
    #[inline]
    pub fn router_costs(&self) -> &[T] {
        &self.router_costs
    }

    /// Returns the coverage radii (and coverage values) of all routers.
    #[inline]
    pub fn router_coverages(&self) -> &[T] {
        &self.router_coverages
    }

    /// Returns the capacities of all routers.
    #[inline]
    pub fn router_capacities(&self) -> &[usize] {
        &self.router_capacities
    }

    /// Returns the identity of the specified router.
    ///
    /// # Panics
    ///
    /// Panics if `router_index` is not in `0..num_routers()`.
    #[inline]
    pub fn router_id(&self, router_index: RouterIndex) -> T {
        let index = router_index.get();
        debug_assert!(
            index < self.num_routers(),
            "called `NetworkModel::router_id` with router index out of bounds: the len is {} but the index is {}",
            self.num_routers(),
            index
        );

        self.router_ids[index]
    }

    /// Returns the position of the specified router.
    ///
    /// # Panics
    ///
    /// Panics if `router_index` is not in `0..num_routers()`.
    #[inline]
    pub fn router_position(&self, router_index: RouterIndex) -> Point<T> {
        let index = router_index.get();
        debug_assert!(
            index < self.num_routers(),
            "called `NetworkModel::router_position` with router index out of bounds: the len is {} but the index is {}",
            self.num_routers(),
            index
        );

        self.router_positions[index]
    }

    /// Returns the deployment cost of the specified router.
    ///
    /// # Panics
    ///
    /// Panics if `router_index` is not in `0..num_routers()`.
    #[inline]
    pub fn router_cost(&self, router_index: RouterIndex) -> T {
        let index = router_index.get();
        debug_assert!(
            index < self.num_routers(),
            "called `NetworkModel::router_cost` with router index out of bounds: the len is {} but the index is {}",
            self.num_routers(),
            index
        );

        self.router_costs[index]
    }

    /// Returns the coverage radius of the specified router.
    ///
    /// # Panics
    ///
    /// Panics if `router_index` is not in `0..num_routers()`.
    #[inline]
    pub fn router_coverage(&self, router_index: RouterIndex) -> T {
        let index = router_index.get();
        debug_assert!(
            index < self.num_routers(),
            "called `NetworkModel::router_coverage` with router index out of bounds: the len is {} but the index is {}",
            self.num_routers(),
            index
        );

        self.router_coverages[index]
    }

    /// Returns the maximum number of simultaneous users of the specified router.
    ///
    /// # Panics
    ///
    /// Panics if `router_index` is not in `0..num_routers()`.
    #[inline]
    pub fn router_capacity(&self, router_index: RouterIndex) -> usize {
        let index = router_index.get();
        debug_assert!(
            index < self.num_routers(),
            "called `NetworkModel::router_capacity` with router index out of bounds: the len is {} but the index is {}",
            self.num_routers(),
            index
        );

        self.router_capacities[index]
    }

    /// Returns the identity of the specified user.
    ///
    /// # Panics
    ///
    /// Panics if `user_index` is not in `0..num_users()`.
    #[inline]
    pub fn user_id(&self, user_index: UserIndex) -> T {
        let index = user_index.get();
        debug_assert!(
            index < self.num_users(),
            "called `NetworkModel::user_id` with user index out of bounds: the len is {} but the index is {}",
            self.num_users(),
            index
        );

        self.user_ids[index]
    }

    /// Returns the position of the specified user.
    ///
    /// # Panics
    ///
    /// Panics if `user_index` is not in `0..num_users()`.
    #[inline]
    pub fn user_position(&self, user_index: UserIndex) -> Point<T> {
        let index = user_index.get();
        debug_assert!(
            index < self.num_users(),
            "called `NetworkModel::user_position` with user index out of bounds: the len is {} but the index is {}",
            self.num_users(),
            index
        );

        self.user_positions[index]
    }

    /// Returns `true` if the user lies within the router's coverage radius.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wifiplan_model::model::{NetworkModelBuilder, RouterRecord, UserRecord};
    /// # use wifiplan_model::index::{RouterIndex, UserIndex};
    /// let mut builder = NetworkModelBuilder::<i64>::new();
    /// let r = builder.add_router(RouterRecord::new(1, 0, 0, 10, 5, 1));
    /// let near = builder.add_user(UserRecord::new(1, 3, 4));
    /// let far = builder.add_user(UserRecord::new(2, 4, 4));
    /// let model = builder.build().unwrap();
    /// assert!(model.router_covers(r, near));
    /// assert!(!model.router_covers(r, far));
    /// ```
    #[inline]
    pub fn router_covers(&self, router_index: RouterIndex, user_index: UserIndex) -> bool {
        let router = self.router_position(router_index);
        router.is_within(&self.user_position(user_index), self.router_coverage(router_index))
    }

    /// Returns the Euclidean distance between two routers.
    #[inline]
    pub fn router_distance(&self, a: RouterIndex, b: RouterIndex) -> f64 {
        self.router_position(a).distance(&self.router_position(b))
    }
}

impl<T> std::fmt::Debug for NetworkModel<T>
where
    T: PlanNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkModel")
            .field("num_routers", &self.num_routers())
            .field("num_users", &self.num_users())
            .finish()
    }
}

impl<T> std::fmt::Display for NetworkModel<T>
where
    T: PlanNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Network Model")?;
        writeln!(f, "   Routers: {}", self.num_routers())?;
        writeln!(f, "   Users:   {}", self.num_users())?;
        writeln!(f)?;

        if self.num_routers() == 0 {
            return writeln!(f, "   (No candidate routers)");
        }

        writeln!(
            f,
            "   {:<8} | {:<16} | {:<10} | {:<8} | {:<8}",
            "Router", "Position", "Cost", "Coverage", "Capacity"
        )?;
        writeln!(f, "   {:-<8}-+-{:-<16}-+-{:-<10}-+-{:-<8}-+-{:-<8}", "", "", "", "", "")?;
        for r in self.router_indices() {
            writeln!(
                f,
                "   {:<8} | {:<16} | {:<10} | {:<8} | {:<8}",
                self.router_id(r),
                self.router_position(r).to_string(),
                self.router_cost(r),
                self.router_coverage(r),
                self.router_capacity(r)
            )?;
        }
        Ok(())
    }
}

/// A builder collecting router and user records before validation.
///
/// Records keep their insertion order; that order becomes the listing order
/// of `RouterIndex` and the processing order of `UserIndex`.
#[derive(Clone, Debug)]
pub struct NetworkModelBuilder<T> {
    routers: Vec<RouterRecord<T>>,
    users: Vec<UserRecord<T>>,
}

impl<T> Default for NetworkModelBuilder<T>
where
    T: PlanNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NetworkModelBuilder<T>
where
    T: PlanNumeric,
{
    /// Creates a new, empty builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            routers: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Creates a new builder with room for the given number of records.
    #[inline]
    pub fn with_capacity(num_routers: usize, num_users: usize) -> Self {
        Self {
            routers: Vec::with_capacity(num_routers),
            users: Vec::with_capacity(num_users),
        }
    }

    /// Returns the number of routers added so far.
    #[inline]
    pub fn num_routers(&self) -> usize {
        self.routers.len()
    }

    /// Returns the number of users added so far.
    #[inline]
    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    /// Appends a router and returns the index it will have in the model.
    #[inline]
    pub fn add_router(&mut self, record: RouterRecord<T>) -> RouterIndex {
        self.routers.push(record);
        RouterIndex::new(self.routers.len() - 1)
    }

    /// Appends a user and returns the index it will have in the model.
    #[inline]
    pub fn add_user(&mut self, record: UserRecord<T>) -> UserIndex {
        self.users.push(record);
        UserIndex::new(self.users.len() - 1)
    }

    /// Appends all routers yielded by `records`.
    pub fn add_routers<I>(&mut self, records: I) -> &mut Self
    where
        I: IntoIterator<Item = RouterRecord<T>>,
    {
        self.routers.extend(records);
        self
    }

    /// Appends all users yielded by `records`.
    pub fn add_users<I>(&mut self, records: I) -> &mut Self
    where
        I: IntoIterator<Item = UserRecord<T>>,
    {
        self.users.extend(records);
        self
    }

    /// Validates the collected records and builds the immutable model.
    ///
    /// Routers are checked first, in listing order, then users; the first
    /// violation found is returned.
    pub fn build(self) -> Result<NetworkModel<T>, ModelError<T>> {
        let num_routers = self.routers.len();
        let num_users = self.users.len();

        let mut router_ids = Vec::with_capacity(num_routers);
        let mut router_positions = Vec::with_capacity(num_routers);
        let mut router_costs = Vec::with_capacity(num_routers);
        let mut router_coverages = Vec::with_capacity(num_routers);
        let mut router_capacities = Vec::with_capacity(num_routers);

        let mut seen_router_ids =
            FxHashSet::with_capacity_and_hasher(num_routers, Default::default());
        for (i, record) in self.routers.into_iter().enumerate() {
            let router_index = RouterIndex::new(i);
            if record.cost < T::zero() {
                return Err(ModelError::NegativeCost {
                    router_index,
                    cost: record.cost,
                });
            }
            if record.coverage < T::zero() {
                return Err(ModelError::NegativeCoverage {
                    router_index,
                    coverage: record.coverage,
                });
            }
            if record.capacity < T::zero() {
                return Err(ModelError::NegativeCapacity {
                    router_index,
                    capacity: record.capacity,
                });
            }
            let capacity = record
                .capacity
                .to_usize()
                .ok_or(ModelError::CapacityOutOfRange {
                    router_index,
                    capacity: record.capacity,
                })?;
            if !seen_router_ids.insert(record.id) {
                return Err(ModelError::DuplicateRouterId {
                    router_index,
                    id: record.id,
                });
            }

            router_ids.push(record.id);
            router_positions.push(Point::new(record.x, record.y));
            router_costs.push(record.cost);
            router_coverages.push(record.coverage);
            router_capacities.push(capacity);
        }

        let mut user_ids = Vec::with_capacity(num_users);
        let mut user_positions = Vec::with_capacity(num_users);
        let mut seen_user_ids = FxHashSet::with_capacity_and_hasher(num_users, Default::default());
        for (i, record) in self.users.into_iter().enumerate() {
            if !seen_user_ids.insert(record.id) {
                return Err(ModelError::DuplicateUserId {
                    user_index: UserIndex::new(i),
                    id: record.id,
                });
            }
            user_ids.push(record.id);
            user_positions.push(Point::new(record.x, record.y));
        }

        Ok(NetworkModel {
            router_ids,
            router_positions,
            router_costs,
            router_coverages,
            router_capacities,
            user_ids,
            user_positions,
        })
    }
}
