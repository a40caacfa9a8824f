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

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Phantom-typed wrappers around `usize` that keep the planner's index spaces
//! apart. A router is addressed by its position in the router listing and a
//! user by its position in the user listing; both are plain `usize` values at
//! runtime, but `TypedIndex<T>` makes it a compile error to look up a router
//! with a user index.
//!
//! ## Usage
//!
//! ```rust
//! use wifiplan_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone)]
//! struct RouterTag;
//! impl TypedIndexTag for RouterTag { const NAME: &'static str = "RouterIndex"; }
//!
//! type RouterIndex = TypedIndex<RouterTag>;
//! let r = RouterIndex::new(3);
//! assert_eq!(r.get(), 3);
//! assert_eq!(format!("{}", r), "RouterIndex(3)");
//! ```

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index that is associated with a specific tag type `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns an iterator over the indices `0..len` in ascending order.
    ///
    /// Listing order is observable in the planner (ties are broken by it),
    /// so every stage walks its index space through this iterator.
    ///
    /// ```rust
    /// # use wifiplan_core::utils::index::{TypedIndex, TypedIndexTag};
    /// # #[derive(Clone)]
    /// # struct UserTag;
    /// # impl TypedIndexTag for UserTag { const NAME: &'static str = "UserIndex"; }
    /// let all: Vec<usize> = TypedIndex::<UserTag>::range(3).map(|u| u.get()).collect();
    /// assert_eq!(all, vec![0, 1, 2]);
    /// ```
    #[inline]
    pub fn range(len: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..len).map(Self::new)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct SiteTag;

    impl TypedIndexTag for SiteTag {
        const NAME: &'static str = "SiteIdx";
    }

    type SiteIndex = TypedIndex<SiteTag>;

    #[test]
    fn test_new_and_get() {
        let idx = SiteIndex::new(10);
        assert_eq!(idx.get(), 10);
    }

    #[test]
    fn test_conversions() {
        let idx: SiteIndex = 42.into();
        assert_eq!(idx.get(), 42);

        let val: usize = idx.into();
        assert_eq!(val, 42);
    }

    #[test]
    fn test_debug_and_display_use_tag_name() {
        let idx = SiteIndex::new(7);
        assert_eq!(format!("{}", idx), "SiteIdx(7)");
        assert_eq!(format!("{:?}", idx), "SiteIdx(7)");
    }

    #[test]
    fn test_range_is_ascending_and_reversible() {
        let forward: Vec<usize> = SiteIndex::range(4).map(|i| i.get()).collect();
        assert_eq!(forward, vec![0, 1, 2, 3]);

        let backward: Vec<usize> = SiteIndex::range(4).rev().map(|i| i.get()).collect();
        assert_eq!(backward, vec![3, 2, 1, 0]);

        assert_eq!(SiteIndex::range(0).len(), 0);
    }

    #[test]
    fn test_ordering_follows_listing_position() {
        assert!(SiteIndex::new(1) < SiteIndex::new(2));
        assert_eq!(SiteIndex::new(5).max(SiteIndex::new(3)), SiteIndex::new(5));
    }
}
