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

//! Disjoint-set forest over `0..n`.
//!
//! `find` compresses paths and `union` links the smaller tree under the
//! larger one, so both run in amortized inverse-Ackermann time.

/// A union-find structure over the elements `0..len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    num_sets: usize,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            num_sets: n,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of disjoint sets.
    #[inline]
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Returns the representative of the set containing `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is not in `0..len()`.
    pub fn find(&mut self, x: usize) -> usize {
        debug_assert!(
            x < self.len(),
            "called `DisjointSet::find` with element out of bounds: the len is {} but the index is {}",
            self.len(),
            x
        );

        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `true` if they were disjoint, `false` if already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.num_sets -= 1;
        true
    }

    /// Returns `true` if `a` and `b` are in the same set.
    #[inline]
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut set = DisjointSet::new(4);
        assert_eq!(set.len(), 4);
        assert_eq!(set.num_sets(), 4);
        for i in 0..4 {
            assert_eq!(set.find(i), i);
        }
        assert!(DisjointSet::new(0).is_empty());
    }

    #[test]
    fn test_union_reports_merges() {
        let mut set = DisjointSet::new(5);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(!set.union(1, 0));
        assert!(set.union(1, 3));
        assert!(!set.union(0, 2));
        assert_eq!(set.num_sets(), 2);
        assert!(set.connected(0, 3));
        assert!(!set.connected(4, 0));
    }

    #[test]
    fn test_long_chain_is_compressed() {
        let n = 1_000;
        let mut set = DisjointSet::new(n);
        for i in 1..n {
            assert!(set.union(i - 1, i));
        }
        assert_eq!(set.num_sets(), 1);
        let root = set.find(n - 1);
        for i in 0..n {
            assert_eq!(set.find(i), root);
        }
    }
}
