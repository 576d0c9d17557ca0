use crate::set::SuccessorSet;

/// Weighted union-find with two-pass path compression.
///
/// `delete(i)` is union(i, i+1): the deleted element's block merges with
/// the block holding its successor. Roots carry the subtree weight and
/// the block's present successor; `successor(i)` is a find plus one
/// lookup, so its cost is the find cost.
pub struct UnionFind {
    parent: Vec<usize>,
    weight: Vec<usize>,
    succ: Vec<usize>,
    len: usize,
}

impl UnionFind {
    /// Allocate for capacity `max_n` and initialize to the full set.
    pub fn new(max_n: usize) -> Self {
        debug_assert!(max_n >= 1);
        let mut set = Self {
            parent: vec![0; max_n + 2],
            weight: vec![0; max_n + 2],
            succ: vec![0; max_n + 2],
            len: 0,
        };
        set.init(max_n);
        set
    }

    /// Find the representative of `i`'s block, compressing the visited
    /// path directly onto the root.
    pub fn find(&mut self, mut i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while i != root {
            let next = self.parent[i];
            self.parent[i] = root;
            i = next;
        }
        root
    }

    fn union(&mut self, i: usize, j: usize) {
        let r1 = self.find(i);
        let r2 = self.find(j);
        if r1 == r2 {
            return;
        }
        if self.weight[r1] <= self.weight[r2] {
            self.weight[r2] += self.weight[r1];
            self.parent[r1] = r2;
        } else {
            self.weight[r1] += self.weight[r2];
            self.parent[r2] = r1;
            // The surviving root now answers for the upper block
            self.succ[r1] = self.succ[r2];
        }
    }
}

impl SuccessorSet for UnionFind {
    fn init(&mut self, n: usize) {
        debug_assert!(n >= 1 && n + 2 <= self.parent.len());
        self.len = n + 2;
        for i in 0..self.len {
            self.parent[i] = i;
            self.weight[i] = 1;
            self.succ[i] = i;
        }
    }

    fn delete(&mut self, i: usize) {
        debug_assert!(i >= 1 && i < self.len - 1);
        self.union(i, i + 1);
    }

    fn successor(&mut self, i: usize) -> usize {
        debug_assert!(i < self.len);
        let root = self.find(i);
        self.succ[root]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_set_is_identity() {
        let mut set = UnionFind::new(6);
        for i in 0..=7 {
            assert_eq!(set.successor(i), i);
        }
    }

    #[test]
    fn delete_all_then_query_lowest() {
        let mut set = UnionFind::new(4);
        for i in 1..=4 {
            set.delete(i);
        }
        assert_eq!(set.successor(1), 5);
        assert_eq!(set.successor(0), 0);
    }

    #[test]
    fn single_delete_splits_neighbors() {
        let mut set = UnionFind::new(4);
        set.delete(2);
        assert_eq!(set.successor(1), 1);
        assert_eq!(set.successor(2), 3);
    }

    #[test]
    fn delete_twice_is_noop() {
        let mut set = UnionFind::new(8);
        set.delete(3);
        set.delete(3);
        assert_eq!(set.successor(3), 4);
        assert_eq!(set.successor(2), 2);
    }

    #[test]
    fn find_compresses_path() {
        let mut set = UnionFind::new(8);
        for i in 1..=6 {
            set.delete(i);
        }
        let root = set.find(1);
        assert_eq!(set.parent[1], root);
        assert_eq!(set.find(1), root);
    }

    #[test]
    fn weighted_union_keeps_heavier_root() {
        let mut set = UnionFind::new(8);
        set.delete(1);
        set.delete(2);
        set.delete(3);
        // {1,2,3,4} merged; the block's successor is 4
        let root = set.find(1);
        assert_eq!(set.succ[root], 4);
        assert_eq!(set.weight[root], 4);
    }

    #[test]
    fn successor_is_monotone() {
        let mut set = UnionFind::new(8);
        for i in [2, 3, 6] {
            set.delete(i);
        }
        let mut last = 0;
        for i in 0..=9 {
            let s = set.successor(i);
            assert!(s >= i);
            assert!(s >= last);
            last = s;
        }
    }

    #[test]
    fn reverse_order_deletions() {
        let mut set = UnionFind::new(6);
        for i in (1..=6).rev() {
            set.delete(i);
        }
        assert_eq!(set.successor(1), 7);
        assert_eq!(set.successor(3), 7);
    }
}
