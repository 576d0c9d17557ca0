use crate::error::ValidateError;
use crate::set::SuccessorSet;

/// In-band "no node" marker for child pointers and height-class slots.
const NONE: usize = usize::MAX;

/// Per-element node. All links are indices into the arena; nodes are
/// never individually freed and the link graph is cyclic, so owned
/// references are not an option.
#[derive(Clone, Copy)]
struct Node {
    /// Tree pointer, always ≥ the node's own index; self-loop at roots.
    /// Tree roots are exactly the present elements.
    parent: usize,
    /// Height of the subtree rooted here; 0 for leaves.
    height: usize,
    /// One child, entry point into its circular sibling list; NONE when
    /// childless.
    child: usize,
    /// Circular list over all nodes of equal height, globally.
    next: usize,
    prev: usize,
    /// Circular sibling list among children of the same parent.
    left: usize,
    right: usize,
}

/// Forward-pointer forest with explicit height bookkeeping.
///
/// Behaves as a fifth successor-delete strategy, and additionally
/// answers `deepest_node` in O(1) amortized via the height-class lists:
/// `roots[h]` names one node of height h, and `max_height` tracks the
/// global maximum. Adversarial workload generators use the deepest node
/// to aim queries at the longest chain the structure currently has.
pub struct AugmentedForest {
    nodes: Vec<Node>,
    /// `roots[h]` = some node of height h, or NONE.
    roots: Vec<usize>,
    max_height: usize,
    len: usize,
}

impl AugmentedForest {
    /// Allocate for capacity `max_n` and initialize to the full set.
    pub fn new(max_n: usize) -> Self {
        debug_assert!(max_n >= 1);
        let blank = Node {
            parent: 0,
            height: 0,
            child: NONE,
            next: 0,
            prev: 0,
            left: 0,
            right: 0,
        };
        let mut forest = Self {
            nodes: vec![blank; max_n + 2],
            roots: vec![NONE; max_n + 2],
            max_height: 0,
            len: 0,
        };
        forest.init(max_n);
        forest
    }

    /// Whether `i` has not been deleted.
    pub fn is_present(&self, i: usize) -> bool {
        self.nodes[i].parent == i
    }

    /// Height of the tree rooted at `i`, recomputed from its children's
    /// stored heights.
    fn tree_height(&self, i: usize) -> usize {
        let first = self.nodes[i].child;
        if first == NONE {
            return 0;
        }
        let mut c = first;
        let mut best = self.nodes[c].height;
        while self.nodes[c].right != first {
            c = self.nodes[c].right;
            best = best.max(self.nodes[c].height);
        }
        best + 1
    }

    /// Recompute `i`'s height and move it to the matching height-class
    /// list, keeping `roots` valid.
    fn fix_height(&mut self, i: usize) {
        let h = self.nodes[i].height;
        let next = self.nodes[i].next;
        let prev = self.nodes[i].prev;
        if self.roots[h] == i {
            self.roots[h] = if next != i { next } else { NONE };
        }
        if next != i {
            self.nodes[next].prev = prev;
            self.nodes[prev].next = next;
            self.nodes[i].next = i;
            self.nodes[i].prev = i;
        }
        let h = self.tree_height(i);
        self.nodes[i].height = h;
        if self.roots[h] != NONE {
            let next = self.roots[h];
            let prev = self.nodes[next].prev;
            self.nodes[i].next = next;
            self.nodes[i].prev = prev;
            self.nodes[next].prev = i;
            self.nodes[prev].next = i;
        }
        self.roots[h] = i;
    }

    /// Make root `i` a child of `j`.
    fn link(&mut self, i: usize, j: usize) {
        debug_assert_eq!(self.nodes[i].parent, i);
        let head = self.nodes[j].child;
        self.nodes[j].child = i;
        self.nodes[i].parent = j;
        if head != NONE {
            let left = self.nodes[head].left;
            self.nodes[i].right = head;
            self.nodes[i].left = left;
            self.nodes[head].left = i;
            self.nodes[left].right = i;
        }
    }

    /// Remove `i` from its parent's child list, restoring it to a
    /// singleton root.
    fn unlink(&mut self, i: usize) {
        let j = self.nodes[i].parent;
        debug_assert!(j > i);
        let left = self.nodes[i].left;
        let right = self.nodes[i].right;
        if self.nodes[j].child == i {
            self.nodes[j].child = if right != i { right } else { NONE };
        }
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[i].parent = i;
        self.nodes[i].left = i;
        self.nodes[i].right = i;
    }

    /// A node at maximum depth in the tree rooted at `i`.
    fn deepest_in(&self, mut i: usize) -> usize {
        let mut h = self.nodes[i].height;
        while h > 0 {
            h -= 1;
            i = self.nodes[i].child;
            while self.nodes[i].height != h {
                i = self.nodes[i].right;
            }
        }
        i
    }

    /// A node at maximum depth over the whole forest.
    pub fn deepest_node(&self) -> usize {
        self.deepest_in(self.roots[self.max_height])
    }

    /// Current maximum tree height.
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Number of links from `i` up to its tree root.
    pub fn depth(&self, i: usize) -> usize {
        let mut depth = 0;
        let mut j = i;
        while self.nodes[j].parent != j {
            j = self.nodes[j].parent;
            depth += 1;
        }
        depth
    }

    /// Exhaustively audit every structural invariant.
    ///
    /// Test-time diagnostic only; operations never validate on the hot
    /// path.
    pub fn validate(&self) -> Result<(), ValidateError> {
        // Every non-root must be found exactly once in a child list
        let mut child_balance: isize = 0;
        for i in 0..self.len {
            let node = &self.nodes[i];
            if node.parent < i || node.parent >= self.len {
                return Err(ValidateError::ParentRange {
                    node: i,
                    parent: node.parent,
                    len: self.len,
                });
            }
            if node.parent != i {
                child_balance += 1;
            }
            if node.height == 0 {
                if node.child != NONE {
                    return Err(ValidateError::ChildPointer {
                        node: i,
                        child: node.child,
                        height: 0,
                    });
                }
            } else {
                if node.child >= i {
                    return Err(ValidateError::ChildPointer {
                        node: i,
                        child: node.child,
                        height: node.height,
                    });
                }
                let first = node.child;
                let mut c = first;
                let mut best = self.nodes[c].height;
                loop {
                    if self.nodes[c].parent != i {
                        return Err(ValidateError::SiblingList {
                            node: c,
                            left: self.nodes[c].left,
                            right: self.nodes[c].right,
                        });
                    }
                    child_balance -= 1;
                    best = best.max(self.nodes[c].height);
                    c = self.nodes[c].right;
                    if c == first {
                        break;
                    }
                }
                if node.height != best + 1 {
                    return Err(ValidateError::HeightMismatch {
                        node: i,
                        stored: node.height,
                        computed: best + 1,
                    });
                }
            }
            let (next, prev) = (node.next, node.prev);
            if next >= self.len
                || prev >= self.len
                || self.nodes[next].prev != i
                || self.nodes[prev].next != i
                || self.nodes[next].height != node.height
                || self.nodes[prev].height != node.height
            {
                return Err(ValidateError::HeightList {
                    node: i,
                    prev,
                    next,
                });
            }
            let (left, right) = (node.left, node.right);
            if left >= self.len
                || right >= self.len
                || self.nodes[right].left != i
                || self.nodes[left].right != i
                || self.nodes[right].parent != node.parent
                || self.nodes[left].parent != node.parent
            {
                return Err(ValidateError::SiblingList {
                    node: i,
                    left,
                    right,
                });
            }
        }
        if child_balance != 0 {
            return Err(ValidateError::ChildCoverage {
                balance: child_balance,
            });
        }
        // Every height class up to max_height is populated, consistent,
        // and together they cover all nodes
        let mut found = 0;
        for h in 0..=self.max_height {
            let first = self.roots[h];
            if first == NONE || first >= self.len {
                return Err(ValidateError::EmptyClass {
                    height: h,
                    max_height: self.max_height,
                });
            }
            let mut node = first;
            loop {
                if self.nodes[node].height != h {
                    return Err(ValidateError::ClassHeight {
                        height: h,
                        node,
                        actual: self.nodes[node].height,
                    });
                }
                found += 1;
                node = self.nodes[node].next;
                if node == first {
                    break;
                }
            }
        }
        if found != self.len {
            return Err(ValidateError::ClassCoverage {
                found,
                expected: self.len,
            });
        }
        Ok(())
    }
}

impl SuccessorSet for AugmentedForest {
    fn init(&mut self, n: usize) {
        debug_assert!(n >= 1 && n + 2 <= self.nodes.len());
        self.len = n + 2;
        for i in 0..self.len {
            self.nodes[i] = Node {
                parent: i,
                height: 0,
                child: NONE,
                next: i + 1,
                prev: i.wrapping_sub(1),
                left: i,
                right: i,
            };
            self.roots[i] = NONE;
        }
        // All n+2 nodes start in the single height-0 class list
        self.nodes[0].prev = n + 1;
        self.nodes[n + 1].next = 0;
        self.max_height = 0;
        self.roots[0] = 0;
    }

    fn delete(&mut self, i: usize) {
        debug_assert!(i >= 1 && i < self.len - 1);
        let mut j = self.nodes[i].parent;
        if j > i {
            // i dangles under j from an earlier delete: detach it and
            // repair heights up that tree first
            self.unlink(i);
            self.fix_height(j);
            while self.nodes[j].parent != j {
                j = self.nodes[j].parent;
                self.fix_height(j);
            }
        }
        let mut j = i + 1;
        self.link(i, j);
        self.fix_height(j);
        while self.nodes[j].parent != j {
            j = self.nodes[j].parent;
            self.fix_height(j);
        }
        if self.nodes[j].height > self.max_height {
            self.max_height = self.nodes[j].height;
        }
    }

    fn successor(&mut self, i: usize) -> usize {
        debug_assert!(i < self.len);
        let mut root = i;
        while root < self.nodes[root].parent {
            root = self.nodes[root].parent;
        }
        // Second pass: re-hang every visited node directly beneath the
        // root, repairing its bookkeeping as it moves
        let mut i = i;
        while i < root {
            let parent = self.nodes[i].parent;
            self.unlink(i);
            self.link(i, root);
            self.fix_height(i);
            i = parent;
        }
        self.fix_height(root);
        // Compression may have emptied the top classes
        while self.roots[self.max_height] == NONE {
            self.max_height -= 1;
        }
        root
    }
}
