/// Operation workloads: generators, recorded expected outputs, replay.
use std::fmt;

use nextset::forest::AugmentedForest;
use nextset::forward::{ForwardArray, TwoPass};
use nextset::set::{Op, SuccessorSet};
use serde::{Deserialize, Serialize};

/// An operation sequence over the universe {0, …, n+1}, with the output
/// every `Successor` op is expected to produce.
///
/// Expected outputs are recorded by replaying a two-pass forward array,
/// the reference implementation all other structures are checked
/// against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workload {
    pub name: String,
    pub n: usize,
    pub ops: Vec<Op>,
    /// Expected result of each `Successor` op, in op order.
    pub expected: Vec<usize>,
}

/// A replayed successor output that disagreed with the recording.
#[derive(Debug, Clone)]
pub struct CheckFailure {
    pub op_index: usize,
    pub queried: usize,
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "op {}: successor({}) returned {}, expected {}",
            self.op_index, self.queried, self.actual, self.expected
        )
    }
}

impl Workload {
    fn record(name: String, n: usize, ops: Vec<Op>) -> Self {
        let mut reference: ForwardArray<TwoPass> = ForwardArray::new(n);
        let mut expected = Vec::new();
        for op in &ops {
            match *op {
                Op::Delete(i) => reference.delete(i),
                Op::Successor(i) => expected.push(reference.successor(i)),
            }
        }
        Self {
            name,
            n,
            ops,
            expected,
        }
    }

    /// Replay against `alg` from a fresh `init`, comparing every
    /// successor output with the recording.
    pub fn check(&self, alg: &mut dyn SuccessorSet) -> Result<(), CheckFailure> {
        alg.init(self.n);
        let mut expected = self.expected.iter();
        for (op_index, op) in self.ops.iter().enumerate() {
            match *op {
                Op::Delete(i) => alg.delete(i),
                Op::Successor(i) => {
                    let actual = alg.successor(i);
                    let want = *expected.next().expect("recording shorter than ops");
                    if actual != want {
                        return Err(CheckFailure {
                            op_index,
                            queried: i,
                            expected: want,
                            actual,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Replay against `alg` from a fresh `init` without checking.
    ///
    /// Returns the xor-fold of all successor outputs so the caller can
    /// sink it; a timed loop whose results vanish is a loop the
    /// optimizer may delete.
    pub fn replay(&self, alg: &mut dyn SuccessorSet) -> usize {
        alg.init(self.n);
        let mut fold = 0;
        for op in &self.ops {
            match *op {
                Op::Delete(i) => alg.delete(i),
                Op::Successor(i) => fold ^= alg.successor(i),
            }
        }
        fold
    }

    /// Number of `Successor` ops.
    pub fn queries(&self) -> usize {
        self.expected.len()
    }
}

/// Delete(1), …, Delete(n), then n × Successor(1).
///
/// Every query walks whatever chain the strategy left behind, so this
/// isolates pure query cost after the structure is fully collapsed.
pub fn query_one(n: usize) -> Workload {
    debug_assert!(n >= 2);
    let mut ops = Vec::with_capacity(2 * n);
    for i in 1..=n {
        ops.push(Op::Delete(i));
    }
    for _ in 0..n {
        ops.push(Op::Successor(1));
    }
    Workload::record("query_one".to_string(), n, ops)
}

/// Delete(1), …, Delete(n) interleaved with adversarial queries.
///
/// After the i-th deletion, queries are aimed at the deepest node of an
/// augmented forest mirroring the sequence, until `alpha` queries per
/// deletion have been issued. Each query compresses the forest, so the
/// next deepest node is recomputed against the compressed shape.
pub fn worst_case(n: usize, alpha: f64) -> Workload {
    debug_assert!(n >= 2);
    let mut forest = AugmentedForest::new(n);
    let mut ops = Vec::new();
    let mut queries = 0usize;
    for i in 1..=n {
        forest.delete(i);
        ops.push(Op::Delete(i));
        while (queries as f64) < i as f64 * alpha {
            let j = forest.deepest_node();
            forest.successor(j);
            ops.push(Op::Successor(j));
            queries += 1;
        }
    }
    Workload::record(format!("worst_case {alpha:.3}"), n, ops)
}

/// n seeded-random deletions (double deletes allowed) interleaved with
/// deepest-node queries.
///
/// Unlike [`worst_case`], the generator forest is not compressed by the
/// queries, so they keep targeting the deepest chain as it grows.
pub fn random(n: usize, alpha: f64, seed: u64) -> Workload {
    debug_assert!(n >= 2);
    let mut rng = Rng::new(seed);
    let mut forest = AugmentedForest::new(n);
    let mut ops = Vec::new();
    let mut queries = 0usize;
    for i in 1..=n {
        let d = (rng.next_u64() % (n as u64 - 1)) as usize + 1;
        forest.delete(d);
        ops.push(Op::Delete(d));
        while (queries as f64) < i as f64 * alpha {
            ops.push(Op::Successor(forest.deepest_node()));
            queries += 1;
        }
    }
    Workload::record(format!("random {alpha:.3}"), n, ops)
}

/// Simple LCG pseudo-random number generator (deterministic).
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        // LCG with Knuth's constants
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextset::quickfind::QuickFind;

    #[test]
    fn query_one_collapses_to_upper_sentinel() {
        let w = query_one(4);
        assert_eq!(w.ops.len(), 8);
        assert_eq!(w.expected, vec![5, 5, 5, 5]);
    }

    #[test]
    fn worst_case_interleaves_requested_query_share() {
        let w = worst_case(64, 2.0);
        assert_eq!(w.queries(), 128);
        assert_eq!(w.ops.len() - w.queries(), 64);
    }

    #[test]
    fn worst_case_fractional_alpha() {
        let w = worst_case(64, 0.125);
        assert_eq!(w.queries(), 8);
    }

    #[test]
    fn random_is_deterministic_per_seed() {
        let a = random(100, 1.0, 7);
        let b = random(100, 1.0, 7);
        assert_eq!(a.ops, b.ops);
        assert_eq!(a.expected, b.expected);
        let c = random(100, 1.0, 8);
        assert_ne!(a.ops, c.ops);
    }

    #[test]
    fn random_never_deletes_sentinels() {
        let w = random(50, 0.5, 3);
        for op in &w.ops {
            if let Op::Delete(i) = op {
                assert!(*i >= 1 && *i < 50);
            }
        }
    }

    #[test]
    fn check_accepts_a_correct_structure() {
        let w = worst_case(32, 1.0);
        let mut set = QuickFind::new(32);
        assert!(w.check(&mut set).is_ok());
    }

    #[test]
    fn check_reports_mismatch_position() {
        let mut w = query_one(4);
        w.expected[2] = 999;
        let mut set = QuickFind::new(4);
        let failure = w.check(&mut set).unwrap_err();
        assert_eq!(failure.op_index, 6);
        assert_eq!(failure.expected, 999);
        assert_eq!(failure.actual, 5);
    }

    #[test]
    fn replay_folds_query_outputs() {
        let w = query_one(4);
        let mut set = QuickFind::new(4);
        // Four queries all answering 5: xor cancels to zero
        assert_eq!(w.replay(&mut set), 0);
    }
}
