/// Registry of benchmarked algorithm entries and workload suites.
use nextset::forest::AugmentedForest;
use nextset::forward::{CheckedForwardArray, ForwardArray, Halving, Naive, Recursive, TwoPass};
use nextset::microset::Microset;
use nextset::quickfind::QuickFind;
use nextset::set::SuccessorSet;
use nextset::unionfind::UnionFind;

use crate::workload::{self, Workload};

/// Largest n at which the unbounded-chain strategies run on the
/// all-deletions suite: the naive walk goes quadratic there, and the
/// recursive strategy's call depth equals the chain length.
pub const SWEEP_CAP: usize = 1 << 16;

/// Queries-per-deletion ladder for the interleaved suites.
pub const ALPHAS: [f64; 7] = [0.125, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0];

/// A benchmarkable successor-delete implementation.
pub struct Algorithm {
    pub name: &'static str,
    /// Cap on n for the all-deletions suite (None = unbounded).
    pub query_one_cap: Option<usize>,
    /// Whether the entry runs in the interleaved suites.
    pub interleaved: bool,
    build_fn: Box<dyn Fn(usize) -> Box<dyn SuccessorSet> + Send + Sync>,
}

impl Algorithm {
    /// Instantiate with capacity for universes up to {0, …, max_n+1}.
    pub fn build(&self, max_n: usize) -> Box<dyn SuccessorSet> {
        (self.build_fn)(max_n)
    }

    /// Whether this entry participates in `suite` at size `n`.
    pub fn runs(&self, suite: Suite, n: usize) -> bool {
        match suite {
            Suite::QueryOne => self.query_one_cap.map_or(true, |cap| n <= cap),
            Suite::WorstCase | Suite::Random => self.interleaved,
        }
    }
}

/// Every registered entry, in the order results are reported.
pub fn all_algorithms() -> Vec<Algorithm> {
    vec![
        Algorithm {
            name: "successor, no compression",
            query_one_cap: Some(SWEEP_CAP),
            interleaved: false,
            build_fn: Box::new(|n| Box::new(ForwardArray::<Naive>::new(n))),
        },
        Algorithm {
            name: "successor, recursive",
            query_one_cap: Some(SWEEP_CAP),
            interleaved: true,
            build_fn: Box::new(|n| Box::new(ForwardArray::<Recursive>::new(n))),
        },
        Algorithm {
            name: "successor, 2-pass",
            query_one_cap: None,
            interleaved: true,
            build_fn: Box::new(|n| Box::new(ForwardArray::<TwoPass>::new(n))),
        },
        Algorithm {
            name: "successor, 2-pass, checked",
            query_one_cap: None,
            interleaved: true,
            build_fn: Box::new(|n| Box::new(CheckedForwardArray::<TwoPass>::new(n))),
        },
        Algorithm {
            name: "successor, halving",
            query_one_cap: None,
            interleaved: true,
            build_fn: Box::new(|n| Box::new(ForwardArray::<Halving>::new(n))),
        },
        Algorithm {
            name: "quick find",
            query_one_cap: None,
            interleaved: true,
            build_fn: Box::new(|n| Box::new(QuickFind::new(n))),
        },
        Algorithm {
            name: "union find",
            query_one_cap: None,
            interleaved: true,
            build_fn: Box::new(|n| Box::new(UnionFind::new(n))),
        },
        Algorithm {
            name: "augmented forest",
            query_one_cap: None,
            interleaved: true,
            build_fn: Box::new(|n| Box::new(AugmentedForest::new(n))),
        },
        Algorithm {
            name: "quick find, microset",
            query_one_cap: None,
            interleaved: true,
            build_fn: Box::new(|n| Box::new(Microset::<QuickFind, u64>::new(n, QuickFind::new))),
        },
        Algorithm {
            name: "union find, microset",
            query_one_cap: None,
            interleaved: true,
            build_fn: Box::new(|n| Box::new(Microset::<UnionFind, u64>::new(n, UnionFind::new))),
        },
        Algorithm {
            name: "successor, 2-pass, microset",
            query_one_cap: None,
            interleaved: true,
            build_fn: Box::new(|n| {
                Box::new(Microset::<ForwardArray<TwoPass>, u64>::new(
                    n,
                    ForwardArray::<TwoPass>::new,
                ))
            }),
        },
    ]
}

/// A family of generated workloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    Random,
    QueryOne,
    WorstCase,
}

impl Suite {
    pub fn all() -> &'static [Suite] {
        &[Suite::Random, Suite::QueryOne, Suite::WorstCase]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Suite::Random => "random",
            Suite::QueryOne => "query-one",
            Suite::WorstCase => "worst-case",
        }
    }

    pub fn from_name(name: &str) -> Option<Suite> {
        Suite::all().iter().find(|s| s.name() == name).copied()
    }
}

/// Generate the workloads `suite` runs at size `n`.
pub fn workloads(suite: Suite, n: usize, alphas: &[f64], seed: u64) -> Vec<Workload> {
    match suite {
        Suite::QueryOne => vec![workload::query_one(n)],
        Suite::WorstCase => alphas.iter().map(|&a| workload::worst_case(n, a)).collect(),
        Suite::Random => alphas
            .iter()
            .map(|&a| workload::random(n, a, seed))
            .collect(),
    }
}
