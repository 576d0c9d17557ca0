/// Cross-structure equivalence: every registered algorithm must produce
/// identical successor outputs when fed identical operation sequences
/// from a freshly initialized state.
use nextset::set::SuccessorSet;
use nextset_bench::catalog;
use nextset_bench::workload::{self, Workload};

fn check_all(w: &Workload) {
    for alg in catalog::all_algorithms() {
        let mut set = alg.build(w.n);
        if let Err(failure) = w.check(set.as_mut()) {
            panic!("{} on {} (n={}): {}", alg.name, w.name, w.n, failure);
        }
    }
}

#[test]
fn all_entries_agree_on_query_one() {
    for n in [2, 4, 16, 100, 200] {
        check_all(&workload::query_one(n));
    }
}

#[test]
fn all_entries_agree_on_worst_case() {
    for n in [16, 100] {
        for alpha in [0.5, 2.0, 8.0] {
            check_all(&workload::worst_case(n, alpha));
        }
    }
}

#[test]
fn all_entries_agree_on_random() {
    for n in [16, 100, 250] {
        for alpha in [0.5, 2.0] {
            for seed in [1, 42] {
                check_all(&workload::random(n, alpha, seed));
            }
        }
    }
}

#[test]
fn deleting_one_through_four_exposes_upper_sentinel() {
    for alg in catalog::all_algorithms() {
        let mut set = alg.build(4);
        for i in 1..=4 {
            set.delete(i);
        }
        assert_eq!(set.successor(1), 5, "{}", alg.name);
    }
}

#[test]
fn single_delete_splits_neighbors() {
    for alg in catalog::all_algorithms() {
        let mut set = alg.build(4);
        set.delete(2);
        assert_eq!(set.successor(1), 1, "{}", alg.name);
        assert_eq!(set.successor(2), 3, "{}", alg.name);
    }
}

#[test]
fn sentinels_pinned_after_arbitrary_deletions() {
    for alg in catalog::all_algorithms() {
        let mut set = alg.build(64);
        assert_eq!(set.successor(0), 0, "{}", alg.name);
        assert_eq!(set.successor(65), 65, "{}", alg.name);
        for i in (2..=64).step_by(2) {
            set.delete(i);
        }
        assert_eq!(set.successor(0), 0, "{}", alg.name);
        assert_eq!(set.successor(65), 65, "{}", alg.name);
    }
}

#[test]
fn successor_is_monotone_for_every_entry() {
    for alg in catalog::all_algorithms() {
        let mut set = alg.build(32);
        for i in [3, 4, 5, 11, 17, 18, 30] {
            set.delete(i);
        }
        let mut last = 0;
        for i in 0..=33 {
            let s = set.successor(i);
            assert!(s >= i, "{}: successor({i}) = {s}", alg.name);
            assert!(s >= last, "{}: successor not monotone at {i}", alg.name);
            last = s;
        }
    }
}

#[test]
fn delete_shifts_successor_to_next_block() {
    for alg in catalog::all_algorithms() {
        let mut set = alg.build(32);
        for i in [5, 6, 20] {
            set.delete(i);
        }
        for i in 1..=32 {
            if set.successor(i) != i {
                continue; // already deleted
            }
            let after = set.successor(i + 1);
            set.delete(i);
            assert_ne!(set.successor(i), i, "{}", alg.name);
            assert_eq!(set.successor(i), after, "{}", alg.name);
        }
    }
}
