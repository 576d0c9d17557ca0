use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use nextset::forest::AugmentedForest;
use nextset::forward::{ForwardArray, Halving, TwoPass};
use nextset::microset::Microset;
use nextset::quickfind::QuickFind;
use nextset::set::SuccessorSet;
use nextset::unionfind::UnionFind;

/// Delete every element in order, querying the lowest survivor after
/// each deletion.
fn sweep<S: SuccessorSet>(set: &mut S, n: usize) -> usize {
    set.init(n);
    let mut fold = 0;
    for i in 1..=n {
        set.delete(i);
        fold ^= set.successor(1);
    }
    fold
}

fn bench_delete_then_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_then_query");

    for size in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("two_pass", size), &size, |b, &n| {
            let mut set = ForwardArray::<TwoPass>::new(n);
            b.iter(|| black_box(sweep(&mut set, n)));
        });

        group.bench_with_input(BenchmarkId::new("halving", size), &size, |b, &n| {
            let mut set = ForwardArray::<Halving>::new(n);
            b.iter(|| black_box(sweep(&mut set, n)));
        });

        group.bench_with_input(BenchmarkId::new("quick_find", size), &size, |b, &n| {
            let mut set = QuickFind::new(n);
            b.iter(|| black_box(sweep(&mut set, n)));
        });

        group.bench_with_input(BenchmarkId::new("union_find", size), &size, |b, &n| {
            let mut set = UnionFind::new(n);
            b.iter(|| black_box(sweep(&mut set, n)));
        });

        group.bench_with_input(
            BenchmarkId::new("union_find_microset", size),
            &size,
            |b, &n| {
                let mut set: Microset<UnionFind, u64> = Microset::new(n, UnionFind::new);
                b.iter(|| black_box(sweep(&mut set, n)));
            },
        );

        group.bench_with_input(BenchmarkId::new("forest", size), &size, |b, &n| {
            let mut set = AugmentedForest::new(n);
            b.iter(|| black_box(sweep(&mut set, n)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_delete_then_query);
criterion_main!(benches);
