//! Benchmarks for flattening, visibility and search on large trees.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ort_workbench::hierarchy::{HierarchyIndex, HierarchyNode};
use ort_workbench::viewmodel::TreeViewState;
use std::hint::black_box;

/// A forest of `roots` trees, each `depth` levels deep with `fanout`
/// children per node.
fn forest(roots: usize, depth: usize, fanout: usize) -> Vec<HierarchyNode<String>> {
    fn subtree(label: String, depth: usize, fanout: usize) -> HierarchyNode<String> {
        let children = if depth == 0 {
            Vec::new()
        } else {
            (0..fanout)
                .map(|i| subtree(format!("{label}.{i}"), depth - 1, fanout))
                .collect()
        };
        HierarchyNode::labeled_with(label, children)
    }

    (0..roots)
        .map(|r| subtree(format!("pkg-{r}"), depth, fanout))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy_index_build");
    for fanout in [4, 8] {
        let input = forest(8, 4, fanout);
        group.bench_with_input(BenchmarkId::from_parameter(fanout), &input, |b, input| {
            b.iter(|| HierarchyIndex::build(black_box(input.clone())));
        });
    }
    group.finish();
}

fn bench_visibility(c: &mut Criterion) {
    let mut tree = TreeViewState::new(forest(8, 4, 8), false);
    c.bench_function("expand_collapse_all", |b| {
        b.iter(|| {
            tree.expand_all();
            black_box(tree.visible_len());
            tree.collapse_all();
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let mut tree = TreeViewState::new(forest(8, 4, 8), false);
    c.bench_function("update_search", |b| {
        b.iter(|| {
            tree.update_search(black_box("7.3.1"));
            black_box(tree.search().hit_count());
        });
    });
}

criterion_group!(benches, bench_build, bench_visibility, bench_search);
criterion_main!(benches);
