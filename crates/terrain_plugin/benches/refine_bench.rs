//! Refinement and emission benchmarks.
//!
//! Covers the per-frame hot path at a few depth bounds:
//! - **tree**: sum reduction and leaf enumeration on a fully refined heap
//! - **refine**: a full policy-driven update (classify, merge, split, reduce)
//! - **emit**: vertex/UV buffer generation from the leaf set
//! - **texture**: one full pass sequence of the texture backend

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use terrain_plugin::{
  emit, refine, Cbt, CbtNode, DistancePolicy, Domain, LeafView, MeshConfig, RefineAction,
  RefinementBudget, TextureCbt,
};

/// Square-domain tree uniformly refined to its depth bound.
fn full_tree(max_depth: u32) -> Cbt {
  let mut cbt = Cbt::new(max_depth).unwrap();
  for d in 0..max_depth {
    for k in (1u32 << d)..(1u32 << (d + 1)) {
      cbt.split(CbtNode::new(k)).unwrap();
    }
  }
  cbt.sum_reduction();
  cbt
}

fn eye_policy() -> DistancePolicy {
  DistancePolicy {
    eye: Vec2::new(0.3, 0.4),
    split_ratio: 0.7,
    merge_hysteresis: 0.5,
  }
}

fn bench_tree_ops(c: &mut Criterion) {
  let mut group = c.benchmark_group("tree");

  for depth in [8u32, 12, 16] {
    let mut cbt = full_tree(depth);
    group.bench_with_input(BenchmarkId::new("sum_reduction", depth), &depth, |b, _| {
      b.iter(|| {
        cbt.sum_reduction();
        black_box(cbt.leaf_count())
      })
    });

    let cbt = full_tree(depth);
    group.bench_with_input(BenchmarkId::new("leaves", depth), &depth, |b, _| {
      b.iter(|| black_box(cbt.leaves()))
    });

    group.bench_with_input(
      BenchmarkId::new("leaf_to_heap_index", depth),
      &depth,
      |b, _| {
        let mid = cbt.leaf_count() / 2;
        b.iter(|| black_box(cbt.leaf_to_heap_index(black_box(mid))))
      },
    );
  }

  group.finish();
}

fn bench_refine_update(c: &mut Criterion) {
  let mut group = c.benchmark_group("refine");
  let policy = eye_policy();

  for depth in [8u32, 10, 12] {
    group.bench_with_input(BenchmarkId::new("cold_update", depth), &depth, |b, _| {
      // From a fresh tree the update does all cascade work at once.
      b.iter(|| {
        let mut cbt = Cbt::new(depth).unwrap();
        let stats = refine(&mut cbt, Domain::Square, &policy, &RefinementBudget::UNLIMITED);
        black_box(stats)
      })
    });

    group.bench_with_input(BenchmarkId::new("steady_update", depth), &depth, |b, _| {
      // A converged tree: the update classifies every leaf but mutates
      // little, which is the common per-frame cost.
      let mut cbt = Cbt::new(depth).unwrap();
      for _ in 0..4 {
        refine(&mut cbt, Domain::Square, &policy, &RefinementBudget::UNLIMITED);
      }
      b.iter(|| {
        let stats = refine(&mut cbt, Domain::Square, &policy, &RefinementBudget::UNLIMITED);
        black_box(stats)
      })
    });
  }

  group.finish();
}

fn bench_emit(c: &mut Criterion) {
  let mut group = c.benchmark_group("emit");
  let config = MeshConfig::default();

  for depth in [8u32, 12, 14] {
    let cbt = full_tree(depth);
    group.throughput(criterion::Throughput::Elements(cbt.leaf_count() as u64));
    group.bench_with_input(BenchmarkId::new("full_tree", depth), &depth, |b, _| {
      b.iter(|| black_box(emit(&cbt, Domain::Square, &config)))
    });
  }

  group.finish();
}

fn bench_texture_backend(c: &mut Criterion) {
  let mut group = c.benchmark_group("texture");
  let policy = eye_policy();

  for depth in [8u32, 10, 12] {
    group.bench_with_input(BenchmarkId::new("update", depth), &depth, |b, _| {
      let mut cbt = TextureCbt::new(depth, Domain::Square).unwrap();
      b.iter(|| {
        cbt.update(&policy);
        black_box(cbt.leaf_count())
      })
    });
  }

  let uniform = |leaf: &LeafView| {
    if leaf.node.depth() < 10 {
      RefineAction::Split
    } else {
      RefineAction::Keep
    }
  };
  group.bench_function("update_uniform_10", |b| {
    let mut cbt = TextureCbt::new(10, Domain::Square).unwrap();
    b.iter(|| {
      cbt.update(&uniform);
      black_box(cbt.leaf_count())
    })
  });

  group.finish();
}

criterion_group!(
  benches,
  bench_tree_ops,
  bench_refine_update,
  bench_emit,
  bench_texture_backend,
);
criterion_main!(benches);
