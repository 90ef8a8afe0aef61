// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_block_observer::{Block, BlockObserver, LoadEvent, LoadRange, reconcile};

/// Builds a snapshot with `loaded_runs` loaded pages separated by unloaded gaps.
fn striped(size: usize, loaded_runs: usize) -> Vec<Block> {
    let stride = size / loaded_runs;
    let mut observer = BlockObserver::new(size).with_buffer(4);
    for run in 0..loaded_runs {
        let start = run * stride + stride / 2;
        observer.apply(LoadRange::new(start, start + stride / 4));
    }
    observer.blocks().to_vec()
}

fn bench_reconcile_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile/blocks");

    // Reconcile is a linear scan; cost should track the block count, not the size.
    let size = 1_000_000;
    for runs in [8usize, 64, 512, 4_096] {
        let blocks = striped(size, runs);
        let event = LoadEvent::new(LoadRange::new(size / 3, size / 3 + 50), 4, size);
        group.throughput(Throughput::Elements(blocks.len() as u64));

        group.bench_with_input(BenchmarkId::new("mid_load", runs), &blocks, |b, blocks| {
            b.iter(|| black_box(reconcile(black_box(blocks), &event)));
        });
    }

    group.finish();
}

fn bench_page_by_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("observer/page_by_page");

    // Models a user scrolling from top to bottom of a lazily loaded list.
    for size in [1_000usize, 10_000, 100_000] {
        let page = 50;
        group.throughput(Throughput::Elements((size / page) as u64));

        group.bench_with_input(BenchmarkId::new("apply", size), &size, |b, &size| {
            b.iter_batched(
                || BlockObserver::new(size).with_buffer(10),
                |mut observer| {
                    for start in (0..size).step_by(page) {
                        observer.apply(LoadRange::new(start, (start + page - 1).min(size - 1)));
                    }
                    black_box(observer);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconcile_scaling, bench_page_by_page);
criterion_main!(benches);
