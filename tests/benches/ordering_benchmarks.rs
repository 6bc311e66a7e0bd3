//! # Papyrus Ordering Benchmarks
//!
//! | Operation | Shape | Notes |
//! |-----------|-------|-------|
//! | reorder_blocks | full-stream batch | one transaction per batch |
//! | move_block | one slot | renumbers the whole stream |
//! | plan_move | pure planning | no store access |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use papyrus_core::domain::ordering::{plan_move, sort_blocks};
use papyrus_core::{
    Block, BlockApi, BlockDraft, BlockId, BlockType, InMemoryStore, MoveDirection,
    NotebookService, OrderUpdate, OrderingApi, StreamApi, SystemTimeSource,
};
use std::time::Duration;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime")
}

type BenchService = NotebookService<InMemoryStore, SystemTimeSource>;

async fn populated(size: usize) -> (BenchService, Vec<Block>) {
    let service = NotebookService::in_memory();
    let stream = service.create_stream("bench").await.expect("stream").stream;
    let mut blocks = Vec::with_capacity(size);
    for i in 0..size {
        let block = service
            .create_block(BlockDraft::new(
                stream.id.clone(),
                BlockType::Markdown,
                format!("block {i}"),
                i as u32,
            ))
            .await
            .expect("block");
        blocks.push(block);
    }
    (service, blocks)
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder-blocks");
    group.measurement_time(Duration::from_secs(5));
    let rt = runtime();

    for size in [10usize, 100, 1000] {
        let (service, blocks) = rt.block_on(populated(size));
        let reversed: Vec<OrderUpdate> = blocks
            .iter()
            .enumerate()
            .map(|(i, b)| OrderUpdate::new(b.id.clone(), (size - 1 - i) as u32))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("full_batch", size), &reversed, |b, updates| {
            b.iter(|| {
                rt.block_on(service.reorder_blocks(black_box(updates.clone())))
                    .expect("reorder")
            })
        });
    }

    group.finish();
}

fn bench_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("move-block");
    let rt = runtime();

    for size in [10usize, 100, 1000] {
        let (service, blocks) = rt.block_on(populated(size));
        let middle: BlockId = blocks[size / 2].id.clone();

        group.bench_with_input(BenchmarkId::new("middle_up", size), &middle, |b, id| {
            b.iter(|| {
                rt.block_on(service.move_block(black_box(id), MoveDirection::Up))
                    .expect("move")
            })
        });
    }

    group.finish();
}

fn bench_plan_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan-move");
    let rt = runtime();

    for size in [10usize, 1000] {
        let (_, mut blocks) = rt.block_on(populated(size));
        sort_blocks(&mut blocks);
        let last = blocks[size - 1].id.clone();

        group.bench_with_input(BenchmarkId::new("last_up", size), &blocks, |b, sorted| {
            b.iter(|| plan_move(black_box(sorted), &last, MoveDirection::Up))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reorder, bench_move, bench_plan_move);
criterion_main!(benches);
