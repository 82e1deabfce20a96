use criterion::{Criterion, criterion_group, criterion_main};
use richtext_engine::editing::{BlockAttrs, History, set_block};
use richtext_engine::models::block_kind;
mod common;

fn bench_history_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");
    group.sample_size(10);

    let doc = common::generate_document(1_000);

    group.bench_function("record_undo_redo", |b| {
        b.iter(|| {
            let mut history = History::new();
            let mut current = doc.clone();
            for i in 0..100 {
                let next = set_block(&current, &[i], block_kind::HEADING, BlockAttrs::level(2));
                history.record(std::mem::replace(&mut current, next));
            }
            while let Some(previous) = history.undo(current.clone()) {
                current = previous;
            }
            while let Some(next) = history.redo(current.clone()) {
                current = next;
            }
            std::hint::black_box(current);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_history_operations);
criterion_main!(benches);
