//! Criterion micro-benchmarks for scheduling, ticking, and area edits.

use std::hint::black_box;

use cadence_bench::{reference_profile, stress_profile, BenchKind, TRIGGER_SPREAD};
use cadence_core::{BlockOffset, BlockPos, Priority, TickId};
use cadence_space::BoundingBox;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

/// Benchmark: drain the whole reference profile, one tick at a time.
fn bench_tick_reference(c: &mut Criterion) {
    c.bench_function("tick_reference_full_drain", |b| {
        b.iter_batched(
            || reference_profile(1),
            |mut level| {
                let mut executed = 0;
                for t in 0..TRIGGER_SPREAD as i64 {
                    let metrics = level.tick(TickId(t), 65_536, |_| true, |_, pos, kind| {
                        black_box((pos, kind));
                    });
                    executed += metrics.executed;
                }
                black_box(executed)
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: one budget-limited call against the stress profile.
fn bench_tick_stress_budgeted(c: &mut Criterion) {
    c.bench_function("tick_stress_budget_4096", |b| {
        b.iter_batched(
            || stress_profile(2),
            |mut level| {
                let metrics = level.tick(TickId(TRIGGER_SPREAD as i64), 4096, |_| true, |_, pos, _| {
                    black_box(pos);
                });
                black_box(metrics)
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: callbacks that reschedule themselves, as a clock circuit does.
fn bench_reentrant_reschedule(c: &mut Criterion) {
    c.bench_function("tick_reentrant_reschedule", |b| {
        b.iter_batched(
            || reference_profile(3),
            |mut level| {
                for t in 0..16i64 {
                    level.tick(TickId(t), 65_536, |_| true, |level, pos, kind| {
                        let _ = level.schedule_in(kind, pos, TickId(t), 2, Priority::Normal);
                    });
                }
                black_box(level.count())
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: 10K schedule_at calls into one loaded 16x16 patch.
fn bench_schedule(c: &mut Criterion) {
    c.bench_function("schedule_10k", |b| {
        b.iter_batched(
            || reference_profile(4),
            |mut level| {
                for i in 0..10_000i32 {
                    let pos = BlockPos::new(i % 256, 64, (i / 256) % 256);
                    let _ = level.schedule_at(BenchKind::Wire, pos, TickId(i64::from(i % 32)), Priority::Normal);
                }
                black_box(level.count())
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: move a 4x4-chunk region by copy then clear.
fn bench_move_area(c: &mut Criterion) {
    let area = BoundingBox::from_corners(BlockPos::new(0, 0, 0), BlockPos::new(63, 127, 63));
    let offset = BlockOffset::new(128, 0, 0);
    c.bench_function("move_area_4x4_chunks", |b| {
        b.iter_batched(
            || reference_profile(5),
            |mut level| {
                let copied = level.copy_area(&area, offset);
                let cleared = level.clear_area(&area);
                black_box((copied, cleared))
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_tick_reference,
    bench_tick_stress_budgeted,
    bench_reentrant_reschedule,
    bench_schedule,
    bench_move_area
);
criterion_main!(benches);
