//! Cadence Quickstart: a tiny clock circuit driven by scheduled actions.
//!
//! Demonstrates:
//!   1. Building a coordinator from a `SchedulerConfig`
//!   2. Registering chunk containers
//!   3. Actions that reschedule themselves from inside the callback
//!   4. Budget exhaustion spreading work over several calls
//!   5. Clearing an area and unloading a chunk
//!
//! Run with:
//!   RUST_LOG=cadence_engine=debug cargo run --example quickstart

use cadence_core::{BlockOffset, BlockPos, ChunkPos, Priority, TickId};
use cadence_engine::{LevelTicks, SchedulerConfig};
use cadence_space::BoundingBox;

// ─── Action kinds ───────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Kind {
    /// Toggles and reschedules itself two ticks later.
    Clock,
    /// Fires once when the clock next to it toggles.
    Lamp,
}

const CLOCK_PERIOD: i64 = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Coordinator with a small default budget.
    let config = SchedulerConfig {
        default_budget: 4,
        ..Default::default()
    };
    let mut level: LevelTicks<Kind> = LevelTicks::new(config)?;

    // 2. A 3x3 patch of loaded chunks around the origin.
    for x in -1..=1 {
        for z in -1..=1 {
            let container = level.new_container();
            level.add_container(ChunkPos::new(x, z), container);
        }
    }

    // 3. One clock per chunk on the x axis.
    let clocks: Vec<BlockPos> = (-1..=1).map(|cx| BlockPos::new(cx * 16 + 8, 64, 8)).collect();
    for &pos in &clocks {
        level.schedule_at(Kind::Clock, pos, TickId(0), Priority::Normal)?;
    }

    println!("Running 8 ticks with budget {}...", level.config().default_budget);
    for t in 0..8 {
        let now = TickId(t);
        let mut fired = Vec::new();
        let metrics = level.tick_default(now, |_| true, |level, pos, kind| {
            fired.push(format!("{kind:?}@{pos}"));
            if kind == Kind::Clock {
                let lamp = pos.offset(BlockOffset::new(1, 0, 0));
                // Routing failures are logged and counted; ignoring them is fine here.
                let _ = level.schedule_in(Kind::Lamp, lamp, now, 1, Priority::High);
                let _ = level.schedule_in(Kind::Clock, pos, now, CLOCK_PERIOD, Priority::Normal);
            }
        });
        println!(
            "  tick {:>2}: executed={} leftover={} pending={}  [{}]",
            t,
            metrics.executed,
            metrics.leftover_containers,
            metrics.pending_after,
            fired.join(", "),
        );
    }

    // 4. Stop the western clock by clearing its column.
    let west = BoundingBox::from_corners(BlockPos::new(-16, 0, 0), BlockPos::new(-1, 255, 15));
    let removed = level.clear_area(&west);
    println!("\nCleared {removed} pending action(s) in the western chunk.");

    // 5. Unload the eastern chunk and keep its container.
    let east = ChunkPos::new(1, 0);
    if let Some(container) = level.remove_container(east) {
        println!("Unloaded chunk {east} with {} pending action(s).", container.len());
    }
    let dropped = level.schedule_at(Kind::Lamp, BlockPos::new(24, 64, 8), TickId(9), Priority::Normal);
    println!("Scheduling into the unloaded chunk: {:?}", dropped.err());

    println!("\nRemaining pending: {}", level.count());
    println!("Routing failures so far: {}", level.routing_failures());
    println!("Done.");
    Ok(())
}
