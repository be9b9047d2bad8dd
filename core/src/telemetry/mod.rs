//! telemetry/mod.rs
//! Batch telemetry: counters, stage timers, and immutable snapshots.
//!
//! Counters are plain integers owned by the orchestration thread; a snapshot is
//! taken once when the batch ends and is what callers see.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
