//! Training infrastructure: the alternation scheduler, parameter
//! synchronization, loss probing, per-pass sample snapshots and the trainer
//! that drives them.

pub mod batches;
pub mod metrics;
pub mod probe;
pub mod scheduler;
pub mod snapshot;
pub mod sync;
pub mod trainer;

pub use scheduler::{decide, AlternationScheduler, Decision, HandleSet, SchedulerState, Turn};
pub use sync::sync;
pub use trainer::{RunSummary, Trainer, TrainerConfig};
