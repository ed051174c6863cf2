pub mod aggregator;
pub mod formatter;

pub use aggregator::{AggregateOutcome, CombinedOutput, write_combined};
