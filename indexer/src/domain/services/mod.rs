pub mod growth;
pub mod history_tracker;
pub mod ownership_resolver;
pub mod snapshot_writer;

pub use growth::{GrowthMetrics, GrowthWindow};
pub use ownership_resolver::{resolve, Resolution};
