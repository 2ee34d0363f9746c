pub mod fetcher;
pub mod orchestrator;
pub mod phase;
pub mod report;

pub use fetcher::{fetch_all_transfers, FetchOutcome, FetchReport};
pub use orchestrator::{SyncOrchestrator, SyncSettings};
pub use phase::SyncPhase;
pub use report::SyncReport;
