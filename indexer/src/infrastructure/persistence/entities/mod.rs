pub mod holder_history;
pub mod holder_snapshots;
pub mod holders;
pub mod statistics;
pub mod token_ownership;
pub mod transactions;
