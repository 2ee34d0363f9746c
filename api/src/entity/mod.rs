// Entities are owned by the indexer, which writes them

pub use holders_indexer::infrastructure::persistence::entities::{
    holder_history, holder_snapshots, holders, statistics, token_ownership, transactions,
};
