pub mod history;
pub mod ownership;
pub mod snapshot;
pub mod transfer;

pub use history::HolderHistoryEntry;
pub use ownership::{Holder, OwnershipEntry};
pub use snapshot::{HolderSnapshot, SnapshotTotals};
pub use transfer::{is_burn_address, normalize_address, TransferRecord, ZERO_ADDRESS};
