pub mod connection;
pub mod entities;
pub mod error;
pub mod repositories;
pub mod store;

pub use connection::DbPool;
pub use error::DbError;
pub use repositories::{SeaOrmSyncStore, SeaOrmSyncTransaction};
pub use store::{SyncStore, SyncTransaction};
