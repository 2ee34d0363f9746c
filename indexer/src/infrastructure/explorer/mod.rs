pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::EtherscanClient;
pub use error::ApiClientError;
pub use types::{ProbeResult, TransferPage};

/// Upstream source of transfer history and supply for the tracked contract
#[async_trait]
pub trait TransferSource: Send + Sync {
    /// Short name used in logs
    fn source_name(&self) -> &str;

    /// Declared total supply; 0 when the explorer cannot report it
    async fn fetch_total_supply(&self) -> Result<u64, ApiClientError>;

    /// Transfers in ascending block order. `None` requests the first page
    /// without a block range.
    async fn fetch_transfer_page(
        &self,
        start_block: Option<u64>,
        page_size: usize,
    ) -> Result<TransferPage, ApiClientError>;
}
