//! Stitches page-limited explorer responses into one transfer batch

use std::collections::HashSet;

use crate::domain::models::TransferRecord;
use crate::infrastructure::explorer::{ApiClientError, TransferPage, TransferSource};
use crate::utils::logging;

/// Why pagination stopped
#[derive(Debug)]
pub enum FetchOutcome {
    /// A short page or an explicit "no transactions" answer
    Exhausted,
    /// The page cap was hit while pages were still full
    CapReached,
    /// A page request failed; records from earlier pages are kept
    Failed(ApiClientError),
}

/// Result of a full pagination pass
#[derive(Debug)]
pub struct FetchReport {
    /// Deduplicated records in arrival order
    pub records: Vec<TransferRecord>,
    pub pages_fetched: u32,
    pub duplicates_skipped: u64,
    pub outcome: FetchOutcome,
}

impl FetchReport {
    /// True only when the upstream signalled the end of the history
    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Exhausted)
    }
}

/// Fetches the whole transfer history, one page at a time.
///
/// A page holding `page_size` records means more may follow, so the next
/// request starts at the block after the last record. Records are dropped
/// when their `(hash, token_id)` was already seen on an earlier page.
pub async fn fetch_all_transfers<S>(source: &S, page_size: usize, max_pages: u32) -> FetchReport
where
    S: TransferSource + ?Sized,
{
    let mut records: Vec<TransferRecord> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut start_block: Option<u64> = None;
    let mut pages_fetched = 0u32;
    let mut duplicates_skipped = 0u64;

    let outcome = loop {
        if pages_fetched >= max_pages {
            logging::log_warning(&format!(
                "Reached max page count ({}), transfer history may be incomplete",
                max_pages
            ));
            break FetchOutcome::CapReached;
        }

        logging::log_info(&format!(
            "Fetching batch {} starting from block {}",
            pages_fetched + 1,
            start_block.unwrap_or(0)
        ));

        let page = match source.fetch_transfer_page(start_block, page_size).await {
            Ok(TransferPage::Records(page)) => page,
            Ok(TransferPage::Exhausted) => break FetchOutcome::Exhausted,
            Err(e) => {
                logging::log_error(&format!(
                    "[{}] Transfer page {} failed: {}",
                    source.source_name(),
                    pages_fetched + 1,
                    e
                ));
                break FetchOutcome::Failed(e);
            }
        };
        pages_fetched += 1;

        let full_page = page.len() >= page_size;
        let last_block = page.last().map(|record| record.block_number);

        let mut page_keys = Vec::with_capacity(page.len());
        for record in page {
            let key = record.dedup_key();
            if seen.contains(&key) {
                duplicates_skipped += 1;
                continue;
            }
            page_keys.push(key);
            records.push(record);
        }
        seen.extend(page_keys);

        logging::log_debug(&format!(
            "Batch {} done, {} records accumulated",
            pages_fetched,
            records.len()
        ));

        match last_block {
            Some(block) if full_page => start_block = Some(block + 1),
            _ => break FetchOutcome::Exhausted,
        }
    };

    FetchReport {
        records,
        pages_fetched,
        duplicates_skipped,
        outcome,
    }
}
