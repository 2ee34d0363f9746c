use serde::{Deserialize, Serialize};

/// Sentinel owner of burned tokens
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Lower-cases and trims an address so comparisons are case-insensitive
pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Returns true for the zero/burn address
pub fn is_burn_address(address: &str) -> bool {
    address.eq_ignore_ascii_case(ZERO_ADDRESS)
}

/// One ERC-721 transfer event as reported by the block explorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Transaction hash
    pub hash: String,

    /// Block the transfer was mined in
    pub block_number: u64,

    /// Block timestamp (unix seconds)
    pub timestamp: u64,

    /// Sender, lower-cased
    pub from: String,

    /// Recipient, lower-cased
    pub to: String,

    /// Token id as a decimal string (uint256 does not fit native integers)
    pub token_id: String,

    pub token_name: Option<String>,
    pub token_symbol: Option<String>,

    /// Contract that emitted the transfer, lower-cased
    pub contract_address: String,
}

impl TransferRecord {
    /// Creates a transfer record, normalizing addresses
    pub fn new(
        hash: impl Into<String>,
        block_number: u64,
        timestamp: u64,
        from: &str,
        to: &str,
        token_id: impl Into<String>,
        contract_address: &str,
    ) -> Self {
        Self {
            hash: hash.into(),
            block_number,
            timestamp,
            from: normalize_address(from),
            to: normalize_address(to),
            token_id: token_id.into(),
            token_name: None,
            token_symbol: None,
            contract_address: normalize_address(contract_address),
        }
    }

    /// Attaches collection metadata reported alongside the transfer
    pub fn with_token_metadata(mut self, name: Option<String>, symbol: Option<String>) -> Self {
        self.token_name = name;
        self.token_symbol = symbol;
        self
    }

    /// Identity used to drop records returned twice by overlapping pages.
    /// A single transaction may move several tokens, so the token id is
    /// part of the key.
    pub fn dedup_key(&self) -> (String, String) {
        (self.hash.clone(), self.token_id.clone())
    }

    /// Whether this transfer sends the token to the burn address
    pub fn is_burn(&self) -> bool {
        is_burn_address(&self.to)
    }

    /// Whether this transfer is a mint (from the zero address)
    pub fn is_mint(&self) -> bool {
        is_burn_address(&self.from)
    }
}
