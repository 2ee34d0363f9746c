//! Wire types of the Etherscan-style explorer API

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::models::TransferRecord;
use crate::infrastructure::explorer::error::ApiClientError;

/// Common response envelope: `{status, message, result}`
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Value,
}

impl ExplorerEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == "1"
    }
}

/// One row of `action=tokennfttx`; every field arrives as a string
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransfer {
    pub hash: String,
    pub block_number: String,
    pub time_stamp: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "tokenID")]
    pub token_id: String,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub token_symbol: Option<String>,
    pub contract_address: String,
}

impl TryFrom<RawTransfer> for TransferRecord {
    type Error = ApiClientError;

    fn try_from(raw: RawTransfer) -> Result<Self, Self::Error> {
        let block_number = parse_number("blockNumber", &raw.block_number, &raw.hash)?;
        let timestamp = parse_number("timeStamp", &raw.time_stamp, &raw.hash)?;
        Ok(TransferRecord::new(
            raw.hash,
            block_number,
            timestamp,
            &raw.from,
            &raw.to,
            raw.token_id,
            &raw.contract_address,
        )
        .with_token_metadata(raw.token_name, raw.token_symbol))
    }
}

fn parse_number(field: &str, value: &str, hash: &str) -> Result<u64, ApiClientError> {
    value.trim().parse::<u64>().map_err(|_| {
        ApiClientError::ResponseError(format!(
            "Invalid {} '{}' in transfer {}",
            field, value, hash
        ))
    })
}

/// One page of transfers, or the explorer's "nothing left" answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferPage {
    Records(Vec<TransferRecord>),
    Exhausted,
}

/// Interprets a `tokennfttx` envelope.
///
/// Status `"1"` carries rows. Status `"0"` with an empty result or the
/// "No transactions found" message means there is nothing left; any other
/// status `"0"` answer (bad key, rate limit) is an error.
pub fn interpret_transfer_envelope(
    envelope: ExplorerEnvelope,
) -> Result<TransferPage, ApiClientError> {
    if !envelope.is_success() {
        let empty_result = envelope.result.as_array().map_or(false, |rows| rows.is_empty());
        if empty_result || envelope.message.contains("No transactions found") {
            return Ok(TransferPage::Exhausted);
        }
        return Err(ApiClientError::ApiError(format!(
            "{}: {}",
            envelope.message,
            envelope.result.as_str().unwrap_or_default()
        )));
    }

    let rows: Vec<RawTransfer> = serde_json::from_value(envelope.result)?;
    if rows.is_empty() {
        return Ok(TransferPage::Exhausted);
    }

    let records = rows
        .into_iter()
        .map(TransferRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TransferPage::Records(records))
}

/// Interprets a `tokensupply` envelope; any non-success answer counts as 0
pub fn interpret_supply_envelope(envelope: &ExplorerEnvelope) -> u64 {
    if !envelope.is_success() {
        return 0;
    }
    match &envelope.result {
        Value::String(raw) => raw.trim().parse::<u64>().unwrap_or(0),
        Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

/// Outcome of one diagnostic probe request
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub endpoint: String,
    /// Request URL with the API key masked
    pub url: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
