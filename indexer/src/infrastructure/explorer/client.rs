use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::ExplorerConfig;
use crate::infrastructure::explorer::error::ApiClientError;
use crate::infrastructure::explorer::types::{
    interpret_supply_envelope, interpret_transfer_envelope, ExplorerEnvelope, ProbeResult,
    TransferPage,
};
use crate::infrastructure::explorer::TransferSource;
use crate::utils::logging;

/// Highest block accepted by the explorer's `endblock` parameter
const END_BLOCK: u64 = 99_999_999;

/// Page size used by the diagnostic transfer probe
const PROBE_PAGE_SIZE: usize = 10;

/// Client for an Etherscan-compatible explorer API
#[derive(Clone)]
pub struct EtherscanClient {
    client: Client,
    base_url: String,
    api_key: String,
    chain_id: u64,
    contract_address: String,
}

impl EtherscanClient {
    /// Create a new explorer client. Fails when no API key is configured.
    pub fn new(config: &ExplorerConfig) -> Result<Self, ApiClientError> {
        let api_key = config
            .api_key()
            .map_err(|_| ApiClientError::MissingApiKey)?
            .to_string();

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                ApiClientError::ResponseError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(EtherscanClient {
            client,
            base_url: config.base_url.clone(),
            api_key,
            chain_id: config.chain_id,
            contract_address: config.contract_address.clone(),
        })
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// Query parameters for one `tokennfttx` page
    pub fn transfer_query(
        &self,
        start_block: Option<u64>,
        page_size: usize,
    ) -> Vec<(String, String)> {
        let mut params = vec![
            ("chainid".to_string(), self.chain_id.to_string()),
            ("module".to_string(), "account".to_string()),
            ("action".to_string(), "tokennfttx".to_string()),
            ("contractaddress".to_string(), self.contract_address.clone()),
        ];
        if let Some(start) = start_block {
            params.push(("startblock".to_string(), start.to_string()));
            params.push(("endblock".to_string(), END_BLOCK.to_string()));
        }
        params.push(("page".to_string(), "1".to_string()));
        params.push(("offset".to_string(), page_size.to_string()));
        params.push(("sort".to_string(), "asc".to_string()));
        params.push(("apikey".to_string(), self.api_key.clone()));
        params
    }

    fn supply_query(&self) -> Vec<(String, String)> {
        vec![
            ("chainid".to_string(), self.chain_id.to_string()),
            ("module".to_string(), "stats".to_string()),
            ("action".to_string(), "tokensupply".to_string()),
            ("contractaddress".to_string(), self.contract_address.clone()),
            ("apikey".to_string(), self.api_key.clone()),
        ]
    }

    fn probe_queries(&self) -> Vec<(&'static str, Vec<(String, String)>)> {
        let base = |module: &str, action: &str, address_key: &str| {
            vec![
                ("chainid".to_string(), self.chain_id.to_string()),
                ("module".to_string(), module.to_string()),
                ("action".to_string(), action.to_string()),
                (address_key.to_string(), self.contract_address.clone()),
                ("apikey".to_string(), self.api_key.clone()),
            ]
        };
        vec![
            ("Token Info (getToken)", base("token", "getToken", "contractaddress")),
            ("Token Supply", self.supply_query()),
            ("Contract ABI", base("contract", "getabi", "address")),
            ("ERC721 Transactions", self.transfer_query(None, PROBE_PAGE_SIZE)),
        ]
    }

    /// Full request URL with the API key replaced, for diagnostics output
    pub fn masked_url(&self, params: &[(String, String)]) -> String {
        let query = params
            .iter()
            .map(|(key, value)| {
                if key == "apikey" {
                    format!("{}=YOUR_API_KEY", key)
                } else {
                    format!("{}={}", key, value)
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.base_url, query)
    }

    async fn get_envelope(
        &self,
        params: &[(String, String)],
    ) -> Result<ExplorerEnvelope, ApiClientError> {
        let response = self.client.get(&self.base_url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            logging::log_error(&format!(
                "Explorer returned error status {} for {}",
                status,
                self.masked_url(params)
            ));
            return Err(ApiClientError::ApiError(format!(
                "API returned error status: {}",
                status
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            ApiClientError::ResponseError(format!("Error decoding response: {}", e))
        })?;
        Ok(serde_json::from_value(body)?)
    }

    /// Queries each diagnostic endpoint concurrently. Results keep the
    /// request order; individual failures are reported, not raised.
    pub async fn probe_endpoints(&self) -> Vec<ProbeResult> {
        let queries = self.probe_queries();
        let requests = queries.iter().map(|(name, params)| async move {
            let url = self.masked_url(params);
            match self.get_envelope(params).await {
                Ok(envelope) => ProbeResult {
                    endpoint: name.to_string(),
                    url,
                    success: envelope.is_success(),
                    data: Some(serde_json::json!({
                        "status": envelope.status,
                        "message": envelope.message,
                        "result": envelope.result,
                    })),
                    error: None,
                },
                Err(e) => ProbeResult {
                    endpoint: name.to_string(),
                    url,
                    success: false,
                    data: None,
                    error: Some(e.to_string()),
                },
            }
        });
        join_all(requests).await
    }
}

#[async_trait]
impl TransferSource for EtherscanClient {
    fn source_name(&self) -> &str {
        "etherscan"
    }

    async fn fetch_total_supply(&self) -> Result<u64, ApiClientError> {
        let envelope = self.get_envelope(&self.supply_query()).await?;
        if !envelope.is_success() {
            logging::log_warning(&format!(
                "Token supply unavailable ({}), using 0",
                envelope.message
            ));
        }
        Ok(interpret_supply_envelope(&envelope))
    }

    async fn fetch_transfer_page(
        &self,
        start_block: Option<u64>,
        page_size: usize,
    ) -> Result<TransferPage, ApiClientError> {
        let params = self.transfer_query(start_block, page_size);
        let envelope = self.get_envelope(&params).await?;
        interpret_transfer_envelope(envelope)
    }
}
