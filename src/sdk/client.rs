/// HTTP client for the vendor SDK backend
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::chains::ChainId;
use crate::config::SdkConfig;
use crate::errors::ArmadaError;
use crate::logger::{self, LogTag};
use crate::types::{AggregatedRewards, Environment, MerklRewardsResponse};

use super::types::{SdkActivity, SdkPosition, SdkToken, SdkVault, SdkVaultList, SdkTransactionInfo, VaultTxRequest};

#[derive(Clone)]
pub struct SdkClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SdkClient {
    pub fn new(config: &SdkConfig, environment: Environment) -> Self {
        Self {
            http: Client::new(),
            base_url: config.url_for(environment).trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -------------------------------------------------------------------------
    // Token operations
    // -------------------------------------------------------------------------

    pub async fn get_token_by_symbol(
        &self,
        chain_id: ChainId,
        symbol: &str,
    ) -> Result<SdkToken, ArmadaError> {
        self.get_json(
            "/tokens/by-symbol",
            &[
                ("chainId", chain_id.to_string()),
                ("symbol", symbol.to_string()),
            ],
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Vault operations
    // -------------------------------------------------------------------------

    pub async fn get_vault_info_list(
        &self,
        chain_id: ChainId,
    ) -> Result<Vec<SdkVault>, ArmadaError> {
        let list: SdkVaultList = self
            .get_json("/armada/vaults", &[("chainId", chain_id.to_string())])
            .await?;
        Ok(list.list)
    }

    /// Returns one or two transactions: the deposit itself, preceded by an
    /// approval when an allowance is still required
    pub async fn get_new_deposit_tx(
        &self,
        request: &VaultTxRequest,
    ) -> Result<Vec<SdkTransactionInfo>, ArmadaError> {
        self.post_json("/armada/deposit-tx", request).await
    }

    /// Same shape as deposits: withdraw transaction plus optional approval
    pub async fn get_withdraw_tx(
        &self,
        request: &VaultTxRequest,
    ) -> Result<Vec<SdkTransactionInfo>, ArmadaError> {
        self.post_json("/armada/withdraw-tx", request).await
    }

    // -------------------------------------------------------------------------
    // Position operations
    // -------------------------------------------------------------------------

    pub async fn get_user_positions(
        &self,
        chain_id: ChainId,
        address: &str,
    ) -> Result<Vec<SdkPosition>, ArmadaError> {
        self.get_json(
            "/armada/positions",
            &[
                ("chainId", chain_id.to_string()),
                ("address", address.to_string()),
            ],
        )
        .await
    }

    /// Single position lookup; a 404 from the backend means the user has no
    /// position in that fleet and maps to `None`
    pub async fn get_user_position(
        &self,
        chain_id: ChainId,
        address: &str,
        fleet_address: &str,
    ) -> Result<Option<SdkPosition>, ArmadaError> {
        let endpoint = format!("{}/armada/position", self.base_url);
        let mut request = self.http.get(&endpoint).query(&[
            ("chainId", chain_id.to_string()),
            ("address", address.to_string()),
            ("fleetAddress", fleet_address.to_string()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ArmadaError::network(&endpoint, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArmadaError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        let position = response
            .json::<SdkPosition>()
            .await
            .map_err(|e| ArmadaError::parse(&endpoint, e))?;
        Ok(Some(position))
    }

    pub async fn get_deposits(
        &self,
        position_id: &str,
        first: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Vec<SdkActivity>, ArmadaError> {
        self.get_json("/armada/deposits", &paged_query(position_id, first, skip))
            .await
    }

    pub async fn get_withdrawals(
        &self,
        position_id: &str,
        first: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Vec<SdkActivity>, ArmadaError> {
        self.get_json("/armada/withdrawals", &paged_query(position_id, first, skip))
            .await
    }

    // -------------------------------------------------------------------------
    // Reward operations
    // -------------------------------------------------------------------------

    pub async fn get_aggregated_rewards(
        &self,
        address: &str,
    ) -> Result<AggregatedRewards, ArmadaError> {
        self.get_json("/armada/rewards/aggregated", &[("address", address.to_string())])
            .await
    }

    pub async fn get_user_merkl_rewards(
        &self,
        address: &str,
    ) -> Result<MerklRewardsResponse, ArmadaError> {
        self.get_json("/armada/rewards/merkl", &[("address", address.to_string())])
            .await
    }

    // -------------------------------------------------------------------------
    // Transport helpers
    // -------------------------------------------------------------------------

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ArmadaError> {
        let endpoint = format!("{}{}", self.base_url, path);
        logger::debug(LogTag::Sdk, &format!("GET {}", endpoint));

        let mut request = self.http.get(&endpoint).query(query);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ArmadaError::network(&endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ArmadaError> {
        let endpoint = format!("{}{}", self.base_url, path);
        logger::debug(LogTag::Sdk, &format!("POST {}", endpoint));

        let mut request = self.http.post(&endpoint).json(body);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ArmadaError::network(&endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: String,
        response: reqwest::Response,
    ) -> Result<T, ArmadaError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArmadaError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        let text = response
            .text()
            .await
            .map_err(|e| ArmadaError::network(&endpoint, e))?;
        serde_json::from_str(&text).map_err(|e| ArmadaError::parse(&endpoint, e))
    }
}

fn paged_query(position_id: &str, first: Option<u32>, skip: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = vec![("positionId", position_id.to_string())];
    if let Some(first) = first {
        query.push(("first", first.to_string()));
    }
    if let Some(skip) = skip {
        query.push(("skip", skip.to_string()));
    }
    query
}
