/// HTTP client for the bundle routing API
use reqwest::Client;
use thiserror::Error;

use crate::config::EnsoConfig;
use crate::errors::ArmadaError;
use crate::logger::{self, LogTag};

use super::types::{BundleAction, BundleResponse, BundleRouteParams};

#[derive(Debug, Error)]
pub enum EnsoError {
    #[error("bundle request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("bundle API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to decode bundle response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<EnsoError> for ArmadaError {
    fn from(err: EnsoError) -> Self {
        match err {
            EnsoError::Transport(e) => ArmadaError::network("enso/shortcuts/bundle", e),
            EnsoError::Api { status, body } => ArmadaError::Api {
                endpoint: "enso/shortcuts/bundle".to_string(),
                status,
                body,
            },
            EnsoError::Decode(e) => ArmadaError::parse("enso/shortcuts/bundle", e),
        }
    }
}

#[derive(Clone)]
pub struct EnsoClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EnsoClient {
    pub fn new(config: &EnsoConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Submit an ordered action bundle and return the router's calldata.
    /// Actions execute in list order on the source chain; bridge callbacks
    /// run on the destination chain.
    pub async fn get_bundle_data(
        &self,
        params: &BundleRouteParams,
        actions: &[BundleAction],
    ) -> Result<BundleResponse, EnsoError> {
        let endpoint = format!("{}/shortcuts/bundle", self.base_url);
        logger::debug(
            LogTag::Enso,
            &format!("POST {} ({} actions)", endpoint, actions.len()),
        );

        let mut request = self.http.post(&endpoint).query(params).json(&actions);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnsoError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
