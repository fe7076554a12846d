/// Vault listing and token metadata endpoints
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::chains::ChainId;
use crate::sdk::map_sdk_vault;
use crate::types::{TokenInfo, VaultInfo};
use crate::webserver::state::AppState;
use crate::webserver::utils;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultsBody {
    pub chain_id: Option<ChainId>,
    pub environment: Option<String>,
}

pub async fn vaults(
    State(state): State<AppState>,
    Json(body): Json<VaultsBody>,
) -> Result<Response, Response> {
    let mut missing = Vec::new();
    let chain_id = utils::require(&mut missing, "chainId", body.chain_id);
    let Ok(chain_id) = chain_id else {
        return Err(utils::missing_fields_response(missing));
    };
    let environment = utils::parse_environment(body.environment.as_deref())?;

    let sdk = state.sdk_for(environment);
    let vaults = sdk
        .get_vault_info_list(chain_id)
        .await
        .map_err(|e| utils::error_response(e, "Failed to fetch vaults"))?;
    let vaults: Vec<VaultInfo> = vaults.into_iter().map(map_sdk_vault).collect();
    Ok(Json(vaults).into_response())
}

/// Query params arrive as strings; chainId has to parse as a number
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenQuery {
    pub symbol: Option<String>,
    pub chain_id: Option<String>,
    pub environment: Option<String>,
}

pub async fn token_by_symbol(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<Response, Response> {
    let mut missing = Vec::new();
    let symbol = utils::require(&mut missing, "symbol", query.symbol);
    let chain_id = utils::require(&mut missing, "chainId", query.chain_id);
    let environment = utils::require(&mut missing, "environment", query.environment);
    let (Ok(symbol), Ok(chain_id), Ok(environment)) = (symbol, chain_id, environment) else {
        return Err(utils::missing_fields_response(missing));
    };
    let chain_id: ChainId = chain_id
        .parse()
        .map_err(|_| utils::bad_request("Invalid chainId: must be a number"))?;
    let environment = utils::parse_environment(Some(&environment))?;

    let sdk = state.sdk_for(environment);
    let token = sdk
        .get_token_by_symbol(chain_id, &symbol)
        .await
        .map_err(|e| utils::error_response(e, "Failed to fetch token"))?;

    Ok(Json(TokenInfo {
        token_address: token.address,
        token_name: token.name,
        token_symbol: token.symbol,
        decimals: token.decimals,
    })
    .into_response())
}
