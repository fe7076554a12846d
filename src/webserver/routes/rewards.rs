/// Reward endpoints: aggregated totals and Merkl distributions
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::chains::ChainId;
use crate::logger::{self, LogTag};
use crate::rewards::check_constituents;
use crate::types::{Environment, MerklRewardsResponse};
use crate::webserver::state::AppState;
use crate::webserver::utils;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsQuery {
    pub address: Option<String>,
    pub chain_id: Option<String>,
    pub environment: Option<String>,
}

pub async fn rewards(
    State(state): State<AppState>,
    Query(query): Query<RewardsQuery>,
) -> Result<Response, Response> {
    let mut missing = Vec::new();
    let address = utils::require(&mut missing, "address", query.address);
    let chain_id = utils::require(&mut missing, "chainId", query.chain_id);
    let environment = utils::require(&mut missing, "environment", query.environment);
    let (Ok(address), Ok(chain_id), Ok(environment)) = (address, chain_id, environment) else {
        return Err(utils::missing_fields_response(missing));
    };
    let chain_id: ChainId = chain_id
        .parse()
        .map_err(|_| utils::bad_request("Invalid chainId: must be a number"))?;
    let environment = utils::parse_environment(Some(&environment))?;

    let sdk = state.sdk_for(environment);
    let rewards = sdk
        .get_aggregated_rewards(&address)
        .await
        .map_err(|e| utils::error_response(e, "Failed to fetch rewards"))?;

    // a few wei of rounding drift between total and the constituent sum is
    // expected from the backend; report it, never reject
    match check_constituents(&rewards) {
        Ok(check) if check.difference != 0 => logger::debug(
            LogTag::Webserver,
            &format!(
                "reward total differs from constituent sum by {} wei (chain {})",
                check.difference, chain_id
            ),
        ),
        Ok(_) => {}
        Err(e) => logger::warn(
            LogTag::Webserver,
            &format!("reward constituents not checkable: {}", e),
        ),
    }

    Ok(Json(rewards).into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerklRewardsQuery {
    pub address: Option<String>,
    pub chain_id: Option<String>,
}

pub async fn merkl_rewards(
    State(state): State<AppState>,
    Query(query): Query<MerklRewardsQuery>,
) -> Result<Response, Response> {
    let mut missing = Vec::new();
    let address = utils::require(&mut missing, "address", query.address);
    let chain_id = utils::require(&mut missing, "chainId", query.chain_id);
    let (Ok(address), Ok(chain_id)) = (address, chain_id) else {
        return Err(utils::missing_fields_response(missing));
    };
    let chain_id: ChainId = chain_id
        .parse()
        .map_err(|_| utils::bad_request("Invalid chainId: must be a number"))?;

    let sdk = state.sdk_for(Environment::Prod);
    logger::debug(
        LogTag::Webserver,
        &format!("merkl rewards for {} (chain {})", address, chain_id),
    );
    // the backend already groups per chain; its answer is relayed as-is
    let rewards: MerklRewardsResponse = sdk
        .get_user_merkl_rewards(&address)
        .await
        .map_err(|e| utils::error_response(e, "Failed to fetch Merkl rewards"))?;

    Ok(Json(rewards).into_response())
}
