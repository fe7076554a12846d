/// Position and activity-feed endpoints
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::chains::ChainId;
use crate::sdk::{map_sdk_position, SdkActivity};
use crate::types::{ActivityKind, ActivityRecord, Position, VaultActivityResponse};
use crate::webserver::state::AppState;
use crate::webserver::utils;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionsBody {
    pub chain_id: Option<ChainId>,
    pub address: Option<String>,
    pub environment: Option<String>,
}

pub async fn positions(
    State(state): State<AppState>,
    Json(body): Json<PositionsBody>,
) -> Result<Response, Response> {
    let mut missing = Vec::new();
    let chain_id = utils::require(&mut missing, "chainId", body.chain_id);
    let address = utils::require(&mut missing, "address", body.address);
    let environment = utils::require(&mut missing, "environment", body.environment);
    let (Ok(chain_id), Ok(address), Ok(environment)) = (chain_id, address, environment) else {
        return Err(utils::missing_fields_response(missing));
    };
    let environment = utils::parse_environment(Some(&environment))?;

    let sdk = state.sdk_for(environment);
    let positions = sdk
        .get_user_positions(chain_id, &address)
        .await
        .map_err(|e| utils::error_response(e, "Failed to fetch positions"))?;
    let positions: Vec<Position> = positions.into_iter().map(map_sdk_position).collect();
    Ok(Json(positions).into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionActivityBody {
    pub chain_id: Option<ChainId>,
    pub user_address: Option<String>,
    pub fleet_address: Option<String>,
    pub first: Option<u32>,
    pub skip: Option<u32>,
    pub environment: Option<String>,
}

pub async fn position_activity(
    State(state): State<AppState>,
    Json(body): Json<PositionActivityBody>,
) -> Result<Response, Response> {
    let mut missing = Vec::new();
    let chain_id = utils::require(&mut missing, "chainId", body.chain_id);
    let user = utils::require(&mut missing, "userAddress", body.user_address);
    let fleet = utils::require(&mut missing, "fleetAddress", body.fleet_address);
    let (Ok(chain_id), Ok(user_address), Ok(fleet_address)) = (chain_id, user, fleet) else {
        return Err(utils::missing_fields_response(missing));
    };
    let environment = utils::parse_environment(body.environment.as_deref())?;
    let sdk = state.sdk_for(environment);

    let position = sdk
        .get_user_position(chain_id, &user_address, &fleet_address)
        .await
        .map_err(|e| utils::error_response(e, "Failed to fetch position activity"))?;

    // no position in this fleet is a normal answer, not an error
    let Some(position) = position else {
        return Ok(Json(VaultActivityResponse {
            position_id: None,
            activities: vec![],
        })
        .into_response());
    };

    let (deposits, withdrawals) = tokio::try_join!(
        sdk.get_deposits(&position.id, body.first, body.skip),
        sdk.get_withdrawals(&position.id, body.first, body.skip),
    )
    .map_err(|e| utils::error_response(e, "Failed to fetch position activity"))?;

    Ok(Json(VaultActivityResponse {
        position_id: Some(position.id),
        activities: merge_activities(deposits, withdrawals),
    })
    .into_response())
}

/// Interleave deposits and withdrawals newest-first
fn merge_activities(
    deposits: Vec<SdkActivity>,
    withdrawals: Vec<SdkActivity>,
) -> Vec<ActivityRecord> {
    let mut activities: Vec<ActivityRecord> = deposits
        .into_iter()
        .map(|a| to_record(ActivityKind::Deposit, a))
        .chain(
            withdrawals
                .into_iter()
                .map(|a| to_record(ActivityKind::Withdrawal, a)),
        )
        .collect();
    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activities
}

fn to_record(kind: ActivityKind, activity: SdkActivity) -> ActivityRecord {
    ActivityRecord {
        kind,
        from: activity.from,
        to: activity.to,
        amount: activity.amount.to_display_string(),
        amount_usd: activity.amount_usd,
        timestamp: activity.timestamp,
        tx_hash: activity.tx_hash,
        vault_balance: activity.vault_balance.to_display_string(),
        vault_balance_usd: activity.vault_balance_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::{SdkToken, SdkTokenAmount};

    fn activity(timestamp: i64, raw_amount: &str) -> SdkActivity {
        let amount = SdkTokenAmount {
            amount: raw_amount.to_string(),
            token: SdkToken {
                address: "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913".to_string(),
                name: "USD Coin".to_string(),
                symbol: "USDC".to_string(),
                decimals: 6,
            },
        };
        SdkActivity {
            from: "0x1111111111111111111111111111111111111111".to_string(),
            to: "0x2222222222222222222222222222222222222222".to_string(),
            amount: amount.clone(),
            amount_usd: "1.00".to_string(),
            timestamp,
            tx_hash: format!("0xaaaa{:04}", timestamp),
            vault_balance: amount,
            vault_balance_usd: "1.00".to_string(),
        }
    }

    #[test]
    fn activities_merge_newest_first() {
        let deposits = vec![activity(100, "1000000"), activity(300, "2500000")];
        let withdrawals = vec![activity(200, "500000")];

        let merged = merge_activities(deposits, withdrawals);

        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.iter().map(|a| a.timestamp).collect::<Vec<_>>(),
            vec![300, 200, 100]
        );
        assert_eq!(merged[0].kind, ActivityKind::Deposit);
        assert_eq!(merged[1].kind, ActivityKind::Withdrawal);
        assert_eq!(merged[0].amount, "2.5 USDC");
    }
}
