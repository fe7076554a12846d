/// Transaction-building endpoints: deposit, withdraw, cross-chain deposit
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::chains::ChainId;
use crate::cross_chain;
use crate::sdk::{map_sdk_transaction, VaultTxRequest};
use crate::types::{CrossChainParams, Environment, Transaction};
use crate::webserver::state::AppState;
use crate::webserver::utils;

/// Fixed playground sizing: every vault flow moves exactly one full unit
/// of the asset token at 0.5% slippage
const DEMO_AMOUNT: &str = "1";
const DEMO_SLIPPAGE_PERCENT: f64 = 0.5;
const DEPOSIT_REFERRAL_CODE: &str = "test";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultTxBody {
    pub chain_id: Option<ChainId>,
    pub sender_address: Option<String>,
    pub fleet_address: Option<String>,
    pub asset_token_symbol: Option<String>,
    pub environment: Option<String>,
}

fn build_vault_request(
    body: VaultTxBody,
    referral_code: Option<&str>,
) -> Result<(VaultTxRequest, Environment), Response> {
    let mut missing = Vec::new();
    let chain_id = utils::require(&mut missing, "chainId", body.chain_id);
    let sender = utils::require(&mut missing, "senderAddress", body.sender_address);
    let fleet = utils::require(&mut missing, "fleetAddress", body.fleet_address);
    let symbol = utils::require(&mut missing, "assetTokenSymbol", body.asset_token_symbol);
    let (Ok(chain_id), Ok(sender_address), Ok(fleet_address), Ok(asset_token_symbol)) =
        (chain_id, sender, fleet, symbol)
    else {
        return Err(utils::missing_fields_response(missing));
    };
    let environment = utils::parse_environment(body.environment.as_deref())?;

    Ok((
        VaultTxRequest {
            chain_id,
            sender_address,
            fleet_address,
            asset_token_symbol,
            amount: DEMO_AMOUNT.to_string(),
            slippage: DEMO_SLIPPAGE_PERCENT,
            referral_code: referral_code.map(str::to_string),
        },
        environment,
    ))
}

pub async fn deposit_tx(
    State(state): State<AppState>,
    Json(body): Json<VaultTxBody>,
) -> Result<Response, Response> {
    let (request, environment) = build_vault_request(body, Some(DEPOSIT_REFERRAL_CODE))?;
    let sdk = state.sdk_for(environment);
    let transactions = sdk
        .get_new_deposit_tx(&request)
        .await
        .map_err(|e| utils::error_response(e, "Failed to generate deposit transaction"))?;
    let transactions: Vec<Transaction> =
        transactions.into_iter().map(map_sdk_transaction).collect();
    Ok(Json(transactions).into_response())
}

pub async fn withdraw_tx(
    State(state): State<AppState>,
    Json(body): Json<VaultTxBody>,
) -> Result<Response, Response> {
    let (request, environment) = build_vault_request(body, None)?;
    let sdk = state.sdk_for(environment);
    let transactions = sdk
        .get_withdraw_tx(&request)
        .await
        .map_err(|e| utils::error_response(e, "Failed to generate withdraw transaction"))?;
    let transactions: Vec<Transaction> =
        transactions.into_iter().map(map_sdk_transaction).collect();
    Ok(Json(transactions).into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainTxBody {
    pub source_chain_id: Option<ChainId>,
    pub destination_chain_id: Option<ChainId>,
    pub sender_address: Option<String>,
    pub fleet_address: Option<String>,
    pub source_token_symbol: Option<String>,
    pub asset_token_symbol: Option<String>,
    pub amount: Option<String>,
    pub slippage: Option<u32>,
    pub environment: Option<String>,
}

pub async fn cross_chain_tx(
    State(state): State<AppState>,
    Json(body): Json<CrossChainTxBody>,
) -> Result<Response, Response> {
    let mut missing = Vec::new();
    let source_chain = utils::require(&mut missing, "sourceChainId", body.source_chain_id);
    let dest_chain = utils::require(&mut missing, "destinationChainId", body.destination_chain_id);
    let sender = utils::require(&mut missing, "senderAddress", body.sender_address);
    let fleet = utils::require(&mut missing, "fleetAddress", body.fleet_address);
    let source_symbol = utils::require(&mut missing, "sourceTokenSymbol", body.source_token_symbol);
    let asset_symbol = utils::require(&mut missing, "assetTokenSymbol", body.asset_token_symbol);
    let amount = utils::require(&mut missing, "amount", body.amount);
    let (
        Ok(source_chain_id),
        Ok(destination_chain_id),
        Ok(sender_address),
        Ok(fleet_address),
        Ok(source_token_symbol),
        Ok(asset_token_symbol),
        Ok(amount),
    ) = (
        source_chain,
        dest_chain,
        sender,
        fleet,
        source_symbol,
        asset_symbol,
        amount,
    )
    else {
        return Err(utils::missing_fields_response(missing));
    };
    let environment = utils::parse_environment(body.environment.as_deref())?;

    let params = CrossChainParams {
        source_chain_id,
        destination_chain_id,
        sender_address,
        fleet_address,
        source_token_symbol,
        asset_token_symbol,
        amount,
        slippage: body
            .slippage
            .unwrap_or(state.config.general.default_slippage_bps),
    };

    let sdk = state.sdk_for(environment);
    let tx_data = cross_chain::create_cross_chain_tx(&sdk, &state.enso, &params)
        .await
        .map_err(|e| utils::error_response(e, "Failed to generate cross-chain transaction"))?;
    Ok(Json(tx_data).into_response())
}
