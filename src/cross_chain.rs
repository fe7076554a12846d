/// Cross-chain deposit bundle builder
///
/// Assembles the swap -> bridge -> swap -> deposit action pipeline and hands
/// it to the bundler. The source leg swaps into the native asset when needed,
/// Stargate carries the native asset across, and the destination callback
/// swaps into the vault's asset token and deposits it for the sender.
use serde::{Deserialize, Serialize};

use crate::chains::{is_native_asset, NATIVE_CURRENCY_ADDRESS};
use crate::enso::{
    ActionAmount, BalanceArgs, BridgeArgs, BundleAction, BundleResponse, BundleRouteParams,
    DepositArgs, EnsoClient, RouteArgs,
};
use crate::errors::ArmadaError;
use crate::logger::{self, LogTag};
use crate::sdk::SdkClient;
use crate::types::CrossChainParams;

/// Stargate native-asset pool on the source chain
pub const STARGATE_POOL_NATIVE: &str = "0xdc181Bd607330aeeBEF6ea62e03e5e1Fb4B6F7C7";

/// Routing strategy the bundler expects for router-executed bundles
const ROUTING_STRATEGY: &str = "router";

/// Final payload relayed to the caller: the router transaction plus the
/// route diagnostics the router returned alongside it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainTxData {
    pub to: String,
    pub data: String,
    pub value: String,
    pub gas: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amounts_out: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_impact: Option<serde_json::Value>,
}

impl From<BundleResponse> for CrossChainTxData {
    fn from(bundle: BundleResponse) -> Self {
        Self {
            to: bundle.tx.to,
            data: bundle.tx.data,
            value: bundle.tx.value,
            gas: bundle.gas,
            amounts_out: bundle.amounts_out,
            route: bundle.route,
            price_impact: bundle.price_impact,
        }
    }
}

/// Convert a full-unit decimal amount like "1.5" into base units.
/// Rejects empty input, non-digits and more fractional digits than the
/// token carries.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<String, ArmadaError> {
    let reject = |reason: &str| ArmadaError::invalid_field("amount", reason);

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(reject("amount is empty"));
    }
    if frac_part.len() > decimals as usize {
        return Err(reject("too many decimal places for this token"));
    }

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| reject("not a decimal number"))?
    };
    let frac_value: u128 = if frac_part.is_empty() {
        0
    } else {
        frac_part
            .parse()
            .map_err(|_| reject("not a decimal number"))?
    };

    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or_else(|| reject("unsupported token decimals"))?;
    let frac_scale = 10u128.pow((decimals as usize - frac_part.len()) as u32);
    let base = int_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value * frac_scale))
        .ok_or_else(|| reject("amount overflows 128 bits"))?;
    Ok(base.to_string())
}

/// Build the ordered action list for one cross-chain deposit.
///
/// Non-native source tokens get a leading swap into the native asset, and
/// the bridge then references that swap's output. Native sources bridge the
/// literal amount directly. The bridge callback always runs balance -> route
/// -> deposit on the destination chain.
pub fn build_bundle_actions(
    params: &CrossChainParams,
    source_token_address: &str,
    asset_token_address: &str,
    amount_base_units: &str,
) -> Vec<BundleAction> {
    let mut actions = Vec::with_capacity(2);
    let source_is_native = is_native_asset(source_token_address);

    if !source_is_native {
        actions.push(BundleAction::route(
            "enso",
            RouteArgs {
                token_in: source_token_address.to_string(),
                amount_in: ActionAmount::literal(amount_base_units),
                token_out: NATIVE_CURRENCY_ADDRESS.to_string(),
                slippage: params.slippage,
            },
        ));
    }

    let bridge_amount = if source_is_native {
        ActionAmount::literal(amount_base_units)
    } else {
        // output of the swap pushed above
        ActionAmount::output_of(0)
    };

    let callback = vec![
        BundleAction::balance(
            "enso",
            BalanceArgs {
                token: NATIVE_CURRENCY_ADDRESS.to_string(),
            },
        ),
        BundleAction::route(
            "enso",
            RouteArgs {
                token_in: NATIVE_CURRENCY_ADDRESS.to_string(),
                // whatever the bridge delivered, read back via balance
                amount_in: ActionAmount::output_of(0),
                token_out: asset_token_address.to_string(),
                slippage: params.slippage,
            },
        ),
        BundleAction::deposit(
            "summer-fi",
            DepositArgs {
                token_in: asset_token_address.to_string(),
                token_out: params.fleet_address.clone(),
                amount_in: ActionAmount::output_of(1),
                primary_address: params.fleet_address.clone(),
                receiver: params.sender_address.clone(),
            },
        ),
    ];

    actions.push(BundleAction::bridge(
        "stargate",
        BridgeArgs {
            primary_address: STARGATE_POOL_NATIVE.to_string(),
            destination_chain_id: params.destination_chain_id,
            token_in: NATIVE_CURRENCY_ADDRESS.to_string(),
            amount_in: bridge_amount,
            receiver: params.sender_address.clone(),
            callback,
        },
    ));

    actions
}

/// Resolve tokens, build the bundle and fetch calldata from the router
pub async fn create_cross_chain_tx(
    sdk: &SdkClient,
    enso: &EnsoClient,
    params: &CrossChainParams,
) -> Result<CrossChainTxData, ArmadaError> {
    let source_token = sdk
        .get_token_by_symbol(params.source_chain_id, &params.source_token_symbol)
        .await?;
    let asset_token = sdk
        .get_token_by_symbol(params.destination_chain_id, &params.asset_token_symbol)
        .await?;

    let amount_base_units = to_base_units(&params.amount, source_token.decimals)?;
    let actions = build_bundle_actions(
        params,
        &source_token.address,
        &asset_token.address,
        &amount_base_units,
    );

    logger::log(
        LogTag::CrossChain,
        "BUNDLE",
        &format!(
            "{} {} from chain {} to fleet {} on chain {}",
            params.amount,
            params.source_token_symbol,
            params.source_chain_id,
            params.fleet_address,
            params.destination_chain_id
        ),
    );

    let route_params = BundleRouteParams {
        chain_id: params.source_chain_id,
        from_address: params.sender_address.clone(),
        spender: params.sender_address.clone(),
        routing_strategy: ROUTING_STRATEGY.to_string(),
    };
    let bundle = enso.get_bundle_data(&route_params, &actions).await?;
    Ok(bundle.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enso::BundleArgs;

    fn params(source_token_symbol: &str) -> CrossChainParams {
        CrossChainParams {
            source_chain_id: 1,
            destination_chain_id: 8453,
            sender_address: "0x1111111111111111111111111111111111111111".to_string(),
            fleet_address: "0x2222222222222222222222222222222222222222".to_string(),
            source_token_symbol: source_token_symbol.to_string(),
            asset_token_symbol: "USDC".to_string(),
            amount: "1".to_string(),
            slippage: 50,
        }
    }

    const USDC_MAINNET: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    const USDC_BASE: &str = "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913";

    #[test]
    fn base_unit_conversion_is_exact() {
        assert_eq!(to_base_units("1", 6).unwrap(), "1000000");
        assert_eq!(to_base_units("1.5", 6).unwrap(), "1500000");
        assert_eq!(to_base_units("0.000001", 6).unwrap(), "1");
        assert_eq!(to_base_units("2", 18).unwrap(), "2000000000000000000");
        assert_eq!(to_base_units(".5", 6).unwrap(), "500000");
        assert_eq!(to_base_units("7", 0).unwrap(), "7");
    }

    #[test]
    fn base_unit_conversion_rejects_bad_input() {
        assert!(to_base_units("", 6).is_err());
        assert!(to_base_units(".", 6).is_err());
        assert!(to_base_units("1.2345678", 6).is_err());
        assert!(to_base_units("abc", 6).is_err());
        assert!(to_base_units("-1", 6).is_err());
    }

    #[test]
    fn native_source_bridges_the_literal_amount() {
        let p = params("ETH");
        let actions =
            build_bundle_actions(&p, NATIVE_CURRENCY_ADDRESS, USDC_BASE, "1000000000000000000");

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].protocol, "stargate");
        let BundleArgs::Bridge(bridge) = &actions[0].args else {
            panic!("expected bridge args");
        };
        assert_eq!(
            bridge.amount_in,
            ActionAmount::literal("1000000000000000000")
        );
        assert_eq!(bridge.primary_address, STARGATE_POOL_NATIVE);
        assert_eq!(bridge.destination_chain_id, 8453);
        assert_eq!(bridge.callback.len(), 3);
    }

    #[test]
    fn erc20_source_swaps_first_and_bridges_the_swap_output() {
        let p = params("USDC");
        let actions = build_bundle_actions(&p, USDC_MAINNET, USDC_BASE, "1000000");

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].action, "route");
        let BundleArgs::Route(route) = &actions[0].args else {
            panic!("expected route args");
        };
        assert_eq!(route.token_in, USDC_MAINNET);
        assert_eq!(route.token_out, NATIVE_CURRENCY_ADDRESS);
        assert_eq!(route.amount_in, ActionAmount::literal("1000000"));

        let BundleArgs::Bridge(bridge) = &actions[1].args else {
            panic!("expected bridge args");
        };
        assert_eq!(bridge.amount_in, ActionAmount::output_of(0));
    }

    #[test]
    fn router_response_relays_into_tx_data() {
        let raw = r#"{
            "tx": {
                "to": "0x80eba3855878739f4710233a8b19d9124d8b23f7",
                "data": "0xdeadbeef",
                "value": "1000000000000000000"
            },
            "gas": "355600",
            "amountsOut": { "0x2222222222222222222222222222222222222222": "998877" },
            "route": [{ "protocol": "enso", "action": "route" }]
        }"#;
        let bundle: BundleResponse = serde_json::from_str(raw).unwrap();
        let tx: CrossChainTxData = bundle.into();

        assert_eq!(tx.to, "0x80eba3855878739f4710233a8b19d9124d8b23f7");
        assert_eq!(tx.data, "0xdeadbeef");
        // the transferred value is a plain non-negative integer
        assert!(tx.value.parse::<u128>().is_ok());
        assert_eq!(tx.gas, "355600");

        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("amountsOut").is_some());
        assert!(json.get("route").is_some());
        // priceImpact was absent upstream and stays absent in the relay
        assert!(json.get("priceImpact").is_none());
    }

    #[test]
    fn destination_callback_deposits_for_the_sender() {
        let p = params("ETH");
        let actions =
            build_bundle_actions(&p, NATIVE_CURRENCY_ADDRESS, USDC_BASE, "1000000000000000000");
        let BundleArgs::Bridge(bridge) = &actions[0].args else {
            panic!("expected bridge args");
        };

        assert_eq!(bridge.callback[0].action, "balance");
        assert_eq!(bridge.callback[1].action, "route");
        assert_eq!(bridge.callback[2].action, "deposit");
        assert_eq!(bridge.callback[2].protocol, "summer-fi");

        let BundleArgs::Route(swap) = &bridge.callback[1].args else {
            panic!("expected route args");
        };
        assert_eq!(swap.amount_in, ActionAmount::output_of(0));
        assert_eq!(swap.token_out, USDC_BASE);

        let BundleArgs::Deposit(deposit) = &bridge.callback[2].args else {
            panic!("expected deposit args");
        };
        assert_eq!(deposit.amount_in, ActionAmount::output_of(1));
        assert_eq!(deposit.receiver, p.sender_address);
        assert_eq!(deposit.primary_address, p.fleet_address);
    }
}
