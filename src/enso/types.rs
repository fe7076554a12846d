/// Bundle request/response types for the routing API
use serde::{Deserialize, Serialize};

use crate::chains::ChainId;

// =============================================================================
// ACTIONS
// =============================================================================

/// Amount argument: either a literal base-unit value or a back-reference to
/// the output of an earlier call in the same bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionAmount {
    Literal(String),
    #[serde(rename_all = "camelCase")]
    Reference { use_output_of_call_at: usize },
}

impl ActionAmount {
    pub fn literal(value: impl Into<String>) -> Self {
        ActionAmount::Literal(value.into())
    }

    pub fn output_of(call_index: usize) -> Self {
        ActionAmount::Reference {
            use_output_of_call_at: call_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteArgs {
    pub token_in: String,
    pub amount_in: ActionAmount,
    pub token_out: String,
    pub slippage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeArgs {
    /// Bridge pool contract on the source chain
    pub primary_address: String,
    pub destination_chain_id: ChainId,
    pub token_in: String,
    pub amount_in: ActionAmount,
    pub receiver: String,
    /// Actions executed on the destination chain after the bridge lands
    pub callback: Vec<BundleAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceArgs {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositArgs {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: ActionAmount,
    pub primary_address: String,
    pub receiver: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundleArgs {
    Route(RouteArgs),
    Bridge(BridgeArgs),
    Balance(BalanceArgs),
    Deposit(DepositArgs),
}

/// One protocol action inside a bundle; executed in list order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleAction {
    pub protocol: String,
    pub action: String,
    pub args: BundleArgs,
}

impl BundleAction {
    pub fn route(protocol: &str, args: RouteArgs) -> Self {
        Self {
            protocol: protocol.to_string(),
            action: "route".to_string(),
            args: BundleArgs::Route(args),
        }
    }

    pub fn bridge(protocol: &str, args: BridgeArgs) -> Self {
        Self {
            protocol: protocol.to_string(),
            action: "bridge".to_string(),
            args: BundleArgs::Bridge(args),
        }
    }

    pub fn balance(protocol: &str, args: BalanceArgs) -> Self {
        Self {
            protocol: protocol.to_string(),
            action: "balance".to_string(),
            args: BundleArgs::Balance(args),
        }
    }

    pub fn deposit(protocol: &str, args: DepositArgs) -> Self {
        Self {
            protocol: protocol.to_string(),
            action: "deposit".to_string(),
            args: BundleArgs::Deposit(args),
        }
    }
}

// =============================================================================
// BUNDLE REQUEST / RESPONSE
// =============================================================================

/// Routing parameters sent as query string with the bundle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleRouteParams {
    pub chain_id: ChainId,
    pub from_address: String,
    pub spender: String,
    pub routing_strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleTx {
    pub to: String,
    pub data: String,
    pub value: String,
}

/// Router response, relayed verbatim to the caller. Route/amountsOut and the
/// optional priceImpact are dynamic router payloads, kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleResponse {
    pub tx: BundleTx,
    pub gas: String,
    #[serde(default)]
    pub amounts_out: Option<serde_json::Value>,
    #[serde(default)]
    pub route: Option<serde_json::Value>,
    #[serde(default)]
    pub price_impact: Option<serde_json::Value>,
}
