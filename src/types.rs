/// Shared wire/data types for the playground API
///
/// Everything here serializes camelCase to stay byte-compatible with the
/// original front-end payloads. Amount-like values travel as strings so the
/// 18-decimal wei quantities never lose precision in JSON.
use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chains::ChainId;

pub type AddressValue = String;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Backend environment the vendor SDK can be pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Staging,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            other => Err(format!(
                "Invalid environment '{}'. Must be one of: local, staging, prod",
                other
            )),
        }
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Approval,
    Operation,
}

/// A single pre-built transaction ready for wallet submission.
/// Immutable once created; the executor consumes these front-to-back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub to: AddressValue,
    pub data: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

// =============================================================================
// REQUEST PARAMS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositParams {
    pub chain_id: ChainId,
    pub sender_address: AddressValue,
    pub fleet_address: AddressValue,
    pub asset_token_symbol: String,
}

pub type WithdrawParams = DepositParams;

/// Inputs for one cross-chain deposit bundle; lives for a single request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainParams {
    pub source_chain_id: ChainId,
    pub destination_chain_id: ChainId,
    pub sender_address: AddressValue,
    pub fleet_address: AddressValue,
    pub source_token_symbol: String,
    pub asset_token_symbol: String,
    pub amount: String,
    /// Max acceptable price deviation, in basis points (50 = 0.5%)
    pub slippage: u32,
}

// =============================================================================
// VAULTS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardApy {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerklEmission {
    pub symbol: String,
    pub daily_emission: String,
}

/// Display-only projection of vendor vault data; last successful fetch wins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultInfo {
    pub id: AddressValue,
    pub name: String,
    pub token: String,
    pub asset_token: String,
    pub apy: String,
    pub rewards_apys: Vec<RewardApy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merkl_rewards: Option<Vec<MerklEmission>>,
    pub tvl: String,
    pub deposit_cap: String,
}

// =============================================================================
// POSITIONS & ACTIVITY
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionReward {
    pub claimed: String,
    pub claimable: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub vault_id: AddressValue,
    pub vault_name: String,
    pub amount: String,
    pub shares: String,
    pub deposits_amount: String,
    pub withdrawals_amount: String,
    pub deposits: Vec<String>,
    pub withdrawals: Vec<String>,
    pub deposits_amount_usd: String,
    pub withdrawals_amount_usd: String,
    pub claimable_summer_token: String,
    pub claimed_summer_token: String,
    pub rewards: Vec<PositionReward>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Deposit,
    Withdrawal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub from: AddressValue,
    pub to: AddressValue,
    pub amount: String,
    pub amount_usd: String,
    pub timestamp: i64,
    pub tx_hash: String,
    pub vault_balance: String,
    pub vault_balance_usd: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultActivityResponse {
    pub position_id: Option<String>,
    pub activities: Vec<ActivityRecord>,
}

// =============================================================================
// REWARDS
// =============================================================================

/// Aggregated reward totals; every amount is a stringified wei value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRewards {
    pub total: String,
    pub vault_usage_per_chain: BTreeMap<ChainId, String>,
    pub vault_usage: String,
    pub merkle_distribution: String,
    pub vote_delegation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerklReward {
    pub token: AddressValue,
    pub symbol: String,
    pub decimals: u8,
    pub amount: String,
    pub claimed: String,
    pub pending: String,
}

/// Merkl rewards grouped per chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerklRewardsResponse {
    pub per_chain: BTreeMap<ChainId, Vec<MerklReward>>,
}

// =============================================================================
// TOKENS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub token_address: AddressValue,
    pub token_name: String,
    pub token_symbol: String,
    pub decimals: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_serializes_with_type_field() {
        let tx = Transaction {
            to: "0xdc181Bd607330aeeBEF6ea62e03e5e1Fb4B6F7C7".to_string(),
            data: "0xdeadbeef".to_string(),
            value: "0".to_string(),
            gas: None,
            kind: TransactionKind::Approval,
            description: "Approve USDC".to_string(),
            metadata: None,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "approval");
        assert!(json.get("gas").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn environment_parses_known_values_only() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Prod);
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Local);
        assert!("production".parse::<Environment>().is_err());
        assert!("".parse::<Environment>().is_err());
    }

    #[test]
    fn cross_chain_params_round_trip_camel_case() {
        let raw = r#"{
            "sourceChainId": 1,
            "destinationChainId": 8453,
            "senderAddress": "0x1111111111111111111111111111111111111111",
            "fleetAddress": "0x2222222222222222222222222222222222222222",
            "sourceTokenSymbol": "USDC",
            "assetTokenSymbol": "USDC",
            "amount": "100",
            "slippage": 50
        }"#;
        let params: CrossChainParams = serde_json::from_str(raw).unwrap();
        assert_eq!(params.destination_chain_id, 8453);
        assert_eq!(params.slippage, 50);
        let back = serde_json::to_value(&params).unwrap();
        assert_eq!(back["sourceTokenSymbol"], "USDC");
    }
}
