/// Wire types for the vendor SDK backend
use serde::{Deserialize, Serialize};

use crate::chains::ChainId;
use crate::types::{
    MerklEmission, Position, PositionReward, RewardApy, Transaction, TransactionKind, VaultInfo,
};

// =============================================================================
// TOKENS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkTokenAmount {
    /// Raw amount in base units
    pub amount: String,
    pub token: SdkToken,
}

impl SdkTokenAmount {
    /// Render as "1.5 USDC" style display units; falls back to the raw
    /// amount when it does not parse
    pub fn to_display_string(&self) -> String {
        match normalize_base_units(&self.amount, self.token.decimals) {
            Some(normalized) => format!("{} {}", normalized, self.token.symbol),
            None => format!("{} {}", self.amount, self.token.symbol),
        }
    }
}

/// Exact base-unit to decimal-unit conversion, trailing zeros trimmed
fn normalize_base_units(amount: &str, decimals: u8) -> Option<String> {
    let raw: u128 = amount.parse().ok()?;
    if decimals == 0 {
        return Some(raw.to_string());
    }
    let divisor = 10u128.checked_pow(decimals as u32)?;
    let int = raw / divisor;
    let frac = raw % divisor;
    if frac == 0 {
        Some(int.to_string())
    } else {
        let frac_str = format!("{:0width$}", frac, width = decimals as usize);
        Some(format!("{}.{}", int, frac_str.trim_end_matches('0')))
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkTransactionData {
    pub target: String,
    pub calldata: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkTransactionInfo {
    pub transaction: SdkTransactionData,
    pub description: String,
    /// "Approve" for allowance transactions, anything else is an operation
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Map a vendor transaction into the playground wire format
pub fn map_sdk_transaction(tx: SdkTransactionInfo) -> Transaction {
    let kind = match tx.kind.as_deref() {
        Some("Approve") => TransactionKind::Approval,
        _ => TransactionKind::Operation,
    };
    Transaction {
        to: tx.transaction.target,
        data: tx.transaction.calldata,
        value: tx.transaction.value,
        gas: None,
        kind,
        description: tx.description,
        metadata: tx.metadata,
    }
}

// =============================================================================
// VAULTS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkVault {
    pub fleet_address: String,
    pub name: String,
    pub token_symbol: String,
    pub asset_token_symbol: String,
    pub apy: Option<String>,
    #[serde(default)]
    pub rewards_apys: Vec<RewardApy>,
    #[serde(default)]
    pub merkl_rewards: Option<Vec<MerklEmission>>,
    pub total_deposits: String,
    pub deposit_cap: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkVaultList {
    pub list: Vec<SdkVault>,
}

pub fn map_sdk_vault(vault: SdkVault) -> VaultInfo {
    VaultInfo {
        id: vault.fleet_address,
        name: vault.name,
        token: vault.token_symbol,
        asset_token: vault.asset_token_symbol,
        apy: vault.apy.unwrap_or_else(|| "N/A".to_string()),
        rewards_apys: vault.rewards_apys,
        merkl_rewards: vault.merkl_rewards,
        tvl: vault.total_deposits,
        deposit_cap: vault.deposit_cap,
    }
}

// =============================================================================
// POSITIONS & ACTIVITY
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkPosition {
    pub id: String,
    pub fleet_address: String,
    pub vault_name: String,
    pub amount: String,
    pub shares: String,
    pub deposits_amount: String,
    pub withdrawals_amount: String,
    #[serde(default)]
    pub deposits: Vec<String>,
    #[serde(default)]
    pub withdrawals: Vec<String>,
    pub deposits_amount_usd: String,
    pub withdrawals_amount_usd: String,
    pub claimable_summer_token: String,
    pub claimed_summer_token: String,
    #[serde(default)]
    pub rewards: Vec<PositionReward>,
}

pub fn map_sdk_position(p: SdkPosition) -> Position {
    Position {
        id: p.id,
        vault_id: p.fleet_address,
        vault_name: p.vault_name,
        amount: p.amount,
        shares: p.shares,
        deposits_amount: p.deposits_amount,
        withdrawals_amount: p.withdrawals_amount,
        deposits: p.deposits,
        withdrawals: p.withdrawals,
        deposits_amount_usd: p.deposits_amount_usd,
        withdrawals_amount_usd: p.withdrawals_amount_usd,
        claimable_summer_token: p.claimable_summer_token,
        claimed_summer_token: p.claimed_summer_token,
        rewards: p.rewards,
    }
}

/// One deposit or withdrawal entry from the activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkActivity {
    pub from: String,
    pub to: String,
    pub amount: SdkTokenAmount,
    pub amount_usd: String,
    pub timestamp: i64,
    pub tx_hash: String,
    pub vault_balance: SdkTokenAmount,
    pub vault_balance_usd: String,
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultTxRequest {
    pub chain_id: ChainId,
    pub sender_address: String,
    pub fleet_address: String,
    pub asset_token_symbol: String,
    /// Amount in full units, e.g. "1" for 1 USDC
    pub amount: String,
    /// Slippage as a percentage value, e.g. 0.5 for 0.5%
    pub slippage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str, decimals: u8) -> SdkToken {
        SdkToken {
            address: "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913".to_string(),
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            decimals,
        }
    }

    #[test]
    fn approve_transactions_map_to_approval_kind() {
        let tx = SdkTransactionInfo {
            transaction: SdkTransactionData {
                target: "0x1111111111111111111111111111111111111111".to_string(),
                calldata: "0xabcdef".to_string(),
                value: "0".to_string(),
            },
            description: "Approve 1 USDC".to_string(),
            kind: Some("Approve".to_string()),
            metadata: None,
        };
        assert_eq!(map_sdk_transaction(tx).kind, TransactionKind::Approval);

        let tx = SdkTransactionInfo {
            transaction: SdkTransactionData {
                target: "0x1111111111111111111111111111111111111111".to_string(),
                calldata: "0xabcdef".to_string(),
                value: "0".to_string(),
            },
            description: "Deposit 1 USDC".to_string(),
            kind: None,
            metadata: None,
        };
        assert_eq!(map_sdk_transaction(tx).kind, TransactionKind::Operation);
    }

    #[test]
    fn token_amounts_render_in_display_units() {
        let amount = SdkTokenAmount {
            amount: "1500000".to_string(),
            token: token("USDC", 6),
        };
        assert_eq!(amount.to_display_string(), "1.5 USDC");

        let amount = SdkTokenAmount {
            amount: "2000000000000000000".to_string(),
            token: token("ETH", 18),
        };
        assert_eq!(amount.to_display_string(), "2 ETH");

        // unparseable amounts fall back to the raw value
        let amount = SdkTokenAmount {
            amount: "not-a-number".to_string(),
            token: token("USDC", 6),
        };
        assert_eq!(amount.to_display_string(), "not-a-number USDC");
    }

    #[test]
    fn vault_without_apy_maps_to_na() {
        let vault = SdkVault {
            fleet_address: "0x2222222222222222222222222222222222222222".to_string(),
            name: "Summer USDC Fleet".to_string(),
            token_symbol: "fUSDC".to_string(),
            asset_token_symbol: "USDC".to_string(),
            apy: None,
            rewards_apys: vec![],
            merkl_rewards: None,
            total_deposits: "123456".to_string(),
            deposit_cap: "1000000".to_string(),
        };
        let info = map_sdk_vault(vault);
        assert_eq!(info.apy, "N/A");
        assert_eq!(info.id, "0x2222222222222222222222222222222222222222");
    }
}
