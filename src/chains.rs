/// Supported chains and chain-related constants
use serde::Serialize;

pub type ChainId = u64;

pub const MAINNET: ChainId = 1;
pub const BASE: ChainId = 8453;
pub const ARBITRUM_ONE: ChainId = 42161;
pub const SONIC: ChainId = 146;

/// Sentinel address the bundler uses for a chain's native asset
pub const NATIVE_CURRENCY_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Case-insensitive check against the native-asset sentinel
pub fn is_native_asset(address: &str) -> bool {
    address.eq_ignore_ascii_case(NATIVE_CURRENCY_ADDRESS)
}

pub fn chain_name(chain_id: ChainId) -> &'static str {
    match chain_id {
        MAINNET => "Mainnet",
        BASE => "Base",
        ARBITRUM_ONE => "Arbitrum One",
        SONIC => "Sonic",
        _ => "Unknown Chain",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainSummary {
    pub id: ChainId,
    pub name: &'static str,
}

pub fn available_chains() -> Vec<ChainSummary> {
    [MAINNET, BASE, ARBITRUM_ONE, SONIC]
        .iter()
        .map(|&id| ChainSummary {
            id,
            name: chain_name(id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chains_resolve_names() {
        assert_eq!(chain_name(MAINNET), "Mainnet");
        assert_eq!(chain_name(BASE), "Base");
        assert_eq!(chain_name(ARBITRUM_ONE), "Arbitrum One");
        assert_eq!(chain_name(SONIC), "Sonic");
        assert_eq!(chain_name(555), "Unknown Chain");
    }

    #[test]
    fn native_asset_check_ignores_case() {
        assert!(is_native_asset("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE"));
        assert!(is_native_asset(NATIVE_CURRENCY_ADDRESS));
        assert!(!is_native_asset("0xdc181Bd607330aeeBEF6ea62e03e5e1Fb4B6F7C7"));
    }
}
