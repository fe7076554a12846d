/// Reward constituents arithmetic
///
/// The aggregated rewards payload reports a `total` alongside three
/// sub-components (vault usage, merkle distribution, vote delegation). The
/// backend occasionally reports a total that differs from the component sum
/// by a few wei of rounding; the check reports the signed difference instead
/// of treating a mismatch as an error.
use crate::errors::ArmadaError;
use crate::types::AggregatedRewards;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstituentsCheck {
    /// vault_usage + merkle_distribution + vote_delegation, in wei
    pub sum: u128,
    /// total - sum; zero when the backend total matches exactly
    pub difference: i128,
}

fn parse_wei(field: &str, value: &str) -> Result<u128, ArmadaError> {
    value
        .parse::<u128>()
        .map_err(|_| ArmadaError::invalid_field(field, "expected a non-negative integer wei value"))
}

/// Sum the three reward constituents as exact integer wei
pub fn sum_of_constituents(rewards: &AggregatedRewards) -> Result<u128, ArmadaError> {
    let vault_usage = parse_wei("vaultUsage", &rewards.vault_usage)?;
    let merkle = parse_wei("merkleDistribution", &rewards.merkle_distribution)?;
    let delegation = parse_wei("voteDelegation", &rewards.vote_delegation)?;
    vault_usage
        .checked_add(merkle)
        .and_then(|s| s.checked_add(delegation))
        .ok_or_else(|| ArmadaError::invalid_field("rewards", "constituent sum overflows"))
}

/// Compare the reported total against the constituent sum
pub fn check_constituents(rewards: &AggregatedRewards) -> Result<ConstituentsCheck, ArmadaError> {
    let sum = sum_of_constituents(rewards)?;
    let total = parse_wei("total", &rewards.total)?;
    let difference = (total as i128) - (sum as i128);
    Ok(ConstituentsCheck { sum, difference })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn rewards(total: &str, usage: &str, merkle: &str, delegation: &str) -> AggregatedRewards {
        AggregatedRewards {
            total: total.to_string(),
            vault_usage_per_chain: BTreeMap::new(),
            vault_usage: usage.to_string(),
            merkle_distribution: merkle.to_string(),
            vote_delegation: delegation.to_string(),
        }
    }

    #[test]
    fn matching_total_has_zero_difference() {
        let r = rewards("6000000000000000000", "1000000000000000000", "2000000000000000000", "3000000000000000000");
        let check = check_constituents(&r).unwrap();
        assert_eq!(check.sum, 6_000_000_000_000_000_000);
        assert_eq!(check.difference, 0);
    }

    #[test]
    fn rounding_gap_is_reported_signed() {
        // backend total is 7 wei short of the component sum
        let r = rewards("5999999999999999993", "1000000000000000000", "2000000000000000000", "3000000000000000000");
        assert_eq!(check_constituents(&r).unwrap().difference, -7);

        let r = rewards("6000000000000000010", "1000000000000000000", "2000000000000000000", "3000000000000000000");
        assert_eq!(check_constituents(&r).unwrap().difference, 10);
    }

    #[test]
    fn garbage_values_are_rejected() {
        let r = rewards("abc", "1", "2", "3");
        assert!(check_constituents(&r).is_err());
        let r = rewards("6", "-1", "2", "3");
        assert!(check_constituents(&r).is_err());
    }
}
