use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};

/// Identity of a spending limit: one beneficiary, one token
pub type LimitKey = (Address, Address);

/// Token side of a spending limit, amounts in the token's smallest unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpentInfo {
    /// Token contract, zero address for the native token
    pub token_address: Address,
    /// Allowed amount per period
    pub amount: U256,
    /// Amount already spent in the current period
    pub spent: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTime {
    /// Period length in minutes, 0 for a one-time allowance
    pub reset_time_min: u32,
    /// Minutes since epoch of the last reset
    pub last_reset_min: u32,
}

impl ResetTime {
    /// When the allowance refreshes next, if it refreshes at all
    pub fn next_reset(&self) -> Option<DateTime<Utc>> {
        if self.reset_time_min == 0 {
            return None;
        }
        let minutes = i64::from(self.last_reset_min) + i64::from(self.reset_time_min);
        DateTime::<Utc>::from_timestamp(minutes * 60, 0)
    }
}

/// A spending limit as read from the allowance module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingLimitRecord {
    pub beneficiary: Address,
    pub spent: SpentInfo,
    pub reset_time: ResetTime,
    /// Allowance nonce, bumped on every transfer by the beneficiary
    pub nonce: u16,
}

impl SpendingLimitRecord {
    pub fn key(&self) -> LimitKey {
        (self.beneficiary, self.spent.token_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_reset() {
        let one_time = ResetTime { reset_time_min: 0, last_reset_min: 28_000_000 };
        assert!(one_time.next_reset().is_none());

        let daily = ResetTime { reset_time_min: 1440, last_reset_min: 28_000_000 };
        let next = daily.next_reset().unwrap();
        assert_eq!(next.timestamp(), (28_000_000i64 + 1440) * 60);
    }
}
