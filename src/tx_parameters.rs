//! User-editable execution parameters for a Safe transaction

use crate::estimation::FeeEstimate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TxParametersError {
    #[error("Invalid {field}: {value:?} is not a number")]
    InvalidNumber { field: &'static str, value: String },
}

/// Parameters as shown in the edit form. Empty strings mean "use default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxParameters {
    pub safe_nonce: String,
    pub safe_tx_gas: String,
    pub eth_nonce: String,
    pub eth_gas_limit: String,
    pub eth_gas_price: String,
    /// Set once the user saved edits; estimates no longer overwrite fields
    pub edited: bool,
}

/// Parsed parameters attached to a transaction request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionParameters {
    pub safe_nonce: Option<u64>,
    pub safe_tx_gas: Option<u64>,
    pub eth_nonce: Option<u64>,
    pub eth_gas_limit: Option<u64>,
    /// Gas price in gwei
    pub eth_gas_price: Option<String>,
}

impl TxParameters {
    pub fn from_estimate(estimate: &FeeEstimate) -> Self {
        let mut params = Self::default();
        params.seed(estimate);
        params
    }

    /// Refresh defaults from a new estimate unless the user edited them
    pub fn seed(&mut self, estimate: &FeeEstimate) {
        if self.edited || estimate.is_loading() {
            return;
        }
        self.safe_nonce = estimate.safe_nonce.map(|n| n.to_string()).unwrap_or_default();
        self.safe_tx_gas = estimate.safe_tx_gas.map(|g| g.to_string()).unwrap_or_default();
        self.eth_gas_limit = if estimate.gas_limit > 0 {
            estimate.gas_limit.to_string()
        } else {
            String::new()
        };
        self.eth_gas_price = estimate.gas_price_formatted.clone();
    }

    /// Replace the fields with user-entered values
    pub fn apply_edits(&mut self, edited: TxParameters) {
        *self = TxParameters {
            edited: true,
            ..edited
        };
    }

    pub fn parse(&self) -> Result<ExecutionParameters, TxParametersError> {
        let gas_price = self.eth_gas_price.trim();
        if !gas_price.is_empty() && gas_price.parse::<f64>().map(|p| p < 0.0).unwrap_or(true) {
            return Err(TxParametersError::InvalidNumber {
                field: "gas price",
                value: self.eth_gas_price.clone(),
            });
        }

        Ok(ExecutionParameters {
            safe_nonce: parse_optional("Safe nonce", &self.safe_nonce)?,
            safe_tx_gas: parse_optional("safeTxGas", &self.safe_tx_gas)?,
            eth_nonce: parse_optional("nonce", &self.eth_nonce)?,
            eth_gas_limit: parse_optional("gas limit", &self.eth_gas_limit)?,
            eth_gas_price: (!gas_price.is_empty()).then(|| gas_price.to_string()),
        })
    }
}

fn parse_optional(field: &'static str, raw: &str) -> Result<Option<u64>, TxParametersError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| TxParametersError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::EstimationStatus;

    fn estimate() -> FeeEstimate {
        FeeEstimate {
            status: EstimationStatus::Success,
            gas_limit: 100_000,
            safe_tx_gas: Some(40_000),
            gas_price: 20_000_000_000,
            gas_price_formatted: "20".to_string(),
            gas_cost_formatted: "0.002".to_string(),
            safe_nonce: Some(7),
            is_execution: true,
            is_creation: true,
            is_off_chain_signature: false,
        }
    }

    #[test]
    fn test_seeded_from_estimate() {
        let params = TxParameters::from_estimate(&estimate());
        let parsed = params.parse().unwrap();
        assert_eq!(parsed.safe_nonce, Some(7));
        assert_eq!(parsed.safe_tx_gas, Some(40_000));
        assert_eq!(parsed.eth_gas_limit, Some(100_000));
        assert_eq!(parsed.eth_gas_price.as_deref(), Some("20"));
        assert_eq!(parsed.eth_nonce, None);
    }

    #[test]
    fn test_loading_estimate_does_not_seed() {
        let params = TxParameters::from_estimate(&FeeEstimate::loading());
        assert_eq!(params, TxParameters::default());
    }

    #[test]
    fn test_failed_estimate_leaves_nonce_unset() {
        let parsed = TxParameters::from_estimate(&FeeEstimate::failed()).parse().unwrap();
        assert_eq!(parsed.safe_nonce, None);
        assert_eq!(parsed.safe_tx_gas, None);
    }

    #[test]
    fn test_edits_survive_new_estimates() {
        let mut params = TxParameters::from_estimate(&estimate());
        params.apply_edits(TxParameters {
            safe_nonce: "9".to_string(),
            safe_tx_gas: "55000".to_string(),
            ..params.clone()
        });

        let mut newer = estimate();
        newer.safe_nonce = Some(8);
        params.seed(&newer);

        let parsed = params.parse().unwrap();
        assert_eq!(parsed.safe_nonce, Some(9));
        assert_eq!(parsed.safe_tx_gas, Some(55_000));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let params = TxParameters {
            safe_nonce: "seven".to_string(),
            ..TxParameters::default()
        };
        assert_eq!(
            params.parse(),
            Err(TxParametersError::InvalidNumber {
                field: "Safe nonce",
                value: "seven".to_string()
            })
        );

        let params = TxParameters {
            eth_gas_price: "-1".to_string(),
            ..TxParameters::default()
        };
        assert!(params.parse().is_err());
    }
}
