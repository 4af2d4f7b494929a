//! Fee estimation for Safe transactions

use crate::rpc::{CallRequest, RpcClient, RpcError};
use crate::tokens::from_token_unit;
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use thiserror::Error;

sol! {
    interface ISafe {
        function getThreshold() external view returns (uint256);
        function nonce() external view returns (uint256);
    }
}

/// Gas spent by `execTransaction` around the inner call: signature checks,
/// nonce bump and event emission.
pub const EXEC_TRANSACTION_OVERHEAD: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationStatus {
    Loading,
    Success,
    Failure,
}

#[derive(Debug, Error)]
pub enum EstimationError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("Failed to decode Safe response: {0}")]
    Decode(#[from] alloy_sol_types::Error),
}

/// What to estimate: a call from `safe` to `to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationRequest {
    pub safe: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeEstimate {
    pub status: EstimationStatus,
    /// Gas limit of the outer `execTransaction`, 0 when not executing
    pub gas_limit: u64,
    /// Gas required by the inner call, unknown until estimated
    pub safe_tx_gas: Option<u64>,
    pub gas_price: u128,
    pub gas_price_formatted: String,
    pub gas_cost_formatted: String,
    /// Safe nonce the new transaction would take, unknown until read
    pub safe_nonce: Option<u64>,
    /// Threshold is 1, so the creator executes immediately
    pub is_execution: bool,
    pub is_creation: bool,
    /// Creator only signs off-chain; other owners confirm later
    pub is_off_chain_signature: bool,
}

impl FeeEstimate {
    pub fn loading() -> Self {
        Self {
            status: EstimationStatus::Loading,
            gas_limit: 0,
            safe_tx_gas: None,
            gas_price: 0,
            gas_price_formatted: "0".to_string(),
            gas_cost_formatted: "< 0.001".to_string(),
            safe_nonce: None,
            is_execution: false,
            is_creation: true,
            is_off_chain_signature: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: EstimationStatus::Failure,
            ..Self::loading()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == EstimationStatus::Loading
    }
}

/// Estimates the cost of submitting a Safe transaction
#[async_trait]
pub trait FeeEstimator: Send + Sync {
    async fn estimate(&self, request: &EstimationRequest) -> Result<FeeEstimate, EstimationError>;
}

/// Estimator backed by the node's `eth_estimateGas` / `eth_gasPrice`
pub struct RpcFeeEstimator {
    rpc: RpcClient,
}

impl RpcFeeEstimator {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    async fn read_safe<C: SolCall>(&self, safe: Address, call: C) -> Result<C::Return, EstimationError> {
        let data = self.rpc.eth_call(&CallRequest::new(safe, call.abi_encode())).await?;
        Ok(C::abi_decode_returns(&data, true)?)
    }
}

#[async_trait]
impl FeeEstimator for RpcFeeEstimator {
    async fn estimate(&self, request: &EstimationRequest) -> Result<FeeEstimate, EstimationError> {
        let threshold: U256 = self.read_safe(request.safe, ISafe::getThresholdCall {}).await?._0;
        let safe_nonce: U256 = self.read_safe(request.safe, ISafe::nonceCall {}).await?._0;

        let inner = CallRequest::new(request.to, request.data.clone())
            .with_from(request.safe)
            .with_value(request.value);
        let safe_tx_gas = self.rpc.estimate_gas(&inner).await?;
        let gas_price = self.rpc.gas_price().await?;

        let is_execution = threshold <= U256::from(1u64);
        let estimate = build_estimate(safe_tx_gas, gas_price, safe_nonce.saturating_to(), is_execution);

        log::info!(
            "Estimated Safe tx to {}: safeTxGas={} gasLimit={} cost={} ETH",
            request.to,
            safe_tx_gas,
            estimate.gas_limit,
            estimate.gas_cost_formatted
        );
        Ok(estimate)
    }
}

fn build_estimate(safe_tx_gas: u64, gas_price: u128, safe_nonce: u64, is_execution: bool) -> FeeEstimate {
    let gas_limit = if is_execution {
        safe_tx_gas.saturating_add(EXEC_TRANSACTION_OVERHEAD)
    } else {
        0
    };
    let cost = U256::from(gas_limit) * U256::from(gas_price);

    FeeEstimate {
        status: EstimationStatus::Success,
        gas_limit,
        safe_tx_gas: Some(safe_tx_gas),
        gas_price,
        gas_price_formatted: from_token_unit(U256::from(gas_price), 9),
        gas_cost_formatted: from_token_unit(cost, 18),
        safe_nonce: Some(safe_nonce),
        is_execution,
        is_creation: true,
        is_off_chain_signature: !is_execution,
    }
}
