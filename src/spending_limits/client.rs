use crate::rpc::{CallRequest, RpcClient, RpcError};
use crate::spending_limits::encode::IAllowanceModule;
use crate::spending_limits::types::{ResetTime, SpendingLimitRecord, SpentInfo};
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use thiserror::Error;

const DELEGATES_PAGE_SIZE: u8 = 100;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("Failed to decode module response: {0}")]
    Decode(#[from] alloy_sol_types::Error),
}

/// Reads spending limits from the allowance module
#[derive(Debug, Clone)]
pub struct SpendingLimitClient {
    rpc: RpcClient,
    module: Address,
}

impl SpendingLimitClient {
    pub fn new(rpc: RpcClient, module: Address) -> Self {
        Self { rpc, module }
    }

    async fn call<C: SolCall>(&self, call: C) -> Result<C::Return, ModuleError> {
        let data = self
            .rpc
            .eth_call(&CallRequest::new(self.module, call.abi_encode()))
            .await?;
        Ok(C::abi_decode_returns(&data, true)?)
    }

    /// All delegates that have at least one allowance on `safe`
    pub async fn get_delegates(&self, safe: Address) -> Result<Vec<Address>, ModuleError> {
        let first = Default::default();
        let mut start = first;
        let mut delegates = Vec::new();

        loop {
            let page = self
                .call(IAllowanceModule::getDelegatesCall {
                    safe,
                    start,
                    pageSize: DELEGATES_PAGE_SIZE,
                })
                .await?;
            delegates.extend(page.results);

            if page.next == first || page.next == start {
                break;
            }
            start = page.next;
        }

        Ok(delegates)
    }

    pub async fn get_tokens(&self, safe: Address, delegate: Address) -> Result<Vec<Address>, ModuleError> {
        Ok(self
            .call(IAllowanceModule::getTokensCall { safe, delegate })
            .await?
            ._0)
    }

    pub async fn get_allowance(
        &self,
        safe: Address,
        delegate: Address,
        token: Address,
    ) -> Result<SpendingLimitRecord, ModuleError> {
        let allowance = self
            .call(IAllowanceModule::getTokenAllowanceCall { safe, delegate, token })
            .await?
            ._0;
        Ok(record_from_allowance(delegate, token, allowance))
    }

    /// Every (beneficiary, token) allowance configured on `safe`
    pub async fn load_spending_limits(&self, safe: Address) -> Result<Vec<SpendingLimitRecord>, ModuleError> {
        let mut limits = Vec::new();
        for delegate in self.get_delegates(safe).await? {
            for token in self.get_tokens(safe, delegate).await? {
                limits.push(self.get_allowance(safe, delegate, token).await?);
            }
        }
        log::info!("Loaded {} spending limits for {}", limits.len(), safe);
        Ok(limits)
    }
}

/// `getTokenAllowance` returns `[amount, spent, resetTimeMin, lastResetMin, nonce]`
fn record_from_allowance(beneficiary: Address, token: Address, allowance: [U256; 5]) -> SpendingLimitRecord {
    let [amount, spent, reset_time_min, last_reset_min, nonce] = allowance;
    SpendingLimitRecord {
        beneficiary,
        spent: SpentInfo {
            token_address: token,
            amount,
            spent,
        },
        reset_time: ResetTime {
            reset_time_min: reset_time_min.saturating_to(),
            last_reset_min: last_reset_min.saturating_to(),
        },
        nonce: nonce.saturating_to(),
    }
}
