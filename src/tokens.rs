// src/tokens.rs
use crate::rpc::{CallRequest, RpcClient};
use alloy_primitives::utils::format_units;
use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

sol! {
    interface IERC20Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn native() -> Self {
        Self {
            address: Address::ZERO,
            name: "Ether".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        }
    }
}

/// Source of token metadata
#[async_trait]
pub trait TokenInfoProvider: Send + Sync {
    /// Metadata for `address`, `None` when it cannot be resolved
    async fn token_info(&self, address: Address) -> Option<TokenInfo>;
}

/// ERC-20 metadata read over JSON-RPC, cached per address
pub struct RpcTokenInfo {
    rpc: RpcClient,
    cache: RwLock<HashMap<Address, TokenInfo>>,
}

impl RpcTokenInfo {
    pub fn new(rpc: RpcClient) -> Self {
        Self {
            rpc,
            cache: RwLock::new(HashMap::new()),
        }
    }

    async fn call<C: SolCall>(&self, token: Address, call: C) -> Option<C::Return> {
        let data = match self.rpc.eth_call(&CallRequest::new(token, call.abi_encode())).await {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Token call to {} failed: {}", token, e);
                return None;
            }
        };
        C::abi_decode_returns(&data, true).ok()
    }

    async fn fetch(&self, address: Address) -> Option<TokenInfo> {
        let decimals = self.call(address, IERC20Metadata::decimalsCall {}).await?._0;
        let symbol = self.call(address, IERC20Metadata::symbolCall {}).await?._0;
        // Some tokens omit name(); the symbol is good enough for display
        let name = self
            .call(address, IERC20Metadata::nameCall {})
            .await
            .map(|r| r._0)
            .unwrap_or_else(|| symbol.clone());

        Some(TokenInfo {
            address,
            name,
            symbol,
            decimals,
        })
    }
}

#[async_trait]
impl TokenInfoProvider for RpcTokenInfo {
    async fn token_info(&self, address: Address) -> Option<TokenInfo> {
        if address == Address::ZERO {
            return Some(TokenInfo::native());
        }

        if let Some(info) = self.cache.read().await.get(&address) {
            return Some(info.clone());
        }

        let info = self.fetch(address).await?;
        self.cache.write().await.insert(address, info.clone());
        Some(info)
    }
}

/// Human readable form of a raw token amount, e.g. `1500000` with 6 decimals -> `"1.5"`
pub fn from_token_unit(amount: U256, decimals: u8) -> String {
    let formatted = match format_units(amount, decimals) {
        Ok(s) => s,
        Err(_) => return amount.to_string(),
    };

    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_unit() {
        assert_eq!(from_token_unit(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(from_token_unit(U256::from(10u64).pow(U256::from(18u64)), 18), "1");
        assert_eq!(from_token_unit(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(from_token_unit(U256::ZERO, 6), "0");
        assert_eq!(from_token_unit(U256::from(42u64), 0), "42");
    }

    #[tokio::test]
    async fn test_native_token_needs_no_rpc() {
        let provider = RpcTokenInfo::new(RpcClient::new("http://127.0.0.1:1"));
        let info = provider.token_info(Address::ZERO).await.unwrap();
        assert_eq!(info.symbol, "ETH");
        assert_eq!(info.decimals, 18);
    }
}
