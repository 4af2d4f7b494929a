use alloy_primitives::Address;
use std::str::FromStr;

/// Public mainnet endpoint used when `SAFE_RPC_URL` is not set
pub const DEFAULT_RPC_URL: &str = "https://ethereum-rpc.publicnode.com";

pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Allowance module deployment shared by all supported chains
pub const SPENDING_LIMIT_MODULE_ADDRESS: &str = "0xCFbFaC74C26F8647cBDb8c5caf80BB5b32E43134";

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON-RPC endpoint of the chain the Safe lives on
    pub rpc_url: String,
    /// Chain id used in the SafeTx EIP-712 domain
    pub chain_id: u64,
    /// The Safe whose spending limits are managed
    pub safe_address: Option<Address>,
    /// Address of the allowance (spending limit) module
    pub spending_limit_module: Address,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            safe_address: None,
            spending_limit_module: default_module_address(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to defaults
    /// for missing or malformed values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let rpc_url = lookup("SAFE_RPC_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.rpc_url);

        let chain_id = match lookup("SAFE_CHAIN_ID") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid SAFE_CHAIN_ID {:?}", raw);
                defaults.chain_id
            }),
            None => defaults.chain_id,
        };

        let safe_address = lookup("SAFE_ADDRESS").and_then(|raw| parse_address("SAFE_ADDRESS", &raw));

        let spending_limit_module = lookup("SPENDING_LIMIT_MODULE_ADDRESS")
            .and_then(|raw| parse_address("SPENDING_LIMIT_MODULE_ADDRESS", &raw))
            .unwrap_or(defaults.spending_limit_module);

        Self {
            rpc_url,
            chain_id,
            safe_address,
            spending_limit_module,
        }
    }
}

fn parse_address(key: &str, raw: &str) -> Option<Address> {
    match Address::from_str(raw.trim()) {
        Ok(address) => Some(address),
        Err(e) => {
            log::warn!("Ignoring invalid {} {:?}: {}", key, raw, e);
            None
        }
    }
}

fn default_module_address() -> Address {
    Address::from_str(SPENDING_LIMIT_MODULE_ADDRESS).unwrap_or_default()
}
