use alloy_primitives::{Address, Bytes, U256};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("RPC error: {0}")]
    Node(String),
    #[error("Unexpected RPC response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

/// Call object for `eth_call` / `eth_estimateGas`
#[derive(Debug, Clone, Serialize)]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    pub data: Bytes,
}

impl CallRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            from: None,
            to,
            value: None,
            data: data.into(),
        }
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}

/// Thin JSON-RPC client for an EVM node
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: Client,
    rpc_url: String,
}

impl RpcClient {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            client: Client::new(),
            rpc_url: rpc_url.to_string(),
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .client
            .post(&self.rpc_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RpcError::Node(format!("HTTP {}", response.status())));
        }

        let json: Value = response.json().await?;
        extract_result(json)
    }

    /// Execute a read-only call against the latest block
    pub async fn eth_call(&self, call: &CallRequest) -> Result<Bytes, RpcError> {
        let result = self.request("eth_call", json!([call, "latest"])).await?;
        parse_bytes(&result)
    }

    pub async fn estimate_gas(&self, call: &CallRequest) -> Result<u64, RpcError> {
        let result = self.request("eth_estimateGas", json!([call])).await?;
        let quantity = parse_quantity(&result)?;
        u64::try_from(quantity).map_err(|_| RpcError::InvalidResponse(format!("gas out of range: {}", quantity)))
    }

    pub async fn gas_price(&self) -> Result<u128, RpcError> {
        let result = self.request("eth_gasPrice", json!([])).await?;
        let quantity = parse_quantity(&result)?;
        u128::try_from(quantity).map_err(|_| RpcError::InvalidResponse(format!("gas price out of range: {}", quantity)))
    }
}

fn extract_result(json: Value) -> Result<Value, RpcError> {
    if let Some(error) = json.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(RpcError::Node(message));
    }

    json.get("result")
        .cloned()
        .ok_or_else(|| RpcError::InvalidResponse(json.to_string()))
}

/// Parse a hex quantity such as `"0x5208"`
pub fn parse_quantity(value: &Value) -> Result<U256, RpcError> {
    let raw = value
        .as_str()
        .ok_or_else(|| RpcError::InvalidResponse(format!("expected hex string, got {}", value)))?;
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|e| RpcError::InvalidResponse(format!("{}: {}", raw, e)))
}

fn parse_bytes(value: &Value) -> Result<Bytes, RpcError> {
    let raw = value
        .as_str()
        .ok_or_else(|| RpcError::InvalidResponse(format!("expected hex data, got {}", value)))?;
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| RpcError::InvalidResponse(format!("{}: {}", raw, e)))
}
