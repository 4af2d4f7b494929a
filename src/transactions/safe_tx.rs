use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{eip712_domain, sol, SolStruct};

sol! {
    struct SafeTx {
        address to;
        uint256 value;
        bytes data;
        uint8 operation;
        uint256 safeTxGas;
        uint256 baseGas;
        uint256 gasPrice;
        address gasToken;
        address refundReceiver;
        uint256 nonce;
    }
}

/// `Call` operation; the removal never delegate-calls
pub const OPERATION_CALL: u8 = 0;

/// Plain call SafeTx with no gas refund
pub fn call_safe_tx(to: Address, value: U256, data: Bytes, safe_tx_gas: u64, nonce: u64) -> SafeTx {
    SafeTx {
        to,
        value,
        data,
        operation: OPERATION_CALL,
        safeTxGas: U256::from(safe_tx_gas),
        baseGas: U256::ZERO,
        gasPrice: U256::ZERO,
        gasToken: Address::ZERO,
        refundReceiver: Address::ZERO,
        nonce: U256::from(nonce),
    }
}

/// EIP-712 hash owners sign to confirm `tx` on `safe`
pub fn safe_tx_hash(chain_id: u64, safe: Address, tx: &SafeTx) -> B256 {
    let domain = eip712_domain! {
        chain_id: chain_id,
        verifying_contract: safe,
    };
    tx.eip712_signing_hash(&domain)
}
