//! Transaction creation pipeline

pub mod notifications;
pub mod queue;
pub mod safe_tx;

pub use notifications::TxNotificationType;
pub use queue::{QueuedTransaction, TransactionQueue};

use crate::tx_parameters::ExecutionParameters;
use alloy_primitives::{Address, Bytes, B256, U256};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Transaction recipient is the zero address")]
    InvalidRecipient,
    #[error("No Safe nonce available for the transaction")]
    MissingNonce,
    #[error("Transaction pipeline is not running")]
    PipelineClosed,
}

/// Request to create a Safe transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransactionRequest {
    pub safe_address: Address,
    pub to: Address,
    pub value_in_wei: U256,
    pub tx_data: Bytes,
    pub tx_nonce: Option<u64>,
    pub safe_tx_gas: Option<u64>,
    pub eth_parameters: ExecutionParameters,
    pub notified_transaction: TxNotificationType,
    /// The creator's signature alone executes the transaction
    pub is_execution: bool,
}

/// Accepts transaction requests on behalf of the global store
pub trait TransactionDispatcher: Send + Sync {
    /// Queue `request`, returning its SafeTx hash
    fn dispatch(&self, request: CreateTransactionRequest) -> Result<B256, DispatchError>;
}
