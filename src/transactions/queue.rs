use crate::transactions::safe_tx::{call_safe_tx, safe_tx_hash};
use crate::transactions::{CreateTransactionRequest, DispatchError, TransactionDispatcher};
use alloy_primitives::{Address, B256};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;

/// A request accepted by the queue, ready for signing
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedTransaction {
    pub safe_tx_hash: B256,
    pub nonce: u64,
    pub request: CreateTransactionRequest,
    pub queued_at: DateTime<Utc>,
}

/// Dispatcher that hashes requests and hands them to the store task
pub struct TransactionQueue {
    chain_id: u64,
    sender: UnboundedSender<QueuedTransaction>,
}

impl TransactionQueue {
    pub fn new(chain_id: u64, sender: UnboundedSender<QueuedTransaction>) -> Self {
        Self { chain_id, sender }
    }
}

impl TransactionDispatcher for TransactionQueue {
    fn dispatch(&self, request: CreateTransactionRequest) -> Result<B256, DispatchError> {
        if request.to == Address::ZERO {
            return Err(DispatchError::InvalidRecipient);
        }
        let nonce = request.tx_nonce.ok_or(DispatchError::MissingNonce)?;

        let tx = call_safe_tx(
            request.to,
            request.value_in_wei,
            request.tx_data.clone(),
            request.safe_tx_gas.unwrap_or(0),
            nonce,
        );
        let hash = safe_tx_hash(self.chain_id, request.safe_address, &tx);

        self.sender
            .send(QueuedTransaction {
                safe_tx_hash: hash,
                nonce,
                request,
                queued_at: Utc::now(),
            })
            .map_err(|_| DispatchError::PipelineClosed)?;

        log::info!("Queued Safe transaction {} with nonce {}", hash, nonce);
        Ok(hash)
    }
}
