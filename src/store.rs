// src/store.rs
use crate::spending_limits::LimitKey;
use crate::spending_limits::encode::IAllowanceModule;
use crate::transactions::{QueuedTransaction, TxNotificationType};
use alloy_sol_types::SolCall;
use chrono::{DateTime, Utc};
use dioxus::prelude::*;

/// Global transaction state using Dioxus GlobalSignal
pub static TX_STORE: GlobalSignal<TxStore> = Signal::global(TxStore::default);

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: TxNotificationType,
    pub message: &'static str,
    pub created_at: DateTime<Utc>,
}

/// Transactions created in this session and the notifications they raised
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxStore {
    pub queued: Vec<QueuedTransaction>,
    pub notifications: Vec<Notification>,
}

impl TxStore {
    pub fn record(&mut self, tx: QueuedTransaction) {
        let kind = tx.request.notified_transaction;
        let messages = kind.messages();
        let message = if tx.request.is_execution {
            messages.before_execution
        } else {
            messages.awaiting_confirmations
        };

        self.notifications.push(Notification {
            kind,
            message,
            created_at: tx.queued_at,
        });
        self.queued.push(tx);
    }

    /// Whether a removal of the limit `key` has been queued
    pub fn has_removal_for(&self, key: LimitKey) -> bool {
        self.queued.iter().any(|tx| {
            tx.request.notified_transaction == TxNotificationType::RemoveSpendingLimit
                && IAllowanceModule::deleteAllowanceCall::abi_decode(&tx.request.tx_data, true)
                    .map(|call| (call.delegate, call.token) == key)
                    .unwrap_or(false)
        })
    }
}
