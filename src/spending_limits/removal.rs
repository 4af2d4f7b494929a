//! Everything the remove-limit dialog decides, kept free of UI code

use crate::estimation::{EstimationRequest, FeeEstimate};
use crate::spending_limits::encode::encode_delete_allowance;
use crate::spending_limits::reset_time::reset_time_label;
use crate::spending_limits::types::{LimitKey, SpendingLimitRecord};
use crate::tokens::{from_token_unit, TokenInfo};
use crate::transactions::{CreateTransactionRequest, DispatchError, TransactionDispatcher, TxNotificationType};
use crate::tx_parameters::{TxParameters, TxParametersError};
use alloy_primitives::{Address, Bytes, B256, U256};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RemoveLimitError {
    #[error(transparent)]
    Parameters(#[from] TxParametersError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Revocation of one spending limit. The same payload feeds both the fee
/// estimate and the dispatched transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPlan {
    pub limit: LimitKey,
    pub module: Address,
    pub payload: Bytes,
}

impl RemovalPlan {
    pub fn new(limit: LimitKey, module: Address) -> Self {
        let (beneficiary, token) = limit;
        Self {
            limit,
            module,
            payload: encode_delete_allowance(beneficiary, token),
        }
    }

    pub fn estimation_request(&self, safe: Address) -> EstimationRequest {
        EstimationRequest {
            safe,
            to: self.module,
            value: U256::ZERO,
            data: self.payload.clone(),
        }
    }

    /// Merge user-edited parameters over the estimate defaults
    pub fn create_request(
        &self,
        safe: Address,
        estimate: &FeeEstimate,
        params: &TxParameters,
    ) -> Result<CreateTransactionRequest, TxParametersError> {
        let parsed = params.parse()?;
        Ok(CreateTransactionRequest {
            safe_address: safe,
            to: self.module,
            value_in_wei: U256::ZERO,
            tx_data: self.payload.clone(),
            tx_nonce: parsed.safe_nonce.or(estimate.safe_nonce),
            safe_tx_gas: parsed.safe_tx_gas.or(estimate.safe_tx_gas),
            eth_parameters: parsed,
            notified_transaction: TxNotificationType::RemoveSpendingLimit,
            is_execution: estimate.is_execution,
        })
    }
}

/// An estimate may only be applied if it was computed for the current payload
pub fn accept_estimate(current: &RemovalPlan, request: &EstimationRequest) -> bool {
    current.module == request.to && current.payload == request.data
}

/// A token lookup may only be applied if the limit still refers to `token`
pub fn accept_token_info(current: &RemovalPlan, token: Address) -> bool {
    current.limit.1 == token
}

/// Remove stays disabled while estimating and after a removal was queued
pub fn can_remove(estimate: &FeeEstimate, submitted: bool) -> bool {
    !estimate.is_loading() && !submitted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Cancel,
    Remove,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ModalOutcome {
    Close,
    Dispatched(B256),
    Failed(RemoveLimitError),
    /// Remove pressed while it was disabled
    Ignored,
}

/// Dialog state an action is evaluated against
pub struct RemovalContext<'a> {
    pub plan: &'a RemovalPlan,
    pub safe: Address,
    pub estimate: &'a FeeEstimate,
    pub params: &'a TxParameters,
    pub submitted: bool,
}

pub fn handle_action(
    action: ModalAction,
    ctx: &RemovalContext<'_>,
    dispatcher: &dyn TransactionDispatcher,
) -> ModalOutcome {
    match action {
        ModalAction::Cancel => ModalOutcome::Close,
        ModalAction::Remove => {
            if !can_remove(ctx.estimate, ctx.submitted) {
                return ModalOutcome::Ignored;
            }
            match submit_removal(ctx, dispatcher) {
                Ok(hash) => ModalOutcome::Dispatched(hash),
                Err(e) => {
                    let (beneficiary, token) = ctx.plan.limit;
                    log::error!("failed to remove spending limit {} -> {}: {}", beneficiary, token, e);
                    ModalOutcome::Failed(e)
                }
            }
        }
    }
}

fn submit_removal(ctx: &RemovalContext<'_>, dispatcher: &dyn TransactionDispatcher) -> Result<B256, RemoveLimitError> {
    let request = ctx.plan.create_request(ctx.safe, ctx.estimate, ctx.params)?;
    Ok(dispatcher.dispatch(request)?)
}

/// Display data for a spending limit
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingLimitSummary {
    pub beneficiary: Address,
    /// Allowed amount with symbol, only when token metadata is known
    pub amount: Option<String>,
    pub spent: Option<String>,
    pub reset_label: &'static str,
    pub next_reset: Option<DateTime<Utc>>,
}

impl SpendingLimitSummary {
    pub fn new(record: &SpendingLimitRecord, token: Option<&TokenInfo>) -> Self {
        let format = |raw: U256| token.map(|t| format!("{} {}", from_token_unit(raw, t.decimals), t.symbol));
        Self {
            beneficiary: record.beneficiary,
            amount: format(record.spent.amount),
            spent: format(record.spent.spent),
            reset_label: reset_time_label(record.reset_time.reset_time_min),
            next_reset: record.reset_time.next_reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::EstimationStatus;
    use crate::spending_limits::types::{ResetTime, SpentInfo};
    use crate::transactions::TransactionQueue;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDispatcher {
        requests: Mutex<Vec<CreateTransactionRequest>>,
    }

    impl TransactionDispatcher for RecordingDispatcher {
        fn dispatch(&self, request: CreateTransactionRequest) -> Result<B256, DispatchError> {
            self.requests.lock().unwrap().push(request);
            Ok(B256::repeat_byte(0x42))
        }
    }

    struct ClosedDispatcher;

    impl TransactionDispatcher for ClosedDispatcher {
        fn dispatch(&self, _request: CreateTransactionRequest) -> Result<B256, DispatchError> {
            Err(DispatchError::PipelineClosed)
        }
    }

    const SAFE: Address = Address::new([0x5a; 20]);
    const MODULE: Address = Address::new([0xcf; 20]);

    fn record() -> SpendingLimitRecord {
        SpendingLimitRecord {
            beneficiary: Address::repeat_byte(0x0b),
            spent: SpentInfo {
                token_address: Address::repeat_byte(0x0c),
                amount: U256::from(2_500_000u64),
                spent: U256::from(500_000u64),
            },
            reset_time: ResetTime {
                reset_time_min: 1440,
                last_reset_min: 28_000_000,
            },
            nonce: 1,
        }
    }

    fn ready_estimate() -> FeeEstimate {
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
    fn test_estimate_and_dispatch_share_payload() {
        let plan = RemovalPlan::new(record().key(), MODULE);
        let request = plan.estimation_request(SAFE);
        assert_eq!(request.to, MODULE);
        assert_eq!(request.value, U256::ZERO);
        assert_eq!(request.data, encode_delete_allowance(record().beneficiary, record().spent.token_address));

        let estimate = ready_estimate();
        let create = plan
            .create_request(SAFE, &estimate, &TxParameters::from_estimate(&estimate))
            .unwrap();
        assert_eq!(create.tx_data, request.data);
    }

    #[test]
    fn test_remove_disabled_while_loading() {
        assert!(!can_remove(&FeeEstimate::loading(), false));
        assert!(can_remove(&ready_estimate(), false));
        assert!(can_remove(&FeeEstimate::failed(), false));
        assert!(!can_remove(&ready_estimate(), true));
    }

    #[test]
    fn test_cancel_closes_without_dispatch() {
        let dispatcher = RecordingDispatcher::default();
        let plan = RemovalPlan::new(record().key(), MODULE);
        let estimate = ready_estimate();
        let params = TxParameters::from_estimate(&estimate);
        let ctx = RemovalContext { plan: &plan, safe: SAFE, estimate: &estimate, params: &params, submitted: false };

        assert_eq!(handle_action(ModalAction::Cancel, &ctx, &dispatcher), ModalOutcome::Close);
        assert!(dispatcher.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_remove_dispatches_once_with_edits() {
        let dispatcher = RecordingDispatcher::default();
        let plan = RemovalPlan::new(record().key(), MODULE);
        let estimate = ready_estimate();
        let mut params = TxParameters::from_estimate(&estimate);
        params.apply_edits(TxParameters {
            safe_nonce: "9".to_string(),
            safe_tx_gas: "55000".to_string(),
            eth_gas_limit: "150000".to_string(),
            ..params.clone()
        });
        let ctx = RemovalContext { plan: &plan, safe: SAFE, estimate: &estimate, params: &params, submitted: false };

        let outcome = handle_action(ModalAction::Remove, &ctx, &dispatcher);
        assert_eq!(outcome, ModalOutcome::Dispatched(B256::repeat_byte(0x42)));

        let requests = dispatcher.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.to, MODULE);
        assert_eq!(request.value_in_wei, U256::ZERO);
        assert_eq!(request.tx_data, plan.payload);
        assert_eq!(request.tx_nonce, Some(9));
        assert_eq!(request.safe_tx_gas, Some(55_000));
        assert_eq!(request.eth_parameters.eth_gas_limit, Some(150_000));
        assert_eq!(request.notified_transaction, TxNotificationType::RemoveSpendingLimit);
    }

    #[test]
    fn test_remove_ignored_while_loading() {
        let dispatcher = RecordingDispatcher::default();
        let plan = RemovalPlan::new(record().key(), MODULE);
        let estimate = FeeEstimate::loading();
        let params = TxParameters::default();
        let ctx = RemovalContext { plan: &plan, safe: SAFE, estimate: &estimate, params: &params, submitted: false };

        assert_eq!(handle_action(ModalAction::Remove, &ctx, &dispatcher), ModalOutcome::Ignored);
        assert!(dispatcher.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stale_estimate_is_rejected() {
        let plan = RemovalPlan::new(record().key(), MODULE);
        assert!(accept_estimate(&plan, &plan.estimation_request(SAFE)));

        let (beneficiary, token) = record().key();
        let other_token = RemovalPlan::new((beneficiary, Address::repeat_byte(0x0d)), MODULE);
        assert!(!accept_estimate(&other_token, &plan.estimation_request(SAFE)));

        let other_beneficiary = RemovalPlan::new((Address::repeat_byte(0x0e), token), MODULE);
        assert!(!accept_estimate(&other_beneficiary, &plan.estimation_request(SAFE)));
    }

    #[test]
    fn test_stale_token_info_is_rejected() {
        let (beneficiary, token) = record().key();
        let plan = RemovalPlan::new((beneficiary, token), MODULE);
        assert!(accept_token_info(&plan, token));

        let switched = RemovalPlan::new((beneficiary, Address::ZERO), MODULE);
        assert!(!accept_token_info(&switched, token));
    }

    #[test]
    fn test_remove_after_failed_estimate_needs_nonce() {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
        let queue = TransactionQueue::new(1, sender);
        let plan = RemovalPlan::new(record().key(), MODULE);
        let estimate = FeeEstimate::failed();
        let params = TxParameters::from_estimate(&estimate);
        let ctx = RemovalContext { plan: &plan, safe: SAFE, estimate: &estimate, params: &params, submitted: false };

        assert_eq!(
            handle_action(ModalAction::Remove, &ctx, &queue),
            ModalOutcome::Failed(RemoveLimitError::Dispatch(DispatchError::MissingNonce))
        );
        assert!(receiver.try_recv().is_err());

        // A nonce typed in by the user is enough to queue it
        let mut edited = params.clone();
        edited.apply_edits(TxParameters { safe_nonce: "12".to_string(), ..params.clone() });
        let ctx = RemovalContext { params: &edited, ..ctx };
        assert!(matches!(handle_action(ModalAction::Remove, &ctx, &queue), ModalOutcome::Dispatched(_)));

        let queued = receiver.try_recv().unwrap();
        assert_eq!(queued.nonce, 12);
        assert_eq!(queued.request.safe_tx_gas, None);
    }

    #[test]
    fn test_dispatch_failure_is_reported() {
        let plan = RemovalPlan::new(record().key(), MODULE);
        let estimate = ready_estimate();
        let params = TxParameters::from_estimate(&estimate);
        let ctx = RemovalContext { plan: &plan, safe: SAFE, estimate: &estimate, params: &params, submitted: false };

        assert_eq!(
            handle_action(ModalAction::Remove, &ctx, &ClosedDispatcher),
            ModalOutcome::Failed(RemoveLimitError::Dispatch(DispatchError::PipelineClosed))
        );

        let bad_params = TxParameters { safe_nonce: "x".to_string(), ..params.clone() };
        let ctx = RemovalContext { params: &bad_params, ..ctx };
        assert!(matches!(
            handle_action(ModalAction::Remove, &ctx, &RecordingDispatcher::default()),
            ModalOutcome::Failed(RemoveLimitError::Parameters(_))
        ));
    }

    #[test]
    fn test_summary_without_token_info() {
        let summary = SpendingLimitSummary::new(&record(), None);
        assert_eq!(summary.beneficiary, record().beneficiary);
        assert!(summary.amount.is_none());
        assert!(summary.spent.is_none());
        assert_eq!(summary.reset_label, "1 day");
    }

    #[test]
    fn test_summary_with_token_info() {
        let token = TokenInfo {
            address: record().spent.token_address,
            name: "USD Coin".to_string(),
            symbol: "USDC".to_string(),
            decimals: 6,
        };
        let summary = SpendingLimitSummary::new(&record(), Some(&token));
        assert_eq!(summary.amount.as_deref(), Some("2.5 USDC"));
        assert_eq!(summary.spent.as_deref(), Some("0.5 USDC"));
    }
}
