use dioxus::prelude::*;
use crate::components::common::{AddressInfo, ResetTimeInfo, TokenAmountInfo, TransactionFees, TxParametersDetail};
use crate::components::modals::EditTxParametersModal;
use crate::estimation::FeeEstimate;
use crate::services::AppServices;
use crate::spending_limits::removal::{accept_estimate, accept_token_info, RemovalContext};
use crate::spending_limits::{can_remove, handle_action, ModalAction, ModalOutcome, RemovalPlan, SpendingLimitRecord, SpendingLimitSummary};
use crate::tokens::TokenInfo;
use crate::tx_parameters::TxParameters;
use alloy_primitives::Address;

/// Confirmation dialog revoking one spending limit.
///
/// Closing after a successful removal is left to the parent, which watches
/// the transaction store.
#[component]
pub fn RemoveLimitModal(
    spending_limit: SpendingLimitRecord,
    safe: Address,
    open: bool,
    onclose: EventHandler<()>,
) -> Element {
    let services = use_context::<AppServices>();
    let module = services.config.spending_limit_module;

    let limit_key = spending_limit.key();
    let plan = use_memo(use_reactive!(|limit_key| RemovalPlan::new(limit_key, module)));

    let mut estimate = use_signal(FeeEstimate::loading);
    let mut params = use_signal(TxParameters::default);
    let mut token_info = use_signal(|| None as Option<TokenInfo>);
    let mut submitted = use_signal(|| false);
    let mut editing = use_signal(|| false);
    let mut error_message = use_signal(|| None as Option<String>);

    // Re-estimate whenever the payload changes
    let estimator = services.estimator.clone();
    use_effect(move || {
        let request = plan.read().estimation_request(safe);
        estimate.set(FeeEstimate::loading());
        params.set(TxParameters::default());
        submitted.set(false);
        error_message.set(None);

        let estimator = estimator.clone();
        spawn(async move {
            let result = estimator.estimate(&request).await;
            if !accept_estimate(&plan.peek(), &request) {
                return;
            }
            match result {
                Ok(fee) => {
                    params.write().seed(&fee);
                    estimate.set(fee);
                }
                Err(e) => {
                    log::warn!("Fee estimation for spending limit removal failed: {}", e);
                    estimate.set(FeeEstimate::failed());
                }
            }
        });
    });

    let tokens = services.tokens.clone();
    use_effect(move || {
        let (_, token_address) = plan.read().limit;
        token_info.set(None);

        let tokens = tokens.clone();
        spawn(async move {
            let info = tokens.token_info(token_address).await;
            if accept_token_info(&plan.peek(), token_address) {
                token_info.set(info);
            }
        });
    });

    let dispatcher = services.dispatcher.clone();
    let on_action = EventHandler::new(move |action: ModalAction| {
        let outcome = {
            let plan = plan.peek();
            let estimate = estimate.peek();
            let params = params.peek();
            let ctx = RemovalContext {
                plan: &*plan,
                safe,
                estimate: &*estimate,
                params: &*params,
                submitted: *submitted.peek(),
            };
            handle_action(action, &ctx, dispatcher.as_ref())
        };

        match outcome {
            ModalOutcome::Close => onclose.call(()),
            ModalOutcome::Dispatched(_) => {
                submitted.set(true);
                error_message.set(None);
            }
            ModalOutcome::Failed(e) => {
                error_message.set(Some(format!("Failed to remove spending limit: {}", e)));
            }
            ModalOutcome::Ignored => {}
        }
    });

    if !open {
        return rsx! {};
    }

    let fee = estimate();
    let summary = SpendingLimitSummary::new(&spending_limit, token_info.read().as_ref());
    let reset_label = summary.reset_label.to_string();
    let next_reset = summary
        .next_reset
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default();
    let remove_enabled = can_remove(&fee, submitted());

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_action.call(ModalAction::Cancel),

            div {
                class: "modal-content",
                onclick: move |e| e.stop_propagation(),

                div { class: "modal-header",
                    h2 { class: "modal-title", "Remove Spending Limit" }
                    button {
                        class: "modal-close",
                        onclick: move |_| on_action.call(ModalAction::Cancel),
                        "×"
                    }
                }

                div { class: "help-text", "Remove the selected Spending Limit" }

                if let Some(error) = error_message() {
                    div { class: "error-message", "{error}" }
                }

                div { class: "modal-body",
                    AddressInfo { title: "Beneficiary", address: summary.beneficiary }
                    if let Some(amount) = summary.amount.clone() {
                        TokenAmountInfo { title: "Amount", amount }
                    }
                    ResetTimeInfo { title: "Reset Time", label: reset_label, next_reset }
                }

                TxParametersDetail {
                    params: params(),
                    is_execution: fee.is_execution,
                    is_creation: fee.is_creation,
                    onedit: move |_| editing.set(true),
                }

                TransactionFees { estimate: fee.clone() }

                div { class: "modal-buttons",
                    button {
                        class: "modal-button cancel",
                        onclick: move |_| on_action.call(ModalAction::Cancel),
                        "Cancel"
                    }
                    button {
                        class: "modal-button primary danger",
                        disabled: !remove_enabled,
                        onclick: move |_| on_action.call(ModalAction::Remove),
                        "Remove"
                    }
                }
            }
        }

        if editing() {
            EditTxParametersModal {
                params: params(),
                is_execution: fee.is_execution,
                onsave: move |edited: TxParameters| {
                    params.write().apply_edits(edited);
                    editing.set(false);
                },
                onclose: move |_| editing.set(false),
            }
        }
    }
}
