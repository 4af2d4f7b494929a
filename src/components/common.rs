use crate::estimation::{EstimationStatus, FeeEstimate};
use crate::tx_parameters::TxParameters;
use alloy_primitives::Address;
use dioxus::prelude::*;

/// `0x1234…abcd` form for tight layouts
pub fn shorten_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

#[component]
pub fn AddressInfo(title: String, address: Address) -> Element {
    rsx! {
        div { class: "wallet-field",
            label { "{title}:" }
            div { class: "address-display", "{address}" }
        }
    }
}

#[component]
pub fn TokenAmountInfo(title: String, amount: String) -> Element {
    rsx! {
        div { class: "wallet-field",
            label { "{title}:" }
            div { class: "balance-display", "{amount}" }
        }
    }
}

#[component]
pub fn ResetTimeInfo(title: String, label: String, next_reset: String) -> Element {
    rsx! {
        div { class: "wallet-field",
            label { "{title}:" }
            div { class: "info-value", "{label}" }
            if !next_reset.is_empty() {
                div { class: "help-text", "Next reset: {next_reset}" }
            }
        }
    }
}

/// Read-only view of the execution parameters with an edit button
#[component]
pub fn TxParametersDetail(
    params: TxParameters,
    is_execution: bool,
    is_creation: bool,
    onedit: EventHandler<()>,
) -> Element {
    let or_default = |value: &str| if value.is_empty() { "default".to_string() } else { value.to_string() };
    let safe_nonce = or_default(&params.safe_nonce);
    let safe_tx_gas = or_default(&params.safe_tx_gas);
    let eth_nonce = or_default(&params.eth_nonce);
    let eth_gas_limit = or_default(&params.eth_gas_limit);
    let eth_gas_price = or_default(&params.eth_gas_price);

    rsx! {
        div { class: "tx-parameters",
            div { class: "tx-parameters-header",
                h3 { "Advanced options" }
                button {
                    class: "button-standard ghost",
                    onclick: move |_| onedit.call(()),
                    "Edit"
                }
            }
            if is_creation {
                div { class: "tx-parameter-row",
                    span { "Safe nonce" }
                    span { "{safe_nonce}" }
                }
                div { class: "tx-parameter-row",
                    span { "safeTxGas" }
                    span { "{safe_tx_gas}" }
                }
            }
            if is_execution {
                div { class: "tx-parameter-row",
                    span { "Nonce" }
                    span { "{eth_nonce}" }
                }
                div { class: "tx-parameter-row",
                    span { "Gas limit" }
                    span { "{eth_gas_limit}" }
                }
                div { class: "tx-parameter-row",
                    span { "Gas price (gwei)" }
                    span { "{eth_gas_price}" }
                }
            }
        }
    }
}

#[component]
pub fn TransactionFees(estimate: FeeEstimate) -> Element {
    rsx! {
        div { class: "transaction-fees",
            match estimate.status {
                EstimationStatus::Loading => rsx! {
                    div { class: "info-message", "Estimating transaction fees..." }
                },
                EstimationStatus::Failure => rsx! {
                    div { class: "warning-message danger",
                        "This transaction will most likely fail. To save gas costs, reject this transaction."
                    }
                },
                EstimationStatus::Success if estimate.is_off_chain_signature => rsx! {
                    div { class: "info-message",
                        "You're about to create a transaction and will have to confirm it with your currently connected wallet."
                    }
                },
                EstimationStatus::Success => rsx! {
                    div { class: "info-message",
                        "You're about to create and execute a transaction and will need to confirm it with your currently connected wallet. Make sure you have {estimate.gas_cost_formatted} ETH in this wallet to fund this confirmation."
                    }
                },
            }
        }
    }
}
