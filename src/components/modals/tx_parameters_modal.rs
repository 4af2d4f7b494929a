use dioxus::prelude::*;
use crate::tx_parameters::TxParameters;

#[component]
pub fn EditTxParametersModal(
    params: TxParameters,
    is_execution: bool,
    onsave: EventHandler<TxParameters>,
    onclose: EventHandler<()>,
) -> Element {
    let mut safe_nonce = use_signal(|| params.safe_nonce.clone());
    let mut safe_tx_gas = use_signal(|| params.safe_tx_gas.clone());
    let mut eth_nonce = use_signal(|| params.eth_nonce.clone());
    let mut eth_gas_limit = use_signal(|| params.eth_gas_limit.clone());
    let mut eth_gas_price = use_signal(|| params.eth_gas_price.clone());
    let mut error_message = use_signal(|| None as Option<String>);

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| onclose.call(()),

            div {
                class: "modal-content",
                onclick: move |e| e.stop_propagation(),

                h2 { class: "modal-title", "Advanced options" }

                if let Some(error) = error_message() {
                    div { class: "error-message", "{error}" }
                }

                div { class: "wallet-field",
                    label { "Safe nonce:" }
                    input {
                        r#type: "number",
                        min: "0",
                        value: "{safe_nonce}",
                        oninput: move |e| safe_nonce.set(e.value()),
                    }
                }

                div { class: "wallet-field",
                    label { "safeTxGas:" }
                    input {
                        r#type: "number",
                        min: "0",
                        value: "{safe_tx_gas}",
                        oninput: move |e| safe_tx_gas.set(e.value()),
                    }
                }

                if is_execution {
                    div { class: "wallet-field",
                        label { "Nonce:" }
                        input {
                            r#type: "number",
                            min: "0",
                            value: "{eth_nonce}",
                            placeholder: "Wallet default",
                            oninput: move |e| eth_nonce.set(e.value()),
                        }
                    }

                    div { class: "wallet-field",
                        label { "Gas limit:" }
                        input {
                            r#type: "number",
                            min: "0",
                            value: "{eth_gas_limit}",
                            oninput: move |e| eth_gas_limit.set(e.value()),
                        }
                    }

                    div { class: "wallet-field",
                        label { "Gas price (gwei):" }
                        input {
                            r#type: "number",
                            min: "0",
                            step: "any",
                            value: "{eth_gas_price}",
                            oninput: move |e| eth_gas_price.set(e.value()),
                        }
                    }
                }

                div { class: "modal-buttons",
                    button {
                        class: "modal-button cancel",
                        onclick: move |_| onclose.call(()),
                        "Cancel"
                    }
                    button {
                        class: "modal-button primary",
                        onclick: move |_| {
                            let edited = TxParameters {
                                safe_nonce: safe_nonce(),
                                safe_tx_gas: safe_tx_gas(),
                                eth_nonce: eth_nonce(),
                                eth_gas_limit: eth_gas_limit(),
                                eth_gas_price: eth_gas_price(),
                                edited: true,
                            };
                            match edited.parse() {
                                Ok(_) => onsave.call(edited),
                                Err(e) => error_message.set(Some(e.to_string())),
                            }
                        },
                        "Save"
                    }
                }
            }
        }
    }
}
