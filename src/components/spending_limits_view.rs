use dioxus::prelude::*;
use crate::components::common::shorten_address;
use crate::components::modals::RemoveLimitModal;
use crate::services::AppServices;
use crate::spending_limits::{SpendingLimitRecord, SpendingLimitSummary};
use crate::store::TX_STORE;
use crate::tokens::TokenInfo;
use alloy_primitives::Address;
use std::collections::HashMap;

/// One table row, display strings already resolved
#[derive(Debug, Clone, PartialEq)]
struct LimitRow {
    id: String,
    record: SpendingLimitRecord,
    beneficiary: String,
    amount: String,
    spent: String,
    reset_label: String,
    pending_removal: bool,
}

impl LimitRow {
    fn new(record: &SpendingLimitRecord, token: Option<&TokenInfo>, pending_removal: bool) -> Self {
        let summary = SpendingLimitSummary::new(record, token);
        let unknown = || format!("{} (raw)", record.spent.amount);
        Self {
            id: format!("{}-{}", record.beneficiary, record.spent.token_address),
            record: record.clone(),
            beneficiary: shorten_address(&record.beneficiary),
            amount: summary.amount.unwrap_or_else(unknown),
            spent: summary.spent.unwrap_or_default(),
            reset_label: match (record.reset_time.reset_time_min, summary.reset_label) {
                (0, _) => "One time".to_string(),
                (minutes, "") => format!("Every {} min", minutes),
                (_, label) => label.to_string(),
            },
            pending_removal,
        }
    }
}

#[component]
fn SpendingLimitRow(row: LimitRow, onremove: EventHandler<SpendingLimitRecord>) -> Element {
    let record = row.record.clone();
    rsx! {
        div { class: "limit-row",
            div { class: "limit-cell address-display", title: "{row.record.beneficiary}", "{row.beneficiary}" }
            div { class: "limit-cell",
                "{row.amount}"
                if !row.spent.is_empty() {
                    div { class: "help-text", "Spent: {row.spent}" }
                }
            }
            div { class: "limit-cell", "{row.reset_label}" }
            div { class: "limit-cell",
                if row.pending_removal {
                    span { class: "badge", "Removal pending" }
                } else {
                    button {
                        class: "button-standard danger",
                        onclick: move |_| onremove.call(record.clone()),
                        "Remove"
                    }
                }
            }
        }
    }
}

#[component]
pub fn SpendingLimitsView() -> Element {
    let services = use_context::<AppServices>();
    let mut limits = use_signal(Vec::<SpendingLimitRecord>::new);
    let mut token_infos = use_signal(HashMap::<Address, TokenInfo>::new);
    let mut loading = use_signal(|| false);
    let mut error_message = use_signal(|| None as Option<String>);
    let mut selected = use_signal(|| None as Option<SpendingLimitRecord>);

    let safe = services.config.safe_address;
    let client = services.limits.clone();
    let tokens = services.tokens.clone();

    // Load limits on mount
    use_effect(move || {
        let Some(safe) = safe else {
            error_message.set(Some("Set SAFE_ADDRESS to manage spending limits".to_string()));
            return;
        };

        loading.set(true);
        error_message.set(None);
        let client = client.clone();
        let tokens = tokens.clone();

        spawn(async move {
            match client.load_spending_limits(safe).await {
                Ok(records) => {
                    for record in &records {
                        let token = record.spent.token_address;
                        if token_infos.peek().contains_key(&token) {
                            continue;
                        }
                        if let Some(info) = tokens.token_info(token).await {
                            token_infos.write().insert(token, info);
                        }
                    }
                    limits.set(records);
                }
                Err(e) => {
                    log::error!("Failed to load spending limits for {}: {}", safe, e);
                    error_message.set(Some(format!("Failed to load spending limits: {}", e)));
                }
            }
            loading.set(false);
        });
    });

    // The store owns the removal lifecycle; close the dialog once it has it
    use_effect(move || {
        let store = TX_STORE.read();
        let key = selected.peek().as_ref().map(|record| record.key());
        if let Some(key) = key {
            if store.has_removal_for(key) {
                selected.set(None);
            }
        }
    });

    let rows: Vec<LimitRow> = {
        let store = TX_STORE.read();
        let infos = token_infos.read();
        limits
            .read()
            .iter()
            .map(|record| LimitRow::new(record, infos.get(&record.spent.token_address), store.has_removal_for(record.key())))
            .collect()
    };

    let notifications: Vec<(String, String)> = TX_STORE
        .read()
        .notifications
        .iter()
        .rev()
        .take(5)
        .map(|n| (n.created_at.format("%H:%M:%S").to_string(), n.message.to_string()))
        .collect();

    let safe_label = safe.map(|s| s.to_string()).unwrap_or_else(|| "No Safe configured".to_string());

    rsx! {
        div { class: "spending-limits",
            h1 { class: "page-title", "Spending Limits" }
            div { class: "address-display", "{safe_label}" }

            if let Some(error) = error_message() {
                div { class: "error-message", "{error}" }
            }

            if loading() {
                div { class: "info-message", "Loading spending limits..." }
            } else if rows.is_empty() && error_message().is_none() {
                div { class: "info-message", "No spending limits configured" }
            } else {
                div { class: "limits-table",
                    div { class: "limit-row header",
                        div { class: "limit-cell", "Beneficiary" }
                        div { class: "limit-cell", "Amount" }
                        div { class: "limit-cell", "Reset Time" }
                        div { class: "limit-cell", "" }
                    }
                    for row in rows {
                        SpendingLimitRow {
                            key: "{row.id}",
                            row: row.clone(),
                            onremove: move |record: SpendingLimitRecord| selected.set(Some(record)),
                        }
                    }
                }
            }

            if !notifications.is_empty() {
                div { class: "notifications",
                    for (time, message) in notifications {
                        div { class: "notification", key: "{time}-{message}",
                            span { class: "notification-time", "{time}" }
                            span { "{message}" }
                        }
                    }
                }
            }
        }

        if let (Some(record), Some(safe)) = (selected(), safe) {
            RemoveLimitModal {
                spending_limit: record,
                safe,
                open: true,
                onclose: move |_| selected.set(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spending_limits::types::{ResetTime, SpentInfo};
    use alloy_primitives::U256;

    fn record() -> SpendingLimitRecord {
        SpendingLimitRecord {
            beneficiary: Address::repeat_byte(0x0b),
            spent: SpentInfo {
                token_address: Address::ZERO,
                amount: U256::from(10u64).pow(U256::from(18u64)),
                spent: U256::ZERO,
            },
            reset_time: ResetTime { reset_time_min: 37, last_reset_min: 0 },
            nonce: 0,
        }
    }

    #[test]
    fn test_row_with_token() {
        let row = LimitRow::new(&record(), Some(&TokenInfo::native()), false);
        assert_eq!(row.amount, "1 ETH");
        assert_eq!(row.spent, "0 ETH");
        assert_eq!(row.reset_label, "Every 37 min");
    }

    #[test]
    fn test_row_without_token() {
        let row = LimitRow::new(&record(), None, true);
        assert_eq!(row.amount, "1000000000000000000 (raw)");
        assert!(row.spent.is_empty());
        assert!(row.pending_removal);
    }
}
