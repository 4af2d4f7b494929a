/// Kind of transaction a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxNotificationType {
    RemoveSpendingLimit,
}

/// Messages shown when a transaction is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationMessages {
    /// The creator's confirmation executes it
    pub before_execution: &'static str,
    /// Other owners still have to confirm
    pub awaiting_confirmations: &'static str,
}

impl TxNotificationType {
    pub fn messages(&self) -> NotificationMessages {
        match self {
            TxNotificationType::RemoveSpendingLimit => NotificationMessages {
                before_execution: "Waiting for remove spending limit transaction confirmation",
                awaiting_confirmations: "Remove spending limit transaction created. More confirmations needed to execute",
            },
        }
    }
}
