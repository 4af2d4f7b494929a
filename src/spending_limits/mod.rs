//! Spending limits granted through the Safe allowance module

pub mod client;
pub mod encode;
pub mod removal;
pub mod reset_time;
pub mod types;

pub use client::SpendingLimitClient;
pub use removal::{can_remove, handle_action, ModalAction, ModalOutcome, RemovalPlan, SpendingLimitSummary};
pub use types::{LimitKey, SpendingLimitRecord};
