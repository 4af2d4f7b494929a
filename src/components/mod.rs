pub mod common;
pub mod modals;
pub mod spending_limits_view;

pub use spending_limits_view::SpendingLimitsView;
