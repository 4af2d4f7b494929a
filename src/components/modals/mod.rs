pub mod remove_limit_modal;
pub mod tx_parameters_modal;

pub use remove_limit_modal::RemoveLimitModal;
pub use tx_parameters_modal::EditTxParametersModal;
