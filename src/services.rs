// src/services.rs
use crate::config::AppConfig;
use crate::estimation::{FeeEstimator, RpcFeeEstimator};
use crate::rpc::RpcClient;
use crate::spending_limits::SpendingLimitClient;
use crate::tokens::{RpcTokenInfo, TokenInfoProvider};
use crate::transactions::{QueuedTransaction, TransactionDispatcher, TransactionQueue};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Collaborators shared with components through context
#[derive(Clone)]
pub struct AppServices {
    pub config: AppConfig,
    pub limits: SpendingLimitClient,
    pub tokens: Arc<dyn TokenInfoProvider>,
    pub estimator: Arc<dyn FeeEstimator>,
    pub dispatcher: Arc<dyn TransactionDispatcher>,
}

impl AppServices {
    pub fn new(config: AppConfig, sender: UnboundedSender<QueuedTransaction>) -> Self {
        let rpc = RpcClient::new(&config.rpc_url);
        Self {
            limits: SpendingLimitClient::new(rpc.clone(), config.spending_limit_module),
            tokens: Arc::new(RpcTokenInfo::new(rpc.clone())),
            estimator: Arc::new(RpcFeeEstimator::new(rpc)),
            dispatcher: Arc::new(TransactionQueue::new(config.chain_id, sender)),
            config,
        }
    }
}
