use dioxus::prelude::*;

mod components;
mod config;
mod estimation;
mod rpc;
mod services;
mod spending_limits;
mod store;
mod tokens;
mod transactions;
mod tx_parameters;

use components::*;
use config::AppConfig;
use services::AppServices;
use store::TX_STORE;
use tokio::sync::mpsc::unbounded_channel;
use transactions::QueuedTransaction;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    SpendingLimitsView {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        let config = AppConfig::from_env();
        log::info!("Using RPC {} on chain {}", config.rpc_url, config.chain_id);

        // Drain accepted transactions into the global store
        let (sender, mut receiver) = unbounded_channel::<QueuedTransaction>();
        spawn(async move {
            while let Some(tx) = receiver.recv().await {
                TX_STORE.write().record(tx);
            }
        });

        AppServices::new(config, sender)
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
