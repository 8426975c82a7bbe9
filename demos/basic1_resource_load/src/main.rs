use crate::tracing_setup::tracing_init;
use futures_signals::signal::SignalExt;
use loadrx::{define_resources, HasResources, Outcome, ResourceState, State, StateStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

mod tracing_setup;

#[derive(Debug, Clone, PartialEq)]
struct Rates {
    base_currency: String,
    aud: f64,
    nzd: f64,
}

define_resources! {
    struct ShopResources {
        key: ShopResource,
        states: ShopResourceStates,
        resources: {
            ExchangeRates => exchange_rates: Rates,
            FlashMessages => flash_messages: Vec<String>,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Shop {
    resources: ShopResourceStates,
}

impl State for Shop {}

impl HasResources<ShopResourceStates> for Shop {
    fn resources(&self) -> &ShopResourceStates {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut ShopResourceStates {
        &mut self.resources
    }
}

fn describe(state: &ResourceState<Rates>) -> String {
    match state {
        ResourceState::Initial => "nothing yet".to_string(),
        ResourceState::Loading { .. } => "loading...".to_string(),
        ResourceState::Loaded {
            data,
            is_refreshing,
            refresh_error,
            ..
        } => {
            let mut line = format!("1 {} = {} AUD / {} NZD", data.base_currency, data.aud, data.nzd);
            if *is_refreshing {
                line.push_str(" (refreshing)");
            }
            if let Some(error) = refresh_error {
                line.push_str(&format!(" (refresh failed: {error})"));
            }
            line
        }
        ResourceState::Error { error_message, .. } => format!("failed: {error_message}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_init(std::env::args().any(|arg| arg == "--verbose"))?;

    let calls = Arc::new(std::sync::atomic::AtomicU32::new(0));
    let rate_calls = calls.clone();
    let resources = ShopResources::new(
        move || {
            let call = rate_calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            async move {
                sleep(Duration::from_millis(200)).await;
                match call {
                    0 | 1 => Ok(Rates {
                        base_currency: "USD".to_string(),
                        aud: 1.5 + f64::from(call) / 100.0,
                        nzd: 1.8,
                    }),
                    _ => Err("503 Service Unavailable".to_string()),
                }
            }
        },
        || async { vec!["Save 10% today only".to_string()] },
    );
    let store = Arc::new(StateStore::new(Shop::default()));

    let watcher = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .to_signal()
                .map(|shop| describe(&shop.resources.exchange_rates))
                .dedupe_cloned()
                .stop_if(|line| line.contains("refresh failed"))
                .for_each(|line| {
                    info!("  rates | {line}");
                    async {}
                })
                .await;
        }
    });

    info!("==========================================");
    let first = resources.load(&store, ShopResource::ExchangeRates, false);
    let duplicate = resources.load(&store, ShopResource::ExchangeRates, false);
    warn!("second load while the first is in flight: skipped = {}", duplicate.is_skipped());
    resources.load(&store, ShopResource::FlashMessages, false).await;
    info!("first load: {:?}", first.await);

    info!("==========================================");
    warn!("refreshing keeps the old rates on screen until the new ones arrive");
    let outcome = resources.load(&store, ShopResource::ExchangeRates, true).await;
    info!("refresh: {:?}", outcome);

    info!("==========================================");
    let outcome = resources.load(&store, ShopResource::ExchangeRates, true).await;
    if outcome == Outcome::Error {
        warn!("refresh failed, the last good rates are still loaded");
    }

    watcher.await?;
    let shop = store.get_state();
    info!(
        "flash messages: {:?}",
        shop.resources.flash_messages.data_ref().cloned().unwrap_or_default()
    );
    info!("rates loaded at {:?}", shop.resources.exchange_rates.data_timestamp().map(|t| t.to_string()));
    Ok(())
}
