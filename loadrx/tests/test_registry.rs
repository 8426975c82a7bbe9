mod common;

use common::{clock_at_opening, StoreResource, StoreResources, StorefrontState};
use loadrx::mock::PausedLoader;
use loadrx::{Clock, Outcome, ResourceState, ResourceStatus, StateStore};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_registry_loads_from_spawned_tasks() {
    let price = PausedLoader::<u64>::new();
    let price_loader = price.clone();
    let resources = Arc::new(
        StoreResources::new(
            move || price_loader.call(),
            || async { vec!["Free shipping over $50".to_string()] },
            || async { Ok::<bool, String>(false) },
        )
        .with_clock(clock_at_opening()),
    );
    let store = Arc::new(StateStore::new(StorefrontState::default()));

    let mut handles = Vec::new();
    for key in StoreResource::ALL.iter().copied() {
        let resources = resources.clone();
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            resources.load(&store, key, false).await
        }));
    }

    // Price stays pending until the loader is settled
    while price.pending() == 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    store.update(|state| state.cart_items += 1);
    price.resolve_all(2_499);

    for handle in handles {
        assert_eq!(handle.await.unwrap(), Outcome::Success);
    }

    let state = store.get_state();
    assert_eq!(state.cart_items, 1);
    assert_eq!(state.resources.price.data(), Some(2_499));
    assert_eq!(
        state.resources.flash_messages.data(),
        Some(vec!["Free shipping over $50".to_string()])
    );
    assert_eq!(state.resources.maintenance_mode.data(), Some(false));
    assert_eq!(price.calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_loads_of_one_resource_call_loader_once() {
    let price = PausedLoader::<u64>::new();
    let price_loader = price.clone();
    let resources = Arc::new(StoreResources::new(
        move || price_loader.call(),
        || async { Vec::<String>::new() },
        || async { true },
    ));
    let store = Arc::new(StateStore::new(StorefrontState::default()));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let resources = resources.clone();
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            resources.load(&store, StoreResource::Price, false).await
        }));
    }

    while price.calls() == 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    // Give every spawned task the chance to reach the guard
    tokio::time::sleep(Duration::from_millis(20)).await;
    price.resolve_all(10);

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    assert_eq!(price.calls(), 1);
    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 1);
    assert_eq!(outcomes.iter().filter(|o| o.is_skipped()).count(), 15);
    assert_eq!(store.get_state().resources.price.data(), Some(10));
}

#[tokio::test]
async fn test_failed_refresh_keeps_data_on_screen() {
    let clock = clock_at_opening();
    let opened_at = clock.now();
    let messages = PausedLoader::<Vec<String>>::new();
    let messages_loader = messages.clone();
    let resources = StoreResources::new(
        || async { 1u64 },
        move || messages_loader.call(),
        || async { false },
    )
    .with_clock(clock.clone());
    let store = StateStore::new(StorefrontState::default());

    let first = resources.load(&store, StoreResource::FlashMessages, false);
    messages.resolve_all(vec!["Welcome".to_string()]);
    assert_eq!(first.await, Outcome::Success);

    let refreshed_at = clock.advance(Duration::from_secs(60));
    let refresh = resources.load(&store, StoreResource::FlashMessages, true);
    assert_eq!(
        store.get_state().resources.status(StoreResource::FlashMessages),
        ResourceStatus::Loaded
    );
    assert!(store.get_state().resources.flash_messages.is_refreshing());

    messages.reject_all("503 Service Unavailable");
    assert_eq!(refresh.await, Outcome::Error);

    assert_eq!(
        store.get_state().resources.flash_messages,
        ResourceState::Loaded {
            data: vec!["Welcome".to_string()],
            data_timestamp: opened_at,
            timestamp: refreshed_at,
            is_refreshing: false,
            refresh_error: Some("503 Service Unavailable".to_string()),
        }
    );
}
