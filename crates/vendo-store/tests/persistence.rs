//! Cross-store persistence behavior through a shared slot.
//!
//! These tests simulate app restarts: a fresh store instance constructed
//! against the same slot must come back with the last committed state.

use std::sync::Arc;
use std::time::Duration;

use vendo_core::types::{Machine, Product};
use vendo_store::{
    CartStore, FavoritesStore, KeyValueSlot, MemorySlot, CART_SLOT_KEY, FAVORITES_SLOT_KEY,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn test_product(id: &str, price_units: i64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {}", id),
        description: None,
        price_units,
        image_url: None,
        category: None,
        is_available: true,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

fn test_machine(id: &str) -> Machine {
    Machine {
        id: id.to_string(),
        name: format!("Machine {}", id),
        address: "1 Demo Street".to_string(),
        is_online: true,
    }
}

/// Write-back is fire-and-forget; wait until the slot holds a value.
async fn wait_for_key(slot: &Arc<MemorySlot>, key: &str) {
    for _ in 0..200 {
        if slot.read(key).await.unwrap().is_some() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("key '{}' was never persisted", key);
}

#[tokio::test]
async fn cart_survives_restart() {
    init_tracing();
    let slot = Arc::new(MemorySlot::new());

    {
        let cart = CartStore::load(slot.clone() as Arc<dyn KeyValueSlot>).await;
        cart.set_machine(test_machine("lobby"));
        cart.add_item(&test_product("esp", 12_000));
        cart.add_item(&test_product("esp", 12_000));
        cart.apply_promo("COFFEE10", 10).unwrap();
        wait_for_key(&slot, CART_SLOT_KEY).await;
        // Give the final write-back a chance to land before "restarting"
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let restored = CartStore::load(slot.clone() as Arc<dyn KeyValueSlot>).await;
    let totals = restored.totals();

    assert_eq!(totals.total_quantity, 2);
    assert_eq!(totals.subtotal_units, 24_000);
    assert_eq!(totals.promo_discount_units, 2_400);
    assert_eq!(totals.total_units, 21_600);
    assert_eq!(restored.snapshot().machine.unwrap().id, "lobby");
}

#[tokio::test]
async fn completed_checkout_clears_the_persisted_cart_too() {
    init_tracing();
    let slot = Arc::new(MemorySlot::new());

    {
        let cart = CartStore::load(slot.clone() as Arc<dyn KeyValueSlot>).await;
        cart.set_machine(test_machine("lobby"));
        cart.add_item(&test_product("esp", 12_000));
        cart.complete_checkout();
        wait_for_key(&slot, CART_SLOT_KEY).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let restored = CartStore::load(slot as Arc<dyn KeyValueSlot>).await;
    assert!(restored.snapshot().is_empty());
    assert!(restored.snapshot().machine.is_none());
}

#[tokio::test]
async fn stores_do_not_share_keys() {
    init_tracing();
    let slot = Arc::new(MemorySlot::new());

    let cart = CartStore::load(slot.clone() as Arc<dyn KeyValueSlot>).await;
    let favorites = FavoritesStore::load(slot.clone() as Arc<dyn KeyValueSlot>).await;

    cart.add_item(&test_product("esp", 12_000));
    favorites.toggle("esp");
    wait_for_key(&slot, CART_SLOT_KEY).await;
    wait_for_key(&slot, FAVORITES_SLOT_KEY).await;

    // Clearing one store's slot leaves the other untouched
    slot.remove(CART_SLOT_KEY).await.unwrap();

    let restored = FavoritesStore::load(slot as Arc<dyn KeyValueSlot>).await;
    assert!(restored.contains("esp"));
}

#[tokio::test]
async fn favorites_survive_restart() {
    init_tracing();
    let slot = Arc::new(MemorySlot::new());

    {
        let favorites = FavoritesStore::load(slot.clone() as Arc<dyn KeyValueSlot>).await;
        favorites.toggle("esp");
        favorites.toggle("lat");
        favorites.toggle("esp"); // un-favorite again
        wait_for_key(&slot, FAVORITES_SLOT_KEY).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let restored = FavoritesStore::load(slot as Arc<dyn KeyValueSlot>).await;
    assert!(restored.contains("lat"));
    assert!(!restored.contains("esp"));
    assert_eq!(restored.len(), 1);
}
