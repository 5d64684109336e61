//! Collection store behavior against a scripted backend
//!
//! These tests verify that:
//! - Loads replace the list and recompute the filtered view
//! - Failed loads and mutations leave the list untouched and set the error slot
//! - Mutations resynchronize through a fresh load
//! - Order status updates patch locally without a reload
//! - Stale load responses are discarded

mod harness;

use harness::*;
use std::time::Duration;
use tavola::prelude::*;
use tokio_test::{assert_ok, assert_pending, task};

// =============================================================================
// Loading
// =============================================================================

mod load_tests {
    use super::*;

    #[tokio::test]
    async fn test_load_replaces_list() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = ProductStore::new(as_api(&api));

        store.load().await.unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.filtered(), store.items());
        assert!(store.has_loaded());
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_failed_first_load_leaves_empty_list() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        api.fail("list_products");
        let store = ProductStore::new(as_api(&api));

        assert!(store.load().await.is_err());

        assert!(store.is_empty());
        assert!(!store.is_loading());
        assert!(!store.has_loaded());
        let message = store.error().unwrap();
        assert!(message.starts_with("Error loading products"));
        assert!(message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_list() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = CategoryStore::new(as_api(&api));
        store.load().await.unwrap();
        let before = store.items();

        api.fail("list_categories");
        assert!(store.load().await.is_err());

        assert_eq!(store.items(), before);
        assert!(store.error().is_some());
        assert!(!store.is_loading());

        api.recover("list_categories");
        store.load().await.unwrap();
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_loading_flag_while_in_flight() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = CategoryStore::new(as_api(&api));
        api.delay_next("list_categories", Duration::from_secs(60));

        let mut load = task::spawn(store.load());
        assert_pending!(load.poll());
        assert!(store.is_loading());
        assert!(store.is_empty());

        // Abandoning the request clears the flag
        drop(load);
        assert!(!store.is_loading());
        assert!(!store.has_loaded());
        assert_ok!(store.load().await);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = CategoryStore::new(as_api(&api));

        api.delay_next("list_categories", Duration::from_millis(50));
        let slow = store.load();
        let fast = async {
            api.backend.seed_category(category(3, "Dolci"));
            store.load().await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(slow.is_ok());
        assert!(fast.is_ok());
        // The slow response carried two categories and arrived last
        assert_eq!(store.len(), 3);
        assert!(!store.is_loading());
    }
}

// =============================================================================
// Filtering
// =============================================================================

mod filter_tests {
    use super::*;

    #[tokio::test]
    async fn test_products_by_category_scenario() {
        let api = ScriptedApi::new();
        api.backend.seed_category(category(1, "Pizza"));
        api.backend.seed_product(product(10, 1, "Margherita", 8.0));
        let store = ProductStore::new(as_api(&api));
        store.load().await.unwrap();
        api.reset_calls();

        store.set_filter(Filter::Only(1));
        let ids: Vec<_> = store.filtered().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![10]);

        store.set_filter(Filter::Only(2));
        assert!(store.filtered().is_empty());

        store.set_filter(Filter::All);
        assert_eq!(store.filtered(), store.items());

        // Filtering never fetches
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_filter_survives_reload() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = ProductStore::new(as_api(&api));
        store.set_filter(Filter::Only(2));

        store.load().await.unwrap();
        assert_eq!(store.filtered().len(), 1);
        assert_eq!(store.filtered()[0].name, "Acqua");

        api.backend.seed_product(product(21, 2, "Birra", 4.0));
        store.load().await.unwrap();
        assert_eq!(store.filtered().len(), 2);
        assert!(store.filtered().iter().all(|p| p.category_id == 2));
    }

    #[tokio::test]
    async fn test_orders_by_status() {
        let api = ScriptedApi::new();
        let first = api.backend.seed_order(vec![item(10, 1, 8.0)]);
        api.backend.seed_order(vec![item(20, 2, 1.5)]);
        api.backend
            .update_order_status(first.id, OrderStatus::Preparing)
            .await
            .unwrap();
        let store = OrderStore::new(as_api(&api));
        store.load().await.unwrap();

        store.set_filter(Filter::Only(OrderStatus::Preparing));
        let view = store.filtered();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, first.id);

        store.set_filter(Filter::Only(OrderStatus::Cancelled));
        assert!(store.filtered().is_empty());
    }
}

// =============================================================================
// Mutations
// =============================================================================

mod mutation_tests {
    use super::*;

    fn dolci() -> CategoryPayload {
        CategoryPayload {
            name: "Dolci".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_then_reload() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = CategoryStore::new(as_api(&api));
        store.load().await.unwrap();
        api.reset_calls();

        let id = store.create(&dolci()).await.unwrap().unwrap();

        assert_eq!(api.calls(), vec!["create_category", "list_categories"]);
        assert_eq!(store.get(id).unwrap().name, "Dolci");
    }

    #[tokio::test]
    async fn test_failed_create_leaves_list_untouched() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = CategoryStore::new(as_api(&api));
        store.load().await.unwrap();
        let before = store.items();
        api.reset_calls();
        api.fail("create_category");

        assert!(store.create(&dolci()).await.is_err());

        assert_eq!(store.items(), before);
        assert_eq!(api.calls(), vec!["create_category"]);
        assert!(store.error().unwrap().starts_with("Error creating category"));
    }

    #[tokio::test]
    async fn test_update_then_reload() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = ProductStore::new(as_api(&api));
        store.load().await.unwrap();

        let payload = ProductPayload {
            name: "Margherita DOP".to_string(),
            description: String::new(),
            price: 9.5,
            category_id: 1,
            image_url: String::new(),
        };
        store.update(10, &payload).await.unwrap();

        let updated = store.get(10).unwrap();
        assert_eq!(updated.name, "Margherita DOP");
        assert_eq!(updated.price, 9.5);
    }

    #[tokio::test]
    async fn test_delete_missing_record_is_generic_error() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = ProductStore::new(as_api(&api));
        store.load().await.unwrap();
        api.reset_calls();

        let err = store.delete(999).await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(store.len(), 2);
        assert_eq!(api.calls(), vec!["delete_product"]);
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn test_reload_failure_after_successful_mutation() {
        let api = ScriptedApi::new();
        seed_menu(&api);
        let store = ProductStore::new(as_api(&api));
        store.load().await.unwrap();
        api.fail("list_products");

        // The delete itself went through
        assert!(store.delete(20).await.is_ok());
        assert!(store.error().unwrap().starts_with("Error loading products"));
        assert_eq!(store.len(), 2);
    }
}

// =============================================================================
// Orders
// =============================================================================

mod order_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_status_without_reload() {
        let api = ScriptedApi::new();
        api.backend.seed_order(vec![item(10, 1, 8.0)]);
        let order = api.backend.seed_order(vec![item(10, 2, 8.0)]);
        let store = OrderStore::new(as_api(&api));
        store.load().await.unwrap();
        store.set_filter(Filter::Only(OrderStatus::Ready));
        assert!(store.filtered().is_empty());
        api.reset_calls();

        store
            .update_status(order.id, OrderStatus::Ready)
            .await
            .unwrap();

        assert_eq!(api.calls(), vec!["update_order_status"]);
        assert_eq!(store.get(order.id).unwrap().status, OrderStatus::Ready);
        let view = store.filtered();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, order.id);

        // And back out of the filter
        store
            .update_status(order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert!(store.filtered().is_empty());
    }

    #[tokio::test]
    async fn test_status_change_wins_over_load_in_flight() {
        let api = ScriptedApi::new();
        let order = api.backend.seed_order(Vec::new());
        let store = OrderStore::new(as_api(&api));
        store.load().await.unwrap();

        // The reload reads the order while still pending, then answers late
        api.delay_next("list_orders", Duration::from_millis(100));
        let (load, update) = tokio::join!(
            store.load(),
            store.update_status(order.id, OrderStatus::Ready)
        );

        assert!(load.is_ok());
        assert!(update.is_ok());
        assert_eq!(store.get(order.id).unwrap().status, OrderStatus::Ready);
        assert!(!store.is_loading());

        // The next load agrees with the backend
        store.load().await.unwrap();
        assert_eq!(store.get(order.id).unwrap().status, OrderStatus::Ready);
    }

    #[tokio::test]
    async fn test_status_change_clears_previous_error() {
        let api = ScriptedApi::new();
        let order = api.backend.seed_order(Vec::new());
        let store = OrderStore::new(as_api(&api));
        store.load().await.unwrap();
        api.fail("list_orders");
        assert!(store.load().await.is_err());
        assert!(store.error().is_some());

        store
            .update_status(order.id, OrderStatus::Preparing)
            .await
            .unwrap();

        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_failed_status_update_keeps_status() {
        let api = ScriptedApi::new();
        let order = api.backend.seed_order(Vec::new());
        let store = OrderStore::new(as_api(&api));
        store.load().await.unwrap();
        api.fail("update_order_status");

        assert!(store
            .update_status(order.id, OrderStatus::Cancelled)
            .await
            .is_err());

        assert_eq!(store.get(order.id).unwrap().status, OrderStatus::Pending);
        assert!(store.error().unwrap().contains(&format!("order {}", order.id)));
    }

    #[tokio::test]
    async fn test_delete_order_reloads() {
        let api = ScriptedApi::new();
        let order = api.backend.seed_order(Vec::new());
        let store = OrderStore::new(as_api(&api));
        store.load().await.unwrap();
        api.reset_calls();

        store.delete(order.id).await.unwrap();

        assert_eq!(api.calls(), vec!["delete_order", "list_orders"]);
        assert!(store.is_empty());
    }
}
