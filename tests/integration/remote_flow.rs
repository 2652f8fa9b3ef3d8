//! Integration tests for the remote client and the reconciliation flow
//!
//! All HTTP goes against the loopback mock shop in `common::shop`.

use super::common::shop::spawn_mock_shop;
use eboutic::{Basket, BasketClient, MemoryJar, RemoteError, SyncError, SyncedBasket};

fn empty_basket() -> Basket {
    Basket::initialize(Box::new(MemoryJar::new()), None).expect("init")
}

#[tokio::test]
async fn remote_add_resolves_with_server_basket() {
    let (base_url, _) = spawn_mock_shop(&[(42, 5.0)]).await;
    let client = BasketClient::new(&base_url, "testtoken");

    let basket = client.add_product(42).await.expect("first add");
    assert_eq!(basket.total, 5.0);
    assert_eq!(basket.items.len(), 1);
    assert_eq!(basket.items[0].product_id, 42);
    assert_eq!(basket.items[0].quantity, 1);

    let basket = client.add_product(42).await.expect("second add");
    assert_eq!(basket.items[0].quantity, 2);
    assert_eq!(basket.total, 10.0);
}

#[tokio::test]
async fn remote_remove_resolves_with_server_basket() {
    let (base_url, _) = spawn_mock_shop(&[(42, 5.0)]).await;
    let client = BasketClient::new(&base_url, "testtoken");

    client.add_product(42).await.expect("add");
    client.add_product(42).await.expect("add");
    let basket = client.remove_product(42).await.expect("remove");
    assert_eq!(basket.items[0].quantity, 1);
    assert_eq!(basket.total, 5.0);
}

#[tokio::test]
async fn csrf_token_reaches_the_server() {
    let (base_url, state) = spawn_mock_shop(&[(1, 1.0)]).await;
    let client = BasketClient::new(&base_url, "secret-token");

    client.add_product(1).await.expect("add");
    assert_eq!(
        state.lock().expect("lock").csrf_tokens,
        vec!["secret-token".to_string()]
    );
}

#[tokio::test]
async fn unknown_product_is_an_api_error() {
    let (base_url, _) = spawn_mock_shop(&[]).await;
    let client = BasketClient::new(&base_url, "token");

    let error = client.add_product(99).await.expect_err("404");
    match error {
        RemoteError::Api { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "This product does not exist");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn forbidden_product_is_an_api_error() {
    let (base_url, state) = spawn_mock_shop(&[(5, 2.0)]).await;
    state.lock().expect("lock").forbidden_products.push(5);
    let client = BasketClient::new(&base_url, "token");

    let error = client.add_product(5).await.expect_err("403");
    match error {
        RemoteError::Api { status, .. } => assert_eq!(status.as_u16(), 403),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn network_failure_is_a_transport_error() {
    // Bind then drop, so nothing listens on the port.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = BasketClient::new(format!("http://{addr}"), "token");
    let error = client.add_product(1).await.expect_err("refused");
    assert!(matches!(error, RemoteError::Transport(_)));
}

#[tokio::test]
async fn synced_add_commits_confirmed_state() {
    let (base_url, _) = spawn_mock_shop(&[(1, 2.5)]).await;
    let mut synced = SyncedBasket::new(empty_basket(), BasketClient::new(&base_url, "token"));

    synced.add(1, "Widget", 2.5).await.expect("sync add");
    synced.add(1, "Widget", 2.5).await.expect("sync add");

    assert_eq!(synced.basket().items().len(), 1);
    assert_eq!(synced.basket().items()[0].quantity, 2);
    assert_eq!(synced.basket().total(), 5.0);
}

#[tokio::test]
async fn synced_remove_commits_confirmed_state() {
    let (base_url, _) = spawn_mock_shop(&[(1, 2.5)]).await;
    let mut synced = SyncedBasket::new(empty_basket(), BasketClient::new(&base_url, "token"));

    synced.add(1, "Widget", 2.5).await.expect("sync add");
    synced.add(1, "Widget", 2.5).await.expect("sync add");
    synced.remove(1).await.expect("sync remove");

    assert_eq!(synced.basket().items()[0].quantity, 1);
    assert_eq!(synced.basket().total(), 2.5);
}

#[tokio::test]
async fn failed_sync_leaves_local_state_untouched() {
    let (base_url, _) = spawn_mock_shop(&[(1, 2.5)]).await;
    let mut basket = empty_basket();
    basket.add_from_catalog(1, "Widget", 2.5).expect("add");
    let mut synced = SyncedBasket::new(basket, BasketClient::new(&base_url, "token"));

    let error = synced.add(99, "Ghost", 1.0).await.expect_err("404");
    assert!(matches!(error, SyncError::Remote(_)));
    assert_eq!(synced.basket().items().len(), 1);
    assert_eq!(synced.basket().items()[0].quantity, 1);
}

#[tokio::test]
async fn synced_clear_empties_both_sides() {
    let (base_url, state) = spawn_mock_shop(&[(1, 2.5)]).await;
    let mut synced = SyncedBasket::new(empty_basket(), BasketClient::new(&base_url, "token"));

    synced.add(1, "Widget", 2.5).await.expect("sync add");
    synced.clear().await.expect("sync clear");

    assert!(synced.basket().items().is_empty());
    assert!(state.lock().expect("lock").quantities.is_empty());
}
