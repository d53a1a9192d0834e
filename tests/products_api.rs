//! End-to-end tests for the product endpoints over real HTTP.

use std::collections::HashSet;

use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_crud_scenario() {
    let svc = common::start_service().await;
    let client = &svc.client;

    let res = client
        .post(svc.url("/products"))
        .json(&json!({"name": "Widget"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"id": 1, "name": "Widget"}));

    let res = client.get(svc.url("/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!([{"id": 1, "name": "Widget"}]));

    let res = client
        .put(svc.url("/products/1"))
        .json(&json!({"name": "Gadget"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"id": 1, "name": "Gadget"}));

    let res = client.delete(svc.url("/products/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client.get(svc.url("/products/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Product not found");
}

#[tokio::test]
async fn test_round_trip_preserves_name() {
    let svc = common::start_service().await;

    for name in ["Widget", "", "ünïcödé ✓", "with \"quotes\" and \\slashes"] {
        let created: Value = svc
            .client
            .post(svc.url("/products"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let id = created["id"].as_i64().unwrap();

        let fetched: Value = svc
            .client
            .get(svc.url(&format!("/products/{}", id)))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(fetched, json!({ "id": id, "name": name }));
    }
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let svc = common::start_service().await;
    let res = svc.client.get(svc.url("/products/12345")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_id_beyond_32_bits_is_404() {
    let svc = common::start_service().await;
    let res = svc.client.get(svc.url("/products/2147483648")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Product not found");
}

#[tokio::test]
async fn test_put_malformed_body_is_400_and_keeps_name() {
    let svc = common::start_service().await;
    svc.client
        .post(svc.url("/products"))
        .json(&json!({"name": "Widget"}))
        .send()
        .await
        .unwrap();

    for body in ["", r#"{"name": 5}"#, "not json"] {
        let res = svc
            .client
            .put(svc.url("/products/1"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(res.text().await.unwrap(), "Invalid input");
    }

    let res = svc.client.get(svc.url("/products/1")).send().await.unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"id": 1, "name": "Widget"}));
}

#[tokio::test]
async fn test_put_unknown_id_is_404_and_creates_nothing() {
    let svc = common::start_service().await;
    let res = svc
        .client
        .put(svc.url("/products/77"))
        .json(&json!({"name": "Ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(svc.store.is_empty());
}

#[tokio::test]
async fn test_delete_any_id_is_204() {
    let svc = common::start_service().await;
    for id in ["1", "0", "2147483647", "2147483648", "9223372036854775807"] {
        let res = svc
            .client
            .delete(svc.url(&format!("/products/{}", id)))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(res.bytes().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_malformed_create_is_400_and_creates_nothing() {
    let svc = common::start_service().await;

    for body in ["", "null", "[]", "42", r#"{"name": 1}"#, r#"{"id": "x", "name": "a"}"#, "{oops"] {
        let res = svc
            .client
            .post(svc.url("/products"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(res.text().await.unwrap(), "Invalid input");
    }
    assert!(svc.store.is_empty());
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let svc = common::start_service().await;
    let res = svc
        .client
        .post(svc.url("/products"))
        .body(r#"{"name":"Plain"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_non_digit_id_never_reaches_handler() {
    let svc = common::start_service().await;
    for path in ["/products/abc", "/products/1a", "/products/-1", "/products/"] {
        let res = svc.client.get(svc.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "path {}", path);
        assert_eq!(res.text().await.unwrap(), "404 page not found");
    }
}

#[tokio::test]
async fn test_out_of_range_id_is_400() {
    let svc = common::start_service().await;
    let res = svc
        .client
        .get(svc.url("/products/99999999999999999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Invalid ID");
}

#[tokio::test]
async fn test_store_outage_surfaces_as_500() {
    let svc = common::start_service().await;
    svc.store.fail_with("pool timed out while waiting for an open connection");

    let res = svc
        .client
        .post(svc.url("/products"))
        .json(&json!({"name": "Widget"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.text().await.unwrap(),
        "pool timed out while waiting for an open connection"
    );

    let res = svc.client.get(svc.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "OK");

    svc.store.recover();
    let res = svc.client.get(svc.url("/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let svc = common::start_service().await;
    let concurrency = 20;

    let mut tasks = Vec::new();
    for i in 0..concurrency {
        let client = svc.client.clone();
        let url = svc.url("/products");
        tasks.push(tokio::spawn(async move {
            let res = client
                .post(&url)
                .json(&json!({ "name": format!("item-{}", i) }))
                .send()
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::CREATED);
            res.json::<Value>().await.unwrap()["id"].as_i64().unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }
    assert_eq!(ids.len(), concurrency);

    let listed: Vec<Value> = svc
        .client
        .get(svc.url("/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), concurrency);
    let listed_ids: Vec<i64> = listed.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    let mut sorted = listed_ids.clone();
    sorted.sort();
    assert_eq!(listed_ids, sorted, "list is ordered by id");
}

#[tokio::test]
async fn test_graceful_shutdown_stops_server() {
    let svc = common::start_service().await;
    let res = svc.client.get(svc.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let addr = svc.addr;
    svc.stop().await.unwrap();

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    assert!(client.get(format!("http://{}/healthz", addr)).send().await.is_err());
}
