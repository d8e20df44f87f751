use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use stockroom_store::InMemoryCatalogStore;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, backed by the in-memory store, on an
        // ephemeral port.
        let store = Arc::new(InMemoryCatalogStore::new());
        let app = stockroom_api::app::build_app(store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_category(client: &reqwest::Client, base_url: &str, name: &str) -> Value {
    let res = client
        .post(format!("{base_url}/categories"))
        .json(&json!({ "name": name, "description": "test data" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn create_product(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    quantity: i64,
    unit_price_minor: u64,
    category_id: i64,
) -> Value {
    let res = client
        .post(format!("{base_url}/products"))
        .json(&json!({
            "name": name,
            "quantity": quantity,
            "unit_price_minor": unit_price_minor,
            "category_id": category_id,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn category_and_product_crud_roundtrip() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let category = create_category(&client, base, "Tools").await;
    let category_id = category["id"].as_i64().unwrap();

    let product = create_product(&client, base, "Hammer", 10, 2500, category_id).await;
    let product_id = product["id"].as_i64().unwrap();
    assert_eq!(product["quantity"], 10);
    assert_eq!(product["unit_price"]["display"], "25.00");
    assert_eq!(product["line_value"]["minor"], 25000);

    let res = client
        .get(format!("{base}/products/{product_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{base}/products/{product_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{base}/products/{product_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_creation_validates_input() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let category = create_category(&client, base, "Tools").await;
    let category_id = category["id"].as_i64().unwrap();

    // Blank name.
    let res = client
        .post(format!("{base}/products"))
        .json(&json!({
            "name": "  ",
            "quantity": 1,
            "unit_price_minor": 100,
            "category_id": category_id,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    // Dangling category reference.
    let res = client
        .post(format!("{base}/products"))
        .json(&json!({
            "name": "Orphan",
            "quantity": 1,
            "unit_price_minor": 100,
            "category_id": 999,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_with_products_cannot_be_deleted() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let category = create_category(&client, base, "Tools").await;
    let category_id = category["id"].as_i64().unwrap();
    let product = create_product(&client, base, "Hammer", 3, 1000, category_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let res = client
        .delete(format!("{base}/categories/{category_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "category_in_use");

    // After removing the product the same delete succeeds.
    client
        .delete(format!("{base}/products/{product_id}"))
        .send()
        .await
        .unwrap();
    let res = client
        .delete(format!("{base}/categories/{category_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn product_list_supports_search_and_category_filter() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let tools = create_category(&client, base, "Tools").await["id"]
        .as_i64()
        .unwrap();
    let paint = create_category(&client, base, "Paint").await["id"]
        .as_i64()
        .unwrap();
    create_product(&client, base, "Claw Hammer", 5, 1000, tools).await;
    create_product(&client, base, "Sledge Hammer", 2, 4000, tools).await;
    create_product(&client, base, "Primer", 9, 700, paint).await;

    let res: Value = client
        .get(format!("{base}/products?search=hammer"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(res["items"].as_array().unwrap().len(), 2);

    let res: Value = client
        .get(format!("{base}/products?category_id={paint}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = res["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Primer");
}

#[tokio::test]
async fn low_stock_flags_products_at_or_below_threshold() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let category = create_category(&client, base, "Tools").await["id"]
        .as_i64()
        .unwrap();
    create_product(&client, base, "Bolts", 2, 10, category).await;
    create_product(&client, base, "Anvil", 9, 90000, category).await;
    create_product(&client, base, "Nails", 0, 5, category).await;

    let res: Value = client
        .get(format!("{base}/inventory/low-stock?threshold=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let names: Vec<&str> = res["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Nails", "Bolts"]);
}

#[tokio::test]
async fn valuation_reports_totals_and_category_breakdown() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let tools = create_category(&client, base, "Tools").await["id"]
        .as_i64()
        .unwrap();
    let paint = create_category(&client, base, "Paint").await["id"]
        .as_i64()
        .unwrap();
    create_product(&client, base, "Hammer", 3, 1000, tools).await; // 30.00
    create_product(&client, base, "Primer", 2, 550, paint).await; // 11.00

    let res: Value = client
        .get(format!("{base}/inventory/valuation"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(res["product_count"], 2);
    assert_eq!(res["total_quantity"], 5);
    assert_eq!(res["total_value"]["minor"], 4100);
    assert_eq!(res["total_value"]["display"], "41.00");
    assert_eq!(res["by_category"]["Tools"]["minor"], 3000);
    assert_eq!(res["by_category"]["Paint"]["minor"], 1100);
}

#[tokio::test]
async fn sale_quote_computes_figures_without_mutating_stock() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let category = create_category(&client, base, "Tools").await["id"]
        .as_i64()
        .unwrap();
    let product = create_product(&client, base, "Hammer", 100, 5000, category).await;
    let product_id = product["id"].as_i64().unwrap();

    let res = client
        .post(format!("{base}/sales/quote"))
        .json(&json!({
            "product_id": product_id,
            "quantity": 3,
            "discount_pct": 10,
            "tax_rate_pct": 23,
            "buyer": "Jan Kowalski",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let quote: Value = res.json().await.unwrap();
    assert_eq!(quote["net"]["display"], "135.00");
    assert_eq!(quote["tax"]["display"], "31.05");
    assert_eq!(quote["gross"]["display"], "166.05");
    assert_eq!(quote["expected_quantity"], 100);

    // Quoting is a preview; stock is untouched.
    let res: Value = client
        .get(format!("{base}/products/{product_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(res["quantity"], 100);
}

#[tokio::test]
async fn confirming_a_sale_decrements_stock_exactly_once() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let category = create_category(&client, base, "Tools").await["id"]
        .as_i64()
        .unwrap();
    let product = create_product(&client, base, "Hammer", 10, 5000, category).await;
    let product_id = product["id"].as_i64().unwrap();

    let confirm = json!({
        "product_id": product_id,
        "quantity": 4,
        "discount_pct": 0,
        "tax_rate_pct": 23,
        "buyer": "Jan Kowalski",
        "expected_quantity": 10,
    });

    let res = client
        .post(format!("{base}/sales/confirm"))
        .json(&confirm)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["product"]["quantity"], 6);
    assert_eq!(body["invoice"]["gross"]["minor"], 24600);

    // Re-reading shows the decrement landed.
    let res: Value = client
        .get(format!("{base}/products/{product_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(res["quantity"], 6);

    // Replaying the same pre-sale snapshot must conflict, not re-sell.
    let res = client
        .post(format!("{base}/sales/confirm"))
        .json(&confirm)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");

    let res: Value = client
        .get(format!("{base}/products/{product_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(res["quantity"], 6);
}

#[tokio::test]
async fn overselling_is_rejected_with_insufficient_stock() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let category = create_category(&client, base, "Tools").await["id"]
        .as_i64()
        .unwrap();
    let product = create_product(&client, base, "Hammer", 2, 1000, category).await;
    let product_id = product["id"].as_i64().unwrap();

    let res = client
        .post(format!("{base}/sales/quote"))
        .json(&json!({
            "product_id": product_id,
            "quantity": 5,
            "tax_rate_pct": 23,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");
}

#[tokio::test]
async fn restock_adjustment_increases_quantity() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let category = create_category(&client, base, "Tools").await["id"]
        .as_i64()
        .unwrap();
    let product = create_product(&client, base, "Hammer", 1, 1000, category).await;
    let product_id = product["id"].as_i64().unwrap();

    let res = client
        .post(format!("{base}/products/{product_id}/adjust"))
        .json(&json!({ "delta": 24 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["quantity"], 25);

    // A correction below zero is refused.
    let res = client
        .post(format!("{base}/products/{product_id}/adjust"))
        .json(&json!({ "delta": -30 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
