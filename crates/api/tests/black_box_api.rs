use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::{Value, json};

use salesight_ai::{AiError, InsightClient, InsightRequestBuilder, TextGenerator};
use salesight_core::{ProductId, SaleId};
use salesight_infra::ai::AcceptPolicy;

/// Answers predictions live and fails everything else, like a flaky model.
struct PredictionOnlyModel;

#[async_trait]
impl TextGenerator for PredictionOnlyModel {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        if let Some(line) = prompt.lines().find(|l| l.starts_with("Total transactions:")) {
            return Ok(format!("Forecast from {line}"));
        }
        if prompt.contains("business consultant") {
            return Ok("1. Run a weekday promotion".to_string());
        }
        Err(AiError::Transport {
            status: Some(500),
            body: "model overloaded".to_string(),
        })
    }
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let client = InsightClient::new(Arc::new(PredictionOnlyModel), InsightRequestBuilder::default());
        let app = salesight_api::app::build_app(client, AcceptPolicy::LatestIssued);
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

fn dataset(sale_count: usize) -> Value {
    let products = json!([
        { "id": ProductId::new().to_string(), "name": "Keyboard", "stock": 5 },
        { "id": ProductId::new().to_string(), "name": "Monitor", "stock": 50 },
        { "id": ProductId::new().to_string(), "name": "Mouse", "stock": 3 },
        { "id": ProductId::new().to_string(), "name": "Cable", "stock": 100 }
    ]);
    let sales: Vec<Value> = (0..sale_count)
        .map(|_| {
            json!({
                "id": SaleId::new().to_string(),
                "product_id": ProductId::new().to_string(),
                "quantity": 1,
                "total_cents": 2_500,
                "occurred_at": Utc::now(),
            })
        })
        .collect();
    json!({ "products": products, "sales": sales })
}

/// Batches run in the background; poll until the wanted generation is displayed.
async fn insights_eventually(client: &reqwest::Client, base_url: &str, generation: u64) -> Value {
    for _ in 0..100 {
        let res = client.get(format!("{}/insights", base_url)).send().await.unwrap();
        if res.status() == StatusCode::OK {
            let body: Value = res.json().await.unwrap();
            if body["batch"]["generation"].as_u64() >= Some(generation) {
                return body;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("insight batch {generation} was not displayed within timeout");
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn insights_are_not_ready_before_first_batch() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/insights", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_ready");
}

#[tokio::test]
async fn replacing_dataset_runs_a_batch_with_tagged_fallbacks() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/dataset", srv.base_url))
        .json(&dataset(3))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let accepted: Value = res.json().await.unwrap();
    assert_eq!(accepted["generation"], 1);

    let body = insights_eventually(&client, &srv.base_url, 1).await;
    let batch = &body["batch"];
    assert_eq!(body["live"], false);

    assert_eq!(batch["prediction"]["source"], "live");
    assert_eq!(batch["prediction"]["value"], "Forecast from Total transactions: 3");

    assert_eq!(batch["analytics"]["source"], "fallback");
    assert_eq!(batch["analytics"]["reason"], "transport");
    assert_eq!(batch["analytics"]["value"]["recommendations"].as_array().unwrap().len(), 3);

    // Inventory fallback is recomputed from the uploaded products.
    let inventory = &batch["inventory"]["value"];
    assert_eq!(batch["inventory"]["source"], "fallback");
    let low: Vec<&str> = inventory["lowStock"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["productName"].as_str().unwrap())
        .collect();
    assert_eq!(low, vec!["Keyboard", "Mouse"]);
    assert_eq!(inventory["lowStock"][0]["recommendedStock"], 20);
    let top: Vec<&str> = inventory["topProducts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["productName"].as_str().unwrap())
        .collect();
    assert_eq!(top, vec!["Cable", "Monitor", "Keyboard", "Mouse"]);

    let summary: Value = client
        .get(format!("{}/dataset", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary, json!({ "products": 4, "sales": 3, "low_stock": 2 }));
}

#[tokio::test]
async fn manual_refresh_issues_new_generations() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .put(format!("{}/dataset", srv.base_url))
        .json(&dataset(1))
        .send()
        .await
        .unwrap();

    let first: Value = client
        .post(format!("{}/insights/refresh", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: Value = client
        .post(format!("{}/insights/refresh", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["generation"], 2);
    assert_eq!(second["generation"], 3);

    let body = insights_eventually(&client, &srv.base_url, 3).await;
    assert_eq!(body["batch"]["generation"], 3);
}

#[tokio::test]
async fn recommendation_endpoint_validates_and_answers() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/insights/recommendation", srv.base_url))
        .json(&json!({ "context": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/insights/recommendation", srv.base_url))
        .json(&json!({ "context": "weekday sales are slow" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["source"], "live");
    assert_eq!(body["value"], "1. Run a weekday promotion");
}

#[tokio::test]
async fn resending_identical_dataset_is_a_no_op() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let body = dataset(2);

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let res = client
            .put(format!("{}/dataset", srv.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        statuses.push(res.status());
    }
    assert_eq!(
        statuses,
        vec![StatusCode::ACCEPTED, StatusCode::NO_CONTENT, StatusCode::NO_CONTENT]
    );

    // The manual trigger still runs regardless.
    let refreshed: Value = client
        .post(format!("{}/insights/refresh", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(refreshed["generation"], 2);
}

#[tokio::test]
async fn stream_pushes_displayed_batches() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut stream = client
        .get(format!("{}/insights/stream", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(stream.status(), StatusCode::OK);
    assert!(
        stream.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );

    let accepted: Value = client
        .put(format!("{}/dataset", srv.base_url))
        .json(&dataset(2))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(accepted["generation"], 1);

    // Nothing is sent for the empty board; the first frame is the settled batch.
    let mut buf = String::new();
    let frame = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Some(end) = buf.find("\n\n") {
                return buf[..end].to_string();
            }
            let chunk = stream.chunk().await.unwrap().expect("stream closed early");
            buf.push_str(std::str::from_utf8(&chunk).unwrap());
        }
    })
    .await
    .expect("no insights.batch event within timeout");

    let mut lines = frame.lines();
    assert_eq!(lines.next(), Some("event: insights.batch"));
    let data = lines
        .next()
        .and_then(|l| l.strip_prefix("data: "))
        .expect("data line");
    let batch: Value = serde_json::from_str(data).unwrap();
    assert_eq!(batch["generation"], 1);
    assert_eq!(batch["prediction"]["value"], "Forecast from Total transactions: 2");
}
