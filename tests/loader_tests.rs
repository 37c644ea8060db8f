//! Loader behavior against a mock backend: bounded retry, partial failure,
//! cancellation.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carteira::api::ApiClient;
use carteira::config::RetryPolicy;
use carteira::portfolio::cancel::CancelToken;
use carteira::portfolio::loader::{LoadError, PortfolioLoader};

use common::{asset, detail, summary};

fn client_for(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&server.uri()).unwrap())
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        delay: Duration::from_millis(100),
    }
}

#[tokio::test]
async fn retry_cap_is_respected() {
    let server = MockServer::start().await;

    // Every list fetch fails: one initial attempt plus exactly three
    // retries, never a fifth request.
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    let loader = PortfolioLoader::with_policy(client_for(&server), CancelToken::new(), fast_policy());

    let start = Instant::now();
    let err = loader.load().await.unwrap_err();
    let elapsed = start.elapsed();

    match err {
        LoadError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 4),
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    // Three flat delays must have passed between the four attempts
    assert!(
        elapsed >= Duration::from_millis(300),
        "retries were not spaced: {elapsed:?}"
    );
}

#[tokio::test]
async fn manual_retry_restarts_from_attempt_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(8)
        .mount(&server)
        .await;

    let loader = PortfolioLoader::with_policy(client_for(&server), CancelToken::new(), fast_policy());

    // Two full load() calls == two full retry sequences of four attempts each
    for _ in 0..2 {
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::RetriesExhausted { attempts: 4, .. }));
    }
}

#[tokio::test]
async fn transient_failure_recovers_within_the_cap() {
    let server = MockServer::start().await;

    // First two attempts fail, the third succeeds
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([summary(1, "Dividendos")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail(
            1,
            "Dividendos",
            vec![asset(10, 1, "PETR4", "100", "30.00")],
        )))
        .mount(&server)
        .await;

    let loader = PortfolioLoader::with_policy(client_for(&server), CancelToken::new(), fast_policy());

    let portfolios = loader.load().await.unwrap();
    assert_eq!(portfolios.len(), 1);
    assert_eq!(portfolios[0].assets.len(), 1);
    assert_eq!(portfolios[0].assets[0].symbol, "PETR4");
}

#[tokio::test]
async fn failed_detail_keeps_summary_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            summary(1, "Ações"),
            summary(2, "FIIs"),
            summary(3, "Renda Fixa"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail(
            1,
            "Ações",
            vec![asset(10, 1, "PETR4", "100", "30.00")],
        )))
        .mount(&server)
        .await;
    // Portfolio 2's detail endpoint is broken
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail(
            3,
            "Renda Fixa",
            vec![asset(11, 3, "TESOURO", "5", "1000.00")],
        )))
        .mount(&server)
        .await;

    let loader = PortfolioLoader::new(client_for(&server), CancelToken::new());

    // One failing carteira does not abort the batch
    let portfolios = loader.load().await.unwrap();
    assert_eq!(portfolios.len(), 3);
    assert_eq!(portfolios[0].assets.len(), 1);
    assert!(portfolios[1].assets.is_empty());
    assert_eq!(portfolios[1].name, "FIIs");
    assert_eq!(portfolios[2].assets.len(), 1);
}

#[tokio::test]
async fn cancelled_token_short_circuits_the_load() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancelToken::new();
    cancel.cancel();
    let loader = PortfolioLoader::new(client_for(&server), cancel);

    let err = loader.load().await.unwrap_err();
    assert!(matches!(err, LoadError::Cancelled));
}

#[tokio::test]
async fn cancellation_during_retry_window_stops_retrying() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/portfolios/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let cancel = CancelToken::new();
    let loader = PortfolioLoader::with_policy(
        client_for(&server),
        cancel.clone(),
        RetryPolicy {
            max_retries: 3,
            delay: Duration::from_millis(200),
        },
    );

    let load = tokio::spawn(async move { loader.load().await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    let err = load.await.unwrap().unwrap_err();
    assert!(matches!(err, LoadError::Cancelled));
}
