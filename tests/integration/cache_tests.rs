//! Cache refresh cycles over a live mock HTTP server

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudvisor_rs::config::CarbonSettings;
use cloudvisor_rs::services::cache::{
    CacheConfig, CacheRegistry, EndpointFetcher, ExternalDataCache, FileSnapshotStore,
    HttpEndpointFetcher, RefreshOutcome, SnapshotStore,
};
use cloudvisor_rs::services::carbon::{CarbonIntensityService, Granularity};

fn cache_over(
    server: &MockServer,
    store: Arc<dyn SnapshotStore>,
    paths: &[&str],
    ttl: Duration,
) -> ExternalDataCache {
    let endpoints = paths
        .iter()
        .map(|p| format!("{}{}", server.uri(), p))
        .collect();
    let fetcher: Arc<dyn EndpointFetcher> = Arc::new(HttpEndpointFetcher::new().unwrap());
    ExternalDataCache::new(CacheConfig::new("grid", endpoints, ttl), store, fetcher)
}

#[tokio::test]
async fn test_refresh_fetches_and_persists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"zone": "FR", "carbonIntensity": 56.0})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"zone": "DE", "carbonIntensity": 380.0})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSnapshotStore::new(dir.path()));
    let cache = cache_over(&server, store.clone(), &["/a", "/b"], Duration::from_secs(3600));

    cache.refresh().await.unwrap();

    let snapshot = cache.get_results().await.unwrap();
    assert_eq!(snapshot.entries.len(), 2);
    assert_eq!(snapshot.payloads().count(), 2);
    assert!(snapshot.expires_at.is_some());

    // A second instance over the same store reuses the persisted snapshot
    // within the TTL; the expect(1) mocks verify no further fetches happen.
    let restarted = cache_over(&server, store, &["/a", "/b"], Duration::from_secs(3600));
    let mut events = restarted.subscribe();
    restarted.refresh().await.unwrap();
    assert_eq!(
        events.recv().await.unwrap().outcome,
        RefreshOutcome::ReusedPersistent
    );
    assert_eq!(restarted.get_results().await.unwrap().entries.len(), 2);
}

#[tokio::test]
async fn test_refresh_tolerates_endpoint_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"zone": "SE", "carbonIntensity": 25.0})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSnapshotStore::new(dir.path()));
    let cache = cache_over(
        &server,
        store,
        &["/good", "/broken"],
        Duration::from_secs(3600),
    );
    let mut events = cache.subscribe();

    cache.refresh().await.unwrap();

    let snapshot = cache.get_results().await.unwrap();
    assert_eq!(snapshot.entries.len(), 2);
    // The failing endpoint contributes an in-band error entry.
    assert_eq!(snapshot.payloads().count(), 1);
    let broken_key = format!("{}/broken", server.uri());
    assert!(snapshot.entries[&broken_key].is_failure());

    let event = events.recv().await.unwrap();
    assert_eq!(event.outcome, RefreshOutcome::Fetched);
    assert_eq!(event.sources, 2);
    assert_eq!(event.failures, 1);
}

#[tokio::test]
async fn test_start_prewarms_and_schedules() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ready": true})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSnapshotStore::new(dir.path()));
    let cache = Arc::new(cache_over(
        &server,
        store,
        &["/data"],
        Duration::from_secs(3600),
    ));
    let mut events = cache.subscribe();

    Arc::clone(&cache).start().await;

    // The pre-warm cycle completes before start() returns.
    assert_eq!(events.recv().await.unwrap().outcome, RefreshOutcome::Fetched);
    assert!(!cache.get_results().await.unwrap().is_empty());

    cache.stop();
}

#[tokio::test]
async fn test_carbon_service_fetches_with_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/carbon-intensity/latest"))
        .and(query_param("zone", "FR"))
        .and(query_param("temporalGranularity", "monthly"))
        .and(header("auth-token", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "zone": "FR",
            "carbonIntensity": 56.0,
            "datetime": "2026-03-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let settings = CarbonSettings {
        api_base: server.uri(),
        api_key: Some("secret-key".to_string()),
        zones: vec!["FR".to_string()],
        hourly_ttl_secs: 3600,
        monthly_ttl_secs: 86400,
    };
    let registry = CacheRegistry::new();
    let service = CarbonIntensityService::new(
        &settings,
        &registry,
        Arc::new(FileSnapshotStore::new(dir.path())),
    )
    .unwrap();

    service.cache(Granularity::Monthly).refresh().await.unwrap();

    let intensities = service.intensities(Granularity::Monthly).await.unwrap();
    assert_eq!(intensities.get("FR"), Some(&56.0));
}
