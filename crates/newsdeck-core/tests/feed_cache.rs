//! End-to-end behavior of the cached fetcher against a mock provider.

use newsdeck_core::{DEFAULT_TTL, Fetcher, Lookup, ResponseCache, Subscription};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn subscription(cache: &ResponseCache) -> Subscription {
    Subscription::new(
        cache.clone(),
        Arc::new(Fetcher::new().expect("client should build")),
    )
}

async fn requests_served(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map_or(0, |requests| requests.len())
}

#[tokio::test]
async fn fresh_cache_hit_skips_network_and_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"n": 1})))
        .expect(1)
        .mount(&server)
        .await;
    let url = format!("{}/feed", server.uri());
    let cache = ResponseCache::new();

    let first = subscription(&cache);
    first.set_url(Some(url.clone()));
    let state = first.settled().await;
    assert_eq!(state.data, Some(json!({"n": 1})));

    // A second subscription to the same URL within the TTL settles
    // synchronously from cache: loading never becomes true and no second
    // request is issued.
    let second = subscription(&cache);
    second.set_url(Some(url));
    let state = second.state();
    assert!(!state.loading);
    assert_eq!(state.data, Some(json!({"n": 1})));
    assert_eq!(state.error, None);

    assert_eq!(requests_served(&server).await, 1);
}

#[tokio::test]
async fn ttl_expiry_triggers_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"n": 2})))
        .expect(2)
        .mount(&server)
        .await;
    let url = format!("{}/feed", server.uri());
    let cache = ResponseCache::new();

    let sub = subscription(&cache).with_ttl(Duration::from_millis(50));
    sub.set_url(Some(url.clone()));
    sub.settled().await;
    assert_eq!(requests_served(&server).await, 1);

    tokio::time::sleep(Duration::from_millis(80)).await;

    sub.set_url(Some(url));
    let state = sub.settled().await;
    assert_eq!(state.data, Some(json!({"n": 2})));
    assert_eq!(requests_served(&server).await, 2);
}

#[tokio::test]
async fn stale_payload_survives_failed_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"v": "orig"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let url = format!("{}/feed", server.uri());
    let cache = ResponseCache::new();

    let sub = subscription(&cache).with_ttl(Duration::from_millis(30));
    sub.set_url(Some(url.clone()));
    sub.settled().await;

    tokio::time::sleep(Duration::from_millis(50)).await;

    // The entry is now expired; the refresh fails, so the stale payload is
    // surfaced and the error suppressed.
    sub.set_url(Some(url));
    let state = sub.settled().await;
    assert_eq!(state.data, Some(json!({"v": "orig"})));
    assert_eq!(state.error, None);
    assert!(!state.loading);
}

#[tokio::test]
async fn rate_limit_surfaces_error_when_no_fallback_exists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    let cache = ResponseCache::new();

    let sub = subscription(&cache);
    sub.set_url(Some(format!("{}/feed", server.uri())));
    let state = sub.settled().await;

    assert_eq!(state.data, None);
    let message = state.error.expect("error should surface without fallback");
    assert!(message.contains("too many requests"));
}

#[tokio::test]
async fn late_response_for_superseded_url_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"which": "a"}))
                .set_delay(Duration::from_millis(250)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"which": "b"})))
        .mount(&server)
        .await;
    let url_a = format!("{}/a", server.uri());
    let url_b = format!("{}/b", server.uri());
    let cache = ResponseCache::new();

    let sub = subscription(&cache);
    sub.set_url(Some(url_a.clone()));
    sub.set_url(Some(url_b));

    let state = sub.settled().await;
    assert_eq!(state.data, Some(json!({"which": "b"})));

    // Let A's slow response arrive; it must neither clobber the state nor
    // be written into the cache.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(sub.state().data, Some(json!({"which": "b"})));
    assert_eq!(sub.state().error, None);
    assert_eq!(cache.lookup(&url_a, DEFAULT_TTL), Lookup::Miss);
}

#[tokio::test]
async fn previous_data_is_retained_while_refreshing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rev": 1})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"rev": 2}))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;
    let url = format!("{}/feed", server.uri());
    let cache = ResponseCache::new();

    let sub = subscription(&cache).with_ttl(Duration::from_millis(30));
    sub.set_url(Some(url.clone()));
    sub.settled().await;

    tokio::time::sleep(Duration::from_millis(50)).await;

    sub.set_url(Some(url));
    let state = sub.state();
    assert!(state.loading);
    // No loading flicker to empty: the old payload stays visible.
    assert_eq!(state.data, Some(json!({"rev": 1})));
    assert_eq!(state.error, None);

    let state = sub.settled().await;
    assert_eq!(state.data, Some(json!({"rev": 2})));
}

#[tokio::test]
async fn not_found_is_not_cached_and_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"back": true})))
        .mount(&server)
        .await;
    let url = format!("{}/feed", server.uri());
    let cache = ResponseCache::new();

    let sub = subscription(&cache);
    sub.set_url(Some(url.clone()));
    let state = sub.settled().await;
    assert_eq!(state.error.as_deref(), Some("resource not found"));
    assert_eq!(state.data, None);

    // Errors are never cached; an identical later request retries and
    // succeeds unconditionally.
    sub.set_url(Some(url));
    let state = sub.settled().await;
    assert_eq!(state.data, Some(json!({"back": true})));
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn quota_exhaustion_has_its_own_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let cache = ResponseCache::new();

    let sub = subscription(&cache);
    sub.set_url(Some(format!("{}/feed", server.uri())));
    let state = sub.settled().await;

    let message = state.error.expect("quota error should surface");
    assert!(message.contains("daily"));
}

#[tokio::test]
async fn shared_cache_deduplicates_across_subscriptions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shared": true})))
        .expect(1)
        .mount(&server)
        .await;
    let url = format!("{}/feed", server.uri());
    let cache = ResponseCache::new();

    let first = subscription(&cache);
    first.set_url(Some(url.clone()));
    first.settled().await;

    // Navigating away and back re-resolves from the shared cache.
    first.set_url(None);
    first.set_url(Some(url.clone()));
    assert_eq!(first.state().data, Some(json!({"shared": true})));

    let second = subscription(&cache);
    second.set_url(Some(url));
    assert_eq!(second.state().data, Some(json!({"shared": true})));

    assert_eq!(requests_served(&server).await, 1);
}
