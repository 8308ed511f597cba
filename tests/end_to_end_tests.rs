//! End-to-end tests for the suggest pipeline against a mock backend.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use menufind::{SearchConfig, SuggestState, SuggestionKind, connect};

fn config_for(server: &MockServer, debounce_ms: u64) -> SearchConfig {
    SearchConfig {
        base_url: server.uri(),
        debounce_ms,
        cache_ttl_ms: 30_000,
        page_limit: 10,
    }
}

/// Pump the client event loop until the condition holds or time runs out.
async fn pump_until(
    state: &mut SuggestState,
    mut cond: impl FnMut(&SuggestState) -> bool,
) -> bool {
    for _ in 0..300 {
        state.tick();
        if cond(state) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

async fn search_hits(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/search")
        .count()
}

#[tokio::test]
async fn keystroke_burst_issues_exactly_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "salad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"results": [
                {"type": "menu", "id": 1, "name": "Salad Buah", "slug": "salad-buah"}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut state = connect(&config_for(&server, 80));

    // Three keystrokes inside the debounce window.
    state.on_input_change("sal");
    tokio::time::sleep(Duration::from_millis(20)).await;
    state.tick();
    state.on_input_change("sala");
    tokio::time::sleep(Duration::from_millis(20)).await;
    state.tick();
    state.on_input_change("salad");

    let done = pump_until(&mut state, |state| !state.suggestions().is_empty()).await;
    assert!(done, "suggestions never arrived");
    assert_eq!(state.suggestions()[0].name, "Salad Buah");
    assert!(!state.is_loading());

    assert_eq!(search_hits(&server).await, 1);
}

#[tokio::test]
async fn repeat_query_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"results": [
                {"type": "restaurant", "id": 2, "name": "Salad House", "slug": "salad-house"}
            ]}
        })))
        .mount(&server)
        .await;

    let mut state = connect(&config_for(&server, 20));

    state.on_input_change("salad");
    assert!(pump_until(&mut state, |state| !state.suggestions().is_empty()).await);
    assert_eq!(search_hits(&server).await, 1);

    // Clearing empties the list without any network traffic.
    state.on_input_change("");
    assert!(state.suggestions().is_empty());

    // The repeat query (different case) is answered from cache.
    state.on_input_change("SALAD");
    assert!(pump_until(&mut state, |state| !state.suggestions().is_empty()).await);
    assert_eq!(state.suggestions()[0].name, "Salad House");
    assert_eq!(search_hits(&server).await, 1);
}

#[tokio::test]
async fn late_response_for_superseded_query_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "aaa"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "data": {"results": [
                        {"type": "menu", "id": 1, "name": "AAA", "slug": "aaa"}
                    ]}
                }))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "bbb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"results": [
                {"type": "menu", "id": 2, "name": "BBB", "slug": "bbb"}
            ]}
        })))
        .mount(&server)
        .await;

    let mut state = connect(&config_for(&server, 20));

    state.on_input_change("aaa");
    tokio::time::sleep(Duration::from_millis(40)).await;
    state.tick();

    state.on_input_change("bbb");
    assert!(pump_until(&mut state, |state| !state.suggestions().is_empty()).await);
    assert_eq!(state.suggestions()[0].name, "BBB");

    // Give the slow response every chance to land, then confirm it did not.
    tokio::time::sleep(Duration::from_millis(600)).await;
    state.tick();
    assert_eq!(state.suggestions().len(), 1);
    assert_eq!(state.suggestions()[0].name, "BBB");
}

#[tokio::test]
async fn missing_slug_is_enriched_without_a_new_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "warung"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"results": [
                {"type": "restaurant", "id": 7, "name": "Warung Sehat", "slug": null}
            ]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/restaurants/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 7, "slug": "warung-sehat", "rating": 4.5}
        })))
        .mount(&server)
        .await;

    let mut state = connect(&config_for(&server, 20));

    state.on_input_change("warung");
    assert!(pump_until(&mut state, |state| !state.suggestions().is_empty()).await);

    // The primary response is displayed with the slug still unknown.
    let first = &state.suggestions()[0];
    assert_eq!(first.kind, SuggestionKind::Restaurant);
    assert_eq!(first.name, "Warung Sehat");

    // The lookup patches the same list in place.
    let enriched = pump_until(&mut state, |state| {
        state.suggestions()[0].slug == "warung-sehat"
    })
    .await;
    assert!(enriched, "slug never enriched");
    assert_eq!(state.suggestions()[0].rating, Some(4.5));

    assert_eq!(search_hits(&server).await, 1);
}

#[tokio::test]
async fn server_error_leaves_retryable_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let mut state = connect(&config_for(&server, 20));

    state.on_input_change("salad");
    assert!(pump_until(&mut state, |state| state.error().is_some()).await);
    assert!(state.suggestions().is_empty());
    assert!(!state.is_loading());

    // The failed key was not cached; retrying goes back to the network.
    state.on_input_change("salad");
    let mut retried = false;
    for _ in 0..300 {
        state.tick();
        if state.error().is_some() && search_hits(&server).await == 2 {
            retried = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(retried, "retry never reached the backend");
}
