use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use torrentapi::{Client, Config, Error, ListQuery, Query, SearchQuery, Sort, DEFAULT_APP_ID};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "hx6ftq2yob";
const ENDPOINT: &str = "/pubapi_v2.php";
const INTERVAL: Duration = Duration::from_millis(50);

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn test_config(server: &MockServer) -> Config {
    Config::default()
        .with_base_url(&format!("{}{}", server.uri(), ENDPOINT))
        .with_min_interval(INTERVAL)
}

fn test_client(server: &MockServer) -> Client {
    Client::from_config(test_config(server)).unwrap()
}

async fn mount_token(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("get_token", "get_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN })))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_mode(server: &MockServer, mode: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("mode", mode))
        .and(query_param("token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_then_search_end_to_end() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("mode", "list"))
        .and(query_param("token", TOKEN))
        .and(query_param("min_seeders", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "torrent_results": [{ "filename": "a", "download": "magnet:a" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("mode", "search"))
        .and(query_param("token", TOKEN))
        .and(query_param("search_string", "Rogue One"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "No results found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);

    let torrents = client
        .list(&ListQuery::default().with_min_seeders(50))
        .await
        .unwrap();
    assert_eq!(torrents.len(), 1);
    assert_eq!(torrents[0].filename(), Some("a"));
    assert_eq!(torrents[0].download(), Some("magnet:a"));
    assert_eq!(client.token().await.as_deref(), Some(TOKEN));

    let torrents = client
        .search(&SearchQuery::default().with_string("Rogue One"))
        .await
        .unwrap();
    assert!(torrents.is_empty());
}

#[tokio::test]
async fn search_without_identifier_sends_nothing() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let query = SearchQuery::default()
        .with_categories(&[45, 46])
        .with_sort(Sort::Last);
    let err = client.search(&query).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(client.token().await.is_none());
    assert!(client.last_request_at().await.is_none());
}

#[tokio::test]
async fn token_is_reused_within_window() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_mode(&server, "list", &load_fixture("list.json"), 2).await;

    let client = test_client(&server);
    let first = client.list(&ListQuery::default()).await.unwrap();
    let obtained = client.token_obtained_at().await.unwrap();
    let second = client.list(&ListQuery::default()).await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(client.token_obtained_at().await, Some(obtained));
}

#[tokio::test]
async fn token_is_renewed_after_window() {
    let server = MockServer::start().await;
    mount_token(&server, 2).await;
    mount_mode(&server, "list", "{}", 2).await;

    let client =
        Client::from_config(test_config(&server).with_token_ttl(Duration::from_millis(200)))
            .unwrap();

    client.list(&ListQuery::default()).await.unwrap();
    let first = client.token_obtained_at().await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    client.list(&ListQuery::default()).await.unwrap();
    let second = client.token_obtained_at().await.unwrap();

    assert!(second > first);
}

#[tokio::test]
async fn force_token_ignores_expiry() {
    let server = MockServer::start().await;
    mount_token(&server, 2).await;
    mount_mode(&server, "list", "{}", 1).await;

    let client = test_client(&server);
    client.list(&ListQuery::default()).await.unwrap();
    let token = client.force_token().await.unwrap();
    assert_eq!(token, TOKEN);
}

#[tokio::test]
async fn requests_are_spaced_by_min_interval() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_mode(&server, "list", "{}", 2).await;

    let interval = Duration::from_millis(200);
    let client = Client::from_config(test_config(&server).with_min_interval(interval)).unwrap();

    let start = Instant::now();
    client.list(&ListQuery::default()).await.unwrap();
    assert!(start.elapsed() >= interval);

    let token_at = client.token_obtained_at().await.unwrap();
    let last_at = client.last_request_at().await.unwrap();
    assert!(last_at > token_at);

    client.list(&ListQuery::default()).await.unwrap();
    assert!(start.elapsed() >= interval * 2);
}

#[tokio::test]
async fn concurrent_callers_share_one_token() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_mode(&server, "list", "{}", 3).await;

    let client = Arc::new(test_client(&server));
    let query = ListQuery::default();
    let start = Instant::now();
    let (a, b, c) = tokio::join!(client.list(&query), client.list(&query), client.list(&query));
    a.unwrap();
    b.unwrap();
    c.unwrap();

    // Four requests, three gaps.
    assert!(start.elapsed() >= INTERVAL * 3);
}

#[tokio::test]
async fn http_failure_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.list(&ListQuery::default()).await.unwrap_err();

    assert!(matches!(err, Error::Request { status: 500, .. }));
    assert_eq!(err.to_string(), "Internal Server Error (500)");
    assert!(client.token().await.is_none());
    // The failed token request still counts against the rate limit.
    assert!(client.last_request_at().await.is_some());
}

#[tokio::test]
async fn search_failure_is_request_error() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(query_param("mode", "search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .search(&SearchQuery::default().with_string("Rogue One"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Service Unavailable (503)");
}

#[tokio::test]
async fn api_error_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_mode(&server, "search", &load_fixture("invalid_sort.json"), 1).await;

    let client = test_client(&server);
    let err = client
        .search(&SearchQuery::default().with_string("Rogue One"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid sort");
    assert!(matches!(err, Error::Api { code: Some(9), .. }));
}

#[tokio::test]
async fn invalid_filter_value_is_api_error() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_mode(
        &server,
        "list",
        r#"{"error":"Invalid value for min_seeders","error_code":8}"#,
        1,
    )
    .await;

    let client = test_client(&server);
    let err = client.list(&ListQuery::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for min_seeders");
}

#[tokio::test]
async fn unknown_id_is_empty_result() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_mode(&server, "search", &load_fixture("imdb_not_found.json"), 1).await;

    let client = test_client(&server);
    let torrents = client
        .search(&SearchQuery::default().with_imdb("999999999"))
        .await
        .unwrap();
    assert!(torrents.is_empty());
}

#[tokio::test]
async fn custom_no_results_pattern() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_mode(&server, "list", r#"{"error":"Nothing matched your filters"}"#, 1).await;

    let config = test_config(&server).with_no_results_pattern("(?i)^nothing matched");
    let client = Client::from_config(config).unwrap();
    assert!(client.list(&ListQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn normalized_parameters_on_the_wire() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("mode", "search"))
        .and(query_param("search_imdb", "tt3748528"))
        .and(query_param("category", "45;46"))
        .and(query_param("ranked", "0"))
        .and(query_param("sort", "leechers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("list.json")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = SearchQuery::default()
        .with_imdb("3748528")
        .with_categories(&[45, 46])
        .with_ranked(false)
        .with_sort(Sort::Leechers);
    assert_eq!(client.search(&query).await.unwrap().len(), 2);
}

#[tokio::test]
async fn caller_mode_and_token_are_overridden() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_mode(&server, "list", "{}", 1).await;

    let client = test_client(&server);
    let query = ListQuery::from_json(&json!({
        "mode": "search",
        "token": "stale",
        "min_seeders": null
    }))
    .unwrap();
    client.list(&query).await.unwrap();
}

#[tokio::test]
async fn app_id_and_user_agent_are_sent() {
    let server = MockServer::start().await;
    let user_agent = format!("{}/{}", DEFAULT_APP_ID, env!("CARGO_PKG_VERSION"));
    Mock::given(method("GET"))
        .and(query_param("app_id", DEFAULT_APP_ID))
        .and(query_param("get_token", "get_token"))
        .and(header("user-agent", user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("token.json")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert_eq!(client.force_token().await.unwrap(), TOKEN);
}

#[tokio::test]
async fn custom_app_id_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("app_id", "my-indexer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::from_config(test_config(&server).with_app_id("my-indexer")).unwrap();
    client.force_token().await.unwrap();
}

#[tokio::test]
async fn token_response_without_token_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.force_token().await.unwrap_err();
    assert!(matches!(err, Error::ParseFailed(_)));
    assert!(client.token().await.is_none());
}

#[tokio::test]
async fn token_response_with_error_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Invalid app_id" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.list(&ListQuery::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid app_id");
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_mode(&server, "list", "{not valid json}", 1).await;

    let client = test_client(&server);
    let err = client.list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, Error::ParseFailed(_)));
}

#[tokio::test]
async fn timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": TOKEN }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = test_config(&server).with_timeout(Duration::from_millis(100));
    let client = Client::from_config(config).unwrap();
    let err = client.list(&ListQuery::default()).await.unwrap_err();

    assert!(err.is_transport());
    assert!(err.is_timeout());
    assert!(client.token().await.is_none());
    assert!(client.last_request_at().await.is_some());
}

#[tokio::test]
async fn cancelled_call_still_spaces_next_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("get_token", "get_token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": TOKEN }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let interval = Duration::from_millis(500);
    let client = Client::from_config(test_config(&server).with_min_interval(interval)).unwrap();
    let cancelled =
        tokio::time::timeout(Duration::from_millis(100), client.list(&ListQuery::default())).await;
    assert!(cancelled.is_err());
    assert!(client.last_request_at().await.is_some());

    let start = Instant::now();
    client.force_token().await.unwrap();
    // Full interval after the cancelled request, then the response delay.
    assert!(start.elapsed() >= Duration::from_millis(750));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let client = Client::from_config(
        Config::default()
            .with_base_url("http://127.0.0.1:1/pubapi_v2.php")
            .with_min_interval(INTERVAL),
    )
    .unwrap();
    let err = client.force_token().await.unwrap_err();
    assert!(err.is_transport());
    assert!(!err.is_timeout());
}
