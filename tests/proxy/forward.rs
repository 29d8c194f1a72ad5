use std::time::Duration;

use beluga::proxy::forward::upstream_url;
use beluga::{BelugaClient, Upstream};
use httpmock::Method::GET;
use serde_json::Value;
use url::Url;

use crate::common::{
    COINGECKO_KEY, GNEWS_KEY, base, client_builder, client_for, setup_server, spawn_proxy,
};

#[tokio::test]
async fn health_answers_ok() {
    let server = setup_server();
    let proxy = spawn_proxy(client_for(&server)).await;

    let resp = reqwest::get(format!("{proxy}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn coingecko_passthrough_injects_key_and_drops_callers() {
    let server = setup_server();
    let good = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v3/simple/price")
            .header("x-cg-demo-api-key", COINGECKO_KEY)
            .query_param("ids", "bitcoin")
            .query_param("vs_currencies", "usd");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"bitcoin":{"usd":67000}}"#);
    });
    let smuggled = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v3/simple/price")
            .query_param("x_cg_demo_api_key", "evil");
        then.status(418);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let resp = reqwest::get(format!(
        "{proxy}/api/coingecko/simple/price?ids=bitcoin&vs_currencies=usd&x_cg_demo_api_key=evil"
    ))
    .await
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["x-beluga-cache"], "miss");
    assert!(
        resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["bitcoin"]["usd"], 67000);

    good.assert();
    assert_eq!(smuggled.hits(), 0);
}

#[tokio::test]
async fn gnews_passthrough_replaces_caller_apikey() {
    let server = setup_server();
    let good = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/search")
            .query_param("q", "btc")
            .query_param("apikey", GNEWS_KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"totalArticles":0,"articles":[]}"#);
    });
    let smuggled = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/search")
            .query_param("apikey", "evil");
        then.status(418);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let resp = reqwest::get(format!("{proxy}/api/gnews/search?q=btc&APIKEY=evil"))
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    good.assert();
    assert_eq!(smuggled.hits(), 0);
}

#[tokio::test]
async fn upstream_failures_are_relayed_with_status_and_details() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/markets");
        then.status(429)
            .header("content-type", "application/json")
            .body(r#"{"status":{"error_code":429,"error_message":"slow down"}}"#);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let resp = reqwest::get(format!("{proxy}/api/coingecko/coins/markets?vs_currency=usd"))
        .await
        .unwrap();

    assert_eq!(resp.status(), 429);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "CoinGecko request failed");
    assert_eq!(body["status"], 429);
    assert_eq!(body["details"]["status"]["error_message"], "slow down");
}

#[tokio::test]
async fn non_json_error_bodies_are_kept_as_text() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/latest/dex/pairs/solana/nope");
        then.status(404).body("no such pair");
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let resp = reqwest::get(format!("{proxy}/api/dexscreener/latest/dex/pairs/solana/nope"))
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["details"], "no such pair");
}

#[tokio::test]
async fn missing_key_is_a_server_side_error() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v4/search");
        then.status(200).body("{}");
    });

    let client = BelugaClient::builder()
        .base_url(Upstream::GNews, base(&server, "/api/v4/"))
        .build()
        .unwrap();
    let proxy = spawn_proxy(client).await;

    let resp = reqwest::get(format!("{proxy}/api/gnews/search?q=btc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "GNews API key is not configured");
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn repeated_passthrough_is_served_from_cache() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v3/global");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":{"active_cryptocurrencies":1}}"#);
    });

    let client = client_builder(&server)
        .cache_ttl(Duration::from_secs(60))
        .build()
        .unwrap();
    let proxy = spawn_proxy(client).await;

    let first = reqwest::get(format!("{proxy}/api/coingecko/global")).await.unwrap();
    assert_eq!(first.status(), 200);
    assert_eq!(first.headers()["x-beluga-cache"], "miss");
    let first_body = first.text().await.unwrap();

    let second = reqwest::get(format!("{proxy}/api/coingecko/global")).await.unwrap();
    assert_eq!(second.status(), 200);
    assert_eq!(second.headers()["x-beluga-cache"], "hit");
    assert_eq!(second.text().await.unwrap(), first_body);

    assert_eq!(mock.hits(), 1);
}

#[tokio::test]
async fn sanity_passthrough_injects_bearer_token() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2024-01-01/data/query/production")
            .header("authorization", "Bearer sanity-read-token")
            .query_param("query", r#"*[_type == "article"][0]"#);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"result":{"title":"Hello"}}"#);
    });

    let client = client_builder(&server)
        .api_key(Upstream::Sanity, "sanity-read-token")
        .build()
        .unwrap();
    let proxy = spawn_proxy(client).await;

    let resp = reqwest::get(format!(
        "{proxy}/api/sanity/v2024-01-01/data/query/production?query=*%5B_type%20%3D%3D%20%22article%22%5D%5B0%5D"
    ))
    .await
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["result"]["title"], "Hello");
    mock.assert();
}

#[test]
fn upstream_url_appends_segments_under_the_base() {
    let base = Url::parse("https://api.coingecko.com/api/v3/").unwrap();

    let url = upstream_url(&base, "coins/bitcoin/market_chart", Some("days=7&vs_currency=usd")).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.coingecko.com/api/v3/coins/bitcoin/market_chart?days=7&vs_currency=usd"
    );

    let url = upstream_url(&base, "global", None).unwrap();
    assert_eq!(url.as_str(), "https://api.coingecko.com/api/v3/global");
}

#[test]
fn upstream_url_rejects_traversal_and_empty_segments() {
    let base = Url::parse("https://api.coingecko.com/api/v3/").unwrap();

    for bad in ["..", "coins/../../admin", "./global", "coins//markets", ""] {
        assert!(upstream_url(&base, bad, None).is_err(), "{bad:?} was accepted");
    }
}

#[test]
fn upstream_url_strips_credential_params_only() {
    let base = Url::parse("https://gnews.io/api/v4/").unwrap();

    let url = upstream_url(&base, "search", Some("q=eth&apikey=evil&x_cg_pro_api_key=x")).unwrap();
    assert_eq!(url.as_str(), "https://gnews.io/api/v4/search?q=eth");

    let url = upstream_url(&base, "search", Some("apikey=evil")).unwrap();
    assert_eq!(url.query(), None);
}

#[test]
fn upstream_url_keeps_the_query_as_written() {
    let base = Url::parse("https://gnews.io/api/v4/").unwrap();

    let url = upstream_url(&base, "search", Some("flag&query=a%20b&x=1")).unwrap();
    assert_eq!(url.query(), Some("flag&query=a%20b&x=1"));

    let url = upstream_url(&base, "search", Some("q=btc&API%4BEY=evil&x_cg_demo_api_key")).unwrap();
    assert_eq!(url.query(), Some("q=btc"));
}

#[test]
fn encoded_query_values_survive_reencoding() {
    let base = Url::parse("https://api.dexscreener.com/").unwrap();
    let url = upstream_url(&base, "latest/dex/search", Some("q=SOL%2FUSDC")).unwrap();

    assert_eq!(url.host_str(), Some("api.dexscreener.com"));
    let q: Vec<_> = url.query_pairs().collect();
    assert_eq!(q[0].1, "SOL/USDC");
}
