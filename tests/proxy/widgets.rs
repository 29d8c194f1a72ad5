use beluga::ServerConfig;
use httpmock::Method::GET;
use serde_json::Value;

use crate::common::{client_for, fixture, setup_server, spawn_proxy, spawn_proxy_with};

const FALLBACK: &str = "x-beluga-fallback";

async fn get_json(url: String) -> (u16, bool, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    let fallback = resp.headers().get(FALLBACK).is_some_and(|v| v == "true");
    (status, fallback, resp.json().await.unwrap())
}

fn ids(rows: &Value) -> Vec<&str> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn markets_serves_live_rows_filtered_and_sorted() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v3/coins/markets")
            .query_param("per_page", "50");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("coingecko_markets.json"));
    });

    let proxy = spawn_proxy(client_for(&server)).await;

    let (status, fallback, rows) =
        get_json(format!("{proxy}/api/markets?per_page=50&sort=price&order=asc")).await;
    assert_eq!(status, 200);
    assert!(!fallback);
    assert_eq!(ids(&rows), ["ethereum", "bitcoin"]);

    let (_, _, rows) = get_json(format!("{proxy}/api/markets?per_page=50&q=btc")).await;
    assert_eq!(ids(&rows), ["bitcoin"]);
}

#[tokio::test]
async fn markets_falls_back_to_demo_rows() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/markets");
        then.status(503);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let (status, fallback, rows) =
        get_json(format!("{proxy}/api/markets?sort=change_24h&order=desc")).await;

    assert_eq!(status, 200);
    assert!(fallback);
    let rows = ids(&rows);
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0], "dogecoin");
}

#[tokio::test]
async fn markets_rejects_unknown_sort_key() {
    let server = setup_server();
    let proxy = spawn_proxy(client_for(&server)).await;

    let (status, _, body) = get_json(format!("{proxy}/api/markets?sort=hype")).await;
    assert_eq!(status, 400);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("hype"));
}

#[tokio::test]
async fn heatmap_limits_tiles() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/markets");
        then.status(500);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let (status, fallback, tiles) = get_json(format!("{proxy}/api/heatmap?limit=3")).await;

    assert_eq!(status, 200);
    assert!(fallback);
    let tiles = tiles.as_array().unwrap();
    assert_eq!(tiles.len(), 3);
    assert_eq!(tiles[0]["symbol"], "BTC");
    assert_eq!(tiles[0]["heat"], "up");
}

#[tokio::test]
async fn news_uses_live_articles_when_available() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/search")
            .query_param("q", "crypto");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("gnews_search.json"));
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let (status, fallback, news) = get_json(format!("{proxy}/api/news")).await;

    assert_eq!(status, 200);
    assert!(!fallback);
    assert_eq!(news.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn news_with_no_results_serves_demo_headlines() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v4/search");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"totalArticles":0,"articles":[]}"#);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let (_, fallback, news) = get_json(format!("{proxy}/api/news?q=nothing")).await;

    assert!(fallback);
    assert_eq!(news.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn transactions_use_configured_demo_token() {
    let server = setup_server();
    let moralis = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2.2/erc20/0xfeed/transfers")
            .query_param("chain", "bsc");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("moralis_transfers.json"));
    });

    let config = ServerConfig::from_lookup(|key| match key {
        "BELUGA_DEMO_TOKEN" => Some("0xfeed".into()),
        "BELUGA_DEMO_CHAIN" => Some("bsc".into()),
        _ => None,
    })
    .unwrap();
    let proxy = spawn_proxy_with(client_for(&server), config).await;

    let (status, fallback, rows) = get_json(format!("{proxy}/api/transactions?price=2")).await;

    moralis.assert();
    assert_eq!(status, 200);
    assert!(!fallback);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows[0]["hash"], "0x2222");
    assert_eq!(rows[0]["side"], "transfer");
    assert_eq!(rows[1]["usd_amount"], 5.0);
}

#[tokio::test]
async fn transactions_without_sources_are_demo_and_filterable() {
    let server = setup_server();
    let proxy = spawn_proxy(client_for(&server)).await;

    let (status, fallback, rows) =
        get_json(format!("{proxy}/api/transactions?limit=30&side=buy&min_usd=100")).await;

    assert_eq!(status, 200);
    assert!(fallback);
    let rows = rows.as_array().unwrap();
    assert!(rows.len() <= 30);
    for r in rows {
        assert_eq!(r["side"], "buy");
        assert_eq!(r["source"], "demo");
        assert!(r["usd_amount"].as_f64().unwrap() >= 100.0);
    }

    let (status, _, _) = get_json(format!("{proxy}/api/transactions?side=sideways")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn articles_fall_back_per_category() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v2024-01-01/data/query/production");
        then.status(502);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let (status, fallback, rows) = get_json(format!("{proxy}/api/articles?category=academy")).await;

    assert_eq!(status, 200);
    assert!(fallback);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|a| a["category"] == "academy"));

    let (status, _, _) = get_json(format!("{proxy}/api/articles?category=blog")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn article_by_slug_is_404_when_missing() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v2024-01-01/data/query/production");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"result":null}"#);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let (status, _, body) = get_json(format!("{proxy}/api/articles/no-such-post")).await;

    assert_eq!(status, 404);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn article_upstream_error_keeps_its_status() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v2024-01-01/data/query/production");
        then.status(503);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let (status, _, _) = get_json(format!("{proxy}/api/articles/some-post")).await;
    assert_eq!(status, 503);
}

#[tokio::test]
async fn ticker_combines_prices_with_global_totals() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v3/simple/price")
            .query_param("ids", "ethereum,bitcoin");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"bitcoin":{"usd":67250.0,"usd_24h_change":1.85},"ethereum":{"usd":3480.0,"usd_24h_change":-0.5}}"#);
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/global");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":{"total_market_cap":{"usd":2.5e12},"market_cap_percentage":{"btc":52.0}}}"#);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let (status, fallback, body) = get_json(format!("{proxy}/api/ticker?ids=ethereum,bitcoin")).await;

    assert_eq!(status, 200);
    assert!(!fallback);
    assert_eq!(body["items"][0]["id"], "ethereum");
    assert_eq!(body["items"][0]["change_text"], "-0.50%");
    assert_eq!(body["items"][1]["price_text"], "$67,250.00");
    assert_eq!(body["global"]["btc_dominance"], 52.0);
}

#[tokio::test]
async fn ticker_survives_a_failing_global_endpoint_and_prices() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET);
        then.status(500);
    });

    let proxy = spawn_proxy(client_for(&server)).await;
    let (status, fallback, body) = get_json(format!("{proxy}/api/ticker?ids=solana")).await;

    assert_eq!(status, 200);
    assert!(fallback);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["id"], "solana");
    assert!(body["global"].is_null());
}
