use beluga::{ArticleQuery, BelugaClient, BelugaError, Category, Upstream, cms};
use httpmock::Method::GET;
use serde_json::{Value, json};

use crate::common::{base, client_for, fixture, setup_server};

const QUERY_PATH: &str = "/v2024-01-01/data/query/production";

#[tokio::test]
async fn articles_binds_params_and_skips_unslugged_documents() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param_exists("query")
            .query_param("$category", "\"academy\"")
            .query_param("$start", "0")
            .query_param("$end", "5");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("sanity_articles.json"));
    });

    let client = client_for(&server);
    let query = ArticleQuery::new().category(Category::Academy).limit(5);
    let articles = cms::articles(&client, &query).await.unwrap();

    mock.assert();
    assert_eq!(articles.len(), 2);

    let first = &articles[0];
    assert_eq!(first.slug, "bitcoin-halving-explained");
    assert_eq!(first.category, Some(Category::Academy));
    assert!(first.featured);
    assert_eq!(first.published_at, Some(1_716_199_200));
    assert!(first.content.is_array());

    let second = &articles[1];
    assert!(!second.featured, "null featured reads as false");
    assert_eq!(second.content, Value::Array(Vec::new()));
    assert_eq!(second.image, None);
}

#[tokio::test]
async fn article_by_slug_returns_none_for_null_result() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("$slug", "\"does-not-exist\"");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"ms":1,"result":null}"#);
    });

    let client = client_for(&server);
    let found = cms::article_by_slug(&client, "does-not-exist").await.unwrap();

    mock.assert();
    assert!(found.is_none());
}

#[tokio::test]
async fn article_by_slug_reads_single_document() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("$slug", "\"market-wrap\"");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                json!({"result": {
                    "_id": "a2", "title": "Market wrap", "slug": "market-wrap",
                    "category": "newsroom", "publishedAt": "2024-05-19T10:00:00Z"
                }})
                .to_string(),
            );
    });

    let client = client_for(&server);
    let article = cms::article_by_slug(&client, "market-wrap")
        .await
        .unwrap()
        .expect("article");

    assert_eq!(article.id, "a2");
    assert_eq!(article.category, Some(Category::Newsroom));
}

#[tokio::test]
async fn blank_slug_short_circuits() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(QUERY_PATH);
        then.status(500);
    });

    let client = client_for(&server);
    assert!(cms::article_by_slug(&client, "  ").await.unwrap().is_none());
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn raw_query_returns_result_verbatim() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", "count(*[_type == \"article\"])");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"result": 42}"#);
    });

    let client = client_for(&server);
    let value = cms::raw_query(&client, "count(*[_type == \"article\"])", &[])
        .await
        .unwrap();
    assert_eq!(value, json!(42));
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .header("authorization", "Bearer sk-sanity");
        then.status(200).body(r#"{"result":[]}"#);
    });

    let client = crate::common::client_builder(&server)
        .api_key(Upstream::Sanity, "sk-sanity")
        .build()
        .unwrap();
    let articles = cms::featured(&client, 3).await.unwrap();

    mock.assert();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn unconfigured_project_is_a_config_error() {
    let server = setup_server();
    let client = BelugaClient::builder()
        .base_url(Upstream::Sanity, base(&server, "/"))
        .build()
        .unwrap();

    let err = cms::articles(&client, &ArticleQuery::new()).await.unwrap_err();
    assert!(matches!(err, BelugaError::Config(_)), "got {err:?}");
}

#[test]
fn default_sanity_host_is_the_project_cdn() {
    let client = BelugaClient::builder().sanity_project("abc123").build().unwrap();
    assert_eq!(
        client.base_url(Upstream::Sanity).unwrap().as_str(),
        "https://abc123.apicdn.sanity.io/"
    );

    let authed = BelugaClient::builder()
        .sanity_project("abc123")
        .api_key(Upstream::Sanity, "tok")
        .build()
        .unwrap();
    assert_eq!(
        authed.base_url(Upstream::Sanity).unwrap().as_str(),
        "https://abc123.api.sanity.io/"
    );
}
