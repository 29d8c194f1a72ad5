use beluga::{BelugaClient, BelugaError, NewsQuery, Upstream, gnews};
use httpmock::Method::GET;

use crate::common::{GNEWS_KEY, base, client_for, fixture, setup_server};

#[tokio::test]
async fn search_sends_key_as_query_param_and_drops_untitled() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/search")
            .query_param("q", "bitcoin")
            .query_param("lang", "en")
            .query_param("max", "10")
            .query_param("apikey", GNEWS_KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("gnews_search.json"));
    });

    let client = client_for(&server);
    let articles = gnews::search(&client, &NewsQuery::search("bitcoin"))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(articles.len(), 2);

    let first = &articles[0];
    assert_eq!(first.title, "Bitcoin climbs past resistance");
    assert_eq!(first.source_name.as_deref(), Some("Example News"));
    assert_eq!(first.source_url.as_deref(), Some("https://news.example.com"));
    assert_eq!(first.published_at, Some(1_717_234_200));

    let second = &articles[1];
    assert_eq!(second.published_at, None, "unparsable dates are dropped, not fatal");
    assert_eq!(second.description, None);
}

#[tokio::test]
async fn top_headlines_clamps_max_and_passes_category() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/top-headlines")
            .query_param("category", "business")
            .query_param("lang", "id")
            .query_param("max", "100");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"totalArticles":0,"articles":[]}"#);
    });

    let client = client_for(&server);
    let query = NewsQuery::default().category("business").lang("id").max(500);
    let articles = gnews::top_headlines(&client, &query).await.unwrap();

    mock.assert();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn empty_search_is_rejected_locally() {
    let server = setup_server();
    let client = client_for(&server);

    let err = gnews::search(&client, &NewsQuery::search("   ")).await.unwrap_err();
    assert!(matches!(err, BelugaError::Data(_)));

    let err = gnews::search(&client, &NewsQuery::default()).await.unwrap_err();
    assert!(matches!(err, BelugaError::Data(_)));
}

#[tokio::test]
async fn missing_key_fails_before_the_network() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v4/search");
        then.status(200).body(r#"{"articles":[]}"#);
    });

    let client = BelugaClient::builder()
        .base_url(Upstream::GNews, base(&server, "/api/v4/"))
        .build()
        .unwrap();

    let err = gnews::search(&client, &NewsQuery::search("eth")).await.unwrap_err();
    assert!(matches!(err, BelugaError::MissingApiKey(Upstream::GNews)), "got {err:?}");
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn forbidden_maps_to_unauthorized_without_leaking_key() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v4/search");
        then.status(403)
            .header("content-type", "application/json")
            .body(r#"{"errors":["You did not provide an API key."]}"#);
    });

    let client = client_for(&server);
    let err = gnews::search(&client, &NewsQuery::search("eth")).await.unwrap_err();

    match err {
        BelugaError::Unauthorized { url } => assert!(!url.contains(GNEWS_KEY), "{url}"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}
