use crate::{
    core::{
        BelugaClient, BelugaError, Upstream,
        client::{CacheMode, RetryConfig},
        wire::rfc3339_to_unix,
    },
    gnews::{NewsQuery, model::NewsArticle, wire},
};

pub(super) async fn fetch_articles(
    client: &BelugaClient,
    endpoint: &str,
    query: &NewsQuery,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<NewsArticle>, BelugaError> {
    let mut url = client.base_url(Upstream::GNews)?.join(endpoint)?;
    {
        let mut qp = url.query_pairs_mut();
        if let Some(q) = query.q.as_deref() {
            qp.append_pair("q", q);
        }
        if let Some(category) = query.category.as_deref() {
            qp.append_pair("category", category);
        }
        qp.append_pair("lang", &query.lang);
        if let Some(country) = query.country.as_deref() {
            qp.append_pair("country", country);
        }
        qp.append_pair("max", &query.max.clamp(1, 100).to_string());
    }

    let env: wire::ArticlesEnvelope = client
        .fetch_json(Upstream::GNews, url, cache_mode, retry_override)
        .await?;

    Ok(env
        .articles
        .into_iter()
        .filter_map(|a| {
            let title = a.title.filter(|t| !t.trim().is_empty())?;
            let url = a.url.filter(|u| !u.trim().is_empty())?;
            Some(NewsArticle {
                title,
                description: a.description,
                content: a.content,
                url,
                image: a.image,
                published_at: rfc3339_to_unix(a.published_at.as_deref()),
                source_name: a.source.as_ref().and_then(|s| s.name.clone()),
                source_url: a.source.and_then(|s| s.url),
            })
        })
        .collect())
}
