use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    cms::{
        model::{Article, Category},
        wire,
    },
    core::{
        BelugaClient, BelugaError, Upstream,
        client::{CacheMode, RetryConfig},
        wire::rfc3339_to_unix,
    },
};

pub(super) async fn run_query<T: DeserializeOwned>(
    client: &BelugaClient,
    groq: &str,
    params: &[(String, Value)],
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Option<T>, BelugaError> {
    let sanity = client
        .sanity()
        .ok_or_else(|| BelugaError::Config("Sanity project id is not configured".into()))?;

    let mut url = client.base_url(Upstream::Sanity)?.join(&format!(
        "v{}/data/query/{}",
        sanity.api_version, sanity.dataset
    ))?;
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("query", groq);
        for (name, value) in params {
            qp.append_pair(&format!("${name}"), &value.to_string());
        }
    }

    let env: wire::QueryEnvelope<T> = client
        .fetch_json(Upstream::Sanity, url, cache_mode, retry_override)
        .await?;
    Ok(env.result)
}

pub(super) fn article_from_node(n: wire::ArticleNode) -> Option<Article> {
    let slug = n.slug.filter(|s| !s.is_empty())?;
    Some(Article {
        id: n.id.unwrap_or_else(|| slug.clone()),
        title: n.title.unwrap_or_default(),
        slug,
        excerpt: n.excerpt,
        content: n.content.unwrap_or(Value::Array(Vec::new())),
        image: n.image_ref,
        category: n.category.and_then(|c| c.parse::<Category>().ok()),
        source: n.source,
        published_at: rfc3339_to_unix(n.published_at.as_deref()),
        featured: n.featured.unwrap_or(false),
    })
}
