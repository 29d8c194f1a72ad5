//! Read access to the Sanity dataset that holds the site's articles.
//!
//! Everything goes through the GROQ query endpoint; the CMS owns the documents and
//! this crate never writes to it.

mod api;
mod model;
mod query;
mod wire;

pub use model::{Article, Category};
pub use query::ArticleQuery;

use serde_json::Value;

use crate::core::{BelugaClient, BelugaError, client::CacheMode};

/// Articles matching `query`, newest first.
///
/// # Errors
///
/// `BelugaError::Config` if no Sanity project is configured, plus HTTP/parse errors.
#[cfg_attr(feature = "instrument", tracing::instrument(skip(client), err))]
pub async fn articles(client: &BelugaClient, query: &ArticleQuery) -> Result<Vec<Article>, BelugaError> {
    let (groq, params) = query.to_groq();
    let nodes: Option<Vec<wire::ArticleNode>> =
        api::run_query(client, &groq, &params, CacheMode::Use, None).await?;
    Ok(nodes
        .unwrap_or_default()
        .into_iter()
        .filter_map(api::article_from_node)
        .collect())
}

/// The article with this slug, or `None`.
///
/// # Errors
///
/// `BelugaError::Config` if no Sanity project is configured, plus HTTP/parse errors.
pub async fn article_by_slug(client: &BelugaClient, slug: &str) -> Result<Option<Article>, BelugaError> {
    if slug.trim().is_empty() {
        return Ok(None);
    }
    let (groq, params) = query::by_slug(slug);
    let node: Option<wire::ArticleNode> =
        api::run_query(client, &groq, &params, CacheMode::Use, None).await?;
    Ok(node.and_then(api::article_from_node))
}

/// Featured articles across both categories.
///
/// # Errors
///
/// Same as [`articles`].
pub async fn featured(client: &BelugaClient, limit: u32) -> Result<Vec<Article>, BelugaError> {
    articles(client, &ArticleQuery::new().featured_only(true).limit(limit)).await
}

/// Runs an arbitrary GROQ query and returns the raw `result`.
///
/// `params` are bound as `$name`; their values are JSON-encoded.
///
/// # Errors
///
/// `BelugaError::Config` if no Sanity project is configured, plus HTTP/parse errors.
pub async fn raw_query(
    client: &BelugaClient,
    groq: &str,
    params: &[(String, Value)],
) -> Result<Value, BelugaError> {
    let result: Option<Value> = api::run_query(client, groq, params, CacheMode::Bypass, None).await?;
    Ok(result.unwrap_or(Value::Null))
}

/// Resolves an image asset reference to its CDN URL.
///
/// `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg` becomes
/// `https://cdn.sanity.io/images/<project>/<dataset>/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg`.
/// Returns `None` for anything that is not an image reference.
pub fn image_url(project_id: &str, dataset: &str, asset_ref: &str) -> Option<String> {
    let rest = asset_ref.strip_prefix("image-")?;
    let (rest, format) = rest.rsplit_once('-')?;
    let (id, dims) = rest.rsplit_once('-')?;

    let (w, h) = dims.split_once('x')?;
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if id.is_empty() || format.is_empty() || !numeric(w) || !numeric(h) {
        return None;
    }

    Some(format!(
        "https://cdn.sanity.io/images/{project_id}/{dataset}/{id}-{dims}.{format}"
    ))
}
