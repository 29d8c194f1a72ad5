//! GNews search and headlines. The key travels as the `apikey` query parameter.

mod api;
mod model;
mod wire;

pub use model::NewsArticle;

use crate::core::{BelugaClient, BelugaError, client::CacheMode};

/// Parameters shared by `/search` and `/top-headlines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    /// Search keywords. Required by `/search`, optional for headlines.
    pub q: Option<String>,
    /// Headline category (`general`, `business`, `technology`, ...).
    pub category: Option<String>,
    /// Two-letter language code.
    pub lang: String,
    /// Two-letter country code.
    pub country: Option<String>,
    /// Maximum number of articles, clamped to 1..=100.
    pub max: u32,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            q: None,
            category: None,
            lang: "en".into(),
            country: None,
            max: 10,
        }
    }
}

impl NewsQuery {
    /// A keyword search with default language and size.
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    #[must_use]
    pub const fn max(mut self, max: u32) -> Self {
        self.max = max;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Keyword search.
///
/// # Errors
///
/// `BelugaError::Data` when the query has no keywords, `BelugaError::MissingApiKey`
/// without a GNews key, and the usual HTTP/parse errors otherwise.
#[cfg_attr(feature = "instrument", tracing::instrument(skip(client), err))]
pub async fn search(client: &BelugaClient, query: &NewsQuery) -> Result<Vec<NewsArticle>, BelugaError> {
    if query.q.as_deref().is_none_or(|q| q.trim().is_empty()) {
        return Err(BelugaError::Data("gnews search: empty query".into()));
    }
    api::fetch_articles(client, "search", query, CacheMode::Use, None).await
}

/// Top headlines, optionally narrowed by category and keywords.
///
/// # Errors
///
/// `BelugaError::MissingApiKey` without a GNews key, and the usual HTTP/parse errors.
pub async fn top_headlines(
    client: &BelugaClient,
    query: &NewsQuery,
) -> Result<Vec<NewsArticle>, BelugaError> {
    api::fetch_articles(client, "top-headlines", query, CacheMode::Use, None).await
}
