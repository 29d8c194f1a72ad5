use serde::{Deserialize, Serialize};

/// A news item from GNews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// The headline.
    pub title: String,
    pub description: Option<String>,
    /// Truncated body text as GNews serves it.
    pub content: Option<String>,
    /// Link to the publisher's page.
    pub url: String,
    pub image: Option<String>,
    /// Unix seconds; `None` when the upstream date was missing or malformed.
    pub published_at: Option<i64>,
    /// The publisher's display name.
    pub source_name: Option<String>,
    pub source_url: Option<String>,
}
