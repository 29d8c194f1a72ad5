use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct QueryEnvelope<T> {
    pub(crate) result: Option<T>,
}

/// The flattened shape the GROQ projection in `query.rs` produces.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArticleNode {
    #[serde(rename = "_id")]
    pub(crate) id: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) excerpt: Option<String>,
    pub(crate) content: Option<serde_json::Value>,
    pub(crate) image_ref: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) source: Option<String>,
    pub(crate) published_at: Option<String>,
    pub(crate) featured: Option<bool>,
}
