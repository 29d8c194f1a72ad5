use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArticlesEnvelope {
    #[allow(dead_code)]
    pub(crate) total_articles: Option<u64>,
    #[serde(default)]
    pub(crate) articles: Vec<ArticleNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArticleNode {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) published_at: Option<String>,
    pub(crate) source: Option<SourceNode>,
}

#[derive(Deserialize)]
pub(crate) struct SourceNode {
    pub(crate) name: Option<String>,
    pub(crate) url: Option<String>,
}
