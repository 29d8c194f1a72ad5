//! GROQ rendering for article listings.

use serde_json::Value;

use super::model::Category;

const PROJECTION: &str = r#"{ _id, title, "slug": slug.current, excerpt, content, "imageRef": image.asset._ref, category, source, publishedAt, featured }"#;

/// Filters and paging for an article listing. Results are newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub category: Option<Category>,
    pub featured_only: bool,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            category: None,
            featured_only: false,
            limit: 20,
            offset: 0,
        }
    }
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn featured_only(mut self, yes: bool) -> Self {
        self.featured_only = yes;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// The GROQ text plus its `$param` bindings. Values are bound, never spliced.
    pub fn to_groq(&self) -> (String, Vec<(String, Value)>) {
        let mut filters = vec![r#"_type == "article""#.to_string(), "defined(slug.current)".to_string()];
        let mut params = Vec::new();

        if let Some(category) = self.category {
            filters.push("category == $category".into());
            params.push(("category".to_string(), Value::from(category.as_str())));
        }
        if self.featured_only {
            filters.push("featured == true".into());
        }

        let limit = self.limit.clamp(1, 100);
        params.push(("start".to_string(), Value::from(self.offset)));
        params.push(("end".to_string(), Value::from(self.offset.saturating_add(limit))));

        let groq = format!(
            "*[{}] | order(publishedAt desc) [$start...$end] {PROJECTION}",
            filters.join(" && ")
        );
        (groq, params)
    }
}

/// Single article by slug.
pub(crate) fn by_slug(slug: &str) -> (String, Vec<(String, Value)>) {
    (
        format!(r#"*[_type == "article" && slug.current == $slug][0] {PROJECTION}"#),
        vec![("slug".to_string(), Value::from(slug))],
    )
}
