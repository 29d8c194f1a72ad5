use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which section of the site an article belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Market news.
    Newsroom,
    /// Educational explainers.
    Academy,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newsroom => "newsroom",
            Self::Academy => "academy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newsroom" => Ok(Self::Newsroom),
            "academy" => Ok(Self::Academy),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// An article as stored in the CMS. Read-only on our side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    /// Portable-text blocks, passed through untouched for the renderer.
    pub content: serde_json::Value,
    /// Asset reference such as `image-<id>-1200x630-jpg`; see [`super::image_url`].
    pub image: Option<String>,
    pub category: Option<Category>,
    pub source: Option<String>,
    /// Unix seconds.
    pub published_at: Option<i64>,
    pub featured: bool,
}
