// src/items.rs
//! Content records handed to the curator by upstream fetchers.
//!
//! Fetchers are expected to fill absent fields with empty strings; deserialization
//! does the same for missing keys and JSON `null`, so scoring never sees a hole.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat JSON `null` the same as a missing key.
fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Text accessors shared by every item kind (used by theme suggestion).
pub trait ContentText {
    /// Title-equivalent text (post title, repository name).
    fn title_text(&self) -> &str;
    /// Description-equivalent text; empty for kinds that only carry a summary.
    fn description_text(&self) -> &str;
    fn summary_text(&self) -> &str;
}

/// Blog post, paper, social post or editor-submitted article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    /// Raw publication stamp as delivered by the feed; only its presence matters.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published: String,
}

impl Post {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>, source: impl Into<String>) -> Self {
        self.link = link.into();
        self.source = source.into();
        self
    }
}

impl ContentText for Post {
    fn title_text(&self) -> &str {
        &self.title
    }
    fn description_text(&self) -> &str {
        ""
    }
    fn summary_text(&self) -> &str {
        &self.summary
    }
}

/// Source-code repository listing (e.g. from a repository search API).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    /// Star count; negative values are treated as 0 when scoring.
    #[serde(default)]
    pub stars: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pushed_at: String,
    /// Presentation name derived after ranking; never read by the scorer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Repository {
    pub fn new(name: impl Into<String>, description: impl Into<String>, stars: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            stars,
            ..Self::default()
        }
    }

    /// Returns the same repository decorated with `display_name`.
    pub fn with_display_name(mut self) -> Self {
        self.display_name = Some(display_name(&self.name));
        self
    }
}

impl ContentText for Repository {
    fn title_text(&self) -> &str {
        &self.name
    }
    fn description_text(&self) -> &str {
        &self.description
    }
    fn summary_text(&self) -> &str {
        ""
    }
}

/// Either kind of item, as produced by a mixed content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    Post(Post),
    Repository(Repository),
}

impl ContentText for ContentItem {
    fn title_text(&self) -> &str {
        match self {
            ContentItem::Post(p) => p.title_text(),
            ContentItem::Repository(r) => r.title_text(),
        }
    }
    fn description_text(&self) -> &str {
        match self {
            ContentItem::Post(p) => p.description_text(),
            ContentItem::Repository(r) => r.description_text(),
        }
    }
    fn summary_text(&self) -> &str {
        match self {
            ContentItem::Post(p) => p.summary_text(),
            ContentItem::Repository(r) => r.summary_text(),
        }
    }
}

impl From<Post> for ContentItem {
    fn from(p: Post) -> Self {
        ContentItem::Post(p)
    }
}

impl From<Repository> for ContentItem {
    fn from(r: Repository) -> Self {
        ContentItem::Repository(r)
    }
}

/// Human-readable repository name: `-`/`_` become spaces, brackets are dropped,
/// every word is title-cased.
///
/// `"open-data_toolkit (beta)"` -> `"Open Data Toolkit Beta"`
pub fn display_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>'))
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    cleaned
        .split_whitespace()
        .map(crate::themes::title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decorate already-ranked repositories with `display_name`, keeping order.
pub fn annotate_display_names(repos: Vec<Repository>) -> Vec<Repository> {
    repos.into_iter().map(Repository::with_display_name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_cleans_separators_and_brackets() {
        assert_eq!(display_name("open-data_toolkit"), "Open Data Toolkit");
        assert_eq!(display_name("[civic]-TECH (beta)"), "Civic Tech Beta");
        assert_eq!(display_name("d3"), "D3");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn missing_and_null_fields_become_empty() {
        let p: Post = serde_json::from_str(r#"{"title":"Hi","published":null}"#).unwrap();
        assert_eq!(p.title, "Hi");
        assert_eq!(p.summary, "");
        assert_eq!(p.published, "");

        let r: Repository = serde_json::from_str(r#"{"name":"x","description":null}"#).unwrap();
        assert_eq!(r.description, "");
        assert_eq!(r.stars, 0);
        assert!(r.display_name.is_none());
    }

    #[test]
    fn tagged_content_item_roundtrip_shape() {
        let raw = r#"[
            {"kind":"post","title":"A","summary":"B"},
            {"kind":"repository","name":"r","stars":3}
        ]"#;
        let items: Vec<ContentItem> = serde_json::from_str(raw).unwrap();
        assert!(matches!(items[0], ContentItem::Post(_)));
        assert_eq!(items[1].title_text(), "r");
    }
}
