// src/lib.rs
// Public library surface for integration tests (and the demo binary).

pub mod config;
pub mod curate;
pub mod items;
pub mod relevance;
pub mod sources;
pub mod themes;

// ---- Re-exports for stable public API ----
pub use crate::config::CurationConfig;
pub use crate::curate::{
    curate_posts, curate_repositories, score_relevance, suggest_themes, CuratedEdition, Curator,
};
pub use crate::items::{display_name, ContentItem, ContentText, Post, Repository};
pub use crate::relevance::{Relevance, RelevanceScorer};
pub use crate::sources::{gather, ContentSource, Gathered};
pub use crate::themes::ThemeSuggester;
