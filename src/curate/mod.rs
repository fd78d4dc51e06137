// src/curate/mod.rs
//! Curation entry: ranks posts and repositories, truncates, suggests themes.
//!
//! The public operations never fail: empty input gives empty output and a scoring
//! failure falls back to the input order (see `rank`).

pub mod rank;
pub mod weighting;

use crate::config::curation::CurationConfig;
use crate::items::{annotate_display_names, ContentItem, ContentText, Post, Repository};
use crate::relevance::RelevanceScorer;
use crate::sources::Gathered;
use crate::themes::ThemeSuggester;
use metrics::describe_counter;
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;

// Re-export convenient types.
pub use rank::{rank, rank_and_truncate, ScoredItem};
pub use weighting::{PostWeighting, RepositoryWeighting, Weighting};

/// One-time metrics registration.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "curator_runs_total",
            "Curation calls with non-empty input."
        );
        describe_counter!(
            "curator_items_scored_total",
            "Items scored by the ranker."
        );
        describe_counter!(
            "curator_fallback_total",
            "Curation calls that fell back to input order."
        );
        describe_counter!(
            "curator_source_errors_total",
            "Content source fetch errors."
        );
    });
}

/// Curated content for one newsletter issue, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct CuratedEdition {
    pub posts: Vec<Post>,
    pub repositories: Vec<Repository>,
    pub themes: Vec<String>,
}

/// Immutable curation pipeline built from a `CurationConfig`.
#[derive(Debug, Clone)]
pub struct Curator {
    scorer: RelevanceScorer,
    posts: PostWeighting,
    repositories: RepositoryWeighting,
    themes: ThemeSuggester,
    max_posts: usize,
    max_repositories: usize,
}

impl Default for Curator {
    fn default() -> Self {
        Self::new(&CurationConfig::default())
    }
}

impl Curator {
    pub fn new(cfg: &CurationConfig) -> Self {
        Self {
            scorer: RelevanceScorer::new(cfg),
            posts: PostWeighting::new(&cfg.posts),
            repositories: RepositoryWeighting::new(&cfg.repositories),
            themes: ThemeSuggester::new(&cfg.themes),
            max_posts: cfg.posts.max_count,
            max_repositories: cfg.repositories.max_count,
        }
    }

    /// Build from `CurationConfig::load_default()`.
    pub fn from_default_config() -> anyhow::Result<Self> {
        Ok(Self::new(&CurationConfig::load_default()?))
    }

    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    pub fn max_posts(&self) -> usize {
        self.max_posts
    }

    pub fn max_repositories(&self) -> usize {
        self.max_repositories
    }

    pub fn score_relevance(&self, text: &str) -> f32 {
        self.scorer.score(text)
    }

    /// Top `max_count` posts, best first.
    pub fn curate_posts(&self, items: &[Post], max_count: usize) -> Vec<Post> {
        rank_and_truncate(items, max_count, &self.scorer, &self.posts)
    }

    /// Top `max_count` repositories, best first. `display_name` is left untouched.
    pub fn curate_repositories(&self, items: &[Repository], max_count: usize) -> Vec<Repository> {
        rank_and_truncate(items, max_count, &self.scorer, &self.repositories)
    }

    /// Same as `curate_posts` for raw JSON records; records come back unmodified.
    pub fn curate_post_records(&self, records: &[Value], max_count: usize) -> Vec<Value> {
        rank_and_truncate(records, max_count, &self.scorer, &self.posts)
    }

    /// Same as `curate_repositories` for raw JSON records.
    pub fn curate_repository_records(&self, records: &[Value], max_count: usize) -> Vec<Value> {
        rank_and_truncate(records, max_count, &self.scorer, &self.repositories)
    }

    pub fn suggest_themes<T: ContentText>(&self, items: &[T], count: usize) -> Vec<String> {
        self.themes.suggest(items, count)
    }

    /// Curate both kinds with the configured limits, decorate repositories with
    /// `display_name`, and derive themes from the curated items (posts first).
    pub fn curate_edition(&self, posts: &[Post], repositories: &[Repository]) -> CuratedEdition {
        let posts = self.curate_posts(posts, self.max_posts);
        let repositories =
            annotate_display_names(self.curate_repositories(repositories, self.max_repositories));

        let combined: Vec<ContentItem> = posts
            .iter()
            .cloned()
            .map(ContentItem::from)
            .chain(repositories.iter().cloned().map(ContentItem::from))
            .collect();
        let themes = self.themes.suggest(&combined, self.themes.default_count());

        CuratedEdition {
            posts,
            repositories,
            themes,
        }
    }

    pub fn curate_gathered(&self, gathered: &Gathered) -> CuratedEdition {
        self.curate_edition(&gathered.posts, &gathered.repositories)
    }
}

/* ----------------------------
Free functions on the built-in configuration
---------------------------- */

fn default_curator() -> &'static Curator {
    static CURATOR: OnceCell<Curator> = OnceCell::new();
    CURATOR.get_or_init(Curator::default)
}

/// `Curator::score_relevance` with built-in vocabulary and weights.
pub fn score_relevance(text: &str) -> f32 {
    default_curator().score_relevance(text)
}

pub fn curate_posts(items: &[Post], max_count: usize) -> Vec<Post> {
    default_curator().curate_posts(items, max_count)
}

pub fn curate_repositories(items: &[Repository], max_count: usize) -> Vec<Repository> {
    default_curator().curate_repositories(items, max_count)
}

pub fn suggest_themes<T: ContentText>(items: &[T], count: usize) -> Vec<String> {
    default_curator().suggest_themes(items, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edition_decorates_and_limits() {
        let mut cfg = CurationConfig::default();
        cfg.posts.max_count = 1;
        cfg.repositories.max_count = 1;
        let c = Curator::new(&cfg);

        let posts = vec![Post::new("plain", ""), Post::new("Open data today", "").with_published("x")];
        let repos = vec![
            Repository::new("tiny", "", 0),
            Repository::new("open-data_portal", "An open data portal for civic tech teams worldwide.", 900),
        ];
        let ed = c.curate_edition(&posts, &repos);
        assert_eq!(ed.posts.len(), 1);
        assert_eq!(ed.posts[0].title, "Open data today");
        assert_eq!(ed.repositories.len(), 1);
        assert_eq!(ed.repositories[0].display_name.as_deref(), Some("Open Data Portal"));
        assert_eq!(ed.themes.len(), 3);
    }

    #[test]
    fn free_functions_use_builtin_config() {
        assert_eq!(score_relevance(""), 0.0);
        assert!(curate_posts(&[], 5).is_empty());
        assert!(curate_repositories(&[], 5).is_empty());
        assert_eq!(suggest_themes::<Post>(&[], 3).len(), 3);
    }
}
