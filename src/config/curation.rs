// src/config/curation.rs
//! Curation vocabulary and weights, loaded from TOML.
//!
//! Every section is optional; anything left out keeps the built-in value, so a file
//! overriding only `[relevance] keywords` is valid.
//!
//! Lookup order for `load_default()`:
//! 1) $CURATOR_CONFIG_PATH (must exist)
//! 2) config/curation.toml
//! 3) built-in defaults

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_CURATION_CONFIG_PATH: &str = "config/curation.toml";
pub const ENV_CURATION_CONFIG_PATH: &str = "CURATOR_CONFIG_PATH";
pub const ENV_MAX_POSTS: &str = "CURATOR_MAX_POSTS";
pub const ENV_MAX_REPOSITORIES: &str = "CURATOR_MAX_REPOSITORIES";

pub const DEFAULT_MAX_POSTS: usize = 5;
pub const DEFAULT_MAX_REPOSITORIES: usize = 5;
pub const DEFAULT_THEME_COUNT: usize = 3;

pub const DEFAULT_KEYWORDS: [&str; 19] = [
    "open data",
    "data visualization",
    "data storytelling",
    "public data",
    "data journalism",
    "citizen science",
    "community data",
    "data ethics",
    "data literacy",
    "open government",
    "data democratization",
    "data commons",
    "open source",
    "data sharing",
    "civic tech",
    "data for good",
    "data innovation",
    "accessible data",
    "data transparency",
];

pub const DEFAULT_STOP_WORDS: [&str; 14] = [
    "and", "the", "to", "of", "in", "for", "a", "is", "with", "that", "on", "as", "at", "by",
];

pub const DEFAULT_THEME_TEMPLATES: [&str; 5] = [
    "Exploring {0} in Open Data",
    "The Future of {1}",
    "{2} for Everyone: Breaking Down Barriers",
    "Innovation through {0} and {1}",
    "Community-Driven {3}: Success Stories",
];

pub const DEFAULT_THEMES: [&str; 5] = [
    "Data for Good: Making a Difference",
    "Democratizing Data: Tools and Techniques",
    "The Open Data Revolution",
    "Data Storytelling: Finding the Signal in the Noise",
    "Building Community Through Shared Data",
];

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    pub relevance: RelevanceSection,
    pub readability: ReadabilitySection,
    pub engagement: EngagementSection,
    pub posts: PostSection,
    pub repositories: RepositorySection,
    pub themes: ThemeSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelevanceSection {
    pub keywords: Vec<String>,
    pub keyword_weight: f32,
    pub readability_weight: f32,
    pub engagement_weight: f32,
}

impl Default for RelevanceSection {
    fn default() -> Self {
        Self {
            keywords: strings(&DEFAULT_KEYWORDS),
            keyword_weight: 0.5,
            readability_weight: 0.3,
            engagement_weight: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadabilitySection {
    /// Average words per sentence below which text counts as readable.
    pub max_avg_sentence_words: f32,
    pub short_score: f32,
    pub long_score: f32,
}

impl Default for ReadabilitySection {
    fn default() -> Self {
        Self {
            max_avg_sentence_words: 20.0,
            short_score: 1.0,
            long_score: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngagementSection {
    /// Added once per signal: question mark, example term, analogy term.
    pub bonus: f32,
    pub example_terms: Vec<String>,
    pub analogy_terms: Vec<String>,
}

impl Default for EngagementSection {
    fn default() -> Self {
        Self {
            bonus: 0.5,
            example_terms: strings(&["example", "instance", "case study"]),
            analogy_terms: strings(&["like", "similar to", "imagine"]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostSection {
    pub max_count: usize,
    pub recency_bonus: f32,
}

impl Default for PostSection {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_POSTS,
            recency_bonus: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepositorySection {
    pub max_count: usize,
    pub relevance_weight: f32,
    pub star_weight: f32,
    pub description_weight: f32,
    /// Star count at which the popularity score saturates at 1.0.
    pub star_ceiling: u64,
    pub description_short_chars: usize,
    pub description_long_chars: usize,
}

impl Default for RepositorySection {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_REPOSITORIES,
            relevance_weight: 0.6,
            star_weight: 0.2,
            description_weight: 0.2,
            star_ceiling: 1000,
            description_short_chars: 10,
            description_long_chars: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeSection {
    pub count: usize,
    pub stop_words: Vec<String>,
    /// Candidate words need at least this many characters.
    pub min_word_chars: usize,
    pub candidate_pool: usize,
    pub theme_words: usize,
    /// `{n}` is replaced by the n-th theme word, title-cased.
    pub templates: Vec<String>,
    pub defaults: Vec<String>,
}

impl Default for ThemeSection {
    fn default() -> Self {
        Self {
            count: DEFAULT_THEME_COUNT,
            stop_words: strings(&DEFAULT_STOP_WORDS),
            min_word_chars: 4,
            candidate_pool: 20,
            theme_words: 5,
            templates: strings(&DEFAULT_THEME_TEMPLATES),
            defaults: strings(&DEFAULT_THEMES),
        }
    }
}

/* ----------------------------
Loading
---------------------------- */

impl CurationConfig {
    /// Parse from a TOML string and sanitise.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let mut cfg: CurationConfig = toml::from_str(toml_str)?;
        cfg.validate();
        Ok(cfg)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading curation config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing curation config {}", path.display()))
    }

    /// Load using env var + fallbacks, then apply max-count env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CURATION_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{ENV_CURATION_CONFIG_PATH} points to non-existent path {}",
                    pb.display()
                ));
            }
            Self::load_from(&pb)?
        } else {
            let default_path = PathBuf::from(DEFAULT_CURATION_CONFIG_PATH);
            if default_path.exists() {
                Self::load_from(&default_path)?
            } else {
                debug!("no curation config file found, using built-in defaults");
                Self::default()
            }
        };

        if let Some(n) = parse_count_env(std::env::var(ENV_MAX_POSTS).ok()) {
            cfg.posts.max_count = n;
        }
        if let Some(n) = parse_count_env(std::env::var(ENV_MAX_REPOSITORIES).ok()) {
            cfg.repositories.max_count = n;
        }
        Ok(cfg)
    }

    /// Harden odd values instead of rejecting the file.
    pub fn validate(&mut self) {
        let rel_default = RelevanceSection::default();
        sane_weight(&mut self.relevance.keyword_weight, rel_default.keyword_weight, "keyword_weight");
        sane_weight(
            &mut self.relevance.readability_weight,
            rel_default.readability_weight,
            "readability_weight",
        );
        sane_weight(
            &mut self.relevance.engagement_weight,
            rel_default.engagement_weight,
            "engagement_weight",
        );
        self.relevance.keywords = clean_terms(std::mem::take(&mut self.relevance.keywords));

        let read_default = ReadabilitySection::default();
        sane_weight(
            &mut self.readability.max_avg_sentence_words,
            read_default.max_avg_sentence_words,
            "max_avg_sentence_words",
        );
        sane_weight(&mut self.readability.short_score, read_default.short_score, "short_score");
        sane_weight(&mut self.readability.long_score, read_default.long_score, "long_score");

        sane_weight(&mut self.engagement.bonus, EngagementSection::default().bonus, "engagement.bonus");
        self.engagement.example_terms = clean_terms(std::mem::take(&mut self.engagement.example_terms));
        self.engagement.analogy_terms = clean_terms(std::mem::take(&mut self.engagement.analogy_terms));

        sane_weight(&mut self.posts.recency_bonus, PostSection::default().recency_bonus, "recency_bonus");

        let repo_default = RepositorySection::default();
        sane_weight(
            &mut self.repositories.relevance_weight,
            repo_default.relevance_weight,
            "relevance_weight",
        );
        sane_weight(&mut self.repositories.star_weight, repo_default.star_weight, "star_weight");
        sane_weight(
            &mut self.repositories.description_weight,
            repo_default.description_weight,
            "description_weight",
        );
        if self.repositories.star_ceiling == 0 {
            self.repositories.star_ceiling = 1;
        }
        if self.repositories.description_short_chars > self.repositories.description_long_chars {
            std::mem::swap(
                &mut self.repositories.description_short_chars,
                &mut self.repositories.description_long_chars,
            );
        }

        self.themes.stop_words = clean_terms(std::mem::take(&mut self.themes.stop_words));
        if self.themes.defaults.is_empty() {
            self.themes.defaults = strings(&DEFAULT_THEMES);
        }
    }
}

/// Replace non-finite or negative values with the built-in default.
fn sane_weight(value: &mut f32, default: f32, name: &str) {
    if !value.is_finite() || *value < 0.0 {
        warn!(field = name, value = %value, "invalid curation weight, using default");
        *value = default;
    }
}

/// Trim, lowercase, drop empties and duplicates; first occurrence wins.
fn clean_terms(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

// parse positive integer env; zero/garbage is ignored
fn parse_count_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}
