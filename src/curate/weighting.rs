// src/curate/weighting.rs
//! Per-kind weighting on top of the shared relevance score.
//!
//! - posts:        relevance(title + " " + summary) + recency_bonus (if `published` is non-empty)
//! - repositories: relevance(name + " " + description) * 0.6
//!                 + min(1, stars / 1000) * 0.2
//!                 + description_quality * 0.2
//!
//! Both kinds can also be scored straight from loosely-typed JSON records; a field of
//! the wrong JSON type is reported as an error, which the ranker turns into a fallback.

use crate::config::curation::{PostSection, RepositorySection};
use crate::items::{Post, Repository};
use crate::relevance::RelevanceScorer;
use anyhow::{bail, Result};
use serde_json::Value;

/// Scoring strategy for one item representation.
pub trait Weighting<T: ?Sized> {
    /// Short label used in logs and metrics.
    fn kind(&self) -> &'static str;
    fn score(&self, scorer: &RelevanceScorer, item: &T) -> Result<f32>;
}

/// String field of a JSON record; missing or `null` reads as empty.
pub(crate) fn record_str<'a>(record: &'a Value, key: &str) -> Result<&'a str> {
    if !record.is_object() {
        bail!("record is not a JSON object");
    }
    match record.get(key) {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => bail!("field `{key}` must be a string, got {other}"),
    }
}

/// Numeric field of a JSON record; missing or `null` reads as 0.
pub(crate) fn record_number(record: &Value, key: &str) -> Result<f64> {
    if !record.is_object() {
        bail!("record is not a JSON object");
    }
    match record.get(key) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => Ok(v),
            None => bail!("field `{key}` is not representable as a number"),
        },
        Some(other) => bail!("field `{key}` must be a number, got {other}"),
    }
}

/// Whether a record field holds a usable value: anything but missing, `null`, `""`,
/// `false` or `0`. Feeds stamp `published` as text or as an epoch number.
pub(crate) fn record_present(record: &Value, key: &str) -> Result<bool> {
    if !record.is_object() {
        bail!("record is not a JSON object");
    }
    Ok(match record.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    })
}

/* ----------------------------
Posts
---------------------------- */

#[derive(Debug, Clone)]
pub struct PostWeighting {
    pub recency_bonus: f32,
}

impl Default for PostWeighting {
    fn default() -> Self {
        Self::new(&PostSection::default())
    }
}

impl PostWeighting {
    pub fn new(cfg: &PostSection) -> Self {
        Self {
            recency_bonus: cfg.recency_bonus,
        }
    }

    /// Presence check only: any non-empty stamp earns the flat bonus.
    pub fn recency_score(&self, published: &str) -> f32 {
        if published.is_empty() {
            0.0
        } else {
            self.recency_bonus
        }
    }

    fn combine(&self, scorer: &RelevanceScorer, title: &str, summary: &str, recency: f32) -> f32 {
        let content = format!("{title} {summary}");
        scorer.score(&content) + recency
    }
}

impl Weighting<Post> for PostWeighting {
    fn kind(&self) -> &'static str {
        "posts"
    }

    fn score(&self, scorer: &RelevanceScorer, item: &Post) -> Result<f32> {
        Ok(self.combine(scorer, &item.title, &item.summary, self.recency_score(&item.published)))
    }
}

impl Weighting<Value> for PostWeighting {
    fn kind(&self) -> &'static str {
        "posts"
    }

    fn score(&self, scorer: &RelevanceScorer, item: &Value) -> Result<f32> {
        let title = record_str(item, "title")?;
        let summary = record_str(item, "summary")?;
        let recency = if record_present(item, "published")? {
            self.recency_bonus
        } else {
            0.0
        };
        Ok(self.combine(scorer, title, summary, recency))
    }
}

/* ----------------------------
Repositories
---------------------------- */

#[derive(Debug, Clone)]
pub struct RepositoryWeighting {
    pub relevance_weight: f32,
    pub star_weight: f32,
    pub description_weight: f32,
    pub star_ceiling: u64,
    pub description_short_chars: usize,
    pub description_long_chars: usize,
}

impl Default for RepositoryWeighting {
    fn default() -> Self {
        Self::new(&RepositorySection::default())
    }
}

impl RepositoryWeighting {
    pub fn new(cfg: &RepositorySection) -> Self {
        Self {
            relevance_weight: cfg.relevance_weight,
            star_weight: cfg.star_weight,
            description_weight: cfg.description_weight,
            star_ceiling: cfg.star_ceiling.max(1),
            description_short_chars: cfg.description_short_chars,
            description_long_chars: cfg.description_long_chars,
        }
    }

    /// Linear in stars, saturating at the ceiling; negative counts clamp to 0.
    pub fn star_score(&self, stars: f64) -> f32 {
        let stars = if stars.is_finite() { stars.max(0.0) } else { 0.0 };
        (stars / self.star_ceiling as f64).min(1.0) as f32
    }

    /// 0.0 below the short threshold, 0.5 up to the long threshold, 1.0 from there on.
    /// Length is counted in characters.
    pub fn description_score(&self, description: &str) -> f32 {
        let len = description.chars().count();
        if len < self.description_short_chars {
            0.0
        } else if len < self.description_long_chars {
            0.5
        } else {
            1.0
        }
    }

    fn combine(&self, scorer: &RelevanceScorer, name: &str, description: &str, stars: f64) -> f32 {
        let base = scorer.score(&format!("{name} {description}"));
        base * self.relevance_weight
            + self.star_score(stars) * self.star_weight
            + self.description_score(description) * self.description_weight
    }
}

impl Weighting<Repository> for RepositoryWeighting {
    fn kind(&self) -> &'static str {
        "repositories"
    }

    fn score(&self, scorer: &RelevanceScorer, item: &Repository) -> Result<f32> {
        Ok(self.combine(scorer, &item.name, &item.description, item.stars as f64))
    }
}

impl Weighting<Value> for RepositoryWeighting {
    fn kind(&self) -> &'static str {
        "repositories"
    }

    fn score(&self, scorer: &RelevanceScorer, item: &Value) -> Result<f32> {
        let name = record_str(item, "name")?;
        let description = record_str(item, "description")?;
        let stars = record_number(item, "stars")?;
        Ok(self.combine(scorer, name, description, stars))
    }
}
