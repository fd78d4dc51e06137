// src/curate/rank.rs
//! Shared rank-and-truncate routine.
//!
//! - Every item is scored with the given `Weighting`.
//! - Items are sorted by score, descending, with a **stable** sort: equal scores keep
//!   their input order.
//! - The result is cut to `max_count`.
//! - If any item fails to score (or yields a non-finite score) the whole batch falls
//!   back to the first `max_count` items in input order.

use super::weighting::Weighting;
use crate::relevance::RelevanceScorer;
use anyhow::{anyhow, Result};
use metrics::counter;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Transient (input index, score) pair; lives only inside one ranking call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    pub index: usize,
    pub score: f32,
}

/// Score all items and return them ordered best-first. Errors on the first failure.
pub fn rank<T, W>(items: &[T], scorer: &RelevanceScorer, weighting: &W) -> Result<Vec<ScoredItem>>
where
    W: Weighting<T> + ?Sized,
{
    let mut scored = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let score = weighting
            .score(scorer, item)
            .map_err(|e| e.context(format!("scoring {} item #{index}", weighting.kind())))?;
        if !score.is_finite() {
            return Err(anyhow!(
                "scoring {} item #{index} produced a non-finite score",
                weighting.kind()
            ));
        }
        debug!(kind = weighting.kind(), index, score, "item scored");
        scored.push(ScoredItem { index, score });
    }

    // slice::sort_by is stable
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(scored)
}

/// Rank, truncate and clone the winners. Never fails: scoring errors are logged and
/// the input order is used instead.
pub fn rank_and_truncate<T, W>(
    items: &[T],
    max_count: usize,
    scorer: &RelevanceScorer,
    weighting: &W,
) -> Vec<T>
where
    T: Clone,
    W: Weighting<T> + ?Sized,
{
    if items.is_empty() {
        return Vec::new();
    }
    super::ensure_metrics_described();
    let kind = weighting.kind();
    counter!("curator_runs_total", "kind" => kind).increment(1);

    match rank(items, scorer, weighting) {
        Ok(scored) => {
            counter!("curator_items_scored_total", "kind" => kind).increment(scored.len() as u64);
            let out: Vec<T> = scored
                .into_iter()
                .take(max_count)
                .map(|s| items[s.index].clone())
                .collect();
            info!(kind, curated = out.len(), total = items.len(), "curated items");
            out
        }
        Err(e) => {
            warn!(error = ?e, kind, "curation failed, falling back to input order");
            counter!("curator_fallback_total", "kind" => kind).increment(1);
            items.iter().take(max_count).cloned().collect()
        }
    }
}
