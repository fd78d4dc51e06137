// src/relevance.rs
//! Relevance scorer: keyword membership, sentence-length readability and engagement cues.
//!
//! score = keyword_count * w_keyword + readability * w_readability + engagement * w_engagement
//!
//! With the built-in configuration that is `k * 0.5 + r * 0.3 + e * 0.2`, where
//! `r` is 1.0 (average sentence < 20 words) or 0.5, and `e` is 0.5 per cue (max 1.5).

use crate::config::curation::{
    CurationConfig, EngagementSection, ReadabilitySection, RelevanceSection,
};
use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::info;

/// Debug trace of one scoring call, emitted only with `CURATOR_DEV_LOG=1` in a debug
/// build or with `CURATOR_ENV` set to local/development/dev. The text is reduced to
/// a 12-hex-char SHA-256 prefix and at most five matched keywords are listed.
pub(crate) fn dev_log_score(event: &str, text: &str, matched: &[String], score: f32) {
    use sha2::{Digest, Sha256};

    if std::env::var("CURATOR_DEV_LOG").ok().as_deref() != Some("1") {
        return;
    }
    let dev_env = std::env::var("CURATOR_ENV")
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "local" | "development" | "dev"))
        .unwrap_or(false);
    if !cfg!(debug_assertions) && !dev_env {
        return;
    }

    let id = text_id(&Sha256::digest(text.as_bytes()));
    let keywords = &matched[..matched.len().min(5)];
    info!(target: "relevance", %id, %score, event, matched = ?keywords);
}

fn text_id(digest: &[u8]) -> String {
    digest.iter().take(6).map(|b| format!("{b:02x}")).collect()
}

/// Result of relevance evaluation with its components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Relevance {
    pub score: f32,
    /// Number of distinct keywords found.
    pub keyword: f32,
    pub readability: f32,
    pub engagement: f32,
    pub matched: Vec<String>,
}

fn sentence_splitter() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence regex"))
}

/// Readability from average whitespace-token count per sentence piece.
///
/// Pieces come from splitting on runs of `.`, `!`, `?`; a trailing terminator yields
/// an empty final piece which still counts towards the average.
pub fn readability_score(text: &str, cfg: &ReadabilitySection) -> f32 {
    let mut pieces = 0usize;
    let mut words = 0usize;
    for piece in sentence_splitter().split(text) {
        pieces += 1;
        words += piece.split_whitespace().count();
    }
    let avg = words as f32 / pieces.max(1) as f32;
    if avg < cfg.max_avg_sentence_words {
        cfg.short_score
    } else {
        cfg.long_score
    }
}

/// Engagement cues in already-lowercased text: question, example, analogy.
pub fn engagement_score(text: &str, cfg: &EngagementSection) -> f32 {
    let mut score = 0.0;
    if text.contains('?') {
        score += cfg.bonus;
    }
    if cfg.example_terms.iter().any(|t| text.contains(t.as_str())) {
        score += cfg.bonus;
    }
    if cfg.analogy_terms.iter().any(|t| text.contains(t.as_str())) {
        score += cfg.bonus;
    }
    score
}

/// Immutable scorer; cheap to share across threads.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    relevance: RelevanceSection,
    readability: ReadabilitySection,
    engagement: EngagementSection,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(&CurationConfig::default())
    }
}

impl RelevanceScorer {
    pub fn new(cfg: &CurationConfig) -> Self {
        // Text is lowercased before matching, so every term list must be too.
        let lower = |terms: &mut Vec<String>| terms.iter_mut().for_each(|t| *t = t.to_lowercase());
        let mut relevance = cfg.relevance.clone();
        lower(&mut relevance.keywords);
        let mut engagement = cfg.engagement.clone();
        lower(&mut engagement.example_terms);
        lower(&mut engagement.analogy_terms);
        Self {
            relevance,
            readability: cfg.readability.clone(),
            engagement,
        }
    }

    /// Default weights with an alternate keyword vocabulary.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = CurationConfig::default();
        cfg.relevance.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self::new(&cfg)
    }

    pub fn keywords(&self) -> &[String] {
        &self.relevance.keywords
    }

    /// Relevance score (>= 0). Empty text scores 0.0.
    pub fn score(&self, text: &str) -> f32 {
        self.evaluate(text).score
    }

    /// Score plus breakdown and matched keywords.
    pub fn evaluate(&self, text: &str) -> Relevance {
        if text.is_empty() {
            return Relevance::default();
        }
        let lower = text.to_lowercase();

        let matched: Vec<String> = self
            .relevance
            .keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .cloned()
            .collect();
        let keyword = matched.len() as f32;
        let readability = readability_score(&lower, &self.readability);
        let engagement = engagement_score(&lower, &self.engagement);

        let score = keyword * self.relevance.keyword_weight
            + readability * self.relevance.readability_weight
            + engagement * self.relevance.engagement_weight;

        dev_log_score("scored", text, &matched, score);

        Relevance {
            score,
            keyword,
            readability,
            engagement,
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn empty_text_is_zero() {
        let s = RelevanceScorer::default();
        assert_eq!(s.score(""), 0.0);
        assert_eq!(s.evaluate(""), Relevance::default());
    }

    #[test]
    fn plain_short_text_gets_only_readability() {
        let s = RelevanceScorer::default();
        // no keywords, no cues, short sentence -> 1.0 * 0.3
        assert!(approx(s.score("Weekly notes."), 0.3));
    }

    #[test]
    fn keywords_count_once_each() {
        let s = RelevanceScorer::default();
        let r = s.evaluate("Open data, OPEN DATA and more open data.");
        assert_eq!(r.matched, vec!["open data".to_string()]);
        assert!(approx(r.keyword, 1.0));
    }

    #[test]
    fn engagement_caps_at_three_cues() {
        let cfg = EngagementSection::default();
        let text = "imagine a case study? like an example?";
        assert!(approx(engagement_score(text, &cfg), 1.5));
        assert!(approx(engagement_score("nothing here", &cfg), 0.0));
    }

    #[test]
    fn long_sentences_lower_readability() {
        let cfg = ReadabilitySection::default();
        let long = vec!["word"; 25].join(" ");
        assert!(approx(readability_score(&long, &cfg), 0.5));
        // trailing terminator adds an empty piece: 25 words / 2 pieces = 12.5
        assert!(approx(readability_score(&format!("{long}."), &cfg), 1.0));
        // no terminator at all still divides by one
        assert!(approx(readability_score("a b c", &cfg), 1.0));
    }

    #[test]
    fn full_formula_matches_components() {
        let s = RelevanceScorer::default();
        let r = s.evaluate("Is civic tech like open data? Yes.");
        // keywords: open data, civic tech; readability 1.0; engagement ? + like = 1.0
        assert!(approx(r.keyword, 2.0));
        assert!(approx(r.readability, 1.0));
        assert!(approx(r.engagement, 1.0));
        assert!(approx(r.score, 2.0 * 0.5 + 0.3 + 0.2));
    }

    #[test]
    fn custom_vocabulary_is_used() {
        let s = RelevanceScorer::with_keywords(["Borrow Checker"]);
        assert_eq!(s.keywords(), &["borrow checker".to_string()]);
        assert!(s.score("the borrow checker") > s.score("open data"));
    }

    #[test]
    fn engagement_terms_match_regardless_of_case() {
        let mut cfg = CurationConfig::default();
        cfg.engagement.example_terms = vec!["Example".into()];
        cfg.engagement.analogy_terms = vec!["Imagine".into()];
        let s = RelevanceScorer::new(&cfg);
        let r = s.evaluate("Imagine an EXAMPLE.");
        assert!(approx(r.engagement, 1.0));
    }

    #[test]
    fn text_id_is_short_hex() {
        use sha2::{Digest, Sha256};
        let id = text_id(&Sha256::digest(b"hello"));
        assert_eq!(id.len(), 12);
        assert_eq!(id, text_id(&Sha256::digest(b"hello")));
        assert_ne!(id, text_id(&Sha256::digest(b"hello!")));
    }
}
