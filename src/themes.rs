// src/themes.rs
//! Theme suggestion from word frequencies in curated content.
//!
//! 1) Lowercase corpus of every item's title, description and summary
//! 2) Word tokens counted; ties keep first-occurrence order
//! 3) Top `candidate_pool` words by count, then stop words and short words removed,
//!    then top `theme_words`
//! 4) Words substituted into `{n}` templates, title-cased
//!
//! Too few theme words for the templates -> the configured default themes.

use crate::config::curation::ThemeSection;
use crate::items::ContentText;
use once_cell::sync::OnceCell;
use regex::{Captures, Regex};
use std::collections::HashMap;
use tracing::debug;

fn word_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    // \w is Unicode-aware by default
    RE.get_or_init(|| Regex::new(r"\b\w+\b").expect("word regex"))
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\{(\d+)\}").expect("placeholder regex"))
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
///
/// `"data"` -> `"Data"`, `"3d"` -> `"3D"`, `"OPEN"` -> `"Open"`.
pub fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Word frequencies, most frequent first; equal counts keep first-seen order.
pub fn word_frequencies(corpus: &str) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for m in word_re().find_iter(corpus) {
        let w = m.as_str();
        match index.get(w) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(w, counts.len());
                counts.push((w, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(w, c)| (w.to_string(), c)).collect()
}

#[derive(Debug, Clone)]
pub struct ThemeSuggester {
    cfg: ThemeSection,
    /// Highest `{n}` across templates + 1.
    required_words: usize,
}

impl Default for ThemeSuggester {
    fn default() -> Self {
        Self::new(&ThemeSection::default())
    }
}

impl ThemeSuggester {
    pub fn new(cfg: &ThemeSection) -> Self {
        let required_words = cfg
            .templates
            .iter()
            .flat_map(|t| placeholder_re().captures_iter(t))
            .filter_map(|c| c[1].parse::<usize>().ok())
            .map(|i| i + 1)
            .max()
            .unwrap_or(0);
        Self {
            cfg: cfg.clone(),
            required_words,
        }
    }

    pub fn default_count(&self) -> usize {
        self.cfg.count
    }

    /// Lowercased corpus of all item texts.
    pub fn corpus<T: ContentText>(items: &[T]) -> String {
        items
            .iter()
            .map(|it| {
                format!(
                    "{} {} {}",
                    it.title_text(),
                    it.description_text(),
                    it.summary_text()
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// At most `theme_words` words, picked from the `candidate_pool` most frequent
    /// words after stop words and short words are dropped.
    pub fn theme_words(&self, corpus: &str) -> Vec<String> {
        word_frequencies(corpus)
            .into_iter()
            .take(self.cfg.candidate_pool)
            .filter(|(w, _)| !self.cfg.stop_words.iter().any(|s| s == w))
            .filter(|(w, _)| w.chars().count() >= self.cfg.min_word_chars)
            .take(self.cfg.theme_words)
            .map(|(w, _)| w)
            .collect()
    }

    /// Up to `count` themes; defaults when the corpus is too thin.
    pub fn suggest<T: ContentText>(&self, items: &[T], count: usize) -> Vec<String> {
        let words = self.theme_words(&Self::corpus(items));

        let themes: Vec<String> = if words.is_empty() || words.len() < self.required_words {
            debug!(found = words.len(), needed = self.required_words, "using default themes");
            self.cfg.defaults.clone()
        } else {
            self.cfg
                .templates
                .iter()
                .map(|t| {
                    placeholder_re()
                        .replace_all(t, |c: &Captures| {
                            c[1].parse::<usize>()
                                .ok()
                                .and_then(|i| words.get(i))
                                .map(|w| title_case(w))
                                .unwrap_or_default()
                        })
                        .into_owned()
                })
                .collect()
        };

        themes.into_iter().take(count).collect()
    }
}
