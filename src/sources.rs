// src/sources.rs
//! Boundary to the fetchers (feeds, repository search, paper search, editor store).
//!
//! Fetching itself lives outside this crate; a source only has to hand over a
//! finished list. A failing source is logged and skipped, never an error.

use crate::items::{ContentItem, Post, Repository};
use anyhow::Result;
use metrics::counter;
use tracing::{info, warn};

#[async_trait::async_trait]
pub trait ContentSource {
    async fn fetch(&self) -> Result<Vec<ContentItem>>;
    fn name(&self) -> &'static str;
}

/// Everything collected in one run, split by kind, in source order.
#[derive(Debug, Clone, Default)]
pub struct Gathered {
    pub posts: Vec<Post>,
    pub repositories: Vec<Repository>,
    /// Names of sources that failed this run.
    pub failed: Vec<&'static str>,
}

impl Gathered {
    pub fn push(&mut self, item: ContentItem) {
        match item {
            ContentItem::Post(p) => self.posts.push(p),
            ContentItem::Repository(r) => self.repositories.push(r),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.repositories.is_empty()
    }
}

impl FromIterator<ContentItem> for Gathered {
    fn from_iter<I: IntoIterator<Item = ContentItem>>(iter: I) -> Self {
        let mut g = Gathered::default();
        for it in iter {
            g.push(it);
        }
        g
    }
}

/// Poll every source once, in order.
pub async fn gather(sources: &[Box<dyn ContentSource + Send + Sync>]) -> Gathered {
    crate::curate::ensure_metrics_described();

    let mut out = Gathered::default();
    for s in sources {
        match s.fetch().await {
            Ok(items) => {
                info!(source = s.name(), items = items.len(), "source fetched");
                for it in items {
                    out.push(it);
                }
            }
            Err(e) => {
                warn!(error = ?e, source = s.name(), "source error");
                counter!("curator_source_errors_total").increment(1);
                out.failed.push(s.name());
            }
        }
    }
    out
}
