//! Demo that curates JSON files of content items and prints the edition.
//!
//! Usage: `curate-demo feeds.json repos.json ...`
//! Each file holds `[{"kind":"post",...}, {"kind":"repository",...}]`. An unreadable
//! file is logged and skipped like any failing source.

use anyhow::{bail, Context, Result};
use newsletter_curator::{gather, ContentItem, ContentSource, Curator};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct JsonFileSource {
    path: PathBuf,
    name: &'static str,
}

#[async_trait::async_trait]
impl ContentSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<ContentItem>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        let items = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(items)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// CURATOR_LOG_FORMAT=json switches to JSON lines; compact text otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("CURATOR_LOG_FORMAT")
        .ok()
        .is_some_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op otherwise (CURATOR_CONFIG_PATH, CURATOR_MAX_*).
    let _ = dotenvy::dotenv();
    init_tracing();

    let paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("usage: curate-demo <items.json>...");
    }

    // Source names are 'static; CLI paths are leaked once at startup.
    let sources: Vec<Box<dyn ContentSource + Send + Sync>> = paths
        .into_iter()
        .map(|path| {
            let name: &'static str = Box::leak(path.display().to_string().into_boxed_str());
            Box::new(JsonFileSource { path, name }) as Box<dyn ContentSource + Send + Sync>
        })
        .collect();

    let curator = Curator::from_default_config()?;
    let gathered = gather(&sources).await;
    let edition = curator.curate_gathered(&gathered);

    println!("{}", serde_json::to_string_pretty(&edition)?);
    Ok(())
}
