// src/config/mod.rs
pub mod curation;

pub use curation::{CurationConfig, DEFAULT_CURATION_CONFIG_PATH, ENV_CURATION_CONFIG_PATH};
