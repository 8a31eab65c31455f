//! Run configuration support
//!
//! Loads tunables from `naming-miner.toml` or `.naming-miner.json` in a
//! directory, falling back to defaults. Every field is optional.
//!
//! # Configuration Format
//!
//! ```toml
//! # naming-miner.toml
//! top_k = 50
//! max_sample_lines = 20
//! min_anchors = 1
//! pattern_mode = "compressed"   # or "granular"
//! analyzed_population = "test"
//! display_annotation = "DisplayName"
//! test_prefix = "test"
//! greedy_max_tokens = 12
//! workers = 0                   # 0 = one per core
//! shard_size = 512
//! ```

use crate::patterns::PatternMode;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const TOML_CONFIG_FILE: &str = "naming-miner.toml";
pub const JSON_CONFIG_FILE: &str = ".naming-miner.json";

/// Tunables for one analysis run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Rows kept in the token, pattern and n-gram reports
    pub top_k: usize,
    /// Rows kept in the file-type report
    pub file_types_top_k: usize,
    /// Sample lines kept per record
    pub max_sample_lines: usize,
    /// Anchors a template needs to enter the pattern report
    pub min_anchors: usize,
    pub pattern_mode: PatternMode,
    /// Population whose identifiers are analyzed; the rest feed the
    /// reference index
    pub analyzed_population: String,
    /// Annotation tag counted by the naming report
    pub display_annotation: String,
    /// Prefix counted by the naming report
    pub test_prefix: String,
    /// Length bound for the greedy n-gram sentence
    pub greedy_max_tokens: usize,
    /// Worker threads (0 = rayon default, 1 = sequential)
    pub workers: usize,
    /// Identifiers per shard
    pub shard_size: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            top_k: 50,
            file_types_top_k: 10,
            max_sample_lines: crate::metrics::DEFAULT_MAX_SAMPLE_LINES,
            min_anchors: 1,
            pattern_mode: PatternMode::Compressed,
            analyzed_population: "test".to_string(),
            display_annotation: "DisplayName".to_string(),
            test_prefix: "test".to_string(),
            greedy_max_tokens: 12,
            workers: 0,
            shard_size: 512,
        }
    }
}

impl MiningConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_shard_size(mut self, shard_size: usize) -> Self {
        self.shard_size = shard_size;
        self
    }

    pub fn with_pattern_mode(mut self, mode: PatternMode) -> Self {
        self.pattern_mode = mode;
        self
    }

    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), String> {
        if self.top_k == 0 {
            return Err("top_k must be at least 1".to_string());
        }
        if self.shard_size == 0 {
            return Err("shard_size must be at least 1".to_string());
        }
        if self.analyzed_population.trim().is_empty() {
            return Err("analyzed_population must not be empty".to_string());
        }
        Ok(())
    }
}

/// Load the run configuration from `dir`.
///
/// Tries TOML first, then JSON. A file that fails to parse is logged and
/// skipped; with no usable file the defaults are returned.
pub fn load_mining_config(dir: &Path) -> MiningConfig {
    let toml_path = dir.join(TOML_CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded mining config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(JSON_CONFIG_FILE);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded mining config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No mining config found, using defaults");
    MiningConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<MiningConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: MiningConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<MiningConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: MiningConfig = serde_json::from_str(&content)?;
    Ok(config)
}
