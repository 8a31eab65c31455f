//! Configuration module for naming-miner
//!
//! This module handles:
//! - Run tunables (report sizes, sample caps, pattern mode)
//! - Population and naming-rule settings
//! - Worker and shard sizing

mod mining_config;

pub use mining_config::{
    load_mining_config,
    MiningConfig,
    JSON_CONFIG_FILE,
    TOML_CONFIG_FILE,
};
