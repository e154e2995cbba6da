//! Agent-wide settings: one fixed record per pipeline.
//!
//! Field order here is the order the compiler emits the `[agent]` table in,
//! so reordering fields changes the rendered document.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub interval: String,
    pub round_interval: bool,
    pub metric_batch_size: u64,
    pub metric_buffer_limit: u64,
    pub collection_jitter: String,
    pub flush_interval: String,
    pub flush_jitter: String,
    pub precision: String,
    pub debug: bool,
    pub quiet: bool,
    pub logtarget: String,
    pub logfile: String,
    pub logfile_rotation_interval: String,
    pub logfile_rotation_max_size: String,
    pub logfile_rotation_max_archives: u64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            interval: "10s".to_string(),
            round_interval: true,
            metric_batch_size: 1000,
            metric_buffer_limit: 10000,
            collection_jitter: "0s".to_string(),
            flush_interval: "10s".to_string(),
            flush_jitter: "0s".to_string(),
            precision: String::new(),
            debug: false,
            quiet: false,
            logtarget: "file".to_string(),
            logfile: String::new(),
            logfile_rotation_interval: "0d".to_string(),
            logfile_rotation_max_size: "0MB".to_string(),
            logfile_rotation_max_archives: 5,
        }
    }
}
