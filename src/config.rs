use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;

/// How many comments one page request asks for.
pub const DEFAULT_COMMENT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the DealGrown backend, e.g. "http://localhost:3000/api".
    pub base_url: String,
    pub comment_page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            comment_page_size: DEFAULT_COMMENT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing level ("error", "warn", "info", "debug", "trace").
    pub level: String,
    /// Directory for the rolling log file. Defaults to "logs".
    pub log_directory: Option<String>,
    /// Per-module level overrides, appended to the filter string.
    pub module_levels: HashMap<String, String>,
    /// When true (debug builds only), per-view render timings are logged.
    pub enable_performance_metrics: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_directory: None,
            module_levels: HashMap::new(),
            enable_performance_metrics: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load `config.ron` from the working directory or next to the
    /// executable; fall back to defaults when no file parses.
    pub fn load() -> Self {
        let mut candidates = Vec::new();

        candidates.push(PathBuf::from("config.ron"));

        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match ron::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    /// Build the tracing filter string from the configured levels.
    pub fn filter_string(&self) -> String {
        let mut filter = self.logging.level.clone();
        for (module, level) in &self.logging.module_levels {
            filter.push_str(&format!(",{module}={level}"));
        }
        filter
    }
}
