use std::path::PathBuf;

/// Scraper-related config (delays, retries, timeouts, user-agent pool size).
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct ScraperSettingsConfig {
    pub base_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub max_retries: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl ScraperSettingsConfig {
    /// Base inter-request delay: JSON field -> `SCRAPER_BASE_DELAY_MS` env var -> 2000.
    pub fn resolve_base_delay_ms(&self) -> u64 {
        if let Some(v) = self.base_delay_ms {
            return v;
        }
        std::env::var("SCRAPER_BASE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2000)
    }

    /// Maximum backoff delay: JSON field -> `SCRAPER_MAX_DELAY_MS` env var -> 10_000.
    pub fn resolve_max_delay_ms(&self) -> u64 {
        if let Some(v) = self.max_delay_ms {
            return v;
        }
        std::env::var("SCRAPER_MAX_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000)
    }

    /// Max retries per request: JSON field -> `SCRAPER_MAX_RETRIES` env var -> 3.
    pub fn resolve_max_retries(&self) -> u32 {
        if let Some(v) = self.max_retries {
            return v;
        }
        std::env::var("SCRAPER_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3)
    }

    /// Request timeout: JSON field -> `SCRAPER_REQUEST_TIMEOUT_SECS` env var -> 30.
    pub fn resolve_request_timeout_secs(&self) -> u64 {
        if let Some(v) = self.request_timeout_secs {
            return v;
        }
        std::env::var("SCRAPER_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30)
    }

    /// Connect timeout: JSON field -> `SCRAPER_CONNECT_TIMEOUT_SECS` env var -> 10.
    pub fn resolve_connect_timeout_secs(&self) -> u64 {
        if let Some(v) = self.connect_timeout_secs {
            return v;
        }
        std::env::var("SCRAPER_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10)
    }
}

/// Scheduler-related config.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct SchedulerConfigFile {
    pub tick_interval_secs: Option<u64>,
    pub scrape_job_interval_minutes: Option<u64>,
    pub analysis_batch_size: Option<usize>,
    pub analysis_job_interval_minutes: Option<u64>,
    pub metrics_job_interval_minutes: Option<u64>,
}

impl SchedulerConfigFile {
    /// Scheduler tick interval: JSON field -> `SCHEDULER_TICK_INTERVAL_SECS` env var -> 60.
    pub fn resolve_tick_interval_secs(&self) -> u64 {
        if let Some(v) = self.tick_interval_secs {
            return v;
        }
        std::env::var("SCHEDULER_TICK_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60)
    }

    pub fn resolve_scrape_job_interval_minutes(&self) -> u64 {
        if let Some(v) = self.scrape_job_interval_minutes {
            return v;
        }
        std::env::var("SCRAPE_JOB_INTERVAL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60)
    }

    pub fn resolve_analysis_batch_size(&self) -> usize {
        if let Some(v) = self.analysis_batch_size {
            return v;
        }
        std::env::var("ANALYSIS_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50)
    }

    pub fn resolve_analysis_job_interval_minutes(&self) -> u64 {
        if let Some(v) = self.analysis_job_interval_minutes {
            return v;
        }
        std::env::var("ANALYSIS_JOB_INTERVAL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30)
    }

    pub fn resolve_metrics_job_interval_minutes(&self) -> u64 {
        if let Some(v) = self.metrics_job_interval_minutes {
            return v;
        }
        std::env::var("METRICS_JOB_INTERVAL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15)
    }
}

/// Monitor thresholds and retention.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct MonitoringConfigFile {
    pub scraping_success_rate_min: Option<f64>,
    pub analysis_success_rate_min: Option<f64>,
    pub response_time_max_ms: Option<f64>,
    pub error_count_max_per_hour: Option<u64>,
    pub database_size_max_gb: Option<f64>,
    pub alert_retention_days: Option<i64>,
    pub metrics_retention_days: Option<i64>,
    pub email_enabled: Option<bool>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_from: Option<String>,
}

impl MonitoringConfigFile {
    pub fn resolve_scraping_success_rate_min(&self) -> f64 {
        self.scraping_success_rate_min.unwrap_or(80.0)
    }

    pub fn resolve_analysis_success_rate_min(&self) -> f64 {
        self.analysis_success_rate_min.unwrap_or(90.0)
    }

    pub fn resolve_response_time_max_ms(&self) -> f64 {
        self.response_time_max_ms.unwrap_or(5000.0)
    }

    pub fn resolve_error_count_max_per_hour(&self) -> u64 {
        self.error_count_max_per_hour.unwrap_or(50)
    }

    pub fn resolve_database_size_max_gb(&self) -> f64 {
        self.database_size_max_gb.unwrap_or(10.0)
    }

    pub fn resolve_alert_retention_days(&self) -> i64 {
        self.alert_retention_days.unwrap_or(30)
    }

    pub fn resolve_metrics_retention_days(&self) -> i64 {
        self.metrics_retention_days.unwrap_or(7)
    }

    pub fn resolve_email_enabled(&self) -> bool {
        self.email_enabled.unwrap_or(false)
    }
}

/// Datastore connection info — opaque to the core, handed to whatever Store backend is wired in.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct DatastoreConfig {
    pub uri: Option<String>,
    pub database_name: Option<String>,
}

impl DatastoreConfig {
    pub fn resolve_uri(&self) -> Option<String> {
        if let Some(u) = &self.uri {
            if !u.trim().is_empty() {
                return Some(u.clone());
            }
        }
        std::env::var("DATASTORE_URI").ok().filter(|v| !v.trim().is_empty())
    }

    pub fn resolve_database_name(&self) -> String {
        if let Some(n) = &self.database_name {
            if !n.trim().is_empty() {
                return n.clone();
            }
        }
        std::env::var("DATASTORE_DATABASE_NAME").unwrap_or_else(|_| "media_bias".to_string())
    }
}

/// Top-level config loaded from `pipeline.json`.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct PipelineConfig {
    #[serde(default)]
    pub scraper: ScraperSettingsConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfigFile,
    #[serde(default)]
    pub monitoring: MonitoringConfigFile,
    #[serde(default)]
    pub datastore: DatastoreConfig,
}

/// Load `pipeline.json` from standard locations.
///
/// Search order (first found wins):
/// 1. `./pipeline.json` (process cwd)
/// 2. `../pipeline.json` (one level up)
/// 3. `PIPELINE_CONFIG` env var path
///
/// Missing file -> `PipelineConfig::default()` (silent, all env-var fallbacks apply).
/// Parse error -> log a warning, return `PipelineConfig::default()`.
pub fn load_pipeline_config() -> PipelineConfig {
    let candidates: Vec<PathBuf> = {
        let mut v = vec![
            PathBuf::from("pipeline.json"),
            PathBuf::from("../pipeline.json"),
        ];
        if let Ok(env_path) = std::env::var("PIPELINE_CONFIG") {
            v.insert(0, PathBuf::from(env_path));
        }
        v
    };

    for path in &candidates {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                return match serde_json::from_str::<PipelineConfig>(&contents) {
                    Ok(cfg) => {
                        tracing::info!("pipeline.json loaded from {}", path.display());
                        cfg
                    }
                    Err(e) => {
                        tracing::warn!(
                            "pipeline.json parse error at {}: {} - using defaults",
                            path.display(),
                            e
                        );
                        PipelineConfig::default()
                    }
                };
            }
            Err(_) => continue, // file not found at this path - try next
        }
    }

    PipelineConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.scraper.resolve_base_delay_ms(), 2000);
        assert_eq!(cfg.scraper.resolve_max_retries(), 3);
        assert_eq!(cfg.scheduler.resolve_tick_interval_secs(), 60);
        assert_eq!(cfg.scheduler.resolve_analysis_batch_size(), 50);
        assert_eq!(cfg.monitoring.resolve_scraping_success_rate_min(), 80.0);
        assert_eq!(cfg.monitoring.resolve_database_size_max_gb(), 10.0);
    }

    #[test]
    fn missing_file_yields_defaults() {
        std::env::remove_var("PIPELINE_CONFIG");
        let cfg = load_pipeline_config();
        assert_eq!(cfg.scraper.resolve_max_retries(), 3);
    }
}
