//! Alerts and rolling metrics, per §4.11.

use crate::config::MonitoringConfigFile;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
    pub resolved: bool,
}

impl Alert {
    fn new(level: AlertLevel, source: Option<&str>, title: impl Into<String>, message: impl Into<String>) -> Self {
        let source_label = source.unwrap_or("system");
        let level_label = match level {
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
            AlertLevel::Critical => "critical",
        };
        Self {
            id: format!("{}_{}_{}", source_label, level_label, Utc::now().timestamp()),
            level,
            title: title.into(),
            message: message.into(),
            timestamp: Utc::now(),
            source: source.map(|s| s.to_string()),
            resolved: false,
        }
    }
}

/// One ingested metrics sample (scraping + analysis run stats for one tick).
#[derive(Debug, Clone, Default)]
pub struct MetricsSample {
    pub timestamp: Option<DateTime<Utc>>,
    pub scraping_success_rate: f64,
    pub analysis_success_rate: f64,
    pub avg_response_time_ms: f64,
    pub errors_last_hour: u64,
    pub database_size_gb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SystemHealth {
    Healthy,
    Warning,
    Error,
    Critical,
}

/// Thin, injectable SMTP client so the monitor's alerting logic is testable without a real mail
/// transport (§4.11).
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send(&self, alert: &Alert) -> anyhow::Result<()>;
}

struct Thresholds {
    scraping_success_rate_min: f64,
    analysis_success_rate_min: f64,
    response_time_max_ms: f64,
    error_count_max_per_hour: u64,
    database_size_max_gb: f64,
    alert_retention_days: i64,
    metrics_retention_days: i64,
    email_enabled: bool,
}

impl From<&MonitoringConfigFile> for Thresholds {
    fn from(cfg: &MonitoringConfigFile) -> Self {
        Self {
            scraping_success_rate_min: cfg.resolve_scraping_success_rate_min(),
            analysis_success_rate_min: cfg.resolve_analysis_success_rate_min(),
            response_time_max_ms: cfg.resolve_response_time_max_ms(),
            error_count_max_per_hour: cfg.resolve_error_count_max_per_hour(),
            database_size_max_gb: cfg.resolve_database_size_max_gb(),
            alert_retention_days: cfg.resolve_alert_retention_days(),
            metrics_retention_days: cfg.resolve_metrics_retention_days(),
            email_enabled: cfg.resolve_email_enabled(),
        }
    }
}

struct State {
    alerts: Vec<Alert>,
    metrics: Vec<MetricsSample>,
}

/// Keeps alerts and rolling metrics in memory, triggering threshold alerts on ingestion (§4.11).
pub struct Monitor {
    state: RwLock<State>,
    thresholds: Thresholds,
    notifier: Option<Box<dyn EmailNotifier>>,
}

impl Monitor {
    pub fn new(cfg: &MonitoringConfigFile) -> Self {
        Self {
            state: RwLock::new(State {
                alerts: Vec::new(),
                metrics: Vec::new(),
            }),
            thresholds: Thresholds::from(cfg),
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn EmailNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    fn push_alert(&self, alert: Alert) {
        warn!(level = ?alert.level, title = %alert.title, "alert raised");
        self.state.write().unwrap().alerts.push(alert);
    }

    /// Ingests one metrics sample and raises any alerts its thresholds trip (§4.11).
    pub async fn ingest_metrics(&self, mut sample: MetricsSample, source: Option<&str>) {
        sample.timestamp.get_or_insert(Utc::now());

        if sample.scraping_success_rate < self.thresholds.scraping_success_rate_min {
            self.push_alert(Alert::new(
                AlertLevel::Warning,
                source,
                "Low scraping success rate",
                format!("scraping success rate {:.1}% below minimum {:.1}%", sample.scraping_success_rate, self.thresholds.scraping_success_rate_min),
            ));
        }
        if sample.analysis_success_rate < self.thresholds.analysis_success_rate_min {
            self.push_alert(Alert::new(
                AlertLevel::Warning,
                source,
                "Low analysis success rate",
                format!("analysis success rate {:.1}% below minimum {:.1}%", sample.analysis_success_rate, self.thresholds.analysis_success_rate_min),
            ));
        }
        if sample.avg_response_time_ms > self.thresholds.response_time_max_ms {
            self.push_alert(Alert::new(
                AlertLevel::Warning,
                source,
                "High average response time",
                format!("avg response time {:.0}ms exceeds maximum {:.0}ms", sample.avg_response_time_ms, self.thresholds.response_time_max_ms),
            ));
        }
        if sample.errors_last_hour > self.thresholds.error_count_max_per_hour {
            let alert = Alert::new(
                AlertLevel::Error,
                source,
                "Error rate threshold exceeded",
                format!("{} errors in the last hour exceeds maximum {}", sample.errors_last_hour, self.thresholds.error_count_max_per_hour),
            );
            self.maybe_notify(&alert).await;
            self.push_alert(alert);
        }
        if sample.database_size_gb > self.thresholds.database_size_max_gb {
            self.push_alert(Alert::new(
                AlertLevel::Warning,
                source,
                "Database size threshold exceeded",
                format!("database size {:.2}GB exceeds maximum {:.2}GB", sample.database_size_gb, self.thresholds.database_size_max_gb),
            ));
        }

        self.state.write().unwrap().metrics.push(sample);
    }

    pub fn raise(&self, level: AlertLevel, source: Option<&str>, title: impl Into<String>, message: impl Into<String>) {
        self.push_alert(Alert::new(level, source, title, message));
    }

    async fn maybe_notify(&self, alert: &Alert) {
        if !self.thresholds.email_enabled {
            return;
        }
        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.send(alert).await {
                warn!(error = %e, "failed to send alert email");
            } else {
                info!(alert_id = %alert.id, "alert email sent");
            }
        }
    }

    pub fn resolve(&self, alert_id: &str) {
        let mut guard = self.state.write().unwrap();
        if let Some(alert) = guard.alerts.iter_mut().find(|a| a.id == alert_id) {
            alert.resolved = true;
        }
    }

    /// Aggregates current unresolved alerts into one overall status (§4.11).
    pub fn get_system_health(&self) -> SystemHealth {
        let guard = self.state.read().unwrap();
        let unresolved: Vec<&Alert> = guard.alerts.iter().filter(|a| !a.resolved).collect();

        if unresolved.iter().any(|a| a.level == AlertLevel::Critical) {
            SystemHealth::Critical
        } else if unresolved.iter().any(|a| a.level == AlertLevel::Error) {
            SystemHealth::Error
        } else if unresolved.iter().any(|a| a.level == AlertLevel::Warning) {
            SystemHealth::Warning
        } else {
            SystemHealth::Healthy
        }
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.state.read().unwrap().alerts.clone()
    }

    pub fn metrics(&self) -> Vec<MetricsSample> {
        self.state.read().unwrap().metrics.clone()
    }

    /// Prunes alerts/metrics older than the configured retention windows (default 30d/7d).
    pub fn apply_retention(&self) {
        let now = Utc::now();
        let alert_cutoff = now - Duration::days(self.thresholds.alert_retention_days);
        let metrics_cutoff = now - Duration::days(self.thresholds.metrics_retention_days);

        let mut guard = self.state.write().unwrap();
        guard.alerts.retain(|a| a.timestamp >= alert_cutoff);
        guard.metrics.retain(|m| m.timestamp.map(|t| t >= metrics_cutoff).unwrap_or(true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn low_scraping_success_rate_raises_warning() {
        let monitor = Monitor::new(&MonitoringConfigFile::default());
        monitor
            .ingest_metrics(
                MetricsSample {
                    scraping_success_rate: 50.0,
                    analysis_success_rate: 100.0,
                    avg_response_time_ms: 100.0,
                    errors_last_hour: 0,
                    database_size_gb: 0.1,
                    timestamp: None,
                },
                Some("prothom_alo"),
            )
            .await;

        assert_eq!(monitor.get_system_health(), SystemHealth::Warning);
        assert_eq!(monitor.alerts().len(), 1);
        assert_eq!(monitor.alerts()[0].level, AlertLevel::Warning);
    }

    #[tokio::test]
    async fn excessive_errors_raise_error_level_and_health() {
        let monitor = Monitor::new(&MonitoringConfigFile::default());
        monitor
            .ingest_metrics(
                MetricsSample {
                    scraping_success_rate: 100.0,
                    analysis_success_rate: 100.0,
                    avg_response_time_ms: 100.0,
                    errors_last_hour: 51,
                    database_size_gb: 0.1,
                    timestamp: None,
                },
                None,
            )
            .await;

        assert_eq!(monitor.get_system_health(), SystemHealth::Error);
    }

    #[test]
    fn healthy_when_no_alerts() {
        let monitor = Monitor::new(&MonitoringConfigFile::default());
        assert_eq!(monitor.get_system_health(), SystemHealth::Healthy);
    }

    #[test]
    fn resolving_the_only_alert_restores_healthy_status() {
        let monitor = Monitor::new(&MonitoringConfigFile::default());
        monitor.raise(AlertLevel::Critical, Some("store"), "Store down", "connection refused");
        assert_eq!(monitor.get_system_health(), SystemHealth::Critical);

        let id = monitor.alerts()[0].id.clone();
        monitor.resolve(&id);
        assert_eq!(monitor.get_system_health(), SystemHealth::Healthy);
    }

    #[test]
    fn alert_id_has_documented_shape() {
        let monitor = Monitor::new(&MonitoringConfigFile::default());
        monitor.raise(AlertLevel::Error, Some("daily_star"), "t", "m");
        let id = &monitor.alerts()[0].id;
        assert!(id.starts_with("daily_star_error_"));
    }
}
