//! Composes every other module as explicitly constructed state, per §4.10 and §9's
//! anti-singleton directive: no module-level lazily-initialized globals, only fields held here.

use crate::analysis::{BiasAnalyzer, TopicExtractor};
use crate::config::PipelineConfig;
use crate::models::Article;
use crate::monitor::{Monitor, MetricsSample};
use crate::scheduler::{JobFn, ScheduledJob, Scheduler};
use crate::scraping::ScraperManager;
use crate::similarity::Comparator;
use crate::store::ArticleStore;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Daily counters reset by the caller at day boundaries (§4.10).
#[derive(Debug, Default)]
pub struct DailyStats {
    pub articles_scraped_today: AtomicU64,
    pub articles_analyzed_today: AtomicU64,
    pub scraping_errors_today: AtomicU64,
    pub analysis_errors_today: AtomicU64,
}

impl DailyStats {
    pub fn reset(&self) {
        self.articles_scraped_today.store(0, Ordering::Relaxed);
        self.articles_analyzed_today.store(0, Ordering::Relaxed);
        self.scraping_errors_today.store(0, Ordering::Relaxed);
        self.analysis_errors_today.store(0, Ordering::Relaxed);
    }
}

/// Top-level composition root: Scheduler, Scraper Manager, Store, Analyzer, and Monitor, all
/// constructed explicitly at process startup (§4.10).
pub struct Orchestrator {
    config: Arc<PipelineConfig>,
    store: Arc<dyn ArticleStore>,
    analyzer: Arc<BiasAnalyzer>,
    scraper_manager: Arc<ScraperManager>,
    scheduler: Arc<Scheduler>,
    monitor: Arc<Monitor>,
    daily_stats: Arc<DailyStats>,
}

impl Orchestrator {
    pub fn new(
        config: Arc<PipelineConfig>,
        store: Arc<dyn ArticleStore>,
        analyzer: Arc<BiasAnalyzer>,
        scraper_manager: Arc<ScraperManager>,
    ) -> Self {
        let scheduler = Arc::new(Scheduler::new(config.scheduler.resolve_tick_interval_secs()));
        let monitor = Arc::new(Monitor::new(&config.monitoring));

        Self {
            config,
            store,
            analyzer,
            scraper_manager,
            scheduler,
            monitor,
            daily_stats: Arc::new(DailyStats::default()),
        }
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_arc(&self) -> Arc<Scheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn daily_stats(&self) -> &DailyStats {
        &self.daily_stats
    }

    /// Installs one scraping job per registered source, plus an analysis job and a
    /// metrics-collection job, per §4.10.
    pub async fn install_jobs(self: &Arc<Self>) {
        let scrape_interval = self.config.scheduler.resolve_scrape_job_interval_minutes() as i64;
        let analysis_interval = self.config.scheduler.resolve_analysis_job_interval_minutes() as i64;
        let metrics_interval = self.config.scheduler.resolve_metrics_job_interval_minutes() as i64;
        let max_retries = self.config.scraper.resolve_max_retries();

        for info in self.scraper_manager.scraper_info() {
            let job_id = format!("scrape_{}", info.source_name);
            let this = Arc::clone(self);
            let source = info.source_name.clone();
            let run: JobFn = Arc::new(move || {
                let this = Arc::clone(&this);
                let source = source.clone();
                Box::pin(async move { this.scrape_source(&source).await })
            });
            self.scheduler
                .add(ScheduledJob::new(job_id, format!("Scrape {}", info.source_name), scrape_interval, max_retries), run)
                .await;
        }

        {
            let this = Arc::clone(self);
            let run: JobFn = Arc::new(move || {
                let this = Arc::clone(&this);
                Box::pin(async move { this.analyze_pending().await.map(|_| ()) })
            });
            self.scheduler
                .add(ScheduledJob::new("analyze_pending", "Analyze pending articles", analysis_interval, max_retries), run)
                .await;
        }

        {
            let this = Arc::clone(self);
            let run: JobFn = Arc::new(move || {
                let this = Arc::clone(&this);
                Box::pin(async move { this.collect_metrics().await })
            });
            self.scheduler
                .add(ScheduledJob::new("collect_metrics", "Collect health metrics", metrics_interval, max_retries), run)
                .await;
        }
    }

    async fn scrape_source(&self, source: &str) -> anyhow::Result<()> {
        let articles = self.scraper_manager.scrape_one(source, 50).await;
        let count = articles.len();
        let result = self.store.put_batch(articles).map_err(|e| anyhow::anyhow!(e.to_string()))?;

        self.daily_stats
            .articles_scraped_today
            .fetch_add(result.stored as u64, Ordering::Relaxed);

        if count == 0 {
            self.daily_stats.scraping_errors_today.fetch_add(1, Ordering::Relaxed);
            return Err(anyhow::anyhow!("no articles scraped from {source}"));
        }
        Ok(())
    }

    /// Runs all registered scrapers, stores results per source, and alerts if most sources
    /// failed (§4.10).
    pub async fn scrape_all_sources(&self) -> anyhow::Result<std::collections::HashMap<String, usize>> {
        let results = self.scraper_manager.scrape_all(50, 3).await;
        let total_sources = results.len().max(1);
        let mut failed_sources = 0usize;
        let mut counts = std::collections::HashMap::new();

        for (source, articles) in results {
            if articles.is_empty() {
                failed_sources += 1;
                self.daily_stats.scraping_errors_today.fetch_add(1, Ordering::Relaxed);
                continue;
            }
            match self.store.put_batch(articles) {
                Ok(batch) => {
                    self.daily_stats
                        .articles_scraped_today
                        .fetch_add(batch.stored as u64, Ordering::Relaxed);
                    counts.insert(source, batch.stored);
                }
                Err(e) => {
                    warn!(source = %source, error = %e, "failed to store scraped batch");
                    failed_sources += 1;
                    self.daily_stats.scraping_errors_today.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        if failed_sources * 2 > total_sources {
            self.monitor.raise(
                crate::monitor::AlertLevel::Error,
                None,
                "Majority of sources failed to scrape",
                format!("{failed_sources} of {total_sources} sources produced no articles"),
            );
        }

        Ok(counts)
    }

    /// Fetches up to `batch` unanalyzed articles, analyzes, and writes back. Failures are
    /// per-article and never propagate (§4.10).
    pub async fn analyze_pending(&self) -> anyhow::Result<usize> {
        let batch = self.config.scheduler.resolve_analysis_batch_size();
        let pending = self
            .store
            .list_without_bias_scores(batch)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        let topic_extractor = TopicExtractor::new();
        let mut analyzed = 0usize;
        for article in &pending {
            let scores = self.analyzer.analyze(article);
            match self.store.set_bias_scores(&article.id, scores) {
                Ok(()) => {
                    analyzed += 1;
                    self.daily_stats.articles_analyzed_today.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    error!(article_id = %article.id, error = %e, "failed to persist bias scores");
                    self.daily_stats.analysis_errors_today.fetch_add(1, Ordering::Relaxed);
                    continue;
                }
            }

            let topics = topic_extractor.extract_topics(&article.title, &article.content, article.language);
            if let Err(e) = self.store.set_topics(&article.id, topics) {
                error!(article_id = %article.id, error = %e, "failed to persist topics");
            }
        }

        info!(analyzed, pending = pending.len(), "analyze_pending complete");
        Ok(analyzed)
    }

    async fn collect_metrics(&self) -> anyhow::Result<()> {
        let health = self.scraper_manager.health_status();
        let total = health.len().max(1);
        let healthy = health.values().filter(|h| h.is_healthy).count();
        let avg_response_time_ms = if health.is_empty() {
            0.0
        } else {
            health.values().map(|h| h.avg_response_time_ms).sum::<f64>() / health.len() as f64
        };

        let stats = self.store.stats().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let analysis_success_rate = if stats.total == 0 {
            100.0
        } else {
            stats.analyzed as f64 / stats.total as f64 * 100.0
        };

        self.monitor
            .ingest_metrics(
                MetricsSample {
                    timestamp: Some(Utc::now()),
                    scraping_success_rate: healthy as f64 / total as f64 * 100.0,
                    analysis_success_rate,
                    avg_response_time_ms,
                    errors_last_hour: health.values().map(|h| h.total_errors).sum(),
                    database_size_gb: 0.0,
                },
                None,
            )
            .await;
        Ok(())
    }

    /// Borrowed on demand -- never stored as a field, since it borrows both the Store and the
    /// Analyzer (§4.7).
    pub fn comparator(&self) -> Comparator<'_> {
        Comparator::new(self.store.as_ref(), self.analyzer.as_ref())
    }

    pub fn store(&self) -> &dyn ArticleStore {
        self.store.as_ref()
    }

    pub fn analyzer(&self) -> &BiasAnalyzer {
        &self.analyzer
    }

    pub async fn find_similar_articles(&self, target: &Article, candidates: &[Article]) -> Vec<Article> {
        self.comparator()
            .find_similar_articles(target, candidates)
            .into_iter()
            .cloned()
            .collect()
    }
}
