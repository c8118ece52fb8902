use media_bias_pipeline::analysis::BiasAnalyzer;
use media_bias_pipeline::config::load_pipeline_config;
use media_bias_pipeline::scraping::{site_configs, NewsSiteScraper, ScraperManager};
use media_bias_pipeline::store::InMemoryArticleStore;
use media_bias_pipeline::Orchestrator;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Arc::new(load_pipeline_config());
    info!("media-bias-pipeline starting up");

    let mut scraper_manager = ScraperManager::new();
    for site in site_configs() {
        let scraper = NewsSiteScraper::new(
            site,
            config.scraper.resolve_base_delay_ms(),
            config.scraper.resolve_max_delay_ms(),
            config.scraper.resolve_max_retries(),
            config.scraper.resolve_request_timeout_secs(),
            config.scraper.resolve_connect_timeout_secs(),
        );
        scraper_manager.register(Arc::new(scraper));
    }

    let store: Arc<dyn media_bias_pipeline::store::ArticleStore> = Arc::new(InMemoryArticleStore::new());
    let analyzer = Arc::new(BiasAnalyzer::new());
    let scraper_manager = Arc::new(scraper_manager);

    let orchestrator = Arc::new(Orchestrator::new(config, store, analyzer, scraper_manager));
    orchestrator.install_jobs().await;

    let run_once = std::env::args().any(|a| a == "--once");
    if run_once {
        info!("running a single scrape + analyze pass (--once)");
        let counts = orchestrator.scrape_all_sources().await?;
        info!(?counts, "scrape pass complete");
        let analyzed = orchestrator.analyze_pending().await?;
        info!(analyzed, "analysis pass complete");
        return Ok(());
    }

    info!("entering scheduler loop (ctrl-c to stop)");
    let scheduler = orchestrator.scheduler_arc();
    tokio::select! {
        _ = scheduler.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            scheduler.shutdown(std::time::Duration::from_secs(10)).await;
        }
    }

    Ok(())
}
