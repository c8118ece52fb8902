use crate::models::Article;
use async_trait::async_trait;
use tracing::warn;

/// Capability set shared by every source adapter (§4.1, §9). Modeled as a trait -- adapter-
/// specific behavior is composition over a shared rules table, not inheritance.
#[async_trait]
pub trait Scraper: Send + Sync {
    fn source_name(&self) -> &str;

    fn base_url(&self) -> &str;

    /// Up to `max_n` candidate article URLs from listing/section pages.
    async fn list_article_urls(&self, max_n: usize) -> Vec<String>;

    /// Fetch raw HTML for a URL, honoring this adapter's own client, rate limiter, and retries.
    async fn fetch_html(&self, url: &str) -> anyhow::Result<String>;

    /// Parse one already-fetched article page.
    fn extract_article(&self, html: &str, url: &str) -> anyhow::Result<Article>;

    /// Template method: list, fetch, extract, accumulating successes. Never raises --
    /// partial results are returned (§4.1).
    async fn scrape(&self, max_n: usize) -> Vec<Article> {
        let urls = self.list_article_urls(max_n).await;
        if urls.is_empty() {
            warn!(source = self.source_name(), "adapter returned no candidate URLs");
        }

        let mut articles = Vec::new();
        for url in urls {
            match self.fetch_html(&url).await {
                Ok(html) => match self.extract_article(&html, &url) {
                    Ok(article) => articles.push(article),
                    Err(e) => warn!(source = self.source_name(), url, error = %e, "extraction failed, skipping"),
                },
                Err(e) => warn!(source = self.source_name(), url, error = %e, "fetch failed, skipping"),
            }
        }
        articles
    }
}
