use super::antibot::{get_random_user_agent, get_stealth_headers, RateLimiter, RequestDelay};
use super::clean::clean_text;
use super::scraper_trait::Scraper;
use super::site_config::SiteConfig;
use super::url_filter::passes_filters;
use crate::models::{Article, Language};
use crate::text::LanguageDetector;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

const MIN_TITLE_LEN: usize = 10;
const MIN_CONTENT_LEN: usize = 100;

/// Generic per-source adapter driven entirely by a [`SiteConfig`] rules table. Every named
/// source shares this implementation -- source-specific behavior is composition, not a
/// subclass (§4.1, §9).
pub struct NewsSiteScraper {
    config: SiteConfig,
    client: Client,
    rate_limiter: RateLimiter,
    max_retries: u32,
    language_detector: LanguageDetector,
    allow: Vec<Regex>,
    deny: Vec<Regex>,
}

impl NewsSiteScraper {
    pub fn new(
        config: SiteConfig,
        base_delay_ms: u64,
        max_delay_ms: u64,
        max_retries: u32,
        request_timeout_secs: u64,
        connect_timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .expect("failed to build scraper HTTP client");

        let spread_ms = max_delay_ms.saturating_sub(base_delay_ms).min(2000);
        let allow = config.compiled_allow();
        let deny = config.compiled_deny();

        Self {
            rate_limiter: RateLimiter::new(RequestDelay::new(base_delay_ms, spread_ms)),
            config,
            client,
            max_retries,
            language_detector: LanguageDetector::new(),
            allow,
            deny,
        }
    }

    fn resolve_url(&self, href: &str) -> Option<String> {
        if href.starts_with("http") {
            Some(href.to_string())
        } else if href.starts_with('/') {
            Some(format!("{}{}", self.config.base_url, href))
        } else {
            None
        }
    }

    fn select_first_text(&self, document: &Html, selectors: &[&str]) -> Option<String> {
        for raw in selectors {
            if let Ok(selector) = Selector::parse(raw) {
                if let Some(el) = document.select(&selector).next() {
                    let text: String = el.text().collect::<Vec<_>>().join(" ");
                    let cleaned = clean_text(&text);
                    if !cleaned.is_empty() {
                        return Some(cleaned);
                    }
                }
            }
        }
        None
    }

    fn fallback_paragraphs(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse("p").ok()?;
        let joined = document
            .select(&selector)
            .map(|el| el.text().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join(" ");
        let cleaned = clean_text(&joined);
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}

#[async_trait]
impl Scraper for NewsSiteScraper {
    fn source_name(&self) -> &str {
        self.config.source_name
    }

    fn base_url(&self) -> &str {
        self.config.base_url
    }

    async fn list_article_urls(&self, max_n: usize) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for path in self.config.listing_paths {
            if urls.len() >= max_n {
                break;
            }
            let listing_url = format!("{}{}", self.config.base_url, path);
            let html = match self.fetch_html(&listing_url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(source = self.source_name(), url = %listing_url, error = %e, "listing page fetch failed");
                    continue;
                }
            };

            let document = Html::parse_document(&html);
            for raw_selector in self.config.link_selectors {
                let Ok(selector) = Selector::parse(raw_selector) else { continue };
                for el in document.select(&selector) {
                    let Some(href) = el.value().attr("href") else { continue };
                    let Some(full_url) = self.resolve_url(href) else { continue };
                    if seen.contains(&full_url) {
                        continue;
                    }
                    if passes_filters(&full_url, &self.allow, &self.deny) {
                        seen.insert(full_url.clone());
                        urls.push(full_url);
                        if urls.len() >= max_n {
                            break;
                        }
                    }
                }
                if urls.len() >= max_n {
                    break;
                }
            }
        }

        urls.truncate(max_n);
        urls
    }

    async fn fetch_html(&self, url: &str) -> anyhow::Result<String> {
        let mut attempt = 0u32;
        loop {
            self.rate_limiter.wait_for_next_request().await;

            let mut request = self.client.get(url).header("User-Agent", get_random_user_agent());
            for (name, value) in get_stealth_headers() {
                request = request.header(name, value);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    return response.text().await.context("reading response body");
                }
                Ok(response) => {
                    let status = response.status();
                    if attempt >= self.max_retries {
                        return Err(anyhow!("non-success status {status} for {url} after {attempt} retries"));
                    }
                }
                Err(e) => {
                    if attempt >= self.max_retries {
                        return Err(anyhow!("request error for {url} after {attempt} retries: {e}"));
                    }
                }
            }

            let backoff_ms = (2000u64.saturating_mul(1u64 << attempt)).min(10_000);
            debug!(url, attempt, backoff_ms, "retrying after transient failure");
            tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            attempt += 1;
        }
    }

    fn extract_article(&self, html: &str, url: &str) -> anyhow::Result<Article> {
        let document = Html::parse_document(html);

        let title = self
            .select_first_text(&document, self.config.title_selectors)
            .filter(|t| t.chars().count() >= MIN_TITLE_LEN)
            .ok_or_else(|| anyhow!("no title of sufficient length found at {url}"))?;

        let content = self
            .select_first_text(&document, self.config.content_selectors)
            .filter(|c| c.chars().count() >= MIN_CONTENT_LEN)
            .or_else(|| self.fallback_paragraphs(&document))
            .filter(|c| c.chars().count() >= MIN_CONTENT_LEN)
            .ok_or_else(|| anyhow!("no content of sufficient length found at {url}"))?;

        let author = self.select_first_text(&document, self.config.author_selectors);

        let combined = format!("{title} {content}");
        let detected = self.language_detector.detect(&combined);
        let language = if detected == Language::Unknown { self.config.default_language } else { detected };

        Ok(Article::new(
            url.to_string(),
            title,
            content,
            author,
            self.config.source_name.to_string(),
            Utc::now(),
            language,
        ))
    }
}

/// Fallback extractor used when no specific adapter applies -- the "scrape arbitrary URL"
/// operation (§4.1). Uses generic heuristics instead of a site-specific rules table.
pub struct GenericScraper {
    client: Client,
    language_detector: LanguageDetector,
}

impl GenericScraper {
    pub fn new(request_timeout_secs: u64, connect_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .expect("failed to build generic scraper HTTP client");
        Self {
            client,
            language_detector: LanguageDetector::new(),
        }
    }

    pub async fn fetch_html(&self, url: &str) -> anyhow::Result<String> {
        let mut request = self.client.get(url).header("User-Agent", get_random_user_agent());
        for (name, value) in get_stealth_headers() {
            request = request.header(name, value);
        }
        let response = request.send().await.context("fetching arbitrary URL")?;
        response.text().await.context("reading response body")
    }

    pub fn extract_article(&self, html: &str, url: &str) -> anyhow::Result<Article> {
        let document = Html::parse_document(html);

        let title_selector = Selector::parse("h1, title").unwrap();
        let title = document
            .select(&title_selector)
            .next()
            .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
            .filter(|t| t.chars().count() >= MIN_TITLE_LEN)
            .ok_or_else(|| anyhow!("no usable title found at {url}"))?;

        let paragraph_selector = Selector::parse("p").unwrap();
        let content = clean_text(
            &document
                .select(&paragraph_selector)
                .map(|el| el.text().collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join(" "),
        );
        if content.chars().count() < MIN_CONTENT_LEN {
            return Err(anyhow!("no content of sufficient length found at {url}"));
        }

        let combined = format!("{title} {content}");
        let language = self.language_detector.detect(&combined);

        Ok(Article::new(
            url.to_string(),
            title,
            content,
            None,
            "generic".to_string(),
            Utc::now(),
            language,
        ))
    }

    pub async fn scrape_single_url(&self, url: &str) -> anyhow::Result<Article> {
        let html = self.fetch_html(url).await?;
        self.extract_article(&html, url)
    }
}
