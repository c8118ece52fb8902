mod antibot;
mod clean;
mod manager;
mod news_site_scraper;
mod scraper_trait;
mod site_config;
mod url_filter;

pub use antibot::{RateLimiter, RequestDelay};
pub use manager::{ScraperHealth, ScraperInfo, ScraperManager};
pub use news_site_scraper::{GenericScraper, NewsSiteScraper};
pub use scraper_trait::Scraper;
pub use site_config::{site_configs, SiteConfig};
