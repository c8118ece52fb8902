use crate::models::Language;
use regex::Regex;

/// Per-source rules table consumed by [`super::news_site_scraper::NewsSiteScraper`]. Adapter
/// differences are expressed as data here, not as separate trait implementations (§9).
#[derive(Clone)]
pub struct SiteConfig {
    pub source_name: &'static str,
    pub base_url: &'static str,
    pub listing_paths: &'static [&'static str],
    pub link_selectors: &'static [&'static str],
    pub title_selectors: &'static [&'static str],
    pub content_selectors: &'static [&'static str],
    pub author_selectors: &'static [&'static str],
    pub allow_patterns: &'static [&'static str],
    pub deny_patterns: &'static [&'static str],
    pub default_language: Language,
}

impl SiteConfig {
    pub fn compiled_allow(&self) -> Vec<Regex> {
        self.allow_patterns.iter().map(|p| Regex::new(p).expect("valid allow pattern")).collect()
    }

    pub fn compiled_deny(&self) -> Vec<Regex> {
        self.deny_patterns.iter().map(|p| Regex::new(p).expect("valid deny pattern")).collect()
    }
}

/// The seven configured Bangladeshi news sources (grounded in the per-site scrapers this
/// framework replaces).
pub fn site_configs() -> Vec<SiteConfig> {
    vec![
        SiteConfig {
            source_name: "prothom_alo",
            base_url: "https://www.prothomalo.com",
            listing_paths: &["", "/bangladesh", "/politics", "/international", "/business", "/sports", "/entertainment"],
            link_selectors: &["a[href*=\"/bangladesh/\"]", "a[href*=\"/politics/\"]", ".story-card a", ".news-card a", "h2 a", "h3 a"],
            title_selectors: &["h1.title", "h1.headline", ".story-title h1", "h1"],
            content_selectors: &[".story-content", ".news-content", ".article-content", ".content-body"],
            author_selectors: &[".author-name", ".byline .author", ".story-author"],
            allow_patterns: &["/bangladesh/", "/politics/", "/international/", "/business/", "/sports/", "/entertainment/", "/opinion/"],
            deny_patterns: &["/live/", "/video/", "/photo/", "/gallery/", "/tag/", "/author/", "/search"],
            default_language: Language::Bengali,
        },
        SiteConfig {
            source_name: "daily_star",
            base_url: "https://www.thedailystar.net",
            listing_paths: &["", "/news/bangladesh", "/business", "/sports", "/world", "/opinion"],
            link_selectors: &["a[href*=\"/news/\"]", ".card a", ".title a", "h2 a", "h3 a"],
            title_selectors: &["h1.title", ".node-title h1", "h1"],
            content_selectors: &[".field-body", ".article-content", ".content-body"],
            author_selectors: &[".author", ".field-author", ".byline"],
            allow_patterns: &["/news/", "/business/", "/sports/", "/world/", "/opinion/"],
            deny_patterns: &["/video/", "/photo-gallery/", "/tag/", "/author/", "/search"],
            default_language: Language::English,
        },
        SiteConfig {
            source_name: "bd_pratidin",
            base_url: "https://www.bd-pratidin.com",
            listing_paths: &["", "/home/printnewsofvalue", "/national", "/sports", "/international"],
            link_selectors: &["a[href*=\"/news/\"]", ".news-title a", "h2 a", "h3 a"],
            title_selectors: &["h1.news-title", ".article-title h1", "h1"],
            content_selectors: &[".news-content", ".content-details", ".article-content"],
            author_selectors: &[".reporter-name", ".byline"],
            allow_patterns: &["/national/", "/sports/", "/international/", r"/news/\d"],
            deny_patterns: &["/video/", "/photo/", "/tag/", "/search"],
            default_language: Language::Bengali,
        },
        SiteConfig {
            source_name: "ekattor_tv",
            base_url: "https://ekattor.tv",
            listing_paths: &["", "/category/bangladesh", "/category/politics", "/category/sports"],
            link_selectors: &["a[href*=\"/news/\"]", ".post-title a", "h2 a", "h3 a"],
            title_selectors: &["h1.entry-title", ".post-title h1", "h1"],
            content_selectors: &[".entry-content", ".post-content", ".content-body"],
            author_selectors: &[".author-name", ".byline"],
            allow_patterns: &["/news/", "/category/bangladesh/", "/category/politics/", "/category/sports/"],
            deny_patterns: &["/video/", "/live/", "/tag/", "/search"],
            default_language: Language::Bengali,
        },
        SiteConfig {
            source_name: "atn_news",
            base_url: "https://www.atnnewsbd.com",
            listing_paths: &["", "/bangladesh", "/international", "/sports"],
            link_selectors: &["a[href*=\"/news/\"]", ".news-item a", "h2 a", "h3 a"],
            title_selectors: &["h1.news-details-title", "h1.title", "h1"],
            content_selectors: &[".news-details-content", ".news-content", ".content-body"],
            author_selectors: &[".reporter", ".byline"],
            allow_patterns: &["/news/", "/bangladesh/", "/international/", "/sports/"],
            deny_patterns: &["/video/", "/live/", "/photo/", "/search"],
            default_language: Language::Bengali,
        },
        SiteConfig {
            source_name: "jamuna_tv",
            base_url: "https://www.jamuna.tv",
            listing_paths: &["", "/news/bangladesh", "/news/politics", "/news/sports"],
            link_selectors: &["a[href*=\"/news/\"]", ".news-card a", "h2 a", "h3 a"],
            title_selectors: &["h1.news-title", ".single-news-title h1", "h1"],
            content_selectors: &[".news-details", ".single-news-content", ".content-body"],
            author_selectors: &[".author-name", ".byline"],
            allow_patterns: &[r"/news/\w+/\d"],
            deny_patterns: &["/video/", "/live/", "/photo/", "/search"],
            default_language: Language::Bengali,
        },
        SiteConfig {
            source_name: "somoy_news",
            base_url: "https://www.somoynews.tv",
            listing_paths: &["", "/bangladesh", "/politics", "/international", "/sports"],
            link_selectors: &["a[href*=\"/news/\"]", ".news-card-title a", "h2 a", "h3 a"],
            title_selectors: &["h1.news-title", ".news-details-title h1", "h1"],
            content_selectors: &[".news-details-area", ".news-content", ".content-body"],
            author_selectors: &[".reporter-name", ".byline"],
            allow_patterns: &[r"/news/\d"],
            deny_patterns: &["/video/", "/live/", "/photo/", "/search"],
            default_language: Language::Bengali,
        },
    ]
}
