use regex::Regex;
use std::sync::OnceLock;

fn numeric_or_year_segment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(\d{3,}|20\d{2})(/|$|[-.])").unwrap())
}

/// "Article-shaped" heuristic: sufficient path depth plus a numeric id or year segment (§4.1).
pub fn is_article_shaped(url: &str) -> bool {
    let path = url::Url::parse(url).map(|u| u.path().to_string()).unwrap_or_default();
    let depth = path.split('/').filter(|s| !s.is_empty()).count();
    depth >= 2 && numeric_or_year_segment().is_match(&path)
}

/// A URL is accepted when it matches at least one allow-pattern, no deny-pattern, and looks
/// article-shaped (§4.1).
pub fn passes_filters(url: &str, allow: &[Regex], deny: &[Regex]) -> bool {
    if deny.iter().any(|re| re.is_match(url)) {
        return false;
    }
    if !allow.iter().any(|re| re.is_match(url)) {
        return false;
    }
    is_article_shaped(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_url_with_numeric_id() {
        assert!(is_article_shaped("https://example.com/bangladesh/12345-story-title"));
    }

    #[test]
    fn rejects_shallow_url() {
        assert!(!is_article_shaped("https://example.com/bangladesh"));
    }

    #[test]
    fn accepts_url_with_year_segment() {
        assert!(is_article_shaped("https://example.com/news/2024/politics"));
    }

    #[test]
    fn filters_respect_allow_and_deny() {
        let allow = vec![Regex::new("/news/").unwrap()];
        let deny = vec![Regex::new("/video/").unwrap()];
        assert!(passes_filters("https://example.com/news/2024/55-story", &allow, &deny));
        assert!(!passes_filters("https://example.com/news/video/2024/55", &allow, &deny));
        assert!(!passes_filters("https://example.com/sports/2024/55-story", &allow, &deny));
    }
}
