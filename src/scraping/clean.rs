use regex::Regex;
use std::sync::OnceLock;

fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").unwrap())
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").unwrap())
}

fn whitespace_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Boilerplate phrases stripped from extracted text, in both languages (§4.1).
const BOILERPLATE_PHRASES: &[&str] = &[
    "Advertisement",
    "Click here to",
    "Read more:",
    "Subscribe to",
    "Follow us on",
    "Share this:",
    "বিজ্ঞাপন",
    "আরও পড়ুন",
    "সংবাদ সম্মেলনে",
    "সাবস্ক্রাইব করুন",
];

/// Normalizes whitespace, strips URLs and email addresses, and removes boilerplate phrases.
/// Applied by the scraper framework before an extracted title/content is accepted (§4.1).
pub fn clean_text(raw: &str) -> String {
    let mut text = url_pattern().replace_all(raw, "").to_string();
    text = email_pattern().replace_all(&text, "").to_string();
    for phrase in BOILERPLATE_PHRASES {
        text = text.replace(phrase, "");
    }
    whitespace_pattern().replace_all(text.trim(), " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean_text("Hello\n\n  world   today"), "Hello world today");
    }

    #[test]
    fn strips_urls_and_emails() {
        let cleaned = clean_text("Contact us at tips@example.com or visit https://example.com/x");
        assert!(!cleaned.contains("http"));
        assert!(!cleaned.contains("@"));
    }

    #[test]
    fn removes_boilerplate_phrases() {
        let cleaned = clean_text("Breaking news here. Advertisement Follow us on social media.");
        assert!(!cleaned.contains("Advertisement"));
        assert!(!cleaned.contains("Follow us on"));
    }
}
