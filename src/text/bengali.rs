use std::collections::HashSet;
use std::sync::OnceLock;

fn stopwords() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| {
        [
            "এই", "সেই", "যে", "যা", "কি", "কে", "কার", "কাকে", "কিন্তু", "এবং", "অথবা", "বা",
            "না", "হয়", "হয়েছে", "হবে", "করে", "করেছে", "করবে", "বলে", "বলেছে", "বলেন",
            "জানায়", "জানিয়েছে", "আজ", "কাল", "গতকাল", "আগামীকাল", "এখন", "তখন", "এখানে",
            "সেখানে", "থেকে", "পর্যন্ত", "মধ্যে", "সঙ্গে", "জন্য", "দিয়ে", "নিয়ে", "আর",
            "ও", "তার", "তাদের", "আমরা", "আমাদের", "তিনি",
        ]
        .into_iter()
        .collect()
    })
}

fn digit_map(c: char) -> Option<char> {
    match c {
        '০' => Some('0'),
        '১' => Some('1'),
        '২' => Some('2'),
        '৩' => Some('3'),
        '৪' => Some('4'),
        '৫' => Some('5'),
        '৬' => Some('6'),
        '৭' => Some('7'),
        '৮' => Some('8'),
        '৯' => Some('9'),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct BengaliFeatures {
    pub token_count: usize,
    pub unique_token_count: usize,
    pub sentence_count: usize,
    pub avg_token_length: f64,
}

/// Bengali normalization, tokenization, and stopword filtering, per §4.4.
pub struct BengaliTextPreprocessor;

impl BengaliTextPreprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Normalize whitespace, map Bengali digits to ASCII, and normalize a small set of
    /// punctuation marks (dashes, quotes, the Bengali full stop "।").
    pub fn preprocess(&self, text: &str) -> String {
        let mapped: String = text
            .chars()
            .map(|c| digit_map(c).unwrap_or(c))
            .collect();

        let normalized = mapped
            .replace(['\u{2018}', '\u{2019}'], "'")
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace(['\u{2013}', '\u{2014}'], "-");

        normalized.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Split on whitespace and Bengali/Latin punctuation, dropping tokens of length <= 1.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.preprocess(text);
        cleaned
            .split(|c: char| c.is_whitespace() || "।,;:!?()\"'-.".contains(c))
            .map(|t| t.trim())
            .filter(|t| t.chars().count() > 1)
            .map(|t| t.to_string())
            .collect()
    }

    pub fn remove_stopwords(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| !stopwords().contains(t.as_str()))
            .cloned()
            .collect()
    }

    pub fn extract_bengali_features(&self, text: &str) -> BengaliFeatures {
        let tokens = self.tokenize(text);
        let sentence_count = text
            .split(|c: char| c == '।' || c == '.' || c == '!' || c == '?')
            .filter(|s| !s.trim().is_empty())
            .count()
            .max(if text.trim().is_empty() { 0 } else { 1 });

        let unique: HashSet<&String> = tokens.iter().collect();
        let avg_len = if tokens.is_empty() {
            0.0
        } else {
            tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / tokens.len() as f64
        };

        BengaliFeatures {
            token_count: tokens.len(),
            unique_token_count: unique.len(),
            sentence_count,
            avg_token_length: avg_len,
        }
    }
}

impl Default for BengaliTextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bengali_digits() {
        let pre = BengaliTextPreprocessor::new();
        assert_eq!(pre.preprocess("১২৩"), "123");
    }

    #[test]
    fn tokenize_drops_single_char_tokens() {
        let pre = BengaliTextPreprocessor::new();
        let tokens = pre.tokenize("আজ সরকার একটি নতুন ঘোষণা দিয়েছে।");
        assert!(tokens.iter().all(|t| t.chars().count() > 1));
        assert!(!tokens.is_empty());
    }

    #[test]
    fn stopwords_are_removed() {
        let pre = BengaliTextPreprocessor::new();
        let tokens = pre.tokenize("এই এবং সরকার");
        let filtered = pre.remove_stopwords(&tokens);
        assert!(!filtered.contains(&"এই".to_string()));
        assert!(!filtered.contains(&"এবং".to_string()));
    }
}
