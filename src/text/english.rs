use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn stopwords() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| {
        [
            "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
            "by", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
            "does", "did", "will", "would", "could", "should", "may", "might", "can", "must",
            "shall", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we",
            "they", "said", "each", "which", "from", "as", "there", "their", "its", "into",
            "than", "then", "so", "not", "no", "up", "out", "about", "who", "what",
        ]
        .into_iter()
        .collect()
    })
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-zA-Z]+\b").unwrap())
}

fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let vowels: HashSet<char> = ['a', 'e', 'i', 'o', 'u', 'y'].into_iter().collect();
    let mut count = 0usize;
    let mut prev_was_vowel = false;

    for c in word.chars() {
        let is_vowel = vowels.contains(&c);
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if word.ends_with('e') && count > 1 {
        count -= 1;
    }

    count.max(1)
}

#[derive(Debug, Clone, Default)]
pub struct EnglishFeatures {
    pub token_count: usize,
    pub unique_token_count: usize,
    pub sentence_count: usize,
    pub avg_token_length: f64,
    pub syllable_count: usize,
}

/// English lowercasing, tokenization, and stopword filtering, per §4.4.
pub struct EnglishTextPreprocessor;

impl EnglishTextPreprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Lowercase, normalize quotes/dashes, and collapse repeated punctuation.
    pub fn preprocess(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        let normalized = lower
            .replace(['\u{2018}', '\u{2019}'], "'")
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace(['\u{2013}', '\u{2014}'], "-");

        let collapsed = Regex::new(r"([!?.]){2,}")
            .unwrap()
            .replace_all(&normalized, "$1")
            .to_string();

        collapsed.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Alphabetic tokens of length >= 2, via word-boundary extraction.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.preprocess(text);
        word_regex()
            .find_iter(&cleaned)
            .map(|m| m.as_str().to_string())
            .filter(|w| w.len() >= 2)
            .collect()
    }

    pub fn remove_stopwords(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| !stopwords().contains(t.as_str()))
            .cloned()
            .collect()
    }

    pub fn extract_english_features(&self, text: &str) -> EnglishFeatures {
        let tokens = self.tokenize(text);
        let sentence_count = text
            .split(|c: char| c == '.' || c == '!' || c == '?')
            .filter(|s| !s.trim().is_empty())
            .count()
            .max(if text.trim().is_empty() { 0 } else { 1 });

        let unique: HashSet<&String> = tokens.iter().collect();
        let avg_len = if tokens.is_empty() {
            0.0
        } else {
            tokens.iter().map(|t| t.len()).sum::<usize>() as f64 / tokens.len() as f64
        };
        let syllables: usize = tokens.iter().map(|t| count_syllables(t)).sum();

        EnglishFeatures {
            token_count: tokens.len(),
            unique_token_count: unique.len(),
            sentence_count,
            avg_token_length: avg_len,
            syllable_count: syllables,
        }
    }
}

impl Default for EnglishTextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_drops_short_tokens() {
        let pre = EnglishTextPreprocessor::new();
        let tokens = pre.tokenize("The Quick Brown Fox a I");
        assert!(tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"a".to_string()));
        assert!(!tokens.contains(&"i".to_string()));
    }

    #[test]
    fn stopwords_filtered() {
        let pre = EnglishTextPreprocessor::new();
        let tokens = pre.tokenize("the government said this");
        let filtered = pre.remove_stopwords(&tokens);
        assert!(!filtered.contains(&"the".to_string()));
        assert!(!filtered.contains(&"said".to_string()));
        assert!(filtered.contains(&"government".to_string()));
    }

    #[test]
    fn syllable_count_reasonable() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("banana"), 3);
        assert_eq!(count_syllables("nice"), 1);
    }

    #[test]
    fn features_counts_sentences() {
        let pre = EnglishTextPreprocessor::new();
        let features = pre.extract_english_features("This is one. This is two!");
        assert_eq!(features.sentence_count, 2);
    }
}
