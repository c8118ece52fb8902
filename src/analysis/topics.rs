use crate::models::Language;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

struct TopicCategory {
    name: &'static str,
    words: &'static [&'static str],
}

fn topic_categories() -> &'static [TopicCategory] {
    static CATS: OnceLock<Vec<TopicCategory>> = OnceLock::new();
    CATS.get_or_init(|| {
        vec![
            TopicCategory {
                name: "politics",
                words: &["রাজনীতি", "সরকার", "মন্ত্রী", "নির্বাচন", "ভোট", "politics", "government", "minister", "election", "vote", "party"],
            },
            TopicCategory {
                name: "economy",
                words: &["অর্থনীতি", "ব্যাংক", "টাকা", "দাম", "বাজার", "economy", "bank", "money", "price", "market", "business"],
            },
            TopicCategory {
                name: "sports",
                words: &["খেলা", "ক্রিকেট", "ফুটবল", "ম্যাচ", "sports", "cricket", "football", "player", "match", "tournament"],
            },
            TopicCategory {
                name: "education",
                words: &["শিক্ষা", "স্কুল", "কলেজ", "বিশ্ববিদ্যালয়", "education", "school", "college", "university", "student", "exam"],
            },
            TopicCategory {
                name: "health",
                words: &["স্বাস্থ্য", "হাসপাতাল", "ডাক্তার", "health", "hospital", "doctor", "treatment", "disease", "medicine"],
            },
            TopicCategory {
                name: "technology",
                words: &["প্রযুক্তি", "কম্পিউটার", "ইন্টারনেট", "technology", "computer", "internet", "mobile", "software"],
            },
            TopicCategory {
                name: "international",
                words: &["আন্তর্জাতিক", "বিদেশ", "international", "foreign", "country", "usa", "india", "china"],
            },
            TopicCategory {
                name: "crime",
                words: &["অপরাধ", "পুলিশ", "গ্রেফতার", "crime", "police", "arrest", "theft", "robbery", "murder"],
            },
            TopicCategory {
                name: "entertainment",
                words: &["বিনোদন", "সিনেমা", "গান", "entertainment", "movie", "drama", "song", "artist", "actor"],
            },
            TopicCategory {
                name: "weather",
                words: &["আবহাওয়া", "বৃষ্টি", "ঝড়", "weather", "rain", "storm", "hot", "cold"],
            },
        ]
    })
}

fn stopwords(language: Language) -> &'static HashSet<&'static str> {
    static ENGLISH: OnceLock<HashSet<&'static str>> = OnceLock::new();
    static BENGALI: OnceLock<HashSet<&'static str>> = OnceLock::new();
    match language {
        Language::Bengali => BENGALI.get_or_init(|| {
            [
                "এই", "সেই", "যে", "যা", "কি", "কে", "কিন্তু", "এবং", "অথবা", "না", "হয়",
                "করে", "বলে", "আজ", "কাল", "খবর", "সংবাদ", "প্রতিবেদন",
            ]
            .into_iter()
            .collect()
        }),
        _ => ENGLISH.get_or_init(|| {
            [
                "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of",
                "with", "by", "is", "are", "was", "were", "said", "says", "told", "news",
                "report", "reports", "today", "yesterday", "now", "then", "here", "there",
            ]
            .into_iter()
            .collect()
        }),
    }
}

/// Extracts up to 5 bilingual topic tags from title+content, per §4.5a. Deterministic and pure.
pub struct TopicExtractor;

impl TopicExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_keywords(&self, text: &str, language: Language) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
            .collect();

        let stop = stopwords(language);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in cleaned.split_whitespace() {
            if word.chars().count() <= 2 || stop.contains(word) {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }

        let mut by_freq: Vec<(String, usize)> = counts.into_iter().collect();
        by_freq.sort_by(|a, b| b.1.cmp(&a.1));
        by_freq
            .into_iter()
            .take(20)
            .filter(|(_, count)| *count > 1)
            .map(|(word, _)| word)
            .collect()
    }

    fn categorize_topics(&self, keywords: &[String]) -> Vec<String> {
        topic_categories()
            .iter()
            .filter(|cat| {
                keywords
                    .iter()
                    .any(|kw| cat.words.iter().any(|cat_word| kw.contains(cat_word)))
            })
            .map(|cat| cat.name.to_string())
            .collect()
    }

    fn direct_topics(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        topic_categories()
            .iter()
            .filter(|cat| cat.words.iter().any(|w| lower.contains(w)))
            .map(|cat| cat.name.to_string())
            .collect()
    }

    /// Up to 5 deduplicated topic tags, keyword-pass categories first, direct mentions second.
    pub fn extract_topics(&self, title: &str, content: &str, language: Language) -> Vec<String> {
        let text = format!("{} {}", title, content);
        let keywords = self.extract_keywords(&text, language);

        let mut topics = self.categorize_topics(&keywords);
        topics.extend(self.direct_topics(&text));

        let mut seen = HashSet::new();
        topics.retain(|t| seen.insert(t.clone()));
        topics.truncate(5);
        topics
    }

    pub fn get_available_topics(&self) -> Vec<&'static str> {
        topic_categories().iter().map(|c| c.name).collect()
    }
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_sports_topic() {
        let extractor = TopicExtractor::new();
        let topics = extractor.extract_topics(
            "Local football match ends in dramatic win",
            "The football tournament saw a thrilling match between two local teams.",
            Language::English,
        );
        assert!(topics.contains(&"sports".to_string()));
    }

    #[test]
    fn deterministic_across_calls() {
        let extractor = TopicExtractor::new();
        let a = extractor.extract_topics("Market prices rise", "The market and bank reported a price increase.", Language::English);
        let b = extractor.extract_topics("Market prices rise", "The market and bank reported a price increase.", Language::English);
        assert_eq!(a, b);
    }

    #[test]
    fn caps_at_five_topics() {
        let extractor = TopicExtractor::new();
        let topics = extractor.get_available_topics();
        assert_eq!(topics.len(), 10);
    }
}
