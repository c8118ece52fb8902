//! Static, inspectable lexicon tables shared by the sentiment, political, and factual/opinion
//! sub-analyzers. Changing scoring requires a deliberate edit here, never a runtime load.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

macro_rules! set_of {
    ($($w:expr),* $(,)?) => {{
        let mut s = HashSet::new();
        $(s.insert($w);)*
        s
    }};
}

pub fn english_positive_words() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| {
        set_of![
            "excellent", "wonderful", "great", "good", "positive", "success", "successful",
            "improve", "improved", "improvement", "progress", "achievement", "win", "victory",
            "beautiful", "happy", "joy", "celebrate", "praise", "outstanding", "remarkable",
            "brilliant", "impressive", "hopeful", "boost", "benefit", "gain", "strong",
            "stronger", "support", "favorable", "welcome", "triumph", "prosper", "thrive",
            "effective"
        ]
    })
}

pub fn english_negative_words() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| {
        set_of![
            "terrible", "awful", "bad", "negative", "failure", "failed", "crisis", "disaster",
            "worsen", "worsened", "decline", "corruption", "corrupt", "violence", "violent",
            "attack", "death", "killed", "tragedy", "tragic", "protest", "unrest", "conflict",
            "scandal", "controversy", "worry", "concern", "threat", "danger", "dangerous",
            "loss", "weak", "weaker", "oppose", "opposition", "condemn"
        ]
    })
}

pub fn bengali_positive_words() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| {
        set_of![
            "চমৎকার", "অসাধারণ", "ভালো", "সফল", "সফলতা", "উন্নতি", "উন্নত", "অগ্রগতি",
            "বিজয়", "জয়", "সুন্দর", "খুশি", "আনন্দ", "উদযাপন", "প্রশংসা", "দুর্দান্ত",
            "চমৎকারিত্ব", "আশাব্যঞ্জক", "লাভ", "শক্তিশালী", "সমর্থন", "স্বাগত", "বিকাশ",
            "সাফল্য", "কল্যাণ", "শান্তি", "স্থিতিশীল", "প্রগতি", "ইতিবাচক"
        ]
    })
}

pub fn bengali_negative_words() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| {
        set_of![
            "ভয়ঙ্কর", "খারাপ", "ব্যর্থ", "ব্যর্থতা", "সংকট", "দুর্যোগ", "অবনতি",
            "দুর্নীতি", "সহিংসতা", "সহিংস", "হামলা", "মৃত্যু", "নিহত", "ট্র্যাজেডি",
            "বিক্ষোভ", "অস্থিরতা", "সংঘর্ষ", "কেলেঙ্কারি", "বিতর্ক", "উদ্বেগ", "হুমকি",
            "বিপজ্জনক", "ক্ষতি", "দুর্বল", "বিরোধিতা", "নিন্দা", "অরাজকতা", "নেতিবাচক"
        ]
    })
}

pub fn english_intensity_modifiers() -> &'static HashMap<&'static str, f64> {
    static M: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    M.get_or_init(|| {
        HashMap::from([
            ("very", 1.5),
            ("extremely", 2.0),
            ("quite", 1.3),
            ("rather", 1.2),
            ("fairly", 1.1),
            ("slightly", 0.5),
            ("somewhat", 0.7),
            ("completely", 1.8),
            ("totally", 1.9),
        ])
    })
}

pub fn bengali_intensity_modifiers() -> &'static HashMap<&'static str, f64> {
    static M: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    M.get_or_init(|| {
        HashMap::from([
            ("খুব", 1.5),
            ("অত্যন্ত", 2.0),
            ("অনেক", 1.3),
            ("বেশ", 1.2),
            ("যথেষ্ট", 1.1),
            ("সামান্য", 0.5),
            ("কিছুটা", 0.7),
            ("একটু", 0.6),
            ("সম্পূর্ণ", 1.8),
            ("পুরোপুরি", 1.9),
        ])
    })
}

pub fn english_negation_words() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["not", "no", "never", "none", "neither", "nor", "without"])
}

pub fn bengali_negation_words() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["না", "নয়", "নেই", "কখনো না"])
}

/// Left/right/neutral political keyword sets. The labels are lexicon-defined and carry no
/// universal political meaning outside this scoring system (§4.5).
pub fn english_left_leaning() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| {
        set_of![
            "ruling", "incumbent", "government", "establishment", "administration", "cabinet"
        ]
    })
}

pub fn english_right_leaning() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["opposition", "dissent", "protest", "activist", "rally", "movement"])
}

pub fn english_neutral_political() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["election", "parliament", "policy", "vote", "minister", "party"])
}

pub fn bengali_left_leaning() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["সরকার", "ক্ষমতাসীন", "প্রশাসন", "মন্ত্রিসভা"])
}

pub fn bengali_right_leaning() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["বিরোধী", "আন্দোলন", "বিক্ষোভ", "কর্মী"])
}

pub fn bengali_neutral_political() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["নির্বাচন", "সংসদ", "নীতি", "ভোট", "মন্ত্রী", "দল"])
}

/// Biased-language regex phrases, weighted 2.0 (§4.5). Positive-bias and negative-bias per
/// language.
pub fn english_positive_bias_phrases() -> &'static [&'static str] {
    &["remarkable success", "tremendous achievement", "historic victory", "unprecedented progress"]
}

pub fn english_negative_bias_phrases() -> &'static [&'static str] {
    &["complete failure", "total disaster", "massive corruption", "utter chaos"]
}

pub fn bengali_positive_bias_phrases() -> &'static [&'static str] {
    &["অসাধারণ সাফল্য", "ঐতিহাসিক বিজয়"]
}

pub fn bengali_negative_bias_phrases() -> &'static [&'static str] {
    &["সম্পূর্ণ ব্যর্থতা", "ভয়াবহ বিপর্যয়"]
}

/// Loaded-language terms, partitioned by emotional intensity (§4.5).
pub fn english_high_emotion_terms() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["outrageous", "devastating", "horrific", "catastrophic", "shocking"])
}

pub fn english_medium_emotion_terms() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["concerning", "troubling", "notable", "significant"])
}

pub fn bengali_high_emotion_terms() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["ভয়াবহ", "মর্মান্তিক", "বিস্ময়কর"])
}

pub fn bengali_medium_emotion_terms() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["উদ্বেগজনক", "উল্লেখযোগ্য"])
}

/// Factual/opinion indicator categories, per language, with their scoring weight (§4.5).
pub struct WeightedCategory {
    pub words: &'static [&'static str],
    pub weight: f64,
}

pub fn english_factual_indicators() -> &'static [WeightedCategory] {
    static CATS: OnceLock<Vec<WeightedCategory>> = OnceLock::new();
    CATS.get_or_init(|| {
        vec![
            WeightedCategory {
                words: &["said", "told", "stated", "announced", "reported", "confirmed"],
                weight: 2.0,
            },
            WeightedCategory {
                words: &["according to", "sources say", "officials said", "data shows"],
                weight: 3.0,
            },
            WeightedCategory {
                words: &["percent", "study found", "report shows", "statistics"],
                weight: 1.0,
            },
            WeightedCategory {
                words: &["yesterday", "today", "this week", "last month", "on monday"],
                weight: 1.0,
            },
        ]
    })
    .as_slice()
}

pub fn english_opinion_indicators() -> &'static [WeightedCategory] {
    static CATS: OnceLock<Vec<WeightedCategory>> = OnceLock::new();
    CATS.get_or_init(|| {
        vec![
            WeightedCategory {
                words: &["i think", "i believe", "in my opinion", "i feel"],
                weight: 3.0,
            },
            WeightedCategory {
                words: &["disgraceful", "wonderful", "terrible", "brilliant", "shameful"],
                weight: 1.0,
            },
            WeightedCategory {
                words: &["might", "could", "perhaps", "probably", "likely"],
                weight: 1.0,
            },
            WeightedCategory {
                words: &["should", "must", "needs to", "ought to"],
                weight: 2.0,
            },
        ]
    })
    .as_slice()
}

pub fn bengali_factual_indicators() -> &'static [WeightedCategory] {
    static CATS: OnceLock<Vec<WeightedCategory>> = OnceLock::new();
    CATS.get_or_init(|| {
        vec![
            WeightedCategory {
                words: &["বলেছে", "জানিয়েছে", "ঘোষণা করেছে", "নিশ্চিত করেছে"],
                weight: 2.0,
            },
            WeightedCategory {
                words: &["সূত্র জানায়", "কর্মকর্তারা বলেন"],
                weight: 3.0,
            },
            WeightedCategory {
                words: &["শতাংশ", "প্রতিবেদনে বলা হয়েছে", "পরিসংখ্যান"],
                weight: 1.0,
            },
            WeightedCategory {
                words: &["গতকাল", "আজ", "গত সপ্তাহে", "গত মাসে"],
                weight: 1.0,
            },
        ]
    })
    .as_slice()
}

pub fn bengali_opinion_indicators() -> &'static [WeightedCategory] {
    static CATS: OnceLock<Vec<WeightedCategory>> = OnceLock::new();
    CATS.get_or_init(|| {
        vec![
            WeightedCategory {
                words: &["আমি মনে করি", "আমার মতে", "আমি বিশ্বাস করি"],
                weight: 3.0,
            },
            WeightedCategory {
                words: &["লজ্জাজনক", "চমৎকার", "ভয়ঙ্কর"],
                weight: 1.0,
            },
            WeightedCategory {
                words: &["হয়তো", "সম্ভবত", "মনে হয়"],
                weight: 1.0,
            },
            WeightedCategory {
                words: &["উচিত", "করা দরকার"],
                weight: 2.0,
            },
        ]
    })
    .as_slice()
}

pub fn english_first_person_pronouns() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["i", "we", "my", "our", "me", "us"])
}

pub fn bengali_first_person_pronouns() -> &'static HashSet<&'static str> {
    static S: OnceLock<HashSet<&'static str>> = OnceLock::new();
    S.get_or_init(|| set_of!["আমি", "আমরা", "আমার", "আমাদের"])
}

/// Numeric indicator regex patterns shared by the factual/opinion classifier (percentages,
/// decimals, comma-grouped numbers, large-number words, currency markers).
pub fn numeric_pattern_regexes() -> &'static [regex::Regex] {
    static PATTERNS: OnceLock<Vec<regex::Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            regex::Regex::new(r"\d+(\.\d+)?\s*%").unwrap(),
            regex::Regex::new(r"\d+\.\d+").unwrap(),
            regex::Regex::new(r"\d{1,3}(,\d{3})+").unwrap(),
            regex::Regex::new(r"\b(crore|lakh|million|billion|thousand)\b").unwrap(),
            regex::Regex::new(r"(টাকা|\$|৳|USD|BDT)").unwrap(),
        ]
    })
}
