mod bengali;
mod english;
mod language;

pub use bengali::{BengaliFeatures, BengaliTextPreprocessor};
pub use english::{EnglishFeatures, EnglishTextPreprocessor};
pub use language::LanguageDetector;
