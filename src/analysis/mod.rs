mod bias_analyzer;
mod factual;
mod lexicons;
mod political;
mod sentiment;
mod topics;

pub use bias_analyzer::{BiasAnalyzer, BiasLevel, DetailedBiasAnalysis};
pub use factual::FactualOpinionClassifier;
pub use political::{PoliticalBiasDetector, PoliticalLean};
pub use sentiment::SentimentAnalyzer;
pub use topics::TopicExtractor;
