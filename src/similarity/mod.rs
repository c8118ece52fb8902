mod comparator;
mod matcher;

pub use comparator::{ComparisonReport, Comparator, SourcePattern};
pub use matcher::SimilarityMatcher;
