//! Plain serde DTO shapes the core supports for an external REST/RPC layer (§6.1). No HTTP
//! binding lives in this crate -- these are data shapes a future API layer would serialize.

use crate::models::Article;
use crate::similarity::ComparisonReport;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct ArticlesListResponse {
    pub articles: Vec<Article>,
    pub count: usize,
    pub total_count: usize,
    pub limit: usize,
    pub skip: usize,
    pub has_more: bool,
}

pub const MAX_ARTICLES_LIMIT: usize = 200;
pub const MAX_BATCH_BIAS_IDS: usize = 50;
pub const MAX_BATCH_ANALYZE_PENDING: usize = 500;

/// Clamps a caller-supplied page size to the documented ceiling (§6.1, §8).
pub fn clamp_articles_limit(requested: usize) -> usize {
    requested.min(MAX_ARTICLES_LIMIT)
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchAnalyzeRequest {
    pub article_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzePendingRequest {
    pub limit: Option<usize>,
}

/// One component's histogram over `[min, max]` split into 10 buckets; the last bucket is
/// inclusive on both ends (§6.1).
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHistogram {
    pub bucket_edges: Vec<f64>,
    pub bucket_counts: Vec<usize>,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

const HISTOGRAM_BUCKETS: usize = 10;

/// Builds a 10-bucket histogram over `[min, max]` with the last bucket inclusive at both ends.
pub fn build_histogram(values: &[f64]) -> ComponentHistogram {
    if values.is_empty() {
        return ComponentHistogram {
            bucket_edges: Vec::new(),
            bucket_counts: vec![0; HISTOGRAM_BUCKETS],
            mean: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }

    let min = values.iter().cloned().fold(f64::MAX, f64::min);
    let max = values.iter().cloned().fold(f64::MIN, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    let span = (max - min).max(f64::EPSILON);
    let bucket_width = span / HISTOGRAM_BUCKETS as f64;
    let edges: Vec<f64> = (0..=HISTOGRAM_BUCKETS).map(|i| min + bucket_width * i as f64).collect();

    let mut counts = vec![0usize; HISTOGRAM_BUCKETS];
    for &v in values {
        let mut idx = ((v - min) / bucket_width).floor() as isize;
        if idx < 0 {
            idx = 0;
        }
        if idx as usize >= HISTOGRAM_BUCKETS {
            idx = HISTOGRAM_BUCKETS as isize - 1;
        }
        counts[idx as usize] += 1;
    }

    ComponentHistogram {
        bucket_edges: edges,
        bucket_counts: counts,
        mean,
        min,
        max,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BiasDistributionResponse {
    pub sentiment: ComponentHistogram,
    pub political: ComponentHistogram,
    pub emotional: ComponentHistogram,
    pub factual: ComponentHistogram,
    pub overall: ComponentHistogram,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClustersResponse {
    pub clusters: Vec<Vec<Article>>,
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BiasDifferencesRequest {
    pub article_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResponseDto {
    pub story_id: String,
    pub bias_differences: HashMap<String, f64>,
    pub similarity_scores: HashMap<String, f64>,
    pub key_differences: Vec<String>,
}

impl From<&ComparisonReport> for ComparisonResponseDto {
    fn from(report: &ComparisonReport) -> Self {
        Self {
            story_id: report.story_id.clone(),
            bias_differences: report.bias_differences.clone(),
            similarity_scores: report.similarity_scores.clone(),
            key_differences: report.key_differences.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CustomComparisonInput {
    Url { value: String },
    Text { value: String },
    ArticleId { value: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomComparisonRequest {
    pub inputs: Vec<CustomComparisonInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsOverview {
    pub total_articles: usize,
    pub analyzed_articles: usize,
    pub unanalyzed_articles: usize,
    pub recent_7d: usize,
    pub sources: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceStatistics {
    pub source: String,
    pub article_count: usize,
    pub avg_overall_bias: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BiasTrendBucket {
    pub day: String,
    pub avg_overall_bias: f64,
    pub article_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeHealthResponse {
    pub sources: Vec<String>,
    pub healthy_sources: usize,
    pub unhealthy_sources: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManualScrapeRequest {
    pub url: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped_to_documented_ceiling() {
        assert_eq!(clamp_articles_limit(10_000), MAX_ARTICLES_LIMIT);
        assert_eq!(clamp_articles_limit(50), 50);
    }

    #[test]
    fn histogram_has_ten_buckets_and_last_is_inclusive() {
        let values: Vec<f64> = (0..=100).map(|i| i as f64 / 100.0).collect();
        let hist = build_histogram(&values);
        assert_eq!(hist.bucket_counts.len(), 10);
        assert_eq!(hist.bucket_counts.iter().sum::<usize>(), values.len());
        assert_eq!(hist.min, 0.0);
        assert_eq!(hist.max, 1.0);
    }

    #[test]
    fn histogram_on_empty_input_is_well_formed() {
        let hist = build_histogram(&[]);
        assert_eq!(hist.bucket_counts, vec![0; 10]);
    }
}
