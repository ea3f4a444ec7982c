pub mod aggregate;
pub mod config;
pub mod error;
pub mod plan;
pub mod record;
pub mod scoring;
pub mod synthetic;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::aggregate::{Aggregates, HourAggregate, OrderedBuckets, TypeAggregate};
use crate::config::InsightsConfig;
use crate::plan::build_action_plan;
use crate::scoring::{ContentTypeScorer, HashtagRanker, HashtagStat, InsightsPipeline, TypeScore};

pub use crate::error::AnalysisError;
pub use crate::record::{normalize_hashtag, normalize_rows, NormalizedRows};
pub use crate::scoring::safe_rate;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub platform: String,
    pub post_id: String,
    pub date: String,
    pub hour: u8,
    pub content_type: String,
    pub title: String,
    pub hashtags: Vec<String>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_time_sec: Option<u64>,
}

impl Default for PostRecord {
    fn default() -> Self {
        Self {
            platform: String::new(),
            post_id: String::new(),
            date: String::new(),
            hour: 0,
            content_type: record::UNKNOWN_CONTENT_TYPE.to_string(),
            title: String::new(),
            hashtags: Vec::new(),
            views: 0,
            likes: 0,
            comments: 0,
            shares: 0,
            watch_time_sec: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub by_hour: BTreeMap<u8, HourAggregate>,
    pub by_type: OrderedBuckets<TypeAggregate>,
    pub type_scores: Vec<TypeScore>,
    pub hashtag_leaders: Vec<HashtagStat>,
    pub row_count: usize,
    pub dropped_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    pub best_hours: Vec<u8>,
    pub top_hashtags: Vec<String>,
    pub actions: Vec<String>,
    pub diagnostics: Diagnostics,
}

pub fn analyze(rows: &Value) -> Result<AnalysisOutput, AnalysisError> {
    analyze_with_config(rows, &InsightsConfig::default())
}

pub fn analyze_with_config(
    rows: &Value,
    config: &InsightsConfig,
) -> Result<AnalysisOutput, AnalysisError> {
    let normalized = normalize_rows(rows)?;
    Ok(build_output(&normalized.records, normalized.dropped, config))
}

pub fn analyze_records(
    records: &[PostRecord],
    config: &InsightsConfig,
) -> Result<AnalysisOutput, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::invalid_input("rows must be a non-empty array"));
    }
    Ok(build_output(records, 0, config))
}

fn build_output(records: &[PostRecord], dropped: usize, config: &InsightsConfig) -> AnalysisOutput {
    debug!(rows = records.len(), dropped, "aggregating post records");

    let aggregates = Aggregates::collect(records);
    let pipeline = build_pipeline(config);
    let rankings = pipeline.rank(&aggregates);
    let actions = build_action_plan(&rankings, records.len(), config);

    debug!(
        hours = aggregates.hours.len(),
        types = aggregates.types.len(),
        hashtags = aggregates.hashtags.len(),
        "ranked aggregates"
    );

    AnalysisOutput {
        best_hours: rankings.best_hours.clone(),
        top_hashtags: rankings
            .top_hashtags
            .iter()
            .map(|stat| stat.tag.clone())
            .collect(),
        actions,
        diagnostics: Diagnostics {
            by_hour: aggregates.hours,
            by_type: aggregates.types,
            type_scores: rankings.type_scores,
            hashtag_leaders: rankings.hashtag_leaders,
            row_count: records.len(),
            dropped_rows: dropped,
        },
    }
}

fn build_pipeline(config: &InsightsConfig) -> InsightsPipeline {
    let type_scorer = ContentTypeScorer::new(config.engagement.clone(), config.blend.clone());
    let hashtag_ranker = HashtagRanker::new(config.limits.top_hashtags, config.limits.hashtag_leaders);
    InsightsPipeline::new(config.limits.best_hours, type_scorer, hashtag_ranker)
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

pub fn format_hours(hours: &[u8]) -> String {
    hours
        .iter()
        .map(|hour| format!("{}:00", hour))
        .collect::<Vec<_>>()
        .join(", ")
}
