use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AnalysisError;
use crate::PostRecord;

pub const UNKNOWN_CONTENT_TYPE: &str = "unknown";

#[derive(Debug, Clone)]
pub struct NormalizedRows {
    pub records: Vec<PostRecord>,
    pub dropped: usize,
}

pub fn normalize_rows(rows: &Value) -> Result<NormalizedRows, AnalysisError> {
    let items = match rows.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(AnalysisError::invalid_input("rows must be a non-empty array")),
    };

    let records: Vec<PostRecord> = items.iter().filter_map(normalize_row).collect();
    let dropped = items.len() - records.len();
    if dropped > 0 {
        debug!(dropped, total = items.len(), "dropped rows without numeric views");
    }

    if records.is_empty() {
        return Err(AnalysisError::invalid_input("no rows with numeric views"));
    }

    Ok(NormalizedRows { records, dropped })
}

pub fn normalize_row(row: &Value) -> Option<PostRecord> {
    let fields = row.as_object()?;
    let views = lookup(fields, &["views"]).and_then(numeric_value)?;

    Some(PostRecord {
        platform: text_field(fields, &["platform"]),
        post_id: text_field(fields, &["postId", "post_id"]),
        date: text_field(fields, &["date"]),
        hour: lookup(fields, &["hour"])
            .and_then(numeric_value)
            .map(clamp_hour)
            .unwrap_or(0),
        content_type: content_type(fields),
        title: text_field(fields, &["title"]),
        hashtags: hashtag_list(fields),
        views: to_count(views),
        likes: count_field(fields, &["likes"]),
        comments: count_field(fields, &["comments"]),
        shares: count_field(fields, &["shares"]),
        watch_time_sec: lookup(fields, &["watchTimeSec", "watch_time_sec"])
            .and_then(numeric_value)
            .map(to_count),
    })
}

pub fn normalize_hashtag(tag: &str) -> Option<String> {
    let stripped: String = tag
        .chars()
        .filter(|ch| *ch != '#' && !ch.is_whitespace())
        .collect();
    if stripped.is_empty() {
        return None;
    }
    Some(stripped.to_lowercase())
}

pub fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

pub fn clamp_hour(value: f64) -> u8 {
    value.trunc().clamp(0.0, 23.0) as u8
}

fn to_count(value: f64) -> u64 {
    value.max(0.0).trunc() as u64
}

fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

fn count_field(fields: &Map<String, Value>, keys: &[&str]) -> u64 {
    lookup(fields, keys)
        .and_then(numeric_value)
        .map(to_count)
        .unwrap_or(0)
}

fn text_field(fields: &Map<String, Value>, keys: &[&str]) -> String {
    match lookup(fields, keys) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

fn content_type(fields: &Map<String, Value>) -> String {
    let value = text_field(fields, &["contentType", "content_type"]);
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN_CONTENT_TYPE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn hashtag_list(fields: &Map<String, Value>) -> Vec<String> {
    match lookup(fields, &["hashtags"]) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::to_string)
            .collect(),
        // CSV adapters flatten the list into one cell.
        Some(Value::String(text)) => text
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
