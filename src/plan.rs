use serde::{Deserialize, Serialize};

use crate::config::InsightsConfig;
use crate::scoring::Rankings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    pub factor: f64,
    pub min: u64,
    pub max: u64,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            factor: 0.6,
            min: 5,
            max: 14,
        }
    }
}

pub fn planned_cadence(row_count: usize, cadence: &CadenceConfig) -> u64 {
    let raw = (row_count as f64 * cadence.factor).round().max(0.0) as u64;
    raw.clamp(cadence.min, cadence.max.max(cadence.min))
}

pub fn build_action_plan(rankings: &Rankings, row_count: usize, config: &InsightsConfig) -> Vec<String> {
    let mut actions = Vec::new();

    if let Some(top) = rankings.top_type() {
        actions.push(format!(
            "Double down on **{}** content (top format).",
            top.content_type
        ));
    }

    if !rankings.best_hours.is_empty() {
        actions.push(format!(
            "Post at **{}** local time",
            crate::format_hours(&rankings.best_hours)
        ));
    }

    if !rankings.top_hashtags.is_empty() {
        let tags = rankings
            .top_hashtags
            .iter()
            .take(config.limits.plan_hashtags)
            .map(|stat| format!("#{}", stat.tag))
            .collect::<Vec<_>>()
            .join(" ");
        actions.push(format!("Use 1-3 of: {}", tags));
    }

    if let Some(weakest) = rankings.weakest_type() {
        actions.push(format!(
            "De-prioritize **{}** until performance improves.",
            weakest.content_type
        ));
    }

    actions.push(format!(
        "Publish ~{} posts next 7 days with 70/20/10: top/experimental/brand.",
        planned_cadence(row_count, &config.cadence)
    ));

    actions
}
