use serde::Serialize;
use std::cmp::Ordering;

use crate::aggregate::{HashtagAggregate, OrderedBuckets};
use crate::scoring::safe_rate;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagStat {
    pub tag: String,
    pub views: u64,
    pub uses: u64,
    pub views_per_use: f64,
}

#[derive(Debug, Clone)]
pub struct HashtagRanker {
    top_limit: usize,
    leader_limit: usize,
}

impl HashtagRanker {
    pub fn new(top_limit: usize, leader_limit: usize) -> Self {
        Self {
            top_limit,
            leader_limit,
        }
    }

    pub fn top_by_rate(&self, hashtags: &OrderedBuckets<HashtagAggregate>) -> Vec<HashtagStat> {
        let mut stats = collect_stats(hashtags);
        stats.sort_by(|a, b| {
            b.views_per_use
                .partial_cmp(&a.views_per_use)
                .unwrap_or(Ordering::Equal)
        });
        stats.truncate(self.top_limit);
        stats
    }

    pub fn leaders_by_views(&self, hashtags: &OrderedBuckets<HashtagAggregate>) -> Vec<HashtagStat> {
        let mut stats = collect_stats(hashtags);
        stats.sort_by(|a, b| b.views.cmp(&a.views));
        stats.truncate(self.leader_limit);
        stats
    }
}

impl Default for HashtagRanker {
    fn default() -> Self {
        Self::new(15, 20)
    }
}

fn collect_stats(hashtags: &OrderedBuckets<HashtagAggregate>) -> Vec<HashtagStat> {
    hashtags
        .iter()
        .map(|(tag, aggregate)| HashtagStat {
            tag: tag.to_string(),
            views: aggregate.views,
            uses: aggregate.uses,
            views_per_use: safe_rate(aggregate.views as f64, aggregate.uses as f64),
        })
        .collect()
}
