use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::aggregate::{OrderedBuckets, TypeAggregate};
use crate::scoring::{round_to, safe_rate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementWeights {
    pub like: f64,
    pub comment: f64,
    pub share: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            like: 1.0,
            comment: 2.0,
            share: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBlend {
    pub reach: f64,
    pub engagement: f64,
}

impl Default for ScoreBlend {
    fn default() -> Self {
        Self {
            reach: 0.7,
            engagement: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScore {
    #[serde(rename = "type")]
    pub content_type: String,
    pub score: f64,
    pub view_per_post: f64,
    pub engagement_rate: f64,
    pub engagement: f64,
    pub views: u64,
    pub posts: u64,
}

#[derive(Debug, Clone)]
pub struct ContentTypeScorer {
    weights: EngagementWeights,
    blend: ScoreBlend,
}

impl ContentTypeScorer {
    pub fn new(weights: EngagementWeights, blend: ScoreBlend) -> Self {
        Self { weights, blend }
    }

    pub fn engagement(&self, aggregate: &TypeAggregate) -> f64 {
        aggregate.likes as f64 * self.weights.like
            + aggregate.comments as f64 * self.weights.comment
            + aggregate.shares as f64 * self.weights.share
    }

    pub fn score(&self, content_type: &str, aggregate: &TypeAggregate) -> TypeScore {
        let engagement = self.engagement(aggregate);
        // Falls back to post count when a type has no views at all. The units
        // differ; this keeps the rate finite rather than meaningful.
        let denominator = if aggregate.views > 0 {
            aggregate.views
        } else {
            aggregate.posts
        };
        let engagement_rate = safe_rate(engagement, denominator as f64);
        let view_per_post = safe_rate(aggregate.views as f64, aggregate.posts as f64);
        let score = round_to(
            self.blend.reach * view_per_post + self.blend.engagement * engagement_rate,
            6,
        );

        TypeScore {
            content_type: content_type.to_string(),
            score,
            view_per_post,
            engagement_rate,
            engagement,
            views: aggregate.views,
            posts: aggregate.posts,
        }
    }

    pub fn rank(&self, types: &OrderedBuckets<TypeAggregate>) -> Vec<TypeScore> {
        let mut scores: Vec<TypeScore> = types
            .iter()
            .map(|(content_type, aggregate)| self.score(content_type, aggregate))
            .collect();
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scores
    }
}

impl Default for ContentTypeScorer {
    fn default() -> Self {
        Self::new(EngagementWeights::default(), ScoreBlend::default())
    }
}
