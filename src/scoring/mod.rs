pub mod content_type;
pub mod hashtags;
pub mod hours;
pub mod pipeline;
pub mod rate;

pub use content_type::{ContentTypeScorer, EngagementWeights, ScoreBlend, TypeScore};
pub use hashtags::{HashtagRanker, HashtagStat};
pub use hours::{best_hours, rank_hours, HourRate};
pub use pipeline::{InsightsPipeline, Rankings};
pub use rate::{round_to, safe_rate};
