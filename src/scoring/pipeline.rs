use crate::aggregate::Aggregates;
use crate::scoring::{best_hours, ContentTypeScorer, HashtagRanker, HashtagStat, TypeScore};

#[derive(Debug, Clone, Default)]
pub struct Rankings {
    pub best_hours: Vec<u8>,
    pub type_scores: Vec<TypeScore>,
    pub top_hashtags: Vec<HashtagStat>,
    pub hashtag_leaders: Vec<HashtagStat>,
}

impl Rankings {
    pub fn top_type(&self) -> Option<&TypeScore> {
        self.type_scores.first()
    }

    pub fn weakest_type(&self) -> Option<&TypeScore> {
        self.type_scores.last()
    }
}

#[derive(Debug, Clone)]
pub struct InsightsPipeline {
    best_hour_limit: usize,
    type_scorer: ContentTypeScorer,
    hashtag_ranker: HashtagRanker,
}

impl InsightsPipeline {
    pub fn new(
        best_hour_limit: usize,
        type_scorer: ContentTypeScorer,
        hashtag_ranker: HashtagRanker,
    ) -> Self {
        Self {
            best_hour_limit,
            type_scorer,
            hashtag_ranker,
        }
    }

    pub fn rank(&self, aggregates: &Aggregates) -> Rankings {
        Rankings {
            best_hours: best_hours(&aggregates.hours, self.best_hour_limit),
            type_scores: self.type_scorer.rank(&aggregates.types),
            top_hashtags: self.hashtag_ranker.top_by_rate(&aggregates.hashtags),
            hashtag_leaders: self.hashtag_ranker.leaders_by_views(&aggregates.hashtags),
        }
    }
}

impl Default for InsightsPipeline {
    fn default() -> Self {
        Self::new(3, ContentTypeScorer::default(), HashtagRanker::default())
    }
}
