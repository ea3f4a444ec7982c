use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::aggregate::HourAggregate;
use crate::scoring::safe_rate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourRate {
    pub hour: u8,
    pub views_per_post: f64,
}

pub fn rank_hours(hours: &BTreeMap<u8, HourAggregate>) -> Vec<HourRate> {
    let mut rates: Vec<HourRate> = hours
        .iter()
        .map(|(hour, aggregate)| HourRate {
            hour: *hour,
            views_per_post: safe_rate(aggregate.views as f64, aggregate.posts as f64),
        })
        .collect();

    rates.sort_by(|a, b| {
        b.views_per_post
            .partial_cmp(&a.views_per_post)
            .unwrap_or(Ordering::Equal)
    });
    rates
}

pub fn best_hours(hours: &BTreeMap<u8, HourAggregate>, limit: usize) -> Vec<u8> {
    rank_hours(hours)
        .into_iter()
        .take(limit)
        .map(|rate| rate.hour)
        .collect()
}
