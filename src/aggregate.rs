use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};

use crate::record::normalize_hashtag;
use crate::PostRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct HourAggregate {
    pub views: u64,
    pub posts: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TypeAggregate {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub posts: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct HashtagAggregate {
    pub views: u64,
    pub uses: u64,
}

#[derive(Debug, Clone)]
pub struct OrderedBuckets<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for OrderedBuckets<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Default> OrderedBuckets<T> {
    pub fn entry(&mut self, key: &str) -> &mut T {
        let position = match self.index.get(key) {
            Some(position) => *position,
            None => {
                self.entries.push((key.to_string(), T::default()));
                let position = self.entries.len() - 1;
                self.index.insert(key.to_string(), position);
                position
            }
        };
        &mut self.entries[position].1
    }
}

impl<T> OrderedBuckets<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|position| &self.entries[*position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for OrderedBuckets<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub hours: BTreeMap<u8, HourAggregate>,
    pub types: OrderedBuckets<TypeAggregate>,
    pub hashtags: OrderedBuckets<HashtagAggregate>,
}

impl Aggregates {
    pub fn collect(records: &[PostRecord]) -> Self {
        let mut aggregates = Aggregates::default();
        for record in records {
            aggregates.add(record);
        }
        aggregates
    }

    fn add(&mut self, record: &PostRecord) {
        let hour = self.hours.entry(record.hour.min(23)).or_default();
        hour.views = hour.views.saturating_add(record.views);
        hour.posts += 1;

        let bucket = self.types.entry(&record.content_type);
        bucket.views = bucket.views.saturating_add(record.views);
        bucket.likes = bucket.likes.saturating_add(record.likes);
        bucket.comments = bucket.comments.saturating_add(record.comments);
        bucket.shares = bucket.shares.saturating_add(record.shares);
        bucket.posts += 1;

        // Repeats inside one row count once each.
        for tag in record.hashtags.iter().filter_map(|tag| normalize_hashtag(tag)) {
            let bucket = self.hashtags.entry(&tag);
            bucket.views = bucket.views.saturating_add(record.views);
            bucket.uses += 1;
        }
    }
}
