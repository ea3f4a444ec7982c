use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::PostRecord;

const PLATFORMS: [&str; 3] = ["tiktok", "instagram", "youtube"];
const CONTENT_TYPES: [(&str, f64); 4] = [
    ("short", 9_000.0),
    ("carousel", 4_500.0),
    ("long", 6_000.0),
    ("story", 1_500.0),
];
const HASHTAGS: [&str; 10] = [
    "ai",
    "productivity",
    "editing",
    "creator",
    "tutorial",
    "behindthescenes",
    "tips",
    "workflow",
    "design",
    "growth",
];

pub fn generate_sample_rows(count: usize, seed: u64) -> Vec<PostRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(count);

    for idx in 0..count {
        let platform = PLATFORMS[rng.gen_range(0..PLATFORMS.len())];
        let (content_type, base_views) = CONTENT_TYPES[rng.gen_range(0..CONTENT_TYPES.len())];
        let hour: u8 = rng.gen_range(0..24);

        let views = (base_views * hour_factor(hour) * rng.gen_range(0.4..1.6)).round() as u64;
        let like_rate = rng.gen_range(0.03..0.12);
        let likes = (views as f64 * like_rate).round() as u64;
        let comments = (likes as f64 * rng.gen_range(0.05..0.15)).round() as u64;
        let shares = (likes as f64 * rng.gen_range(0.02..0.10)).round() as u64;

        let tag_count = rng.gen_range(0..=3);
        let hashtags = (0..tag_count)
            .map(|_| HASHTAGS[rng.gen_range(0..HASHTAGS.len())].to_string())
            .collect();

        let watch_time_sec = if content_type == "long" {
            Some(rng.gen_range(60..600))
        } else {
            None
        };

        rows.push(PostRecord {
            platform: platform.to_string(),
            post_id: format!("sample_{}", idx),
            date: format!("2024-05-{:02}", 1 + idx % 28),
            hour,
            content_type: content_type.to_string(),
            title: format!("Sample {} post {}", content_type, idx),
            hashtags,
            views,
            likes,
            comments,
            shares,
            watch_time_sec,
        });
    }

    rows
}

// Morning and evening peaks, quiet overnight.
fn hour_factor(hour: u8) -> f64 {
    match hour {
        0..=5 => 0.4,
        6..=10 => 1.1,
        11..=16 => 0.9,
        17..=21 => 1.3,
        _ => 0.7,
    }
}
