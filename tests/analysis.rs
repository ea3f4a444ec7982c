use post_insights::config::InsightsConfig;
use post_insights::synthetic::generate_sample_rows;
use post_insights::{analyze, analyze_records, analyze_with_config, normalize_hashtag, safe_rate};
use proptest::prelude::*;
use serde_json::{json, Value};

fn two_short_posts() -> Value {
    json!([
        {
            "platform": "tiktok", "postId": "a1", "date": "2024-05-01", "hour": 18,
            "contentType": "short", "title": "Editing tricks",
            "hashtags": ["ai", "productivity"],
            "views": 12000, "likes": 1300, "comments": 120, "shares": 80
        },
        {
            "platform": "tiktok", "postId": "a2", "date": "2024-05-02", "hour": 12,
            "contentType": "short", "title": "Cut faster",
            "hashtags": ["editing"],
            "views": 6000, "likes": 430, "comments": 32, "shares": 20
        }
    ])
}

#[test]
fn two_row_example() {
    let output = analyze(&two_short_posts()).unwrap();

    assert_eq!(output.best_hours, vec![18, 12]);
    assert_eq!(output.diagnostics.type_scores.len(), 1);
    assert_eq!(output.diagnostics.type_scores[0].content_type, "short");

    for tag in ["ai", "productivity", "editing"] {
        assert!(output.top_hashtags.iter().any(|t| t == tag), "missing {}", tag);
    }
    let editing = output
        .diagnostics
        .hashtag_leaders
        .iter()
        .find(|stat| stat.tag == "editing")
        .unwrap();
    assert_eq!(editing.uses, 1);
    assert_eq!(editing.views_per_use, 6000.0);

    assert_eq!(
        output.actions.last().unwrap(),
        "Publish ~5 posts next 7 days with 70/20/10: top/experimental/brand."
    );
}

#[test]
fn two_row_example_action_plan() {
    let output = analyze(&two_short_posts()).unwrap();
    assert_eq!(
        output.actions,
        vec![
            "Double down on **short** content (top format).",
            "Post at **18:00, 12:00** local time",
            "Use 1-3 of: #ai #productivity #editing",
            "De-prioritize **short** until performance improves.",
            "Publish ~5 posts next 7 days with 70/20/10: top/experimental/brand.",
        ]
    );
}

#[test]
fn two_row_example_diagnostics_shape() {
    let output = analyze(&two_short_posts()).unwrap();
    let value = serde_json::to_value(&output).unwrap();

    assert_eq!(value["bestHours"], json!([18, 12]));
    assert_eq!(value["diagnostics"]["byHour"]["18"], json!({ "views": 12000, "posts": 1 }));
    assert_eq!(
        value["diagnostics"]["byType"]["short"],
        json!({ "views": 18000, "likes": 1730, "comments": 152, "shares": 100, "posts": 2 })
    );
    assert_eq!(value["diagnostics"]["typeScores"][0]["type"], "short");
    assert_eq!(value["diagnostics"]["rowCount"], 2);
    assert_eq!(value["diagnostics"]["droppedRows"], 0);
}

#[test]
fn empty_rows_is_invalid_input() {
    let err = analyze(&json!([])).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn non_array_rows_is_invalid_input() {
    assert!(analyze(&json!("rows")).unwrap_err().is_invalid_input());
    assert!(analyze(&json!({ "rows": [] })).unwrap_err().is_invalid_input());
}

#[test]
fn rows_without_views_are_dropped_not_fatal() {
    let rows = json!([
        { "hour": 8, "contentType": "story", "views": 300 },
        { "hour": 9, "contentType": "story" },
        { "hour": 10, "contentType": "story", "views": "unknown" }
    ]);
    let output = analyze(&rows).unwrap();
    assert_eq!(output.best_hours, vec![8]);
    assert_eq!(output.diagnostics.row_count, 1);
    assert_eq!(output.diagnostics.dropped_rows, 2);
}

#[test]
fn missing_content_type_is_unknown() {
    let rows = json!([
        { "views": 100 },
        { "views": 50, "contentType": "" },
        { "views": 900, "contentType": "short" }
    ]);
    let output = analyze(&rows).unwrap();
    let names: Vec<&str> = output
        .diagnostics
        .type_scores
        .iter()
        .map(|score| score.content_type.as_str())
        .collect();
    assert_eq!(names, vec!["short", "unknown"]);
    assert!(output
        .actions
        .contains(&"De-prioritize **unknown** until performance improves.".to_string()));
}

#[test]
fn out_of_range_hours_are_clamped() {
    let rows = json!([
        { "views": 10, "hour": -5 },
        { "views": 20, "hour": 99 },
        { "views": 30, "hour": 23 }
    ]);
    let output = analyze(&rows).unwrap();
    let by_hour = &output.diagnostics.by_hour;
    assert_eq!(by_hour.len(), 2);
    assert_eq!(by_hour[&0].posts, 1);
    assert_eq!(by_hour[&23].posts, 2);
    assert_eq!(by_hour[&23].views, 50);
}

#[test]
fn rate_ranking_and_view_leaders_differ() {
    let rows = json!([
        { "views": 1000, "hashtags": ["broad"] },
        { "views": 1000, "hashtags": ["broad"] },
        { "views": 1000, "hashtags": ["broad"] },
        { "views": 1800, "hashtags": ["sharp"] }
    ]);
    let output = analyze(&rows).unwrap();
    let leaders: Vec<&str> = output
        .diagnostics
        .hashtag_leaders
        .iter()
        .map(|stat| stat.tag.as_str())
        .collect();

    assert_eq!(output.top_hashtags, vec!["sharp", "broad"]);
    assert_eq!(leaders, vec!["broad", "sharp"]);
}

#[test]
fn hashtag_limits_apply() {
    let rows: Vec<Value> = (0..30)
        .map(|idx| json!({ "views": 100 + idx, "hashtags": [format!("tag{}", idx)] }))
        .collect();
    let output = analyze(&Value::Array(rows)).unwrap();

    assert_eq!(output.top_hashtags.len(), 15);
    assert_eq!(output.diagnostics.hashtag_leaders.len(), 20);
    assert_eq!(output.top_hashtags[0], "tag29");
    let plan_line = output
        .actions
        .iter()
        .find(|action| action.starts_with("Use 1-3 of:"))
        .unwrap();
    assert_eq!(plan_line, "Use 1-3 of: #tag29 #tag28 #tag27 #tag26 #tag25");
}

#[test]
fn cadence_scales_with_history() {
    let ten: Vec<Value> = (0..10).map(|_| json!({ "views": 1 })).collect();
    let hundred: Vec<Value> = (0..100).map(|_| json!({ "views": 1 })).collect();

    let output = analyze(&Value::Array(ten)).unwrap();
    assert!(output.actions.last().unwrap().starts_with("Publish ~6 posts"));
    let output = analyze(&Value::Array(hundred)).unwrap();
    assert!(output.actions.last().unwrap().starts_with("Publish ~14 posts"));
}

#[test]
fn config_limits_change_output() {
    let mut config = InsightsConfig::default();
    config.limits.best_hours = 1;
    config.limits.plan_hashtags = 1;

    let output = analyze_with_config(&two_short_posts(), &config).unwrap();
    assert_eq!(output.best_hours, vec![18]);
    assert!(output.actions.contains(&"Use 1-3 of: #ai".to_string()));
}

#[test]
fn repeated_calls_are_independent() {
    let first = analyze(&two_short_posts()).unwrap();
    let _ = analyze(&json!([{ "views": 1, "hour": 3, "contentType": "other" }])).unwrap();
    let again = analyze(&two_short_posts()).unwrap();

    assert_eq!(first.best_hours, again.best_hours);
    assert_eq!(first.actions, again.actions);
    assert_eq!(first.diagnostics.type_scores, again.diagnostics.type_scores);
}

#[test]
fn synthetic_rows_analyze_cleanly() {
    let rows = generate_sample_rows(120, 9);
    let output = analyze_records(&rows, &InsightsConfig::default()).unwrap();

    assert_eq!(output.best_hours.len(), 3);
    assert!(output.top_hashtags.len() <= 15);
    assert_eq!(output.actions.len(), 5);
    assert!(output.actions.last().unwrap().starts_with("Publish ~14 posts"));
}

#[test]
fn safe_rate_examples() {
    assert_eq!(safe_rate(10.0, 4.0), 2.5);
    assert_eq!(safe_rate(123.0, 0.0), 0.0);
}

fn arb_row() -> impl Strategy<Value = Value> {
    (
        -50i64..80,
        prop::sample::select(vec!["short", "long", "", "Story"]),
        0u64..100_000,
        0u64..5_000,
        prop::collection::vec(prop::sample::select(vec!["#AI", "ai", " rust ", "#", "Growth"]), 0..4),
    )
        .prop_map(|(hour, content_type, views, likes, hashtags)| {
            json!({
                "hour": hour,
                "contentType": content_type,
                "views": views,
                "likes": likes,
                "hashtags": hashtags,
            })
        })
}

proptest! {
    #[test]
    fn every_row_lands_in_one_valid_hour(rows in prop::collection::vec(arb_row(), 1..40)) {
        let output = analyze(&Value::Array(rows.clone())).unwrap();
        let total: u64 = output.diagnostics.by_hour.values().map(|agg| agg.posts).sum();
        prop_assert_eq!(total, rows.len() as u64);
        prop_assert!(output.diagnostics.by_hour.keys().all(|hour| *hour <= 23));
    }

    #[test]
    fn best_hours_bounded_and_sorted(rows in prop::collection::vec(arb_row(), 1..40)) {
        let output = analyze(&Value::Array(rows)).unwrap();
        let by_hour = &output.diagnostics.by_hour;

        prop_assert!(output.best_hours.len() <= 3);
        prop_assert!(output.best_hours.len() <= by_hour.len());
        let rates: Vec<f64> = output
            .best_hours
            .iter()
            .map(|hour| safe_rate(by_hour[hour].views as f64, by_hour[hour].posts as f64))
            .collect();
        prop_assert!(rates.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn type_scores_cover_every_type_in_order(rows in prop::collection::vec(arb_row(), 1..40)) {
        let output = analyze(&Value::Array(rows)).unwrap();
        let scores = &output.diagnostics.type_scores;

        prop_assert_eq!(scores.len(), output.diagnostics.by_type.len());
        prop_assert!(scores.iter().all(|score| !score.content_type.is_empty()));
        prop_assert!(scores.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn cadence_line_always_present(rows in prop::collection::vec(arb_row(), 1..40)) {
        let output = analyze(&Value::Array(rows)).unwrap();
        let last = output.actions.last().unwrap();
        prop_assert!(last.starts_with("Publish ~"));
        prop_assert!(last.ends_with("posts next 7 days with 70/20/10: top/experimental/brand."));
    }

    #[test]
    fn hashtag_normalization_is_idempotent(tag in ".{0,24}") {
        if let Some(normalized) = normalize_hashtag(&tag) {
            prop_assert_eq!(normalize_hashtag(&normalized), Some(normalized.clone()));
            prop_assert!(!normalized.contains('#'));
            prop_assert!(!normalized.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn hashtag_case_and_decoration_merge(tag in "[a-zA-Z0-9]{1,12}") {
        let plain = normalize_hashtag(&tag);
        prop_assert_eq!(normalize_hashtag(&format!("#{}", tag.to_uppercase())), plain.clone());
        prop_assert_eq!(normalize_hashtag(&format!("  #{} ", tag)), plain);
    }
}
