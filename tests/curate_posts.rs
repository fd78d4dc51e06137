// tests/curate_posts.rs
// Ranking, truncation, stability and fallback for posts.

use newsletter_curator::{curate_posts, Curator, Post};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::json;

fn filler(i: usize) -> Post {
    Post::new(format!("Weekly roundup {i}"), "Short notes from around the web.")
        .with_link(format!("https://blog.test/{i}"), "blog")
}

#[test]
fn empty_input_gives_empty_output() {
    for n in [0, 1, 5, 100] {
        assert!(curate_posts(&[], n).is_empty());
    }
}

#[test]
fn output_length_is_min_of_n_and_len() {
    let items: Vec<Post> = (0..7).map(filler).collect();
    for n in [0, 1, 3, 5, 7, 10] {
        assert_eq!(curate_posts(&items, n).len(), n.min(items.len()), "n = {n}");
    }
}

#[test]
fn equal_scores_keep_input_order() {
    let items: Vec<Post> = (0..4)
        .map(|i| {
            Post::new("Same title", "Same summary.")
                .with_published("2024-05-01")
                .with_link(format!("https://blog.test/{i}"), "blog")
        })
        .collect();
    let out = curate_posts(&items, 4);
    assert_eq!(out, items);
}

#[test]
fn shuffled_input_is_stable_within_ties() {
    let titles = [
        "Open data and civic tech",
        "Open data notes",
        "Plain weekly notes",
    ];
    let mut rng = StdRng::seed_from_u64(0x5EED_2025);
    let items: Vec<Post> = (0..30)
        .map(|i| {
            let t = titles[rng.random_range(0..titles.len())];
            Post::new(t, "").with_link(format!("#{i}"), "blog")
        })
        .collect();

    let out = curate_posts(&items, items.len());
    assert_eq!(out.len(), items.len());

    // best group first
    let first_plain = out.iter().position(|p| p.title == titles[2]);
    let last_rich = out.iter().rposition(|p| p.title == titles[0]);
    if let (Some(plain), Some(rich)) = (first_plain, last_rich) {
        assert!(rich < plain);
    }

    // within each title group, links keep their input order
    for t in titles {
        let input: Vec<&str> = items.iter().filter(|p| p.title == t).map(|p| p.link.as_str()).collect();
        let output: Vec<&str> = out.iter().filter(|p| p.title == t).map(|p| p.link.as_str()).collect();
        assert_eq!(input, output, "group {t:?} reordered");
    }
}

#[test]
fn keyword_rich_dated_question_ranks_first() {
    let mut items: Vec<Post> = (0..6).map(filler).collect();
    let d = Post::new(
        "Can open data help?",
        "Civic tech groups and data journalism teams share results.",
    )
    .with_published("Mon, 06 May 2024 09:00:00 GMT")
    .with_link("https://blog.test/d", "blog");
    items.insert(3, d.clone());
    assert_eq!(items.len(), 7);

    let out = curate_posts(&items, 5);
    assert_eq!(out.len(), 5);
    assert_eq!(out[0], d);
    // the rest tie and keep their input order
    assert_eq!(out[1], items[0]);
    assert_eq!(out[4], items[4]);
}

#[test]
fn recency_bonus_breaks_otherwise_equal_posts() {
    let undated = Post::new("Open data notes", "").with_link("a", "blog");
    let dated = Post::new("Open data notes", "")
        .with_link("b", "blog")
        .with_published("2024-01-01");
    let out = curate_posts(&[undated.clone(), dated.clone()], 2);
    assert_eq!(out, vec![dated, undated]);
}

#[test]
fn records_rank_like_typed_posts() {
    let c = Curator::default();
    let records = vec![
        json!({"title": "Weekly roundup", "summary": "", "link": "a"}),
        json!({"title": "Open data for good", "summary": "civic tech", "link": "b", "published": "today"}),
    ];
    let out = c.curate_post_records(&records, 5);
    assert_eq!(out[0]["link"], "b");
    assert_eq!(out[1]["link"], "a");
}

#[test]
fn epoch_published_stamp_earns_recency_bonus() {
    let c = Curator::default();
    let records = vec![
        json!({"title": "Weekly roundup", "link": "a"}),
        json!({"title": "Open data for good", "summary": "civic tech", "link": "b", "published": 1714000000}),
    ];
    let links: Vec<_> = c
        .curate_post_records(&records, 5)
        .iter()
        .map(|r| r["link"].clone())
        .collect();
    assert_eq!(links, vec![json!("b"), json!("a")]);
}

#[test]
fn malformed_record_falls_back_to_input_order() {
    let c = Curator::default();
    let records = vec![
        json!({"title": "Weekly roundup", "link": "a"}),
        json!({"title": "Open data for good", "summary": "civic tech", "link": "b"}),
        json!({"title": ["not", "a", "string"], "link": "c"}),
        json!({"title": "More notes", "link": "d"}),
    ];
    let out = c.curate_post_records(&records, 3);
    assert_eq!(out, records[..3].to_vec());
}
