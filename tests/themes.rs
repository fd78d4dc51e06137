// tests/themes.rs
// Theme suggestion over curated content.

use newsletter_curator::{suggest_themes, ContentItem, Post, Repository};

const DEFAULTS: [&str; 5] = [
    "Data for Good: Making a Difference",
    "Democratizing Data: Tools and Techniques",
    "The Open Data Revolution",
    "Data Storytelling: Finding the Signal in the Noise",
    "Building Community Through Shared Data",
];

#[test]
fn empty_input_returns_default_themes() {
    let themes = suggest_themes::<Post>(&[], 3);
    assert_eq!(themes, DEFAULTS[..3].to_vec());
    assert_eq!(suggest_themes::<Post>(&[], 10), DEFAULTS.to_vec());
}

#[test]
fn mixed_items_feed_the_corpus() {
    let items = vec![
        ContentItem::from(Post::new("Transit maps", "Transit budgets and transit maps")),
        ContentItem::from(Repository::new("census-tools", "Census budgets, census maps", 10)),
    ];
    // transit:3 maps:3 budgets:2 census:3 tools:1
    let themes = suggest_themes(&items, 5);
    assert_eq!(themes.len(), 5);
    assert_eq!(themes[0], "Exploring Transit in Open Data");
    assert_eq!(themes[1], "The Future of Maps");
    assert_eq!(themes[2], "Census for Everyone: Breaking Down Barriers");
    assert_eq!(themes[4], "Community-Driven Budgets: Success Stories");
}

#[test]
fn stop_words_and_short_words_are_ignored() {
    let posts = vec![Post::new(
        "the the the and and with with that that data",
        "a to of in on as at by is for",
    )];
    // "with" and "that" are long enough but are stop words; "data" alone is too few
    assert_eq!(suggest_themes(&posts, 3), DEFAULTS[..3].to_vec());
}

#[test]
fn frequent_short_words_crowd_out_rarer_theme_words() {
    let short: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
    let title = format!("{0} {0}", short.join(" "));
    let posts = vec![Post::new(title, "alpha beta gamma delta")];
    assert_eq!(suggest_themes(&posts, 3), DEFAULTS[..3].to_vec());
}

#[test]
fn count_truncates() {
    let posts = vec![Post::new("alpha beta gamma delta", "alpha beta gamma delta")];
    assert_eq!(suggest_themes(&posts, 1), vec!["Exploring Alpha in Open Data".to_string()]);
    assert!(suggest_themes(&posts, 0).is_empty());
}
