// Unit tests for word counting and pony-language scoring.
//
// Covers the cleaning rules, the stopword and threshold filters, and the
// TF-IDF edge cases (shared words, unknown words, tie order).

use std::collections::HashSet;

use ponytalk::script::ScriptRow;
use ponytalk::words::counts::{clean_dialog, count_words, tokenize, MANE_SIX};
use ponytalk::words::stopwords::parse_stopwords;
use ponytalk::words::tfidf::{document_frequency, score_words};
use ponytalk::words::{compile_word_counts, tfidf, top_words, WordCountConfig, WordCounts};

fn no_stopwords(min: u32) -> WordCountConfig {
    WordCountConfig {
        min_frequency: min,
        ..WordCountConfig::new(HashSet::new())
    }
}

// ============================================================
// Cleaning
// ============================================================

#[test]
fn clean_dialog_handles_every_punctuation_mark() {
    let cleaned = clean_dialog("a(b)c,d-e.f?g!h:i;j#k&l");
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    assert_eq!(words, vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"]);
}

#[test]
fn tokenize_drops_contractions_entirely() {
    assert_eq!(tokenize("We're gonna win, aren't we?"), vec!["gonna", "win", "we"]);
}

#[test]
fn tokenize_empty_dialog() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("[silence]").is_empty());
}

// ============================================================
// Counting and filtering
// ============================================================

#[test]
fn mane_six_is_default_cast() {
    let config = no_stopwords(5);
    assert_eq!(config.characters.len(), 6);
    for name in MANE_SIX {
        assert!(config.characters.contains(&name.to_string()));
    }
}

#[test]
fn speaker_names_are_case_insensitive() {
    let rows = vec![
        ScriptRow::new("e", "Rainbow Dash", "awesome"),
        ScriptRow::new("e", "RAINBOW DASH", "awesome"),
    ];
    let table = count_words(&rows, &no_stopwords(1));
    assert_eq!(table["rainbow dash"]["awesome"], 2);
}

#[test]
fn counts_below_threshold_never_survive() {
    let rows = vec![
        ScriptRow::new("e", "Applejack", "apples apples apples apples apples"),
        ScriptRow::new("e", "Applejack", "barn barn barn barn"),
    ];
    let table = compile_word_counts(&rows, &no_stopwords(5));
    for words in table.values() {
        for (word, count) in words {
            assert!(*count >= 5, "{word} survived with count {count}");
        }
    }
    assert_eq!(table["applejack"].len(), 1);
}

#[test]
fn stopword_file_contents_filter_words() {
    let config = WordCountConfig {
        min_frequency: 1,
        ..WordCountConfig::new(parse_stopwords("the\nof\n"))
    };
    let rows = vec![ScriptRow::new("e", "Twilight Sparkle", "The magic of the books")];
    let table = compile_word_counts(&rows, &config);
    let words: Vec<&String> = table["twilight sparkle"].keys().collect();
    assert_eq!(words, vec!["magic", "books"]);
}

#[test]
fn words_merge_in_per_line_frequency_order() {
    let rows = vec![ScriptRow::new("e", "Rarity", "gems dress dress")];
    let table = count_words(&rows, &no_stopwords(1));
    let words: Vec<&String> = table["rarity"].keys().collect();
    assert_eq!(words, vec!["dress", "gems"]);
}

// ============================================================
// TF-IDF
// ============================================================

fn sample_table() -> WordCounts {
    let mut table = WordCounts::new();
    table.insert(
        "rarity".to_string(),
        [("darling", 12), ("friends", 30), ("fabulous", 7)]
            .iter()
            .map(|(w, c)| (w.to_string(), *c))
            .collect(),
    );
    table.insert(
        "applejack".to_string(),
        [("friends", 25), ("apples", 20), ("darling", 5)]
            .iter()
            .map(|(w, c)| (w.to_string(), *c))
            .collect(),
    );
    table.insert(
        "fluttershy".to_string(),
        [("friends", 10), ("bunny", 6)]
            .iter()
            .map(|(w, c)| (w.to_string(), *c))
            .collect(),
    );
    table
}

#[test]
fn word_used_by_everyone_scores_exactly_zero() {
    let table = sample_table();
    assert_eq!(document_frequency("friends", &table), 3);
    for pony in table.keys() {
        assert_eq!(tfidf("friends", pony, &table), 0.0);
    }
}

#[test]
fn idf_uses_natural_log() {
    let table = sample_table();
    let expected = 12.0 * (3.0f64 / 2.0).ln();
    assert!((tfidf("darling", "rarity", &table) - expected).abs() < 1e-12);
}

#[test]
fn score_words_follows_table_order() {
    let scored = score_words("fluttershy", &sample_table());
    let words: Vec<&str> = scored.iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(words, vec!["friends", "bunny"]);
}

#[test]
fn top_words_per_character() {
    let top = top_words(&sample_table(), 2);
    assert_eq!(top["rarity"], vec!["fabulous", "darling"]);
    assert_eq!(top["applejack"], vec!["apples", "darling"]);
    assert_eq!(top["fluttershy"], vec!["bunny", "friends"]);
}

#[test]
fn top_words_with_n_larger_than_vocabulary() {
    let top = top_words(&sample_table(), 50);
    assert_eq!(top["fluttershy"].len(), 2);
}
