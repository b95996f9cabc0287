// Word count compiler.
//
// Counts how often each main character says each word. Dialog is cleaned
// of stage directions ("[sighs]") and contractions before splitting, common
// words are dropped via the stopword list, and rare words are filtered out
// of the finished table.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::info;

use crate::script::ScriptRow;

/// Character -> word -> count, in first-appearance order.
pub type WordCounts = IndexMap<String, IndexMap<String, u32>>;

/// Matches a bracketed stage direction or a word containing an apostrophe.
///
/// `\w` is Unicode-aware, so accented contractions go as a whole.
static STAGE_OR_CONTRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\[.*?\])|(\w*'\w*)").expect("static pattern is valid"));

/// Punctuation replaced by a space before splitting into words.
const PUNCTUATION: &[char] = &[
    '(', ')', '[', ']', ',', '-', '.', '?', '!', ':', ';', '#', '&',
];

/// The six main characters.
pub const MANE_SIX: [&str; 6] = [
    "twilight sparkle",
    "applejack",
    "rarity",
    "pinkie pie",
    "rainbow dash",
    "fluttershy",
];

/// Settings for compiling word counts.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCountConfig {
    /// Lowercased names of the characters to count; everyone else is skipped
    pub characters: Vec<String>,
    /// Words never counted
    pub stopwords: HashSet<String>,
    /// Words counted fewer times than this are dropped from the result
    pub min_frequency: u32,
}

impl WordCountConfig {
    /// Main characters and the default threshold of 5, with the given stopwords.
    pub fn new(stopwords: HashSet<String>) -> Self {
        Self {
            characters: MANE_SIX.iter().map(|s| s.to_string()).collect(),
            stopwords,
            min_frequency: 5,
        }
    }
}

/// Strip stage directions and contractions, then blank out punctuation.
pub fn clean_dialog(dialog: &str) -> String {
    STAGE_OR_CONTRACTION
        .replace_all(dialog, "")
        .replace(PUNCTUATION, " ")
}

/// Clean, lowercase and split a line of dialog into words.
pub fn tokenize(dialog: &str) -> Vec<String> {
    clean_dialog(dialog)
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

/// Count words in one line, most frequent first (ties in first-seen order).
fn count_line(words: Vec<String>) -> Vec<(String, u32)> {
    let mut counts: IndexMap<String, u32> = IndexMap::new();
    for word in words {
        *counts.entry(word).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Full, unfiltered per-character counts.
///
/// A character appears in the table as soon as they have a line, even if
/// every word of it is a stopword.
pub fn count_words(rows: &[ScriptRow], config: &WordCountConfig) -> WordCounts {
    let mut table = WordCounts::new();

    for row in rows {
        let pony = row.speaker();
        if !config.characters.contains(&pony) {
            continue;
        }

        let words = table.entry(pony).or_default();
        for (word, freq) in count_line(tokenize(&row.dialog)) {
            if !config.stopwords.contains(&word) {
                *words.entry(word).or_insert(0) += freq;
            }
        }
    }
    table
}

/// A copy of `table` without the words counted fewer than `min_frequency` times.
pub fn filter_rare(table: &WordCounts, min_frequency: u32) -> WordCounts {
    table
        .iter()
        .map(|(pony, words)| {
            let kept = words
                .iter()
                .filter(|(_, freq)| **freq >= min_frequency)
                .map(|(w, f)| (w.clone(), *f))
                .collect();
            (pony.clone(), kept)
        })
        .collect()
}

/// Count, then threshold, words for every configured character.
pub fn compile_word_counts(rows: &[ScriptRow], config: &WordCountConfig) -> WordCounts {
    let full = count_words(rows, config);
    let filtered = filter_rare(&full, config.min_frequency);

    info!(
        characters = filtered.len(),
        words_before = full.values().map(|w| w.len()).sum::<usize>(),
        words_after = filtered.values().map(|w| w.len()).sum::<usize>(),
        min_frequency = config.min_frequency,
        "Compiled word counts"
    );
    filtered
}
