// Stopword loading.
//
// The word count compiler takes its stopword list from a plain text file,
// one word per line. The `stop-words` crate's English list is available as
// a fallback when no curated file is at hand.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use stop_words::{get, LANGUAGE};
use tracing::info;

/// Load stopwords from a file, one per line, trailing whitespace stripped.
///
/// Blank lines are skipped. Words are kept exactly as written (no case
/// folding), so the file should already be lowercase.
pub fn load_stopwords(path: &Path) -> Result<HashSet<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read stopwords from {}", path.display()))?;
    let stopwords = parse_stopwords(&text);
    info!(count = stopwords.len(), path = %path.display(), "Loaded stopwords");
    Ok(stopwords)
}

/// Parse a stopword list from file contents.
pub fn parse_stopwords(text: &str) -> HashSet<String> {
    text.lines()
        .map(|line| line.trim_end())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// The `stop-words` crate's English list.
pub fn builtin_stopwords() -> HashSet<String> {
    get(LANGUAGE::English).into_iter().collect()
}
