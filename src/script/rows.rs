// Reading script rows from CSV.
//
// Columns are matched by header name, so the transcript can carry any number
// of extra columns. The three we need are `title` (episode), `pony`
// (speaker) and `dialog`. A missing column fails the whole read.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// One line of dialog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptRow {
    /// Episode title; a change in title marks an episode boundary
    pub title: String,
    /// Speaker name as written in the transcript (not normalized)
    pub pony: String,
    /// The spoken line, stage directions included
    pub dialog: String,
}

impl ScriptRow {
    pub fn new(title: &str, pony: &str, dialog: &str) -> Self {
        Self {
            title: title.to_string(),
            pony: pony.to_string(),
            dialog: dialog.to_string(),
        }
    }

    /// Lowercased speaker name, the form used as a graph node and table key.
    pub fn speaker(&self) -> String {
        self.pony.to_lowercase()
    }

    /// False when the speaker cell is empty or only whitespace.
    pub fn has_speaker(&self) -> bool {
        !self.pony.trim().is_empty()
    }
}

/// Read every row of a script CSV file, in file order.
pub fn read_script(path: &Path) -> Result<Vec<ScriptRow>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open script {}", path.display()))?;
    let rows = read_script_from(file)
        .with_context(|| format!("Failed to parse script {}", path.display()))?;
    info!(rows = rows.len(), path = %path.display(), "Read script");
    Ok(rows)
}

/// Read script rows from any CSV source with a header line.
pub fn read_script_from<R: Read>(source: R) -> Result<Vec<ScriptRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(source);

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<ScriptRow>().enumerate() {
        // +2: one for the header line, one for 1-based numbering
        let row = record.with_context(|| format!("Malformed script row at line {}", i + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_by_header_name() {
        let csv = "\
title,writer,pony,dialog
Friendship is Magic,Lauren Faust,Twilight Sparkle,\"Hello, Spike.\"
Friendship is Magic,Lauren Faust,Spike,Hi!
";
        let rows = read_script_from(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pony, "Twilight Sparkle");
        assert_eq!(rows[0].dialog, "Hello, Spike.");
        assert_eq!(rows[1].speaker(), "spike");
    }

    #[test]
    fn test_empty_dialog_cell_is_empty_string() {
        let csv = "title,pony,dialog\nEp,Rarity,\n";
        let rows = read_script_from(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].dialog, "");
    }

    #[test]
    fn test_blank_speaker_cell_has_no_speaker() {
        let csv = "title,pony,dialog\nEp,,[music]\nEp,Spike,Hi\n";
        let rows = read_script_from(csv.as_bytes()).unwrap();
        assert!(!rows[0].has_speaker());
        assert!(rows[1].has_speaker());
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "title,dialog\nEp,hello\n";
        assert!(read_script_from(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file_fails() {
        let result = read_script(Path::new("/definitely/not/a/script.csv"));
        assert!(result.is_err());
    }
}
