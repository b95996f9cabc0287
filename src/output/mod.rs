// Output formatting — JSON files between pipeline steps, and terminal display.

pub mod terminal;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

/// Serialize a value as pretty JSON with 4-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Write a value as pretty JSON, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = to_pretty_json(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote JSON output");
    Ok(())
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Malformed JSON in {}", path.display()))
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Character names are free text from the transcript; this keeps table
/// columns aligned without slicing through a multi-byte character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let mut map: IndexMap<String, u32> = IndexMap::new();
        map.insert("rarity".to_string(), 3);
        let json = to_pretty_json(&map).unwrap();
        assert_eq!(json, "{\n    \"rarity\": 3\n}");
    }

    #[test]
    fn test_json_file_round_trip_keeps_order() {
        let path = std::env::temp_dir().join("ponytalk_output_test/nested/order.json");
        let mut map: IndexMap<String, u32> = IndexMap::new();
        map.insert("zecora".to_string(), 1);
        map.insert("applejack".to_string(), 2);
        write_json(&path, &map).unwrap();

        let back: IndexMap<String, u32> = read_json(&path).unwrap();
        let keys: Vec<&String> = back.keys().collect();
        assert_eq!(keys, vec!["zecora", "applejack"]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let result: Result<IndexMap<String, u32>> = read_json(Path::new("/no/such/file.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("princess celestia", 8), "princess...");
        assert_eq!(truncate_chars("señor", 10), "señor");
    }
}
