// Interaction graph construction from script rows.
//
// Two characters interact when one speaks directly after the other in the
// same episode. Only the most frequent speakers become nodes, and group
// speakers ("all", "other ponies", "rarity and applejack") are excluded by
// substring.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::info;

use super::graph::InteractionGraph;
use crate::script::ScriptRow;

/// Settings for turning a script into an interaction graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// How many of the most frequent speakers are eligible as nodes
    pub top_speakers: usize,
    /// A speaker whose name contains any of these is never a node
    pub character_stopwords: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            top_speakers: 101,
            character_stopwords: ["others", "ponies", "and", "all"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl NetworkConfig {
    /// True if the name contains one of the group-speaker stopwords.
    pub fn is_group_speaker(&self, name: &str) -> bool {
        self.character_stopwords
            .iter()
            .any(|stop| name.contains(stop.as_str()))
    }
}

/// The `n` most frequent speakers, lowercased, most frequent first.
///
/// Speakers are counted case-insensitively. Equal counts keep the order in
/// which the speakers first appear in the script. Rows with a blank speaker
/// are not counted.
pub fn most_frequent_speakers(rows: &[ScriptRow], n: usize) -> Vec<String> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for row in rows.iter().filter(|row| row.has_speaker()) {
        *counts.entry(row.speaker()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // Stable sort keeps first-appearance order among ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(n).map(|(name, _)| name).collect()
}

/// Whether a transition from `previous` to `current` counts as an interaction.
///
/// Both names must already be lowercased.
pub fn is_valid_interaction(
    current: &str,
    previous: &str,
    top_speakers: &HashSet<String>,
    config: &NetworkConfig,
) -> bool {
    if current == previous {
        return false;
    }

    let valid = |name: &str| !config.is_group_speaker(name) && top_speakers.contains(name);
    valid(current) && valid(previous)
}

/// Build the interaction graph for a whole script.
///
/// Rows are walked in order. The previous speaker resets at every change of
/// episode title, so the last line of one episode never links to the first
/// line of the next. A row with a blank speaker links to nothing and also
/// breaks the chain.
pub fn build_interaction_graph(rows: &[ScriptRow], config: &NetworkConfig) -> InteractionGraph {
    let top: HashSet<String> = most_frequent_speakers(rows, config.top_speakers)
        .into_iter()
        .collect();

    let mut graph = InteractionGraph::new();
    let mut previous_speaker: Option<String> = None;
    let mut previous_episode: Option<&str> = None;

    for row in rows {
        if previous_episode != Some(row.title.as_str()) {
            previous_speaker = None;
            previous_episode = Some(row.title.as_str());
        }

        if !row.has_speaker() {
            previous_speaker = None;
            continue;
        }

        let speaker = row.speaker();
        if let Some(previous) = previous_speaker.as_deref() {
            if is_valid_interaction(&speaker, previous, &top, config) {
                graph.add_weight(&speaker, previous, 1);
            }
        }
        previous_speaker = Some(speaker);
    }

    info!(
        nodes = graph.order(),
        edges = graph.edge_count(),
        "Built character interaction graph"
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str)]) -> Vec<ScriptRow> {
        data.iter()
            .map(|(ep, pony)| ScriptRow::new(ep, pony, "..."))
            .collect()
    }

    fn top(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_most_frequent_is_case_insensitive() {
        let script = rows(&[
            ("e", "Rarity"),
            ("e", "rarity"),
            ("e", "Spike"),
            ("e", "Applejack"),
            ("e", "Applejack"),
            ("e", "RARITY"),
        ]);
        assert_eq!(
            most_frequent_speakers(&script, 2),
            vec!["rarity".to_string(), "applejack".to_string()]
        );
    }

    #[test]
    fn test_most_frequent_ties_keep_first_appearance() {
        let script = rows(&[("e", "b"), ("e", "a"), ("e", "c")]);
        assert_eq!(most_frequent_speakers(&script, 2), vec!["b", "a"]);
    }

    #[test]
    fn test_same_speaker_is_not_an_interaction() {
        let config = NetworkConfig::default();
        assert!(!is_valid_interaction("spike", "spike", &top(&["spike"]), &config));
    }

    #[test]
    fn test_group_speakers_rejected_by_substring() {
        let config = NetworkConfig::default();
        let t = top(&["rarity", "all", "other ponies", "rarity and spike"]);
        assert!(!is_valid_interaction("rarity", "all", &t, &config));
        assert!(!is_valid_interaction("other ponies", "rarity", &t, &config));
        assert!(!is_valid_interaction("rarity and spike", "rarity", &t, &config));
    }

    #[test]
    fn test_speakers_outside_top_set_rejected() {
        let config = NetworkConfig::default();
        assert!(!is_valid_interaction("rarity", "spike", &top(&["rarity"]), &config));
        assert!(!is_valid_interaction("rarity", "", &top(&["rarity"]), &config));
    }

    #[test]
    fn test_episode_boundary_resets_previous_speaker() {
        let script = vec![
            ScriptRow::new("ep1", "Twilight", "hi"),
            ScriptRow::new("ep1", "Applejack", "hey"),
            ScriptRow::new("ep2", "Twilight", "yo"),
        ];
        let g = build_interaction_graph(&script, &NetworkConfig::default());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight("twilight", "applejack"), Some(1));
    }

    #[test]
    fn test_blank_speakers_never_become_nodes() {
        let script = rows(&[
            ("e1", ""),
            ("e1", "  "),
            ("e1", ""),
            ("e2", "Spike"),
            ("e2", ""),
            ("e2", "Rarity"),
        ]);
        assert_eq!(most_frequent_speakers(&script, 101), vec!["spike", "rarity"]);

        let g = build_interaction_graph(&script, &NetworkConfig::default());
        assert_eq!(g.edge_count(), 0);
        assert!(!g.contains(""));
    }

    #[test]
    fn test_weights_count_transitions() {
        let script = rows(&[
            ("e", "Rarity"),
            ("e", "Spike"),
            ("e", "Rarity"),
            ("e", "Rarity"),
            ("e", "Spike"),
        ]);
        let g = build_interaction_graph(&script, &NetworkConfig::default());
        assert_eq!(g.weight("rarity", "spike"), Some(3));
        assert_eq!(g.weight("rarity", "rarity"), None);
    }

    #[test]
    fn test_top_speaker_limit_excludes_rare_characters() {
        let script = rows(&[
            ("e", "Rarity"),
            ("e", "Spike"),
            ("e", "Rarity"),
            ("e", "Spike"),
            ("e", "Gummy"),
            ("e", "Rarity"),
        ]);
        let config = NetworkConfig {
            top_speakers: 2,
            ..NetworkConfig::default()
        };
        let g = build_interaction_graph(&script, &config);
        assert!(!g.contains("gummy"));
        assert_eq!(g.weight("rarity", "spike"), Some(3));
    }
}
