// Pony-language scoring with TF-IDF.
//
// Each character's word table is treated as one document:
//
//   tf-idf(word, pony) = tf(word, pony) * idf(word)
//   tf(word, pony)     = how many times `pony` says `word`
//   idf(word)          = ln(number of ponies / number of ponies who say `word`)
//
// Words every pony uses score zero; words only one pony uses score highest.

use indexmap::IndexMap;

use super::counts::WordCounts;

/// Number of characters whose table contains `word`.
pub fn document_frequency(word: &str, table: &WordCounts) -> usize {
    table.values().filter(|words| words.contains_key(word)).count()
}

/// TF-IDF score of `word` for `pony`.
///
/// A word nobody uses (or an unknown pony) scores 0.0 rather than failing
/// on a division by zero.
pub fn tfidf(word: &str, pony: &str, table: &WordCounts) -> f64 {
    let tf = table
        .get(pony)
        .and_then(|words| words.get(word))
        .copied()
        .unwrap_or(0);

    let df = document_frequency(word, table);
    if tf == 0 || df == 0 {
        return 0.0;
    }

    let idf = (table.len() as f64 / df as f64).ln();
    f64::from(tf) * idf
}

/// All of one pony's words with their scores, in table order.
pub fn score_words(pony: &str, table: &WordCounts) -> Vec<(String, f64)> {
    table
        .get(pony)
        .map(|words| {
            words
                .keys()
                .map(|w| (w.clone(), tfidf(w, pony, table)))
                .collect()
        })
        .unwrap_or_default()
}

/// The `n` highest-scoring words for each pony, best first.
///
/// Equal scores keep the word order of the input table.
pub fn top_words(table: &WordCounts, n: usize) -> IndexMap<String, Vec<String>> {
    table
        .keys()
        .map(|pony| {
            let mut scored = score_words(pony, table);
            // Stable sort keeps table order among ties
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));
            let top = scored.into_iter().take(n).map(|(w, _)| w).collect();
            (pony.clone(), top)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(data: &[(&str, &[(&str, u32)])]) -> WordCounts {
        data.iter()
            .map(|(pony, words)| {
                let words = words.iter().map(|(w, c)| (w.to_string(), *c)).collect();
                (pony.to_string(), words)
            })
            .collect()
    }

    #[test]
    fn test_shared_word_scores_zero() {
        let t = table(&[
            ("rarity", &[("friendship", 9), ("darling", 6)]),
            ("applejack", &[("friendship", 7), ("apples", 8)]),
        ]);
        assert_eq!(tfidf("friendship", "rarity", &t), 0.0);
        assert_eq!(tfidf("friendship", "applejack", &t), 0.0);
    }

    #[test]
    fn test_unique_word_scores_tf_times_ln_n() {
        let t = table(&[
            ("rarity", &[("darling", 6)]),
            ("applejack", &[("apples", 8)]),
        ]);
        let expected = 6.0 * 2f64.ln();
        assert!((tfidf("darling", "rarity", &t) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_word_or_pony_scores_zero() {
        let t = table(&[("rarity", &[("darling", 6)])]);
        assert_eq!(tfidf("apples", "rarity", &t), 0.0);
        assert_eq!(tfidf("darling", "spike", &t), 0.0);
    }

    #[test]
    fn test_top_words_ranked_and_truncated() {
        let t = table(&[
            ("rarity", &[("friendship", 50), ("darling", 6), ("gems", 9)]),
            ("applejack", &[("friendship", 40), ("apples", 8)]),
        ]);
        let top = top_words(&t, 2);
        assert_eq!(top["rarity"], vec!["gems", "darling"]);
        assert_eq!(top["applejack"], vec!["apples", "friendship"]);
    }

    #[test]
    fn test_ties_keep_table_order() {
        let t = table(&[
            ("pinkie pie", &[("party", 5), ("cake", 5), ("fun", 5)]),
            ("rainbow dash", &[("awesome", 5)]),
        ]);
        let top = top_words(&t, 3);
        assert_eq!(top["pinkie pie"], vec!["party", "cake", "fun"]);
    }

    #[test]
    fn test_empty_table() {
        assert!(top_words(&WordCounts::new(), 5).is_empty());
    }
}
