// Per-character vocabulary: word counting and pony-language (TF-IDF) scoring.

pub mod counts;
pub mod stopwords;
pub mod tfidf;

pub use counts::{compile_word_counts, WordCountConfig, WordCounts};
pub use tfidf::{tfidf, top_words};
