//! Core of the quarry retrieval engine: text normalization, Porter
//! stemming, TF-IDF index construction, line-oriented persistence, and
//! boolean/ranked query evaluation.

pub mod index;
pub mod normalize;
pub mod query;
pub mod stem;
pub mod store;

pub use index::{build_index, DocLengths, InvertedIndex, Posting, TermEntry};
pub use query::{rank, rank_with, Hit, RankOptions, DEFAULT_LIMIT};

/// Turn raw text into index terms: normalize, then stem each token.
///
/// Indexing and querying must both go through this function; a query term
/// and a document term only match if they conflate to the same string.
pub fn analyze(text: &str) -> Vec<String> {
    normalize::normalize(text)
        .iter()
        .map(|token| stem::stem(token))
        .collect()
}
