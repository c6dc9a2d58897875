use crate::analyze;
use crate::index::{DocLengths, InvertedIndex};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Default result cap.
pub const DEFAULT_LIMIT: usize = 10;

/// A ranked result.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub doc: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub limit: usize,
    /// Divide each score by the document's stored vector length.
    pub cosine: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            cosine: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

/// Split a raw query into its governing connective and analyzed terms.
///
/// Connectives are matched as whole whitespace tokens of the raw query,
/// before normalization (`and`/`or` are stopwords, so they would not
/// survive it; and substring matching would misread words like
/// "android"). `and` takes precedence when both appear. A query wrapped
/// in double quotes is co-occurrence AND over its terms.
fn parse_query(query: &str) -> (Connective, Vec<String>) {
    let query = query.trim();

    if query.len() >= 2 && query.starts_with('"') && query.ends_with('"') {
        let inner = &query[1..query.len() - 1];
        return (Connective::And, analyze(inner));
    }

    let tokens: Vec<&str> = query.split_whitespace().collect();
    let keyword = if tokens.iter().any(|t| t.eq_ignore_ascii_case("and")) {
        Some((Connective::And, "and"))
    } else if tokens.iter().any(|t| t.eq_ignore_ascii_case("or")) {
        Some((Connective::Or, "or"))
    } else {
        None
    };

    match keyword {
        None => (Connective::Or, analyze(query)),
        Some((connective, word)) => {
            let mut terms = Vec::new();
            for group in tokens.split(|t| t.eq_ignore_ascii_case(word)) {
                terms.extend(analyze(&group.join(" ")));
            }
            (connective, terms)
        }
    }
}

/// Rank documents for a query: boolean candidate resolution, then summed
/// stored weights, descending, ties in first-seen order.
pub fn rank(query: &str, index: &InvertedIndex, lengths: &DocLengths) -> Vec<Hit> {
    rank_with(query, index, lengths, RankOptions::default())
}

pub fn rank_with(
    query: &str,
    index: &InvertedIndex,
    lengths: &DocLengths,
    opts: RankOptions,
) -> Vec<Hit> {
    let (connective, terms) = parse_query(query);
    if terms.is_empty() {
        return Vec::new();
    }

    // AND intersects strictly: a term unknown to the index poisons the
    // whole candidate set. OR unions.
    let mut candidates: Option<HashSet<&str>> = None;
    for term in &terms {
        let docs: HashSet<&str> = index
            .terms
            .get(term)
            .map(|e| e.postings.iter().map(|p| p.doc.as_str()).collect())
            .unwrap_or_default();
        candidates = Some(match candidates.take() {
            None => docs,
            Some(acc) => match connective {
                Connective::And => acc.intersection(&docs).copied().collect(),
                Connective::Or => acc.union(&docs).copied().collect(),
            },
        });
    }
    let candidates = candidates.unwrap_or_default();
    if candidates.is_empty() {
        return Vec::new();
    }

    // Sum stored posting weights (already tf*idf; no second idf factor).
    // Insertion order is remembered so equal scores keep a stable order.
    let mut order: Vec<&str> = Vec::new();
    let mut scores: HashMap<&str, f64> = HashMap::new();
    for term in &terms {
        if let Some(entry) = index.terms.get(term) {
            for posting in &entry.postings {
                let doc = posting.doc.as_str();
                if !candidates.contains(doc) {
                    continue;
                }
                scores
                    .entry(doc)
                    .and_modify(|s| *s += posting.weight)
                    .or_insert_with(|| {
                        order.push(doc);
                        posting.weight
                    });
            }
        }
    }

    let mut hits: Vec<Hit> = order
        .into_iter()
        .map(|doc| {
            let mut score = scores[doc];
            if opts.cosine {
                if let Some(&len) = lengths.get(doc) {
                    if len > 0.0 {
                        score /= len;
                    }
                }
            }
            Hit {
                doc: doc.to_string(),
                score,
            }
        })
        .collect();

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.truncate(opts.limit.max(1));
    hits
}
