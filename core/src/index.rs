use crate::analyze;
use std::collections::HashMap;

/// One document's entry in a term's postings list. The weight starts life
/// as a sublinear tf and is overwritten with the final `tf * idf` once the
/// whole corpus has been seen; the rewrite is one-way.
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    pub doc: String,
    pub weight: f64,
}

/// idf plus the postings that carry it, in document ingestion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermEntry {
    pub idf: f64,
    pub postings: Vec<Posting>,
}

/// Term -> (idf, postings). A term is present iff it survived
/// normalization and stemming in at least one document.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub terms: HashMap<String, TermEntry>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Document id -> Euclidean norm of its final weight vector.
pub type DocLengths = HashMap<String, f64>;

/// Build the inverted index and document length table from a corpus of
/// (document id, raw text) pairs.
///
/// Callers that skip unreadable documents must not pass them in; `N` is
/// exactly the number of pairs consumed here. An empty corpus produces an
/// empty index and an empty length table.
pub fn build_index<I>(docs: I) -> (InvertedIndex, DocLengths)
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut index = InvertedIndex::new();
    let mut doc_order: Vec<String> = Vec::new();

    for (doc, text) in docs {
        let mut tf_counts: HashMap<String, u32> = HashMap::new();
        for term in analyze(&text) {
            *tf_counts.entry(term).or_insert(0) += 1;
        }
        for (term, freq) in tf_counts {
            let tf = 1.0 + (freq as f64).log2();
            index
                .terms
                .entry(term)
                .or_default()
                .postings
                .push(Posting {
                    doc: doc.clone(),
                    weight: tf,
                });
        }
        doc_order.push(doc);
    }

    let n = doc_order.len() as f64;
    for entry in index.terms.values_mut() {
        entry.idf = (n / entry.postings.len() as f64).log2();
        for posting in &mut entry.postings {
            posting.weight *= entry.idf;
        }
    }

    // Lengths need the final weights, so this is a pass over the completed
    // index rather than a running sum during ingestion.
    let mut lengths: DocLengths = doc_order.into_iter().map(|doc| (doc, 0.0)).collect();
    for entry in index.terms.values() {
        for posting in &entry.postings {
            if let Some(len) = lengths.get_mut(&posting.doc) {
                *len += posting.weight * posting.weight;
            }
        }
    }
    for len in lengths.values_mut() {
        *len = len.sqrt();
    }

    tracing::debug!(
        num_docs = lengths.len(),
        num_terms = index.terms.len(),
        "index built"
    );
    (index, lengths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(d, t)| (d.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn empty_corpus_builds_empty_index() {
        let (index, lengths) = build_index(Vec::new());
        assert!(index.is_empty());
        assert!(lengths.is_empty());
    }

    #[test]
    fn idf_is_log2_of_rarity() {
        let (index, _) = build_index(corpus(&[("doc1", "cat sat"), ("doc2", "dog sat")]));
        // "cat" occurs in 1 of 2 documents.
        assert_eq!(index.terms["cat"].idf, 1.0);
        // "sat" occurs everywhere, so its idf and every weight are zero.
        let sat = &index.terms["sat"];
        assert_eq!(sat.idf, 0.0);
        assert!(sat.postings.iter().all(|p| p.weight == 0.0));
    }

    #[test]
    fn weights_are_tf_times_idf() {
        let (index, _) =
            build_index(corpus(&[("doc1", "cat cat cat sat"), ("doc2", "dog sat")]));
        let cat = &index.terms["cat"];
        // tf = 1 + log2(3), idf = log2(2/1) = 1.
        let expected = 1.0 + 3.0_f64.log2();
        assert!((cat.postings[0].weight - expected).abs() < 1e-12);
    }

    #[test]
    fn postings_keep_ingestion_order() {
        let (index, _) = build_index(corpus(&[
            ("b.txt", "shared"),
            ("a.txt", "shared"),
            ("c.txt", "shared"),
        ]));
        let docs: Vec<&str> = index.terms["share"]
            .postings
            .iter()
            .map(|p| p.doc.as_str())
            .collect();
        assert_eq!(docs, vec!["b.txt", "a.txt", "c.txt"]);
    }

    #[test]
    fn lengths_are_euclidean_norms_of_final_weights() {
        let (index, lengths) = build_index(corpus(&[("doc1", "cat dog"), ("doc2", "dog")]));
        let expected: f64 = index
            .terms
            .values()
            .flat_map(|e| &e.postings)
            .filter(|p| p.doc == "doc1")
            .map(|p| p.weight * p.weight)
            .sum::<f64>()
            .sqrt();
        assert!((lengths["doc1"] - expected).abs() < 1e-12);
    }

    #[test]
    fn termless_documents_still_count() {
        let (index, lengths) = build_index(corpus(&[("doc1", "cat"), ("empty", "the of and")]));
        // N = 2, so "cat" is rare rather than universal.
        assert_eq!(index.terms["cat"].idf, 1.0);
        assert_eq!(lengths["empty"], 0.0);
    }
}
