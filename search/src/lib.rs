use anyhow::{Context, Result};
use quarry_core::store::{load_index, load_lengths, load_meta, IndexPaths};
use quarry_core::{rank_with, DocLengths, Hit, InvertedIndex, RankOptions};
use std::io::Write;
use std::path::Path;

/// A loaded, immutable index plus the ranking options chosen at startup.
/// `search` is read-only, so one `Searcher` can serve any number of
/// callers.
pub struct Searcher {
    index: InvertedIndex,
    lengths: DocLengths,
    opts: RankOptions,
}

impl Searcher {
    /// Load the index files from a directory built by the indexer.
    /// Missing files are a startup error; the caller halts.
    pub fn open<P: AsRef<Path>>(index_dir: P, opts: RankOptions) -> Result<Self> {
        let paths = IndexPaths::new(&index_dir);
        let index = load_index(&paths)
            .with_context(|| format!("loading index from {}", paths.root.display()))?;
        let lengths = load_lengths(&paths)
            .with_context(|| format!("loading document lengths from {}", paths.root.display()))?;
        match load_meta(&paths) {
            Ok(meta) => tracing::info!(
                num_docs = meta.num_docs,
                num_terms = meta.num_terms,
                created_at = %meta.created_at,
                "index loaded"
            ),
            Err(err) => tracing::warn!(%err, "index metadata unavailable"),
        }
        Ok(Self {
            index,
            lengths,
            opts,
        })
    }

    pub fn search(&self, query: &str) -> Vec<Hit> {
        rank_with(query, &self.index, &self.lengths, self.opts)
    }
}

/// Print one query's results the way the interactive loop shows them.
pub fn print_results<W: Write>(out: &mut W, hits: &[Hit]) -> std::io::Result<()> {
    if hits.is_empty() {
        writeln!(out, "No matching documents.")
    } else {
        writeln!(out, "Documents found:")?;
        for hit in hits {
            writeln!(out, "- {} (Score: {:.4})", hit.doc, hit.score)?;
        }
        Ok(())
    }
}

/// True for the sentinel inputs that end the interactive loop.
pub fn is_exit(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}
