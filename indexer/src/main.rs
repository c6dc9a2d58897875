use anyhow::Result;
use clap::Parser;
use quarry_core::build_index;
use quarry_core::store::{save_index, save_lengths, save_meta, IndexPaths, MetaFile};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "quarry-indexer")]
#[command(about = "Build a TF-IDF inverted index from a corpus directory", long_about = None)]
struct Cli {
    /// Corpus directory: one plain-text file per document
    #[arg(long, default_value = "corpus")]
    corpus: String,
    /// Output index directory
    #[arg(long, default_value = "./index")]
    output: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    build(Path::new(&cli.corpus), Path::new(&cli.output))
}

fn build(corpus: &Path, output: &Path) -> Result<()> {
    let docs = read_corpus(corpus);
    let num_docs = docs.len() as u32;

    let (index, lengths) = build_index(docs);
    let num_terms = index.terms.len() as u32;

    let paths = IndexPaths::new(output);
    save_index(&paths, &index)?;
    save_lengths(&paths, &lengths)?;
    let meta = MetaFile {
        num_docs,
        num_terms,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        version: 1,
    };
    save_meta(&paths, &meta)?;

    tracing::info!(num_docs, num_terms, output = %output.display(), "index build complete");
    Ok(())
}

/// Collect (document id, text) pairs from the corpus directory. The id is
/// the path relative to the corpus root. Unreadable files are skipped with
/// a warning and not counted; a missing directory yields an empty corpus.
fn read_corpus(corpus: &Path) -> Vec<(String, String)> {
    if !corpus.is_dir() {
        tracing::warn!(corpus = %corpus.display(), "corpus directory not found, building empty index");
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(corpus)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();
    // Deterministic ingestion order makes builds (and tie-breaks) reproducible.
    files.sort();

    let mut docs = Vec::with_capacity(files.len());
    for path in files {
        let id = path
            .strip_prefix(corpus)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();
        match fs::read_to_string(&path) {
            Ok(text) => docs.push((id, text)),
            Err(err) => {
                tracing::warn!(doc = %path.display(), %err, "skipping unreadable document");
            }
        }
    }
    if docs.is_empty() {
        tracing::warn!(corpus = %corpus.display(), "no readable documents in corpus");
    }
    docs
}
