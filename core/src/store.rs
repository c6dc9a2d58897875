use crate::index::{DocLengths, InvertedIndex, Posting, TermEntry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Build-time facts about a persisted index, written alongside it.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub created_at: String,
    pub version: u32,
}

/// The files that make up one on-disk index.
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    fn index(&self) -> PathBuf {
        self.root.join("index.txt")
    }
    fn lengths(&self) -> PathBuf {
        self.root.join("doc_lengths.txt")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

/// One term per line: `term;idf;doc1-weight1;doc2-weight2;...`. Floats use
/// the shortest representation that round-trips, so a reloaded index ranks
/// bit-for-bit like the original. Terms are written sorted to keep builds
/// reproducible.
pub fn write_index<W: Write>(w: &mut W, index: &InvertedIndex) -> Result<()> {
    let mut terms: Vec<(&String, &TermEntry)> = index.terms.iter().collect();
    terms.sort_by(|a, b| a.0.cmp(b.0));
    for (term, entry) in terms {
        write!(w, "{term};{}", entry.idf)?;
        for posting in &entry.postings {
            write!(w, ";{}-{}", posting.doc, posting.weight)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Parse an index from its line format. Malformed lines and doc-weight
/// pairs are dropped with a warning; they never abort the load.
pub fn read_index<R: BufRead>(r: R) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new();
    for (line_no, line) in r.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split(';');
        let (term, idf) = match (fields.next(), fields.next()) {
            (Some(term), Some(idf)) if !term.is_empty() => (term, idf),
            _ => {
                tracing::warn!(line = line_no + 1, "skipping malformed index line");
                continue;
            }
        };
        let idf: f64 = match idf.parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(line = line_no + 1, term, "skipping line with unparsable idf");
                continue;
            }
        };
        let mut postings = Vec::new();
        for pair in fields.filter(|p| !p.is_empty()) {
            match pair.rsplit_once('-').map(|(doc, w)| (doc, w.parse::<f64>())) {
                Some((doc, Ok(weight))) if !doc.is_empty() => {
                    postings.push(Posting {
                        doc: doc.to_string(),
                        weight,
                    });
                }
                _ => {
                    tracing::warn!(line = line_no + 1, term, pair, "skipping malformed posting");
                }
            }
        }
        if postings.is_empty() {
            tracing::warn!(line = line_no + 1, term, "skipping term with no postings");
            continue;
        }
        index.terms.insert(term.to_string(), TermEntry { idf, postings });
    }
    Ok(index)
}

/// One document per line: `docId=length`.
pub fn write_lengths<W: Write>(w: &mut W, lengths: &DocLengths) -> Result<()> {
    let mut docs: Vec<(&String, &f64)> = lengths.iter().collect();
    docs.sort_by(|a, b| a.0.cmp(b.0));
    for (doc, length) in docs {
        writeln!(w, "{doc}={length}")?;
    }
    Ok(())
}

pub fn read_lengths<R: BufRead>(r: R) -> Result<DocLengths> {
    let mut lengths = DocLengths::new();
    for (line_no, line) in r.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.rsplit_once('=').map(|(doc, l)| (doc, l.parse::<f64>())) {
            Some((doc, Ok(length))) if !doc.is_empty() => {
                lengths.insert(doc.to_string(), length);
            }
            _ => {
                tracing::warn!(line = line_no + 1, "skipping malformed length line");
            }
        }
    }
    Ok(lengths)
}

pub fn save_index(paths: &IndexPaths, index: &InvertedIndex) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = BufWriter::new(File::create(paths.index())?);
    write_index(&mut f, index)?;
    f.flush()?;
    Ok(())
}

pub fn load_index(paths: &IndexPaths) -> Result<InvertedIndex> {
    let f = File::open(paths.index())
        .with_context(|| format!("opening index file {}", paths.index().display()))?;
    read_index(BufReader::new(f))
}

pub fn save_lengths(paths: &IndexPaths, lengths: &DocLengths) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = BufWriter::new(File::create(paths.lengths())?);
    write_lengths(&mut f, lengths)?;
    f.flush()?;
    Ok(())
}

pub fn load_lengths(paths: &IndexPaths) -> Result<DocLengths> {
    let f = File::open(paths.lengths())
        .with_context(|| format!("opening length file {}", paths.lengths().display()))?;
    read_lengths(BufReader::new(f))
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let f = File::open(paths.meta())
        .with_context(|| format!("opening meta file {}", paths.meta().display()))?;
    let meta = serde_json::from_reader(BufReader::new(f))?;
    Ok(meta)
}
