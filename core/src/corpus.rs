use crate::DocId;
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

lazy_static! {
    static ref DOC_RE: Regex =
        Regex::new(r"^\s*([0-9]+)\s*:\s*([^|]+?)\s*\|\s*(.*)$").expect("valid regex");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocId,
    pub category: String,
    /// Raw text as it appears in the corpus; markup is only stripped when analyzed.
    pub text: String,
}

/// Parse one `id : category | text` line. Anything that does not fit the shape yields `None`.
pub fn parse_line(line: &str) -> Option<Document> {
    let caps = DOC_RE.captures(line)?;
    let id = match caps[1].parse::<DocId>() {
        Ok(id) => id,
        Err(err) => {
            tracing::debug!(%err, "skipping corpus line with out of range id");
            return None;
        }
    };
    Some(Document {
        id,
        category: caps[2].trim().to_string(),
        text: caps[3].trim().to_string(),
    })
}

/// UTF-8 decode that silently drops invalid byte sequences instead of substituting U+FFFD.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Read every well-formed record, sorted by parsed id. With `remap`, ids are
/// replaced by their rank so the collection spans exactly `0..len`.
pub fn parse_corpus<R: BufRead>(reader: R, remap: bool) -> Result<Vec<Document>> {
    let mut docs = Vec::new();
    let mut skipped = 0usize;
    for line in reader.split(b'\n') {
        let bytes = line?;
        let line = decode_dropping_invalid(&bytes);
        match parse_line(line.trim_end_matches(['\r', '\n'])) {
            Some(doc) => docs.push(doc),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "ignored malformed corpus lines");
    }

    docs.sort_by_key(|d| d.id);
    if remap {
        for (rank, doc) in docs.iter_mut().enumerate() {
            doc.id = rank as DocId;
        }
    }
    Ok(docs)
}

pub fn load_corpus<P: AsRef<Path>>(path: P, remap: bool) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening corpus {}", path.display()))?;
    parse_corpus(BufReader::new(f), remap)
}
