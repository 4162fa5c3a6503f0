use crate::{DocId, InvertedIndex};
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Term -> postings view with keys in sorted order, so exports are reproducible.
fn sorted_view(index: &InvertedIndex) -> BTreeMap<&str, &[DocId]> {
    index.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice())).collect()
}

/// Serialize the index as a JSON object. Non-ASCII terms are written as UTF-8, not escaped.
pub fn write_json<W: Write>(index: &InvertedIndex, writer: W, pretty: bool) -> Result<()> {
    let view = sorted_view(index);
    if pretty {
        serde_json::to_writer_pretty(writer, &view)?;
    } else {
        serde_json::to_writer(writer, &view)?;
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(f))
}

pub fn save_json(index: &InvertedIndex, path: &Path, pretty: bool) -> Result<()> {
    let mut w = create(path)?;
    write_json(index, &mut w, pretty)?;
    w.flush()?;
    Ok(())
}

/// `indice.json` -> `indice.json.gz`
pub fn gz_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".gz");
    PathBuf::from(name)
}

/// Write the same JSON gzip-compressed next to `path`; returns the `.gz` path.
pub fn save_json_gz(index: &InvertedIndex, path: &Path, pretty: bool) -> Result<PathBuf> {
    let out = gz_path(path);
    let mut enc = GzEncoder::new(create(&out)?, Compression::default());
    write_json(index, &mut enc, pretty)?;
    enc.finish()?.flush()?;
    Ok(out)
}
