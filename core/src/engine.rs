use crate::corpus::{load_corpus, Document};
use crate::error::QueryResult;
use crate::index::{DocId, InvertedIndex};
use crate::query::{evaluate, lex_query, to_postfix};
use anyhow::Result;
use std::path::Path;

/// Loaded documents plus their index. Built once, then only read, so a single
/// instance can be shared by any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    docs: Vec<Document>,
    index: InvertedIndex,
}

impl SearchEngine {
    /// Documents should be sorted by id; `load_corpus` already returns them that way.
    pub fn from_documents(mut docs: Vec<Document>) -> Self {
        docs.sort_by_key(|d| d.id);
        let index = InvertedIndex::build(&docs);
        tracing::info!(num_docs = docs.len(), num_terms = index.num_terms(), "index built");
        Self { docs, index }
    }

    pub fn from_corpus_file<P: AsRef<Path>>(path: P, remap: bool) -> Result<Self> {
        let docs = load_corpus(path, remap)?;
        Ok(Self::from_documents(docs))
    }

    pub fn search(&self, raw_query: &str) -> QueryResult<Vec<DocId>> {
        let result = to_postfix(lex_query(raw_query))
            .and_then(|postfix| evaluate(&postfix, &self.index, self.num_docs()));
        if let Err(err) = &result {
            tracing::debug!(%err, raw_query, "rejected query");
        }
        result
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.docs
            .binary_search_by_key(&id, |d| d.id)
            .ok()
            .map(|pos| &self.docs[pos])
    }

    /// Size of the universe `NOT` complements against.
    pub fn num_docs(&self) -> u32 { self.docs.len() as u32 }
}
