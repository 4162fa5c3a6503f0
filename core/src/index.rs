use crate::corpus::Document;
use crate::tokenizer::analyze;
use std::collections::{HashMap, HashSet};

pub type DocId = u32;

/// Presence-only inverted index: term -> ascending, duplicate-free doc ids.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    pub postings: HashMap<String, Vec<DocId>>,
}

impl InvertedIndex {
    pub fn build(docs: &[Document]) -> Self {
        let mut postings: HashMap<String, Vec<DocId>> = HashMap::new();
        for doc in docs {
            let terms: HashSet<String> = analyze(&doc.text).into_iter().collect();
            for term in terms {
                postings.entry(term).or_default().push(doc.id);
            }
        }
        // Linear merges need sorted lists whatever order the documents came in.
        for plist in postings.values_mut() {
            plist.sort_unstable();
            plist.dedup();
        }
        Self { postings }
    }

    /// Posting list for `term`, empty when the term never occurs.
    pub fn postings(&self, term: &str) -> &[DocId] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vocabulary size.
    pub fn num_terms(&self) -> usize { self.postings.len() }
}

pub fn build_index(docs: &[Document]) -> InvertedIndex {
    InvertedIndex::build(docs)
}
