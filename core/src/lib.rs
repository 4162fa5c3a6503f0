pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod persist;
pub mod postings;
pub mod query;
pub mod tokenizer;

pub use corpus::Document;
pub use engine::SearchEngine;
pub use error::QueryError;
pub use index::{build_index, DocId, InvertedIndex};
