//! docsift-text
//!
//! Tantivy-based keyword side of the chunk store. See `index` for the
//! writer and `search` for the BM25 query path with field weighting and
//! category filters.

pub mod index;
pub mod search;
pub mod tantivy_utils;

pub use index::TextIndexWriter;
pub use search::TextChunkStore;
