//! docsift-vector
//!
//! LanceDB-backed dense side of the chunk store. `writer` ingests chunks
//! with precomputed embeddings; `search` runs cosine nearest-neighbor
//! queries with category filter pushdown.

pub mod schema;
pub mod search;
pub mod writer;

pub use search::VectorChunkStore;
pub use writer::VectorIndexWriter;
