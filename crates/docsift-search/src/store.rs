use anyhow::Result;

use docsift_core::traits::ChunkStore;
use docsift_core::types::{RawHit, SearchFilters};
use docsift_text::TextChunkStore;
use docsift_vector::VectorChunkStore;

/// The production chunk store: tantivy for the keyword side, LanceDB for
/// the dense side, opened over the same ingested chunk set.
pub struct HybridChunkStore {
    text: TextChunkStore,
    vector: VectorChunkStore,
}

impl HybridChunkStore {
    pub fn new(text: TextChunkStore, vector: VectorChunkStore) -> Self {
        Self { text, vector }
    }
}

impl ChunkStore for HybridChunkStore {
    fn vector_search(
        &self,
        query_vec: &[f32],
        size: usize,
        filters: &SearchFilters,
    ) -> Result<Vec<RawHit>> {
        self.vector.search(query_vec, size, filters)
    }

    fn keyword_search(&self, query: &str, size: usize, filters: &SearchFilters) -> Result<Vec<RawHit>> {
        self.text.search(query, size, filters)
    }
}
