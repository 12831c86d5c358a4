use crate::types::{RawHit, SearchFilters};

/// Text to fixed-dimension dense vector. Deterministic for a given model
/// version. Implementations must fail on empty/whitespace input rather
/// than silently returning a zero vector.
pub trait EmbeddingProvider: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
    /// Batch form; output order matches input order. All-or-nothing: a
    /// failure on any input fails the whole batch.
    fn embed_many(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Read-only handle over indexed chunks. Both searches return hits in
/// store rank order (descending score); callers do not re-sort.
pub trait ChunkStore: Send + Sync {
    /// Nearest-neighbor search by cosine similarity over chunk embeddings.
    fn vector_search(
        &self,
        query_vec: &[f32],
        size: usize,
        filters: &SearchFilters,
    ) -> anyhow::Result<Vec<RawHit>>;

    /// BM25-style lexical ranking across title, chunk text and document
    /// full text, with title weighted highest, then chunk text.
    fn keyword_search(
        &self,
        query: &str,
        size: usize,
        filters: &SearchFilters,
    ) -> anyhow::Result<Vec<RawHit>>;
}

impl<T: ChunkStore + ?Sized> ChunkStore for std::sync::Arc<T> {
    fn vector_search(
        &self,
        query_vec: &[f32],
        size: usize,
        filters: &SearchFilters,
    ) -> anyhow::Result<Vec<RawHit>> {
        self.as_ref().vector_search(query_vec, size, filters)
    }

    fn keyword_search(
        &self,
        query: &str,
        size: usize,
        filters: &SearchFilters,
    ) -> anyhow::Result<Vec<RawHit>> {
        self.as_ref().keyword_search(query, size, filters)
    }
}
