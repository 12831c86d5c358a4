use std::sync::Arc;
use tracing::debug;

use docsift_core::traits::{ChunkStore, EmbeddingProvider};
use docsift_core::types::{
    RawHit, ResultSet, SearchFilters, SearchMode, SearchResponse, ScoredResult,
};
use docsift_core::{Error, Result};

use crate::rank::{deduplicate, normalize};

/// Raw retrieval output: both-mode requests carry two sequences that are
/// never merged into one ranking.
#[derive(Debug)]
pub enum RetrievedHits {
    Single(Vec<RawHit>),
    Pair { semantic: Vec<RawHit>, keyword: Vec<RawHit> },
}

/// Hybrid retrieval over one chunk store and one embedding provider.
/// Stateless between requests; safe to share across concurrent callers.
pub struct SearchService<S: ChunkStore> {
    store: S,
    embedder: Arc<dyn EmbeddingProvider>,
}

/// Over-fetch factor applied in single-mode requests when deduplication
/// is on, so collapsing chunks still fills the requested page.
const DEDUP_FETCH_FACTOR: usize = 3;

impl<S: ChunkStore> SearchService<S> {
    pub fn new(store: S, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embedder }
    }

    /// Issue the store queries for `mode` and return raw hits in store
    /// rank order. Rejects blank queries and a zero size before any
    /// collaborator call.
    pub fn retrieve(
        &self,
        query: &str,
        mode: SearchMode,
        filters: &SearchFilters,
        size: usize,
    ) -> Result<RetrievedHits> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidQuery);
        }
        if size == 0 {
            return Err(Error::InvalidRequest("size must be positive".into()));
        }
        match mode {
            SearchMode::Semantic => Ok(RetrievedHits::Single(self.semantic(query, filters, size)?)),
            SearchMode::Keyword => Ok(RetrievedHits::Single(self.keyword(query, filters, size)?)),
            SearchMode::Both => {
                // Two independent retrievals; if either fails the whole
                // request fails rather than degrading to one sequence.
                let semantic = self.semantic(query, filters, size)?;
                let keyword = self.keyword(query, filters, size)?;
                Ok(RetrievedHits::Pair { semantic, keyword })
            }
        }
    }

    /// Unified entry point: retrieve, normalize per sequence, optionally
    /// deduplicate by document, then truncate to `size`. `total` on each
    /// sequence counts results before truncation.
    pub fn search(
        &self,
        query: &str,
        mode: SearchMode,
        filters: &SearchFilters,
        size: usize,
        dedup: bool,
    ) -> Result<SearchResponse> {
        let fetch_size = match mode {
            SearchMode::Both => size,
            _ if dedup => size * DEDUP_FETCH_FACTOR,
            _ => size,
        };
        let retrieved = self.retrieve(query, mode, filters, fetch_size)?;
        let response = match retrieved {
            RetrievedHits::Single(hits) => {
                debug!(hits = hits.len(), ?mode, "retrieved single sequence");
                SearchResponse::Single(build_result_set(hits, size, dedup))
            }
            RetrievedHits::Pair { semantic, keyword } => {
                debug!(
                    semantic = semantic.len(),
                    keyword = keyword.len(),
                    "retrieved both sequences"
                );
                SearchResponse::Pair {
                    semantic: build_result_set(semantic, size, dedup),
                    keyword: build_result_set(keyword, size, dedup),
                }
            }
        };
        Ok(response)
    }

    fn semantic(&self, query: &str, filters: &SearchFilters, size: usize) -> Result<Vec<RawHit>> {
        let query_vec = self
            .embedder
            .embed(query)
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;
        self.store
            .vector_search(&query_vec, size, filters)
            .map_err(|e| Error::RetrievalUnavailable(e.to_string()))
    }

    fn keyword(&self, query: &str, filters: &SearchFilters, size: usize) -> Result<Vec<RawHit>> {
        self.store
            .keyword_search(query, size, filters)
            .map_err(|e| Error::RetrievalUnavailable(e.to_string()))
    }
}

fn build_result_set(hits: Vec<RawHit>, size: usize, dedup: bool) -> ResultSet {
    let scored: Vec<ScoredResult> = normalize(hits);
    let results = if dedup { deduplicate(scored) } else { scored };
    let total = results.len();
    let results = results.into_iter().take(size).collect();
    ResultSet { results, total }
}
