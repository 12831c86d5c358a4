//! Domain types shared by the retrieval engine, stores and summarizer.

use serde::{Deserialize, Serialize};

pub type DocId = String;

/// A bounded span of a document's text, indexed and embedded upstream.
///
/// - `doc_id`: stable document identity
/// - `chunk_id`: ordinal of this chunk within its document
/// - `text`: the chunk payload
/// - `full_text`: the whole parent document (indexed for keyword ranking,
///   never returned in hits)
/// - `source`/`section`: category facets used for filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub doc_id: DocId,
    pub chunk_id: usize,
    pub text: String,
    #[serde(default)]
    pub full_text: String,
    pub title: String,
    pub source: String,
    pub section: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Which retrieval signal produced a hit. Raw score scales differ by
/// origin: cosine similarity for `Semantic`, unbounded BM25 for `Keyword`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Semantic,
    Keyword,
}

/// One raw chunk hit as returned by a store, in store rank order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHit {
    pub doc_id: DocId,
    pub chunk_id: usize,
    pub raw_score: f32,
    pub origin: Origin,
    pub text: String,
    pub title: String,
    pub source: String,
    pub section: String,
    pub date: Option<String>,
    pub page: Option<u32>,
}

/// A hit rescaled onto the common 0-100 display range.
///
/// `normalized_score` is relative to the result set it was computed in,
/// never a global constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub doc_id: DocId,
    pub chunk_id: usize,
    pub normalized_score: f32,
    pub raw_score: f32,
    pub origin: Origin,
    pub text: String,
    pub title: String,
    pub source: String,
    pub section: String,
    pub date: Option<String>,
    pub page: Option<u32>,
}

impl ScoredResult {
    pub fn from_hit(hit: RawHit, normalized_score: f32) -> Self {
        Self {
            doc_id: hit.doc_id,
            chunk_id: hit.chunk_id,
            normalized_score,
            raw_score: hit.raw_score,
            origin: hit.origin,
            text: hit.text,
            title: hit.title,
            source: hit.source,
            section: hit.section,
            date: hit.date,
            page: hit.page,
        }
    }
}

/// One ranked sequence plus how many results existed before size-limiting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub results: Vec<ScoredResult>,
    pub total: usize,
}

/// Response shape for the unified search entry point.
///
/// `Pair` carries the two independently normalized sequences of a
/// both-mode request; they are never merged into one ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum SearchResponse {
    Single(ResultSet),
    Pair { semantic: ResultSet, keyword: ResultSet },
}

/// Retrieval mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Semantic,
    Keyword,
    Both,
}

/// Optional category restrictions; a `None` field means "all values."
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    pub source: Option<String>,
    pub section: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.section.is_none()
    }
}

pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub doc_id: DocId,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default = "default_sentence_count")]
    pub sentence_count: usize,
}

fn default_sentence_count() -> usize {
    DEFAULT_SUMMARY_SENTENCES
}

/// An extractive summary: an original-order subset of the source
/// document's own sentences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub doc_id: DocId,
    pub query_used: Option<String>,
    pub sentences: Vec<String>,
}
