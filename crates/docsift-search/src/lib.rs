//! docsift-search
//!
//! Hybrid retrieval engine over a chunk store and an embedding provider:
//! semantic, keyword and both-mode search with per-sequence score
//! normalization and opt-in per-document deduplication.

pub mod engine;
pub mod rank;
pub mod store;

pub use engine::{RetrievedHits, SearchService};
pub use store::HybridChunkStore;
