use std::sync::Arc;
use tracing::debug;

use docsift_core::traits::EmbeddingProvider;
use docsift_core::types::Summary;
use docsift_core::{Error, Result};

use crate::score::{centroid, cosine_similarity};
use crate::split::{PunctuationSplitter, Sentence, SentenceSplitter};

/// Input cap carried over from the production deployment: documents are
/// truncated to this many chars before splitting to bound latency.
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Query-biased extractive summarizer. Selects a subset of the source
/// document's own sentences; never generates text.
pub struct ExtractiveSummarizer {
    embedder: Arc<dyn EmbeddingProvider>,
    splitter: Box<dyn SentenceSplitter>,
    max_chars: usize,
}

impl ExtractiveSummarizer {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder, splitter: Box::new(PunctuationSplitter::new()), max_chars: DEFAULT_MAX_CHARS }
    }

    pub fn with_splitter(mut self, splitter: Box<dyn SentenceSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Summarize `full_text` into at most `sentence_count` sentences,
    /// returned in original document order.
    ///
    /// With a non-empty `query` each sentence is scored by cosine
    /// similarity to the query embedding; otherwise by similarity to the
    /// centroid of all sentence embeddings. Embedding is all-or-nothing:
    /// scoring never starts on a partially embedded document.
    pub fn summarize(
        &self,
        doc_id: &str,
        full_text: &str,
        query: Option<&str>,
        sentence_count: usize,
    ) -> Result<Summary> {
        if sentence_count == 0 {
            return Err(Error::InvalidRequest("sentence_count must be positive".into()));
        }
        let text = truncate_at_char_boundary(full_text, self.max_chars);
        let sentences = self.splitter.split(text);
        if sentences.is_empty() {
            return Err(Error::EmptyDocument);
        }
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        debug!(doc_id, candidates = sentences.len(), query_biased = query.is_some(), "summarizing");

        if sentences.len() <= sentence_count {
            return Ok(summary_of(doc_id, query, sentences));
        }

        let texts: Vec<String> = sentences.iter().map(|s| s.text.clone()).collect();
        let embeddings = self
            .embedder
            .embed_many(&texts)
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;

        let reference = match query {
            Some(q) => self
                .embedder
                .embed(q)
                .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?,
            None => centroid(&embeddings),
        };

        let mut scored: Vec<(usize, f32)> = embeddings
            .iter()
            .enumerate()
            .map(|(i, emb)| (i, cosine_similarity(emb, &reference)))
            .collect();
        // Highest score first; equal scores fall back to earliest position
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let mut selected: Vec<usize> = scored.iter().take(sentence_count).map(|(i, _)| *i).collect();
        selected.sort_unstable();

        let picked = selected.into_iter().map(|i| sentences[i].clone()).collect();
        Ok(summary_of(doc_id, query, picked))
    }
}

fn summary_of(doc_id: &str, query: Option<&str>, sentences: Vec<Sentence>) -> Summary {
    Summary {
        doc_id: doc_id.to_string(),
        query_used: query.map(str::to_string),
        sentences: sentences.into_iter().map(|s| s.text).collect(),
    }
}

/// Cut `text` to at most `max_chars` characters, then back up to the
/// last sentence boundary inside the cap so no partial sentence survives
/// into the candidate set. Shorter inputs pass through untouched.
fn truncate_at_char_boundary(text: &str, max_chars: usize) -> &str {
    let capped = match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => return text,
    };
    match capped.rfind(['.', '!', '?']) {
        Some(i) => &capped[..=i],
        None => capped,
    }
}
