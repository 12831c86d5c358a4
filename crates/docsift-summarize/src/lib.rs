//! docsift-summarize
//!
//! Extractive, optionally query-biased summarization over sentence
//! embeddings. The summary is always an original-order subset of the
//! source document's own sentences.

pub mod score;
pub mod split;
pub mod summarizer;

pub use split::{PunctuationSplitter, Sentence, SentenceSplitter};
pub use summarizer::ExtractiveSummarizer;
