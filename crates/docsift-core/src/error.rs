use thiserror::Error;

/// Request-scoped error kinds. None of these are fatal to the process;
/// each is scoped to the request that triggered it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid query: empty after trimming whitespace")]
    InvalidQuery,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Embedding provider unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Chunk store unavailable: {0}")]
    RetrievalUnavailable(String),

    #[error("Document has no sentences to summarize")]
    EmptyDocument,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
