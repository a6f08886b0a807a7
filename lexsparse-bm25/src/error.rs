use thiserror::Error;

use lexsparse_tokenizers::{TokenizerConfigError, TokenizerError};

#[derive(Error, Debug)]
pub enum Bm25Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("The encoder has not been fitted. Call `fit` or load parameters first")]
    NotFitted,
    #[error("No document in the corpus produced any token; cannot compute the average document length")]
    NoFittableDocuments,
    #[error("Query term weights sum to {0}; cannot normalize the query vector")]
    DegenerateQuery(f64),
    #[error("Invalid BM25 configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    TokenizerConfig(#[from] TokenizerConfigError),
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Bm25Error>;
