//!
//! BM25 sparse embeddings for lexical scoring in hybrid dense + sparse search.
//!
//! Text is tokenized, each token is hashed to a 32-bit dimension, and:
//! - documents become term-saturation weights (`tf / (k1 * (1 - b + b * dl / avgdl) + tf)`)
//! - queries become L1 normalized idf weights (`ln((N + 1) / (df + 0.5))`)
//!
//! so that `query.dot(&document)` reproduces a BM25 score while document
//! vectors are computed once, up front.
//!
//! ```rust
//! use lexsparse_bm25::BM25Encoder;
//!
//! let mut encoder = BM25Encoder::builder().build().unwrap();
//! encoder
//!     .fit(&["The quick brown fox", "The lazy dog is brown", "The fox is brown"])
//!     .unwrap();
//!
//! let doc = encoder.encode_document("The brown fox is quick").unwrap();
//! let query = encoder.encode_query("which fox is brown?").unwrap();
//! assert!(query.dot(&doc) > 0.0);
//! ```
//!
pub mod bm25;
pub mod config;
pub mod error;
pub mod params;
pub mod sparse_vector;
pub mod stats;
pub mod term_frequency;

// re-exports
pub use bm25::{BM25Builder, BM25Encoder, EncoderState};
pub use config::Bm25Config;
pub use error::{Bm25Error, Result};
pub use params::{BM25Params, DocFreq};
pub use sparse_vector::SparseVector;
pub use stats::CorpusStatistics;
pub use term_frequency::{TermFrequencies, hash_token, term_frequencies};
