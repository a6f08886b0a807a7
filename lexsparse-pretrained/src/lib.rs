//! Pretrained BM25 parameters for `lexsparse-bm25`.
//!
//! Fetches a published parameter file (MS MARCO by default), optionally
//! caches it on disk, and returns a ready to use [`BM25Encoder`](lexsparse_bm25::BM25Encoder).
//!
//! ```rust,no_run
//! use lexsparse_pretrained::load_default;
//!
//! let encoder = load_default(Some("~/.cache/lexsparse/msmarco_bm25.json".as_ref())).unwrap();
//! let query = encoder.encode_query("what is a sparse vector").unwrap();
//! ```
pub mod consts;
pub mod error;
pub mod loader;
pub mod utils;

pub use error::{PretrainedError, Result};
pub use loader::{PretrainedLoader, PretrainedLoaderBuilder, load_default};
