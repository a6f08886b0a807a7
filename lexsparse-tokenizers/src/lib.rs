//! # lexsparse-tokenizers
//!
//! Word tokenizers that produce the normalized token stream consumed by the
//! lexical sparse encoders.
//!
//! ## Purpose
//!
//! Everything downstream (term hashing, corpus statistics, BM25 weighting) only
//! needs one capability: "give me the ordered tokens of this text". That
//! capability is the [`Tokenize`] trait. This crate ships a configurable
//! implementation of it, [`Tokenizer`], with:
//! - Unicode word-boundary splitting
//! - optional case folding
//! - optional punctuation removal
//! - optional stopword removal (English list bundled)
//! - optional Snowball stemming
//!
//! ## Example
//!
//! ```rust
//! use lexsparse_tokenizers::{Tokenize, Tokenizer, TokenizerConfig};
//!
//! let tokenizer = Tokenizer::new(TokenizerConfig::default()).unwrap();
//! let tokens = tokenizer.tokenize("The lazy dog is brown").unwrap();
//! assert_eq!(tokens, vec!["lazi", "dog", "brown"]);
//! ```
//!
pub mod config;
pub mod error;
pub mod tokenizer;
pub mod utils;

// re-export things
pub use config::*;
pub use error::*;
pub use tokenizer::*;
