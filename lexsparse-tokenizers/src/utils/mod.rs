//!
//! This module contains utility data for tokenizers. Static word lists
//! used while filtering tokens live here.
//!
pub mod stopwords;

pub use stopwords::{is_punctuation, stopwords_for};
