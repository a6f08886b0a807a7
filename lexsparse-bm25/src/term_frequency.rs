use std::io::Cursor;

use fxhash::FxHashMap as HashMap;
use murmur3::murmur3_32;

use lexsparse_tokenizers::Tokenize;

use crate::error::Result;

/// Seed for the term hash. Zero keeps dimension ids compatible with
/// parameter files produced by other MurmurHash3-based BM25 encoders.
pub const TERM_HASH_SEED: u32 = 0;

///
/// Map a token onto a 32-bit dimension id (MurmurHash3, x86 32-bit variant).
///
/// Distinct tokens may collide; that is the usual feature-hashing trade-off
/// and is not corrected anywhere.
///
pub fn hash_token(token: &str) -> Result<u32> {
    Ok(murmur3_32(&mut Cursor::new(token.as_bytes()), TERM_HASH_SEED)?)
}

/// Hashed term ids of one text with their raw occurrence counts.
///
/// `indices` is in first-occurrence order and holds no duplicates;
/// `counts[i]` is the number of times `indices[i]` occurred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TermFrequencies {
    pub indices: Vec<u32>,
    pub counts: Vec<u32>,
}

impl TermFrequencies {
    /// Total number of tokens in the text.
    pub fn doc_len(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }
}

///
/// Tokenize `text` and count occurrences per hashed term.
///
/// # Arguments:
/// - `tokenizer`: the tokenizer producing the token stream
/// - `text`: input text
///
/// # Returns:
/// - `TermFrequencies`: empty when the text yields no tokens
///
pub fn term_frequencies(tokenizer: &dyn Tokenize, text: &str) -> Result<TermFrequencies> {
    let tokens = tokenizer.tokenize(text)?;

    let mut positions: HashMap<u32, usize> = HashMap::default();
    let mut tf = TermFrequencies::default();

    for token in tokens.iter() {
        let id = hash_token(token)?;
        match positions.get(&id) {
            Some(&pos) => tf.counts[pos] += 1,
            None => {
                positions.insert(id, tf.indices.len());
                tf.indices.push(id);
                tf.counts.push(1);
            }
        }
    }

    Ok(tf)
}
