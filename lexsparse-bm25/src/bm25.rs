use log::debug;
use rayon::prelude::*;

use lexsparse_tokenizers::{Tokenize, Tokenizer, TokenizerConfig, TokenizerError};

use crate::config::Bm25Config;
use crate::error::{Bm25Error, Result};
use crate::sparse_vector::SparseVector;
use crate::stats::{CorpusStatistics, fit_corpus};
use crate::term_frequency::term_frequencies;

/// Document frequency assumed for query terms never seen while fitting.
pub const UNSEEN_TERM_DOC_FREQ: u32 = 1;

/// Largest `f32` below one.
const MAX_SATURATED_WEIGHT: f32 = 1.0 - f32::EPSILON / 2.0;

///
/// Whether the encoder holds corpus statistics. Every encode and export
/// operation needs `Fitted`.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EncoderState {
    #[default]
    Unfit,
    Fitted(CorpusStatistics),
}

///
/// BM25 sparse encoder.
///
/// Document vectors carry only the term-saturation part of BM25; query vectors
/// carry the (L1 normalized) inverse document frequency. The dot product of a
/// query vector with a document vector is therefore a BM25 score, and document
/// vectors can be computed once and stored.
///
pub struct BM25Encoder {
    pub(crate) config: Bm25Config,
    pub(crate) tokenizer: Box<dyn Tokenize>,
    pub(crate) state: EncoderState,
}

pub struct BM25Builder {
    config: Bm25Config,
}

impl BM25Builder {
    pub fn build(self) -> Result<BM25Encoder> {
        BM25Encoder::new(self.config)
    }

    pub fn with_k1(mut self, k1: f64) -> Self {
        self.config.k1 = k1;
        self
    }

    pub fn with_b(mut self, b: f64) -> Self {
        self.config.b = b;
        self
    }

    pub fn with_tokenizer_config(mut self, tokenizer: TokenizerConfig) -> Self {
        self.config.tokenizer = tokenizer;
        self
    }

    pub fn with_config(mut self, config: Bm25Config) -> Self {
        self.config = config;
        self
    }
}

impl Default for BM25Builder {
    fn default() -> Self {
        Self {
            config: Bm25Config::default(),
        }
    }
}

/// Build the word tokenizer described by `config`, reporting an invalid
/// config as a configuration error rather than a tokenizing failure.
pub(crate) fn build_tokenizer(config: &TokenizerConfig) -> Result<Box<dyn Tokenize>> {
    match Tokenizer::new(config.clone()) {
        Ok(tokenizer) => Ok(Box::new(tokenizer)),
        Err(TokenizerError::Config(e)) => Err(Bm25Error::TokenizerConfig(e)),
        Err(e) => Err(e.into()),
    }
}

///
/// BM25 term-saturation weight of a term occurring `tf` times in a document
/// of `doc_len` tokens.
///
pub fn document_term_weight(tf: f64, doc_len: f64, avgdl: f64, b: f64, k1: f64) -> f64 {
    tf / (k1 * (1.0 - b + b * (doc_len / avgdl)) + tf)
}

/// Smoothed inverse document frequency, `ln((n_docs + 1) / (df + 0.5))`.
pub fn inverse_document_frequency(df: u32, n_docs: u32) -> f64 {
    ((n_docs as f64 + 1.0) / (df as f64 + 0.5)).ln()
}

///
/// Scale weights so they sum to one.
///
/// # Errors
/// [`Bm25Error::DegenerateQuery`] when the sum is zero or not finite.
///
pub fn l1_normalize(weights: &[f64]) -> Result<Vec<f32>> {
    let total: f64 = weights.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return Err(Bm25Error::DegenerateQuery(total));
    }
    Ok(weights.iter().map(|w| (w / total) as f32).collect())
}

impl BM25Encoder {
    pub fn builder() -> BM25Builder {
        BM25Builder::default()
    }

    ///
    /// Create an unfitted encoder with the default word tokenizer.
    ///
    /// # Errors
    /// Configuration errors: `b`/`k1` out of range, stemming without case
    /// folding, unknown language.
    ///
    pub fn new(config: Bm25Config) -> Result<Self> {
        config.validate()?;
        let tokenizer = build_tokenizer(&config.tokenizer)?;
        Ok(BM25Encoder {
            config,
            tokenizer,
            state: EncoderState::Unfit,
        })
    }

    ///
    /// Create an unfitted encoder around a custom tokenizer. The tokenizer
    /// fields of `config` are still validated and persisted, so they should
    /// describe what `tokenizer` does.
    ///
    pub fn with_tokenizer(config: Bm25Config, tokenizer: Box<dyn Tokenize>) -> Result<Self> {
        config.validate()?;
        Ok(BM25Encoder {
            config,
            tokenizer,
            state: EncoderState::Unfit,
        })
    }

    pub fn config(&self) -> &Bm25Config {
        &self.config
    }

    pub fn state(&self) -> &EncoderState {
        &self.state
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, EncoderState::Fitted(_))
    }

    pub fn stats(&self) -> Result<&CorpusStatistics> {
        match &self.state {
            EncoderState::Fitted(stats) => Ok(stats),
            EncoderState::Unfit => Err(Bm25Error::NotFitted),
        }
    }

    ///
    /// Fit corpus statistics. On error the previous state is kept.
    ///
    pub fn fit<S>(&mut self, corpus: &[S]) -> Result<()>
    where
        S: AsRef<str> + Sync,
    {
        let stats = fit_corpus(self.tokenizer.as_ref(), corpus)?;
        debug!(
            "BM25 encoder fitted on {} documents (avgdl={})",
            stats.n_docs(),
            stats.avgdl()
        );
        self.state = EncoderState::Fitted(stats);
        Ok(())
    }

    ///
    /// Encode a document into term-saturation weights. Every value lies in
    /// `[0, 1)` when `k1 > 0`.
    ///
    pub fn encode_document(&self, text: &str) -> Result<SparseVector> {
        let stats = self.stats()?;
        let tf = term_frequencies(self.tokenizer.as_ref(), text)?;
        if tf.is_empty() {
            return Ok(SparseVector::empty());
        }

        let doc_len = tf.doc_len() as f64;
        let k1 = self.config.k1;
        let values = tf
            .counts
            .iter()
            .map(|&count| {
                let weight =
                    document_term_weight(count as f64, doc_len, stats.avgdl(), self.config.b, k1)
                        as f32;
                // rounding to f32 must not reach full saturation while k1 > 0
                if k1 > 0.0 {
                    weight.min(MAX_SATURATED_WEIGHT)
                } else {
                    weight
                }
            })
            .collect();

        SparseVector::new(tf.indices, values)
    }

    pub fn encode_documents<S>(&self, texts: &[S]) -> Result<Vec<SparseVector>>
    where
        S: AsRef<str> + Sync,
    {
        self.stats()?;
        texts
            .par_iter()
            .map(|text| self.encode_document(text.as_ref()))
            .collect()
    }

    ///
    /// Encode a query into L1 normalized idf weights. Query term counts are
    /// ignored; terms never seen while fitting get a document frequency of 1.
    ///
    /// # Errors
    /// [`Bm25Error::DegenerateQuery`] when the idf weights sum to zero (or a
    /// non-finite value) and cannot be normalized.
    ///
    pub fn encode_query(&self, text: &str) -> Result<SparseVector> {
        let stats = self.stats()?;
        let tf = term_frequencies(self.tokenizer.as_ref(), text)?;
        if tf.is_empty() {
            return Ok(SparseVector::empty());
        }

        let idf: Vec<f64> = tf
            .indices
            .iter()
            .map(|&term| {
                let df = stats.doc_freq(term).unwrap_or(UNSEEN_TERM_DOC_FREQ);
                inverse_document_frequency(df, stats.n_docs())
            })
            .collect();

        SparseVector::new(tf.indices, l1_normalize(&idf)?)
    }

    pub fn encode_queries<S>(&self, texts: &[S]) -> Result<Vec<SparseVector>>
    where
        S: AsRef<str> + Sync,
    {
        self.stats()?;
        texts
            .par_iter()
            .map(|text| self.encode_query(text.as_ref()))
            .collect()
    }
}
