use fxhash::FxHashMap as HashMap;
use log::{debug, warn};
use rayon::prelude::*;

use lexsparse_tokenizers::Tokenize;

use crate::error::{Bm25Error, Result};
use crate::term_frequency::{TermFrequencies, term_frequencies};

///
/// Corpus-level statistics BM25 needs: per-term document frequency, the
/// number of documents that produced at least one token, and their mean
/// token count.
///
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStatistics {
    doc_freq: HashMap<u32, u32>,
    n_docs: u32,
    avgdl: f64,
}

impl CorpusStatistics {
    ///
    /// Build statistics from already computed values.
    ///
    /// # Errors
    /// [`Bm25Error::InvalidInput`] when `avgdl` is not a finite, positive number.
    ///
    pub fn new(doc_freq: HashMap<u32, u32>, n_docs: u32, avgdl: f64) -> Result<Self> {
        if !avgdl.is_finite() || avgdl <= 0.0 {
            return Err(Bm25Error::InvalidInput(format!(
                "avgdl must be a finite positive number, got {}",
                avgdl
            )));
        }
        Ok(CorpusStatistics {
            doc_freq,
            n_docs,
            avgdl,
        })
    }

    /// Number of fitted documents containing `term`, if any.
    pub fn doc_freq(&self, term: u32) -> Option<u32> {
        self.doc_freq.get(&term).copied()
    }

    pub fn doc_freqs(&self) -> &HashMap<u32, u32> {
        &self.doc_freq
    }

    pub fn n_docs(&self) -> u32 {
        self.n_docs
    }

    pub fn avgdl(&self) -> f64 {
        self.avgdl
    }

    /// Number of distinct hashed terms seen while fitting.
    pub fn vocab_size(&self) -> usize {
        self.doc_freq.len()
    }
}

/// Partial result of fitting a slice of the corpus. Merging two of these is
/// an exact integer sum, so any split of the corpus reduces to the same value.
#[derive(Debug, Default)]
struct Accumulator {
    doc_freq: HashMap<u32, u32>,
    n_docs: u32,
    total_len: u64,
    skipped: usize,
}

impl Accumulator {
    fn add(mut self, tf: &TermFrequencies) -> Self {
        if tf.is_empty() {
            self.skipped += 1;
            return self;
        }
        for &term in tf.indices.iter() {
            *self.doc_freq.entry(term).or_insert(0) += 1;
        }
        self.n_docs += 1;
        self.total_len += tf.doc_len();
        self
    }

    fn merge(mut self, other: Accumulator) -> Self {
        // fold the smaller map into the larger one
        let (mut into, from) = if self.doc_freq.len() >= other.doc_freq.len() {
            (std::mem::take(&mut self.doc_freq), other.doc_freq)
        } else {
            (other.doc_freq, std::mem::take(&mut self.doc_freq))
        };
        for (term, count) in from {
            *into.entry(term).or_insert(0) += count;
        }

        Accumulator {
            doc_freq: into,
            n_docs: self.n_docs + other.n_docs,
            total_len: self.total_len + other.total_len,
            skipped: self.skipped + other.skipped,
        }
    }
}

///
/// Compute [`CorpusStatistics`] over a corpus.
///
/// Documents that produce no tokens are skipped entirely: they count neither
/// towards `n_docs` nor towards `avgdl`. Per-document work runs on the rayon
/// thread pool; the result does not depend on corpus order.
///
/// # Arguments:
/// - `tokenizer`: the tokenizer producing the token stream
/// - `corpus`: the documents to fit on
///
/// # Errors
/// [`Bm25Error::NoFittableDocuments`] if no document produced a token.
///
pub fn fit_corpus<S>(tokenizer: &dyn Tokenize, corpus: &[S]) -> Result<CorpusStatistics>
where
    S: AsRef<str> + Sync,
{
    let acc = corpus
        .par_iter()
        .map(|doc| term_frequencies(tokenizer, doc.as_ref()))
        .try_fold(Accumulator::default, |acc, tf| {
            Ok::<_, Bm25Error>(acc.add(&tf?))
        })
        .try_reduce(Accumulator::default, |a, b| Ok(a.merge(b)))?;

    if acc.skipped > 0 {
        warn!(
            "Skipped {} of {} documents that produced no tokens",
            acc.skipped,
            corpus.len()
        );
    }

    if acc.n_docs == 0 {
        return Err(Bm25Error::NoFittableDocuments);
    }

    let avgdl = acc.total_len as f64 / acc.n_docs as f64;
    debug!(
        "Fitted corpus statistics: n_docs={}, avgdl={}, vocab={}",
        acc.n_docs,
        avgdl,
        acc.doc_freq.len()
    );

    CorpusStatistics::new(acc.doc_freq, acc.n_docs, avgdl)
}
