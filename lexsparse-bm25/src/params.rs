use std::fs::{File, read_to_string};
use std::io::{BufWriter, Write};
use std::path::Path;

use fxhash::FxHashMap as HashMap;
use log::info;
use serde::{Deserialize, Serialize};

use lexsparse_tokenizers::TokenizerConfig;

use crate::bm25::{BM25Encoder, EncoderState, build_tokenizer};
use crate::config::Bm25Config;
use crate::error::{Bm25Error, Result};
use crate::stats::CorpusStatistics;

/// Document frequencies as two parallel arrays.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct DocFreq {
    pub indices: Vec<u32>,
    pub values: Vec<u32>,
}

///
/// Everything needed to rebuild a fitted encoder. This is the on-disk
/// format written by [`BM25Encoder::dump`]:
///
/// ```json
/// {
///   "avgdl": 5.5,
///   "n_docs": 3,
///   "doc_freq": {"indices": [102, 7], "values": [2, 1]},
///   "b": 0.75,
///   "k1": 1.2,
///   "lower_case": true,
///   "remove_punctuation": true,
///   "remove_stopwords": true,
///   "stem": true,
///   "language": "english"
/// }
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BM25Params {
    pub avgdl: f64,
    pub n_docs: u32,
    pub doc_freq: DocFreq,
    pub b: f64,
    pub k1: f64,
    pub lower_case: bool,
    pub remove_punctuation: bool,
    pub remove_stopwords: bool,
    pub stem: bool,
    pub language: String,
}

impl BM25Params {
    fn config(&self) -> Bm25Config {
        Bm25Config {
            b: self.b,
            k1: self.k1,
            tokenizer: TokenizerConfig {
                lower_case: self.lower_case,
                remove_punctuation: self.remove_punctuation,
                remove_stopwords: self.remove_stopwords,
                stem: self.stem,
                language: self.language.clone(),
            },
        }
    }

    fn statistics(&self) -> Result<CorpusStatistics> {
        let DocFreq { indices, values } = &self.doc_freq;
        if indices.len() != values.len() {
            return Err(Bm25Error::InvalidInput(format!(
                "doc_freq.indices and doc_freq.values differ in length ({} != {})",
                indices.len(),
                values.len()
            )));
        }

        let mut doc_freq: HashMap<u32, u32> = HashMap::default();
        doc_freq.reserve(indices.len());
        for (&term, &count) in indices.iter().zip(values.iter()) {
            if doc_freq.insert(term, count).is_some() {
                return Err(Bm25Error::InvalidInput(format!(
                    "doc_freq.indices contains {} more than once",
                    term
                )));
            }
        }

        CorpusStatistics::new(doc_freq, self.n_docs, self.avgdl)
    }
}

impl TryFrom<&Path> for BM25Params {
    type Error = Bm25Error;

    fn try_from(path: &Path) -> std::result::Result<Self, Self::Error> {
        let raw = read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl BM25Encoder {
    ///
    /// Export the fitted state and configuration. `doc_freq` is emitted in
    /// ascending index order so repeated dumps of one state are identical;
    /// readers must not rely on that order.
    ///
    pub fn get_params(&self) -> Result<BM25Params> {
        let stats = self.stats()?;

        let mut pairs: Vec<(u32, u32)> = stats
            .doc_freqs()
            .iter()
            .map(|(&term, &count)| (term, count))
            .collect();
        pairs.sort_unstable_by_key(|&(term, _)| term);
        let (indices, values) = pairs.into_iter().unzip();

        let tokenizer = &self.config.tokenizer;
        Ok(BM25Params {
            avgdl: stats.avgdl(),
            n_docs: stats.n_docs(),
            doc_freq: DocFreq { indices, values },
            b: self.config.b,
            k1: self.config.k1,
            lower_case: tokenizer.lower_case,
            remove_punctuation: tokenizer.remove_punctuation,
            remove_stopwords: tokenizer.remove_stopwords,
            stem: tokenizer.stem,
            language: tokenizer.language.clone(),
        })
    }

    ///
    /// Replace configuration, tokenizer and statistics with `params`. The
    /// encoder is `Fitted` afterwards. Nothing changes if `params` is invalid.
    ///
    pub fn set_params(&mut self, params: BM25Params) -> Result<()> {
        *self = BM25Encoder::from_params(params)?;
        Ok(())
    }

    /// Build a fitted encoder straight from parameters.
    pub fn from_params(params: BM25Params) -> Result<Self> {
        let config = params.config();
        config.validate()?;
        let stats = params.statistics()?;
        let tokenizer = build_tokenizer(&config.tokenizer)?;

        Ok(BM25Encoder {
            config,
            tokenizer,
            state: EncoderState::Fitted(stats),
        })
    }

    /// Build a fitted encoder from a parameter file written by [`BM25Encoder::dump`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let params = BM25Params::try_from(path.as_ref())?;
        BM25Encoder::from_params(params)
    }

    ///
    /// Write the parameters as JSON. A failure part way through can leave a
    /// truncated file behind.
    ///
    pub fn dump<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let params = self.get_params()?;
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer(&mut writer, &params)?;
        writer.flush()?;
        info!("Wrote BM25 parameters to {}", path.as_ref().display());
        Ok(())
    }

    /// Read parameters written by [`BM25Encoder::dump`] and apply them.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let params = BM25Params::try_from(path.as_ref())?;
        self.set_params(params)?;
        info!("Loaded BM25 parameters from {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::path::PathBuf;

    #[fixture]
    fn params() -> BM25Params {
        BM25Params {
            avgdl: 2.5,
            n_docs: 4,
            doc_freq: DocFreq {
                indices: vec![10, 20, 30],
                values: vec![4, 1, 2],
            },
            b: 0.75,
            k1: 1.2,
            lower_case: true,
            remove_punctuation: true,
            remove_stopwords: true,
            stem: true,
            language: "english".to_string(),
        }
    }

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("tests/data")
    }

    #[rstest]
    fn test_get_params_requires_fit() {
        let encoder = BM25Encoder::builder().build().unwrap();
        assert!(matches!(encoder.get_params(), Err(Bm25Error::NotFitted)));
    }

    #[rstest]
    fn test_set_then_get(params: BM25Params) {
        let mut encoder = BM25Encoder::builder().build().unwrap();
        encoder.set_params(params.clone()).unwrap();
        assert!(encoder.is_fitted());
        assert_eq!(encoder.get_params().unwrap(), params);
    }

    #[rstest]
    fn test_get_params_sorts_doc_freq(mut params: BM25Params) {
        params.doc_freq = DocFreq {
            indices: vec![30, 10, 20],
            values: vec![2, 4, 1],
        };
        let encoder = BM25Encoder::from_params(params).unwrap();
        let exported = encoder.get_params().unwrap();
        assert_eq!(exported.doc_freq.indices, vec![10, 20, 30]);
        assert_eq!(exported.doc_freq.values, vec![4, 1, 2]);
    }

    #[rstest]
    fn test_set_params_rebuilds_config(mut params: BM25Params) {
        params.b = 0.1;
        params.stem = false;
        let mut encoder = BM25Encoder::builder().build().unwrap();
        encoder.set_params(params).unwrap();
        assert_eq!(encoder.config().b, 0.1);
        assert_eq!(encoder.config().tokenizer.stem, false);
    }

    #[rstest]
    fn test_set_params_rejects_length_mismatch(mut params: BM25Params) {
        params.doc_freq.values.pop();
        let mut encoder = BM25Encoder::builder().build().unwrap();
        let result = encoder.set_params(params);
        assert!(matches!(result, Err(Bm25Error::InvalidInput(_))));
        assert!(!encoder.is_fitted());
    }

    #[rstest]
    fn test_set_params_rejects_duplicate_indices(mut params: BM25Params) {
        params.doc_freq.indices = vec![10, 10, 30];
        let result = BM25Encoder::from_params(params);
        assert!(matches!(result, Err(Bm25Error::InvalidInput(_))));
    }

    #[rstest]
    fn test_set_params_rejects_stem_without_lower_case(mut params: BM25Params) {
        params.lower_case = false;
        let mut encoder = BM25Encoder::builder().build().unwrap();
        let result = encoder.set_params(params);
        assert!(matches!(result, Err(Bm25Error::TokenizerConfig(_))));
        assert!(!encoder.is_fitted());
    }

    #[rstest]
    fn test_failed_set_params_keeps_fitted_state(params: BM25Params) {
        let mut encoder = BM25Encoder::from_params(params.clone()).unwrap();
        let mut bad = params.clone();
        bad.avgdl = f64::NAN;
        assert!(encoder.set_params(bad).is_err());
        assert_eq!(encoder.get_params().unwrap(), params);
    }

    #[rstest]
    fn test_dump_and_load(params: BM25Params) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tempdir = tempfile::tempdir()?;
        let path = tempdir.path().join("params.json");

        let encoder = BM25Encoder::from_params(params.clone())?;
        encoder.dump(&path)?;

        let mut loaded = BM25Encoder::builder().build()?;
        loaded.load(&path)?;
        assert_eq!(loaded.get_params()?, params);
        Ok(())
    }

    #[rstest]
    fn test_dump_requires_fit() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("params.json");
        let encoder = BM25Encoder::builder().build().unwrap();
        assert!(matches!(encoder.dump(&path), Err(Bm25Error::NotFitted)));
        assert!(!path.exists());
    }

    #[rstest]
    fn test_dump_uses_persisted_field_names(params: BM25Params) {
        let value = serde_json::to_value(&params).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "avgdl",
                "b",
                "doc_freq",
                "k1",
                "language",
                "lower_case",
                "n_docs",
                "remove_punctuation",
                "remove_stopwords",
                "stem"
            ]
        );
        assert_eq!(value["doc_freq"]["indices"], serde_json::json!([10, 20, 30]));
    }

    #[rstest]
    fn test_load_fixture_file() {
        let encoder = BM25Encoder::from_file(data_dir().join("bm25_params.json")).unwrap();
        let stats = encoder.stats().unwrap();
        assert_eq!(stats.n_docs(), 3);
        assert!((stats.avgdl() - 11.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.vocab_size(), 6);
    }

    #[rstest]
    fn test_load_missing_file() {
        let mut encoder = BM25Encoder::builder().build().unwrap();
        let result = encoder.load("does/not/exist.json");
        assert!(matches!(result, Err(Bm25Error::Io(_))));
    }

    #[rstest]
    fn test_load_malformed_file() {
        let result = BM25Encoder::from_file(data_dir().join("bm25.toml"));
        assert!(matches!(result, Err(Bm25Error::Json(_))));
    }
}
