use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use lexsparse_tokenizers::TokenizerConfig;

use crate::error::{Bm25Error, Result};

pub const DEFAULT_B: f64 = 0.75;
pub const DEFAULT_K1: f64 = 1.2;

///
/// BM25 hyperparameters plus the tokenizer options. Fixed for the lifetime of
/// an encoder.
///
/// Can be read from a TOML file:
///
/// ```toml
/// b = 0.75
/// k1 = 1.2
///
/// [tokenizer]
/// lower_case = true
/// remove_punctuation = true
/// remove_stopwords = true
/// stem = true
/// language = "english"
/// ```
///
/// Every key is optional.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Bm25Config {
    /// length normalization strength, in `[0, 1]`
    pub b: f64,
    /// term frequency saturation, `>= 0`
    pub k1: f64,
    pub tokenizer: TokenizerConfig,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Self {
            b: DEFAULT_B,
            k1: DEFAULT_K1,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl Bm25Config {
    pub fn validate(&self) -> Result<()> {
        if !self.b.is_finite() || !(0.0..=1.0).contains(&self.b) {
            return Err(Bm25Error::InvalidConfig(format!(
                "b must be within [0, 1], got {}",
                self.b
            )));
        }
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(Bm25Error::InvalidConfig(format!(
                "k1 must be a finite number >= 0, got {}",
                self.k1
            )));
        }
        self.tokenizer.validate()?;
        Ok(())
    }
}

impl TryFrom<&Path> for Bm25Config {
    type Error = Bm25Error;

    fn try_from(path: &Path) -> std::result::Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: Bm25Config = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use std::path::PathBuf;

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("tests/data")
    }

    #[rstest]
    fn test_defaults() {
        let config = Bm25Config::default();
        assert_eq!(config.b, 0.75);
        assert_eq!(config.k1, 1.2);
        assert_eq!(config.tokenizer, TokenizerConfig::default());
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn test_try_from_toml() {
        let path = data_dir().join("bm25.toml");
        let config = Bm25Config::try_from(path.as_path()).unwrap();
        assert_eq!(config.b, 0.5);
        assert_eq!(config.k1, 1.5);
        assert_eq!(config.tokenizer.stem, false);
        // unspecified keys fall back to defaults
        assert_eq!(config.tokenizer.remove_stopwords, true);
        assert_eq!(config.tokenizer.language, "english");
    }

    #[rstest]
    fn test_try_from_toml_rejects_stem_without_lower_case() {
        let path = data_dir().join("bm25_bad_stem.toml");
        let result = Bm25Config::try_from(path.as_path());
        assert!(matches!(result, Err(Bm25Error::TokenizerConfig(_))));
    }

    #[rstest]
    fn test_missing_file() {
        let result = Bm25Config::try_from(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(Bm25Error::Io(_))));
    }

    #[rstest]
    #[case(-0.1, 1.2)]
    #[case(1.1, 1.2)]
    #[case(f64::NAN, 1.2)]
    #[case(0.75, -1.0)]
    #[case(0.75, f64::INFINITY)]
    fn test_invalid_hyperparameters(#[case] b: f64, #[case] k1: f64) {
        let config = Bm25Config {
            b,
            k1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Bm25Error::InvalidConfig(_))));
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1.0, 3.0)]
    fn test_boundary_hyperparameters(#[case] b: f64, #[case] k1: f64) {
        let config = Bm25Config {
            b,
            k1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
