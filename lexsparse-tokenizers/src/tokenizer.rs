use fxhash::FxHashSet as HashSet;
use rust_stemmers::Stemmer;
use unicode_segmentation::UnicodeSegmentation;

use super::config::{Language, TokenizerConfig};
use super::error::TokenizerError;
use super::utils::{is_punctuation, stopwords_for};

///
/// The single capability consumers need from a tokenizer: turn text into an
/// ordered sequence of normalized token strings.
///
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError>;
}

///
/// Word tokenizer driven by a [`TokenizerConfig`]. Splits on Unicode word
/// boundaries, then applies case folding, punctuation removal, stopword
/// removal and Snowball stemming, in that order.
///
pub struct Tokenizer {
    config: TokenizerConfig,
    language: Language,
    stopwords: Option<&'static HashSet<&'static str>>,
    stemmer: Option<Stemmer>,
}

impl Tokenizer {
    ///
    /// Create a new tokenizer from a config. The config is validated first.
    ///
    pub fn new(config: TokenizerConfig) -> Result<Self, TokenizerError> {
        let language = config.validate()?;

        let stopwords = if config.remove_stopwords {
            stopwords_for(language)
        } else {
            None
        };

        let stemmer = config
            .stem
            .then(|| Stemmer::create(language.stemmer_algorithm()));

        Ok(Tokenizer {
            config,
            language,
            stopwords,
            stemmer,
        })
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Stopword lists are lower case; tokens are folded here only when the
    /// pipeline has not folded them already.
    fn is_stopword(&self, token: &str) -> bool {
        match self.stopwords {
            Some(stopwords) if self.config.lower_case => stopwords.contains(token),
            Some(stopwords) => stopwords.contains(token.to_lowercase().as_str()),
            None => false,
        }
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        let token = if self.config.lower_case {
            raw.to_lowercase()
        } else {
            raw.to_string()
        };

        if self.config.remove_punctuation && is_punctuation(&token) {
            return None;
        }

        if self.is_stopword(&token) {
            return None;
        }

        let token = match &self.stemmer {
            Some(stemmer) => stemmer.stem(&token).into_owned(),
            None => token,
        };

        (!token.is_empty()).then_some(token)
    }
}

impl Tokenize for Tokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        Ok(text
            .split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .filter_map(|segment| self.normalize(segment))
            .collect())
    }
}
