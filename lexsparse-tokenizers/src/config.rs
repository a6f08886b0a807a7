use std::fmt;
use std::str::FromStr;

use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::stopwords::stopwords_for;

pub const DEFAULT_LANGUAGE: &str = "english";

///
/// Languages the word tokenizer knows how to stem. The language tag in a
/// [`TokenizerConfig`] is parsed into one of these.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Arabic,
    Danish,
    Dutch,
    English,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Arabic => "arabic",
            Language::Danish => "danish",
            Language::Dutch => "dutch",
            Language::English => "english",
            Language::French => "french",
            Language::German => "german",
            Language::Greek => "greek",
            Language::Hungarian => "hungarian",
            Language::Italian => "italian",
            Language::Norwegian => "norwegian",
            Language::Portuguese => "portuguese",
            Language::Romanian => "romanian",
            Language::Russian => "russian",
            Language::Spanish => "spanish",
            Language::Swedish => "swedish",
            Language::Tamil => "tamil",
            Language::Turkish => "turkish",
        }
    }

    /// The Snowball algorithm used to stem tokens of this language.
    pub fn stemmer_algorithm(&self) -> Algorithm {
        match self {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Greek => Algorithm::Greek,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Tamil => Algorithm::Tamil,
            Language::Turkish => Algorithm::Turkish,
        }
    }
}

impl FromStr for Language {
    type Err = TokenizerConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arabic" => Ok(Language::Arabic),
            "danish" => Ok(Language::Danish),
            "dutch" => Ok(Language::Dutch),
            "english" => Ok(Language::English),
            "french" => Ok(Language::French),
            "german" => Ok(Language::German),
            "greek" => Ok(Language::Greek),
            "hungarian" => Ok(Language::Hungarian),
            "italian" => Ok(Language::Italian),
            "norwegian" => Ok(Language::Norwegian),
            "portuguese" => Ok(Language::Portuguese),
            "romanian" => Ok(Language::Romanian),
            "russian" => Ok(Language::Russian),
            "spanish" => Ok(Language::Spanish),
            "swedish" => Ok(Language::Swedish),
            "tamil" => Ok(Language::Tamil),
            "turkish" => Ok(Language::Turkish),
            _ => Err(TokenizerConfigError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Options controlling how raw text is turned into tokens. The field names
/// are part of the persisted parameter format, so they must not be renamed.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TokenizerConfig {
    pub lower_case: bool,
    pub remove_punctuation: bool,
    pub remove_stopwords: bool,
    pub stem: bool,
    pub language: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lower_case: true,
            remove_punctuation: true,
            remove_stopwords: true,
            stem: true,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum TokenizerConfigError {
    #[error("Stemming requires lower-cased input. Set `lower_case = true` or disable `stem`")]
    StemWithoutLowerCase,
    #[error("Unsupported tokenizer language: {0}")]
    UnsupportedLanguage(String),
    #[error("No stopword list is available for language `{0}`. Disable `remove_stopwords`")]
    MissingStopwords(String),
}

pub type TokenizerConfigResult<T> = std::result::Result<T, TokenizerConfigError>;

impl TokenizerConfig {
    ///
    /// Check the config for inconsistencies and resolve its language tag.
    ///
    /// # Returns
    /// * `Language` - the parsed language, when the config is usable
    ///
    pub fn validate(&self) -> TokenizerConfigResult<Language> {
        if self.stem && !self.lower_case {
            return Err(TokenizerConfigError::StemWithoutLowerCase);
        }

        let language = Language::from_str(&self.language)?;

        if self.remove_stopwords && stopwords_for(language).is_none() {
            return Err(TokenizerConfigError::MissingStopwords(self.language.clone()));
        }

        Ok(language)
    }
}
