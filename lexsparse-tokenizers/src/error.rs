use thiserror::Error;

use super::config::TokenizerConfigError;

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error(transparent)]
    Config(#[from] TokenizerConfigError),
    #[error("Failed to parse input into tokens: {0}")]
    ParseError(String),
}
