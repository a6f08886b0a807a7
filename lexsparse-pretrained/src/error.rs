use std::path::PathBuf;

use thiserror::Error;

use lexsparse_bm25::Bm25Error;

use super::consts::PARAMS_FILE_EXT;

#[derive(Error, Debug)]
pub enum PretrainedError {
    #[error("Cache path must end in `.{ext}`: {0}", ext = PARAMS_FILE_EXT)]
    InvalidExtension(PathBuf),
    #[error("Cannot expand cache path {path}: {reason}")]
    InvalidPath { path: String, reason: String },
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Bm25(#[from] Bm25Error),
}

pub type Result<T> = std::result::Result<T, PretrainedError>;
