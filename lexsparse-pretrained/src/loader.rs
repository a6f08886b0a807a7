//! Loader for pretrained BM25 parameters.
//!
//! This module provides the [`PretrainedLoader`] type and its builder, which
//! fetch a parameter file over HTTP, keep it in a user chosen cache path and
//! turn it into a fitted [`BM25Encoder`].

use std::fs::{create_dir_all, write};
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{info, warn};
use ureq::{Error as UreqError, get};

use lexsparse_bm25::BM25Encoder;

use super::consts::{DEFAULT_PARAMS_FILENAME, TEMP_DIR_PREFIX};
use super::error::{PretrainedError, Result};
use super::utils::{get_default_params_url, resolve_cache_path};

/// Builder for constructing a [`PretrainedLoader`].
///
/// # Examples
///
/// ```rust,no_run
/// use lexsparse_pretrained::PretrainedLoader;
///
/// let loader = PretrainedLoader::builder()
///     .with_params_url("https://example.org/bm25_params.json".to_string())
///     .finish();
/// let encoder = loader.load(Some("~/.cache/lexsparse/msmarco.json".as_ref())).unwrap();
/// ```
#[derive(Default)]
pub struct PretrainedLoaderBuilder {
    params_url: Option<String>,
    temp_dir: Option<PathBuf>,
}

impl PretrainedLoaderBuilder {
    /// Creates a new, empty PretrainedLoaderBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL the parameter file is fetched from.
    pub fn with_params_url(mut self, url: String) -> Self {
        self.params_url = Some(url);
        self
    }

    /// Sets the directory temporary caches are created in (defaults to the
    /// system temp directory).
    pub fn with_temp_dir(mut self, path: PathBuf) -> Self {
        self.temp_dir = Some(path);
        self
    }

    /// Consumes the builder and creates a PretrainedLoader.
    pub fn finish(self) -> PretrainedLoader {
        PretrainedLoader {
            params_url: self.params_url.unwrap_or_else(get_default_params_url),
            temp_dir: self.temp_dir,
        }
    }
}

/// Fetches and caches a BM25 parameter file.
///
/// With a cache path the file is downloaded once and reused afterwards. The
/// cached bytes are never checked against the remote copy; delete the file
/// to refresh it. Without a cache path the file lives in a temporary
/// directory that is removed before [`PretrainedLoader::load`] returns.
#[derive(Debug, Clone)]
pub struct PretrainedLoader {
    /// URL of the parameter file
    pub params_url: String,
    /// Parent of the temporary cache used when no cache path is given
    pub temp_dir: Option<PathBuf>,
}

impl PretrainedLoader {
    /// Creates a new PretrainedLoaderBuilder.
    pub fn builder() -> PretrainedLoaderBuilder {
        PretrainedLoaderBuilder::new()
    }

    /// Load the pretrained encoder, downloading the parameters if needed.
    /// # Arguments
    /// - cache_path: where to keep the parameter file; `~` and environment
    ///   variables are expanded and the extension must be `.json`
    ///
    /// # Returns
    /// - a fitted encoder
    pub fn load(&self, cache_path: Option<&Path>) -> Result<BM25Encoder> {
        match cache_path {
            Some(path) => {
                let path = resolve_cache_path(path)?;
                self.load_cached(&path)
            }
            None => self.load_ephemeral(),
        }
    }

    fn load_cached(&self, path: &Path) -> Result<BM25Encoder> {
        if path.exists() {
            info!("Loading cached BM25 parameters from {}", path.display());
            return Ok(BM25Encoder::from_file(path)?);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        self.download(path)?;
        Ok(BM25Encoder::from_file(path)?)
    }

    fn load_ephemeral(&self) -> Result<BM25Encoder> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);
        let tempdir = match &self.temp_dir {
            Some(base) => builder.tempdir_in(base)?,
            None => builder.tempdir()?,
        };
        let path = tempdir.path().join(DEFAULT_PARAMS_FILENAME);

        let result = self
            .download(&path)
            .and_then(|_| Ok(BM25Encoder::from_file(&path)?));

        // cleanup failures must not hide the load result
        let tempdir_path = tempdir.path().to_path_buf();
        if let Err(e) = tempdir.close() {
            warn!(
                "Failed to remove temporary directory {}: {}",
                tempdir_path.display(),
                e
            );
        }
        result
    }

    /// Download the parameter file and write it, byte for byte, to `destination`.
    /// # Arguments
    /// - destination: file to write; its parent directory must exist
    pub fn download(&self, destination: &Path) -> Result<()> {
        let bytes = fetch(&self.params_url)?;
        write(destination, &bytes)?;
        info!(
            "Downloaded BM25 parameters from {} to path: {}",
            self.params_url,
            destination.display()
        );
        Ok(())
    }
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let response = match get(url).call() {
        Ok(resp) => resp,
        Err(UreqError::StatusCode(code)) => {
            return Err(PretrainedError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP status {}", code),
            });
        }
        Err(e) => {
            return Err(PretrainedError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }
    };

    let mut bytes = Vec::new();
    response
        .into_body()
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| PretrainedError::Fetch {
            url: url.to_string(),
            reason: format!("failed reading response body: {}", e),
        })?;

    Ok(bytes)
}

/// Load the canonical MS MARCO encoder (or the one named by
/// `LEXSPARSE_PARAMS_URL`).
pub fn load_default(cache_path: Option<&Path>) -> Result<BM25Encoder> {
    PretrainedLoader::builder().finish().load(cache_path)
}
