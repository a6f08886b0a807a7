//! Constants for the pretrained parameter loader.

// Environment variable names

/// Environment variable name for overriding the parameter file URL.
///
/// When set, this overrides [`DEFAULT_PARAMS_URL`].
///
/// # Example
///
/// ```bash
/// export LEXSPARSE_PARAMS_URL=https://example.org/my_bm25_params.json
/// ```
pub const PARAMS_URL_ENV: &str = "LEXSPARSE_PARAMS_URL";

/// BM25 parameters fitted on the MS MARCO passage corpus, with the default
/// tokenizer settings and MurmurHash3 term ids.
pub const DEFAULT_PARAMS_URL: &str =
    "https://storage.googleapis.com/pinecone-datasets-dev/bm25_params/msmarco_bm25_params_v4_0_0.json";

// File naming

/// Extension a cache path must carry.
pub const PARAMS_FILE_EXT: &str = "json";

/// File name used inside the temporary directory when no cache path is given.
pub const DEFAULT_PARAMS_FILENAME: &str = "bm25_params.json";

/// Prefix of the temporary directory used when no cache path is given.
pub const TEMP_DIR_PREFIX: &str = "lexsparse-";
