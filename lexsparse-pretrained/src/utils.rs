use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::consts::{DEFAULT_PARAMS_URL, PARAMS_FILE_EXT, PARAMS_URL_ENV};
use super::error::{PretrainedError, Result};

/// Get the parameter file URL from the environment, falling back to the
/// canonical MS MARCO parameters.
///
/// # Returns
/// - URL of the parameter file
pub fn get_default_params_url() -> String {
    env::var(PARAMS_URL_ENV).unwrap_or_else(|_| DEFAULT_PARAMS_URL.to_string())
}

/// Expand `~` and environment variables in a user supplied cache path and
/// check its extension.
///
/// # Arguments
/// - path: the cache path as given by the caller
///
/// # Returns
/// - the expanded path; an undefined variable is an error, never left as text
pub fn resolve_cache_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy().into_owned();
    let expanded = shellexpand::full(&raw)
        .map_err(|e| PretrainedError::InvalidPath {
            path: raw.clone(),
            reason: e.to_string(),
        })?
        .into_owned();
    let resolved = PathBuf::from(expanded);

    match resolved.extension().and_then(OsStr::to_str) {
        Some(PARAMS_FILE_EXT) => Ok(resolved),
        _ => Err(PretrainedError::InvalidExtension(resolved)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("params.json")]
    #[case("/tmp/cache/msmarco.json")]
    fn test_resolve_accepts_json(#[case] path: &str) {
        let resolved = resolve_cache_path(Path::new(path)).unwrap();
        assert_eq!(resolved, PathBuf::from(path));
    }

    #[rstest]
    #[case("params.toml")]
    #[case("params")]
    #[case("params.json.gz")]
    #[case("params.JSON")]
    fn test_resolve_rejects_other_extensions(#[case] path: &str) {
        let result = resolve_cache_path(Path::new(path));
        assert!(matches!(result, Err(PretrainedError::InvalidExtension(_))));
    }

    #[rstest]
    fn test_resolve_expands_home() {
        let resolved = resolve_cache_path(Path::new("~/params.json")).unwrap();
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.ends_with("params.json"));
    }

    #[rstest]
    fn test_resolve_rejects_undefined_variable() {
        let result = resolve_cache_path(Path::new("$LEXSPARSE_TEST_UNDEFINED_DIR/params.json"));
        match result {
            Err(PretrainedError::InvalidPath { path, reason }) => {
                assert_eq!(path, "$LEXSPARSE_TEST_UNDEFINED_DIR/params.json");
                assert!(reason.contains("LEXSPARSE_TEST_UNDEFINED_DIR"), "{}", reason);
            }
            other => panic!("expected InvalidPath, got {:?}", other),
        }
    }

    #[rstest]
    fn test_invalid_extension_message_names_extension() {
        let err = resolve_cache_path(Path::new("params.toml")).unwrap_err();
        assert_eq!(err.to_string(), "Cache path must end in `.json`: params.toml");
    }
}
