//! Client configuration and environment variable handling.
//!
//! Settings are resolved environment first, then an optional `lts.toml`
//! file in the working directory, then built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// The rewrite-friendly API base path.
pub const API_REWRITE_PATH: &str = "/api";

/// Direct route to the hosted function, used when the `/api` rewrite is not
/// in place for a deployment.
pub const FUNCTION_PATH: &str = "/.netlify/functions/library_excel";

/// Origin assumed when none is configured (the local dev server).
pub const DEFAULT_ORIGIN: &str = "http://localhost:8888";

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "lts.toml";

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL tried first for every request.
    pub primary_base: String,
    /// Base URL retried when the primary answers not-found.
    pub secondary_base: Option<String>,
    /// Directory generated timesheets are written to.
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiSection {
    /// Server origin, e.g. `http://localhost:8888`.
    origin: Option<String>,
    /// Full base override; disables the `/api` default.
    base: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputSection {
    dir: Option<String>,
}

impl ClientConfig {
    /// Load configuration from the environment and `lts.toml`.
    ///
    /// # Environment Variables
    /// - `LTS_ORIGIN` (optional, default `http://localhost:8888`): server
    ///   origin the base paths are appended to
    /// - `LTS_API_BASE` (optional): full base URL override; the `/api`
    ///   rewrite base then becomes the fallback candidate
    /// - `LTS_OUTPUT_DIR` (optional, default `.`): where generated
    ///   timesheets are saved
    pub fn load() -> Self {
        Self::from_file_config(read_file(Path::new(CONFIG_FILE)).unwrap_or_default())
    }

    fn from_file_config(file: FileConfig) -> Self {
        let origin = env::var("LTS_ORIGIN")
            .ok()
            .or(file.api.origin)
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let override_base = env::var("LTS_API_BASE").ok().or(file.api.base);
        let (primary_base, secondary_base) = resolve_bases(&origin, override_base.as_deref());

        let output_dir = env::var("LTS_OUTPUT_DIR")
            .ok()
            .or(file.output.dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            primary_base,
            secondary_base,
            output_dir,
        }
    }
}

/// Resolve the candidate base URLs for a server origin.
///
/// An explicit override becomes the primary and the `/api` rewrite base the
/// fallback; otherwise the rewrite base is primary and the direct function
/// route the fallback. A secondary equal to the primary is dropped.
pub fn resolve_bases(origin: &str, override_base: Option<&str>) -> (String, Option<String>) {
    let origin = origin.trim_end_matches('/');
    let rewrite_base = format!("{origin}{API_REWRITE_PATH}");
    let primary = override_base
        .map(|base| base.trim_end_matches('/').to_string())
        .unwrap_or_else(|| rewrite_base.clone());
    let secondary = if primary == rewrite_base {
        format!("{origin}{FUNCTION_PATH}")
    } else {
        rewrite_base
    };
    if secondary == primary {
        (primary, None)
    } else {
        (primary, Some(secondary))
    }
}

fn read_file(path: &Path) -> Option<FileConfig> {
    let text = fs::read_to_string(path).ok()?;
    match toml::from_str(&text) {
        Ok(config) => Some(config),
        Err(error) => {
            warn!("ignoring malformed {}: {}", path.display(), error);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bases_use_rewrite_then_function_route() {
        let (primary, secondary) = resolve_bases("http://localhost:8888", None);
        assert_eq!(primary, "http://localhost:8888/api");
        assert_eq!(
            secondary.as_deref(),
            Some("http://localhost:8888/.netlify/functions/library_excel")
        );
    }

    #[test]
    fn override_becomes_primary_with_rewrite_fallback() {
        let (primary, secondary) =
            resolve_bases("http://localhost:8888", Some("http://localhost:5000/v2"));
        assert_eq!(primary, "http://localhost:5000/v2");
        assert_eq!(secondary.as_deref(), Some("http://localhost:8888/api"));
    }

    #[test]
    fn override_equal_to_rewrite_base_collapses_to_function_fallback() {
        let (primary, secondary) =
            resolve_bases("http://localhost:8888", Some("http://localhost:8888/api"));
        assert_eq!(primary, "http://localhost:8888/api");
        assert_eq!(
            secondary.as_deref(),
            Some("http://localhost:8888/.netlify/functions/library_excel")
        );
    }

    #[test]
    fn trailing_slashes_are_normalized() {
        let (primary, secondary) = resolve_bases("http://localhost:8888/", None);
        assert_eq!(primary, "http://localhost:8888/api");
        assert!(secondary.is_some());
    }

    #[test]
    fn file_config_parses_partial_tables() {
        let file: FileConfig = toml::from_str(
            r#"
            [api]
            origin = "http://localhost:9000"
            "#,
        )
        .unwrap();
        assert_eq!(file.api.origin.as_deref(), Some("http://localhost:9000"));
        assert_eq!(file.api.base, None);
        assert_eq!(file.output.dir, None);
    }

    #[test]
    fn file_config_parses_empty_document() {
        let file: FileConfig = toml::from_str("").unwrap();
        assert_eq!(file.api.origin, None);
    }
}
