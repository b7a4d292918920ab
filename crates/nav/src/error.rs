use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a navigation tree from disk.
#[derive(Debug, Error)]
pub enum NavigationLoadError {
    #[error("failed to read navigation file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON navigation in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML navigation in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
