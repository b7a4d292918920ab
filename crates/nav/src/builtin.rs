//! The documentation site's own navigation, plus loaders for custom trees.

use std::fs;
use std::path::Path;

use kdocs_types::NavigationTree;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::NavigationLoadError;

static BUILTIN: Lazy<NavigationTree> = Lazy::new(|| {
    serde_json::from_str(include_str!("../data/navigation.json")).expect("embedded navigation.json is valid")
});

/// Navigation tree shipped with the site.
pub fn builtin_navigation() -> &'static NavigationTree {
    &BUILTIN
}

/// Loads a navigation tree from a JSON or YAML file. The format is chosen by
/// extension (`.yaml`/`.yml` for YAML, anything else as JSON).
pub fn load_navigation(path: &Path) -> Result<NavigationTree, NavigationLoadError> {
    let content = fs::read_to_string(path).map_err(|source| NavigationLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| matches!(extension.to_ascii_lowercase().as_str(), "yaml" | "yml"));
    let tree: NavigationTree = if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| NavigationLoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| NavigationLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };
    debug!(path = %path.display(), groups = tree.len(), "loaded navigation file");
    Ok(tree)
}
