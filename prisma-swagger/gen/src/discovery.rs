//! Controller file discovery.
//!
//! Globs the configured pattern under the project root and returns the
//! matches as `./`-prefixed, forward-slash paths relative to the root, in the
//! order `glob` yields them (alphabetical within each directory).

use std::path::{Component, Path};

use glob::Pattern;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::errors::GeneratorError;

/// Discovers controller files for the generated script.
///
/// Directories matching the pattern are skipped.
///
/// ## Errors
///
/// Returns `GeneratorError::GlobError` for a malformed pattern or an
/// unreadable match.
pub fn discover_controllers(settings: &Settings) -> Result<Vec<String>, GeneratorError> {
    let root = &settings.project_root;
    let pattern = if Path::new(&settings.controllers_glob).is_absolute() {
        settings.controllers_glob.clone()
    } else {
        format!(
            "{}/{}",
            Pattern::escape(&root.to_string_lossy()),
            settings.controllers_glob
        )
    };
    debug!(pattern = %pattern, "Discovering controllers");

    let entries = glob::glob(&pattern)
        .map_err(|e| GeneratorError::GlobError(format!("invalid pattern '{pattern}': {e}")))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| GeneratorError::GlobError(e.to_string()))?;
        if !path.is_file() {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let normalized = normalize_path(relative);
        debug!(path = %normalized, "Discovered controller");
        paths.push(normalized);
    }

    if paths.is_empty() {
        warn!(pattern = %pattern, "No controller files matched");
    }

    Ok(paths)
}

/// Renders a path with forward slashes, prefixing relative paths with `./`.
///
/// ```
/// use std::path::Path;
/// use prisma_swagger_gen::discovery::normalize_path;
///
/// assert_eq!(normalize_path(Path::new("src/a.ts")), "./src/a.ts");
/// assert_eq!(normalize_path(Path::new("./src/a.ts")), "./src/a.ts");
/// assert_eq!(normalize_path(Path::new("../shared/a.ts")), "../shared/a.ts");
/// ```
pub fn normalize_path(path: &Path) -> String {
    let joined = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().replace('\\', "/"),
        })
        .collect::<Vec<_>>()
        .join("/");

    if path.has_root() || joined.starts_with("../") || joined == ".." {
        joined
    } else {
        format!("./{joined}")
    }
}
