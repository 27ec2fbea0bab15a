//! Single-responsibility path normalization for deterministic manifest keys.

use std::path::Path;

/// Normalize path separators to `/`.
///
/// # Examples
///
/// ```
/// use repoflat_path::normalize_slashes;
///
/// assert_eq!(normalize_slashes(r"src\bin\main.rs"), "src/bin/main.rs");
/// assert_eq!(normalize_slashes("already/fine"), "already/fine");
/// ```
#[must_use]
pub fn normalize_slashes(path: &str) -> String {
    if path.contains('\\') {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}

/// Convert a root-relative path into its manifest key:
/// - converts `\` to `/`
/// - strips one leading `./`
///
/// Manifest keys are compared and persisted as strings, so the same tree
/// must produce the same key on every platform.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use repoflat_path::manifest_key;
///
/// assert_eq!(manifest_key(Path::new("./src/main.rs")), "src/main.rs");
/// assert_eq!(manifest_key(Path::new("docs/intro.md")), "docs/intro.md");
/// ```
#[must_use]
pub fn manifest_key(rel: &Path) -> String {
    let normalized = normalize_slashes(&rel.to_string_lossy());
    if let Some(stripped) = normalized.strip_prefix("./") {
        stripped.to_string()
    } else {
        normalized
    }
}

/// Return the final path segment of a manifest key.
///
/// # Examples
///
/// ```
/// use repoflat_path::key_basename;
///
/// assert_eq!(key_basename("src/main.rs"), "main.rs");
/// assert_eq!(key_basename("Makefile"), "Makefile");
/// ```
#[must_use]
pub fn key_basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
