//! # repoflat-classify
//!
//! Name-based text/binary classification. A file is text when its basename
//! exactly matches a well-known extensionless filename, or when the
//! substring after the last `.` (case-insensitive) matches a recognized
//! text extension. There is no content sniffing and no encoding detection;
//! anything unmatched is treated as binary.
//!
//! Both passes of the pipeline (structure and content) must agree on this
//! answer, so they both call [`is_text`] on the basename.

mod tables;

use std::collections::HashSet;
use std::sync::LazyLock;

use tables::{TEXT_EXTENSIONS, WELL_KNOWN_FILENAMES};

static FILENAME_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| WELL_KNOWN_FILENAMES.iter().copied().collect());

static EXTENSION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TEXT_EXTENSIONS.iter().copied().collect());

/// The substring after the last `.`, or `None` for dotless names.
fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Classify a basename as text (`true`) or binary (`false`).
///
/// # Examples
///
/// ```
/// use repoflat_classify::is_text;
///
/// assert!(is_text("main.rs"));
/// assert!(is_text("Makefile"));
/// assert!(is_text("NOTES.MD"));
/// assert!(!is_text("photo.png"));
/// ```
#[must_use]
pub fn is_text(name: &str) -> bool {
    if FILENAME_SET.contains(name) {
        return true;
    }
    match extension(name) {
        Some(ext) => EXTENSION_SET.contains(ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}
