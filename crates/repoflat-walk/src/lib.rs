//! # repoflat-walk
//!
//! The structure pass: a single depth-first, pre-order traversal of the
//! input root producing the [`Manifest`]. Ignored directories are pruned
//! before descent, so their contents are never visited or counted. Within a
//! directory, files are recorded in OS listing order (not sorted), then each
//! surviving subdirectory is entered in listing order.
//!
//! Line counts for text-classified files come from a strict UTF-8 read at
//! structure-pass time; binary-classified files get `lines = 0` without a
//! content read. The content pass (repoflat-content) re-reads files fresh
//! but takes the *set* of included paths from this manifest, never from a
//! second traversal.
//!
//! ## What belongs here
//! * Traversal and pruning
//! * Structure-record creation (size, line count)
//!
//! ## What does NOT belong here
//! * Ignore decisions (use repoflat-ignore)
//! * Content emission (use repoflat-content)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use repoflat_classify::is_text;
use repoflat_ignore::IgnorePolicy;
use repoflat_path::manifest_key;
use repoflat_types::{FileEntry, Manifest};

/// Walk `root` and build the manifest of every non-ignored file.
///
/// Recoverable per-file problems (unreadable entries, undecodable text
/// files) push onto `warnings` and the walk continues; only a failure to
/// read the root directory itself is an error.
pub fn build_manifest(
    root: &Path,
    policy: &IgnorePolicy,
    warnings: &mut Vec<String>,
) -> Result<Manifest> {
    let mut manifest = Manifest::new();
    walk_dir(root, root, policy, &mut manifest, warnings, true)?;
    Ok(manifest)
}

fn walk_dir(
    root: &Path,
    dir: &Path,
    policy: &IgnorePolicy,
    manifest: &mut Manifest,
    warnings: &mut Vec<String>,
    is_root: bool,
) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if is_root => {
            return Err(err)
                .with_context(|| format!("Failed to read input directory {}", dir.display()));
        }
        Err(err) => {
            warnings.push(format!("Could not read directory {}: {err}", dir.display()));
            return Ok(());
        }
    };

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warnings.push(format!("Could not list entry in {}: {err}", dir.display()));
                continue;
            }
        };
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            warnings.push(format!("Could not stat {}", path.display()));
            continue;
        };

        if file_type.is_dir() {
            // Prune before descent: an ignored directory's contents are
            // never visited, not even indirectly.
            if !policy.should_ignore(&path) {
                subdirs.push(path);
            }
        } else if file_type.is_file() && !policy.should_ignore(&path) {
            record_file(root, &path, manifest, warnings);
        }
    }

    for subdir in subdirs {
        walk_dir(root, &subdir, policy, manifest, warnings, false)?;
    }
    Ok(())
}

fn record_file(root: &Path, path: &Path, manifest: &mut Manifest, warnings: &mut Vec<String>) {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let key = manifest_key(rel);

    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            warnings.push(format!("Could not stat {key}: {err}"));
            return;
        }
    };

    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let lines = if is_text(name) {
        count_lines(path, &key, warnings)
    } else {
        0
    };

    manifest.push(FileEntry {
        path: key,
        size,
        lines,
    });
}

/// Strict UTF-8 line count. A read or decode failure is a warning and the
/// count defaults to 0; the entry still lands in the manifest.
fn count_lines(path: &Path, key: &str, warnings: &mut Vec<String>) -> u64 {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().count() as u64,
        Err(err) => {
            warnings.push(format!("Could not count lines in {key}: {err}"));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repoflat_ignore::NullOracle;
    use std::fs;

    fn policy(root: &Path, ignored_dirs: &[&str]) -> IgnorePolicy {
        let dirs: Vec<String> = ignored_dirs.iter().map(|s| s.to_string()).collect();
        IgnorePolicy::new(root, &dirs, true, Box::new(NullOracle))
    }

    fn paths(manifest: &Manifest) -> Vec<&str> {
        manifest.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn records_text_file_with_size_and_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "one\ntwo\nthree\n").unwrap();
        let mut warnings = Vec::new();
        let manifest = build_manifest(dir.path(), &policy(dir.path(), &[]), &mut warnings).unwrap();

        let entry = manifest.get("a.py").unwrap();
        assert_eq!(entry.size, 14);
        assert_eq!(entry.lines, 3);
        assert!(warnings.is_empty());
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.txt"), "one\ntwo\nthree").unwrap();
        let mut warnings = Vec::new();
        let manifest = build_manifest(dir.path(), &policy(dir.path(), &[]), &mut warnings).unwrap();
        assert_eq!(manifest.get("x.txt").unwrap().lines, 3);
    }

    #[test]
    fn binary_file_recorded_with_zero_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.bin"), [0u8, 159, 146, 150, 1, 2, 3, 4, 5, 6]).unwrap();
        let mut warnings = Vec::new();
        let manifest = build_manifest(dir.path(), &policy(dir.path(), &[]), &mut warnings).unwrap();

        let entry = manifest.get("b.bin").unwrap();
        assert_eq!(entry.size, 10);
        assert_eq!(entry.lines, 0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn ignored_directory_is_never_entered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        fs::create_dir_all(dir.path().join("node_modules/deep")).unwrap();
        fs::write(dir.path().join("node_modules/x.js"), "x\n").unwrap();
        fs::write(dir.path().join("node_modules/deep/y.js"), "y\n").unwrap();

        let mut warnings = Vec::new();
        let manifest = build_manifest(
            dir.path(),
            &policy(dir.path(), &["node_modules"]),
            &mut warnings,
        )
        .unwrap();

        assert_eq!(paths(&manifest), ["a.py"]);
    }

    #[test]
    fn lock_files_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.lock"), "[[package]]\n").unwrap();
        fs::write(dir.path().join("flake.lock"), "{}\n").unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();

        let mut warnings = Vec::new();
        let manifest = build_manifest(dir.path(), &policy(dir.path(), &[]), &mut warnings).unwrap();
        assert_eq!(paths(&manifest), ["main.rs"]);
    }

    #[test]
    fn nested_keys_use_forward_slashes() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/bin")).unwrap();
        fs::write(dir.path().join("src/bin/main.rs"), "fn main() {}\n").unwrap();

        let mut warnings = Vec::new();
        let manifest = build_manifest(dir.path(), &policy(dir.path(), &[]), &mut warnings).unwrap();
        assert!(manifest.get("src/bin/main.rs").is_some());
    }

    #[test]
    fn undecodable_text_file_counts_zero_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        // .txt classifies as text, but the bytes are not valid UTF-8
        fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let mut warnings = Vec::new();
        let manifest = build_manifest(dir.path(), &policy(dir.path(), &[]), &mut warnings).unwrap();

        let entry = manifest.get("bad.txt").unwrap();
        assert_eq!(entry.lines, 0);
        assert_eq!(entry.size, 4);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("bad.txt"));
    }

    #[test]
    fn root_files_come_before_subdirectory_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("root.md"), "r\n").unwrap();
        fs::write(dir.path().join("sub/inner.md"), "i\n").unwrap();

        let mut warnings = Vec::new();
        let manifest = build_manifest(dir.path(), &policy(dir.path(), &[]), &mut warnings).unwrap();
        let order = paths(&manifest);
        let root_pos = order.iter().position(|p| *p == "root.md").unwrap();
        let inner_pos = order.iter().position(|p| *p == "sub/inner.md").unwrap();
        assert!(root_pos < inner_pos);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        let mut warnings = Vec::new();
        let result = build_manifest(&gone, &policy(&gone, &[]), &mut warnings);
        assert!(result.is_err());
    }
}
