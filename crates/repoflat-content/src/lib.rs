//! # repoflat-content
//!
//! The content pass: re-reads every text-classified file named by the
//! manifest and appends a delimited block to the single aggregate document,
//! in manifest order. Runs strictly after the manifest has been built and
//! persisted.
//!
//! Content is re-read fresh rather than reused from the structure pass: a
//! file mutated between passes reflects its latest content, while the
//! manifest keeps the structure-pass snapshot. The manifest remains the
//! single source of truth for *which* paths are considered at all.
//!
//! ## What belongs here
//! * Block formatting and aggregate-file writing
//! * Error-tolerant UTF-8 decoding
//!
//! ## What does NOT belong here
//! * Traversal (the manifest decides the path set)
//! * Manifest or report serialization (use repoflat-format)

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use repoflat_classify::is_text;
use repoflat_ignore::WRAPPER_SCRIPT;
use repoflat_path::key_basename;
use repoflat_types::Manifest;

/// Write the aggregate document for `manifest` to `out_path`.
///
/// The output file is created fresh (truncated) at the start, never appended
/// to across runs. Per manifest entry, in order:
/// * skip silently when the path no longer exists as a regular file,
///   when its basename is the wrapper script, or when it is not
///   text-classified;
/// * otherwise read the file, decode as UTF-8 with replacement-character
///   fallback, recount lines from the decoded text, and append a block.
///
/// A read failure for one file pushes a warning and omits that block; the
/// run continues. Partial or garbled bytes are never written: a block is
/// either fully decoded (strictly or via replacement) or absent.
pub fn write_flattened(
    root: &Path,
    manifest: &Manifest,
    out_path: &Path,
    warnings: &mut Vec<String>,
) -> Result<()> {
    let file = File::create(out_path)
        .with_context(|| format!("Failed to create {}", out_path.display()))?;
    let mut out = BufWriter::new(file);

    for entry in manifest.iter() {
        let abs = root.join(&entry.path);
        if !abs.is_file() {
            warnings.push(format!("File does not exist: {}", entry.path));
            continue;
        }
        let name = key_basename(&entry.path);
        if name == WRAPPER_SCRIPT || !is_text(name) {
            continue;
        }

        let text = match read_lossy(&abs) {
            Ok(text) => text,
            Err(err) => {
                warnings.push(format!("Could not read {}: {err}", entry.path));
                continue;
            }
        };
        let lines = text.lines().count();

        write!(out, "<{}> ({} lines)\n{}\n</{}>\n\n", entry.path, lines, text, entry.path)
            .with_context(|| format!("Failed to write block for {}", entry.path))?;
    }

    out.flush()
        .with_context(|| format!("Failed to flush {}", out_path.display()))?;
    Ok(())
}

/// Read a file as UTF-8, replacing invalid sequences instead of failing.
fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}
