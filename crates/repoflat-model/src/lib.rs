//! # repoflat-model
//!
//! Deterministic aggregation over a finished manifest. Consumes the
//! in-memory manifest snapshot only: no re-traversal, no file reads, so the
//! report always reflects the structure pass even if files changed since.
//!
//! ## What belongs here
//! * Filtering to text-classified entries
//! * Ranked views and guarded totals
//!
//! ## What does NOT belong here
//! * Rendering (use repoflat-format)
//! * Traversal or I/O

use repoflat_classify::is_text;
use repoflat_path::key_basename;
use repoflat_types::{FileEntry, Manifest, Report, Totals};

/// Default number of rows per ranked table.
pub const DEFAULT_TOP: usize = 20;

/// Build the ranked report views from `manifest`.
///
/// Only text-classified entries participate. Both views are sorted
/// descending (stable, so manifest order breaks ties) and capped at `top`
/// rows; totals cover *all* text entries, not just the visible rows.
/// Averages are 0.0 when there are no text files.
#[must_use]
pub fn build_report(manifest: &Manifest, top: usize) -> Report {
    let text_files: Vec<FileEntry> = manifest
        .iter()
        .filter(|e| is_text(key_basename(&e.path)))
        .cloned()
        .collect();

    let totals = totals_of(&text_files);

    let mut by_size = text_files.clone();
    by_size.sort_by(|a, b| b.size.cmp(&a.size));
    by_size.truncate(top);

    let mut by_lines = text_files;
    by_lines.sort_by(|a, b| b.lines.cmp(&a.lines));
    by_lines.truncate(top);

    Report {
        by_size,
        by_lines,
        totals,
    }
}

fn totals_of(text_files: &[FileEntry]) -> Totals {
    let files = text_files.len() as u64;
    let bytes: u64 = text_files.iter().map(|e| e.size).sum();
    let lines: u64 = text_files.iter().map(|e| e.lines).sum();
    let (avg_bytes, avg_lines) = if files == 0 {
        (0.0, 0.0)
    } else {
        (bytes as f64 / files as f64, lines as f64 / files as f64)
    };
    Totals {
        files,
        bytes,
        lines,
        avg_bytes,
        avg_lines,
    }
}
