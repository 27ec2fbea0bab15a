//! # repoflat-format
//!
//! Rendering and serialization of the run artifacts: the TOML manifest
//! document and the Markdown statistics report. Documents are rendered by
//! hand into a `String` because the manifest must preserve traversal order
//! section by section, then written in one call.
//!
//! ## What belongs here
//! * Manifest TOML rendering and writing
//! * Report Markdown rendering and writing
//!
//! ## What does NOT belong here
//! * Aggregation (use repoflat-model)
//! * Content emission (use repoflat-content)

use std::path::Path;

use anyhow::{Context, Result};
use repoflat_types::{Manifest, Report};

/// Render the manifest as a TOML document: one `[files."<path>"]` section
/// per entry, in manifest order, with `type`/`size`/`lines` fields.
#[must_use]
pub fn render_manifest(manifest: &Manifest) -> String {
    let mut s = String::from("# File structure\n\n");
    for entry in manifest.iter() {
        s.push_str(&format!("[files.\"{}\"]\n", escape_toml(&entry.path)));
        s.push_str("type = \"file\"\n");
        s.push_str(&format!("size = {}\n", entry.size));
        s.push_str(&format!("lines = {}\n\n", entry.lines));
    }
    s
}

/// Write the manifest document to `path`, replacing any previous content.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    std::fs::write(path, render_manifest(manifest))
        .with_context(|| format!("Failed to write structure file {}", path.display()))
}

/// Render the Markdown statistics report for the input root called `name`.
#[must_use]
pub fn render_report(report: &Report, name: &str) -> String {
    let mut s = String::new();
    s.push_str(&format!("# File Statistics Report for {name}\n\n"));

    s.push_str("## Files Sorted by Size\n\n");
    push_table(&mut s, &report.by_size);
    s.push('\n');

    s.push_str("## Files Sorted by Line Count\n\n");
    push_table(&mut s, &report.by_lines);

    let t = &report.totals;
    s.push_str("\n## Summary\n\n");
    s.push_str(&format!("- Total text files: {}\n", group_thousands(t.files)));
    s.push_str(&format!("- Total size: {} bytes\n", group_thousands(t.bytes)));
    s.push_str(&format!("- Total lines: {}\n", group_thousands(t.lines)));
    s.push_str(&format!(
        "- Average size: {} bytes per file\n",
        format_fixed2(t.avg_bytes)
    ));
    s.push_str(&format!(
        "- Average lines: {} lines per file\n",
        format_fixed2(t.avg_lines)
    ));
    s
}

/// Write the report document to `path`, replacing any previous content.
pub fn write_report(path: &Path, report: &Report, name: &str) -> Result<()> {
    std::fs::write(path, render_report(report, name))
        .with_context(|| format!("Failed to write report file {}", path.display()))
}

fn push_table(s: &mut String, rows: &[repoflat_types::FileEntry]) {
    s.push_str("| Size (bytes)   | Lines        | File |\n");
    s.push_str("|---------------:|-------------:|------|\n");
    for row in rows {
        s.push_str(&format!(
            "| {:>14} | {:>12} | {} |\n",
            group_thousands(row.size),
            group_thousands(row.lines),
            row.path
        ));
    }
}

/// Escape a manifest key for use inside a TOML basic string.
fn escape_toml(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// `1234567` -> `"1,234,567"`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Two decimal places with a thousands-grouped integer part.
fn format_fixed2(v: f64) -> String {
    let fixed = format!("{v:.2}");
    match fixed.split_once('.') {
        Some((int_part, frac)) => {
            let grouped = group_thousands(int_part.parse::<u64>().unwrap_or(0));
            format!("{grouped}.{frac}")
        }
        None => fixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repoflat_types::{FileEntry, Totals};

    fn entry(path: &str, size: u64, lines: u64) -> FileEntry {
        FileEntry {
            path: path.to_string(),
            size,
            lines,
        }
    }

    #[test]
    fn manifest_renders_sections_in_order() {
        let mut m = Manifest::new();
        m.push(entry("b.md", 8, 1));
        m.push(entry("a.py", 18, 3));
        let doc = render_manifest(&m);
        assert_eq!(
            doc,
            "# File structure\n\n\
             [files.\"b.md\"]\ntype = \"file\"\nsize = 8\nlines = 1\n\n\
             [files.\"a.py\"]\ntype = \"file\"\nsize = 18\nlines = 3\n\n"
        );
    }

    #[test]
    fn manifest_escapes_quotes_in_keys() {
        let mut m = Manifest::new();
        m.push(entry("odd\"name.txt", 1, 1));
        let doc = render_manifest(&m);
        assert!(doc.contains("[files.\"odd\\\"name.txt\"]"));
    }

    #[test]
    fn empty_manifest_renders_header_only() {
        let doc = render_manifest(&Manifest::new());
        assert_eq!(doc, "# File structure\n\n");
    }

    #[test]
    fn report_contains_both_tables_and_summary() {
        let report = Report {
            by_size: vec![entry("big.py", 1_234_567, 10)],
            by_lines: vec![entry("big.py", 1_234_567, 10)],
            totals: Totals {
                files: 1,
                bytes: 1_234_567,
                lines: 10,
                avg_bytes: 1_234_567.0,
                avg_lines: 10.0,
            },
        };
        let md = render_report(&report, "proj");
        assert!(md.starts_with("# File Statistics Report for proj\n"));
        assert!(md.contains("## Files Sorted by Size"));
        assert!(md.contains("## Files Sorted by Line Count"));
        assert!(md.contains("1,234,567"));
        assert!(md.contains("- Average size: 1,234,567.00 bytes per file"));
        assert!(md.contains("- Average lines: 10.00 lines per file"));
    }

    #[test]
    fn report_with_no_text_files_renders_zero_averages() {
        let report = Report::default();
        let md = render_report(&report, "empty");
        assert!(md.contains("- Total text files: 0"));
        assert!(md.contains("- Average size: 0.00 bytes per file"));
        assert!(md.contains("- Average lines: 0.00 lines per file"));
    }

    #[test]
    fn group_thousands_groups_from_the_right() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn write_manifest_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("structure.toml");
        std::fs::write(&path, "stale").unwrap();

        let mut m = Manifest::new();
        m.push(entry("a.py", 1, 1));
        write_manifest(&path, &m).unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.starts_with("# File structure"));
        assert!(!doc.contains("stale"));
    }
}
