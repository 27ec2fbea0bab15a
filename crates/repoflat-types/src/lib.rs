//! # repoflat-types
//!
//! Core data structures shared by the repoflat crates. This crate contains
//! only data types and Serde definitions.
//!
//! ## What belongs here
//! * Pure data structs (Manifest, FileEntry, Report, Totals)
//! * Serialization/Deserialization derives
//!
//! ## What does NOT belong here
//! * File I/O
//! * Traversal or classification logic
//! * CLI argument parsing

use serde::{Deserialize, Serialize};

/// One included file, recorded during the structure pass.
///
/// `lines` is 0 for binary-classified files; their contents are never read
/// for counting. Entries are immutable once the manifest is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the input root, forward-slash normalized.
    pub path: String,
    /// Raw byte length on storage.
    pub size: u64,
    /// Line count for text-classified files, 0 otherwise.
    pub lines: u64,
}

/// Ordered set of included files. Insertion order is traversal order
/// (pre-order, files in OS listing order within a directory) and every
/// downstream artifact preserves it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub entries: Vec<FileEntry>,
}

impl Manifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.path == path)
    }
}

/// Aggregate totals over the text-classified manifest entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub files: u64,
    pub bytes: u64,
    pub lines: u64,
    /// 0.0 when there are no text files.
    pub avg_bytes: f64,
    /// 0.0 when there are no text files.
    pub avg_lines: f64,
}

/// Ranked views over the manifest, consumed by the report renderer.
/// Built from the in-memory manifest snapshot, never by re-traversal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub by_size: Vec<FileEntry>,
    pub by_lines: Vec<FileEntry>,
    pub totals: Totals,
}
