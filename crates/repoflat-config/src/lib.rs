//! # repoflat-config
//!
//! CLI argument definitions (clap) and the `repoflat.toml` configuration
//! file, plus the resolution step that merges both into the immutable
//! [`RunSettings`] consumed by the pipeline.
//!
//! Precedence: a config file value overrides the matching positional CLI
//! value when both are present; an `[actions.<name>]` table overrides the
//! top-level config values in turn. A config file that exists but cannot be
//! parsed is reported as a warning and skipped, never fatal. Missing input
//! or output directories after resolution are a fatal configuration error.
//!
//! ## What belongs here
//! * Clap `Parser` structs
//! * Config file struct definitions (Serde)
//! * CLI/config merging into `RunSettings`
//!
//! ## What does NOT belong here
//! * Traversal, classification, or output writing

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;
use serde::Deserialize;

/// Config file looked for in the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "repoflat.toml";

/// `repoflat` — flatten a directory tree into a structure manifest, a single
/// concatenated text document, and a statistics report.
#[derive(Parser, Debug, Clone)]
#[command(name = "repoflat", version, about, long_about = None)]
pub struct Cli {
    /// The directory to analyze (optional if specified in the config file).
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// The directory where output files are created (optional; defaults to
    /// `.local/repoflat/<input name>` when only INPUT_DIR is given).
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Generate only the structure file, without file contents.
    #[arg(long)]
    pub structure_only: bool,

    /// Include files that are ignored by the version control system.
    #[arg(long)]
    pub include_ignored: bool,

    /// Path to a config file (TOML).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use a predefined action from the config file.
    #[arg(short, long, value_name = "NAME")]
    pub action: Option<String>,
}

/// Top-level `repoflat.toml` schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub ignore_dirs: Vec<String>,
    #[serde(default)]
    pub actions: BTreeMap<String, ActionConfig>,
}

/// An `[actions.<name>]` table: per-action overrides of the base settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// Extends (does not replace) the top-level `ignore_dirs`.
    #[serde(default)]
    pub ignore_dirs: Vec<String>,
    pub include_ignored: Option<bool>,
    pub structure_only: Option<bool>,
}

/// Fully resolved, read-only settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Directory names to skip anywhere under the input root.
    pub ignored_dirs: Vec<String>,
    /// When true, VCS-ignored paths are still included.
    pub include_ignored: bool,
    /// When true, skip the content pass entirely.
    pub structure_only: bool,
}

impl RunSettings {
    /// Basename of the input root, used in every artifact filename.
    #[must_use]
    pub fn root_name(&self) -> String {
        self.input_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string())
    }

    #[must_use]
    pub fn structure_file(&self) -> PathBuf {
        self.output_dir
            .join(format!("structure_{}.toml", self.root_name()))
    }

    #[must_use]
    pub fn flattened_file(&self) -> PathBuf {
        self.output_dir
            .join(format!("flattened_{}.txt", self.root_name()))
    }

    #[must_use]
    pub fn report_file(&self) -> PathBuf {
        self.output_dir
            .join(format!("file_statistics_{}.md", self.root_name()))
    }
}

/// Merge CLI arguments and the (optional) config file into [`RunSettings`].
///
/// Parse failures of an existing config file push a warning and the file is
/// skipped. Missing input/output directories after merging are fatal.
pub fn resolve(cli: &Cli, warnings: &mut Vec<String>) -> Result<RunSettings> {
    let mut input_dir = cli.input_dir.clone();
    let mut output_dir = cli.output_dir.clone();
    let mut ignored_dirs: Vec<String> = Vec::new();
    let mut include_ignored = cli.include_ignored;
    let mut structure_only = cli.structure_only;

    if let Some(config) = load_config(cli.config.as_deref(), warnings) {
        if let Some(dir) = config.input_dir {
            input_dir = Some(dir);
        }
        if let Some(dir) = config.output_dir {
            output_dir = Some(dir);
        }
        ignored_dirs = config.ignore_dirs;

        if let Some(name) = &cli.action {
            match config.actions.get(name) {
                Some(action) => {
                    if let Some(dir) = &action.input_dir {
                        input_dir = Some(dir.clone());
                    }
                    if let Some(dir) = &action.output_dir {
                        output_dir = Some(dir.clone());
                    }
                    ignored_dirs.extend(action.ignore_dirs.iter().cloned());
                    if let Some(value) = action.include_ignored {
                        include_ignored = value;
                    }
                    if let Some(value) = action.structure_only {
                        structure_only = value;
                    }
                }
                None => warnings.push(format!("Action \"{name}\" not found in config file")),
            }
        }
    } else if let Some(name) = &cli.action {
        warnings.push(format!(
            "Action \"{name}\" requested but no config file was loaded"
        ));
    }

    // INPUT_DIR alone gets a standardized local output directory.
    if output_dir.is_none()
        && let Some(input) = &input_dir
        && let Some(name) = input.file_name()
    {
        output_dir = Some(PathBuf::from(".local").join("repoflat").join(name));
    }

    let (Some(input_dir), Some(output_dir)) = (input_dir, output_dir) else {
        bail!("Input and output directories must be specified either via CLI or config file");
    };

    ignored_dirs.sort();
    ignored_dirs.dedup();

    Ok(RunSettings {
        input_dir,
        output_dir,
        ignored_dirs,
        include_ignored,
        structure_only,
    })
}

fn load_config(explicit: Option<&Path>, warnings: &mut Vec<String>) -> Option<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return None;
            }
            default
        }
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            warnings.push(format!(
                "Failed to load config file {}: {err}",
                path.display()
            ));
            return None;
        }
    };
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            warnings.push(format!(
                "Failed to parse config file {}: {err}",
                path.display()
            ));
            None
        }
    }
}
