//! # repoflat
//!
//! **CLI Binary**
//!
//! Entry point for the `repoflat` command-line application. Orchestrates the
//! other crates: resolve settings, compose the ignore policy, run the
//! structure pass, persist the manifest, render the report, then run the
//! content pass.
//!
//! ## Responsibilities
//! * Parse command line arguments and load configuration
//! * Wire the pipeline stages together in order
//! * Report warnings to stderr and map fatal errors to a non-zero exit
//!
//! This crate should contain minimal business logic.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;

use repoflat_config as config;
use repoflat_content as content;
use repoflat_format as format;
use repoflat_ignore::{GitOracle, IgnorePolicy};
use repoflat_model as model;
use repoflat_walk as walk;

pub fn run() -> Result<()> {
    let cli = config::Cli::parse();
    let mut warnings: Vec<String> = Vec::new();

    let mut settings = config::resolve(&cli, &mut warnings)?;
    settings.input_dir = settings
        .input_dir
        .canonicalize()
        .with_context(|| format!("Input directory {}", settings.input_dir.display()))?;
    if !settings.input_dir.is_dir() {
        bail!("Input path {} is not a directory", settings.input_dir.display());
    }
    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            settings.output_dir.display()
        )
    })?;

    let root = settings.input_dir.clone();
    let policy = IgnorePolicy::new(
        &root,
        &settings.ignored_dirs,
        settings.include_ignored,
        Box::new(GitOracle::new(&root)),
    );

    let structure_file = settings.structure_file();
    let flattened_file = settings.flattened_file();
    let report_file = settings.report_file();

    // Runs are overwrite-idempotent: stale artifacts from a previous run go
    // away before any stage writes.
    for path in [&structure_file, &flattened_file] {
        remove_if_present(path)?;
    }

    // Structure pass: the manifest is the single source of truth for which
    // files are included; every later stage consumes it by reference.
    let manifest = walk::build_manifest(&root, &policy, &mut warnings)?;

    if let Err(err) = format::write_manifest(&structure_file, &manifest) {
        warnings.push(format!("{err:#}"));
    } else {
        println!(
            "Structure file with {} entries written to {}",
            manifest.len(),
            structure_file.display()
        );
    }

    let report = model::build_report(&manifest, model::DEFAULT_TOP);
    if let Err(err) = format::write_report(&report_file, &report, &settings.root_name()) {
        warnings.push(format!("{err:#}"));
    } else {
        println!("Statistics report written to {}", report_file.display());
    }

    if settings.structure_only {
        println!("Structure-only run: skipping file contents");
    } else if let Err(err) = content::write_flattened(&root, &manifest, &flattened_file, &mut warnings)
    {
        warnings.push(format!("{err:#}"));
    } else {
        println!("Flattened content written to {}", flattened_file.display());
    }

    for warning in &warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to remove stale artifact {}", path.display()))
        }
    }
}
