//! One mapping run from project root to written document
//!
//! `run` strings the library together: fingerprint, detection, saved
//! preferences, questions, scan, render. The caller supplies the prompter
//! and the status printer, so the binary and the tests drive the same path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::configurator::{Prompter, configure};
use crate::fingerprint::fingerprint;
use crate::output::{MarkdownReport, ReportConfig, StatusPrinter, print_json, write_report};
use crate::patterns::PatternRegistry;
use crate::preferences::{self, ReconcileStatus, reconcile};
use crate::tree::{ExclusionFilter, ScanResult, Scanner, SelfExclusion, detect_patterns};
use crate::{OUTPUT_FILE_NAME, PREFERENCE_FILE_NAME};

/// What a run should do, as decided on the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root: PathBuf,
    /// Where to write the document; `Project_Directory.md` in the root when `None`
    pub output: Option<PathBuf>,
    /// Ignore any saved preferences and ask again
    pub reconfigure: bool,
    /// Allow writing the preference file
    pub save: bool,
    /// Print a JSON summary after writing the document
    pub json: bool,
}

impl RunOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: None,
            reconfigure: false,
            save: true,
            json: false,
        }
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub result: ScanResult,
    /// Number of patterns excluded from the map
    pub excluded: usize,
    /// Whether the preference file was written
    pub saved: bool,
}

pub fn run(
    options: &RunOptions,
    prompter: &mut dyn Prompter,
    status: &mut StatusPrinter,
) -> Result<RunOutcome> {
    let root = options
        .root
        .canonicalize()
        .with_context(|| format!("cannot read project root '{}'", options.root.display()))?;
    if !root.is_dir() {
        anyhow::bail!("cannot read project root '{}': not a directory", root.display());
    }

    let output_path = resolve_output(&root, options.output.as_deref())?;
    let own = SelfExclusion::for_root(&root).with_path(output_path.clone());
    let project_hash = fingerprint(&root, &own)
        .with_context(|| format!("cannot read project root '{}'", root.display()))?;
    log::debug!("fingerprint of {}: {}", root.display(), project_hash);

    status.step("Scanning directory structure...")?;
    let detected = detect_patterns(&root, &PatternRegistry::builtin(), &own);
    log::debug!("{} registry patterns present", detected.len());

    let preference_path = root.join(PREFERENCE_FILE_NAME);
    let saved = if options.reconfigure {
        None
    } else {
        preferences::load(&preference_path)
    };
    let reconciliation = reconcile(saved.as_ref(), &detected, &project_hash);
    match reconciliation.status {
        ReconcileStatus::Fresh => {}
        ReconcileStatus::Stale => {
            status.warning("Project structure changed since preferences were saved.")?;
        }
        ReconcileStatus::Current if reconciliation.unresolved.is_empty() => {
            status.info("Using saved preferences")?;
        }
        ReconcileStatus::Current => {
            status.info("New patterns found since preferences were saved")?;
        }
    }

    let reconcile_status = reconciliation.status;
    let configuration = configure(&reconciliation.unresolved, reconciliation.known, prompter)
        .context("cannot read answers")?;

    // A stale file with nothing left to ask is rewritten so it stops being stale
    let refresh = reconcile_status == ReconcileStatus::Stale && configuration.asked == 0;
    let mut saved = false;
    if (configuration.persist || refresh) && options.save {
        match preferences::save(&preference_path, &configuration.decisions, &project_hash) {
            Ok(()) => saved = true,
            Err(e) => {
                log::warn!("could not save {}: {}", preference_path.display(), e);
                status.warning(&format!(
                    "Could not save preferences to {}: {}",
                    preference_path.display(),
                    e
                ))?;
            }
        }
    }

    status.step("Generating directory tree...")?;
    let excluded = configuration.decisions.excluded_count();
    let scanner = Scanner::new(ExclusionFilter::new(&configuration.decisions, own));
    let result = scanner
        .scan(&root)
        .with_context(|| format!("cannot read project root '{}'", root.display()))?;

    let report = MarkdownReport::new(ReportConfig::new(Local::now()));
    write_report(&output_path, &report.render(&result))
        .with_context(|| format!("cannot write '{}'", output_path.display()))?;

    status.success(&format!(
        "Directory structure has been written to {}",
        output_path.display()
    ))?;
    status.info(&format!("Configuration: {} patterns ignored", excluded))?;
    if saved {
        status.info(&format!("Preferences saved to {}", preference_path.display()))?;
    }
    if !result.warnings.is_empty() {
        status.warning(&format!(
            "{} entries could not be read (run with RUST_LOG=warn for details)",
            result.warnings.len()
        ))?;
    }

    if options.json {
        print_json(&result)?;
    }

    Ok(RunOutcome {
        output_path,
        result,
        excluded,
        saved,
    })
}

/// Absolute path of the document to write, with its directory canonicalized
/// so it compares equal to paths produced by the scan.
fn resolve_output(root: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let Some(path) = output else {
        return Ok(root.join(OUTPUT_FILE_NAME));
    };
    let absolute =
        std::path::absolute(path).with_context(|| format!("cannot write '{}'", path.display()))?;
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => Ok(parent.join(name)),
            Err(_) => Ok(absolute.clone()),
        },
        _ => Ok(absolute),
    }
}
