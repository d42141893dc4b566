//! The `reconcile` command: derive a baseline from an adjusted record and
//! its adjustments, and report cells that could not have been real counts.

use crate::config::NcdreconConfig;
use crate::io::{self, create_writer, OutputFormat};
use crate::reconcile::{derive_baseline, resolve_status_order};
use crate::report::{ReconcileReport, Report, ReportMetadata};
use anyhow::Result;
use std::path::PathBuf;

pub struct ReconcileOptions {
    pub adjusted: PathBuf,
    pub adjustments: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub settings: NcdreconConfig,
}

/// Run reconciliation. Returns whether the command passed: a dirty baseline
/// only fails the run under `--strict` (or `strict` in config).
pub fn run(options: ReconcileOptions) -> Result<bool> {
    let adjusted = io::read_block(&options.adjusted)?;
    let adjustments = options
        .adjustments
        .as_deref()
        .map(io::read_block)
        .transpose()?;

    let result = derive_baseline(
        &adjusted,
        adjustments.as_ref(),
        options.settings.category_order(),
        options.settings.status_order(),
    );

    let mut inputs = vec![options.adjusted.display().to_string()];
    if let Some(path) = &options.adjustments {
        inputs.push(path.display().to_string());
    }

    let is_clean = result.is_clean();
    if !is_clean {
        log::warn!(
            "{} baseline cell(s) went negative",
            result.invalid_entries.len()
        );
    }

    let report = Report::Reconcile(ReconcileReport {
        metadata: ReportMetadata::now(inputs),
        statuses: resolve_status_order(options.settings.status_order()),
        baseline: result.baseline,
        invalid_entries: result.invalid_entries,
        is_clean,
    });

    let mut writer = create_writer(options.format, options.output.as_deref())?;
    writer.write_report(&report)?;

    let strict = options.strict || options.settings.strict;
    Ok(is_clean || !strict)
}
