//! The `diff` command: before/after deltas between two count records.

use crate::config::NcdreconConfig;
use crate::io::{self, create_writer, OutputFormat};
use crate::reconcile::{compute_diff, is_diff_empty, resolve_status_order};
use crate::report::{DiffReport, Report, ReportMetadata};
use anyhow::Result;
use std::path::PathBuf;

pub struct DiffOptions {
    pub baseline: PathBuf,
    pub proposed: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    /// Fail the run when the diff is empty. This is the client-side gate
    /// that rejects a save representing no actual change.
    pub deny_empty: bool,
    pub settings: NcdreconConfig,
}

pub fn run(options: DiffOptions) -> Result<bool> {
    let baseline = io::read_block(&options.baseline)?;
    let proposed = io::read_block(&options.proposed)?;

    let diff = compute_diff(
        Some(&baseline),
        &proposed,
        options.settings.category_order(),
        options.settings.status_order(),
    );
    let is_empty = is_diff_empty(
        Some(&diff),
        options.settings.category_order(),
        options.settings.status_order(),
    );

    let report = Report::Diff(DiffReport {
        metadata: ReportMetadata::now(vec![
            options.baseline.display().to_string(),
            options.proposed.display().to_string(),
        ]),
        statuses: resolve_status_order(options.settings.status_order()),
        diff,
        is_empty,
    });

    let mut writer = create_writer(options.format, options.output.as_deref())?;
    writer.write_report(&report)?;

    Ok(!(is_empty && options.deny_empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn diff_between_records() {
        let baseline = record_file(r#"{"Overview": {"normal": 90, "risk": 15, "sick": 5}}"#);
        let proposed = record_file(r#"{"Overview": {"normal": 95, "risk": 12, "sick": 6}}"#);
        let output = tempfile::NamedTempFile::new().unwrap();

        let passed = run(DiffOptions {
            baseline: baseline.path().to_path_buf(),
            proposed: proposed.path().to_path_buf(),
            format: OutputFormat::Json,
            output: Some(output.path().to_path_buf()),
            deny_empty: false,
            settings: NcdreconConfig::default(),
        })
        .unwrap();
        assert!(passed);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output.path()).unwrap()).unwrap();
        assert_eq!(value["diff"]["Overview"]["normal"], 5.0);
        assert_eq!(value["diff"]["Overview"]["risk"], -3.0);
        assert_eq!(value["diff"]["Overview"]["sick"], 1.0);
        assert_eq!(value["is_empty"], false);
    }

    #[test]
    fn identical_records_fail_under_deny_empty() {
        let content = r#"{"Overview": {"normal": 10, "risk": 2, "sick": 0}}"#;
        let baseline = record_file(content);
        let proposed = record_file(content);
        let output = tempfile::NamedTempFile::new().unwrap();

        let passed = run(DiffOptions {
            baseline: baseline.path().to_path_buf(),
            proposed: proposed.path().to_path_buf(),
            format: OutputFormat::Json,
            output: Some(output.path().to_path_buf()),
            deny_empty: true,
            settings: NcdreconConfig::default(),
        })
        .unwrap();
        assert!(!passed);
    }
}
