//! The `validate` command: realism validation of a stored record.

use crate::config::NcdreconConfig;
use crate::io::{self, create_writer, OutputFormat};
use crate::reconcile::{resolve_status_order, validate_realism};
use crate::report::{Report, ReportMetadata, ValidationReport};
use anyhow::Result;
use std::path::PathBuf;

pub struct ValidateOptions {
    pub record: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub settings: NcdreconConfig,
}

pub fn run(options: ValidateOptions) -> Result<bool> {
    let record = io::read_block(&options.record)?;

    let result = validate_realism(
        &record,
        options.settings.category_order(),
        options.settings.status_order(),
    );

    if !result.is_valid {
        log::warn!(
            "{} unrealistic cell(s) in {}",
            result.issues.len(),
            options.record.display()
        );
    }

    let is_valid = result.is_valid;
    let report = Report::Validation(ValidationReport {
        metadata: ReportMetadata::now(vec![options.record.display().to_string()]),
        statuses: resolve_status_order(options.settings.status_order()),
        is_valid,
        issues: result.issues,
    });

    let mut writer = create_writer(options.format, options.output.as_deref())?;
    writer.write_report(&report)?;

    let strict = options.strict || options.settings.strict;
    Ok(is_valid || !strict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_unrealistic_counts() {
        let mut record = tempfile::NamedTempFile::new().unwrap();
        write!(
            record,
            r#"{{"Overview": {{"normal": -1, "risk": 10, "sick": 2}},
               "Alcohol": {{"normal": 5.5, "risk": 1, "sick": 0}}}}"#
        )
        .unwrap();
        let output = tempfile::NamedTempFile::new().unwrap();

        let passed = run(ValidateOptions {
            record: record.path().to_path_buf(),
            format: OutputFormat::Json,
            output: Some(output.path().to_path_buf()),
            strict: true,
            settings: NcdreconConfig::default(),
        })
        .unwrap();
        assert!(!passed);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output.path()).unwrap()).unwrap();
        assert_eq!(value["is_valid"], false);
        assert_eq!(value["issues"].as_array().unwrap().len(), 2);
        assert_eq!(value["issues"][0]["reason"], "negative");
        assert_eq!(value["issues"][1]["reason"], "fractional");
        assert_eq!(value["issues"][1]["value"], 5.5);
    }

    #[test]
    fn clean_record_passes_strict() {
        let mut record = tempfile::NamedTempFile::new().unwrap();
        write!(record, r#"{{"Overview": {{"normal": 3, "risk": 1, "sick": 0}}}}"#).unwrap();
        let output = tempfile::NamedTempFile::new().unwrap();

        let passed = run(ValidateOptions {
            record: record.path().to_path_buf(),
            format: OutputFormat::Json,
            output: Some(output.path().to_path_buf()),
            strict: true,
            settings: NcdreconConfig::default(),
        })
        .unwrap();
        assert!(passed);
    }
}
