//! Report writers: JSON for machines, Markdown for docs, terminal for eyes.

use crate::core::MetricsBlock;
use crate::errors::RecordError;
use crate::report::{DiffReport, ReconcileReport, Report, ValidationReport};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

/// Format a count for display: whole numbers without a trailing `.0`,
/// anything else verbatim.
fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_block_table(
        &mut self,
        block: &MetricsBlock,
        statuses: &[String],
    ) -> anyhow::Result<()> {
        write!(self.writer, "| Category |")?;
        for status in statuses {
            write!(self.writer, " {status} |")?;
        }
        writeln!(self.writer)?;

        write!(self.writer, "|----------|")?;
        for _ in statuses {
            write!(self.writer, "------|")?;
        }
        writeln!(self.writer)?;

        for (category, counts) in block.iter() {
            write!(self.writer, "| {category} |")?;
            for status in statuses {
                write!(self.writer, " {} |", format_count(counts.count(status)))?;
            }
            writeln!(self.writer)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_reconcile(&mut self, report: &ReconcileReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Baseline Reconciliation")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Generated: {}", report.metadata.generated_at)?;
        writeln!(self.writer, "Inputs: {}", report.metadata.inputs.join(", "))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "## Derived Baseline")?;
        writeln!(self.writer)?;
        self.write_block_table(&report.baseline, &report.statuses)?;

        if report.is_clean {
            writeln!(self.writer, "No invalid baseline cells.")?;
        } else {
            writeln!(
                self.writer,
                "## Invalid Cells ({})",
                report.invalid_entries.len()
            )?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "| Category | Status | Baseline | Adjusted | Adjustment |"
            )?;
            writeln!(
                self.writer,
                "|----------|--------|----------|----------|------------|"
            )?;
            for entry in &report.invalid_entries {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} | {} |",
                    entry.category,
                    entry.status,
                    format_count(entry.baseline),
                    format_count(entry.adjusted),
                    format_count(entry.adjustment)
                )?;
            }
        }
        Ok(())
    }

    fn write_diff(&mut self, report: &DiffReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Record Diff")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Generated: {}", report.metadata.generated_at)?;
        writeln!(self.writer, "Inputs: {}", report.metadata.inputs.join(", "))?;
        writeln!(self.writer)?;
        self.write_block_table(&report.diff, &report.statuses)?;
        if report.is_empty {
            writeln!(self.writer, "No changes detected.")?;
        }
        Ok(())
    }

    fn write_validation(&mut self, report: &ValidationReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Realism Validation")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Generated: {}", report.metadata.generated_at)?;
        writeln!(self.writer, "Inputs: {}", report.metadata.inputs.join(", "))?;
        writeln!(self.writer)?;
        if report.is_valid {
            writeln!(self.writer, "All counts are realistic.")?;
            return Ok(());
        }

        writeln!(self.writer, "## Issues ({})", report.issues.len())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Category | Status | Value | Reason |")?;
        writeln!(self.writer, "|----------|--------|-------|--------|")?;
        for issue in &report.issues {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                issue.category,
                issue.status,
                format_count(issue.value),
                issue.reason
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Reconcile(inner) => self.write_reconcile(inner),
            Report::Diff(inner) => self.write_diff(inner),
            Report::Validation(inner) => self.write_validation(inner),
        }
    }
}

#[derive(Default)]
pub struct TerminalWriter;

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }

    fn print_block_table(&self, block: &MetricsBlock, statuses: &[String]) {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);

        let mut header = vec![Cell::new("Category")];
        header.extend(statuses.iter().map(Cell::new));
        table.set_header(header);

        for (category, counts) in block.iter() {
            let mut row = vec![category.to_string()];
            row.extend(statuses.iter().map(|status| format_count(counts.count(status))));
            table.add_row(row);
        }
        println!("{table}");
    }

    fn print_reconcile(&self, report: &ReconcileReport) {
        println!("{}", "Baseline Reconciliation".bold().blue());
        self.print_block_table(&report.baseline, &report.statuses);

        if report.is_clean {
            println!("{} baseline is clean", "✓".green());
        } else {
            println!(
                "{} {} invalid baseline cell(s):",
                "✗".red(),
                report.invalid_entries.len()
            );
            for entry in &report.invalid_entries {
                println!(
                    "  {}/{}: baseline {} (adjusted {}, adjustment {})",
                    entry.category.yellow(),
                    entry.status,
                    format_count(entry.baseline).red(),
                    format_count(entry.adjusted),
                    format_count(entry.adjustment)
                );
            }
        }
    }

    fn print_diff(&self, report: &DiffReport) {
        println!("{}", "Record Diff".bold().blue());
        self.print_block_table(&report.diff, &report.statuses);

        if report.is_empty {
            println!("{} no changes", "=".yellow());
        } else {
            println!("{} record contains changes", "Δ".green());
        }
    }

    fn print_validation(&self, report: &ValidationReport) {
        println!("{}", "Realism Validation".bold().blue());
        if report.is_valid {
            println!("{} all counts are realistic", "✓".green());
            return;
        }

        println!("{} {} issue(s):", "✗".red(), report.issues.len());
        for issue in &report.issues {
            println!(
                "  {}/{}: {} is {}",
                issue.category.yellow(),
                issue.status,
                format_count(issue.value).red(),
                issue.reason
            );
        }
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Reconcile(inner) => self.print_reconcile(inner),
            Report::Diff(inner) => self.print_diff(inner),
            Report::Validation(inner) => self.print_validation(inner),
        }
        Ok(())
    }
}

/// Build a writer for the requested format and destination. The terminal
/// writer always renders to stdout; JSON and Markdown honor `destination`.
pub fn create_writer(
    format: OutputFormat,
    destination: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match (format, destination) {
        (OutputFormat::Terminal, _) | (_, None) => Box::new(std::io::stdout()),
        (_, Some(path)) => Box::new(
            std::fs::File::create(path).map_err(|err| RecordError::write(path, err))?,
        ),
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    })
}
