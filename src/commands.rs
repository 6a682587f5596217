//! CLI commands. Wires sources, the import pipeline and the exporter together.
//!
//! Kept out of `main.rs` so integration tests can drive whole runs without
//! spawning the binary.

use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use mri_core::config::Config;
use mri_core::{ExportFormat, ImportResult, ImportSummary, Importer, MappingSpec, ValidationIssue};
use mri_sources::{MappingFile, SourceFormat};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalise a source file and write the canonical export.
    Import(ImportArgs),
    /// Print the auto-detected mapping for a source file.
    Detect(DetectArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Source file (CSV, JSON or XLSX).
    #[arg(long)]
    pub input: PathBuf,

    /// Source format; inferred from the extension when omitted.
    #[arg(long, value_parser = parse_source_format)]
    pub format: Option<SourceFormat>,

    /// Explicit mapping file (JSON). Auto-detects when omitted.
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Source-system label stamped on every row.
    #[arg(long)]
    pub source_name: Option<String>,

    /// Where to write the normalised export.
    #[arg(long)]
    pub output: PathBuf,

    /// Export format; defaults to the configured one.
    #[arg(long, value_parser = parse_export_format)]
    pub output_format: Option<ExportFormat>,

    /// Write the detected mapping, issues and summary as JSON.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exit non-zero when any row was flagged.
    #[arg(long)]
    pub fail_on_issues: bool,
}

#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Source file (CSV, JSON or XLSX).
    #[arg(long)]
    pub input: PathBuf,

    /// Source format; inferred from the extension when omitted.
    #[arg(long, value_parser = parse_source_format)]
    pub format: Option<SourceFormat>,
}

fn parse_source_format(s: &str) -> Result<SourceFormat, String> {
    s.parse().map_err(|e: mri_sources::SourceError| e.to_string())
}

fn parse_export_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: mri_core::Error| e.to_string())
}

/// Everything about an import except the rows themselves.
#[derive(Debug, Serialize)]
pub struct ImportReport<'a> {
    pub summary: ImportSummary,
    pub detected_mapping: &'a MappingSpec,
    pub issues: &'a [ValidationIssue],
}

impl<'a> From<&'a ImportResult> for ImportReport<'a> {
    fn from(result: &'a ImportResult) -> Self {
        Self {
            summary: result.summary(),
            detected_mapping: &result.detected_mapping,
            issues: &result.issues,
        }
    }
}

pub fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Import(args) => {
            let summary = import(&args, config)?;
            println!("{summary} -> {}", args.output.display());
            if args.fail_on_issues && summary.issues > 0 {
                bail!("{} issue(s) found in {} row(s)", summary.issues, summary.flagged);
            }
            Ok(())
        }
        Command::Detect(args) => {
            let mapping = detect(&args)?;
            println!("{}", serde_json::to_string_pretty(&mapping)?);
            Ok(())
        }
    }
}

/// Run one import end to end and return its summary.
pub fn import(args: &ImportArgs, config: &Config) -> anyhow::Result<ImportSummary> {
    let table = mri_sources::read_path(&args.input, args.format)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    if let Some(max) = config.import.max_records {
        if table.records.len() > max {
            bail!(
                "{} has {} records, more than the configured maximum of {max}",
                args.input.display(),
                table.records.len()
            );
        }
    }

    let mapping_file = args
        .mapping
        .as_deref()
        .map(MappingFile::load)
        .transpose()
        .context("failed to load mapping file")?;
    let options = match &mapping_file {
        Some(file) => file.normalize_options(config.import.normalize_options()),
        None => config.import.normalize_options(),
    };
    let source_name = args
        .source_name
        .as_deref()
        .or(config.import.default_source_name.as_deref());

    let result = Importer::new()
        .with_headers(table.headers)
        .with_options(options)
        .run(
            &table.records,
            mapping_file.as_ref().map(|file| &file.mapping),
            source_name,
        )
        .with_context(|| format!("failed to import {}", args.input.display()))?;

    for issue in &result.issues {
        tracing::debug!(%issue, "row flagged");
    }

    let format = args.output_format.unwrap_or(config.export.format);
    let export = mri_core::export_as(&result.rows, format, &config.export.options())?;
    std::fs::write(&args.output, &export.bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    if let Some(report_path) = &args.report {
        let report = ImportReport::from(&result);
        std::fs::write(report_path, serde_json::to_vec_pretty(&report)?)
            .with_context(|| format!("failed to write {}", report_path.display()))?;
    }

    Ok(result.summary())
}

/// Auto-detect the mapping for a source file without importing it.
pub fn detect(args: &DetectArgs) -> anyhow::Result<MappingSpec> {
    let table = mri_sources::read_path(&args.input, args.format)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    Ok(mri_core::resolve(table.headers.as_slice(), None)?)
}
