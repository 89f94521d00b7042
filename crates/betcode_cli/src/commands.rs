//! Command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use betcode_export::{
    ChronoDateFormatter, ExportPipeline, FixedClock, SpecBetCodeRecord, SpecExportOptions,
    SpecExportReport, SpecExportRequest, SpecXlsxEncoderOptions, XlsxTableEncoder,
};

use crate::cli::ExportArgs;

/// Read a JSON array of bet code records.
pub fn load_records(path: &Path) -> Result<Vec<SpecBetCodeRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read records from {}", path.display()))?;
    let l_records: Vec<SpecBetCodeRecord> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse records from {}", path.display()))?;
    tracing::debug!(n_records = l_records.len(), path = %path.display(), "loaded records");
    Ok(l_records)
}

pub fn derive_encoder_options(args: &ExportArgs) -> SpecXlsxEncoderOptions {
    let mut cfg_encoder = SpecXlsxEncoderOptions::with_dir_out(&args.output_dir);
    if let Some(sheet_name) = &args.sheet_name {
        cfg_encoder.sheet_name = sheet_name.clone();
    }
    cfg_encoder.rule_conflict_file = args.on_conflict.into();
    cfg_encoder
}

/// Load the records file and export it as one workbook.
pub fn run_export(args: &ExportArgs) -> Result<SpecExportReport> {
    let l_records = load_records(&args.records)?;
    let request = SpecExportRequest {
        records: Some(l_records.as_slice()),
        base_name: args.base_name.as_deref(),
    };
    let cfg_encoder = derive_encoder_options(args);

    let report = match args.date {
        Some(date) => ExportPipeline::new(
            ChronoDateFormatter,
            XlsxTableEncoder::new(cfg_encoder),
            FixedClock(date),
            SpecExportOptions::default(),
        )
        .run(&request),
        None => ExportPipeline::xlsx(cfg_encoder).run(&request),
    };
    report.context("bet code export failed")
}
