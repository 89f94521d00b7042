//! CLI argument definitions for the bet code exporter.

use std::path::PathBuf;

use betcode_export::EnumFileConflictStrategy;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
    name = "betcode-export",
    version,
    about = "Export bet code records to a dated XLSX review file"
)]
pub struct Cli {
    #[command(flatten)]
    pub export: ExportArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// JSON file holding an array of bet code records.
    #[arg(value_name = "RECORDS_JSON")]
    pub records: PathBuf,

    /// Base name of the output file (default: BetCodes).
    #[arg(long = "base-name", value_name = "NAME")]
    pub base_name: Option<String>,

    /// Directory the workbook is written into.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Worksheet name (default: BetCodes).
    #[arg(long = "sheet-name", value_name = "NAME")]
    pub sheet_name: Option<String>,

    /// What to do when the output file already exists.
    #[arg(long = "on-conflict", value_enum, default_value = "overwrite")]
    pub on_conflict: ConflictArg,

    /// Date used in the file name, as dd-MM-yyyy (default: today).
    #[arg(long = "date", value_name = "DD-MM-YYYY", value_parser = parse_file_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConflictArg {
    Overwrite,
    Error,
    Rename,
}

impl From<ConflictArg> for EnumFileConflictStrategy {
    fn from(value: ConflictArg) -> Self {
        match value {
            ConflictArg::Overwrite => Self::Overwrite,
            ConflictArg::Error => Self::Error,
            ConflictArg::Rename => Self::Rename,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_file_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%d-%m-%Y")
        .map_err(|err| format!("expected dd-MM-yyyy, got {value:?}: {err}"))
}
