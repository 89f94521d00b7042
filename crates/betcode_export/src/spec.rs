//! Bet code data model, export table model and options.

use std::fmt;
use std::path::PathBuf;

use betcode_io_xlsx::{EnumCellValue, EnumColumnKind, SpecXlsxColumn};
use chrono::{DateTime, FixedOffset, Locale, NaiveDateTime, Offset, Utc};
use serde::Deserialize;

use crate::conf::{
    C_BASE_NAME_DEFAULT, C_DISPLAY_DATE_PATTERN, C_DISPLAY_LOCALE, C_LABEL_DELETED,
    C_LABEL_PENDING, C_LABEL_UNRECOGNIZED, C_LABEL_VERIFIED, N_DISPLAY_UTC_OFFSET_SECS,
    N_EXPORT_COLUMNS,
};

////////////////////////////////////////////////////////////////////////////////
// #region BetCodeRecord

/// Record identifier: numeric or free-form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum EnumBetCodeId {
    /// Numeric identifier; exported as a number cell.
    Integer(i64),
    /// Text identifier; exported as a text cell.
    Text(String),
}

impl fmt::Display for EnumBetCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(val) => write!(f, "{val}"),
            Self::Text(val) => write!(f, "{val}"),
        }
    }
}

impl From<i64> for EnumBetCodeId {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for EnumBetCodeId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Bet code lifecycle status.
///
/// Any code outside the known set, including a missing one, deserializes to
/// [`EnumBetCodeStatus::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "Option<String>")]
pub enum EnumBetCodeStatus {
    /// Waiting to be processed.
    Pending,
    /// Checked and reconciled.
    Verified,
    /// Soft-deleted.
    Deleted,
    /// Unknown or missing code.
    #[default]
    Unrecognized,
}

impl EnumBetCodeStatus {
    /// Parse a raw status code, case-insensitively.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Self::Pending,
            "VERIFIED" => Self::Verified,
            "DELETED" => Self::Deleted,
            _ => Self::Unrecognized,
        }
    }
}

impl From<Option<String>> for EnumBetCodeStatus {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map_or(Self::Unrecognized, Self::from_code)
    }
}

impl From<&str> for EnumBetCodeStatus {
    fn from(value: &str) -> Self {
        Self::from_code(value)
    }
}

/// Creation time as sent by the client.
///
/// RFC 3339 values (`2024-01-05T03:30:00.000Z`, `...+07:00`) keep their
/// offset; values without one are wall-clock time already.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnumTimestamp {
    Zoned(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

impl EnumTimestamp {
    /// Wall-clock time at `offset`; local values are returned unchanged.
    pub fn to_wall_clock(self, offset: FixedOffset) -> NaiveDateTime {
        match self {
            Self::Zoned(timestamp) => timestamp.with_timezone(&offset).naive_local(),
            Self::Local(timestamp) => timestamp,
        }
    }
}

impl From<NaiveDateTime> for EnumTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::Local(value)
    }
}

impl From<DateTime<FixedOffset>> for EnumTimestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Zoned(value)
    }
}

/// One bet code as materialized by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecBetCodeRecord {
    /// Identifier, unique within one batch.
    pub id: EnumBetCodeId,
    /// Free-text bet code content.
    #[serde(default)]
    pub content: String,
    /// Stake amount; exported as 0 when absent.
    #[serde(default)]
    pub stake_amount: Option<f64>,
    /// Potential winning amount; exported as 0 when absent.
    #[serde(default)]
    pub potential_winning: Option<f64>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<EnumTimestamp>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: EnumBetCodeStatus,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportTable

/// Fixed export schema; declaration order is column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumExportColumn {
    Id,
    Content,
    StakeAmount,
    PotentialWinning,
    CreatedAt,
    Status,
}

impl EnumExportColumn {
    /// All columns in export order.
    pub const ALL: [EnumExportColumn; N_EXPORT_COLUMNS] = [
        Self::Id,
        Self::Content,
        Self::StakeAmount,
        Self::PotentialWinning,
        Self::CreatedAt,
        Self::Status,
    ];

    /// Zero-based position in the table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable machine key of the column.
    pub fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Content => "content",
            Self::StakeAmount => "stakeAmount",
            Self::PotentialWinning => "potentialWinning",
            Self::CreatedAt => "createdAt",
            Self::Status => "status",
        }
    }
}

/// One exported row: exactly one display value per [`EnumExportColumn`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpecExportRow {
    cells: [EnumCellValue; N_EXPORT_COLUMNS],
}

impl SpecExportRow {
    pub(crate) fn new(cells: [EnumCellValue; N_EXPORT_COLUMNS]) -> Self {
        Self { cells }
    }

    /// Cell for `column`.
    pub fn get(&self, column: EnumExportColumn) -> &EnumCellValue {
        &self.cells[column.index()]
    }

    /// Cells in column order.
    pub fn cells(&self) -> &[EnumCellValue; N_EXPORT_COLUMNS] {
        &self.cells
    }

    /// `(key, value)` pairs in column order.
    pub fn iter_keyed(&self) -> impl Iterator<Item = (&'static str, &EnumCellValue)> {
        EnumExportColumn::ALL
            .into_iter()
            .map(|column| (column.key(), self.get(column)))
    }
}

impl AsRef<[EnumCellValue]> for SpecExportRow {
    fn as_ref(&self) -> &[EnumCellValue] {
        &self.cells
    }
}

/// Column declaration: key, header text and preferred width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecColumnSpec {
    /// Schema column.
    pub column: EnumExportColumn,
    /// Header row label.
    pub header: String,
    /// Preferred display width in pixels.
    pub width_px: u16,
    /// Presentation class (text, integer, amount).
    pub kind: EnumColumnKind,
}

impl SpecColumnSpec {
    /// Machine key of the column.
    pub fn key(&self) -> &'static str {
        self.column.key()
    }
}

impl From<&SpecColumnSpec> for SpecXlsxColumn {
    fn from(spec: &SpecColumnSpec) -> Self {
        SpecXlsxColumn::new(spec.header.clone(), spec.kind, spec.width_px)
    }
}

/// Logical table handed to a [`crate::TableEncoder`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpecExportTable {
    /// Column layout, in schema order.
    pub columns: [SpecColumnSpec; N_EXPORT_COLUMNS],
    /// Body rows in input order.
    pub rows: Vec<SpecExportRow>,
}

impl SpecExportTable {
    /// Number of body rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Header labels in column order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|spec| spec.header.as_str()).collect()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RequestAndReport

/// Input of one export call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecExportRequest<'a> {
    /// Records to export; `None` models an absent list.
    pub records: Option<&'a [SpecBetCodeRecord]>,
    /// Base file name; defaults when `None` or blank.
    pub base_name: Option<&'a str>,
}

impl<'a> SpecExportRequest<'a> {
    pub fn new(records: &'a [SpecBetCodeRecord]) -> Self {
        Self {
            records: Some(records),
            base_name: None,
        }
    }

    pub fn with_base_name(mut self, base_name: &'a str) -> Self {
        self.base_name = Some(base_name);
        self
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecExportReport {
    /// Final file name (after any conflict renaming).
    pub file_name: String,
    /// Delivered file path when the encoder writes to disk.
    pub path: Option<PathBuf>,
    /// Number of exported rows.
    pub n_rows: usize,
    /// Non-fatal warnings from the encoder.
    pub warnings: Vec<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Display labels per status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecStatusLabels {
    pub pending: String,
    pub verified: String,
    pub deleted: String,
    pub unrecognized: String,
}

impl Default for SpecStatusLabels {
    fn default() -> Self {
        Self {
            pending: C_LABEL_PENDING.to_string(),
            verified: C_LABEL_VERIFIED.to_string(),
            deleted: C_LABEL_DELETED.to_string(),
            unrecognized: C_LABEL_UNRECOGNIZED.to_string(),
        }
    }
}

/// Presentation options for the export pipeline.
#[derive(Debug, Clone)]
pub struct SpecExportOptions {
    /// `strftime` pattern for the creation time column.
    pub date_pattern: String,
    /// Locale handed to the date formatter.
    pub locale: Locale,
    /// Offset that offset-aware timestamps are converted to before display.
    pub display_offset: FixedOffset,
    /// Status display labels.
    pub status_labels: SpecStatusLabels,
    /// Header overrides in column order; built-in headers when `None`.
    pub column_headers: Option<[String; N_EXPORT_COLUMNS]>,
    /// Base file name used when the request carries none.
    pub default_base_name: String,
}

impl Default for SpecExportOptions {
    fn default() -> Self {
        Self {
            date_pattern: C_DISPLAY_DATE_PATTERN.to_string(),
            locale: C_DISPLAY_LOCALE,
            display_offset: FixedOffset::east_opt(N_DISPLAY_UTC_OFFSET_SECS)
                .unwrap_or_else(|| Utc.fix()),
            status_labels: SpecStatusLabels::default(),
            column_headers: None,
            default_base_name: C_BASE_NAME_DEFAULT.to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_code_is_case_insensitive() {
        assert_eq!(EnumBetCodeStatus::from_code("PENDING"), EnumBetCodeStatus::Pending);
        assert_eq!(EnumBetCodeStatus::from_code(" verified "), EnumBetCodeStatus::Verified);
        assert_eq!(EnumBetCodeStatus::from_code("Deleted"), EnumBetCodeStatus::Deleted);
        assert_eq!(EnumBetCodeStatus::from_code("ARCHIVED"), EnumBetCodeStatus::Unrecognized);
        assert_eq!(EnumBetCodeStatus::from(None::<String>), EnumBetCodeStatus::Unrecognized);
    }

    #[test]
    fn record_deserializes_from_camel_case_json() {
        let record: SpecBetCodeRecord = serde_json::from_str(
            r#"{"id": 7, "content": "A-B-100", "stakeAmount": 50000,
                "createdAt": "2024-01-05T10:30:00", "status": "VERIFIED"}"#,
        )
        .expect("parse record");

        assert_eq!(record.id, EnumBetCodeId::Integer(7));
        assert_eq!(record.content, "A-B-100");
        assert_eq!(record.stake_amount, Some(50_000.0));
        assert_eq!(record.potential_winning, None);
        assert!(record.created_at.is_some());
        assert_eq!(record.status, EnumBetCodeStatus::Verified);
    }

    #[test]
    fn record_accepts_rfc3339_timestamps_with_offset() {
        let options = SpecExportOptions::default();
        for c_created_at in [
            "2024-01-05T03:30:00.000Z",
            "2024-01-05T03:30:00Z",
            "2024-01-05T10:30:00+07:00",
            "2024-01-04T22:30:00-05:00",
        ] {
            let record: SpecBetCodeRecord = serde_json::from_str(&format!(
                r#"{{"id": 1, "createdAt": "{c_created_at}"}}"#
            ))
            .expect("parse record");
            let created_at = record.created_at.expect("timestamp");
            assert!(matches!(created_at, EnumTimestamp::Zoned(_)), "{c_created_at}");
            assert_eq!(
                created_at.to_wall_clock(options.display_offset).to_string(),
                "2024-01-05 10:30:00",
                "{c_created_at}"
            );
        }
    }

    #[test]
    fn record_keeps_offset_free_timestamps_as_wall_clock() {
        let record: SpecBetCodeRecord =
            serde_json::from_str(r#"{"id": 1, "createdAt": "2024-01-05T10:30:00.500"}"#)
                .expect("parse record");
        let created_at = record.created_at.expect("timestamp");
        assert!(matches!(created_at, EnumTimestamp::Local(_)));
        assert_eq!(
            created_at
                .to_wall_clock(FixedOffset::east_opt(0).expect("offset"))
                .format("%H:%M:%S")
                .to_string(),
            "10:30:00"
        );
    }

    #[test]
    fn record_tolerates_null_and_unknown_status() {
        let record: SpecBetCodeRecord = serde_json::from_str(
            r#"{"id": "BC-9", "stakeAmount": null, "status": null}"#,
        )
        .expect("parse record");
        assert_eq!(record.id, EnumBetCodeId::Text("BC-9".to_string()));
        assert_eq!(record.stake_amount, None);
        assert_eq!(record.created_at, None);
        assert_eq!(record.status, EnumBetCodeStatus::Unrecognized);

        let record: SpecBetCodeRecord =
            serde_json::from_str(r#"{"id": 1, "status": "SETTLED"}"#).expect("parse record");
        assert_eq!(record.status, EnumBetCodeStatus::Unrecognized);
    }

    #[test]
    fn export_columns_are_in_schema_order() {
        for (n_idx, column) in EnumExportColumn::ALL.iter().enumerate() {
            assert_eq!(column.index(), n_idx);
        }
        assert_eq!(EnumExportColumn::Status.key(), "status");
    }
}
