//! Record to export-row mapping and the date formatter seam.

use std::fmt::Write;

use betcode_io_xlsx::EnumCellValue;
use chrono::format::{Item, StrftimeItems};
use chrono::{Locale, NaiveDateTime};

use crate::conf::N_ID_EXACT_NUMBER_MAX;
use crate::error::{FormatError, RowMappingError};
use crate::spec::{EnumBetCodeId, SpecBetCodeRecord, SpecExportOptions, SpecExportRow};
use crate::status::derive_status_label;

////////////////////////////////////////////////////////////////////////////////
// #region DateFormatter

/// Locale-aware timestamp formatter.
pub trait DateFormatter {
    /// Render `timestamp` with `pattern` (`strftime` syntax) in `locale`.
    fn format(
        &self,
        timestamp: &NaiveDateTime,
        pattern: &str,
        locale: Locale,
    ) -> Result<String, FormatError>;
}

impl<T: DateFormatter + ?Sized> DateFormatter for &T {
    fn format(
        &self,
        timestamp: &NaiveDateTime,
        pattern: &str,
        locale: Locale,
    ) -> Result<String, FormatError> {
        (**self).format(timestamp, pattern, locale)
    }
}

/// `chrono`-backed formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateFormatter;

impl DateFormatter for ChronoDateFormatter {
    fn format(
        &self,
        timestamp: &NaiveDateTime,
        pattern: &str,
        locale: Locale,
    ) -> Result<String, FormatError> {
        if StrftimeItems::new_with_locale(pattern, locale).any(|item| matches!(item, Item::Error))
        {
            return Err(FormatError::InvalidPattern(pattern.to_string()));
        }

        // Wall-clock value: formatting through UTC leaves the fields untouched.
        let mut c_out = String::new();
        write!(
            c_out,
            "{}",
            timestamp.and_utc().format_localized(pattern, locale)
        )
        .map_err(|_| FormatError::InvalidPattern(pattern.to_string()))?;
        Ok(c_out)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowMapping

/// Convert one record into a fixed-schema export row.
///
/// Missing amounts become `0`. A missing timestamp or a formatter failure is
/// returned as an error; callers decide whether to abort.
pub fn derive_export_row<F>(
    record: &SpecBetCodeRecord,
    formatter: &F,
    options: &SpecExportOptions,
) -> Result<SpecExportRow, RowMappingError>
where
    F: DateFormatter + ?Sized,
{
    let value_id = derive_id_cell(&record.id);
    let n_stake = derive_amount(record.stake_amount, "stakeAmount")?;
    let n_winning = derive_amount(record.potential_winning, "potentialWinning")?;

    let created_at = record
        .created_at
        .ok_or(RowMappingError::MissingTimestamp)?
        .to_wall_clock(options.display_offset);
    let c_created_at = formatter.format(&created_at, &options.date_pattern, options.locale)?;

    let c_status = derive_status_label(record.status, &options.status_labels);

    Ok(SpecExportRow::new([
        value_id,
        EnumCellValue::String(record.content.clone()),
        EnumCellValue::Number(n_stake),
        EnumCellValue::Number(n_winning),
        EnumCellValue::String(c_created_at),
        EnumCellValue::String(c_status.to_string()),
    ]))
}

/// Integer ids become number cells while an `f64` holds them exactly.
fn derive_id_cell(id: &EnumBetCodeId) -> EnumCellValue {
    match id {
        EnumBetCodeId::Integer(val) if val.unsigned_abs() <= N_ID_EXACT_NUMBER_MAX => {
            EnumCellValue::Number(*val as f64)
        }
        EnumBetCodeId::Integer(val) => EnumCellValue::String(val.to_string()),
        EnumBetCodeId::Text(val) => EnumCellValue::String(val.clone()),
    }
}

fn derive_amount(value: Option<f64>, field: &'static str) -> Result<f64, RowMappingError> {
    match value {
        None => Ok(0.0),
        Some(val) if val.is_finite() => Ok(val),
        Some(val) => Err(RowMappingError::NonFiniteAmount { field, value: val }),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
