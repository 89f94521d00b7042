//! Stateless helper utilities used by the XLSX writer kernel.

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_PX_COLUMN_PADDING,
    N_PX_PER_WIDTH_UNIT, N_WIDTH_COLUMN_MAX, TUP_EXCEL_ILLEGAL, TUP_FILE_NAME_ILLEGAL,
};
use crate::error::XlsxWriteError;

////////////////////////////////////////////////////////////////////////////////
// #region NameSanitizing

/// Replace characters Excel rejects in sheet names and clamp to 31 chars.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Replace characters that are not portable in file names.
///
/// Control characters are replaced as well. Leading/trailing whitespace is
/// trimmed; the result may be empty.
pub fn sanitize_file_name_component(name: &str, replace_to: char) -> String {
    name.trim()
        .chars()
        .map(|chr| {
            if chr.is_control() || TUP_FILE_NAME_ILLEGAL.contains(&chr) {
                replace_to
            } else {
                chr
            }
        })
        .collect()
}

/// Return `name` unless taken, else the first free `name__N` (N >= 2).
///
/// The candidate is clamped to `len_max` chars.
pub fn derive_unique_name(
    name: &str,
    len_max: usize,
    is_taken: impl Fn(&str) -> bool,
) -> String {
    if !is_taken(name) {
        return name.to_string();
    }

    let base_name: String = name.chars().take(usize::max(1, len_max.saturating_sub(3))).collect();
    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}").chars().take(len_max).collect();
        if !is_taken(&candidate) {
            return candidate;
        }
        n_idx += 1;
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Validation

/// Reject tables that cannot be written into a single worksheet.
///
/// `n_rows_body` excludes the header row.
pub fn validate_sheet_dimensions(n_rows_body: usize, n_cols: usize) -> Result<(), XlsxWriteError> {
    if n_rows_body + 1 > N_NROWS_EXCEL_MAX || n_cols > N_NCOLS_EXCEL_MAX {
        return Err(XlsxWriteError::SheetTooLarge {
            n_rows: n_rows_body,
            n_cols,
        });
    }
    Ok(())
}

/// Zero-based row index to Excel row number.
pub fn cast_row_num(value: usize) -> Result<u32, XlsxWriteError> {
    u32::try_from(value).map_err(|_| XlsxWriteError::IndexOverflow { axis: "row", value })
}

/// Zero-based column index to Excel column number.
pub fn cast_col_num(value: usize) -> Result<u16, XlsxWriteError> {
    u16::try_from(value).map_err(|_| XlsxWriteError::IndexOverflow {
        axis: "column",
        value,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidth

/// Convert a pixel width into Excel character-unit width.
///
/// Inverse of Excel's `px = width * 7 + 5` (and `px = width * 12` below one unit).
pub fn convert_px_to_column_width(width_px: u16) -> f64 {
    let n_px = f64::from(width_px);
    let n_width = if n_px <= 12.0 {
        n_px / 12.0
    } else {
        (n_px - N_PX_COLUMN_PADDING) / N_PX_PER_WIDTH_UNIT
    };
    n_width.min(N_WIDTH_COLUMN_MAX)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
