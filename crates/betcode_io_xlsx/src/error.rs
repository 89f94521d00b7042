//! Error types for the XLSX writer kernel.

use thiserror::Error;

/// Errors raised while building a workbook.
#[derive(Debug, Error)]
pub enum XlsxWriteError {
    /// Sheet declares no columns.
    #[error("sheet '{sheet_name}' has no columns")]
    NoColumns { sheet_name: String },

    /// A body row does not have one cell per declared column.
    #[error("row {row} has {actual} cells; expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Table does not fit in one worksheet.
    #[error("table of {n_rows} rows x {n_cols} columns exceeds the Excel worksheet limit")]
    SheetTooLarge { n_rows: usize, n_cols: usize },

    /// Row or column index cannot be represented in the Excel grid.
    #[error("{axis} index overflow: {value}")]
    IndexOverflow { axis: &'static str, value: usize },

    /// Underlying `rust_xlsxwriter` failure.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
