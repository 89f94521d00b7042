//! `betcode_io_xlsx` v1:
//! XLSX writer kernel used by the bet code export pipeline.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : cell/column models, options, reports
//! - `error`  : writer error type
//! - `util`   : pure helper functions
//! - `writer` : `rust_xlsxwriter`-backed single-sheet writer
pub mod conf;
pub mod error;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_NUM_FORMAT_AMOUNT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL, TUP_FILE_NAME_ILLEGAL, derive_default_xlsx_formats,
};
pub use error::XlsxWriteError;
pub use spec::{
    EnumCellAlign, EnumCellValue, EnumColumnKind, SpecCellFormat, SpecXlsxColumn,
    SpecXlsxFormatPresets, SpecXlsxReport, SpecXlsxSheetWriteOptions,
};
pub use util::{
    convert_px_to_column_width, derive_unique_name, sanitize_file_name_component,
    sanitize_sheet_name,
};
pub use writer::XlsxWriter;
