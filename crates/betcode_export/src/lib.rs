//! `betcode_export` v1:
//! Bet code records to a downloadable XLSX review file.
//!
//! Modules:
//! - `conf`     : constants, labels and column layout presets
//! - `spec`     : records, export table, request/report, options
//! - `error`    : error taxonomy
//! - `status`   : status label resolution
//! - `row`      : record to row mapping, date formatter seam
//! - `layout`   : column order, headers and widths
//! - `naming`   : output file naming, clock seam
//! - `encoder`  : encoder seam and the XLSX encoder
//! - `pipeline` : export orchestration
pub mod conf;
pub mod encoder;
pub mod error;
pub mod layout;
pub mod naming;
pub mod pipeline;
pub mod row;
pub mod spec;
pub mod status;

pub use conf::{C_BASE_NAME_DEFAULT, N_EXPORT_COLUMNS};
pub use encoder::{
    EnumFileConflictStrategy, SpecEncodeOutcome, SpecXlsxEncoderOptions, TableEncoder,
    XlsxTableEncoder,
};
pub use error::{EncodeError, ExportError, FormatError, RowMappingError};
pub use layout::derive_column_layout;
pub use naming::{Clock, FixedClock, SystemClock, derive_export_file_name};
pub use pipeline::ExportPipeline;
pub use row::{ChronoDateFormatter, DateFormatter, derive_export_row};
pub use spec::{
    EnumBetCodeId, EnumBetCodeStatus, EnumExportColumn, EnumTimestamp, SpecBetCodeRecord,
    SpecColumnSpec, SpecExportOptions, SpecExportReport, SpecExportRequest, SpecExportRow,
    SpecExportTable, SpecStatusLabels,
};
pub use status::{derive_status_label, derive_status_label_from_code};
