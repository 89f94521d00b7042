//! Export constants and default presets.

use betcode_io_xlsx::EnumColumnKind;
use chrono::Locale;

use crate::spec::EnumExportColumn;

/// Number of columns in every export table.
pub const N_EXPORT_COLUMNS: usize = 6;
/// Largest integer id magnitude an `f64` cell represents exactly (2^53).
pub const N_ID_EXACT_NUMBER_MAX: u64 = 1 << 53;

/// Base file name used when the caller supplies none.
pub const C_BASE_NAME_DEFAULT: &str = "BetCodes";
/// Output file extension (without dot).
pub const C_FILE_EXTENSION: &str = "xlsx";
/// Date stamp appended to the file name (`dd-MM-yyyy`).
pub const C_FILE_DATE_PATTERN: &str = "%d-%m-%Y";
/// Replacement for characters that are illegal in file names.
pub const C_FILE_NAME_REPLACEMENT: char = '_';

/// Display pattern for the creation time column (`HH:mm - dd/MM/yyyy`).
pub const C_DISPLAY_DATE_PATTERN: &str = "%H:%M - %d/%m/%Y";
/// Locale passed to the date formatter.
pub const C_DISPLAY_LOCALE: Locale = Locale::vi_VN;
/// Offset that offset-aware timestamps are shown in (UTC+07:00).
pub const N_DISPLAY_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// Worksheet name used by the XLSX encoder.
pub const C_SHEET_NAME_DEFAULT: &str = "BetCodes";

pub const C_LABEL_PENDING: &str = "awaiting processing";
pub const C_LABEL_VERIFIED: &str = "reconciled";
pub const C_LABEL_DELETED: &str = "removed";
pub const C_LABEL_UNRECOGNIZED: &str = "unrecognized";

/// Column order, header, preferred pixel width and presentation class.
pub const TUP_COLUMN_LAYOUT: [(EnumExportColumn, &str, u16, EnumColumnKind); N_EXPORT_COLUMNS] = [
    (EnumExportColumn::Id, "ID", 80, EnumColumnKind::Integer),
    (EnumExportColumn::Content, "Content", 240, EnumColumnKind::Text),
    (
        EnumExportColumn::StakeAmount,
        "Stake Amount",
        140,
        EnumColumnKind::Amount,
    ),
    (
        EnumExportColumn::PotentialWinning,
        "Potential Winning",
        160,
        EnumColumnKind::Amount,
    ),
    (EnumExportColumn::CreatedAt, "Created At", 160, EnumColumnKind::Text),
    (EnumExportColumn::Status, "Status", 180, EnumColumnKind::Text),
];
