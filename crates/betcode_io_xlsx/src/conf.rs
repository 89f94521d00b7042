//! XLSX constants and default preset factories.

use crate::spec::{EnumCellAlign, SpecCellFormat, SpecXlsxFormatPresets};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
/// Characters not allowed in file names on common platforms.
pub const TUP_FILE_NAME_ILLEGAL: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Excel's internal maximum column width, in character units.
pub const N_WIDTH_COLUMN_MAX: f64 = 255.0;
/// Pixel width of one character unit for the default Calibri 11 font.
pub const N_PX_PER_WIDTH_UNIT: f64 = 7.0;
/// Cell padding Excel adds around text, in pixels.
pub const N_PX_COLUMN_PADDING: f64 = 5.0;

/// Number format applied to integer columns.
pub const C_NUM_FORMAT_INTEGER: &str = "0";
/// Number format applied to amount (currency-like) columns.
pub const C_NUM_FORMAT_AMOUNT: &str = "#,##0";

/// Header fill, light steel blue.
pub const N_RGB_HEADER_FILL: u32 = 0xD9E1F2;

/// Build default named format presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_xlsx_formats() -> SpecXlsxFormatPresets {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(11),
        if_border: Some(true),
        align: Some(EnumCellAlign::Left),
        if_vcenter: Some(true),
        ..Default::default()
    };

    SpecXlsxFormatPresets {
        text: cfg_base_fmt_spec.clone(),
        header: cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            align: Some(EnumCellAlign::Center),
            bg_rgb: Some(N_RGB_HEADER_FILL),
            ..Default::default()
        }),
        integer: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some(C_NUM_FORMAT_INTEGER.to_string()),
            align: Some(EnumCellAlign::Right),
            ..Default::default()
        }),
        amount: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some(C_NUM_FORMAT_AMOUNT.to_string()),
            align: Some(EnumCellAlign::Right),
            ..Default::default()
        }),
    }
}
