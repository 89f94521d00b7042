//! Shared XLSX specification models.

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Horizontal cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumCellAlign {
    Left,
    Center,
    Right,
}

/// Cell format specification.
///
/// Every field is optional so that presets can be layered with [`Self::with_`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<u16>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<EnumCellAlign>,
    /// Vertically centered text.
    pub if_vcenter: Option<bool>,
    /// Thin border on all sides.
    pub if_border: Option<bool>,
    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill as `0xRRGGBB`.
    pub bg_rgb: Option<u32>,
}

impl SpecCellFormat {
    /// Overlay `patch` onto `self`; `Some` fields of `patch` win.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: patch.font_name.or_else(|| self.font_name.clone()),
            font_size: patch.font_size.or(self.font_size),
            bold: patch.bold.or(self.bold),
            align: patch.align.or(self.align),
            if_vcenter: patch.if_vcenter.or(self.if_vcenter),
            if_border: patch.if_border.or(self.if_border),
            num_format: patch.num_format.or_else(|| self.num_format.clone()),
            bg_rgb: patch.bg_rgb.or(self.bg_rgb),
        }
    }
}

/// Named format presets, one per [`EnumColumnKind`] plus the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxFormatPresets {
    /// Generic text cell format.
    pub text: SpecCellFormat,
    /// Integer number format.
    pub integer: SpecCellFormat,
    /// Currency-like amount format.
    pub amount: SpecCellFormat,
    /// Header cell format.
    pub header: SpecCellFormat,
}

impl Default for SpecXlsxFormatPresets {
    fn default() -> Self {
        crate::conf::derive_default_xlsx_formats()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellAndColumnSpecification

/// Normalized cell value handed to the writer. Empty text is written blank.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Presentation class of a column; selects the body format preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumColumnKind {
    /// Free text.
    #[default]
    Text,
    /// Whole numbers (identifiers, counters).
    Integer,
    /// Currency-like amounts with thousands separators.
    Amount,
}

/// One column of a sheet: header text, presentation class and pixel width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxColumn {
    /// Header row text.
    pub header: String,
    /// Body format class.
    pub kind: EnumColumnKind,
    /// Display width in pixels.
    pub width_px: u16,
}

impl SpecXlsxColumn {
    pub fn new(header: impl Into<String>, kind: EnumColumnKind, width_px: u16) -> Self {
        Self {
            header: header.into(),
            kind,
            width_px,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Per-sheet call options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxSheetWriteOptions {
    /// Freeze the header row so it stays visible while scrolling.
    pub if_freeze_header: bool,
    /// Number format override for [`EnumColumnKind::Amount`] columns.
    pub amount_num_format: Option<String>,
}

impl Default for SpecXlsxSheetWriteOptions {
    fn default() -> Self {
        Self {
            if_freeze_header: true,
            amount_num_format: None,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Sheet write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheet name as written.
    pub sheet_name: String,
    /// Number of body rows written (header excluded).
    pub n_rows: usize,
    /// Number of columns written.
    pub n_cols: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
