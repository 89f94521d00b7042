//! Single-sheet XLSX writer: header row plus body grid, serialized in memory.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::error::XlsxWriteError;
use crate::spec::{
    EnumCellAlign, EnumCellValue, EnumColumnKind, SpecCellFormat, SpecXlsxColumn,
    SpecXlsxFormatPresets, SpecXlsxReport, SpecXlsxSheetWriteOptions,
};
use crate::util::{
    cast_col_num, cast_row_num, convert_px_to_column_width, sanitize_sheet_name,
    validate_sheet_dimensions,
};

/// Workbook writer producing exactly one worksheet.
///
/// Nothing touches the filesystem; [`Self::write_sheet`] consumes the writer
/// and returns the serialized xlsx bytes.
pub struct XlsxWriter {
    workbook: Workbook,
    formats: SpecXlsxFormatPresets,
}

impl XlsxWriter {
    pub fn new(formats: SpecXlsxFormatPresets) -> Self {
        Self {
            workbook: Workbook::new(),
            formats,
        }
    }

    /// Write a single header row from `columns`, then `rows`, and serialize.
    ///
    /// Every row must carry exactly one cell per column.
    pub fn write_sheet<R>(
        mut self,
        sheet_name: &str,
        columns: &[SpecXlsxColumn],
        rows: &[R],
        options: &SpecXlsxSheetWriteOptions,
    ) -> Result<(Vec<u8>, SpecXlsxReport), XlsxWriteError>
    where
        R: AsRef<[EnumCellValue]>,
    {
        if columns.is_empty() {
            return Err(XlsxWriteError::NoColumns {
                sheet_name: sheet_name.to_string(),
            });
        }
        validate_sheet_dimensions(rows.len(), columns.len())?;
        if let Some((n_idx_row, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != columns.len())
        {
            return Err(XlsxWriteError::RowWidthMismatch {
                row: n_idx_row,
                expected: columns.len(),
                actual: row.as_ref().len(),
            });
        }

        let mut report = SpecXlsxReport {
            sheet_name: sanitize_sheet_name(sheet_name, "_"),
            n_rows: rows.len(),
            n_cols: columns.len(),
            ..Default::default()
        };
        if report.sheet_name != sheet_name {
            report.warn(format!(
                "Sheet name '{sheet_name}' was sanitized to '{}'.",
                report.sheet_name
            ));
        }

        let fmt_header = derive_rust_xlsx_format(&self.formats.header);
        let l_fmt_body: Vec<Format> = columns
            .iter()
            .map(|column| {
                derive_rust_xlsx_format(&derive_body_format(
                    &self.formats,
                    column.kind,
                    options.amount_num_format.as_deref(),
                ))
            })
            .collect();

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&report.sheet_name)?;

        for (n_idx_col, column) in columns.iter().enumerate() {
            let n_col = cast_col_num(n_idx_col)?;
            worksheet.write_string_with_format(0, n_col, &column.header, &fmt_header)?;
            worksheet.set_column_width(n_col, convert_px_to_column_width(column.width_px))?;
        }
        for (n_idx_row, row) in rows.iter().enumerate() {
            let n_row = cast_row_num(n_idx_row + 1)?;
            for ((n_idx_col, value), fmt_body) in row.as_ref().iter().enumerate().zip(&l_fmt_body) {
                write_body_cell(worksheet, n_row, cast_col_num(n_idx_col)?, value, fmt_body)?;
            }
        }
        if options.if_freeze_header {
            worksheet.set_freeze_panes(1, 0)?;
        }

        let v_bytes = self.workbook.save_to_buffer()?;
        tracing::debug!(
            sheet = %report.sheet_name,
            rows = report.n_rows,
            cols = report.n_cols,
            n_bytes = v_bytes.len(),
            "sheet written"
        );
        Ok((v_bytes, report))
    }
}

/// Select the body preset for a column kind, applying an amount override.
pub fn derive_body_format(
    formats: &SpecXlsxFormatPresets,
    kind: EnumColumnKind,
    amount_num_format: Option<&str>,
) -> SpecCellFormat {
    match kind {
        EnumColumnKind::Text => formats.text.clone(),
        EnumColumnKind::Integer => formats.integer.clone(),
        EnumColumnKind::Amount => match amount_num_format {
            Some(num_format) => formats.amount.with_(SpecCellFormat {
                num_format: Some(num_format.to_string()),
                ..Default::default()
            }),
            None => formats.amount.clone(),
        },
    }
}

fn write_body_cell(
    worksheet: &mut Worksheet,
    n_row: u32,
    n_col: u16,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), XlsxWriteError> {
    match value {
        EnumCellValue::String(text) if text.is_empty() => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(text) => {
            worksheet.write_string_with_format(n_row, n_col, text, format)?;
        }
        EnumCellValue::Number(number) => {
            worksheet.write_number_with_format(n_row, n_col, *number, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();
    if let Some(font_name) = &spec.font_name {
        format = format.set_font_name(font_name);
    }
    if let Some(n_size) = spec.font_size {
        format = format.set_font_size(n_size);
    }
    if spec.bold == Some(true) {
        format = format.set_bold();
    }
    if let Some(align) = spec.align {
        format = format.set_align(match align {
            EnumCellAlign::Left => FormatAlign::Left,
            EnumCellAlign::Center => FormatAlign::Center,
            EnumCellAlign::Right => FormatAlign::Right,
        });
    }
    if spec.if_vcenter == Some(true) {
        format = format.set_align(FormatAlign::VerticalCenter);
    }
    if spec.if_border == Some(true) {
        format = format.set_border(FormatBorder::Thin);
    }
    if let Some(num_format) = &spec.num_format {
        format = format.set_num_format(num_format);
    }
    if let Some(n_rgb) = spec.bg_rgb {
        format = format.set_background_color(Color::RGB(n_rgb));
    }
    format
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::{C_NUM_FORMAT_AMOUNT, derive_default_xlsx_formats};

    fn columns() -> Vec<SpecXlsxColumn> {
        vec![
            SpecXlsxColumn::new("ID", EnumColumnKind::Integer, 80),
            SpecXlsxColumn::new("Name", EnumColumnKind::Text, 120),
            SpecXlsxColumn::new("Amount", EnumColumnKind::Amount, 140),
        ]
    }

    fn rows() -> Vec<Vec<EnumCellValue>> {
        vec![
            vec![1.0.into(), "alpha".to_string().into(), 50_000.0.into()],
            vec![2.0.into(), String::new().into(), 0.0.into()],
        ]
    }

    #[test]
    fn write_sheet_returns_zip_bytes_and_report() {
        let (v_bytes, report) = XlsxWriter::new(derive_default_xlsx_formats())
            .write_sheet("Data", &columns(), &rows(), &SpecXlsxSheetWriteOptions::default())
            .expect("write sheet");

        assert!(v_bytes.starts_with(b"PK"));
        assert_eq!(report.sheet_name, "Data");
        assert_eq!(report.n_rows, 2);
        assert_eq!(report.n_cols, 3);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn write_sheet_rejects_ragged_rows() {
        let l_rows = vec![vec![EnumCellValue::from(1.0)]];
        let err = XlsxWriter::new(derive_default_xlsx_formats())
            .write_sheet("Data", &columns(), &l_rows, &SpecXlsxSheetWriteOptions::default())
            .expect_err("ragged row must fail");
        assert!(matches!(
            err,
            XlsxWriteError::RowWidthMismatch {
                row: 0,
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn write_sheet_rejects_empty_columns() {
        let l_rows: Vec<Vec<EnumCellValue>> = vec![];
        assert!(matches!(
            XlsxWriter::new(derive_default_xlsx_formats()).write_sheet(
                "Data",
                &[],
                &l_rows,
                &SpecXlsxSheetWriteOptions::default()
            ),
            Err(XlsxWriteError::NoColumns { .. })
        ));
    }

    #[test]
    fn write_sheet_sanitizes_sheet_name_with_warning() {
        let (_, report) = XlsxWriter::new(derive_default_xlsx_formats())
            .write_sheet("a/b", &columns(), &rows(), &SpecXlsxSheetWriteOptions::default())
            .expect("write sheet");
        assert_eq!(report.sheet_name, "a_b");
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn derive_body_format_applies_amount_override() {
        let formats = derive_default_xlsx_formats();
        let fmt_default = derive_body_format(&formats, EnumColumnKind::Amount, None);
        assert_eq!(fmt_default.num_format.as_deref(), Some(C_NUM_FORMAT_AMOUNT));

        let fmt_override = derive_body_format(&formats, EnumColumnKind::Amount, Some("#,##0.00"));
        assert_eq!(fmt_override.num_format.as_deref(), Some("#,##0.00"));
        assert_eq!(fmt_override.font_name, formats.amount.font_name);

        let fmt_text = derive_body_format(&formats, EnumColumnKind::Text, Some("#,##0.00"));
        assert_eq!(fmt_text, formats.text);
    }

    #[test]
    fn default_presets_layer_header_over_base() {
        let formats = derive_default_xlsx_formats();
        assert_eq!(formats.header.bold, Some(true));
        assert_eq!(formats.header.align, Some(EnumCellAlign::Center));
        assert_eq!(formats.header.font_name, formats.text.font_name);
        assert_eq!(formats.amount.align, Some(EnumCellAlign::Right));
    }
}
