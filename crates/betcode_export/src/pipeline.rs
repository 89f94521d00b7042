//! Export pipeline: validate, map, lay out, name, encode.

use crate::encoder::{SpecXlsxEncoderOptions, TableEncoder, XlsxTableEncoder};
use crate::error::ExportError;
use crate::layout::derive_column_layout;
use crate::naming::{Clock, SystemClock, derive_export_file_name_or};
use crate::row::{ChronoDateFormatter, DateFormatter, derive_export_row};
use crate::spec::{
    SpecBetCodeRecord, SpecExportOptions, SpecExportReport, SpecExportRequest, SpecExportTable,
};

/// Stateless export orchestrator.
///
/// Holds read-only collaborators only; every call is an independent
/// all-or-nothing transaction.
#[derive(Debug, Clone, Default)]
pub struct ExportPipeline<F = ChronoDateFormatter, E = XlsxTableEncoder, C = SystemClock> {
    formatter: F,
    encoder: E,
    clock: C,
    options: SpecExportOptions,
}

impl ExportPipeline {
    /// Default XLSX pipeline delivering into the encoder's output directory.
    pub fn xlsx(encoder_options: SpecXlsxEncoderOptions) -> Self {
        Self::new(
            ChronoDateFormatter,
            XlsxTableEncoder::new(encoder_options),
            SystemClock,
            SpecExportOptions::default(),
        )
    }
}

impl<F, E, C> ExportPipeline<F, E, C>
where
    F: DateFormatter,
    E: TableEncoder,
    C: Clock,
{
    pub fn new(formatter: F, encoder: E, clock: C, options: SpecExportOptions) -> Self {
        Self {
            formatter,
            encoder,
            clock,
            options,
        }
    }

    pub fn options(&self) -> &SpecExportOptions {
        &self.options
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Export `records` and report success as a boolean.
    ///
    /// Failures are logged by [`Self::run`]; nothing propagates to the caller.
    pub fn export(&self, records: Option<&[SpecBetCodeRecord]>, base_name: Option<&str>) -> bool {
        self.run(&SpecExportRequest { records, base_name }).is_ok()
    }

    /// Export one request, returning the report or the terminal error.
    pub fn run(&self, request: &SpecExportRequest<'_>) -> Result<SpecExportReport, ExportError> {
        let l_records = match request.records {
            Some(l_records) if !l_records.is_empty() => l_records,
            _ => {
                tracing::error!("no bet code records to export");
                return Err(ExportError::EmptyInput);
            }
        };

        let span = tracing::info_span!("export_bet_codes", n_records = l_records.len());
        let _enter = span.enter();

        let table = self
            .build_table(l_records)
            .inspect_err(|err| tracing::error!(error = %err, "bet code export failed"))?;

        let file_name = derive_export_file_name_or(
            request.base_name,
            &self.options.default_base_name,
            self.clock.today(),
        );
        tracing::debug!(file_name = %file_name, "encoding export table");

        let outcome = self
            .encoder
            .encode(&table, &file_name)
            .map_err(ExportError::from)
            .inspect_err(|err| tracing::error!(error = %err, "bet code export failed"))?;

        for warning in &outcome.warnings {
            tracing::warn!("{warning}");
        }
        tracing::info!(
            file_name = %outcome.file_name,
            n_rows = table.n_rows(),
            "bet code export completed"
        );

        Ok(SpecExportReport {
            file_name: outcome.file_name,
            path: outcome.path,
            n_rows: table.n_rows(),
            warnings: outcome.warnings,
        })
    }

    /// Map every record into the export table without encoding it.
    ///
    /// The first failing record aborts the whole batch. Nothing is logged;
    /// the error is returned to the caller.
    pub fn build_table(
        &self,
        records: &[SpecBetCodeRecord],
    ) -> Result<SpecExportTable, ExportError> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                derive_export_row(record, &self.formatter, &self.options).map_err(|source| {
                    ExportError::RowMapping {
                        index,
                        id: record.id.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SpecExportTable {
            columns: derive_column_layout(self.options.column_headers.as_ref()),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use betcode_io_xlsx::EnumCellValue;
    use calamine::{Data, Reader, Xlsx, open_workbook};
    use chrono::{Locale, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    use super::*;
    use crate::encoder::SpecEncodeOutcome;
    use crate::error::{EncodeError, FormatError, RowMappingError};
    use crate::naming::FixedClock;
    use crate::spec::{EnumBetCodeId, EnumBetCodeStatus, EnumExportColumn};

    #[derive(Default)]
    struct CountingFormatter {
        n_calls: Cell<usize>,
    }

    impl DateFormatter for CountingFormatter {
        fn format(
            &self,
            timestamp: &NaiveDateTime,
            pattern: &str,
            locale: Locale,
        ) -> Result<String, FormatError> {
            self.n_calls.set(self.n_calls.get() + 1);
            ChronoDateFormatter.format(timestamp, pattern, locale)
        }
    }

    #[derive(Default)]
    struct RecordingEncoder {
        l_calls: RefCell<Vec<(SpecExportTable, String)>>,
        reject: Option<String>,
    }

    impl TableEncoder for RecordingEncoder {
        fn encode(
            &self,
            table: &SpecExportTable,
            file_name: &str,
        ) -> Result<SpecEncodeOutcome, EncodeError> {
            self.l_calls
                .borrow_mut()
                .push((table.clone(), file_name.to_string()));
            if let Some(reason) = &self.reject {
                return Err(EncodeError::Rejected(reason.clone()));
            }
            Ok(SpecEncodeOutcome {
                file_name: file_name.to_string(),
                path: None,
                warnings: vec![],
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    fn pipeline<'a>(
        formatter: &'a CountingFormatter,
        encoder: &'a RecordingEncoder,
    ) -> ExportPipeline<&'a CountingFormatter, &'a RecordingEncoder, FixedClock> {
        ExportPipeline::new(
            formatter,
            encoder,
            FixedClock(today()),
            SpecExportOptions::default(),
        )
    }

    fn record(id: i64) -> SpecBetCodeRecord {
        SpecBetCodeRecord {
            id: EnumBetCodeId::Integer(id),
            content: "A-B-100".to_string(),
            stake_amount: Some(50_000.0),
            potential_winning: Some(0.0),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 5)
                .and_then(|date| date.and_hms_opt(10, 30, 0))
                .map(Into::into),
            status: EnumBetCodeStatus::Pending,
        }
    }

    #[test]
    fn export_end_to_end_single_record() {
        let formatter = CountingFormatter::default();
        let encoder = RecordingEncoder::default();
        let l_records = vec![record(1)];

        assert!(pipeline(&formatter, &encoder).export(Some(l_records.as_slice()), Some("Test")));

        let l_calls = encoder.l_calls.borrow();
        assert_eq!(l_calls.len(), 1);
        let (table, file_name) = &l_calls[0];
        assert_eq!(file_name, "Test_19-10-2026.xlsx");
        assert_eq!(table.n_rows(), 1);
        assert_eq!(
            table.rows[0].cells(),
            &[
                EnumCellValue::Number(1.0),
                EnumCellValue::String("A-B-100".to_string()),
                EnumCellValue::Number(50_000.0),
                EnumCellValue::Number(0.0),
                EnumCellValue::String("10:30 - 05/01/2024".to_string()),
                EnumCellValue::String("awaiting processing".to_string()),
            ]
        );
        assert_eq!(
            table.headers(),
            ["ID", "Content", "Stake Amount", "Potential Winning", "Created At", "Status"]
        );
    }

    #[test]
    fn export_rejects_empty_and_absent_input_without_side_effects() {
        let formatter = CountingFormatter::default();
        let encoder = RecordingEncoder::default();
        let export_pipeline = pipeline(&formatter, &encoder);

        assert!(!export_pipeline.export(Some(&[][..]), None));
        assert!(!export_pipeline.export(None, Some("Report")));
        assert!(matches!(
            export_pipeline.run(&SpecExportRequest::default()),
            Err(ExportError::EmptyInput)
        ));
        assert_eq!(formatter.n_calls.get(), 0);
        assert!(encoder.l_calls.borrow().is_empty());
    }

    #[test]
    fn export_aborts_whole_batch_on_row_failure() {
        let formatter = CountingFormatter::default();
        let encoder = RecordingEncoder::default();
        let mut l_records = vec![record(1), record(2), record(3)];
        l_records[1].created_at = None;

        let err = pipeline(&formatter, &encoder)
            .run(&SpecExportRequest::new(&l_records))
            .expect_err("row failure");
        match err {
            ExportError::RowMapping { index, id, source } => {
                assert_eq!(index, 1);
                assert_eq!(id, EnumBetCodeId::Integer(2));
                assert_eq!(source, RowMappingError::MissingTimestamp);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(encoder.l_calls.borrow().is_empty());
        assert!(!pipeline(&formatter, &encoder).export(Some(l_records.as_slice()), None));
    }

    #[test]
    fn build_table_returns_row_error_without_encoding() {
        let formatter = CountingFormatter::default();
        let encoder = RecordingEncoder::default();
        let mut l_records = vec![record(1), record(2)];
        l_records[0].created_at = None;

        let err = pipeline(&formatter, &encoder)
            .build_table(&l_records)
            .expect_err("row failure");
        assert!(matches!(err, ExportError::RowMapping { index: 0, .. }));
        assert!(encoder.l_calls.borrow().is_empty());
    }

    #[test]
    fn export_reports_encoder_failure() {
        let formatter = CountingFormatter::default();
        let encoder = RecordingEncoder {
            reject: Some("unsupported output target".to_string()),
            ..Default::default()
        };
        let l_records = vec![record(1)];

        let err = pipeline(&formatter, &encoder)
            .run(&SpecExportRequest::new(&l_records))
            .expect_err("encoder failure");
        assert!(matches!(
            err,
            ExportError::Encoding(EncodeError::Rejected(_))
        ));
        assert_eq!(encoder.l_calls.borrow().len(), 1);
    }

    #[test]
    fn run_returns_report_with_default_base_name() {
        let formatter = CountingFormatter::default();
        let encoder = RecordingEncoder::default();
        let l_records = vec![record(1), record(2)];

        let report = pipeline(&formatter, &encoder)
            .run(&SpecExportRequest::new(&l_records).with_base_name("  "))
            .expect("export");
        assert_eq!(report.file_name, "BetCodes_19-10-2026.xlsx");
        assert_eq!(report.n_rows, 2);
        assert_eq!(report.path, None);
        assert_eq!(formatter.n_calls.get(), 2);
    }

    #[test]
    fn repeated_export_with_frozen_clock_is_identical() {
        let formatter = CountingFormatter::default();
        let encoder = RecordingEncoder::default();
        let l_records = vec![record(1), record(2)];
        let export_pipeline = pipeline(&formatter, &encoder);

        assert!(export_pipeline.export(Some(l_records.as_slice()), Some("Report")));
        assert!(export_pipeline.export(Some(l_records.as_slice()), Some("Report")));

        let l_calls = encoder.l_calls.borrow();
        assert_eq!(l_calls[0], l_calls[1]);
        assert_eq!(l_calls[0].1, "Report_19-10-2026.xlsx");
    }

    #[test]
    fn export_applies_header_overrides() {
        let formatter = CountingFormatter::default();
        let encoder = RecordingEncoder::default();
        let options = SpecExportOptions {
            column_headers: Some(["A", "B", "C", "D", "E", "F"].map(str::to_string)),
            ..Default::default()
        };
        let export_pipeline =
            ExportPipeline::new(&formatter, &encoder, FixedClock(today()), options);
        assert!(export_pipeline.options().column_headers.is_some());
        assert!(export_pipeline.encoder().l_calls.borrow().is_empty());

        let table = export_pipeline.build_table(&[record(1)]).expect("table");
        assert_eq!(table.headers(), ["A", "B", "C", "D", "E", "F"]);
        assert_eq!(table.columns[0].key(), "id");
    }

    #[test]
    fn export_writes_readable_workbook_through_xlsx_encoder() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let export_pipeline = ExportPipeline::new(
            ChronoDateFormatter,
            XlsxTableEncoder::new(SpecXlsxEncoderOptions::with_dir_out(tmp.path())),
            FixedClock(today()),
            SpecExportOptions::default(),
        );
        let mut l_records = vec![record(1), record(2)];
        l_records[1].id = EnumBetCodeId::from("BC-2");
        l_records[1].stake_amount = None;

        let report = export_pipeline
            .run(&SpecExportRequest::new(&l_records).with_base_name("Test"))
            .expect("export");
        assert_eq!(report.file_name, "Test_19-10-2026.xlsx");
        let path = report.path.expect("delivered path");
        assert_eq!(path, tmp.path().join("Test_19-10-2026.xlsx"));

        let mut workbook: Xlsx<_> = open_workbook(&path).expect("open xlsx");
        assert_eq!(workbook.sheet_names(), ["BetCodes"]);
        let range = workbook.worksheet_range("BetCodes").expect("sheet range");
        let l_rows: Vec<Vec<Data>> = range.rows().map(|cells| cells.to_vec()).collect();

        assert_eq!(l_rows.len(), 3);
        assert_eq!(
            l_rows[0],
            ["ID", "Content", "Stake Amount", "Potential Winning", "Created At", "Status"]
                .map(|header| Data::String(header.to_string()))
        );
        assert_eq!(
            l_rows[1],
            [
                Data::Float(1.0),
                Data::String("A-B-100".to_string()),
                Data::Float(50_000.0),
                Data::Float(0.0),
                Data::String("10:30 - 05/01/2024".to_string()),
                Data::String("awaiting processing".to_string()),
            ]
        );
        assert_eq!(l_rows[2][0], Data::String("BC-2".to_string()));
        assert_eq!(l_rows[2][2], Data::Float(0.0));
    }

    proptest! {
        #[test]
        fn table_has_one_row_per_record_in_input_order(
            l_ids in proptest::collection::vec(any::<i64>(), 1..40),
        ) {
            let formatter = CountingFormatter::default();
            let encoder = RecordingEncoder::default();
            let l_records: Vec<SpecBetCodeRecord> = l_ids.iter().copied().map(record).collect();

            let table = pipeline(&formatter, &encoder)
                .build_table(&l_records)
                .expect("table");
            prop_assert_eq!(table.n_rows(), l_records.len());
            for (row, id) in table.rows.iter().zip(&l_ids) {
                prop_assert_eq!(row.cells().len(), EnumExportColumn::ALL.len());
                prop_assert_eq!(row.get(EnumExportColumn::Id), &EnumCellValue::Number(*id as f64));
            }
        }
    }
}
