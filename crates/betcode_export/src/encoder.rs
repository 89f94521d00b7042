//! Encoder seam and the XLSX encoder that delivers files to a directory.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use betcode_io_xlsx::{
    SpecXlsxColumn, SpecXlsxFormatPresets, SpecXlsxReport, SpecXlsxSheetWriteOptions, XlsxWriter,
    derive_default_xlsx_formats, derive_unique_name,
};
use tempfile::NamedTempFile;

use crate::conf::C_SHEET_NAME_DEFAULT;
use crate::error::EncodeError;
use crate::spec::SpecExportTable;

/// Maximum file name length accepted by common filesystems.
const N_LEN_FILE_NAME_MAX: usize = 255;

////////////////////////////////////////////////////////////////////////////////
// #region Seam

/// Result of one successful encode call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecEncodeOutcome {
    /// Name the file was delivered under.
    pub file_name: String,
    /// Delivered path, when the encoder writes to disk.
    pub path: Option<PathBuf>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

/// Turns a logical table into a delivered file. Called once per export.
pub trait TableEncoder {
    fn encode(
        &self,
        table: &SpecExportTable,
        file_name: &str,
    ) -> Result<SpecEncodeOutcome, EncodeError>;
}

impl<T: TableEncoder + ?Sized> TableEncoder for &T {
    fn encode(
        &self,
        table: &SpecExportTable,
        file_name: &str,
    ) -> Result<SpecEncodeOutcome, EncodeError> {
        (**self).encode(table, file_name)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region XlsxEncoder

/// Policy when the target file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumFileConflictStrategy {
    /// Replace the existing file.
    #[default]
    Overwrite,
    /// Fail with [`EncodeError::FileExists`].
    Error,
    /// Deliver under the first free `<stem>__N.<ext>` name.
    Rename,
}

/// Options of [`XlsxTableEncoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxEncoderOptions {
    /// Directory files are delivered into; must exist.
    pub dir_out: PathBuf,
    /// Worksheet name.
    pub sheet_name: String,
    /// Existing-file policy.
    pub rule_conflict_file: EnumFileConflictStrategy,
    /// Keep the header row visible while scrolling.
    pub if_freeze_header: bool,
    /// Number format override for amount columns.
    pub amount_num_format: Option<String>,
    /// Cell format presets.
    pub formats: SpecXlsxFormatPresets,
}

impl Default for SpecXlsxEncoderOptions {
    fn default() -> Self {
        Self {
            dir_out: PathBuf::from("."),
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
            rule_conflict_file: EnumFileConflictStrategy::Overwrite,
            if_freeze_header: true,
            amount_num_format: None,
            formats: derive_default_xlsx_formats(),
        }
    }
}

impl SpecXlsxEncoderOptions {
    /// Default options delivering into `dir_out`.
    pub fn with_dir_out(dir_out: impl Into<PathBuf>) -> Self {
        Self {
            dir_out: dir_out.into(),
            ..Default::default()
        }
    }
}

/// One-sheet XLSX encoder backed by [`XlsxWriter`].
///
/// The workbook is fully serialized in memory and staged in a uniquely named
/// temporary file inside the output directory, then persisted under its final
/// name in one filesystem operation. A failed or concurrent export never
/// leaves a partial file behind.
#[derive(Debug, Clone, Default)]
pub struct XlsxTableEncoder {
    options: SpecXlsxEncoderOptions,
}

impl XlsxTableEncoder {
    pub fn new(options: SpecXlsxEncoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SpecXlsxEncoderOptions {
        &self.options
    }

    /// Serialize `table` into xlsx bytes without touching the filesystem.
    pub fn encode_to_buffer(&self, table: &SpecExportTable) -> Result<Vec<u8>, EncodeError> {
        self.build_workbook(table).map(|(v_bytes, _)| v_bytes)
    }

    fn build_workbook(
        &self,
        table: &SpecExportTable,
    ) -> Result<(Vec<u8>, SpecXlsxReport), EncodeError> {
        let l_columns: Vec<SpecXlsxColumn> = table.columns.iter().map(Into::into).collect();
        let sheet_options = SpecXlsxSheetWriteOptions {
            if_freeze_header: self.options.if_freeze_header,
            amount_num_format: self.options.amount_num_format.clone(),
        };

        let output = XlsxWriter::new(self.options.formats.clone()).write_sheet(
            &self.options.sheet_name,
            &l_columns,
            &table.rows,
            &sheet_options,
        )?;
        Ok(output)
    }

    fn stage_file(&self, v_bytes: &[u8]) -> Result<NamedTempFile, EncodeError> {
        let mut file_tmp =
            NamedTempFile::new_in(&self.options.dir_out).map_err(|source| EncodeError::Io {
                path: self.options.dir_out.clone(),
                source,
            })?;
        file_tmp
            .write_all(v_bytes)
            .and_then(|()| file_tmp.as_file().sync_all())
            .map_err(|source| EncodeError::Io {
                path: file_tmp.path().to_path_buf(),
                source,
            })?;
        Ok(file_tmp)
    }

    /// Move the staged file to its final name according to the conflict rule.
    fn deliver(&self, file_tmp: NamedTempFile, file_name: &str) -> Result<PathBuf, EncodeError> {
        let path_target = self.options.dir_out.join(file_name);

        match self.options.rule_conflict_file {
            EnumFileConflictStrategy::Overwrite => {
                if path_target.exists() {
                    tracing::warn!(path = %path_target.display(), "overwriting existing export file");
                }
                file_tmp
                    .persist(&path_target)
                    .map_err(|err| EncodeError::Io {
                        path: path_target.clone(),
                        source: err.error,
                    })?;
                Ok(path_target)
            }
            EnumFileConflictStrategy::Error => match file_tmp.persist_noclobber(&path_target) {
                Ok(_) => Ok(path_target),
                Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                    Err(EncodeError::FileExists { path: path_target })
                }
                Err(err) => Err(EncodeError::Io {
                    path: path_target,
                    source: err.error,
                }),
            },
            EnumFileConflictStrategy::Rename => {
                let mut file_tmp = file_tmp;
                let mut path_candidate = path_target;
                loop {
                    match file_tmp.persist_noclobber(&path_candidate) {
                        Ok(_) => return Ok(path_candidate),
                        Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                            file_tmp = err.file;
                            path_candidate = self.derive_free_path(file_name);
                        }
                        Err(err) => {
                            return Err(EncodeError::Io {
                                path: path_candidate,
                                source: err.error,
                            });
                        }
                    }
                }
            }
        }
    }

    /// First `<stem>__N.<ext>` in the output directory not taken right now.
    fn derive_free_path(&self, file_name: &str) -> PathBuf {
        let c_stem = Path::new(file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| file_name.to_string());
        let c_suffix = Path::new(file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let n_len_stem_max = N_LEN_FILE_NAME_MAX.saturating_sub(c_suffix.len());
        let is_taken = |candidate: &str| {
            candidate == c_stem
                || self
                    .options
                    .dir_out
                    .join(format!("{candidate}{c_suffix}"))
                    .exists()
        };
        let c_stem_unique = derive_unique_name(&c_stem, n_len_stem_max, is_taken);
        self.options.dir_out.join(format!("{c_stem_unique}{c_suffix}"))
    }
}

impl TableEncoder for XlsxTableEncoder {
    fn encode(
        &self,
        table: &SpecExportTable,
        file_name: &str,
    ) -> Result<SpecEncodeOutcome, EncodeError> {
        if !self.options.dir_out.is_dir() {
            return Err(EncodeError::OutputDirMissing {
                path: self.options.dir_out.clone(),
            });
        }

        let (v_bytes, report) = self.build_workbook(table)?;
        let file_tmp = self.stage_file(&v_bytes)?;
        let path_target = self.deliver(file_tmp, file_name)?;

        let file_name_final = path_target
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| file_name.to_string());
        let mut warnings = report.warnings;
        if file_name_final != file_name {
            warnings.push(format!(
                "File '{file_name}' already existed; delivered as '{file_name_final}'."
            ));
        }

        Ok(SpecEncodeOutcome {
            file_name: file_name_final,
            path: Some(path_target),
            warnings,
        })
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
