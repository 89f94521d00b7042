//! Export file naming and the calendar clock seam.

use betcode_io_xlsx::sanitize_file_name_component;
use chrono::{Local, NaiveDate};

use crate::conf::{
    C_BASE_NAME_DEFAULT, C_FILE_DATE_PATTERN, C_FILE_EXTENSION, C_FILE_NAME_REPLACEMENT,
};

/// Source of the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local system calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// `"<base_name>_<dd-MM-yyyy>.xlsx"`, with `"BetCodes"` as the default base.
pub fn derive_export_file_name(base_name: Option<&str>, date: NaiveDate) -> String {
    derive_export_file_name_or(base_name, C_BASE_NAME_DEFAULT, date)
}

/// Same as [`derive_export_file_name`] with a caller-chosen default base.
///
/// A blank base name falls back to `default_base_name`. Characters that are
/// illegal in file names are replaced. Same inputs always give the same name.
pub fn derive_export_file_name_or(
    base_name: Option<&str>,
    default_base_name: &str,
    date: NaiveDate,
) -> String {
    let c_base = base_name
        .map(|name| sanitize_file_name_component(name, C_FILE_NAME_REPLACEMENT))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| {
            sanitize_file_name_component(default_base_name, C_FILE_NAME_REPLACEMENT)
        });
    let c_base = if c_base.is_empty() {
        C_BASE_NAME_DEFAULT.to_string()
    } else {
        c_base
    };

    format!(
        "{c_base}_{}.{C_FILE_EXTENSION}",
        date.format(C_FILE_DATE_PATTERN)
    )
}
